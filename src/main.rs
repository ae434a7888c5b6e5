use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use warnme_core::Config;
use warnme_crime::{crime_frequency, records_from_csv, ColumnSpec, FrequencyQuery};
use warnme_geocode::{Address, Coordinates, GeocodeClient, Resolution};
use warnme_mail::{write_csv, GmailClient, SearchQuery};

#[derive(Parser)]
#[command(name = "warnme", version, about = "Campus crime alert analysis toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Geocode a street address to a "lat,lng" pair
    Geocode {
        /// Free-text street address
        address: String,
    },

    /// Count incidents near a point within a time window
    Frequency {
        /// Incident table (CSV)
        #[arg(long)]
        csv: PathBuf,

        /// Street address to center the search on (geocoded first)
        #[arg(long, conflicts_with_all = ["lat", "lon"])]
        address: Option<String>,

        /// Center latitude
        #[arg(long, requires = "lon")]
        lat: Option<f64>,

        /// Center longitude
        #[arg(long, requires = "lat")]
        lon: Option<f64>,

        /// Search radius in meters (defaults to the configured radius)
        #[arg(long)]
        radius: Option<f64>,

        /// Window start, RFC 3339 (e.g. 2024-01-01T00:00:00Z)
        #[arg(long)]
        start: DateTime<Utc>,

        /// Window end, RFC 3339
        #[arg(long)]
        end: DateTime<Utc>,
    },

    /// Fetch campus alert emails and export them to CSV
    Alerts {
        /// Output file
        #[arg(long, default_value = "warnme_emails.csv")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize core
    warnme_core::init()?;

    let (config, _validation) = Config::load_validated()?;
    tracing::info!("WarnMe toolkit started");

    match cli.command {
        Command::Geocode { address } => {
            let client = geocode_client(&config)?;
            let result = client.geocode(&address).await?;
            println!("{}", result);
        }

        Command::Frequency {
            csv,
            address,
            lat,
            lon,
            radius,
            start,
            end,
        } => {
            let center = match (address, lat, lon) {
                (Some(address), _, _) => resolve_center(&config, &address).await?,
                (None, Some(lat), Some(lon)) => Coordinates {
                    latitude: lat,
                    longitude: lon,
                },
                _ => bail!("Provide either --address or --lat/--lon"),
            };

            let file = std::fs::File::open(&csv)
                .with_context(|| format!("Failed to open {}", csv.display()))?;
            let columns = ColumnSpec {
                offense: config.crime.offense_column.clone(),
                lat_lon: config.crime.latlon_column.clone(),
                date: config.crime.date_column.clone(),
            };
            let records = records_from_csv(file, &columns)?;

            let query = FrequencyQuery {
                center,
                radius_m: radius.unwrap_or(config.crime.radius_m),
                start,
                end,
            };
            let matches = crime_frequency(&records, &query);

            for record in &matches {
                if let Some(occurred_at) = record.occurred_at {
                    println!("{}  {}", occurred_at.format("%Y-%m-%d %H:%M"), record.offense);
                }
            }
            println!(
                "{} incidents within {} m of {}",
                matches.len(),
                query.radius_m,
                query.center
            );
        }

        Command::Alerts { out } => {
            let token = config
                .mail
                .access_token
                .as_deref()
                .context("No Gmail access token configured (set WARNME_GMAIL_TOKEN)")?;
            let mailbox = GmailClient::new(token);

            let query = SearchQuery::new()
                .from_sender(&config.mail.alert_sender)
                .newer_than_days(config.mail.lookback_days);
            let records = mailbox.search(&query, config.mail.max_results).await?;
            println!("Found {} alert emails.", records.len());

            let file = std::fs::File::create(&out)
                .with_context(|| format!("Failed to create {}", out.display()))?;
            write_csv(&records, file)?;
            println!("Exported to {}", out.display());
        }
    }

    Ok(())
}

fn geocode_client(config: &Config) -> Result<GeocodeClient> {
    let api_key = config
        .geocoding
        .api_key
        .as_deref()
        .context("No geocoding API key configured (set WARNME_MAPS_API_KEY)")?;
    Ok(GeocodeClient::new(api_key)?)
}

async fn resolve_center(config: &Config, address: &str) -> Result<Coordinates> {
    let Some(address) = Address::new(address) else {
        bail!("Address is empty");
    };

    let client = geocode_client(config)?;
    match client.resolve(&address).await? {
        Resolution::Found(coordinates) => Ok(coordinates),
        Resolution::NoMatch => bail!("No location found for {}", address.as_str()),
    }
}
