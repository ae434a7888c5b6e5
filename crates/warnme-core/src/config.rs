use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Geocoding provider settings
    #[serde(default)]
    pub geocoding: GeocodingConfig,

    /// Crime data settings
    #[serde(default)]
    pub crime: CrimeConfig,

    /// Alert mailbox settings
    #[serde(default)]
    pub mail: MailConfig,
}

/// Geocoding provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// API key for the geocoding provider (can be set via environment)
    pub api_key: Option<String>,
}

impl GeocodingConfig {
    /// Check if an API key is present (not a placeholder)
    pub fn is_configured(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|k| !k.is_empty() && !k.starts_with("YOUR_"))
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("WARNME_MAPS_API_KEY").ok(),
        }
    }
}

/// Crime frequency query defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrimeConfig {
    /// Default search radius in meters
    #[serde(default = "default_radius_m")]
    pub radius_m: f64,

    /// Column holding the `"lat,lon"` pair in incident CSV files
    #[serde(default = "default_latlon_column")]
    pub latlon_column: String,

    /// Column holding the incident timestamp in incident CSV files
    #[serde(default = "default_date_column")]
    pub date_column: String,

    /// Column holding the offense description in incident CSV files
    #[serde(default = "default_offense_column")]
    pub offense_column: String,
}

fn default_radius_m() -> f64 {
    500.0
}

fn default_latlon_column() -> String {
    "Block_Location".to_string()
}

fn default_date_column() -> String {
    "EVENTDT".to_string()
}

fn default_offense_column() -> String {
    "OFFENSE".to_string()
}

impl Default for CrimeConfig {
    fn default() -> Self {
        Self {
            radius_m: default_radius_m(),
            latlon_column: default_latlon_column(),
            date_column: default_date_column(),
            offense_column: default_offense_column(),
        }
    }
}

/// Alert mailbox configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Sender address that campus alert emails come from
    #[serde(default = "default_alert_sender")]
    pub alert_sender: String,

    /// How far back to search for alert emails, in days
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,

    /// Maximum number of alert emails to fetch per run
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Gmail OAuth access token (usually set via environment)
    pub access_token: Option<String>,
}

fn default_alert_sender() -> String {
    "ucberkeley@warnme.berkeley.edu".to_string()
}

fn default_lookback_days() -> u32 {
    180
}

fn default_max_results() -> usize {
    200
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            alert_sender: default_alert_sender(),
            lookback_days: default_lookback_days(),
            max_results: default_max_results(),
            access_token: std::env::var("WARNME_GMAIL_TOKEN").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("warnme");

        Self {
            config_dir,
            geocoding: GeocodingConfig::default(),
            crime: CrimeConfig::default(),
            mail: MailConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(&config_path)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents)
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        if !validation.warnings.is_empty() {
            for warning in &validation.warnings {
                tracing::warn!("Config warning: {}", warning);
            }
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        // Geocoding key missing is only a warning; lookups fail at call time
        if !self.geocoding.is_configured() {
            result.add_warning(
                "geocoding.api_key",
                "Geocoding API key not configured - address lookups will be unavailable",
            );
        }

        if self.crime.radius_m <= 0.0 {
            result.add_error("crime.radius_m", "Search radius must be greater than 0");
        } else if self.crime.radius_m > 50_000.0 {
            result.add_warning("crime.radius_m", "Search radius is unusually large (>50km)");
        }

        for (field, value) in [
            ("crime.latlon_column", &self.crime.latlon_column),
            ("crime.date_column", &self.crime.date_column),
            ("crime.offense_column", &self.crime.offense_column),
        ] {
            if value.trim().is_empty() {
                result.add_error(field, "Column name must not be empty");
            }
        }

        if !self.mail.alert_sender.contains('@') {
            result.add_error(
                "mail.alert_sender",
                format!("Not an email address: {}", self.mail.alert_sender),
            );
        }

        if self.mail.lookback_days == 0 {
            result.add_warning("mail.lookback_days", "Alert search window is empty (0 days)");
        } else if self.mail.lookback_days > 3650 {
            result.add_warning(
                "mail.lookback_days",
                "Alert search window is more than 10 years",
            );
        }

        if self.mail.max_results == 0 {
            result.add_warning("mail.max_results", "Alert fetching disabled (0 results)");
        }

        result
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        // Ensure config directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("warnme");

        Ok(config_dir.join("config.toml"))
    }
}
