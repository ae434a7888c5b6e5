//! Crime-data error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrimeDataError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column: {0}")]
    MissingColumn(String),
}

impl CrimeDataError {
    /// User-friendly error message for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Csv(_) => "The incident file could not be read.".to_string(),
            Self::MissingColumn(name) => {
                format!("The incident file has no \"{}\" column.", name)
            }
        }
    }
}
