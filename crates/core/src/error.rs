use thiserror::Error;

pub type AdCostResult<T> = Result<T, AdCostError>;

#[derive(Error, Debug)]
pub enum AdCostError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Dataset file error ({path}): {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AdCostError {
    pub fn csv(path: impl Into<String>, source: csv::Error) -> Self {
        AdCostError::Csv {
            path: path.into(),
            source,
        }
    }
}

impl From<config::ConfigError> for AdCostError {
    fn from(e: config::ConfigError) -> Self {
        AdCostError::Config(e.to_string())
    }
}
