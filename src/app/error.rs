use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadstashError {
    /// Bad input caught before any network call.
    #[error("{0}")]
    Validation(String),

    /// Transport failure: no response reached us at all.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status or an error envelope.
    #[error("Server error ({status}): {message}")]
    Remote { status: u16, message: String },

    #[error("Item not found: {0}")]
    NotFound(String),

    /// No item id was given and nothing is remembered in this session.
    #[error("No item to work with; pass an id or save a link first")]
    UnresolvableItem,

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ReadstashError>;
