/// Result alias that carries the custom [`CarouselError`] type.
pub type Result<T> = std::result::Result<T, CarouselError>;

/// Common error type for the core crate.
///
/// Only the loading and configuration boundary produces errors. The engine
/// itself degrades to a static carousel instead of failing.
#[derive(Debug, thiserror::Error)]
pub enum CarouselError {
    /// Free-form message, mostly used by the command line driver.
    #[error("{0}")]
    Message(String),
    /// A configuration value that the engine cannot work with.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Malformed item list or configuration file.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl CarouselError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}

impl From<&str> for CarouselError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for CarouselError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
