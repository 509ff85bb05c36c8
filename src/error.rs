/// Error types shared by the catalog, settings and import layers
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GardenError {
    /// SQLite catalog failure
    #[error("catalog error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// settings.json or a metadata sidecar could not be read
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("thumbnail error: {0}")]
    Thumbnail(#[from] image::ImageError),

    /// The platform has no data/config/cache directory for us
    #[error("could not determine the {0} directory")]
    NoDirectory(&'static str),

    /// A blocking task panicked or was cancelled
    #[error("background task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, GardenError>;

impl From<tokio::task::JoinError> for GardenError {
    fn from(err: tokio::task::JoinError) -> Self {
        GardenError::Task(err.to_string())
    }
}
