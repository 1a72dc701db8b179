use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Content API credential is not configured")]
    MissingCredential,

    #[error("Content API error ({status}): {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid content API response: {0}")]
    InvalidResponse(String),

    #[error("Cache entry corrupted: {0}")]
    CacheCorruption(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Audio playback rejected: {0}")]
    Playback(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl GalleryError {
    /// Whether this error only means a newer request took over.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, GalleryError::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, GalleryError>;
