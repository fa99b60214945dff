use thiserror::Error;

pub type ChannelResult<T> = Result<T, ChannelError>;

/// Why a client-side thumbnail could not be produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThumbnailError {
    #[error("no decoded frame after {0} ms")]
    Timeout(u32),

    #[error("video has no decoded frame (0x0)")]
    NoDecodedFrame,

    #[error("canvas error: {0}")]
    Canvas(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChannelError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error: {status} {body}")]
    Http { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Decode(String),

    #[error("Select a video file (got \"{0}\")")]
    InvalidFileType(String),

    #[error("Select a video file")]
    FileRequired,

    #[error("Thumbnail capture failed: {0}")]
    Thumbnail(#[from] ThumbnailError),

    #[error("Could not read video metadata: {0}")]
    MediaProbe(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl ChannelError {
    /// Message shown to the operator. Input problems are reported as they are,
    /// everything else collapses into a generic line.
    pub fn user_message(&self) -> String {
        match self {
            ChannelError::InvalidFileType(_) | ChannelError::FileRequired => self.to_string(),
            ChannelError::Network(_) | ChannelError::Http { .. } | ChannelError::Decode(_) => {
                "The server could not be reached, try again".to_string()
            }
            _ => "Something went wrong, try again".to_string(),
        }
    }

    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            ChannelError::InvalidFileType(_) | ChannelError::FileRequired
        )
    }
}

impl From<gloo_net::Error> for ChannelError {
    fn from(e: gloo_net::Error) -> Self {
        match e {
            gloo_net::Error::SerdeError(e) => ChannelError::Decode(e.to_string()),
            other => ChannelError::Network(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ChannelError {
    fn from(e: serde_json::Error) -> Self {
        ChannelError::Decode(e.to_string())
    }
}
