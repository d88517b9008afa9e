use thiserror::Error;

pub type Result<T> = std::result::Result<T, VideoError>;

#[derive(Debug, Error)]
pub enum VideoError {
    #[error("stream truncated: needed {needed} bits, only {available} left")]
    Truncated { needed: usize, available: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No sentinel found before the input ran out. The normal way a stream ends.
    #[error("end of stream")]
    EndOfStream,

    #[error("frame payload could not be decoded: {0}")]
    Payload(String),

    #[error("ppm parse error: {0}")]
    Ppm(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl VideoError {
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, VideoError::EndOfStream)
    }
}

#[derive(Debug, Error)]
#[error("playback aborted after {frames_recovered} frames: {source}")]
pub struct PlaybackError {
    pub frames_recovered: usize,
    #[source]
    pub source: VideoError,
}

#[macro_export]
macro_rules! invalid_argument {
    ($($arg:tt)*) => {
        $crate::error::VideoError::InvalidArgument(format!($($arg)*))
    };
}
