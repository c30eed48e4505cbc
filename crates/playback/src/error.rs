use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("Pointer device error: {0}")]
    Device(String),

    #[error("Failed to spawn playback thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error(transparent)]
    Lineart(#[from] lineart::LineartError),
}

pub type Result<T> = std::result::Result<T, PlaybackError>;
