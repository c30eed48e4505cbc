use thiserror::Error;

#[derive(Error, Debug)]
pub enum LineartError {
    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("No captured image available")]
    NoCapture,

    #[error("Image processing error: {0}")]
    Processing(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LineartError>;
