use thiserror::Error;

/// Errors from decoding, sectioning, or scoring a test card.
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Image too small to split into sections: {width}x{height}")]
    ImageTooSmall { width: u32, height: u32 },

    #[error("Failed to load model: {0}")]
    ModelLoad(String),

    #[error("Inference failed: {0}")]
    Inference(String),
}
