use thiserror::Error;

pub type CanvasResult<T> = Result<T, CanvasError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CanvasError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("value {value} is outside [{min}, {max}]")]
    OutOfBounds { value: f64, min: f64, max: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("render failed: {0}")]
    RenderFailed(String),

    #[error("request superseded by a newer one")]
    Cancelled,
}

impl CanvasError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }
}
