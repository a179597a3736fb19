use image::ImageError;
use q_rs::QrError;
use thiserror::Error;

/// Errors raised while rasterizing a symbol to PNG.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QrPngError {
    #[error("image error: {0}")]
    ImageError(#[from] ImageError),

    #[error("qr error: {0}")]
    QrError(#[from] QrError),

    #[error("invalid scale: {scale} (must be at least 1)")]
    InvalidScale { scale: u32 },
}
