//! Rasterizes `q_rs::QrCode` symbols to PNG.
//!
//! Kept as a separate crate so that consumers who only need the bare module
//! grid (e.g. to drive their own renderer) aren't forced to pull in `image`.

mod error;

use std::io::Cursor;

use image::imageops::{resize, FilterType};
use image::{DynamicImage, ImageBuffer, ImageFormat, Luma};
use q_rs::QrCode;

pub use error::QrPngError;

/// Renders `qr` to a PNG byte buffer, one source pixel per module, including
/// the quiet zone, then upscaled `scale`x with nearest-neighbor resampling so
/// module edges stay sharp.
///
/// Returns `QrPngError::InvalidScale` if `scale == 0`.
pub fn render_png(qr: &QrCode, scale: u32) -> Result<Vec<u8>, QrPngError> {
    if scale == 0 {
        return Err(QrPngError::InvalidScale { scale });
    }

    let quiet_zone = qr.quiet_zone();
    let side = (qr.size() + 2 * quiet_zone) as u32;

    let base: ImageBuffer<Luma<u8>, Vec<u8>> = ImageBuffer::from_fn(side, side, |px, py| {
        let x = px as i32 - quiet_zone;
        let y = py as i32 - quiet_zone;
        if qr.module(x, y) {
            Luma([0u8])
        } else {
            Luma([255u8])
        }
    });

    let resized = resize(&base, side * scale, side * scale, FilterType::Nearest);

    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(resized).write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}
