//! Generates Version-1 QR Code symbols from text, 8-bit byte mode only.
//!
//! This crate is a deliberately narrowed QR Code encoder: one fixed version
//! (21x21 modules), one fixed segment mode, and no decoder. The goal is a
//! small, fully-specified core that a rasterizer or other output layer can
//! depend on without pulling in the full QR Code Model 2 surface (multi-version
//! selection, numeric/alphanumeric/kanji segments, ECI, structured append).
//!
//! # Examples
//!
//! ```
//! use q_rs::{CodeEcc, QrCode};
//!
//! let qr = QrCode::encode(CodeEcc::Medium, "Hello, World!").unwrap();
//! for y in -qr.quiet_zone()..qr.size() + qr.quiet_zone() {
//!     for x in -qr.quiet_zone()..qr.size() + qr.quiet_zone() {
//!         let _dark = qr.module(x, y);
//!     }
//! }
//! ```

mod bit_buffer;
mod code_ecc;
mod data_encoder;
mod error;
mod gf256;
mod mask;
mod qr_code;
mod reed_solomon;

pub use bit_buffer::BitBuffer;
pub use code_ecc::{CodeEcc, QrInfo, CHAR_COUNT_BITS, MODE_EIGHT_BITS};
pub use error::QrError;
pub use mask::Mask;
pub use qr_code::QrCode;
