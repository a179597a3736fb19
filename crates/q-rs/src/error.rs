use thiserror::Error;

/// The error type when the supplied text does not fit the Version-1 capacity
/// of the requested error correction level.
///
/// Ways to handle this exception include:
///
/// - Lower the error correction level (e.g. from `High` to `Medium`).
/// - Shorten the text.
/// - Split the payload across multiple symbols at the caller's layer (not provided here).
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum QrError {
    #[error("text length = {len} bytes, capacity = {cap} bytes")]
    CapacityExceeded { len: usize, cap: usize },
}
