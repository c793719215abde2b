use thiserror::Error;

/// Errors produced while encoding, reading back or configuring a QR symbol
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QrError {
    /// GF(256) division with a zero divisor
    #[error("GF(256) division by zero")]
    DivisionByZero,

    /// Input does not fit the Version-1/L byte-mode capacity
    #[error("input is {len} bytes, capacity is {capacity} bytes")]
    CapacityExceeded { len: usize, capacity: usize },

    #[error("encoding failed: {0}")]
    Encoding(String),

    #[error("mask pattern {0} is out of range 0-7")]
    InvalidMask(u8),

    #[error("matrix is {width}x{height}, expected 21x21")]
    InvalidDimension { width: usize, height: usize },

    #[error("format information is unreadable")]
    FormatUnreadable,

    #[error("too many codeword errors to correct")]
    UncorrectableCodewords,

    #[error("unsupported data mode 0b{0:04b}")]
    UnsupportedMode(u8),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

pub type Result<T> = std::result::Result<T, QrError>;
