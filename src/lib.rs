//! QNote QR - share-link QR code encoder
//!
//! Encodes short ASCII strings (QNote share links and PINs) as Version-1,
//! error-correction level L, byte-mode QR symbols: a 21x21 module matrix
//! ready for rasterization. Includes a reader for verifying output and a
//! renderer with a placeholder fallback.
//!
//! ```
//! let symbol = qnote_qr::encode("qnote.io#482913")?;
//! assert_eq!(symbol.size(), 21);
//! let decoded = qnote_qr::decoder::read_symbol(&symbol.modules)?;
//! assert_eq!(decoded.payload, b"qnote.io#482913");
//! # Ok::<(), qnote_qr::QrError>(())
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Encoder and renderer configuration
pub mod config;
/// Symbol reader (format, unmasking, Reed-Solomon, byte mode)
pub mod decoder;
/// QR encoding pipeline (GF(256), Reed-Solomon, placement, masking)
pub mod encoder;
/// Error types
pub mod error;
/// Core data structures (BitMatrix, QrSymbol, MaskPattern, etc.)
pub mod models;
/// Raster and terminal output
pub mod render;

pub use config::{EncoderConfig, MaskSelection, OverflowPolicy, RenderConfig};
pub use encoder::QrEncoder;
pub use error::{QrError, Result};
pub use models::{BitMatrix, ECLevel, MaskPattern, QrSymbol, Truncation, Version};

/// Encode `text` with the default configuration (automatic mask selection,
/// over-capacity input rejected)
pub fn encode(text: &str) -> Result<QrSymbol> {
    QrEncoder::default().encode(text)
}

/// Encode `text` with an explicit configuration
pub fn encode_with_config(text: &str, config: &EncoderConfig) -> Result<QrSymbol> {
    QrEncoder::new(*config).encode(text)
}
