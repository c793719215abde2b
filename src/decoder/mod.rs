//! QR symbol reader used to verify encoder output
//!
//! Reads a 21x21 module matrix back to its payload:
//! - Format information (both copies, BCH correction)
//! - Unmasking and zigzag codeword extraction
//! - Reed-Solomon error correction
//! - Byte-mode segment parsing

/// Codeword extraction in placement order
pub mod bitstream;
/// Byte-mode segment parser
pub mod byte;
/// Format information reader
pub mod format;
/// Reed-Solomon error correction
pub mod reed_solomon;

use crate::encoder::function_patterns::FunctionMask;
use crate::encoder::mask::apply_mask;
use crate::error::{QrError, Result};
use crate::models::{BitMatrix, ECLevel, MaskPattern, Version};
use format::FormatInfo;
use reed_solomon::ReedSolomonDecoder;

/// Result of reading a symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub payload: Vec<u8>,
    pub ec_level: ECLevel,
    pub mask_pattern: MaskPattern,
    /// Codewords repaired by Reed-Solomon
    pub corrected_errors: usize,
}

impl Decoded {
    /// Payload as UTF-8, if valid
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.payload).ok()
    }
}

/// Read a Version-1 module matrix (true = dark)
pub fn read_symbol(matrix: &BitMatrix) -> Result<Decoded> {
    let version = Version::V1;
    let size = version.size();
    if matrix.width() != size || matrix.height() != size {
        return Err(QrError::InvalidDimension {
            width: matrix.width(),
            height: matrix.height(),
        });
    }

    let format = FormatInfo::read(matrix)?;
    tracing::debug!(
        ec_level = ?format.ec_level,
        mask = format.mask_pattern.index(),
        bit_errors = format.bit_errors,
        "read format information"
    );

    let function = FunctionMask::new(version);
    let mut unmasked = matrix.clone();
    apply_mask(&mut unmasked, function.as_matrix(), format.mask_pattern);

    let mut codewords = bitstream::extract_codewords(&unmasked, &function);
    codewords.truncate(version.total_codewords());

    let ecc = version.ecc_codewords(format.ec_level);
    let corrected_errors = ReedSolomonDecoder::new(ecc).decode(&mut codewords)?;
    if corrected_errors > 0 {
        tracing::debug!(corrected_errors, "corrected codewords");
    }

    let payload = byte::parse_segment(&codewords[..version.data_codewords(format.ec_level)])?;

    Ok(Decoded {
        payload,
        ec_level: format.ec_level,
        mask_pattern: format.mask_pattern,
        corrected_errors,
    })
}
