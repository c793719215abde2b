use super::BitMatrix;
use crate::error::{QrError, Result};

/// QR code version. Only Version 1 (21x21) is produced by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version(u8);

impl Version {
    /// Version 1, 21x21 modules
    pub const V1: Version = Version(1);

    /// Version number
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Size in modules (width = height)
    pub fn size(&self) -> usize {
        4 * self.0 as usize + 17
    }

    /// Total codewords (data + error correction)
    pub fn total_codewords(&self) -> usize {
        26
    }

    /// Error correction codewords for the given level (single block at V1)
    pub fn ecc_codewords(&self, ec_level: ECLevel) -> usize {
        match ec_level {
            ECLevel::L => 7,
            ECLevel::M => 10,
            ECLevel::Q => 13,
            ECLevel::H => 17,
        }
    }

    /// Data codewords for the given level
    pub fn data_codewords(&self, ec_level: ECLevel) -> usize {
        self.total_codewords() - self.ecc_codewords(ec_level)
    }
}

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L,
    /// Medium (~15% recovery capacity)
    M,
    /// Quartile (~25% recovery capacity)
    Q,
    /// High (~30% recovery capacity)
    H,
}

impl ECLevel {
    /// Two-bit value stored in format information (L=01, M=00, Q=11, H=10)
    pub fn format_bits(&self) -> u8 {
        match self {
            ECLevel::L => 0b01,
            ECLevel::M => 0b00,
            ECLevel::Q => 0b11,
            ECLevel::H => 0b10,
        }
    }

    /// Inverse of [`ECLevel::format_bits`]
    pub fn from_format_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0b01 => ECLevel::L,
            0b00 => ECLevel::M,
            0b11 => ECLevel::Q,
            _ => ECLevel::H,
        }
    }
}

/// Mask pattern (0-7). Coordinates are x = column, y = row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaskPattern {
    /// (x + y) % 2 == 0
    Pattern0 = 0,
    /// y % 2 == 0
    Pattern1 = 1,
    /// x % 3 == 0
    Pattern2 = 2,
    /// (x + y) % 3 == 0
    Pattern3 = 3,
    /// (x / 3 + y / 2) % 2 == 0
    Pattern4 = 4,
    /// (x * y) % 2 + (x * y) % 3 == 0
    Pattern5 = 5,
    /// ((x * y) % 2 + (x * y) % 3) % 2 == 0
    Pattern6 = 6,
    /// ((x + y) % 2 + (x * y) % 3) % 2 == 0
    Pattern7 = 7,
}

impl MaskPattern {
    /// All eight patterns in index order
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern::Pattern0,
        MaskPattern::Pattern1,
        MaskPattern::Pattern2,
        MaskPattern::Pattern3,
        MaskPattern::Pattern4,
        MaskPattern::Pattern5,
        MaskPattern::Pattern6,
        MaskPattern::Pattern7,
    ];

    /// Mask pattern from its index
    pub fn from_index(index: u8) -> Result<Self> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or(QrError::InvalidMask(index))
    }

    /// Pattern index 0-7
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Whether the module at column `x`, row `y` is inverted by this mask
    pub fn is_masked(&self, x: usize, y: usize) -> bool {
        match self {
            MaskPattern::Pattern0 => (x + y) % 2 == 0,
            MaskPattern::Pattern1 => y % 2 == 0,
            MaskPattern::Pattern2 => x % 3 == 0,
            MaskPattern::Pattern3 => (x + y) % 3 == 0,
            MaskPattern::Pattern4 => (x / 3 + y / 2) % 2 == 0,
            MaskPattern::Pattern5 => (x * y) % 2 + (x * y) % 3 == 0,
            MaskPattern::Pattern6 => ((x * y) % 2 + (x * y) % 3) % 2 == 0,
            MaskPattern::Pattern7 => ((x + y) % 2 + (x * y) % 3) % 2 == 0,
        }
    }
}

/// Record of input that was shortened to fit the symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncation {
    /// Input length in bytes
    pub original_len: usize,
    /// Bytes actually encoded
    pub encoded_len: usize,
}

/// Encoded QR symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrSymbol {
    /// Module matrix (true = dark)
    pub modules: BitMatrix,
    /// Function cells (finders, separators, timing, dark module, format info)
    pub function: BitMatrix,
    /// Symbol version
    pub version: Version,
    /// Error correction level
    pub error_correction: ECLevel,
    /// Mask pattern written into the format information
    pub mask_pattern: MaskPattern,
    /// Bytes encoded in the symbol
    pub payload: Vec<u8>,
    /// Set when the input was shortened to fit
    pub truncation: Option<Truncation>,
}

impl QrSymbol {
    /// Size in modules
    pub fn size(&self) -> usize {
        self.modules.width()
    }

    /// Whether module (x, y) is dark
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.modules.get(x, y)
    }

    /// Whether module (x, y) belongs to a function pattern
    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.function.get(x, y)
    }

    /// Whether the encoded content differs from the caller's input
    pub fn is_truncated(&self) -> bool {
        self.truncation.is_some()
    }

    /// Row-major boolean matrix for rasterizers
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.modules.to_rows()
    }
}
