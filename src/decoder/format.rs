/// Format information extraction from a module matrix
use crate::encoder::format::{encode_word, format_positions};
use crate::error::{QrError, Result};
use crate::models::{BitMatrix, ECLevel, MaskPattern};

/// BCH(15,5) corrects up to 3 bit errors
const MAX_BIT_ERRORS: u32 = 3;

/// Format info is 15 bits (5 data + 10 ECC), stored twice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    pub ec_level: ECLevel,
    pub mask_pattern: MaskPattern,
    /// Bits that differed from the nearest valid word
    pub bit_errors: u32,
}

impl FormatInfo {
    /// Read both copies and keep whichever is closer to a valid word
    pub fn read(matrix: &BitMatrix) -> Result<Self> {
        let size = matrix.width();
        let mut copies = [0u16; 2];
        for (i, cells) in format_positions(size).iter().enumerate() {
            for (copy, &(x, y)) in copies.iter_mut().zip(cells) {
                if matrix.get(x, y) {
                    *copy |= 1 << i;
                }
            }
        }

        copies
            .iter()
            .filter_map(|&word| Self::decode(word))
            .min_by_key(|info| info.bit_errors)
            .ok_or(QrError::FormatUnreadable)
    }

    /// Decode a raw 15-bit word by nearest valid codeword
    pub fn decode(word: u16) -> Option<Self> {
        let (data, bit_errors) = (0u16..32)
            .map(|data| (data, (encode_word(data) ^ word).count_ones()))
            .min_by_key(|&(_, distance)| distance)?;

        if bit_errors > MAX_BIT_ERRORS {
            return None;
        }

        Some(Self {
            ec_level: ECLevel::from_format_bits((data >> 3) as u8),
            mask_pattern: MaskPattern::from_index((data & 0x07) as u8).ok()?,
            bit_errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::format::{draw_format, format_bits};

    #[test]
    fn test_decode_exact() {
        for mask in MaskPattern::ALL {
            let info = FormatInfo::decode(format_bits(ECLevel::L, mask)).unwrap();
            assert_eq!(info.ec_level, ECLevel::L);
            assert_eq!(info.mask_pattern, mask);
            assert_eq!(info.bit_errors, 0);
        }
    }

    #[test]
    fn test_decode_corrects_three_bits() {
        let word = format_bits(ECLevel::Q, MaskPattern::Pattern6) ^ 0b100_0000_0100_0001;
        let info = FormatInfo::decode(word).unwrap();
        assert_eq!(info.ec_level, ECLevel::Q);
        assert_eq!(info.mask_pattern, MaskPattern::Pattern6);
        assert_eq!(info.bit_errors, 3);
    }

    #[test]
    fn test_read_survives_damaged_copy() {
        let mut matrix = BitMatrix::square(21);
        draw_format(&mut matrix, format_bits(ECLevel::L, MaskPattern::Pattern2));
        // Four flipped bits in the first copy are beyond BCH correction
        for cells in format_positions(21).iter().take(4) {
            let (x, y) = cells[0];
            matrix.toggle(x, y);
        }
        let info = FormatInfo::read(&matrix).unwrap();
        assert_eq!(info.mask_pattern, MaskPattern::Pattern2);
        assert_eq!(info.bit_errors, 0);
    }

    #[test]
    fn test_blank_matrix_is_unreadable() {
        // All-zero reads decode to nothing within 3 bits of a valid word
        assert_eq!(FormatInfo::decode(0), None);
    }
}
