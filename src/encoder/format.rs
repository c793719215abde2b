/// Format information: BCH(15,5) over (EC level, mask), XOR-masked
use crate::models::{BitMatrix, ECLevel, MaskPattern};

/// Generator x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
pub const GENERATOR: u16 = 0x537;
/// Applied so the format word is never all zero
pub const XOR_MASK: u16 = 0x5412;

/// 15-bit format word for the level and mask, already XOR-masked
pub fn format_bits(ec_level: ECLevel, mask: MaskPattern) -> u16 {
    let data = ((ec_level.format_bits() as u16) << 3) | mask.index() as u16;
    encode_word(data)
}

/// BCH-encode 5 data bits and apply the XOR mask
pub fn encode_word(data: u16) -> u16 {
    let data = data & 0x1F;
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * GENERATOR);
    }
    ((data << 10) | (rem & 0x3FF)) ^ XOR_MASK
}

/// Cells holding format bit `i` (0 = least significant) for both copies.
/// Coordinates are (x, y).
pub fn format_positions(size: usize) -> [[(usize, usize); 2]; 15] {
    let mut positions = [[(0, 0); 2]; 15];
    for (i, slot) in positions.iter_mut().enumerate() {
        let first = match i {
            0..=5 => (8, i),
            6 => (8, 7),
            7 => (8, 8),
            8 => (7, 8),
            _ => (14 - i, 8),
        };
        let second = if i < 8 {
            (size - 1 - i, 8)
        } else {
            (8, size - 15 + i)
        };
        *slot = [first, second];
    }
    positions
}

/// Write both copies of the format word into the matrix
pub fn draw_format(modules: &mut BitMatrix, bits: u16) {
    let size = modules.width();
    for (i, copies) in format_positions(size).iter().enumerate() {
        let dark = (bits >> i) & 1 == 1;
        for &(x, y) in copies {
            modules.set(x, y, dark);
        }
    }
    // Dark module shares column 8 with the second copy
    modules.set(8, size - 8, true);
}
