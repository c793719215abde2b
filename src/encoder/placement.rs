/// Zigzag placement of codeword bits into the data region
use super::function_patterns::Canvas;

/// Visit order of the data region: two-column strips from the right edge,
/// skipping the vertical timing column, alternating upward and downward.
/// Yields every (x, y) in the strip; callers skip function modules.
pub fn zigzag(size: usize) -> impl Iterator<Item = (usize, usize)> {
    let mut strips = Vec::new();
    let mut right = size as isize - 1;
    while right >= 1 {
        if right == 6 {
            right = 5;
        }
        strips.push(right as usize);
        right -= 2;
    }

    strips.into_iter().enumerate().flat_map(move |(strip, right)| {
        let upward = strip % 2 == 0;
        (0..size).flat_map(move |vert| {
            let y = if upward { size - 1 - vert } else { vert };
            [(right, y), (right - 1, y)]
        })
    })
}

/// Expand codewords to bits, most significant first
pub fn codeword_bits(codewords: &[u8]) -> impl Iterator<Item = bool> + '_ {
    codewords
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1 == 1))
}

/// Place codeword bits into every non-function module in zigzag order.
/// Returns the number of bits placed. Modules past the end of the bit
/// sequence keep their current (light) value.
pub fn place_codewords(canvas: &mut Canvas, codewords: &[u8]) -> usize {
    let size = canvas.size();
    let mut bits = codeword_bits(codewords);
    let mut placed = 0;
    for (x, y) in zigzag(size) {
        if canvas.is_function(x, y) {
            continue;
        }
        match bits.next() {
            Some(bit) => {
                canvas.modules.set(x, y, bit);
                placed += 1;
            }
            None => break,
        }
    }
    placed
}
