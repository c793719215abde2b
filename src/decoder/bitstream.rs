/// Codeword extraction from a module matrix
use crate::encoder::function_patterns::FunctionMask;
use crate::encoder::placement::zigzag;
use crate::models::BitMatrix;

/// Read data-region bits in placement order and pack them MSB first.
/// Trailing bits that do not fill a whole codeword are dropped.
pub fn extract_codewords(matrix: &BitMatrix, func: &FunctionMask) -> Vec<u8> {
    let bits: Vec<bool> = zigzag(func.size())
        .filter(|&(x, y)| !func.is_function(x, y))
        .map(|(x, y)| matrix.get(x, y))
        .collect();

    bits.chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | bit as u8))
        .collect()
}
