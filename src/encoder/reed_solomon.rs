/// Systematic Reed-Solomon encoding over GF(256)
use super::gf256::Gf256;
use crate::error::{QrError, Result};

/// Generator polynomial prod(x - alpha^i) for i in [0, degree), highest power first
pub fn generator_poly(degree: usize) -> Vec<u8> {
    let mut poly = vec![1u8];
    for i in 0..degree {
        let root = Gf256::exp(i);
        let mut next = vec![0u8; poly.len() + 1];
        for (j, &coeff) in poly.iter().enumerate() {
            next[j] ^= coeff;
            next[j + 1] ^= Gf256::mul(coeff, root);
        }
        poly = next;
    }
    poly
}

/// Compute `ecc_count` parity codewords for `data`.
///
/// The result is the remainder of `data * x^ecc_count` divided by the
/// generator polynomial, so `data || ecc` is a valid codeword.
pub fn rs_encode(data: &[u8], ecc_count: usize) -> Result<Vec<u8>> {
    if ecc_count == 0 {
        return Err(QrError::Encoding("ecc count must be positive".into()));
    }
    if data.len() + ecc_count > 255 {
        return Err(QrError::Encoding(format!(
            "block of {} codewords exceeds GF(256) length",
            data.len() + ecc_count
        )));
    }

    let generator = generator_poly(ecc_count);
    let mut work = data.to_vec();
    work.resize(data.len() + ecc_count, 0);

    for i in 0..data.len() {
        let coeff = work[i];
        if coeff == 0 {
            continue;
        }
        for (j, &g) in generator.iter().enumerate() {
            work[i + j] ^= Gf256::mul(g, coeff);
        }
    }

    Ok(work.split_off(data.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluate(codeword: &[u8], x: u8) -> u8 {
        codeword
            .iter()
            .fold(0u8, |acc, &c| Gf256::mul(acc, x) ^ c)
    }

    #[test]
    fn test_generator_degree_7() {
        let expected: Vec<u8> = [0, 87, 229, 146, 149, 238, 102, 21]
            .iter()
            .map(|&e| Gf256::exp(e))
            .collect();
        assert_eq!(generator_poly(7), expected);
    }

    #[test]
    fn test_known_vector_1m() {
        // "HELLO WORLD" as Version 1-M alphanumeric data codewords
        let data = [
            32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236, 17, 236, 17,
        ];
        let ecc = rs_encode(&data, 10).unwrap();
        assert_eq!(ecc, vec![196, 35, 39, 119, 235, 215, 231, 226, 93, 23]);
    }

    #[test]
    fn test_ecc_length_and_zero_syndromes() {
        let data: Vec<u8> = (0..19u8).map(|i| i.wrapping_mul(37).wrapping_add(5)).collect();
        let ecc = rs_encode(&data, 7).unwrap();
        assert_eq!(ecc.len(), 7);

        let mut codeword = data.clone();
        codeword.extend_from_slice(&ecc);
        for i in 0..7 {
            assert_eq!(evaluate(&codeword, Gf256::exp(i)), 0, "syndrome {i}");
        }
    }

    #[test]
    fn test_all_zero_data() {
        assert_eq!(rs_encode(&[0u8; 19], 7).unwrap(), vec![0u8; 7]);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(rs_encode(&[1, 2, 3], 0), Err(QrError::Encoding(_))));
        assert!(matches!(
            rs_encode(&[0u8; 250], 10),
            Err(QrError::Encoding(_))
        ));
    }
}
