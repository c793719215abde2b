/// Reed-Solomon error correction for QR codewords
use crate::encoder::gf256::Gf256;
use crate::error::{QrError, Result};

/// Reed-Solomon decoder for one block.
/// Codewords are in descending order: c[0] is the coefficient of x^(n-1).
pub struct ReedSolomonDecoder {
    num_ecc_codewords: usize,
}

impl ReedSolomonDecoder {
    pub fn new(num_ecc_codewords: usize) -> Self {
        Self { num_ecc_codewords }
    }

    /// Correct `received` in place, returning the number of corrected codewords
    pub fn decode(&self, received: &mut [u8]) -> Result<usize> {
        let syndrome = self.calculate_syndrome(received);
        if syndrome.iter().all(|&s| s == 0) {
            return Ok(0);
        }

        let sigma = self.find_error_locator(&syndrome)?;
        let num_errors = sigma.len() - 1;
        if num_errors == 0 || num_errors > self.num_ecc_codewords / 2 {
            return Err(QrError::UncorrectableCodewords);
        }

        let positions = self.find_error_positions(&sigma, received.len())?;
        let values = self.find_error_values(&sigma, &syndrome, &positions, received.len())?;

        for (&pos, &value) in positions.iter().zip(&values) {
            received[pos] ^= value;
        }

        if self.calculate_syndrome(received).iter().any(|&s| s != 0) {
            return Err(QrError::UncorrectableCodewords);
        }

        Ok(positions.len())
    }

    /// S_i = r(alpha^i) for i in [0, num_ecc)
    fn calculate_syndrome(&self, received: &[u8]) -> Vec<u8> {
        (0..self.num_ecc_codewords)
            .map(|i| {
                let x = Gf256::exp(i);
                received.iter().fold(0u8, |acc, &c| Gf256::mul(acc, x) ^ c)
            })
            .collect()
    }

    /// Berlekamp-Massey. Returns sigma in ascending order with sigma[0] = 1,
    /// trimmed to its degree.
    fn find_error_locator(&self, syndrome: &[u8]) -> Result<Vec<u8>> {
        let mut sigma = vec![1u8];
        let mut prev = vec![1u8];
        let mut prev_delta: u8 = 1;
        let mut l = 0usize;
        let mut m = 1usize;

        for i in 0..syndrome.len() {
            let mut delta = syndrome[i];
            for j in 1..=l.min(sigma.len() - 1) {
                delta ^= Gf256::mul(sigma[j], syndrome[i - j]);
            }

            if delta == 0 {
                m += 1;
                continue;
            }

            let factor = Gf256::div(delta, prev_delta)?;
            let snapshot = sigma.clone();
            if sigma.len() < prev.len() + m {
                sigma.resize(prev.len() + m, 0);
            }
            for (j, &b) in prev.iter().enumerate() {
                sigma[j + m] ^= Gf256::mul(factor, b);
            }

            if 2 * l <= i {
                l = i + 1 - l;
                prev = snapshot;
                prev_delta = delta;
                m = 1;
            } else {
                m += 1;
            }
        }

        sigma.truncate(l + 1);
        Ok(sigma)
    }

    /// Chien search: position p is in error when sigma(alpha^-(n-1-p)) = 0
    fn find_error_positions(&self, sigma: &[u8], n: usize) -> Result<Vec<usize>> {
        let positions: Vec<usize> = (0..n)
            .filter(|&pos| {
                let x_inv = Gf256::exp(255 - (n - 1 - pos) % 255);
                evaluate_ascending(sigma, x_inv) == 0
            })
            .collect();

        if positions.len() != sigma.len() - 1 {
            return Err(QrError::UncorrectableCodewords);
        }
        Ok(positions)
    }

    /// Forney: e_k = X_k * omega(X_k^-1) / sigma'(X_k^-1)
    fn find_error_values(
        &self,
        sigma: &[u8],
        syndrome: &[u8],
        positions: &[usize],
        n: usize,
    ) -> Result<Vec<u8>> {
        // omega = syndrome * sigma mod x^num_ecc
        let mut omega = vec![0u8; syndrome.len()];
        for (i, slot) in omega.iter_mut().enumerate() {
            for (j, &s) in sigma.iter().enumerate().take(i + 1) {
                *slot ^= Gf256::mul(s, syndrome[i - j]);
            }
        }

        // Formal derivative keeps odd powers only
        let sigma_prime: Vec<u8> = sigma
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| if i % 2 == 1 { c } else { 0 })
            .collect();

        positions
            .iter()
            .map(|&pos| {
                let exp = (n - 1 - pos) % 255;
                let x_k = Gf256::exp(exp);
                let x_inv = Gf256::exp(255 - exp);
                let numerator = evaluate_ascending(&omega, x_inv);
                let denominator = evaluate_ascending(&sigma_prime, x_inv);
                if denominator == 0 {
                    return Err(QrError::UncorrectableCodewords);
                }
                Ok(Gf256::mul(x_k, Gf256::div(numerator, denominator)?))
            })
            .collect()
    }
}

/// Evaluate a polynomial stored lowest power first
fn evaluate_ascending(poly: &[u8], x: u8) -> u8 {
    poly.iter()
        .rev()
        .fold(0u8, |acc, &c| Gf256::mul(acc, x) ^ c)
}
