/// GF(256) arithmetic over the QR primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
use crate::error::{QrError, Result};
use std::sync::OnceLock;

const PRIMITIVE: u16 = 0x11D;

struct Tables {
    exp: [u8; 256],
    log: [u8; 256],
}

static TABLES: OnceLock<Tables> = OnceLock::new();

fn tables() -> &'static Tables {
    TABLES.get_or_init(|| {
        let mut exp = [0u8; 256];
        let mut log = [0u8; 256];
        let mut x: u16 = 1;
        for (i, slot) in exp.iter_mut().enumerate().take(255) {
            *slot = x as u8;
            log[x as usize] = i as u8;
            x <<= 1;
            if x & 0x100 != 0 {
                x ^= PRIMITIVE;
            }
        }
        exp[255] = exp[0];
        Tables { exp, log }
    })
}

/// GF(256) field operations using log/exp tables
pub struct Gf256;

impl Gf256 {
    /// alpha^n
    pub fn exp(n: usize) -> u8 {
        tables().exp[n % 255]
    }

    /// Discrete log of a nonzero element
    pub fn log(a: u8) -> Result<usize> {
        if a == 0 {
            return Err(QrError::DivisionByZero);
        }
        Ok(tables().log[a as usize] as usize)
    }

    pub fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let t = tables();
        let log_a = t.log[a as usize] as usize;
        let log_b = t.log[b as usize] as usize;
        t.exp[(log_a + log_b) % 255]
    }

    pub fn div(a: u8, b: u8) -> Result<u8> {
        if b == 0 {
            return Err(QrError::DivisionByZero);
        }
        if a == 0 {
            return Ok(0);
        }
        let t = tables();
        let log_a = t.log[a as usize] as usize;
        let log_b = t.log[b as usize] as usize;
        Ok(t.exp[(log_a + 255 - log_b) % 255])
    }

    /// a^n, with 0^0 = 1
    pub fn pow(a: u8, n: usize) -> u8 {
        if a == 0 {
            return if n == 0 { 1 } else { 0 };
        }
        let log_a = tables().log[a as usize] as usize;
        Self::exp(log_a * (n % 255))
    }

    /// Multiplicative inverse of a nonzero element
    pub fn inv(a: u8) -> Result<u8> {
        Self::div(1, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_consistent() {
        for x in 1..=255u8 {
            let log = Gf256::log(x).unwrap();
            assert_eq!(Gf256::exp(log), x);
        }
        assert_eq!(Gf256::log(0), Err(QrError::DivisionByZero));
        // Known table entries
        assert_eq!(Gf256::exp(8), 29);
        assert_eq!(Gf256::exp(255), 1);
    }

    #[test]
    fn test_mul_zero() {
        for a in 0..=255u8 {
            assert_eq!(Gf256::mul(a, 0), 0);
            assert_eq!(Gf256::mul(0, a), 0);
        }
    }

    #[test]
    fn test_div_mul_inverse() {
        for a in 1..=255u8 {
            for b in 1..=255u8 {
                let q = Gf256::div(a, b).unwrap();
                assert_eq!(Gf256::mul(q, b), a);
            }
        }
    }

    #[test]
    fn test_div_by_zero() {
        assert_eq!(Gf256::div(5, 0), Err(QrError::DivisionByZero));
        assert_eq!(Gf256::div(0, 0), Err(QrError::DivisionByZero));
        assert_eq!(Gf256::div(0, 7), Ok(0));
    }

    #[test]
    fn test_pow() {
        assert_eq!(Gf256::pow(2, 255), 1);
        assert_eq!(Gf256::pow(2, 256), 2);
        assert_eq!(Gf256::pow(2, 260), Gf256::pow(2, 5));
        assert_eq!(Gf256::pow(0, 10), 0);
        assert_eq!(Gf256::pow(0, 0), 1);
        assert_eq!(Gf256::inv(2).map(|i| Gf256::mul(i, 2)), Ok(1));
    }

    #[test]
    fn test_concurrent_first_use() {
        let handles: Vec<_> = (0..8)
            .map(|i| std::thread::spawn(move || Gf256::mul(i + 1, 3)))
            .collect();
        for (i, h) in handles.into_iter().enumerate() {
            assert_eq!(h.join().unwrap(), Gf256::mul(i as u8 + 1, 3));
        }
    }
}
