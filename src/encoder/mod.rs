//! QR code encoding pipeline
//!
//! `build message → reed-solomon encode → place function patterns →
//! place data → select and apply mask → write format info`
//!
//! The profile is fixed to Version 1, error correction level L, byte mode.

/// Format information (BCH(15,5) code, placement)
pub mod format;
/// Finder, separator, timing and dark-module placement
pub mod function_patterns;
/// GF(256) arithmetic
pub mod gf256;
/// Mask formulas and penalty scoring
pub mod mask;
/// Zigzag data placement
pub mod placement;
/// Reed-Solomon parity generation
pub mod reed_solomon;
/// Byte-mode message construction
pub mod segment;

use crate::config::{EncoderConfig, MaskSelection};
use crate::error::{QrError, Result};
use crate::models::{BitMatrix, ECLevel, MaskPattern, QrSymbol, Version};
use function_patterns::Canvas;
use rayon::prelude::*;

/// Encoder for the Version-1 / level-L profile
#[derive(Debug, Clone, Default)]
pub struct QrEncoder {
    config: EncoderConfig,
}

impl QrEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encode `text` into a 21x21 symbol
    pub fn encode(&self, text: &str) -> Result<QrSymbol> {
        let version = Version::V1;
        let ec_level = ECLevel::L;

        let message = segment::build_message(text, version, ec_level, self.config.overflow)?;
        let ecc = reed_solomon::rs_encode(&message.codewords, version.ecc_codewords(ec_level))?;

        let mut codewords = message.codewords;
        codewords.extend_from_slice(&ecc);

        let mut canvas = Canvas::new(version);
        let placed = placement::place_codewords(&mut canvas, &codewords);
        if placed != codewords.len() * 8 {
            return Err(QrError::Encoding(format!(
                "placed {placed} of {} bits",
                codewords.len() * 8
            )));
        }

        let mask_pattern = match self.config.mask {
            MaskSelection::Fixed(mask) => mask,
            MaskSelection::Auto => select_mask(&canvas, ec_level),
        };
        let modules = finish(&canvas, ec_level, mask_pattern);

        tracing::debug!(
            mask = mask_pattern.index(),
            payload_len = message.payload.len(),
            truncated = message.truncation.is_some(),
            "encoded symbol"
        );

        Ok(QrSymbol {
            modules,
            function: canvas.function,
            version,
            error_correction: ec_level,
            mask_pattern,
            payload: message.payload,
            truncation: message.truncation,
        })
    }
}

/// Apply `mask` to the placed canvas and write the matching format word
fn finish(canvas: &Canvas, ec_level: ECLevel, mask: MaskPattern) -> BitMatrix {
    let mut modules = canvas.modules.clone();
    mask::apply_mask(&mut modules, &canvas.function, mask);
    format::draw_format(&mut modules, format::format_bits(ec_level, mask));
    modules
}

/// Lowest-penalty mask; ties go to the lower pattern index
fn select_mask(canvas: &Canvas, ec_level: ECLevel) -> MaskPattern {
    let scores: Vec<(u32, MaskPattern)> = MaskPattern::ALL[..]
        .par_iter()
        .map(|&mask| (mask::penalty_score(&finish(canvas, ec_level, mask)), mask))
        .collect();

    for (score, mask) in &scores {
        tracing::trace!(mask = mask.index(), score, "mask penalty");
    }

    scores
        .into_iter()
        .min()
        .map_or(MaskPattern::Pattern0, |(_, mask)| mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OverflowPolicy;

    #[test]
    fn test_encode_shape() {
        let symbol = QrEncoder::default().encode("HELLO123456").unwrap();
        assert_eq!(symbol.size(), 21);
        assert_eq!(symbol.to_rows().len(), 21);
        assert_eq!(symbol.payload, b"HELLO123456");
        assert!(!symbol.is_truncated());
        assert_eq!(symbol.error_correction, ECLevel::L);
    }

    #[test]
    fn test_auto_mask_has_minimal_penalty() {
        let encoder = QrEncoder::default();
        let symbol = encoder.encode("qnote.io#123456").unwrap();
        let best = mask::penalty_score(&symbol.modules);
        for mask in MaskPattern::ALL {
            let config = EncoderConfig::default().with_mask(MaskSelection::Fixed(mask));
            let fixed = QrEncoder::new(config).encode("qnote.io#123456").unwrap();
            assert!(mask::penalty_score(&fixed.modules) >= best);
        }
    }

    #[test]
    fn test_fixed_mask_is_respected() {
        let config =
            EncoderConfig::default().with_mask(MaskSelection::Fixed(MaskPattern::Pattern5));
        let symbol = QrEncoder::new(config).encode("abc").unwrap();
        assert_eq!(symbol.mask_pattern, MaskPattern::Pattern5);
    }

    #[test]
    fn test_function_modules_survive_pipeline() {
        let symbol = QrEncoder::default().encode("HELLO123456").unwrap();
        let canvas = Canvas::new(Version::V1);
        let format_cells: Vec<(usize, usize)> =
            format::format_positions(21).iter().flatten().copied().collect();
        for y in 0..21 {
            for x in 0..21 {
                assert_eq!(symbol.is_function(x, y), canvas.is_function(x, y));
                if canvas.is_function(x, y) && !format_cells.contains(&(x, y)) {
                    assert_eq!(symbol.is_dark(x, y), canvas.modules.get(x, y), "({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_truncation_is_flagged() {
        let config = EncoderConfig::default().with_overflow(OverflowPolicy::Truncate);
        let symbol = QrEncoder::new(config)
            .encode("https://qnote.io/note/482913")
            .unwrap();
        assert!(symbol.is_truncated());
        assert_eq!(symbol.payload, b"482913");
    }
}
