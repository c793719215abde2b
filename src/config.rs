//! Encoder and renderer configuration
//!
//! Defaults can be overridden from the environment:
//! - `QR_MASK`: `auto` or a pattern index 0-7
//! - `QR_OVERFLOW`: `reject` or `truncate`
//! - `QR_SCALE`: pixels per module
//! - `QR_QUIET_ZONE`: light border in modules

use crate::error::{QrError, Result};
use crate::models::MaskPattern;

fn parse_env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

fn parse_env_str(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty())
}

/// What to do with input longer than the symbol capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Fail with `QrError::CapacityExceeded`
    #[default]
    Reject,
    /// Shorten the input and flag the symbol as truncated
    Truncate,
}

impl std::str::FromStr for OverflowPolicy {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(OverflowPolicy::Reject),
            "truncate" => Ok(OverflowPolicy::Truncate),
            other => Err(QrError::Encoding(format!("unknown overflow policy '{other}'"))),
        }
    }
}

/// How the mask pattern is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaskSelection {
    /// Lowest penalty score of all eight patterns
    #[default]
    Auto,
    /// Always use this pattern
    Fixed(MaskPattern),
}

impl std::str::FromStr for MaskSelection {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(MaskSelection::Auto);
        }
        let index = s
            .parse::<u8>()
            .map_err(|_| QrError::Encoding(format!("unknown mask selection '{s}'")))?;
        Ok(MaskSelection::Fixed(MaskPattern::from_index(index)?))
    }
}

/// Encoder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncoderConfig {
    pub overflow: OverflowPolicy,
    pub mask: MaskSelection,
}

impl EncoderConfig {
    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn with_mask(mut self, mask: MaskSelection) -> Self {
        self.mask = mask;
        self
    }

    /// Defaults overridden by `QR_MASK` and `QR_OVERFLOW`.
    /// Unparseable values are an error rather than silently ignored.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Some(mask) = parse_env_str("QR_MASK") {
            config.mask = mask.parse()?;
        }
        if let Some(overflow) = parse_env_str("QR_OVERFLOW") {
            config.overflow = overflow.parse()?;
        }
        Ok(config)
    }
}

/// Rasterization settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Pixels per module
    pub scale: u32,
    /// Light border width in modules
    pub quiet_zone: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 2,
            quiet_zone: 4,
        }
    }
}

impl RenderConfig {
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.max(1);
        self
    }

    pub fn with_quiet_zone(mut self, quiet_zone: u32) -> Self {
        self.quiet_zone = quiet_zone;
        self
    }

    /// Defaults overridden by `QR_SCALE` and `QR_QUIET_ZONE`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            scale: parse_env_u32("QR_SCALE", defaults.scale).max(1),
            quiet_zone: parse_env_u32("QR_QUIET_ZONE", defaults.quiet_zone),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EncoderConfig::default();
        assert_eq!(config.overflow, OverflowPolicy::Reject);
        assert_eq!(config.mask, MaskSelection::Auto);
        assert_eq!(RenderConfig::default().scale, 2);
    }

    #[test]
    fn test_parse_mask_selection() {
        assert_eq!("auto".parse::<MaskSelection>(), Ok(MaskSelection::Auto));
        assert_eq!(
            " 3 ".parse::<MaskSelection>(),
            Ok(MaskSelection::Fixed(MaskPattern::Pattern3))
        );
        assert_eq!("9".parse::<MaskSelection>(), Err(QrError::InvalidMask(9)));
        assert!("x".parse::<MaskSelection>().is_err());
    }

    #[test]
    fn test_parse_overflow() {
        assert_eq!("Truncate".parse::<OverflowPolicy>(), Ok(OverflowPolicy::Truncate));
        assert_eq!("reject".parse::<OverflowPolicy>(), Ok(OverflowPolicy::Reject));
        assert!("drop".parse::<OverflowPolicy>().is_err());
    }

    #[test]
    fn test_builders() {
        let config = EncoderConfig::default()
            .with_overflow(OverflowPolicy::Truncate)
            .with_mask(MaskSelection::Fixed(MaskPattern::Pattern0));
        assert_eq!(config.overflow, OverflowPolicy::Truncate);
        assert_eq!(RenderConfig::default().with_scale(0).scale, 1);
    }
}
