//! Rasterization of encoded symbols and the placeholder fallback

use crate::config::{EncoderConfig, RenderConfig};
use crate::encoder::QrEncoder;
use crate::error::QrError;
use crate::models::QrSymbol;
use image::{GrayImage, Luma};

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);
const PLACEHOLDER_BG: Luma<u8> = Luma([0xF0]);
const PLACEHOLDER_FG: Luma<u8> = Luma([0x66]);

/// 5x7 glyphs for the placeholder label, one row per byte, MSB = left column
const GLYPH_Q: [u8; 7] = [
    0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101,
];
const GLYPH_R: [u8; 7] = [
    0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001,
];

/// Draw one `scale` x `scale` square per dark module inside a light quiet zone
pub fn to_image(symbol: &QrSymbol, config: &RenderConfig) -> GrayImage {
    let scale = config.scale.max(1);
    let size = symbol.size() as u32;
    let side = (size + 2 * config.quiet_zone) * scale;
    let mut img = GrayImage::from_pixel(side, side, LIGHT);

    for y in 0..size {
        for x in 0..size {
            if !symbol.is_dark(x as usize, y as usize) {
                continue;
            }
            let px = (x + config.quiet_zone) * scale;
            let py = (y + config.quiet_zone) * scale;
            for dy in 0..scale {
                for dx in 0..scale {
                    img.put_pixel(px + dx, py + dy, DARK);
                }
            }
        }
    }
    img
}

/// Terminal rendering with half blocks, two module rows per text line
pub fn to_text(symbol: &QrSymbol, quiet_zone: usize) -> String {
    let size = symbol.size();
    let span = size + 2 * quiet_zone;
    let dark = |x: usize, y: usize| {
        x >= quiet_zone
            && y >= quiet_zone
            && x < quiet_zone + size
            && y < quiet_zone + size
            && symbol.is_dark(x - quiet_zone, y - quiet_zone)
    };

    let mut out = String::with_capacity(span * (span / 2 + 1) * 3);
    for y in (0..span).step_by(2) {
        for x in 0..span {
            let glyph = match (dark(x, y), dark(x, y + 1)) {
                (true, true) => '█',
                (true, false) => '▀',
                (false, true) => '▄',
                (false, false) => ' ',
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

/// Light grey box with a "QR" label, shown when no code can be generated
pub fn placeholder(side: u32) -> GrayImage {
    let side = side.max(16);
    let mut img = GrayImage::from_pixel(side, side, PLACEHOLDER_BG);

    // Two glyphs plus a one-column gap, centred
    let cell = (side / 16).max(1);
    let label_w = 11 * cell;
    let label_h = 7 * cell;
    let left = (side - label_w) / 2;
    let top = (side - label_h) / 2;

    for (glyph, offset) in [(&GLYPH_Q, 0), (&GLYPH_R, 6)] {
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..5u32 {
                if (*bits >> (4 - col)) & 1 == 0 {
                    continue;
                }
                let x0 = left + (offset + col) * cell;
                let y0 = top + row as u32 * cell;
                for dy in 0..cell {
                    for dx in 0..cell {
                        img.put_pixel(x0 + dx, y0 + dy, PLACEHOLDER_FG);
                    }
                }
            }
        }
    }
    img
}

/// Image to show for a share link
#[derive(Debug)]
pub enum ShareImage {
    /// A generated code
    Code { image: GrayImage, symbol: QrSymbol },
    /// Encoding failed; the placeholder is shown instead
    Placeholder { image: GrayImage, error: QrError },
}

impl ShareImage {
    pub fn image(&self) -> &GrayImage {
        match self {
            ShareImage::Code { image, .. } | ShareImage::Placeholder { image, .. } => image,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ShareImage::Placeholder { .. })
    }
}

/// Encode and rasterize `text`, substituting the placeholder on any error
pub fn share_image(text: &str, encoder: &EncoderConfig, render: &RenderConfig) -> ShareImage {
    match QrEncoder::new(*encoder).encode(text) {
        Ok(symbol) => ShareImage::Code {
            image: to_image(&symbol, render),
            symbol,
        },
        Err(error) => {
            tracing::warn!(%error, "QR generation failed, showing placeholder");
            let side = (21 + 2 * render.quiet_zone) * render.scale.max(1);
            ShareImage::Placeholder {
                image: placeholder(side),
                error,
            }
        }
    }
}
