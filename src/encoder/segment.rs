/// Byte-mode message construction
use crate::config::OverflowPolicy;
use crate::error::{QrError, Result};
use crate::models::{ECLevel, Truncation, Version};

/// Mode indicator for 8-bit byte data
pub const MODE_BYTE: u8 = 0b0100;
/// Character count bits for byte mode at versions 1-9
pub const COUNT_BITS: usize = 8;
/// Alternating pad codewords
pub const PAD_BYTES: [u8; 2] = [0xEC, 0x11];

/// Data codewords ready for error correction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Exactly `Version::data_codewords` bytes
    pub codewords: Vec<u8>,
    /// Bytes placed in the segment
    pub payload: Vec<u8>,
    pub truncation: Option<Truncation>,
}

/// MSB-first bit accumulator
#[derive(Debug, Default, Clone)]
pub struct BitBuffer {
    bits: Vec<bool>,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Append the low `count` bits of `value`, most significant first
    pub fn append_bits(&mut self, value: u32, count: usize) {
        for i in (0..count).rev() {
            self.bits.push((value >> i) & 1 == 1);
        }
    }

    /// Pack into bytes. A trailing partial byte is zero-filled.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &bit)| acc | ((bit as u8) << (7 - i)))
            })
            .collect()
    }
}

/// Largest byte-mode payload for a version and level
pub fn byte_capacity(version: Version, ec_level: ECLevel) -> usize {
    (version.data_codewords(ec_level) * 8 - 4 - COUNT_BITS) / 8
}

/// Apply the overflow policy to `text`
pub fn fit_payload(
    text: &str,
    capacity: usize,
    policy: OverflowPolicy,
) -> Result<(Vec<u8>, Option<Truncation>)> {
    if text.len() <= capacity {
        return Ok((text.as_bytes().to_vec(), None));
    }

    match policy {
        OverflowPolicy::Reject => Err(QrError::CapacityExceeded {
            len: text.len(),
            capacity,
        }),
        OverflowPolicy::Truncate => {
            let kept = shorten(text, capacity);
            let truncation = Truncation {
                original_len: text.len(),
                encoded_len: kept.len(),
            };
            tracing::warn!(
                original_len = truncation.original_len,
                encoded_len = truncation.encoded_len,
                kept,
                "input truncated to fit symbol"
            );
            Ok((kept.as_bytes().to_vec(), Some(truncation)))
        }
    }
}

/// Prefer the last path segment of a share link, else the longest prefix
fn shorten(text: &str, capacity: usize) -> &str {
    if let Some((_, tail)) = text.trim_end_matches('/').rsplit_once('/') {
        if !tail.is_empty() && tail.len() <= capacity {
            return tail;
        }
    }
    let mut end = capacity.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Build the data codewords for `text`
pub fn build_message(
    text: &str,
    version: Version,
    ec_level: ECLevel,
    policy: OverflowPolicy,
) -> Result<Message> {
    let data_codewords = version.data_codewords(ec_level);
    let capacity_bits = data_codewords * 8;
    let (payload, truncation) = fit_payload(text, byte_capacity(version, ec_level), policy)?;

    let mut buffer = BitBuffer::new();
    buffer.append_bits(MODE_BYTE as u32, 4);
    buffer.append_bits(payload.len() as u32, COUNT_BITS);
    for &byte in &payload {
        buffer.append_bits(byte as u32, 8);
    }
    if buffer.len() > capacity_bits {
        return Err(QrError::CapacityExceeded {
            len: payload.len(),
            capacity: byte_capacity(version, ec_level),
        });
    }

    // Terminator, then zero bits up to the byte boundary
    let terminator = (capacity_bits - buffer.len()).min(4);
    buffer.append_bits(0, terminator);
    let fill = (8 - buffer.len() % 8) % 8;
    buffer.append_bits(0, fill);

    let mut codewords = buffer.to_bytes();
    for pad in PAD_BYTES.iter().cycle() {
        if codewords.len() >= data_codewords {
            break;
        }
        codewords.push(*pad);
    }

    tracing::debug!(
        payload_len = payload.len(),
        codewords = codewords.len(),
        "built byte-mode message"
    );

    Ok(Message {
        codewords,
        payload,
        truncation,
    })
}
