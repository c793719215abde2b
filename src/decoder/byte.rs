/// Byte mode segment parsing (mode 0100)
use crate::encoder::segment::{COUNT_BITS, MODE_BYTE};
use crate::error::{QrError, Result};

/// MSB-first reader over codewords
struct BitReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> BitReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() * 8 - self.offset
    }

    fn read(&mut self, count: usize) -> Option<u32> {
        if count > self.remaining() {
            return None;
        }
        let mut value = 0u32;
        for _ in 0..count {
            let bit = (self.bytes[self.offset / 8] >> (7 - self.offset % 8)) & 1;
            value = (value << 1) | bit as u32;
            self.offset += 1;
        }
        Some(value)
    }
}

/// Parse the data codewords of a single byte-mode segment.
/// A leading terminator (or too few bits for a mode) is an empty payload.
pub fn parse_segment(data: &[u8]) -> Result<Vec<u8>> {
    let mut reader = BitReader::new(data);
    let mode = match reader.read(4) {
        Some(0) | None => return Ok(Vec::new()),
        Some(mode) => mode as u8,
    };
    if mode != MODE_BYTE {
        return Err(QrError::UnsupportedMode(mode));
    }

    let count = reader
        .read(COUNT_BITS)
        .ok_or_else(|| QrError::MalformedPayload("missing character count".into()))?
        as usize;
    if count * 8 > reader.remaining() {
        return Err(QrError::MalformedPayload(format!(
            "count {count} exceeds {} remaining bits",
            reader.remaining()
        )));
    }

    (0..count)
        .map(|_| {
            reader
                .read(8)
                .map(|b| b as u8)
                .ok_or_else(|| QrError::MalformedPayload("truncated payload".into()))
        })
        .collect()
}
