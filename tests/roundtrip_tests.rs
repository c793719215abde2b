//! End-to-end tests: encoded symbols must be readable by the built-in reader
//! and by an independent decoder (rqrr) after rasterization.

use proptest::prelude::*;
use qnote_qr::decoder::read_symbol;
use qnote_qr::render::to_image;
use qnote_qr::{
    EncoderConfig, MaskPattern, MaskSelection, OverflowPolicy, QrEncoder, QrError, QrSymbol,
    RenderConfig, encode,
};

fn fail(err: QrError) -> TestCaseError {
    TestCaseError::fail(err.to_string())
}

/// Rasterize and decode with rqrr, returning every grid's content
fn decode_with_rqrr(symbol: &QrSymbol) -> Result<Vec<String>, String> {
    let img = to_image(symbol, &RenderConfig::default().with_scale(4).with_quiet_zone(4));
    let width = img.width() as usize;
    let height = img.height() as usize;
    let raw = img.as_raw();

    let mut prepared =
        rqrr::PreparedImage::prepare_from_greyscale(width, height, |x, y| raw[y * width + x]);
    let grids = prepared.detect_grids();
    if grids.is_empty() {
        return Err("rqrr: no grids found".to_string());
    }

    grids
        .iter()
        .map(|grid| {
            grid.decode()
                .map(|(_meta, content)| content)
                .map_err(|e| format!("rqrr: failed to decode grid: {e:?}"))
        })
        .collect()
}

#[test]
fn test_hello_decodes_with_rqrr() {
    let symbol = encode("HELLO123456").expect("encode");
    let decoded = decode_with_rqrr(&symbol).expect("rqrr decode");
    assert_eq!(decoded, vec!["HELLO123456".to_string()]);
}

#[test]
fn test_every_mask_decodes_with_rqrr() {
    for mask in MaskPattern::ALL {
        let config = EncoderConfig::default().with_mask(MaskSelection::Fixed(mask));
        let symbol = QrEncoder::new(config).encode("qnote.io#482913").expect("encode");
        let decoded = decode_with_rqrr(&symbol).expect("rqrr decode");
        assert_eq!(decoded, vec!["qnote.io#482913".to_string()], "mask {mask:?}");
    }
}

#[test]
fn test_full_capacity_decodes() {
    let text = "https://qnote.io/";
    assert_eq!(text.len(), 17);
    let symbol = encode(text).expect("encode");
    assert_eq!(decode_with_rqrr(&symbol).expect("rqrr decode"), vec![text.to_string()]);
    assert_eq!(read_symbol(&symbol.modules).expect("read").payload, text.as_bytes());
}

#[test]
fn test_truncated_symbol_reports_what_was_encoded() {
    let config = EncoderConfig::default().with_overflow(OverflowPolicy::Truncate);
    let symbol = QrEncoder::new(config)
        .encode("https://qnote.io/482913")
        .expect("encode");
    let truncation = symbol.truncation.expect("truncation flagged");
    assert_eq!(truncation.original_len, 23);
    assert_eq!(truncation.encoded_len, 6);
    assert_eq!(decode_with_rqrr(&symbol).expect("rqrr decode"), vec!["482913".to_string()]);
}

#[test]
fn test_over_capacity_rejected_by_default() {
    let err = encode("https://qnote.io/482913").unwrap_err();
    assert_eq!(
        err,
        QrError::CapacityExceeded {
            len: 23,
            capacity: 17
        }
    );
}

proptest! {
    #[test]
    fn prop_reader_roundtrip(text in "[ -~]{0,17}") {
        let symbol = encode(&text).map_err(fail)?;
        let decoded = read_symbol(&symbol.modules).map_err(fail)?;
        prop_assert_eq!(decoded.payload, text.as_bytes());
        prop_assert_eq!(decoded.mask_pattern, symbol.mask_pattern);
    }

    #[test]
    fn prop_deterministic(text in "[ -~]{0,17}") {
        let a = encode(&text).map_err(fail)?;
        let b = encode(&text).map_err(fail)?;
        prop_assert_eq!(a.to_rows(), b.to_rows());
    }

    #[test]
    fn prop_function_modules_fixed(text in "[ -~]{0,17}", mask in 0u8..8) {
        let pattern = MaskPattern::from_index(mask).map_err(fail)?;
        let config = EncoderConfig::default().with_mask(MaskSelection::Fixed(pattern));
        let symbol = QrEncoder::new(config).encode(&text).map_err(fail)?;
        let blank = QrEncoder::new(config).encode("").map_err(fail)?;
        // Same mask means same format word, so every function module must agree
        prop_assert_eq!(&symbol.function, &blank.function);
        for y in 0..21 {
            for x in 0..21 {
                if symbol.is_function(x, y) {
                    prop_assert_eq!(symbol.is_dark(x, y), blank.is_dark(x, y));
                }
            }
        }
    }

    #[test]
    fn prop_over_capacity_never_silent(text in "[ -~]{18,60}") {
        prop_assert!(
            matches!(
                encode(&text),
                Err(QrError::CapacityExceeded { .. })
            ),
            "expected capacity error for {:?}",
            text
        );
        let config = EncoderConfig::default().with_overflow(OverflowPolicy::Truncate);
        let symbol = QrEncoder::new(config).encode(&text).map_err(fail)?;
        prop_assert!(symbol.is_truncated());
        prop_assert!(text.contains(std::str::from_utf8(&symbol.payload).unwrap_or("\u{0}")));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_rqrr_roundtrip(text in "[a-zA-Z0-9:/.#?=]{1,17}") {
        let symbol = encode(&text).map_err(fail)?;
        let decoded = decode_with_rqrr(&symbol).map_err(TestCaseError::fail)?;
        prop_assert_eq!(decoded, vec![text]);
    }
}
