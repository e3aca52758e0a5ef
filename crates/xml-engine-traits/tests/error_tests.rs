//! Tests for the shared error taxonomy and input decoding

use std::io::ErrorKind;

use xml_engine_traits::{decode_document, Error};

fn utf16le(text: &str, bom: bool) -> Vec<u8> {
    let mut bytes = if bom { vec![0xFF, 0xFE] } else { Vec::new() };
    bytes.extend(text.encode_utf16().flat_map(|unit| unit.to_le_bytes()));
    bytes
}

fn utf16be(text: &str, bom: bool) -> Vec<u8> {
    let mut bytes = if bom { vec![0xFE, 0xFF] } else { Vec::new() };
    bytes.extend(text.encode_utf16().flat_map(|unit| unit.to_be_bytes()));
    bytes
}

#[test]
fn test_decode_plain_utf8_is_borrowed() {
    let text = decode_document(b"<root/>").unwrap();
    assert_eq!(text, "<root/>");
    assert!(matches!(text, std::borrow::Cow::Borrowed(_)));
}

#[test]
fn test_decode_strips_utf8_bom() {
    assert_eq!(decode_document(b"\xEF\xBB\xBF<root/>").unwrap(), "<root/>");
}

#[test]
fn test_decode_utf16_inputs() {
    let doc = r#"<?xml version="1.0" encoding="UTF-16"?><root>hi</root>"#;
    let expected = r#"<?xml version="1.0" encoding="UTF-8"?><root>hi</root>"#;
    let cases = [
        ("UTF-16LE with BOM", utf16le(doc, true)),
        ("UTF-16LE without BOM", utf16le(doc, false)),
        ("UTF-16BE with BOM", utf16be(doc, true)),
        ("UTF-16BE without BOM", utf16be(doc, false)),
    ];
    for (name, bytes) in cases {
        let text = decode_document(&bytes).unwrap_or_else(|e| panic!("{name}: {e}"));
        assert_eq!(text, expected, "{name}");
    }
}

#[test]
fn test_decode_declared_latin1() {
    let mut bytes = br#"<?xml version="1.0" encoding="ISO-8859-1"?><menu>caf"#.to_vec();
    bytes.push(0xE9);
    bytes.extend_from_slice(b"</menu>");

    let text = decode_document(&bytes).unwrap();
    assert_eq!(
        text,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><menu>caf\u{e9}</menu>"
    );
}

#[test]
fn test_decode_rejects_invalid_utf8() {
    let err = decode_document(b"<root>\xFF\xFE\xFD</root>").unwrap_err();
    assert!(matches!(err, Error::Parse(_)), "bad encoding is a parse error");
}

#[test]
fn test_decode_rejects_unknown_encoding() {
    let err = decode_document(br#"<?xml version="1.0" encoding="EBCDIC-XYZ"?><r/>"#).unwrap_err();
    assert!(err.to_string().contains("EBCDIC-XYZ"));
}

#[test]
fn test_io_errors_convert() {
    let err: Error = std::io::Error::new(ErrorKind::NotFound, "missing").into();
    assert!(matches!(err, Error::Io(ref e) if e.kind() == ErrorKind::NotFound));
    assert!(err.to_string().contains("missing"));
}

#[test]
fn test_io_other_wraps_message() {
    let err = Error::io_other("connection reset");
    match err {
        Error::Io(e) => {
            assert_eq!(e.kind(), ErrorKind::Other);
            assert!(e.to_string().contains("connection reset"));
        }
        other => panic!("expected Io, got {other:?}"),
    }
}

#[test]
fn test_helper_constructors() {
    assert!(Error::configuration("no factory").is_configuration());
    assert!(!Error::transform("bad template").is_configuration());
    assert_eq!(
        Error::parse("unexpected eof").to_string(),
        "XML parsing error: unexpected eof"
    );
}
