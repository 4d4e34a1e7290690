//! Integration tests for error handling and edge cases.

use pdfstitch::{ErrorKind, InputItem, MergeError, MergeOptions, Merger};
use rstest::rstest;
use tempfile::TempDir;

use crate::common::{entries, item, jpeg_rgb, pdf_with_pages, png_rgb};

#[test]
fn test_error_empty_request() {
    let err = pdfstitch::merge(&[]).unwrap_err();
    assert!(matches!(err, MergeError::NoInputSelected));
    assert_eq!(err.to_string(), "No files were selected");
}

#[test]
fn test_error_only_unsupported() {
    let err = pdfstitch::merge(&[
        item("notes.txt", b"plain text".to_vec()),
        item("archive.tar.gz", vec![0x1F, 0x8B]),
    ])
    .unwrap_err();

    assert!(matches!(err, MergeError::NoSupportedInput));
    assert_eq!(err.kind(), ErrorKind::NoInputSelected);
    assert!(err.is_client_error());
}

#[rstest]
#[case("fake.pdf", png_rgb(4, 4, [0, 0, 0]), ErrorKind::InvalidDocument)]
#[case("fake.png", pdf_with_pages(1, "x"), ErrorKind::InvalidImage)]
#[case("fake.jpg", png_rgb(4, 4, [0, 0, 0]), ErrorKind::InvalidImage)]
#[case("fake.jpeg", b"GIF89a".to_vec(), ErrorKind::InvalidImage)]
#[case("empty.pdf", Vec::new(), ErrorKind::InvalidDocument)]
#[case("empty.png", Vec::new(), ErrorKind::InvalidImage)]
fn test_error_content_mismatch(
    #[case] name: &str,
    #[case] content: Vec<u8>,
    #[case] kind: ErrorKind,
) {
    let err = pdfstitch::merge(&[item(name, content)]).unwrap_err();
    assert_eq!(err.kind(), kind);
    assert!(err.to_string().contains(name));
}

#[test]
fn test_error_truncated_jpeg() {
    let mut bytes = jpeg_rgb(64, 64);
    bytes.truncate(bytes.len() / 3);

    let err = pdfstitch::merge(&[item("cut.jpg", bytes)]).unwrap_err();
    assert!(matches!(err, MergeError::InvalidImage { .. }));
}

#[test]
fn test_error_corrupt_pdf() {
    let mut bytes = pdf_with_pages(2, "x");
    bytes.truncate(40);

    let err = pdfstitch::merge(&[item("cut.pdf", bytes)]).unwrap_err();
    assert!(matches!(err, MergeError::InvalidDocument { ref name, .. } if name == "cut.pdf"));
}

#[test]
fn test_error_invalid_item_aborts_batch() {
    let root = TempDir::new().unwrap();
    let merger = Merger::new(MergeOptions::spooled_in(root.path()));

    let result = merger.merge(&[
        item("a.pdf", pdf_with_pages(2, "a")),
        item("b.png", png_rgb(10, 10, [9, 9, 9])),
        item("c.pdf", b"%PDF-1.7\ngarbage".to_vec()),
        item("d.pdf", pdf_with_pages(1, "d")),
    ]);

    let err = result.unwrap_err();
    assert!(matches!(err, MergeError::InvalidDocument { ref name, .. } if name == "c.pdf"));
    assert_eq!(entries(root.path()), 0);
}

#[test]
fn test_error_unsupported_then_invalid() {
    let err = pdfstitch::merge(&[
        item("skip.gif", b"GIF89a".to_vec()),
        item("bad.png", b"not a png".to_vec()),
    ])
    .unwrap_err();

    assert!(matches!(err, MergeError::InvalidImage { ref name, .. } if name == "bad.png"));
}

#[test]
fn test_declared_type_overrides_name() {
    let items = [InputItem::with_type(
        "upload",
        pdfstitch::DeclaredType::Png,
        png_rgb(3, 3, [0, 0, 0]),
    )];

    let output = Merger::default().merge(&items).unwrap();
    assert_eq!(output.statistics.total_pages, 1);
}

#[test]
fn test_error_missing_temp_root() {
    let root = TempDir::new().unwrap();
    let missing = root.path().join("gone");

    let err = Merger::new(MergeOptions::spooled_in(&missing))
        .merge(&[item("a.pdf", pdf_with_pages(1, "a"))])
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    assert!(!err.is_client_error());
    assert!(!missing.exists());
}
