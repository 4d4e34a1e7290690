//! Integration tests for merging PDF documents.

use pdfstitch::{CompressionLevel, MergeOptions, Merger};
use rstest::rstest;
use tempfile::TempDir;

use crate::common::{entries, item, load, media_box, page_contents, page_ids, pdf_with_pages};

#[rstest]
#[case(1, 1)]
#[case(3, 2)]
#[case(5, 0)]
fn test_page_count_is_sum(#[case] a: usize, #[case] b: usize) {
    let bytes = pdfstitch::merge(&[
        item("a.pdf", pdf_with_pages(a, "a")),
        item("b.pdf", pdf_with_pages(b, "b")),
    ])
    .unwrap();

    assert_eq!(page_ids(&load(&bytes)).len(), a + b);
}

#[test]
fn test_content_streams_survive() {
    let a = pdf_with_pages(3, "a");
    let b = pdf_with_pages(2, "b");

    let merged = load(&pdfstitch::merge(&[item("a.pdf", a.clone()), item("b.pdf", b.clone())]).unwrap());
    let merged_contents = page_contents(&merged);

    let expected: Vec<Vec<u8>> = page_contents(&load(&a))
        .into_iter()
        .chain(page_contents(&load(&b)))
        .collect();
    assert_eq!(merged_contents, expected);
}

#[test]
fn test_submission_order_is_kept() {
    let bytes = pdfstitch::merge(&[
        item("z.pdf", pdf_with_pages(1, "z")),
        item("a.pdf", pdf_with_pages(1, "a")),
        item("m.pdf", pdf_with_pages(1, "m")),
    ])
    .unwrap();

    let firsts: Vec<String> = page_contents(&load(&bytes))
        .iter()
        .map(|c| String::from_utf8_lossy(c).lines().next().unwrap().to_string())
        .collect();
    assert_eq!(firsts, vec!["% z-1", "% a-1", "% m-1"]);
}

#[test]
fn test_page_attributes_survive() {
    let bytes = pdfstitch::merge(&[item("a.pdf", pdf_with_pages(2, "a"))]).unwrap();
    let doc = load(&bytes);

    for page_id in page_ids(&doc) {
        assert_eq!(media_box(&doc, page_id), vec![0.0, 0.0, 612.0, 792.0]);
        assert!(doc.get_dictionary(page_id).unwrap().has(b"Resources"));
    }
}

#[test]
fn test_output_is_deterministic() {
    let items = [
        item("a.pdf", pdf_with_pages(2, "a")),
        item("b.pdf", pdf_with_pages(1, "b")),
    ];

    let first = pdfstitch::merge(&items).unwrap();
    let second = pdfstitch::merge(&items).unwrap();
    assert_eq!(first, second);
}

#[rstest]
#[case(CompressionLevel::None)]
#[case(CompressionLevel::Standard)]
#[case(CompressionLevel::Maximum)]
fn test_compression_levels(#[case] compression: CompressionLevel) {
    let options = MergeOptions {
        compression,
        ..Default::default()
    };

    let output = Merger::new(options)
        .merge(&[
            item("a.pdf", pdf_with_pages(2, "a")),
            item("b.pdf", pdf_with_pages(2, "b")),
        ])
        .unwrap();

    assert_eq!(output.statistics.total_pages, 4);
    assert_eq!(page_ids(&load(&output.bytes)).len(), 4);
}

#[test]
fn test_disk_spool_leaves_nothing_behind() {
    let root = TempDir::new().unwrap();
    let merger = Merger::new(MergeOptions::spooled_in(root.path()));

    let output = merger
        .merge(&[
            item("../../etc/passwd.pdf", pdf_with_pages(1, "a")),
            item("résumé final.pdf", pdf_with_pages(2, "b")),
        ])
        .unwrap();

    assert_eq!(output.statistics.files_merged, 2);
    assert_eq!(output.statistics.total_pages, 3);
    assert_eq!(entries(root.path()), 0);
}

#[test]
fn test_concurrent_requests_are_isolated() {
    let root = TempDir::new().unwrap();
    let merger = Merger::new(MergeOptions::spooled_in(root.path()));

    std::thread::scope(|scope| {
        let handles: Vec<_> = (1..=4)
            .map(|pages| {
                let merger = &merger;
                scope.spawn(move || {
                    merger
                        .merge(&[
                            item("same.pdf", pdf_with_pages(pages, "x")),
                            item("same.pdf", pdf_with_pages(1, "y")),
                        ])
                        .unwrap()
                })
            })
            .collect();

        for (pages, handle) in (1..=4).zip(handles) {
            assert_eq!(handle.join().unwrap().statistics.total_pages, pages + 1);
        }
    });

    assert_eq!(entries(root.path()), 0);
}
