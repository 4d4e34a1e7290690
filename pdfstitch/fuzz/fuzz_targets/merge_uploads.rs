#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfstitch::{DeclaredType, InputItem, MergeError, Merger};

const NAMES: [&str; 4] = ["upload.pdf", "upload.png", "upload.jpg", "upload.jpeg"];

fuzz_target!(|data: &[u8]| {
    let Some((&selector, content)) = data.split_first() else {
        return;
    };

    // Arbitrary bytes under every accepted name must either merge or be
    // rejected as an invalid input, never panic.
    let name = NAMES[usize::from(selector) % NAMES.len()];
    let item = InputItem::new(name, content.to_vec());
    assert!(DeclaredType::from_file_name(name).is_some());

    match Merger::default().merge(&[item]) {
        Ok(output) => assert!(output.bytes.starts_with(b"%PDF-")),
        Err(MergeError::InvalidDocument { .. } | MergeError::InvalidImage { .. }) => {}
        Err(other) => panic!("unexpected error: {other}"),
    }
});
