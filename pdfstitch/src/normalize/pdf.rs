//! PDF inputs.
//!
//! A PDF input is parsed and handed on whole: its pages, their content
//! streams and everything they reference are copied into the output, never
//! re-rendered. Attributes that a page inherits from its ancestors in the
//! page tree are copied onto the page itself, because the page is later
//! re-parented under the output's page tree.

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::{MergeError, Result};

/// Page attributes that may be inherited through the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic `Parent` chains in malformed files.
const MAX_TREE_DEPTH: usize = 64;

/// Parse PDF bytes into a standalone document.
///
/// # Errors
///
/// Returns [`MergeError::InvalidDocument`] if the bytes cannot be parsed or
/// the document is encrypted.
pub fn load(name: &str, data: &[u8]) -> Result<Document> {
    let mut doc = Document::load_mem(data).map_err(|e| {
        let err_msg = e.to_string();
        if err_msg.contains("encrypt") || err_msg.contains("password") {
            MergeError::invalid_document(name, "document is encrypted")
        } else {
            MergeError::invalid_document(name, err_msg)
        }
    })?;

    if doc.is_encrypted() {
        return Err(MergeError::invalid_document(name, "document is encrypted"));
    }

    materialize_inherited_attributes(&mut doc)
        .map_err(|e| MergeError::invalid_document(name, format!("broken page tree: {e}")))?;

    Ok(doc)
}

/// Copy inherited attributes onto every page that lacks them.
fn materialize_inherited_attributes(doc: &mut Document) -> lopdf::Result<()> {
    let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();

    for page_id in page_ids {
        let inherited: Vec<(&[u8], Object)> = {
            let page = doc.get_dictionary(page_id)?;
            INHERITABLE_KEYS
                .iter()
                .filter(|key| !page.has(key))
                .filter_map(|key| find_inherited(doc, page, key).map(|value| (*key, value)))
                .collect()
        };

        if inherited.is_empty() {
            continue;
        }

        let page = doc.get_dictionary_mut(page_id)?;
        for (key, value) in inherited {
            page.set(key, value);
        }
    }

    Ok(())
}

/// Look up `key` on the ancestors of `page`, nearest first.
fn find_inherited(doc: &Document, page: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    for _ in 0..MAX_TREE_DEPTH {
        let node = doc.get_dictionary(parent?).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    None
}
