//! The output document of one merge request.
//!
//! The accumulator starts with an empty catalog and a single root `Pages`
//! node. Each appended document is renumbered above the accumulator's highest
//! object id, its objects are moved in, and its pages are hung under the root
//! node in their original order. The appended document's own catalog and page
//! tree nodes become unreachable and are pruned at serialization.

use lopdf::{Document, Object, ObjectId, dictionary};

use crate::config::CompressionLevel;
use crate::error::{MergeError, Result};
use crate::io::{PdfWriter, WriteStatistics};
use crate::normalize::NormalizedPages;

/// Lowest version written; image pages use Flate-compressed XObjects.
const MIN_PDF_VERSION: &str = "1.5";

/// Append-only output document. Single writer, single request.
#[derive(Debug)]
pub struct DocumentAccumulator {
    document: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    compression: CompressionLevel,
}

impl DocumentAccumulator {
    /// Create an empty output document.
    pub fn new(compression: CompressionLevel) -> Self {
        let mut document = Document::with_version(MIN_PDF_VERSION);

        let pages_id = document.new_object_id();
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => Vec::<Object>::new(),
                "Count" => 0,
            }),
        );

        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        Self {
            document,
            pages_id,
            page_ids: Vec::new(),
            compression,
        }
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Append all pages of a normalized input, keeping their order.
    ///
    /// Returns the number of pages added.
    ///
    /// # Errors
    ///
    /// Returns an error if a page of the input is not a dictionary.
    pub fn append(&mut self, pages: NormalizedPages) -> Result<usize> {
        let mut doc = pages.into_document();

        if self.compression == CompressionLevel::Maximum {
            doc.prune_objects();
        }

        doc.renumber_objects_with(self.document.max_id + 1);
        let appended: Vec<ObjectId> = doc.get_pages().into_values().collect();

        self.raise_version(&doc.version);
        self.document.objects.extend(doc.objects);
        if let Some(&(highest, _)) = self.document.objects.keys().next_back() {
            self.document.max_id = self.document.max_id.max(highest);
        }

        for &page_id in &appended {
            let page = self
                .document
                .get_dictionary_mut(page_id)
                .map_err(|e| MergeError::serialization(format!("page is not a dictionary: {e}")))?;
            page.set("Parent", self.pages_id);
        }
        self.page_ids.extend_from_slice(&appended);
        self.sync_page_tree()?;

        Ok(appended.len())
    }

    /// Rewrite the root node's `Kids` and `Count` from the appended pages.
    fn sync_page_tree(&mut self) -> Result<()> {
        let kids: Vec<Object> = self.page_ids.iter().map(|&id| id.into()).collect();
        let count = self.page_ids.len() as i64;

        let pages = self
            .document
            .get_dictionary_mut(self.pages_id)
            .map_err(|e| MergeError::serialization(format!("page tree root missing: {e}")))?;
        pages.set("Kids", kids);
        pages.set("Count", count);
        Ok(())
    }

    fn raise_version(&mut self, version: &str) {
        if parse_version(version) > parse_version(&self.document.version) {
            self.document.version = version.to_string();
        }
    }

    /// Flatten the output into the bytes of one PDF file.
    ///
    /// Consumes the accumulator; a request serializes exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::SerializationFailure`] if writing fails.
    pub fn serialize(mut self) -> Result<(Vec<u8>, WriteStatistics)> {
        PdfWriter::with_options(self.compression.into()).to_bytes(&mut self.document)
    }
}

/// `"1.7"` → `(1, 7)`; anything unparsable sorts lowest.
fn parse_version(version: &str) -> (u32, u32) {
    let (major, minor) = version.trim().split_once('.').unwrap_or((version, "0"));
    (
        major.parse().unwrap_or_default(),
        minor.parse().unwrap_or_default(),
    )
}
