//! Merge inputs.

use std::fmt;

/// File type a client claims an upload to be, taken from its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    /// `.pdf`
    Pdf,
    /// `.png`
    Png,
    /// `.jpg`
    Jpg,
    /// `.jpeg`
    Jpeg,
}

impl DeclaredType {
    /// Extensions accepted for merging.
    pub const ACCEPTED: [&'static str; 4] = ["pdf", "png", "jpg", "jpeg"];

    /// Parse the extension of a file name (text after the last `.`).
    ///
    /// Returns `None` for names without an extension or with an extension
    /// outside [`DeclaredType::ACCEPTED`].
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() && ext.is_empty() {
            return None;
        }
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "png" => Some(Self::Png),
            "jpg" => Some(Self::Jpg),
            "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    /// Whether the item goes through the image path.
    pub fn is_image(&self) -> bool {
        !matches!(self, Self::Pdf)
    }

    /// Lowercase extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// One submitted file, in submission order.
///
/// The declared type is client-controlled metadata. It selects which
/// normalizer is tried, and the content is sniffed before that normalizer
/// trusts it.
#[derive(Clone)]
pub struct InputItem {
    name: String,
    declared_type: Option<DeclaredType>,
    content: Vec<u8>,
}

impl InputItem {
    /// Create an item, deriving its declared type from `name`.
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        let name = name.into();
        let declared_type = DeclaredType::from_file_name(&name);
        Self {
            name,
            declared_type,
            content: content.into(),
        }
    }

    /// Create an item with an explicit declared type.
    pub fn with_type(
        name: impl Into<String>,
        declared_type: DeclaredType,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            declared_type: Some(declared_type),
            content: content.into(),
        }
    }

    /// Client-supplied file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type, or `None` when the name is empty or unsupported.
    pub fn declared_type(&self) -> Option<DeclaredType> {
        self.declared_type
    }

    /// Raw content.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Whether the item will be considered by a merge.
    pub fn is_supported(&self) -> bool {
        !self.name.is_empty() && self.declared_type.is_some()
    }
}

impl fmt::Debug for InputItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputItem")
            .field("name", &self.name)
            .field("declared_type", &self.declared_type)
            .field("len", &self.content.len())
            .finish()
    }
}
