//! Uploaded media files.

/// A file received in a multipart body, handed to the backend for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    /// Client-supplied file name, if any.
    pub filename: Option<String>,
    /// Declared MIME type of the part, if any.
    pub content_type: Option<String>,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl MediaFile {
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: None,
            content_type: None,
            bytes: bytes.into(),
        }
    }

    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Lowercase extension taken from the file name, e.g. `"jpg"`.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        let name = self.filename.as_deref()?;
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A file part submitted alongside a create request, to be stored through the
/// media path and referenced from `property`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub property: String,
    pub file: MediaFile,
}
