//! File handles bound to form fields.

use std::fmt;
use std::sync::Arc;

/// Opaque handle to a file the user picked for a `file` form field.
///
/// Handles live only in memory; they are never written to the
/// persistent store, so a reloaded tab comes back without them.
#[derive(Clone, PartialEq, Eq)]
pub struct FileHandle {
    /// File name sent in the multipart part
    pub file_name: String,
    /// MIME type of the content
    pub mime_type: String,
    /// File content
    pub content: Arc<[u8]>,
}

impl FileHandle {
    /// Creates a handle from in-memory content.
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        content: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            content: content.into(),
        }
    }

    /// Returns the content size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns true if the file is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

// Content is elided so logs never dump file bytes.
impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.content.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_content() {
        let handle = FileHandle::new("a.txt", "text/plain", b"secret".to_vec());
        let debug = format!("{handle:?}");
        assert!(debug.contains("a.txt"));
        assert!(!debug.contains("secret"));
        assert_eq!(handle.len(), 6);
    }
}
