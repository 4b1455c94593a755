//! Loading files picked for `file` form fields.

use std::path::Path;

use restlab_domain::request::FileHandle;
use tokio::fs;

/// Error type for file loading.
#[derive(Debug, thiserror::Error)]
pub enum FileLoadError {
    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Requested path
        path: String,
    },

    /// Failed to read file.
    #[error("Failed to read file: {message}")]
    FileReadError {
        /// Path and underlying error
        message: String,
    },
}

/// Reads a file into a handle that can be bound to a form field.
///
/// The MIME type is guessed from the extension, defaulting to
/// `application/octet-stream`.
///
/// # Errors
///
/// Returns an error if the file does not exist or cannot be read.
pub async fn load_file_handle(path: &Path) -> Result<FileHandle, FileLoadError> {
    let content = fs::read(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            FileLoadError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            FileLoadError::FileReadError {
                message: format!("{}: {}", path.display(), e),
            }
        }
    })?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("file")
        .to_string();

    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string();

    tracing::debug!(file_name = %file_name, mime_type = %mime_type, size = content.len(), "loaded file for form field");
    Ok(FileHandle::new(file_name, mime_type, content))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_load_guesses_mime_type() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("data.json");
        std::fs::write(&path, br#"{"a":1}"#).unwrap();

        let handle = load_file_handle(&path).await.unwrap();
        assert_eq!(handle.file_name, "data.json");
        assert_eq!(handle.mime_type, "application/json");
        assert_eq!(&*handle.content, br#"{"a":1}"#);
    }

    #[tokio::test]
    async fn test_unknown_extension_is_octet_stream() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("blob.zzzunknown");
        std::fs::write(&path, [0u8, 1, 2]).unwrap();

        let handle = load_file_handle(&path).await.unwrap();
        assert_eq!(handle.mime_type, "application/octet-stream");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempdir().expect("Failed to create temp directory");
        let result = load_file_handle(&dir.path().join("nope.txt")).await;
        assert!(matches!(result, Err(FileLoadError::FileNotFound { .. })));
    }
}
