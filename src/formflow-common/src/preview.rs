//! Transient image preview handles.
//!
//! A preview handle binds the encoded bytes of an accepted image for
//! thumbnail rendering. It is acquired synchronously on acceptance and
//! released exactly once: widgets hold it in an `Option` and `take()`
//! it on removal or supersession, so ownership enforces the
//! release-once contract.

use std::path::Path;

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::files::media_type_for_path;

/// An in-memory preview of an accepted image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewHandle {
    media_type: String,
    data: String,
}

impl PreviewHandle {
    /// Load a file and encode it as a base64 preview.
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::from_bytes(media_type_for_path(path), &bytes))
    }

    /// Build a preview from raw bytes.
    pub fn from_bytes(media_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            media_type: media_type.into(),
            data: STANDARD.encode(bytes),
        }
    }

    /// The preview's media type.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// The base64-encoded content.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Approximate decoded size in bytes.
    pub fn decoded_len(&self) -> usize {
        self.data.len() / 4 * 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_encodes_bytes() {
        let preview = PreviewHandle::from_bytes("image/png", b"abc");
        assert_eq!(preview.media_type(), "image/png");
        assert_eq!(preview.data(), "YWJj");
    }

    #[test]
    fn preview_loads_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("p.png");
        std::fs::write(&path, b"xyz").expect("write");

        let preview = PreviewHandle::load(&path).expect("load");
        assert_eq!(preview.media_type(), "image/png");
        assert_eq!(preview.data(), "eHl6");
    }
}
