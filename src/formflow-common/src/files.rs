//! File descriptors and the intake validation pipeline.
//!
//! A candidate file is checked in order: size first, then type against
//! the configured accept list. Rejections are typed [`IntakeError`]s
//! rendered as field-local messages; they never become faults.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Descriptor for a candidate or accepted file.
///
/// Serializes as `{name, type, size}` in submission payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDescriptor {
    /// File name (uniqueness key within a multi-file set)
    pub name: String,
    /// Media type, e.g. `image/png`
    #[serde(rename = "type")]
    pub media_type: String,
    /// Size in bytes
    #[serde(rename = "size")]
    pub size_bytes: u64,
    /// Source path, when the file came from disk
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

impl FileDescriptor {
    /// Create a descriptor from raw parts.
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size_bytes,
            path: None,
        }
    }

    /// Build a descriptor by inspecting a file on disk.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let meta = std::fs::metadata(path)?;
        if !meta.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            name,
            media_type: media_type_for_path(path).to_string(),
            size_bytes: meta.len(),
            path: Some(path.to_path_buf()),
        })
    }

    /// Whether this file renders an image preview.
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

/// Derive a media type from a path's extension.
pub fn media_type_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("json") => "application/json",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}

/// A single accepted-type matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptSpecifier {
    /// Matches every media type (`"any"` or `"*"`)
    Any,
    /// Matches one exact media type
    Exact(String),
    /// Matches a category prefix (`"image/*"` stores `image`)
    Category(String),
}

impl AcceptSpecifier {
    /// Parse a comma-separated specifier list.
    ///
    /// `"any"` and `"*"` yield the wildcard; entries ending in `/*`
    /// become category matchers; everything else is an exact type.
    /// Leading-dot extensions (`.pdf`) are resolved through the same
    /// extension table used for paths.
    pub fn parse_list(spec: &str) -> Vec<AcceptSpecifier> {
        spec.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(AcceptSpecifier::parse)
            .collect()
    }

    fn parse(spec: &str) -> AcceptSpecifier {
        if spec == "any" || spec == "*" {
            return AcceptSpecifier::Any;
        }
        if let Some(category) = spec.strip_suffix("/*") {
            return AcceptSpecifier::Category(category.to_string());
        }
        if let Some(ext) = spec.strip_prefix('.') {
            let media = media_type_for_path(Path::new(&format!("f.{ext}")));
            return AcceptSpecifier::Exact(media.to_string());
        }
        AcceptSpecifier::Exact(spec.to_string())
    }

    /// Whether a media type matches this specifier.
    pub fn matches(&self, media_type: &str) -> bool {
        match self {
            AcceptSpecifier::Any => true,
            AcceptSpecifier::Exact(exact) => exact == media_type,
            AcceptSpecifier::Category(category) => media_type
                .strip_prefix(category.as_str())
                .is_some_and(|rest| rest.starts_with('/')),
        }
    }
}

/// Why a candidate file was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    /// The file exceeds the configured size limit.
    #[error("File is too large. Maximum size is {max_mb}MB.")]
    TooLarge {
        /// Configured limit in megabytes
        max_mb: u32,
    },
    /// The file's media type matches no accept specifier.
    #[error("File type not accepted.")]
    TypeNotAccepted,
}

/// Size and type constraints applied to every candidate file.
#[derive(Debug, Clone)]
pub struct IntakePolicy {
    accept: Vec<AcceptSpecifier>,
    max_size_mb: u32,
}

impl IntakePolicy {
    /// Default limit in megabytes.
    pub const DEFAULT_MAX_SIZE_MB: u32 = 5;

    /// Create a policy from an accept list and a size limit in MB.
    pub fn new(accept: &str, max_size_mb: u32) -> Self {
        Self {
            accept: AcceptSpecifier::parse_list(accept),
            max_size_mb,
        }
    }

    /// Create a policy from already-parsed specifiers.
    pub fn from_parts(accept: Vec<AcceptSpecifier>, max_size_mb: u32) -> Self {
        Self {
            accept,
            max_size_mb,
        }
    }

    /// The configured size limit in megabytes.
    pub fn max_size_mb(&self) -> u32 {
        self.max_size_mb
    }

    /// The parsed accept list.
    pub fn accept(&self) -> &[AcceptSpecifier] {
        &self.accept
    }

    /// Run the intake pipeline: size check, then type check.
    pub fn evaluate(&self, file: &FileDescriptor) -> Result<(), IntakeError> {
        if file.size_bytes > self.max_size_mb as u64 * 1024 * 1024 {
            return Err(IntakeError::TooLarge {
                max_mb: self.max_size_mb,
            });
        }
        // An empty accept list behaves like the wildcard.
        if !self.accept.is_empty()
            && !self.accept.iter().any(|s| s.matches(&file.media_type))
        {
            return Err(IntakeError::TypeNotAccepted);
        }
        Ok(())
    }
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self::new("any", Self::DEFAULT_MAX_SIZE_MB)
    }
}

/// Format a byte count for display (`0 Bytes`, `1.5 KB`, `2.25 MB`).
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let exp = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);
    let scaled = bytes as f64 / 1024f64.powi(exp as i32);
    // Two decimals with trailing zeros trimmed, like "1.5 KB" not "1.50 KB".
    let rounded = (scaled * 100.0).round() / 100.0;
    let mut text = format!("{rounded}");
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    format!("{} {}", text, UNITS[exp])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn png(name: &str, size: u64) -> FileDescriptor {
        FileDescriptor::new(name, "image/png", size)
    }

    #[test]
    fn accept_any_matches_everything() {
        let specs = AcceptSpecifier::parse_list("any");
        assert!(specs[0].matches("image/png"));
        assert!(specs[0].matches("application/pdf"));
    }

    #[test]
    fn category_wildcard_matches_prefix_only() {
        let spec = AcceptSpecifier::parse_list("image/*");
        assert!(spec[0].matches("image/png"));
        assert!(spec[0].matches("image/jpeg"));
        assert!(!spec[0].matches("application/pdf"));
        // Prefix must end at the slash: "imagex/png" is not an image.
        assert!(!spec[0].matches("imagex/png"));
    }

    #[test]
    fn exact_and_extension_specifiers() {
        let specs = AcceptSpecifier::parse_list(".pdf,application/msword");
        assert!(specs[0].matches("application/pdf"));
        assert!(specs[1].matches("application/msword"));
        assert!(!specs[0].matches("text/plain"));
    }

    #[test]
    fn pipeline_checks_size_before_type() {
        let policy = IntakePolicy::new("application/pdf", 1);
        let big_pdf = FileDescriptor::new("a.pdf", "application/pdf", 2 * 1024 * 1024);
        assert_eq!(
            policy.evaluate(&big_pdf),
            Err(IntakeError::TooLarge { max_mb: 1 })
        );

        let small_png = png("b.png", 10);
        assert_eq!(policy.evaluate(&small_png), Err(IntakeError::TypeNotAccepted));

        let small_pdf = FileDescriptor::new("c.pdf", "application/pdf", 10);
        assert_eq!(policy.evaluate(&small_pdf), Ok(()));
    }

    #[test]
    fn size_limit_is_inclusive() {
        let policy = IntakePolicy::new("any", 1);
        assert_eq!(policy.evaluate(&png("a.png", 1024 * 1024)), Ok(()));
        assert!(policy.evaluate(&png("a.png", 1024 * 1024 + 1)).is_err());
    }

    #[test]
    fn rejection_messages_are_field_local_text() {
        assert_eq!(
            IntakeError::TooLarge { max_mb: 5 }.to_string(),
            "File is too large. Maximum size is 5MB."
        );
        assert_eq!(
            IntakeError::TypeNotAccepted.to_string(),
            "File type not accepted."
        );
    }

    #[test]
    fn format_size_cases() {
        assert_eq!(format_size(0), "0 Bytes");
        assert_eq!(format_size(512), "512 Bytes");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(2 * 1024 * 1024), "2 MB");
    }

    #[test]
    fn descriptor_from_path_reads_metadata() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("photo.png");
        std::fs::write(&path, vec![0u8; 128]).expect("write");

        let desc = FileDescriptor::from_path(&path).expect("descriptor");
        assert_eq!(desc.name, "photo.png");
        assert_eq!(desc.media_type, "image/png");
        assert_eq!(desc.size_bytes, 128);
        assert!(desc.is_image());
    }

    #[test]
    fn descriptor_from_directory_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(FileDescriptor::from_path(dir.path()).is_err());
    }
}
