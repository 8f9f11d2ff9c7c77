//! Demo configuration.
//!
//! An optional `formflow.toml` next to the binary overrides the form's
//! limits; a missing file yields the defaults, and a malformed file is
//! an error rather than a silent fallback.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// Limits and toggles for the demo form.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    /// Maximum simultaneous interest selections.
    pub interests_max: usize,
    /// Maximum number of gallery files.
    pub gallery_max_files: usize,
    /// Per-file upload limit in megabytes.
    pub upload_max_mb: u32,
    /// Accept list for the document field.
    pub document_accept: String,
    /// Accept list for the gallery field.
    pub gallery_accept: String,
    /// Whether the appointment field shows a time entry.
    pub show_time: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            interests_max: 5,
            gallery_max_files: 5,
            upload_max_mb: 5,
            document_accept: ".pdf,.doc,.docx,application/msword,application/vnd.openxmlformats-officedocument.wordprocessingml.document".to_string(),
            gallery_accept: "image/*".to_string(),
            show_time: true,
        }
    }
}

impl DemoConfig {
    /// Load configuration from a TOML file; a missing file yields the
    /// defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self =
            toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = DemoConfig::load(&dir.path().join("nope.toml")).expect("load");
        assert_eq!(config, DemoConfig::default());
    }

    #[test]
    fn file_overrides_limits() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("formflow.toml");
        std::fs::write(
            &path,
            "interests_max = 2\nupload_max_mb = 1\nshow_time = false\n",
        )
        .expect("write");

        let config = DemoConfig::load(&path).expect("load");
        assert_eq!(config.interests_max, 2);
        assert_eq!(config.upload_max_mb, 1);
        assert!(!config.show_time);
        // Unspecified keys keep their defaults.
        assert_eq!(config.gallery_max_files, 5);
    }

    #[test]
    fn unknown_keys_are_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("formflow.toml");
        std::fs::write(&path, "no_such_key = 1\n").expect("write");
        assert!(DemoConfig::load(&path).is_err());
    }
}
