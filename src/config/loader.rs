//! Configuration file loading
//!
//! Reads the configuration document from disk. A missing file and malformed
//! JSON are distinct failures; a syntactically valid document of the wrong
//! shape (e.g. a bare array) loads fine and is rejected later by
//! `parse`/`validate`.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::ConfigError;

/// Expand a leading `~` in a user-supplied configuration path.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Read and parse the configuration document at `path`.
pub fn load_document(path: &Path) -> Result<Value, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path)?;
    let document = serde_json::from_str(&contents).map_err(|e| {
        ConfigError::InvalidConfig(format!("malformed JSON in '{}': {}", path.display(), e))
    })?;

    log::debug!("loaded configuration from {}", path.display());
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_well_formed_document() {
        let mut temp = NamedTempFile::new().unwrap();
        write!(temp, r#"{{"devices": {{"default": "roku"}}}}"#).unwrap();

        let doc = load_document(temp.path()).unwrap();
        assert_eq!(doc["devices"]["default"], "roku");
    }

    #[test]
    fn test_missing_file_is_file_not_found() {
        let err = load_document(Path::new("/nonexistent/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_non_json_is_invalid_config() {
        let mut temp = NamedTempFile::new().unwrap();
        write!(temp, "this is not json").unwrap();

        let err = load_document(temp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig(_)));
    }

    #[test]
    fn test_bare_array_still_loads() {
        let mut temp = NamedTempFile::new().unwrap();
        write!(temp, "[1, 2, 3]").unwrap();

        // Wrong shape, but syntactically valid; the loader accepts it
        let doc = load_document(temp.path()).unwrap();
        assert!(doc.is_array());
    }

    #[test]
    fn test_expand_path_home_shortcut() {
        let expanded = expand_path("~/.roku_config.json");
        assert!(expanded.to_string_lossy().ends_with(".roku_config.json"));
        if std::env::var_os("HOME").is_some() {
            assert!(!expanded.to_string_lossy().starts_with('~'));
        }
    }

    #[test]
    fn test_expand_path_absolute_untouched() {
        let expanded = expand_path("/etc/roku/config.json");
        assert_eq!(expanded, PathBuf::from("/etc/roku/config.json"));
    }
}
