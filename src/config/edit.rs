//! Targeted configuration edits
//!
//! An edit expression is `key:value`: the first colon is the delimiter and
//! the value is an opaque string. The key is searched depth-first in the
//! default device's subtree, then the default project's subtree; the first
//! occurrence found is overwritten. A key found in neither subtree is a
//! silent no-op.

use serde_json::Value;

use super::resolver::{DEFAULT_KEY, SECTIONS};
use super::ConfigError;

/// A parsed `key:value` edit expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditExpr {
    /// Attribute name to overwrite
    pub key: String,

    /// Replacement value, treated as an opaque string
    pub value: String,
}

impl EditExpr {
    /// Parse a `key:value` expression, splitting at the first colon.
    pub fn parse(expr: &str) -> Result<Self, ConfigError> {
        let (key, value) = expr.split_once(':').ok_or_else(|| {
            ConfigError::InvalidOptions(format!(
                "invalid edit expression '{}': expected key:value",
                expr
            ))
        })?;
        if key.is_empty() {
            return Err(ConfigError::InvalidOptions(format!(
                "invalid edit expression '{}': key must not be empty",
                expr
            )));
        }
        Ok(Self {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

/// Apply an edit to the default device's subtree, falling back to the
/// default project's subtree. Returns whether any occurrence was
/// overwritten.
pub fn apply(doc: &mut Value, expr: &EditExpr) -> bool {
    for section in SECTIONS {
        let Some(name) = default_entry_name(doc, section) else {
            continue;
        };
        let Some(entry) = doc.get_mut(section).and_then(|s| s.get_mut(&name)) else {
            continue;
        };
        if set_first(entry, &expr.key, &expr.value) {
            log::debug!("edit set '{}' on {} '{}'", expr.key, section, name);
            return true;
        }
    }

    log::debug!("edit key '{}' not found; document unchanged", expr.key);
    false
}

fn default_entry_name(doc: &Value, section: &str) -> Option<String> {
    doc.get(section)?
        .get(DEFAULT_KEY)?
        .as_str()
        .map(str::to_string)
}

/// Depth-first search for `key`, overwriting the first occurrence.
fn set_first(node: &mut Value, key: &str, value: &str) -> bool {
    let Some(map) = node.as_object_mut() else {
        return false;
    };
    for (name, child) in map.iter_mut() {
        if name == key {
            *child = Value::String(value.to_string());
            return true;
        }
        if set_first(child, key, value) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_doc() -> Value {
        json!({
            "devices": {
                "default": "roku",
                "roku": {"ip": "192.168.0.100", "password": "password"},
                "other": {"ip": "192.168.0.101"}
            },
            "projects": {
                "default": "p1",
                "p1": {
                    "directory": "/dev/p1",
                    "stages": {"production": {"branch": "production"}}
                },
                "p2": {"directory": "/dev/p2"}
            }
        })
    }

    #[test]
    fn test_parse_expression() {
        let expr = EditExpr::parse("ip:123.456.789").unwrap();
        assert_eq!(expr.key, "ip");
        assert_eq!(expr.value, "123.456.789");
    }

    #[test]
    fn test_parse_splits_at_first_colon_only() {
        // the value is opaque; later colons are not structural
        let expr = EditExpr::parse("url:http://example.com:8080").unwrap();
        assert_eq!(expr.key, "url");
        assert_eq!(expr.value, "http://example.com:8080");
    }

    #[test]
    fn test_parse_missing_colon_is_invalid_options() {
        let err = EditExpr::parse("no-delimiter").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOptions(_)));
    }

    #[test]
    fn test_parse_empty_key_is_invalid_options() {
        let err = EditExpr::parse(":value").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOptions(_)));
    }

    #[test]
    fn test_edit_hits_default_device_first() {
        let mut doc = sample_doc();
        let expr = EditExpr::parse("ip:123.456.789").unwrap();

        assert!(apply(&mut doc, &expr));
        assert_eq!(doc["devices"]["roku"]["ip"], "123.456.789");
        // non-default device untouched
        assert_eq!(doc["devices"]["other"]["ip"], "192.168.0.101");
    }

    #[test]
    fn test_edit_falls_back_to_default_project() {
        let mut doc = sample_doc();
        let expr = EditExpr::parse("directory:/test/dir").unwrap();

        assert!(apply(&mut doc, &expr));
        assert_eq!(doc["projects"]["p1"]["directory"], "/test/dir");
        assert_eq!(doc["projects"]["p2"]["directory"], "/dev/p2");
    }

    #[test]
    fn test_edit_reaches_nested_stage() {
        let mut doc = sample_doc();
        let expr = EditExpr::parse("branch:test").unwrap();

        assert!(apply(&mut doc, &expr));
        assert_eq!(doc["projects"]["p1"]["stages"]["production"]["branch"], "test");
    }

    #[test]
    fn test_edit_unknown_key_is_noop() {
        let mut doc = sample_doc();
        let before = doc.clone();
        let expr = EditExpr::parse("nonexistent:value").unwrap();

        assert!(!apply(&mut doc, &expr));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_edit_overwrites_first_occurrence_in_document_order() {
        let mut doc = json!({
            "devices": {
                "default": "roku",
                "roku": {
                    "nested": {"key": "inner"},
                    "key": "outer"
                }
            },
            "projects": {"default": "p1", "p1": {}}
        });
        let expr = EditExpr::parse("key:changed").unwrap();

        assert!(apply(&mut doc, &expr));
        // depth-first: the nested occurrence comes first in document order
        assert_eq!(doc["devices"]["roku"]["nested"]["key"], "changed");
        assert_eq!(doc["devices"]["roku"]["key"], "outer");
    }
}
