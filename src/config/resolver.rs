//! Parent/child inheritance resolution
//!
//! Walks the `devices` and `projects` sections and merges each entry with
//! its declared parent, recursively. Resolution is memoized so each entry is
//! resolved at most once even when referenced by multiple children, and the
//! in-flight chain is tracked to reject circular parent references.

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::merge::merge_entries;
use super::ConfigError;

/// Key naming an entry's parent within its section.
pub const PARENT_KEY: &str = "parent";

/// Key naming the default entry of a section.
pub const DEFAULT_KEY: &str = "default";

/// The two sections subject to inheritance resolution.
pub const SECTIONS: [&str; 2] = ["devices", "projects"];

/// Resolve every entry in the document's `devices` and `projects` sections.
///
/// The result carries no `parent` keys in any resolved entry. Section keys
/// that are not entry mappings (notably `default`) pass through unchanged.
pub fn resolve_document(raw: &Value) -> Result<Value, ConfigError> {
    let root = raw.as_object().ok_or_else(|| {
        ConfigError::InvalidConfig("configuration root must be a JSON object".to_string())
    })?;

    let mut doc = root.clone();
    for section in SECTIONS {
        if let Some(Value::Object(entries)) = root.get(section) {
            let resolved = resolve_section(section, entries)?;
            doc.insert(section.to_string(), Value::Object(resolved));
        }
    }

    log::debug!("resolved {} top-level sections", SECTIONS.len());
    Ok(Value::Object(doc))
}

/// Look up the entry named by a section's `default` key.
pub fn default_entry<'a>(doc: &'a Value, section: &str) -> Option<&'a Value> {
    let section_map = doc.get(section)?;
    let name = section_map.get(DEFAULT_KEY)?.as_str()?;
    section_map.get(name)
}

fn resolve_section(
    section: &str,
    entries: &Map<String, Value>,
) -> Result<Map<String, Value>, ConfigError> {
    let mut memo: HashMap<String, Value> = HashMap::new();
    let mut out = Map::new();

    for (name, value) in entries {
        if !value.is_object() {
            // `default` and other scalar keys pass through untouched
            out.insert(name.clone(), value.clone());
            continue;
        }
        let resolved = resolve_entry(section, name, entries, &mut memo, &mut Vec::new())?;
        out.insert(name.clone(), resolved);
    }

    Ok(out)
}

fn resolve_entry(
    section: &str,
    name: &str,
    entries: &Map<String, Value>,
    memo: &mut HashMap<String, Value>,
    chain: &mut Vec<String>,
) -> Result<Value, ConfigError> {
    if let Some(resolved) = memo.get(name) {
        return Ok(resolved.clone());
    }

    if chain.iter().any(|n| n == name) {
        return Err(ConfigError::InvalidConfig(format!(
            "circular parent reference in {}: {} -> {}",
            section,
            chain.join(" -> "),
            name
        )));
    }

    let entry = entries.get(name).ok_or_else(|| {
        let child = chain.last().map(String::as_str).unwrap_or(name);
        ConfigError::InvalidConfig(format!(
            "{} entry '{}' references parent '{}', which does not exist",
            section, child, name
        ))
    })?;
    let entry_map = entry.as_object().ok_or_else(|| {
        ConfigError::InvalidConfig(format!("{} entry '{}' must be a mapping", section, name))
    })?;

    let resolved = match entry_map.get(PARENT_KEY) {
        Some(Value::String(parent_name)) => {
            chain.push(name.to_string());
            let parent = resolve_entry(section, parent_name, entries, memo, chain)?;
            chain.pop();

            let mut merged = merge_entries(parent, entry.clone());
            if let Some(map) = merged.as_object_mut() {
                map.retain(|key, _| key != PARENT_KEY);
            }
            merged
        }
        Some(_) => {
            return Err(ConfigError::InvalidConfig(format!(
                "{} entry '{}': parent must be a string",
                section, name
            )));
        }
        None => entry.clone(),
    };

    memo.insert(name.to_string(), resolved.clone());
    Ok(resolved)
}
