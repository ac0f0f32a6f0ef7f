//! Structural validation
//!
//! Fail-fast checks over the raw document: the first violation found is
//! reported and validation stops. Works on the raw document, so it can run
//! before or after `parse`.

use std::collections::HashSet;

use serde_json::{Map, Value};

use super::resolver::{DEFAULT_KEY, PARENT_KEY, SECTIONS};
use super::ConfigError;

/// Key naming a project's default stage.
const STAGE_KEY: &str = "stage";

/// Key holding a project's stage mapping.
const STAGES_KEY: &str = "stages";

/// Validate the structure of a loaded document.
pub fn validate_document(raw: &Value) -> Result<(), ConfigError> {
    let root = raw
        .as_object()
        .ok_or_else(|| invalid("configuration root must be a JSON object"))?;

    for section in SECTIONS {
        let entries = root
            .get(section)
            .ok_or_else(|| invalid(format!("missing '{}' section", section)))?
            .as_object()
            .ok_or_else(|| invalid(format!("'{}' must be a mapping", section)))?;

        validate_section(section, entries)?;

        if section == "projects" {
            validate_stage_references(entries)?;
        }
    }

    Ok(())
}

fn validate_section(section: &str, entries: &Map<String, Value>) -> Result<(), ConfigError> {
    if !entries.iter().any(|(name, v)| name != DEFAULT_KEY && v.is_object()) {
        return Err(invalid(format!("'{}' must define at least one entry", section)));
    }

    let default_name = entries
        .get(DEFAULT_KEY)
        .ok_or_else(|| invalid(format!("'{}' is missing a 'default' entry", section)))?
        .as_str()
        .ok_or_else(|| invalid(format!("'{}.default' must be a string", section)))?;
    if !entries.get(default_name).is_some_and(Value::is_object) {
        return Err(invalid(format!(
            "'{}.default' names '{}', which does not exist",
            section, default_name
        )));
    }

    for (name, entry) in entries {
        if name == DEFAULT_KEY {
            continue;
        }
        let map = entry.as_object().ok_or_else(|| {
            invalid(format!("{} entry '{}' must be a mapping", section, name))
        })?;

        if let Some(parent) = map.get(PARENT_KEY) {
            let parent_name = parent.as_str().ok_or_else(|| {
                invalid(format!("{} entry '{}': parent must be a string", section, name))
            })?;
            if !entries.get(parent_name).is_some_and(Value::is_object) {
                return Err(invalid(format!(
                    "{} entry '{}' references parent '{}', which does not exist",
                    section, name, parent_name
                )));
            }
        }
    }

    Ok(())
}

/// A project naming a default `stage` must find that stage in its own
/// `stages` mapping or in an ancestor's.
fn validate_stage_references(entries: &Map<String, Value>) -> Result<(), ConfigError> {
    for (name, entry) in entries {
        if name == DEFAULT_KEY {
            continue;
        }
        let Some(map) = entry.as_object() else { continue };
        let Some(stage) = map.get(STAGE_KEY).and_then(Value::as_str) else {
            continue;
        };
        if !stage_defined(entries, map, stage) {
            return Err(invalid(format!(
                "project '{}' references stage '{}', which is not defined in its stages",
                name, stage
            )));
        }
    }
    Ok(())
}

fn stage_defined(entries: &Map<String, Value>, start: &Map<String, Value>, stage: &str) -> bool {
    let mut current = start;
    let mut seen: HashSet<&str> = HashSet::new();
    loop {
        if current
            .get(STAGES_KEY)
            .and_then(Value::as_object)
            .is_some_and(|stages| stages.contains_key(stage))
        {
            return true;
        }
        let Some(parent) = current.get(PARENT_KEY).and_then(Value::as_str) else {
            return false;
        };
        // a parent cycle is parse's error to report; just stop walking
        if !seen.insert(parent) {
            return false;
        }
        match entries.get(parent).and_then(Value::as_object) {
            Some(parent_map) => current = parent_map,
            None => return false,
        }
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidConfig(message.into())
}
