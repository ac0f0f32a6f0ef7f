//! Input mappings
//!
//! Maps raw input identifiers read from the terminal (single characters,
//! ANSI escape sequences for arrow keys) to the device button name and the
//! human-readable label shown by downstream monitor components. Projects may
//! override individual entries via an `input_mappings` object on the
//! resolved project.

use std::collections::BTreeMap;

use serde_json::Value;

/// Effective input mappings: input id → (device button, human label).
pub type InputMappings = BTreeMap<String, (String, String)>;

/// Fixed built-in mapping table.
fn builtin_table() -> InputMappings {
    let entries = [
        ("\u{1b}[A", "up", "Up"),
        ("\u{1b}[B", "down", "Down"),
        ("\u{1b}[C", "right", "Right"),
        ("\u{1b}[D", "left", "Left"),
        ("\r", "select", "Select"),
        ("<", "rev", "Rev"),
        (">", "fwd", "Fwd"),
        ("a", "home", "Home"),
        ("s", "back", "Back"),
        ("d", "info", "Info"),
        ("f", "instant_replay", "Instant Replay"),
        (" ", "play", "Play"),
    ];

    entries
        .into_iter()
        .map(|(id, button, label)| (id.to_string(), (button.to_string(), label.to_string())))
        .collect()
}

/// Build the effective mappings for the default project, overlaying any
/// project-level `input_mappings` entries on the built-in table.
///
/// An override entry must be a two-element array of strings; anything else
/// is skipped.
pub fn build_mappings(project: Option<&Value>) -> InputMappings {
    let mut table = builtin_table();

    let overrides = project
        .and_then(|p| p.get("input_mappings"))
        .and_then(Value::as_object);
    if let Some(overrides) = overrides {
        for (id, pair) in overrides {
            match mapping_pair(pair) {
                Some(mapping) => {
                    table.insert(id.clone(), mapping);
                }
                None => {
                    log::warn!("ignoring malformed input mapping for '{}'", id);
                }
            }
        }
    }

    table
}

fn mapping_pair(value: &Value) -> Option<(String, String)> {
    let pair = value.as_array()?;
    if pair.len() != 2 {
        return None;
    }
    let button = pair[0].as_str()?;
    let label = pair[1].as_str()?;
    Some((button.to_string(), label.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_home_mapping() {
        let mappings = build_mappings(None);
        assert_eq!(
            mappings.get("a"),
            Some(&("home".to_string(), "Home".to_string()))
        );
    }

    #[test]
    fn test_builtin_arrow_keys() {
        let mappings = build_mappings(None);
        assert_eq!(
            mappings.get("\u{1b}[A"),
            Some(&("up".to_string(), "Up".to_string()))
        );
        assert_eq!(
            mappings.get("\u{1b}[D"),
            Some(&("left".to_string(), "Left".to_string()))
        );
    }

    #[test]
    fn test_project_override_replaces_entry() {
        let project = json!({
            "input_mappings": {
                "a": ["search", "Search"]
            }
        });

        let mappings = build_mappings(Some(&project));
        assert_eq!(
            mappings.get("a"),
            Some(&("search".to_string(), "Search".to_string()))
        );
        // untouched entries keep their built-in values
        assert_eq!(
            mappings.get("\r"),
            Some(&("select".to_string(), "Select".to_string()))
        );
    }

    #[test]
    fn test_project_override_adds_entry() {
        let project = json!({
            "input_mappings": {
                "x": ["backspace", "Backspace"]
            }
        });

        let mappings = build_mappings(Some(&project));
        assert_eq!(
            mappings.get("x"),
            Some(&("backspace".to_string(), "Backspace".to_string()))
        );
    }

    #[test]
    fn test_malformed_override_skipped() {
        let project = json!({
            "input_mappings": {
                "a": "not-a-pair",
                "b": ["only-one"]
            }
        });

        let mappings = build_mappings(Some(&project));
        // built-in survives the malformed override
        assert_eq!(
            mappings.get("a"),
            Some(&("home".to_string(), "Home".to_string()))
        );
        assert!(!mappings.contains_key("b"));
    }

    #[test]
    fn test_project_without_overrides() {
        let project = json!({"app_name": "app"});
        let mappings = build_mappings(Some(&project));
        assert_eq!(mappings, builtin_table());
    }
}
