//! Layered device/project configuration
//!
//! Implements the configuration lane core: loading the JSON document of
//! named devices and projects, resolving parent/child inheritance between
//! entries, validating the resolved structure, and applying targeted
//! `key:value` edits. One `Config` owns the document for the lifetime of a
//! CLI invocation; downstream build/deploy/monitor components read through
//! its accessors and never mutate the document directly.

mod edit;
mod input;
mod loader;
mod merge;
mod resolver;
mod scaffold;
mod validate;

pub use edit::EditExpr;
pub use input::InputMappings;
pub use merge::merge_entries;
pub use scaffold::ScaffoldDefaults;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

/// Error types for configuration operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Unsupported mutation: '{0}' is not a settable field")]
    UnsupportedMutation(String),

    #[error("Configuration I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The configuration document for one CLI invocation.
///
/// Lifecycle: `load` → `parse` → (`validate` | `edit`) → optional persist,
/// or `configure` to materialize a fresh file. `raw` is the document exactly
/// as loaded; `parsed` is the fully resolved form with inheritance applied.
#[derive(Debug)]
pub struct Config {
    path: PathBuf,
    raw: Option<Value>,
    parsed: Option<Value>,
    root_dir: Option<String>,
    in_path: Option<String>,
    out_path: Option<String>,
    input_mappings: Option<InputMappings>,
}

impl Config {
    /// Create a config handle for `path`, expanding a leading `~`.
    pub fn new(path: &str) -> Self {
        Self {
            path: loader::expand_path(path),
            raw: None,
            parsed: None,
            root_dir: None,
            in_path: None,
            out_path: None,
            input_mappings: None,
        }
    }

    /// The expanded path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the raw document from the backing file.
    pub fn load(&mut self) -> Result<(), ConfigError> {
        self.raw = Some(loader::load_document(&self.path)?);
        Ok(())
    }

    /// Resolve parent/child inheritance, producing the parsed document and
    /// the derived fields (`root_dir`, input mappings).
    pub fn parse(&mut self) -> Result<(), ConfigError> {
        let raw = self.raw.as_ref().ok_or_else(|| {
            ConfigError::InvalidOptions("load must run before parse".to_string())
        })?;

        let parsed = resolver::resolve_document(raw)?;
        let project = resolver::default_entry(&parsed, "projects");
        self.root_dir = project
            .and_then(|p| p.get("directory"))
            .and_then(Value::as_str)
            .map(str::to_string);
        self.input_mappings = Some(input::build_mappings(project));
        self.parsed = Some(parsed);
        Ok(())
    }

    /// Check the structure of the loaded document, failing on the first
    /// violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let raw = self.raw.as_ref().ok_or_else(|| {
            ConfigError::InvalidOptions("load must run before validate".to_string())
        })?;
        validate::validate_document(raw)
    }

    /// Apply a `key:value` edit to the default device or default project and
    /// persist the document. A key found in neither subtree leaves the
    /// document (and file) unchanged.
    pub fn edit(&mut self, expr: &str) -> Result<(), ConfigError> {
        let expr = EditExpr::parse(expr)?;
        let raw = self.raw.as_mut().ok_or_else(|| {
            ConfigError::InvalidOptions("load must run before edit".to_string())
        })?;

        if !edit::apply(raw, &expr) {
            return Ok(());
        }
        self.persist()?;

        // keep the resolved view in step with the mutation
        if self.parsed.is_some() {
            self.parse()?;
        }
        Ok(())
    }

    /// Create a new configuration file from the built-in template,
    /// optionally applying an initial edit before the single write.
    pub fn configure(&mut self, edits: Option<&str>) -> Result<(), ConfigError> {
        if self.path.exists() {
            return Err(ConfigError::InvalidOptions(format!(
                "already configured: {}",
                self.path.display()
            )));
        }

        let mut doc = ScaffoldDefaults::default().to_value();
        if let Some(expr) = edits {
            let expr = EditExpr::parse(expr)?;
            edit::apply(&mut doc, &expr);
        }
        self.raw = Some(doc);
        self.persist()?;

        log::info!("created configuration at {}", self.path.display());
        Ok(())
    }

    /// Set one of the whitelisted derived fields (`root_dir`, `in`, `out`).
    /// Any other field name is an unsupported mutation.
    pub fn set(&mut self, field: &str, value: &str) -> Result<(), ConfigError> {
        if self.parsed.is_none() {
            return Err(ConfigError::InvalidOptions(
                "parse must run before setting derived fields".to_string(),
            ));
        }
        match field {
            "root_dir" => self.root_dir = Some(value.to_string()),
            "in" => self.in_path = Some(value.to_string()),
            "out" => self.out_path = Some(value.to_string()),
            other => return Err(ConfigError::UnsupportedMutation(other.to_string())),
        }
        Ok(())
    }

    /// The document exactly as loaded (parent links intact).
    pub fn raw(&self) -> Option<&Value> {
        self.raw.as_ref()
    }

    /// The fully resolved document (no parent links remaining).
    pub fn parsed(&self) -> Option<&Value> {
        self.parsed.as_ref()
    }

    /// Resolved root directory (the default project's `directory`).
    pub fn root_dir(&self) -> Option<&str> {
        self.root_dir.as_deref()
    }

    /// Input path for downstream build steps.
    pub fn in_path(&self) -> Option<&str> {
        self.in_path.as_deref()
    }

    /// Output path for downstream build steps.
    pub fn out_path(&self) -> Option<&str> {
        self.out_path.as_deref()
    }

    /// Effective input mappings for the default project.
    pub fn input_mappings(&self) -> Option<&InputMappings> {
        self.input_mappings.as_ref()
    }

    fn persist(&self) -> Result<(), ConfigError> {
        let raw = self.raw.as_ref().ok_or_else(|| {
            ConfigError::InvalidOptions("no document to persist".to_string())
        })?;
        let json = serde_json::to_string_pretty(raw).map_err(|e| {
            ConfigError::InvalidConfig(format!("failed to serialize configuration: {}", e))
        })?;
        fs::write(&self.path, json)?;
        log::debug!("wrote configuration to {}", self.path.display());
        Ok(())
    }
}
