//! Roku Lane - build/deploy configuration for Roku-class devices
//!
//! This crate implements the layered configuration subsystem behind the
//! `roku-lane` tool: loading a JSON document of named devices and projects,
//! resolving parent/child inheritance between entries, validating the
//! resolved structure, and applying targeted `key:value` edits or
//! scaffolding a fresh configuration file.

pub mod config;

pub use config::{Config, ConfigError, EditExpr, InputMappings, ScaffoldDefaults};
