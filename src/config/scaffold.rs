//! Built-in scaffold template
//!
//! Hardcoded template for a freshly created configuration file: one default
//! device, one default project with a single production stage.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Built-in template values for a scaffolded configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaffoldDefaults {
    /// Name of the default device entry (default: "roku")
    pub device_name: String,

    /// Placeholder device address
    pub device_ip: String,

    /// Development user on the device (default: "rokudev")
    pub device_user: String,

    /// Development password on the device
    pub device_password: String,

    /// Name of the default project entry (default: "project")
    pub project_name: String,

    /// Placeholder project directory
    pub project_directory: String,

    /// Placeholder application name
    pub app_name: String,

    /// Name of the default stage (default: "production")
    pub stage_name: String,

    /// Branch deployed by the default stage
    pub stage_branch: String,
}

impl Default for ScaffoldDefaults {
    fn default() -> Self {
        Self {
            device_name: "roku".to_string(),
            device_ip: "192.168.0.100".to_string(),
            device_user: "rokudev".to_string(),
            device_password: "password".to_string(),
            project_name: "project".to_string(),
            project_directory: "/path/to/project".to_string(),
            app_name: "App Name".to_string(),
            stage_name: "production".to_string(),
            stage_branch: "production".to_string(),
        }
    }
}

impl ScaffoldDefaults {
    /// Render the template as a full configuration document
    pub fn to_value(&self) -> Value {
        let mut devices = Map::new();
        devices.insert("default".to_string(), Value::String(self.device_name.clone()));
        devices.insert(
            self.device_name.clone(),
            json!({
                "ip": self.device_ip,
                "user": self.device_user,
                "password": self.device_password,
            }),
        );

        let mut stages = Map::new();
        stages.insert(self.stage_name.clone(), json!({"branch": self.stage_branch}));

        let mut project = Map::new();
        project.insert(
            "directory".to_string(),
            Value::String(self.project_directory.clone()),
        );
        project.insert("app_name".to_string(), Value::String(self.app_name.clone()));
        project.insert("stage".to_string(), Value::String(self.stage_name.clone()));
        project.insert("stages".to_string(), Value::Object(stages));

        let mut projects = Map::new();
        projects.insert("default".to_string(), Value::String(self.project_name.clone()));
        projects.insert(self.project_name.clone(), Value::Object(project));

        let mut doc = Map::new();
        doc.insert("devices".to_string(), Value::Object(devices));
        doc.insert("projects".to_string(), Value::Object(projects));
        Value::Object(doc)
    }
}
