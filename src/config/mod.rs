//! @acp:module "Configuration"
//! @acp:summary "Project configuration loading and defaults"
//! @acp:domain cli
//! @acp:layer config

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = ".docgroup.config.json";

fn default_config_schema() -> String {
    "https://acp-protocol.dev/schemas/v1/docgroup.config.schema.json".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

/// @acp:summary "Main docgroup configuration structure"
/// @acp:lock normal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// JSON Schema URL for validation
    #[serde(rename = "$schema", default = "default_config_schema")]
    pub schema: String,

    /// Configuration format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Model file patterns to include (glob syntax)
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    /// Model file patterns to exclude (glob syntax)
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Overload grouping rules
    #[serde(default)]
    pub grouping: GroupingConfig,

    /// Rendering settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: default_config_schema(),
            version: default_version(),
            include: default_include(),
            exclude: default_exclude(),
            grouping: GroupingConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// @acp:summary "Load config from a .docgroup.config.json file"
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// @acp:summary "Save config to a file"
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @acp:summary "Load from default location or create default config"
    pub fn load_or_default() -> Self {
        Self::load(CONFIG_FILE).unwrap_or_default()
    }
}

fn default_include() -> Vec<String> {
    vec![
        "**/*.doc.json".to_string(),
        "**/*.doc.yaml".to_string(),
        "**/*.doc.yml".to_string(),
    ]
}

fn default_exclude() -> Vec<String> {
    vec![
        "**/node_modules/**".to_string(),
        "**/target/**".to_string(),
        "**/.git/**".to_string(),
    ]
}

fn default_rule() -> String {
    "script".to_string()
}

/// @acp:summary "Overload grouping configuration"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingConfig {
    /// Rule for methods matching no family
    #[serde(default = "default_rule", rename = "defaultRule")]
    pub default_rule: String,

    /// Per-family overrides, first match wins
    #[serde(default)]
    pub families: Vec<FamilyRule>,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            default_rule: default_rule(),
            families: Vec::new(),
        }
    }
}

/// @acp:summary "Compatibility rule for one overload family"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyRule {
    /// Glob over qualified method names, e.g. `ai.Pathfinder.*`
    pub pattern: String,

    /// Rule name (script, default-parameters, type-overloads, always, never)
    pub rule: String,
}

fn default_format() -> String {
    "markdown".to_string()
}

/// @acp:summary "Output configuration"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format (markdown, json, text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output file; stdout when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Custom handlebars template for markdown output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,

    /// Render members that are not part of the visible API
    #[serde(default, rename = "includeHidden")]
    pub include_hidden: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            path: None,
            template: None,
            include_hidden: false,
        }
    }
}
