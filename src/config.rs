use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One external framework entry.
///
/// `name` is a kind reference (`Kind.version.group`). Any other keys are kept
/// as framework-specific settings and are never inspected by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExternalFramework {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub settings: BTreeMap<String, serde_json::Value>,
}

impl ExternalFramework {
    /// Create an entry with no extra settings
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: BTreeMap::new(),
        }
    }

    /// Attach a framework-specific setting
    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }
}

/// Top-level config file contents
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FrameworkConfig {
    #[serde(default, alias = "externalFrameworks")]
    pub external_frameworks: Vec<ExternalFramework>,
}

/// Default config file location, relative to the working directory
pub fn default_config_path() -> PathBuf {
    PathBuf::from("gvkreg.toml")
}

/// Parse config contents, choosing JSON for `.json` paths and TOML otherwise.
pub fn parse_config(path: &Path, contents: &str) -> Result<FrameworkConfig> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(contents).map_err(|e| Error::ConfigParse(format!("{}: {}", path.display(), e)))
    } else {
        toml::from_str(contents).map_err(|e| Error::ConfigParse(format!("{}: {}", path.display(), e)))
    }
}

/// Load the config file, or `Ok(None)` when it does not exist
pub fn load_config(path: Option<&Path>) -> Result<Option<FrameworkConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config = parse_config(&path, &contents)?;
    Ok(Some(config))
}
