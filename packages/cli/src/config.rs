use nlogo_format::convert::{RenameRule, RenameRules};
use nlogo_format::Collaborators;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_CONFIG_NAME: &str = "nlogo.config.json";

/// nlogo configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory searched for models when no path is given
    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    /// Extension of model files
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Primitive renames applied to code from older versions
    #[serde(default)]
    pub renames: Vec<RenameConfig>,
}

fn default_src_dir() -> String {
    ".".to_string()
}

fn default_extension() -> String {
    nlogo_format::MODEL_EXTENSION.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenameConfig {
    /// First version that uses `to`
    pub since: String,
    pub from: String,
    pub to: String,
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(
                path = %config_path.display(),
                renames = config.renames.len(),
                "Loaded config"
            );
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to source directory
    pub fn get_src_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.src_dir)
    }

    /// Codec collaborators with this config's source conversions
    pub fn collaborators(&self) -> Collaborators {
        let mut rules = RenameRules::new();
        for rename in &self.renames {
            rules.push(RenameRule {
                since: rename.since.clone(),
                from: rename.from.clone(),
                to: rename.to.clone(),
            });
        }

        Collaborators {
            source_converter: Arc::new(rules),
            ..Collaborators::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            extension: default_extension(),
            renames: vec![],
        }
    }
}
