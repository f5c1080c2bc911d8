//! Project configuration from stepwise.yml

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use sw_db::duckdb::MEMORY_DESCRIPTOR;
use sw_migrate::MigrateConfig;
use thiserror::Error;

/// Config file names searched in a project directory, in order
const CONFIG_FILE_NAMES: [&str; 2] = ["stepwise.yml", "stepwise.yaml"];

/// Configuration errors
#[derive(Error, Debug)]
pub(crate) enum ConfigError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    NotFound { path: String },

    /// C002: Failed to parse configuration file
    #[error("[C002] Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// C003: Invalid configuration value
    #[error("[C003] Invalid config: {message}")]
    Invalid { message: String },

    /// C004: Schema file could not be read
    #[error("[C004] Cannot read schema file {path}: {source}")]
    SchemaFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub(crate) type ConfigResult<T> = Result<T, ConfigError>;

/// Main project configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ProjectConfig {
    /// Project name
    pub name: String,

    /// Database file (relative to the project directory) or ":memory:"
    #[serde(default = "default_database")]
    pub database: String,

    /// Schema files, one statement each, in the order they were released.
    /// Only ever append to this list.
    #[serde(default)]
    pub schema: Vec<String>,

    /// Runner options
    #[serde(default)]
    pub migrate: MigrateConfig,
}

fn default_database() -> String {
    "stepwise.duckdb".to_string()
}

impl ProjectConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Invalid {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        let config: ProjectConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for stepwise.yml or stepwise.yaml
    pub fn load_from_dir(dir: &Path) -> ConfigResult<Self> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
            .map(|path| Self::load(&path))
            .unwrap_or_else(|| {
                Err(ConfigError::NotFound {
                    path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
                })
            })
    }

    /// Validate the configuration
    fn validate(&self) -> ConfigResult<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: "Project name cannot be empty".to_string(),
            });
        }

        if self.database.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: "database cannot be empty".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for entry in &self.schema {
            if entry.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    message: "schema entries cannot be empty".to_string(),
                });
            }
            if !seen.insert(entry.as_str()) {
                return Err(ConfigError::Invalid {
                    message: format!("schema file '{entry}' is listed more than once"),
                });
            }
        }
        Ok(())
    }

    /// Database descriptor with relative paths anchored at `root`.
    ///
    /// `override_descriptor` (the `--db` flag) wins over the config value.
    pub fn database_descriptor(&self, root: &Path, override_descriptor: Option<&str>) -> String {
        resolve_descriptor(override_descriptor.unwrap_or(&self.database), root)
    }

    /// Absolute paths of the schema files, in plan order
    pub fn schema_paths_absolute(&self, root: &Path) -> Vec<PathBuf> {
        self.schema.iter().map(|p| root.join(p)).collect()
    }

    /// Read every schema file verbatim, in plan order
    pub fn load_statements(&self, root: &Path) -> ConfigResult<Vec<String>> {
        self.schema_paths_absolute(root)
            .into_iter()
            .map(|path| {
                let sql = std::fs::read_to_string(&path).map_err(|source| {
                    ConfigError::SchemaFile {
                        path: path.display().to_string(),
                        source,
                    }
                })?;
                if sql.trim().is_empty() {
                    return Err(ConfigError::Invalid {
                        message: format!("schema file {} is empty", path.display()),
                    });
                }
                Ok(sql)
            })
            .collect()
    }
}

/// Anchor a relative database path at `root`; `:memory:` passes through.
pub(crate) fn resolve_descriptor(descriptor: &str, root: &Path) -> String {
    let descriptor = descriptor.trim();
    if descriptor == MEMORY_DESCRIPTOR || Path::new(descriptor).is_absolute() {
        descriptor.to_string()
    } else {
        root.join(descriptor).display().to_string()
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
