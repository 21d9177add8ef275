//! ConfigManager: load, mutate, and persist the project configuration document.

use super::document::{validate_config, ConfigPatch, InitOptions, LcAgentsConfig, TeamRole};
use crate::error::ApiError;
use crate::types::DEFAULT_LAYER_ROOT;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Owns the on-disk configuration document.
///
/// Every mutation is a read-modify-write of the whole file; there is no
/// in-memory copy that could go stale between calls.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Manager for `<project_root>/.lcagents/config.yaml`.
    pub fn new(project_root: &Path) -> Self {
        Self {
            config_path: project_root.join(DEFAULT_LAYER_ROOT).join(CONFIG_FILE_NAME),
        }
    }

    /// Manager for an explicit document path.
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn exists(&self) -> bool {
        self.config_path.is_file()
    }

    /// Read and parse the document. Absence is an error, never silently defaulted.
    pub fn load_config(&self) -> Result<LcAgentsConfig, ApiError> {
        if !self.config_path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Configuration file not found: {}",
                self.config_path.display()
            )));
        }

        let content = std::fs::read_to_string(&self.config_path).map_err(|e| {
            ApiError::ConfigError(format!(
                "Failed to read configuration file {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        let config: LcAgentsConfig = serde_yaml::from_str(&content).map_err(|e| {
            ApiError::ConfigError(format!(
                "Failed to parse configuration file {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Validate and write the document, creating parent directories as needed.
    pub fn save_config(&self, config: &LcAgentsConfig) -> Result<(), ApiError> {
        validate_config(config)?;

        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ApiError::ConfigError(format!(
                    "Failed to create configuration directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let yaml = serde_yaml::to_string(config).map_err(|e| {
            ApiError::ConfigError(format!("Failed to serialize configuration: {}", e))
        })?;

        std::fs::write(&self.config_path, yaml).map_err(|e| {
            ApiError::ConfigError(format!(
                "Failed to write configuration to {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        tracing::debug!(path = %self.config_path.display(), "configuration saved");
        Ok(())
    }

    /// Merge a partial update into the stored document and persist it.
    pub fn update_config(&self, patch: ConfigPatch) -> Result<LcAgentsConfig, ApiError> {
        let mut config = self.load_config()?;
        config.apply(patch);
        self.save_config(&config)?;
        Ok(config)
    }

    /// Merge entries into `paths`; unspecified types keep their prior values.
    pub fn update_paths(
        &self,
        paths: BTreeMap<String, String>,
    ) -> Result<LcAgentsConfig, ApiError> {
        self.update_config(ConfigPatch {
            paths: Some(paths),
            ..ConfigPatch::default()
        })
    }

    pub fn get_team_roles(&self) -> Result<BTreeMap<String, TeamRole>, ApiError> {
        Ok(self.load_config()?.team_roles)
    }

    pub fn get_team_role(&self, name: &str) -> Result<Option<TeamRole>, ApiError> {
        Ok(self.load_config()?.team_roles.remove(name))
    }

    /// Insert or replace a team role.
    pub fn set_team_role(&self, name: &str, role: TeamRole) -> Result<(), ApiError> {
        let mut roles = BTreeMap::new();
        roles.insert(name.to_string(), role);
        self.update_config(ConfigPatch {
            team_roles: Some(roles),
            ..ConfigPatch::default()
        })?;
        Ok(())
    }

    /// Remove a team role. Removing an unknown role succeeds without writing.
    pub fn remove_team_role(&self, name: &str) -> Result<(), ApiError> {
        let mut config = self.load_config()?;
        if config.team_roles.remove(name).is_none() {
            tracing::debug!(role = name, "team role not present; nothing to remove");
            return Ok(());
        }
        self.save_config(&config)
    }

    /// Replace the whole document with the built-in default and persist it.
    pub fn reset_to_defaults(&self) -> Result<LcAgentsConfig, ApiError> {
        let config = LcAgentsConfig::default();
        self.save_config(&config)?;
        tracing::info!(path = %self.config_path.display(), "configuration reset to defaults");
        Ok(config)
    }

    /// Bootstrap a new document from defaults plus caller overrides.
    pub fn initialize_config(&self, options: InitOptions) -> Result<LcAgentsConfig, ApiError> {
        let mut config = LcAgentsConfig::default();
        let relocated_root = options.layer_root.clone();
        if let Some(ref root) = relocated_root {
            // Convention paths follow a relocated root unless explicitly overridden.
            for (type_name, path) in config.paths.iter_mut() {
                *path = format!("{}/{}", root, type_name);
            }
        }
        config.apply(options.into());
        self.save_config(&config)?;
        tracing::info!(path = %self.config_path.display(), "configuration initialized");
        Ok(config)
    }
}
