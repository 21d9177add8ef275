//! CLI runtime settings layered with the `config` crate.
//!
//! Precedence (lowest to highest): built-in defaults, global settings file,
//! workspace settings file, `LCAGENTS__*` environment variables.

use super::xdg;
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::types::DEFAULT_LAYER_ROOT;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE_NAME: &str = "settings.yaml";
pub const ENV_PREFIX: &str = "LCAGENTS";

/// Settings that shape the CLI process rather than the resource tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliSettings {
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Loads `CliSettings` from files and environment.
pub struct SettingsLoader;

impl SettingsLoader {
    /// Workspace-level settings file: `<root>/.lcagents/settings.yaml`.
    pub fn workspace_settings_path(workspace_root: &Path) -> PathBuf {
        workspace_root.join(DEFAULT_LAYER_ROOT).join(SETTINGS_FILE_NAME)
    }

    /// Load settings for a workspace from all standard sources.
    pub fn load(workspace_root: &Path) -> Result<CliSettings, ApiError> {
        let builder = Config::builder();
        let builder = match xdg::global_settings_path() {
            Ok(path) => add_optional_file(builder, &path),
            Err(e) => {
                tracing::debug!("Skipping global settings: {}", e);
                builder
            }
        };
        let builder = add_optional_file(builder, &Self::workspace_settings_path(workspace_root));
        let builder = add_environment(builder);

        let settings: CliSettings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }
}

fn add_optional_file(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        File::from(path.to_path_buf())
            .format(FileFormat::Yaml)
            .required(false),
    )
}

/// Uses LCAGENTS_ prefix and __ as separator for nested keys.
fn add_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    )
}
