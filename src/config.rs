//! Configuration
//!
//! Two documents live here: the persisted project configuration that tells the
//! resolver where each resource type lives, and the layered CLI settings that
//! control logging.

pub mod document;
pub mod manager;
pub mod settings;
pub mod xdg;

pub use document::{
    validate_config, ConfigPatch, GithubIntegration, GithubPatch, InitOptions, LcAgentsConfig,
    TeamRole,
};
pub use manager::{ConfigManager, CONFIG_FILE_NAME};
pub use settings::{CliSettings, SettingsLoader};
