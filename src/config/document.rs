//! The persisted project configuration document.

use crate::error::ApiError;
use crate::types::{ResourceType, DEFAULT_LAYER_ROOT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_CONFIG_VERSION: &str = "1.0.0";

fn default_layer_root() -> String {
    DEFAULT_LAYER_ROOT.to_string()
}

/// Project configuration: where each resource type lives, team roles, integrations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LcAgentsConfig {
    /// Document format version
    pub version: String,

    /// Installation root, relative to the project root
    #[serde(default = "default_layer_root")]
    pub layer_root: String,

    /// Resource type -> directory relative to the project root
    pub paths: BTreeMap<String, String>,

    #[serde(default)]
    pub team_roles: BTreeMap<String, TeamRole>,

    #[serde(default)]
    pub github: GithubIntegration,

    /// Repository identifier (URL or owner/name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

/// Free-form team role metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamRole {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub responsibilities: Vec<String>,

    /// Any other keys present in the document
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// GitHub / Copilot integration switches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubIntegration {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub copilot_features: bool,
}

impl Default for LcAgentsConfig {
    fn default() -> Self {
        let layer_root = default_layer_root();
        let paths = ResourceType::ALL
            .iter()
            .map(|ty| (ty.as_str().to_string(), ty.default_path(&layer_root)))
            .collect();
        Self {
            version: DEFAULT_CONFIG_VERSION.to_string(),
            layer_root,
            paths,
            team_roles: BTreeMap::new(),
            github: GithubIntegration::default(),
            repository: None,
        }
    }
}

impl LcAgentsConfig {
    /// Directory for a type name, falling back to `<layer_root>/<type>`.
    ///
    /// Accepts any type string; only the eight known types are iterated elsewhere.
    pub fn path_for(&self, type_name: &str) -> String {
        match self.paths.get(type_name) {
            Some(path) => path.clone(),
            None => format!("{}/{}", self.layer_root, type_name),
        }
    }

    /// Merge a partial update: top-level scalars replace, `paths` and
    /// `team_roles` merge per key, `github` merges per flag.
    pub fn apply(&mut self, patch: ConfigPatch) {
        if let Some(version) = patch.version {
            self.version = version;
        }
        if let Some(layer_root) = patch.layer_root {
            self.layer_root = layer_root;
        }
        if let Some(paths) = patch.paths {
            self.paths.extend(paths);
        }
        if let Some(roles) = patch.team_roles {
            self.team_roles.extend(roles);
        }
        if let Some(github) = patch.github {
            if let Some(enabled) = github.enabled {
                self.github.enabled = enabled;
            }
            if let Some(copilot) = github.copilot_features {
                self.github.copilot_features = copilot;
            }
        }
        if let Some(repository) = patch.repository {
            self.repository = Some(repository);
        }
    }
}

/// Partial configuration update; absent fields leave the document untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPatch {
    pub version: Option<String>,
    pub layer_root: Option<String>,
    pub paths: Option<BTreeMap<String, String>>,
    pub team_roles: Option<BTreeMap<String, TeamRole>>,
    pub github: Option<GithubPatch>,
    pub repository: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubPatch {
    pub enabled: Option<bool>,
    pub copilot_features: Option<bool>,
}

/// Caller-supplied overrides for first-time initialization.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    pub layer_root: Option<String>,
    pub paths: BTreeMap<String, String>,
    pub github_enabled: Option<bool>,
    pub copilot_features: Option<bool>,
    pub repository: Option<String>,
}

impl From<InitOptions> for ConfigPatch {
    fn from(options: InitOptions) -> Self {
        let github = if options.github_enabled.is_some() || options.copilot_features.is_some() {
            Some(GithubPatch {
                enabled: options.github_enabled,
                copilot_features: options.copilot_features,
            })
        } else {
            None
        };
        ConfigPatch {
            version: None,
            layer_root: options.layer_root,
            paths: if options.paths.is_empty() {
                None
            } else {
                Some(options.paths)
            },
            team_roles: None,
            github,
            repository: options.repository,
        }
    }
}

/// Structural validation of a configuration document.
pub fn validate_config(config: &LcAgentsConfig) -> Result<(), ApiError> {
    if config.version.trim().is_empty() {
        return Err(ApiError::ConfigError("version cannot be empty".to_string()));
    }

    if config.layer_root.trim().is_empty() {
        return Err(ApiError::ConfigError("layerRoot cannot be empty".to_string()));
    }

    for (type_name, path) in &config.paths {
        if path.trim().is_empty() {
            return Err(ApiError::ConfigError(format!(
                "paths.{} must be a non-empty string",
                type_name
            )));
        }
    }

    if config.team_roles.keys().any(|name| name.trim().is_empty()) {
        return Err(ApiError::ConfigError(
            "teamRoles cannot contain an empty role name".to_string(),
        ));
    }

    Ok(())
}
