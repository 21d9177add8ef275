//! Core types for the layered resource tree.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Installation root under the project directory.
pub const DEFAULT_LAYER_ROOT: &str = ".lcagents";

/// Category of a resource in the layered tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceType {
    Agents,
    Tasks,
    Templates,
    Checklists,
    Data,
    Utils,
    Workflows,
    AgentTeams,
}

impl ResourceType {
    /// Every recognized resource type, in validation order.
    pub const ALL: [ResourceType; 8] = [
        ResourceType::Agents,
        ResourceType::Tasks,
        ResourceType::Templates,
        ResourceType::Checklists,
        ResourceType::Data,
        ResourceType::Utils,
        ResourceType::Workflows,
        ResourceType::AgentTeams,
    ];

    /// Directory name and config key for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Agents => "agents",
            ResourceType::Tasks => "tasks",
            ResourceType::Templates => "templates",
            ResourceType::Checklists => "checklists",
            ResourceType::Data => "data",
            ResourceType::Utils => "utils",
            ResourceType::Workflows => "workflows",
            ResourceType::AgentTeams => "agent-teams",
        }
    }

    /// Convention path used when the config has no entry: `<layer_root>/<type>`.
    pub fn default_path(&self, layer_root: &str) -> String {
        format!("{}/{}", layer_root, self.as_str())
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceType::ALL
            .iter()
            .copied()
            .find(|ty| ty.as_str() == s || (s == "agent_teams" && *ty == ResourceType::AgentTeams))
            .ok_or_else(|| {
                ApiError::ConfigError(format!(
                    "Unknown resource type: {} (expected one of: {})",
                    s,
                    ResourceType::ALL
                        .iter()
                        .map(|t| t.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}

/// Precedence tier of the resource tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Shipped system defaults.
    Core,
    /// Organization-wide overrides.
    Org,
    /// Project-local overrides.
    Custom,
    /// Generated and merged artifacts.
    Runtime,
}

impl Layer {
    /// Layers consulted for overrides, highest precedence first.
    pub const OVERRIDE_ORDER: [Layer; 3] = [Layer::Custom, Layer::Org, Layer::Core];

    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::Core => "core",
            Layer::Org => "org",
            Layer::Custom => "custom",
            Layer::Runtime => "runtime",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layer {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "core" => Ok(Layer::Core),
            "org" => Ok(Layer::Org),
            "custom" => Ok(Layer::Custom),
            "runtime" => Ok(Layer::Runtime),
            _ => Err(ApiError::ConfigError(format!(
                "Unknown layer: {} (expected core, org, custom, or runtime)",
                s
            ))),
        }
    }
}
