//! Override-aware resolution across the core/org/custom layers.
//!
//! Layer directories live at `<base>/<layer_root>/<layer>/<type>`. The first
//! override layer holding the file wins (custom, then org, then core); when no
//! layer has it, the configured flat directory is used.

use super::resolution::{MissCause, ResolutionResult};
use super::resolver::{list_dir, read_at, reject_invalid_name, FsResourceResolver};
use crate::types::{Layer, ResourceType};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Resolution plus the layer that supplied it (`None` for the flat path).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayeredResolution {
    pub layer: Option<Layer>,
    pub result: ResolutionResult,
}

/// Listed name and the layer whose copy takes precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayeredEntry {
    pub name: String,
    pub layer: Option<Layer>,
}

impl FsResourceResolver {
    pub fn layer_dir(&self, layer: Layer, type_name: &str) -> PathBuf {
        self.base_path()
            .join(&self.config().layer_root)
            .join(layer.as_str())
            .join(type_name)
    }

    /// Resolve inside exactly one layer.
    pub fn resolve_in_layer(&self, layer: Layer, ty: ResourceType, name: &str) -> ResolutionResult {
        if let Some(invalid) = reject_invalid_name(ty.as_str(), name) {
            return invalid;
        }
        read_at(&self.layer_dir(layer, ty.as_str()).join(name), ty.as_str(), name)
    }

    /// Resolve with override precedence, falling back to the flat path.
    pub fn resolve_layered(&self, ty: ResourceType, name: &str) -> LayeredResolution {
        self.resolve_layered_raw(ty.as_str(), name)
    }

    /// Names across override layers and the flat directory, highest layer winning.
    pub fn list_layered(&self, ty: ResourceType) -> Vec<LayeredEntry> {
        self.list_layered_raw(ty.as_str())
    }

    pub(crate) fn resolve_layered_raw(&self, type_name: &str, name: &str) -> LayeredResolution {
        if let Some(invalid) = reject_invalid_name(type_name, name) {
            return LayeredResolution {
                layer: None,
                result: invalid,
            };
        }

        for layer in Layer::OVERRIDE_ORDER {
            let candidate = self.layer_dir(layer, type_name).join(name);
            if !candidate.exists() {
                continue;
            }
            // An unreadable override stops the search rather than exposing a lower layer.
            tracing::debug!(resource_type = type_name, name, %layer, "resolved from layer");
            return LayeredResolution {
                layer: Some(layer),
                result: read_at(&candidate, type_name, name),
            };
        }

        let result = match self.resolve_flat(type_name, name) {
            ResolutionResult::NotFound {
                cause: MissCause::Missing,
                reason,
            } => ResolutionResult::NotFound {
                cause: MissCause::Missing,
                reason: format!(
                    "{}; override layers searched: {}",
                    reason,
                    Layer::OVERRIDE_ORDER
                        .iter()
                        .map(|l| l.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            },
            other => other,
        };

        LayeredResolution {
            layer: None,
            result,
        }
    }

    pub(crate) fn list_layered_raw(&self, type_name: &str) -> Vec<LayeredEntry> {
        let mut winners: BTreeMap<String, Option<Layer>> = BTreeMap::new();

        for name in self.list_flat(type_name) {
            winners.insert(name, None);
        }
        // Lowest precedence first so higher layers overwrite.
        for layer in Layer::OVERRIDE_ORDER.iter().rev() {
            for name in list_dir(&self.layer_dir(*layer, type_name), type_name) {
                winners.insert(name, Some(*layer));
            }
        }

        winners
            .into_iter()
            .map(|(name, layer)| LayeredEntry { name, layer })
            .collect()
    }
}
