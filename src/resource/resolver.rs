//! Resource resolver port and its filesystem adapter.

use super::permissions::{self, PermissionReport};
use super::resolution::{MissCause, ResolutionResult};
use crate::config::LcAgentsConfig;
use crate::types::ResourceType;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

/// Maps a logical `(type, name)` pair to one physical artifact.
///
/// Implementations must not cache: every call reflects the filesystem at call time.
pub trait ResourceResolver: Send + Sync {
    /// Resolve a resource under any type name, known or not.
    fn resolve_raw(&self, type_name: &str, name: &str) -> ResolutionResult;

    /// List entry names for any type name. Never fails; problems yield an empty list.
    fn list_raw(&self, type_name: &str) -> Vec<String>;

    fn resolve(&self, ty: ResourceType, name: &str) -> ResolutionResult {
        self.resolve_raw(ty.as_str(), name)
    }

    fn list_resources(&self, ty: ResourceType) -> Vec<String> {
        self.list_raw(ty.as_str())
    }

    fn resolve_task(&self, name: &str) -> ResolutionResult {
        self.resolve(ResourceType::Tasks, name)
    }

    fn resolve_template(&self, name: &str) -> ResolutionResult {
        self.resolve(ResourceType::Templates, name)
    }

    fn resolve_checklist(&self, name: &str) -> ResolutionResult {
        self.resolve(ResourceType::Checklists, name)
    }

    fn resolve_data(&self, name: &str) -> ResolutionResult {
        self.resolve(ResourceType::Data, name)
    }

    fn resolve_util(&self, name: &str) -> ResolutionResult {
        self.resolve(ResourceType::Utils, name)
    }

    fn resolve_workflow(&self, name: &str) -> ResolutionResult {
        self.resolve(ResourceType::Workflows, name)
    }

    fn resolve_agent_team(&self, name: &str) -> ResolutionResult {
        self.resolve(ResourceType::AgentTeams, name)
    }
}

/// Structural health of the configured resource directories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceHealthReport {
    pub valid: bool,
    /// Types whose directory does not exist
    pub missing: Vec<String>,
    /// Types whose directory exists but cannot be read, with the cause
    pub errors: Vec<String>,
}

/// Filesystem resolver over a project root and its configuration.
#[derive(Debug, Clone)]
pub struct FsResourceResolver {
    base_path: PathBuf,
    config: LcAgentsConfig,
    layer_overrides: bool,
}

impl FsResourceResolver {
    /// Resolver rooted at `base_path` using the path table of `config`.
    pub fn new(base_path: impl Into<PathBuf>, config: LcAgentsConfig) -> Self {
        Self {
            base_path: base_path.into(),
            config,
            layer_overrides: false,
        }
    }

    /// Route the generic `resolve`/`list` entry points through layer overrides.
    pub fn with_layer_overrides(mut self, enabled: bool) -> Self {
        self.layer_overrides = enabled;
        self
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn config(&self) -> &LcAgentsConfig {
        &self.config
    }

    pub fn layer_overrides(&self) -> bool {
        self.layer_overrides
    }

    /// Configured directory for a type name.
    pub fn resource_dir(&self, type_name: &str) -> PathBuf {
        self.base_path.join(self.config.path_for(type_name))
    }

    /// Resolve against the single configured directory, ignoring layers.
    pub fn resolve_flat(&self, type_name: &str, name: &str) -> ResolutionResult {
        if let Some(invalid) = reject_invalid_name(type_name, name) {
            return invalid;
        }
        read_at(&self.resource_dir(type_name).join(name), type_name, name)
    }

    /// List the single configured directory, ignoring layers.
    pub fn list_flat(&self, type_name: &str) -> Vec<String> {
        list_dir(&self.resource_dir(type_name), type_name)
    }

    /// Check that every known type's directory exists and is readable.
    pub fn validate_all_resources(&self) -> ResourceHealthReport {
        let mut missing = Vec::new();
        let mut errors = Vec::new();

        for ty in ResourceType::ALL {
            let dir = self.resource_dir(ty.as_str());
            if !dir.exists() {
                missing.push(ty.as_str().to_string());
                continue;
            }
            if let Err(e) = std::fs::read_dir(&dir) {
                errors.push(format!("{}: {}", ty, e));
                continue;
            }
            if !permissions::can_read(&dir) {
                errors.push(format!("{}: directory {} is not readable", ty, dir.display()));
            }
        }

        ResourceHealthReport {
            valid: missing.is_empty() && errors.is_empty(),
            missing,
            errors,
        }
    }

    /// Probe read/write access; relative paths are taken from the project root.
    pub fn check_permissions(&self, path: &Path) -> PermissionReport {
        if path.is_absolute() {
            permissions::check_permissions(path)
        } else {
            permissions::check_permissions(&self.base_path.join(path))
        }
    }
}

impl ResourceResolver for FsResourceResolver {
    fn resolve_raw(&self, type_name: &str, name: &str) -> ResolutionResult {
        if self.layer_overrides {
            self.resolve_layered_raw(type_name, name).result
        } else {
            self.resolve_flat(type_name, name)
        }
    }

    fn list_raw(&self, type_name: &str) -> Vec<String> {
        if self.layer_overrides {
            self.list_layered_raw(type_name)
                .into_iter()
                .map(|entry| entry.name)
                .collect()
        } else {
            self.list_flat(type_name)
        }
    }
}

/// Names must stay inside the type directory: relative, no `..`, no root.
pub(crate) fn reject_invalid_name(type_name: &str, name: &str) -> Option<ResolutionResult> {
    let valid = !name.is_empty()
        && Path::new(name)
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
    if valid {
        return None;
    }
    Some(ResolutionResult::not_found(
        MissCause::InvalidName,
        format!(
            "Invalid resource name for {}: '{}' (must be a relative path inside the {} directory)",
            type_name, name, type_name
        ),
    ))
}

/// Existence, then readability, then content.
pub(crate) fn read_at(path: &Path, type_name: &str, name: &str) -> ResolutionResult {
    if !path.exists() {
        tracing::debug!(resource_type = type_name, name, path = %path.display(), "resource miss");
        return ResolutionResult::not_found(
            MissCause::Missing,
            format!(
                "Resource not found: {}/{} (looked for {})",
                type_name,
                name,
                path.display()
            ),
        );
    }

    if !path.is_file() {
        return ResolutionResult::not_found(
            MissCause::Missing,
            format!(
                "Resource {}/{} is not a file: {}",
                type_name,
                name,
                path.display()
            ),
        );
    }

    if !permissions::can_read(path) {
        return ResolutionResult::not_found(
            MissCause::Unreadable,
            format!(
                "Resource {}/{} exists but is not readable: {}",
                type_name,
                name,
                path.display()
            ),
        );
    }

    match std::fs::read_to_string(path) {
        Ok(content) => ResolutionResult::Found {
            path: path.to_path_buf(),
            content,
        },
        Err(e) => ResolutionResult::not_found(
            MissCause::ReadFailed,
            format!(
                "Failed to read resource {}/{} at {}: {}",
                type_name,
                name,
                path.display(),
                e
            ),
        ),
    }
}

/// Sorted non-hidden entry names; absent or unreadable directories give an empty list.
pub(crate) fn list_dir(dir: &Path, type_name: &str) -> Vec<String> {
    if !dir.exists() {
        tracing::debug!(resource_type = type_name, dir = %dir.display(), "resource directory absent");
        return Vec::new();
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(
                "Failed to list {} resources in {}: {}",
                type_name,
                dir.display(),
                e
            );
            return Vec::new();
        }
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(
                    "Failed to read directory entry in {}: {}",
                    dir.display(),
                    e
                );
                continue;
            }
        };
        match entry.file_name().into_string() {
            Ok(name) if name.starts_with('.') => {}
            Ok(name) => names.push(name),
            Err(raw) => tracing::warn!("Skipping non UTF-8 entry {:?} in {}", raw, dir.display()),
        }
    }
    names.sort();
    names
}
