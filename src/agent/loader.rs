//! Agent loader: resolve, parse, validate, and cache agent definitions.

use super::cache::AgentCache;
use super::definition::{parse_agent_definition, AgentDefinition, DefinitionError};
use super::validation::{validate_agent_definition, ValidationResult};
use crate::concurrency::AgentLockManager;
use crate::error::ApiError;
use crate::resource::{MissCause, ResolutionResult, ResourceResolver};
use crate::types::ResourceType;
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

const AGENT_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// An agent definition together with its source.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedAgent {
    /// Logical name (file stem)
    pub name: String,
    pub definition: AgentDefinition,
    #[serde(skip_serializing)]
    pub raw_content: String,
    pub path: PathBuf,
    pub is_valid: bool,
    pub validation_errors: Vec<String>,
}

/// One agent that failed during a batch load.
#[derive(Debug, Clone, Serialize)]
pub struct AgentLoadFailure {
    pub name: String,
    pub kind: &'static str,
    pub error: String,
}

/// Outcome of loading every agent in the agents directory.
#[derive(Debug, Clone, Default)]
pub struct LoadAllResult {
    /// Successes in listing order
    pub loaded: Vec<Arc<ParsedAgent>>,
    pub errors: Vec<AgentLoadFailure>,
}

/// Loads agents through a resolver and owns the agent cache.
///
/// Loads and reloads of one name are serialized by a per-name lock; the cache
/// entry written last wins.
pub struct AgentLoader {
    resolver: Arc<dyn ResourceResolver>,
    cache: AgentCache,
    locks: AgentLockManager,
}

impl AgentLoader {
    pub fn new(resolver: Arc<dyn ResourceResolver>) -> Self {
        Self {
            resolver,
            cache: AgentCache::new(),
            locks: AgentLockManager::new(),
        }
    }

    pub fn resolver(&self) -> &Arc<dyn ResourceResolver> {
        &self.resolver
    }

    /// Load an agent, serving repeat requests from the cache.
    pub fn load_agent(&self, name: &str) -> Result<Arc<ParsedAgent>, ApiError> {
        let name = logical_agent_name(name);
        let lock = self.locks.get_lock(name);
        let _guard = lock.lock();
        self.load_locked(name)
    }

    /// Evict and load again from disk.
    pub fn reload_agent(&self, name: &str) -> Result<Arc<ParsedAgent>, ApiError> {
        let name = logical_agent_name(name);
        let lock = self.locks.get_lock(name);
        let _guard = lock.lock();
        if self.cache.evict(name).is_some() {
            tracing::debug!(agent = name, "evicted agent for reload");
        }
        self.load_locked(name)
    }

    /// Evict every cached agent.
    pub fn clear_cache(&self) {
        let evicted = self.cache.clear();
        self.locks.prune();
        tracing::debug!(evicted, "agent cache cleared");
    }

    pub fn cached_names(&self) -> Vec<String> {
        self.cache.names()
    }

    pub fn is_cached(&self, name: &str) -> bool {
        self.cache.contains(logical_agent_name(name))
    }

    /// Load every `.yaml`/`.yml` entry of the agents directory.
    ///
    /// A failing agent is recorded and never stops the pass.
    pub fn load_all_agents(&self) -> LoadAllResult {
        let mut result = LoadAllResult::default();
        let mut seen = HashSet::new();

        for file_name in self.resolver.list_resources(ResourceType::Agents) {
            if !has_agent_extension(&file_name) {
                continue;
            }
            let name = logical_agent_name(&file_name).to_string();
            if !seen.insert(name.clone()) {
                continue;
            }
            match self.load_agent(&name) {
                Ok(agent) => result.loaded.push(agent),
                Err(e) => {
                    tracing::warn!(agent = %name, "Failed to load agent: {}", e);
                    result.errors.push(AgentLoadFailure {
                        name,
                        kind: e.kind(),
                        error: e.to_string(),
                    });
                }
            }
        }

        result
    }

    /// Resolve and parse without touching the cache; invalid agents are returned
    /// with their validation errors rather than as an error.
    pub fn parse_agent(&self, name: &str) -> Result<ParsedAgent, ApiError> {
        self.parse_with_validation(logical_agent_name(name))
            .map(|(parsed, _)| parsed)
    }

    fn parse_with_validation(&self, name: &str) -> Result<(ParsedAgent, ValidationResult), ApiError> {
        let (path, content) = self.resolve_source(name)?;

        let definition = parse_agent_definition(&content, name).map_err(|e| match e {
            DefinitionError::Syntax(e) => ApiError::ParseError {
                path: path.clone(),
                message: e.to_string(),
            },
            DefinitionError::Shape(e) => ApiError::ValidationError(format!(
                "Agent '{}' ({}): {}",
                name,
                path.display(),
                e
            )),
        })?;
        let validation = validate_agent_definition(name, &definition);

        let parsed = ParsedAgent {
            name: name.to_string(),
            definition,
            raw_content: content,
            path,
            is_valid: validation.is_valid(),
            validation_errors: validation.errors.clone(),
        };
        Ok((parsed, validation))
    }

    /// Full validation report for one agent, including unresolved dependencies
    /// as warnings.
    pub fn validate_agent(&self, name: &str) -> Result<ValidationResult, ApiError> {
        let name = logical_agent_name(name);
        let (parsed, mut result) = self.parse_with_validation(name)?;
        for warning in self.check_dependencies(&parsed.definition) {
            result.add_warning(warning);
        }
        Ok(result)
    }

    /// Resolve each declared dependency; unresolved ones become warnings.
    pub fn check_dependencies(&self, definition: &AgentDefinition) -> Vec<String> {
        definition
            .dependencies
            .references()
            .into_iter()
            .filter_map(|(ty, dependency)| {
                let file_name = if ty == ResourceType::Agents && !has_agent_extension(dependency) {
                    format!("{}.yaml", dependency)
                } else {
                    dependency.to_string()
                };
                match self.resolver.resolve(ty, &file_name) {
                    ResolutionResult::Found { .. } => None,
                    ResolutionResult::NotFound { reason, .. } => Some(format!(
                        "Unresolved {} dependency '{}': {}",
                        ty, dependency, reason
                    )),
                }
            })
            .collect()
    }

    fn load_locked(&self, name: &str) -> Result<Arc<ParsedAgent>, ApiError> {
        if let Some(cached) = self.cache.get(name) {
            tracing::trace!(agent = name, "agent cache hit");
            return Ok(cached);
        }

        let (parsed, validation) = self.parse_with_validation(name)?;
        if !validation.is_valid() {
            return Err(ApiError::ValidationError(format!(
                "Agent '{}': {}",
                name,
                validation.error_message()
            )));
        }

        let agent = Arc::new(parsed);
        self.cache.put(name, agent.clone());
        tracing::debug!(agent = name, path = %agent.path.display(), "agent loaded");
        Ok(agent)
    }

    /// `<name>.yaml`, then `<name>.yml`.
    fn resolve_source(&self, name: &str) -> Result<(PathBuf, String), ApiError> {
        let primary = self
            .resolver
            .resolve(ResourceType::Agents, &format!("{}.{}", name, AGENT_EXTENSIONS[0]));

        let result = match primary.cause() {
            Some(MissCause::Missing) => {
                let alternate = self
                    .resolver
                    .resolve(ResourceType::Agents, &format!("{}.{}", name, AGENT_EXTENSIONS[1]));
                if alternate.is_found() {
                    alternate
                } else {
                    primary
                }
            }
            _ => primary,
        };

        match result {
            ResolutionResult::Found { path, content } => Ok((path, content)),
            ResolutionResult::NotFound {
                cause: MissCause::Missing | MissCause::InvalidName,
                reason,
            } => Err(ApiError::AgentNotFound {
                name: name.to_string(),
                reason,
            }),
            other => other.into_result(),
        }
    }
}

pub(crate) fn has_agent_extension(file_name: &str) -> bool {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| AGENT_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Strip a trailing agent extension: `dev.yaml` and `dev` name the same agent.
pub(crate) fn logical_agent_name(name: &str) -> &str {
    for ext in AGENT_EXTENSIONS {
        let suffix = format!(".{}", ext);
        match name.strip_suffix(suffix.as_str()) {
            Some(stem) if !stem.is_empty() => return stem,
            _ => {}
        }
    }
    name
}
