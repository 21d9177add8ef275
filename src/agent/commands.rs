//! Agent command service: single entry point per agent CLI command variant.
//!
//! Owns the agent workflows; the CLI parses, calls one method per variant, and formats output.

use super::loader::{
    has_agent_extension, logical_agent_name, AgentLoadFailure, AgentLoader, ParsedAgent,
};
use super::validation::ValidationResult;
use crate::error::ApiError;
use serde::Serialize;
use std::sync::Arc;

pub struct AgentCommandService;

/// Result of agent list command.
#[derive(Debug, Clone, Serialize)]
pub struct AgentListResult {
    pub agents: Vec<AgentListItem>,
    pub failures: Vec<AgentLoadFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentListItem {
    pub name: String,
    pub title: String,
    pub icon: String,
    pub role: String,
    pub commands: usize,
}

/// Result of agent show command.
#[derive(Debug, Clone)]
pub struct AgentShowResult {
    pub agent: Arc<ParsedAgent>,
    /// Unresolved dependencies
    pub warnings: Vec<String>,
}

/// Result of agent validate (single agent).
#[derive(Debug, Clone, Serialize)]
pub struct AgentValidateSingleResult {
    pub result: ValidationResult,
}

/// Result of agent validate --all.
#[derive(Debug, Clone, Serialize)]
pub struct AgentValidateAllResult {
    pub results: Vec<ValidationResult>,
}

impl AgentValidateAllResult {
    pub fn valid_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_valid()).count()
    }

    pub fn all_valid(&self) -> bool {
        self.results.iter().all(|r| r.is_valid())
    }
}

impl AgentCommandService {
    /// Load every agent; failures are reported next to the successes.
    pub fn list(loader: &AgentLoader) -> AgentListResult {
        let loaded = loader.load_all_agents();
        let agents = loaded
            .loaded
            .iter()
            .map(|agent| AgentListItem {
                name: agent.name.clone(),
                title: agent.definition.title.clone(),
                icon: agent.definition.icon.clone(),
                role: agent.definition.persona.role.clone(),
                commands: agent.definition.commands.len(),
            })
            .collect();
        AgentListResult {
            agents,
            failures: loaded.errors,
        }
    }

    /// Show one agent along with dependency warnings.
    pub fn show(loader: &AgentLoader, name: &str) -> Result<AgentShowResult, ApiError> {
        let agent = loader.load_agent(name)?;
        let warnings = loader.check_dependencies(&agent.definition);
        Ok(AgentShowResult { agent, warnings })
    }

    /// Validate a single agent.
    pub fn validate_single(
        loader: &AgentLoader,
        name: &str,
    ) -> Result<AgentValidateSingleResult, ApiError> {
        let result = loader.validate_agent(name)?;
        Ok(AgentValidateSingleResult { result })
    }

    /// Validate every agent file; load failures become failed results.
    pub fn validate_all(loader: &AgentLoader) -> AgentValidateAllResult {
        let mut names: Vec<String> = loader
            .resolver()
            .list_resources(crate::types::ResourceType::Agents)
            .into_iter()
            .filter(|file| has_agent_extension(file))
            .map(|file| logical_agent_name(&file).to_string())
            .collect();
        names.sort();
        names.dedup();

        let results = names
            .into_iter()
            .map(|name| {
                loader.validate_agent(&name).unwrap_or_else(|e| {
                    let mut r = ValidationResult::new(name.clone());
                    r.add_error(format!("Failed to validate: {}", e));
                    r
                })
            })
            .collect();
        AgentValidateAllResult { results }
    }
}
