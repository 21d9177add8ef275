//! Agent definitions: parsing, validation, loading, and caching.
//!
//! Agents are YAML documents under the configured `agents` directory. The loader
//! resolves them through a [`crate::resource::ResourceResolver`], so layer
//! overrides apply to agents the same way they apply to any other resource.

pub mod cache;
pub mod commands;
pub mod definition;
pub mod loader;
pub mod validation;

pub use cache::AgentCache;
pub use commands::AgentCommandService;
pub use definition::{
    parse_agent_definition, AgentCommand, AgentDefinition, AgentDependencies, DefinitionError,
    Persona,
};
pub use loader::{AgentLoadFailure, AgentLoader, LoadAllResult, ParsedAgent};
pub use validation::{validate_agent_definition, ValidationResult};
