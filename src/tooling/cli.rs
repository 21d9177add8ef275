//! CLI Tooling
//!
//! Command-line interface over resource resolution, agent loading, and project
//! configuration. Every command is workspace-scoped and reads the filesystem fresh.

use crate::agent::{AgentCommandService, AgentLoader};
use crate::config::{ConfigManager, InitOptions, LcAgentsConfig, TeamRole};
use crate::error::ApiError;
use crate::resource::{FsResourceResolver, LayeredEntry, ResourceResolver};
use crate::tooling::format;
use crate::types::ResourceType;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// LCAgents CLI - layered resources and agent definitions
#[derive(Parser)]
#[command(name = "lcagents")]
#[command(about = "Resolve layered resources and load agent definitions for an LCAgents project")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace (project) root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration document path (default: <workspace>/.lcagents/config.yaml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Apply custom/org/core layer overrides when resolving and listing
    #[arg(long)]
    pub layered: bool,

    /// Enable debug logging to stderr
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve, list, and inspect resources
    Resource {
        #[command(subcommand)]
        command: ResourceCommands,
    },
    /// Load and validate agent definitions
    Agent {
        #[command(subcommand)]
        command: AgentCommands,
    },
    /// Manage the project configuration document
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ResourceCommands {
    /// Resolve one resource to a file
    Resolve {
        /// Resource type (agents, tasks, templates, checklists, data, utils, workflows, agent-teams)
        resource_type: String,
        /// Resource file name, e.g. review.md
        name: String,
        /// Print the file content
        #[arg(long)]
        show_content: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List resources of one type
    List {
        resource_type: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Check every resource directory exists and is readable
    Validate {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Probe read/write access to a path
    Permissions {
        /// Absolute, or relative to the workspace root
        path: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum AgentCommands {
    /// Load every agent and report failures
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show one agent
    Show {
        /// Agent name (file stem)
        name: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Validate one agent or all of them
    Validate {
        /// Agent name (file stem)
        name: Option<String>,
        /// Validate every agent
        #[arg(long, conflicts_with = "name")]
        all: bool,
        /// List every check
        #[arg(long)]
        verbose: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the configuration document
    Show {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Write a new configuration document
    Init {
        /// Repository identifier (URL or owner/name)
        #[arg(long)]
        repository: Option<String>,
        /// Enable GitHub integration
        #[arg(long)]
        github: bool,
        /// Enable Copilot features
        #[arg(long)]
        copilot: bool,
        /// Installation root relative to the workspace
        #[arg(long)]
        layer_root: Option<String>,
        /// Resource path override, repeatable
        #[arg(long = "path", value_name = "TYPE=DIR")]
        paths: Vec<String>,
        /// Overwrite an existing document
        #[arg(long)]
        force: bool,
    },
    /// Set the directory for one resource type
    SetPath {
        resource_type: String,
        /// Directory relative to the workspace root
        dir: String,
    },
    /// Replace the document with the defaults
    Reset {
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
    /// Manage team roles
    Role {
        #[command(subcommand)]
        command: RoleCommands,
    },
}

#[derive(Subcommand)]
pub enum RoleCommands {
    /// List team roles
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show one team role
    Show {
        name: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Create or update a team role
    Set {
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Responsibility, repeatable; replaces the existing list when given
        #[arg(long = "responsibility")]
        responsibilities: Vec<String>,
    },
    /// Remove a team role
    Remove { name: String },
}

/// Rendered command output and whether it counts as success for the exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub success: bool,
}

impl CommandOutput {
    fn ok(text: String) -> Self {
        Self { text, success: true }
    }

    fn with_status(text: String, success: bool) -> Self {
        Self { text, success }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_format(format: &str) -> Result<OutputFormat, ApiError> {
    match format {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => Err(ApiError::ConfigError(format!(
            "Invalid output format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::IoError(format!("Failed to serialize output: {}", e)))
}

/// CLI context for one workspace
pub struct CliContext {
    workspace_root: PathBuf,
    config_manager: ConfigManager,
    layered: bool,
}

impl CliContext {
    /// Create a context rooted at `workspace_root`; `config_path` overrides the
    /// default document location.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let workspace_root = dunce::canonicalize(&workspace_root).map_err(|e| {
            ApiError::ConfigError(format!(
                "Invalid workspace {}: {}",
                workspace_root.display(),
                e
            ))
        })?;
        let config_manager = match config_path {
            Some(path) if path.is_absolute() => ConfigManager::with_path(path),
            Some(path) => ConfigManager::with_path(workspace_root.join(path)),
            None => ConfigManager::new(&workspace_root),
        };
        Ok(Self {
            workspace_root,
            config_manager,
            layered: false,
        })
    }

    pub fn with_layer_overrides(mut self, layered: bool) -> Self {
        self.layered = layered;
        self
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn config_manager(&self) -> &ConfigManager {
        &self.config_manager
    }

    pub fn execute(&self, command: &Commands) -> Result<CommandOutput, ApiError> {
        match command {
            Commands::Resource { command } => self.handle_resource(command),
            Commands::Agent { command } => self.handle_agent(command),
            Commands::Config { command } => self.handle_config(command),
        }
    }

    /// Load the configuration, or the defaults when no document exists yet.
    fn effective_config(&self) -> Result<LcAgentsConfig, ApiError> {
        if !self.config_manager.exists() {
            tracing::warn!(
                path = %self.config_manager.config_path().display(),
                "Configuration file not found; using default resource paths"
            );
            return Ok(LcAgentsConfig::default());
        }
        self.config_manager.load_config()
    }

    fn resolver(&self) -> Result<FsResourceResolver, ApiError> {
        Ok(
            FsResourceResolver::new(self.workspace_root.clone(), self.effective_config()?)
                .with_layer_overrides(self.layered),
        )
    }

    fn agent_loader(&self) -> Result<AgentLoader, ApiError> {
        Ok(AgentLoader::new(Arc::new(self.resolver()?)))
    }

    fn handle_resource(&self, command: &ResourceCommands) -> Result<CommandOutput, ApiError> {
        match command {
            ResourceCommands::Resolve {
                resource_type,
                name,
                show_content,
                format,
            } => self.handle_resource_resolve(resource_type, name, *show_content, format),
            ResourceCommands::List {
                resource_type,
                format,
            } => self.handle_resource_list(resource_type, format),
            ResourceCommands::Validate { format } => {
                let format = parse_format(format)?;
                let report = self.resolver()?.validate_all_resources();
                let text = match format {
                    OutputFormat::Json => to_json(&report)?,
                    OutputFormat::Text => format::format_health_text(&report),
                };
                Ok(CommandOutput::with_status(text, report.valid))
            }
            ResourceCommands::Permissions { path, format } => {
                let format = parse_format(format)?;
                let report = self.resolver()?.check_permissions(path);
                let text = match format {
                    OutputFormat::Json => to_json(&json!({
                        "path": path.display().to_string(),
                        "read": report.read,
                        "write": report.write,
                    }))?,
                    OutputFormat::Text => {
                        format::format_permissions_text(&path.display().to_string(), &report)
                    }
                };
                Ok(CommandOutput::ok(text))
            }
        }
    }

    fn handle_resource_resolve(
        &self,
        resource_type: &str,
        name: &str,
        show_content: bool,
        format: &str,
    ) -> Result<CommandOutput, ApiError> {
        let format = parse_format(format)?;
        let ty: ResourceType = resource_type.parse()?;
        let resolver = self.resolver()?;

        let (layer, result) = if self.layered {
            let layered = resolver.resolve_layered(ty, name);
            (layered.layer, layered.result)
        } else {
            (None, resolver.resolve(ty, name))
        };
        let found = result.is_found();

        let text = match format {
            OutputFormat::Json => {
                let mut value = json!({
                    "type": ty,
                    "name": name,
                    "layer": layer,
                    "result": result,
                });
                if !show_content {
                    if let Some(result) = value.get_mut("result").and_then(|r| r.as_object_mut()) {
                        result.remove("content");
                    }
                }
                to_json(&value)?
            }
            OutputFormat::Text => {
                format::format_resolution_text(ty, name, layer, &result, show_content)
            }
        };
        Ok(CommandOutput::with_status(text, found))
    }

    fn handle_resource_list(
        &self,
        resource_type: &str,
        format: &str,
    ) -> Result<CommandOutput, ApiError> {
        let format = parse_format(format)?;
        let ty: ResourceType = resource_type.parse()?;
        let resolver = self.resolver()?;

        let entries: Vec<LayeredEntry> = if self.layered {
            resolver.list_layered(ty)
        } else {
            resolver
                .list_resources(ty)
                .into_iter()
                .map(|name| LayeredEntry { name, layer: None })
                .collect()
        };

        let text = match format {
            OutputFormat::Json => to_json(&json!({ "type": ty, "entries": entries }))?,
            OutputFormat::Text => format::format_resource_list_text(ty, &entries),
        };
        Ok(CommandOutput::ok(text))
    }

    fn handle_agent(&self, command: &AgentCommands) -> Result<CommandOutput, ApiError> {
        let loader = self.agent_loader()?;
        match command {
            AgentCommands::List { format } => {
                let format = parse_format(format)?;
                let result = AgentCommandService::list(&loader);
                let success = result.failures.is_empty();
                let text = match format {
                    OutputFormat::Json => to_json(&result)?,
                    OutputFormat::Text => format::format_agent_list_text(&result),
                };
                Ok(CommandOutput::with_status(text, success))
            }
            AgentCommands::Show { name, format } => {
                let format = parse_format(format)?;
                let result = AgentCommandService::show(&loader, name)?;
                let text = match format {
                    OutputFormat::Json => to_json(&json!({
                        "agent": &*result.agent,
                        "warnings": result.warnings,
                    }))?,
                    OutputFormat::Text => format::format_agent_show_text(&result),
                };
                Ok(CommandOutput::ok(text))
            }
            AgentCommands::Validate {
                name,
                all,
                verbose,
                format,
            } => {
                let format = parse_format(format)?;
                if *all {
                    let result = AgentCommandService::validate_all(&loader);
                    let text = match format {
                        OutputFormat::Json => to_json(&result.results)?,
                        OutputFormat::Text => {
                            if result.results.is_empty() {
                                "No agents found.\n".to_string()
                            } else {
                                let mut text: String = result
                                    .results
                                    .iter()
                                    .map(|r| format::format_validation_text(r, *verbose))
                                    .collect();
                                text.push_str(&format!(
                                    "\n{}/{} agent(s) valid\n",
                                    result.valid_count(),
                                    result.results.len()
                                ));
                                text
                            }
                        }
                    };
                    return Ok(CommandOutput::with_status(text, result.all_valid()));
                }

                let name = name.as_deref().ok_or_else(|| {
                    ApiError::ConfigError("Specify an agent name or --all".to_string())
                })?;
                let result = AgentCommandService::validate_single(&loader, name)?.result;
                let text = match format {
                    OutputFormat::Json => to_json(&result)?,
                    OutputFormat::Text => format::format_validation_text(&result, *verbose),
                };
                Ok(CommandOutput::with_status(text, result.is_valid()))
            }
        }
    }

    fn handle_config(&self, command: &ConfigCommands) -> Result<CommandOutput, ApiError> {
        let manager = &self.config_manager;
        match command {
            ConfigCommands::Show { format } => {
                let format = parse_format(format)?;
                let config = manager.load_config()?;
                let text = match format {
                    OutputFormat::Json => to_json(&config)?,
                    OutputFormat::Text => format::format_config_text(&config),
                };
                Ok(CommandOutput::ok(text))
            }
            ConfigCommands::Init {
                repository,
                github,
                copilot,
                layer_root,
                paths,
                force,
            } => {
                if manager.exists() && !force {
                    return Err(ApiError::ConfigError(format!(
                        "Configuration already exists at {} (use --force to overwrite)",
                        manager.config_path().display()
                    )));
                }
                let options = InitOptions {
                    layer_root: layer_root.clone(),
                    paths: parse_path_overrides(paths)?,
                    github_enabled: github.then_some(true),
                    copilot_features: copilot.then_some(true),
                    repository: repository.clone(),
                };
                manager.initialize_config(options)?;
                Ok(CommandOutput::ok(format!(
                    "Configuration written to {}",
                    manager.config_path().display()
                )))
            }
            ConfigCommands::SetPath { resource_type, dir } => {
                let ty: ResourceType = resource_type.parse()?;
                let mut paths = BTreeMap::new();
                paths.insert(ty.as_str().to_string(), dir.clone());
                manager.update_paths(paths)?;
                Ok(CommandOutput::ok(format!("Set {} path to {}", ty, dir)))
            }
            ConfigCommands::Reset { force } => {
                if !force {
                    use dialoguer::Confirm;
                    let confirmed = Confirm::new()
                        .with_prompt(format!(
                            "Reset {} to defaults?",
                            manager.config_path().display()
                        ))
                        .default(false)
                        .interact()
                        .map_err(|e| {
                            ApiError::ConfigError(format!("Failed to get user input: {}", e))
                        })?;
                    if !confirmed {
                        return Ok(CommandOutput::ok("Reset cancelled".to_string()));
                    }
                }
                manager.reset_to_defaults()?;
                Ok(CommandOutput::ok(format!(
                    "Configuration reset to defaults: {}",
                    manager.config_path().display()
                )))
            }
            ConfigCommands::Role { command } => self.handle_role(command),
        }
    }

    fn handle_role(&self, command: &RoleCommands) -> Result<CommandOutput, ApiError> {
        let manager = &self.config_manager;
        match command {
            RoleCommands::List { format } => {
                let format = parse_format(format)?;
                let roles = manager.get_team_roles()?;
                let text = match format {
                    OutputFormat::Json => to_json(&roles)?,
                    OutputFormat::Text => format::format_roles_text(&roles),
                };
                Ok(CommandOutput::ok(text))
            }
            RoleCommands::Show { name, format } => {
                let format = parse_format(format)?;
                let role = manager
                    .get_team_role(name)?
                    .ok_or_else(|| ApiError::NotFound(format!("Team role not found: {}", name)))?;
                let text = match format {
                    OutputFormat::Json => to_json(&role)?,
                    OutputFormat::Text => format::format_role_text(name, &role),
                };
                Ok(CommandOutput::ok(text))
            }
            RoleCommands::Set {
                name,
                description,
                responsibilities,
            } => {
                let mut role = manager.get_team_role(name)?.unwrap_or_else(|| TeamRole {
                    name: name.clone(),
                    ..TeamRole::default()
                });
                if let Some(description) = description {
                    role.description = description.clone();
                }
                if !responsibilities.is_empty() {
                    role.responsibilities = responsibilities.clone();
                }
                manager.set_team_role(name, role)?;
                Ok(CommandOutput::ok(format!("Team role '{}' saved", name)))
            }
            RoleCommands::Remove { name } => {
                manager.remove_team_role(name)?;
                Ok(CommandOutput::ok(format!("Team role '{}' removed", name)))
            }
        }
    }
}

/// Parse repeated `TYPE=DIR` arguments.
fn parse_path_overrides(args: &[String]) -> Result<BTreeMap<String, String>, ApiError> {
    let mut paths = BTreeMap::new();
    for arg in args {
        let (type_name, dir) = arg.split_once('=').ok_or_else(|| {
            ApiError::ConfigError(format!("Invalid path override '{}' (expected TYPE=DIR)", arg))
        })?;
        let ty: ResourceType = type_name.trim().parse()?;
        paths.insert(ty.as_str().to_string(), dir.trim().to_string());
    }
    Ok(paths)
}
