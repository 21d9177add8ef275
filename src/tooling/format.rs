//! Human-readable rendering of command results.

use crate::agent::commands::{AgentListResult, AgentShowResult};
use crate::agent::ValidationResult;
use crate::config::{LcAgentsConfig, TeamRole};
use crate::resource::{LayeredEntry, PermissionReport, ResolutionResult, ResourceHealthReport};
use crate::types::{Layer, ResourceType};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::collections::BTreeMap;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn status_mark(passed: bool) -> String {
    if passed {
        format!("{}", "✓".green())
    } else {
        format!("{}", "✗".red())
    }
}

/// `layer` is the override layer that supplied the file, when one did.
pub fn format_resolution_text(
    ty: ResourceType,
    name: &str,
    layer: Option<Layer>,
    result: &ResolutionResult,
    show_content: bool,
) -> String {
    match result {
        ResolutionResult::Found { path, content } => {
            let mut out = format!("{} {}/{}", status_mark(true), ty, name);
            if let Some(layer) = layer {
                out.push_str(&format!(" [{}]", layer));
            }
            out.push_str(&format!("\n  Path: {}\n", path.display()));
            if show_content {
                out.push('\n');
                out.push_str(content);
                if !content.ends_with('\n') {
                    out.push('\n');
                }
            }
            out
        }
        ResolutionResult::NotFound { reason, .. } => {
            format!("{} {}/{}\n  {}\n", status_mark(false), ty, name, reason)
        }
    }
}

/// Listing with the supplying layer, when layer overrides are active.
pub fn format_resource_list_text(ty: ResourceType, entries: &[LayeredEntry]) -> String {
    if entries.is_empty() {
        return format!("No {} found.\n", ty);
    }
    let mut out = format!("{}\n\n", format_section_heading(&format!("Resources: {}", ty)));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Name", "Layer"]);
    for entry in entries {
        let layer = entry
            .layer
            .map(|l| l.to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![entry.name.clone(), layer]);
    }
    out.push_str(&format!("{}\n", table));
    out
}

pub fn format_health_text(report: &ResourceHealthReport) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Resource directories"));
    if report.valid {
        out.push_str(&format!("{} All resource directories present and readable\n", status_mark(true)));
        return out;
    }
    for missing in &report.missing {
        out.push_str(&format!("{} Missing: {}\n", status_mark(false), missing));
    }
    for error in &report.errors {
        out.push_str(&format!("{} Error: {}\n", status_mark(false), error));
    }
    out
}

pub fn format_permissions_text(path: &str, report: &PermissionReport) -> String {
    let mut out = format!("{}\n", path);
    out.push_str(&format!("  Read:  {}\n", yes_no(report.read)));
    out.push_str(&format!("  Write: {}\n", yes_no(report.write)));
    out
}

pub fn format_agent_list_text(result: &AgentListResult) -> String {
    let mut out = String::new();
    if result.agents.is_empty() {
        out.push_str("No agents found.\n");
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Agent", "Title", "Role", "Commands"]);
        for agent in &result.agents {
            let title = if agent.icon.is_empty() {
                agent.title.clone()
            } else {
                format!("{} {}", agent.icon, agent.title)
            };
            table.add_row(vec![
                agent.name.clone(),
                title,
                agent.role.clone(),
                agent.commands.to_string(),
            ]);
        }
        out.push_str(&format!("{}\n", table));
        out.push_str(&format!("Total: {} agent(s)\n", result.agents.len()));
    }

    if !result.failures.is_empty() {
        out.push_str(&format!("\n{}\n", format_section_heading("Failed to load")));
        for failure in &result.failures {
            out.push_str(&format!("{} {}: {}\n", status_mark(false), failure.name, failure.error));
        }
    }
    out
}

pub fn format_agent_show_text(result: &AgentShowResult) -> String {
    let agent = &result.agent;
    let def = &agent.definition;
    let mut out = format!(
        "{}\n\n",
        format_section_heading(&format!("Agent: {}", agent.name))
    );
    out.push_str(&format!("Title: {}\n", def.title));
    if !def.icon.is_empty() {
        out.push_str(&format!("Icon: {}\n", def.icon));
    }
    out.push_str(&format!("ID: {}\n", def.id));
    out.push_str(&format!("Path: {}\n", agent.path.display()));
    if !def.when_to_use.is_empty() {
        out.push_str(&format!("When to use: {}\n", def.when_to_use));
    }

    out.push_str(&format!("\n{}\n", format_section_heading("Persona")));
    out.push_str(&format!("  Role: {}\n", def.persona.role));
    out.push_str(&format!("  Style: {}\n", def.persona.style));
    if !def.persona.focus.is_empty() {
        out.push_str(&format!("  Focus: {}\n", def.persona.focus));
    }

    if !def.commands.is_empty() {
        out.push_str(&format!("\n{}\n", format_section_heading("Commands")));
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Command", "Description"]);
        for command in &def.commands {
            table.add_row(vec![command.name.clone(), command.description.clone()]);
        }
        out.push_str(&format!("{}\n", table));
    }

    let references = def.dependencies.references();
    if !references.is_empty() {
        out.push_str(&format!("\n{}\n", format_section_heading("Dependencies")));
        for (ty, name) in references {
            out.push_str(&format!("  {}/{}\n", ty, name));
        }
    }

    if !result.warnings.is_empty() {
        out.push_str(&format!("\n{}\n", format_section_heading("Warnings")));
        for warning in &result.warnings {
            out.push_str(&format!("  {}\n", warning.yellow()));
        }
    }
    out
}

/// One validation report; `verbose` lists every check.
pub fn format_validation_text(result: &ValidationResult, verbose: bool) -> String {
    let mut out = if result.is_valid() {
        format!("{} Agent '{}' is valid", status_mark(true), result.agent_name)
    } else {
        format!("{} Agent '{}' is invalid", status_mark(false), result.agent_name)
    };
    out.push_str(&format!(
        " ({}/{} checks passed)\n",
        result.passed_checks(),
        result.total_checks()
    ));

    if verbose {
        for (check, passed) in &result.checks {
            out.push_str(&format!("  {} {}\n", status_mark(*passed), check));
        }
    }
    for error in &result.errors {
        out.push_str(&format!("  Error: {}\n", error));
    }
    for warning in &result.warnings {
        out.push_str(&format!("  Warning: {}\n", warning.yellow()));
    }
    out
}

pub fn format_config_text(config: &LcAgentsConfig) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Configuration"));
    out.push_str(&format!("Version: {}\n", config.version));
    out.push_str(&format!("Layer root: {}\n", config.layer_root));
    if let Some(ref repository) = config.repository {
        out.push_str(&format!("Repository: {}\n", repository));
    }
    out.push_str(&format!(
        "GitHub integration: {} (Copilot features: {})\n\n",
        yes_no(config.github.enabled),
        yes_no(config.github.copilot_features)
    ));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Resource type", "Path"]);
    for (type_name, path) in &config.paths {
        table.add_row(vec![type_name.clone(), path.clone()]);
    }
    out.push_str(&format!("{}\n", table));

    if !config.team_roles.is_empty() {
        out.push_str(&format!("\nTeam roles: {}\n", config.team_roles.len()));
    }
    out
}

pub fn format_roles_text(roles: &BTreeMap<String, TeamRole>) -> String {
    if roles.is_empty() {
        return "No team roles configured.\n".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Role", "Description", "Responsibilities"]);
    for (key, role) in roles {
        table.add_row(vec![
            key.clone(),
            role.description.clone(),
            role.responsibilities.len().to_string(),
        ]);
    }
    format!("{}\n", table)
}

pub fn format_role_text(key: &str, role: &TeamRole) -> String {
    let mut out = format!("{}\n", format_section_heading(&format!("Role: {}", key)));
    if !role.name.is_empty() {
        out.push_str(&format!("Name: {}\n", role.name));
    }
    if !role.description.is_empty() {
        out.push_str(&format!("Description: {}\n", role.description));
    }
    if !role.responsibilities.is_empty() {
        out.push_str("Responsibilities:\n");
        for responsibility in &role.responsibilities {
            out.push_str(&format!("  - {}\n", responsibility));
        }
    }
    for (key, value) in &role.extra {
        let rendered = serde_yaml::to_string(value).unwrap_or_default();
        out.push_str(&format!("{}: {}\n", key, rendered.trim_end()));
    }
    out
}
