//! Agent definition validation.

use super::definition::AgentDefinition;
use serde::Serialize;

/// Validation result for an agent definition
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    pub agent_name: String,
    pub checks: Vec<(String, bool)>,
    pub errors: Vec<String>,
    /// Non-fatal findings such as unresolved dependencies
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new(agent_name: String) -> Self {
        Self {
            agent_name,
            checks: Vec::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_check(&mut self, description: &str, passed: bool) {
        self.checks.push((description.to_string(), passed));
    }

    pub fn add_error(&mut self, error: String) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn total_checks(&self) -> usize {
        self.checks.len()
    }

    pub fn passed_checks(&self) -> usize {
        self.checks.iter().filter(|(_, passed)| *passed).count()
    }

    /// Errors joined into one message, the shape every failure path reports.
    pub fn error_message(&self) -> String {
        self.errors.join(", ")
    }
}

/// Check the mandatory fields: name, title, persona role.
pub fn validate_agent_definition(agent_name: &str, definition: &AgentDefinition) -> ValidationResult {
    let mut result = ValidationResult::new(agent_name.to_string());

    let required = [
        ("Agent name is present", &definition.name, "Agent name is required"),
        ("Agent title is present", &definition.title, "Agent title is required"),
        (
            "Persona role is present",
            &definition.persona.role,
            "Agent persona role is required",
        ),
    ];

    for (check, value, error) in required {
        let present = !value.trim().is_empty();
        result.add_check(check, present);
        if !present {
            result.add_error(error.to_string());
        }
    }

    result
}
