//! Agent definition: typed shape of an agent YAML file and its deserialization.
//!
//! Agent files come in two historical shapes. The nested shape keeps identity
//! under an `agent:` block; the flat shape puts identity keys at the top level.
//! Several keys also have alternate spellings. Each accepted spelling is a
//! separate raw field, and the mapping step picks the first one present in the
//! documented order below.
//!
//! | Concept                  | Accepted keys, highest precedence first                       |
//! |--------------------------|---------------------------------------------------------------|
//! | identity fields          | `agent.<key>`, then top-level `<key>`                         |
//! | when to use              | `whenToUse`, `when_to_use`                                    |
//! | core principles          | `core_principles`, `corePrinciples`, `core-principles`        |
//! | activation instructions  | `activation-instructions`, `activation_instructions`          |
//! | story file permissions   | `story-file-permissions`, `story_file_permissions`            |
//! | help display template    | `help-display-template`, `help_display_template`              |

use crate::types::ResourceType;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};
use thiserror::Error;

pub const DEFAULT_PERSONA_STYLE: &str = "professional";

/// Fully-defaulted agent definition. No field is ever left undefined.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDefinition {
    pub name: String,
    pub id: String,
    pub title: String,
    pub icon: String,
    pub when_to_use: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customization: Option<String>,
    pub persona: Persona,
    /// Commands in document order
    pub commands: Vec<AgentCommand>,
    pub dependencies: AgentDependencies,
    pub activation_instructions: Vec<String>,
    pub story_file_permissions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_display_template: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub role: String,
    pub style: String,
    pub identity: String,
    pub focus: String,
    pub core_principles: Vec<String>,
}

/// A command exposed by an agent. A plain string in YAML becomes a
/// description-only command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentCommand {
    pub name: String,
    pub description: String,
    pub usage: String,
    pub examples: Vec<String>,
    pub dependencies: Vec<String>,
}

/// Related resources an agent depends on, one ordered list per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AgentDependencies {
    pub tasks: Vec<String>,
    pub templates: Vec<String>,
    pub checklists: Vec<String>,
    pub data: Vec<String>,
    pub utils: Vec<String>,
    pub workflows: Vec<String>,
    pub agents: Vec<String>,
}

impl AgentDefinition {
    pub fn command(&self, name: &str) -> Option<&AgentCommand> {
        self.commands.iter().find(|c| c.name == name)
    }
}

impl AgentDependencies {
    /// Every dependency paired with the resource type it lives under.
    pub fn references(&self) -> Vec<(ResourceType, &str)> {
        let groups: [(ResourceType, &Vec<String>); 7] = [
            (ResourceType::Tasks, &self.tasks),
            (ResourceType::Templates, &self.templates),
            (ResourceType::Checklists, &self.checklists),
            (ResourceType::Data, &self.data),
            (ResourceType::Utils, &self.utils),
            (ResourceType::Workflows, &self.workflows),
            (ResourceType::Agents, &self.agents),
        ];
        groups
            .into_iter()
            .flat_map(|(ty, names)| names.iter().map(move |n| (ty, n.as_str())))
            .collect()
    }

    pub fn total(&self) -> usize {
        self.tasks.len()
            + self.templates.len()
            + self.checklists.len()
            + self.data.len()
            + self.utils.len()
            + self.workflows.len()
            + self.agents.len()
    }
}

/// Why an agent document could not be turned into a definition.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// Not well-formed YAML.
    #[error("{0}")]
    Syntax(serde_yaml::Error),

    /// Well-formed YAML, but a known key holds the wrong shape.
    #[error("{0}")]
    Shape(serde_yaml::Error),
}

/// Text list entry. An unquoted `- STEP 1: do x` reads as a one-entry
/// mapping and is rendered back as `"STEP 1: do x"`.
#[derive(Debug)]
struct TextItem(String);

impl<'de> Deserialize<'de> for TextItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        render_text_item(value)
            .map(TextItem)
            .ok_or_else(|| D::Error::custom("expected text or a single `key: text` entry"))
    }
}

fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Tagged(tagged) => render_scalar(&tagged.value),
        _ => None,
    }
}

fn render_text_item(value: Value) -> Option<String> {
    match value {
        Value::Mapping(map) if map.len() == 1 => {
            let (key, value) = map.into_iter().next()?;
            let rendered = format!("{}: {}", render_scalar(&key)?, render_scalar(&value)?);
            Some(rendered.trim_end().to_string())
        }
        Value::Null => None,
        other => render_scalar(&other),
    }
}

fn texts(items: Option<Vec<TextItem>>) -> Option<Vec<String>> {
    items.map(|items| items.into_iter().map(|TextItem(text)| text).collect())
}

#[derive(Debug, Default, Deserialize)]
struct RawIdentity {
    name: Option<String>,
    id: Option<String>,
    title: Option<String>,
    icon: Option<String>,
    #[serde(rename = "whenToUse")]
    when_to_use_camel: Option<String>,
    #[serde(rename = "when_to_use")]
    when_to_use_snake: Option<String>,
    customization: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPersona {
    role: Option<String>,
    style: Option<String>,
    identity: Option<String>,
    focus: Option<String>,
    #[serde(rename = "core_principles")]
    core_principles_snake: Option<Vec<TextItem>>,
    #[serde(rename = "corePrinciples")]
    core_principles_camel: Option<Vec<TextItem>>,
    #[serde(rename = "core-principles")]
    core_principles_kebab: Option<Vec<TextItem>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDependencies {
    tasks: Option<Vec<TextItem>>,
    templates: Option<Vec<TextItem>>,
    checklists: Option<Vec<TextItem>>,
    data: Option<Vec<TextItem>>,
    utils: Option<Vec<TextItem>>,
    workflows: Option<Vec<TextItem>>,
    agents: Option<Vec<TextItem>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCommandRecord {
    description: Option<String>,
    usage: Option<String>,
    examples: Option<Vec<TextItem>>,
    dependencies: Option<Vec<TextItem>>,
}

/// Top-level identity keys are spelled out here rather than flattened so that
/// unknown keys, tagged ones included, are skipped.
#[derive(Debug, Default, Deserialize)]
struct RawAgentDocument {
    agent: Option<RawIdentity>,
    name: Option<String>,
    id: Option<String>,
    title: Option<String>,
    icon: Option<String>,
    #[serde(rename = "whenToUse")]
    when_to_use_camel: Option<String>,
    #[serde(rename = "when_to_use")]
    when_to_use_snake: Option<String>,
    customization: Option<String>,
    persona: Option<RawPersona>,
    /// Mapping or list of single-entry mappings; values are heterogeneous.
    commands: Option<Value>,
    dependencies: Option<RawDependencies>,
    #[serde(rename = "activation-instructions")]
    activation_kebab: Option<Vec<TextItem>>,
    #[serde(rename = "activation_instructions")]
    activation_snake: Option<Vec<TextItem>>,
    #[serde(rename = "story-file-permissions")]
    story_permissions_kebab: Option<Vec<TextItem>>,
    #[serde(rename = "story_file_permissions")]
    story_permissions_snake: Option<Vec<TextItem>>,
    #[serde(rename = "help-display-template")]
    help_template_kebab: Option<String>,
    #[serde(rename = "help_display_template")]
    help_template_snake: Option<String>,
}

/// Parse agent YAML into a fully-defaulted definition.
///
/// `fallback_name` is the logical agent name (file stem); it fills `name` and
/// `id` when the document omits them. Unknown top-level keys are ignored, but
/// known keys of the wrong shape are rejected as [`DefinitionError::Shape`].
/// An empty document parses as an empty mapping.
pub fn parse_agent_definition(
    content: &str,
    fallback_name: &str,
) -> Result<AgentDefinition, DefinitionError> {
    let value: Value = serde_yaml::from_str(content).map_err(DefinitionError::Syntax)?;
    let value = if value.is_null() {
        Value::Mapping(Mapping::new())
    } else {
        value
    };
    let raw: RawAgentDocument = serde_yaml::from_value(value).map_err(DefinitionError::Shape)?;
    Ok(raw.into_definition(fallback_name))
}

impl RawAgentDocument {
    fn into_definition(self, fallback_name: &str) -> AgentDefinition {
        let nested = self.agent.unwrap_or_default();

        let id = nested
            .id
            .or(self.id)
            .unwrap_or_else(|| fallback_name.to_string());
        let name = nested
            .name
            .or(self.name)
            .unwrap_or_else(|| fallback_name.to_string());
        let when_to_use = nested
            .when_to_use_camel
            .or(nested.when_to_use_snake)
            .or(self.when_to_use_camel)
            .or(self.when_to_use_snake)
            .unwrap_or_default();

        let persona = self.persona.unwrap_or_default();
        let persona = Persona {
            role: persona.role.unwrap_or_default(),
            style: persona
                .style
                .unwrap_or_else(|| DEFAULT_PERSONA_STYLE.to_string()),
            identity: persona.identity.unwrap_or_default(),
            focus: persona.focus.unwrap_or_default(),
            core_principles: texts(persona.core_principles_snake)
                .or_else(|| texts(persona.core_principles_camel))
                .or_else(|| texts(persona.core_principles_kebab))
                .unwrap_or_default(),
        };

        let deps = self.dependencies.unwrap_or_default();
        let dependencies = AgentDependencies {
            tasks: texts(deps.tasks).unwrap_or_default(),
            templates: texts(deps.templates).unwrap_or_default(),
            checklists: texts(deps.checklists).unwrap_or_default(),
            data: texts(deps.data).unwrap_or_default(),
            utils: texts(deps.utils).unwrap_or_default(),
            workflows: texts(deps.workflows).unwrap_or_default(),
            agents: texts(deps.agents).unwrap_or_default(),
        };

        AgentDefinition {
            name,
            id,
            title: nested.title.or(self.title).unwrap_or_default(),
            icon: nested.icon.or(self.icon).unwrap_or_default(),
            when_to_use,
            customization: nested.customization.or(self.customization),
            persona,
            commands: self.commands.map(parse_commands).unwrap_or_default(),
            dependencies,
            activation_instructions: texts(self.activation_kebab)
                .or_else(|| texts(self.activation_snake))
                .unwrap_or_default(),
            story_file_permissions: texts(self.story_permissions_kebab)
                .or_else(|| texts(self.story_permissions_snake))
                .unwrap_or_default(),
            help_display_template: self.help_template_kebab.or(self.help_template_snake),
        }
    }
}

/// Entries whose value is neither a string nor a command record are skipped.
fn parse_commands(value: Value) -> Vec<AgentCommand> {
    let mut commands = Vec::new();
    match value {
        Value::Mapping(map) => {
            for (key, value) in map {
                push_command(&mut commands, key, value);
            }
        }
        Value::Sequence(items) => {
            for item in items {
                match item {
                    Value::Mapping(map) => {
                        for (key, value) in map {
                            push_command(&mut commands, key, value);
                        }
                    }
                    other => tracing::debug!("Skipping command list entry of shape {:?}", other),
                }
            }
        }
        Value::Null => {}
        other => tracing::debug!("Ignoring commands block of shape {:?}", other),
    }
    commands
}

fn push_command(commands: &mut Vec<AgentCommand>, key: Value, value: Value) {
    let Some(name) = key.as_str().map(str::to_string) else {
        tracing::debug!("Skipping command with non-string key {:?}", key);
        return;
    };

    match value {
        Value::String(description) => commands.push(AgentCommand {
            name,
            description,
            usage: String::new(),
            examples: Vec::new(),
            dependencies: Vec::new(),
        }),
        Value::Mapping(_) => match serde_yaml::from_value::<RawCommandRecord>(value) {
            Ok(record) => commands.push(AgentCommand {
                name,
                description: record.description.unwrap_or_default(),
                usage: record.usage.unwrap_or_default(),
                examples: texts(record.examples).unwrap_or_default(),
                dependencies: texts(record.dependencies).unwrap_or_default(),
            }),
            Err(e) => tracing::debug!("Skipping malformed command '{}': {}", name, e),
        },
        other => tracing::debug!("Skipping command '{}' with value {:?}", name, other),
    }
}
