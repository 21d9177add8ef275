use crate::integration::support::{project_with, DEV_AGENT};
use clap::{CommandFactory, Parser};
use lcagents::tooling::cli::{
    AgentCommands, Cli, CliContext, Commands, ConfigCommands, ResourceCommands, RoleCommands,
};

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["lcagents", "resource", "resolve", "tasks", "review.md"],
        vec![
            "lcagents",
            "--layered",
            "resource",
            "resolve",
            "templates",
            "prd.yaml",
            "--show-content",
            "--format",
            "json",
        ],
        vec!["lcagents", "resource", "list", "agents"],
        vec!["lcagents", "resource", "validate", "--format", "json"],
        vec!["lcagents", "resource", "permissions", ".lcagents/tasks"],
        vec!["lcagents", "agent", "list"],
        vec!["lcagents", "agent", "show", "dev", "--format", "json"],
        vec!["lcagents", "agent", "validate", "dev"],
        vec!["lcagents", "agent", "validate", "--all", "--verbose"],
        vec!["lcagents", "config", "show"],
        vec![
            "lcagents",
            "config",
            "init",
            "--github",
            "--path",
            "tasks=docs/tasks",
            "--path",
            "data=docs/data",
        ],
        vec!["lcagents", "config", "set-path", "tasks", "docs/tasks"],
        vec!["lcagents", "config", "reset", "--force"],
        vec!["lcagents", "config", "role", "list"],
        vec![
            "lcagents",
            "config",
            "role",
            "set",
            "pm",
            "--description",
            "Product",
            "--responsibility",
            "Roadmap",
        ],
        vec!["lcagents", "--workspace", "/tmp", "--log-level", "debug", "agent", "list"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_name_with_all() {
    assert!(Cli::try_parse_from(["lcagents", "agent", "validate", "dev", "--all"]).is_err());
    assert!(Cli::try_parse_from(["lcagents", "resource", "resolve", "tasks"]).is_err());
}

#[test]
fn command_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn resource_list_json_contract() {
    let temp = project_with(&[
        (".lcagents/tasks/b.md", "b"),
        (".lcagents/tasks/a.md", "a"),
        (".lcagents/custom/tasks/a.md", "custom a"),
    ]);
    let ctx = CliContext::new(temp.path().to_path_buf(), None)
        .unwrap()
        .with_layer_overrides(true);
    let output = ctx
        .execute(&Commands::Resource {
            command: ResourceCommands::List {
                resource_type: "tasks".to_string(),
                format: "json".to_string(),
            },
        })
        .unwrap();
    assert!(output.success);

    let parsed: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    assert_eq!(parsed["type"], "tasks");
    let entries = parsed["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["name"], "a.md");
    assert_eq!(entries[0]["layer"], "custom");
    assert!(entries[1]["layer"].is_null());
}

#[test]
fn resolve_json_omits_content_unless_requested() {
    let temp = project_with(&[(".lcagents/data/kb.md", "knowledge")]);
    let ctx = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let resolve = |show_content| Commands::Resource {
        command: ResourceCommands::Resolve {
            resource_type: "data".to_string(),
            name: "kb.md".to_string(),
            show_content,
            format: "json".to_string(),
        },
    };

    let hidden: serde_json::Value =
        serde_json::from_str(&ctx.execute(&resolve(false)).unwrap().text).unwrap();
    assert_eq!(hidden["result"]["status"], "found");
    assert!(hidden["result"].get("content").is_none());
    assert!(hidden["result"]["path"].as_str().unwrap().ends_with("kb.md"));

    let shown: serde_json::Value =
        serde_json::from_str(&ctx.execute(&resolve(true)).unwrap().text).unwrap();
    assert_eq!(shown["result"]["content"], "knowledge");
}

#[test]
fn permissions_on_missing_path_reports_false_flags_and_succeeds() {
    let temp = project_with(&[(".lcagents/data/kb.md", "knowledge")]);
    let ctx = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let output = ctx
        .execute(&Commands::Resource {
            command: ResourceCommands::Permissions {
                path: "nope".into(),
                format: "json".to_string(),
            },
        })
        .unwrap();
    assert!(output.success);

    let parsed: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    assert_eq!(parsed["read"], false);
    assert_eq!(parsed["write"], false);
    assert!(parsed.get("error").is_none());
}

#[test]
fn agent_list_json_contract() {
    let temp = project_with(&[
        (".lcagents/agents/dev.yaml", DEV_AGENT),
        (".lcagents/agents/broken.yaml", "persona: [\n"),
    ]);
    let ctx = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let output = ctx
        .execute(&Commands::Agent {
            command: AgentCommands::List {
                format: "json".to_string(),
            },
        })
        .unwrap();
    assert!(!output.success);

    let parsed: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    let agents = parsed["agents"].as_array().unwrap();
    assert_eq!(agents.len(), 1);
    assert_eq!(agents[0]["name"], "dev");
    assert_eq!(agents[0]["role"], "Senior Software Engineer");
    let failures = parsed["failures"].as_array().unwrap();
    assert_eq!(failures[0]["name"], "broken");
    assert_eq!(failures[0]["kind"], "parse_error");
}

#[test]
fn agent_show_json_excludes_raw_content() {
    let temp = project_with(&[(".lcagents/agents/dev.yaml", DEV_AGENT)]);
    let ctx = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let output = ctx
        .execute(&Commands::Agent {
            command: AgentCommands::Show {
                name: "dev".to_string(),
                format: "json".to_string(),
            },
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    assert_eq!(parsed["agent"]["definition"]["title"], "Full Stack Developer");
    assert_eq!(parsed["agent"]["definition"]["persona"]["role"], "Senior Software Engineer");
    assert!(parsed["agent"].get("raw_content").is_none());
    assert_eq!(parsed["warnings"].as_array().unwrap().len(), 2);
}

#[test]
fn agent_validate_all_text_summarizes() {
    let temp = project_with(&[
        (".lcagents/agents/dev.yaml", DEV_AGENT),
        (".lcagents/agents/qa.yaml", "title: QA\n"),
    ]);
    let ctx = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let output = ctx
        .execute(&Commands::Agent {
            command: AgentCommands::Validate {
                name: None,
                all: true,
                verbose: true,
                format: "text".to_string(),
            },
        })
        .unwrap();
    assert!(!output.success);
    assert!(output.text.contains("1/2 agent(s) valid"));
    assert!(output.text.contains("Agent persona role is required"));
}

#[test]
fn config_commands_round_trip_through_document() {
    let temp = project_with(&[]);
    let ctx = CliContext::new(temp.path().to_path_buf(), None).unwrap();

    ctx.execute(&Commands::Config {
        command: ConfigCommands::Init {
            repository: Some("acme/widgets".to_string()),
            github: true,
            copilot: false,
            layer_root: None,
            paths: vec!["tasks=docs/tasks".to_string()],
            force: false,
        },
    })
    .unwrap();
    ctx.execute(&Commands::Config {
        command: ConfigCommands::SetPath {
            resource_type: "data".to_string(),
            dir: "docs/data".to_string(),
        },
    })
    .unwrap();
    ctx.execute(&Commands::Config {
        command: ConfigCommands::Role {
            command: RoleCommands::Set {
                name: "pm".to_string(),
                description: Some("Product".to_string()),
                responsibilities: vec!["Roadmap".to_string()],
            },
        },
    })
    .unwrap();

    let shown = ctx
        .execute(&Commands::Config {
            command: ConfigCommands::Show {
                format: "json".to_string(),
            },
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&shown.text).unwrap();
    assert_eq!(parsed["repository"], "acme/widgets");
    assert_eq!(parsed["github"]["enabled"], true);
    assert_eq!(parsed["paths"]["tasks"], "docs/tasks");
    assert_eq!(parsed["paths"]["data"], "docs/data");
    assert_eq!(parsed["paths"]["agents"], ".lcagents/agents");
    assert_eq!(parsed["teamRoles"]["pm"]["description"], "Product");

    let reset = ctx
        .execute(&Commands::Config {
            command: ConfigCommands::Reset { force: true },
        })
        .unwrap();
    assert!(reset.success);
    let roles = ctx
        .execute(&Commands::Config {
            command: ConfigCommands::Role {
                command: RoleCommands::List {
                    format: "json".to_string(),
                },
            },
        })
        .unwrap();
    assert_eq!(roles.text.trim(), "{}");
}
