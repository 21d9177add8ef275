use crate::integration::support::{project_with, write_file};
use lcagents::config::{ConfigManager, InitOptions, LcAgentsConfig, TeamRole};
use lcagents::error::ApiError;
use lcagents::resource::{FsResourceResolver, ResourceResolver};
use std::collections::BTreeMap;

#[test]
fn initialized_config_drives_resolution() {
    let temp = project_with(&[("shared/tasks/review.md", "# Review")]);
    let manager = ConfigManager::new(temp.path());

    let mut paths = BTreeMap::new();
    paths.insert("tasks".to_string(), "shared/tasks".to_string());
    manager
        .initialize_config(InitOptions {
            paths,
            repository: Some("acme/widgets".to_string()),
            ..InitOptions::default()
        })
        .unwrap();

    let config = manager.load_config().unwrap();
    assert_eq!(config.repository.as_deref(), Some("acme/widgets"));
    assert_eq!(config.path_for("templates"), ".lcagents/templates");

    let resolver = FsResourceResolver::new(temp.path(), config);
    assert_eq!(resolver.resolve_task("review.md").content(), Some("# Review"));
}

#[test]
fn document_uses_camel_case_keys() {
    let temp = project_with(&[]);
    let manager = ConfigManager::new(temp.path());
    manager
        .initialize_config(InitOptions {
            github_enabled: Some(true),
            copilot_features: Some(true),
            ..InitOptions::default()
        })
        .unwrap();

    let raw = std::fs::read_to_string(manager.config_path()).unwrap();
    assert!(raw.contains("layerRoot:"));
    assert!(raw.contains("copilotFeatures: true"));
    assert!(raw.contains("agent-teams: .lcagents/agent-teams"));
}

#[test]
fn hand_written_document_loads_with_defaults() {
    let temp = project_with(&[]);
    write_file(
        temp.path(),
        ".lcagents/config.yaml",
        "version: '2.0'\npaths:\n  tasks: docs/tasks\nteamRoles:\n  pm:\n    description: Owns the roadmap\n    seniority: lead\n",
    );
    let manager = ConfigManager::new(temp.path());
    let config = manager.load_config().unwrap();
    assert_eq!(config.layer_root, ".lcagents");
    assert!(!config.github.enabled);
    assert_eq!(config.path_for("agents"), ".lcagents/agents");

    let pm = manager.get_team_role("pm").unwrap().unwrap();
    assert_eq!(pm.description, "Owns the roadmap");
    assert_eq!(
        pm.extra.get("seniority"),
        Some(&serde_yaml::Value::String("lead".to_string()))
    );
}

#[test]
fn document_without_paths_is_rejected() {
    let temp = project_with(&[(".lcagents/config.yaml", "version: '1.0.0'\n")]);
    let err = ConfigManager::new(temp.path()).load_config().unwrap_err();
    assert!(matches!(err, ApiError::ConfigError(_)));
}

#[test]
fn blank_path_is_rejected_on_save() {
    let temp = project_with(&[]);
    let manager = ConfigManager::new(temp.path());
    let mut config = LcAgentsConfig::default();
    config.paths.insert("data".to_string(), "  ".to_string());
    let err = manager.save_config(&config).unwrap_err();
    assert!(err.to_string().contains("paths.data"));
    assert!(!manager.exists());
}

#[test]
fn team_role_lifecycle() {
    let temp = project_with(&[]);
    let manager = ConfigManager::new(temp.path());
    manager.reset_to_defaults().unwrap();

    manager
        .set_team_role(
            "qa",
            TeamRole {
                name: "QA".to_string(),
                description: "Quality".to_string(),
                responsibilities: vec!["Test plans".to_string()],
                extra: BTreeMap::new(),
            },
        )
        .unwrap();
    assert_eq!(manager.get_team_roles().unwrap().len(), 1);

    manager.remove_team_role("qa").unwrap();
    manager.remove_team_role("qa").unwrap();
    assert!(manager.get_team_role("qa").unwrap().is_none());
}

#[test]
fn reset_discards_customization() {
    let temp = project_with(&[]);
    let manager = ConfigManager::new(temp.path());
    manager
        .initialize_config(InitOptions {
            layer_root: Some("tools/lc".to_string()),
            ..InitOptions::default()
        })
        .unwrap();
    assert_eq!(manager.load_config().unwrap().path_for("tasks"), "tools/lc/tasks");

    let reset = manager.reset_to_defaults().unwrap();
    assert_eq!(reset, LcAgentsConfig::default());
    assert_eq!(manager.load_config().unwrap(), LcAgentsConfig::default());
}
