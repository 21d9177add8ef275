use crate::integration::support::{
    default_resolver, project_with, write_file, CountingResolver, DEV_AGENT,
};
use lcagents::agent::AgentLoader;
use lcagents::error::ApiError;
use std::sync::Arc;

fn counting_loader(root: &std::path::Path) -> (AgentLoader, Arc<CountingResolver<lcagents::resource::FsResourceResolver>>) {
    let counting = Arc::new(CountingResolver::new(default_resolver(root)));
    (AgentLoader::new(counting.clone()), counting)
}

#[test]
fn loads_full_agent_document() {
    let temp = project_with(&[(".lcagents/agents/dev.yaml", DEV_AGENT)]);
    let loader = AgentLoader::new(Arc::new(default_resolver(temp.path())));

    let agent = loader.load_agent("dev").unwrap();
    let def = &agent.definition;
    assert_eq!(def.name, "Dev");
    assert_eq!(def.id, "dev");
    assert_eq!(def.title, "Full Stack Developer");
    assert_eq!(def.when_to_use, "Use for implementation work");
    assert_eq!(def.persona.role, "Senior Software Engineer");
    assert_eq!(def.persona.core_principles, vec!["Test first".to_string()]);
    assert_eq!(def.commands.len(), 2);
    assert_eq!(def.commands[0].name, "help");
    assert_eq!(def.command("develop").unwrap().usage, "*develop <story>");
    assert_eq!(def.dependencies.tasks, vec!["implement-story.md".to_string()]);
    assert!(agent.is_valid);
}

#[test]
fn cache_hit_skips_resolver() {
    let temp = project_with(&[(".lcagents/agents/dev.yaml", DEV_AGENT)]);
    let (loader, counting) = counting_loader(temp.path());

    let first = loader.load_agent("dev").unwrap();
    let second = loader.load_agent("dev").unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(counting.calls("agents", "dev.yaml"), 1);
    assert_eq!(counting.total_calls(), 1);
}

#[test]
fn reload_reads_the_file_again() {
    let temp = project_with(&[(".lcagents/agents/dev.yaml", DEV_AGENT)]);
    let (loader, counting) = counting_loader(temp.path());

    loader.load_agent("dev").unwrap();
    write_file(
        temp.path(),
        ".lcagents/agents/dev.yaml",
        "title: Renamed\npersona:\n  role: Engineer\n",
    );
    let reloaded = loader.reload_agent("dev").unwrap();

    assert_eq!(reloaded.definition.title, "Renamed");
    assert_eq!(counting.calls("agents", "dev.yaml"), 2);
}

#[test]
fn clear_cache_forces_fresh_resolution() {
    let temp = project_with(&[(".lcagents/agents/dev.yaml", DEV_AGENT)]);
    let (loader, counting) = counting_loader(temp.path());

    loader.load_agent("dev").unwrap();
    loader.clear_cache();
    loader.load_agent("dev").unwrap();
    assert_eq!(counting.calls("agents", "dev.yaml"), 2);
}

#[test]
fn failed_loads_are_not_cached() {
    let temp = project_with(&[(".lcagents/agents/qa.yaml", "title: QA\n")]);
    let (loader, counting) = counting_loader(temp.path());

    assert!(matches!(
        loader.load_agent("qa"),
        Err(ApiError::ValidationError(_))
    ));
    assert!(loader.load_agent("qa").is_err());
    assert_eq!(counting.calls("agents", "qa.yaml"), 2);
    assert!(loader.cached_names().is_empty());
}

#[test]
fn missing_persona_role_fails_validation() {
    let temp = project_with(&[(".lcagents/agents/qa.yaml", "title: QA\npersona:\n  style: terse\n")]);
    let loader = AgentLoader::new(Arc::new(default_resolver(temp.path())));
    let err = loader.load_agent("qa").unwrap_err();
    assert!(err.to_string().contains("Agent persona role is required"));
}

#[test]
fn load_all_reports_one_valid_one_invalid() {
    let temp = project_with(&[
        (".lcagents/agents/dev.yaml", DEV_AGENT),
        (".lcagents/agents/qa.yaml", "title: QA\n"),
        (".lcagents/agents/notes.txt", "not an agent"),
    ]);
    let loader = AgentLoader::new(Arc::new(default_resolver(temp.path())));

    let result = loader.load_all_agents();
    assert_eq!(result.loaded.len(), 1);
    assert_eq!(result.loaded[0].name, "dev");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].name, "qa");
    assert_eq!(result.errors[0].kind, "validation_error");
    assert_eq!(loader.cached_names(), vec!["dev".to_string()]);
}

#[test]
fn load_all_on_missing_directory_is_empty() {
    let temp = project_with(&[]);
    let loader = AgentLoader::new(Arc::new(default_resolver(temp.path())));
    let result = loader.load_all_agents();
    assert!(result.loaded.is_empty());
    assert!(result.errors.is_empty());
}

#[test]
fn dependency_warnings_do_not_invalidate() {
    let temp = project_with(&[
        (".lcagents/agents/dev.yaml", DEV_AGENT),
        (".lcagents/tasks/implement-story.md", "# Implement"),
    ]);
    let loader = AgentLoader::new(Arc::new(default_resolver(temp.path())));

    let report = loader.validate_agent("dev").unwrap();
    assert!(report.is_valid());
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("story-dod.md"));
}

#[test]
fn concurrent_loads_share_one_entry() {
    let temp = project_with(&[(".lcagents/agents/dev.yaml", DEV_AGENT)]);
    let (loader, counting) = counting_loader(temp.path());
    let loader = Arc::new(loader);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let loader = loader.clone();
            std::thread::spawn(move || loader.load_agent("dev").unwrap())
        })
        .collect();
    let agents: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(agents.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    assert_eq!(counting.calls("agents", "dev.yaml"), 1);
}

#[test]
fn layer_override_applies_to_agents() {
    let temp = project_with(&[
        (".lcagents/agents/dev.yaml", DEV_AGENT),
        (
            ".lcagents/custom/agents/dev.yaml",
            "title: Custom Dev\npersona:\n  role: Engineer\n",
        ),
    ]);
    let resolver = default_resolver(temp.path()).with_layer_overrides(true);
    let loader = AgentLoader::new(Arc::new(resolver));
    let agent = loader.load_agent("dev").unwrap();
    assert_eq!(agent.definition.title, "Custom Dev");
    assert!(agent.path.starts_with(temp.path().join(".lcagents/custom")));
}
