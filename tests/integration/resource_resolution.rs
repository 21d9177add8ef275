use crate::integration::support::{default_resolver, project_with, write_file};
use lcagents::config::LcAgentsConfig;
use lcagents::resource::{FsResourceResolver, MissCause, ResolutionResult, ResourceResolver};
use lcagents::types::{Layer, ResourceType};
use proptest::prelude::*;

#[test]
fn resolves_each_type_from_its_convention_directory() {
    let temp = project_with(&[]);
    for ty in ResourceType::ALL {
        write_file(
            temp.path(),
            &format!(".lcagents/{}/item.md", ty.as_str()),
            ty.as_str(),
        );
    }
    let resolver = default_resolver(temp.path());
    for ty in ResourceType::ALL {
        let result = resolver.resolve(ty, "item.md");
        assert_eq!(result.content(), Some(ty.as_str()), "type {}", ty);
    }
    assert!(resolver.resolve_agent_team("item.md").is_found());
}

#[test]
fn resolution_observes_edits_between_calls() {
    let temp = project_with(&[(".lcagents/tasks/a.md", "v1")]);
    let resolver = default_resolver(temp.path());
    assert_eq!(resolver.resolve_task("a.md").content(), Some("v1"));

    write_file(temp.path(), ".lcagents/tasks/a.md", "v2");
    assert_eq!(resolver.resolve_task("a.md").content(), Some("v2"));

    std::fs::remove_file(temp.path().join(".lcagents/tasks/a.md")).unwrap();
    assert_eq!(
        resolver.resolve_task("a.md").cause(),
        Some(MissCause::Missing)
    );
}

#[test]
fn repeated_resolution_is_identical() {
    let temp = project_with(&[(".lcagents/templates/prd.yaml", "kind: prd")]);
    let resolver = default_resolver(temp.path());
    assert_eq!(
        resolver.resolve_template("prd.yaml"),
        resolver.resolve_template("prd.yaml")
    );
    assert_eq!(
        resolver.resolve_template("absent.yaml"),
        resolver.resolve_template("absent.yaml")
    );
}

#[test]
fn layered_override_precedence() {
    let temp = project_with(&[
        (".lcagents/core/tasks/review.md", "core"),
        (".lcagents/org/tasks/review.md", "org"),
        (".lcagents/custom/tasks/review.md", "custom"),
        (".lcagents/runtime/tasks/review.md", "runtime"),
        (".lcagents/tasks/review.md", "flat"),
        (".lcagents/org/tasks/only-org.md", "org"),
        (".lcagents/tasks/only-flat.md", "flat"),
    ]);
    let resolver =
        FsResourceResolver::new(temp.path(), LcAgentsConfig::default()).with_layer_overrides(true);

    let review = resolver.resolve_layered(ResourceType::Tasks, "review.md");
    assert_eq!(review.layer, Some(Layer::Custom));
    assert_eq!(review.result.content(), Some("custom"));

    let org = resolver.resolve_layered(ResourceType::Tasks, "only-org.md");
    assert_eq!(org.layer, Some(Layer::Org));

    let flat = resolver.resolve_layered(ResourceType::Tasks, "only-flat.md");
    assert_eq!(flat.layer, None);
    assert_eq!(flat.result.content(), Some("flat"));

    // The generic entry point follows the same precedence
    assert_eq!(resolver.resolve_task("review.md").content(), Some("custom"));

    let names: Vec<String> = resolver
        .list_layered(ResourceType::Tasks)
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["only-flat.md", "only-org.md", "review.md"]);
}

#[test]
fn flat_resolver_ignores_layers() {
    let temp = project_with(&[(".lcagents/custom/tasks/review.md", "custom")]);
    let resolver = default_resolver(temp.path());
    assert!(!resolver.resolve_task("review.md").is_found());
    assert_eq!(
        resolver
            .resolve_in_layer(Layer::Custom, ResourceType::Tasks, "review.md")
            .content(),
        Some("custom")
    );
}

#[test]
fn layered_miss_mentions_searched_layers() {
    let temp = project_with(&[]);
    let resolver =
        FsResourceResolver::new(temp.path(), LcAgentsConfig::default()).with_layer_overrides(true);
    let miss = resolver.resolve_layered(ResourceType::Data, "kb.md");
    assert_eq!(miss.layer, None);
    let reason = miss.result.reason().unwrap();
    assert!(reason.contains("data"));
    assert!(reason.contains("kb.md"));
    assert!(reason.contains("custom, org, core"));
}

fn resource_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,15}\\.(md|yaml|txt)"
}

proptest! {
    #[test]
    fn miss_reason_names_type_and_resource(idx in 0usize..8, name in resource_name()) {
        let temp = tempfile::TempDir::new().unwrap();
        let resolver = default_resolver(temp.path());
        let ty = ResourceType::ALL[idx];
        match resolver.resolve(ty, &name) {
            ResolutionResult::NotFound { cause, reason } => {
                prop_assert_eq!(cause, MissCause::Missing);
                prop_assert!(reason.contains(ty.as_str()));
                prop_assert!(reason.contains(&name));
            }
            ResolutionResult::Found { .. } => prop_assert!(false, "empty project resolved {}", name),
        }
    }

    #[test]
    fn escaping_names_never_resolve(depth in 1usize..4, name in resource_name()) {
        let temp = tempfile::TempDir::new().unwrap();
        write_file(temp.path(), &name, "outside");
        let resolver = default_resolver(temp.path());
        let escaping = format!("{}{}", "../".repeat(depth), name);
        prop_assert_eq!(resolver.resolve_task(&escaping).cause(), Some(MissCause::InvalidName));
    }
}
