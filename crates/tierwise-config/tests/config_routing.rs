use std::fs;

use tempfile::TempDir;
use tierwise_config::{build_router, load_config, resolve_config};
use tierwise_router::{AgentPolicy, Tier};

#[test]
fn file_overrides_change_routing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tierwise.yaml");
    fs::write(
        &path,
        r#"
resources:
  LOW: small
  MEDIUM: mid
  HIGH: large
routing:
  agents:
    explore:
      pinned: HIGH
"#,
    )
    .unwrap();

    let config = load_config(Some(&path)).unwrap();
    assert_eq!(
        config.routing.agents.get("explore"),
        Some(&AgentPolicy::Pinned(Tier::High))
    );

    let router = build_router(&config).unwrap();
    let decision = router.route("Find all .ts files in src/", "explore");
    assert_eq!(decision.tier, Tier::High);
    assert_eq!(decision.model.as_str(), "large");
}

#[test]
fn incomplete_resource_table_fails_to_build() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tierwise.json");
    fs::write(&path, r#"{ "resources": { "LOW": "small", "HIGH": "large" } }"#).unwrap();

    let resolved = resolve_config(Some(&path)).unwrap();
    assert_eq!(resolved.path.as_deref(), Some(path.as_path()));

    let err = build_router(&resolved.config).unwrap_err();
    assert!(format!("{err:#}").contains("MEDIUM"));
}

#[test]
fn hard_override_must_stay_inside_risk_table() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tierwise.jsonc");
    fs::write(
        &path,
        r#"{
  "routing": {
    // "breach" is not a risk term
    "keywords": { "hard_override": ["breach"] }
  }
}"#,
    )
    .unwrap();

    let config = load_config(Some(&path)).unwrap();
    assert!(build_router(&config).is_err());
}
