use serde::{Deserialize, Serialize};
use tierwise_router::{ResourceTable, RoutingConfig, Tier};

/// Main Tierwise configuration
///
/// Configuration is loaded from (in priority order):
/// 1. `tierwise.jsonc` - JSON with comments
/// 2. `tierwise.json` - Standard JSON
/// 3. `tierwise.yml` / `tierwise.yaml` - YAML format
///
/// Also checks hidden variants (`.tierwise.*`) and `~/.config/tierwise/` for
/// global config. Every section is optional.
///
/// # Example
///
/// ```yaml
/// resources:
///   LOW: claude-haiku-4-5
///   MEDIUM: claude-sonnet-4-5
///   HIGH: ${TIERWISE_HIGH_MODEL}
///
/// routing:
///   boundaries:
///     medium_high: 0.65
///   escalation:
///     thresholds: [2, 4]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierwiseConfig {
    /// Keyword tables, weights, agent pins and escalation thresholds
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Tier -> concrete resource identifier
    #[serde(default = "default_resources")]
    pub resources: ResourceTable,
}

impl Default for TierwiseConfig {
    fn default() -> Self {
        Self {
            routing: RoutingConfig::default(),
            resources: default_resources(),
        }
    }
}

pub fn default_resources() -> ResourceTable {
    ResourceTable::new()
        .with(Tier::Low, "claude-haiku-4-5")
        .with(Tier::Medium, "claude-sonnet-4-5")
        .with(Tier::High, "claude-opus-4-5")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tierwise_router::AgentPolicy;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: TierwiseConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TierwiseConfig::default());
        assert_eq!(
            config.resources.select(Tier::High).unwrap().as_str(),
            "claude-opus-4-5"
        );
    }

    #[test]
    fn test_deserialize_full_config() {
        let yaml = r#"
resources:
  LOW: small-model
  MEDIUM: mid-model
  HIGH: large-model
routing:
  default_tier: LOW
  agents:
    reviewer:
      pinned: HIGH
    builder: variable
  boundaries:
    low_medium: 0.25
    medium_high: 0.65
  escalation:
    thresholds: [2, 4]
"#;
        let config: TierwiseConfig = serde_yaml_ng::from_str(yaml).unwrap();

        assert_eq!(config.resources.select(Tier::Low).unwrap().as_str(), "small-model");
        assert_eq!(config.routing.default_tier, Tier::Low);
        assert_eq!(
            config.routing.agents.get("reviewer"),
            Some(&AgentPolicy::Pinned(Tier::High))
        );
        assert_eq!(config.routing.agents.len(), 2);
        assert_eq!(config.routing.boundaries.medium_high, 0.65);
        assert_eq!(config.routing.escalation.thresholds, vec![2, 4]);
        assert_eq!(config.routing.weights.risk, 0.3);
    }

    #[test]
    fn test_partial_resource_table_is_kept_as_written() {
        let config: TierwiseConfig =
            serde_json::from_str(r#"{ "resources": { "LOW": "only-low" } }"#).unwrap();
        assert!(config.resources.select(Tier::Medium).is_err());
        assert!(config.resources.validate().is_err());
    }

    #[test]
    fn test_serializes_back_to_yaml() {
        let yaml = serde_yaml_ng::to_string(&TierwiseConfig::default()).unwrap();
        assert!(yaml.contains("resources:"));
        assert!(yaml.contains("HIGH: claude-opus-4-5"));
        let parsed: TierwiseConfig = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(parsed, TierwiseConfig::default());
    }
}
