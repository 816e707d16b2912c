use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Capability tier a task is routed to. Ordered `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Low, Tier::Medium, Tier::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Low => "LOW",
            Tier::Medium => "MEDIUM",
            Tier::High => "HIGH",
        }
    }

    /// Move up `steps` tiers, saturating at `High`.
    pub fn step_up(self, steps: usize) -> Tier {
        let index = Self::ALL
            .iter()
            .position(|t| *t == self)
            .unwrap_or_default();
        Self::ALL[(index.saturating_add(steps)).min(Self::ALL.len() - 1)]
    }

    pub fn is_max(&self) -> bool {
        *self == Tier::High
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tier `{0}` (expected low, medium or high)")]
pub struct ParseTierError(String);

impl FromStr for Tier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Tier::Low),
            "medium" => Ok(Tier::Medium),
            "high" => Ok(Tier::High),
            _ => Err(ParseTierError(s.to_string())),
        }
    }
}

/// Identifier of the concrete model or execution resource bound to a tier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Word-count bucket of a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthBucket {
    Short,
    Medium,
    Long,
}

impl LengthBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            LengthBucket::Short => "short",
            LengthBucket::Medium => "medium",
            LengthBucket::Long => "long",
        }
    }

    /// Multiplier applied to the length weight when scoring.
    pub fn value(&self) -> f64 {
        match self {
            LengthBucket::Short => 0.0,
            LengthBucket::Medium => 1.0,
            LengthBucket::Long => 2.0,
        }
    }
}

/// Which classifier rule produced a decision's base tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TierRule {
    AgentPin,
    ShortSimple,
    ScoreBoundary,
}

impl TierRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            TierRule::AgentPin => "agent-pin",
            TierRule::ShortSimple => "short-simple",
            TierRule::ScoreBoundary => "score-boundary",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub tier: Tier,
    pub model: ResourceId,
    pub confidence: f64,
    pub reasons: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalated_from: Option<Tier>,
    pub rule: TierRule,
    /// Complexity score, absent when an agent pin skipped scoring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Decision {
    pub fn is_escalated(&self) -> bool {
        self.escalated_from.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_are_totally_ordered() {
        assert!(Tier::Low < Tier::Medium);
        assert!(Tier::Medium < Tier::High);
        assert_eq!(Tier::ALL.iter().max(), Some(&Tier::High));
    }

    #[test]
    fn step_up_saturates_at_high() {
        assert_eq!(Tier::Low.step_up(0), Tier::Low);
        assert_eq!(Tier::Low.step_up(1), Tier::Medium);
        assert_eq!(Tier::Low.step_up(2), Tier::High);
        assert_eq!(Tier::Medium.step_up(7), Tier::High);
        assert_eq!(Tier::High.step_up(1), Tier::High);
    }

    #[test]
    fn parses_tier_case_insensitively() {
        assert_eq!("HIGH".parse::<Tier>(), Ok(Tier::High));
        assert_eq!(" medium ".parse::<Tier>(), Ok(Tier::Medium));
        assert_eq!("low".parse::<Tier>(), Ok(Tier::Low));
        assert!("opus".parse::<Tier>().is_err());
    }

    #[test]
    fn decision_serializes_without_empty_optionals() {
        let decision = Decision {
            tier: Tier::Low,
            model: ResourceId::new("haiku"),
            confidence: 0.85,
            reasons: vec!["short/simple task".to_string()],
            escalated_from: None,
            rule: TierRule::ShortSimple,
            score: None,
        };

        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["tier"], "LOW");
        assert_eq!(json["model"], "haiku");
        assert_eq!(json["rule"], "short-simple");
        assert!(json.get("escalated_from").is_none());
        assert!(json.get("score").is_none());
    }
}
