//! Routing configuration
//!
//! Every table the engine consults (keyword categories, weights, boundaries,
//! agent pins, escalation thresholds) lives here as plain data. The defaults
//! are the calibrated tables; hosts override any section through their own
//! configuration file and hand the result to [`crate::Router::new`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{RoutingError, RoutingResult};
use crate::types::Tier;

/// How an agent label is routed.
///
/// Serialized as `variable` or `{ pinned: HIGH }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentPolicy {
    /// Role mandates a fixed capability level; scoring is skipped.
    Pinned(Tier),
    /// Tier is decided by the scoring pipeline.
    Variable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Tier reported by `quick_tier` for agents that go through scoring
    #[serde(default = "default_tier")]
    pub default_tier: Tier,

    /// Agent label -> routing policy. Labels are matched case-insensitively.
    #[serde(default = "default_agent_policies")]
    pub agents: BTreeMap<String, AgentPolicy>,

    #[serde(default)]
    pub keywords: KeywordTables,

    #[serde(default)]
    pub weights: ScoringWeights,

    #[serde(default)]
    pub boundaries: TierBoundaries,

    #[serde(default)]
    pub length: LengthThresholds,

    #[serde(default)]
    pub confidence: ConfidenceSettings,

    #[serde(default)]
    pub escalation: EscalationSettings,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            default_tier: default_tier(),
            agents: default_agent_policies(),
            keywords: KeywordTables::default(),
            weights: ScoringWeights::default(),
            boundaries: TierBoundaries::default(),
            length: LengthThresholds::default(),
            confidence: ConfidenceSettings::default(),
            escalation: EscalationSettings::default(),
        }
    }
}

impl RoutingConfig {
    /// Check the tables for defects that would make routing ill-defined.
    pub fn validate(&self) -> RoutingResult<()> {
        self.keywords.validate()?;
        self.weights.validate()?;
        self.boundaries.validate()?;
        self.length.validate()?;
        self.confidence.validate()?;
        self.escalation.validate()?;
        Ok(())
    }
}

fn default_tier() -> Tier {
    Tier::Medium
}

fn default_agent_policies() -> BTreeMap<String, AgentPolicy> {
    [
        ("oracle", AgentPolicy::Pinned(Tier::High)),
        ("prometheus", AgentPolicy::Pinned(Tier::High)),
        ("metis", AgentPolicy::Pinned(Tier::High)),
        ("momus", AgentPolicy::Pinned(Tier::High)),
        ("librarian", AgentPolicy::Pinned(Tier::Medium)),
        ("multimodal-looker", AgentPolicy::Pinned(Tier::Medium)),
        ("explore", AgentPolicy::Pinned(Tier::Low)),
        ("document-writer", AgentPolicy::Pinned(Tier::Low)),
        ("sisyphus", AgentPolicy::Variable),
        ("sisyphus-junior", AgentPolicy::Variable),
        ("frontend-ui-ux-engineer", AgentPolicy::Variable),
    ]
    .into_iter()
    .map(|(name, policy)| (name.to_string(), policy))
    .collect()
}

// ============================================================================
// Keyword tables
// ============================================================================

/// Keyword categories matched against the prompt.
///
/// `hard_override` must be a subset of `risk`: a hard-override term counts as
/// a risk match and additionally forces the score up to the HIGH boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordTables {
    pub risk: Vec<String>,
    pub hard_override: Vec<String>,
    pub simplicity: Vec<String>,
    pub domain: Vec<String>,
    pub documentation: Vec<String>,
    /// Terms that mark a task as touching code, which clears the
    /// documentation-only flag.
    pub code_change: Vec<String>,
}

fn owned(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|s| s.to_string()).collect()
}

impl Default for KeywordTables {
    fn default() -> Self {
        Self {
            risk: owned(&[
                "refactor",
                "redesign",
                "restructure",
                "rewrite",
                "schema",
                "migration",
                "migrate",
                "breaking change",
                "data loss",
                "deploy",
                "root cause",
                "race condition",
                "deadlock",
                "concurrency",
                "security",
                "vulnerability",
                "production",
                "incident",
                "outage",
                "architecture",
                "cross-service",
                "system-wide",
            ]),
            hard_override: owned(&[
                "security",
                "vulnerability",
                "production",
                "incident",
                "outage",
                "architecture",
                "cross-service",
                "system-wide",
            ]),
            simplicity: owned(&[
                "find", "list", "show", "where", "search", "locate", "grep", "lookup", "look up",
                "print", "display",
            ]),
            domain: owned(&[
                "api",
                "endpoint",
                "database",
                "query",
                "service",
                "cache",
                "caching",
                "auth",
                "authentication",
                "middleware",
                "queue",
                "frontend",
                "backend",
                "component",
                "docker",
                "kubernetes",
                "pipeline",
            ]),
            documentation: owned(&[
                "documentation",
                "docs",
                "readme",
                "docstring",
                "doc comment",
                "changelog",
                "jsdoc",
                "rustdoc",
                "tutorial",
                "guide",
            ]),
            code_change: owned(&[
                "implement",
                "fix",
                "refactor",
                "debug",
                "optimize",
                "rewrite",
                "migrate",
                "deploy",
                "patch",
                "test",
            ]),
        }
    }
}

impl KeywordTables {
    /// `(category name, terms)` pairs in a stable order.
    pub fn categories(&self) -> [(&'static str, &[String]); 6] {
        [
            ("risk", self.risk.as_slice()),
            ("hard_override", self.hard_override.as_slice()),
            ("simplicity", self.simplicity.as_slice()),
            ("domain", self.domain.as_slice()),
            ("documentation", self.documentation.as_slice()),
            ("code_change", self.code_change.as_slice()),
        ]
    }

    fn validate(&self) -> RoutingResult<()> {
        for (category, terms) in self.categories() {
            if terms.iter().any(|t| t.trim().is_empty()) {
                return Err(RoutingError::EmptyKeyword { category });
            }
        }

        for term in &self.hard_override {
            let listed = self
                .risk
                .iter()
                .any(|risk| risk.trim().eq_ignore_ascii_case(term.trim()));
            if !listed {
                return Err(RoutingError::HardOverrideNotRisk(term.clone()));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Scoring
// ============================================================================

/// Per-signal weights of the complexity score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    #[serde(default = "default_risk_weight")]
    pub risk: f64,
    #[serde(default = "default_simplicity_weight")]
    pub simplicity: f64,
    #[serde(default = "default_domain_weight")]
    pub domain: f64,
    /// Added once when two or more file paths are mentioned
    #[serde(default = "default_cross_file_weight")]
    pub cross_file: f64,
    /// Multiplied by the length bucket value (short 0, medium 1, long 2)
    #[serde(default = "default_length_weight")]
    pub length: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            risk: default_risk_weight(),
            simplicity: default_simplicity_weight(),
            domain: default_domain_weight(),
            cross_file: default_cross_file_weight(),
            length: default_length_weight(),
        }
    }
}

impl ScoringWeights {
    fn validate(&self) -> RoutingResult<()> {
        let named = [
            ("risk", self.risk),
            ("simplicity", self.simplicity),
            ("domain", self.domain),
            ("cross_file", self.cross_file),
            ("length", self.length),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(RoutingError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }
}

fn default_risk_weight() -> f64 {
    0.3
}

fn default_simplicity_weight() -> f64 {
    0.25
}

fn default_domain_weight() -> f64 {
    0.1
}

fn default_cross_file_weight() -> f64 {
    0.1
}

fn default_length_weight() -> f64 {
    0.15
}

/// Score boundaries between tiers, inside the `[0, 1]` score range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierBoundaries {
    pub low_medium: f64,
    pub medium_high: f64,
}

impl Default for TierBoundaries {
    fn default() -> Self {
        Self {
            low_medium: 0.3,
            medium_high: 0.6,
        }
    }
}

impl TierBoundaries {
    fn validate(&self) -> RoutingResult<()> {
        let ordered = self.low_medium.is_finite()
            && self.medium_high.is_finite()
            && 0.0 <= self.low_medium
            && self.low_medium < self.medium_high
            && self.medium_high <= 1.0;
        if !ordered {
            return Err(RoutingError::InvalidBoundaries {
                low_medium: self.low_medium,
                medium_high: self.medium_high,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthThresholds {
    /// Prompts with at most this many words are short
    pub short_max_words: usize,
    /// Prompts with at least this many words are long
    pub long_min_words: usize,
}

impl Default for LengthThresholds {
    fn default() -> Self {
        Self {
            short_max_words: 12,
            long_min_words: 60,
        }
    }
}

impl LengthThresholds {
    fn validate(&self) -> RoutingResult<()> {
        if self.short_max_words >= self.long_min_words {
            return Err(RoutingError::InvalidLengthThresholds {
                short_max: self.short_max_words,
                long_min: self.long_min_words,
            });
        }
        Ok(())
    }
}

/// Fixed confidences for decisions that do not come from the score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceSettings {
    pub pinned: f64,
    pub short_simple: f64,
}

impl Default for ConfidenceSettings {
    fn default() -> Self {
        Self {
            pinned: 0.95,
            short_simple: 0.85,
        }
    }
}

impl ConfidenceSettings {
    fn validate(&self) -> RoutingResult<()> {
        validate_confidence("pinned", self.pinned)?;
        validate_confidence("short_simple", self.short_simple)
    }
}

fn validate_confidence(name: &'static str, value: f64) -> RoutingResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(RoutingError::InvalidConfidence { name, value });
    }
    Ok(())
}

// ============================================================================
// Escalation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationSettings {
    /// Failure counts at which the tier is bumped one more step.
    /// Must be positive and strictly ascending.
    #[serde(default = "default_escalation_thresholds")]
    pub thresholds: Vec<u32>,

    /// Confidence reported on an escalated decision
    #[serde(default = "default_escalation_confidence")]
    pub confidence: f64,
}

impl Default for EscalationSettings {
    fn default() -> Self {
        Self {
            thresholds: default_escalation_thresholds(),
            confidence: default_escalation_confidence(),
        }
    }
}

impl EscalationSettings {
    fn validate(&self) -> RoutingResult<()> {
        let positive = self.thresholds.iter().all(|t| *t > 0);
        let ascending = self.thresholds.windows(2).all(|w| w[0] < w[1]);
        if !positive || !ascending {
            return Err(RoutingError::InvalidEscalationThresholds(
                self.thresholds.clone(),
            ));
        }
        validate_confidence("escalation", self.confidence)
    }
}

fn default_escalation_thresholds() -> Vec<u32> {
    vec![1, 3]
}

fn default_escalation_confidence() -> f64 {
    0.9
}
