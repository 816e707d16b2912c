//! Tier classification rules
//!
//! Rules are evaluated in priority order:
//!
//! 1. agent policy pin (no scoring)
//! 2. short/simple floor (documentation-only, or short without risk terms)
//! 3. score boundaries, with risk winning boundary ties
//!
//! Every rule that fires leaves a line in the classification's reasons.

use std::collections::{BTreeMap, HashMap};

use crate::config::{AgentPolicy, ConfidenceSettings};
use crate::scorer::ComplexityScorer;
use crate::signals::Signals;
use crate::types::{LengthBucket, Tier, TierRule};

/// Result of classifying one set of signals.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub tier: Tier,
    pub rule: TierRule,
    pub score: Option<f64>,
    pub confidence: f64,
    pub reasons: Vec<String>,
}

/// Agent label -> policy lookup. Labels are trimmed and lowercased.
#[derive(Debug, Clone, Default)]
pub struct AgentPolicyTable {
    policies: HashMap<String, AgentPolicy>,
}

impl AgentPolicyTable {
    pub fn new(agents: &BTreeMap<String, AgentPolicy>) -> Self {
        let policies = agents
            .iter()
            .map(|(name, policy)| (normalize_agent(name), *policy))
            .collect();
        Self { policies }
    }

    /// `None` for labels the table does not list.
    pub fn lookup(&self, agent: &str) -> Option<AgentPolicy> {
        self.policies.get(&normalize_agent(agent)).copied()
    }

    pub fn pinned_tier(&self, agent: &str) -> Option<Tier> {
        match self.lookup(agent) {
            Some(AgentPolicy::Pinned(tier)) => Some(tier),
            _ => None,
        }
    }
}

fn normalize_agent(agent: &str) -> String {
    agent.trim().to_lowercase()
}

#[derive(Debug, Clone)]
pub struct TierClassifier {
    policies: AgentPolicyTable,
    scorer: ComplexityScorer,
    confidence: ConfidenceSettings,
}

impl TierClassifier {
    pub fn new(
        policies: AgentPolicyTable,
        scorer: ComplexityScorer,
        confidence: ConfidenceSettings,
    ) -> Self {
        Self {
            policies,
            scorer,
            confidence,
        }
    }

    pub fn policies(&self) -> &AgentPolicyTable {
        &self.policies
    }

    pub fn scorer(&self) -> &ComplexityScorer {
        &self.scorer
    }

    pub fn classify(&self, signals: &Signals) -> Classification {
        let mut reasons = Vec::new();
        let policy = self.policies.lookup(&signals.agent);

        if let Some(AgentPolicy::Pinned(tier)) = policy {
            reasons.push(format!(
                "agent policy pin: `{}` is pinned to {}",
                signals.agent.trim(),
                tier
            ));
            if signals.trivial {
                reasons.push("trivial input: empty prompt".to_string());
            }
            return Classification {
                tier,
                rule: TierRule::AgentPin,
                score: None,
                confidence: self.confidence.pinned,
                reasons,
            };
        }

        reasons.push(variable_agent_reason(&signals.agent, policy.is_some()));
        describe_signals(signals, &mut reasons);

        let score = self.scorer.score(signals);
        let hard_override = signals.has_hard_override();
        let short_simple = signals.documentation_only
            || (signals.length == LengthBucket::Short && signals.risk_count() == 0);

        if short_simple && !hard_override {
            reasons.push("short/simple task".to_string());
            return Classification {
                tier: Tier::Low,
                rule: TierRule::ShortSimple,
                score: Some(score),
                confidence: self.confidence.short_simple,
                reasons,
            };
        }
        if short_simple {
            reasons.push("hard-override term present: short/simple floor skipped".to_string());
        }

        if hard_override {
            reasons.push(format!(
                "hard-override term forces score to at least {:.2}",
                self.scorer.boundaries().medium_high
            ));
        }

        let tier = self.scorer.score_to_tier(score, hard_override);
        reasons.push(self.boundary_reason(score, tier, hard_override));

        Classification {
            tier,
            rule: TierRule::ScoreBoundary,
            score: Some(score),
            confidence: self.scorer.confidence(score, tier),
            reasons,
        }
    }

    fn boundary_reason(&self, score: f64, tier: Tier, hard_override: bool) -> String {
        let b = self.scorer.boundaries();

        if score == b.medium_high || score == b.low_medium {
            let (boundary, name) = if score == b.medium_high {
                (b.medium_high, "MEDIUM/HIGH")
            } else {
                (b.low_medium, "LOW/MEDIUM")
            };
            let resolution = if hard_override {
                "hard-override term wins the tie"
            } else {
                "tie resolves to the lower tier"
            };
            return format!(
                "score {score:.2} sits on the {name} boundary {boundary:.2}; {resolution} -> {tier}"
            );
        }

        match tier {
            Tier::Low => format!(
                "score {score:.2} is below the LOW/MEDIUM boundary {:.2} -> LOW",
                b.low_medium
            ),
            Tier::Medium => format!(
                "score {score:.2} is between boundaries {:.2} and {:.2} -> MEDIUM",
                b.low_medium, b.medium_high
            ),
            Tier::High => format!(
                "score {score:.2} crossed the MEDIUM/HIGH boundary {:.2} -> HIGH",
                b.medium_high
            ),
        }
    }
}

fn variable_agent_reason(agent: &str, listed: bool) -> String {
    let agent = agent.trim();
    if agent.is_empty() {
        "no agent label supplied: using variable scoring path".to_string()
    } else if listed {
        format!("agent `{agent}` routes through complexity scoring")
    } else {
        format!("unknown agent `{agent}`: using variable scoring path")
    }
}

fn describe_signals(signals: &Signals, reasons: &mut Vec<String>) {
    if signals.trivial {
        reasons.push("trivial input: empty prompt".to_string());
    }

    let categories = [
        ("risk", &signals.risk_terms),
        ("hard-override", &signals.hard_override_terms),
        ("simplicity", &signals.simplicity_terms),
        ("domain", &signals.domain_terms),
    ];
    for (name, terms) in categories {
        if !terms.is_empty() {
            reasons.push(format!(
                "{name} terms ({}): {}",
                terms.len(),
                terms.join(", ")
            ));
        }
    }

    if signals.is_cross_file() {
        reasons.push(format!(
            "{} file paths referenced (cross-file)",
            signals.file_path_count
        ));
    }

    reasons.push(format!(
        "length bucket: {} ({} words)",
        signals.length.as_str(),
        signals.word_count
    ));

    if signals.documentation_only {
        reasons.push("documentation-only task".to_string());
    }
}
