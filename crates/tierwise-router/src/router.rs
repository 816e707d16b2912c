use crate::config::{AgentPolicy, RoutingConfig};
use crate::error::RoutingResult;
use crate::escalation::EscalationPolicy;
use crate::explain::explain_decision;
use crate::prompts::adapt_prompt;
use crate::rules::{AgentPolicyTable, TierClassifier};
use crate::scorer::ComplexityScorer;
use crate::selector::{ResourceTable, TierResources};
use crate::signals::{SignalExtractor, Signals};
use crate::types::{Decision, Tier};

/// The routing engine.
///
/// Built once from explicit configuration and immutable afterwards, so a
/// single instance can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct Router {
    extractor: SignalExtractor,
    classifier: TierClassifier,
    resources: TierResources,
    escalation: EscalationPolicy,
    default_tier: Tier,
}

impl Router {
    /// Validate the configuration and compile it into a router.
    ///
    /// Fails with a misconfiguration error when a table is malformed or a
    /// tier has no resource.
    pub fn new(config: RoutingConfig, resources: ResourceTable) -> RoutingResult<Self> {
        config.validate()?;
        let resources = TierResources::from_table(&resources)?;
        let extractor = SignalExtractor::new(&config.keywords, config.length)?;

        let scorer = ComplexityScorer::new(config.weights.clone(), config.boundaries);
        let classifier = TierClassifier::new(
            AgentPolicyTable::new(&config.agents),
            scorer,
            config.confidence,
        );

        Ok(Self {
            extractor,
            classifier,
            resources,
            escalation: EscalationPolicy::new(&config.escalation),
            default_tier: config.default_tier,
        })
    }

    pub fn route(&self, prompt: &str, agent: &str) -> Decision {
        let signals = self.extract_signals(prompt, agent);
        self.decide(&signals)
    }

    pub fn route_with_escalation(
        &self,
        prompt: &str,
        agent: &str,
        previous_failures: i64,
    ) -> Decision {
        let decision = self.route(prompt, agent);
        self.escalation
            .escalate(decision, previous_failures, &self.resources)
    }

    /// Tier for an agent without looking at any prompt: the pinned tier, or
    /// the configured default for agents that go through scoring.
    pub fn quick_tier(&self, agent: &str) -> Tier {
        self.classifier
            .policies()
            .pinned_tier(agent)
            .unwrap_or(self.default_tier)
    }

    pub fn agent_policy(&self, agent: &str) -> Option<AgentPolicy> {
        self.classifier.policies().lookup(agent)
    }

    pub fn adapt_prompt(&self, prompt: &str, tier: Tier) -> String {
        adapt_prompt(prompt, tier)
    }

    pub fn extract_signals(&self, prompt: &str, agent: &str) -> Signals {
        self.extractor.extract(prompt, agent)
    }

    pub fn score_complexity(&self, signals: &Signals) -> f64 {
        self.classifier.scorer().score(signals)
    }

    /// Route a prompt and render the full decision trace.
    pub fn explain(&self, prompt: &str, agent: &str) -> String {
        let signals = self.extract_signals(prompt, agent);
        let decision = self.decide(&signals);
        explain_decision(&decision, &signals)
    }

    /// Same as [`Router::explain`], with escalation applied first.
    pub fn explain_with_escalation(
        &self,
        prompt: &str,
        agent: &str,
        previous_failures: i64,
    ) -> String {
        let signals = self.extract_signals(prompt, agent);
        let decision =
            self.escalation
                .escalate(self.decide(&signals), previous_failures, &self.resources);
        explain_decision(&decision, &signals)
    }

    pub fn resources(&self) -> &TierResources {
        &self.resources
    }

    /// Classify already-extracted signals and bind the resource.
    pub fn decide(&self, signals: &Signals) -> Decision {
        let classification = self.classifier.classify(signals);
        let decision = Decision {
            tier: classification.tier,
            model: self.resources.for_tier(classification.tier).clone(),
            confidence: classification.confidence.clamp(0.0, 1.0),
            reasons: classification.reasons,
            escalated_from: None,
            rule: classification.rule,
            score: classification.score,
        };

        tracing::debug!(
            agent = %signals.agent,
            tier = %decision.tier,
            rule = decision.rule.as_str(),
            model = %decision.model,
            confidence = decision.confidence,
            "routing decision"
        );

        decision
    }
}
