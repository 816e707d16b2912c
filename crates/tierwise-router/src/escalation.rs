use crate::config::EscalationSettings;
use crate::selector::TierResources;
use crate::types::{Decision, Tier};

pub fn can_escalate(current: Tier) -> bool {
    !current.is_max()
}

/// Failure-count driven tier escalation.
///
/// Stateless: the caller re-supplies the failure count on every call. The
/// bump is always measured from the original (pre-escalation) tier, so
/// re-escalating an escalated decision does not compound.
#[derive(Debug, Clone, PartialEq)]
pub struct EscalationPolicy {
    thresholds: Vec<u32>,
    confidence: f64,
}

impl EscalationPolicy {
    pub fn new(settings: &EscalationSettings) -> Self {
        Self {
            thresholds: settings.thresholds.clone(),
            confidence: settings.confidence,
        }
    }

    /// Number of thresholds crossed by `failures`.
    pub fn steps_for(&self, failures: u32) -> usize {
        self.thresholds.iter().filter(|t| failures >= **t).count()
    }

    pub fn escalate(
        &self,
        mut decision: Decision,
        previous_failures: i64,
        resources: &TierResources,
    ) -> Decision {
        let failures = if previous_failures < 0 {
            decision.reasons.push(format!(
                "negative failure count {previous_failures} normalized to 0"
            ));
            0
        } else {
            u32::try_from(previous_failures).unwrap_or(u32::MAX)
        };

        let original = decision.escalated_from.unwrap_or(decision.tier);
        if !can_escalate(original) {
            return decision;
        }

        let target = original.step_up(self.steps_for(failures)).max(decision.tier);
        if target == decision.tier {
            return decision;
        }

        tracing::debug!(
            from = %original,
            to = %target,
            failures,
            "escalating routing decision"
        );

        decision.escalated_from = Some(original);
        decision.tier = target;
        decision.model = resources.for_tier(target).clone();
        decision.confidence = self.confidence;
        decision.reasons.push(format!(
            "escalated after {failures} prior failures: {original} -> {target}"
        ));

        decision
    }
}
