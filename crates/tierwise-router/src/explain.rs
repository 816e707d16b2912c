use crate::signals::Signals;
use crate::types::{Decision, TierRule};

/// Render a decision and the signals it was derived from as a readable trace.
///
/// Sections appear in a fixed order: signals, score, tier and rule, resource,
/// confidence, escalation, reasons.
pub fn explain_decision(decision: &Decision, signals: &Signals) -> String {
    let agent = signals.agent.trim();
    let mut lines = vec![
        "=== Routing Decision ===".to_string(),
        format!(
            "Agent: {}",
            if agent.is_empty() { "unspecified" } else { agent }
        ),
        String::new(),
        "--- Signals ---".to_string(),
        format!("Risk terms: {}{}", signals.risk_count(), term_list(&signals.risk_terms)),
        format!(
            "Hard-override terms: {}{}",
            signals.hard_override_terms.len(),
            term_list(&signals.hard_override_terms)
        ),
        format!(
            "Simplicity terms: {}{}",
            signals.simplicity_count(),
            term_list(&signals.simplicity_terms)
        ),
        format!(
            "Domain terms: {}{}",
            signals.domain_count(),
            term_list(&signals.domain_terms)
        ),
        format!("File paths: {}", signals.file_path_count),
        format!(
            "Length: {} ({} words)",
            signals.length.as_str(),
            signals.word_count
        ),
        format!("Documentation only: {}", signals.documentation_only),
    ];
    if signals.trivial {
        lines.push("Trivial input: yes".to_string());
    }

    lines.push(String::new());
    lines.push("--- Decision ---".to_string());
    lines.push(match decision.score {
        Some(score) => format!("Score: {score:.2}"),
        None => "Score: not computed (agent policy pin)".to_string(),
    });
    lines.push(format!(
        "Tier: {} (rule: {})",
        decision.tier,
        rule_description(decision.rule)
    ));
    lines.push(format!("Model: {}", decision.model));
    lines.push(format!("Confidence: {:.2}", decision.confidence));
    if let Some(from) = decision.escalated_from {
        lines.push(format!("Escalated: from {} to {}", from, decision.tier));
    }

    lines.push(String::new());
    lines.push("--- Reasons ---".to_string());
    for reason in &decision.reasons {
        lines.push(format!("  - {reason}"));
    }

    lines.join("\n")
}

fn term_list(terms: &[String]) -> String {
    if terms.is_empty() {
        String::new()
    } else {
        format!(" ({})", terms.join(", "))
    }
}

fn rule_description(rule: TierRule) -> &'static str {
    match rule {
        TierRule::AgentPin => "agent policy pin",
        TierRule::ShortSimple => "short/simple task",
        TierRule::ScoreBoundary => "score boundary",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LengthBucket, ResourceId, Tier};

    fn signals() -> Signals {
        Signals {
            agent: "sisyphus-junior".to_string(),
            word_count: 13,
            length: LengthBucket::Medium,
            file_path_count: 0,
            risk_terms: vec!["refactor".to_string(), "schema".to_string()],
            hard_override_terms: Vec::new(),
            simplicity_terms: Vec::new(),
            domain_terms: vec!["database".to_string()],
            documentation_only: false,
            trivial: false,
        }
    }

    fn decision() -> Decision {
        Decision {
            tier: Tier::High,
            model: ResourceId::new("large"),
            confidence: 0.72,
            reasons: vec!["score 0.85 crossed the MEDIUM/HIGH boundary 0.60 -> HIGH".to_string()],
            escalated_from: None,
            rule: TierRule::ScoreBoundary,
            score: Some(0.85),
        }
    }

    #[test]
    fn renders_sections_in_fixed_order() {
        let text = explain_decision(&decision(), &signals());

        let order = [
            "Risk terms: 2 (refactor, schema)",
            "Domain terms: 1 (database)",
            "Score: 0.85",
            "Tier: HIGH (rule: score boundary)",
            "Model: large",
            "Confidence: 0.72",
            "--- Reasons ---",
        ];
        let mut last = 0;
        for needle in order {
            let pos = text.find(needle).unwrap_or_else(|| panic!("missing `{needle}`"));
            assert!(pos >= last, "`{needle}` out of order");
            last = pos;
        }
        assert!(!text.contains("Escalated"));
    }

    #[test]
    fn includes_escalation_note() {
        let mut d = decision();
        d.escalated_from = Some(Tier::Medium);
        let text = explain_decision(&d, &signals());
        assert!(text.contains("Escalated: from MEDIUM to HIGH"));
    }

    #[test]
    fn pinned_decisions_have_no_score() {
        let mut d = decision();
        d.rule = TierRule::AgentPin;
        d.score = None;
        let text = explain_decision(&d, &signals());
        assert!(text.contains("Score: not computed"));
        assert!(text.contains("rule: agent policy pin"));
    }
}
