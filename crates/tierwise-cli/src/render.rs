//! Terminal rendering for routing results

use colored::Colorize;
use serde::Serialize;
use tierwise_router::{Decision, Signals, Tier};

/// JSON shape of `tierwise route`
#[derive(Debug, Serialize)]
pub struct RouteOutput<'a> {
    #[serde(flatten)]
    pub decision: &'a Decision,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub adapted_prompt: Option<String>,
}

pub fn tier_label(tier: Tier) -> String {
    match tier {
        Tier::Low => tier.as_str().green().bold().to_string(),
        Tier::Medium => tier.as_str().yellow().bold().to_string(),
        Tier::High => tier.as_str().red().bold().to_string(),
    }
}

pub fn decision_text(decision: &Decision, adapted_prompt: Option<&str>) -> String {
    let mut lines = vec![
        format!("{} {}", "Tier:".cyan().bold(), tier_label(decision.tier)),
        format!("{} {}", "Model:".cyan().bold(), decision.model.as_str().yellow()),
        format!(
            "{} {:.2}",
            "Confidence:".cyan().bold(),
            decision.confidence
        ),
    ];
    if let Some(from) = decision.escalated_from {
        lines.push(format!(
            "{} {}",
            "Escalated from:".cyan().bold(),
            tier_label(from)
        ));
    }

    lines.push(format!("{}", "Reasons:".cyan().bold()));
    for reason in &decision.reasons {
        lines.push(format!("  {} {}", "-".dimmed(), reason));
    }

    if let Some(prompt) = adapted_prompt {
        lines.push(String::new());
        lines.push(format!("{}", "─".repeat(50).dimmed()));
        lines.push(prompt.to_string());
    }

    lines.join("\n")
}

pub fn signals_text(signals: &Signals) -> String {
    let terms = |terms: &[String]| {
        if terms.is_empty() {
            "none".dimmed().to_string()
        } else {
            terms.join(", ")
        }
    };

    [
        format!("{} {}", "Risk:".cyan(), terms(&signals.risk_terms)),
        format!(
            "{} {}",
            "Hard override:".cyan(),
            terms(&signals.hard_override_terms)
        ),
        format!("{} {}", "Simplicity:".cyan(), terms(&signals.simplicity_terms)),
        format!("{} {}", "Domain:".cyan(), terms(&signals.domain_terms)),
        format!("{} {}", "File paths:".cyan(), signals.file_path_count),
        format!(
            "{} {} ({} words)",
            "Length:".cyan(),
            signals.length.as_str(),
            signals.word_count
        ),
        format!(
            "{} {}",
            "Documentation only:".cyan(),
            signals.documentation_only
        ),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tierwise_router::{ResourceId, TierRule};

    fn decision() -> Decision {
        Decision {
            tier: Tier::Medium,
            model: ResourceId::new("mid"),
            confidence: 0.9,
            reasons: vec!["escalated after 1 prior failures: LOW -> MEDIUM".to_string()],
            escalated_from: Some(Tier::Low),
            rule: TierRule::ShortSimple,
            score: Some(0.1),
        }
    }

    #[test]
    fn test_decision_text_lists_escalation_and_reasons() {
        colored::control::set_override(false);
        let text = decision_text(&decision(), None);
        assert!(text.contains("Tier: MEDIUM"));
        assert!(text.contains("Model: mid"));
        assert!(text.contains("Escalated from: LOW"));
        assert!(text.contains("  - escalated after 1 prior failures"));
    }

    #[test]
    fn test_route_output_flattens_decision() {
        let d = decision();
        let output = RouteOutput {
            decision: &d,
            adapted_prompt: Some("adapted".to_string()),
        };
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["tier"], "MEDIUM");
        assert_eq!(value["escalated_from"], "LOW");
        assert_eq!(value["rule"], "short-simple");
        assert_eq!(value["adapted_prompt"], "adapted");
    }
}
