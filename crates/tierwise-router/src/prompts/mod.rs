mod high;
mod low;
mod medium;

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::Tier;

lazy_static! {
    static ref LEADING_GREETING: Regex =
        Regex::new(r"(?i)^\s*(?:hi|hello|hey)(?:\s+there)?(?:[\s,!.]+|$)").unwrap();
    static ref LEADING_REQUEST_FRAMING: Regex = Regex::new(
        r"(?i)^\s*(?:please\s+|kindly\s+|(?:can|could|would|will)\s+you\s+(?:please\s+)?|i\s+(?:would\s+like|want|need)\s+you\s+to\s+)"
    )
    .unwrap();
    // Only a closing clause of its own: `..., thanks!` or `... . Cheers`.
    // A sentence-ending mark before it is kept, a comma is dropped.
    static ref TRAILING_THANKS: Regex = Regex::new(
        r"(?i)(?:,|([.!?]))\s*(?:thanks(?:\s+in\s+advance)?|thank\s+you(?:\s+so\s+much)?|cheers)[\s.!]*$"
    )
    .unwrap();
}

/// Delegation context for building a full task prompt
#[derive(Debug, Clone, Default)]
pub struct DelegationContext {
    pub task_type: Option<String>,
    pub file_paths: Vec<String>,
    pub dependencies: Vec<String>,
    pub constraints: Vec<String>,
    pub previous_attempts: Option<u32>,
    pub expected_output: Option<String>,
}

/// Rewrite a prompt for the given tier.
///
/// The user's request is always kept. LOW only strips conversational framing
/// (greetings, "could you please", trailing thanks) before wrapping the
/// request in terse instructions; MEDIUM and HIGH append scaffolding.
pub fn adapt_prompt(prompt: &str, tier: Tier) -> String {
    match tier {
        Tier::Low => format!(
            "{}\n{}\n\n{}\n\n{}",
            low::PREFIX,
            low::INSTRUCTIONS,
            condense(prompt),
            low::SUFFIX
        ),
        Tier::Medium => format!(
            "{}\n\n{}\n\n{}",
            medium::PREFIX,
            prompt.trim(),
            medium::SCAFFOLD
        ),
        Tier::High => format!("{}\n\n{}\n\n{}", high::PREFIX, prompt.trim(), high::SCAFFOLD),
    }
}

/// Strip conversational boilerplate around a request.
///
/// Falls back to the trimmed prompt when stripping would leave nothing.
pub fn condense(prompt: &str) -> String {
    let trimmed = prompt.trim();

    let without_greeting = LEADING_GREETING.replace(trimmed, "");
    let without_framing = LEADING_REQUEST_FRAMING.replace(&without_greeting, "");
    let without_thanks = TRAILING_THANKS.replace(&without_framing, "${1}");
    let condensed = without_thanks.trim();

    if condensed.is_empty() {
        trimmed.to_string()
    } else {
        condensed.to_string()
    }
}

pub fn prompt_prefix(tier: Tier) -> &'static str {
    match tier {
        Tier::Low => low::PREFIX,
        Tier::Medium => medium::PREFIX,
        Tier::High => high::PREFIX,
    }
}

/// Get tier-specific task instructions
pub fn task_instructions(tier: Tier, task_type: &str) -> &'static str {
    let task_type = task_type.trim();
    match tier {
        Tier::Low => low::task_instructions(task_type),
        Tier::Medium => medium::task_instructions(task_type),
        Tier::High => high::task_instructions(task_type),
    }
}

/// Create a delegation prompt whose depth follows the tier
pub fn create_delegation_prompt(tier: Tier, task: &str, context: &DelegationContext) -> String {
    let mut parts = vec![prompt_prefix(tier).to_string()];

    match tier {
        Tier::Low => {
            parts.push(format!("\n{}", condense(task)));
            if !context.file_paths.is_empty() {
                parts.push(format!("Files: {}", context.file_paths.join(", ")));
            }
            if let Some(ref task_type) = context.task_type {
                parts.push(low::task_instructions(task_type).to_string());
            }
            parts.push(format!("\n{}", low::SUFFIX));
        }
        Tier::Medium => {
            parts.push(format!("\n## Task\n{}", task.trim()));
            if let Some(ref task_type) = context.task_type {
                parts.push(format!(
                    "\n## Task Type\n{}\n\n{}",
                    task_type,
                    medium::task_instructions(task_type)
                ));
            }
            if !context.file_paths.is_empty() {
                parts.push(format!("\n## Files\n- {}", context.file_paths.join("\n- ")));
            }
            if !context.constraints.is_empty() {
                parts.push(format!(
                    "\n## Constraints\n- {}",
                    context.constraints.join("\n- ")
                ));
            }
            parts.push(format!("\n{}", medium::SCAFFOLD));
        }
        Tier::High => {
            parts.push(format!("\n## Task\n{}", task.trim()));
            if let Some(ref task_type) = context.task_type {
                parts.push(format!(
                    "\n## Task Type\n{}\n\n{}",
                    task_type,
                    high::task_instructions(task_type)
                ));
            }
            if !context.file_paths.is_empty() {
                parts.push(format!(
                    "\n## Target Files\n- {}",
                    context.file_paths.join("\n- ")
                ));
            }
            if !context.dependencies.is_empty() {
                parts.push(format!(
                    "\n## Dependencies\n- {}",
                    context.dependencies.join("\n- ")
                ));
            }
            if !context.constraints.is_empty() {
                parts.push(format!(
                    "\n## Constraints\n- {}",
                    context.constraints.join("\n- ")
                ));
            }
            if let Some(attempts) = context.previous_attempts {
                parts.push(format!(
                    "\n## Previous Attempts\nThis task has been attempted {attempts} time(s) before. Use a different approach."
                ));
            }
            if let Some(ref expected) = context.expected_output {
                parts.push(format!("\n## Expected Output\n{expected}"));
            }
            parts.push(format!("\n{}", high::SCAFFOLD));
        }
    }

    parts.join("\n")
}
