//! LOW tier prompt style: imperative, speed first, minimal exploration

pub const PREFIX: &str = "Execute quickly and concisely.";

pub const INSTRUCTIONS: &str = "\
- Do only what is asked.\n\
- Keep exploration to the minimum needed.\n\
- Prefer speed over thoroughness.";

pub const SUFFIX: &str = "Be brief. Return result.";

/// Task-specific instructions for the LOW tier
pub fn task_instructions(task_type: &str) -> &'static str {
    match task_type {
        "search" | "find" | "locate" => "Find and list matches. No explanation needed.",
        "read" | "show" | "display" => "Show the content directly.",
        "analyze" | "check" => "State findings briefly.",
        "edit" | "modify" | "change" => "Make the change. Confirm when done.",
        "create" | "add" => "Create it. Report completion.",
        "delete" | "remove" => "Remove it. Confirm removal.",
        "test" | "verify" => "Run test. Report pass/fail.",
        "debug" | "fix" => "Identify issue. Fix it.",
        "refactor" => "Refactor as requested.",
        "document" => "Add brief documentation.",
        _ => "Complete the task efficiently.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framing_is_terse() {
        assert!(PREFIX.len() < 40);
        assert!(SUFFIX.len() < 30);
        assert!(INSTRUCTIONS.contains("minimum"));
    }

    #[test]
    fn test_task_instructions_are_direct() {
        assert!(task_instructions("search").contains("No explanation"));
        assert!(task_instructions("edit").len() < 50);
        assert_eq!(task_instructions("juggle"), "Complete the task efficiently.");
    }
}
