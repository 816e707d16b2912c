//! HIGH tier prompt style: plan first, assess risk, verify before finishing
//!
//! Used for:
//! - Architectural and cross-service changes
//! - Schema and data migrations
//! - Production incidents and security-sensitive work
//! - Tasks escalated after repeated failures

pub const PREFIX: &str = "This is a complex task requiring deep analysis. \
Consider multiple angles, trade-offs, and edge cases before acting.";

pub const SCAFFOLD: &str = "\
## Plan\n\
Before changing anything, write an explicit step-by-step plan. Identify the \
files, services, and data affected by each step.\n\
\n\
## Risk & Impact Assessment\n\
- What can break, and who is affected?\n\
- Is the change reversible? Describe the rollback path.\n\
- Which security, data-integrity, or compatibility concerns apply?\n\
\n\
## Verification Checklist\n\
- [ ] Plan reviewed against the original request\n\
- [ ] Affected code paths and dependents identified\n\
- [ ] Tests cover the change, including edge cases\n\
- [ ] Diagnostics and tests pass\n\
- [ ] Rollback path confirmed";

/// Task-specific instructions for the HIGH tier
pub fn task_instructions(task_type: &str) -> &'static str {
    match task_type {
        "search" | "find" | "locate" => {
            "Conduct a comprehensive search:\n\
             1. Search all relevant locations systematically\n\
             2. Analyze relationships between matches\n\
             3. Consider related code paths and edge cases\n\
             4. Present findings with full context and implications"
        }
        "read" | "show" | "display" => {
            "Examine the content thoroughly: explain its structure, its \
             dependencies, and how it fits the larger system."
        }
        "analyze" | "check" => {
            "Perform deep analysis:\n\
             1. Examine the subject from multiple perspectives\n\
             2. Identify patterns, anti-patterns, and edge cases\n\
             3. Weigh security, performance, and maintainability\n\
             4. Recommend specific improvements with justification"
        }
        "edit" | "modify" | "change" => {
            "Approach this change carefully:\n\
             1. Understand the current implementation and its history\n\
             2. Map dependencies and side effects\n\
             3. Compare implementation approaches\n\
             4. Implement with complete error handling\n\
             5. Verify there are no regressions"
        }
        "create" | "add" => {
            "Design before implementing:\n\
             1. Research existing conventions in the codebase\n\
             2. Design for extensibility and clear boundaries\n\
             3. Consider security and failure modes from the start\n\
             4. Verify integration with existing systems"
        }
        "delete" | "remove" => {
            "Remove code with impact analysis:\n\
             1. Map all usages and dependents\n\
             2. Plan a migration path for dependents\n\
             3. Remove and update every reference\n\
             4. Verify nothing is orphaned"
        }
        "test" | "verify" => {
            "Test comprehensively: design a strategy covering edge cases and \
             integration paths, run it, and analyze every failure."
        }
        "debug" | "fix" => {
            "Find the root cause:\n\
             1. Reproduce reliably\n\
             2. Trace the execution path\n\
             3. Form and test hypotheses one at a time\n\
             4. Fix the cause, not the symptom\n\
             5. Prove the fix and guard it with a test"
        }
        "refactor" => {
            "Refactor with architectural awareness: preserve behavior, keep \
             each step reversible, and verify after every step."
        }
        "document" => {
            "Document the design: purpose, trade-offs, invariants, and \
             examples for each public surface."
        }
        _ => "Plan, assess the risks, execute, then verify against the checklist.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaffold_sections() {
        assert!(SCAFFOLD.contains("## Plan"));
        assert!(SCAFFOLD.contains("## Risk & Impact Assessment"));
        assert!(SCAFFOLD.contains("## Verification Checklist"));
        assert!(SCAFFOLD.contains("- [ ]"));
    }

    #[test]
    fn test_debug_instructions_target_root_cause() {
        assert!(task_instructions("debug").contains("root cause"));
        assert!(task_instructions("fix").contains("5. Prove"));
    }
}
