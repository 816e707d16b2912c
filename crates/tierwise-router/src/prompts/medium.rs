//! MEDIUM tier prompt style: structured, with acceptance criteria and a
//! scope reminder

pub const PREFIX: &str = "Execute this task efficiently while maintaining quality.";

pub const SCAFFOLD: &str = "\
## Acceptance Criteria\n\
- The requested behavior works as described.\n\
- Existing behavior and tests keep passing.\n\
- Changes follow the patterns already used in the codebase.\n\
\n\
## Scope\n\
Stay within the boundaries of the request. Note follow-ups instead of \
expanding the change.";

/// Task-specific instructions for the MEDIUM tier
pub fn task_instructions(task_type: &str) -> &'static str {
    match task_type {
        "search" | "find" | "locate" => {
            "Search thoroughly and present results in a structured format. \
             Include file paths, line numbers, and relevant context."
        }
        "read" | "show" | "display" => {
            "Display the content with clear formatting and brief context."
        }
        "analyze" | "check" => {
            "Analyze systematically. Report what you found, its implications, \
             and recommendations."
        }
        "edit" | "modify" | "change" => {
            "Make the requested changes:\n\
             1. Read and understand the current code\n\
             2. Apply the changes carefully\n\
             3. Verify the changes work\n\
             4. Report what changed and why"
        }
        "create" | "add" => {
            "Create the requested component:\n\
             1. Follow existing code patterns\n\
             2. Add appropriate error handling\n\
             3. Verify it integrates properly"
        }
        "delete" | "remove" => {
            "Remove the specified code:\n\
             1. Check for dependents\n\
             2. Remove cleanly\n\
             3. Confirm nothing else broke"
        }
        "test" | "verify" => {
            "Test the change:\n\
             1. Run the relevant tests\n\
             2. Report results with details\n\
             3. Suggest fixes for failures"
        }
        "debug" | "fix" => {
            "Debug systematically:\n\
             1. Reproduce the issue\n\
             2. Identify the root cause\n\
             3. Implement the fix\n\
             4. Verify the resolution"
        }
        "refactor" => {
            "Refactor incrementally and verify functionality is preserved after \
             each step."
        }
        "document" => "Write clear documentation with usage examples.",
        _ => "Complete the task with structured, verifiable output.",
    }
}
