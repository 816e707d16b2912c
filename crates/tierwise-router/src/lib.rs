//! Tierwise routing engine
//!
//! Decides which capability tier should execute a task, binds the concrete
//! resource for that tier, and escalates on repeated failure.
//!
//! ```no_run
//! use tierwise_router::{ResourceTable, Router, RoutingConfig, Tier};
//!
//! let resources = ResourceTable::new()
//!     .with(Tier::Low, "claude-haiku-4-5")
//!     .with(Tier::Medium, "claude-sonnet-4-5")
//!     .with(Tier::High, "claude-opus-4-5");
//! let router = Router::new(RoutingConfig::default(), resources)?;
//!
//! let decision = router.route("Find all .ts files in src/", "explore");
//! assert_eq!(decision.tier, Tier::Low);
//! # Ok::<(), tierwise_router::RoutingError>(())
//! ```

pub mod config;
pub mod error;
pub mod escalation;
pub mod explain;
pub mod prompts;
pub mod router;
pub mod rules;
pub mod scorer;
pub mod selector;
pub mod signals;
pub mod types;

pub use config::{
    AgentPolicy, ConfidenceSettings, EscalationSettings, KeywordTables, LengthThresholds,
    RoutingConfig, ScoringWeights, TierBoundaries,
};
pub use error::{RoutingError, RoutingResult};
pub use escalation::{can_escalate, EscalationPolicy};
pub use explain::explain_decision;
pub use prompts::{
    adapt_prompt, condense, create_delegation_prompt, prompt_prefix, task_instructions,
    DelegationContext,
};
pub use router::Router;
pub use rules::{AgentPolicyTable, Classification, TierClassifier};
pub use scorer::ComplexityScorer;
pub use selector::{ResourceTable, TierResources};
pub use signals::{SignalExtractor, Signals};
pub use types::*;
