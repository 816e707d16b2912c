use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::{KeywordTables, LengthThresholds};
use crate::error::{RoutingError, RoutingResult};
use crate::types::LengthBucket;

lazy_static! {
    // File path detection patterns
    static ref FILE_PATH_PATTERN: Regex =
        Regex::new(r"(?m)(?:^|\s)[./~]?(?:[\w-]+/)+[\w.-]+\.\w+").unwrap();
    static ref FILE_IN_BACKTICKS: Regex = Regex::new(r"`[^`\s]+\.\w+`").unwrap();
}

/// Inflections accepted after a keyword, so `migration` also matches
/// `migrations` and `refactor` matches `refactoring`.
const SUFFIXES: &str = "(?:s|es|d|ed|ing)?";

/// Features extracted from a prompt and agent label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signals {
    /// Agent label exactly as supplied
    pub agent: String,
    pub word_count: usize,
    pub length: LengthBucket,
    pub file_path_count: usize,
    pub risk_terms: Vec<String>,
    pub hard_override_terms: Vec<String>,
    pub simplicity_terms: Vec<String>,
    pub domain_terms: Vec<String>,
    pub documentation_only: bool,
    /// Prompt was empty or whitespace only
    pub trivial: bool,
}

impl Signals {
    fn trivial(agent: &str) -> Self {
        Self {
            agent: agent.to_string(),
            word_count: 0,
            length: LengthBucket::Short,
            file_path_count: 0,
            risk_terms: Vec::new(),
            hard_override_terms: Vec::new(),
            simplicity_terms: Vec::new(),
            domain_terms: Vec::new(),
            documentation_only: false,
            trivial: true,
        }
    }

    pub fn risk_count(&self) -> usize {
        self.risk_terms.len()
    }

    pub fn simplicity_count(&self) -> usize {
        self.simplicity_terms.len()
    }

    pub fn domain_count(&self) -> usize {
        self.domain_terms.len()
    }

    pub fn has_hard_override(&self) -> bool {
        !self.hard_override_terms.is_empty()
    }

    pub fn is_cross_file(&self) -> bool {
        self.file_path_count >= 2
    }
}

/// One keyword category compiled to word-boundary matchers.
#[derive(Debug, Clone)]
struct KeywordSet {
    terms: Vec<(String, Regex)>,
}

impl KeywordSet {
    fn compile(category: &'static str, terms: &[String]) -> RoutingResult<Self> {
        let mut compiled: Vec<(String, Regex)> = Vec::with_capacity(terms.len());

        for raw in terms {
            let term = raw.trim().to_lowercase();
            if term.is_empty() {
                return Err(RoutingError::EmptyKeyword { category });
            }
            if compiled.iter().any(|(existing, _)| *existing == term) {
                continue;
            }

            let body = term
                .split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+");
            let pattern = format!(r"(?i)\b{body}{SUFFIXES}\b");
            let regex = Regex::new(&pattern).map_err(|e| RoutingError::InvalidKeyword {
                category,
                term: raw.clone(),
                reason: e.to_string(),
            })?;

            compiled.push((term, regex));
        }

        Ok(Self { terms: compiled })
    }

    /// Distinct matched terms, in table order.
    fn matches(&self, text: &str) -> Vec<String> {
        self.terms
            .iter()
            .filter(|(_, regex)| regex.is_match(text))
            .map(|(term, _)| term.clone())
            .collect()
    }

    fn any_match(&self, text: &str) -> bool {
        self.terms.iter().any(|(_, regex)| regex.is_match(text))
    }
}

/// Turns prompt text and an agent label into [`Signals`].
#[derive(Debug, Clone)]
pub struct SignalExtractor {
    risk: KeywordSet,
    hard_override: KeywordSet,
    simplicity: KeywordSet,
    domain: KeywordSet,
    documentation: KeywordSet,
    code_change: KeywordSet,
    length: LengthThresholds,
}

impl SignalExtractor {
    pub fn new(keywords: &KeywordTables, length: LengthThresholds) -> RoutingResult<Self> {
        Ok(Self {
            risk: KeywordSet::compile("risk", &keywords.risk)?,
            hard_override: KeywordSet::compile("hard_override", &keywords.hard_override)?,
            simplicity: KeywordSet::compile("simplicity", &keywords.simplicity)?,
            domain: KeywordSet::compile("domain", &keywords.domain)?,
            documentation: KeywordSet::compile("documentation", &keywords.documentation)?,
            code_change: KeywordSet::compile("code_change", &keywords.code_change)?,
            length,
        })
    }

    pub fn extract(&self, prompt: &str, agent: &str) -> Signals {
        if prompt.trim().is_empty() {
            return Signals::trivial(agent);
        }

        let word_count = prompt.split_whitespace().count();
        let documentation_only =
            self.documentation.any_match(prompt) && !self.code_change.any_match(prompt);

        let signals = Signals {
            agent: agent.to_string(),
            word_count,
            length: self.length_bucket(word_count),
            file_path_count: count_file_paths(prompt),
            risk_terms: self.risk.matches(prompt),
            hard_override_terms: self.hard_override.matches(prompt),
            simplicity_terms: self.simplicity.matches(prompt),
            domain_terms: self.domain.matches(prompt),
            documentation_only,
            trivial: false,
        };

        tracing::trace!(
            agent,
            words = signals.word_count,
            risk = signals.risk_count(),
            simplicity = signals.simplicity_count(),
            domain = signals.domain_count(),
            "signals extracted"
        );

        signals
    }

    fn length_bucket(&self, word_count: usize) -> LengthBucket {
        if word_count <= self.length.short_max_words {
            LengthBucket::Short
        } else if word_count >= self.length.long_min_words {
            LengthBucket::Long
        } else {
            LengthBucket::Medium
        }
    }
}

fn count_file_paths(prompt: &str) -> usize {
    let count = FILE_PATH_PATTERN
        .find_iter(prompt)
        .count()
        .saturating_add(FILE_IN_BACKTICKS.find_iter(prompt).count());
    count.min(20)
}
