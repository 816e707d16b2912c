use crate::config::{ScoringWeights, TierBoundaries};
use crate::signals::Signals;
use crate::types::Tier;

const SCORE_MIN: f64 = 0.0;
const SCORE_MAX: f64 = 1.0;

/// Distance from a boundary at which confidence stops growing.
const CONFIDENCE_SPAN: f64 = 0.2;

/// Scores are rounded to `1 / SCORE_SCALE` so weighted sums that land on a
/// boundary compare equal to it.
const SCORE_SCALE: f64 = 1e9;

/// Reduces [`Signals`] to a complexity score in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct ComplexityScorer {
    weights: ScoringWeights,
    boundaries: TierBoundaries,
}

impl ComplexityScorer {
    pub fn new(weights: ScoringWeights, boundaries: TierBoundaries) -> Self {
        Self {
            weights,
            boundaries,
        }
    }

    pub fn boundaries(&self) -> TierBoundaries {
        self.boundaries
    }

    pub fn score(&self, signals: &Signals) -> f64 {
        let raw = self.raw_score(signals);
        let clamped = quantize(raw).clamp(SCORE_MIN, SCORE_MAX);

        // A single dangerous term dominates an otherwise ordinary task.
        if signals.has_hard_override() {
            return clamped.max(self.boundaries.medium_high);
        }

        clamped
    }

    /// Weighted sum before clamping and overrides.
    pub fn raw_score(&self, signals: &Signals) -> f64 {
        let w = &self.weights;
        let mut score = 0.0;

        score += w.risk * signals.risk_count() as f64;
        score += w.domain * signals.domain_count() as f64;
        if signals.is_cross_file() {
            score += w.cross_file;
        }
        score += w.length * signals.length.value();
        score -= w.simplicity * signals.simplicity_count() as f64;

        score
    }

    /// Map a score onto a tier.
    ///
    /// A score sitting exactly on a boundary resolves to the lower tier,
    /// unless `risk_wins_ties` is set, in which case it resolves upward.
    pub fn score_to_tier(&self, score: f64, risk_wins_ties: bool) -> Tier {
        let b = self.boundaries;

        if score > b.medium_high || (risk_wins_ties && score == b.medium_high) {
            return Tier::High;
        }
        if score > b.low_medium || (risk_wins_ties && score == b.low_medium) {
            return Tier::Medium;
        }
        Tier::Low
    }

    /// Confidence grows with the distance between the score and the
    /// boundary nearest the chosen tier, from 0.5 on the boundary to 0.9.
    pub fn confidence(&self, score: f64, tier: Tier) -> f64 {
        let b = self.boundaries;

        let distance = match tier {
            Tier::Low => (b.low_medium - score).max(0.0),
            Tier::Medium => (score - b.low_medium)
                .abs()
                .min((b.medium_high - score).abs()),
            Tier::High => (score - b.medium_high).max(0.0),
        };

        let capped = distance.min(CONFIDENCE_SPAN);
        let confidence = 0.5 + (capped / CONFIDENCE_SPAN) * 0.4;
        (confidence * 100.0).round() / 100.0
    }
}

fn quantize(score: f64) -> f64 {
    (score * SCORE_SCALE).round() / SCORE_SCALE
}
