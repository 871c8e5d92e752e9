//! Decoder tunables: a plain struct with a `Default` impl, constructed
//! independently of any I/O so it embeds into a larger application config.

use crate::model::Length;

/// Weights for the four scorer sub-scores. Must sum to `1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub fow: f64,
    pub frc: f64,
    pub geographic: f64,
    pub bearing: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            fow: 0.25,
            frc: 0.25,
            geographic: 0.25,
            bearing: 0.25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecoderConfig {
    /// Search radius for candidate enumeration, in meters.
    pub search_radius: Length,
    /// Distance tolerance `ε` for the admissible length window.
    pub distance_tolerance: f64,
    /// Absolute slack `τ` added to the upper bound of the length window.
    pub distance_slack: Length,
    /// Distance ahead of a candidate used to probe its forward bearing.
    pub bearing_probe_distance: Length,
    pub score_weights: ScoreWeights,
    /// Candidates scoring strictly below this are rejected outright.
    pub minimum_candidate_score: f64,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            search_radius: Length::from_meters(100.0),
            distance_tolerance: 0.30,
            distance_slack: Length::from_meters(10.0),
            bearing_probe_distance: Length::from_meters(20.0),
            score_weights: ScoreWeights::default(),
            // A literal zero total score is excluded by default, as a
            // zero-geographic-score candidate (outside the search
            // radius) should never have been enumerated in the first
            // place; anything above that is kept.
            minimum_candidate_score: f64::EPSILON,
        }
    }
}

impl DecoderConfig {
    /// The admissible `[min, max]` route length window for a target
    /// distance `d`.
    pub fn distance_window(&self, d: Length) -> (Length, Length) {
        let lower = Length::from_meters(d.meters() * (1.0 - self.distance_tolerance));
        let upper = Length::from_meters(d.meters() * (1.0 + self.distance_tolerance) + self.distance_slack.meters());
        (lower, upper)
    }
}
