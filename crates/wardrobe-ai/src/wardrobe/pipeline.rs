//! Raw signals to validated profile, as one strictly downward pipeline.

use super::color::ColorSample;
use super::compatibility::finish;
use super::derivation::derive_provisional;
use super::domain::GarmentProfile;
use super::signals::SignalScores;
use super::validation::{validate, ValidationOutcome};

/// Derive a complete profile: provisional attributes, then color role and compatibility.
pub fn derive(signals: &SignalScores, color: &ColorSample) -> GarmentProfile {
    finish(derive_provisional(signals, color))
}

pub fn derive_and_validate(signals: &SignalScores, color: &ColorSample) -> ValidationOutcome {
    let profile = derive(signals, color);
    let outcome = validate(&profile);
    tracing::debug!(
        category = outcome.validated.primary_category.label(),
        flags = outcome.flags.len(),
        adjustment = outcome.confidence_adjustment,
        confidence = outcome.validated.confidence_score,
        "derived garment profile"
    );
    outcome
}
