use crate::wardrobe::domain::{round_to, LayeringRole, PrimaryCategory, TempRange};

/// Scale the producer's detection confidence by how coherent the derived profile is.
pub(super) fn profile_confidence(
    detection_confidence: f64,
    category: PrimaryCategory,
    range: TempRange,
    layering: LayeringRole,
    weather_protection: f64,
) -> f64 {
    let mut score = detection_confidence;

    if category == PrimaryCategory::Unknown {
        score *= 0.5;
    }

    let span = range.span();
    if span > 25 {
        score *= 0.85;
    } else if span < 8 {
        score *= 0.90;
    }

    if layering == LayeringRole::Outer && weather_protection < 30.0 {
        score *= 0.95;
    }

    round_to(score.clamp(0.0, 1.0), 2)
}
