//! Signal-to-profile derivation.
//!
//! Produces a [`ProvisionalProfile`]: every attribute except the color role and
//! compatibility weight, which the compatibility finishing stage fills in.

mod attributes;
mod confidence;
mod thermal;

pub use thermal::{seasonality, temp_range};

use super::color::ColorSample;
use super::domain::{
    ConfidenceBand, GarmentProfile, ProfileDiagnostics, ThermalLevel,
};
use super::signals::SignalScores;

/// A derived profile awaiting color role and compatibility weight.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisionalProfile(GarmentProfile);

impl ProvisionalProfile {
    pub(crate) fn into_inner(self) -> GarmentProfile {
        self.0
    }
}

/// Derive every signal-backed attribute. Absent or weak signals fall back to defaults.
pub fn derive_provisional(signals: &SignalScores, color: &ColorSample) -> ProvisionalProfile {
    let primary_category = attributes::category(&signals.category_scores);
    let sleeve_length = attributes::sleeve_length(&signals.sleeve_scores);
    let sub_type = attributes::sub_type(&signals.subtype_scores);
    let layering_role =
        attributes::layering_role(&signals.category_scores, &signals.weight_scores);

    let insulation_score =
        thermal::insulation(&signals.weight_scores, sleeve_length, layering_role);
    let breathability_score =
        thermal::breathability(&signals.weight_scores, sleeve_length, layering_role);
    let weather_protection_score =
        thermal::weather_protection(&signals.weather_scores, layering_role);

    let temp_range = thermal::temp_range(
        insulation_score,
        breathability_score,
        layering_role,
        primary_category,
    );

    let confidence_score = confidence::profile_confidence(
        signals.detection_confidence,
        primary_category,
        temp_range,
        layering_role,
        weather_protection_score,
    );
    let confidence_band = ConfidenceBand::from_score(confidence_score);

    ProvisionalProfile(GarmentProfile {
        primary_category,
        sub_type,
        layering_role,
        thermal_level: ThermalLevel::from_insulation(insulation_score),
        insulation_score,
        breathability_score,
        weather_protection_score,
        temp_range,
        seasonality: thermal::seasonality(temp_range),
        formality_level: attributes::formality(&signals.formality_scores, sub_type),
        rain_safe: attributes::rain_safety(
            &signals.weather_scores,
            layering_role,
            weather_protection_score,
        ),
        wind_resistance: attributes::wind_resistance(layering_role, weather_protection_score),
        color_family: color.color_family,
        coverage_level: attributes::coverage(sleeve_length, layering_role),
        sleeve_length,
        confidence_score,
        confidence_band,
        needs_review: confidence_band.needs_review(),
        diagnostics: ProfileDiagnostics {
            primary_rgb: Some(color.primary_rgb),
            ..ProfileDiagnostics::default()
        },
        ..GarmentProfile::default()
    })
}
