//! Consistency audit for derived profiles.
//!
//! Validation never fails: every finding becomes a [`ValidationFlag`] that lowers the
//! profile's confidence. Flags already recorded in the profile's diagnostics are not
//! charged again, so re-validating a validated profile is a no-op.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::compatibility::color_role;
use super::domain::{
    round_to, ConfidenceBand, CoverageLevel, FlagSeverity, GarmentProfile, LayeringRole,
    PrimaryCategory, RainSafety, Season, SleeveLength, ThermalLevel, ValidationCheck,
    ValidationFlag, WindResistance,
};

/// Result of auditing one profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub validated: GarmentProfile,
    pub flags: Vec<ValidationFlag>,
    /// Penalty charged by this pass, rounded to 2 decimals.
    pub confidence_adjustment: f64,
}

pub fn validate(profile: &GarmentProfile) -> ValidationOutcome {
    let mut flags = schema_flags(profile);
    flags.extend(consistency_flags(profile));
    flags.extend(temperature_range_flags(profile));
    flags.extend(score_bound_flags(profile));

    let recorded = &profile.diagnostics.validation_flags;
    let penalty: f64 = flags
        .iter()
        .filter(|flag| !recorded.contains(flag))
        .map(ValidationFlag::penalty)
        .sum();
    let penalty = round_to(penalty, 2);

    let mut validated = profile.clone();
    let adjusted = round_to((profile.confidence_score - penalty).max(0.0), 2);
    validated.rebase_confidence(adjusted);
    validated.diagnostics.validation_flags = flags.clone();
    validated.diagnostics.confidence_adjustment =
        round_to(profile.diagnostics.confidence_adjustment + penalty, 2);

    ValidationOutcome {
        validated,
        flags,
        confidence_adjustment: penalty,
    }
}

/// Invariants the type system cannot express on its own.
fn schema_flags(profile: &GarmentProfile) -> Vec<ValidationFlag> {
    let flag = |message: String| ValidationFlag::new(ValidationCheck::Schema, FlagSeverity::Warning, message);
    let mut flags = Vec::new();

    if profile.seasonality.is_empty() {
        flags.push(flag("Seasonality is empty".to_string()));
    }
    let mut seen = HashSet::new();
    for season in &profile.seasonality {
        if !seen.insert(*season) {
            flags.push(flag(format!("Duplicate season: {}", season.label())));
        }
    }
    if seen.contains(&Season::All) && seen.len() > 1 {
        flags.push(flag("Season All combined with specific seasons".to_string()));
    }

    if profile.color_role != color_role(profile.color_family) {
        flags.push(flag(format!(
            "Color role does not match color family {}",
            profile.color_family.label()
        )));
    }

    let canonical_band = ConfidenceBand::from_score(profile.confidence_score);
    if !(0.0..=1.0).contains(&profile.confidence_score) {
        flags.push(flag(format!(
            "Confidence score out of range: {}",
            profile.confidence_score
        )));
    } else if profile.confidence_band != canonical_band
        || profile.needs_review != canonical_band.needs_review()
    {
        flags.push(flag(format!(
            "Confidence band {} does not match score {}",
            profile.confidence_band.label(),
            profile.confidence_score
        )));
    }

    if !(0.0..=1.0).contains(&profile.compatibility_weight) {
        flags.push(flag(format!(
            "Compatibility weight out of range: {}",
            profile.compatibility_weight
        )));
    }

    flags
}

fn consistency_flags(profile: &GarmentProfile) -> Vec<ValidationFlag> {
    use FlagSeverity::{Critical, Info, Warning};

    let insulation = profile.insulation_score;
    let breathability = profile.breathability_score;
    let protection = profile.weather_protection_score;
    let outer = profile.layering_role == LayeringRole::Outer;
    let range = profile.temp_range;

    let rules: [(bool, FlagSeverity, &str); 18] = [
        (
            insulation >= 70.0 && profile.sleeve_length == SleeveLength::Sleeveless,
            Critical,
            "High insulation on a sleeveless design",
        ),
        (
            insulation <= 30.0 && profile.sleeve_length == SleeveLength::Long,
            Warning,
            "Low insulation with long sleeves is unusual",
        ),
        (
            outer && protection < 30.0,
            Warning,
            "Outer layer with low weather protection",
        ),
        (
            outer && profile.wind_resistance == WindResistance::Low,
            Info,
            "Outer layer with low wind resistance",
        ),
        (
            !outer && protection > 60.0,
            Warning,
            "High weather protection on a non-outer layer",
        ),
        (
            profile.thermal_level == ThermalLevel::High && insulation < 60.0,
            Warning,
            "High thermal level with a low insulation score",
        ),
        (
            profile.thermal_level == ThermalLevel::Low && insulation > 50.0,
            Warning,
            "Low thermal level with a high insulation score",
        ),
        (
            profile.rain_safe == RainSafety::True && protection < 50.0,
            Warning,
            "Marked rain-safe with low weather protection",
        ),
        (
            profile.rain_safe == RainSafety::False && protection > 60.0,
            Warning,
            "Marked not rain-safe with high weather protection",
        ),
        (
            profile.rain_safe == RainSafety::True && !outer,
            Warning,
            "Rain-safe marking on a non-outer layer",
        ),
        (
            range.min < 0
                && profile.primary_category != PrimaryCategory::Outerwear
                && insulation < 70.0,
            Critical,
            "Sub-zero rating without outerwear or high insulation",
        ),
        (
            profile.seasonality.contains(&Season::Winter) && range.min > 15,
            Warning,
            "Winter season with a warm minimum temperature",
        ),
        (
            profile.seasonality.contains(&Season::Summer) && range.max < 20,
            Warning,
            "Summer season with a cool maximum temperature",
        ),
        (
            profile.primary_category == PrimaryCategory::Outerwear
                && profile.coverage_level == CoverageLevel::Minimal,
            Warning,
            "Outerwear with minimal coverage",
        ),
        (
            profile.coverage_level == CoverageLevel::Full
                && profile.sleeve_length != SleeveLength::Long,
            Info,
            "Full coverage without long sleeves",
        ),
        (
            profile.sleeve_length == SleeveLength::Sleeveless
                && profile.coverage_level != CoverageLevel::Minimal,
            Info,
            "Sleeveless design without minimal coverage",
        ),
        (
            insulation > 70.0 && breathability > 60.0,
            Warning,
            "High insulation with high breathability is contradictory",
        ),
        (
            insulation < 30.0 && breathability < 40.0,
            Warning,
            "Low insulation with low breathability is unusual",
        ),
    ];

    rules
        .into_iter()
        .filter(|(violated, _, _)| *violated)
        .map(|(_, severity, message)| {
            ValidationFlag::new(ValidationCheck::Consistency, severity, message)
        })
        .collect()
}

fn temperature_range_flags(profile: &GarmentProfile) -> Vec<ValidationFlag> {
    let flag = |severity, message: String| {
        ValidationFlag::new(ValidationCheck::TemperatureRange, severity, message)
    };
    let (min, max) = (profile.temp_range.min, profile.temp_range.max);
    let mut flags = Vec::new();

    if min > max {
        flags.push(flag(
            FlagSeverity::Critical,
            format!("Invalid temp range: min ({min}) > max ({max})"),
        ));
    }
    if max - min < 5 {
        flags.push(flag(
            FlagSeverity::Warning,
            format!("Suspiciously narrow temp range: {min}-{max}°C"),
        ));
    }
    if max - min > 30 {
        flags.push(flag(
            FlagSeverity::Info,
            format!("Very broad temp range: {min}-{max}°C"),
        ));
    }
    if min < -30 || max > 50 {
        flags.push(flag(
            FlagSeverity::Critical,
            format!("Extreme temperature values: {min}-{max}°C"),
        ));
    }

    flags
}

fn score_bound_flags(profile: &GarmentProfile) -> Vec<ValidationFlag> {
    [
        ("Insulation", profile.insulation_score),
        ("Breathability", profile.breathability_score),
        ("Weather protection", profile.weather_protection_score),
    ]
    .into_iter()
    .filter(|(_, score)| !(0.0..=100.0).contains(score))
    .map(|(name, score)| {
        ValidationFlag::new(
            ValidationCheck::ScoreBounds,
            FlagSeverity::Critical,
            format!("{name} score out of range: {score}"),
        )
    })
    .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReviewStatus {
    Pass,
    Review,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContinuousScores {
    pub insulation: f64,
    pub breathability: f64,
    pub weather_protection: f64,
}

/// Review summary of a stored profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub confidence_score: f64,
    pub confidence_band: ConfidenceBand,
    pub needs_review: bool,
    pub validation_flags: Vec<String>,
    pub primary_category: PrimaryCategory,
    pub status: ReviewStatus,
    pub continuous_scores: ContinuousScores,
}

impl ValidationReport {
    pub fn from_profile(profile: &GarmentProfile) -> Self {
        Self {
            confidence_score: profile.confidence_score,
            confidence_band: profile.confidence_band,
            needs_review: profile.needs_review,
            validation_flags: profile
                .diagnostics
                .validation_flags
                .iter()
                .map(ToString::to_string)
                .collect(),
            primary_category: profile.primary_category,
            status: if profile.needs_review {
                ReviewStatus::Review
            } else {
                ReviewStatus::Pass
            },
            continuous_scores: ContinuousScores {
                insulation: profile.insulation_score,
                breathability: profile.breathability_score,
                weather_protection: profile.weather_protection_score,
            },
        }
    }
}
