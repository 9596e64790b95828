//! Color and formality legality rules plus the finishing stage that turns a provisional
//! profile into a complete one.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::derivation::ProvisionalProfile;
use super::domain::{
    round_to, ColorFamily, ColorRole, ConfidenceBand, FormalityLevel, GarmentProfile,
    PrimaryCategory,
};

/// Dress code requested for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventFormality {
    #[default]
    Casual,
    SmartCasual,
    Formal,
}

impl EventFormality {
    /// Lenient parse; unrecognised dress codes behave as casual.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "formal" => EventFormality::Formal,
            "smart-casual" | "smart casual" | "smart_casual" => EventFormality::SmartCasual,
            _ => EventFormality::Casual,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            EventFormality::Casual => "casual",
            EventFormality::SmartCasual => "smart-casual",
            EventFormality::Formal => "formal",
        }
    }

    /// Garment formality levels that satisfy a non-casual dress code.
    pub fn admits(self, level: FormalityLevel) -> bool {
        match self {
            EventFormality::Casual => true,
            EventFormality::SmartCasual | EventFormality::Formal => {
                matches!(level, FormalityLevel::SmartCasual | FormalityLevel::Formal)
            }
        }
    }
}

impl fmt::Display for EventFormality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn color_role(family: ColorFamily) -> ColorRole {
    match family {
        ColorFamily::Neutral | ColorFamily::Dark => ColorRole::Base,
        ColorFamily::Light | ColorFamily::Earth | ColorFamily::Bright => ColorRole::Accent,
    }
}

/// Discount reflecting the garment's own uncertainty, boosted for reliable outerwear.
pub fn compatibility_weight(profile: &GarmentProfile) -> f64 {
    let mut weight: f64 = match profile.confidence_band {
        ConfidenceBand::High => 1.0,
        ConfidenceBand::Medium => 0.90,
        ConfidenceBand::Low => 0.75,
    };

    if profile.confidence_score < 0.15 {
        weight *= 0.85;
    }
    if profile.needs_review {
        weight *= 0.75;
    }

    if profile.primary_category == PrimaryCategory::Outerwear {
        if profile.insulation_score >= 70.0 {
            weight *= 1.15;
        } else if profile.insulation_score <= 30.0 {
            weight *= 0.85;
        }
        if profile.weather_protection_score >= 60.0 {
            weight *= 1.10;
        } else if profile.weather_protection_score <= 30.0 {
            weight *= 0.90;
        }
    }

    if matches!(profile.color_family, ColorFamily::Neutral | ColorFamily::Dark) {
        weight *= 1.02;
    }
    if profile.primary_category == PrimaryCategory::Bottom
        && profile.color_family == ColorFamily::Bright
    {
        weight *= 0.95;
    }

    round_to(weight.clamp(0.0, 1.0), 3)
}

/// Finishing stage: assign color role, then compatibility weight.
pub fn finish(provisional: ProvisionalProfile) -> GarmentProfile {
    let mut profile = provisional.into_inner();
    profile.color_role = color_role(profile.color_family);
    profile.compatibility_weight = compatibility_weight(&profile);
    profile
}

pub(crate) fn accent_count(pieces: &[&GarmentProfile]) -> usize {
    pieces
        .iter()
        .filter(|piece| piece.color_role == ColorRole::Accent)
        .count()
}

/// At most one accent, and never a bright accent bottom.
pub fn validate_color_rules(pieces: &[&GarmentProfile]) -> bool {
    if pieces.is_empty() || accent_count(pieces) > 1 {
        return false;
    }
    !pieces.iter().any(|piece| {
        piece.color_role == ColorRole::Accent
            && piece.primary_category == PrimaryCategory::Bottom
            && piece.color_family == ColorFamily::Bright
    })
}

/// Pieces stay within one formality step; formal events also require a single color family.
pub fn validate_formality_match(pieces: &[&GarmentProfile], event: EventFormality) -> bool {
    let Some(highest) = pieces.iter().map(|p| p.formality_level.index()).max() else {
        return false;
    };
    let lowest = pieces
        .iter()
        .map(|p| p.formality_level.index())
        .min()
        .unwrap_or(highest);
    if highest - lowest > 1 {
        return false;
    }

    if event == EventFormality::Formal {
        let families: HashSet<ColorFamily> = pieces.iter().map(|p| p.color_family).collect();
        return families.len() <= 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece(category: PrimaryCategory, family: ColorFamily) -> GarmentProfile {
        GarmentProfile {
            primary_category: category,
            color_family: family,
            color_role: color_role(family),
            ..GarmentProfile::default()
        }
    }

    #[test]
    fn event_formality_parses_leniently() {
        assert_eq!(EventFormality::parse("Smart Casual"), EventFormality::SmartCasual);
        assert_eq!(EventFormality::parse("smart_casual"), EventFormality::SmartCasual);
        assert_eq!(EventFormality::parse(" FORMAL "), EventFormality::Formal);
        assert_eq!(EventFormality::parse("black-tie"), EventFormality::Casual);
    }

    #[test]
    fn confident_neutral_piece_is_capped_at_one() {
        let mut profile = piece(PrimaryCategory::Top, ColorFamily::Neutral);
        profile.rebase_confidence(0.8);
        assert_eq!(profile.confidence_band, ConfidenceBand::High);
        assert_eq!(compatibility_weight(&profile), 1.0);
    }

    #[test]
    fn low_confidence_review_piece_is_heavily_discounted() {
        let mut profile = piece(PrimaryCategory::Bottom, ColorFamily::Bright);
        profile.rebase_confidence(0.1);
        // 0.75 * 0.85 * 0.75 * 0.95
        assert_eq!(compatibility_weight(&profile), 0.454);
    }

    #[test]
    fn two_accents_or_bright_bottom_fail_color_rules() {
        let top = piece(PrimaryCategory::Top, ColorFamily::Earth);
        let bottom = piece(PrimaryCategory::Bottom, ColorFamily::Light);
        assert!(!validate_color_rules(&[&top, &bottom]));

        let neutral_top = piece(PrimaryCategory::Top, ColorFamily::Neutral);
        let bright_bottom = piece(PrimaryCategory::Bottom, ColorFamily::Bright);
        assert!(!validate_color_rules(&[&neutral_top, &bright_bottom]));

        let dark_bottom = piece(PrimaryCategory::Bottom, ColorFamily::Dark);
        assert!(validate_color_rules(&[&neutral_top, &dark_bottom]));
        assert!(validate_color_rules(&[&top, &dark_bottom]));
        assert!(!validate_color_rules(&[]));
    }

    #[test]
    fn formality_spread_and_formal_palette_are_enforced() {
        let mut casual = piece(PrimaryCategory::Top, ColorFamily::Neutral);
        casual.formality_level = FormalityLevel::Casual;
        let mut formal = piece(PrimaryCategory::Bottom, ColorFamily::Neutral);
        formal.formality_level = FormalityLevel::Formal;
        assert!(!validate_formality_match(&[&casual, &formal], EventFormality::Casual));

        let mut smart = piece(PrimaryCategory::Top, ColorFamily::Dark);
        smart.formality_level = FormalityLevel::SmartCasual;
        assert!(validate_formality_match(&[&smart, &formal], EventFormality::SmartCasual));
        assert!(!validate_formality_match(&[&smart, &formal], EventFormality::Formal));
        assert!(!validate_formality_match(&[], EventFormality::Casual));
    }
}
