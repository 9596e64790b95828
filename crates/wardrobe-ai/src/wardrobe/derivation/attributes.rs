//! Categorical attributes read straight off the signal groups.

use crate::wardrobe::domain::{
    CoverageLevel, FormalityLevel, LayeringRole, PrimaryCategory, RainSafety, SleeveLength,
    SubType, WindResistance,
};
use crate::wardrobe::signals::{
    best_score, confident_label, CategoryLabel, FormalityLabel, SignalMap, SleeveLabel,
    SubtypeLabel, WeatherLabel, WeightLabel,
};

pub(super) const CATEGORY_FLOOR: f64 = 0.22;
pub(super) const SLEEVE_FLOOR: f64 = 0.20;
pub(super) const SUBTYPE_FLOOR: f64 = 0.20;
pub(super) const FORMALITY_FLOOR: f64 = 0.18;
const FORMALITY_RECHECK_FLOOR: f64 = 0.22;

pub(super) fn category(scores: &SignalMap) -> PrimaryCategory {
    confident_label::<CategoryLabel>(scores, CATEGORY_FLOOR)
        .flatten()
        .map(CategoryLabel::category)
        .unwrap_or(PrimaryCategory::Unknown)
}

pub(super) fn sleeve_length(scores: &SignalMap) -> SleeveLength {
    if scores.is_empty() {
        return SleeveLength::Unknown;
    }

    let sleeveless = best_score::<SleeveLabel>(scores, |l| l == SleeveLabel::Sleeveless);
    let short = best_score::<SleeveLabel>(scores, |l| l == SleeveLabel::ShortSleeves);
    let long = best_score::<SleeveLabel>(scores, |l| l == SleeveLabel::LongSleeves);
    let top = sleeveless.max(short).max(long);

    if top < SLEEVE_FLOOR {
        SleeveLength::Unknown
    } else if sleeveless == top {
        SleeveLength::Sleeveless
    } else if short == top {
        SleeveLength::Short
    } else {
        SleeveLength::Long
    }
}

pub(super) fn sub_type(scores: &SignalMap) -> SubType {
    confident_label::<SubtypeLabel>(scores, SUBTYPE_FLOOR)
        .flatten()
        .map(SubtypeLabel::sub_type)
        .unwrap_or(SubType::Unknown)
}

pub(super) fn layering_role(category_scores: &SignalMap, weight_scores: &SignalMap) -> LayeringRole {
    if best_score::<CategoryLabel>(category_scores, |l| l == CategoryLabel::Outerwear) > 0.25 {
        LayeringRole::Outer
    } else if best_score::<WeightLabel>(weight_scores, |l| l == WeightLabel::Heavyweight) > 0.28 {
        LayeringRole::Mid
    } else {
        LayeringRole::Base
    }
}

pub(super) fn formality(scores: &SignalMap, sub_type: SubType) -> FormalityLevel {
    let Some(label) = confident_label::<FormalityLabel>(scores, FORMALITY_FLOOR) else {
        return FormalityLevel::Casual;
    };

    match label {
        Some(label) if label.is_formal() => return FormalityLevel::Formal,
        Some(FormalityLabel::SmartCasual) => return FormalityLevel::SmartCasual,
        _ => {}
    }

    let casual_leaning = matches!(
        sub_type,
        SubType::Hoodie | SubType::Sweatshirt | SubType::Tshirt | SubType::Tank
    );
    if !casual_leaning {
        return FormalityLevel::Casual;
    }

    let formal = best_score::<FormalityLabel>(scores, FormalityLabel::is_formal);
    let smart_casual = best_score::<FormalityLabel>(scores, |l| l == FormalityLabel::SmartCasual);
    if formal <= FORMALITY_RECHECK_FLOOR && smart_casual <= FORMALITY_RECHECK_FLOOR {
        FormalityLevel::Casual
    } else if formal > smart_casual {
        FormalityLevel::Formal
    } else {
        FormalityLevel::SmartCasual
    }
}

pub(super) fn rain_safety(
    weather_scores: &SignalMap,
    layering: LayeringRole,
    weather_protection: f64,
) -> RainSafety {
    if layering != LayeringRole::Outer || weather_protection <= 30.0 {
        return RainSafety::False;
    }
    if weather_protection >= 60.0 {
        return RainSafety::True;
    }

    if best_score::<WeatherLabel>(weather_scores, |l| l == WeatherLabel::Waterproof) > 0.32 {
        RainSafety::True
    } else if best_score::<WeatherLabel>(weather_scores, |l| l == WeatherLabel::RegularFabric) > 0.28 {
        RainSafety::False
    } else {
        RainSafety::Unknown
    }
}

/// Score bands first; the 30..40 gap falls back to the layering role.
pub(super) fn wind_resistance(layering: LayeringRole, weather_protection: f64) -> WindResistance {
    if weather_protection >= 60.0 {
        WindResistance::High
    } else if weather_protection >= 40.0 {
        WindResistance::Medium
    } else if weather_protection < 30.0 {
        WindResistance::Low
    } else {
        match layering {
            LayeringRole::Outer | LayeringRole::Mid => WindResistance::Medium,
            LayeringRole::Base => WindResistance::Low,
        }
    }
}

pub(super) fn coverage(sleeve: SleeveLength, layering: LayeringRole) -> CoverageLevel {
    match (sleeve, layering) {
        (SleeveLength::Sleeveless, _) => CoverageLevel::Minimal,
        (SleeveLength::Long, LayeringRole::Outer) => CoverageLevel::Full,
        _ => CoverageLevel::Moderate,
    }
}
