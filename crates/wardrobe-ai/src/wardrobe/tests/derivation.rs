use super::common::*;
use crate::wardrobe::color::ColorSample;
use crate::wardrobe::domain::{
    round_to, ColorFamily, ColorRole, ConfidenceBand, CoverageLevel, FormalityLevel, LayeringRole,
    PrimaryCategory, RainSafety, Season, SleeveLength, SubType, TempRange, ThermalLevel,
    WindResistance,
};
use crate::wardrobe::intake::GarmentSubmission;
use crate::wardrobe::pipeline::derive;
use crate::wardrobe::signals::{
    detection_confidence, prompt_scores, CategoryLabel, ColorLabel, FormalityLabel,
    SignalScores, SleeveLabel, SubtypeLabel, WeightLabel,
};

#[test]
fn lightweight_tee_derives_a_summer_base_layer() {
    let profile = derive(&tee_signals(), &ColorSample::from_rgb([128, 128, 128]));

    assert_eq!(profile.primary_category, PrimaryCategory::Top);
    assert_eq!(profile.sub_type, SubType::Tshirt);
    assert_eq!(profile.layering_role, LayeringRole::Base);
    assert_eq!(profile.sleeve_length, SleeveLength::Short);
    assert_eq!(profile.insulation_score, 12.0);
    assert_eq!(profile.breathability_score, 93.0);
    assert_eq!(profile.weather_protection_score, 20.0);
    assert_eq!(profile.thermal_level, ThermalLevel::Low);
    assert_eq!(profile.temp_range, TempRange { min: 24, max: 45 });
    assert_eq!(profile.seasonality, vec![Season::Summer]);
    assert_eq!(profile.formality_level, FormalityLevel::Casual);
    assert_eq!(profile.rain_safe, RainSafety::False);
    assert_eq!(profile.wind_resistance, WindResistance::Low);
    assert_eq!(profile.coverage_level, CoverageLevel::Moderate);
    assert_eq!(profile.color_family, ColorFamily::Neutral);
    assert_eq!(profile.color_role, ColorRole::Base);
    assert_eq!(profile.compatibility_weight, 1.0);
    assert_eq!(profile.confidence_score, 0.8);
    assert_eq!(profile.confidence_band, ConfidenceBand::High);
    assert!(!profile.needs_review);
    assert_eq!(profile.diagnostics.primary_rgb, Some([128, 128, 128]));
}

#[test]
fn heavy_shell_derives_rain_safe_outerwear() {
    let profile = derive(&puffer_signals(), &ColorSample::from_rgb([15, 15, 15]));

    assert_eq!(profile.primary_category, PrimaryCategory::Outerwear);
    assert_eq!(profile.layering_role, LayeringRole::Outer);
    assert_eq!(profile.insulation_score, 100.0);
    assert_eq!(profile.breathability_score, 10.0);
    assert_eq!(profile.weather_protection_score, 90.0);
    assert_eq!(profile.temp_range, TempRange { min: -15, max: 10 });
    assert_eq!(
        profile.seasonality,
        vec![Season::Winter, Season::Spring, Season::Fall]
    );
    assert_eq!(profile.rain_safe, RainSafety::True);
    assert_eq!(profile.wind_resistance, WindResistance::High);
    assert_eq!(profile.coverage_level, CoverageLevel::Full);
    assert_eq!(profile.color_family, ColorFamily::Dark);
    assert_eq!(profile.confidence_score, 0.9);
}

#[test]
fn trousers_without_sleeve_signals_stay_moderate() {
    let profile = derive(&jeans_signals(), &ColorSample::from_rgb([20, 24, 40]));

    assert_eq!(profile.primary_category, PrimaryCategory::Bottom);
    assert_eq!(profile.sub_type, SubType::Unknown);
    assert_eq!(profile.sleeve_length, SleeveLength::Unknown);
    assert_eq!(profile.insulation_score, 55.0);
    assert_eq!(profile.temp_range, TempRange { min: 11, max: 30 });
    assert_eq!(
        profile.seasonality,
        vec![Season::Spring, Season::Fall, Season::Summer]
    );
    assert_eq!(profile.color_family, ColorFamily::Dark);
}

#[test]
fn empty_signals_fall_back_to_defaults() {
    let submission = GarmentSubmission::default();
    let profile = derive(&submission.signals, &submission.color_sample());

    assert_eq!(profile.primary_category, PrimaryCategory::Unknown);
    assert_eq!(profile.sub_type, SubType::Unknown);
    assert_eq!(profile.sleeve_length, SleeveLength::Unknown);
    assert_eq!(profile.insulation_score, 50.0);
    assert_eq!(profile.breathability_score, 60.0);
    assert_eq!(profile.temp_range, TempRange { min: 10, max: 30 });
    assert_eq!(profile.color_family, ColorFamily::Neutral);
    assert_eq!(profile.confidence_score, 0.0);
    assert_eq!(profile.confidence_band, ConfidenceBand::Low);
    assert!(profile.needs_review);
}

#[test]
fn category_below_floor_is_unknown_and_halves_confidence() {
    let signals = SignalScores {
        category_scores: prompt_scores([(CategoryLabel::UpperBody, 0.21)]),
        detection_confidence: 0.6,
        ..SignalScores::default()
    };
    let profile = derive(&signals, &ColorSample::default());

    assert_eq!(profile.primary_category, PrimaryCategory::Unknown);
    assert_eq!(profile.confidence_score, 0.3);
    assert_eq!(profile.confidence_band, ConfidenceBand::Medium);
}

#[test]
fn missing_color_reading_uses_color_signals() {
    let submission = GarmentSubmission {
        label: Some("scarf".to_string()),
        signals: SignalScores {
            color_scores: prompt_scores([(ColorLabel::Bright, 0.30), (ColorLabel::Dark, 0.10)]),
            ..SignalScores::default()
        },
        color: None,
    };

    let color = submission.color_sample();
    assert_eq!(color.color_family, ColorFamily::Bright);
    assert_eq!(color.primary_rgb, [128, 128, 128]);
}

#[test]
fn casual_hoodie_with_smart_evidence_is_upgraded() {
    let signals = SignalScores {
        subtype_scores: prompt_scores([(SubtypeLabel::Hoodie, 0.31)]),
        formality_scores: prompt_scores([
            (FormalityLabel::Casual, 0.30),
            (FormalityLabel::SmartCasual, 0.25),
            (FormalityLabel::Formal, 0.12),
        ]),
        ..SignalScores::default()
    };
    let profile = derive(&signals, &ColorSample::default());

    assert_eq!(profile.sub_type, SubType::Hoodie);
    assert_eq!(profile.formality_level, FormalityLevel::SmartCasual);
}

#[test]
fn detection_confidence_rewards_clear_winners() {
    let signals = tee_signals();
    let confidence = detection_confidence(
        &signals.category_scores,
        &signals.weight_scores,
        &signals.formality_scores,
    );
    assert_eq!(confidence, 0.858);

    let missing = detection_confidence(
        &signals.category_scores,
        &Default::default(),
        &signals.formality_scores,
    );
    assert_eq!(missing, 0.0);
}

#[test]
fn category_floor_is_inclusive() {
    let cases = [
        (0.22, PrimaryCategory::Top),
        (0.2201, PrimaryCategory::Top),
        (0.2199, PrimaryCategory::Unknown),
    ];

    for (score, expected) in cases {
        let signals = SignalScores {
            category_scores: prompt_scores([(CategoryLabel::UpperBody, score)]),
            ..SignalScores::default()
        };
        let profile = derive(&signals, &ColorSample::default());
        assert_eq!(profile.primary_category, expected, "category score {score}");
    }
}

#[test]
fn sleeve_ties_resolve_in_evaluation_order() {
    let cases = [
        ((0.30, 0.30, 0.30), SleeveLength::Sleeveless),
        ((0.10, 0.20, 0.20), SleeveLength::Short),
        ((0.10, 0.15, 0.20), SleeveLength::Long),
        ((0.10, 0.1999, 0.1999), SleeveLength::Unknown),
    ];

    for ((sleeveless, short, long), expected) in cases {
        let signals = SignalScores {
            sleeve_scores: prompt_scores([
                (SleeveLabel::Sleeveless, sleeveless),
                (SleeveLabel::ShortSleeves, short),
                (SleeveLabel::LongSleeves, long),
            ]),
            ..SignalScores::default()
        };
        let profile = derive(&signals, &ColorSample::default());
        assert_eq!(
            profile.sleeve_length, expected,
            "sleeve scores {sleeveless}/{short}/{long}"
        );
    }
}

#[test]
fn layering_thresholds_are_strict() {
    let cases = [
        (0.25, 0.0, LayeringRole::Base),
        (0.2501, 0.0, LayeringRole::Outer),
        (0.0, 0.28, LayeringRole::Base),
        (0.0, 0.2801, LayeringRole::Mid),
    ];

    for (outerwear, heavy, expected) in cases {
        let signals = SignalScores {
            category_scores: prompt_scores([(CategoryLabel::Outerwear, outerwear)]),
            weight_scores: prompt_scores([(WeightLabel::Heavyweight, heavy)]),
            ..SignalScores::default()
        };
        let profile = derive(&signals, &ColorSample::default());
        assert_eq!(
            profile.layering_role, expected,
            "outerwear {outerwear}, heavy {heavy}"
        );
    }
}

#[test]
fn weight_steps_apply_above_each_threshold() {
    // Heavy above 0.28 also promotes the layer to Mid (+8).
    let cases = [
        (WeightLabel::Heavyweight, 0.22, 50.0),
        (WeightLabel::Heavyweight, 0.2201, 70.0),
        (WeightLabel::Heavyweight, 0.28, 70.0),
        (WeightLabel::Heavyweight, 0.2801, 88.0),
        (WeightLabel::Lightweight, 0.22, 50.0),
        (WeightLabel::Lightweight, 0.2201, 30.0),
        (WeightLabel::Lightweight, 0.28, 30.0),
        (WeightLabel::Lightweight, 0.2801, 20.0),
    ];

    for (label, score, expected) in cases {
        let signals = SignalScores {
            weight_scores: prompt_scores([(label, score)]),
            ..SignalScores::default()
        };
        let profile = derive(&signals, &ColorSample::default());
        assert_eq!(profile.insulation_score, expected, "{label:?} at {score}");
    }
}

#[test]
fn rounding_sends_ties_to_even() {
    assert_eq!(round_to(0.125, 2), 0.12);
    assert_eq!(round_to(0.375, 2), 0.38);
    assert_eq!(round_to(2.5, 0), 2.0);
    assert_eq!(round_to(0.6381, 3), 0.638);
}
