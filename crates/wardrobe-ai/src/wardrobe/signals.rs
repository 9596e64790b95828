//! Signal groups produced by the visual classifier and the closed label vocabularies used
//! to interpret them.
//!
//! Raw producer labels are free text; every consumer goes through a label set's
//! `classify` so keyword handling lives in exactly one place per group.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{ColorFamily, PrimaryCategory, SubType};

/// Label to similarity score. Scores roughly span [-1, 1] and need not sum to 1.
pub type SignalMap = BTreeMap<String, f64>;

/// The seven label groups plus the producer's detection confidence for one image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalScores {
    #[serde(default)]
    pub category_scores: SignalMap,
    #[serde(default)]
    pub subtype_scores: SignalMap,
    #[serde(default)]
    pub weight_scores: SignalMap,
    #[serde(default)]
    pub formality_scores: SignalMap,
    #[serde(default)]
    pub sleeve_scores: SignalMap,
    #[serde(default)]
    pub weather_scores: SignalMap,
    #[serde(default)]
    pub color_scores: SignalMap,
    #[serde(default)]
    pub detection_confidence: f64,
}

/// A closed vocabulary for one signal group.
pub trait SignalLabel: Copy + Sized + 'static {
    const ALL: &'static [Self];

    /// Canonical prompt text the producer scores for this variant.
    fn prompt(self) -> &'static str;

    /// Map a raw producer label onto the vocabulary.
    fn classify(raw: &str) -> Option<Self>;
}

fn mentions(raw: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| raw.contains(keyword))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryLabel {
    UpperBody,
    LowerBody,
    Outerwear,
    Footwear,
}

impl CategoryLabel {
    pub const fn category(self) -> PrimaryCategory {
        match self {
            CategoryLabel::UpperBody => PrimaryCategory::Top,
            CategoryLabel::LowerBody => PrimaryCategory::Bottom,
            CategoryLabel::Outerwear => PrimaryCategory::Outerwear,
            CategoryLabel::Footwear => PrimaryCategory::Footwear,
        }
    }
}

impl SignalLabel for CategoryLabel {
    const ALL: &'static [Self] = &[
        CategoryLabel::UpperBody,
        CategoryLabel::LowerBody,
        CategoryLabel::Outerwear,
        CategoryLabel::Footwear,
    ];

    fn prompt(self) -> &'static str {
        match self {
            CategoryLabel::UpperBody => "upper body clothing shirt jacket sweater top",
            CategoryLabel::LowerBody => "lower body clothing pants jeans shorts skirt",
            CategoryLabel::Outerwear => "heavy jacket coat outerwear layering piece",
            CategoryLabel::Footwear => "footwear shoes boots sneakers",
        }
    }

    fn classify(raw: &str) -> Option<Self> {
        let raw = raw.to_ascii_lowercase();
        if raw.contains("upper body") {
            Some(CategoryLabel::UpperBody)
        } else if raw.contains("lower body") {
            Some(CategoryLabel::LowerBody)
        } else if mentions(&raw, &["outerwear", "heavy jacket"]) {
            Some(CategoryLabel::Outerwear)
        } else if raw.contains("footwear") {
            Some(CategoryLabel::Footwear)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubtypeLabel {
    Hoodie,
    Sweatshirt,
    TShirt,
    DressShirt,
    TankTop,
}

impl SubtypeLabel {
    pub const fn sub_type(self) -> SubType {
        match self {
            SubtypeLabel::Hoodie => SubType::Hoodie,
            SubtypeLabel::Sweatshirt => SubType::Sweatshirt,
            SubtypeLabel::TShirt => SubType::Tshirt,
            SubtypeLabel::DressShirt => SubType::DressShirt,
            SubtypeLabel::TankTop => SubType::Tank,
        }
    }
}

impl SignalLabel for SubtypeLabel {
    const ALL: &'static [Self] = &[
        SubtypeLabel::Hoodie,
        SubtypeLabel::Sweatshirt,
        SubtypeLabel::TShirt,
        SubtypeLabel::DressShirt,
        SubtypeLabel::TankTop,
    ];

    fn prompt(self) -> &'static str {
        match self {
            SubtypeLabel::Hoodie => "hoodie hooded sweatshirt with hood",
            SubtypeLabel::Sweatshirt => "sweatshirt pullover crewneck sweater",
            SubtypeLabel::TShirt => "casual t-shirt tee shirt short sleeves",
            SubtypeLabel::DressShirt => "dress shirt button-up collared shirt long sleeves",
            SubtypeLabel::TankTop => "tank top sleeveless shirt",
        }
    }

    fn classify(raw: &str) -> Option<Self> {
        let raw = raw.to_ascii_lowercase();
        if raw.contains("hoodie") {
            Some(SubtypeLabel::Hoodie)
        } else if mentions(&raw, &["sweatshirt", "pullover", "sweater"]) {
            Some(SubtypeLabel::Sweatshirt)
        } else if mentions(&raw, &["dress shirt", "button-up"]) {
            Some(SubtypeLabel::DressShirt)
        } else if mentions(&raw, &["t-shirt", "tee"]) {
            Some(SubtypeLabel::TShirt)
        } else if mentions(&raw, &["tank top", "sleeveless"]) {
            Some(SubtypeLabel::TankTop)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeightLabel {
    Lightweight,
    Midweight,
    Heavyweight,
}

impl SignalLabel for WeightLabel {
    const ALL: &'static [Self] = &[
        WeightLabel::Lightweight,
        WeightLabel::Midweight,
        WeightLabel::Heavyweight,
    ];

    fn prompt(self) -> &'static str {
        match self {
            WeightLabel::Lightweight => "thin lightweight breathable summer clothing",
            WeightLabel::Midweight => "medium weight spring fall clothing",
            WeightLabel::Heavyweight => "thick heavy insulated winter clothing padded",
        }
    }

    fn classify(raw: &str) -> Option<Self> {
        let raw = raw.to_ascii_lowercase();
        if mentions(&raw, &["thick heavy", "insulated", "winter", "padded"]) {
            Some(WeightLabel::Heavyweight)
        } else if mentions(&raw, &["thin lightweight", "summer", "breathable"]) {
            Some(WeightLabel::Lightweight)
        } else if raw.contains("medium weight") {
            Some(WeightLabel::Midweight)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormalityLabel {
    Casual,
    SmartCasual,
    Formal,
    TailoredOuterwear,
}

impl FormalityLabel {
    pub const fn is_formal(self) -> bool {
        matches!(self, FormalityLabel::Formal | FormalityLabel::TailoredOuterwear)
    }
}

impl SignalLabel for FormalityLabel {
    const ALL: &'static [Self] = &[
        FormalityLabel::Casual,
        FormalityLabel::SmartCasual,
        FormalityLabel::Formal,
        FormalityLabel::TailoredOuterwear,
    ];

    fn prompt(self) -> &'static str {
        match self {
            FormalityLabel::Casual => "casual everyday relaxed clothing streetwear hoodie joggers",
            FormalityLabel::SmartCasual => {
                "smart casual business casual neat clothing blazer chinos"
            }
            FormalityLabel::Formal => {
                "formal business professional elegant clothing suit dress shirt"
            }
            FormalityLabel::TailoredOuterwear => {
                "formal coat peacoat trench coat wool overcoat tailored outerwear"
            }
        }
    }

    fn classify(raw: &str) -> Option<Self> {
        let raw = raw.to_ascii_lowercase();
        if mentions(&raw, &["formal coat", "peacoat", "trench coat"]) {
            Some(FormalityLabel::TailoredOuterwear)
        } else if mentions(&raw, &["formal", "professional", "suit"]) {
            Some(FormalityLabel::Formal)
        } else if mentions(&raw, &["smart casual", "business casual", "blazer"]) {
            Some(FormalityLabel::SmartCasual)
        } else if mentions(&raw, &["casual", "everyday", "streetwear"]) {
            Some(FormalityLabel::Casual)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SleeveLabel {
    Sleeveless,
    ShortSleeves,
    LongSleeves,
}

impl SignalLabel for SleeveLabel {
    const ALL: &'static [Self] = &[
        SleeveLabel::Sleeveless,
        SleeveLabel::ShortSleeves,
        SleeveLabel::LongSleeves,
    ];

    fn prompt(self) -> &'static str {
        match self {
            SleeveLabel::Sleeveless => "sleeveless no sleeves",
            SleeveLabel::ShortSleeves => "short sleeves",
            SleeveLabel::LongSleeves => "long sleeves full coverage",
        }
    }

    fn classify(raw: &str) -> Option<Self> {
        let raw = raw.to_ascii_lowercase();
        if mentions(&raw, &["sleeveless", "no sleeves"]) {
            Some(SleeveLabel::Sleeveless)
        } else if raw.contains("short sleeves") {
            Some(SleeveLabel::ShortSleeves)
        } else if mentions(&raw, &["long sleeves", "full coverage"]) {
            Some(SleeveLabel::LongSleeves)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherLabel {
    Waterproof,
    Windproof,
    RegularFabric,
}

impl SignalLabel for WeatherLabel {
    const ALL: &'static [Self] = &[
        WeatherLabel::Waterproof,
        WeatherLabel::Windproof,
        WeatherLabel::RegularFabric,
    ];

    fn prompt(self) -> &'static str {
        match self {
            WeatherLabel::Waterproof => "rain jacket waterproof water resistant",
            WeatherLabel::Windproof => "windbreaker wind resistant shell",
            WeatherLabel::RegularFabric => "regular fabric not weather resistant",
        }
    }

    fn classify(raw: &str) -> Option<Self> {
        let raw = raw.to_ascii_lowercase();
        if raw.contains("regular fabric") {
            Some(WeatherLabel::RegularFabric)
        } else if mentions(&raw, &["rain", "waterproof"]) {
            Some(WeatherLabel::Waterproof)
        } else if mentions(&raw, &["windbreaker", "wind resistant"]) {
            Some(WeatherLabel::Windproof)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorLabel {
    Dark,
    Light,
    Bright,
    Neutral,
    Earth,
}

impl ColorLabel {
    pub const fn family(self) -> ColorFamily {
        match self {
            ColorLabel::Dark => ColorFamily::Dark,
            ColorLabel::Light => ColorFamily::Light,
            ColorLabel::Bright => ColorFamily::Bright,
            ColorLabel::Neutral => ColorFamily::Neutral,
            ColorLabel::Earth => ColorFamily::Earth,
        }
    }
}

impl SignalLabel for ColorLabel {
    const ALL: &'static [Self] = &[
        ColorLabel::Dark,
        ColorLabel::Light,
        ColorLabel::Bright,
        ColorLabel::Neutral,
        ColorLabel::Earth,
    ];

    fn prompt(self) -> &'static str {
        match self {
            ColorLabel::Dark => "dark colored black navy charcoal",
            ColorLabel::Light => "light colored white cream beige",
            ColorLabel::Bright => "bright vibrant colored",
            ColorLabel::Neutral => "neutral gray brown tan",
            ColorLabel::Earth => "earth tone olive brown rust",
        }
    }

    fn classify(raw: &str) -> Option<Self> {
        let raw = raw.to_ascii_lowercase();
        if raw.contains("dark") {
            Some(ColorLabel::Dark)
        } else if raw.contains("light") {
            Some(ColorLabel::Light)
        } else if raw.contains("bright") {
            Some(ColorLabel::Bright)
        } else if raw.contains("earth") {
            Some(ColorLabel::Earth)
        } else if raw.contains("neutral") {
            Some(ColorLabel::Neutral)
        } else {
            None
        }
    }
}

/// Highest scoring label in a group; the first label wins a tie.
pub fn arg_max(scores: &SignalMap) -> Option<(&str, f64)> {
    let mut best: Option<(&str, f64)> = None;
    for (label, &score) in scores {
        match best {
            Some((_, current)) if score <= current => {}
            _ => best = Some((label.as_str(), score)),
        }
    }
    best
}

/// Arg-max of a group, classified into its vocabulary, when the winning score clears `floor`.
///
/// `Some(None)` means the winner cleared the floor but is outside the vocabulary.
pub fn confident_label<L: SignalLabel>(scores: &SignalMap, floor: f64) -> Option<Option<L>> {
    let (label, score) = arg_max(scores)?;
    if score < floor {
        return None;
    }
    Some(L::classify(label))
}

/// Best score among labels classified as a variant accepted by `wanted`; `0.0` when none match.
pub fn best_score<L: SignalLabel>(scores: &SignalMap, wanted: impl Fn(L) -> bool) -> f64 {
    scores
        .iter()
        .filter(|(label, _)| L::classify(label).map(&wanted).unwrap_or(false))
        .map(|(_, &score)| score)
        .fold(None, |best: Option<f64>, score| {
            Some(best.map_or(score, |current| current.max(score)))
        })
        .unwrap_or(0.0)
}

/// Build a mapping over a whole vocabulary in canonical prompt text.
pub fn prompt_scores<L: SignalLabel>(scores: impl IntoIterator<Item = (L, f64)>) -> SignalMap {
    scores
        .into_iter()
        .map(|(label, score)| (label.prompt().to_string(), score))
        .collect()
}

/// Producer-side confidence from top-score strength and label separation.
///
/// Each of the category, weight and formality groups contributes its normalized top score
/// and the normalized gap to its runner-up; all three must be present.
pub fn detection_confidence(
    category_scores: &SignalMap,
    weight_scores: &SignalMap,
    formality_scores: &SignalMap,
) -> f64 {
    let groups = [category_scores, weight_scores, formality_scores];
    if groups.iter().any(|group| group.is_empty()) {
        return 0.0;
    }

    let normalize_top = |score: f64| ((score - 0.15) / 0.20).clamp(0.0, 1.0);
    let separation = |group: &SignalMap| {
        let mut values: Vec<f64> = group.values().copied().collect();
        if values.len() < 2 {
            return 0.0;
        }
        values.sort_by(|a, b| b.total_cmp(a));
        (((values[0] - values[1]) - 0.02) / 0.08).clamp(0.0, 1.0)
    };

    let tops: Vec<f64> = groups
        .iter()
        .map(|group| {
            let top = group.values().copied().fold(f64::NEG_INFINITY, f64::max);
            normalize_top(top)
        })
        .collect();
    let separations: Vec<f64> = groups.iter().map(|group| separation(group)).collect();

    let avg_top = tops.iter().sum::<f64>() / 3.0;
    let avg_separation = separations.iter().sum::<f64>() / 3.0;
    let consistency_bonus = if separations.iter().all(|sep| *sep > 0.5) {
        0.1
    } else {
        0.0
    };

    super::domain::round_to(
        avg_top * 0.5 + avg_separation * 0.4 + consistency_bonus,
        3,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_prompts_classify_to_their_own_variant() {
        for label in CategoryLabel::ALL {
            assert_eq!(CategoryLabel::classify(label.prompt()), Some(*label));
        }
        for label in SubtypeLabel::ALL {
            assert_eq!(SubtypeLabel::classify(label.prompt()), Some(*label));
        }
        for label in WeightLabel::ALL {
            assert_eq!(WeightLabel::classify(label.prompt()), Some(*label));
        }
        for label in FormalityLabel::ALL {
            assert_eq!(FormalityLabel::classify(label.prompt()), Some(*label));
        }
        for label in SleeveLabel::ALL {
            assert_eq!(SleeveLabel::classify(label.prompt()), Some(*label));
        }
        for label in WeatherLabel::ALL {
            assert_eq!(WeatherLabel::classify(label.prompt()), Some(*label));
        }
        for label in ColorLabel::ALL {
            assert_eq!(ColorLabel::classify(label.prompt()), Some(*label));
        }
    }

    #[test]
    fn best_score_defaults_to_zero_without_matches() {
        let scores = prompt_scores([(WeightLabel::Lightweight, 0.31)]);
        assert_eq!(best_score::<WeightLabel>(&scores, |l| l == WeightLabel::Heavyweight), 0.0);
        assert_eq!(best_score::<WeightLabel>(&scores, |l| l == WeightLabel::Lightweight), 0.31);
    }

    #[test]
    fn detection_confidence_requires_all_three_groups() {
        let category = prompt_scores([(CategoryLabel::UpperBody, 0.3)]);
        assert_eq!(
            detection_confidence(&category, &SignalMap::new(), &category),
            0.0
        );
    }

    #[test]
    fn detection_confidence_rewards_strong_separated_groups() {
        let category = prompt_scores([
            (CategoryLabel::UpperBody, 0.35),
            (CategoryLabel::LowerBody, 0.20),
        ]);
        let weight = prompt_scores([
            (WeightLabel::Lightweight, 0.36),
            (WeightLabel::Heavyweight, 0.18),
        ]);
        let formality = prompt_scores([
            (FormalityLabel::Casual, 0.40),
            (FormalityLabel::Formal, 0.21),
        ]);

        // Every group saturates both terms and earns the consistency bonus.
        assert_eq!(detection_confidence(&category, &weight, &formality), 1.0);
    }
}
