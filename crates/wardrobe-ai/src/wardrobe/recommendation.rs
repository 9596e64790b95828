//! Recommendation orchestration over a whole wardrobe.
//!
//! Partitions the collection, keeps the pieces whose insulation best fits the weather,
//! orders each pool by priority and hands the pools to the selector. The alternatives
//! generator instead ranks a bounded cross product of the best pieces.

use std::cmp::Ordering;

use rand::Rng;
use serde::Serialize;

use super::compatibility::{validate_color_rules, validate_formality_match, EventFormality};
use super::domain::{round_to, ColorRole, GarmentProfile, PrimaryCategory, RainSafety, SubType};
use super::outfits::{
    generate_reasoning, score_outfit, select_best_outfit, OutfitCandidate, SelectionFailure,
};
use super::weather::{ideal_insulation, WeatherProfile};

const ALTERNATIVE_TOPS: usize = 8;
const ALTERNATIVE_BOTTOMS: usize = 8;
const ALTERNATIVE_OUTERWEAR: usize = 5;
const ALTERNATIVE_MIN_SCORE: f64 = 30.0;
const TEMPERATURE_TOLERANCE: f64 = 40.0;

/// An outfit with owned pieces, ready to leave the request scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outfit<G> {
    pub top: G,
    pub bottom: G,
    pub outerwear: Option<G>,
    pub score: f64,
    pub reasoning: String,
}

impl<'a, G: Clone> From<OutfitCandidate<'a, G>> for Outfit<G> {
    fn from(candidate: OutfitCandidate<'a, G>) -> Self {
        Self {
            top: candidate.top.clone(),
            bottom: candidate.bottom.clone(),
            outerwear: candidate.outerwear.cloned(),
            score: candidate.score,
            reasoning: candidate.reasoning,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SafetyChecks {
    pub color_rules_passed: bool,
    pub formality_matched: bool,
    pub avg_confidence: f64,
    pub temperature_appropriate: bool,
}

impl SafetyChecks {
    fn audit(pieces: &[&GarmentProfile], weather: &WeatherProfile, event: EventFormality) -> Self {
        let ideal = ideal_insulation(weather.temperature);
        let avg_confidence = if pieces.is_empty() {
            0.0
        } else {
            pieces.iter().map(|p| p.confidence_score).sum::<f64>() / pieces.len() as f64
        };

        Self {
            color_rules_passed: validate_color_rules(pieces),
            formality_matched: validate_formality_match(pieces, event),
            avg_confidence: round_to(avg_confidence, 2),
            temperature_appropriate: pieces
                .iter()
                .all(|p| (p.insulation_score - ideal).abs() <= TEMPERATURE_TOLERANCE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation<G> {
    pub outfit: Outfit<G>,
    pub weather: WeatherProfile,
    pub event: EventFormality,
    pub safety_checks: SafetyChecks,
}

fn cold_warning(extreme: &bool) -> &'static str {
    if *extreme {
        "This is dangerously cold!"
    } else {
        "This is too cold without a jacket!"
    }
}

/// Recommendation failure carrying a user-facing message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecommendationError {
    #[error("No garments in wardrobe. Please upload some clothes first.")]
    EmptyWardrobe,
    #[error("Insufficient wardrobe. Need at least one top and one bottom.")]
    InsufficientWardrobe,
    #[error("No suitable outerwear for {temperature}°C. {}", cold_warning(.extreme))]
    MissingOuterwear { temperature: f64, extreme: bool },
    #[error("No suitable outfit found for these conditions.")]
    NoSuitableOutfit(#[source] SelectionFailure),
}

impl RecommendationError {
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            RecommendationError::EmptyWardrobe | RecommendationError::InsufficientWardrobe => None,
            RecommendationError::MissingOuterwear { extreme: true, .. } => {
                Some("Please add warm jackets/coats to your wardrobe.")
            }
            RecommendationError::MissingOuterwear { extreme: false, .. } => {
                Some("Please add jackets or coats to your wardrobe.")
            }
            RecommendationError::NoSuitableOutfit(_) => {
                Some("Try adding more versatile clothing items to your wardrobe.")
            }
        }
    }
}

/// Wardrobe split by the three categories an outfit draws from.
struct CategoryPools<'a, G> {
    tops: Vec<&'a G>,
    bottoms: Vec<&'a G>,
    outerwear: Vec<&'a G>,
}

impl<'a, G: AsRef<GarmentProfile>> CategoryPools<'a, G> {
    fn partition(wardrobe: &'a [G]) -> Self {
        let of = |category: PrimaryCategory| -> Vec<&'a G> {
            wardrobe
                .iter()
                .filter(|&item| item.as_ref().primary_category == category)
                .collect()
        };
        Self {
            tops: of(PrimaryCategory::Top),
            bottoms: of(PrimaryCategory::Bottom),
            outerwear: of(PrimaryCategory::Outerwear),
        }
    }

    fn filter_by_insulation(self, weather: &WeatherProfile) -> Self {
        Self {
            tops: filter_by_insulation(self.tops, weather.temperature),
            bottoms: filter_by_insulation(self.bottoms, weather.temperature),
            outerwear: filter_by_insulation(self.outerwear, weather.temperature),
        }
    }

    fn sort_by_priority(mut self, weather: &WeatherProfile) -> Self {
        sort_by_priority(&mut self.tops, weather, false);
        sort_by_priority(&mut self.bottoms, weather, false);
        sort_by_priority(&mut self.outerwear, weather, true);
        self
    }
}

/// Nearest insulation tier (within 15, 25 or 35 points of ideal), else the closest half.
pub fn filter_by_insulation<'a, G: AsRef<GarmentProfile>>(
    items: Vec<&'a G>,
    temperature: f64,
) -> Vec<&'a G> {
    if items.is_empty() {
        return items;
    }

    let ideal = ideal_insulation(temperature);
    let mut by_distance: Vec<(f64, &'a G)> = items
        .iter()
        .map(|&item| ((item.as_ref().insulation_score - ideal).abs(), item))
        .collect();
    by_distance.sort_by(|a, b| a.0.total_cmp(&b.0));

    for (lower, upper) in [(f64::NEG_INFINITY, 15.0), (15.0, 25.0), (25.0, 35.0)] {
        let tier: Vec<&'a G> = by_distance
            .iter()
            .filter(|(distance, _)| *distance > lower && *distance <= upper)
            .map(|(_, item)| *item)
            .collect();
        if !tier.is_empty() {
            return tier;
        }
    }

    let fallback = (items.len() / 2).max(2);
    by_distance
        .into_iter()
        .filter(|(distance, _)| *distance > 35.0)
        .take(fallback)
        .map(|(_, item)| item)
        .collect()
}

fn cold_layer_multiplier(profile: &GarmentProfile, weather: &WeatherProfile) -> f64 {
    if profile.primary_category != PrimaryCategory::Top {
        return 1.0;
    }
    let warm_layer = matches!(profile.sub_type, SubType::Hoodie | SubType::Sweatshirt);
    if weather.is_extreme_cold {
        if warm_layer {
            1.5
        } else if matches!(profile.sub_type, SubType::DressShirt | SubType::Tshirt) {
            0.7
        } else {
            1.0
        }
    } else if weather.is_very_cold && warm_layer {
        1.3
    } else {
        1.0
    }
}

/// Selection priority: confidence, insulation fit, outerwear protection and a base-color nudge.
pub fn priority_score(
    profile: &GarmentProfile,
    weather: &WeatherProfile,
    outerwear_pool: bool,
) -> f64 {
    let freezing = weather.is_freezing();
    let by_tier = |cold: f64, mild: f64| if freezing { cold } else { mild };
    let mut score = profile.confidence_score * 100.0;

    let distance = (profile.insulation_score - ideal_insulation(weather.temperature)).abs();
    score += match distance {
        d if d <= 10.0 => by_tier(50.0, 30.0),
        d if d <= 20.0 => by_tier(30.0, 20.0),
        d if d <= 30.0 => by_tier(15.0, 10.0),
        _ => 0.0,
    };

    if outerwear_pool && (freezing || weather.is_wet) {
        let extreme = |harsh: f64, other: f64| if weather.is_extreme_cold { harsh } else { other };
        score += match profile.weather_protection_score {
            p if p >= 70.0 => extreme(40.0, 25.0),
            p if p >= 50.0 => extreme(25.0, 15.0),
            p if p >= 30.0 => 10.0,
            _ => 0.0,
        };
        if weather.is_wet && profile.rain_safe == RainSafety::True {
            score += 30.0;
        }
    }

    score *= cold_layer_multiplier(profile, weather);

    if profile.color_role == ColorRole::Base {
        score += 5.0;
    }
    score
}

/// Stable, highest priority first.
fn sort_by_priority<G: AsRef<GarmentProfile>>(
    items: &mut [&G],
    weather: &WeatherProfile,
    outerwear_pool: bool,
) {
    items.sort_by(|&a, &b| {
        let a = priority_score(a.as_ref(), weather, outerwear_pool);
        let b = priority_score(b.as_ref(), weather, outerwear_pool);
        b.partial_cmp(&a).unwrap_or(Ordering::Equal)
    });
}

fn narrow_for_rain<'a, G: AsRef<GarmentProfile>>(outerwear: Vec<&'a G>) -> Vec<&'a G> {
    let safe: Vec<&'a G> = outerwear
        .iter()
        .copied()
        .filter(|&item| item.as_ref().rain_safe == RainSafety::True)
        .collect();
    if !safe.is_empty() {
        return safe;
    }
    let maybe_safe: Vec<&'a G> = outerwear
        .iter()
        .copied()
        .filter(|&item| item.as_ref().rain_safe != RainSafety::False)
        .collect();
    if maybe_safe.is_empty() {
        outerwear
    } else {
        maybe_safe
    }
}

/// Recommend one outfit for the given weather and dress code.
pub fn recommend<G, R>(
    wardrobe: &[G],
    weather: &WeatherProfile,
    event: EventFormality,
    rng: &mut R,
) -> Result<Recommendation<G>, RecommendationError>
where
    G: AsRef<GarmentProfile> + Clone,
    R: Rng + ?Sized,
{
    if wardrobe.is_empty() {
        return Err(RecommendationError::EmptyWardrobe);
    }

    let pools = CategoryPools::partition(wardrobe);
    if pools.tops.is_empty() || pools.bottoms.is_empty() {
        return Err(RecommendationError::InsufficientWardrobe);
    }

    let mut pools = pools.filter_by_insulation(weather);
    if weather.is_wet {
        pools.outerwear = narrow_for_rain(pools.outerwear);
    }

    if weather.is_freezing() && pools.outerwear.is_empty() {
        tracing::warn!(
            temperature = weather.temperature,
            "no outerwear available for freezing conditions"
        );
        return Err(RecommendationError::MissingOuterwear {
            temperature: weather.temperature,
            extreme: weather.is_extreme_cold,
        });
    }
    if !weather.needs_outerwear() {
        pools.outerwear.clear();
    }

    let pools = pools.sort_by_priority(weather);
    tracing::debug!(
        tops = pools.tops.len(),
        bottoms = pools.bottoms.len(),
        outerwear = pools.outerwear.len(),
        "candidate pools prepared"
    );

    let candidate = select_best_outfit(
        &pools.tops,
        &pools.bottoms,
        &pools.outerwear,
        weather,
        event,
        rng,
    )
    .map_err(|failure| {
        tracing::info!(%failure, "outfit selection failed");
        RecommendationError::NoSuitableOutfit(failure)
    })?;

    let safety_checks = SafetyChecks::audit(&candidate.pieces(), weather, event);
    Ok(Recommendation {
        outfit: Outfit::from(candidate),
        weather: weather.clone(),
        event,
        safety_checks,
    })
}

/// Rank valid combinations of the highest priority pieces; at most `count` results.
pub fn alternatives<G>(
    wardrobe: &[G],
    weather: &WeatherProfile,
    event: EventFormality,
    count: usize,
) -> Vec<Outfit<G>>
where
    G: AsRef<GarmentProfile> + Clone,
{
    let pools = CategoryPools::partition(wardrobe)
        .filter_by_insulation(weather)
        .sort_by_priority(weather);

    let outer_options: Vec<Option<&G>> = std::iter::once(None)
        .chain(pools.outerwear.iter().take(ALTERNATIVE_OUTERWEAR).map(|o| Some(*o)))
        .collect();

    let mut candidates = Vec::new();
    for &top in pools.tops.iter().take(ALTERNATIVE_TOPS) {
        for &bottom in pools.bottoms.iter().take(ALTERNATIVE_BOTTOMS) {
            for &outerwear in &outer_options {
                let mut pieces = vec![top.as_ref(), bottom.as_ref()];
                if let Some(outer) = outerwear {
                    pieces.push(outer.as_ref());
                }
                if !validate_color_rules(&pieces) || !validate_formality_match(&pieces, event) {
                    continue;
                }

                let score = score_outfit(&pieces, weather, event);
                if score < ALTERNATIVE_MIN_SCORE {
                    continue;
                }
                candidates.push(OutfitCandidate {
                    top,
                    bottom,
                    outerwear,
                    score,
                    reasoning: generate_reasoning(
                        &pieces,
                        outerwear.map(|outer| outer.as_ref()),
                        weather,
                        event,
                    ),
                });
            }
        }
    }

    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates
        .into_iter()
        .take(count)
        .map(Outfit::from)
        .collect()
}
