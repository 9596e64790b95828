//! Randomised constrained search for one outfit.
//!
//! Selection runs as three stages, each consuming the previous one:
//! [`WeatherPools`] drops pieces unsuited to the conditions, [`CandidatePools`] narrows
//! them to the dress code, and [`CandidatePools::search`] draws bounded random attempts
//! until one passes every rule.

use rand::seq::IndexedRandom;
use rand::Rng;

use super::reasoning::generate_reasoning;
use super::scoring::score_outfit;
use crate::wardrobe::compatibility::{validate_color_rules, EventFormality};
use crate::wardrobe::domain::{
    ColorFamily, GarmentProfile, PrimaryCategory, SleeveLength,
};
use crate::wardrobe::weather::{score_temperature_match, WeatherProfile};

const FORMAL_ATTEMPTS: usize = 30;
const DEFAULT_ATTEMPTS: usize = 20;

/// One assembled outfit borrowing its pieces from the caller's collection.
#[derive(Debug, Clone, PartialEq)]
pub struct OutfitCandidate<'a, G> {
    pub top: &'a G,
    pub bottom: &'a G,
    pub outerwear: Option<&'a G>,
    pub score: f64,
    pub reasoning: String,
}

impl<'a, G: AsRef<GarmentProfile>> OutfitCandidate<'a, G> {
    /// Worn pieces in top, bottom, outerwear order.
    pub fn pieces(&self) -> Vec<&'a GarmentProfile> {
        let mut pieces = vec![self.top.as_ref(), self.bottom.as_ref()];
        if let Some(outer) = self.outerwear {
            pieces.push(outer.as_ref());
        }
        pieces
    }
}

/// Why the selector could not produce an outfit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SelectionFailure {
    #[error("no tops suit the current weather")]
    EmptyTopPool,
    #[error("no bottoms suit the current weather")]
    EmptyBottomPool,
    #[error("no outerwear suits freezing conditions")]
    MissingOuterwear,
    #[error("no formal or smart-casual tops available")]
    NoFormalTops,
    #[error("no valid combination after {attempts} attempts")]
    Exhausted { attempts: usize },
}

/// Weather gate for a single piece.
pub fn suits_weather(profile: &GarmentProfile, weather: &WeatherProfile) -> bool {
    let outerwear = profile.primary_category == PrimaryCategory::Outerwear;

    if weather.is_extreme_cold && outerwear && profile.insulation_score < 45.0 {
        return false;
    }
    if weather.is_very_cold
        && profile.primary_category == PrimaryCategory::Top
        && profile.sleeve_length == SleeveLength::Sleeveless
    {
        return false;
    }
    if weather.is_hot && profile.insulation_score > 60.0 {
        return false;
    }
    if outerwear && weather.is_freezing() {
        return true;
    }
    score_temperature_match(profile.insulation_score, weather.temperature) >= 0.0
}

/// Pools after the weather gate. `None` in `outerwear` is the "no outerwear" option.
#[derive(Debug)]
pub struct WeatherPools<'a, G> {
    tops: Vec<&'a G>,
    bottoms: Vec<&'a G>,
    outerwear: Vec<Option<&'a G>>,
}

impl<'a, G: AsRef<GarmentProfile>> WeatherPools<'a, G> {
    pub fn filter(
        tops: &[&'a G],
        bottoms: &[&'a G],
        outerwear: &[&'a G],
        weather: &WeatherProfile,
    ) -> Result<Self, SelectionFailure> {
        let keep = |pool: &[&'a G]| -> Vec<&'a G> {
            pool.iter()
                .copied()
                .filter(|&item| suits_weather(item.as_ref(), weather))
                .collect()
        };

        let tops = keep(tops);
        let bottoms = keep(bottoms);
        let mut outerwear: Vec<Option<&'a G>> = keep(outerwear).into_iter().map(Some).collect();

        let calm_and_mild = !weather.is_freezing()
            && weather.temperature >= 18.0
            && !weather.is_wet
            && !weather.is_windy;
        if calm_and_mild {
            outerwear.push(None);
        }

        if tops.is_empty() {
            return Err(SelectionFailure::EmptyTopPool);
        }
        if bottoms.is_empty() {
            return Err(SelectionFailure::EmptyBottomPool);
        }
        if weather.is_freezing() && outerwear.is_empty() {
            return Err(SelectionFailure::MissingOuterwear);
        }

        Ok(Self {
            tops,
            bottoms,
            outerwear,
        })
    }

    /// Narrow each pool to the dress code, falling back where the code allows.
    pub fn narrow(self, event: EventFormality) -> Result<CandidatePools<'a, G>, SelectionFailure> {
        let admitted = |pool: &[&'a G]| -> Vec<&'a G> {
            pool.iter()
                .copied()
                .filter(|&item| event.admits(item.as_ref().formality_level))
                .collect()
        };
        let present_outerwear: Vec<&'a G> = self.outerwear.iter().flatten().copied().collect();
        let or_else = |narrowed: Vec<&'a G>, fallback: Vec<&'a G>| {
            if narrowed.is_empty() {
                fallback
            } else {
                narrowed
            }
        };

        let (tops, bottoms, outerwear) = match event {
            EventFormality::Casual => (self.tops, self.bottoms, self.outerwear),
            EventFormality::SmartCasual => {
                let tops = or_else(admitted(&self.tops), self.tops.clone());
                let bottoms = or_else(admitted(&self.bottoms), self.bottoms.clone());
                let smart_outer = admitted(&present_outerwear);
                let outerwear = if smart_outer.is_empty() {
                    self.outerwear
                } else {
                    smart_outer.into_iter().map(Some).collect()
                };
                (tops, bottoms, outerwear)
            }
            EventFormality::Formal => {
                let tops = admitted(&self.tops);
                if tops.is_empty() {
                    return Err(SelectionFailure::NoFormalTops);
                }
                let bottoms = or_else(admitted(&self.bottoms), self.bottoms.clone());
                let outerwear = or_else(admitted(&present_outerwear), present_outerwear)
                    .into_iter()
                    .map(Some)
                    .collect();
                (tops, bottoms, outerwear)
            }
        };

        Ok(CandidatePools {
            tops,
            bottoms,
            outerwear,
            event,
        })
    }
}

/// Pools ready for the random search.
#[derive(Debug)]
pub struct CandidatePools<'a, G> {
    tops: Vec<&'a G>,
    bottoms: Vec<&'a G>,
    outerwear: Vec<Option<&'a G>>,
    event: EventFormality,
}

impl<'a, G: AsRef<GarmentProfile>> CandidatePools<'a, G> {
    pub fn attempt_budget(&self) -> usize {
        match self.event {
            EventFormality::Formal => FORMAL_ATTEMPTS,
            _ => DEFAULT_ATTEMPTS,
        }
    }

    fn present_outerwear(&self) -> Vec<&'a G> {
        self.outerwear.iter().flatten().copied().collect()
    }

    /// Draw attempts until one passes every rule; the first success wins.
    pub fn search<R: Rng + ?Sized>(
        &self,
        weather: &WeatherProfile,
        rng: &mut R,
    ) -> Result<OutfitCandidate<'a, G>, SelectionFailure> {
        let attempts = self.attempt_budget();

        for _ in 0..attempts {
            let Some(&top) = self.tops.choose(rng) else {
                break;
            };
            let partners = match self.event {
                EventFormality::Formal => self.formal_partners(top, weather, rng),
                EventFormality::SmartCasual => self.relaxed_partners(top, weather, false, rng),
                EventFormality::Casual => self.relaxed_partners(top, weather, true, rng),
            };
            let Some((bottom, outerwear)) = partners else {
                continue;
            };

            let mut candidate = OutfitCandidate {
                top,
                bottom,
                outerwear,
                score: 0.0,
                reasoning: String::new(),
            };
            let pieces = candidate.pieces();
            candidate.score = score_outfit(&pieces, weather, self.event);
            candidate.reasoning = generate_reasoning(
                &pieces,
                outerwear.map(|outer| outer.as_ref()),
                weather,
                self.event,
            );
            return Ok(candidate);
        }

        Err(SelectionFailure::Exhausted { attempts })
    }

    /// Bottom in the top's color family (neutral fallbacks) and color-compatible cold cover.
    fn formal_partners<R: Rng + ?Sized>(
        &self,
        top: &'a G,
        weather: &WeatherProfile,
        rng: &mut R,
    ) -> Option<(&'a G, Option<&'a G>)> {
        let top_color = top.as_ref().color_family;
        let in_families = |families: &[ColorFamily]| -> Vec<&'a G> {
            self.bottoms
                .iter()
                .copied()
                .filter(|&bottom| families.contains(&bottom.as_ref().color_family))
                .collect()
        };

        let mut bottoms = in_families(&[top_color]);
        if bottoms.is_empty() {
            bottoms = match top_color {
                ColorFamily::Neutral | ColorFamily::Dark => {
                    in_families(&[ColorFamily::Neutral, ColorFamily::Dark])
                }
                _ => in_families(&[ColorFamily::Neutral]),
            };
        }
        let bottom = *bottoms.choose(rng)?;

        let mut outerwear = None;
        if weather.is_freezing() || weather.temperature < 15.0 {
            let present = self.present_outerwear();
            let matching: Vec<&'a G> = present
                .iter()
                .copied()
                .filter(|&outer| {
                    let family = outer.as_ref().color_family;
                    family == top_color || matches!(family, ColorFamily::Neutral | ColorFamily::Dark)
                })
                .collect();
            outerwear = matching
                .choose(rng)
                .or_else(|| present.choose(rng))
                .copied();
        }

        Some((bottom, outerwear))
    }

    /// Random bottom and outerwear, re-checked against the color rules.
    ///
    /// In freezing weather `strict_cover` abandons the attempt when no outerwear is left.
    fn relaxed_partners<R: Rng + ?Sized>(
        &self,
        top: &'a G,
        weather: &WeatherProfile,
        strict_cover: bool,
        rng: &mut R,
    ) -> Option<(&'a G, Option<&'a G>)> {
        let bottom = *self.bottoms.choose(rng)?;

        let outerwear = if weather.is_freezing() {
            let chosen = self.present_outerwear().choose(rng).copied();
            if chosen.is_none() && strict_cover {
                return None;
            }
            chosen
        } else {
            self.outerwear.choose(rng).copied().flatten()
        };

        let mut pieces = vec![top.as_ref(), bottom.as_ref()];
        if let Some(outer) = outerwear {
            pieces.push(outer.as_ref());
        }
        validate_color_rules(&pieces).then_some((bottom, outerwear))
    }
}

/// Run the full selection state machine over pre-sorted pools.
pub fn select_best_outfit<'a, G, R>(
    tops: &[&'a G],
    bottoms: &[&'a G],
    outerwear: &[&'a G],
    weather: &WeatherProfile,
    event: EventFormality,
    rng: &mut R,
) -> Result<OutfitCandidate<'a, G>, SelectionFailure>
where
    G: AsRef<GarmentProfile>,
    R: Rng + ?Sized,
{
    WeatherPools::filter(tops, bottoms, outerwear, weather)?
        .narrow(event)?
        .search(weather, rng)
}
