//! Outfit scoring, rationale and selection.

mod reasoning;
mod scoring;
mod selector;

pub use reasoning::generate_reasoning;
pub use scoring::{calculate_weather_score, score_outfit, WEATHER_SCORE_MAX};
pub use selector::{
    select_best_outfit, suits_weather, CandidatePools, OutfitCandidate, SelectionFailure,
    WeatherPools,
};
