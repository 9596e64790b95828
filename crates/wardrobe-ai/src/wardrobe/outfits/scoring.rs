use crate::wardrobe::compatibility::{
    accent_count, validate_formality_match, EventFormality,
};
use crate::wardrobe::domain::{round_to, GarmentProfile, PrimaryCategory, RainSafety};
use crate::wardrobe::weather::{score_temperature_match, WeatherProfile};

/// Ceiling of the weather component.
pub const WEATHER_SCORE_MAX: f64 = 50.0;
const SCORE_MAX: f64 = 100.0;
const MATCH_MAX: f64 = 15.0;

fn category_weight(category: PrimaryCategory) -> f64 {
    match category {
        PrimaryCategory::Outerwear => 1.4,
        PrimaryCategory::Bottom => 0.8,
        _ => 1.0,
    }
}

/// Weighted temperature fit of the worn pieces, normalized to `0..=50`.
pub fn calculate_weather_score(pieces: &[&GarmentProfile], weather: &WeatherProfile) -> f64 {
    let mut score = 0.0;
    let mut max_score = 0.0;

    for piece in pieces {
        let weight = category_weight(piece.primary_category);
        score += score_temperature_match(piece.insulation_score, weather.temperature) * weight;
        max_score += MATCH_MAX * weight;

        if piece.primary_category != PrimaryCategory::Outerwear {
            continue;
        }

        if weather.is_freezing() {
            if piece.insulation_score >= 70.0 {
                score += 12.0;
            } else if piece.insulation_score >= 50.0 {
                score += 5.0;
            }
            if piece.weather_protection_score >= 60.0 {
                score += 10.0;
            } else if piece.weather_protection_score >= 40.0 {
                score += 4.0;
            }
        }

        if weather.is_wet {
            match piece.rain_safe {
                RainSafety::True => score += 15.0,
                RainSafety::False => score -= 8.0,
                RainSafety::Unknown => {}
            }
        }
    }

    let normalized = if max_score > 0.0 {
        score / max_score * WEATHER_SCORE_MAX
    } else {
        score
    };
    normalized.clamp(0.0, WEATHER_SCORE_MAX)
}

/// Total outfit score: weather (0-50), compatibility (0-30), formality and palette bonuses.
pub fn score_outfit(
    pieces: &[&GarmentProfile],
    weather: &WeatherProfile,
    event: EventFormality,
) -> f64 {
    if pieces.is_empty() {
        return 0.0;
    }

    let weather_score = calculate_weather_score(pieces, weather);
    let average_weight = pieces
        .iter()
        .map(|piece| piece.compatibility_weight)
        .sum::<f64>()
        / pieces.len() as f64;

    let mut score = weather_score + average_weight * 30.0;
    if validate_formality_match(pieces, event) {
        score += 10.0;
    }
    score += match accent_count(pieces) {
        0 => 10.0,
        1 => 7.0,
        _ => 0.0,
    };
    if (weather.is_extreme_cold || weather.is_hot) && weather_score < 20.0 {
        score -= 20.0;
    }

    round_to(score, 2).clamp(0.0, SCORE_MAX)
}
