use crate::wardrobe::compatibility::{accent_count, EventFormality};
use crate::wardrobe::domain::{GarmentProfile, RainSafety};
use crate::wardrobe::weather::WeatherProfile;

const SEPARATOR: &str = " | ";

/// Human readable rationale for a selected outfit.
pub fn generate_reasoning(
    pieces: &[&GarmentProfile],
    outerwear: Option<&GarmentProfile>,
    weather: &WeatherProfile,
    event: EventFormality,
) -> String {
    let temperature = weather.temperature;
    let mut reasons = Vec::new();

    reasons.push(if weather.is_extreme_cold {
        format!("Extreme cold protection for {temperature}°C")
    } else if weather.is_very_cold {
        format!("Cold weather appropriate for {temperature}°C")
    } else if weather.is_hot {
        format!("Hot weather appropriate for {temperature}°C")
    } else {
        format!("Perfect for {temperature}°C")
    });

    if let Some(outer) = outerwear {
        let warm = outer.insulation_score >= 70.0;
        let protective = outer.weather_protection_score >= 60.0;
        match (warm, protective) {
            (true, true) => reasons.push("Maximum insulation & weather protection".to_string()),
            (true, false) => reasons.push("High thermal insulation".to_string()),
            (false, true) => reasons.push("Excellent weather protection".to_string()),
            (false, false) => {}
        }
    }

    if weather.is_wet {
        let waterproof = outerwear.is_some_and(|outer| outer.rain_safe == RainSafety::True);
        reasons.push(if waterproof {
            "Waterproof protection".to_string()
        } else {
            "⚠ Limited rain protection".to_string()
        });
    }

    if event != EventFormality::Casual {
        reasons.push(format!("Matches {event} dress code"));
    }

    match accent_count(pieces) {
        0 => reasons.push("Classic neutral palette".to_string()),
        1 => reasons.push("Subtle accent styling".to_string()),
        _ => {}
    }

    if !pieces.is_empty() {
        let average_confidence = pieces
            .iter()
            .map(|piece| piece.confidence_score)
            .sum::<f64>()
            / pieces.len() as f64;
        if average_confidence < 0.3 {
            reasons.push("⚠ Low confidence - please verify fit".to_string());
        }
    }

    reasons.join(SEPARATOR)
}
