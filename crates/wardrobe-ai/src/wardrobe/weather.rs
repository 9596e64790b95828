use serde::{Deserialize, Serialize};

const EXTREME_COLD: f64 = 0.0;
const VERY_COLD: f64 = 10.0;
const COLD: f64 = 15.0;
const WARM: f64 = 25.0;
const HOT: f64 = 30.0;

/// Ambient conditions for one request, flattened into the tiers the rules read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherProfile {
    pub temperature: f64,
    pub condition: String,
    pub is_extreme_cold: bool,
    pub is_very_cold: bool,
    pub is_cold: bool,
    pub is_warm: bool,
    pub is_hot: bool,
    pub is_wet: bool,
    pub is_windy: bool,
    pub is_dry: bool,
}

impl WeatherProfile {
    /// Extreme or very cold: outerwear becomes mandatory.
    pub fn is_freezing(&self) -> bool {
        self.is_extreme_cold || self.is_very_cold
    }

    pub fn needs_outerwear(&self) -> bool {
        self.temperature < 18.0 || self.is_wet || self.is_windy
    }
}

pub fn create_weather_profile(temperature: f64, condition: &str) -> WeatherProfile {
    let condition = condition.trim().to_lowercase();
    WeatherProfile {
        temperature,
        is_extreme_cold: temperature < EXTREME_COLD,
        is_very_cold: temperature < VERY_COLD,
        is_cold: temperature < COLD,
        is_warm: temperature > WARM,
        is_hot: temperature > HOT,
        is_wet: matches!(condition.as_str(), "rain" | "rainy" | "snow" | "snowy"),
        is_windy: condition == "windy",
        is_dry: matches!(condition.as_str(), "sunny" | "clear"),
        condition,
    }
}

/// Insulation score best suited to `temperature`.
pub fn ideal_insulation(temperature: f64) -> f64 {
    (95.0 - temperature * 2.5).clamp(0.0, 100.0)
}

/// 15/12/8/4 by distance from the ideal insulation; severe mismatches cost 10.
pub fn score_temperature_match(insulation: f64, temperature: f64) -> f64 {
    let distance = (insulation - ideal_insulation(temperature)).abs();
    if distance <= 10.0 {
        15.0
    } else if distance <= 20.0 {
        12.0
    } else if distance <= 30.0 {
        8.0
    } else if distance <= 40.0 {
        4.0
    } else if (temperature < 0.0 && insulation < 50.0) || (temperature > 30.0 && insulation > 70.0)
    {
        -10.0
    } else {
        0.0
    }
}
