//! Continuous thermal scores and the comfort range derived from them.

use crate::wardrobe::domain::{
    round_to, LayeringRole, PrimaryCategory, Season, SleeveLength, TempRange,
};
use crate::wardrobe::signals::{best_score, SignalMap, WeatherLabel, WeightLabel};

const MIN_SPAN: i32 = 8;

fn finish_score(raw: f64) -> f64 {
    round_to(raw, 1).clamp(0.0, 100.0)
}

/// `+strong` above 0.28, `+mild` above 0.22, nothing otherwise.
fn stepped(score: f64, strong: f64, mild: f64) -> f64 {
    if score > 0.28 {
        strong
    } else if score > 0.22 {
        mild
    } else {
        0.0
    }
}

pub(super) fn insulation(
    weight_scores: &SignalMap,
    sleeve: SleeveLength,
    layering: LayeringRole,
) -> f64 {
    let heavy = best_score::<WeightLabel>(weight_scores, |l| l == WeightLabel::Heavyweight);
    let light = best_score::<WeightLabel>(weight_scores, |l| l == WeightLabel::Lightweight);
    let medium = best_score::<WeightLabel>(weight_scores, |l| l == WeightLabel::Midweight);

    let mut score = 50.0 + stepped(heavy, 30.0, 20.0) - stepped(light, 30.0, 20.0);
    if medium > 0.25 {
        score += 5.0;
    }

    score += match sleeve {
        SleeveLength::Sleeveless => -15.0,
        SleeveLength::Short => -8.0,
        SleeveLength::Long => 8.0,
        SleeveLength::Unknown => 0.0,
    };
    score += match layering {
        LayeringRole::Outer => 15.0,
        LayeringRole::Mid => 8.0,
        LayeringRole::Base => 0.0,
    };

    finish_score(score)
}

pub(super) fn breathability(
    weight_scores: &SignalMap,
    sleeve: SleeveLength,
    layering: LayeringRole,
) -> f64 {
    let light = best_score::<WeightLabel>(weight_scores, |l| l == WeightLabel::Lightweight);
    let heavy = best_score::<WeightLabel>(weight_scores, |l| l == WeightLabel::Heavyweight);

    let mut score = 50.0 + stepped(light, 25.0, 15.0) - stepped(heavy, 25.0, 15.0);

    score += match sleeve {
        SleeveLength::Sleeveless => 15.0,
        SleeveLength::Short => 8.0,
        SleeveLength::Long => -5.0,
        SleeveLength::Unknown => 0.0,
    };
    score += match layering {
        LayeringRole::Base => 10.0,
        LayeringRole::Outer => -10.0,
        LayeringRole::Mid => 0.0,
    };

    finish_score(score)
}

pub(super) fn weather_protection(weather_scores: &SignalMap, layering: LayeringRole) -> f64 {
    let base = 20.0;
    if layering != LayeringRole::Outer {
        return base;
    }

    let rain = best_score::<WeatherLabel>(weather_scores, |l| l == WeatherLabel::Waterproof);
    let wind = best_score::<WeatherLabel>(weather_scores, |l| l == WeatherLabel::Windproof);
    let regular = best_score::<WeatherLabel>(weather_scores, |l| l == WeatherLabel::RegularFabric);

    let mut score = base;
    if rain > 0.30 {
        score += 40.0;
    } else if rain > 0.22 {
        score += 25.0;
    }
    if wind > 0.30 {
        score += 30.0;
    } else if wind > 0.22 {
        score += 15.0;
    }
    if regular > 0.28 {
        score -= 10.0;
    }

    finish_score(score)
}

/// Comfort range from insulation and breathability, shifted by layering and category.
pub fn temp_range(
    insulation: f64,
    breathability: f64,
    layering: LayeringRole,
    category: PrimaryCategory,
) -> TempRange {
    let mut min = 25.0 - insulation * 0.35;
    let mut max = 40.0 - insulation * 0.30 + (breathability - 50.0) * 0.15;

    match layering {
        LayeringRole::Outer => {
            min -= 5.0;
            max -= 3.0;
        }
        LayeringRole::Base => {
            min += 3.0;
            max += 3.0;
        }
        LayeringRole::Mid => {}
    }
    match category {
        PrimaryCategory::Outerwear => min -= 3.0,
        PrimaryCategory::Bottom => {
            min += 2.0;
            max += 2.0;
        }
        _ => {}
    }

    let min = (min.round_ties_even() as i32).clamp(-15, 25);
    let mut max = (max.round_ties_even() as i32).clamp(10, 45);
    if max - min < MIN_SPAN {
        max = min + MIN_SPAN;
    }

    TempRange { min, max }
}

pub fn seasonality(range: TempRange) -> Vec<Season> {
    if range.span() > 25 {
        return vec![Season::All];
    }

    let mut seasons = Vec::with_capacity(4);
    if range.min < 10 {
        seasons.push(Season::Winter);
    }
    if range.min < 20 && range.max > 8 {
        seasons.push(Season::Spring);
        seasons.push(Season::Fall);
    }
    if range.max > 18 {
        seasons.push(Season::Summer);
    }

    if seasons.is_empty() {
        seasons.push(Season::All);
    }
    seasons
}
