use crate::infra::InMemoryGarmentStore;
use clap::Args;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use wardrobe_ai::config::RecommendationConfig;
use wardrobe_ai::error::AppError;
use wardrobe_ai::wardrobe::signals::{
    prompt_scores, CategoryLabel, ColorLabel, FormalityLabel, SignalScores, SleeveLabel,
    SubtypeLabel, WeatherLabel, WeightLabel,
};
use wardrobe_ai::wardrobe::{
    ColorSample, EventFormality, GarmentId, GarmentRecord, GarmentSubmission, Outfit,
    OutfitRequest, Recommendation, WardrobeService, WardrobeServiceError,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Seed for reproducible picks (defaults to OS entropy)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Number of ranked alternatives to list per scenario
    #[arg(long, default_value_t = 2)]
    pub(crate) alternatives: usize,
}

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Ambient temperature in °C
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) temperature: f64,
    /// Weather condition (sunny, clear, cloudy, rain, snowy, windy, ...)
    #[arg(long, default_value = "sunny")]
    pub(crate) weather: String,
    /// Dress code: casual, smart-casual or formal
    #[arg(long, default_value = "casual")]
    pub(crate) event: String,
    /// Seed for a reproducible pick
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// JSON file holding an array of garment submissions (defaults to the sample wardrobe)
    #[arg(long)]
    pub(crate) wardrobe: Option<PathBuf>,
    /// Also list this many ranked alternatives
    #[arg(long, default_value_t = 0)]
    pub(crate) alternatives: usize,
}

#[derive(Debug, Serialize)]
struct RecommendOutput {
    recommendation: Recommendation<GarmentRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    alternatives: Vec<Outfit<GarmentRecord>>,
}

type Labels = HashMap<GarmentId, String>;

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs {
        temperature,
        weather,
        event,
        seed,
        wardrobe,
        alternatives,
    } = args;

    let submissions = match wardrobe {
        Some(path) => {
            let raw = std::fs::read_to_string(&path).map_err(|source| AppError::WardrobeFile {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str::<Vec<GarmentSubmission>>(&raw)
                .map_err(|source| AppError::WardrobeFormat { path, source })?
        }
        None => sample_wardrobe(),
    };

    let service = build_service(seed);
    stock_wardrobe(&service, submissions);

    let request = OutfitRequest::new(temperature, weather, EventFormality::parse(&event))
        .with_count(alternatives);
    let recommendation = match service.recommend(&request) {
        Ok(recommendation) => recommendation,
        Err(err) => {
            let err = AppError::from(err);
            if let Some(suggestion) = err.suggestion() {
                eprintln!("{err}\n{suggestion}");
            }
            return Err(err);
        }
    };
    let alternatives = if alternatives > 0 {
        service.alternatives(&request)?
    } else {
        Vec::new()
    };

    let output = RecommendOutput {
        recommendation,
        alternatives,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&output).map_err(AppError::Render)?
    );
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { seed, alternatives } = args;
    let service = build_service(seed);
    let labels = stock_wardrobe(&service, sample_wardrobe());

    let summary = service.summary()?;
    println!("Wardrobe demo");
    println!(
        "- {} garments stored | {} flagged for review",
        summary.total, summary.needs_review
    );
    for (category, count) in &summary.by_category {
        println!("  - {category}: {count}");
    }

    let scenarios = [
        (28.0, "sunny", EventFormality::Casual),
        (19.0, "cloudy", EventFormality::Formal),
        (12.0, "rain", EventFormality::SmartCasual),
        (4.0, "windy", EventFormality::Casual),
        (-6.0, "snowy", EventFormality::Casual),
    ];

    for (temperature, weather, event) in scenarios {
        let request = OutfitRequest::new(temperature, weather, event).with_count(alternatives);
        println!("\n{temperature}°C {weather}, {event} dress code");

        match service.recommend(&request) {
            Ok(recommendation) => {
                print_outfit("Pick", &recommendation.outfit, &labels);
                let checks = recommendation.safety_checks;
                println!(
                    "  checks: colors {} | formality {} | temperature {} | avg confidence {:.2}",
                    pass(checks.color_rules_passed),
                    pass(checks.formality_matched),
                    pass(checks.temperature_appropriate),
                    checks.avg_confidence
                );
            }
            Err(WardrobeServiceError::Recommendation(err)) => {
                println!("  no outfit: {err}");
                if let Some(suggestion) = err.suggestion() {
                    println!("  suggestion: {suggestion}");
                }
                continue;
            }
            Err(err) => return Err(err.into()),
        }

        if alternatives > 0 {
            for (rank, outfit) in service.alternatives(&request)?.iter().enumerate() {
                print_outfit(&format!("Alt {}", rank + 1), outfit, &labels);
            }
        }
    }

    Ok(())
}

fn pass(ok: bool) -> &'static str {
    if ok {
        "ok"
    } else {
        "failed"
    }
}

fn print_outfit(heading: &str, outfit: &Outfit<GarmentRecord>, labels: &Labels) {
    let name = |record: &GarmentRecord| {
        labels
            .get(&record.id)
            .cloned()
            .unwrap_or_else(|| record.id.to_string())
    };
    let outerwear = outfit
        .outerwear
        .as_ref()
        .map(|record| format!(" + {}", name(record)))
        .unwrap_or_default();

    println!(
        "  {heading}: {} + {}{outerwear} (score {:.1})",
        name(&outfit.top),
        name(&outfit.bottom),
        outfit.score
    );
    println!("    {}", outfit.reasoning);
}

fn build_service(seed: Option<u64>) -> WardrobeService<InMemoryGarmentStore> {
    let config = RecommendationConfig {
        rng_seed: seed,
        ..RecommendationConfig::default()
    };
    WardrobeService::new(Arc::new(InMemoryGarmentStore::default()), config)
}

/// Ingest the submissions, reporting failures, and map stored ids to their labels.
fn stock_wardrobe(
    service: &WardrobeService<InMemoryGarmentStore>,
    submissions: Vec<GarmentSubmission>,
) -> Labels {
    let names: Vec<Option<String>> = submissions.iter().map(|s| s.label.clone()).collect();
    let batch = service.ingest(submissions);

    for failure in &batch.errors {
        eprintln!("skipped garment #{}: {}", failure.index, failure.message);
    }

    let failed: Vec<usize> = batch.errors.iter().map(|failure| failure.index).collect();
    names
        .into_iter()
        .enumerate()
        .filter(|(index, _)| !failed.contains(index))
        .map(|(_, name)| name)
        .zip(&batch.results)
        .filter_map(|(name, result)| name.map(|name| (result.garment.id.clone(), name)))
        .collect()
}

fn garment(label: &str, signals: SignalScores, rgb: [u8; 3]) -> GarmentSubmission {
    GarmentSubmission {
        label: Some(label.to_string()),
        signals,
        color: Some(ColorSample::from_rgb(rgb)),
    }
}

/// Seven pieces spanning hot to freezing weather and casual to formal dress codes.
pub(crate) fn sample_wardrobe() -> Vec<GarmentSubmission> {
    vec![
        garment(
            "grey t-shirt",
            SignalScores {
                category_scores: prompt_scores([
                    (CategoryLabel::UpperBody, 0.30),
                    (CategoryLabel::LowerBody, 0.15),
                ]),
                subtype_scores: prompt_scores([(SubtypeLabel::TShirt, 0.30)]),
                weight_scores: prompt_scores([(WeightLabel::Lightweight, 0.30)]),
                formality_scores: prompt_scores([(FormalityLabel::Casual, 0.28)]),
                sleeve_scores: prompt_scores([(SleeveLabel::ShortSleeves, 0.30)]),
                color_scores: prompt_scores([(ColorLabel::Neutral, 0.26)]),
                detection_confidence: 0.82,
                ..SignalScores::default()
            },
            [128, 128, 128],
        ),
        garment(
            "white oxford shirt",
            SignalScores {
                category_scores: prompt_scores([(CategoryLabel::UpperBody, 0.31)]),
                subtype_scores: prompt_scores([(SubtypeLabel::DressShirt, 0.30)]),
                weight_scores: prompt_scores([(WeightLabel::Midweight, 0.27)]),
                formality_scores: prompt_scores([
                    (FormalityLabel::Formal, 0.29),
                    (FormalityLabel::SmartCasual, 0.22),
                ]),
                sleeve_scores: prompt_scores([(SleeveLabel::LongSleeves, 0.31)]),
                color_scores: prompt_scores([(ColorLabel::Light, 0.27)]),
                detection_confidence: 0.78,
                ..SignalScores::default()
            },
            [235, 235, 235],
        ),
        garment(
            "charcoal hoodie",
            SignalScores {
                category_scores: prompt_scores([(CategoryLabel::UpperBody, 0.30)]),
                subtype_scores: prompt_scores([(SubtypeLabel::Hoodie, 0.31)]),
                weight_scores: prompt_scores([(WeightLabel::Heavyweight, 0.29)]),
                formality_scores: prompt_scores([(FormalityLabel::Casual, 0.30)]),
                sleeve_scores: prompt_scores([(SleeveLabel::LongSleeves, 0.30)]),
                color_scores: prompt_scores([(ColorLabel::Dark, 0.30)]),
                detection_confidence: 0.8,
                ..SignalScores::default()
            },
            [40, 40, 44],
        ),
        garment(
            "dark jeans",
            SignalScores {
                category_scores: prompt_scores([(CategoryLabel::LowerBody, 0.30)]),
                weight_scores: prompt_scores([(WeightLabel::Midweight, 0.28)]),
                formality_scores: prompt_scores([(FormalityLabel::Casual, 0.26)]),
                color_scores: prompt_scores([(ColorLabel::Dark, 0.31)]),
                detection_confidence: 0.72,
                ..SignalScores::default()
            },
            [20, 24, 40],
        ),
        garment(
            "grey wool trousers",
            SignalScores {
                category_scores: prompt_scores([(CategoryLabel::LowerBody, 0.31)]),
                weight_scores: prompt_scores([(WeightLabel::Midweight, 0.29)]),
                formality_scores: prompt_scores([
                    (FormalityLabel::Formal, 0.28),
                    (FormalityLabel::SmartCasual, 0.24),
                ]),
                color_scores: prompt_scores([(ColorLabel::Neutral, 0.28)]),
                detection_confidence: 0.76,
                ..SignalScores::default()
            },
            [120, 120, 124],
        ),
        garment(
            "navy rain shell",
            SignalScores {
                category_scores: prompt_scores([
                    (CategoryLabel::Outerwear, 0.32),
                    (CategoryLabel::UpperBody, 0.22),
                ]),
                weight_scores: prompt_scores([(WeightLabel::Midweight, 0.30)]),
                formality_scores: prompt_scores([(FormalityLabel::Casual, 0.25)]),
                sleeve_scores: prompt_scores([(SleeveLabel::LongSleeves, 0.30)]),
                weather_scores: prompt_scores([
                    (WeatherLabel::Waterproof, 0.33),
                    (WeatherLabel::Windproof, 0.25),
                ]),
                color_scores: prompt_scores([(ColorLabel::Dark, 0.28)]),
                detection_confidence: 0.85,
                ..SignalScores::default()
            },
            [22, 26, 48],
        ),
        garment(
            "black down puffer",
            SignalScores {
                category_scores: prompt_scores([
                    (CategoryLabel::Outerwear, 0.33),
                    (CategoryLabel::UpperBody, 0.24),
                ]),
                weight_scores: prompt_scores([(WeightLabel::Heavyweight, 0.33)]),
                formality_scores: prompt_scores([(FormalityLabel::Casual, 0.25)]),
                sleeve_scores: prompt_scores([(SleeveLabel::LongSleeves, 0.30)]),
                weather_scores: prompt_scores([
                    (WeatherLabel::Waterproof, 0.31),
                    (WeatherLabel::Windproof, 0.31),
                ]),
                color_scores: prompt_scores([(ColorLabel::Dark, 0.30)]),
                detection_confidence: 0.9,
                ..SignalScores::default()
            },
            [15, 15, 15],
        ),
    ]
}
