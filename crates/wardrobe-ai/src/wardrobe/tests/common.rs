use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{Duration, TimeZone, Utc};
use serde_json::Value;

use crate::config::RecommendationConfig;
use crate::wardrobe::color::ColorSample;
use crate::wardrobe::compatibility::color_role;
use crate::wardrobe::domain::{
    ColorFamily, FormalityLevel, GarmentProfile, LayeringRole, PrimaryCategory, RainSafety,
    SleeveLength, SubType, ThermalLevel, WindResistance,
};
use crate::wardrobe::intake::GarmentSubmission;
use crate::wardrobe::repository::{GarmentId, GarmentRecord, GarmentStore, StoreError};
use crate::wardrobe::service::WardrobeService;
use crate::wardrobe::signals::{
    prompt_scores, CategoryLabel, ColorLabel, FormalityLabel, SignalScores, SleeveLabel,
    SubtypeLabel, WeatherLabel, WeightLabel,
};

pub(super) const SEED: u64 = 7;

/// Short-sleeved lightweight casual t-shirt.
pub(super) fn tee_signals() -> SignalScores {
    SignalScores {
        category_scores: prompt_scores([
            (CategoryLabel::UpperBody, 0.30),
            (CategoryLabel::LowerBody, 0.15),
            (CategoryLabel::Outerwear, 0.12),
            (CategoryLabel::Footwear, 0.10),
        ]),
        subtype_scores: prompt_scores([
            (SubtypeLabel::TShirt, 0.30),
            (SubtypeLabel::TankTop, 0.18),
            (SubtypeLabel::DressShirt, 0.12),
        ]),
        weight_scores: prompt_scores([
            (WeightLabel::Lightweight, 0.30),
            (WeightLabel::Midweight, 0.15),
            (WeightLabel::Heavyweight, 0.10),
        ]),
        formality_scores: prompt_scores([
            (FormalityLabel::Casual, 0.28),
            (FormalityLabel::SmartCasual, 0.15),
            (FormalityLabel::Formal, 0.12),
        ]),
        sleeve_scores: prompt_scores([
            (SleeveLabel::ShortSleeves, 0.30),
            (SleeveLabel::LongSleeves, 0.14),
            (SleeveLabel::Sleeveless, 0.12),
        ]),
        weather_scores: prompt_scores([(WeatherLabel::RegularFabric, 0.30)]),
        color_scores: prompt_scores([(ColorLabel::Bright, 0.30), (ColorLabel::Neutral, 0.18)]),
        detection_confidence: 0.8,
    }
}

/// Midweight casual trousers with no subtype or sleeve evidence.
pub(super) fn jeans_signals() -> SignalScores {
    SignalScores {
        category_scores: prompt_scores([
            (CategoryLabel::LowerBody, 0.30),
            (CategoryLabel::UpperBody, 0.14),
        ]),
        weight_scores: prompt_scores([
            (WeightLabel::Midweight, 0.28),
            (WeightLabel::Lightweight, 0.16),
        ]),
        formality_scores: prompt_scores([(FormalityLabel::Casual, 0.26)]),
        color_scores: prompt_scores([(ColorLabel::Dark, 0.31)]),
        detection_confidence: 0.7,
        ..SignalScores::default()
    }
}

/// Heavy waterproof, windproof, long-sleeved outer shell.
pub(super) fn puffer_signals() -> SignalScores {
    SignalScores {
        category_scores: prompt_scores([
            (CategoryLabel::Outerwear, 0.32),
            (CategoryLabel::UpperBody, 0.24),
        ]),
        weight_scores: prompt_scores([
            (WeightLabel::Heavyweight, 0.33),
            (WeightLabel::Midweight, 0.12),
        ]),
        formality_scores: prompt_scores([(FormalityLabel::Casual, 0.25)]),
        sleeve_scores: prompt_scores([(SleeveLabel::LongSleeves, 0.30)]),
        weather_scores: prompt_scores([
            (WeatherLabel::Waterproof, 0.33),
            (WeatherLabel::Windproof, 0.31),
        ]),
        color_scores: prompt_scores([(ColorLabel::Dark, 0.30)]),
        detection_confidence: 0.9,
        ..SignalScores::default()
    }
}

pub(super) fn submission(signals: SignalScores, rgb: [u8; 3]) -> GarmentSubmission {
    GarmentSubmission {
        label: None,
        signals,
        color: Some(ColorSample::from_rgb(rgb)),
    }
}

/// Tee, jeans and puffer with extracted colors.
pub(super) fn starter_submissions() -> Vec<GarmentSubmission> {
    vec![
        submission(tee_signals(), [128, 128, 128]),
        submission(jeans_signals(), [20, 24, 40]),
        submission(puffer_signals(), [15, 15, 15]),
    ]
}

/// Internally consistent profile with confident casual defaults.
pub(super) fn garment(category: PrimaryCategory, insulation: f64, family: ColorFamily) -> GarmentProfile {
    let outer = category == PrimaryCategory::Outerwear;
    let mut profile = GarmentProfile {
        primary_category: category,
        sub_type: match category {
            PrimaryCategory::Top => SubType::Tshirt,
            _ => SubType::Unknown,
        },
        layering_role: if outer {
            LayeringRole::Outer
        } else {
            LayeringRole::Base
        },
        thermal_level: ThermalLevel::from_insulation(insulation),
        insulation_score: insulation,
        weather_protection_score: if outer { 45.0 } else { 20.0 },
        rain_safe: if outer {
            RainSafety::Unknown
        } else {
            RainSafety::False
        },
        wind_resistance: if outer {
            WindResistance::Medium
        } else {
            WindResistance::Low
        },
        sleeve_length: SleeveLength::Long,
        color_family: family,
        color_role: color_role(family),
        compatibility_weight: 1.0,
        formality_level: FormalityLevel::Casual,
        ..GarmentProfile::default()
    };
    profile.rebase_confidence(0.8);
    profile
}

pub(super) fn top(insulation: f64, family: ColorFamily) -> GarmentProfile {
    garment(PrimaryCategory::Top, insulation, family)
}

pub(super) fn bottom(insulation: f64, family: ColorFamily) -> GarmentProfile {
    garment(PrimaryCategory::Bottom, insulation, family)
}

pub(super) fn outerwear(
    insulation: f64,
    protection: f64,
    rain_safe: RainSafety,
    family: ColorFamily,
) -> GarmentProfile {
    GarmentProfile {
        weather_protection_score: protection,
        rain_safe,
        ..garment(PrimaryCategory::Outerwear, insulation, family)
    }
}

pub(super) fn with_formality(mut profile: GarmentProfile, level: FormalityLevel) -> GarmentProfile {
    profile.formality_level = level;
    profile
}

pub(super) fn build_service() -> (WardrobeService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let config = RecommendationConfig {
        rng_seed: Some(SEED),
        ..RecommendationConfig::default()
    };
    let service = WardrobeService::new(store.clone(), config);
    (service, store)
}

/// Newest-first in-memory store with a deterministic clock.
#[derive(Default)]
pub(super) struct MemoryStore {
    pub(super) records: Mutex<Vec<GarmentRecord>>,
    sequence: AtomicU64,
}

impl MemoryStore {
    pub(super) fn seeded(profiles: Vec<GarmentProfile>) -> Self {
        let store = Self::default();
        for profile in profiles {
            store.insert(profile).expect("memory store accepts inserts");
        }
        store
    }

    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("store mutex poisoned").len()
    }
}

impl GarmentStore for MemoryStore {
    fn insert(&self, profile: GarmentProfile) -> Result<GarmentRecord, StoreError> {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let epoch = Utc
            .with_ymd_and_hms(2025, 1, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        let record = GarmentRecord {
            id: GarmentId::from_sequence(sequence),
            created_at: epoch + Duration::minutes(sequence as i64),
            profile,
        };
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.insert(0, record.clone());
        Ok(record)
    }

    fn list_all(&self) -> Result<Vec<GarmentRecord>, StoreError> {
        Ok(self.records.lock().expect("store mutex poisoned").clone())
    }

    fn get(&self, id: &GarmentId) -> Result<Option<GarmentRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn delete(&self, id: &GarmentId) -> Result<bool, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let before = guard.len();
        guard.retain(|record| &record.id != id);
        Ok(guard.len() != before)
    }
}

/// Store whose every call fails.
pub(super) struct UnavailableStore;

impl GarmentStore for UnavailableStore {
    fn insert(&self, _profile: GarmentProfile) -> Result<GarmentRecord, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn list_all(&self) -> Result<Vec<GarmentRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn get(&self, _id: &GarmentId) -> Result<Option<GarmentRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: &GarmentId) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("valid json body")
}
