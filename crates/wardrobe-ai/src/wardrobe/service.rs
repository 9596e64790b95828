use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Deserializer, Serialize};

use super::compatibility::EventFormality;
use super::intake::{
    BackgroundRemover, ColorExtractor, GarmentImage, GarmentSubmission, IntakeBatch,
    IntakePipeline, IntakeResult, SignalProducer,
};
use super::pipeline::derive_and_validate;
use super::recommendation::{self, Outfit, Recommendation, RecommendationError};
use super::repository::{GarmentId, GarmentRecord, GarmentStore, StoreError};
use super::summary::{WardrobeStats, WardrobeSummary};
use super::validation::{ValidationOutcome, ValidationReport};
use super::weather::{create_weather_profile, WeatherProfile};
use crate::config::RecommendationConfig;

/// Weather, dress code and optional overrides for one outfit request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutfitRequest {
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_condition")]
    pub weather: String,
    #[serde(default, deserialize_with = "lenient_event_formality")]
    pub event_formality: EventFormality,
    /// Seeds this request's generator; wins over the configured seed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Alternatives only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

fn default_temperature() -> f64 {
    20.0
}

fn default_condition() -> String {
    "sunny".to_string()
}

fn lenient_event_formality<'de, D>(deserializer: D) -> Result<EventFormality, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|value| EventFormality::parse(&value))
        .unwrap_or_default())
}

impl OutfitRequest {
    pub fn new(temperature: f64, weather: impl Into<String>, event_formality: EventFormality) -> Self {
        Self {
            temperature,
            weather: weather.into(),
            event_formality,
            seed: None,
            count: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn weather_profile(&self) -> WeatherProfile {
        create_weather_profile(self.temperature, &self.weather)
    }
}

/// Stored garments with their headline counts.
#[derive(Debug, Clone, Serialize)]
pub struct WardrobeListing {
    pub garments: Vec<GarmentRecord>,
    pub summary: WardrobeSummary,
}

/// Service composing the derivation pipeline, the garment store and the recommender.
pub struct WardrobeService<S> {
    store: Arc<S>,
    config: RecommendationConfig,
}

impl<S> WardrobeService<S>
where
    S: GarmentStore + 'static,
{
    pub fn new(store: Arc<S>, config: RecommendationConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &RecommendationConfig {
        &self.config
    }

    fn request_rng(&self, seed: Option<u64>) -> StdRng {
        match seed.or(self.config.rng_seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Derive and validate without storing anything.
    pub fn preview(&self, submission: &GarmentSubmission) -> ValidationOutcome {
        derive_and_validate(&submission.signals, &submission.color_sample())
    }

    /// Derive, validate and store each submission independently.
    pub fn ingest(&self, submissions: Vec<GarmentSubmission>) -> IntakeBatch {
        let mut batch = IntakeBatch::default();
        for (index, submission) in submissions.into_iter().enumerate() {
            self.store_submission(&mut batch, index, submission);
        }
        batch
    }

    /// Run each image through the collaborators first, then ingest it.
    pub fn ingest_images<B, P, C>(
        &self,
        pipeline: &IntakePipeline<B, P, C>,
        images: &[GarmentImage],
    ) -> IntakeBatch
    where
        B: BackgroundRemover,
        P: SignalProducer,
        C: ColorExtractor,
    {
        let mut batch = IntakeBatch::default();
        for (index, image) in images.iter().enumerate() {
            match pipeline.analyze(image) {
                Ok(submission) => self.store_submission(&mut batch, index, submission),
                Err(err) => batch.fail(index, Some(image.label.clone()), &err),
            }
        }
        batch
    }

    fn store_submission(&self, batch: &mut IntakeBatch, index: usize, submission: GarmentSubmission) {
        let outcome = self.preview(&submission);
        for flag in &outcome.flags {
            tracing::debug!(index, %flag, "validation flag");
        }

        match self.store.insert(outcome.validated) {
            Ok(garment) => {
                tracing::info!(
                    index,
                    id = %garment.id,
                    category = garment.profile.primary_category.label(),
                    confidence = garment.profile.confidence_band.label(),
                    "garment stored"
                );
                let validation_report = ValidationReport::from_profile(&garment.profile);
                batch.results.push(IntakeResult {
                    garment,
                    validation_report,
                });
            }
            Err(err) => batch.fail(index, submission.label, &err),
        }
    }

    pub fn list(&self) -> Result<WardrobeListing, WardrobeServiceError> {
        let garments = self.store.list_all()?;
        let summary = WardrobeSummary::from_garments(&garments);
        Ok(WardrobeListing { garments, summary })
    }

    pub fn get(&self, id: &GarmentId) -> Result<GarmentRecord, WardrobeServiceError> {
        let record = self.store.get(id)?.ok_or(StoreError::NotFound)?;
        Ok(record)
    }

    pub fn delete(&self, id: &GarmentId) -> Result<(), WardrobeServiceError> {
        if self.store.delete(id)? {
            tracing::info!(%id, "garment deleted");
            Ok(())
        } else {
            Err(StoreError::NotFound.into())
        }
    }

    pub fn validation_report(&self, id: &GarmentId) -> Result<ValidationReport, WardrobeServiceError> {
        let record = self.get(id)?;
        Ok(ValidationReport::from_profile(&record.profile))
    }

    pub fn summary(&self) -> Result<WardrobeSummary, WardrobeServiceError> {
        let garments = self.store.list_all()?;
        Ok(WardrobeSummary::from_garments(&garments))
    }

    pub fn stats(&self) -> Result<WardrobeStats, WardrobeServiceError> {
        let garments = self.store.list_all()?;
        WardrobeStats::from_garments(&garments).ok_or(WardrobeServiceError::EmptyWardrobe)
    }

    pub fn recommend(
        &self,
        request: &OutfitRequest,
    ) -> Result<Recommendation<GarmentRecord>, WardrobeServiceError> {
        let wardrobe = self.store.list_all()?;
        let weather = request.weather_profile();
        let mut rng = self.request_rng(request.seed);

        let chosen =
            recommendation::recommend(&wardrobe, &weather, request.event_formality, &mut rng)?;
        tracing::info!(
            temperature = weather.temperature,
            condition = %weather.condition,
            event = %request.event_formality,
            score = chosen.outfit.score,
            top = %chosen.outfit.top.id,
            bottom = %chosen.outfit.bottom.id,
            "outfit recommended"
        );
        Ok(chosen)
    }

    pub fn alternatives(
        &self,
        request: &OutfitRequest,
    ) -> Result<Vec<Outfit<GarmentRecord>>, WardrobeServiceError> {
        let wardrobe = self.store.list_all()?;
        let weather = request.weather_profile();
        let count = request.count.unwrap_or(self.config.alternatives_count);
        Ok(recommendation::alternatives(
            &wardrobe,
            &weather,
            request.event_formality,
            count,
        ))
    }
}

/// Error raised by the wardrobe service.
#[derive(Debug, thiserror::Error)]
pub enum WardrobeServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Recommendation(#[from] RecommendationError),
    #[error("No garments in wardrobe")]
    EmptyWardrobe,
}

impl WardrobeServiceError {
    /// Failures caused by the wardrobe's contents rather than the infrastructure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            WardrobeServiceError::Recommendation(_)
                | WardrobeServiceError::EmptyWardrobe
                | WardrobeServiceError::Store(StoreError::NotFound)
        )
    }
}
