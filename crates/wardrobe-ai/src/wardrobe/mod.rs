//! Garment profile derivation and weather-aware outfit recommendation.
//!
//! Data flows strictly downward: classifier signals and a color sample become a
//! [`GarmentProfile`], the validator audits it, the store keeps it, and the recommender
//! draws outfits from the stored profiles for a given [`WeatherProfile`] and dress code.

pub mod color;
pub mod compatibility;
pub mod derivation;
pub mod domain;
pub mod intake;
pub mod outfits;
pub mod pipeline;
pub mod recommendation;
pub mod repository;
pub mod router;
pub mod service;
pub mod signals;
pub mod summary;
pub mod validation;
pub mod weather;

#[cfg(test)]
mod tests;

pub use color::ColorSample;
pub use compatibility::{
    color_role, compatibility_weight, validate_color_rules, validate_formality_match,
    EventFormality,
};
pub use derivation::{derive_provisional, ProvisionalProfile};
pub use domain::{
    ColorFamily, ColorRole, ConfidenceBand, CoverageLevel, FlagSeverity, FormalityLevel,
    GarmentProfile, LayeringRole, PrimaryCategory, ProfileDiagnostics, RainSafety, Season,
    SleeveLength, SubType, TempRange, ThermalLevel, ValidationCheck, ValidationFlag,
    WindResistance,
};
pub use intake::{
    BackgroundRemover, CollaboratorError, ColorExtractor, GarmentImage, GarmentSubmission,
    IntakeBatch, IntakeError, IntakeFailure, IntakePipeline, IntakeResult, SignalProducer,
};
pub use outfits::{score_outfit, select_best_outfit, OutfitCandidate, SelectionFailure};
pub use pipeline::{derive, derive_and_validate};
pub use recommendation::{
    alternatives, recommend, Outfit, Recommendation, RecommendationError, SafetyChecks,
};
pub use repository::{GarmentId, GarmentRecord, GarmentStore, StoreError};
pub use router::wardrobe_router;
pub use service::{OutfitRequest, WardrobeListing, WardrobeService, WardrobeServiceError};
pub use signals::{SignalMap, SignalScores};
pub use summary::{WardrobeStats, WardrobeSummary};
pub use validation::{validate, ReviewStatus, ValidationOutcome, ValidationReport};
pub use weather::{create_weather_profile, WeatherProfile};
