//! Image intake seam.
//!
//! The visual classifier, the dominant-color extractor and the background remover are
//! external collaborators. They are modelled as traits so the service can run a batch
//! of images through them without knowing how any of them is implemented.

use serde::{Deserialize, Serialize};

use super::color::ColorSample;
use super::repository::GarmentRecord;
use super::signals::SignalScores;
use super::validation::ValidationReport;

/// Raw upload as received from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GarmentImage {
    pub label: String,
    pub bytes: Vec<u8>,
}

/// Produces the seven signal groups for the original (unmasked) image.
pub trait SignalProducer: Send + Sync {
    fn produce(&self, image: &[u8]) -> Result<SignalScores, CollaboratorError>;
}

/// Reads the dominant color of a foreground-isolated image.
pub trait ColorExtractor: Send + Sync {
    fn extract(&self, foreground: &[u8]) -> Result<ColorSample, CollaboratorError>;
}

/// Masks the background so only the garment remains.
pub trait BackgroundRemover: Send + Sync {
    fn isolate(&self, image: &[u8]) -> Result<Vec<u8>, CollaboratorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    #[error("image could not be decoded: {0}")]
    Decode(String),
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
}

/// Which intake stage failed for one item.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("background removal failed")]
    Background(#[source] CollaboratorError),
    #[error("signal extraction failed")]
    Signals(#[source] CollaboratorError),
    #[error("color extraction failed")]
    Color(#[source] CollaboratorError),
}

/// Precomputed signals for one garment, with an optional color reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GarmentSubmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub signals: SignalScores,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorSample>,
}

impl GarmentSubmission {
    /// The supplied color reading, else the color signal group's verdict.
    pub fn color_sample(&self) -> ColorSample {
        self.color
            .unwrap_or_else(|| ColorSample::from_signals(&self.signals.color_scores))
    }
}

/// The three collaborators wired together.
pub struct IntakePipeline<B, S, C> {
    background: B,
    signals: S,
    colors: C,
}

impl<B, S, C> IntakePipeline<B, S, C>
where
    B: BackgroundRemover,
    S: SignalProducer,
    C: ColorExtractor,
{
    pub fn new(background: B, signals: S, colors: C) -> Self {
        Self {
            background,
            signals,
            colors,
        }
    }

    /// Signals come from the original image, color from the isolated foreground.
    pub fn analyze(&self, image: &GarmentImage) -> Result<GarmentSubmission, IntakeError> {
        let foreground = self
            .background
            .isolate(&image.bytes)
            .map_err(IntakeError::Background)?;
        let signals = self
            .signals
            .produce(&image.bytes)
            .map_err(IntakeError::Signals)?;
        let color = self
            .colors
            .extract(&foreground)
            .map_err(IntakeError::Color)?;

        Ok(GarmentSubmission {
            label: Some(image.label.clone()),
            signals,
            color: Some(color),
        })
    }
}

/// A stored garment and the review summary produced while storing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntakeResult {
    pub garment: GarmentRecord,
    pub validation_report: ValidationReport,
}

/// One item of a batch that could not be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntakeFailure {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub message: String,
}

/// Outcome of a batch; one failed item never aborts the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IntakeBatch {
    pub results: Vec<IntakeResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<IntakeFailure>,
}

impl IntakeBatch {
    pub(crate) fn fail(&mut self, index: usize, label: Option<String>, error: &dyn std::error::Error) {
        let message = match error.source() {
            Some(source) => format!("{error}: {source}"),
            None => error.to_string(),
        };
        tracing::warn!(index, label = label.as_deref(), %message, "garment intake failed");
        self.errors.push(IntakeFailure {
            index,
            label,
            message,
        });
    }
}
