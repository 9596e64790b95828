use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse garment category assigned from the category signal group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PrimaryCategory {
    Top,
    Bottom,
    Outerwear,
    Footwear,
    Accessory,
    Unknown,
}

impl PrimaryCategory {
    pub const fn label(self) -> &'static str {
        match self {
            PrimaryCategory::Top => "Top",
            PrimaryCategory::Bottom => "Bottom",
            PrimaryCategory::Outerwear => "Outerwear",
            PrimaryCategory::Footwear => "Footwear",
            PrimaryCategory::Accessory => "Accessory",
            PrimaryCategory::Unknown => "Unknown",
        }
    }
}

/// Finer garment type used by the cold-weather priority multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubType {
    Hoodie,
    Sweatshirt,
    DressShirt,
    Tshirt,
    Tank,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayeringRole {
    Base,
    Mid,
    Outer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThermalLevel {
    Low,
    Medium,
    High,
}

impl ThermalLevel {
    /// Band an insulation score: `>= 70` High, `>= 40` Medium, otherwise Low.
    pub fn from_insulation(insulation: f64) -> Self {
        if insulation >= 70.0 {
            ThermalLevel::High
        } else if insulation >= 40.0 {
            ThermalLevel::Medium
        } else {
            ThermalLevel::Low
        }
    }
}

/// Comfortable ambient range in whole degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TempRange {
    pub min: i32,
    pub max: i32,
}

impl TempRange {
    pub fn span(&self) -> i32 {
        self.max - self.min
    }
}

impl Default for TempRange {
    fn default() -> Self {
        Self { min: 10, max: 25 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Season {
    Summer,
    Spring,
    Fall,
    Winter,
    All,
}

impl Season {
    pub const fn label(self) -> &'static str {
        match self {
            Season::Summer => "Summer",
            Season::Spring => "Spring",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
            Season::All => "All",
        }
    }
}

/// Garment formality on the Casual < Smart-Casual < Formal ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FormalityLevel {
    Casual,
    #[serde(rename = "Smart-Casual")]
    SmartCasual,
    Formal,
}

impl FormalityLevel {
    pub const fn index(self) -> u8 {
        match self {
            FormalityLevel::Casual => 0,
            FormalityLevel::SmartCasual => 1,
            FormalityLevel::Formal => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FormalityLevel::Casual => "Casual",
            FormalityLevel::SmartCasual => "Smart-Casual",
            FormalityLevel::Formal => "Formal",
        }
    }
}

/// Tri-state rain safety. Serialized as the strings `"true"`, `"false"`, `"unknown"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RainSafety {
    True,
    False,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindResistance {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorFamily {
    Neutral,
    Dark,
    Light,
    Bright,
    Earth,
}

impl ColorFamily {
    pub const fn label(self) -> &'static str {
        match self {
            ColorFamily::Neutral => "Neutral",
            ColorFamily::Dark => "Dark",
            ColorFamily::Light => "Light",
            ColorFamily::Bright => "Bright",
            ColorFamily::Earth => "Earth",
        }
    }
}

/// Whether a piece combines freely (`base`) or counts against the one-accent cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRole {
    Base,
    Accent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleeveLength {
    Sleeveless,
    Short,
    Long,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageLevel {
    Minimal,
    Moderate,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    /// Canonical banding shared by derivation and validation.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.5 {
            ConfidenceBand::High
        } else if score >= 0.25 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }

    pub const fn needs_review(self) -> bool {
        matches!(self, ConfidenceBand::Low)
    }

    pub const fn label(self) -> &'static str {
        match self {
            ConfidenceBand::High => "High",
            ConfidenceBand::Medium => "Medium",
            ConfidenceBand::Low => "Low",
        }
    }
}

/// Severity tag carried by a validation flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagSeverity {
    Critical,
    Warning,
    Info,
}

/// Which audit pass raised a flag; each pass charges its own penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationCheck {
    Schema,
    Consistency,
    TemperatureRange,
    ScoreBounds,
}

/// A single audit finding recorded against a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFlag {
    pub check: ValidationCheck,
    pub severity: FlagSeverity,
    pub message: String,
}

impl ValidationFlag {
    pub fn new(check: ValidationCheck, severity: FlagSeverity, message: impl Into<String>) -> Self {
        Self {
            check,
            severity,
            message: message.into(),
        }
    }

    /// Confidence penalty charged the first time this flag is raised.
    pub fn penalty(&self) -> f64 {
        match self.check {
            ValidationCheck::Schema => 0.05,
            ValidationCheck::Consistency => match self.severity {
                FlagSeverity::Critical => 0.20,
                FlagSeverity::Warning => 0.10,
                FlagSeverity::Info => 0.05,
            },
            ValidationCheck::TemperatureRange => 0.08,
            ValidationCheck::ScoreBounds => 0.06,
        }
    }
}

impl fmt::Display for ValidationFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            FlagSeverity::Critical => write!(f, "CRITICAL: {}", self.message),
            FlagSeverity::Warning => write!(f, "WARNING: {}", self.message),
            FlagSeverity::Info => f.write_str(&self.message),
        }
    }
}

/// Provenance kept alongside the derived attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileDiagnostics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_rgb: Option<[u8; 3]>,
    #[serde(default)]
    pub validation_flags: Vec<ValidationFlag>,
    #[serde(default)]
    pub confidence_adjustment: f64,
}

/// Structured garment attributes derived from one image's signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarmentProfile {
    pub primary_category: PrimaryCategory,
    pub sub_type: SubType,
    pub layering_role: LayeringRole,
    pub thermal_level: ThermalLevel,
    pub insulation_score: f64,
    pub breathability_score: f64,
    pub weather_protection_score: f64,
    pub temp_range: TempRange,
    pub seasonality: Vec<Season>,
    pub formality_level: FormalityLevel,
    pub rain_safe: RainSafety,
    pub wind_resistance: WindResistance,
    pub color_family: ColorFamily,
    pub color_role: ColorRole,
    pub compatibility_weight: f64,
    pub sleeve_length: SleeveLength,
    pub coverage_level: CoverageLevel,
    pub confidence_score: f64,
    pub confidence_band: ConfidenceBand,
    pub needs_review: bool,
    #[serde(default)]
    pub diagnostics: ProfileDiagnostics,
}

impl GarmentProfile {
    /// Re-derive band and review state from the current confidence score.
    pub fn rebase_confidence(&mut self, score: f64) {
        self.confidence_score = score;
        self.confidence_band = ConfidenceBand::from_score(score);
        self.needs_review = self.confidence_band.needs_review();
    }
}

impl Default for GarmentProfile {
    fn default() -> Self {
        Self {
            primary_category: PrimaryCategory::Unknown,
            sub_type: SubType::Unknown,
            layering_role: LayeringRole::Base,
            thermal_level: ThermalLevel::Medium,
            insulation_score: 50.0,
            breathability_score: 50.0,
            weather_protection_score: 30.0,
            temp_range: TempRange::default(),
            seasonality: vec![Season::All],
            formality_level: FormalityLevel::Casual,
            rain_safe: RainSafety::Unknown,
            wind_resistance: WindResistance::Low,
            color_family: ColorFamily::Neutral,
            color_role: ColorRole::Base,
            compatibility_weight: 0.5,
            sleeve_length: SleeveLength::Unknown,
            coverage_level: CoverageLevel::Moderate,
            confidence_score: 0.0,
            confidence_band: ConfidenceBand::Low,
            needs_review: true,
            diagnostics: ProfileDiagnostics::default(),
        }
    }
}

impl AsRef<GarmentProfile> for GarmentProfile {
    fn as_ref(&self) -> &GarmentProfile {
        self
    }
}

/// Round to a fixed number of decimals, ties to even.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
