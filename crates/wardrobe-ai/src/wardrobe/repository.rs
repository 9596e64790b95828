use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::GarmentProfile;

/// Store-assigned garment identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GarmentId(pub String);

impl GarmentId {
    pub fn from_sequence(value: u64) -> Self {
        Self(format!("garment-{value:06}"))
    }
}

impl fmt::Display for GarmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persisted garment: the validated profile plus the store's identifier and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarmentRecord {
    pub id: GarmentId,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub profile: GarmentProfile,
}

impl AsRef<GarmentProfile> for GarmentRecord {
    fn as_ref(&self) -> &GarmentProfile {
        &self.profile
    }
}

/// Storage abstraction so the service can be exercised without a database.
///
/// Implementations assign the identifier and creation time on insert and return
/// `list_all` newest first.
pub trait GarmentStore: Send + Sync {
    fn insert(&self, profile: GarmentProfile) -> Result<GarmentRecord, StoreError>;
    fn list_all(&self) -> Result<Vec<GarmentRecord>, StoreError>;
    fn get(&self, id: &GarmentId) -> Result<Option<GarmentRecord>, StoreError>;
    /// Returns `false` when nothing was stored under `id`.
    fn delete(&self, id: &GarmentId) -> Result<bool, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("garment not found")]
    NotFound,
    #[error("garment store unavailable: {0}")]
    Unavailable(String),
}
