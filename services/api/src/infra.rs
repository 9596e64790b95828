use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use wardrobe_ai::wardrobe::{GarmentId, GarmentProfile, GarmentRecord, GarmentStore, StoreError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local garment store; records are kept newest first.
#[derive(Default, Clone)]
pub(crate) struct InMemoryGarmentStore {
    records: Arc<Mutex<Vec<GarmentRecord>>>,
    sequence: Arc<AtomicU64>,
}

impl InMemoryGarmentStore {
    fn records(&self) -> Result<MutexGuard<'_, Vec<GarmentRecord>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("garment store lock poisoned".to_string()))
    }
}

impl GarmentStore for InMemoryGarmentStore {
    fn insert(&self, profile: GarmentProfile) -> Result<GarmentRecord, StoreError> {
        let mut guard = self.records()?;
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let record = GarmentRecord {
            id: GarmentId::from_sequence(sequence),
            created_at: Utc::now(),
            profile,
        };
        guard.insert(0, record.clone());
        Ok(record)
    }

    fn list_all(&self) -> Result<Vec<GarmentRecord>, StoreError> {
        Ok(self.records()?.clone())
    }

    fn get(&self, id: &GarmentId) -> Result<Option<GarmentRecord>, StoreError> {
        let guard = self.records()?;
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn delete(&self, id: &GarmentId) -> Result<bool, StoreError> {
        let mut guard = self.records()?;
        let before = guard.len();
        guard.retain(|record| &record.id != id);
        Ok(guard.len() != before)
    }
}
