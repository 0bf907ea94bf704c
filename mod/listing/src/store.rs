use std::sync::Arc;

use carlot_core::ServiceError;
use carlot_kv::KVStore;

use crate::model::Car;

/// Key prefix for car records in the KV store.
const CAR_PREFIX: &str = "car:";

/// Persistent storage for car records, backed by a KVStore.
///
/// Records are stored as JSON under `car:{id}`. Listing scans the prefix,
/// so enumeration order is the store's key order — stable and deterministic
/// for a given store state.
pub struct CarStore {
    kv: Arc<dyn KVStore>,
}

impl CarStore {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self { kv }
    }

    fn key(id: &str) -> String {
        format!("{CAR_PREFIX}{id}")
    }

    /// Get a car by id. Returns None if no record exists.
    pub fn get(&self, id: &str) -> Result<Option<Car>, ServiceError> {
        let bytes = self
            .kv
            .get(&Self::key(id))
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        match bytes {
            Some(data) => {
                let car = serde_json::from_slice(&data)
                    .map_err(|e| ServiceError::Internal(e.to_string()))?;
                Ok(Some(car))
            }
            None => Ok(None),
        }
    }

    /// Insert or overwrite a car record, keyed by its id.
    pub fn put(&self, car: &Car) -> Result<(), ServiceError> {
        let data =
            serde_json::to_vec(car).map_err(|e| ServiceError::Internal(e.to_string()))?;
        self.kv
            .set(&Self::key(&car.id), &data)
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(())
    }

    /// Return every car record, in store key order.
    pub fn list(&self) -> Result<Vec<Car>, ServiceError> {
        let entries = self
            .kv
            .scan(CAR_PREFIX)
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        let mut cars = Vec::with_capacity(entries.len());
        for (_, data) in entries {
            let car: Car = serde_json::from_slice(&data)
                .map_err(|e| ServiceError::Internal(e.to_string()))?;
            cars.push(car);
        }
        Ok(cars)
    }
}
