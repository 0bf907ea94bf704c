use std::sync::{Arc, Mutex};

use carlot_core::{ServiceError, new_id, now_rfc3339};
use carlot_kv::KVStore;
use tracing::debug;

use crate::model::{Car, CarPayload};
use crate::store::CarStore;

/// Listing service — validation and lifecycle logic for car records.
///
/// Holds no cached state between calls: every operation re-reads from the
/// store before mutating and writes the full record back.
pub struct ListingService {
    store: CarStore,
    // Serializes read-modify-write sequences (update, toggle). Separate
    // get/set transactions would otherwise allow lost updates under
    // concurrent handlers.
    write_lock: Mutex<()>,
}

impl ListingService {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self {
            store: CarStore::new(kv),
            write_lock: Mutex::new(()),
        }
    }

    /// Create a new car listing.
    ///
    /// Generates the id and `created_at`; optional text fields default to
    /// the empty string. Returns the persisted record.
    pub fn create(&self, payload: CarPayload) -> Result<Car, ServiceError> {
        validate_payload(&payload)?;

        let car = Car {
            id: new_id(),
            make: payload.make,
            model: payload.model,
            year: payload.year,
            price: payload.price,
            description: payload.description.unwrap_or_default(),
            image_url: payload.image_url.unwrap_or_default(),
            is_available: payload.is_available,
            owner_email: payload.owner_email,
            created_at: now_rfc3339(),
            updated_at: None,
        };

        self.store.put(&car)?;
        debug!(id = %car.id, "created car listing");
        Ok(car)
    }

    /// Full-replace update of an existing listing.
    ///
    /// Every mutable field is overwritten from the payload; `id` and
    /// `created_at` are preserved, `updated_at` is set to the current time.
    pub fn update(&self, id: &str, payload: CarPayload) -> Result<Car, ServiceError> {
        validate_payload(&payload)?;

        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| ServiceError::Internal(e.to_string()))?;

        let existing = self
            .store
            .get(id)?
            .ok_or_else(|| not_found(id))?;

        let car = Car {
            id: existing.id,
            make: payload.make,
            model: payload.model,
            year: payload.year,
            price: payload.price,
            description: payload.description.unwrap_or_default(),
            image_url: payload.image_url.unwrap_or_default(),
            is_available: payload.is_available,
            owner_email: payload.owner_email,
            created_at: existing.created_at,
            updated_at: Some(now_rfc3339()),
        };

        self.store.put(&car)?;
        debug!(id = %car.id, "updated car listing");
        Ok(car)
    }

    /// Flip a listing's `is_available` flag.
    pub fn toggle_availability(&self, id: &str) -> Result<(), ServiceError> {
        if id.is_empty() {
            return Err(ServiceError::Validation("id must not be empty".into()));
        }

        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| ServiceError::Internal(e.to_string()))?;

        let mut car = self
            .store
            .get(id)?
            .ok_or_else(|| not_found(id))?;

        car.is_available = !car.is_available;
        car.updated_at = Some(now_rfc3339());

        self.store.put(&car)?;
        debug!(id = %car.id, available = car.is_available, "toggled availability");
        Ok(())
    }

    /// Return every listing, in store key order.
    pub fn list(&self) -> Result<Vec<Car>, ServiceError> {
        self.store.list()
    }

    /// Get a listing by id.
    pub fn get(&self, id: &str) -> Result<Car, ServiceError> {
        if id.is_empty() {
            return Err(ServiceError::Validation("id must not be empty".into()));
        }
        self.store.get(id)?.ok_or_else(|| not_found(id))
    }
}

fn not_found(id: &str) -> ServiceError {
    ServiceError::NotFound(format!("car '{id}' not found"))
}

/// Field rules shared by create and update.
fn validate_payload(payload: &CarPayload) -> Result<(), ServiceError> {
    if payload.make.is_empty() {
        return Err(ServiceError::Validation("make must not be empty".into()));
    }
    if payload.model.is_empty() {
        return Err(ServiceError::Validation("model must not be empty".into()));
    }
    if payload.year <= 0 {
        return Err(ServiceError::Validation("year must be positive".into()));
    }
    if payload.price < 0 {
        return Err(ServiceError::Validation("price must not be negative".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use carlot_kv::RedbStore;

    fn test_service() -> ListingService {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let kv = Arc::new(RedbStore::open(tmp.path()).unwrap());
        ListingService::new(kv)
    }

    fn valid_payload() -> CarPayload {
        CarPayload {
            make: "Toyota".into(),
            model: "Corolla".into(),
            year: 2018,
            price: 15000,
            description: None,
            image_url: None,
            is_available: true,
            owner_email: "a@x.com".into(),
        }
    }

    #[test]
    fn create_assigns_unique_ids() {
        let svc = test_service();

        let a = svc.create(valid_payload()).unwrap();
        let b = svc.create(valid_payload()).unwrap();

        assert!(!a.id.is_empty());
        assert!(!b.id.is_empty());
        assert_ne!(a.id, b.id);
        assert!(a.updated_at.is_none());
        assert!(!a.created_at.is_empty());
    }

    #[test]
    fn create_defaults_optional_text_fields() {
        let svc = test_service();
        let car = svc.create(valid_payload()).unwrap();
        assert_eq!(car.description, "");
        assert_eq!(car.image_url, "");
    }

    #[test]
    fn create_rejects_empty_make() {
        let svc = test_service();
        let payload = CarPayload {
            make: "".into(),
            ..valid_payload()
        };
        let err = svc.create(payload).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn create_rejects_empty_model() {
        let svc = test_service();
        let payload = CarPayload {
            model: "".into(),
            ..valid_payload()
        };
        assert!(matches!(
            svc.create(payload).unwrap_err(),
            ServiceError::Validation(_)
        ));
    }

    #[test]
    fn create_year_bounds() {
        let svc = test_service();

        let zero = CarPayload {
            year: 0,
            ..valid_payload()
        };
        assert!(matches!(
            svc.create(zero).unwrap_err(),
            ServiceError::Validation(_)
        ));

        let ok = CarPayload {
            year: 2020,
            ..valid_payload()
        };
        assert_eq!(svc.create(ok).unwrap().year, 2020);
    }

    #[test]
    fn create_price_bounds() {
        let svc = test_service();

        let negative = CarPayload {
            price: -1,
            ..valid_payload()
        };
        assert!(matches!(
            svc.create(negative).unwrap_err(),
            ServiceError::Validation(_)
        ));

        let free = CarPayload {
            price: 0,
            ..valid_payload()
        };
        assert_eq!(svc.create(free).unwrap().price, 0);
    }

    #[test]
    fn create_then_get_roundtrip() {
        let svc = test_service();
        let created = svc.create(valid_payload()).unwrap();
        let fetched = svc.get(&created.id).unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn get_rejects_empty_id() {
        let svc = test_service();
        assert!(matches!(
            svc.get("").unwrap_err(),
            ServiceError::Validation(_)
        ));
    }

    #[test]
    fn get_missing_is_not_found() {
        let svc = test_service();
        assert!(matches!(
            svc.get("does-not-exist").unwrap_err(),
            ServiceError::NotFound(_)
        ));
    }

    #[test]
    fn update_replaces_all_mutable_fields() {
        let svc = test_service();
        let created = svc.create(valid_payload()).unwrap();

        let updated = svc
            .update(
                &created.id,
                CarPayload {
                    make: "Honda".into(),
                    model: "Civic".into(),
                    year: 2021,
                    price: 18000,
                    description: Some("like new".into()),
                    image_url: None,
                    is_available: false,
                    owner_email: "b@x.com".into(),
                },
            )
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.make, "Honda");
        assert_eq!(updated.model, "Civic");
        assert_eq!(updated.year, 2021);
        assert_eq!(updated.price, 18000);
        assert_eq!(updated.description, "like new");
        assert_eq!(updated.image_url, "");
        assert!(!updated.is_available);
        assert_eq!(updated.owner_email, "b@x.com");
        assert!(updated.updated_at.is_some());

        // Persisted, not just returned.
        assert_eq!(svc.get(&created.id).unwrap(), updated);
    }

    #[test]
    fn update_validates_before_lookup() {
        let svc = test_service();
        let payload = CarPayload {
            year: -5,
            ..valid_payload()
        };
        assert!(matches!(
            svc.update("does-not-exist", payload).unwrap_err(),
            ServiceError::Validation(_)
        ));
    }

    #[test]
    fn update_missing_id_leaves_store_unchanged() {
        let svc = test_service();
        svc.create(valid_payload()).unwrap();

        let err = svc.update("does-not-exist", valid_payload()).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(svc.list().unwrap().len(), 1);
    }

    #[test]
    fn toggle_twice_is_identity() {
        let svc = test_service();
        let car = svc.create(valid_payload()).unwrap();
        assert!(car.is_available);

        svc.toggle_availability(&car.id).unwrap();
        assert!(!svc.get(&car.id).unwrap().is_available);

        svc.toggle_availability(&car.id).unwrap();
        assert!(svc.get(&car.id).unwrap().is_available);
    }

    #[test]
    fn toggle_rejects_empty_id() {
        let svc = test_service();
        assert!(matches!(
            svc.toggle_availability("").unwrap_err(),
            ServiceError::Validation(_)
        ));
    }

    #[test]
    fn toggle_missing_is_not_found() {
        let svc = test_service();
        assert!(matches!(
            svc.toggle_availability("does-not-exist").unwrap_err(),
            ServiceError::NotFound(_)
        ));
    }

    #[test]
    fn toggle_sets_updated_at() {
        let svc = test_service();
        let car = svc.create(valid_payload()).unwrap();
        assert!(car.updated_at.is_none());

        svc.toggle_availability(&car.id).unwrap();
        assert!(svc.get(&car.id).unwrap().updated_at.is_some());
    }

    #[test]
    fn list_returns_every_created_record() {
        let svc = test_service();
        let mut ids = Vec::new();
        for _ in 0..5 {
            ids.push(svc.create(valid_payload()).unwrap().id);
        }

        let listed = svc.list().unwrap();
        assert_eq!(listed.len(), 5);
        let mut listed_ids: Vec<String> = listed.into_iter().map(|c| c.id).collect();
        listed_ids.sort();
        ids.sort();
        assert_eq!(listed_ids, ids);
    }

    #[test]
    fn scenario_corolla_lifecycle() {
        let svc = test_service();

        let car = svc
            .create(CarPayload {
                make: "Toyota".into(),
                model: "Corolla".into(),
                year: 2018,
                price: 15000,
                description: None,
                image_url: None,
                is_available: true,
                owner_email: "a@x.com".into(),
            })
            .unwrap();
        assert_eq!(car.description, "");
        assert_eq!(car.image_url, "");
        assert!(car.is_available);

        svc.toggle_availability(&car.id).unwrap();

        let fetched = svc.get(&car.id).unwrap();
        assert!(!fetched.is_available);
    }
}
