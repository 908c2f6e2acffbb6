// Amenity service

use hbnb_core::{validation, Amenity, Result};
use std::sync::Arc;
use uuid::Uuid;

use super::unique_or_internal;
use crate::api::amenities::{CreateAmenityRequest, UpdateAmenityRequest};
use crate::storage::{
    models::{CreateAmenityRow, UpdateAmenity},
    AmenityRow, StorageBackend,
};

const NAME_TAKEN: &str = "Amenity already exists";

pub struct AmenityService {
    db: Arc<StorageBackend>,
}

impl AmenityService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    pub async fn create(&self, req: CreateAmenityRequest) -> Result<Amenity> {
        validation::validate_amenity_name(&req.name)?;

        let input = CreateAmenityRow {
            name: req.name.trim().to_string(),
        };
        let row = self
            .db
            .create_amenity(input)
            .await
            .map_err(|e| unique_or_internal(e, "amenities_name_key", NAME_TAKEN))?;

        tracing::info!(amenity_id = %row.id, name = %row.name, "Amenity created");
        Ok(Self::row_to_amenity(row))
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Amenity>> {
        let row = self.db.get_amenity(id).await?;
        Ok(row.map(Self::row_to_amenity))
    }

    pub async fn list(&self) -> Result<Vec<Amenity>> {
        let rows = self.db.list_amenities().await?;
        Ok(rows.into_iter().map(Self::row_to_amenity).collect())
    }

    pub async fn update(&self, id: Uuid, req: UpdateAmenityRequest) -> Result<Option<Amenity>> {
        if let Some(name) = &req.name {
            validation::validate_amenity_name(name)?;
        }

        let input = UpdateAmenity {
            name: req.name.map(|s| s.trim().to_string()),
        };
        let row = self
            .db
            .update_amenity(id, input)
            .await
            .map_err(|e| unique_or_internal(e, "amenities_name_key", NAME_TAKEN))?;

        if let Some(row) = &row {
            tracing::info!(amenity_id = %row.id, "Amenity updated");
        }
        Ok(row.map(Self::row_to_amenity))
    }

    /// Delete an amenity; places linking to it lose the link
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let deleted = self.db.delete_amenity(id).await?;
        if deleted {
            tracing::info!(amenity_id = %id, "Amenity deleted");
        }
        Ok(deleted)
    }

    pub(crate) fn row_to_amenity(row: AmenityRow) -> Amenity {
        Amenity {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbnb_core::Error;

    fn service() -> AmenityService {
        AmenityService::new(Arc::new(StorageBackend::in_memory()))
    }

    fn named(name: &str) -> CreateAmenityRequest {
        CreateAmenityRequest {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_list_sorted() {
        let service = service();
        service.create(named("Pool")).await.unwrap();
        service.create(named(" WiFi ")).await.unwrap();
        service.create(named("Air conditioning")).await.unwrap();

        let names: Vec<String> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["Air conditioning", "Pool", "WiFi"]);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let service = service();
        service.create(named("WiFi")).await.unwrap();

        let err = service.create(named("WiFi")).await.unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m == "Amenity already exists"));
    }

    #[tokio::test]
    async fn test_rename_onto_existing_name_rejected() {
        let service = service();
        service.create(named("WiFi")).await.unwrap();
        let pool = service.create(named("Pool")).await.unwrap();

        let err = service
            .update(
                pool.id,
                UpdateAmenityRequest {
                    name: Some("WiFi".to_string()),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Amenity already exists");
    }

    #[tokio::test]
    async fn test_empty_name_rejected() {
        let err = service().create(named("   ")).await.unwrap_err();
        assert_eq!(err.to_string(), "name is required");
    }

    #[tokio::test]
    async fn test_delete() {
        let service = service();
        let wifi = service.create(named("WiFi")).await.unwrap();

        assert!(service.delete(wifi.id).await.unwrap());
        assert!(!service.delete(wifi.id).await.unwrap());
        assert!(service.get(wifi.id).await.unwrap().is_none());
    }
}
