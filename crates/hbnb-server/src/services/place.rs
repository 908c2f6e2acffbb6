// Place service
// Decision: Amenity ids are resolved before any write, so an unknown id leaves nothing behind

use hbnb_core::{validation, Error, Place, Result};
use std::sync::Arc;
use uuid::Uuid;

use super::AmenityService;
use crate::api::places::{CreatePlaceRequest, UpdatePlaceRequest};
use crate::storage::{
    models::{CreatePlaceRow, UpdatePlace},
    PlaceRow, StorageBackend,
};

pub struct PlaceService {
    db: Arc<StorageBackend>,
}

impl PlaceService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    pub async fn create(&self, owner_id: Uuid, req: CreatePlaceRequest) -> Result<Place> {
        validation::validate_title(&req.title)?;
        validation::validate_description(req.description.as_deref())?;
        validation::validate_price(req.price)?;
        validation::validate_latitude(req.latitude)?;
        validation::validate_longitude(req.longitude)?;

        if self.db.get_user(owner_id).await?.is_none() {
            return Err(Error::validation("Owner not found"));
        }
        let amenity_ids = self.resolve_amenities(req.amenities).await?;

        let input = CreatePlaceRow {
            title: req.title.trim().to_string(),
            description: req.description,
            price: req.price,
            latitude: req.latitude,
            longitude: req.longitude,
            owner_id,
            amenity_ids,
        };
        let row = self.db.create_place(input).await?;

        tracing::info!(place_id = %row.id, owner_id = %owner_id, "Place created");
        self.with_amenities(row).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Place>> {
        match self.db.get_place(id).await? {
            Some(row) => Ok(Some(self.with_amenities(row).await?)),
            None => Ok(None),
        }
    }

    pub async fn list(&self) -> Result<Vec<Place>> {
        let rows = self.db.list_places().await?;

        let mut places = Vec::with_capacity(rows.len());
        for row in rows {
            places.push(self.with_amenities(row).await?);
        }

        Ok(places)
    }

    pub async fn update(&self, id: Uuid, req: UpdatePlaceRequest) -> Result<Option<Place>> {
        if let Some(title) = &req.title {
            validation::validate_title(title)?;
        }
        validation::validate_description(req.description.as_deref())?;
        if let Some(price) = req.price {
            validation::validate_price(price)?;
        }
        if let Some(latitude) = req.latitude {
            validation::validate_latitude(latitude)?;
        }
        if let Some(longitude) = req.longitude {
            validation::validate_longitude(longitude)?;
        }

        let amenity_ids = match req.amenities {
            Some(ids) => Some(self.resolve_amenities(ids).await?),
            None => None,
        };

        let input = UpdatePlace {
            title: req.title.map(|s| s.trim().to_string()),
            description: req.description,
            price: req.price,
            latitude: req.latitude,
            longitude: req.longitude,
            amenity_ids,
        };

        match self.db.update_place(id, input).await? {
            Some(row) => {
                tracing::info!(place_id = %row.id, "Place updated");
                Ok(Some(self.with_amenities(row).await?))
            }
            None => Ok(None),
        }
    }

    /// Delete a place together with its reviews and amenity links
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let deleted = self.db.delete_place(id).await?;
        if deleted {
            tracing::info!(place_id = %id, "Place deleted");
        }
        Ok(deleted)
    }

    /// Check every id exists; duplicates collapse, order is kept
    async fn resolve_amenities(&self, ids: Vec<Uuid>) -> Result<Vec<Uuid>> {
        let mut resolved: Vec<Uuid> = Vec::with_capacity(ids.len());
        for id in ids {
            if resolved.contains(&id) {
                continue;
            }
            if self.db.get_amenity(id).await?.is_none() {
                return Err(Error::validation(format!("Amenity not found: {}", id)));
            }
            resolved.push(id);
        }
        Ok(resolved)
    }

    async fn with_amenities(&self, row: PlaceRow) -> Result<Place> {
        let amenities = self
            .db
            .get_place_amenities(row.id)
            .await?
            .into_iter()
            .map(AmenityService::row_to_amenity)
            .collect();

        Ok(Place {
            id: row.id,
            title: row.title,
            description: row.description,
            price: row.price,
            latitude: row.latitude,
            longitude: row.longitude,
            owner_id: row.owner_id,
            amenities,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::models::{CreateAmenityRow, CreateUserRow};

    async fn setup() -> (Arc<StorageBackend>, PlaceService, Uuid) {
        let db = Arc::new(StorageBackend::in_memory());
        let owner = db
            .create_user(CreateUserRow {
                first_name: "Olive".to_string(),
                last_name: "Owner".to_string(),
                email: "olive@example.com".to_string(),
                password_hash: "hash".to_string(),
                is_admin: false,
            })
            .await
            .unwrap();
        (db.clone(), PlaceService::new(db), owner.id)
    }

    fn request(amenities: Vec<Uuid>) -> CreatePlaceRequest {
        CreatePlaceRequest {
            title: "Seaside flat".to_string(),
            description: Some("Two rooms, one view".to_string()),
            price: 120.0,
            latitude: 43.3,
            longitude: 5.4,
            amenities,
        }
    }

    #[tokio::test]
    async fn test_create_links_amenities() {
        let (db, service, owner_id) = setup().await;
        let wifi = db
            .create_amenity(CreateAmenityRow {
                name: "WiFi".to_string(),
            })
            .await
            .unwrap();

        let place = service
            .create(owner_id, request(vec![wifi.id, wifi.id]))
            .await
            .unwrap();

        assert_eq!(place.owner_id, owner_id);
        assert_eq!(place.amenities.len(), 1);
        assert_eq!(place.amenities[0].name, "WiFi");
    }

    #[tokio::test]
    async fn test_unknown_amenity_rejected() {
        let (_db, service, owner_id) = setup().await;
        let missing = Uuid::now_v7();

        let err = service
            .create(owner_id, request(vec![missing]))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), format!("Amenity not found: {}", missing));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_field_rules() {
        let (_db, service, owner_id) = setup().await;

        let mut req = request(vec![]);
        req.price = -1.0;
        let err = service.create(owner_id, req).await.unwrap_err();
        assert_eq!(err.to_string(), "price must be a non-negative number");

        let mut req = request(vec![]);
        req.latitude = 91.0;
        assert!(matches!(
            service.create(owner_id, req).await,
            Err(Error::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_owner_rejected() {
        let (_db, service, _owner_id) = setup().await;

        let err = service
            .create(Uuid::now_v7(), request(vec![]))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Owner not found");
    }

    #[tokio::test]
    async fn test_partial_update() {
        let (_db, service, owner_id) = setup().await;
        let place = service.create(owner_id, request(vec![])).await.unwrap();

        let updated = service
            .update(
                place.id,
                UpdatePlaceRequest {
                    price: Some(99.5),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.price, 99.5);
        assert_eq!(updated.title, "Seaside flat");
        assert_eq!(updated.description.as_deref(), Some("Two rooms, one view"));
    }
}
