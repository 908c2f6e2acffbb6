// Storage backend abstraction
// Decision: Use enum dispatch for simplicity over trait objects
//
// This module provides a unified StorageBackend enum that can work with
// either PostgreSQL (production) or in-memory (dev mode) storage.

use anyhow::Result;
use std::sync::Arc;
use uuid::Uuid;

use super::memory::InMemoryDatabase;
use super::models::*;
use super::repositories::Database;

/// Storage backend that can be either PostgreSQL or in-memory
#[derive(Clone)]
pub enum StorageBackend {
    /// PostgreSQL database (production)
    Postgres(Database),
    /// In-memory database (dev mode and tests)
    InMemory(Arc<InMemoryDatabase>),
}

impl StorageBackend {
    /// Create a PostgreSQL storage backend from a database URL
    pub async fn postgres(database_url: &str) -> Result<Self> {
        let db = Database::from_url(database_url).await?;
        Ok(Self::Postgres(db))
    }

    /// Create an in-memory storage backend
    pub fn in_memory() -> Self {
        Self::InMemory(Arc::new(InMemoryDatabase::new()))
    }

    /// Check if this is dev mode (in-memory)
    pub fn is_dev_mode(&self) -> bool {
        matches!(self, Self::InMemory(_))
    }

    /// Run migrations (no-op for in-memory)
    pub async fn migrate(&self) -> Result<()> {
        match self {
            Self::Postgres(db) => db.migrate().await,
            Self::InMemory(_) => Ok(()),
        }
    }

    // ============================================
    // Users
    // ============================================

    pub async fn create_user(&self, input: CreateUserRow) -> Result<UserRow> {
        match self {
            Self::Postgres(db) => db.create_user(input).await,
            Self::InMemory(db) => db.create_user(input).await,
        }
    }

    pub async fn get_user(&self, id: Uuid) -> Result<Option<UserRow>> {
        match self {
            Self::Postgres(db) => db.get_user(id).await,
            Self::InMemory(db) => db.get_user(id).await,
        }
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        match self {
            Self::Postgres(db) => db.get_user_by_email(email).await,
            Self::InMemory(db) => db.get_user_by_email(email).await,
        }
    }

    pub async fn list_users(&self) -> Result<Vec<UserRow>> {
        match self {
            Self::Postgres(db) => db.list_users().await,
            Self::InMemory(db) => db.list_users().await,
        }
    }

    pub async fn update_user(&self, id: Uuid, input: UpdateUser) -> Result<Option<UserRow>> {
        match self {
            Self::Postgres(db) => db.update_user(id, input).await,
            Self::InMemory(db) => db.update_user(id, input).await,
        }
    }

    // ============================================
    // Places
    // ============================================

    pub async fn create_place(&self, input: CreatePlaceRow) -> Result<PlaceRow> {
        match self {
            Self::Postgres(db) => db.create_place(input).await,
            Self::InMemory(db) => db.create_place(input).await,
        }
    }

    pub async fn get_place(&self, id: Uuid) -> Result<Option<PlaceRow>> {
        match self {
            Self::Postgres(db) => db.get_place(id).await,
            Self::InMemory(db) => db.get_place(id).await,
        }
    }

    pub async fn list_places(&self) -> Result<Vec<PlaceRow>> {
        match self {
            Self::Postgres(db) => db.list_places().await,
            Self::InMemory(db) => db.list_places().await,
        }
    }

    pub async fn update_place(&self, id: Uuid, input: UpdatePlace) -> Result<Option<PlaceRow>> {
        match self {
            Self::Postgres(db) => db.update_place(id, input).await,
            Self::InMemory(db) => db.update_place(id, input).await,
        }
    }

    pub async fn delete_place(&self, id: Uuid) -> Result<bool> {
        match self {
            Self::Postgres(db) => db.delete_place(id).await,
            Self::InMemory(db) => db.delete_place(id).await,
        }
    }

    pub async fn get_place_amenities(&self, place_id: Uuid) -> Result<Vec<AmenityRow>> {
        match self {
            Self::Postgres(db) => db.get_place_amenities(place_id).await,
            Self::InMemory(db) => db.get_place_amenities(place_id).await,
        }
    }

    // ============================================
    // Amenities
    // ============================================

    pub async fn create_amenity(&self, input: CreateAmenityRow) -> Result<AmenityRow> {
        match self {
            Self::Postgres(db) => db.create_amenity(input).await,
            Self::InMemory(db) => db.create_amenity(input).await,
        }
    }

    pub async fn get_amenity(&self, id: Uuid) -> Result<Option<AmenityRow>> {
        match self {
            Self::Postgres(db) => db.get_amenity(id).await,
            Self::InMemory(db) => db.get_amenity(id).await,
        }
    }

    pub async fn list_amenities(&self) -> Result<Vec<AmenityRow>> {
        match self {
            Self::Postgres(db) => db.list_amenities().await,
            Self::InMemory(db) => db.list_amenities().await,
        }
    }

    pub async fn update_amenity(
        &self,
        id: Uuid,
        input: UpdateAmenity,
    ) -> Result<Option<AmenityRow>> {
        match self {
            Self::Postgres(db) => db.update_amenity(id, input).await,
            Self::InMemory(db) => db.update_amenity(id, input).await,
        }
    }

    pub async fn delete_amenity(&self, id: Uuid) -> Result<bool> {
        match self {
            Self::Postgres(db) => db.delete_amenity(id).await,
            Self::InMemory(db) => db.delete_amenity(id).await,
        }
    }

    // ============================================
    // Reviews
    // ============================================

    pub async fn create_review(&self, input: CreateReviewRow) -> Result<ReviewRow> {
        match self {
            Self::Postgres(db) => db.create_review(input).await,
            Self::InMemory(db) => db.create_review(input).await,
        }
    }

    pub async fn get_review(&self, id: Uuid) -> Result<Option<ReviewRow>> {
        match self {
            Self::Postgres(db) => db.get_review(id).await,
            Self::InMemory(db) => db.get_review(id).await,
        }
    }

    pub async fn list_reviews(&self) -> Result<Vec<ReviewRow>> {
        match self {
            Self::Postgres(db) => db.list_reviews().await,
            Self::InMemory(db) => db.list_reviews().await,
        }
    }

    pub async fn list_reviews_for_place(&self, place_id: Uuid) -> Result<Vec<ReviewRow>> {
        match self {
            Self::Postgres(db) => db.list_reviews_for_place(place_id).await,
            Self::InMemory(db) => db.list_reviews_for_place(place_id).await,
        }
    }

    pub async fn update_review(&self, id: Uuid, input: UpdateReview) -> Result<Option<ReviewRow>> {
        match self {
            Self::Postgres(db) => db.update_review(id, input).await,
            Self::InMemory(db) => db.update_review(id, input).await,
        }
    }

    pub async fn delete_review(&self, id: Uuid) -> Result<bool> {
        match self {
            Self::Postgres(db) => db.delete_review(id).await,
            Self::InMemory(db) => db.delete_review(id).await,
        }
    }
}
