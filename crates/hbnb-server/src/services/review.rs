// Review service
// Decision: One review per user and place; owners cannot review their own place

use hbnb_core::{validation, Error, Result, Review};
use std::sync::Arc;
use uuid::Uuid;

use super::unique_or_internal;
use crate::api::reviews::{CreateReviewRequest, UpdateReviewRequest};
use crate::storage::{
    models::{CreateReviewRow, UpdateReview},
    ReviewRow, StorageBackend,
};

const ALREADY_REVIEWED: &str = "You have already reviewed this place";

pub struct ReviewService {
    db: Arc<StorageBackend>,
}

impl ReviewService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    /// Create a review of `place_id` written by `user_id`
    pub async fn create(
        &self,
        user_id: Uuid,
        place_id: Uuid,
        req: CreateReviewRequest,
    ) -> Result<Review> {
        let place = self
            .db
            .get_place(place_id)
            .await?
            .ok_or_else(|| Error::not_found("Place not found"))?;

        validation::validate_review_text(&req.text)?;
        validation::validate_rating(req.rating)?;

        if self.db.get_user(user_id).await?.is_none() {
            return Err(Error::validation("User not found"));
        }
        if place.owner_id == user_id {
            return Err(Error::validation("You cannot review your own place"));
        }
        let already_reviewed = self
            .db
            .list_reviews_for_place(place_id)
            .await?
            .iter()
            .any(|r| r.user_id == user_id);
        if already_reviewed {
            return Err(Error::validation(ALREADY_REVIEWED));
        }

        let input = CreateReviewRow {
            text: req.text.trim().to_string(),
            rating: req.rating,
            user_id,
            place_id,
        };
        let row = self
            .db
            .create_review(input)
            .await
            .map_err(|e| unique_or_internal(e, "reviews_user_place_key", ALREADY_REVIEWED))?;

        tracing::info!(
            review_id = %row.id,
            place_id = %place_id,
            user_id = %user_id,
            rating = row.rating,
            "Review created"
        );
        Ok(Self::row_to_review(row))
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Review>> {
        let row = self.db.get_review(id).await?;
        Ok(row.map(Self::row_to_review))
    }

    pub async fn list(&self) -> Result<Vec<Review>> {
        let rows = self.db.list_reviews().await?;
        Ok(rows.into_iter().map(Self::row_to_review).collect())
    }

    /// Reviews of one place, newest first
    pub async fn list_for_place(&self, place_id: Uuid) -> Result<Vec<Review>> {
        if self.db.get_place(place_id).await?.is_none() {
            return Err(Error::not_found("Place not found"));
        }

        let rows = self.db.list_reviews_for_place(place_id).await?;
        Ok(rows.into_iter().map(Self::row_to_review).collect())
    }

    /// Only `text` and `rating` can change
    pub async fn update(&self, id: Uuid, req: UpdateReviewRequest) -> Result<Option<Review>> {
        if let Some(text) = &req.text {
            validation::validate_review_text(text)?;
        }
        if let Some(rating) = req.rating {
            validation::validate_rating(rating)?;
        }

        let input = UpdateReview {
            text: req.text.map(|s| s.trim().to_string()),
            rating: req.rating,
        };
        let row = self.db.update_review(id, input).await?;

        if let Some(row) = &row {
            tracing::info!(review_id = %row.id, "Review updated");
        }
        Ok(row.map(Self::row_to_review))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let deleted = self.db.delete_review(id).await?;
        if deleted {
            tracing::info!(review_id = %id, "Review deleted");
        }
        Ok(deleted)
    }

    fn row_to_review(row: ReviewRow) -> Review {
        Review {
            id: row.id,
            text: row.text,
            rating: row.rating,
            user_id: row.user_id,
            place_id: row.place_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::models::{CreatePlaceRow, CreateUserRow};

    struct Fixture {
        service: ReviewService,
        owner_id: Uuid,
        guest_id: Uuid,
        place_id: Uuid,
    }

    async fn create_user(db: &StorageBackend, email: &str) -> Uuid {
        db.create_user(CreateUserRow {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            is_admin: false,
        })
        .await
        .unwrap()
        .id
    }

    async fn fixture() -> Fixture {
        let db = Arc::new(StorageBackend::in_memory());
        let owner_id = create_user(&db, "owner@example.com").await;
        let guest_id = create_user(&db, "guest@example.com").await;
        let place = db
            .create_place(CreatePlaceRow {
                title: "Loft".to_string(),
                description: None,
                price: 60.0,
                latitude: 0.0,
                longitude: 0.0,
                owner_id,
                amenity_ids: vec![],
            })
            .await
            .unwrap();

        Fixture {
            service: ReviewService::new(db),
            owner_id,
            guest_id,
            place_id: place.id,
        }
    }

    fn review(rating: i32) -> CreateReviewRequest {
        CreateReviewRequest {
            text: "Great stay".to_string(),
            rating,
            place_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_list_for_place() {
        let f = fixture().await;
        let created = f
            .service
            .create(f.guest_id, f.place_id, review(5))
            .await
            .unwrap();

        assert_eq!(created.user_id, f.guest_id);
        let listed = f.service.list_for_place(f.place_id).await.unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn test_missing_place_is_not_found() {
        let f = fixture().await;

        let err = f
            .service
            .create(f.guest_id, Uuid::now_v7(), review(5))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(ref m) if m == "Place not found"));
        assert!(matches!(
            f.service.list_for_place(Uuid::now_v7()).await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_owner_cannot_review_own_place() {
        let f = fixture().await;

        let err = f
            .service
            .create(f.owner_id, f.place_id, review(5))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "You cannot review your own place");
    }

    #[tokio::test]
    async fn test_second_review_rejected() {
        let f = fixture().await;
        f.service
            .create(f.guest_id, f.place_id, review(4))
            .await
            .unwrap();

        let err = f
            .service
            .create(f.guest_id, f.place_id, review(2))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "You have already reviewed this place");
    }

    #[tokio::test]
    async fn test_rating_bounds() {
        let f = fixture().await;

        for rating in [0, 6] {
            let err = f
                .service
                .create(f.guest_id, f.place_id, review(rating))
                .await
                .unwrap_err();
            assert_eq!(err.to_string(), "rating must be between 1 and 5");
        }
    }

    #[tokio::test]
    async fn test_update_text_and_rating() {
        let f = fixture().await;
        let created = f
            .service
            .create(f.guest_id, f.place_id, review(3))
            .await
            .unwrap();

        let updated = f
            .service
            .update(
                created.id,
                UpdateReviewRequest {
                    rating: Some(4),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.rating, 4);
        assert_eq!(updated.text, "Great stay");
        assert_eq!(updated.place_id, f.place_id);
    }
}
