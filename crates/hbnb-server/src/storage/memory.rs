// In-memory storage implementation for dev mode and tests
// Decision: Use parking_lot for thread-safe access
// Decision: UUIDs generated via uuid v7 (time-ordered)
//
// Mirrors the PostgreSQL repository: the same unique constraints are reported
// as UniqueViolation, and place deletion cascades to reviews and amenity links.

use anyhow::Result;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use super::models::*;
use super::UniqueViolation;

/// In-memory database for dev mode
/// All data is stored in memory and lost on restart
#[derive(Default)]
pub struct InMemoryDatabase {
    users: RwLock<HashMap<Uuid, UserRow>>,
    places: RwLock<HashMap<Uuid, PlaceRow>>,
    amenities: RwLock<HashMap<Uuid, AmenityRow>>,
    // (place_id, amenity_id)
    place_amenities: RwLock<HashSet<(Uuid, Uuid)>>,
    reviews: RwLock<HashMap<Uuid, ReviewRow>>,
}

/// Newest first, id as tiebreaker so rows created within one tick stay ordered
fn newest_first<T>(rows: &mut [T], key: impl Fn(&T) -> (DateTime<Utc>, Uuid)) {
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    // ============================================
    // Users
    // ============================================

    pub async fn create_user(&self, input: CreateUserRow) -> Result<UserRow> {
        let mut users = self.users.write();
        if users.values().any(|u| u.email == input.email) {
            return Err(UniqueViolation::new("users_email_key").into());
        }

        let now = Self::now();
        let id = Uuid::now_v7();
        let row = UserRow {
            id,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password_hash: input.password_hash,
            is_admin: input.is_admin,
            created_at: now,
            updated_at: now,
        };
        users.insert(id, row.clone());
        Ok(row)
    }

    pub async fn get_user(&self, id: Uuid) -> Result<Option<UserRow>> {
        Ok(self.users.read().get(&id).cloned())
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    pub async fn list_users(&self) -> Result<Vec<UserRow>> {
        let mut rows: Vec<UserRow> = self.users.read().values().cloned().collect();
        newest_first(&mut rows, |u| (u.created_at, u.id));
        Ok(rows)
    }

    pub async fn update_user(&self, id: Uuid, input: UpdateUser) -> Result<Option<UserRow>> {
        let mut users = self.users.write();

        if let Some(email) = &input.email {
            if users.values().any(|u| u.id != id && &u.email == email) {
                return Err(UniqueViolation::new("users_email_key").into());
            }
        }

        let Some(user) = users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(first_name) = input.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = input.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = input.email {
            user.email = email;
        }
        if let Some(password_hash) = input.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(is_admin) = input.is_admin {
            user.is_admin = is_admin;
        }
        user.updated_at = Self::now();
        Ok(Some(user.clone()))
    }

    // ============================================
    // Places
    // ============================================

    pub async fn create_place(&self, input: CreatePlaceRow) -> Result<PlaceRow> {
        let now = Self::now();
        let id = Uuid::now_v7();
        let row = PlaceRow {
            id,
            title: input.title,
            description: input.description,
            price: input.price,
            latitude: input.latitude,
            longitude: input.longitude,
            owner_id: input.owner_id,
            created_at: now,
            updated_at: now,
        };

        let mut places = self.places.write();
        let mut links = self.place_amenities.write();
        places.insert(id, row.clone());
        links.extend(input.amenity_ids.into_iter().map(|amenity_id| (id, amenity_id)));
        Ok(row)
    }

    pub async fn get_place(&self, id: Uuid) -> Result<Option<PlaceRow>> {
        Ok(self.places.read().get(&id).cloned())
    }

    pub async fn list_places(&self) -> Result<Vec<PlaceRow>> {
        let mut rows: Vec<PlaceRow> = self.places.read().values().cloned().collect();
        newest_first(&mut rows, |p| (p.created_at, p.id));
        Ok(rows)
    }

    pub async fn update_place(&self, id: Uuid, input: UpdatePlace) -> Result<Option<PlaceRow>> {
        let mut places = self.places.write();
        let mut links = self.place_amenities.write();

        let Some(place) = places.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = input.title {
            place.title = title;
        }
        if let Some(description) = input.description {
            place.description = Some(description);
        }
        if let Some(price) = input.price {
            place.price = price;
        }
        if let Some(latitude) = input.latitude {
            place.latitude = latitude;
        }
        if let Some(longitude) = input.longitude {
            place.longitude = longitude;
        }
        if let Some(amenity_ids) = input.amenity_ids {
            links.retain(|(place_id, _)| *place_id != id);
            links.extend(amenity_ids.into_iter().map(|amenity_id| (id, amenity_id)));
        }
        place.updated_at = Self::now();
        Ok(Some(place.clone()))
    }

    pub async fn delete_place(&self, id: Uuid) -> Result<bool> {
        let mut places = self.places.write();
        let mut links = self.place_amenities.write();
        let mut reviews = self.reviews.write();

        if places.remove(&id).is_none() {
            return Ok(false);
        }
        links.retain(|(place_id, _)| *place_id != id);
        reviews.retain(|_, r| r.place_id != id);
        Ok(true)
    }

    pub async fn get_place_amenities(&self, place_id: Uuid) -> Result<Vec<AmenityRow>> {
        let amenities = self.amenities.read();
        let links = self.place_amenities.read();

        let mut rows: Vec<AmenityRow> = links
            .iter()
            .filter(|(pid, _)| *pid == place_id)
            .filter_map(|(_, amenity_id)| amenities.get(amenity_id).cloned())
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    // ============================================
    // Amenities
    // ============================================

    pub async fn create_amenity(&self, input: CreateAmenityRow) -> Result<AmenityRow> {
        let mut amenities = self.amenities.write();
        if amenities.values().any(|a| a.name == input.name) {
            return Err(UniqueViolation::new("amenities_name_key").into());
        }

        let now = Self::now();
        let id = Uuid::now_v7();
        let row = AmenityRow {
            id,
            name: input.name,
            created_at: now,
            updated_at: now,
        };
        amenities.insert(id, row.clone());
        Ok(row)
    }

    pub async fn get_amenity(&self, id: Uuid) -> Result<Option<AmenityRow>> {
        Ok(self.amenities.read().get(&id).cloned())
    }

    pub async fn list_amenities(&self) -> Result<Vec<AmenityRow>> {
        let mut rows: Vec<AmenityRow> = self.amenities.read().values().cloned().collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    pub async fn update_amenity(
        &self,
        id: Uuid,
        input: UpdateAmenity,
    ) -> Result<Option<AmenityRow>> {
        let mut amenities = self.amenities.write();

        if let Some(name) = &input.name {
            if amenities.values().any(|a| a.id != id && &a.name == name) {
                return Err(UniqueViolation::new("amenities_name_key").into());
            }
        }

        let Some(amenity) = amenities.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = input.name {
            amenity.name = name;
        }
        amenity.updated_at = Self::now();
        Ok(Some(amenity.clone()))
    }

    pub async fn delete_amenity(&self, id: Uuid) -> Result<bool> {
        let mut amenities = self.amenities.write();
        let mut links = self.place_amenities.write();

        if amenities.remove(&id).is_none() {
            return Ok(false);
        }
        links.retain(|(_, amenity_id)| *amenity_id != id);
        Ok(true)
    }

    // ============================================
    // Reviews
    // ============================================

    pub async fn create_review(&self, input: CreateReviewRow) -> Result<ReviewRow> {
        let mut reviews = self.reviews.write();
        if reviews
            .values()
            .any(|r| r.user_id == input.user_id && r.place_id == input.place_id)
        {
            return Err(UniqueViolation::new("reviews_user_place_key").into());
        }

        let now = Self::now();
        let id = Uuid::now_v7();
        let row = ReviewRow {
            id,
            text: input.text,
            rating: input.rating,
            user_id: input.user_id,
            place_id: input.place_id,
            created_at: now,
            updated_at: now,
        };
        reviews.insert(id, row.clone());
        Ok(row)
    }

    pub async fn get_review(&self, id: Uuid) -> Result<Option<ReviewRow>> {
        Ok(self.reviews.read().get(&id).cloned())
    }

    pub async fn list_reviews(&self) -> Result<Vec<ReviewRow>> {
        let mut rows: Vec<ReviewRow> = self.reviews.read().values().cloned().collect();
        newest_first(&mut rows, |r| (r.created_at, r.id));
        Ok(rows)
    }

    pub async fn list_reviews_for_place(&self, place_id: Uuid) -> Result<Vec<ReviewRow>> {
        let mut rows: Vec<ReviewRow> = self
            .reviews
            .read()
            .values()
            .filter(|r| r.place_id == place_id)
            .cloned()
            .collect();
        newest_first(&mut rows, |r| (r.created_at, r.id));
        Ok(rows)
    }

    pub async fn update_review(&self, id: Uuid, input: UpdateReview) -> Result<Option<ReviewRow>> {
        let mut reviews = self.reviews.write();
        let Some(review) = reviews.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(text) = input.text {
            review.text = text;
        }
        if let Some(rating) = input.rating {
            review.rating = rating;
        }
        review.updated_at = Self::now();
        Ok(Some(review.clone()))
    }

    pub async fn delete_review(&self, id: Uuid) -> Result<bool> {
        Ok(self.reviews.write().remove(&id).is_some())
    }
}
