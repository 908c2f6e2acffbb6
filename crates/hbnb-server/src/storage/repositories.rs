// PostgreSQL repository layer
// Decision: Runtime-checked queries (query_as) so builds never need a live database
// Decision: Writes touching several tables run in one transaction

use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::models::*;
use super::UniqueViolation;

const USER_COLUMNS: &str =
    "id, first_name, last_name, email, password_hash, is_admin, created_at, updated_at";
const PLACE_COLUMNS: &str =
    "id, title, description, price, latitude, longitude, owner_id, created_at, updated_at";
const REVIEW_COLUMNS: &str = "id, text, rating, user_id, place_id, created_at, updated_at";
const AMENITY_COLUMNS: &str = "id, name, created_at, updated_at";

/// Translate unique-constraint failures into `UniqueViolation`
fn map_unique(err: sqlx::Error) -> anyhow::Error {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return UniqueViolation::new(db_err.constraint().unwrap_or("unknown")).into();
        }
    }
    err.into()
}

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create database connection from URL
    pub async fn from_url(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("Failed to connect to PostgreSQL")?;
        Ok(Self { pool })
    }

    /// Apply pending migrations from ./migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    // ============================================
    // Users
    // ============================================

    pub async fn create_user(&self, input: CreateUserRow) -> Result<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (id, first_name, last_name, email, password_hash, is_admin)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::now_v7())
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(input.is_admin)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique)?;

        Ok(row)
    }

    pub async fn get_user(&self, id: Uuid) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_users(&self) -> Result<Vec<UserRow>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn update_user(&self, id: Uuid, input: UpdateUser) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                password_hash = COALESCE($5, password_hash),
                is_admin = COALESCE($6, is_admin),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(input.is_admin)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique)?;

        Ok(row)
    }

    // ============================================
    // Places
    // ============================================

    async fn replace_place_amenities(
        tx: &mut Transaction<'_, Postgres>,
        place_id: Uuid,
        amenity_ids: &[Uuid],
    ) -> Result<()> {
        sqlx::query("DELETE FROM place_amenities WHERE place_id = $1")
            .bind(place_id)
            .execute(&mut **tx)
            .await?;

        for amenity_id in amenity_ids {
            sqlx::query(
                r#"
                INSERT INTO place_amenities (place_id, amenity_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(place_id)
            .bind(amenity_id)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }

    pub async fn create_place(&self, input: CreatePlaceRow) -> Result<PlaceRow> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, PlaceRow>(&format!(
            r#"
            INSERT INTO places (id, title, description, price, latitude, longitude, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {PLACE_COLUMNS}
            "#
        ))
        .bind(Uuid::now_v7())
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(input.owner_id)
        .fetch_one(&mut *tx)
        .await?;

        Self::replace_place_amenities(&mut tx, row.id, &input.amenity_ids).await?;
        tx.commit().await?;

        Ok(row)
    }

    pub async fn get_place(&self, id: Uuid) -> Result<Option<PlaceRow>> {
        let row = sqlx::query_as::<_, PlaceRow>(&format!(
            "SELECT {PLACE_COLUMNS} FROM places WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_places(&self) -> Result<Vec<PlaceRow>> {
        let rows = sqlx::query_as::<_, PlaceRow>(&format!(
            "SELECT {PLACE_COLUMNS} FROM places ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn update_place(&self, id: Uuid, input: UpdatePlace) -> Result<Option<PlaceRow>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, PlaceRow>(&format!(
            r#"
            UPDATE places
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                latitude = COALESCE($5, latitude),
                longitude = COALESCE($6, longitude),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PLACE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.latitude)
        .bind(input.longitude)
        .fetch_optional(&mut *tx)
        .await?;

        if let (Some(row), Some(amenity_ids)) = (&row, &input.amenity_ids) {
            Self::replace_place_amenities(&mut tx, row.id, amenity_ids).await?;
        }
        tx.commit().await?;

        Ok(row)
    }

    /// Delete a place; reviews and amenity links go with it (ON DELETE CASCADE)
    pub async fn delete_place(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM places WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn get_place_amenities(&self, place_id: Uuid) -> Result<Vec<AmenityRow>> {
        let rows = sqlx::query_as::<_, AmenityRow>(
            r#"
            SELECT a.id, a.name, a.created_at, a.updated_at
            FROM amenities a
            JOIN place_amenities pa ON pa.amenity_id = a.id
            WHERE pa.place_id = $1
            ORDER BY a.name
            "#,
        )
        .bind(place_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // ============================================
    // Amenities
    // ============================================

    pub async fn create_amenity(&self, input: CreateAmenityRow) -> Result<AmenityRow> {
        let row = sqlx::query_as::<_, AmenityRow>(&format!(
            r#"
            INSERT INTO amenities (id, name)
            VALUES ($1, $2)
            RETURNING {AMENITY_COLUMNS}
            "#
        ))
        .bind(Uuid::now_v7())
        .bind(&input.name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique)?;

        Ok(row)
    }

    pub async fn get_amenity(&self, id: Uuid) -> Result<Option<AmenityRow>> {
        let row = sqlx::query_as::<_, AmenityRow>(&format!(
            "SELECT {AMENITY_COLUMNS} FROM amenities WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_amenities(&self) -> Result<Vec<AmenityRow>> {
        let rows = sqlx::query_as::<_, AmenityRow>(&format!(
            "SELECT {AMENITY_COLUMNS} FROM amenities ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn update_amenity(
        &self,
        id: Uuid,
        input: UpdateAmenity,
    ) -> Result<Option<AmenityRow>> {
        let row = sqlx::query_as::<_, AmenityRow>(&format!(
            r#"
            UPDATE amenities
            SET
                name = COALESCE($2, name),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {AMENITY_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&input.name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique)?;

        Ok(row)
    }

    pub async fn delete_amenity(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM amenities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ============================================
    // Reviews
    // ============================================

    pub async fn create_review(&self, input: CreateReviewRow) -> Result<ReviewRow> {
        let row = sqlx::query_as::<_, ReviewRow>(&format!(
            r#"
            INSERT INTO reviews (id, text, rating, user_id, place_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {REVIEW_COLUMNS}
            "#
        ))
        .bind(Uuid::now_v7())
        .bind(&input.text)
        .bind(input.rating)
        .bind(input.user_id)
        .bind(input.place_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique)?;

        Ok(row)
    }

    pub async fn get_review(&self, id: Uuid) -> Result<Option<ReviewRow>> {
        let row = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_reviews(&self) -> Result<Vec<ReviewRow>> {
        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn list_reviews_for_place(&self, place_id: Uuid) -> Result<Vec<ReviewRow>> {
        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            r#"
            SELECT {REVIEW_COLUMNS}
            FROM reviews
            WHERE place_id = $1
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(place_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn update_review(&self, id: Uuid, input: UpdateReview) -> Result<Option<ReviewRow>> {
        let row = sqlx::query_as::<_, ReviewRow>(&format!(
            r#"
            UPDATE reviews
            SET
                text = COALESCE($2, text),
                rating = COALESCE($3, rating),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {REVIEW_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&input.text)
        .bind(input.rating)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete_review(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
