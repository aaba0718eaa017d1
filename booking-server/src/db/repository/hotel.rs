//! Hotel Repository

use chrono::Utc;
use shared::models::{Hotel, HotelCreate, HotelUpdate, filter_blank_images};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const COLUMNS: &str = "id, name, address, city, country, description, stars, amenities, images, \
     contact_email, contact_phone, created_at, updated_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Hotel>> {
    let hotels =
        sqlx::query_as::<_, Hotel>(&format!("SELECT {COLUMNS} FROM hotels ORDER BY name"))
            .fetch_all(pool)
            .await?;
    Ok(hotels)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Hotel>> {
    let hotel = sqlx::query_as::<_, Hotel>(&format!("SELECT {COLUMNS} FROM hotels WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(hotel)
}

pub async fn create(pool: &SqlitePool, data: HotelCreate) -> RepoResult<Hotel> {
    let now = Utc::now();
    let images = filter_blank_images(data.images);
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO hotels (name, address, city, country, description, stars, amenities, images, \
         contact_email, contact_phone, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.address)
    .bind(&data.city)
    .bind(&data.country)
    .bind(&data.description)
    .bind(data.stars)
    .bind(serde_json::to_string(&data.amenities).unwrap_or_else(|_| "[]".into()))
    .bind(serde_json::to_string(&images).unwrap_or_else(|_| "[]".into()))
    .bind(&data.contact_email)
    .bind(&data.contact_phone)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create hotel".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: HotelUpdate) -> RepoResult<Hotel> {
    let amenities = data
        .amenities
        .as_ref()
        .map(|a| serde_json::to_string(a).unwrap_or_else(|_| "[]".into()));
    let images = data
        .images
        .map(filter_blank_images)
        .map(|i| serde_json::to_string(&i).unwrap_or_else(|_| "[]".into()));

    let rows = sqlx::query(
        "UPDATE hotels SET \
         name = COALESCE(?1, name), \
         address = COALESCE(?2, address), \
         city = COALESCE(?3, city), \
         country = COALESCE(?4, country), \
         description = COALESCE(?5, description), \
         stars = COALESCE(?6, stars), \
         amenities = COALESCE(?7, amenities), \
         images = COALESCE(?8, images), \
         contact_email = COALESCE(?9, contact_email), \
         contact_phone = COALESCE(?10, contact_phone), \
         updated_at = ?11 \
         WHERE id = ?12",
    )
    .bind(data.name)
    .bind(data.address)
    .bind(data.city)
    .bind(data.country)
    .bind(data.description)
    .bind(data.stars)
    .bind(amenities)
    .bind(images)
    .bind(data.contact_email)
    .bind(data.contact_phone)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Hotel {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Hotel {id} not found")))
}

/// Delete a hotel. Restricted while rooms still reference it.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM rooms WHERE hotel_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Err(RepoError::Validation(
            "Cannot delete hotel with existing rooms".into(),
        ));
    }
    let rows = sqlx::query("DELETE FROM hotels WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
