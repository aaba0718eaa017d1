//! Room Repository

use shared::models::{Room, RoomCreate, RoomUpdate};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const COLUMNS: &str =
    "id, hotel_id, number, room_type, price, capacity, description, amenities, images, is_available";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Room>> {
    let rooms = sqlx::query_as::<_, Room>(&format!("SELECT {COLUMNS} FROM rooms ORDER BY number"))
        .fetch_all(pool)
        .await?;
    Ok(rooms)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Room>> {
    let room = sqlx::query_as::<_, Room>(&format!("SELECT {COLUMNS} FROM rooms WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(room)
}

pub async fn find_by_hotel(pool: &SqlitePool, hotel_id: i64) -> RepoResult<Vec<Room>> {
    let rooms = sqlx::query_as::<_, Room>(&format!(
        "SELECT {COLUMNS} FROM rooms WHERE hotel_id = ? ORDER BY number"
    ))
    .bind(hotel_id)
    .fetch_all(pool)
    .await?;
    Ok(rooms)
}

pub async fn create(pool: &SqlitePool, data: RoomCreate) -> RepoResult<Room> {
    // The hotel must exist; a dangling reference is a not-found, not an
    // opaque FK failure
    let hotel_exists =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM hotels WHERE id = ?")
            .bind(data.hotel_id)
            .fetch_one(pool)
            .await?;
    if hotel_exists == 0 {
        return Err(RepoError::NotFound(format!(
            "Hotel {} not found",
            data.hotel_id
        )));
    }

    // Room numbers are unique within a hotel
    let exists = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM rooms WHERE hotel_id = ? AND number = ?",
    )
    .bind(data.hotel_id)
    .bind(&data.number)
    .fetch_one(pool)
    .await?;
    if exists > 0 {
        return Err(RepoError::Duplicate(format!(
            "Room {} already exists in this hotel",
            data.number
        )));
    }

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO rooms (hotel_id, number, room_type, price, capacity, description, amenities, \
         images, is_available) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.hotel_id)
    .bind(&data.number)
    .bind(data.room_type)
    .bind(data.price)
    .bind(data.capacity)
    .bind(&data.description)
    .bind(serde_json::to_string(&data.amenities).unwrap_or_else(|_| "[]".into()))
    .bind(serde_json::to_string(&data.images).unwrap_or_else(|_| "[]".into()))
    .bind(data.is_available)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create room".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: RoomUpdate) -> RepoResult<Room> {
    let current = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Room {id} not found")))?;

    // Renaming onto an occupied per-hotel number is a conflict, same as on
    // create
    if let Some(number) = &data.number
        && *number != current.number
    {
        let taken = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM rooms WHERE hotel_id = ? AND number = ? AND id != ?",
        )
        .bind(current.hotel_id)
        .bind(number)
        .bind(id)
        .fetch_one(pool)
        .await?;
        if taken > 0 {
            return Err(RepoError::Duplicate(format!(
                "Room {number} already exists in this hotel"
            )));
        }
    }

    let amenities = data
        .amenities
        .as_ref()
        .map(|a| serde_json::to_string(a).unwrap_or_else(|_| "[]".into()));
    let images = data
        .images
        .as_ref()
        .map(|i| serde_json::to_string(i).unwrap_or_else(|_| "[]".into()));

    let rows = sqlx::query(
        "UPDATE rooms SET \
         number = COALESCE(?1, number), \
         room_type = COALESCE(?2, room_type), \
         price = COALESCE(?3, price), \
         capacity = COALESCE(?4, capacity), \
         description = COALESCE(?5, description), \
         amenities = COALESCE(?6, amenities), \
         images = COALESCE(?7, images), \
         is_available = COALESCE(?8, is_available) \
         WHERE id = ?9",
    )
    .bind(data.number)
    .bind(data.room_type)
    .bind(data.price)
    .bind(data.capacity)
    .bind(data.description)
    .bind(amenities)
    .bind(images)
    .bind(data.is_available)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Room {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Room {id} not found")))
}

/// Delete a room. Restricted while non-cancelled bookings reference it.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM bookings WHERE room_id = ? AND status != 'cancelled'",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    if count > 0 {
        return Err(RepoError::Validation(
            "Cannot delete room with active bookings".into(),
        ));
    }
    let rows = sqlx::query("DELETE FROM rooms WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
