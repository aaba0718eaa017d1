//! Booking Repository
//!
//! All writes refresh `updated_at`. Status changes go through the booking
//! lifecycle in the service layer; this module only persists.

use chrono::{DateTime, Utc};
use shared::models::{Booking, BookingStatus};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const COLUMNS: &str = "id, room_id, user_id, check_in_date, check_out_date, guest_name, \
     guest_email, guest_phone, total_price, status, created_at, updated_at";

/// Storage-shaped record for inserts. The service computes `total_price`
/// and the initial `status`; clients never supply them.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub room_id: i64,
    pub user_id: i64,
    pub check_in_date: DateTime<Utc>,
    pub check_out_date: DateTime<Utc>,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub total_price: f64,
    pub status: BookingStatus,
}

/// Changed fields for an edit; untouched fields stay as stored.
#[derive(Debug, Clone, Default)]
pub struct BookingChanges {
    pub room_id: Option<i64>,
    pub check_in_date: Option<DateTime<Utc>>,
    pub check_out_date: Option<DateTime<Utc>>,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub total_price: Option<f64>,
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Booking>> {
    let bookings = sqlx::query_as::<_, Booking>(&format!(
        "SELECT {COLUMNS} FROM bookings ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(bookings)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Booking>> {
    let booking =
        sqlx::query_as::<_, Booking>(&format!("SELECT {COLUMNS} FROM bookings WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(booking)
}

pub async fn find_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<Booking>> {
    let bookings = sqlx::query_as::<_, Booking>(&format!(
        "SELECT {COLUMNS} FROM bookings WHERE user_id = ? ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(bookings)
}

/// Non-cancelled bookings for a room - the conflict set for availability
pub async fn find_active_by_room(pool: &SqlitePool, room_id: i64) -> RepoResult<Vec<Booking>> {
    let bookings = sqlx::query_as::<_, Booking>(&format!(
        "SELECT {COLUMNS} FROM bookings WHERE room_id = ? AND status != 'cancelled' \
         ORDER BY check_in_date"
    ))
    .bind(room_id)
    .fetch_all(pool)
    .await?;
    Ok(bookings)
}

/// Range scan over the check-in window. Relies on ISO-8601 TEXT ordering.
pub async fn find_by_check_in_between(
    pool: &SqlitePool,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> RepoResult<Vec<Booking>> {
    let bookings = sqlx::query_as::<_, Booking>(&format!(
        "SELECT {COLUMNS} FROM bookings WHERE check_in_date >= ? AND check_in_date <= ? \
         ORDER BY check_in_date"
    ))
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;
    Ok(bookings)
}

pub async fn create(pool: &SqlitePool, data: NewBooking) -> RepoResult<Booking> {
    let now = Utc::now();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO bookings (room_id, user_id, check_in_date, check_out_date, guest_name, \
         guest_email, guest_phone, total_price, status, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.room_id)
    .bind(data.user_id)
    .bind(data.check_in_date)
    .bind(data.check_out_date)
    .bind(&data.guest_name)
    .bind(&data.guest_email)
    .bind(&data.guest_phone)
    .bind(data.total_price)
    .bind(data.status)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create booking".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, changes: BookingChanges) -> RepoResult<Booking> {
    let rows = sqlx::query(
        "UPDATE bookings SET \
         room_id = COALESCE(?1, room_id), \
         check_in_date = COALESCE(?2, check_in_date), \
         check_out_date = COALESCE(?3, check_out_date), \
         guest_name = COALESCE(?4, guest_name), \
         guest_email = COALESCE(?5, guest_email), \
         guest_phone = COALESCE(?6, guest_phone), \
         total_price = COALESCE(?7, total_price), \
         updated_at = ?8 \
         WHERE id = ?9",
    )
    .bind(changes.room_id)
    .bind(changes.check_in_date)
    .bind(changes.check_out_date)
    .bind(changes.guest_name)
    .bind(changes.guest_email)
    .bind(changes.guest_phone)
    .bind(changes.total_price)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Booking {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Booking {id} not found")))
}

pub async fn set_status(
    pool: &SqlitePool,
    id: i64,
    status: BookingStatus,
) -> RepoResult<Booking> {
    let rows = sqlx::query("UPDATE bookings SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Booking {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Booking {id} not found")))
}

/// Physical removal - a privileged action distinct from cancellation
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM bookings WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
