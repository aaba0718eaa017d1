//! Room API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::models::{Room, RoomCreate, RoomType, RoomUpdate};
use shared::query::{Page, Predicate, filter_sort_paginate};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::room as room_repo;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomListQuery {
    pub hotel_id: Option<i64>,
    #[serde(rename = "type")]
    pub room_type: Option<RoomType>,
    pub available: Option<bool>,
    pub max_price: Option<f64>,
    #[serde(default)]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    Page::DEFAULT_SIZE
}

/// GET /api/rooms - list rooms, cheapest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<RoomListQuery>,
) -> AppResult<Json<Vec<Room>>> {
    let rooms = match query.hotel_id {
        Some(hotel_id) => room_repo::find_by_hotel(state.pool(), hotel_id).await?,
        None => room_repo::find_all(state.pool()).await?,
    };

    let mut predicates: Vec<Predicate<Room>> = Vec::new();
    if let Some(room_type) = query.room_type {
        predicates.push(Box::new(move |r: &Room| r.room_type == room_type));
    }
    if let Some(available) = query.available {
        predicates.push(Box::new(move |r: &Room| r.is_available == available));
    }
    if let Some(max_price) = query.max_price {
        predicates.push(Box::new(move |r: &Room| r.price <= max_price));
    }

    let rooms = filter_sort_paginate(
        rooms,
        &predicates,
        |a, b| a.price.total_cmp(&b.price),
        Page::new(query.page, query.page_size),
    );
    Ok(Json(rooms))
}

/// GET /api/rooms/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Room>> {
    let room = room_repo::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Room {id} not found")))?;
    Ok(Json(room))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    /// Booking to leave out of the conflict set (editing flows)
    pub exclude: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub room_id: i64,
    pub available: bool,
}

/// GET /api/rooms/{id}/availability - probe a date range before booking
pub async fn availability(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let available = state
        .bookings
        .check_availability(id, query.check_in, query.check_out, query.exclude)
        .await?;
    Ok(Json(AvailabilityResponse {
        room_id: id,
        available,
    }))
}

/// POST /api/rooms - create room (admin)
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<RoomCreate>,
) -> AppResult<Json<Room>> {
    payload.validate()?;
    let room = room_repo::create(state.pool(), payload).await?;
    tracing::info!(room_id = room.id, operator = current_user.id, "Room created");
    Ok(Json(room))
}

/// PUT /api/rooms/{id} - update room (admin)
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<RoomUpdate>,
) -> AppResult<Json<Room>> {
    payload.validate()?;
    let room = room_repo::update(state.pool(), id, payload).await?;
    tracing::info!(room_id = id, operator = current_user.id, "Room updated");
    Ok(Json(room))
}

/// DELETE /api/rooms/{id} - delete room (admin); restricted while active
/// bookings reference it
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = room_repo::delete(state.pool(), id).await?;
    if deleted {
        tracing::info!(room_id = id, operator = current_user.id, "Room deleted");
    }
    Ok(Json(deleted))
}
