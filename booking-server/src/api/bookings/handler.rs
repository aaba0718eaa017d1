//! Booking API Handlers
//!
//! Thin wrappers over [`BookingService`]: extract the actor, call the
//! service, serialize the result. The list endpoint adds the shared
//! filter/sort/paginate pipeline on top of the role-scoped fetch.

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use shared::models::{Booking, BookingCreate, BookingStatus, BookingUpdate};
use shared::query::{Page, Predicate, filter_sort_paginate};

use crate::auth::CurrentUser;
use crate::booking::{BookingDetail, BookingOrigin};
use crate::core::ServerState;
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingListQuery {
    pub status: Option<BookingStatus>,
    pub room_id: Option<i64>,
    #[serde(default)]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    Page::DEFAULT_SIZE
}

/// GET /api/bookings - own bookings for users, all bookings for staff,
/// newest first
pub async fn list(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Query(query): Query<BookingListQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    let bookings = state.bookings.list_for(&current_user.actor()).await?;

    let mut predicates: Vec<Predicate<Booking>> = Vec::new();
    if let Some(status) = query.status {
        predicates.push(Box::new(move |b: &Booking| b.status == status));
    }
    if let Some(room_id) = query.room_id {
        predicates.push(Box::new(move |b: &Booking| b.room_id == room_id));
    }

    let bookings = filter_sort_paginate(
        bookings,
        &predicates,
        |a, b| b.created_at.cmp(&a.created_at),
        Page::new(query.page, query.page_size),
    );
    Ok(Json(bookings))
}

/// POST /api/bookings - self-service booking, starts pending
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<BookingCreate>,
) -> AppResult<Json<Booking>> {
    let booking = state
        .bookings
        .create(&current_user.actor(), BookingOrigin::SelfService, payload)
        .await?;
    Ok(Json(booking))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub city: String,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// GET /api/bookings/search?city=&from=&to= - staff report: bookings
/// checking in within the window, narrowed to hotels in one city
pub async fn search(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    let bookings = state
        .bookings
        .search_by_city_and_period(&current_user.actor(), &query.city, query.from, query.to)
        .await?;
    Ok(Json(bookings))
}

/// GET /api/bookings/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<Booking>> {
    let booking = state.bookings.get(&current_user.actor(), id).await?;
    Ok(Json(booking))
}

/// GET /api/bookings/{id}/detail - booking joined with room, hotel and owner
pub async fn get_detail(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<BookingDetail>> {
    let detail = state.bookings.get_detail(&current_user.actor(), id).await?;
    Ok(Json(detail))
}

/// PUT /api/bookings/{id} - edit dates, room or guest details
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<BookingUpdate>,
) -> AppResult<Json<Booking>> {
    let booking = state
        .bookings
        .update(&current_user.actor(), id, payload)
        .await?;
    Ok(Json(booking))
}

/// POST /api/bookings/{id}/confirm - staff: pending -> confirmed
pub async fn confirm(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<Booking>> {
    let booking = state.bookings.confirm(&current_user.actor(), id).await?;
    Ok(Json(booking))
}

/// POST /api/bookings/{id}/cancel - owner or staff
pub async fn cancel(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<Booking>> {
    let booking = state.bookings.cancel(&current_user.actor(), id).await?;
    Ok(Json(booking))
}

/// DELETE /api/bookings/{id} - staff only, any state
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = state.bookings.delete(&current_user.actor(), id).await?;
    Ok(Json(deleted))
}
