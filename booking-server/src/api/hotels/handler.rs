//! Hotel API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::Deserialize;
use shared::models::{Booking, BookingCreate, Hotel, HotelCreate, HotelUpdate, Room};
use shared::query::{Page, Predicate, filter_sort_paginate};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{hotel as hotel_repo, room as room_repo};
use crate::utils::{AppError, AppResult};

/// List query: free-text search over name/city/country, exact star filter,
/// sort key and pagination
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelListQuery {
    pub search: Option<String>,
    pub stars: Option<i32>,
    #[serde(default)]
    pub sort: HotelSort,
    #[serde(default)]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    Page::DEFAULT_SIZE
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HotelSort {
    #[default]
    Name,
    Stars,
    City,
}

/// GET /api/hotels - list hotels through the shared query pipeline
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<HotelListQuery>,
) -> AppResult<Json<Vec<Hotel>>> {
    let hotels = hotel_repo::find_all(state.pool()).await?;

    let mut predicates: Vec<Predicate<Hotel>> = Vec::new();
    if let Some(search) = query.search.filter(|s| !s.is_empty()) {
        let needle = search.to_lowercase();
        predicates.push(Box::new(move |h: &Hotel| {
            h.name.to_lowercase().contains(&needle)
                || h.city.to_lowercase().contains(&needle)
                || h.country.to_lowercase().contains(&needle)
        }));
    }
    if let Some(stars) = query.stars {
        predicates.push(Box::new(move |h: &Hotel| h.stars == stars));
    }

    let page = Page::new(query.page, query.page_size);
    let hotels = match query.sort {
        HotelSort::Name => {
            filter_sort_paginate(hotels, &predicates, |a, b| a.name.cmp(&b.name), page)
        }
        HotelSort::Stars => {
            // Highest rated first
            filter_sort_paginate(hotels, &predicates, |a, b| b.stars.cmp(&a.stars), page)
        }
        HotelSort::City => {
            filter_sort_paginate(hotels, &predicates, |a, b| a.city.cmp(&b.city), page)
        }
    };

    Ok(Json(hotels))
}

/// GET /api/hotels/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Hotel>> {
    let hotel = hotel_repo::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Hotel {id} not found")))?;
    Ok(Json(hotel))
}

/// GET /api/hotels/{id}/rooms - rooms of one hotel
pub async fn list_rooms(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<Room>>> {
    hotel_repo::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Hotel {id} not found")))?;
    let rooms = room_repo::find_by_hotel(state.pool(), id).await?;
    Ok(Json(rooms))
}

/// POST /api/hotels/{id}/quick-booking - book a room of this hotel
/// directly; the booking starts confirmed.
pub async fn quick_booking(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<BookingCreate>,
) -> AppResult<Json<Booking>> {
    let booking = state
        .bookings
        .create_for_hotel(&current_user.actor(), id, payload)
        .await?;
    Ok(Json(booking))
}

/// POST /api/hotels - create hotel (admin)
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<HotelCreate>,
) -> AppResult<Json<Hotel>> {
    payload.validate()?;
    let hotel = hotel_repo::create(state.pool(), payload).await?;
    tracing::info!(hotel_id = hotel.id, operator = current_user.id, "Hotel created");
    Ok(Json(hotel))
}

/// PUT /api/hotels/{id} - update hotel (admin)
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<HotelUpdate>,
) -> AppResult<Json<Hotel>> {
    payload.validate()?;
    let hotel = hotel_repo::update(state.pool(), id, payload).await?;
    tracing::info!(hotel_id = id, operator = current_user.id, "Hotel updated");
    Ok(Json(hotel))
}

/// DELETE /api/hotels/{id} - delete hotel (admin); restricted while rooms
/// still reference it
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = hotel_repo::delete(state.pool(), id).await?;
    if deleted {
        tracing::info!(hotel_id = id, operator = current_user.id, "Hotel deleted");
    }
    Ok(Json(deleted))
}
