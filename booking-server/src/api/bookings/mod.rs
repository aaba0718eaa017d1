//! Booking API module
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/bookings | GET, POST | token |
//! | /api/bookings/search | GET | admin |
//! | /api/bookings/{id} | GET, PUT | token (owner or admin) |
//! | /api/bookings/{id}/detail | GET | token (owner or admin) |
//! | /api/bookings/{id}/cancel | POST | token (owner or admin) |
//! | /api/bookings/{id}/confirm | POST | admin |
//! | /api/bookings/{id} | DELETE | admin |
//!
//! Ownership checks for the per-booking routes live in the service, not
//! in a router layer, because they need the booking row first.

mod handler;

use axum::{Router, routing::{get, post}};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/bookings", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/search", get(handler::search))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/detail", get(handler::get_detail))
        .route("/{id}/confirm", post(handler::confirm))
        .route("/{id}/cancel", post(handler::cancel))
}
