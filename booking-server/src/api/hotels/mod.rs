//! Hotel API module
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/hotels | GET | token |
//! | /api/hotels/{id} | GET | token |
//! | /api/hotels/{id}/rooms | GET | token |
//! | /api/hotels/{id}/quick-booking | POST | token |
//! | /api/hotels | POST | admin |
//! | /api/hotels/{id} | PUT, DELETE | admin |

mod handler;

use axum::{Router, middleware, routing::{get, post, put}};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/hotels", routes())
}

fn routes() -> Router<ServerState> {
    let user_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/rooms", get(handler::list_rooms))
        .route("/{id}/quick-booking", post(handler::quick_booking));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_admin));

    user_routes.merge(manage_routes)
}
