//! Room API module
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/rooms | GET | token |
//! | /api/rooms/{id} | GET | token |
//! | /api/rooms/{id}/availability | GET | token |
//! | /api/rooms | POST | admin |
//! | /api/rooms/{id} | PUT, DELETE | admin |

mod handler;

use axum::{Router, middleware, routing::{get, post, put}};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/rooms", routes())
}

fn routes() -> Router<ServerState> {
    let user_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/availability", get(handler::availability));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_admin));

    user_routes.merge(manage_routes)
}
