//! Booking Server - hotel booking administration backend
//!
//! # Module structure
//!
//! ```text
//! booking-server/src/
//! ├── core/          # Config, state, server loop
//! ├── auth/          # JWT auth, passwords, session, middleware
//! ├── booking/       # Pricing, availability, lifecycle, service
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # SQLite pool and repositories
//! └── utils/         # Errors, results, logging
//! ```

pub mod api;
pub mod auth;
pub mod booking;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService, SessionHub};
pub use booking::{Actor, BookingOrigin, BookingService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger setup
pub use utils::logger::init_logger_with_file;
