//! Data models
//!
//! Shared between booking-server and API consumers.
//! Instants are `chrono::DateTime<Utc>`, persisted as ISO-8601 TEXT so that
//! range scans over check-in dates sort correctly.

pub mod booking;
pub mod hotel;
pub mod room;
pub mod user;

// Re-exports
pub use booking::*;
pub use hotel::*;
pub use room::*;
pub use user::*;
