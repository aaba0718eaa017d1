//! Booking domain engine
//!
//! - [`pricing`] - stay length and total price
//! - [`availability`] - half-open interval conflict checks
//! - [`lifecycle`] - status transition table and authorization
//! - [`service`] - orchestration over the store

pub mod availability;
pub mod lifecycle;
pub mod pricing;
pub mod service;

pub use lifecycle::{Actor, BookingAction, BookingOrigin};
pub use service::{BookingDetail, BookingService};
