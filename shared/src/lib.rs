//! Shared types for the booking workspace
//!
//! Entity models, create/update payloads and the generic list query
//! pipeline. DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod models;
pub mod query;

pub use models::*;
pub use query::{Page, filter_sort_paginate};
