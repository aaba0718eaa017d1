//! Utility module
//!
//! - [`AppError`] / [`AppResponse`] - unified error and response types
//! - [`AppResult`] - result alias for handlers and services
//! - logging setup

pub mod error;
pub mod logger;
pub mod result;

pub use error::{AppError, AppResponse};
pub use result::AppResult;
