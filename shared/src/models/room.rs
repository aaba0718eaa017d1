//! Room Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Room type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Single,
    Double,
    Suite,
    Deluxe,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Single => "single",
            RoomType::Double => "double",
            RoomType::Suite => "suite",
            RoomType::Deluxe => "deluxe",
        }
    }
}

/// Room entity
///
/// `is_available` is an administrative override, independent of
/// booking-derived availability.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: i64,
    pub hotel_id: i64,
    /// Room number, free text, unique within a hotel
    pub number: String,
    #[serde(rename = "type")]
    #[cfg_attr(feature = "db", sqlx(rename = "room_type"))]
    pub room_type: RoomType,
    /// Price per night
    pub price: f64,
    pub capacity: i32,
    pub description: String,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub amenities: Vec<String>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub images: Vec<String>,
    pub is_available: bool,
}

/// Create room payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoomCreate {
    pub hotel_id: i64,
    #[validate(length(min = 1, message = "room number is required"))]
    pub number: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    #[validate(range(exclusive_min = 0.0, message = "price must be positive"))]
    pub price: f64,
    #[validate(range(min = 1, message = "capacity must be at least 1"))]
    pub capacity: i32,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

fn default_true() -> bool {
    true
}

/// Update room payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoomUpdate {
    #[validate(length(min = 1, message = "room number must not be empty"))]
    pub number: Option<String>,
    #[serde(rename = "type")]
    pub room_type: Option<RoomType>,
    #[validate(range(exclusive_min = 0.0, message = "price must be positive"))]
    pub price: Option<f64>,
    #[validate(range(min = 1, message = "capacity must be at least 1"))]
    pub capacity: Option<i32>,
    pub description: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub is_available: Option<bool>,
}
