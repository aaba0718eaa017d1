//! Booking Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Booking status
///
/// `cancelled` is terminal. Transitions are enforced by the booking
/// lifecycle, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

/// Booking entity
///
/// `total_price` is snapshotted at write time (nights x room price) and is
/// not recomputed when the room price later changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub room_id: i64,
    /// Owner of the booking
    pub user_id: i64,
    pub check_in_date: DateTime<Utc>,
    pub check_out_date: DateTime<Utc>,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub total_price: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create booking payload
///
/// The total price is computed server-side; clients never supply it.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_date_order"))]
pub struct BookingCreate {
    pub room_id: i64,
    pub check_in_date: DateTime<Utc>,
    pub check_out_date: DateTime<Utc>,
    #[validate(length(min = 1, message = "guest name is required"))]
    pub guest_name: String,
    #[validate(email(message = "invalid guest email"))]
    pub guest_email: String,
    #[validate(length(min = 1, message = "guest phone is required"))]
    pub guest_phone: String,
}

/// Update booking payload (owner or admin)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookingUpdate {
    pub room_id: Option<i64>,
    pub check_in_date: Option<DateTime<Utc>>,
    pub check_out_date: Option<DateTime<Utc>>,
    #[validate(length(min = 1, message = "guest name must not be empty"))]
    pub guest_name: Option<String>,
    #[validate(email(message = "invalid guest email"))]
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
}

fn validate_date_order(payload: &BookingCreate) -> Result<(), ValidationError> {
    if payload.check_out_date > payload.check_in_date {
        Ok(())
    } else {
        Err(ValidationError::new("check_out_date")
            .with_message("check-out must be after check-in".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn valid_create() -> BookingCreate {
        BookingCreate {
            room_id: 1,
            check_in_date: date(2024, 6, 1),
            check_out_date: date(2024, 6, 4),
            guest_name: "Jane Doe".into(),
            guest_email: "jane@example.com".into(),
            guest_phone: "+36 20 111 2222".into(),
        }
    }

    #[test]
    fn accepts_valid_payload() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn rejects_reversed_dates() {
        let mut payload = valid_create();
        payload.check_out_date = date(2024, 5, 30);
        assert!(payload.validate().is_err());
    }

    #[test]
    fn rejects_equal_dates() {
        let mut payload = valid_create();
        payload.check_out_date = payload.check_in_date;
        assert!(payload.validate().is_err());
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
    }
}
