//! Hotel Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Hotel entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub description: String,
    /// Star rating, 1..=5
    pub stars: i32,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub amenities: Vec<String>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub images: Vec<String>,
    pub contact_email: String,
    pub contact_phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create hotel payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HotelCreate {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "country is required"))]
    pub country: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[validate(range(min = 1, max = 5, message = "stars must be between 1 and 5"))]
    pub stars: i32,
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Empty entries are filtered at submission; at least one must remain.
    #[validate(custom(function = "validate_images"))]
    pub images: Vec<String>,
    #[validate(email(message = "invalid contact email"))]
    pub contact_email: String,
    #[validate(length(min = 1, message = "contact phone is required"))]
    pub contact_phone: String,
}

/// Update hotel payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HotelUpdate {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1, max = 5, message = "stars must be between 1 and 5"))]
    pub stars: Option<i32>,
    pub amenities: Option<Vec<String>>,
    #[validate(custom(function = "validate_images"))]
    pub images: Option<Vec<String>>,
    #[validate(email(message = "invalid contact email"))]
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

/// At least one non-blank image URI must remain after trimming.
pub fn validate_images(images: &[String]) -> Result<(), ValidationError> {
    if images.iter().any(|url| !url.trim().is_empty()) {
        Ok(())
    } else {
        Err(ValidationError::new("images").with_message("at least one image is required".into()))
    }
}

/// Drop blank image entries, keeping submission order.
pub fn filter_blank_images(images: Vec<String>) -> Vec<String> {
    images
        .into_iter()
        .filter(|url| !url.trim().is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> HotelCreate {
        HotelCreate {
            name: "Grand Hotel".into(),
            address: "1 Main St".into(),
            city: "Budapest".into(),
            country: "Hungary".into(),
            description: "A hotel".into(),
            stars: 4,
            amenities: vec!["wifi".into()],
            images: vec!["https://example.com/a.jpg".into()],
            contact_email: "info@example.com".into(),
            contact_phone: "+36 1 234 5678".into(),
        }
    }

    #[test]
    fn accepts_valid_payload() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_stars() {
        let mut payload = valid_create();
        payload.stars = 6;
        let errs = payload.validate().unwrap_err();
        assert!(errs.field_errors().contains_key("stars"));
    }

    #[test]
    fn rejects_blank_only_images() {
        let mut payload = valid_create();
        payload.images = vec!["".into(), "   ".into()];
        let errs = payload.validate().unwrap_err();
        assert!(errs.field_errors().contains_key("images"));
    }

    #[test]
    fn rejects_bad_contact_email() {
        let mut payload = valid_create();
        payload.contact_email = "not-an-email".into();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn filters_blank_images_preserving_order() {
        let filtered = filter_blank_images(vec![
            "a.jpg".into(),
            "".into(),
            "b.jpg".into(),
            "  ".into(),
        ]);
        assert_eq!(filtered, vec!["a.jpg".to_string(), "b.jpg".to_string()]);
    }
}
