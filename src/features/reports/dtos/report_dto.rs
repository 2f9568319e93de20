use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::matches::models::MatchState;
use crate::shared::validation::validate_event_date;

/// Request DTO for reporting a lost item
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateLostReportDto {
    /// Item category tag, compared exactly when matching
    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    #[schema(example = "bag")]
    pub category: String,

    #[validate(length(max = 5000, message = "Description must not exceed 5000 characters"))]
    #[schema(example = "Black leather bag with a broken strap")]
    pub description: Option<String>,

    /// Comma-separated places where the item may have been lost
    #[validate(length(min = 1, max = 500, message = "Location is required"))]
    #[schema(example = "Central Park, NYC")]
    pub location: String,

    #[validate(custom(function = "validate_event_date"))]
    #[schema(example = "2024-01-01")]
    pub date_lost: String,

    #[validate(email(message = "A valid contact email is required"))]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

/// Found report fields collected from the multipart form
#[derive(Debug, Clone, Default, Validate)]
pub struct CreateFoundReportDto {
    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    pub category: String,

    #[validate(custom(function = "validate_event_date"))]
    pub date_found: String,

    #[validate(length(min = 1, max = 500, message = "Location is required"))]
    pub location: String,

    #[validate(length(max = 5000, message = "Description must not exceed 5000 characters"))]
    pub description: Option<String>,

    #[validate(email(message = "Finder email must be a valid email"))]
    #[validate(length(min = 1, message = "Finder email is required"))]
    pub finder_contact: String,
}

/// Found report multipart form for OpenAPI documentation.
/// The handler reads the fields with axum's Multipart extractor.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
#[schema(rename_all = "camelCase")]
pub struct FoundReportFormDto {
    #[schema(example = "bag")]
    pub category: String,
    #[schema(example = "2024-01-03")]
    pub date_found: String,
    #[schema(example = "near Central Park entrance")]
    pub location: String,
    pub description: Option<String>,
    #[schema(example = "finder@example.com")]
    pub finder_contact: String,
    /// Optional photo of the item (jpeg, png, gif or webp, max 5MB)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub item_image: Option<String>,
}

/// Image attached to a found report
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub data: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

/// Response DTO after a lost report was saved
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LostReportSubmittedDto {
    pub saved: bool,
    /// Found report paired with the new lost report, if any
    pub matched_found_item_id: Option<Uuid>,
}

/// Response DTO after a found report was saved
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FoundReportSubmittedDto {
    pub saved: bool,
    /// Contact of the owner whose lost report matched, if any
    pub matched_lost_owner_email: Option<String>,
}

/// Found item as listed publicly, without contact details
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FoundItemStatusDto {
    pub id: Uuid,
    pub category: String,
    pub date_found: NaiveDate,
    pub match_status: MatchState,
}

/// Allowed MIME types for found-item images
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Maximum image size in bytes (5MB)
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

pub fn is_image_type_allowed(content_type: &str) -> bool {
    ALLOWED_IMAGE_TYPES.contains(&content_type)
}

/// Make an uploaded file name safe to embed in an object key
pub fn sanitize_file_name(file_name: &str) -> String {
    let cleaned: String = file_name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .take(100)
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        "image".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_lost() -> CreateLostReportDto {
        CreateLostReportDto {
            category: "bag".to_string(),
            description: None,
            location: "Central Park, NYC".to_string(),
            date_lost: "2024-01-01".to_string(),
            email: "owner@example.com".to_string(),
        }
    }

    #[test]
    fn test_lost_dto_valid() {
        assert!(valid_lost().validate().is_ok());
    }

    #[test]
    fn test_lost_dto_rejects_bad_fields() {
        let mut dto = valid_lost();
        dto.date_lost = "01/01/2024".to_string();
        assert!(dto.validate().is_err());

        let mut dto = valid_lost();
        dto.email = String::new();
        assert!(dto.validate().is_err());

        let mut dto = valid_lost();
        dto.category = String::new();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_lost_dto_missing_fields_deserialize_as_empty() {
        let dto: CreateLostReportDto =
            serde_json::from_str(r#"{"category":"bag","dateLost":"2024-01-01"}"#).unwrap();
        assert_eq!(dto.date_lost, "2024-01-01");
        assert!(dto.email.is_empty());
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_found_dto_requires_finder_contact() {
        let dto = CreateFoundReportDto {
            category: "bag".to_string(),
            date_found: "2024-01-03".to_string(),
            location: "near Central Park entrance".to_string(),
            description: Some("blue backpack".to_string()),
            finder_contact: String::new(),
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("finder_contact"));
    }

    #[test]
    fn test_image_types() {
        assert!(is_image_type_allowed("image/png"));
        assert!(!is_image_type_allowed("application/pdf"));
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("my bag (1).jpg"), "my_bag__1_.jpg");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\photos\\bag.png"), "bag.png");
        assert_eq!(sanitize_file_name(""), "image");
        assert_eq!(sanitize_file_name(".."), "image");
    }
}
