use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::claims::services::ClaimOutcome;

/// Request DTO for claiming a found item
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitClaimDto {
    /// Id of the found report being claimed
    #[schema(example = "0192f0c4-6f1e-7a7b-9f3e-2d3c4b5a6978")]
    pub found_item_id: String,

    #[validate(length(max = 200, message = "Color must not exceed 200 characters"))]
    #[schema(example = "blue")]
    pub color: Option<String>,

    /// Distinctive mark only the owner would know about
    #[validate(length(max = 500, message = "Mark must not exceed 500 characters"))]
    #[schema(example = "red zipper")]
    pub mark: Option<String>,

    #[validate(length(max = 2000, message = "Extra details must not exceed 2000 characters"))]
    pub extra: Option<String>,
}

impl SubmitClaimDto {
    /// Free text checked against the found report's description
    pub fn verification_text(&self) -> String {
        [&self.color, &self.mark, &self.extra]
            .iter()
            .map(|part| part.as_deref().unwrap_or(""))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Response DTO for a claim; contact details are present only when approved
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResultDto {
    pub approved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finder_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loser_email: Option<String>,
    /// Time-limited link to the item's photo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed_image_url: Option<String>,
}

impl From<ClaimOutcome> for ClaimResultDto {
    fn from(outcome: ClaimOutcome) -> Self {
        match outcome.disclosure {
            Some(disclosure) => Self {
                approved: outcome.approved,
                finder_email: Some(disclosure.finder_email),
                loser_email: disclosure.loser_email,
                signed_image_url: disclosure.image_url,
            },
            None => Self {
                approved: outcome.approved,
                finder_email: None,
                loser_email: None,
                signed_image_url: None,
            },
        }
    }
}
