use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::claims::dtos::{ClaimResultDto, SubmitClaimDto};
use crate::features::claims::services::ClaimAdjudicator;
use crate::shared::types::ApiResponse;

/// Claim a found item by describing it
///
/// `color`, `mark` and `extra` are joined and compared with the found
/// report's description. An approved claim discloses the finder's and
/// owner's emails and a short-lived link to the item's photo. A rejected
/// claim is still a successful response with `approved: false`.
#[utoipa::path(
    post,
    path = "/api/claims",
    request_body = SubmitClaimDto,
    responses(
        (status = 200, description = "Claim adjudicated", body = ApiResponse<ClaimResultDto>),
        (status = 400, description = "Invalid request body"),
        (status = 500, description = "Record store failure")
    ),
    tag = "claims"
)]
pub async fn submit_claim(
    State(adjudicator): State<Arc<ClaimAdjudicator>>,
    AppJson(dto): AppJson<SubmitClaimDto>,
) -> Result<Json<ApiResponse<ClaimResultDto>>> {
    let result = adjudicator.submit_claim(dto).await?;
    Ok(Json(ApiResponse::success(Some(result), None, None)))
}
