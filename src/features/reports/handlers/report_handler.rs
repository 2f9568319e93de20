use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::reports::dtos::{
    CreateFoundReportDto, CreateLostReportDto, FoundItemStatusDto, FoundReportFormDto,
    FoundReportSubmittedDto, ImageUpload, LostReportSubmittedDto,
};
use crate::features::reports::services::ReportService;
use crate::shared::types::{ApiResponse, Meta};

/// Report a lost item
///
/// The report is paired with the first plausible open found report, if any.
/// Such a pairing stays `pending` until the owner submits a claim.
#[utoipa::path(
    post,
    path = "/api/lost",
    request_body = CreateLostReportDto,
    responses(
        (status = 201, description = "Lost report saved", body = ApiResponse<LostReportSubmittedDto>),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Record store failure")
    ),
    tag = "reports"
)]
pub async fn submit_lost(
    State(service): State<Arc<ReportService>>,
    AppJson(dto): AppJson<CreateLostReportDto>,
) -> Result<(StatusCode, Json<ApiResponse<LostReportSubmittedDto>>)> {
    let result = service.submit_lost(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(result),
            Some("Lost report saved".to_string()),
            None,
        )),
    ))
}

/// Report a found item
///
/// Accepts multipart/form-data with the fields `category`, `dateFound`,
/// `location`, `description`, `finderContact` and an optional `itemImage`.
/// A plausible open lost report is paired immediately as `verified`, and the
/// owner's email is returned to the finder.
#[utoipa::path(
    post,
    path = "/api/found",
    request_body(
        content = FoundReportFormDto,
        content_type = "multipart/form-data",
        description = "Found report form with optional item image",
    ),
    responses(
        (status = 201, description = "Found report saved", body = ApiResponse<FoundReportSubmittedDto>),
        (status = 400, description = "Validation error or invalid image"),
        (status = 413, description = "Image too large"),
        (status = 500, description = "Record store failure")
    ),
    tag = "reports"
)]
pub async fn submit_found(
    State(service): State<Arc<ReportService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<FoundReportSubmittedDto>>)> {
    let mut dto = CreateFoundReportDto::default();
    let mut image: Option<ImageUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name == "itemImage" {
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let file_name = field
                .file_name()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "image".to_string());
            let data = field.bytes().await.map_err(|e| {
                debug!("Failed to read image bytes: {}", e);
                AppError::BadRequest(format!("Failed to read image data: {}", e))
            })?;

            // Browsers send an empty part when no file was chosen
            if !data.is_empty() {
                image = Some(ImageUpload {
                    data: data.to_vec(),
                    file_name,
                    content_type,
                });
            }
            continue;
        }

        let text = field.text().await.map_err(|e| {
            AppError::BadRequest(format!("Failed to read field '{}': {}", field_name, e))
        })?;

        match field_name.as_str() {
            "category" => dto.category = text,
            "dateFound" => dto.date_found = text,
            "location" => dto.location = text,
            "description" => dto.description = Some(text).filter(|t| !t.is_empty()),
            "finderContact" => dto.finder_contact = text,
            _ => debug!("Ignoring unknown field: {}", field_name),
        }
    }

    let result = service.submit_found(dto, image).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(result),
            Some("Found report saved".to_string()),
            None,
        )),
    ))
}

/// List found items with their match status, newest first
#[utoipa::path(
    get,
    path = "/api/found",
    responses(
        (status = 200, description = "Found items", body = ApiResponse<Vec<FoundItemStatusDto>>),
        (status = 500, description = "Record store failure")
    ),
    tag = "reports"
)]
pub async fn list_found(
    State(service): State<Arc<ReportService>>,
) -> Result<Json<ApiResponse<Vec<FoundItemStatusDto>>>> {
    let items = service.list_found_with_status().await?;
    let total = items.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}
