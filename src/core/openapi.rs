use utoipa::{Modify, OpenApi};

use crate::features::claims::{dtos as claims_dtos, handlers as claims_handlers};
use crate::features::matches::models as matches_models;
use crate::features::reports::{dtos as reports_dtos, handlers as reports_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Reports
        reports_handlers::submit_lost,
        reports_handlers::submit_found,
        reports_handlers::list_found,
        // Claims
        claims_handlers::submit_claim,
    ),
    components(
        schemas(
            Meta,
            matches_models::MatchState,
            // Reports
            reports_dtos::CreateLostReportDto,
            reports_dtos::FoundReportFormDto,
            reports_dtos::LostReportSubmittedDto,
            reports_dtos::FoundReportSubmittedDto,
            reports_dtos::FoundItemStatusDto,
            ApiResponse<reports_dtos::LostReportSubmittedDto>,
            ApiResponse<reports_dtos::FoundReportSubmittedDto>,
            ApiResponse<Vec<reports_dtos::FoundItemStatusDto>>,
            // Claims
            claims_dtos::SubmitClaimDto,
            claims_dtos::ClaimResultDto,
            ApiResponse<claims_dtos::ClaimResultDto>,
        )
    ),
    tags(
        (name = "reports", description = "Lost and found item reports"),
        (name = "claims", description = "Ownership claims on found items"),
    ),
    info(
        title = "Lost & Found API",
        version = "0.1.0",
        description = "API documentation for the lost and found service",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
