use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::features::reports::dtos::MAX_IMAGE_SIZE;
use crate::features::reports::handlers::{list_found, submit_found, submit_lost};
use crate::features::reports::services::ReportService;

/// Create routes for the reports feature
pub fn routes(report_service: Arc<ReportService>) -> Router {
    Router::new()
        .route(
            "/api/found",
            // Allow body size up to MAX_IMAGE_SIZE + buffer for the other form fields
            post(submit_found)
                .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + 1024 * 1024))
                .get(list_found),
        )
        .route("/api/lost", post(submit_lost))
        .with_state(report_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::shared::test_helpers::TestContext;

    fn server(ctx: &TestContext) -> TestServer {
        let app = routes(ctx.report_service.clone())
            .merge(crate::features::claims::routes(ctx.claim_adjudicator.clone()));
        TestServer::new(app).unwrap()
    }

    fn found_form() -> MultipartForm {
        MultipartForm::new()
            .add_text("category", "bag")
            .add_text("dateFound", "2024-01-03")
            .add_text("location", "near Central Park entrance")
            .add_text("description", "blue backpack with red zipper")
            .add_text("finderContact", "finder@example.com")
    }

    #[tokio::test]
    async fn test_found_then_lost_then_claim() {
        let ctx = TestContext::new();
        let server = server(&ctx);

        let response = server
            .post("/api/found")
            .multipart(found_form().add_part(
                "itemImage",
                Part::bytes(vec![1u8, 2, 3])
                    .file_name("backpack.png")
                    .mime_type("image/png"),
            ))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["saved"], true);
        assert!(body["data"]["matchedLostOwnerEmail"].is_null());

        let response = server
            .post("/api/lost")
            .json(&json!({
                "category": "bag",
                "description": "backpack",
                "location": "Central Park, NYC",
                "dateLost": "2024-01-01",
                "email": "owner@example.com"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        let found_id = body["data"]["matchedFoundItemId"]
            .as_str()
            .unwrap()
            .to_string();

        let response = server.get("/api/found").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], 1);
        assert_eq!(body["data"][0]["id"], found_id.as_str());
        assert_eq!(body["data"][0]["dateFound"], "2024-01-03");
        assert_eq!(body["data"][0]["matchStatus"], "pending");
        assert!(body["data"][0].get("contactEmail").is_none());

        let response = server
            .post("/api/claims")
            .json(&json!({ "foundItemId": found_id, "color": "blue", "mark": "red zipper" }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["approved"], true);
        assert_eq!(body["data"]["finderEmail"], "finder@example.com");
        assert_eq!(body["data"]["loserEmail"], "owner@example.com");
        assert!(body["data"]["signedImageUrl"]
            .as_str()
            .unwrap()
            .ends_with("expires_in=600"));

        let body: Value = server.get("/api/found").await.json();
        assert_eq!(body["data"][0]["matchStatus"], "verified");
    }

    #[tokio::test]
    async fn test_found_without_finder_contact_is_rejected() {
        let ctx = TestContext::new();
        let server = server(&ctx);

        let form = MultipartForm::new()
            .add_text("category", "bag")
            .add_text("dateFound", "2024-01-03")
            .add_text("location", "Central Park");
        let response = server.post("/api/found").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);

        let body: Value = server.get("/api/found").await.json();
        assert_eq!(body["meta"]["total"], 0);
    }

    #[tokio::test]
    async fn test_found_with_pdf_is_rejected() {
        let ctx = TestContext::new();
        let server = server(&ctx);

        let response = server
            .post("/api/found")
            .multipart(found_form().add_part(
                "itemImage",
                Part::bytes(b"%PDF".to_vec())
                    .file_name("notes.pdf")
                    .mime_type("application/pdf"),
            ))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_lost_with_malformed_json_is_rejected() {
        let ctx = TestContext::new();
        let server = server(&ctx);

        let response = server
            .post("/api/lost")
            .text("{not json")
            .content_type("application/json")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_store_outage_is_a_server_error() {
        let ctx = TestContext::new();
        let server = server(&ctx);
        ctx.store.set_unavailable(true);

        let response = server.get("/api/found").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_claim_for_unknown_item_is_not_approved() {
        let ctx = TestContext::new();
        let server = server(&ctx);

        let response = server
            .post("/api/claims")
            .json(&json!({ "foundItemId": "missing", "mark": "red zipper" }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"], json!({ "approved": false }));
    }
}
