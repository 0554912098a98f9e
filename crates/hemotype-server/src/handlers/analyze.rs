//! Test-card analysis handler.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::Json;
use hemotype_core::AnalysisResult;
use tracing::{error, info};

use crate::error::AppError;
use crate::services::analysis::{self as analysis_service, Upload};
use crate::state::ServerState;

/// Multipart field carrying the card image.
const UPLOAD_FIELD: &str = "file";

/// POST /analyze - Classify an uploaded test card.
pub async fn analyze(
    State(state): State<Arc<ServerState>>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let upload = read_upload(&mut multipart).await?;
    info!("Analyzing {} ({} bytes)", upload.file_name, upload.bytes.len());

    let result = analysis_service::analyze_upload(&state, upload).await.map_err(|e| {
        error!("Analysis failed: {:?}", e);
        e
    })?;

    Ok(Json(result))
}

async fn read_upload(multipart: &mut Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field.bytes().await?;
        return Ok(Upload { file_name, bytes });
    }

    Err(AppError::Unprocessable(format!(
        "missing '{}' field in multipart body",
        UPLOAD_FIELD
    )))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use hemotype_config::ServerConfig;
    use tower::ServiceExt;

    use crate::app;
    use crate::test_support::*;

    #[tokio::test]
    async fn test_without_model_returns_undetermined() {
        let state = degraded_state();
        let png = card_png(600, 300, [true, false, true]);

        let response = app(state.clone())
            .oneshot(multipart_request("file", "card.png", &png))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(
            json,
            serde_json::json!({
                "blood_type": "Undetermined",
                "confidence_score": 0.0,
                "analysis_data": {
                    "section_0": { "agglutination": null, "confidence": 0.0 },
                    "section_1": { "agglutination": null, "confidence": 0.0 },
                    "section_2": { "agglutination": null, "confidence": 0.0 },
                }
            })
        );
        assert_eq!(state.reports.count_reports().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_with_model_resolves_blood_type() {
        let png = card_png(300, 100, [false, true, true]);

        let response = app(model_state(ServerConfig::default()))
            .oneshot(multipart_request("file", "card.png", &png))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["blood_type"], "B+");
        assert_eq!(json["analysis_data"]["section_0"]["agglutination"], false);
        assert_eq!(json["analysis_data"]["section_1"]["agglutination"], true);
        assert_eq!(json["analysis_data"]["section_2"]["agglutination"], true);
        assert!(json["confidence_score"].as_f64().unwrap() > 0.9);
    }

    #[tokio::test]
    async fn test_records_report_when_enabled() {
        let config = ServerConfig {
            record_reports: true,
            ..ServerConfig::default()
        };
        let state = model_state(config);
        let png = card_png(90, 30, [true, true, false]);

        let response = app(state.clone())
            .oneshot(multipart_request("file", "sample.png", &png))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let reports = state.reports.list_reports(&Default::default()).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].image_path, "sample.png");
        assert_eq!(reports[0].result.blood_type, "AB-");
    }

    #[tokio::test]
    async fn test_undecodable_image_is_server_error() {
        let response = app(degraded_state())
            .oneshot(multipart_request("file", "card.png", b"garbage bytes"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("decode"));
    }

    #[tokio::test]
    async fn test_narrow_image_is_bad_request() {
        let png = card_png(2, 40, [false, false, false]);

        let response = app(degraded_state())
            .oneshot(multipart_request("file", "narrow.png", &png))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_file_field() {
        let png = card_png(30, 30, [false, false, false]);

        let response = app(degraded_state())
            .oneshot(multipart_request("image", "card.png", &png))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_upload_limit() {
        let config = ServerConfig {
            max_upload_bytes: 64,
            ..ServerConfig::default()
        };
        let png = card_png(300, 300, [false, false, false]);

        let response = app(model_state(config))
            .oneshot(multipart_request("file", "big.png", &png))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_not_multipart() {
        let request = Request::post("/analyze")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = app(degraded_state()).oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());
    }
}
