//! Test-card analysis service.

use axum::body::Bytes;
use hemotype_core::AnalysisResult;
use tracing::{info, warn};

use crate::error::AppError;
use crate::state::ServerState;

/// An uploaded image and the name the client gave it.
pub struct Upload {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Decodes and analyzes an upload on the blocking pool, then records it when
/// report recording is enabled.
pub async fn analyze_upload(state: &ServerState, upload: Upload) -> Result<AnalysisResult, AppError> {
    let analyzer = state.analyzer.clone();
    let bytes = upload.bytes;

    let result = tokio::task::spawn_blocking(move || analyzer.analyze_bytes(&bytes))
        .await
        .map_err(AppError::internal)??;

    if state.config.record_reports {
        record(state, &upload.file_name, &result)?;
    }

    Ok(result)
}

fn record(state: &ServerState, file_name: &str, result: &AnalysisResult) -> Result<(), AppError> {
    let id = state.reports.insert_report(file_name, result).map_err(|e| {
        warn!("Failed to record report for {}: {}", file_name, e);
        AppError::from(e)
    })?;
    info!("Recorded report {} for {}", id, file_name);
    Ok(())
}
