//! Stored report API handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use hemotype_store::{ReportQuery, ReportRecord};

use crate::dto::{DeleteReportResponse, ListReportsQuery, ReportsListResponse};
use crate::error::AppError;
use crate::state::ServerState;

/// GET /reports - List stored reports, newest first.
pub async fn list(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<ListReportsQuery>,
) -> Result<Json<ReportsListResponse>, AppError> {
    let query = ReportQuery {
        blood_type: params.blood_type,
        limit: params.limit.or(Some(50)),
        offset: params.offset,
    };

    let reports = state.reports.list_reports(&query).map_err(|e| {
        tracing::error!("Failed to list reports: {}", e);
        AppError::Internal("failed to list reports".into())
    })?;

    Ok(Json(ReportsListResponse { reports }))
}

/// GET /reports/{id} - Get a single report.
pub async fn get(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<i64>,
) -> Result<Json<ReportRecord>, AppError> {
    let report = state
        .reports
        .get_report(id)
        .map_err(|e| {
            tracing::error!("Failed to get report {}: {}", id, e);
            AppError::Internal("failed to get report".into())
        })?
        .ok_or_else(|| AppError::NotFound("report not found".into()))?;

    Ok(Json(report))
}

/// DELETE /reports/{id} - Delete a report.
pub async fn delete(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteReportResponse>, AppError> {
    let deleted = state.reports.delete_report(id).map_err(|e| {
        tracing::error!("Failed to delete report {}: {}", id, e);
        AppError::Internal("failed to delete report".into())
    })?;

    if !deleted {
        return Err(AppError::NotFound("report not found".into()));
    }

    Ok(Json(DeleteReportResponse { success: true }))
}
