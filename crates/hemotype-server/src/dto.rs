use hemotype_store::ReportRecord;
use serde::{Deserialize, Serialize};

// === HTTP DTOs ===

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub model_loaded: bool,
    pub model_path: String,
    pub record_reports: bool,
}

#[derive(Debug, Deserialize, Default)]
pub struct ListReportsQuery {
    pub blood_type: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ReportsListResponse {
    pub reports: Vec<ReportRecord>,
}

#[derive(Debug, Serialize)]
pub struct DeleteReportResponse {
    pub success: bool,
}
