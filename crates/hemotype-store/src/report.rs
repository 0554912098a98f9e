//! Report record types.

use hemotype_core::AnalysisResult;
use serde::{Deserialize, Serialize};

/// A stored analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    /// Row identifier.
    pub id: i64,
    /// Name of the uploaded image as sent by the client.
    pub image_path: String,
    /// The analysis returned for the image.
    pub result: AnalysisResult,
    /// UTC timestamp, `YYYY-MM-DD HH:MM:SS`.
    pub created_at: String,
}

/// Query parameters for listing reports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportQuery {
    /// Filter by blood-type label, including `"Undetermined"`.
    pub blood_type: Option<String>,
    /// Maximum number of reports to return.
    pub limit: Option<u32>,
    /// Offset for pagination.
    pub offset: Option<u32>,
}
