//! IFTA (fuel tax) report endpoints.

use super::{ApiClient, ApiError, ApiResponse, Paging};
use serde_json::Value;

/// Which IFTA report to page through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IftaReport {
    Fuel,
    Mileage,
}

impl IftaReport {
    pub fn path_segment(self) -> &'static str {
        match self {
            IftaReport::Fuel => "fuel",
            IftaReport::Mileage => "mileage",
        }
    }
}

/// `POST lonestar/{id}/ifta/fuel|mileage?page=&limit=`
pub async fn list_ifta(
    client: &ApiClient,
    lonestar_id: &str,
    report: IftaReport,
    paging: Paging,
    body: &Value,
) -> Result<ApiResponse, ApiError> {
    client
        .post(
            &format!("lonestar/{}/ifta/{}", lonestar_id, report.path_segment()),
            &paging.query(),
            body,
        )
        .await
}
