//! Fleet endpoints, as seen by the insurer persona.

use super::{ApiClient, ApiError, ApiResponse, Paging};
use serde_json::Value;

/// `POST lonestar/{insurerId}/fleets?page=&limit=`
pub async fn list_fleets(
    client: &ApiClient,
    insurer_id: &str,
    paging: Paging,
    body: &Value,
) -> Result<ApiResponse, ApiError> {
    client
        .post(&format!("lonestar/{}/fleets", insurer_id), &paging.query(), body)
        .await
}

/// `GET lonestar/fleet/{id}/details`
pub async fn fleet_details(client: &ApiClient, lonestar_id: &str) -> Result<ApiResponse, ApiError> {
    client.get(&format!("lonestar/fleet/{}/details", lonestar_id), &[]).await
}
