//! Trip endpoints.

use super::{ApiClient, ApiError, ApiResponse, Paging};
use serde_json::Value;

/// `POST lonestar/{id}/trips?page=&limit=`
pub async fn list_trips(
    client: &ApiClient,
    lonestar_id: &str,
    paging: Paging,
    body: &Value,
) -> Result<ApiResponse, ApiError> {
    client
        .post(&format!("lonestar/{}/trips", lonestar_id), &paging.query(), body)
        .await
}

/// `GET lonestar/trip/{tripId}/details`
pub async fn trip_details(client: &ApiClient, trip_id: &str) -> Result<ApiResponse, ApiError> {
    client.get(&format!("lonestar/trip/{}/details", trip_id), &[]).await
}
