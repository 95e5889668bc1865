//! Device and dashcam footage endpoints.

use super::{ApiClient, ApiError, ApiResponse, Paging};
use crate::validation::{validate_imei, ValidationError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Dashcam footage request for a time window on one device.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRequest {
    pub imei: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<String>,
}

impl VideoRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_imei(&self.imei)?;
        if self.end_time <= self.start_time {
            return Err(ValidationError::InvalidTimeWindow.into());
        }
        Ok(())
    }
}

/// `POST lonestar/{id}/devices?page=&limit=`
pub async fn list_devices(
    client: &ApiClient,
    lonestar_id: &str,
    paging: Paging,
    body: &Value,
) -> Result<ApiResponse, ApiError> {
    client
        .post(&format!("lonestar/{}/devices", lonestar_id), &paging.query(), body)
        .await
}

/// `POST lonestar/devices/video-history?page=&limit=`
pub async fn list_video_history(client: &ApiClient, paging: Paging, body: &Value) -> Result<ApiResponse, ApiError> {
    client
        .post("lonestar/devices/video-history", &paging.query(), body)
        .await
}

/// `POST lonestar/devices/video-request`
pub async fn request_video(client: &ApiClient, request: &VideoRequest) -> Result<ApiResponse, ApiError> {
    request.validate()?;
    client.post("lonestar/devices/video-request", &[], request).await
}
