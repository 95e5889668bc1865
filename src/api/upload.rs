//! Two-phase bulk upload.
//!
//! 1. POST file metadata to obtain a presigned URL.
//! 2. PUT the raw bytes to that URL.
//! 3. POST the object key back so the backend registers the file.
//!
//! Each phase fails with its own [`UploadPhase`] so callers can tell a
//! metadata failure from a storage failure.

use super::{ApiClient, ApiError, ApiResponse};
use crate::constants::{ERROR_UPLOAD_REGISTER_FAILED, ERROR_UPLOAD_TRANSFER_FAILED, ERROR_UPLOAD_URL_FAILED};
use crate::validation::require;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Phase of the bulk upload flow that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    RequestUrl,
    Transfer,
    Register,
}

impl fmt::Display for UploadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UploadPhase::RequestUrl => "request-url",
            UploadPhase::Transfer => "transfer",
            UploadPhase::Register => "register",
        };
        f.write_str(name)
    }
}

/// Entity type a bulk file populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Vehicles,
    Drivers,
    Devices,
}

impl UploadKind {
    pub fn path_segment(self) -> &'static str {
        match self {
            UploadKind::Vehicles => "vehicles",
            UploadKind::Drivers => "drivers",
            UploadKind::Devices => "devices",
        }
    }
}

/// A file to upload.
#[derive(Debug, Clone)]
pub struct BulkUpload {
    pub kind: UploadKind,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadUrlRequest<'a> {
    file_name: &'a str,
    content_type: &'a str,
    file_size: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadDetails<'a> {
    file_name: &'a str,
    key: &'a str,
    current_logged_in_user_id: &'a str,
}

/// Presigned target returned by phase one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedTarget {
    pub url: String,
    pub key: String,
}

impl PresignedTarget {
    /// Extract `url`/`key` from the phase-one payload, looking inside `data` when nested
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let source = payload.get("data").filter(|v| v.is_object()).unwrap_or(payload);
        let url = ["url", "uploadUrl", "presignedUrl"]
            .iter()
            .find_map(|key| source.get(*key).and_then(Value::as_str))?;
        let key = source
            .get("key")
            .and_then(Value::as_str)
            .unwrap_or_default();
        Some(Self {
            url: url.to_string(),
            key: key.to_string(),
        })
    }
}

fn phase_error(phase: UploadPhase, fallback: &str, err: ApiError) -> ApiError {
    match err {
        ApiError::Authentication => ApiError::Authentication,
        other => {
            log::error!("Bulk upload {} phase failed: {}", phase, other);
            ApiError::Upload {
                phase,
                message: fallback.to_string(),
            }
        }
    }
}

/// Run the full upload. Returns the registration response on success.
pub async fn bulk_upload(
    client: &ApiClient,
    lonestar_id: &str,
    user_id: &str,
    upload: &BulkUpload,
) -> Result<ApiResponse, ApiError> {
    require("file name", &upload.file_name)?;
    let base = format!("lonestar/{}/{}", lonestar_id, upload.kind.path_segment());

    // Phase 1: presigned URL
    let response = client
        .post(
            &format!("{}/bulk-upload-url", base),
            &[],
            &UploadUrlRequest {
                file_name: &upload.file_name,
                content_type: &upload.content_type,
                file_size: upload.bytes.len(),
            },
        )
        .await
        .map_err(|e| phase_error(UploadPhase::RequestUrl, ERROR_UPLOAD_URL_FAILED, e))?;

    if let Some(message) = response.failure_message() {
        return Err(ApiError::Upload {
            phase: UploadPhase::RequestUrl,
            message,
        });
    }
    let target = PresignedTarget::from_payload(&response.data).ok_or_else(|| ApiError::Upload {
        phase: UploadPhase::RequestUrl,
        message: ERROR_UPLOAD_URL_FAILED.to_string(),
    })?;

    // Phase 2: raw bytes straight to storage
    let status = client
        .put_bytes(&target.url, upload.bytes.clone(), &upload.content_type)
        .await
        .map_err(|e| phase_error(UploadPhase::Transfer, ERROR_UPLOAD_TRANSFER_FAILED, e))?;
    if !(200..300).contains(&status) {
        log::error!("Presigned PUT returned status {}", status);
        return Err(ApiError::Upload {
            phase: UploadPhase::Transfer,
            message: ERROR_UPLOAD_TRANSFER_FAILED.to_string(),
        });
    }

    // Phase 3: registration
    let response = client
        .post(
            &format!("{}/bulk-upload-details", base),
            &[],
            &UploadDetails {
                file_name: &upload.file_name,
                key: &target.key,
                current_logged_in_user_id: user_id,
            },
        )
        .await
        .map_err(|e| phase_error(UploadPhase::Register, ERROR_UPLOAD_REGISTER_FAILED, e))?;

    if let Some(message) = response.failure_message() {
        return Err(ApiError::Upload {
            phase: UploadPhase::Register,
            message,
        });
    }

    log::info!("Bulk upload of {} registered as '{}'", upload.file_name, target.key);
    Ok(response)
}
