//! Driver endpoints.

use super::{ApiClient, ApiError, ApiResponse, Paging};
use crate::validation::{require, validate_email, validate_phone};
use serde::Serialize;
use serde_json::Value;

/// Payload for creating a driver.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDriver {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub license_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<String>,
}

impl NewDriver {
    pub fn validate(&self) -> Result<(), ApiError> {
        require("first name", &self.first_name)?;
        require("last name", &self.last_name)?;
        require("license number", &self.license_number)?;
        validate_email(&self.email)?;
        validate_phone(&self.phone)?;
        Ok(())
    }
}

/// `POST lonestar/{id}/drivers?page=&limit=`
pub async fn list_drivers(
    client: &ApiClient,
    lonestar_id: &str,
    paging: Paging,
    body: &Value,
) -> Result<ApiResponse, ApiError> {
    client
        .post(&format!("lonestar/{}/drivers", lonestar_id), &paging.query(), body)
        .await
}

/// `POST lonestar/fleet/{id}/insertdriver?currentLoggedInUserId=`
pub async fn insert_driver(
    client: &ApiClient,
    lonestar_id: &str,
    user_id: &str,
    driver: &NewDriver,
) -> Result<ApiResponse, ApiError> {
    driver.validate()?;
    client
        .post(
            &format!("lonestar/fleet/{}/insertdriver", lonestar_id),
            &[("currentLoggedInUserId", user_id.to_string())],
            driver,
        )
        .await
}
