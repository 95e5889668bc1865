//! Vehicle endpoints.

use super::{ApiClient, ApiError, ApiResponse, Paging};
use crate::validation::{require, validate_imei, validate_vin, validate_year};
use serde::Serialize;
use serde_json::Value;

/// Payload for creating a vehicle.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVehicle {
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub plate_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fleet_id: Option<String>,
}

impl NewVehicle {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_vin(&self.vin)?;
        require("make", &self.make)?;
        require("model", &self.model)?;
        require("plate number", &self.plate_number)?;
        validate_year(self.year)?;
        Ok(())
    }
}

/// Payload for updating a vehicle. Unset fields are left untouched server-side.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleUpdate {
    pub vehicle_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plate_number: Option<String>,
}

/// Device ↔ vehicle link request.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceLink {
    pub lonestar_id: String,
    pub vehicle_id: String,
    pub imei: String,
}

/// `POST lonestar/{id}/vehicles?page=&limit=`
pub async fn list_vehicles(
    client: &ApiClient,
    lonestar_id: &str,
    paging: Paging,
    body: &Value,
) -> Result<ApiResponse, ApiError> {
    client
        .post(&format!("lonestar/{}/vehicles", lonestar_id), &paging.query(), body)
        .await
}

/// `POST lonestar/fleet/{id}/insertvehicle?currentLoggedInUserId=`
pub async fn insert_vehicle(
    client: &ApiClient,
    lonestar_id: &str,
    user_id: &str,
    vehicle: &NewVehicle,
) -> Result<ApiResponse, ApiError> {
    vehicle.validate()?;
    client
        .post(
            &format!("lonestar/fleet/{}/insertvehicle", lonestar_id),
            &[("currentLoggedInUserId", user_id.to_string())],
            vehicle,
        )
        .await
}

/// `POST lonestar/fleet/{id}/updatevehicle`
pub async fn update_vehicle(
    client: &ApiClient,
    lonestar_id: &str,
    update: &VehicleUpdate,
) -> Result<ApiResponse, ApiError> {
    require("vehicle id", &update.vehicle_id)?;
    client
        .post(&format!("lonestar/fleet/{}/updatevehicle", lonestar_id), &[], update)
        .await
}

/// `POST lonestar/fleet/link/vehicle`
pub async fn link_device(client: &ApiClient, link: &DeviceLink) -> Result<ApiResponse, ApiError> {
    validate_imei(&link.imei)?;
    require("vehicle id", &link.vehicle_id)?;
    client.post("lonestar/fleet/link/vehicle", &[], link).await
}

/// `POST lonestar/fleet/delink/vehicle`
pub async fn delink_device(client: &ApiClient, link: &DeviceLink) -> Result<ApiResponse, ApiError> {
    validate_imei(&link.imei)?;
    require("vehicle id", &link.vehicle_id)?;
    client.post("lonestar/fleet/delink/vehicle", &[], link).await
}
