use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    Json, Router,
};
use fleetdash::api::upload::{bulk_upload, BulkUpload, UploadKind, UploadPhase};
use fleetdash::api::vehicles::{insert_vehicle, list_vehicles, NewVehicle};
use fleetdash::api::{trips, ApiClient, ApiError, Paging};
use fleetdash::auth::SessionStore;
use fleetdash::constants::ERROR_UPLOAD_TRANSFER_FAILED;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path: String,
    query: Option<String>,
    authorization: Option<String>,
    body: String,
}

#[derive(Clone, Default)]
struct MockServer {
    requests: Arc<Mutex<Vec<Recorded>>>,
    responses: Arc<Mutex<HashMap<String, (u16, Value)>>>,
}

impl MockServer {
    fn respond(&self, path: &str, status: u16, body: Value) {
        self.responses.lock().unwrap().insert(path.to_string(), (status, body));
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn record(
    State(server): State<MockServer>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, Json<Value>) {
    let path = uri.path().to_string();
    server.requests.lock().unwrap().push(Recorded {
        method,
        path: path.clone(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    let (status, body) = server
        .responses
        .lock()
        .unwrap()
        .get(&path)
        .cloned()
        .unwrap_or((200, json!([])));
    (StatusCode::from_u16(status).unwrap(), Json(body))
}

async fn spawn_server() -> (String, MockServer) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = MockServer::default();
    let app = Router::new().fallback(record).with_state(server.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}/"), server)
}

fn client_for(base_url: &str, token: Option<&str>) -> ApiClient {
    let session = match token {
        Some(token) => SessionStore::with_token(token),
        None => SessionStore::in_memory(),
    };
    ApiClient::new(base_url, Arc::new(session)).unwrap()
}

#[tokio::test]
async fn test_list_call_sends_bearer_paging_and_body() {
    let (base, server) = spawn_server().await;
    server.respond("/lonestar/L1/vehicles", 200, json!({"rows": [{"vin": "A"}], "count": 1}));
    let client = client_for(&base, Some("secret-token"));

    let response = list_vehicles(&client, "L1", Paging::new(2, 10), &json!({"sortKey": "make"}))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.rows().len(), 1);
    assert_eq!(response.total(), Some(1));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/lonestar/L1/vehicles");
    assert_eq!(request.authorization.as_deref(), Some("Bearer secret-token"));
    let query = request.query.clone().unwrap_or_default();
    assert!(query.contains("page=2"));
    assert!(query.contains("limit=10"));
    let body: Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body, json!({"sortKey": "make"}));
}

#[tokio::test]
async fn test_non_success_status_is_returned_as_data() {
    let (base, server) = spawn_server().await;
    server.respond("/lonestar/L1/vehicles", 400, json!({"details": "Fleet not found"}));
    let client = client_for(&base, Some("t"));

    let response = list_vehicles(&client, "L1", Paging::new(1, 10), &json!({}))
        .await
        .unwrap();

    assert_eq!(response.status, 400);
    assert!(!response.is_success());
    assert_eq!(response.failure_message().as_deref(), Some("Fleet not found"));
}

#[tokio::test]
async fn test_missing_token_fails_before_any_request() {
    let (base, server) = spawn_server().await;
    let client = client_for(&base, None);

    let result = list_vehicles(&client, "L1", Paging::new(1, 10), &json!({})).await;

    assert!(matches!(result, Err(ApiError::Authentication)));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_empty_token_counts_as_missing() {
    let (base, server) = spawn_server().await;
    let client = client_for(&base, Some(""));

    let result = trips::trip_details(&client, "T9").await;

    assert!(matches!(result, Err(ApiError::Authentication)));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_get_details_endpoint() {
    let (base, server) = spawn_server().await;
    server.respond("/lonestar/trip/T9/details", 200, json!({"tripId": "T9", "miles": 12}));
    let client = client_for(&base, Some("t"));

    let response = trips::trip_details(&client, "T9").await.unwrap();

    assert_eq!(response.data["miles"], json!(12));
    assert_eq!(server.requests()[0].method, Method::GET);
}

#[tokio::test]
async fn test_invalid_vehicle_is_rejected_locally() {
    let (base, server) = spawn_server().await;
    let client = client_for(&base, Some("t"));
    let vehicle = NewVehicle {
        vin: "TOO-SHORT".to_string(),
        make: "Volvo".to_string(),
        model: "VNL".to_string(),
        year: 2020,
        plate_number: "TX-1".to_string(),
        fleet_id: None,
    };

    let result = insert_vehicle(&client, "L1", "U1", &vehicle).await;

    assert!(matches!(result, Err(ApiError::Validation(_))));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_insert_vehicle_attaches_current_user() {
    let (base, server) = spawn_server().await;
    server.respond("/lonestar/fleet/L1/insertvehicle", 200, json!({"id": "V1"}));
    let client = client_for(&base, Some("t"));
    let vehicle = NewVehicle {
        vin: "1HGCM82633A004352".to_string(),
        make: "Volvo".to_string(),
        model: "VNL".to_string(),
        year: 2020,
        plate_number: "TX-1".to_string(),
        fleet_id: None,
    };

    let response = insert_vehicle(&client, "L1", "U7", &vehicle).await.unwrap();

    assert!(response.is_success());
    let request = &server.requests()[0];
    assert_eq!(request.query.as_deref(), Some("currentLoggedInUserId=U7"));
    let body: Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body["plateNumber"], json!("TX-1"));
    assert!(body.get("fleetId").is_none());
}

fn sample_upload() -> BulkUpload {
    BulkUpload {
        kind: UploadKind::Vehicles,
        file_name: "vehicles.csv".to_string(),
        content_type: "text/csv".to_string(),
        bytes: b"vin,make\n1HGCM82633A004352,Volvo\n".to_vec(),
    }
}

#[tokio::test]
async fn test_bulk_upload_runs_all_phases() {
    let (base, server) = spawn_server().await;
    server.respond(
        "/lonestar/L1/vehicles/bulk-upload-url",
        200,
        json!({"url": format!("{base}storage/put-here"), "key": "uploads/vehicles.csv"}),
    );
    server.respond("/lonestar/L1/vehicles/bulk-upload-details", 200, json!({"message": "queued"}));
    let client = client_for(&base, Some("t"));

    let response = bulk_upload(&client, "L1", "U1", &sample_upload()).await.unwrap();
    assert_eq!(response.data["message"], json!("queued"));

    let requests = server.requests();
    assert_eq!(requests.len(), 3);

    let url_request: Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(url_request["fileName"], json!("vehicles.csv"));
    assert_eq!(url_request["contentType"], json!("text/csv"));

    assert_eq!(requests[1].method, Method::PUT);
    assert_eq!(requests[1].path, "/storage/put-here");
    assert!(requests[1].authorization.is_none());

    let details: Value = serde_json::from_str(&requests[2].body).unwrap();
    assert_eq!(details["key"], json!("uploads/vehicles.csv"));
    assert_eq!(details["currentLoggedInUserId"], json!("U1"));
}

#[tokio::test]
async fn test_bulk_upload_transfer_failure_stops_before_registration() {
    let (base, server) = spawn_server().await;
    server.respond(
        "/lonestar/L1/vehicles/bulk-upload-url",
        200,
        json!({"data": {"uploadUrl": format!("{base}storage/put-here"), "key": "k"}}),
    );
    server.respond("/storage/put-here", 500, json!({}));
    let client = client_for(&base, Some("t"));

    let err = bulk_upload(&client, "L1", "U1", &sample_upload()).await.unwrap_err();

    match err {
        ApiError::Upload { phase, message } => {
            assert_eq!(phase, UploadPhase::Transfer);
            assert_eq!(message, ERROR_UPLOAD_TRANSFER_FAILED);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn test_bulk_upload_url_rejection_reports_details() {
    let (base, server) = spawn_server().await;
    server.respond(
        "/lonestar/L1/vehicles/bulk-upload-url",
        403,
        json!({"details": "Uploads disabled for this fleet"}),
    );
    let client = client_for(&base, Some("t"));

    let err = bulk_upload(&client, "L1", "U1", &sample_upload()).await.unwrap_err();

    match err {
        ApiError::Upload { phase, message } => {
            assert_eq!(phase, UploadPhase::RequestUrl);
            assert_eq!(message, "Uploads disabled for this fleet");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(server.requests().len(), 1);
}
