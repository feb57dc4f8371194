//! End-to-end scenarios against a real PostgreSQL.
//!
//! Run with `DATABASE_URL=postgres://... cargo test -- --ignored`.

mod common;

use axum::http::{Method, StatusCode};
use base64::Engine;
use common::{database_app, delete, get, json, multipart, unique};
use serde_json::{json, Value};

fn timestamp(v: &Value) -> chrono::DateTime<chrono::FixedOffset> {
    chrono::DateTime::parse_from_rfc3339(v.as_str().expect("timestamp string")).expect("RFC 3339")
}

fn find_by_id<'a>(rows: &'a Value, id: &Value) -> Option<&'a Value> {
    rows["data"].as_array()?.iter().find(|r| &r["id"] == id)
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn document_lifecycle_keeps_untouched_columns() {
    let app = database_app().await;
    let bytes: &[u8] = b"PK\x03\x04first sheet";
    let (status, created) = multipart(
        &app,
        Method::POST,
        "/api/shipments",
        &[("name", "Week 12"), ("description", "inbound"), ("createdBy", "ana")],
        Some(("week12.xlsx", bytes)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["data"]["id"].clone();
    assert_eq!(created["data"]["status"], "incomplete");
    assert_eq!(created["data"]["file_name"], "week12.xlsx");
    assert!(created["data"].get("file_data").is_none());

    let (status, listed) = get(&app, "/api/shipments").await;
    assert_eq!(status, StatusCode::OK);
    let row = find_by_id(&listed, &id).expect("created row is listed");
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    assert_eq!(row["file_data"], Value::String(encoded.clone()));
    assert_eq!(row["createdBy"], "ana");

    // status only, as JSON: name, description and the attachment stay
    let (status, patched) = json(
        &app,
        Method::PUT,
        &format!("/api/shipments/{id}"),
        json!({"status": "completed", "updatedBy": "budi"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["data"]["status"], "completed");
    assert_eq!(patched["data"]["name"], "Week 12");
    assert_eq!(patched["data"]["description"], "inbound");
    assert_eq!(patched["data"]["updatedBy"], "budi");
    assert_eq!(patched["data"]["file_name"], "week12.xlsx");
    assert_eq!(patched["data"]["file_data"], Value::String(encoded.clone()));
    assert!(timestamp(&patched["data"]["updatedAt"]) >= timestamp(&created["data"]["updatedAt"]));
    assert_eq!(patched["data"]["createdAt"], created["data"]["createdAt"]);

    // multipart with an empty name and only createdBy: the name survives, createdBy acts
    let (status, patched) = multipart(
        &app,
        Method::PUT,
        &format!("/api/shipments/{id}"),
        &[("status", "complete"), ("name", ""), ("createdBy", "citra")],
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["data"]["status"], "complete");
    assert_eq!(patched["data"]["name"], "Week 12");
    assert_eq!(patched["data"]["updatedBy"], "citra");
    assert_eq!(patched["data"]["createdBy"], "ana");
    assert_eq!(patched["data"]["file_data"], Value::String(encoded));

    let (status, replaced) = multipart(
        &app,
        Method::PUT,
        &format!("/api/shipments/{id}/excel"),
        &[("file_name", "week12-final.xlsx")],
        Some(("upload.xlsx", &b"PK\x03\x04second"[..])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["data"]["file_name"], "week12-final.xlsx");

    let (status, body) = delete(&app, &format!("/api/shipments/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["message"], "shipment deleted successfully");

    let (_, listed) = get(&app, "/api/shipments").await;
    assert!(find_by_id(&listed, &id).is_none());

    let (status, _) = delete(&app, &format!("/api/shipments/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = multipart(
        &app,
        Method::PUT,
        &format!("/api/shipments/{id}/excel"),
        &[],
        Some(("x.xlsx", &b"x"[..])),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn document_kinds_are_separate_tables() {
    let app = database_app().await;
    let (status, created) = multipart(
        &app,
        Method::POST,
        "/api/item-activity-logs",
        &[("name", "activity"), ("createdBy", "ana"), ("status", "complete")],
        Some(("log.xlsx", &b"log"[..])),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["status"], "complete");
    let id = created["data"]["id"].clone();

    let (_, summary) = get(&app, "/api/summary").await;
    let in_summary = find_by_id(&summary, &id).is_some_and(|r| r["name"] == "activity");
    assert!(!in_summary);

    let (status, _) = delete(&app, &format!("/api/item-activity-logs/{id}")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn login_failures_are_indistinguishable() {
    let app = database_app().await;
    let email = format!("{}@example.test", unique("coord"));
    let register = json!({"email": email, "password": "s3cret", "role": "coordinator", "fullName": "Citra"});

    let (status, user) = json(&app, Method::POST, "/api/auth/register", register.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["data"]["role"], "coordinator");
    assert!(user["data"].get("password").is_none());

    let (status, body) = json(&app, Method::POST, "/api/auth/register", register).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["message"], "email already exists");

    let (status, logged_in) = json(
        &app,
        Method::POST,
        "/api/auth/login",
        json!({"email": email, "password": "s3cret"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(logged_in["data"]["fullName"], "Citra");

    let (wrong_status, wrong_body) = json(
        &app,
        Method::POST,
        "/api/auth/login",
        json!({"email": email, "password": "nope"}),
    )
    .await;
    let (unknown_status, unknown_body) = json(
        &app,
        Method::POST,
        "/api/auth/login",
        json!({"email": format!("missing-{email}"), "password": "s3cret"}),
    )
    .await;
    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_status, unknown_status);
    assert_eq!(wrong_body, unknown_body);

    let id = user["data"]["id"].clone();
    let (status, _) = json(
        &app,
        Method::PATCH,
        &format!("/api/users/secrets/{id}/role"),
        json!({"role": "admin"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, users) = get(&app, "/api/users").await;
    assert_eq!(find_by_id(&users, &id).unwrap()["role"], "admin");

    let (status, _) = delete(&app, &format!("/api/users/secrets/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = delete(&app, &format!("/api/users/secrets/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn driver_create_update_delete() {
    let app = database_app().await;
    let (status, created) = json(
        &app,
        Method::POST,
        "/api/drivers",
        json!({"name": "Alex Turner", "licenseNumber": "D12345", "vehicleAssigned": "Truck 1", "status": "Active"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["name"], "Alex Turner");
    assert_eq!(created["data"]["licenseNumber"], "D12345");
    assert_eq!(created["data"]["vehicleAssigned"], "Truck 1");
    assert_eq!(created["data"]["status"], "Active");
    let id = created["data"]["id"].clone();

    let (_, listed) = get(&app, "/api/drivers").await;
    assert!(find_by_id(&listed, &id).is_some());
    let ids: Vec<i64> = listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_i64().unwrap())
        .collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));

    let (status, updated) = json(
        &app,
        Method::PUT,
        &format!("/api/drivers/{id}"),
        json!({"name": "Budi S.", "licenseNumber": "SIM-2", "vehicleAssigned": "V-1", "status": "On Duty"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["vehicleAssigned"], "V-1");

    let (status, body) = delete(&app, &format!("/api/drivers/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = json(
        &app,
        Method::PUT,
        &format!("/api/drivers/{id}"),
        json!({"name": "Budi", "licenseNumber": "SIM-3"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn vehicles_default_active_and_reject_duplicate_ids() {
    let app = database_app().await;
    let id = unique("V");
    let (status, created) = json(
        &app,
        Method::POST,
        "/api/vehicles",
        json!({"id": id, "type": "Truck", "plateNumber": "B 9 XY"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["status"], "Active");

    let (status, _) = json(
        &app,
        Method::POST,
        "/api/vehicles",
        json!({"id": id, "type": "Van", "plateNumber": "B 10 XY"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let key = Value::String(id.clone());
    let (_, all) = get(&app, "/api/vehicles").await;
    assert_eq!(find_by_id(&all, &key).unwrap()["type"], "Truck");
    let (_, active) = get(&app, "/api/vehicles-drivers").await;
    assert!(find_by_id(&active, &key).is_some());

    let (status, _) = json(
        &app,
        Method::PUT,
        &format!("/api/vehicles/{id}"),
        json!({"type": "Truck", "plateNumber": "B 9 XY", "status": "Maintenance"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, active) = get(&app, "/api/vehicles-drivers").await;
    assert!(find_by_id(&active, &key).is_none());

    let (status, _) = delete(&app, &format!("/api/vehicles/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn route_codes_are_unique() {
    let app = database_app().await;
    let code = unique("R");
    let body = json!({"id": code, "address": "Jl. Sudirman 5", "dropPoint": "Gate B"});
    let (status, _) = json(&app, Method::POST, "/api/routes", body.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, err) = json(&app, Method::POST, "/api/routes", body).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["error"]["message"], "route code already exists");

    let (status, updated) = json(
        &app,
        Method::PUT,
        &format!("/api/routes/{code}"),
        json!({"address": "Jl. Thamrin 2", "dropPoint": "Gate C"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["dropPoint"], "Gate C");

    let (status, _) = delete(&app, &format!("/api/routes/{code}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}
