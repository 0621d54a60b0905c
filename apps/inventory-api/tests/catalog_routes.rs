mod common;

use axum::http::{StatusCode, header};
use common::{bearer, spawn_app};
use inventory_api::config::AuthMode;
use serde_json::{Value, json};

// Walks one collection through create, get, list, update and delete as a single owner
async fn exercise_collection(path: &str, prefix: &str, noun: &str, create: Value, update: Value) {
    let app = spawn_app(AuthMode::Legacy).await;
    let auth = bearer("42");

    let created = app
        .server
        .post(path)
        .add_header(header::AUTHORIZATION, auth.clone())
        .json(&create)
        .await;
    assert_eq!(created.status_code(), StatusCode::OK, "create {path}");
    let created = created.json::<Value>();
    let id = created["id"].as_str().expect("id").to_string();
    assert!(id.starts_with(&format!("{prefix}-")), "{id} lacks prefix {prefix}");
    assert_eq!(created["user_id"], 42);
    for (key, value) in create.as_object().unwrap() {
        assert_eq!(&created[key], value, "{path} field {key}");
    }

    let item_path = format!("{path}/{id}");
    let fetched = app
        .server
        .get(&item_path)
        .add_header(header::AUTHORIZATION, auth.clone())
        .await;
    assert_eq!(fetched.status_code(), StatusCode::OK);
    assert_eq!(fetched.json::<Value>(), created);

    let listed = app
        .server
        .get(path)
        .add_header(header::AUTHORIZATION, auth.clone())
        .await
        .json::<Vec<Value>>();
    assert_eq!(listed, vec![created.clone()]);

    let updated = app
        .server
        .put(&item_path)
        .add_header(header::AUTHORIZATION, auth.clone())
        .json(&update)
        .await;
    assert_eq!(updated.status_code(), StatusCode::OK, "update {path}");
    let updated = updated.json::<Value>();
    for (key, value) in update.as_object().unwrap() {
        assert_eq!(&updated[key], value, "{path} field {key}");
    }
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["created_at"], created["created_at"]);

    let deleted = app
        .server
        .delete(&item_path)
        .add_header(header::AUTHORIZATION, auth.clone())
        .await;
    assert_eq!(deleted.status_code(), StatusCode::OK);
    assert_eq!(
        deleted.json::<Value>()["message"],
        format!("{noun} {id} deleted successfully")
    );

    let gone = app
        .server
        .get(&item_path)
        .add_header(header::AUTHORIZATION, auth)
        .await;
    assert_eq!(gone.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(gone.json::<Value>()["detail"], format!("{noun} not found"));
}

#[tokio::test]
async fn test_data_center_crud() {
    exercise_collection(
        "/data-centers",
        "dc",
        "Data center",
        json!({ "name": "FRA-1" }),
        json!({ "name": "FRA-1 (Equinix)" }),
    )
    .await;
}

#[tokio::test]
async fn test_room_crud() {
    exercise_collection(
        "/rooms",
        "room",
        "Room",
        json!({ "name": "Hall A", "data_center_id": "dc-1" }),
        json!({ "name": "Hall B", "data_center_id": null }),
    )
    .await;
}

#[tokio::test]
async fn test_rack_crud() {
    exercise_collection(
        "/racks",
        "rack",
        "Rack",
        json!({ "name": "R01", "total_units": 42, "room_id": "room-1" }),
        json!({ "name": "R01", "total_units": 48, "room_id": "room-2" }),
    )
    .await;
}

#[tokio::test]
async fn test_service_crud() {
    exercise_collection(
        "/services",
        "service",
        "Service",
        json!({
            "name": "Billing",
            "description": "Invoices and payments",
            "status": "Active",
            "owner": "finance-team",
            "department": "Finance",
            "criticality": "High"
        }),
        json!({
            "name": "Billing",
            "description": null,
            "status": "Retired",
            "owner": null,
            "department": "Finance",
            "criticality": "Low"
        }),
    )
    .await;
}

#[tokio::test]
async fn test_service_status_defaults_to_active() {
    let app = spawn_app(AuthMode::Legacy).await;
    let service = app
        .server
        .post("/services")
        .json(&json!({ "name": "DNS" }))
        .await
        .json::<Value>();
    assert_eq!(service["status"], "Active");
}

#[tokio::test]
async fn test_dangling_parent_references_are_accepted() {
    let app = spawn_app(AuthMode::Legacy).await;

    let room = app
        .server
        .post("/rooms")
        .json(&json!({ "name": "Cage 9", "data_center_id": "dc-does-not-exist" }))
        .await;
    assert_eq!(room.status_code(), StatusCode::OK);
    assert_eq!(room.json::<Value>()["data_center_id"], "dc-does-not-exist");
}

#[tokio::test]
async fn test_rack_validation() {
    let app = spawn_app(AuthMode::Legacy).await;

    let negative = app
        .server
        .post("/racks")
        .json(&json!({ "name": "R01", "total_units": -1 }))
        .await;
    assert_eq!(negative.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        negative.json::<Value>()["detail"],
        "total_units must not be negative"
    );

    let missing_units = app
        .server
        .post("/racks")
        .json(&json!({ "name": "R01" }))
        .await;
    assert_eq!(missing_units.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let app = spawn_app(AuthMode::Legacy).await;

    let res = app
        .server
        .put("/data-centers/dc-404")
        .json(&json!({ "name": "ghost" }))
        .await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>()["detail"], "Data center not found");
}

#[tokio::test]
async fn test_lists_are_isolated_per_user() {
    let app = spawn_app(AuthMode::Legacy).await;

    for (user, name) in [("1", "ams"), ("2", "lon"), ("1", "par")] {
        let res = app
            .server
            .post("/data-centers")
            .add_header(header::AUTHORIZATION, bearer(user))
            .json(&json!({ "name": name }))
            .await;
        assert_eq!(res.status_code(), StatusCode::OK);
    }

    let user_1 = app
        .server
        .get("/data-centers")
        .add_header(header::AUTHORIZATION, bearer("1"))
        .await
        .json::<Vec<Value>>();
    assert_eq!(user_1.len(), 2);
    assert!(user_1.iter().all(|dc| dc["user_id"] == 1));

    let user_2 = app
        .server
        .get("/data-centers")
        .add_header(header::AUTHORIZATION, bearer("2"))
        .await
        .json::<Vec<Value>>();
    assert_eq!(user_2.len(), 1);
    assert_eq!(user_2[0]["name"], "lon");
}
