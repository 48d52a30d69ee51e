mod common;

use axum::http::StatusCode;
use serde_json::json;

use task_board::test_helpers::sqlite_router;

use common::{get, ids, json_request, raw_json_request, send};

#[tokio::test]
async fn create_then_fetch_member() {
    let app = sqlite_router().await;

    let (status, json) = send(
        &app,
        json_request(
            "POST",
            "/members",
            &json!({
                "email": "kim@example.com",
                "name": "Kim",
                "role": "ADMIN",
                "department": "Platform"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["status"], 201);
    let id = json["data"]["id"].as_i64().expect("id should be assigned");
    assert_eq!(json["data"]["role"], "ADMIN");
    assert!(json["data"]["createdAt"].is_string());

    let (status, json) = send(&app, get(&format!("/members/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["email"], "kim@example.com");
    assert_eq!(json["data"]["name"], "Kim");
    assert_eq!(json["data"]["department"], "Platform");
}

#[tokio::test]
async fn role_defaults_to_member() {
    let app = sqlite_router().await;

    let (status, json) = send(
        &app,
        json_request(
            "POST",
            "/members",
            &json!({ "email": "lee@example.com", "name": "Lee" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["role"], "MEMBER");
    assert!(json["data"]["department"].is_null());
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let app = sqlite_router().await;
    let body = json!({ "email": "dup@example.com", "name": "First" });

    let (status, _) = send(&app, json_request("POST", "/members", &body)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = send(
        &app,
        json_request(
            "POST",
            "/members",
            &json!({ "email": "dup@example.com", "name": "Second" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["status"], 409);
    assert_eq!(json["message"], "Email already exists: dup@example.com");
    assert!(json["data"].is_null());

    let (_, json) = send(&app, get("/members")).await;
    assert_eq!(ids(&json["data"]).len(), 1);
}

#[tokio::test]
async fn missing_member_is_not_found() {
    let app = sqlite_router().await;

    let (status, json) = send(&app, get("/members/999")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);
    assert_eq!(json["message"], "Member not found (id=999)");
}

#[tokio::test]
async fn invalid_member_input_lists_field_errors() {
    let app = sqlite_router().await;

    let (status, json) = send(
        &app,
        json_request(
            "POST",
            "/members",
            &json!({ "email": "not-an-email", "name": "  " }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = json["data"]["errors"]
        .as_array()
        .expect("field errors should be listed");
    let fields: Vec<&str> = errors
        .iter()
        .map(|e| e["field"].as_str().unwrap_or_default())
        .collect();
    assert_eq!(fields, vec!["email", "name"]);

    let (_, json) = send(&app, get("/members")).await;
    assert!(ids(&json["data"]).is_empty());
}

#[tokio::test]
async fn unknown_role_is_rejected() {
    let app = sqlite_router().await;

    let (status, json) = send(
        &app,
        json_request(
            "POST",
            "/members",
            &json!({ "email": "kim@example.com", "name": "Kim", "role": "OWNER" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let app = sqlite_router().await;

    let (status, json) = send(&app, raw_json_request("POST", "/members", "{\"email\":")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
}

#[tokio::test]
async fn members_filter_by_department() {
    let app = sqlite_router().await;
    for (email, department) in [
        ("a@example.com", Some("Ops")),
        ("b@example.com", Some("Sales")),
        ("c@example.com", Some("Ops")),
        ("d@example.com", None),
    ] {
        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/members",
                &json!({ "email": email, "name": "N", "department": department }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, json) = send(&app, get("/members/department/Ops")).await;
    assert_eq!(status, StatusCode::OK);
    let emails: Vec<&str> = json["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .map(|m| m["email"].as_str().unwrap_or_default())
        .collect();
    assert_eq!(emails, vec!["a@example.com", "c@example.com"]);

    let (_, json) = send(&app, get("/members/department/Legal")).await;
    assert!(ids(&json["data"]).is_empty());

    let (_, json) = send(&app, get("/members")).await;
    assert_eq!(ids(&json["data"]).len(), 4);
}
