mod common;

use axum::http::{Method, StatusCode, header};
use axum::body::Body;
use axum::http::Request;
use serde_json::json;
use tower::ServiceExt;

use common::TestApp;
use eventhub_db::Database;

#[tokio::test]
async fn create_sets_location_header() {
    let t = TestApp::new();
    let (admin, _) = t.admin("ada@example.com").await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/Events/create")
        .header(header::AUTHORIZATION, format!("Bearer {admin}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"eventName": "Launch", "eventDate": "2031-06-01T09:00:00Z", "location": "Pier", "maxCapacity": 40})
                .to_string(),
        ))
        .unwrap();
    let response = t.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    assert!(location.starts_with("/api/Events/"));
}

#[tokio::test]
async fn list_get_and_validation() {
    let t = TestApp::new();
    let (admin, admin_id) = t.admin("ada@example.com").await;
    let (user, _) = t.participant("pat@example.com").await;

    let later = t.create_event(&admin, "Later", "2032-01-01T10:00:00Z", 5).await;
    let sooner = t.create_event(&admin, "Sooner", "2031-01-01T10:00:00Z", 5).await;

    let (status, body) = t.get("/api/Events/All", &user).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body.as_array().unwrap().iter().map(|e| e["eventId"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![sooner, later]);

    let (status, body) = t.get(&format!("/api/Events/{later}"), &user).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["createdByAdminId"], admin_id);
    assert_eq!(body["description"], "Bring a laptop");

    let (status, body) = t.get("/api/Events/777", &user).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Event not found");

    let (status, _) = t
        .post(
            "/api/Events/create",
            Some(&admin),
            json!({"eventName": "Zero", "eventDate": "2031-01-01T10:00:00Z", "location": "X", "maxCapacity": 0}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_ids_get_a_json_message() {
    let t = TestApp::new();
    let (admin, _) = t.admin("ada@example.com").await;

    for uri in [
        "/api/Events/abc",
        "/api/Events/99999999999999999999",
        "/api/Events/abc/capacity",
        "/api/Participants/abc",
        "/api/Registrations/event/abc/registrations",
    ] {
        let (status, body) = t.get(uri, &admin).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["message"].is_string(), "{uri}: {body}");
    }

    let (status, body) = t
        .send(Method::DELETE, "/api/Registrations/registration/x", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("x"));
}

#[tokio::test]
async fn patch_applies_present_fields_only() {
    let t = TestApp::new();
    let (admin, _) = t.admin("ada@example.com").await;
    let id = t.create_event(&admin, "Original", "2031-01-01T10:00:00Z", 5).await;
    let uri = format!("/api/Events/{id}");

    let (status, _) = t
        .send(Method::PATCH, &uri, Some(&admin), Some(json!({"maxCapacity": 9})))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = t
        .send(Method::PATCH, &uri, Some(&admin), Some(json!({"location": "Annex"})))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = t.get(&uri, &admin).await;
    assert_eq!(body["maxCapacity"], 9);
    assert_eq!(body["location"], "Annex");
    assert_eq!(body["eventName"], "Original");
    assert_eq!(body["description"], "Bring a laptop");

    let (status, _) = t
        .send(Method::PATCH, &uri, Some(&admin), Some(json!({"description": "   "})))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, body) = t.get(&uri, &admin).await;
    assert!(body["description"].is_null());

    let (status, body) = t.send(Method::PATCH, &uri, Some(&admin), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid update data");

    let (status, _) = t
        .send(Method::PATCH, "/api/Events/555", Some(&admin), Some(json!({"location": "Nowhere"})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_an_event_cascades_to_registrations() {
    let t = TestApp::new();
    let (admin, _) = t.admin("ada@example.com").await;
    let event = t.create_event(&admin, "Doomed", "2031-01-01T10:00:00Z", 5).await;
    let (user, pid) = t.participant("pat@example.com").await;

    let (status, body) = t
        .post(&format!("/api/Registrations/event/{event}/register"), Some(&user), json!({}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let reg_id = body["registrationId"].as_i64().unwrap();

    let (status, _) = t
        .send(Method::DELETE, &format!("/api/Events/{event}"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    assert!(t.state.db.get_registration_by_id(reg_id).unwrap().is_none());
    let (_, body) = t.get(&format!("/api/Participants/{pid}/upcoming-events"), &user).await;
    assert!(body.as_array().unwrap().is_empty());

    let (status, body) = t
        .send(Method::DELETE, &format!("/api/Events/{event}"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Event not found");

    let (status, body) = t.send(Method::DELETE, "/api/Events/0", Some(&admin), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid event ID");
}

#[tokio::test]
async fn events_survive_a_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("eventhub.db");

    let event = {
        let t = TestApp::with_db(Database::open(&path).unwrap());
        let (admin, _) = t.admin("ada@example.com").await;
        t.create_event(&admin, "Persistent", "2031-01-01T10:00:00Z", 5).await
    };

    let t = TestApp::with_db(Database::open(&path).unwrap());
    let (status, body) = t
        .post("/api/auth/login", None, json!({"email": "ada@example.com", "password": "admin-pass-1"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap();

    let (status, body) = t.get(&format!("/api/Events/{event}"), token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["eventName"], "Persistent");
}
