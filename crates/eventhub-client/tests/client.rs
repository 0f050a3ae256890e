use std::sync::Arc;

use chrono::{TimeZone, Utc};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use eventhub_client::{ApiClient, ClientError, Profile, SessionStore};
use eventhub_types::Role;
use eventhub_types::api::EventPatch;

struct Harness {
    server: MockServer,
    client: ApiClient,
    _dir: tempfile::TempDir,
}

async fn harness() -> Harness {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SessionStore::new(dir.path().join("session.json")));
    let client = ApiClient::new(format!("{}/api", server.uri()), store).unwrap();
    Harness {
        server,
        client,
        _dir: dir,
    }
}

fn participant_json(id: i64) -> serde_json::Value {
    json!({
        "participantId": id,
        "fullName": "Pat",
        "email": "pat@example.com",
        "phoneNumber": "555",
        "role": "User"
    })
}

#[tokio::test]
async fn login_persists_session_and_authenticates_later_calls() {
    let h = harness().await;

    Mock::given(method("POST"))
        .and(path("/api/Participants/Login"))
        .and(body_partial_json(json!({"email": "pat@example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "user-token",
            "participant": participant_json(7)
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/Participants/7/upcoming-events"))
        .and(header("Authorization", "Bearer user-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "eventId": 3,
            "eventName": "Meetup",
            "eventDate": "2031-01-01T10:00:00Z",
            "location": "Hall",
            "description": null,
            "maxCapacity": 10,
            "createdByAdminId": 1
        }])))
        .expect(1)
        .mount(&h.server)
        .await;

    let resp = h.client.participant_login("pat@example.com", "user-pass-1").await.unwrap();
    assert_eq!(resp.participant.participant_id, 7);

    let session = h.client.session().current().unwrap();
    assert_eq!(session.role, Role::User);
    assert!(matches!(session.profile, Profile::Participant(ref p) if p.participant_id == 7));

    let reloaded = SessionStore::new(h.client.session().path()).load().unwrap();
    assert_eq!(reloaded.token, "user-token");

    let events = h.client.upcoming_events(7).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_date, Utc.with_ymd_and_hms(2031, 1, 1, 10, 0, 0).unwrap());
}

#[tokio::test]
async fn server_message_becomes_api_error() {
    let h = harness().await;

    Mock::given(method("POST"))
        .and(path("/api/Registrations/event/5/register"))
        .and(body_partial_json(json!({"status": "Confirmed"})))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"message": "Event has reached maximum capacity"})),
        )
        .mount(&h.server)
        .await;

    let err = h.client.register_for_event(5, None).await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Event has reached maximum capacity");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn plain_text_error_body_is_kept() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/api/Events/All"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
        .mount(&h.server)
        .await;

    let err = h.client.events().await.unwrap_err();
    assert_eq!(err.status(), Some(502));
    assert!(err.to_string().contains("upstream down"));
}

#[tokio::test]
async fn no_content_responses_succeed() {
    let h = harness().await;

    Mock::given(method("PATCH"))
        .and(path("/api/Events/9"))
        .and(body_partial_json(json!({"maxCapacity": 12})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/Registrations/registration/4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&h.server)
        .await;

    let patch = EventPatch {
        max_capacity: Some(12),
        ..EventPatch::default()
    };
    h.client.update_event(9, &patch).await.unwrap();
    h.client.delete_registration(4).await.unwrap();
}

#[tokio::test]
async fn logout_drops_the_bearer_header() {
    let h = harness().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "admin-token",
            "admin": {
                "adminId": 1,
                "fullName": "Ada",
                "email": "ada@example.com",
                "role": "Admin",
                "createdAt": "2030-01-01T00:00:00Z"
            }
        })))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/Participants/All"))
        .and(header("Authorization", "Bearer admin-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([participant_json(2)])))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/Participants/All"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Missing or invalid bearer token."})),
        )
        .mount(&h.server)
        .await;

    h.client.admin_login("ada@example.com", "admin-pass-1").await.unwrap();
    assert_eq!(h.client.participants().await.unwrap().len(), 1);

    h.client.logout().unwrap();
    assert!(!h.client.session().path().exists());
    let err = h.client.participants().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
}
