//! Contract tests for SessionClient session-level endpoints.
//!
//! ## Endpoints Tested
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | POST   | `/sessions/` | `create_session_*` |
//! | GET    | `/sessions/{id}` | `get_session_*` |
//! | POST   | `/sessions/{id}/invite/` | `invite_*` |
//! | POST   | `/sessions/{id}/update_username` | `update_display_name_*` |

use std::sync::Arc;

use adj_client::identity::{DISPLAY_NAME_KEY, PARTICIPANT_ID_KEY};
use adj_client::{
    AdjudicatorClient, ApiError, ClientConfig, IdentityProvider, IdentityStore,
    MemoryIdentityStore, SessionPhase,
};
use adj_core::{ParticipantId, SessionId};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER: &str = "user_alice0001";

fn identity() -> (IdentityProvider, Arc<MemoryIdentityStore>) {
    let store = Arc::new(MemoryIdentityStore::new());
    store.store(PARTICIPANT_ID_KEY, USER);
    (IdentityProvider::new(store.clone()), store)
}

async fn test_client(mock_server: &MockServer) -> AdjudicatorClient {
    let config = ClientConfig::local_mock(&mock_server.uri()).unwrap();
    AdjudicatorClient::new(config, identity().0).unwrap()
}

fn session_json(id: u64, name: &str, description: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "description": description,
        "arguments": [],
        "judgement": null,
        "appeal_judgement": null,
        "appeals": []
    })
}

// ── POST /sessions/ ──────────────────────────────────────────────────

#[tokio::test]
async fn create_session_sends_identity_and_caches_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sessions/"))
        .and(body_partial_json(serde_json::json!({
            "name": "Pizza",
            "description": "Pineapple?",
            "userId": USER
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_json(
            1,
            "Pizza",
            "Pineapple?",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server).await;
    let session = client
        .sessions()
        .create_session("Pizza", "Pineapple?")
        .await
        .unwrap();

    assert_eq!(session.id, SessionId::from(1));
    let cached = client.store().current().unwrap();
    assert_eq!(*cached, session);
    assert_eq!(client.store().phase(), Some(SessionPhase::Created));
}

#[tokio::test]
async fn create_session_failure_leaves_cache_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sessions/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("db down"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server).await;
    let err = client
        .sessions()
        .create_session("Pizza", "Pineapple?")
        .await
        .unwrap_err();

    match err {
        ApiError::Status { status, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body, "db down");
        }
        other => panic!("expected Status, got: {other:?}"),
    }
    assert!(client.store().current().is_none());
}

#[tokio::test]
async fn create_session_rejects_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sessions/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"unexpected": true})))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server).await;
    let err = client
        .sessions()
        .create_session("Pizza", "")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Deserialization { .. }));
    assert_eq!(err.status(), None);
    assert!(client.store().current().is_none());
}

// ── GET /sessions/{id} ───────────────────────────────────────────────

#[tokio::test]
async fn get_session_sends_user_query_param() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sessions/7"))
        .and(query_param("userId", USER))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_json(7, "Tabs", "Spaces?")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server).await;
    let session = client
        .sessions()
        .get_session(&SessionId::from(7))
        .await
        .unwrap();
    assert_eq!(session.name, "Tabs");
    assert_eq!(client.store().current().unwrap().id, SessionId::from(7));
}

#[tokio::test]
async fn get_session_not_found_is_status_404() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sessions/404"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"detail": "Session not found"})),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server).await;
    let err = client
        .sessions()
        .get_session(&SessionId::from(404))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    match err {
        ApiError::Status { detail, .. } => {
            assert_eq!(detail.unwrap()["detail"], "Session not found");
        }
        other => panic!("expected Status, got: {other:?}"),
    }
}

#[tokio::test]
async fn create_then_get_round_trips_name_and_description() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sessions/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_json(3, "A", "B")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sessions/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_json(3, "A", "B")))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server).await;
    let created = client.sessions().create_session("A", "B").await.unwrap();
    let fetched = client.sessions().get_session(&created.id).await.unwrap();

    assert_eq!(fetched.name, created.name);
    assert_eq!(fetched.description, created.description);
}

#[tokio::test]
async fn fetch_replaces_and_clears_absent_fields() {
    let mock_server = MockServer::start().await;

    let mut judged = session_json(5, "Cats", "Dogs?");
    judged["arguments"] = serde_json::json!([
        {"id": 1, "content": "cats"},
        {"id": 2, "content": "dogs"}
    ]);
    judged["judgement"] = serde_json::json!({"content": "cats win", "winner": "user_a"});

    Mock::given(method("GET"))
        .and(path("/sessions/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(judged))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sessions/5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": 5, "name": "Cats"})),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server).await;
    let id = SessionId::from(5);
    client.sessions().get_session(&id).await.unwrap();
    assert_eq!(client.store().phase(), Some(SessionPhase::Judged));

    client.sessions().get_session(&id).await.unwrap();
    let cached = client.store().current().unwrap();
    assert!(cached.description.is_none());
    assert!(cached.arguments.is_empty());
    assert!(cached.judgement.is_none());
    assert_eq!(client.store().phase(), Some(SessionPhase::Created));
}

// ── POST /sessions/{id}/invite/ ──────────────────────────────────────

#[tokio::test]
async fn invite_does_not_touch_cache() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sessions/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_json(1, "P", "D")))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sessions/1/invite/"))
        .and(body_partial_json(serde_json::json!({
            "email": "bob@example.com",
            "userId": USER
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"invited": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server).await;
    let id = SessionId::from(1);
    client.sessions().get_session(&id).await.unwrap();
    let before = client.store().current().unwrap();
    let mut rx = client.store().subscribe();

    let result = client
        .sessions()
        .invite_participant(&id, "bob@example.com")
        .await
        .unwrap();

    assert_eq!(result["invited"], true);
    assert_eq!(client.store().current().unwrap(), before);
    assert!(!rx.has_changed().unwrap());
}

#[tokio::test]
async fn invite_failure_surfaces_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sessions/1/invite/"))
        .respond_with(ResponseTemplate::new(422).set_body_string("bad email"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server).await;
    let err = client
        .sessions()
        .invite_participant(&SessionId::from(1), "nope")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(422));
}

// ── POST /sessions/{id}/update_username ──────────────────────────────

#[tokio::test]
async fn update_display_name_persists_name_and_replaces_cache() {
    let mock_server = MockServer::start().await;

    let mut renamed = session_json(2, "P", "D");
    renamed["participants"] = serde_json::json!([{"id": USER, "name": "Alice"}]);

    Mock::given(method("POST"))
        .and(path("/sessions/2/update_username"))
        .and(body_partial_json(serde_json::json!({
            "user": USER,
            "username": "Alice",
            "userId": USER
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(renamed))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (provider, store) = identity();
    let config = ClientConfig::local_mock(&mock_server.uri()).unwrap();
    let client = AdjudicatorClient::new(config, provider).unwrap();
    let me = ParticipantId::new(USER).unwrap();

    let session = client
        .sessions()
        .update_display_name(&SessionId::from(2), &me, "Alice")
        .await
        .unwrap();

    assert_eq!(client.identity().display_name(), "Alice");
    assert_eq!(store.load(DISPLAY_NAME_KEY).as_deref(), Some("Alice"));
    assert_eq!(session.participants[0].name.as_deref(), Some("Alice"));
    assert_eq!(client.store().phase(), Some(SessionPhase::Open));
}

#[tokio::test]
async fn update_display_name_failure_keeps_old_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sessions/2/update_username"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server).await;
    let me = client.identity().participant_id();
    let err = client
        .sessions()
        .update_display_name(&SessionId::from(2), &me, "Mallory")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert_eq!(client.identity().display_name(), "Anonymous");
    assert!(client.store().current().is_none());
}
