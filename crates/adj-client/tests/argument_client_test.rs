//! Contract tests for argument submission (`POST /sessions/{id}/arguments/`).
//!
//! The endpoint takes a multipart form (`content`, `userId`, `username`,
//! optional `image`) and answers with the created argument.

use std::sync::Arc;

use adj_client::identity::{DISPLAY_NAME_KEY, PARTICIPANT_ID_KEY};
use adj_client::{
    AdjudicatorClient, ApiError, ClientConfig, IdentityProvider, IdentityStore, ImageAttachment,
    MemoryIdentityStore,
};
use adj_core::SessionId;
use wiremock::matchers::{body_string_contains, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER: &str = "user_bob000002";

async fn test_client(mock_server: &MockServer) -> AdjudicatorClient {
    let store = Arc::new(MemoryIdentityStore::new());
    store.store(PARTICIPANT_ID_KEY, USER);
    store.store(DISPLAY_NAME_KEY, "Bob");
    let config = ClientConfig::local_mock(&mock_server.uri()).unwrap();
    AdjudicatorClient::new(config, IdentityProvider::new(store)).unwrap()
}

async fn mount_session(mock_server: &MockServer, id: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/sessions/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": id,
            "name": format!("session-{id}"),
            "description": null
        })))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn submit_argument_sends_multipart_form() {
    let mock_server = MockServer::start().await;
    mount_session(&mock_server, 1).await;

    Mock::given(method("POST"))
        .and(path("/sessions/1/arguments/"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(body_string_contains("name=\"content\""))
        .and(body_string_contains("Pineapple belongs on pizza"))
        .and(body_string_contains("name=\"userId\""))
        .and(body_string_contains(USER))
        .and(body_string_contains("name=\"username\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 11,
            "session_id": 1,
            "content": "Pineapple belongs on pizza",
            "image_url": null,
            "user_id": USER,
            "username": "Bob"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server).await;
    let id = SessionId::from(1);
    client.sessions().get_session(&id).await.unwrap();

    let argument = client
        .sessions()
        .submit_argument(&id, "Pineapple belongs on pizza", None)
        .await
        .unwrap();

    assert_eq!(argument.content, "Pineapple belongs on pizza");
    let cached = client.store().current().unwrap();
    assert_eq!(cached.arguments, vec![argument]);
    assert_eq!(cached.participants.len(), 1);
    assert_eq!(cached.participants[0].name.as_deref(), Some("Bob"));
}

#[tokio::test]
async fn submit_argument_uploads_image_part() {
    let mock_server = MockServer::start().await;
    mount_session(&mock_server, 1).await;

    Mock::given(method("POST"))
        .and(path("/sessions/1/arguments/"))
        .and(body_string_contains("name=\"image\"; filename=\"proof.png\""))
        .and(body_string_contains("Content-Type: image/png"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 12,
            "content": "see attached",
            "image_url": "/uploads/proof.png"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server).await;
    let id = SessionId::from(1);
    client.sessions().get_session(&id).await.unwrap();

    let image = ImageAttachment::new("proof.png", "image/png", b"PNGDATA".to_vec());
    let argument = client
        .sessions()
        .submit_argument(&id, "see attached", Some(image))
        .await
        .unwrap();

    assert_eq!(argument.image_url.as_deref(), Some("/uploads/proof.png"));
    assert_eq!(client.store().current().unwrap().arguments.len(), 1);
}

#[tokio::test]
async fn submit_argument_to_missing_session_is_404_and_keeps_cache() {
    let mock_server = MockServer::start().await;
    mount_session(&mock_server, 1).await;

    Mock::given(method("POST"))
        .and(path("/sessions/999/arguments/"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"detail": "Session not found"})),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server).await;
    client.sessions().get_session(&SessionId::from(1)).await.unwrap();
    let before = client.store().current().unwrap();

    let err = client
        .sessions()
        .submit_argument(&SessionId::from(999), "hello?", None)
        .await
        .unwrap_err();

    match &err {
        ApiError::Status {
            status, detail, ..
        } => {
            assert_eq!(*status, 404);
            assert_eq!(detail.as_ref().unwrap()["detail"], "Session not found");
        }
        other => panic!("expected Status, got: {other:?}"),
    }
    assert!(format!("{err}").contains("Session not found"));
    assert_eq!(client.store().current().unwrap(), before);
}

#[tokio::test]
async fn submit_argument_server_error_includes_body() {
    let mock_server = MockServer::start().await;
    mount_session(&mock_server, 1).await;

    Mock::given(method("POST"))
        .and(path("/sessions/1/arguments/"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({"detail": "judge unavailable"})),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server).await;
    let id = SessionId::from(1);
    client.sessions().get_session(&id).await.unwrap();

    let err = client
        .sessions()
        .submit_argument(&id, "anything", None)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(format!("{err}").contains("judge unavailable"));
    assert!(client.store().current().unwrap().arguments.is_empty());
}

#[tokio::test]
async fn response_for_previous_session_is_dropped() {
    let mock_server = MockServer::start().await;
    mount_session(&mock_server, 2).await;

    Mock::given(method("POST"))
        .and(path("/sessions/1/arguments/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 1,
            "content": "late"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server).await;
    client.sessions().get_session(&SessionId::from(2)).await.unwrap();

    let argument = client
        .sessions()
        .submit_argument(&SessionId::from(1), "late", None)
        .await
        .unwrap();

    assert_eq!(argument.content, "late");
    let cached = client.store().current().unwrap();
    assert_eq!(cached.id, SessionId::from(2));
    assert!(cached.arguments.is_empty());
}

#[tokio::test]
async fn transport_failure_has_no_status() {
    let config = ClientConfig::local_mock("http://127.0.0.1:1").unwrap();
    let client = AdjudicatorClient::new(config, IdentityProvider::in_memory()).unwrap();

    let err = client
        .sessions()
        .submit_argument(&SessionId::from(1), "unreachable", None)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Transport { .. }));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn session_id_stays_a_single_path_segment() {
    let mock_server = MockServer::start().await;
    mount_session(&mock_server, 2).await;

    Mock::given(method("POST"))
        .and(path("/sessions/1%2F..%2F2/arguments/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": "escaped"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sessions/7%3Fx=1/arguments/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": "escaped"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server).await;
    client.sessions().get_session(&SessionId::from(2)).await.unwrap();

    for raw in ["1/../2", "7?x=1"] {
        let id = SessionId::new(raw).unwrap();
        client
            .sessions()
            .submit_argument(&id, "escaped", None)
            .await
            .unwrap();
    }

    let posted: Vec<String> = mock_server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.method.as_str() == "POST")
        .map(|r| r.url.path().to_string())
        .collect();
    assert_eq!(
        posted,
        vec!["/sessions/1%2F..%2F2/arguments/", "/sessions/7%3Fx=1/arguments/"]
    );
    // The responses belong to other sessions, so cached session 2 is untouched.
    assert!(client.store().current().unwrap().arguments.is_empty());
}
