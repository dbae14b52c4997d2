use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use peerchat_api::{ApiError, ChatApi, RestClient};

fn user_json(id: i64, username: &str) -> serde_json::Value {
    json!({"id": id, "username": username})
}

#[tokio::test]
async fn register_then_login_yields_same_identity() {
    let server = MockServer::start().await;
    let auth_body = json!({"token": "tok-alice", "user": user_json(1, "alice")});

    Mock::given(method("POST"))
        .and(path("/chat/register/"))
        .and(body_json(json!({"username": "alice", "password": "hunter2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body.clone()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/login/"))
        .and(body_json(json!({"username": "alice", "password": "hunter2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body))
        .mount(&server)
        .await;

    let client = RestClient::new(server.uri());
    let registered = client.register("alice", "hunter2").await.unwrap();
    let logged_in = client.login("alice", "hunter2").await.unwrap();

    assert_eq!(registered.user, logged_in.user);
    assert_eq!(logged_in.user.username, "alice");
}

#[tokio::test]
async fn login_failure_surfaces_service_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/login/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Invalid credentials"})))
        .mount(&server)
        .await;

    let client = RestClient::new(server.uri());
    let err = client.login("alice", "wrong").await.unwrap_err();
    match err {
        ApiError::Auth(msg) => assert_eq!(msg, "Invalid credentials"),
        other => panic!("expected Auth error, got {:?}", other),
    }
}

#[tokio::test]
async fn login_failure_without_error_field_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/login/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = RestClient::new(server.uri());
    let err = client.login("alice", "pw").await.unwrap_err();
    match err {
        ApiError::Auth(msg) => assert_eq!(msg, "Authentication failed"),
        other => panic!("expected Auth error, got {:?}", other),
    }
}

#[tokio::test]
async fn current_user_sends_token_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chat/current_user/"))
        .and(header("Authorization", "Token tok-alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(1, "alice")))
        .mount(&server)
        .await;

    let client = RestClient::new(server.uri());
    let user = client.current_user("tok-alice").await.unwrap();
    assert_eq!(user.id, 1);
    assert_eq!(user.username, "alice");
}

#[tokio::test]
async fn rejected_token_maps_to_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chat/current_user/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid token."})))
        .mount(&server)
        .await;

    let client = RestClient::new(server.uri());
    assert!(matches!(
        client.current_user("stale").await.unwrap_err(),
        ApiError::Unauthorized
    ));
}

#[tokio::test]
async fn users_preserves_service_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chat/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            user_json(3, "carol"),
            user_json(1, "alice"),
            user_json(2, "bob"),
        ])))
        .mount(&server)
        .await;

    let client = RestClient::new(server.uri());
    let users = client.users("tok").await.unwrap();
    let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["carol", "alice", "bob"]);
}

#[tokio::test]
async fn messages_hits_peer_scoped_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chat/messages/7/"))
        .and(header("Authorization", "Token tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "sender": "alice", "content": "hi", "timestamp": "2024-05-01T12:00:00Z"},
            {"id": 2, "sender": "bob", "content": "hey", "timestamp": "2024-05-01T12:01:00Z"},
        ])))
        .mount(&server)
        .await;

    let client = RestClient::new(server.uri());
    let messages = client.messages("tok", 7).await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].sender, "alice");
    assert_eq!(messages[1].id, 2);
}

#[tokio::test]
async fn send_message_returns_server_assigned_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/send_message/"))
        .and(header("Authorization", "Token tok"))
        .and(body_json(json!({"receiver_id": 7, "content": "hello bob"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "sender": "alice",
            "content": "hello bob",
            "timestamp": "2024-05-01T12:02:00Z",
        })))
        .mount(&server)
        .await;

    let client = RestClient::new(server.uri());
    let message = client.send_message("tok", 7, "hello bob").await.unwrap();
    assert_eq!(message.id, 42);
    assert_eq!(message.timestamp, "2024-05-01T12:02:00Z");
}

#[tokio::test]
async fn non_auth_failure_maps_to_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chat/users/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "database down"})))
        .mount(&server)
        .await;

    let client = RestClient::new(server.uri());
    match client.users("tok").await.unwrap_err() {
        ApiError::Service(msg) => assert_eq!(msg, "database down"),
        other => panic!("expected Service error, got {:?}", other),
    }
}
