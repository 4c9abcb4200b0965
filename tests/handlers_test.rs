//! HTTP surface tests: the router is driven in-process with mocked
//! gateway and store collaborators behind the relay service.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mockall::mock;
use tower::ServiceExt;

use sms_relay_rust::error::SmsRelayError;
use sms_relay_rust::gateway::SmsGateway;
use sms_relay_rust::handlers::{create_router, AppState};
use sms_relay_rust::models::{MessageRecord, NewMessageRecord, SentSms};
use sms_relay_rust::service::RelayService;
use sms_relay_rust::store::MessageStore;

type Result<T> = std::result::Result<T, SmsRelayError>;

mock! {
    Gateway {}

    #[async_trait]
    impl SmsGateway for Gateway {
        async fn send_sms(&self, to: &str, body: &str) -> Result<SentSms>;
    }
}

mock! {
    Store {}

    #[async_trait]
    impl MessageStore for Store {
        async fn insert_message(&self, record: NewMessageRecord) -> Result<Vec<MessageRecord>>;
        async fn list_messages(&self) -> Result<Vec<MessageRecord>>;
    }
}

fn app(gateway: MockGateway, store: MockStore) -> Router {
    let service = Arc::new(RelayService::new(Arc::new(gateway), Arc::new(store)));
    create_router(AppState { service })
}

fn stored_row(record: &NewMessageRecord) -> MessageRecord {
    MessageRecord {
        sender_name: record.sender_name.clone(),
        phone_number: record.phone_number.clone(),
        message_body: record.message_body.clone(),
        date: record.date.clone(),
    }
}

fn json_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/send-sms")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/receive-reply")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body should be UTF-8")
}

#[tokio::test]
async fn test_send_sms_missing_fields_returns_400() {
    let mut gateway = MockGateway::new();
    gateway.expect_send_sms().never();
    let mut store = MockStore::new();
    store.expect_insert_message().never();

    let response = app(gateway, store)
        .oneshot(json_request(r#"{"phone_number": "+15551234567"}"#))
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value =
        serde_json::from_str(&body_string(response).await).expect("body should be JSON");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Sender name and message are required!");
}

#[tokio::test]
async fn test_send_sms_empty_message_returns_400() {
    let mut gateway = MockGateway::new();
    gateway.expect_send_sms().never();
    let mut store = MockStore::new();
    store.expect_insert_message().never();

    let response = app(gateway, store)
        .oneshot(json_request(
            r#"{"phone_number": "+15551234567", "sender_name": "Jess", "message": ""}"#,
        ))
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_send_sms_happy_path() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_send_sms()
        .times(1)
        .returning(|_, _| Ok(SentSms { sid: "SM123".to_string() }));

    let mut store = MockStore::new();
    store
        .expect_insert_message()
        .withf(|record| {
            record.message_body.contains("FROM: Jess")
                && record.message_body.contains("MESSAGE: hello there")
        })
        .times(1)
        .returning(|record| Ok(vec![stored_row(&record)]));

    let response = app(gateway, store)
        .oneshot(json_request(
            r#"{"phone_number": "+15551234567", "sender_name": "Jess", "message": "hello there"}"#,
        ))
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value =
        serde_json::from_str(&body_string(response).await).expect("body should be JSON");
    assert_eq!(body["success"], true);
    assert_eq!(body["message_sid"], "SM123");
    assert_eq!(body["conversation"], "SM123");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_send_sms_gateway_failure_returns_400() {
    let mut gateway = MockGateway::new();
    gateway.expect_send_sms().times(1).returning(|_, _| {
        Err(SmsRelayError::Gateway(
            "The 'To' number is not a valid phone number.".to_string(),
        ))
    });

    let mut store = MockStore::new();
    store.expect_insert_message().never();

    let response = app(gateway, store)
        .oneshot(json_request(
            r#"{"phone_number": "bogus", "sender_name": "Jess", "message": "hello"}"#,
        ))
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value =
        serde_json::from_str(&body_string(response).await).expect("body should be JSON");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "The 'To' number is not a valid phone number.");
}

#[tokio::test]
async fn test_send_sms_store_failure_returns_500() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_send_sms()
        .times(1)
        .returning(|_, _| Ok(SentSms { sid: "SM123".to_string() }));

    let mut store = MockStore::new();
    store
        .expect_insert_message()
        .times(1)
        .returning(|_| Ok(Vec::new()));

    let response = app(gateway, store)
        .oneshot(json_request(
            r#"{"phone_number": "+15551234567", "sender_name": "Jess", "message": "hello"}"#,
        ))
        .await
        .expect("router should respond");

    // The SMS went out; only the record is missing
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value =
        serde_json::from_str(&body_string(response).await).expect("body should be JSON");
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn test_receive_reply_records_and_acks() {
    let gateway = MockGateway::new();

    let mut store = MockStore::new();
    store
        .expect_insert_message()
        .withf(|record| {
            record.sender_name == "+15551234567"
                && record.phone_number == "+15551234567"
                && record.message_body == "hello"
        })
        .times(1)
        .returning(|record| Ok(vec![stored_row(&record)]));

    let response = app(gateway, store)
        .oneshot(form_request("From=%2B15551234567&Body=hello"))
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        Some("application/xml")
    );

    let body = body_string(response).await;
    assert!(body.contains("<Response></Response>"));
    assert!(!body.contains("<Message>"));
}

#[tokio::test]
async fn test_receive_reply_insert_failure_still_returns_200() {
    let gateway = MockGateway::new();

    let mut store = MockStore::new();
    store
        .expect_insert_message()
        .times(1)
        .returning(|_| Err(SmsRelayError::StoreWrite("insert failed".to_string())));

    let response = app(gateway, store)
        .oneshot(form_request("From=%2B15551234567&Body=hello"))
        .await
        .expect("router should respond");

    // The provider never sees an HTTP error, only the failure markup
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("<Message>"));
}

#[tokio::test]
async fn test_receive_reply_with_no_fields() {
    let gateway = MockGateway::new();

    let mut store = MockStore::new();
    store
        .expect_insert_message()
        .withf(|record| record.sender_name.is_empty() && record.message_body.is_empty())
        .times(1)
        .returning(|record| Ok(vec![stored_row(&record)]));

    let response = app(gateway, store)
        .oneshot(form_request(""))
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_conversations_renders_records() {
    let gateway = MockGateway::new();

    let mut store = MockStore::new();
    store.expect_list_messages().times(1).returning(|| {
        Ok(vec![MessageRecord {
            sender_name: "Jess".to_string(),
            phone_number: "+15551234567".to_string(),
            message_body: "FROM: Jess \nDATE: 2025-01-20 12:21:19 \nMESSAGE: hi".to_string(),
            date: "2025-01-20 12:21:19".to_string(),
        }])
    });

    let response = app(gateway, store)
        .oneshot(
            Request::builder()
                .uri("/conversations")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("<td>Jess</td>"));
    assert!(body.contains("MESSAGE: hi"));
}

#[tokio::test]
async fn test_conversations_read_failure_renders_empty_page() {
    let gateway = MockGateway::new();

    let mut store = MockStore::new();
    store
        .expect_list_messages()
        .times(1)
        .returning(|| Err(SmsRelayError::StoreRead("select failed".to_string())));

    let response = app(gateway, store)
        .oneshot(
            Request::builder()
                .uri("/conversations")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("router should respond");

    // Degrades to the empty state, never an error status
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("No messages yet."));
}

#[tokio::test]
async fn test_home_serves_landing_page() {
    let gateway = MockGateway::new();
    let store = MockStore::new();

    let response = app(gateway, store)
        .oneshot(
            Request::builder()
                .uri("/")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("send-form"));
    assert!(body.contains("/conversations"));
}
