//! Integration tests for webhook dispatch.
//!
//! The real dispatcher and LINE client run against a `wiremock` LINE API,
//! with entries served from memory.

use std::time::Duration;

use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use notice_board::db::RepositoryError;
use notice_board::line::LineClient;
use notice_board::models::Entry;
use notice_board::webhook::{
    CarouselFormatter, CommandTable, DispatchReport, EntrySource, VerificationError,
    WebhookDispatcher,
};
use notice_board_integration_tests::{
    CHANNEL_SECRET, entry, sign, signed_delivery, test_config, text_event,
};

const REPLY_PATH: &str = "/v2/bot/message/reply";

struct MemoryEntries(Vec<Entry>);

impl EntrySource for MemoryEntries {
    async fn list_by_deadline(&self) -> Result<Vec<Entry>, RepositoryError> {
        Ok(self.0.clone())
    }
}

fn dispatcher(
    server: &MockServer,
    entries: Vec<Entry>,
    base_url: Option<&str>,
) -> WebhookDispatcher<MemoryEntries, LineClient> {
    let config = test_config(&server.uri());
    WebhookDispatcher::new(
        SecretString::from(CHANNEL_SECRET),
        CommandTable::standard(),
        MemoryEntries(entries),
        LineClient::new(config.line()).expect("client"),
        CarouselFormatter::new(base_url.map(|u| Url::parse(u).expect("valid url"))),
    )
}

async fn received_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| serde_json::from_slice(&r.body).expect("json body"))
        .collect()
}

async fn mount_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(REPLY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(server)
        .await;
}

// =============================================================================
// Verification
// =============================================================================

#[tokio::test]
async fn test_unverified_delivery_sends_nothing() {
    let server = MockServer::start().await;
    mount_ok(&server).await;
    let dispatcher = dispatcher(&server, vec![], None);

    let (body, _) = signed_delivery(&[text_event("t1", "周知事項を教えて")]);
    let forged = notice_board::line::compute_signature(&body, &SecretString::from("not-it"));

    assert_eq!(dispatcher.dispatch(&body, &forged).await, Err(VerificationError));
    assert!(received_bodies(&server).await.is_empty());
}

#[tokio::test]
async fn test_malformed_payload_sends_nothing() {
    let server = MockServer::start().await;
    mount_ok(&server).await;
    let dispatcher = dispatcher(&server, vec![], None);

    let body = br#"{"events": "not a list"}"#;
    let report = dispatcher.dispatch(body, &sign(body)).await;

    assert_eq!(report, Ok(DispatchReport::default()));
    assert!(received_bodies(&server).await.is_empty());
}

// =============================================================================
// Replies on the Wire
// =============================================================================

#[tokio::test]
async fn test_list_command_sends_cards_in_deadline_order() {
    let server = MockServer::start().await;
    mount_ok(&server).await;
    let dispatcher = dispatcher(
        &server,
        vec![
            entry(1, "A", "2024-01-01", "first body"),
            entry(2, "B", "2024-02-01", "second body"),
        ],
        Some("https://board.example.com"),
    );

    let (body, signature) = signed_delivery(&[text_event("t1", "周知事項を教えて")]);
    let report = dispatcher.dispatch(&body, &signature).await.expect("verified");
    assert_eq!(report.handled, 1);
    assert_eq!(report.failed, 0);

    let bodies = received_bodies(&server).await;
    assert_eq!(bodies.len(), 1);

    let message = &bodies[0]["messages"][0];
    assert_eq!(bodies[0]["replyToken"], "t1");
    assert_eq!(message["type"], "flex");

    let bubbles = message["contents"]["contents"].as_array().expect("bubbles");
    assert_eq!(bubbles.len(), 2);
    assert_eq!(bubbles[0]["body"]["contents"][0]["text"], "A");
    assert_eq!(bubbles[0]["body"]["contents"][1]["text"], "2024年01月01日");
    assert_eq!(bubbles[1]["body"]["contents"][0]["text"], "B");
    assert_eq!(bubbles[1]["body"]["contents"][1]["text"], "2024年02月01日");
    assert_eq!(
        bubbles[1]["footer"]["contents"][0]["action"]["uri"],
        "https://board.example.com/#entry-2"
    );
}

#[tokio::test]
async fn test_list_command_with_no_entries_sends_placeholder() {
    let server = MockServer::start().await;
    mount_ok(&server).await;
    let dispatcher = dispatcher(&server, vec![], None);

    let (body, signature) = signed_delivery(&[text_event("t1", "周知事項を教えて")]);
    dispatcher.dispatch(&body, &signature).await.expect("verified");

    let bodies = received_bodies(&server).await;
    let bubbles = bodies[0]["messages"][0]["contents"]["contents"]
        .as_array()
        .expect("bubbles");
    assert_eq!(bubbles.len(), 1);
    assert_eq!(bubbles[0]["body"]["contents"][0]["text"], "周知事項はありません");
}

#[tokio::test]
async fn test_unknown_text_gets_one_not_supported_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(REPLY_PATH))
        .and(body_partial_json(json!({
            "replyToken": "t1",
            "messages": [{"type": "text", "text": "その命令には対応していません。"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    let dispatcher = dispatcher(&server, vec![], None);

    let (body, signature) = signed_delivery(&[text_event("t1", "天気を教えて")]);
    let report = dispatcher.dispatch(&body, &signature).await.expect("verified");

    assert_eq!(report.handled, 1);
}

// =============================================================================
// Failure Isolation
// =============================================================================

#[tokio::test]
async fn test_transport_failure_does_not_block_next_event() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(REPLY_PATH))
        .and(body_partial_json(json!({"replyToken": "slow"})))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(REPLY_PATH))
        .and(body_partial_json(json!({"replyToken": "fast"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    let dispatcher = dispatcher(&server, vec![], None);

    let (body, signature) = signed_delivery(&[
        text_event("slow", "ただいま工事中です"),
        text_event("fast", "ただいま工事中です"),
    ]);
    let report = dispatcher.dispatch(&body, &signature).await.expect("verified");

    assert_eq!(
        report,
        DispatchReport {
            handled: 2,
            ignored: 0,
            failed: 1,
        }
    );
}

#[tokio::test]
async fn test_rejected_token_does_not_block_next_event() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(REPLY_PATH))
        .and(body_partial_json(json!({"replyToken": "used"})))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid reply token"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(REPLY_PATH))
        .and(body_partial_json(json!({"replyToken": "fresh"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    let dispatcher = dispatcher(&server, vec![], None);

    let (body, signature) = signed_delivery(&[text_event("used", "a"), text_event("fresh", "b")]);
    let report = dispatcher.dispatch(&body, &signature).await.expect("verified");

    assert_eq!(report.handled, 2);
    assert_eq!(report.failed, 1);
}

#[tokio::test]
async fn test_standby_event_does_not_block_replies_in_same_delivery() {
    let server = MockServer::start().await;
    mount_ok(&server).await;
    let dispatcher = dispatcher(&server, vec![], None);

    let mut standby = text_event("unused", "周知事項を教えて");
    standby["mode"] = json!("standby");
    if let Some(event) = standby.as_object_mut() {
        event.remove("replyToken");
    }

    let (body, signature) =
        signed_delivery(&[standby, text_event("active", "ただいま工事中です")]);
    let report = dispatcher.dispatch(&body, &signature).await.expect("verified");

    assert_eq!(
        report,
        DispatchReport {
            handled: 1,
            ignored: 1,
            failed: 0,
        }
    );
    let bodies = received_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["replyToken"], "active");
}
