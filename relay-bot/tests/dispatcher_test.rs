//! Dispatcher tests: per-user ordering, one reply per message, fail-open on panics.

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use common::{read_history, test_context, FakeLlm, FakeTranslation, FakeVision, RecordingBot};
use relay_bot::{build_router, Dispatcher, Router, FAILURE_PREFIX};
use relay_core::{Handler, InboundMessage, MessageKind};

#[tokio::test]
async fn test_messages_from_one_user_are_handled_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let llm = Arc::new(FakeLlm::replying("ok").with_delay(Duration::from_millis(20)));
    let ctx = test_context(
        dir.path(),
        20,
        llm.clone(),
        Arc::new(FakeVision::replying("unused")),
        Arc::new(FakeTranslation::new("x", "y")),
    );
    let bot = Arc::new(RecordingBot::default());
    let dispatcher = Dispatcher::new(build_router(&ctx), bot.clone(), 4);

    for (i, text) in ["one", "two", "three"].iter().enumerate() {
        assert!(dispatcher.submit(InboundMessage::text(
            format!("a{}", i),
            "972500000001@c.us",
            *text
        )));
    }
    assert!(dispatcher.submit(InboundMessage::text("b0", "972500000002@c.us", "other")));
    assert_eq!(dispatcher.queue_count(), 2);

    dispatcher.shutdown().await;

    assert_eq!(
        read_history(dir.path(), "972500000001").unwrap(),
        vec![
            "User: one",
            "Bot: ok",
            "User: two",
            "Bot: ok",
            "User: three",
            "Bot: ok"
        ]
    );
    assert_eq!(
        read_history(dir.path(), "972500000002").unwrap(),
        vec!["User: other", "Bot: ok"]
    );

    let sent = bot.sent();
    assert_eq!(sent.len(), 4);
    let user_a: Vec<&str> = sent
        .iter()
        .filter(|(chat, _, _)| chat == "972500000001@c.us")
        .map(|(_, id, _)| id.as_str())
        .collect();
    assert_eq!(user_a, vec!["a0", "a1", "a2"]);
}

#[tokio::test]
async fn test_idle_user_queues_are_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = test_context(
        dir.path(),
        10,
        Arc::new(FakeLlm::replying("ok")),
        Arc::new(FakeVision::replying("unused")),
        Arc::new(FakeTranslation::new("x", "y")),
    );
    let bot = Arc::new(RecordingBot::default());
    let dispatcher = Dispatcher::new(build_router(&ctx), bot.clone(), 4)
        .with_idle_timeout(Duration::from_millis(50));

    for i in 0..20 {
        let chat = format!("97250000{:04}@c.us", i);
        assert!(dispatcher.submit(InboundMessage::text(format!("m{}", i), chat, "hi")));
    }
    assert_eq!(dispatcher.queue_count(), 20);

    tokio::time::sleep(Duration::from_millis(500)).await;

    assert_eq!(bot.sent().len(), 20);
    assert_eq!(dispatcher.queue_count(), 0);

    // A returning user gets a fresh queue and keeps their history.
    assert!(dispatcher.submit(InboundMessage::text("again", "972500000000@c.us", "back")));
    dispatcher.shutdown().await;

    assert_eq!(bot.sent().len(), 21);
    assert_eq!(
        read_history(dir.path(), "972500000000").unwrap(),
        vec!["User: hi", "Bot: ok", "User: back", "Bot: ok"]
    );
}

#[tokio::test]
async fn test_unsupported_message_is_not_queued() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = test_context(
        dir.path(),
        10,
        Arc::new(FakeLlm::replying("ok")),
        Arc::new(FakeVision::replying("unused")),
        Arc::new(FakeTranslation::new("x", "y")),
    );
    let bot = Arc::new(RecordingBot::default());
    let dispatcher = Dispatcher::new(build_router(&ctx), bot.clone(), 1);

    let mut msg = InboundMessage::text("m1", "972500000001@c.us", "");
    msg.kind = MessageKind::Unsupported("stickerMessage".to_string());

    assert!(!dispatcher.submit(msg));
    assert_eq!(dispatcher.queue_count(), 0);
    dispatcher.shutdown().await;
    assert!(bot.sent().is_empty());
}

struct PanickingHandler;

#[async_trait]
impl Handler for PanickingHandler {
    async fn handle(&self, _message: &InboundMessage) -> anyhow::Result<String> {
        panic!("boom");
    }
}

#[tokio::test]
async fn test_handler_panic_becomes_failure_reply() {
    let router = Router::new().route(MessageKind::Text, Arc::new(PanickingHandler));
    let bot = Arc::new(RecordingBot::default());
    let dispatcher = Dispatcher::new(router, bot.clone(), 1);

    let msg = InboundMessage::text("m1", "972500000001@c.us", "hello");
    dispatcher.process(&msg).await;

    let sent = bot.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "972500000001@c.us");
    assert_eq!(sent[0].1, "m1");
    assert_eq!(sent[0].2, format!("{} boom", FAILURE_PREFIX));
}
