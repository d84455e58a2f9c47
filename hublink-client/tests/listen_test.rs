//! Event subscription integration tests
//!
//! Tests for the listen namespace: immediate registration, independent
//! subscriptions, decoding and deregistration on drop.

mod common;

use common::MockConnectionBuilder;
use hublink_client::HubFactory;
use hublink_core::{Error, HubConfiguration};
use serde_json::json;
use std::sync::Arc;

fn factory_with(builder: Arc<MockConnectionBuilder>) -> HubFactory {
    let config = HubConfiguration::new().with_base_url("https://example.com");
    HubFactory::new(config, builder)
}

#[tokio::test]
async fn test_listen_registers_immediately_without_connect() {
    let builder = MockConnectionBuilder::new();
    let factory = factory_with(builder.clone());
    let hub = factory.create_hub("testHub").unwrap();

    let _events = hub.listen.stream::<String>("testEvent");

    let connection = builder.last_connection();
    assert_eq!(connection.start_count(), 0);
    assert_eq!(connection.handler_count("TestEvent"), 1);
}

#[tokio::test]
async fn test_event_delivery_single_argument() {
    let builder = MockConnectionBuilder::new();
    let factory = factory_with(builder.clone());
    let hub = factory.create_hub("testHub").unwrap();

    let mut events = hub.listen.stream::<String>("testEvent");
    builder
        .last_connection()
        .fire_event("TestEvent", vec![json!("hello")]);

    assert_eq!(events.recv().await.unwrap().unwrap(), "hello");
}

#[tokio::test]
async fn test_event_delivery_multiple_arguments() {
    let builder = MockConnectionBuilder::new();
    let factory = factory_with(builder.clone());
    let hub = factory.create_hub("testHub").unwrap();

    let mut events = hub.listen.stream::<(i64, String)>("testEvent");
    builder
        .last_connection()
        .fire_event("TestEvent", vec![json!(42), json!("str")]);

    assert_eq!(
        events.recv().await.unwrap().unwrap(),
        (42, "str".to_string())
    );
}

#[tokio::test]
async fn test_two_subscriptions_are_independent() {
    let builder = MockConnectionBuilder::new();
    let factory = factory_with(builder.clone());
    let hub = factory.create_hub("testHub").unwrap();
    let connection = builder.last_connection();

    let first = hub.listen.stream::<String>("testEvent");
    let mut second = hub.listen.stream::<String>("testEvent");
    assert_eq!(connection.handler_count("TestEvent"), 2);

    // Dropping one subscription leaves the other registered and receiving.
    drop(first);
    assert_eq!(connection.handler_count("TestEvent"), 1);

    connection.fire_event("TestEvent", vec![json!("still here")]);
    assert_eq!(second.recv().await.unwrap().unwrap(), "still here");
}

#[tokio::test]
async fn test_all_handlers_removed_after_drop() {
    let builder = MockConnectionBuilder::new();
    let factory = factory_with(builder.clone());
    let hub = factory.create_hub("testHub").unwrap();
    let connection = builder.last_connection();

    let first = hub.listen.stream::<String>("testEvent");
    let second = hub.listen.raw("testEvent");

    drop(first);
    drop(second);
    assert_eq!(connection.handler_count("TestEvent"), 0);
}

#[tokio::test]
async fn test_resubscribing_registers_again() {
    let builder = MockConnectionBuilder::new();
    let factory = factory_with(builder.clone());
    let hub = factory.create_hub("testHub").unwrap();
    let connection = builder.last_connection();

    drop(hub.listen.stream::<String>("testEvent"));
    assert_eq!(connection.handler_count("TestEvent"), 0);

    let _again = hub.listen.stream::<String>("testEvent");
    assert_eq!(connection.handler_count("TestEvent"), 1);
}

#[tokio::test]
async fn test_decode_failure_yields_error_item() {
    let builder = MockConnectionBuilder::new();
    let factory = factory_with(builder.clone());
    let hub = factory.create_hub("testHub").unwrap();
    let connection = builder.last_connection();

    let mut numbers = hub.listen.stream::<i64>("testEvent");
    connection.fire_event("TestEvent", vec![json!("not a number")]);
    connection.fire_event("TestEvent", vec![json!(7)]);

    assert!(matches!(
        numbers.recv().await.unwrap(),
        Err(Error::Serialization(_))
    ));
    // The stream keeps producing after a bad event.
    assert_eq!(numbers.recv().await.unwrap().unwrap(), 7);
}

#[tokio::test]
async fn test_raw_stream_exposes_argument_list() {
    let builder = MockConnectionBuilder::new();
    let factory = factory_with(builder.clone());
    let hub = factory.create_hub("testHub").unwrap();

    let mut events = hub.listen.raw("testEvent");
    assert_eq!(events.method(), "TestEvent");

    builder
        .last_connection()
        .fire_event("TestEvent", vec![json!(1), json!(2)]);
    assert_eq!(events.recv().await.unwrap(), vec![json!(1), json!(2)]);
}
