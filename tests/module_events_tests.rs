//! Event manager tests
//!
//! Tests listener registration, exactly-once delivery, detach behavior, and
//! event naming.

use std::sync::Arc;
use tokio::time::{timeout, Duration};

use transcoder_host::{
    EventManager, ModuleEvent, ModuleHandle, NativeModule, MODULE_LOADED_EVENT,
    MODULE_LOAD_FAILED_EVENT,
};

#[derive(Debug)]
struct SentinelModule;
impl NativeModule for SentinelModule {}

fn sentinel() -> ModuleHandle {
    Arc::new(SentinelModule)
}

#[tokio::test]
async fn test_every_listener_receives_the_event() {
    let events = EventManager::new(4);
    let (_a, mut rx_a) = events.subscribe().await;
    let (_b, mut rx_b) = events.subscribe().await;

    let handle = sentinel();
    events
        .publish(ModuleEvent::Loaded {
            handle: Arc::clone(&handle),
        })
        .await;

    for rx in [&mut rx_a, &mut rx_b] {
        let event = timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event.name(), MODULE_LOADED_EVENT);
        match event {
            ModuleEvent::Loaded { handle: delivered } => {
                assert!(Arc::ptr_eq(&delivered, &handle))
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_single_publish_delivers_exactly_once() {
    let events = EventManager::new(4);
    let (_id, mut rx) = events.subscribe().await;

    events
        .publish(ModuleEvent::Loaded { handle: sentinel() })
        .await;

    assert!(rx.recv().await.is_some());
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_late_subscriber_misses_earlier_events() {
    let events = EventManager::new(4);

    events
        .publish(ModuleEvent::Loaded { handle: sentinel() })
        .await;

    // Registration after dispatch observes nothing
    let (_id, mut rx) = events.subscribe().await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_unsubscribed_listener_is_skipped() {
    let events = EventManager::new(4);
    let (id_a, mut rx_a) = events.subscribe().await;
    let (_b, mut rx_b) = events.subscribe().await;

    events.unsubscribe(id_a).await;
    events
        .publish(ModuleEvent::LoadFailed {
            reason: "factory error".to_string(),
        })
        .await;

    assert!(rx_a.recv().await.is_none());
    let event = rx_b.recv().await.unwrap();
    assert_eq!(event.name(), MODULE_LOAD_FAILED_EVENT);
}

#[tokio::test]
async fn test_event_names() {
    assert_eq!(
        ModuleEvent::Loaded { handle: sentinel() }.name(),
        "basisuModuleLoaded"
    );
    assert_eq!(
        ModuleEvent::LoadFailed {
            reason: String::new()
        }
        .name(),
        "basisuModuleLoadFailed"
    );
}

#[tokio::test]
async fn test_dead_listeners_pruned_on_publish() {
    let events = EventManager::new(4);
    let (_a, rx_a) = events.subscribe().await;
    let (_b, _rx_b) = events.subscribe().await;
    assert_eq!(events.listener_count().await, 2);

    drop(rx_a);
    events
        .publish(ModuleEvent::LoadFailed {
            reason: "factory error".to_string(),
        })
        .await;

    assert_eq!(events.listener_count().await, 1);
}
