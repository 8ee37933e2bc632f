use crate::tests::sample_session;
use crate::{AuthChangeEvent, AuthEvent, AuthEventBus};

use tokio::time::{Duration, timeout};

#[tokio::test]
async fn given_subscriber_when_event_emitted_then_received() {
    let bus = AuthEventBus::new();
    let mut subscription = bus.subscribe();
    let session = sample_session(None);

    bus.emit(AuthEvent::new(AuthChangeEvent::SignedIn, Some(session.clone())));

    let event = timeout(Duration::from_millis(100), subscription.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event.kind, AuthChangeEvent::SignedIn);
    assert_eq!(event.user().map(|u| u.id), Some(session.user.id));
}

#[tokio::test]
async fn given_multiple_subscribers_when_event_emitted_then_all_notified() {
    let bus = AuthEventBus::new();
    let mut first = bus.subscribe();
    let mut second = bus.subscribe();

    bus.emit(AuthEvent::signed_out());

    assert_eq!(first.recv().await.unwrap().kind, AuthChangeEvent::SignedOut);
    assert_eq!(second.recv().await.unwrap().kind, AuthChangeEvent::SignedOut);
}

#[test]
fn given_unsubscribed_handle_when_counted_then_removed() {
    let bus = AuthEventBus::new();
    let subscription = bus.subscribe();
    assert_eq!(bus.subscriber_count(), 1);

    subscription.unsubscribe();

    assert_eq!(bus.subscriber_count(), 0);
}

#[test]
fn given_no_subscribers_when_event_emitted_then_no_panic() {
    let bus = AuthEventBus::new();

    bus.emit(AuthEvent::signed_out());

    assert_eq!(bus.subscriber_count(), 0);
}

#[tokio::test]
async fn given_bus_dropped_when_recv_then_none() {
    let bus = AuthEventBus::new();
    let mut subscription = bus.subscribe();

    drop(bus);

    assert!(subscription.recv().await.is_none());
}

#[tokio::test]
async fn given_lagging_subscriber_when_recv_then_resumes_with_retained_events() {
    let bus = AuthEventBus::with_capacity(2);
    let mut subscription = bus.subscribe();

    bus.emit(AuthEvent::new(AuthChangeEvent::SignedIn, Some(sample_session(None))));
    bus.emit(AuthEvent::new(AuthChangeEvent::TokenRefreshed, Some(sample_session(None))));
    bus.emit(AuthEvent::signed_out());

    let event = subscription.recv().await.unwrap();
    assert_eq!(event.kind, AuthChangeEvent::TokenRefreshed);
    assert_eq!(subscription.recv().await.unwrap().kind, AuthChangeEvent::SignedOut);
}
