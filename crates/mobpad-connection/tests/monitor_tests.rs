//! Connection monitor behaviour against the in-memory socket.

use std::sync::Arc;
use std::time::{Duration, Instant};

use mobpad_connection::config::DEFAULT_URL;
use mobpad_connection::prelude::*;
use mobpad_test_helpers::prelude::*;
use parking_lot::Mutex;
use tracing_test::traced_test;

fn monitor_with(config: ConnectionConfig) -> (ConnectionMonitor<MockSocketFactory>, MockSocketFactory) {
    let factory = MockSocketFactory::new();
    let monitor = ConnectionMonitor::new(config, factory.clone());
    (monitor, factory)
}

fn monitor() -> (ConnectionMonitor<MockSocketFactory>, MockSocketFactory) {
    monitor_with(ConnectionConfig::default())
}

fn latest(factory: &MockSocketFactory) -> MockSocketHandle {
    must_some(factory.latest(), "no socket opened")
}

#[test]
fn test_first_socket_opened_on_construction() {
    let (monitor, factory) = monitor();
    assert_eq!(factory.connections(), 1);
    assert_eq!(monitor.generation(), Generation(1));
    assert_eq!(monitor.state(), ReadyState::Connecting);
    assert_eq!(latest(&factory).url(), DEFAULT_URL);
}

#[test]
fn test_open_socket_is_healthy() {
    let (mut monitor, factory) = monitor();
    latest(&factory).open();
    assert_eq!(monitor.check_connection(), HealthAction::Healthy);
    assert_eq!(factory.connections(), 1);
}

#[test]
fn test_closed_socket_is_replaced() {
    let (mut monitor, factory) = monitor();
    let first = latest(&factory);
    first.open();
    monitor.process_pending();
    first.drop_connection();

    assert_eq!(monitor.check_connection(), HealthAction::Reconnected);
    assert_eq!(factory.connections(), 2);
    assert_eq!(monitor.generation(), Generation(2));
    assert_eq!(monitor.reconnect_count(), 1);
    assert_eq!(monitor.state(), ReadyState::Connecting);
}

#[test]
fn test_connecting_within_timeout_waits() {
    let (mut monitor, factory) = monitor();
    let start = Instant::now();
    assert!(matches!(monitor.check_connection_at(start), HealthAction::Waiting { .. }));
    let action = monitor.check_connection_at(start + Duration::from_secs(9));
    assert_eq!(
        action,
        HealthAction::Waiting {
            state: ReadyState::Connecting,
            elapsed: Duration::from_secs(9),
        }
    );
    assert_eq!(factory.connections(), 1);
}

#[test]
fn test_stuck_connecting_forces_reconnect() {
    let (mut monitor, factory) = monitor();
    let start = Instant::now();
    monitor.check_connection_at(start);
    let action = monitor.check_connection_at(start + Duration::from_secs(11));

    assert_eq!(action, HealthAction::ForcedReconnect { state: ReadyState::Connecting });
    let stuck = must_some(factory.socket(0), "first socket");
    assert_eq!(stuck.close_calls(), 1);
    assert_eq!(factory.connections(), 2);
}

#[test]
fn test_stuck_closing_forces_reconnect() {
    let config = ConnectionConfig::default().with_stuck_timeout(Duration::from_secs(1));
    let (mut monitor, factory) = monitor_with(config);
    latest(&factory).set_state(ReadyState::Closing);
    let start = Instant::now();
    monitor.check_connection_at(start);
    let action = monitor.check_connection_at(start + Duration::from_secs(2));
    assert_eq!(action, HealthAction::ForcedReconnect { state: ReadyState::Closing });
}

#[test]
fn test_replacement_socket_gets_fresh_timeout() {
    let (mut monitor, factory) = monitor();
    let start = Instant::now();
    monitor.check_connection_at(start);
    monitor.check_connection_at(start + Duration::from_secs(11));
    let action = monitor.check_connection_at(start + Duration::from_secs(12));
    assert!(matches!(action, HealthAction::Waiting { elapsed, .. } if elapsed == Duration::ZERO));
    assert_eq!(factory.connections(), 2);
}

#[test]
fn test_events_from_replaced_socket_are_stale() {
    let (mut monitor, factory) = monitor();
    let old = latest(&factory);
    old.drop_connection();
    monitor.process_pending();
    monitor.check_connection();

    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&received);
    monitor.subscribe(move |message: &InboundMessage| sink.lock().push(message.kind().to_owned()));

    old.receive(r#"{"type":"vibrate","data":{}}"#);
    old.emit(SocketEvent::Open);
    let stale = must_some(monitor.try_next_event(), "stale message");
    assert_eq!(monitor.handle_event(stale), EventOutcome::Stale);
    let stale = must_some(monitor.try_next_event(), "stale open");
    assert_eq!(monitor.handle_event(stale), EventOutcome::Stale);
    assert!(received.lock().is_empty());

    latest(&factory).open();
    latest(&factory).receive(r#"{"header":"vibrate","data":{}}"#);
    assert_eq!(monitor.process_pending(), 2);
    assert_eq!(*received.lock(), vec!["vibrate".to_string()]);
}

#[test]
fn test_send_while_connecting_queues_then_drains_on_open() {
    let (mut monitor, factory) = monitor();
    assert_eq!(monitor.send("a"), SendOutcome::Queued);
    assert_eq!(monitor.send("b"), SendOutcome::Queued);
    assert_eq!(monitor.queued(), 2);

    let socket = latest(&factory);
    socket.open();
    let event = must_some(monitor.try_next_event(), "open event");
    assert_eq!(monitor.handle_event(event), EventOutcome::Opened { drained: 2 });
    assert_eq!(socket.sent(), vec!["a", "b"]);
    assert_eq!(monitor.queued(), 0);

    assert_eq!(monitor.send("c"), SendOutcome::Sent);
    assert_eq!(socket.sent(), vec!["a", "b", "c"]);
}

#[test]
fn test_queue_survives_reconnect() {
    let (mut monitor, factory) = monitor();
    latest(&factory).drop_connection();
    monitor.send("held");
    monitor.check_connection();

    let fresh = latest(&factory);
    fresh.open();
    monitor.process_pending();
    assert_eq!(fresh.sent(), vec!["held"]);
}

#[test]
fn test_overflow_drop_oldest() {
    let config = ConnectionConfig::default().with_queue(2, OverflowPolicy::DropOldest);
    let (mut monitor, factory) = monitor_with(config);
    for payload in ["1", "2", "3"] {
        assert_eq!(monitor.send(payload), SendOutcome::Queued);
    }
    assert_eq!(monitor.dropped(), 1);

    latest(&factory).open();
    monitor.process_pending();
    assert_eq!(latest(&factory).sent(), vec!["2", "3"]);
}

#[test]
fn test_overflow_drop_newest() {
    let config = ConnectionConfig::default().with_queue(2, OverflowPolicy::DropNewest);
    let (mut monitor, factory) = monitor_with(config);
    monitor.send("1");
    monitor.send("2");
    assert_eq!(monitor.send("3"), SendOutcome::Dropped);

    latest(&factory).open();
    monitor.process_pending();
    assert_eq!(latest(&factory).sent(), vec!["1", "2"]);
}

#[test]
fn test_failed_send_is_queued_for_retry() {
    let (mut monitor, factory) = monitor();
    let socket = latest(&factory);
    socket.open();
    monitor.process_pending();

    socket.fail_sends(true);
    assert_eq!(monitor.send("retry-me"), SendOutcome::Queued);
    socket.fail_sends(false);
    assert_eq!(monitor.send("next"), SendOutcome::Sent);
    assert_eq!(socket.sent(), vec!["retry-me", "next"]);
}

#[test]
fn test_every_subscriber_sees_each_message() {
    let (mut monitor, factory) = monitor();
    let count = Arc::new(Mutex::new(0usize));
    for _ in 0..3 {
        let count = Arc::clone(&count);
        monitor.subscribe(move |_: &InboundMessage| *count.lock() += 1);
    }
    let socket = latest(&factory);
    socket.open();
    monitor.process_pending();

    socket.receive(r#"{"type":"ping"}"#);
    let event = must_some(monitor.try_next_event(), "message");
    assert_eq!(monitor.handle_event(event), EventOutcome::Dispatched { subscribers: 3 });
    assert_eq!(*count.lock(), 3);
}

#[test]
#[traced_test]
fn test_malformed_message_is_dropped_with_warning() {
    let (mut monitor, factory) = monitor();
    let socket = latest(&factory);
    socket.open();
    monitor.process_pending();

    socket.receive("not json at all");
    let event = must_some(monitor.try_next_event(), "message");
    assert_eq!(monitor.handle_event(event), EventOutcome::Rejected);
    assert!(logs_contain("Dropping malformed inbound message"));

    socket.receive(r#"{"data":{}}"#);
    let event = must_some(monitor.try_next_event(), "message");
    assert_eq!(monitor.handle_event(event), EventOutcome::Rejected);
}

#[test]
fn test_error_and_close_events() {
    let (mut monitor, factory) = monitor();
    let socket = latest(&factory);
    socket.emit(SocketEvent::Error("refused".into()));
    socket.drop_connection();
    let error = must_some(monitor.try_next_event(), "error");
    assert_eq!(monitor.handle_event(error), EventOutcome::Errored);
    let close = must_some(monitor.try_next_event(), "close");
    assert_eq!(monitor.handle_event(close), EventOutcome::Closed);
    assert_eq!(monitor.state(), ReadyState::Closed);
}

#[test]
fn test_close_closes_current_socket() {
    let (mut monitor, factory) = monitor();
    latest(&factory).open();
    monitor.close();
    assert_eq!(latest(&factory).close_calls(), 1);
    assert_eq!(monitor.state(), ReadyState::Closed);
}

#[tokio::test]
async fn test_next_event_awaits_delivery() {
    let (mut monitor, factory) = monitor();
    let socket = latest(&factory);
    tokio::spawn(async move {
        tokio::task::yield_now().await;
        socket.open();
    });
    let event = must_some(monitor.next_event().await, "open event");
    assert_eq!(event.generation, Generation(1));
    assert_eq!(event.event, SocketEvent::Open);
}
