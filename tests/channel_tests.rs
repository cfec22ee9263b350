use std::time::Duration;

use naval_control::{
    channel::{CONNECTED_STATUS, DISCONNECTED_STATUS},
    transport::in_memory::InMemoryConnector,
    ChannelEvent, ChannelManager, ChannelState, ClientError, Effect, Session, TimerAction,
};

const DELAY: Duration = Duration::from_secs(5);

#[tokio::test]
async fn connect_reports_and_delivers_in_order() -> anyhow::Result<()> {
    let connector = InMemoryConnector::new();
    let peer = connector.expect_connection();
    let mut manager = ChannelManager::new(connector, DELAY);
    let mut session = Session::new();

    manager.connect(&mut session).await?;
    assert_eq!(manager.state(), ChannelState::Open);
    assert_eq!(session.status.message, CONNECTED_STATUS);

    peer.send_text("first")?;
    peer.send_text("second")?;
    assert_eq!(manager.next_event().await, ChannelEvent::Message("first".into()));
    assert_eq!(manager.next_event().await, ChannelEvent::Message("second".into()));
    Ok(())
}

#[tokio::test]
async fn plain_close_does_not_retry() -> anyhow::Result<()> {
    let connector = InMemoryConnector::new();
    let peer = connector.expect_connection();
    let mut manager = ChannelManager::new(connector, DELAY);
    let mut session = Session::new();
    manager.connect(&mut session).await?;

    peer.close()?;
    assert_eq!(manager.next_event().await, ChannelEvent::Closed);
    manager.on_closed(&mut session);
    assert_eq!(manager.state(), ChannelState::Disconnected);
    assert!(!manager.is_open());
    assert_eq!(session.status.message, DISCONNECTED_STATUS);
    assert_eq!(manager.connector().attempts(), 1);
    Ok(())
}

#[tokio::test]
async fn transport_error_is_reported_without_retry() -> anyhow::Result<()> {
    let connector = InMemoryConnector::new();
    let peer = connector.expect_connection();
    let mut manager = ChannelManager::new(connector, DELAY);
    let mut session = Session::new();
    manager.connect(&mut session).await?;

    peer.fail("connection reset")?;
    let event = manager.next_event().await;
    assert_eq!(event, ChannelEvent::Error("connection reset".into()));
    manager.on_transport_error(&mut session, "connection reset");
    assert_eq!(manager.state(), ChannelState::Disconnected);
    assert!(session.status.is_error);
    assert_eq!(
        session.status.message,
        "Control channel error: connection reset"
    );
    Ok(())
}

#[tokio::test]
async fn not_ready_reports_and_schedules_one_reconnect() -> anyhow::Result<()> {
    let connector = InMemoryConnector::new();
    let peer = connector.expect_connection();
    let mut manager = ChannelManager::new(connector, DELAY);
    let mut session = Session::new();
    manager.connect(&mut session).await?;

    let effect = manager.on_not_ready(&mut session, "fleet not ready");
    assert_eq!(
        effect,
        Effect::Schedule {
            after: DELAY,
            action: TimerAction::Reconnect
        }
    );
    assert_eq!(manager.state(), ChannelState::AwaitingRetry);
    assert!(session.status.is_error);
    assert_eq!(
        session.status.message,
        ClientError::NotReady("fleet not ready".into()).to_string()
    );

    // The socket stays usable until the reconnect replaces it.
    assert!(!peer.is_closed());
    assert!(manager.is_open());
    peer.send_text("late state")?;
    assert_eq!(manager.next_event().await, ChannelEvent::Message("late state".into()));

    let _next = manager.connector().expect_connection();
    manager.connect(&mut session).await?;
    assert!(peer.is_closed());
    assert_eq!(manager.state(), ChannelState::Open);
    Ok(())
}

#[tokio::test]
async fn connect_replaces_the_open_channel() -> anyhow::Result<()> {
    let connector = InMemoryConnector::new();
    let old = connector.expect_connection();
    let new = connector.expect_connection();
    let mut manager = ChannelManager::new(connector, DELAY);
    let mut session = Session::new();

    manager.connect(&mut session).await?;
    manager.connect(&mut session).await?;
    assert!(old.is_closed());
    assert!(!new.is_closed());

    // Frames from the superseded channel are never delivered.
    let _ = old.send_text("stale");
    new.send_text("fresh")?;
    assert_eq!(manager.next_event().await, ChannelEvent::Message("fresh".into()));
    Ok(())
}

#[tokio::test]
async fn refused_connection_is_a_channel_error() {
    let connector = InMemoryConnector::new();
    let mut manager = ChannelManager::new(connector, DELAY);
    let mut session = Session::new();

    let result = manager.connect(&mut session).await;
    assert!(result.is_err());
    assert_eq!(manager.state(), ChannelState::Disconnected);
    assert!(session.status.is_error);
    assert!(session.status.message.starts_with("Control channel error"));
}

#[tokio::test(start_paused = true)]
async fn next_event_waits_forever_without_a_channel() {
    let mut manager = ChannelManager::new(InMemoryConnector::new(), DELAY);
    let waited = tokio::time::timeout(Duration::from_secs(60), manager.next_event()).await;
    assert!(waited.is_err());
}
