//! Lifecycle of the single control channel.

use std::time::Duration;

use crate::dispatcher::{Effect, TimerAction};
use crate::error::ClientError;
use crate::session::Session;
use crate::transport::{Connector, Transport};

pub const CONNECTED_STATUS: &str = "Connected to control server. Waiting for attacks...";
pub const DISCONNECTED_STATUS: &str = "Disconnected from control server";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Disconnected,
    Connecting,
    Open,
    /// The server said it is not ready. A reconnect is scheduled; the old
    /// socket keeps delivering until that reconnect replaces it.
    AwaitingRetry,
}

/// What the open channel produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    Message(String),
    Closed,
    Error(String),
}

/// Owns the channel handle and its state. Nothing else mutates either.
pub struct ChannelManager<C: Connector> {
    connector: C,
    transport: Option<Box<dyn Transport>>,
    state: ChannelState,
    reconnect_delay: Duration,
}

impl<C: Connector> ChannelManager<C> {
    pub fn new(connector: C, reconnect_delay: Duration) -> Self {
        Self {
            connector,
            transport: None,
            state: ChannelState::Disconnected,
            reconnect_delay,
        }
    }

    pub fn state(&self) -> ChannelState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.transport.is_some()
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Open a fresh channel, closing the current one first. Safe to call
    /// while a channel is already open.
    pub async fn connect(&mut self, session: &mut Session) -> Result<(), ClientError> {
        self.disconnect().await;
        self.state = ChannelState::Connecting;
        match self.connector.connect().await {
            Ok(transport) => {
                self.transport = Some(transport);
                self.state = ChannelState::Open;
                tracing::info!("control channel open");
                session.report(CONNECTED_STATUS);
                Ok(())
            }
            Err(e) => {
                self.state = ChannelState::Disconnected;
                tracing::warn!(error = %e, "control channel connect failed");
                let err = ClientError::Channel(e.to_string());
                session.report_error(err.to_string());
                Err(err)
            }
        }
    }

    /// Close the channel from our side without reporting anything.
    pub async fn disconnect(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            if let Err(e) = transport.close().await {
                tracing::debug!(error = %e, "closing control channel failed");
            }
        }
        self.state = ChannelState::Disconnected;
    }

    /// Wait for the next event of the open channel. Never resolves while no
    /// channel is open.
    pub async fn next_event(&mut self) -> ChannelEvent {
        let Some(transport) = self.transport.as_mut() else {
            return std::future::pending().await;
        };
        match transport.recv().await {
            Ok(Some(text)) => ChannelEvent::Message(text),
            Ok(None) => ChannelEvent::Closed,
            Err(e) => ChannelEvent::Error(e.to_string()),
        }
    }

    /// The peer or the network closed the channel. No retry.
    pub fn on_closed(&mut self, session: &mut Session) {
        self.transport = None;
        self.state = ChannelState::Disconnected;
        tracing::info!("control channel closed");
        session.report(DISCONNECTED_STATUS);
    }

    /// The transport failed. No retry.
    pub fn on_transport_error(&mut self, session: &mut Session, error: &str) {
        self.transport = None;
        self.state = ChannelState::Disconnected;
        tracing::warn!(%error, "control channel failed");
        session.report_error(ClientError::Channel(error.to_owned()).to_string());
    }

    /// The server said it is not ready. Report it and ask for exactly one
    /// reconnect after the retry delay. The socket stays open so a trailing
    /// state message still arrives; the reconnect closes it. Attempts are not
    /// bounded.
    pub fn on_not_ready(&mut self, session: &mut Session, message: &str) -> Effect {
        let err = ClientError::NotReady(message.to_owned());
        session.report_error(err.to_string());
        self.state = ChannelState::AwaitingRetry;
        tracing::warn!(
            error = %err,
            delay_ms = self.reconnect_delay.as_millis() as u64,
            "server not ready, scheduling reconnect"
        );
        Effect::Schedule {
            after: self.reconnect_delay,
            action: TimerAction::Reconnect,
        }
    }
}
