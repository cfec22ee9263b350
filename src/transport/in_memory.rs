//! In-process control channel. The peer side plays the server.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::mpsc;

use crate::protocol::ServerMessage;
use crate::transport::{Connector, Transport};

#[derive(Debug)]
enum Frame {
    Text(String),
    Close,
    Error(String),
}

pub struct InMemoryTransport {
    frames: mpsc::UnboundedReceiver<Frame>,
    closed: Arc<AtomicBool>,
}

/// Server end of an [`InMemoryTransport`].
#[derive(Clone)]
pub struct InMemoryPeer {
    frames: mpsc::UnboundedSender<Frame>,
    closed: Arc<AtomicBool>,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, InMemoryPeer) {
        let (tx, rx) = mpsc::unbounded_channel();
        let closed = Arc::new(AtomicBool::new(false));
        (
            Self {
                frames: rx,
                closed: closed.clone(),
            },
            InMemoryPeer { frames: tx, closed },
        )
    }
}

impl InMemoryPeer {
    /// Push a raw text frame.
    pub fn send_text(&self, text: impl Into<String>) -> anyhow::Result<()> {
        self.push(Frame::Text(text.into()))
    }

    /// Push a message encoded as the server would.
    pub fn send(&self, msg: &ServerMessage) -> anyhow::Result<()> {
        self.send_text(serde_json::to_string(msg)?)
    }

    /// Close the channel from the server side.
    pub fn close(&self) -> anyhow::Result<()> {
        self.push(Frame::Close)
    }

    /// Fail the channel at transport level.
    pub fn fail(&self, reason: impl Into<String>) -> anyhow::Result<()> {
        self.push(Frame::Error(reason.into()))
    }

    /// Whether the client closed its end.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn push(&self, frame: Frame) -> anyhow::Result<()> {
        self.frames
            .send(frame)
            .map_err(|_| anyhow::anyhow!("Channel closed"))
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn recv(&mut self) -> anyhow::Result<Option<String>> {
        match self.frames.recv().await {
            Some(Frame::Text(text)) => Ok(Some(text)),
            Some(Frame::Error(reason)) => Err(anyhow::anyhow!(reason)),
            Some(Frame::Close) | None => Ok(None),
        }
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        self.frames.close();
        Ok(())
    }
}

/// Hands out in-memory channels prepared with [`expect_connection`].
/// Connecting with nothing prepared is refused.
///
/// [`expect_connection`]: InMemoryConnector::expect_connection
#[derive(Clone, Default)]
pub struct InMemoryConnector {
    pending: Arc<Mutex<VecDeque<InMemoryTransport>>>,
    attempts: Arc<AtomicUsize>,
}

impl InMemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare the channel returned by the next connection attempt.
    pub fn expect_connection(&self) -> InMemoryPeer {
        let (transport, peer) = InMemoryTransport::pair();
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(transport);
        peer
    }

    /// Number of connection attempts so far, refused ones included.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Connector for InMemoryConnector {
    async fn connect(&self) -> anyhow::Result<Box<dyn Transport>> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let next = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match next {
            Some(transport) => Ok(Box::new(transport)),
            None => Err(anyhow::anyhow!("Connection refused")),
        }
    }
}
