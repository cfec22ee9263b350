use futures_util::StreamExt;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{connect_async, WebSocketStream};
use url::Url;

use crate::transport::{Connector, Transport};

/// Control channel over a WebSocket stream.
pub struct WsTransport<S> {
    stream: WebSocketStream<S>,
}

impl<S> WsTransport<S> {
    pub fn new(stream: WebSocketStream<S>) -> Self {
        Self { stream }
    }
}

fn is_closed(err: &tungstenite::Error) -> bool {
    matches!(
        err,
        tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed
    )
}

#[async_trait::async_trait]
impl<S> Transport for WsTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn recv(&mut self) -> anyhow::Result<Option<String>> {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => return Ok(Some(text)),
                Some(Ok(Message::Binary(data))) => match String::from_utf8(data) {
                    Ok(text) => return Ok(Some(text)),
                    Err(_) => {
                        tracing::warn!("ignoring non UTF-8 binary frame");
                        continue;
                    }
                },
                Some(Ok(Message::Close(frame))) => {
                    tracing::debug!(?frame, "close frame received");
                    return Ok(None);
                }
                Some(Ok(_)) => continue,
                Some(Err(e)) if is_closed(&e) => return Ok(None),
                Some(Err(e)) => return Err(anyhow::anyhow!("WebSocket error: {}", e)),
                None => return Ok(None),
            }
        }
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        match self.stream.close(None).await {
            Ok(()) => Ok(()),
            Err(e) if is_closed(&e) => Ok(()),
            Err(e) => Err(anyhow::anyhow!("Close error: {}", e)),
        }
    }
}

/// Opens [`WsTransport`]s to a fixed URL.
#[derive(Debug, Clone)]
pub struct WsConnector {
    url: Url,
}

impl WsConnector {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait::async_trait]
impl Connector for WsConnector {
    async fn connect(&self) -> anyhow::Result<Box<dyn Transport>> {
        let (stream, response) = connect_async(self.url.as_str()).await?;
        tracing::debug!(url = %self.url, status = %response.status(), "control channel handshake done");
        Ok(Box::new(WsTransport::new(stream)))
    }
}
