/// Receiving end of an open control channel.
#[async_trait::async_trait]
pub trait Transport: Send {
    /// Next text frame. `Ok(None)` means the channel closed cleanly; an error
    /// is a transport failure. Dropping the returned future must not lose a
    /// frame.
    async fn recv(&mut self) -> anyhow::Result<Option<String>>;
    /// Close the channel from our side.
    async fn close(&mut self) -> anyhow::Result<()>;
}

/// Opens control channels.
#[async_trait::async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> anyhow::Result<Box<dyn Transport>>;
}

pub mod in_memory;
pub mod ws;
