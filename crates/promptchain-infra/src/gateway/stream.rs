//! Gateway that writes documents to a byte stream.

use promptchain_core::delivery::AssistantGateway;
use promptchain_types::document::{CompositeDocument, DispatchReceipt};
use promptchain_types::error::GatewayError;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

/// Writes each document followed by a newline, then flushes.
pub struct StreamGateway<W> {
    name: String,
    writer: Mutex<W>,
}

/// The default gateway: documents go to the process stdout.
pub type StdoutGateway = StreamGateway<tokio::io::Stdout>;

impl StdoutGateway {
    pub fn stdout() -> Self {
        Self::new("stdout", tokio::io::stdout())
    }
}

impl<W> StreamGateway<W> {
    pub fn new(name: impl Into<String>, writer: W) -> Self {
        Self {
            name: name.into(),
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W> AssistantGateway for StreamGateway<W>
where
    W: AsyncWrite + Unpin + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn dispatch(&self, document: &CompositeDocument) -> Result<DispatchReceipt, GatewayError> {
        let mut writer = self.writer.lock().await;
        let io = |e: std::io::Error| GatewayError::Io(e.to_string());

        writer.write_all(document.text.as_bytes()).await.map_err(io)?;
        if !document.text.ends_with('\n') {
            writer.write_all(b"\n").await.map_err(io)?;
        }
        writer.flush().await.map_err(io)?;

        Ok(DispatchReceipt {
            gateway: self.name.clone(),
            reply: None,
        })
    }
}
