pub mod meshtastic;

use std::sync::Arc;

use async_trait::async_trait;

use crate::app::Result;
use crate::config::SenderConfig;
use crate::domain::MessageChunk;
use crate::shutdown::Shutdown;

pub use meshtastic::MeshtasticCli;

/// Fire-and-forget mesh send capability.
#[async_trait]
pub trait Transport {
    async fn send(&self, host: &str, channel_index: u32, text: &str) -> Result<()>;
}

/// Sends single chunks with bounded retry.
pub struct MessageSender {
    transport: Arc<dyn Transport + Send + Sync>,
    config: SenderConfig,
    shutdown: Shutdown,
}

impl MessageSender {
    pub fn new(
        transport: Arc<dyn Transport + Send + Sync>,
        config: SenderConfig,
        shutdown: Shutdown,
    ) -> Self {
        Self {
            transport,
            config,
            shutdown,
        }
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.is_triggered()
    }

    /// Hold the channel for `send_delay` after a real send.
    pub async fn pace(&self) {
        if !self.config.demo_mode && !self.config.send_delay.is_zero() {
            self.shutdown.sleep(self.config.send_delay).await;
        }
    }

    /// Send one chunk, retrying up to `max_retry_attempts` times with
    /// `send_delay` between attempts. Returns whether it went out.
    ///
    /// In demo mode the chunk is only logged. A pending shutdown stops any
    /// further retries.
    pub async fn send_chunk(&self, chunk: &MessageChunk) -> bool {
        let text = chunk.render();

        if self.config.demo_mode {
            tracing::info!(
                "Demo mode enabled, message {} not sent: {}",
                chunk.number,
                text
            );
            return true;
        }

        let attempts = self.config.max_retry_attempts.max(1);
        for attempt in 1..=attempts {
            match self
                .transport
                .send(&self.config.host, self.config.channel_index, &text)
                .await
            {
                Ok(()) => {
                    tracing::info!("Message {} sent successfully: {}", chunk.number, text);
                    return true;
                }
                Err(e) => {
                    tracing::warn!(
                        "Error sending message {}, attempt {}/{}: {}",
                        chunk.number,
                        attempt,
                        attempts,
                        e
                    );
                }
            }

            if attempt < attempts && !self.shutdown.sleep(self.config.send_delay).await {
                tracing::warn!("Shutdown requested, abandoning message {}", chunk.number);
                return false;
            }
        }

        tracing::error!(
            "Giving up on message {} after {} attempts",
            chunk.number,
            attempts
        );
        false
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;
    use crate::app::RelayError;

    /// Transport stub that fails a fixed number of calls before succeeding.
    #[derive(Default)]
    pub struct StubTransport {
        fail_first: usize,
        calls: AtomicUsize,
        delivered: Mutex<Vec<String>>,
    }

    impl StubTransport {
        pub fn failing_first(fail_first: usize) -> Self {
            Self {
                fail_first,
                ..Self::default()
            }
        }

        pub fn always_failing() -> Self {
            Self::failing_first(usize::MAX)
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn delivered(&self) -> Vec<String> {
            self.delivered.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn send(&self, _host: &str, _channel_index: u32, text: &str) -> Result<()> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.fail_first {
                return Err(RelayError::Transport("radio busy".into()));
            }
            self.delivered.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    pub fn fast_config(max_retry_attempts: u32) -> SenderConfig {
        SenderConfig {
            send_delay: std::time::Duration::ZERO,
            max_retry_attempts,
            ..SenderConfig::default()
        }
    }
}
