use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

/// Cooperative stop flag shared by the main loop and the sender.
///
/// Once triggered it stays triggered. Sleeps taken through [`Shutdown::sleep`]
/// end early when it fires.
#[derive(Clone, Debug)]
pub struct Shutdown {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Sleep for `duration`. Returns `false` if shutdown interrupted the
    /// sleep or had already been requested.
    pub async fn sleep(&self, duration: Duration) -> bool {
        let mut rx = self.tx.subscribe();
        if *rx.borrow_and_update() {
            return false;
        }

        tokio::select! {
            _ = tokio::time::sleep(duration) => !self.is_triggered(),
            _ = rx.wait_for(|stopped| *stopped) => false,
        }
    }

    /// Trigger on SIGINT or SIGTERM (Ctrl-C elsewhere).
    pub fn listen_for_signals(&self) {
        let shutdown = self.clone();

        #[cfg(unix)]
        tokio::spawn(async move {
            use tokio::signal::unix::{signal, SignalKind};

            let (mut sigterm, mut sigint) =
                match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                    (Ok(term), Ok(int)) => (term, int),
                    (Err(e), _) | (_, Err(e)) => {
                        tracing::error!("Failed to set up signal handlers: {}", e);
                        return;
                    }
                };

            tokio::select! {
                _ = sigterm.recv() => {},
                _ = sigint.recv() => {},
            }
            tracing::info!("Shutdown signal received");
            shutdown.trigger();
        });

        #[cfg(not(unix))]
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutdown signal received");
                shutdown.trigger();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sleep_completes_without_shutdown() {
        let shutdown = Shutdown::new();
        assert!(shutdown.sleep(Duration::from_millis(1)).await);
    }

    #[tokio::test]
    async fn test_sleep_after_trigger_returns_immediately() {
        let shutdown = Shutdown::new();
        shutdown.trigger();
        assert!(shutdown.is_triggered());
        assert!(!shutdown.sleep(Duration::from_secs(3600)).await);
    }

    #[tokio::test]
    async fn test_trigger_interrupts_sleep() {
        let shutdown = Shutdown::new();
        let sleeper = shutdown.clone();
        let handle = tokio::spawn(async move { sleeper.sleep(Duration::from_secs(3600)).await });

        tokio::task::yield_now().await;
        shutdown.trigger();

        assert!(!handle.await.unwrap());
    }
}
