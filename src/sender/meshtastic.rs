use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::app::{RelayError, Result};
use crate::sender::Transport;

/// Upper bound on a single CLI invocation.
const SEND_TIMEOUT: Duration = Duration::from_secs(60);

/// Sends text through the `meshtastic` command-line tool.
///
/// The message is passed as one argument without a shell, so quotes and other
/// shell metacharacters in feed text are sent verbatim.
pub struct MeshtasticCli {
    program: String,
}

impl MeshtasticCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, host: &str, channel_index: u32, text: &str) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("--host")
            .arg(host)
            .arg("--ch-index")
            .arg(channel_index.to_string())
            .arg("--sendtext")
            .arg(text)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        command
    }
}

impl Default for MeshtasticCli {
    fn default() -> Self {
        Self::new("meshtastic")
    }
}

#[async_trait]
impl Transport for MeshtasticCli {
    async fn send(&self, host: &str, channel_index: u32, text: &str) -> Result<()> {
        let output = tokio::time::timeout(
            SEND_TIMEOUT,
            self.command(host, channel_index, text).output(),
        )
        .await
        .map_err(|_| {
            RelayError::Transport(format!(
                "{} did not finish within {}s",
                self.program,
                SEND_TIMEOUT.as_secs()
            ))
        })??;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(RelayError::Transport(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )))
        }
    }
}
