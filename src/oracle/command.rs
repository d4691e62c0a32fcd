use super::*;
use serde::Serialize;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// Runs an external program per query.
///
/// The program gets `{"prompt", "history"}` as JSON on stdin and answers
/// on stdout, in any form [`parse_bot_action`] understands.
#[derive(Debug, Clone)]
pub struct CommandOracle {
    bin: String,
    args: Vec<String>,
    timeout: Duration,
}

#[derive(Serialize)]
struct Request<'a> {
    prompt: &'a str,
    history: &'a [AIMessage],
}

impl CommandOracle {
    pub fn new(bin: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            bin: bin.into(),
            args,
            timeout,
        }
    }
    /// Splits a shell-ish command line on whitespace.
    pub fn parse(line: &str, timeout: Duration) -> Option<Self> {
        let mut words = line.split_whitespace().map(String::from);
        let bin = words.next()?;
        Some(Self::new(bin, words.collect(), timeout))
    }
}

#[async_trait::async_trait]
impl Oracle for CommandOracle {
    async fn query(
        &mut self,
        prompt: &str,
        history: &[AIMessage],
    ) -> std::result::Result<OracleReply, OracleError> {
        let unavailable = |e: std::io::Error| OracleError::Unavailable(format!("{}: {}", self.bin, e));
        let request = serde_json::to_string(&Request { prompt, history })
            .map_err(|e| OracleError::Unavailable(e.to_string()))?;
        let mut child = tokio::process::Command::new(&self.bin)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(unavailable)?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(request.as_bytes()).await.map_err(unavailable)?;
        }
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| OracleError::Timeout(self.timeout.as_millis() as u64))?
            .map_err(unavailable)?;
        if !output.status.success() {
            return Err(OracleError::Unavailable(format!(
                "{} exited with {}: {}",
                self.bin,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(OracleReply::from(
            String::from_utf8_lossy(&output.stdout).trim().to_string(),
        ))
    }
}
