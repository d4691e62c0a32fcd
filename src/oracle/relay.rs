use super::*;
use colored::Colorize;

/// A human in the middle: the prompt is printed, the model's reply is
/// pasted back in. Blank input counts as a failed attempt.
#[derive(Debug, Default)]
pub struct RelayOracle;

#[async_trait::async_trait]
impl Oracle for RelayOracle {
    async fn query(
        &mut self,
        prompt: &str,
        history: &[AIMessage],
    ) -> std::result::Result<OracleReply, OracleError> {
        println!();
        println!("{}", format!("── prompt ({} earlier messages) ──", history.len()).dimmed());
        println!("{}", prompt);
        tokio::task::spawn_blocking(|| {
            dialoguer::Input::<String>::new()
                .with_prompt("Paste reply")
                .allow_empty(true)
                .report(false)
                .interact_text()
        })
        .await
        .map_err(|e| OracleError::Unavailable(e.to_string()))?
        .map_err(|e| OracleError::Unavailable(e.to_string()))
        .and_then(|text| match text.trim().is_empty() {
            true => Err(OracleError::Unavailable(String::from("empty reply"))),
            false => Ok(OracleReply::from(text)),
        })
    }
}
