//! The decision query protocol.
//!
//! Build a prompt from the [`Game`](crate::table::Game), ask an
//! [`Oracle`] with a bounded number of attempts, parse and validate what
//! comes back, and fall back to check-or-fold when nothing usable does.
mod action;
mod command;
mod message;
mod query;
#[cfg(feature = "cli")]
mod relay;
mod script;

pub use action::*;
pub use command::*;
pub use message::*;
pub use query::*;
#[cfg(feature = "cli")]
pub use relay::*;
pub use script::*;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OracleError {
    #[error("oracle unavailable: {0}")]
    Unavailable(String),
    #[error("oracle timed out after {0}ms")]
    Timeout(u64),
}

/// What came back from one query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OracleReply {
    pub text: String,
    /// Set by oracles that already produce a structured action;
    /// takes precedence over parsing `text`.
    pub parsed: Option<BotAction>,
}

impl From<String> for OracleReply {
    fn from(text: String) -> Self {
        Self { text, parsed: None }
    }
}

/// Anything that can turn a prompt and the hand's conversation so far
/// into a recommendation.
#[async_trait::async_trait]
pub trait Oracle: Send {
    async fn query(
        &mut self,
        prompt: &str,
        history: &[AIMessage],
    ) -> std::result::Result<OracleReply, OracleError>;
}
