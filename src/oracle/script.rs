use super::*;
use std::collections::VecDeque;

/// Canned replies, one per query. `None` is a failed attempt.
#[derive(Debug, Default)]
pub struct ScriptOracle {
    replies: VecDeque<Option<String>>,
    prompts: Vec<String>,
}

impl ScriptOracle {
    pub fn new(replies: impl IntoIterator<Item = Option<String>>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            prompts: Vec::new(),
        }
    }
    pub fn asked(&self) -> usize {
        self.prompts.len()
    }
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

#[async_trait::async_trait]
impl Oracle for ScriptOracle {
    async fn query(
        &mut self,
        prompt: &str,
        _: &[AIMessage],
    ) -> std::result::Result<OracleReply, OracleError> {
        self.prompts.push(prompt.to_string());
        match self.replies.pop_front() {
            Some(Some(text)) => Ok(OracleReply::from(text)),
            Some(None) => Err(OracleError::Unavailable(String::from("scripted failure"))),
            None => Err(OracleError::Unavailable(String::from("script exhausted"))),
        }
    }
}
