use super::*;
use std::collections::VecDeque;

/// Plays back commands in order and keeps everything it was shown.
#[derive(Debug, Default)]
pub struct ScriptOperator {
    commands: VecDeque<Command>,
    presented: Vec<Advice>,
    polls: usize,
}

impl ScriptOperator {
    pub fn new(commands: impl IntoIterator<Item = Command>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
            ..Self::default()
        }
    }
    pub fn presented(&self) -> &[Advice] {
        &self.presented
    }
    pub fn polls(&self) -> usize {
        self.polls
    }
}

#[async_trait::async_trait]
impl Operator for ScriptOperator {
    async fn present(&mut self, advice: &Advice) {
        self.presented.push(advice.clone());
    }
    async fn poll(&mut self) -> Command {
        self.polls += 1;
        self.commands.pop_front().unwrap_or(Command::Continue)
    }
    async fn wait(&mut self) -> Command {
        self.commands.pop_front().unwrap_or(Command::Resume)
    }
}
