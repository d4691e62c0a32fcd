use serde::Deserialize;
use serde::Serialize;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AIMessage {
    pub role: Role,
    pub text: String,
}

impl AIMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            text: text.into(),
        }
    }
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

/// One hand's exchange with the Oracle.
///
/// The system prompt is pinned; everything else is a sliding window of
/// at most `max` messages, oldest dropped first.
#[derive(Debug, Clone)]
pub struct Conversation {
    system: Option<AIMessage>,
    messages: VecDeque<AIMessage>,
    max: usize,
}

impl Conversation {
    pub fn new(system: Option<String>, max: usize) -> Self {
        Self {
            system: system.map(AIMessage::system),
            messages: VecDeque::new(),
            max: max.max(1),
        }
    }
    pub fn push(&mut self, message: AIMessage) {
        match message.role {
            Role::System => self.system = Some(message),
            _ => {
                self.messages.push_back(message);
                while self.messages.len() > self.max {
                    self.messages.pop_front();
                }
            }
        }
    }
    /// System prompt first, then the window in order.
    pub fn messages(&self) -> Vec<AIMessage> {
        self.system
            .iter()
            .chain(self.messages.iter())
            .cloned()
            .collect()
    }
    pub fn len(&self) -> usize {
        self.messages.len()
    }
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
    /// Forgets the hand, keeps the system prompt.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
