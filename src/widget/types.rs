use serde::{Deserialize, Serialize};

pub const SYSTEM_DIRECTIVE: &str =
    "You are a helpful assistant that explains selected text and answers questions clearly.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Message {
        Message {
            role,
            content: content.into(),
        }
    }
}

/// Append-only message history for one panel session. Always starts with the
/// system directive; entries are never mutated once pushed.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Conversation {
        Conversation {
            messages: vec![Message::new(Role::System, SYSTEM_DIRECTIVE)],
        }
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::new(Role::User, content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::new(Role::Assistant, content));
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for Conversation {
    fn default() -> Conversation {
        Conversation::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_is_seeded_with_the_system_directive() {
        let conversation = Conversation::new();
        assert_eq!(conversation.len(), 1);
        assert_eq!(
            conversation.messages()[0],
            Message::new(Role::System, SYSTEM_DIRECTIVE)
        );
    }

    #[test]
    fn roles_serialize_lowercase() {
        let wire = serde_json::to_value(Message::new(Role::Assistant, "hi")).unwrap();
        assert_eq!(wire, serde_json::json!({"role": "assistant", "content": "hi"}));
    }
}
