use crate::relay::envelope::Envelope;

use super::affordance::{Point, Viewport};
use super::types::Conversation;

pub const CHAT_WIDTH: f64 = 450.0;
pub const CHAT_HEIGHT: f64 = 600.0;
pub const SNIPPET_LIMIT: usize = 100;

/// Rendered locally when the panel opens. Never sent upstream.
pub const GREETING: &str =
    "Hello! I can help you understand the selected text. What would you like to know?";

/// What one relay turn produced, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Assistant(String),
    Error(String),
}

/// Conversation plus the selection it was opened for. Lives exactly as long
/// as the panel stays open; closing the panel drops it, nothing is saved.
#[derive(Debug, Clone)]
pub struct ChatSession {
    selected_text: String,
    conversation: Conversation,
}

impl ChatSession {
    pub fn new(selected_text: impl Into<String>) -> ChatSession {
        ChatSession {
            selected_text: selected_text.into(),
            conversation: Conversation::new(),
        }
    }

    pub fn selected_text(&self) -> &str {
        &self.selected_text
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Selection preview for the panel header, capped for display.
    pub fn snippet(&self) -> String {
        if self.selected_text.chars().count() <= SNIPPET_LIMIT {
            return self.selected_text.clone();
        }
        let head: String = self.selected_text.chars().take(SNIPPET_LIMIT).collect();
        format!("{head}...")
    }

    /// Trimmed user input combined with the captured selection, so every
    /// upstream call carries the selection context. None when the input is
    /// blank.
    pub fn compose_user_entry(&self, input: &str) -> Option<String> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        Some(format!(
            "{input}\n\nSelected text: {}",
            self.selected_text
        ))
    }

    pub fn push_user(&mut self, content: String) {
        self.conversation.push_user(content);
    }

    /// Applies a relay outcome. Success extends the conversation; failures
    /// leave it untouched, so the next send simply retries with the same
    /// history.
    pub fn apply_reply(&mut self, envelope: Envelope) -> Reply {
        match envelope {
            Envelope::Success { message, .. } => {
                self.conversation.push_assistant(message.clone());
                Reply::Assistant(message)
            }
            Envelope::Failure { error, details } => Reply::Error(match details {
                Some(details) => format!("{error}\n\nDetails: {details}"),
                None => error,
            }),
        }
    }
}

/// Keeps a dragged panel fully inside the viewport. Mirrors the affordance
/// clamp but with the panel footprint and no margin.
pub fn clamp_panel_position(pointer: Point, drag_offset: Point, viewport: Viewport) -> Point {
    let x = pointer.x - drag_offset.x;
    let y = pointer.y - drag_offset.y;
    Point {
        x: x.max(0.0).min(viewport.width - CHAT_WIDTH),
        y: y.max(0.0).min(viewport.height - CHAT_HEIGHT),
    }
}
