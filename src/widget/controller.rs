use crate::relay::envelope::Envelope;

use super::activation::{should_auto_init, ActivationStore, ACTIVATION_KEY};
use super::affordance::{Affordance, AffordanceState, SelectionSnapshot, Viewport};
use super::panel::{ChatSession, Reply};
use super::types::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    Open,
}

/// Handle for one in-flight relay call: the exact message list to post plus
/// the panel generation that issued it.
#[derive(Debug, Clone, PartialEq)]
pub struct SendTicket {
    generation: u64,
    pub messages: Vec<Message>,
}

/// Everything one widget instance owns: activation state, the selection
/// affordance and the open panel, if any. One controller per page; construct
/// and dispose explicitly instead of leaning on page globals.
#[derive(Debug)]
pub struct WidgetController {
    active: bool,
    affordance: Affordance,
    session: Option<ChatSession>,
    generation: u64,
}

impl WidgetController {
    pub fn new() -> WidgetController {
        WidgetController {
            active: false,
            affordance: Affordance::new(),
            session: None,
            generation: 0,
        }
    }

    /// Script-load entry point, honoring the stored activation flag.
    pub fn auto_init(store: &dyn ActivationStore) -> WidgetController {
        let mut controller = WidgetController::new();
        if should_auto_init(store) {
            controller.active = true;
        }
        controller
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Explicit re-activation re-runs initialization without touching the
    /// persisted flag.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Tears everything down and pins the flag so later page loads stay off.
    pub fn deactivate(&mut self, store: &mut dyn ActivationStore) {
        self.close_panel();
        self.affordance.selection_cleared();
        self.active = false;
        store.set(ACTIVATION_KEY, "false");
    }

    pub fn toggle(&mut self, store: &mut dyn ActivationStore) {
        if self.active {
            self.deactivate(store);
        } else {
            self.activate();
        }
    }

    pub fn affordance_state(&self) -> AffordanceState {
        self.affordance.state()
    }

    pub fn pointer_released(
        &mut self,
        selection: &SelectionSnapshot,
        viewport: Viewport,
    ) -> AffordanceState {
        if !self.active {
            return AffordanceState::Hidden;
        }
        self.affordance.pointer_released(selection, viewport)
    }

    pub fn selection_cleared(&mut self) {
        self.affordance.selection_cleared();
    }

    pub fn panel_state(&self) -> PanelState {
        if self.session.is_some() {
            PanelState::Open
        } else {
            PanelState::Closed
        }
    }

    pub fn session(&self) -> Option<&ChatSession> {
        self.session.as_ref()
    }

    /// Affordance click: opens a fresh session for the selection, or closes
    /// the panel when one is already open.
    pub fn toggle_panel(&mut self, selected_text: &str) -> PanelState {
        match self.session {
            Some(_) => self.close_panel(),
            None => {
                self.generation += 1;
                self.session = Some(ChatSession::new(selected_text));
            }
        }
        self.panel_state()
    }

    /// Drops the session outright; the conversation is never persisted. The
    /// generation bump invalidates any call still in flight.
    pub fn close_panel(&mut self) {
        if self.session.take().is_some() {
            self.generation += 1;
        }
    }

    /// Stages a user turn: appends the composed entry to the conversation and
    /// hands back the message list to post. None when the input is blank or
    /// no panel is open.
    pub fn begin_send(&mut self, input: &str) -> Option<SendTicket> {
        let session = self.session.as_mut()?;
        let content = session.compose_user_entry(input)?;
        session.push_user(content);
        Some(SendTicket {
            generation: self.generation,
            messages: session.conversation().messages().to_vec(),
        })
    }

    /// Applies a relay outcome, or silently drops it when the panel that
    /// issued the ticket has since been closed.
    pub fn complete_send(&mut self, ticket: &SendTicket, envelope: Envelope) -> Option<Reply> {
        if ticket.generation != self.generation {
            return None;
        }
        let session = self.session.as_mut()?;
        Some(session.apply_reply(envelope))
    }
}

impl Default for WidgetController {
    fn default() -> WidgetController {
        WidgetController::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::activation::MemoryStore;
    use crate::widget::types::Role;
    use serde_json::json;

    fn open_controller() -> WidgetController {
        let mut controller = WidgetController::new();
        controller.activate();
        controller.toggle_panel("quantum entanglement");
        controller
    }

    #[test]
    fn stored_false_blocks_auto_init() {
        let mut store = MemoryStore::new();
        store.set(ACTIVATION_KEY, "false");
        assert!(!WidgetController::auto_init(&store).is_active());

        let store = MemoryStore::new();
        assert!(WidgetController::auto_init(&store).is_active());
    }

    #[test]
    fn deactivation_persists_the_flag_and_reactivation_does_not() {
        let mut store = MemoryStore::new();
        let mut controller = WidgetController::auto_init(&store);
        controller.toggle_panel("sel");

        controller.toggle(&mut store);
        assert!(!controller.is_active());
        assert_eq!(controller.panel_state(), PanelState::Closed);
        assert_eq!(store.get(ACTIVATION_KEY).as_deref(), Some("false"));

        controller.toggle(&mut store);
        assert!(controller.is_active());
        assert_eq!(store.get(ACTIVATION_KEY).as_deref(), Some("false"));
    }

    #[test]
    fn toggling_an_open_panel_closes_it() {
        let mut controller = open_controller();
        assert_eq!(controller.panel_state(), PanelState::Open);
        assert_eq!(controller.toggle_panel("anything"), PanelState::Closed);
        assert!(controller.session().is_none());
    }

    #[test]
    fn reopening_starts_a_fresh_conversation() {
        let mut controller = open_controller();
        controller.begin_send("first question").unwrap();
        assert_eq!(controller.session().unwrap().conversation().len(), 2);

        controller.close_panel();
        controller.toggle_panel("new selection");
        let conversation = controller.session().unwrap().conversation();
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.messages()[0].role, Role::System);
    }

    #[test]
    fn blank_input_is_a_no_op() {
        let mut controller = open_controller();
        assert!(controller.begin_send("   ").is_none());
        assert_eq!(controller.session().unwrap().conversation().len(), 1);
    }

    #[test]
    fn each_turn_posts_the_full_history() {
        let mut controller = open_controller();
        let ticket = controller.begin_send("what is this?").unwrap();
        assert_eq!(ticket.messages.len(), 2);
        assert_eq!(
            ticket.messages[1].content,
            "what is this?\n\nSelected text: quantum entanglement"
        );
    }

    #[test]
    fn success_and_failure_grow_the_conversation_differently() {
        let mut controller = open_controller();

        let ticket = controller.begin_send("hi").unwrap();
        let reply = controller.complete_send(
            &ticket,
            Envelope::Success {
                message: "hello".into(),
                usage: json!({}),
            },
        );
        assert_eq!(reply, Some(Reply::Assistant("hello".into())));
        assert_eq!(controller.session().unwrap().conversation().len(), 3);

        let ticket = controller.begin_send("again").unwrap();
        let reply = controller.complete_send(&ticket, Envelope::failure("nope"));
        assert_eq!(reply, Some(Reply::Error("nope".into())));
        assert_eq!(controller.session().unwrap().conversation().len(), 4);
    }

    #[test]
    fn late_responses_are_dropped_after_close() {
        let mut controller = open_controller();
        let ticket = controller.begin_send("hi").unwrap();
        controller.close_panel();

        let reply = controller.complete_send(
            &ticket,
            Envelope::Success {
                message: "too late".into(),
                usage: json!({}),
            },
        );
        assert_eq!(reply, None);

        // A reopened panel must not absorb the stale outcome either.
        controller.toggle_panel("other");
        let reply = controller.complete_send(
            &ticket,
            Envelope::Success {
                message: "still late".into(),
                usage: json!({}),
            },
        );
        assert_eq!(reply, None);
        assert_eq!(controller.session().unwrap().conversation().len(), 1);
    }

    #[test]
    fn inactive_controller_never_shows_the_ball() {
        use crate::widget::affordance::{Point, SelectionSnapshot, Viewport};

        let mut controller = WidgetController::new();
        let state = controller.pointer_released(
            &SelectionSnapshot {
                text: "hello".into(),
                rect: None,
                pointer: Point { x: 10.0, y: 10.0 },
            },
            Viewport {
                width: 800.0,
                height: 600.0,
            },
        );
        assert_eq!(state, AffordanceState::Hidden);
    }
}
