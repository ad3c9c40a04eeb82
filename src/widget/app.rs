use dioxus::html::input_data::keyboard_types::Key;
use dioxus::prelude::*;

use super::client::RelayClient;
use super::components::*;
use super::controller::WidgetController;
use super::panel::{Reply, GREETING};

const DEMO_SELECTION: &str =
    "Quantum entanglement is a phenomenon where two particles share a state \
     such that measuring one instantly constrains the other.";

#[derive(Clone, PartialEq)]
enum EntryKind {
    User,
    Assistant,
    Error,
}

#[derive(Clone, PartialEq)]
struct Entry {
    kind: EntryKind,
    content: String,
}

fn greeting() -> Vec<Entry> {
    vec![Entry {
        kind: EntryKind::Assistant,
        content: GREETING.into(),
    }]
}

/// The chat panel, rendered over liveview. The controller holds all
/// conversational state; this component only wires events and paints the
/// transcript.
pub fn panel(cx: Scope) -> Element {
    let controller = use_ref(cx, || {
        let mut controller = WidgetController::new();
        controller.activate();
        controller.toggle_panel(DEMO_SELECTION);
        controller
    });
    let relay = use_ref(cx, RelayClient::from_env);
    let draft = use_ref(cx, String::new);
    let entries = use_ref(cx, greeting);
    let clean = use_state(cx, || false);
    let thinking = use_state(cx, || false);

    let send = move |_| {
        if *thinking.get() {
            return;
        }
        let input = draft.read().clone();
        let Some(ticket) = controller.write().begin_send(&input) else {
            return;
        };
        clean.set(true);
        draft.set(String::new());
        entries.write().push(Entry {
            kind: EntryKind::User,
            content: input.trim().to_string(),
        });
        thinking.set(true);

        cx.spawn({
            to_owned![thinking, controller, entries, relay];
            async move {
                let client = relay.read().clone();
                let envelope = client.send(&ticket.messages).await;
                // The placeholder comes down exactly once, before any outcome
                // is painted.
                thinking.set(false);
                match controller.write().complete_send(&ticket, envelope) {
                    Some(Reply::Assistant(content)) => entries.write().push(Entry {
                        kind: EntryKind::Assistant,
                        content,
                    }),
                    Some(Reply::Error(content)) => entries.write().push(Entry {
                        kind: EntryKind::Error,
                        content,
                    }),
                    // Panel closed mid-flight; the outcome is dropped.
                    None => {}
                }
            }
        })
    };

    let send_enter = move |e: Event<KeyboardData>| {
        if let Key::Enter = e.data.key() {
            send(0);
        }
    };

    let send_button = move |_| {
        send(0);
    };

    let close = move |_| {
        controller.write().close_panel();
        entries.write().clear();
    };

    let reopen = move |_| {
        controller.write().toggle_panel(DEMO_SELECTION);
        entries.set(greeting());
    };

    let snippet = controller
        .read()
        .session()
        .map(|session| session.snippet())
        .unwrap_or_default();
    let open = controller.read().session().is_some();

    let panel_body = if open {
        rsx!(
            div {
                id: "chat-panel",
                div {
                    id: "chat-header",
                    span { id: "chat-title", "ai assistant" }
                    button {
                        id: "close-button",
                        onclick: close,
                        "×"
                    }
                }
                div {
                    id: "selection-banner",
                    strong { "Selected: " }
                    span { "\"{snippet}\"" }
                }
                div {
                    id: "chat-window",
                    class: "chat-window",
                    for entry in entries.read().iter() {
                        match entry.kind {
                            EntryKind::User => rsx!(UserMessage { content: entry.content.clone() }),
                            EntryKind::Assistant => rsx!(AssistantMessage { content: entry.content.clone() }),
                            EntryKind::Error => rsx!(ErrorMessage { content: entry.content.clone() }),
                        }
                    }
                    if thinking == true {
                        rsx!(Thinking {})
                    }
                }
                div {
                    id: "input-area",
                    UserInput {
                        draft: draft,
                        clean: clean,
                        on_press: send_enter,
                    }
                    button {
                        id: "send-button",
                        onclick: send_button,
                        "Send"
                    }
                }
            }
        )
    } else {
        rsx!(
            button {
                id: "reopen-button",
                onclick: reopen,
                "✨ Open assistant"
            }
        )
    };

    cx.render(rsx!(
        style { include_str!("./style.css") }
        panel_body
    ))
}
