#![allow(non_snake_case)]

use dioxus::prelude::*;

#[derive(PartialEq, Props)]
pub struct ContentProps {
    content: String,
}

pub fn UserMessage(cx: Scope<ContentProps>) -> Element {
    cx.render(rsx!(
        div {
            class: "chat-message user-message",
            "{cx.props.content}"
        }
    ))
}

pub fn AssistantMessage(cx: Scope<ContentProps>) -> Element {
    cx.render(rsx!(
        div {
            class: "chat-message assistant-message",
            "{cx.props.content}"
        }
    ))
}

pub fn ErrorMessage(cx: Scope<ContentProps>) -> Element {
    cx.render(rsx!(
        div {
            class: "chat-message error-message",
            "{cx.props.content}"
        }
    ))
}

pub fn Thinking(cx: Scope) -> Element {
    cx.render(rsx!(
        div {
            class: "chat-message assistant-message",
            "Thinking..."
        }
    ))
}

#[derive(Props)]
pub struct DraftProps<'a> {
    draft: &'a UseRef<String>,
    clean: &'a UseState<bool>,
    on_press: EventHandler<'a, Event<KeyboardData>>,
}

pub fn UserInput<'a>(cx: Scope<'a, DraftProps>) -> Element<'a> {
    let draft = cx.props.draft;
    let clean = cx.props.clean;
    if **clean {
        clean.set(false);
        cx.render(rsx!(input {
            id: "chat-input",
            placeholder: "Ask a question about the selected text...",
            value: "",
            oninput: |e| {
                draft.set(e.value.clone());
            },
            onkeypress: |e| cx.props.on_press.call(e),
        }))
    } else {
        cx.render(rsx!(input {
            id: "chat-input",
            placeholder: "Ask a question about the selected text...",
            oninput: |e| {
                draft.set(e.value.clone());
            },
            onkeypress: |e| cx.props.on_press.call(e),
        }))
    }
}
