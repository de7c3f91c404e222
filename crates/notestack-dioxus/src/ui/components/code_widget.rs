use dioxus::prelude::*;
use notestack_engine::BlockInput;
use notestack_engine::blocks::Language;
use notestack_engine::view::CodeSurface;

/// Embedded code editor with a language selector.
///
/// Callers key this component by `CodeSurface::widget_key`, so a language
/// change unmounts the old editor element and mounts a fresh one. The worker
/// URL travels as a data attribute for the editor script to pick up.
#[component]
pub fn CodeWidget(code: CodeSurface, on_input: EventHandler<BlockInput>) -> Element {
    let language_id = code.language.id();
    let label = code.language.label();
    let source = code.code.clone();

    rsx! {
        div {
            class: "block-code",
            div {
                class: "code-toolbar",
                if code.editable {
                    select {
                        class: "code-language",
                        onchange: move |event: Event<FormData>| {
                            match Language::from_id(&event.value()) {
                                Some(language) => on_input.call(BlockInput::SelectLanguage(language)),
                                None => log::warn!("Unknown language selected: {}", event.value()),
                            }
                        },
                        for language in code.languages.iter() {
                            option {
                                value: "{language.id()}",
                                selected: *language == code.language,
                                "{language.label()}"
                            }
                        }
                    }
                } else {
                    span { class: "code-language", "{label}" }
                }
                button {
                    class: "code-copy",
                    r#type: "button",
                    title: "Copy to clipboard",
                    onclick: move |_| copy_to_clipboard(&source),
                    "📋 Copy"
                }
            }
            textarea {
                class: "code-editor",
                "data-language": "{language_id}",
                "data-worker": "{code.worker_url}",
                value: "{code.code}",
                placeholder: "{code.placeholder}",
                readonly: !code.editable,
                spellcheck: false,
                rows: code.code.lines().count().clamp(3, 30),
                oninput: move |event: Event<FormData>| on_input.call(BlockInput::SetCode(event.value())),
            }
        }
    }
}

fn copy_to_clipboard(code: &str) {
    let literal = match serde_json::to_string(code) {
        Ok(literal) => literal,
        Err(e) => {
            log::warn!("Could not copy code: {e}");
            return;
        }
    };
    let _ = document::eval(&format!("navigator.clipboard.writeText({literal})"));
}
