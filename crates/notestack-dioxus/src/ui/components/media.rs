use dioxus::prelude::*;
use notestack_engine::BlockInput;
use notestack_engine::view::EmbedKind;
use std::path::PathBuf;

#[component]
pub fn ImageBlock(
    src: Option<String>,
    caption: String,
    loading: bool,
    with_border: bool,
    stretched: bool,
    with_background: bool,
    editable: bool,
    on_input: EventHandler<BlockInput>,
) -> Element {
    let mut path_draft = use_signal(String::new);

    let mut classes = vec!["block-image"];
    if with_border {
        classes.push("with-border");
    }
    if stretched {
        classes.push("stretched");
    }
    if with_background {
        classes.push("with-background");
    }
    let classes = classes.join(" ");

    rsx! {
        figure {
            class: "{classes}",
            if let Some(src) = src {
                img { src: "{src}", alt: "{caption}" }
            } else if loading {
                div { class: "image-loading", "Loading image..." }
            } else if editable {
                form {
                    class: "image-picker",
                    onsubmit: move |event: Event<FormData>| {
                        event.prevent_default();
                        let path = path_draft.read().trim().to_string();
                        if !path.is_empty() {
                            on_input.call(BlockInput::PickFile(PathBuf::from(path)));
                        }
                    },
                    input {
                        placeholder: "Path to an image file",
                        value: "{path_draft}",
                        oninput: move |event: Event<FormData>| path_draft.set(event.value()),
                    }
                    button { r#type: "submit", "Load" }
                }
            }
            if editable {
                input {
                    class: "image-caption",
                    placeholder: "Caption",
                    value: "{caption}",
                    oninput: move |event: Event<FormData>| on_input.call(BlockInput::SetCaption(event.value())),
                }
            } else if !caption.is_empty() {
                figcaption { "{caption}" }
            }
        }
    }
}

/// Iframe or audio player for embed blocks
#[component]
pub fn EmbedFrame(
    kind: EmbedKind,
    title: Option<String>,
    url: String,
    src: String,
    editable: bool,
    on_input: EventHandler<BlockInput>,
) -> Element {
    let frame = if src.is_empty() {
        rsx! {}
    } else {
        match kind.height() {
            Some(height) => rsx! {
                iframe {
                    class: "embed-frame",
                    src: "{src}",
                    height: "{height}",
                    width: "100%",
                }
            },
            None => rsx! {
                audio { class: "embed-audio", controls: true, src: "{src}" }
            },
        }
    };

    rsx! {
        div {
            class: "block-embed",
            if editable {
                if let Some(title) = title.clone() {
                    input {
                        class: "embed-title",
                        placeholder: "Title",
                        value: "{title}",
                        oninput: move |event: Event<FormData>| on_input.call(BlockInput::SetTitle(event.value())),
                    }
                }
                input {
                    class: "embed-url",
                    placeholder: "URL",
                    value: "{url}",
                    oninput: move |event: Event<FormData>| on_input.call(BlockInput::SetUrl(event.value())),
                }
            } else if let Some(title) = title.filter(|title| !title.is_empty()) {
                h4 { class: "embed-title", "{title}" }
            }
            {frame}
        }
    }
}
