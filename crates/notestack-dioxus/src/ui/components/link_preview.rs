use dioxus::prelude::*;
use notestack_engine::BlockInput;

/// URL field of a link preview that has no metadata yet
#[component]
pub fn LinkInput(
    placeholder: String,
    pending_url: Option<String>,
    on_input: EventHandler<BlockInput>,
) -> Element {
    let mut draft = use_signal(String::new);

    if let Some(url) = pending_url {
        return rsx! {
            div { class: "link-preview pending", "Fetching preview for {url}..." }
        };
    }

    rsx! {
        form {
            class: "link-preview input",
            onsubmit: move |event: Event<FormData>| {
                event.prevent_default();
                on_input.call(BlockInput::PasteUrl(draft.read().clone()));
            },
            input {
                placeholder: "{placeholder}",
                value: "{draft}",
                oninput: move |event: Event<FormData>| draft.set(event.value()),
            }
        }
    }
}

#[component]
pub fn LinkCard(url: String, title: String, description: String, image: Option<String>) -> Element {
    let host = url::Url::parse(&url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .unwrap_or_else(|| url.clone());

    rsx! {
        a {
            class: "link-preview card",
            href: "{url}",
            target: "_blank",
            if let Some(image) = image {
                img { class: "link-image", src: "{image}" }
            }
            div {
                class: "link-body",
                div { class: "link-title", "{title}" }
                if !description.is_empty() {
                    p { class: "link-description", "{description}" }
                }
                span { class: "link-host", "{host}" }
            }
        }
    }
}
