use dioxus::prelude::*;
use notestack_engine::blocks::{Alignment, ListStyle};
use notestack_engine::{BlockInput, BlockView, Key, Surface};

use super::{CodeWidget, EmbedFrame, ErrorScreen, ImageBlock, LinkCard, LinkInput, TableBlock};
use crate::ui::keys::editor_key;

/// Draws one block surface and turns DOM events into block inputs
#[component]
pub fn BlockSurface(view: BlockView, on_input: EventHandler<BlockInput>) -> Element {
    match view.surface {
        Surface::Paragraph {
            text,
            placeholder,
            editable,
        } => {
            if editable {
                rsx! {
                    TextField {
                        class: "block-paragraph".to_string(),
                        text,
                        placeholder,
                        on_text: move |text| on_input.call(BlockInput::SetText(text)),
                        on_input,
                    }
                }
            } else {
                rsx! { p { class: "block-paragraph", "{text}" } }
            }
        }
        Surface::Heading {
            level,
            text,
            levels,
            editable,
        } => {
            if editable {
                rsx! {
                    div {
                        class: "block-heading level-{level}",
                        select {
                            class: "heading-level",
                            onchange: move |event: Event<FormData>| {
                                if let Ok(level) = event.value().parse::<u8>() {
                                    on_input.call(BlockInput::SetLevel(level));
                                }
                            },
                            for option_level in levels {
                                option {
                                    value: "{option_level}",
                                    selected: option_level == level,
                                    "H{option_level}"
                                }
                            }
                        }
                        TextField {
                            class: "heading-text".to_string(),
                            text,
                            placeholder: "Heading".to_string(),
                            on_text: move |text| on_input.call(BlockInput::SetText(text)),
                            on_input,
                        }
                    }
                }
            } else {
                heading(level, &text)
            }
        }
        Surface::List {
            style,
            items,
            editable,
        } => rsx! {
            ListBlock { style, items, editable, on_input }
        },
        Surface::Quote {
            text,
            caption,
            alignment,
            quote_placeholder,
            caption_placeholder,
            editable,
        } => {
            let align_class = match alignment {
                Alignment::Left => "align-left",
                Alignment::Center => "align-center",
            };
            if editable {
                rsx! {
                    blockquote {
                        class: "block-quote {align_class}",
                        TextField {
                            class: "quote-text".to_string(),
                            text,
                            placeholder: quote_placeholder,
                            on_text: move |text| on_input.call(BlockInput::SetText(text)),
                            on_input,
                        }
                        input {
                            class: "quote-caption",
                            value: "{caption}",
                            placeholder: "{caption_placeholder}",
                            oninput: move |event: Event<FormData>| {
                                on_input.call(BlockInput::SetCaption(event.value()))
                            },
                        }
                        button {
                            class: "quote-align",
                            onclick: move |_| {
                                let next = match alignment {
                                    Alignment::Left => Alignment::Center,
                                    Alignment::Center => Alignment::Left,
                                };
                                on_input.call(BlockInput::SetAlignment(next));
                            },
                            if alignment == Alignment::Left { "Center" } else { "Left" }
                        }
                    }
                }
            } else {
                rsx! {
                    blockquote {
                        class: "block-quote {align_class}",
                        p { "{text}" }
                        if !caption.is_empty() {
                            footer { "{caption}" }
                        }
                    }
                }
            }
        }
        Surface::Delimiter => rsx! {
            div { class: "block-delimiter", "* * *" }
        },
        Surface::Code(code) => {
            let widget_key = code.widget_key();
            rsx! {
                CodeWidget {
                    key: "{widget_key}",
                    code,
                    on_input,
                }
            }
        }
        Surface::Table {
            with_headings,
            content,
            editable,
        } => rsx! {
            TableBlock { with_headings, content, editable, on_input }
        },
        Surface::Image {
            src,
            caption,
            loading,
            with_border,
            stretched,
            with_background,
            editable,
        } => rsx! {
            ImageBlock {
                src,
                caption,
                loading,
                with_border,
                stretched,
                with_background,
                editable,
                on_input,
            }
        },
        Surface::LinkInput {
            placeholder,
            pending_url,
        } => rsx! {
            LinkInput { placeholder, pending_url, on_input }
        },
        Surface::LinkCard {
            url,
            title,
            description,
            image,
        } => rsx! {
            LinkCard { url, title, description, image }
        },
        Surface::Embed {
            kind,
            title,
            url,
            src,
            editable,
        } => rsx! {
            EmbedFrame { kind, title, url, src, editable, on_input }
        },
        Surface::Empty => rsx! {},
        Surface::Error {
            block_type,
            message,
        } => {
            let title = format!("Cannot show {block_type} block");
            rsx! {
                div {
                    class: "block-error",
                    ErrorScreen { title, message, details: None }
                }
            }
        }
    }
}

fn heading(level: u8, text: &str) -> Element {
    match level {
        1 => rsx! { h1 { "{text}" } },
        2 => rsx! { h2 { "{text}" } },
        3 => rsx! { h3 { "{text}" } },
        4 => rsx! { h4 { "{text}" } },
        5 => rsx! { h5 { "{text}" } },
        _ => rsx! { h6 { "{text}" } },
    }
}

/// Multi-line text input. Enter and Backspace are forwarded as keys so the
/// session can open or remove blocks; Shift+Enter keeps the line break.
#[component]
fn TextField(
    class: String,
    text: String,
    placeholder: String,
    on_text: EventHandler<String>,
    on_input: EventHandler<BlockInput>,
) -> Element {
    rsx! {
        textarea {
            class: "{class}",
            value: "{text}",
            placeholder: "{placeholder}",
            rows: calculate_textarea_rows(&text),
            oninput: move |event: Event<FormData>| on_text.call(event.value()),
            onkeydown: move |event: Event<KeyboardData>| {
                let Some(key) = editor_key(&event.key()) else {
                    return;
                };
                if key == Key::Enter {
                    if event.modifiers().shift() {
                        return;
                    }
                    event.prevent_default();
                }
                on_input.call(BlockInput::Key(key));
            },
        }
    }
}

#[component]
fn ListBlock(
    style: ListStyle,
    items: Vec<String>,
    editable: bool,
    on_input: EventHandler<BlockInput>,
) -> Element {
    let entries = items.into_iter().enumerate();
    let body = rsx! {
        for (index, item) in entries {
            li {
                key: "{index}",
                if editable {
                    input {
                        value: "{item}",
                        oninput: move |event: Event<FormData>| {
                            on_input.call(BlockInput::SetItem { index, text: event.value() })
                        },
                        onkeydown: move |event: Event<KeyboardData>| {
                            match editor_key(&event.key()) {
                                Some(Key::Enter) => {
                                    event.prevent_default();
                                    on_input.call(BlockInput::InsertItem { index: index + 1 });
                                }
                                Some(key) => on_input.call(BlockInput::Key(key)),
                                None => {}
                            }
                        },
                    }
                    button {
                        class: "remove-item",
                        onclick: move |_| on_input.call(BlockInput::RemoveItem { index }),
                        "x"
                    }
                } else {
                    "{item}"
                }
            }
        }
    };

    rsx! {
        div {
            class: "block-list",
            if editable {
                button {
                    class: "list-style",
                    onclick: move |_| {
                        let next = match style {
                            ListStyle::Ordered => ListStyle::Unordered,
                            ListStyle::Unordered => ListStyle::Ordered,
                        };
                        on_input.call(BlockInput::SetListStyle(next));
                    },
                    if style == ListStyle::Ordered { "Bulleted" } else { "Numbered" }
                }
            }
            match style {
                ListStyle::Ordered => rsx! { ol { {body} } },
                ListStyle::Unordered => rsx! { ul { {body} } },
            }
        }
    }
}

/// Calculate appropriate number of rows for textarea based on content
fn calculate_textarea_rows(content: &str) -> u32 {
    let line_count = content.lines().count().max(1);
    (line_count as u32).min(20)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use dioxus_ssr::render;

    #[component]
    fn Harness(surface: Surface) -> Element {
        let view = BlockView {
            index: 0,
            id: None,
            block_type: "test".to_string(),
            surface,
        };
        rsx! {
            BlockSurface { view, on_input: move |_| {} }
        }
    }

    fn render_view(surface: Surface) -> String {
        let mut dom = VirtualDom::new_with_props(Harness, HarnessProps { surface });
        dom.rebuild_in_place();
        render(&dom)
    }

    #[test]
    fn test_read_only_paragraph_is_plain_text() {
        let html = render_view(Surface::Paragraph {
            text: "Hello".to_string(),
            placeholder: String::new(),
            editable: false,
        });
        assert!(html.contains("<p class=\"block-paragraph\">Hello</p>"));
        assert!(!html.contains("textarea"));
    }

    #[test]
    fn test_editable_heading_offers_levels() {
        let html = render_view(Surface::Heading {
            level: 2,
            text: "Plan".to_string(),
            levels: vec![1, 2, 3],
            editable: true,
        });
        assert!(html.contains("H1"));
        assert!(html.contains("H3"));
        assert!(html.contains("Plan"));
    }

    #[test]
    fn test_read_only_heading_uses_level_tag() {
        let html = render_view(Surface::Heading {
            level: 3,
            text: "Section".to_string(),
            levels: vec![1, 2, 3],
            editable: false,
        });
        assert!(html.contains("<h3>Section</h3>"));
    }

    #[test]
    fn test_ordered_list_items() {
        let html = render_view(Surface::List {
            style: ListStyle::Ordered,
            items: vec!["one".to_string(), "two".to_string()],
            editable: false,
        });
        assert!(html.contains("<ol>"));
        assert!(html.contains("one"));
        assert!(html.contains("two"));
    }

    #[test]
    fn test_quote_caption_shown_when_present() {
        let html = render_view(Surface::Quote {
            text: "Stay hungry".to_string(),
            caption: "Someone".to_string(),
            alignment: Alignment::Center,
            quote_placeholder: String::new(),
            caption_placeholder: String::new(),
            editable: false,
        });
        assert!(html.contains("align-center"));
        assert!(html.contains("<footer>Someone</footer>"));
    }

    #[test]
    fn test_error_surface_names_block_type() {
        let html = render_view(Surface::Error {
            block_type: "warning".to_string(),
            message: "unknown type".to_string(),
        });
        assert!(html.contains("Cannot show warning block"));
        assert!(html.contains("unknown type"));
    }

    #[test]
    fn test_textarea_rows() {
        assert_eq!(calculate_textarea_rows(""), 1);
        assert_eq!(calculate_textarea_rows("a\nb\nc"), 3);
        assert_eq!(calculate_textarea_rows(&"x\n".repeat(50)), 20);
    }
}
