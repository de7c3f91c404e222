use dioxus::prelude::*;

/// Error panel shown in place of an article or a block that cannot be displayed
#[component]
pub fn ErrorScreen(title: String, message: String, details: Option<String>) -> Element {
    rsx! {
        div {
            class: "error-screen",
            h3 { class: "error-title", "{title}" }
            p { "{message}" }
            if let Some(ref detail_text) = details {
                pre { class: "error-details", "{detail_text}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use dioxus_ssr::render;

    #[test]
    fn test_error_screen_renders_title_and_message() {
        let mut dom = VirtualDom::new_with_props(
            ErrorScreen,
            ErrorScreenProps {
                title: "Cannot open article".to_string(),
                message: "Invalid JSON".to_string(),
                details: None,
            },
        );
        dom.rebuild_in_place();
        let html = render(&dom);

        assert!(html.contains("Cannot open article"));
        assert!(html.contains("Invalid JSON"));
        assert!(!html.contains("<pre"));
    }

    #[test]
    fn test_error_screen_renders_with_details() {
        let mut dom = VirtualDom::new_with_props(
            ErrorScreen,
            ErrorScreenProps {
                title: "Cannot show image block".to_string(),
                message: "block 2 could not be loaded".to_string(),
                details: Some("missing field `url`".to_string()),
            },
        );
        dom.rebuild_in_place();
        let html = render(&dom);

        assert!(html.contains("block 2 could not be loaded"));
        assert!(html.contains("missing field `url`"));
    }
}
