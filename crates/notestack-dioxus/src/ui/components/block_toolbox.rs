use dioxus::prelude::*;

/// One insertable block type
#[derive(Debug, Clone, PartialEq)]
pub struct ToolEntry {
    pub type_key: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
}

/// Row of buttons appending a new block of the chosen type
#[component]
pub fn BlockToolbox(tools: Vec<ToolEntry>, on_pick: EventHandler<&'static str>) -> Element {
    rsx! {
        div {
            class: "block-toolbox",
            for tool in tools {
                button {
                    key: "{tool.type_key}",
                    class: "toolbox-item",
                    title: "{tool.title}",
                    onclick: move |_| on_pick.call(tool.type_key),
                    span { class: "toolbox-icon", "{tool.icon}" }
                    "{tool.title}"
                }
            }
        }
    }
}
