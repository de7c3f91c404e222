use dioxus::prelude::*;
use notestack_engine::BlockInput;

#[component]
pub fn TableBlock(
    with_headings: bool,
    content: Vec<Vec<String>>,
    editable: bool,
    on_input: EventHandler<BlockInput>,
) -> Element {
    let width = content.iter().map(Vec::len).max().unwrap_or(0);

    if !editable {
        return rsx! {
            table {
                class: "block-table",
                for (row, cells) in content.into_iter().enumerate() {
                    tr {
                        for cell in cells {
                            if with_headings && row == 0 {
                                th { "{cell}" }
                            } else {
                                td { "{cell}" }
                            }
                        }
                    }
                }
            }
        };
    }

    rsx! {
        div {
            class: "block-table editable",
            div {
                class: "table-toolbar",
                button { onclick: move |_| on_input.call(BlockInput::AddRow), "+ Row" }
                button { onclick: move |_| on_input.call(BlockInput::AddColumn), "+ Column" }
                label {
                    input {
                        r#type: "checkbox",
                        checked: with_headings,
                        onchange: move |_| on_input.call(BlockInput::ToggleHeadings),
                    }
                    "Heading row"
                }
            }
            table {
                tr {
                    class: "column-controls",
                    for col in 0..width {
                        td {
                            button {
                                title: "Remove column",
                                onclick: move |_| on_input.call(BlockInput::RemoveColumn { index: col }),
                                "x"
                            }
                        }
                    }
                }
                for (row, cells) in content.into_iter().enumerate() {
                    tr {
                        class: if with_headings && row == 0 { "heading-row" },
                        for (col, cell) in cells.into_iter().enumerate() {
                            td {
                                input {
                                    value: "{cell}",
                                    oninput: move |event: Event<FormData>| {
                                        on_input.call(BlockInput::SetCell { row, col, text: event.value() })
                                    },
                                }
                            }
                        }
                        td {
                            button {
                                title: "Remove row",
                                onclick: move |_| on_input.call(BlockInput::RemoveRow { index: row }),
                                "x"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use dioxus_ssr::render;

    #[component]
    fn Harness(with_headings: bool, editable: bool) -> Element {
        let content = vec![
            vec!["Name".to_string(), "Qty".to_string()],
            vec!["Apples".to_string(), "3".to_string()],
        ];
        rsx! {
            TableBlock { with_headings, content, editable, on_input: move |_| {} }
        }
    }

    fn render_table(with_headings: bool, editable: bool) -> String {
        let mut dom = VirtualDom::new_with_props(
            Harness,
            HarnessProps {
                with_headings,
                editable,
            },
        );
        dom.rebuild_in_place();
        render(&dom)
    }

    #[test]
    fn test_heading_row_uses_th() {
        let html = render_table(true, false);
        assert!(html.contains("<th>Name</th>"));
        assert!(html.contains("<td>Apples</td>"));
    }

    #[test]
    fn test_without_headings_all_cells_are_td() {
        let html = render_table(false, false);
        assert!(!html.contains("<th>"));
        assert!(html.contains("<td>Name</td>"));
    }

    #[test]
    fn test_editable_table_has_controls() {
        let html = render_table(true, true);
        assert!(html.contains("+ Row"));
        assert!(html.contains("+ Column"));
        assert!(html.contains("value=\"Apples\""));
    }
}
