use dioxus::prelude::*;
use notestack_engine::{ArticleFile, ArticleIndex};

/// One line of the sidebar
#[derive(Debug, Clone, PartialEq)]
pub enum ListRow {
    Notebook(String),
    Article { file: ArticleFile, depth: usize },
}

/// Articles grouped under their notebook, loose articles first
pub fn list_rows(index: &ArticleIndex) -> Vec<ListRow> {
    let mut rows: Vec<ListRow> = index
        .articles()
        .filter(|file| file.notebook().is_none())
        .map(|file| ListRow::Article {
            file: file.clone(),
            depth: 0,
        })
        .collect();

    for notebook in index.notebooks() {
        rows.push(ListRow::Notebook(notebook.to_string()));
        rows.extend(index.in_notebook(notebook).map(|file| ListRow::Article {
            file: file.clone(),
            depth: 1 + file.categories().len(),
        }));
    }
    rows
}

#[component]
pub fn ArticleList(
    index: ReadOnlySignal<ArticleIndex>,
    selected: Option<ArticleFile>,
    on_select: EventHandler<ArticleFile>,
    on_create: EventHandler<String>,
) -> Element {
    let rows = use_memo(move || list_rows(&index.read()));
    let mut draft = use_signal(String::new);

    rsx! {
        div {
            class: "article-list",
            for row in rows.read().iter().cloned() {
                match row {
                    ListRow::Notebook(name) => rsx! {
                        div { class: "notebook-heading", "{name}" }
                    },
                    ListRow::Article { file, depth } => {
                        let is_selected = selected.as_ref() == Some(&file);
                        let label = if file.categories().is_empty() {
                            file.display_name().to_string()
                        } else {
                            format!("{} / {}", file.categories().join(" / "), file.display_name())
                        };
                        rsx! {
                            div {
                                class: if is_selected { "article-item selected" } else { "article-item" },
                                style: "padding-left: {depth * 16}px;",
                                onclick: move |_| on_select.call(file.clone()),
                                "{label}"
                            }
                        }
                    }
                }
            }
        }
        form {
            class: "new-article",
            onsubmit: move |event: Event<FormData>| {
                event.prevent_default();
                let name = draft.read().trim().to_string();
                if !name.is_empty() {
                    on_create.call(name);
                    draft.set(String::new());
                }
            },
            input {
                placeholder: "notebook/new article",
                value: "{draft}",
                oninput: move |event: Event<FormData>| draft.set(event.value()),
            }
            button { r#type: "submit", "Add" }
        }
    }
}
