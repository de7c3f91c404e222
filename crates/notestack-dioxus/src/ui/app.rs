use dioxus::prelude::*;
use notestack_config::Config;
use notestack_engine::{Article, ArticleFile, ArticleIndex, Document, io};
use std::path::Path;

use super::Workspace;
use super::components::{ArticleEditor, ArticleList, CommentsPanel};

const NOTESTACK_CSS: &str = include_str!("../assets/notestack.css");

#[component]
pub fn App(config: Config) -> Element {
    let notice = use_signal(|| None::<String>);
    let workspace = use_context_provider(|| Workspace::new(&config, notice));

    let mut index = use_signal(|| match io::build_article_index(&config.notes_path) {
        Ok(index) => index,
        Err(e) => {
            log::error!("Error building article index: {e}");
            ArticleIndex::new()
        }
    });

    let mut selected = use_signal(|| None::<ArticleFile>);
    let mut read_only = use_signal(|| false);

    rsx! {
        style { {NOTESTACK_CSS} }
        div {
            class: "app-container",
            div {
                class: "sidebar",
                h2 { "Notebooks" }
                ArticleList {
                    index: ReadOnlySignal::from(index),
                    selected: selected.read().clone(),
                    on_select: move |file: ArticleFile| {
                        log::info!("Opening {}", file.display_path());
                        selected.set(Some(file));
                    },
                    on_create: {
                        let notes_path = workspace.notes_path.clone();
                        move |name: String| {
                            match create_article(&notes_path, &name) {
                                Ok(file) => {
                                    index.write().add(file.clone());
                                    selected.set(Some(file));
                                }
                                Err(e) => log::error!("Could not create article '{name}': {e}"),
                            }
                        }
                    },
                }
                label {
                    class: "mode-toggle",
                    input {
                        r#type: "checkbox",
                        checked: read_only(),
                        onchange: move |event: Event<FormData>| read_only.set(event.checked()),
                    }
                    "Read-only"
                }
            }
            div {
                class: "main-content",
                if let Some(file) = selected.read().as_ref() {
                    ArticleEditor {
                        key: "{file.display_path()}-{read_only()}",
                        file: file.clone(),
                        read_only: read_only(),
                    }
                    CommentsPanel {
                        key: "{file.display_path()}",
                        file: file.clone(),
                    }
                } else {
                    div {
                        class: "welcome",
                        h1 { "notestack" }
                        p { "Select an article from the sidebar or create a new one" }
                    }
                }
                if let Some(message) = notice.read().as_ref() {
                    div { class: "status-bar", "{message}" }
                }
            }
        }
    }
}

/// Write an empty article named `name` (which may include notebook folders)
fn create_article(notes_path: &Path, name: &str) -> Result<ArticleFile, io::IoError> {
    let name = name.trim().trim_matches('/');
    let file = ArticleFile::from_relative_str(&format!("{name}.json"));
    let article = Article::new(file.display_name(), Document::default());
    io::write_article(file.relative_path(), notes_path, &article)?;
    Ok(file)
}
