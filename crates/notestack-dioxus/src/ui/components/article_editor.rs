use dioxus::prelude::*;
use notestack_engine::{
    Article, ArticleFile, BlockInput, BlockView, EditorSession, Snapshot, fallback_surfaces, io,
};
use std::path::PathBuf;
use std::rc::Rc;

use super::{BlockSurface, BlockToolbox, ErrorScreen, ToolEntry};
use crate::tasks;
use crate::ui::Workspace;

#[derive(Debug, Clone, PartialEq)]
enum SaveStatus {
    Idle,
    Saved,
    /// Written, but this many blocks kept their previous data
    Partial(usize),
    Failed(String),
}

enum Body {
    Editing(EditorSession),
    /// Mounting failed; blocks are shown read-only around the failing one
    Fallback {
        views: Vec<BlockView>,
        error: String,
    },
    Failed {
        message: String,
        details: String,
    },
}

/// Mounts an article in an editor session and persists every change
#[component]
pub fn ArticleEditor(file: ArticleFile, read_only: bool) -> Element {
    let workspace = use_context::<Workspace>();

    let loaded = use_hook({
        let workspace = workspace.clone();
        let file = file.clone();
        move || {
            Rc::new(
                io::read_article(file.relative_path(), &workspace.notes_path)
                    .map_err(|e| e.to_string()),
            )
        }
    });

    let mut title = use_signal(|| {
        loaded
            .as_ref()
            .as_ref()
            .map(|article| article.title.clone())
            .unwrap_or_default()
    });
    let status = use_signal(|| SaveStatus::Idle);
    let mut body = use_signal({
        let workspace = workspace.clone();
        let file = file.clone();
        move || open(&workspace, &file, &loaded, read_only, title, status)
    });

    use_drop(move || {
        if let Ok(mut body) = body.try_write()
            && let Body::Editing(session) = &mut *body
        {
            session.destroy();
        }
    });

    let dispatch = use_callback({
        let workspace = workspace.clone();
        move |(index, input): (usize, BlockInput)| {
            let result = match &mut *body.write() {
                Body::Editing(session) => session.dispatch(index, input),
                _ => return,
            };
            if let Err(e) = result {
                log::warn!("Input for block {index} rejected: {e}");
            }
            spawn_tasks(body, &workspace);
        }
    });

    let toolbox = use_hook(|| {
        workspace
            .registry
            .tools()
            .map(|tool| {
                let entry = tool.toolbox();
                ToolEntry {
                    type_key: tool.type_key(),
                    title: entry.title,
                    icon: entry.icon,
                }
            })
            .collect::<Vec<_>>()
    });

    let content = match &*body.read() {
        Body::Editing(session) => {
            let editable = !session.is_read_only();
            let blocks = session.surfaces().into_iter().map(|view| {
                let index = view.index;
                let key = view.id.clone().unwrap_or_else(|| format!("#{index}"));
                rsx! {
                    div {
                        key: "{key}",
                        class: "block-row",
                        BlockSurface {
                            view,
                            on_input: move |input| dispatch.call((index, input)),
                        }
                        if editable {
                            button {
                                class: "delete-block",
                                title: "Delete block",
                                onclick: move |_| {
                                    if let Body::Editing(session) = &mut *body.write()
                                        && let Err(e) = session.delete_block(index)
                                    {
                                        log::warn!("Could not delete block {index}: {e}");
                                    }
                                },
                                "x"
                            }
                        }
                    }
                }
            });
            rsx! {
                {blocks}
                if editable {
                    BlockToolbox {
                        tools: toolbox.clone(),
                        on_pick: move |block_type: &'static str| {
                            if let Body::Editing(session) = &mut *body.write()
                                && let Err(e) = session.append_block(block_type)
                            {
                                log::warn!("Could not add {block_type} block: {e}");
                            }
                        },
                    }
                }
            }
        }
        Body::Fallback { views, error } => {
            let blocks = views.iter().cloned().map(|view| {
                let key = format!("#{}", view.index);
                rsx! {
                    div {
                        key: "{key}",
                        class: "block-row",
                        BlockSurface { view, on_input: move |_| {} }
                    }
                }
            });
            rsx! {
                div { class: "mount-error", "This article is shown read-only: {error}" }
                {blocks}
            }
        }
        Body::Failed { message, details } => rsx! {
            ErrorScreen {
                title: "Cannot open article".to_string(),
                message: message.clone(),
                details: Some(details.clone()),
            }
        },
    };

    let status_text = match &*status.read() {
        SaveStatus::Idle => String::new(),
        SaveStatus::Saved => "Saved".to_string(),
        SaveStatus::Partial(count) => format!("Saved, {count} block(s) kept their previous content"),
        SaveStatus::Failed(reason) => format!("Save failed: {reason}"),
    };
    let is_editing = matches!(&*body.read(), Body::Editing(session) if !session.is_read_only());

    rsx! {
        article {
            class: "article-editor",
            div {
                class: "article-header",
                input {
                    class: "article-title",
                    value: "{title}",
                    disabled: !is_editing,
                    oninput: move |event: Event<FormData>| {
                        title.set(event.value());
                        if let Body::Editing(session) = &mut *body.write() {
                            session.refresh();
                        }
                    },
                }
                span { class: "article-path", "{file.display_path()}" }
                span { class: "save-status", "{status_text}" }
            }
            div { class: "article-blocks", {content} }
        }
    }
}

fn open(
    workspace: &Workspace,
    file: &ArticleFile,
    loaded: &Result<Article, String>,
    read_only: bool,
    title: Signal<String>,
    status: Signal<SaveStatus>,
) -> Body {
    let article = match loaded {
        Ok(article) => article,
        Err(e) => {
            log::error!("Error reading article {}: {e}", file.display_path());
            return Body::Failed {
                message: format!("{} could not be read", file.display_path()),
                details: e.clone(),
            };
        }
    };

    let mut session = EditorSession::new(workspace.registry.clone(), workspace.api());
    match session.mount(&article.content, read_only) {
        Ok(()) => {
            session.on_change(persist(
                workspace.notes_path.clone(),
                file.clone(),
                title,
                status,
            ));
            Body::Editing(session)
        }
        Err(e) => {
            log::error!("Error mounting {}: {e}", file.display_path());
            Body::Fallback {
                views: fallback_surfaces(&article.content, &workspace.registry, &e),
                error: e.to_string(),
            }
        }
    }
}

/// Change callback writing each snapshot back to the article file
fn persist(
    notes_path: PathBuf,
    file: ArticleFile,
    title: Signal<String>,
    mut status: Signal<SaveStatus>,
) -> impl FnMut(&Snapshot) + 'static {
    move |snapshot| {
        for failure in &snapshot.failures {
            log::warn!(
                "Block {} ({}) could not be saved: {}",
                failure.index,
                failure.block_type,
                failure.error
            );
        }
        let article = Article::new(title.peek().clone(), snapshot.document.clone());
        let next = match io::write_article(file.relative_path(), &notes_path, &article) {
            Ok(()) if snapshot.is_clean() => SaveStatus::Saved,
            Ok(()) => SaveStatus::Partial(snapshot.failures.len()),
            Err(e) => {
                log::error!("Error saving {}: {e}", file.display_path());
                SaveStatus::Failed(e.to_string())
            }
        };
        status.set(next);
    }
}

/// Hand queued block work to the async runtime
fn spawn_tasks(mut body: Signal<Body>, workspace: &Workspace) {
    let pending = match &mut *body.write() {
        Body::Editing(session) => session.take_tasks(),
        _ => return,
    };

    for task in pending {
        let client = workspace.client.clone();
        let timeout = workspace.host.fetch_timeout();
        spawn(async move {
            let changed = tasks::run(task, &client, timeout).await;
            if let Body::Editing(session) = &mut *body.write()
                && changed
            {
                session.refresh();
            }
        });
    }
}
