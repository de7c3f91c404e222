use chrono::{Local, Utc};
use dioxus::prelude::*;
use notestack_engine::{ArticleFile, Comment, CommentThread, io};

use crate::ui::Workspace;

#[component]
pub fn CommentsPanel(file: ArticleFile) -> Element {
    let workspace = use_context::<Workspace>();
    let mut thread = use_signal({
        let notes_path = workspace.notes_path.clone();
        let file = file.clone();
        move || match io::read_comments(&file, &notes_path) {
            Ok(thread) => thread,
            Err(e) => {
                log::error!("Error reading comments for {}: {e}", file.display_path());
                CommentThread::new(file.relative_path().as_str())
            }
        }
    });
    let mut draft = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);

    let notes_path = workspace.notes_path.clone();
    let post = move |event: Event<FormData>| {
        event.prevent_default();
        let text = draft.read().clone();
        let posted = thread.write().post(&text, Utc::now()).map(|_| ());
        match posted {
            Ok(()) => {
                draft.set(String::new());
                match io::write_comments(&file, &notes_path, &thread.read()) {
                    Ok(()) => error.set(None),
                    Err(e) => {
                        log::error!("Error saving comments for {}: {e}", file.display_path());
                        error.set(Some(e.to_string()));
                    }
                }
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    rsx! {
        section {
            class: "comments-panel",
            h3 { "Comments ({thread.read().len()})" }
            for comment in thread.read().comments().iter().cloned() {
                CommentItem { key: "{comment.id}", comment }
            }
            form {
                class: "comment-form",
                onsubmit: post,
                textarea {
                    placeholder: "Add a comment",
                    value: "{draft}",
                    oninput: move |event: Event<FormData>| draft.set(event.value()),
                }
                button { r#type: "submit", "Post" }
            }
            if let Some(message) = error.read().as_ref() {
                div { class: "comment-error", "{message}" }
            }
        }
    }
}

#[component]
fn CommentItem(comment: Comment) -> Element {
    let stamp = comment
        .created_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string();

    rsx! {
        div {
            class: "comment",
            span { class: "comment-time", "{stamp}" }
            p { "{comment.text}" }
        }
    }
}
