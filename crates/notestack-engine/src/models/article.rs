use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::Document;

/// Persisted article: a title plus block content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    pub title: String,
    pub content: Document,
}

impl Article {
    pub fn new(title: impl Into<String>, content: Document) -> Self {
        Self {
            title: title.into(),
            content,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommentError {
    #[error("comment text is empty")]
    Empty,
}

/// One comment on an article. Comments are never edited once posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    /// Relative path of the article the comment belongs to
    pub article: String,
}

/// Append-only list of comments for one article, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentThread {
    article: String,
    comments: Vec<Comment>,
}

impl CommentThread {
    pub fn new(article: impl Into<String>) -> Self {
        Self {
            article: article.into(),
            comments: Vec::new(),
        }
    }

    /// Rebuild a thread from stored comments, ordering them by creation time
    pub fn from_comments(article: impl Into<String>, mut comments: Vec<Comment>) -> Self {
        comments.sort_by_key(|comment| comment.created_at);
        Self {
            article: article.into(),
            comments,
        }
    }

    pub fn article(&self) -> &str {
        &self.article
    }

    /// Append a comment stamped with `now`. Blank text is rejected.
    pub fn post(&mut self, text: &str, now: DateTime<Utc>) -> Result<&Comment, CommentError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CommentError::Empty);
        }
        self.comments.push(Comment {
            id: Uuid::new_v4(),
            text: text.to_string(),
            created_at: now,
            article: self.article.clone(),
        });
        Ok(&self.comments[self.comments.len() - 1])
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}
