use crate::document::{DocumentError, parse_document};
use crate::models::{Article, ArticleFile, ArticleIndex, Comment, CommentThread};
use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid notes directory: {0}")]
    InvalidNotesDir(String),
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid article {path}: {source}")]
    Document {
        path: PathBuf,
        source: DocumentError,
    },
}

/// Read an article. Block types are checked later, when the content is mounted.
pub fn read_article(relative_path: &RelativePath, notes_root: &Path) -> Result<Article, IoError> {
    let absolute_path = relative_path.to_path(notes_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    let raw = fs::read_to_string(&absolute_path)?;
    let mut value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|source| IoError::Json {
            path: absolute_path.clone(),
            source,
        })?;

    let title = value
        .get("title")
        .and_then(|title| title.as_str())
        .unwrap_or_default()
        .to_string();
    let content = match value.get_mut("content") {
        Some(content) => parse_document(content.take()).map_err(|source| {
            IoError::Document {
                path: absolute_path.clone(),
                source,
            }
        })?,
        None => Default::default(),
    };

    Ok(Article::new(title, content))
}

/// Write an article, creating parent directories as needed
pub fn write_article(
    relative_path: &RelativePath,
    notes_root: &Path,
    article: &Article,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(notes_root);
    let json = serde_json::to_string_pretty(article).map_err(|source| IoError::Json {
        path: absolute_path.clone(),
        source,
    })?;
    write_file(&absolute_path, &json)
}

/// Read the comments stored next to an article. No sidecar means no comments.
pub fn read_comments(article: &ArticleFile, notes_root: &Path) -> Result<CommentThread, IoError> {
    let absolute_path = article.comments_path().to_path(notes_root);
    let key = article.relative_path().as_str();
    if !absolute_path.exists() {
        return Ok(CommentThread::new(key));
    }
    let raw = fs::read_to_string(&absolute_path)?;
    let comments: Vec<Comment> = serde_json::from_str(&raw).map_err(|source| IoError::Json {
        path: absolute_path.clone(),
        source,
    })?;
    Ok(CommentThread::from_comments(key, comments))
}

/// Persist a comment thread to the article's sidecar file
pub fn write_comments(
    article: &ArticleFile,
    notes_root: &Path,
    thread: &CommentThread,
) -> Result<(), IoError> {
    let absolute_path = article.comments_path().to_path(notes_root);
    let json = serde_json::to_string_pretty(thread.comments()).map_err(|source| IoError::Json {
        path: absolute_path.clone(),
        source,
    })?;
    write_file(&absolute_path, &json)
}

fn write_file(absolute_path: &Path, content: &str) -> Result<(), IoError> {
    // Create parent directories if they don't exist
    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(absolute_path, content).map_err(IoError::Io)
}

/// Scan for article files in the notes directory, skipping comment sidecars
pub fn scan_articles(notes_root: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !notes_root.exists() {
        return Err(IoError::InvalidNotesDir(
            "notes directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(notes_root, &mut files)?;
    files.sort();
    Ok(files)
}

/// Build the article index from files in the notes directory
pub fn build_article_index(notes_root: &Path) -> Result<ArticleIndex, IoError> {
    let files = scan_articles(notes_root)?;

    let mut index = ArticleIndex::new();
    index.add_all(files.iter().filter_map(|path| {
        let relative = path.strip_prefix(notes_root).ok()?;
        RelativePathBuf::from_path(relative)
            .ok()
            .map(ArticleFile::new)
    }));
    Ok(index)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(name) = path.file_name().and_then(|name| name.to_str())
            && ArticleFile::is_article_name(name)
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_notes_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidNotesDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}
