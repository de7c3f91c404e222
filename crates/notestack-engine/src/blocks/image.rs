//! Image block.
//!
//! The image is either a remote URL or a local file embedded as a base64 data
//! URL. Picking a local file spawns a [`Task::ReadFile`]; the host reads the
//! file to completion and hands the bytes back through
//! [`FileRequest::complete`].

use std::cell::RefCell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    ApiEvent, ApiHandle, Block, BlockError, BlockInit, BlockInput, BlockTool, Liveness, Reaction,
    Task, Toolbox, decode, encode, replace,
};
use crate::view::Surface;

pub const TYPE_KEY: &str = "image";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRef {
    pub url: String,
}

/// Optional fields remember whether they were present, so a record saved
/// with `"caption": ""` or `"withBorder": false` is written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageData {
    pub file: FileRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_border: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stretched: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_background: Option<bool>,
}

impl ImageData {
    fn set_caption(&mut self, caption: String) -> Reaction {
        match &mut self.caption {
            Some(current) => replace(current, caption),
            None if caption.is_empty() => Reaction::Consumed,
            None => {
                self.caption = Some(caption);
                Reaction::Changed
            }
        }
    }
}

/// Encode file contents as a `data:` URL, guessing the media type from the extension
pub fn data_url(path: &Path, bytes: &[u8]) -> String {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let mime = match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    };
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{encoded}")
}

#[derive(Debug, Default)]
struct ImageState {
    data: ImageData,
    /// File being read
    loading: Option<PathBuf>,
}

pub struct ImageTool;

impl BlockTool for ImageTool {
    fn type_key(&self) -> &'static str {
        TYPE_KEY
    }

    fn toolbox(&self) -> Toolbox {
        Toolbox {
            title: "Image",
            icon: "🖼",
        }
    }

    fn is_read_only_supported(&self) -> bool {
        true
    }

    fn construct(&self, init: BlockInit) -> Result<Box<dyn Block>, BlockError> {
        let data = decode(TYPE_KEY, init.data)?;
        Ok(Box::new(ImageBlock {
            state: Rc::new(RefCell::new(ImageState {
                data,
                loading: None,
            })),
            liveness: Liveness::new(),
            api: init.api,
            read_only: init.read_only,
        }))
    }
}

struct ImageBlock {
    state: Rc<RefCell<ImageState>>,
    liveness: Liveness,
    api: ApiHandle,
    read_only: bool,
}

impl Block for ImageBlock {
    fn render(&self) -> Surface {
        let state = self.state.borrow();
        let data = &state.data;
        Surface::Image {
            src: Some(data.file.url.clone()).filter(|url| !url.is_empty()),
            caption: data.caption.clone().unwrap_or_default(),
            loading: state.loading.is_some(),
            with_border: data.with_border.unwrap_or(false),
            stretched: data.stretched.unwrap_or(false),
            with_background: data.with_background.unwrap_or(false),
            editable: !self.read_only,
        }
    }

    fn save(&self) -> Result<Value, BlockError> {
        encode(TYPE_KEY, &self.state.borrow().data)
    }

    fn apply(&mut self, input: BlockInput) -> Reaction {
        if self.read_only {
            return Reaction::Ignored;
        }
        let mut state = self.state.borrow_mut();
        match input {
            BlockInput::SetCaption(caption) => state.data.set_caption(caption),
            BlockInput::SetUrl(url) => replace(&mut state.data.file.url, url),
            BlockInput::PickFile(path) => {
                state.loading = Some(path.clone());
                Reaction::Spawn(Task::ReadFile(FileRequest {
                    path,
                    state: Rc::clone(&self.state),
                    liveness: self.liveness.clone(),
                    api: self.api.clone(),
                }))
            }
            _ => Reaction::Ignored,
        }
    }

    fn is_empty(&self) -> bool {
        let state = self.state.borrow();
        state.data.file.url.is_empty() && state.loading.is_none()
    }

    fn destroy(&mut self) {
        self.liveness.revoke();
    }
}

/// Local file read spawned by picking a file
pub struct FileRequest {
    path: PathBuf,
    state: Rc<RefCell<ImageState>>,
    liveness: Liveness,
    api: ApiHandle,
}

impl FileRequest {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_live(&self) -> bool {
        self.liveness.is_alive()
    }

    /// Apply the read outcome. Returns `true` when the block's data changed.
    /// Completing a request whose block is gone does nothing.
    pub fn complete(self, outcome: std::io::Result<Vec<u8>>) -> bool {
        if !self.liveness.is_alive() {
            log::debug!(
                "Dropping file read for {} - block no longer mounted",
                self.path.display()
            );
            return false;
        }

        let mut state = self.state.borrow_mut();
        if state.loading.as_deref() != Some(self.path.as_path()) {
            log::debug!("Dropping stale file read for {}", self.path.display());
            return false;
        }
        state.loading = None;

        let name = self.path.display().to_string();
        match outcome {
            Ok(bytes) => {
                state.data.file.url = data_url(&self.path, &bytes);
                drop(state);
                self.api.report(
                    TYPE_KEY,
                    ApiEvent::FileLoaded {
                        name,
                        bytes: bytes.len(),
                    },
                );
                true
            }
            Err(e) => {
                drop(state);
                log::warn!("Failed to read image {name}: {e}");
                self.api.report(
                    TYPE_KEY,
                    ApiEvent::FileFailed {
                        name,
                        reason: e.to_string(),
                    },
                );
                false
            }
        }
    }
}

impl fmt::Debug for FileRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileRequest")
            .field("path", &self.path)
            .field("live", &self.liveness.is_alive())
            .finish()
    }
}
