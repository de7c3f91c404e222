//! Link preview block.
//!
//! Two visible states: awaiting input (an input that accepts a pasted URL)
//! and resolved (a preview card). Pasting a URL spawns a
//! [`Task::FetchPreview`]; the block keeps showing the input until the host
//! completes the request. A failed fetch leaves the block awaiting input so
//! the user can paste again.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use super::{
    ApiEvent, ApiHandle, Block, BlockError, BlockInit, BlockInput, BlockTool, LinkPreviewConfig,
    Liveness, Reaction, Task, Toolbox, decode, encode, null_as_default,
};
use crate::view::Surface;

pub const TYPE_KEY: &str = "linkPreview";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageRef {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

/// Saved record. Fields the preview service left `null` load as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkPreviewData {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image: ImageRef,
}

/// Metadata returned by the preview endpoint. Missing fields are tolerated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LinkMetadata {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<ImageRef>,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("preview endpoint answered with status {0}")]
    Status(u16),
    #[error("preview endpoint rejected the URL: {0}")]
    Rejected(String),
    #[error("no metadata in response")]
    NoMetadata,
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct MicrolinkResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<LinkMetadata>,
}

/// Parse a microlink-style response body: `{ "status": "success", "data": { ... } }`
pub fn parse_metadata_response(body: &str) -> Result<LinkMetadata, FetchError> {
    let response: MicrolinkResponse = serde_json::from_str(body)?;
    if let Some(status) = response.status.as_deref()
        && status != "success"
    {
        return Err(FetchError::Rejected(
            response.message.unwrap_or_else(|| status.to_string()),
        ));
    }
    response.data.ok_or(FetchError::NoMetadata)
}

#[derive(Debug, Default)]
struct PreviewState {
    data: LinkPreviewData,
    /// URL whose metadata is in flight
    pending: Option<String>,
}

pub struct LinkPreviewTool {
    config: LinkPreviewConfig,
}

impl LinkPreviewTool {
    pub fn new(config: LinkPreviewConfig) -> Self {
        Self { config }
    }
}

impl BlockTool for LinkPreviewTool {
    fn type_key(&self) -> &'static str {
        TYPE_KEY
    }

    fn toolbox(&self) -> Toolbox {
        Toolbox {
            title: "Link Preview",
            icon: "🔗",
        }
    }

    fn is_read_only_supported(&self) -> bool {
        true
    }

    fn construct(&self, init: BlockInit) -> Result<Box<dyn Block>, BlockError> {
        let data = decode(TYPE_KEY, init.data)?;
        Ok(Box::new(LinkPreviewBlock {
            state: Rc::new(RefCell::new(PreviewState {
                data,
                pending: None,
            })),
            liveness: Liveness::new(),
            api: init.api,
            config: self.config.clone(),
            read_only: init.read_only,
        }))
    }
}

struct LinkPreviewBlock {
    state: Rc<RefCell<PreviewState>>,
    liveness: Liveness,
    api: ApiHandle,
    config: LinkPreviewConfig,
    read_only: bool,
}

impl LinkPreviewBlock {
    fn paste(&mut self, text: String) -> Reaction {
        let text = text.trim();
        let url = match Url::parse(text) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => url,
            _ => {
                log::debug!("Ignoring pasted text that is not a web URL: {text:?}");
                return Reaction::Ignored;
            }
        };

        let mut state = self.state.borrow_mut();
        if !state.data.url.is_empty() {
            return Reaction::Ignored;
        }
        state.pending = Some(text.to_string());

        Reaction::Spawn(Task::FetchPreview(PreviewRequest {
            url: text.to_string(),
            parsed: url,
            endpoint: self.config.endpoint.clone(),
            state: Rc::clone(&self.state),
            liveness: self.liveness.clone(),
            api: self.api.clone(),
        }))
    }
}

impl Block for LinkPreviewBlock {
    fn render(&self) -> Surface {
        let state = self.state.borrow();
        let data = &state.data;
        if !data.url.is_empty() {
            Surface::LinkCard {
                url: data.url.clone(),
                title: data.title.clone(),
                description: data.description.clone(),
                image: Some(data.image.url.clone()).filter(|url| !url.is_empty()),
            }
        } else if self.read_only {
            Surface::Empty
        } else {
            Surface::LinkInput {
                placeholder: self.config.placeholder.clone(),
                pending_url: state.pending.clone(),
            }
        }
    }

    fn save(&self) -> Result<Value, BlockError> {
        encode(TYPE_KEY, &self.state.borrow().data)
    }

    fn apply(&mut self, input: BlockInput) -> Reaction {
        match input {
            BlockInput::PasteUrl(text) if !self.read_only => self.paste(text),
            _ => Reaction::Ignored,
        }
    }

    fn is_empty(&self) -> bool {
        let state = self.state.borrow();
        state.data.url.is_empty() && state.pending.is_none()
    }

    fn destroy(&mut self) {
        self.liveness.revoke();
    }
}

/// Metadata fetch spawned by a pasted URL.
///
/// The host performs the HTTP request and hands the outcome to
/// [`PreviewRequest::complete`] on the UI thread.
pub struct PreviewRequest {
    url: String,
    parsed: Url,
    endpoint: String,
    state: Rc<RefCell<PreviewState>>,
    liveness: Liveness,
    api: ApiHandle,
}

impl PreviewRequest {
    /// The URL as pasted
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_live(&self) -> bool {
        self.liveness.is_alive()
    }

    /// Endpoint URL with the pasted URL as its `url` query parameter
    pub fn endpoint_url(&self) -> Result<Url, url::ParseError> {
        Url::parse_with_params(&self.endpoint, &[("url", self.parsed.as_str())])
    }

    /// Apply the fetch outcome. Returns `true` when the block's data changed.
    /// Completing a request whose block is gone does nothing.
    pub fn complete(self, outcome: Result<LinkMetadata, FetchError>) -> bool {
        if !self.liveness.is_alive() {
            log::debug!("Dropping preview for {} - block no longer mounted", self.url);
            return false;
        }

        let mut state = self.state.borrow_mut();
        if state.pending.as_deref() != Some(self.url.as_str()) {
            log::debug!("Dropping stale preview for {}", self.url);
            return false;
        }
        state.pending = None;

        match outcome {
            Ok(metadata) => {
                state.data = LinkPreviewData {
                    url: metadata.url.unwrap_or_else(|| self.url.clone()),
                    title: metadata.title.unwrap_or_default(),
                    description: metadata.description.unwrap_or_default(),
                    image: metadata.image.unwrap_or_default(),
                };
                drop(state);
                self.api
                    .report(TYPE_KEY, ApiEvent::PreviewResolved { url: self.url });
                true
            }
            Err(e) => {
                drop(state);
                log::warn!("Failed to fetch preview for {}: {e}", self.url);
                self.api.report(
                    TYPE_KEY,
                    ApiEvent::PreviewFailed {
                        url: self.url,
                        reason: e.to_string(),
                    },
                );
                false
            }
        }
    }
}

impl fmt::Debug for PreviewRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewRequest")
            .field("url", &self.url)
            .field("live", &self.liveness.is_alive())
            .finish()
    }
}
