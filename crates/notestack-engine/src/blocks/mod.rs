/*!
 * # Block Contract
 *
 * Every content block type is split in two halves:
 *
 * - a **`BlockTool`**: the static side, registered once in the
 *   [`BlockRegistry`](crate::registry::BlockRegistry). It knows the type key,
 *   toolbox entry, capability flags and how to construct live instances.
 * - a **`Block`**: one live, mounted instance owned by an
 *   [`EditorSession`](crate::editing::EditorSession). It holds the editable
 *   state, renders a [`Surface`] and saves back to a plain JSON data record.
 *
 * ## Data records
 *
 * Each tool keeps its persisted shape in a serde struct (`HeaderData`,
 * `CodeData`, ...). `construct` decodes the record, `save` encodes it again,
 * so `load(save(data)) == data` holds for every well-formed record.
 * Runtime-only state (pending fetches, liveness) never enters the record.
 *
 * ## Async work
 *
 * Blocks never block on IO. A block that needs the network or the file system
 * answers an input with [`Reaction::Spawn`] carrying a [`Task`]; the host runs
 * it and completes it later. Tasks hold the block's [`Liveness`] flag so a
 * result arriving after destroy is dropped.
 */

mod api;
mod config;
mod liveness;

pub mod code;
pub mod delimiter;
pub mod embed;
pub mod header;
pub mod image;
pub mod link_preview;
pub mod list;
pub mod paragraph;
pub mod quote;
pub mod table;

use serde::{Deserialize, Deserializer, Serialize};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::PathBuf;

use crate::view::Surface;

pub use api::{ApiEvent, ApiHandle, BlockApi};
pub use code::Language;
pub use config::{
    CodeConfig, HeaderConfig, LinkPreviewConfig, ParagraphConfig, QuoteConfig, TableConfig,
    ToolConfig,
};
pub use image::FileRequest;
pub use link_preview::{LinkMetadata, PreviewRequest};
pub use list::ListStyle;
pub use liveness::Liveness;
pub use quote::Alignment;

/// Errors raised by a block while decoding or encoding its data record
#[derive(Debug, thiserror::Error)]
pub enum BlockError {
    #[error("invalid {block_type} data: {source}")]
    InvalidData {
        block_type: &'static str,
        source: serde_json::Error,
    },
    #[error("invalid {block_type} data: {reason}")]
    OutOfRange {
        block_type: &'static str,
        reason: String,
    },
    #[error("failed to encode {block_type} data: {source}")]
    Encode {
        block_type: &'static str,
        source: serde_json::Error,
    },
}

/// Toolbox entry shown when the user picks a block type to insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toolbox {
    pub title: &'static str,
    pub icon: &'static str,
}

/// Arguments handed to [`BlockTool::construct`]
#[derive(Clone)]
pub struct BlockInit {
    /// Previously saved data record, or the tool's default record for new blocks
    pub data: Value,
    /// Opaque handle passed through from the session
    pub api: ApiHandle,
    pub read_only: bool,
}

impl BlockInit {
    pub fn new(data: Value, api: ApiHandle, read_only: bool) -> Self {
        Self {
            data,
            api,
            read_only,
        }
    }
}

/// Static side of a block type. Implementations are shared read-only between
/// every session using the registry.
pub trait BlockTool: Send + Sync {
    /// Key stored in the `type` field of persisted blocks
    fn type_key(&self) -> &'static str;

    fn toolbox(&self) -> Toolbox;

    /// Whether instances may be mounted with `read_only = true`
    fn is_read_only_supported(&self) -> bool {
        false
    }

    /// Whether Enter inside the block stays in the block instead of creating a new one
    fn enable_line_breaks(&self) -> bool {
        false
    }

    /// Data record used when the user inserts a fresh block
    fn default_data(&self) -> Value {
        Value::Object(Map::new())
    }

    /// Build a live instance. Must succeed for an empty object.
    fn construct(&self, init: BlockInit) -> Result<Box<dyn Block>, BlockError>;
}

/// A live block instance.
pub trait Block {
    /// Describe the block for the host to draw. Pure query.
    fn render(&self) -> Surface;

    /// Current persistable data record. Pure query.
    fn save(&self) -> Result<Value, BlockError>;

    /// Handle one editing interaction
    fn apply(&mut self, input: BlockInput) -> Reaction {
        let _ = input;
        Reaction::Ignored
    }

    /// Empty blocks are removed by Backspace
    fn is_empty(&self) -> bool {
        false
    }

    /// Release sub-resources. Called once per instance, safe to call again.
    fn destroy(&mut self) {}
}

/// Keys the document level cares about; everything else is `Character`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Tab,
    Escape,
    ArrowUp,
    ArrowDown,
    Character(char),
}

/// One editing interaction addressed to a block
#[derive(Debug, Clone, PartialEq)]
pub enum BlockInput {
    SetText(String),
    SetCaption(String),
    SetTitle(String),
    SetUrl(String),
    SetLevel(u8),
    SetAlignment(Alignment),
    SetListStyle(ListStyle),
    SetItem { index: usize, text: String },
    InsertItem { index: usize },
    RemoveItem { index: usize },
    SetCell { row: usize, col: usize, text: String },
    AddRow,
    AddColumn,
    RemoveRow { index: usize },
    RemoveColumn { index: usize },
    ToggleHeadings,
    SetCode(String),
    SelectLanguage(Language),
    PasteUrl(String),
    PickFile(PathBuf),
    Key(Key),
}

/// What a block did with an input
#[derive(Debug)]
pub enum Reaction {
    /// Not handled; keys fall through to document-level handling
    Ignored,
    /// Handled without touching the data record
    Consumed,
    /// The data record changed
    Changed,
    /// Work for the host to run; the record is unchanged until it completes
    Spawn(Task),
}

/// Asynchronous work produced by a block
#[derive(Debug)]
pub enum Task {
    FetchPreview(PreviewRequest),
    ReadFile(FileRequest),
}

impl Task {
    /// Whether the block that produced this task is still mounted
    pub fn is_live(&self) -> bool {
        match self {
            Task::FetchPreview(request) => request.is_live(),
            Task::ReadFile(request) => request.is_live(),
        }
    }
}

pub(crate) fn decode<T: DeserializeOwned>(
    block_type: &'static str,
    data: Value,
) -> Result<T, BlockError> {
    serde_json::from_value(data).map_err(|source| BlockError::InvalidData { block_type, source })
}

pub(crate) fn encode<T: Serialize>(block_type: &'static str, data: &T) -> Result<Value, BlockError> {
    serde_json::to_value(data).map_err(|source| BlockError::Encode { block_type, source })
}

/// Deserialize a `null` field as its default value
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Replace a text field, reporting whether anything changed
pub(crate) fn replace(field: &mut String, value: String) -> Reaction {
    if *field == value {
        Reaction::Consumed
    } else {
        *field = value;
        Reaction::Changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Sample {
        text: String,
    }

    #[test]
    fn test_decode_empty_object_uses_defaults() {
        let sample: Sample = decode("sample", json!({})).unwrap();
        assert_eq!(sample, Sample::default());
    }

    #[test]
    fn test_decode_wrong_field_type_is_invalid_data() {
        let result: Result<Sample, _> = decode("sample", json!({ "text": 42 }));
        assert!(matches!(
            result,
            Err(BlockError::InvalidData {
                block_type: "sample",
                ..
            })
        ));
    }

    #[test]
    fn test_replace_reports_change_only_when_different() {
        let mut field = "same".to_string();
        assert!(matches!(
            replace(&mut field, "same".to_string()),
            Reaction::Consumed
        ));
        assert!(matches!(
            replace(&mut field, "other".to_string()),
            Reaction::Changed
        ));
        assert_eq!(field, "other");
    }
}
