//! Framework-neutral description of rendered blocks.
//!
//! Blocks never touch a UI toolkit. `Block::render` returns a [`Surface`] and
//! each host (desktop, terminal) decides how to draw it. Editable surfaces
//! carry `editable: true`; read-only sessions only ever produce
//! `editable: false`.

use crate::blocks::{Alignment, Language, ListStyle};

/// Rendered form of one block
#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    Paragraph {
        text: String,
        placeholder: String,
        editable: bool,
    },
    Heading {
        level: u8,
        text: String,
        /// Levels offered by the level picker
        levels: Vec<u8>,
        editable: bool,
    },
    List {
        style: ListStyle,
        items: Vec<String>,
        editable: bool,
    },
    Quote {
        text: String,
        caption: String,
        alignment: Alignment,
        quote_placeholder: String,
        caption_placeholder: String,
        editable: bool,
    },
    Delimiter,
    Code(CodeSurface),
    Table {
        with_headings: bool,
        content: Vec<Vec<String>>,
        editable: bool,
    },
    Image {
        /// `None` until a file has been picked and read
        src: Option<String>,
        caption: String,
        loading: bool,
        with_border: bool,
        stretched: bool,
        with_background: bool,
        editable: bool,
    },
    /// Link preview awaiting a pasted URL
    LinkInput {
        placeholder: String,
        /// URL whose metadata is being fetched
        pending_url: Option<String>,
    },
    LinkCard {
        url: String,
        title: String,
        description: String,
        image: Option<String>,
    },
    Embed {
        kind: EmbedKind,
        title: Option<String>,
        /// URL as the user typed it
        url: String,
        /// URL handed to the iframe or audio element
        src: String,
        editable: bool,
    },
    /// Nothing to show (e.g. an unresolved link preview in read-only mode)
    Empty,
    /// Stand-in for a block that could not be mounted
    Error { block_type: String, message: String },
}

/// Code widget description.
///
/// `widget_key` changes whenever the language changes so hosts recreate the
/// widget rather than reconfigure it in place.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeSurface {
    pub generation: u64,
    pub language: Language,
    pub languages: &'static [Language],
    pub code: String,
    pub placeholder: String,
    pub worker_url: String,
    pub editable: bool,
}

impl CodeSurface {
    pub fn widget_key(&self) -> String {
        format!("{}-{}", self.generation, self.language.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedKind {
    Webview,
    Mega,
    Audio,
}

impl EmbedKind {
    /// Frame height in pixels; audio uses native controls
    pub fn height(&self) -> Option<u32> {
        match self {
            EmbedKind::Webview => Some(600),
            EmbedKind::Mega => Some(300),
            EmbedKind::Audio => None,
        }
    }
}

/// A rendered block together with its position in the document
#[derive(Debug, Clone, PartialEq)]
pub struct BlockView {
    pub index: usize,
    pub id: Option<String>,
    pub block_type: String,
    pub surface: Surface,
}
