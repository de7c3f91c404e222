//! Embedded external content: web pages, MEGA folders and Dropbox audio.
//!
//! The three tools share one block implementation and differ only in their
//! type key, whether they carry a title, and how the typed URL maps to the
//! source handed to the host.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{
    Block, BlockError, BlockInit, BlockInput, BlockTool, Reaction, Toolbox, decode, encode, replace,
};
use crate::view::{EmbedKind, Surface};

pub const WEBVIEW_TYPE_KEY: &str = "webview";
pub const MEGA_TYPE_KEY: &str = "megaEmbed";
pub const AUDIO_TYPE_KEY: &str = "dropboxAudio";

/// Rewrite a Dropbox share link into a direct download link
pub fn convert_dropbox_link(url: &str) -> String {
    if url.contains("dropbox.com") {
        url.replace("www.dropbox.com", "dl.dropboxusercontent.com")
            .replace("?dl=0", "")
    } else {
        url.to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub url: String,
}

pub struct EmbedTool {
    kind: EmbedKind,
}

impl EmbedTool {
    pub fn webview() -> Self {
        Self {
            kind: EmbedKind::Webview,
        }
    }

    pub fn mega() -> Self {
        Self {
            kind: EmbedKind::Mega,
        }
    }

    pub fn dropbox_audio() -> Self {
        Self {
            kind: EmbedKind::Audio,
        }
    }

    fn has_title(&self) -> bool {
        !matches!(self.kind, EmbedKind::Mega)
    }
}

impl BlockTool for EmbedTool {
    fn type_key(&self) -> &'static str {
        match self.kind {
            EmbedKind::Webview => WEBVIEW_TYPE_KEY,
            EmbedKind::Mega => MEGA_TYPE_KEY,
            EmbedKind::Audio => AUDIO_TYPE_KEY,
        }
    }

    fn toolbox(&self) -> Toolbox {
        match self.kind {
            EmbedKind::Webview => Toolbox {
                title: "Webview",
                icon: "🌐",
            },
            EmbedKind::Mega => Toolbox {
                title: "MEGA Embed",
                icon: "📂",
            },
            EmbedKind::Audio => Toolbox {
                title: "Dropbox Audio",
                icon: "🎵",
            },
        }
    }

    fn is_read_only_supported(&self) -> bool {
        true
    }

    fn default_data(&self) -> Value {
        if self.has_title() {
            json!({ "title": "", "url": "" })
        } else {
            json!({ "url": "" })
        }
    }

    fn construct(&self, init: BlockInit) -> Result<Box<dyn Block>, BlockError> {
        let mut data: EmbedData = decode(self.type_key(), init.data)?;
        data.title = if self.has_title() {
            Some(data.title.unwrap_or_default())
        } else {
            None
        };
        Ok(Box::new(EmbedBlock {
            kind: self.kind,
            type_key: self.type_key(),
            data,
            read_only: init.read_only,
        }))
    }
}

struct EmbedBlock {
    kind: EmbedKind,
    type_key: &'static str,
    data: EmbedData,
    read_only: bool,
}

impl Block for EmbedBlock {
    fn render(&self) -> Surface {
        let src = match self.kind {
            EmbedKind::Audio => convert_dropbox_link(&self.data.url),
            EmbedKind::Webview | EmbedKind::Mega => self.data.url.clone(),
        };
        Surface::Embed {
            kind: self.kind,
            title: self.data.title.clone(),
            url: self.data.url.clone(),
            src,
            editable: !self.read_only,
        }
    }

    fn save(&self) -> Result<Value, BlockError> {
        encode(self.type_key, &self.data)
    }

    fn apply(&mut self, input: BlockInput) -> Reaction {
        if self.read_only {
            return Reaction::Ignored;
        }
        match input {
            BlockInput::SetUrl(url) => replace(&mut self.data.url, url),
            BlockInput::SetTitle(title) => match self.data.title.as_mut() {
                Some(current) => replace(current, title),
                None => Reaction::Ignored,
            },
            _ => Reaction::Ignored,
        }
    }

    fn is_empty(&self) -> bool {
        self.data.url.trim().is_empty()
            && self
                .data
                .title
                .as_deref()
                .is_none_or(|title| title.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::ApiHandle;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn mount(tool: &EmbedTool, data: Value, read_only: bool) -> Box<dyn Block> {
        tool.construct(BlockInit::new(data, ApiHandle::default(), read_only))
            .unwrap()
    }

    #[rstest]
    #[case(
        "https://www.dropbox.com/s/abc/song.mp3?dl=0",
        "https://dl.dropboxusercontent.com/s/abc/song.mp3"
    )]
    #[case("https://example.com/song.mp3", "https://example.com/song.mp3")]
    fn test_convert_dropbox_link(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(convert_dropbox_link(input), expected);
    }

    #[test]
    fn test_audio_renders_direct_link_but_saves_typed_url() {
        let data = json!({ "title": "Demo", "url": "https://www.dropbox.com/s/x/a.mp3?dl=0" });
        let block = mount(&EmbedTool::dropbox_audio(), data.clone(), true);

        assert_eq!(block.save().unwrap(), data);
        match block.render() {
            Surface::Embed { src, editable, .. } => {
                assert_eq!(src, "https://dl.dropboxusercontent.com/s/x/a.mp3");
                assert!(!editable);
            }
            other => panic!("expected embed surface, got {other:?}"),
        }
    }

    #[test]
    fn test_mega_has_no_title() {
        let mut block = mount(&EmbedTool::mega(), json!({ "url": "https://mega.nz/x" }), false);
        assert!(matches!(
            block.apply(BlockInput::SetTitle("ignored".into())),
            Reaction::Ignored
        ));
        assert_eq!(block.save().unwrap(), json!({ "url": "https://mega.nz/x" }));
    }

    #[test]
    fn test_webview_empty_object_saves_both_fields() {
        let mut block = mount(&EmbedTool::webview(), json!({}), false);
        assert!(block.is_empty());
        block.apply(BlockInput::SetUrl("https://example.com".into()));
        assert_eq!(
            block.save().unwrap(),
            json!({ "title": "", "url": "https://example.com" })
        );
    }

    #[test]
    fn test_frame_heights() {
        assert_eq!(EmbedKind::Webview.height(), Some(600));
        assert_eq!(EmbedKind::Mega.height(), Some(300));
        assert_eq!(EmbedKind::Audio.height(), None);
    }
}
