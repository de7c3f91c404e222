use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    Block, BlockError, BlockInit, BlockInput, BlockTool, ParagraphConfig, Reaction, Toolbox,
    decode, encode, replace,
};
use crate::view::Surface;

pub const TYPE_KEY: &str = "paragraph";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphData {
    pub text: String,
}

pub struct ParagraphTool {
    config: ParagraphConfig,
}

impl ParagraphTool {
    pub fn new(config: ParagraphConfig) -> Self {
        Self { config }
    }
}

impl BlockTool for ParagraphTool {
    fn type_key(&self) -> &'static str {
        TYPE_KEY
    }

    fn toolbox(&self) -> Toolbox {
        Toolbox {
            title: "Text",
            icon: "¶",
        }
    }

    fn is_read_only_supported(&self) -> bool {
        true
    }

    fn construct(&self, init: BlockInit) -> Result<Box<dyn Block>, BlockError> {
        Ok(Box::new(ParagraphBlock {
            data: decode(TYPE_KEY, init.data)?,
            placeholder: self.config.placeholder.clone(),
            read_only: init.read_only,
        }))
    }
}

struct ParagraphBlock {
    data: ParagraphData,
    placeholder: String,
    read_only: bool,
}

impl Block for ParagraphBlock {
    fn render(&self) -> Surface {
        Surface::Paragraph {
            text: self.data.text.clone(),
            placeholder: self.placeholder.clone(),
            editable: !self.read_only,
        }
    }

    fn save(&self) -> Result<Value, BlockError> {
        encode(TYPE_KEY, &self.data)
    }

    fn apply(&mut self, input: BlockInput) -> Reaction {
        match input {
            BlockInput::SetText(text) if !self.read_only => replace(&mut self.data.text, text),
            _ => Reaction::Ignored,
        }
    }

    fn is_empty(&self) -> bool {
        self.data.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::ApiHandle;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn paragraph(data: Value, read_only: bool) -> Box<dyn Block> {
        ParagraphTool::new(ParagraphConfig::default())
            .construct(BlockInit::new(data, ApiHandle::default(), read_only))
            .unwrap()
    }

    #[test]
    fn test_empty_paragraph_saves_empty_text() {
        let block = paragraph(json!({}), false);
        assert_eq!(block.save().unwrap(), json!({ "text": "" }));
        assert!(block.is_empty());
    }

    #[test]
    fn test_set_text_changes_record() {
        let mut block = paragraph(json!({ "text": "Hello" }), false);
        assert!(matches!(
            block.apply(BlockInput::SetText("Hello world".into())),
            Reaction::Changed
        ));
        assert_eq!(block.save().unwrap(), json!({ "text": "Hello world" }));
    }

    #[test]
    fn test_read_only_ignores_edits() {
        let mut block = paragraph(json!({ "text": "Fixed" }), true);
        assert!(matches!(
            block.apply(BlockInput::SetText("Changed".into())),
            Reaction::Ignored
        ));
        assert_eq!(
            block.render(),
            Surface::Paragraph {
                text: "Fixed".into(),
                placeholder: "Start writing...".into(),
                editable: false,
            }
        );
    }
}
