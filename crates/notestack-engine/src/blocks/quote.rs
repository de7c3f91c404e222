use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    Block, BlockError, BlockInit, BlockInput, BlockTool, QuoteConfig, Reaction, Toolbox, decode,
    encode, replace,
};
use crate::view::Surface;

pub const TYPE_KEY: &str = "quote";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteData {
    pub text: String,
    pub caption: String,
    pub alignment: Alignment,
}

pub struct QuoteTool {
    config: QuoteConfig,
}

impl QuoteTool {
    pub fn new(config: QuoteConfig) -> Self {
        Self { config }
    }
}

impl BlockTool for QuoteTool {
    fn type_key(&self) -> &'static str {
        TYPE_KEY
    }

    fn toolbox(&self) -> Toolbox {
        Toolbox {
            title: "Quote",
            icon: "❝",
        }
    }

    fn is_read_only_supported(&self) -> bool {
        true
    }

    fn construct(&self, init: BlockInit) -> Result<Box<dyn Block>, BlockError> {
        Ok(Box::new(QuoteBlock {
            data: decode(TYPE_KEY, init.data)?,
            config: self.config.clone(),
            read_only: init.read_only,
        }))
    }
}

struct QuoteBlock {
    data: QuoteData,
    config: QuoteConfig,
    read_only: bool,
}

impl Block for QuoteBlock {
    fn render(&self) -> Surface {
        Surface::Quote {
            text: self.data.text.clone(),
            caption: self.data.caption.clone(),
            alignment: self.data.alignment,
            quote_placeholder: self.config.quote_placeholder.clone(),
            caption_placeholder: self.config.caption_placeholder.clone(),
            editable: !self.read_only,
        }
    }

    fn save(&self) -> Result<Value, BlockError> {
        encode(TYPE_KEY, &self.data)
    }

    fn apply(&mut self, input: BlockInput) -> Reaction {
        if self.read_only {
            return Reaction::Ignored;
        }
        match input {
            BlockInput::SetText(text) => replace(&mut self.data.text, text),
            BlockInput::SetCaption(caption) => replace(&mut self.data.caption, caption),
            BlockInput::SetAlignment(alignment) if alignment == self.data.alignment => {
                Reaction::Consumed
            }
            BlockInput::SetAlignment(alignment) => {
                self.data.alignment = alignment;
                Reaction::Changed
            }
            _ => Reaction::Ignored,
        }
    }

    fn is_empty(&self) -> bool {
        self.data.text.trim().is_empty() && self.data.caption.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::ApiHandle;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_quote_round_trip_with_caption_and_alignment() {
        let data = json!({ "text": "Stay hungry", "caption": "Jobs", "alignment": "center" });
        let block = QuoteTool::new(QuoteConfig::default())
            .construct(BlockInit::new(data.clone(), ApiHandle::default(), false))
            .unwrap();
        assert_eq!(block.save().unwrap(), data);
    }

    #[test]
    fn test_caption_edit() {
        let mut block = QuoteTool::new(QuoteConfig::default())
            .construct(BlockInit::new(json!({}), ApiHandle::default(), false))
            .unwrap();
        block.apply(BlockInput::SetCaption("Anon".into()));
        block.apply(BlockInput::SetAlignment(Alignment::Center));
        assert_eq!(
            block.save().unwrap(),
            json!({ "text": "", "caption": "Anon", "alignment": "center" })
        );
    }
}
