use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{
    Block, BlockError, BlockInit, BlockInput, BlockTool, HeaderConfig, Reaction, Toolbox, decode,
    encode, replace,
};
use crate::view::Surface;

pub const TYPE_KEY: &str = "header";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderData {
    pub text: String,
    pub level: u8,
}

/// Persisted shape with the level left open so the configured default applies
#[derive(Deserialize)]
struct HeaderRecord {
    #[serde(default)]
    text: String,
    level: Option<u8>,
}

pub struct HeaderTool {
    config: HeaderConfig,
}

impl HeaderTool {
    pub fn new(config: HeaderConfig) -> Self {
        Self { config }
    }
}

impl BlockTool for HeaderTool {
    fn type_key(&self) -> &'static str {
        TYPE_KEY
    }

    fn toolbox(&self) -> Toolbox {
        Toolbox {
            title: "Heading",
            icon: "H",
        }
    }

    fn is_read_only_supported(&self) -> bool {
        true
    }

    fn default_data(&self) -> Value {
        json!({ "text": "", "level": self.config.default_level })
    }

    fn construct(&self, init: BlockInit) -> Result<Box<dyn Block>, BlockError> {
        let record: HeaderRecord = decode(TYPE_KEY, init.data)?;
        let level = record.level.unwrap_or(self.config.default_level);
        if !self.config.levels.contains(&level) {
            return Err(BlockError::OutOfRange {
                block_type: TYPE_KEY,
                reason: format!("level {level} is not one of {:?}", self.config.levels),
            });
        }

        Ok(Box::new(HeaderBlock {
            data: HeaderData {
                text: record.text,
                level,
            },
            levels: self.config.levels.clone(),
            read_only: init.read_only,
        }))
    }
}

struct HeaderBlock {
    data: HeaderData,
    levels: Vec<u8>,
    read_only: bool,
}

impl Block for HeaderBlock {
    fn render(&self) -> Surface {
        Surface::Heading {
            level: self.data.level,
            text: self.data.text.clone(),
            levels: self.levels.clone(),
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
            BlockInput::SetLevel(level) if level == self.data.level => Reaction::Consumed,
            BlockInput::SetLevel(level) if self.levels.contains(&level) => {
                self.data.level = level;
                Reaction::Changed
            }
            _ => Reaction::Ignored,
        }
    }

    fn is_empty(&self) -> bool {
        self.data.text.trim().is_empty()
    }
}
