use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{
    Block, BlockError, BlockInit, BlockInput, BlockTool, Reaction, Toolbox, decode, encode, replace,
};
use crate::view::Surface;

pub const TYPE_KEY: &str = "list";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    Ordered,
    #[default]
    Unordered,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListData {
    pub style: ListStyle,
    pub items: Vec<String>,
}

pub struct ListTool;

impl BlockTool for ListTool {
    fn type_key(&self) -> &'static str {
        TYPE_KEY
    }

    fn toolbox(&self) -> Toolbox {
        Toolbox {
            title: "List",
            icon: "•",
        }
    }

    fn is_read_only_supported(&self) -> bool {
        true
    }

    fn default_data(&self) -> Value {
        json!({ "style": "unordered", "items": [""] })
    }

    fn construct(&self, init: BlockInit) -> Result<Box<dyn Block>, BlockError> {
        Ok(Box::new(ListBlock {
            data: decode(TYPE_KEY, init.data)?,
            read_only: init.read_only,
        }))
    }
}

struct ListBlock {
    data: ListData,
    read_only: bool,
}

impl Block for ListBlock {
    fn render(&self) -> Surface {
        Surface::List {
            style: self.data.style,
            items: self.data.items.clone(),
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
            BlockInput::SetItem { index, text } => match self.data.items.get_mut(index) {
                Some(item) => replace(item, text),
                None => Reaction::Ignored,
            },
            BlockInput::InsertItem { index } if index <= self.data.items.len() => {
                self.data.items.insert(index, String::new());
                Reaction::Changed
            }
            BlockInput::RemoveItem { index } if index < self.data.items.len() => {
                self.data.items.remove(index);
                Reaction::Changed
            }
            BlockInput::SetListStyle(style) if style == self.data.style => Reaction::Consumed,
            BlockInput::SetListStyle(style) => {
                self.data.style = style;
                Reaction::Changed
            }
            _ => Reaction::Ignored,
        }
    }

    fn is_empty(&self) -> bool {
        self.data.items.iter().all(|item| item.trim().is_empty())
    }
}
