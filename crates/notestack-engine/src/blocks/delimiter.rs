use serde_json::{Map, Value};

use super::{Block, BlockError, BlockInit, BlockTool, Toolbox};
use crate::view::Surface;

pub const TYPE_KEY: &str = "delimiter";

/// Visual separator; carries no data
pub struct DelimiterTool;

impl BlockTool for DelimiterTool {
    fn type_key(&self) -> &'static str {
        TYPE_KEY
    }

    fn toolbox(&self) -> Toolbox {
        Toolbox {
            title: "Delimiter",
            icon: "***",
        }
    }

    fn is_read_only_supported(&self) -> bool {
        true
    }

    fn construct(&self, _init: BlockInit) -> Result<Box<dyn Block>, BlockError> {
        Ok(Box::new(DelimiterBlock))
    }
}

struct DelimiterBlock;

impl Block for DelimiterBlock {
    fn render(&self) -> Surface {
        Surface::Delimiter
    }

    fn save(&self) -> Result<Value, BlockError> {
        Ok(Value::Object(Map::new()))
    }
}
