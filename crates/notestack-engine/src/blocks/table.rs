use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    Block, BlockError, BlockInit, BlockInput, BlockTool, Reaction, TableConfig, Toolbox, decode,
    encode, replace,
};
use crate::view::Surface;

pub const TYPE_KEY: &str = "table";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableData {
    pub with_headings: bool,
    pub content: Vec<Vec<String>>,
}

impl TableData {
    fn blank(rows: usize, cols: usize) -> Self {
        Self {
            with_headings: false,
            content: vec![vec![String::new(); cols]; rows],
        }
    }

    fn width(&self) -> usize {
        self.content.iter().map(Vec::len).max().unwrap_or(0)
    }
}

pub struct TableTool {
    config: TableConfig,
}

impl TableTool {
    pub fn new(config: TableConfig) -> Self {
        Self { config }
    }
}

impl BlockTool for TableTool {
    fn type_key(&self) -> &'static str {
        TYPE_KEY
    }

    fn toolbox(&self) -> Toolbox {
        Toolbox {
            title: "Table",
            icon: "▦",
        }
    }

    fn is_read_only_supported(&self) -> bool {
        true
    }

    fn default_data(&self) -> Value {
        let blank = TableData::blank(self.config.rows, self.config.cols);
        serde_json::to_value(blank).unwrap_or_default()
    }

    fn construct(&self, init: BlockInit) -> Result<Box<dyn Block>, BlockError> {
        Ok(Box::new(TableBlock {
            data: decode(TYPE_KEY, init.data)?,
            default_cols: self.config.cols,
            read_only: init.read_only,
        }))
    }
}

struct TableBlock {
    data: TableData,
    default_cols: usize,
    read_only: bool,
}

impl Block for TableBlock {
    fn render(&self) -> Surface {
        Surface::Table {
            with_headings: self.data.with_headings,
            content: self.data.content.clone(),
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
            BlockInput::SetCell { row, col, text } => {
                match self.data.content.get_mut(row).and_then(|r| r.get_mut(col)) {
                    Some(cell) => replace(cell, text),
                    None => Reaction::Ignored,
                }
            }
            BlockInput::AddRow => {
                let width = match self.data.width() {
                    0 => self.default_cols,
                    width => width,
                };
                self.data.content.push(vec![String::new(); width]);
                Reaction::Changed
            }
            BlockInput::AddColumn => {
                if self.data.content.is_empty() {
                    self.data.content.push(Vec::new());
                }
                for row in &mut self.data.content {
                    row.push(String::new());
                }
                Reaction::Changed
            }
            BlockInput::RemoveRow { index } if index < self.data.content.len() => {
                self.data.content.remove(index);
                Reaction::Changed
            }
            BlockInput::RemoveColumn { index } if index < self.data.width() => {
                for row in &mut self.data.content {
                    if index < row.len() {
                        row.remove(index);
                    }
                }
                Reaction::Changed
            }
            BlockInput::ToggleHeadings => {
                self.data.with_headings = !self.data.with_headings;
                Reaction::Changed
            }
            _ => Reaction::Ignored,
        }
    }

    fn is_empty(&self) -> bool {
        self.data
            .content
            .iter()
            .flatten()
            .all(|cell| cell.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::ApiHandle;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn table(data: Value) -> Box<dyn Block> {
        TableTool::new(TableConfig::default())
            .construct(BlockInit::new(data, ApiHandle::default(), false))
            .unwrap()
    }

    #[test]
    fn test_default_table_uses_configured_size() {
        let tool = TableTool::new(TableConfig::default());
        assert_eq!(
            tool.default_data(),
            json!({
                "withHeadings": false,
                "content": [["", "", ""], ["", "", ""]]
            })
        );
    }

    #[test]
    fn test_empty_object_stays_empty() {
        let block = table(json!({}));
        assert_eq!(
            block.save().unwrap(),
            json!({ "withHeadings": false, "content": [] })
        );
    }

    #[test]
    fn test_cell_and_structure_edits() {
        let mut block = table(json!({
            "withHeadings": true,
            "content": [["Name", "Age"], ["Ada", "36"]]
        }));

        block.apply(BlockInput::SetCell {
            row: 1,
            col: 1,
            text: "37".into(),
        });
        block.apply(BlockInput::AddRow);
        block.apply(BlockInput::RemoveColumn { index: 0 });

        assert_eq!(
            block.save().unwrap(),
            json!({
                "withHeadings": true,
                "content": [["Age"], ["37"], [""]]
            })
        );
    }

    #[test]
    fn test_add_row_to_empty_table_uses_default_width() {
        let mut block = table(json!({}));
        block.apply(BlockInput::AddRow);
        assert_eq!(
            block.save().unwrap(),
            json!({ "withHeadings": false, "content": [["", "", ""]] })
        );
    }

    #[test]
    fn test_cell_outside_grid_is_ignored() {
        let mut block = table(json!({ "content": [["a"]] }));
        assert!(matches!(
            block.apply(BlockInput::SetCell {
                row: 3,
                col: 0,
                text: "x".into()
            }),
            Reaction::Ignored
        ));
    }
}
