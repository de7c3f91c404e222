use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::registry::BlockRegistry;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("block {index} has unknown type '{block_type}'")]
    UnknownBlockType { index: usize, block_type: String },
    #[error("block {index} ({block_type}) data is not an object")]
    InvalidBlockData { index: usize, block_type: String },
    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One persisted block: `{ "id"?, "type", "data" }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default = "empty_object")]
    pub data: Value,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

impl BlockRecord {
    pub fn new(block_type: impl Into<String>, data: Value) -> Self {
        Self {
            id: None,
            block_type: block_type.into(),
            data,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Ordered list of blocks making up one article's content.
///
/// A `Document` is a plain value: it holds no live block instances and can be
/// cloned, compared and persisted freely. Insertion order is reading order.
///
/// ```rust
/// # use notestack_engine::{BlockRegistry, Document, ToolConfig};
/// # use serde_json::json;
/// let registry = BlockRegistry::standard(&ToolConfig::default());
/// let doc = Document::from_json_str(
///     r#"{"blocks":[{"type":"header","data":{"text":"Hi","level":2}}]}"#,
///     &registry,
/// )
/// .unwrap()
/// .append_block("paragraph", json!({ "text": "Body" }));
///
/// assert_eq!(doc.len(), 2);
/// assert_eq!(doc.blocks[1].block_type, "paragraph");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<BlockRecord>,
}

impl Document {
    pub fn new(blocks: Vec<BlockRecord>) -> Self {
        Self { blocks }
    }

    /// Parse and validate a document from JSON text
    pub fn from_json_str(raw: &str, registry: &BlockRegistry) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_str(raw)?;
        load_document(value, registry)
    }

    /// Insert a block at the end
    pub fn append_block(mut self, block_type: impl Into<String>, data: Value) -> Self {
        self.blocks.push(BlockRecord::new(block_type, data));
        self
    }

    pub fn to_json(&self) -> Value {
        // A Document only holds strings and JSON values, so serializing cannot fail
        serde_json::to_value(self).unwrap_or_else(|_| empty_object())
    }

    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Parse a persisted document value, checking its shape only.
///
/// Block types are not looked up; an unregistered type surfaces when the
/// document is mounted, so the rest of the article can still be shown.
pub fn parse_document(raw: Value) -> Result<Document, DocumentError> {
    let document: Document = serde_json::from_value(raw)?;

    for (index, block) in document.blocks.iter().enumerate() {
        if !block.data.is_object() {
            return Err(DocumentError::InvalidBlockData {
                index,
                block_type: block.block_type.clone(),
            });
        }
    }

    log::debug!("Parsed document with {} blocks", document.blocks.len());
    Ok(document)
}

/// Parse a persisted document value, checking every block against the registry.
///
/// Blocks with an unregistered type are reported, never dropped.
pub fn load_document(raw: Value, registry: &BlockRegistry) -> Result<Document, DocumentError> {
    let document = parse_document(raw)?;

    if let Some((index, block)) = document
        .blocks
        .iter()
        .enumerate()
        .find(|(_, block)| !registry.contains(&block.block_type))
    {
        return Err(DocumentError::UnknownBlockType {
            index,
            block_type: block.block_type.clone(),
        });
    }

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::ToolConfig;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    fn registry() -> Arc<BlockRegistry> {
        BlockRegistry::standard(&ToolConfig::default())
    }

    #[test]
    fn test_load_preserves_order_and_ids() {
        let raw = json!({
            "blocks": [
                { "id": "a1", "type": "header", "data": { "text": "Title", "level": 1 } },
                { "type": "paragraph", "data": { "text": "Body" } },
                { "type": "delimiter", "data": {} }
            ]
        });

        let doc = load_document(raw.clone(), &registry()).unwrap();

        assert_eq!(doc.len(), 3);
        assert_eq!(doc.blocks[0].id.as_deref(), Some("a1"));
        assert_eq!(doc.blocks[2].block_type, "delimiter");
        assert_eq!(doc.to_json(), raw);
    }

    #[test]
    fn test_unknown_type_reports_index() {
        let raw = json!({
            "blocks": [
                { "type": "paragraph", "data": {} },
                { "type": "mystery", "data": {} }
            ]
        });

        let err = load_document(raw, &registry()).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::UnknownBlockType { index: 1, ref block_type } if block_type == "mystery"
        ));
    }

    #[test]
    fn test_non_object_data_is_rejected() {
        let raw = json!({ "blocks": [{ "type": "paragraph", "data": "text" }] });
        assert!(matches!(
            load_document(raw, &registry()),
            Err(DocumentError::InvalidBlockData { index: 0, .. })
        ));
    }

    #[test]
    fn test_parse_keeps_unregistered_types() {
        let raw = json!({
            "blocks": [
                { "type": "paragraph", "data": { "text": "kept" } },
                { "type": "ghost", "data": {} }
            ]
        });

        let doc = parse_document(raw).unwrap();
        assert_eq!(doc.blocks[1].block_type, "ghost");
    }

    #[test]
    fn test_parse_still_rejects_non_object_data() {
        let raw = json!({ "blocks": [{ "type": "ghost", "data": [1, 2] }] });
        assert!(matches!(
            parse_document(raw),
            Err(DocumentError::InvalidBlockData { index: 0, .. })
        ));
    }

    #[test]
    fn test_missing_data_defaults_to_empty_object() {
        let raw = json!({ "blocks": [{ "type": "delimiter" }] });
        let doc = load_document(raw, &registry()).unwrap();
        assert_eq!(doc.blocks[0].data, json!({}));
    }

    #[test]
    fn test_malformed_json() {
        let result = Document::from_json_str("{\"blocks\": [", &registry());
        assert!(matches!(result, Err(DocumentError::Malformed(_))));

        let result = Document::from_json_str("{\"blocks\": 3}", &registry());
        assert!(matches!(result, Err(DocumentError::Malformed(_))));
    }

    #[test]
    fn test_extra_top_level_fields_are_ignored() {
        let raw = json!({ "time": 1700000000, "version": "2.28", "blocks": [] });
        let doc = load_document(raw, &registry()).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_append_block_goes_last() {
        let doc = Document::default()
            .append_block("paragraph", json!({ "text": "one" }))
            .append_block("quote", json!({}));
        let types: Vec<_> = doc.blocks.iter().map(|b| b.block_type.as_str()).collect();
        assert_eq!(types, vec!["paragraph", "quote"]);
    }
}
