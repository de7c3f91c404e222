//! Static table of block tools keyed by type.
//!
//! A registry is built once and never mutated afterwards. It is shared between
//! sessions through `Arc`; tools themselves are `Send + Sync` and stateless
//! apart from their configuration.

use std::collections::HashMap;
use std::sync::Arc;

use crate::blocks::code::CodeTool;
use crate::blocks::delimiter::DelimiterTool;
use crate::blocks::embed::EmbedTool;
use crate::blocks::header::HeaderTool;
use crate::blocks::image::ImageTool;
use crate::blocks::link_preview::LinkPreviewTool;
use crate::blocks::list::ListTool;
use crate::blocks::paragraph::{self, ParagraphTool};
use crate::blocks::quote::QuoteTool;
use crate::blocks::table::TableTool;
use crate::blocks::{BlockTool, ToolConfig};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("block type '{0}' is already registered")]
    Duplicate(String),
}

/// Immutable mapping from type key to tool
pub struct BlockRegistry {
    tools: Vec<Arc<dyn BlockTool>>,
    by_key: HashMap<&'static str, usize>,
}

impl BlockRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Every tool the editor ships with, configured from `config`
    pub fn standard(config: &ToolConfig) -> Arc<Self> {
        let tools: Vec<Arc<dyn BlockTool>> = vec![
            Arc::new(ParagraphTool::new(config.paragraph.clone())),
            Arc::new(HeaderTool::new(config.header.clone())),
            Arc::new(ListTool),
            Arc::new(ImageTool),
            Arc::new(QuoteTool::new(config.quote.clone())),
            Arc::new(CodeTool::new(config.code.clone())),
            Arc::new(DelimiterTool),
            Arc::new(TableTool::new(config.table.clone())),
            Arc::new(LinkPreviewTool::new(config.link_preview.clone())),
            Arc::new(EmbedTool::webview()),
            Arc::new(EmbedTool::mega()),
            Arc::new(EmbedTool::dropbox_audio()),
        ];

        let mut by_key = HashMap::with_capacity(tools.len());
        for (index, tool) in tools.iter().enumerate() {
            by_key.insert(tool.type_key(), index);
        }
        Arc::new(Self { tools, by_key })
    }

    /// Look up a tool by type key
    pub fn get(&self, block_type: &str) -> Option<&Arc<dyn BlockTool>> {
        self.by_key.get(block_type).map(|&index| &self.tools[index])
    }

    pub fn contains(&self, block_type: &str) -> bool {
        self.by_key.contains_key(block_type)
    }

    /// Tools in registration order, as shown in the toolbox
    pub fn tools(&self) -> impl Iterator<Item = &Arc<dyn BlockTool>> {
        self.tools.iter()
    }

    /// Tool used for blocks created by Enter; falls back to the first registered tool
    pub fn default_tool(&self) -> Option<&Arc<dyn BlockTool>> {
        self.get(paragraph::TYPE_KEY).or_else(|| self.tools.first())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for BlockRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.tools.iter().map(|tool| tool.type_key()))
            .finish()
    }
}

/// Collects tools before the registry is frozen
#[derive(Default)]
pub struct RegistryBuilder {
    tools: Vec<Arc<dyn BlockTool>>,
    by_key: HashMap<&'static str, usize>,
}

impl RegistryBuilder {
    pub fn register(mut self, tool: impl BlockTool + 'static) -> Result<Self, RegistryError> {
        let key = tool.type_key();
        if self.by_key.contains_key(key) {
            return Err(RegistryError::Duplicate(key.to_string()));
        }
        self.by_key.insert(key, self.tools.len());
        self.tools.push(Arc::new(tool));
        Ok(self)
    }

    pub fn build(self) -> Arc<BlockRegistry> {
        Arc::new(BlockRegistry {
            tools: self.tools,
            by_key: self.by_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_standard_registry_keys() {
        let registry = BlockRegistry::standard(&ToolConfig::default());
        let keys: Vec<_> = registry.tools().map(|tool| tool.type_key()).collect();
        assert_eq!(
            keys,
            vec![
                "paragraph",
                "header",
                "list",
                "image",
                "quote",
                "code",
                "delimiter",
                "table",
                "linkPreview",
                "webview",
                "megaEmbed",
                "dropboxAudio",
            ]
        );
    }

    #[test]
    fn test_lookup() {
        let registry = BlockRegistry::standard(&ToolConfig::default());
        assert!(registry.contains("header"));
        assert_eq!(registry.get("code").map(|t| t.toolbox().title), Some("Code Editor"));
        assert!(registry.get("mystery").is_none());
        assert_eq!(
            registry.default_tool().map(|t| t.type_key()),
            Some("paragraph")
        );
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let result = BlockRegistry::builder()
            .register(ListTool)
            .and_then(|builder| builder.register(ListTool));
        assert_eq!(
            result.err(),
            Some(RegistryError::Duplicate("list".to_string()))
        );
    }

    #[test]
    fn test_default_tool_without_paragraph() {
        let registry = BlockRegistry::builder()
            .register(DelimiterTool)
            .unwrap()
            .build();
        assert_eq!(
            registry.default_tool().map(|t| t.type_key()),
            Some("delimiter")
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BlockRegistry>();
    }
}
