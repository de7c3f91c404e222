use serde::{Deserialize, Serialize};

use super::code::Language;

/// Per-tool settings used when building the standard registry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub paragraph: ParagraphConfig,
    pub header: HeaderConfig,
    pub quote: QuoteConfig,
    pub code: CodeConfig,
    pub table: TableConfig,
    pub link_preview: LinkPreviewConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphConfig {
    pub placeholder: String,
}

impl Default for ParagraphConfig {
    fn default() -> Self {
        Self {
            placeholder: "Start writing...".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub levels: Vec<u8>,
    pub default_level: u8,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            levels: vec![1, 2, 3, 4, 5, 6],
            default_level: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    pub quote_placeholder: String,
    pub caption_placeholder: String,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            quote_placeholder: "Enter a quote".to_string(),
            caption_placeholder: "Quote author".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeConfig {
    pub default_language: Language,
    pub placeholder: String,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            default_language: Language::JavaScript,
            placeholder: "Enter your code here...".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub rows: usize,
    pub cols: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { rows: 2, cols: 3 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkPreviewConfig {
    /// Metadata endpoint; the pasted URL is appended as the `url` query parameter
    pub endpoint: String,
    pub placeholder: String,
}

impl Default for LinkPreviewConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.microlink.io/".to_string(),
            placeholder: "Paste a link to generate a preview...".to_string(),
        }
    }
}
