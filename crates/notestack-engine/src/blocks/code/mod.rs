//! Code block: an embedded code widget plus a language selector.
//!
//! Changing the language bumps the surface generation so the host throws the
//! widget away and builds a fresh one for the new language. Key presses are
//! always consumed here so Enter and Backspace never reach the document-level
//! block navigation.

pub mod environment;
mod language;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{
    Block, BlockError, BlockInit, BlockInput, BlockTool, CodeConfig, Reaction, Toolbox, decode,
    encode, replace,
};
use crate::view::{CodeSurface, Surface};

pub use language::Language;

pub const TYPE_KEY: &str = "code";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeData {
    pub code: String,
    pub language: Language,
}

#[derive(Deserialize)]
struct CodeRecord {
    #[serde(default)]
    code: String,
    language: Option<Language>,
}

pub struct CodeTool {
    config: CodeConfig,
}

impl CodeTool {
    pub fn new(config: CodeConfig) -> Self {
        Self { config }
    }
}

impl BlockTool for CodeTool {
    fn type_key(&self) -> &'static str {
        TYPE_KEY
    }

    fn toolbox(&self) -> Toolbox {
        Toolbox {
            title: "Code Editor",
            icon: "💻",
        }
    }

    fn is_read_only_supported(&self) -> bool {
        true
    }

    fn enable_line_breaks(&self) -> bool {
        true
    }

    fn default_data(&self) -> Value {
        json!({ "code": "", "language": self.config.default_language })
    }

    fn construct(&self, init: BlockInit) -> Result<Box<dyn Block>, BlockError> {
        let record: CodeRecord = decode(TYPE_KEY, init.data)?;
        let environment = environment::current();

        Ok(Box::new(CodeBlock {
            data: CodeData {
                code: record.code,
                language: record.language.unwrap_or(self.config.default_language),
            },
            generation: 0,
            placeholder: self.config.placeholder.clone(),
            environment,
            read_only: init.read_only,
        }))
    }
}

struct CodeBlock {
    data: CodeData,
    /// Bumped on every language change; part of the widget key
    generation: u64,
    placeholder: String,
    environment: &'static environment::CodeEnvironment,
    read_only: bool,
}

impl Block for CodeBlock {
    fn render(&self) -> Surface {
        Surface::Code(CodeSurface {
            generation: self.generation,
            language: self.data.language,
            languages: Language::ALL,
            code: self.data.code.clone(),
            placeholder: self.placeholder.clone(),
            worker_url: self.environment.worker_url(self.data.language),
            editable: !self.read_only,
        })
    }

    fn save(&self) -> Result<Value, BlockError> {
        encode(TYPE_KEY, &self.data)
    }

    fn apply(&mut self, input: BlockInput) -> Reaction {
        match input {
            // The widget owns its keystrokes
            BlockInput::Key(_) => Reaction::Consumed,
            _ if self.read_only => Reaction::Ignored,
            BlockInput::SetCode(code) => replace(&mut self.data.code, code),
            BlockInput::SelectLanguage(language) if language == self.data.language => {
                Reaction::Consumed
            }
            BlockInput::SelectLanguage(language) => {
                self.data.language = language;
                self.generation += 1;
                Reaction::Changed
            }
            _ => Reaction::Ignored,
        }
    }

    fn is_empty(&self) -> bool {
        self.data.code.is_empty()
    }
}
