//! Process-wide setup shared by every embedded code widget.
//!
//! The widget loads its language services from worker scripts. Where those
//! scripts live is decided once, before the first code block is built, and
//! never changes afterwards.

use std::sync::OnceLock;

use super::Language;

const DEFAULT_WORKER_BASE: &str = "https://unpkg.com/monaco-editor@latest/min/vs";

static ENVIRONMENT: OnceLock<CodeEnvironment> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeEnvironment {
    worker_base: String,
}

impl CodeEnvironment {
    pub fn new(worker_base: impl Into<String>) -> Self {
        let worker_base = worker_base.into();
        Self {
            worker_base: worker_base.trim_end_matches('/').to_string(),
        }
    }

    /// Worker script serving language services for `language`
    pub fn worker_url(&self, language: Language) -> String {
        let path = match language {
            Language::Json => "language/json/json.worker.js",
            Language::JavaScript | Language::TypeScript => "language/typescript/ts.worker.js",
            Language::Css | Language::Scss | Language::Less => "language/css/css.worker.js",
            Language::Html | Language::Xml => "language/html/html.worker.js",
            Language::Python => "language/python/python.worker.js",
            _ => "editor/editor.worker.js",
        };
        format!("{}/{path}", self.worker_base)
    }
}

impl Default for CodeEnvironment {
    fn default() -> Self {
        Self::new(DEFAULT_WORKER_BASE)
    }
}

/// Install the environment. Fails with the rejected value if one is already
/// in place, including the default installed by a previously built code block.
pub fn install(environment: CodeEnvironment) -> Result<(), CodeEnvironment> {
    ENVIRONMENT.set(environment)
}

/// The installed environment, installing the default on first use
pub fn current() -> &'static CodeEnvironment {
    ENVIRONMENT.get_or_init(|| {
        log::debug!("No code environment installed, using defaults");
        CodeEnvironment::default()
    })
}
