use dioxus::prelude::*;
use notestack_config::{Config, HostConfig};
use notestack_engine::{ApiEvent, ApiHandle, BlockApi, BlockRegistry};
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared state every editor component reads through context
#[derive(Clone)]
pub struct Workspace {
    pub notes_path: PathBuf,
    pub registry: Arc<BlockRegistry>,
    pub host: HostConfig,
    pub client: Client,
    /// Last block-level event worth showing in the status bar
    pub notice: Signal<Option<String>>,
}

impl Workspace {
    pub fn new(config: &Config, notice: Signal<Option<String>>) -> Self {
        Self {
            notes_path: config.notes_path.clone(),
            registry: BlockRegistry::standard(&config.editor),
            host: config.host.clone(),
            client: Client::new(),
            notice,
        }
    }

    /// Handle given to every block mounted in this workspace
    pub fn api(&self) -> ApiHandle {
        ApiHandle::new(NoticeApi {
            notice: self.notice,
        })
    }
}

struct NoticeApi {
    notice: Signal<Option<String>>,
}

impl BlockApi for NoticeApi {
    fn report(&self, block_type: &'static str, event: ApiEvent) {
        log::info!("{block_type}: {event:?}");
        let mut notice = self.notice;
        notice.set(Some(describe(&event)));
    }
}

fn describe(event: &ApiEvent) -> String {
    match event {
        ApiEvent::PreviewResolved { url } => format!("Preview loaded for {url}"),
        ApiEvent::PreviewFailed { url, reason } => {
            format!("Could not load a preview for {url}: {reason}")
        }
        ApiEvent::FileLoaded { name, bytes } => format!("Loaded {name} ({bytes} bytes)"),
        ApiEvent::FileFailed { name, reason } => format!("Could not read {name}: {reason}"),
    }
}
