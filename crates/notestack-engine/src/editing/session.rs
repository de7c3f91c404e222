/*!
 * # Editor Session
 *
 * An `EditorSession` owns the live block instances of one document and walks
 * through a small lifecycle:
 *
 * ```text
 * Uninitialized --mount--> Mounting --ok--> Ready --destroy--> Destroying --> Destroyed
 *       ^                     |               |  ^
 *       +------- error -------+        snapshot  |
 *                                             v  |
 *                                            Saving
 * ```
 *
 * Mounting is all-or-nothing: every block type is resolved and checked for
 * read-only support before the first block is constructed, and a constructor
 * failure tears down whatever was already built.
 *
 * While `Ready`, every change to a block pushes a fresh [`Snapshot`] to the
 * change callback. The mode (edit or read-only) is fixed at mount; showing a
 * different document means destroying the session and mounting a new one.
 */

use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use super::snapshot::{self, Snapshot, SnapshotSource};
use super::{MountError, SessionError};
use crate::blocks::{ApiHandle, Block, BlockInit, BlockInput, BlockTool, Key, Reaction, Task};
use crate::document::Document;
use crate::registry::BlockRegistry;
use crate::view::BlockView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Mounting,
    Ready,
    Saving,
    Destroying,
    Destroyed,
}

type ChangeCallback = Box<dyn FnMut(&Snapshot)>;

struct LiveBlock {
    id: Option<String>,
    tool: Arc<dyn BlockTool>,
    instance: Box<dyn Block>,
    /// Data from the last successful save
    last_saved: Value,
}

impl LiveBlock {
    fn destroy(&mut self) {
        self.instance.destroy();
    }
}

impl SnapshotSource for LiveBlock {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn block_type(&self) -> &'static str {
        self.tool.type_key()
    }

    fn instance(&self) -> &dyn Block {
        self.instance.as_ref()
    }

    fn last_saved(&mut self) -> &mut Value {
        &mut self.last_saved
    }
}

pub struct EditorSession {
    registry: Arc<BlockRegistry>,
    api: ApiHandle,
    state: SessionState,
    read_only: bool,
    blocks: Vec<LiveBlock>,
    tasks: Vec<Task>,
    on_change: Option<ChangeCallback>,
}

impl EditorSession {
    pub fn new(registry: Arc<BlockRegistry>, api: ApiHandle) -> Self {
        Self {
            registry,
            api,
            state: SessionState::Uninitialized,
            read_only: false,
            blocks: Vec::new(),
            tasks: Vec::new(),
            on_change: None,
        }
    }

    /// Register the callback receiving a snapshot after every change
    pub fn on_change(&mut self, callback: impl FnMut(&Snapshot) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn registry(&self) -> &Arc<BlockRegistry> {
        &self.registry
    }

    /// Construct every block of `document`. Only valid from `Uninitialized`.
    pub fn mount(&mut self, document: &Document, read_only: bool) -> Result<(), MountError> {
        if self.state != SessionState::Uninitialized {
            return Err(MountError::InvalidState(self.state));
        }
        self.state = SessionState::Mounting;

        let tools = match self.resolve_tools(document, read_only) {
            Ok(tools) => tools,
            Err(e) => {
                self.state = SessionState::Uninitialized;
                return Err(e);
            }
        };

        let mut blocks = Vec::with_capacity(tools.len());
        for (index, (record, tool)) in document.blocks.iter().zip(tools).enumerate() {
            let init = BlockInit::new(record.data.clone(), self.api.clone(), read_only);
            match tool.construct(init) {
                Ok(instance) => blocks.push(LiveBlock {
                    id: record.id.clone(),
                    tool,
                    instance,
                    last_saved: record.data.clone(),
                }),
                Err(source) => {
                    log::warn!(
                        "Block {index} ({}) failed to construct: {source}",
                        record.block_type
                    );
                    for block in &mut blocks {
                        block.destroy();
                    }
                    self.state = SessionState::Uninitialized;
                    return Err(MountError::InvalidBlockData {
                        index,
                        block_type: record.block_type.clone(),
                        source,
                    });
                }
            }
        }

        log::debug!(
            "Mounted {} blocks ({})",
            blocks.len(),
            if read_only { "read-only" } else { "editable" }
        );
        self.blocks = blocks;
        self.read_only = read_only;
        self.state = SessionState::Ready;
        Ok(())
    }

    fn resolve_tools(
        &self,
        document: &Document,
        read_only: bool,
    ) -> Result<Vec<Arc<dyn BlockTool>>, MountError> {
        document
            .blocks
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let tool = self.registry.get(&record.block_type).ok_or_else(|| {
                    log::warn!("Block {index} has unknown type '{}'", record.block_type);
                    MountError::UnknownBlockType {
                        index,
                        block_type: record.block_type.clone(),
                    }
                })?;
                if read_only && !tool.is_read_only_supported() {
                    log::error!(
                        "Block {index} ({}) does not support read-only mode",
                        record.block_type
                    );
                    return Err(MountError::ReadOnlyUnsupported {
                        index,
                        block_type: record.block_type.clone(),
                    });
                }
                Ok(Arc::clone(tool))
            })
            .collect()
    }

    /// Rendered view of every block, in document order
    pub fn surfaces(&self) -> Vec<BlockView> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(index, block)| BlockView {
                index,
                id: block.id.clone(),
                block_type: block.tool.type_key().to_string(),
                surface: block.instance.render(),
            })
            .collect()
    }

    /// Current document. Passes through `Saving` and returns to `Ready`.
    pub fn snapshot(&mut self) -> Result<Snapshot, SessionError> {
        self.ensure_ready()?;
        self.state = SessionState::Saving;
        let snapshot = snapshot::take(&mut self.blocks);
        self.state = SessionState::Ready;
        Ok(snapshot)
    }

    /// Route one input to a block. Returns `true` when the document changed.
    ///
    /// Keys the block ignores fall through to document-level handling: Enter
    /// opens a new default block below (unless the block keeps line breaks)
    /// and Backspace removes an empty block.
    pub fn dispatch(&mut self, index: usize, input: BlockInput) -> Result<bool, SessionError> {
        self.ensure_editable()?;
        self.check_index(index)?;

        let key = match &input {
            BlockInput::Key(key) => Some(*key),
            _ => None,
        };

        match self.blocks[index].instance.apply(input) {
            Reaction::Changed => {
                self.notify();
                Ok(true)
            }
            Reaction::Consumed => Ok(false),
            Reaction::Spawn(task) => {
                self.tasks.push(task);
                Ok(false)
            }
            Reaction::Ignored => match key {
                Some(key) => self.handle_key(index, key),
                None => Ok(false),
            },
        }
    }

    fn handle_key(&mut self, index: usize, key: Key) -> Result<bool, SessionError> {
        let line_breaks = self.blocks[index].tool.enable_line_breaks();
        let empty = self.blocks[index].instance.is_empty();
        match key {
            Key::Enter if !line_breaks => {
                let Some(tool) = self.registry.default_tool().cloned() else {
                    return Ok(false);
                };
                self.insert_with_tool(index + 1, tool)?;
                Ok(true)
            }
            Key::Backspace if empty && self.blocks.len() > 1 => {
                self.delete_block(index)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Insert a fresh block of `block_type` at `at` with the tool's default data.
    /// Returns the index of the new block.
    pub fn insert_block(&mut self, at: usize, block_type: &str) -> Result<usize, SessionError> {
        self.ensure_editable()?;
        if at > self.blocks.len() {
            return Err(SessionError::IndexOutOfRange {
                index: at,
                len: self.blocks.len(),
            });
        }
        let tool = self
            .registry
            .get(block_type)
            .cloned()
            .ok_or_else(|| SessionError::UnknownBlockType(block_type.to_string()))?;
        self.insert_with_tool(at, tool)?;
        Ok(at)
    }

    pub fn append_block(&mut self, block_type: &str) -> Result<usize, SessionError> {
        self.insert_block(self.blocks.len(), block_type)
    }

    fn insert_with_tool(&mut self, at: usize, tool: Arc<dyn BlockTool>) -> Result<(), SessionError> {
        let data = tool.default_data();
        let init = BlockInit::new(data.clone(), self.api.clone(), self.read_only);
        let instance = tool.construct(init).map_err(|source| SessionError::Construct {
            block_type: tool.type_key().to_string(),
            source,
        })?;

        log::debug!("Inserting {} block at {at}", tool.type_key());
        self.blocks.insert(
            at,
            LiveBlock {
                id: Some(Uuid::new_v4().to_string()),
                tool,
                instance,
                last_saved: data,
            },
        );
        self.notify();
        Ok(())
    }

    pub fn delete_block(&mut self, index: usize) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.check_index(index)?;

        let mut block = self.blocks.remove(index);
        log::debug!("Deleting {} block at {index}", block.tool.type_key());
        block.destroy();
        self.notify();
        Ok(())
    }

    /// Async work queued by blocks since the last call. Tasks of blocks that
    /// have since been destroyed are dropped.
    pub fn take_tasks(&mut self) -> Vec<Task> {
        let mut tasks = std::mem::take(&mut self.tasks);
        tasks.retain(Task::is_live);
        tasks
    }

    /// Re-notify the change callback, e.g. after a task completed
    pub fn refresh(&mut self) {
        if self.state == SessionState::Ready {
            self.notify();
        }
    }

    /// Destroy every block. Idempotent; also runs on drop.
    pub fn destroy(&mut self) {
        if self.state == SessionState::Destroyed {
            return;
        }
        self.state = SessionState::Destroying;
        for block in &mut self.blocks {
            block.destroy();
        }
        log::debug!("Destroyed session with {} blocks", self.blocks.len());
        self.blocks.clear();
        self.tasks.clear();
        self.on_change = None;
        self.state = SessionState::Destroyed;
    }

    fn notify(&mut self) {
        if self.on_change.is_none() {
            return;
        }
        let snapshot = snapshot::take(&mut self.blocks);
        if let Some(callback) = self.on_change.as_mut() {
            callback(&snapshot);
        }
    }

    fn ensure_ready(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Ready => Ok(()),
            state => Err(SessionError::NotReady(state)),
        }
    }

    fn ensure_editable(&self) -> Result<(), SessionError> {
        self.ensure_ready()?;
        if self.read_only {
            return Err(SessionError::ReadOnly);
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), SessionError> {
        if index >= self.blocks.len() {
            return Err(SessionError::IndexOutOfRange {
                index,
                len: self.blocks.len(),
            });
        }
        Ok(())
    }
}

impl Drop for EditorSession {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{BlockError, ToolConfig, Toolbox};
    use crate::document::load_document;
    use crate::view::Surface;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn session() -> EditorSession {
        EditorSession::new(
            BlockRegistry::standard(&ToolConfig::default()),
            ApiHandle::default(),
        )
    }

    fn document(raw: Value) -> Document {
        serde_json::from_value(raw).unwrap()
    }

    fn mounted(raw: Value) -> EditorSession {
        let mut session = session();
        session.mount(&document(raw), false).unwrap();
        session
    }

    /// Tool that counts constructions and destructions
    struct Counting {
        key: &'static str,
        read_only: bool,
        fail: bool,
        built: Arc<AtomicUsize>,
        destroyed: Arc<AtomicUsize>,
    }

    struct CountingBlock {
        destroyed: Arc<AtomicUsize>,
    }

    impl Block for CountingBlock {
        fn render(&self) -> Surface {
            Surface::Empty
        }

        fn save(&self) -> Result<Value, BlockError> {
            Ok(json!({}))
        }

        fn destroy(&mut self) {
            self.destroyed.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl BlockTool for Counting {
        fn type_key(&self) -> &'static str {
            self.key
        }

        fn toolbox(&self) -> Toolbox {
            Toolbox {
                title: "Counting",
                icon: "#",
            }
        }

        fn is_read_only_supported(&self) -> bool {
            self.read_only
        }

        fn construct(&self, _init: BlockInit) -> Result<Box<dyn Block>, BlockError> {
            if self.fail {
                return Err(BlockError::OutOfRange {
                    block_type: self.key,
                    reason: "refused".to_string(),
                });
            }
            self.built.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(CountingBlock {
                destroyed: Arc::clone(&self.destroyed),
            }))
        }
    }

    #[derive(Default)]
    struct Counters {
        built: Arc<AtomicUsize>,
        destroyed: Arc<AtomicUsize>,
    }

    impl Counters {
        fn built(&self) -> usize {
            self.built.load(Ordering::SeqCst)
        }

        fn destroyed(&self) -> usize {
            self.destroyed.load(Ordering::SeqCst)
        }
    }

    fn counting_registry(tools: &[(&'static str, bool, bool)]) -> (Arc<BlockRegistry>, Counters) {
        let counters = Counters::default();
        let mut builder = BlockRegistry::builder();
        for &(key, read_only, fail) in tools {
            builder = builder
                .register(Counting {
                    key,
                    read_only,
                    fail,
                    built: Arc::clone(&counters.built),
                    destroyed: Arc::clone(&counters.destroyed),
                })
                .unwrap();
        }
        (builder.build(), counters)
    }

    #[test]
    fn test_header_edit_changes_only_that_block() {
        let mut session = mounted(json!({
            "blocks": [
                { "type": "header", "data": { "text": "Intro", "level": 2 } },
                { "type": "code", "data": { "code": "print(1)", "language": "python" } }
            ]
        }));

        assert!(
            session
                .dispatch(0, BlockInput::SetText("Introduction".into()))
                .unwrap()
        );
        let snapshot = session.snapshot().unwrap();

        assert_eq!(
            snapshot.document.to_json(),
            json!({
                "blocks": [
                    { "type": "header", "data": { "text": "Introduction", "level": 2 } },
                    { "type": "code", "data": { "code": "print(1)", "language": "python" } }
                ]
            })
        );
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[test]
    fn test_snapshot_after_mount_equals_input() {
        let raw = json!({
            "blocks": [
                { "id": "p1", "type": "paragraph", "data": { "text": "Hello" } },
                { "type": "list", "data": { "style": "ordered", "items": ["a", "b"] } },
                { "type": "quote", "data": { "text": "Q", "caption": "C", "alignment": "center" } },
                { "type": "delimiter", "data": {} },
                { "type": "table", "data": { "withHeadings": true, "content": [["x"]] } },
                { "type": "linkPreview", "data": {
                    "url": "https://example.com", "title": "Ex",
                    "description": "", "image": { "url": "" } } },
                { "type": "webview", "data": { "title": "Site", "url": "https://example.com" } }
            ]
        });
        let doc = document(raw.clone());
        let mut session = session();
        session.mount(&doc, false).unwrap();

        let snapshot = session.snapshot().unwrap();
        assert!(snapshot.is_clean());
        assert_eq!(snapshot.document, doc);
        assert_eq!(snapshot.document.to_json(), raw);
    }

    #[test]
    fn test_unknown_type_mounts_nothing() {
        let (registry, counters) = counting_registry(&[("known", true, false)]);
        let mut session = EditorSession::new(registry, ApiHandle::default());
        let doc = document(json!({
            "blocks": [
                { "type": "known", "data": {} },
                { "type": "known", "data": {} },
                { "type": "ghost", "data": {} }
            ]
        }));

        let err = session.mount(&doc, false).unwrap_err();

        assert!(matches!(
            err,
            MountError::UnknownBlockType { index: 2, ref block_type } if block_type == "ghost"
        ));
        assert_eq!(counters.built(), 0);
        assert_eq!(session.state(), SessionState::Uninitialized);
        assert!(session.is_empty());
    }

    #[test]
    fn test_read_only_violation_fails_before_construction() {
        let (registry, counters) =
            counting_registry(&[("viewable", true, false), ("editable_only", false, false)]);
        let mut session = EditorSession::new(registry, ApiHandle::default());
        let doc = document(json!({
            "blocks": [
                { "type": "viewable", "data": {} },
                { "type": "editable_only", "data": {} }
            ]
        }));

        let err = session.mount(&doc, true).unwrap_err();

        assert!(matches!(
            err,
            MountError::ReadOnlyUnsupported { index: 1, .. }
        ));
        assert_eq!(counters.built(), 0);

        // The same document mounts fine in edit mode
        session.mount(&doc, false).unwrap();
        assert_eq!(counters.built(), 2);
    }

    #[test]
    fn test_constructor_failure_tears_down_built_blocks() {
        let (registry, counters) = counting_registry(&[("ok", true, false), ("bad", true, true)]);
        let mut session = EditorSession::new(registry, ApiHandle::default());
        let doc = document(json!({
            "blocks": [
                { "type": "ok", "data": {} },
                { "type": "bad", "data": {} }
            ]
        }));

        let err = session.mount(&doc, false).unwrap_err();

        assert_eq!(err.index(), Some(1));
        assert_eq!(counters.built(), 1);
        assert_eq!(counters.destroyed(), 1);
        assert_eq!(session.state(), SessionState::Uninitialized);
    }

    #[test]
    fn test_invalid_header_data_is_reported_on_mount() {
        let mut session = session();
        let doc = document(json!({
            "blocks": [{ "type": "header", "data": { "text": "x", "level": 9 } }]
        }));
        assert!(matches!(
            session.mount(&doc, false),
            Err(MountError::InvalidBlockData { index: 0, .. })
        ));
    }

    #[test]
    fn test_mount_twice_is_rejected() {
        let mut session = mounted(json!({ "blocks": [] }));
        assert!(matches!(
            session.mount(&Document::default(), false),
            Err(MountError::InvalidState(SessionState::Ready))
        ));
    }

    #[test]
    fn test_destroy_is_idempotent_and_runs_on_drop() {
        let (registry, counters) = counting_registry(&[("block", true, false)]);
        let doc = document(json!({
            "blocks": [{ "type": "block", "data": {} }, { "type": "block", "data": {} }]
        }));

        let mut session = EditorSession::new(Arc::clone(&registry), ApiHandle::default());
        session.mount(&doc, false).unwrap();
        session.destroy();
        session.destroy();
        assert_eq!(counters.destroyed(), 2);
        assert_eq!(session.state(), SessionState::Destroyed);
        assert!(matches!(
            session.snapshot(),
            Err(SessionError::NotReady(SessionState::Destroyed))
        ));

        {
            let mut dropped = EditorSession::new(registry, ApiHandle::default());
            dropped.mount(&doc, false).unwrap();
        }
        assert_eq!(counters.destroyed(), 4);
    }

    #[test]
    fn test_preview_completing_after_destroy_is_noop() {
        let mut session = mounted(json!({ "blocks": [{ "type": "linkPreview", "data": {} }] }));
        session
            .dispatch(0, BlockInput::PasteUrl("https://example.com".into()))
            .unwrap();
        let mut tasks = session.take_tasks();
        assert_eq!(tasks.len(), 1);

        session.destroy();

        let Some(Task::FetchPreview(request)) = tasks.pop() else {
            panic!("expected a preview fetch");
        };
        assert!(!request.is_live());
        let metadata = serde_json::from_value(json!({ "title": "Late" })).unwrap();
        assert!(!request.complete(Ok(metadata)));
    }

    #[test]
    fn test_tasks_of_deleted_blocks_are_dropped() {
        let mut session = mounted(json!({
            "blocks": [
                { "type": "paragraph", "data": { "text": "keep" } },
                { "type": "linkPreview", "data": {} }
            ]
        }));
        session
            .dispatch(1, BlockInput::PasteUrl("https://example.com".into()))
            .unwrap();
        session.delete_block(1).unwrap();

        assert!(session.take_tasks().is_empty());
    }

    #[test]
    fn test_change_callback_receives_snapshots() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut session = mounted(json!({
            "blocks": [{ "type": "paragraph", "data": { "text": "" } }]
        }));
        let sink = Rc::clone(&seen);
        session.on_change(move |snapshot| sink.borrow_mut().push(snapshot.document.clone()));

        session
            .dispatch(0, BlockInput::SetText("draft".into()))
            .unwrap();
        // Same text again: no change, no notification
        session
            .dispatch(0, BlockInput::SetText("draft".into()))
            .unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].blocks[0].data, json!({ "text": "draft" }));
    }

    #[test]
    fn test_enter_inserts_paragraph_with_fresh_id() {
        let mut session = mounted(json!({
            "blocks": [{ "type": "header", "data": { "text": "Title", "level": 1 } }]
        }));

        assert!(session.dispatch(0, BlockInput::Key(Key::Enter)).unwrap());

        let views = session.surfaces();
        assert_eq!(views.len(), 2);
        assert_eq!(views[1].block_type, "paragraph");
        let id = views[1].id.as_deref().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[test]
    fn test_enter_inside_code_block_stays_in_block() {
        let mut session = mounted(json!({ "blocks": [{ "type": "code", "data": {} }] }));
        assert!(!session.dispatch(0, BlockInput::Key(Key::Enter)).unwrap());
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_backspace_removes_empty_block_but_not_the_last() {
        let mut session = mounted(json!({
            "blocks": [
                { "type": "paragraph", "data": { "text": "kept" } },
                { "type": "paragraph", "data": { "text": "" } }
            ]
        }));

        assert!(!session.dispatch(0, BlockInput::Key(Key::Backspace)).unwrap());
        assert!(session.dispatch(1, BlockInput::Key(Key::Backspace)).unwrap());
        assert_eq!(session.len(), 1);

        session.dispatch(0, BlockInput::SetText(String::new())).unwrap();
        assert!(!session.dispatch(0, BlockInput::Key(Key::Backspace)).unwrap());
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_read_only_session_rejects_edits() {
        let mut session = session();
        let doc = load_document(
            json!({ "blocks": [{ "type": "paragraph", "data": { "text": "x" } }] }),
            session.registry(),
        )
        .unwrap();
        session.mount(&doc, true).unwrap();

        assert!(matches!(
            session.dispatch(0, BlockInput::SetText("y".into())),
            Err(SessionError::ReadOnly)
        ));
        assert!(matches!(
            session.append_block("paragraph"),
            Err(SessionError::ReadOnly)
        ));
        assert!(
            session
                .surfaces()
                .iter()
                .all(|view| matches!(view.surface, Surface::Paragraph { editable: false, .. }))
        );
    }

    #[test]
    fn test_insert_and_delete_bounds() {
        let mut session = mounted(json!({ "blocks": [] }));
        assert!(matches!(
            session.insert_block(1, "paragraph"),
            Err(SessionError::IndexOutOfRange { index: 1, len: 0 })
        ));
        assert!(matches!(
            session.append_block("nope"),
            Err(SessionError::UnknownBlockType(_))
        ));
        assert_eq!(session.append_block("table").unwrap(), 0);
        assert!(matches!(
            session.delete_block(3),
            Err(SessionError::IndexOutOfRange { index: 3, len: 1 })
        ));
        session.delete_block(0).unwrap();
        assert!(session.is_empty());
    }

    #[test]
    fn test_inserted_block_saves_default_data() {
        let mut session = mounted(json!({ "blocks": [] }));
        session.append_block("header").unwrap();
        let snapshot = session.snapshot().unwrap();
        assert_eq!(
            snapshot.document.blocks[0].data,
            json!({ "text": "", "level": 2 })
        );
    }
}
