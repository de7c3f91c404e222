//! Shared helpers for unit tests across the engine.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use tempfile::TempDir;

use crate::blocks::{ApiEvent, ApiHandle, BlockApi};

pub type RecordedEvents = Rc<RefCell<Vec<(&'static str, ApiEvent)>>>;

/// Block API that records every reported event
pub struct RecordingApi {
    events: RecordedEvents,
}

impl RecordingApi {
    /// Build a handle plus a view of the events reported through it
    pub fn handle() -> (ApiHandle, RecordedEvents) {
        let events = RecordedEvents::default();
        let api = RecordingApi {
            events: Rc::clone(&events),
        };
        (ApiHandle::new(api), events)
    }
}

impl BlockApi for RecordingApi {
    fn report(&self, block_type: &'static str, event: ApiEvent) {
        self.events.borrow_mut().push((block_type, event));
    }
}

pub fn create_test_notes_dir() -> TempDir {
    TempDir::new().unwrap()
}

/// Write a file below the notes root, creating parent directories
pub fn create_test_file(notes_dir: &TempDir, relative: &str, content: &str) -> PathBuf {
    let path = notes_dir.path().join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}
