//! Live editing: one mounted document per [`EditorSession`].

mod fallback;
pub mod session;
pub mod snapshot;

pub use crate::blocks::Task;
pub use fallback::fallback_surfaces;
pub use session::{EditorSession, SessionState};
pub use snapshot::{SaveFailure, Snapshot};

use crate::blocks::BlockError;

/// Errors raised while mounting a document. Nothing stays mounted after any of them.
#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error("block {index} has unknown type '{block_type}'")]
    UnknownBlockType { index: usize, block_type: String },
    #[error("block {index} ({block_type}) cannot be shown read-only")]
    ReadOnlyUnsupported { index: usize, block_type: String },
    #[error("block {index} ({block_type}) could not be loaded: {source}")]
    InvalidBlockData {
        index: usize,
        block_type: String,
        source: BlockError,
    },
    #[error("cannot mount a session in state {0:?}")]
    InvalidState(SessionState),
}

impl MountError {
    /// Index of the offending block, if the error is about one block
    pub fn index(&self) -> Option<usize> {
        match self {
            MountError::UnknownBlockType { index, .. }
            | MountError::ReadOnlyUnsupported { index, .. }
            | MountError::InvalidBlockData { index, .. } => Some(*index),
            MountError::InvalidState(_) => None,
        }
    }
}

/// Errors raised by operations on a mounted session
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session is read-only")]
    ReadOnly,
    #[error("session is not ready (state {0:?})")]
    NotReady(SessionState),
    #[error("block index {index} out of range (document has {len} blocks)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("unknown block type '{0}'")]
    UnknownBlockType(String),
    #[error("could not create {block_type} block: {source}")]
    Construct {
        block_type: String,
        source: BlockError,
    },
}
