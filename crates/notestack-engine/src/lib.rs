pub mod blocks;
pub mod document;
pub mod editing;
pub mod io;
pub mod models;
pub mod registry;
pub mod view;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use blocks::{
    ApiEvent, ApiHandle, Block, BlockApi, BlockError, BlockInit, BlockInput, BlockTool, Key,
    Reaction, ToolConfig,
};
pub use document::{BlockRecord, Document, DocumentError, load_document, parse_document};
pub use editing::{
    EditorSession, MountError, SaveFailure, SessionError, SessionState, Snapshot, Task,
    fallback_surfaces,
};
pub use io::*;
pub use models::{Article, ArticleFile, ArticleIndex, Comment, CommentError, CommentThread};
pub use registry::{BlockRegistry, RegistryBuilder, RegistryError};
pub use view::{BlockView, Surface};
