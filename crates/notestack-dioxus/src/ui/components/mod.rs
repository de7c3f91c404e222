mod article_editor;
mod article_list;
mod block_surface;
mod block_toolbox;
mod code_widget;
mod comments_panel;
mod error_screen;
mod link_preview;
mod media;
mod table_block;

pub use article_editor::ArticleEditor;
pub use article_list::ArticleList;
pub use block_surface::BlockSurface;
pub use block_toolbox::{BlockToolbox, ToolEntry};
pub use code_widget::CodeWidget;
pub use comments_panel::CommentsPanel;
pub use error_screen::ErrorScreen;
pub use link_preview::{LinkCard, LinkInput};
pub use media::{EmbedFrame, ImageBlock};
pub use table_block::TableBlock;
