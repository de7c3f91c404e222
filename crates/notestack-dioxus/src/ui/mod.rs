mod app;
pub mod components;
pub mod keys;
mod workspace;

pub use app::App;
pub use workspace::Workspace;
