//! 数据模型层

pub mod change;
pub mod change_script;
pub mod edit_history;
pub mod position;
pub mod text_store;

pub use change::{Change, ChangeDescriptor};
pub use change_script::{ChangeScript, LineChange, LineImage};
pub use edit_history::{EditHistory, HistoryEntry, DEFAULT_UNDO_LIMIT};
pub use position::{Point, Position, Scope};
pub use text_store::{slice_to_cow, TextStore};
