//! Buffer engine: edit operations, change events, motions and overlays.

pub mod bus;
pub mod document;
pub mod highlight;
pub mod movement;
pub mod session;
pub mod syntax;
pub mod text_object;

pub use bus::{BufferEvent, EventBus, EventKind, SubscriptionId};
pub use document::Document;
pub use highlight::{HighlightOverlay, HighlightSpan, HighlightStyle};
pub use movement::Movement;
pub use session::{BufferId, IdSequence, Session};
pub use syntax::{Construct, LanguageId, NoStructure, ParseTree, StructureProvider, SyntaxTree};
pub use text_object::TextObject;
