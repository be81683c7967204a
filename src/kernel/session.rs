//! Top-level owner of buffer identifiers.

use super::document::Document;
use super::syntax::SyntaxTree;
use crate::config::BufferConfig;
use crate::error::Result;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(u64);

impl BufferId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "buf#{}", self.0)
    }
}

/// Monotonic id allocator, injected instead of a process-wide counter.
#[derive(Debug, Clone)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    pub fn next_id(&mut self) -> BufferId {
        let id = BufferId(self.next);
        self.next += 1;
        id
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Session {
    ids: IdSequence,
    config: BufferConfig,
}

impl Session {
    pub fn new(config: BufferConfig) -> Self {
        Self {
            ids: IdSequence::new(),
            config,
        }
    }

    pub fn config(&self) -> &BufferConfig {
        &self.config
    }

    pub fn open_empty(&mut self) -> Document {
        Document::new(self.ids.next_id(), self.config.clone())
    }

    pub fn open_bytes(&mut self, bytes: &[u8]) -> Document {
        Document::from_bytes(self.ids.next_id(), bytes, self.config.clone())
    }

    /// Read `path` and attach a parser when its extension names a known grammar.
    pub fn open_path(&mut self, path: &Path) -> Result<Document> {
        let bytes = std::fs::read(path)?;
        let mut doc = self.open_bytes(&bytes);
        if let Some(tree) = SyntaxTree::for_path(path, doc.store().get_bytes()) {
            doc.attach_parse_tree(Box::new(tree));
        }
        tracing::debug!(buffer = %doc.id(), path = %path.display(), "opened");
        Ok(doc)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(BufferConfig::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/session.rs"]
mod tests;
