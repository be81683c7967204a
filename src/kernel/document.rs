//! Document: the mutating API over a text store.
//!
//! Every mutation takes a `propagate` flag. With `propagate == false` nothing
//! is emitted and the caller must `flush_changes(None)` once the batch is done;
//! that flush reports the whole document as changed.

use super::bus::{BufferEvent, EventBus, EventKind, SubscriptionId};
use super::highlight::{HighlightOverlay, HighlightSpan, HighlightStyle};
use super::movement::Movement;
use super::session::BufferId;
use super::syntax::{NoStructure, ParseTree, StructureProvider};
use super::text_object::TextObject;
use crate::config::BufferConfig;
use crate::error::{Error, Result};
use crate::models::{
    Change, ChangeDescriptor, EditHistory, Point, Position, Scope, TextStore,
};
use regex::Regex;

pub struct Document {
    id: BufferId,
    store: TextStore,
    history: EditHistory,
    bus: EventBus,
    overlay: HighlightOverlay,
    parse_tree: Option<Box<dyn ParseTree>>,
    config: BufferConfig,
    /// Silent edits happened since the last flush.
    pending_resync: bool,
    flushed_len: usize,
    flushed_end: Point,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("id", &self.id)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Document {
    pub fn new(id: BufferId, config: BufferConfig) -> Self {
        Self::with_store(id, TextStore::new(), config)
    }

    pub fn from_text(id: BufferId, text: &str, config: BufferConfig) -> Self {
        Self::with_store(id, TextStore::from_text(text), config)
    }

    pub fn from_bytes(id: BufferId, bytes: &[u8], config: BufferConfig) -> Self {
        Self::with_store(id, TextStore::from_bytes(bytes), config)
    }

    fn with_store(id: BufferId, store: TextStore, config: BufferConfig) -> Self {
        let flushed_len = store.len_bytes();
        let flushed_end = store.end_point();
        Self {
            id,
            store,
            history: EditHistory::with_limit(config.undo_limit),
            bus: EventBus::new(),
            overlay: HighlightOverlay::new(),
            parse_tree: None,
            config,
            pending_resync: false,
            flushed_len,
            flushed_end,
        }
    }

    pub fn id(&self) -> BufferId {
        self.id
    }

    pub fn store(&self) -> &TextStore {
        &self.store
    }

    pub fn config(&self) -> &BufferConfig {
        &self.config
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn text(&self) -> &str {
        self.store.get_stream()
    }

    pub fn len_lines(&self) -> usize {
        self.store.len_lines()
    }

    // ==================== collaborators ====================

    pub fn subscribe(
        &mut self,
        kind: EventKind,
        callback: impl FnMut(&BufferEvent, &TextStore) + 'static,
    ) -> SubscriptionId {
        self.bus.register(kind, callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unregister(id)
    }

    /// Attach a parser and bring it up to date with the current content.
    pub fn attach_parse_tree(&mut self, mut tree: Box<dyn ParseTree>) {
        tree.resync(self.store.get_bytes());
        self.parse_tree = Some(tree);
    }

    pub fn detach_parse_tree(&mut self) -> Option<Box<dyn ParseTree>> {
        self.parse_tree.take()
    }

    pub fn structure(&self) -> &dyn StructureProvider {
        match &self.parse_tree {
            Some(tree) => tree.structure(),
            None => &NoStructure,
        }
    }

    pub fn movement(&self) -> Movement<'_> {
        Movement::new(&self.store, &self.config.punctuation)
    }

    pub fn around(&self, at: Position, object: TextObject) -> Option<Scope> {
        self.movement().around(at, object, self.structure())
    }

    pub fn inner(&self, at: Position, object: TextObject) -> Option<Scope> {
        self.movement().inner(at, object, self.structure())
    }

    // ==================== highlight overlay ====================

    pub fn add_highlight(&mut self, name: &str, pattern: &str, style: HighlightStyle) -> Result<()> {
        self.overlay.add(name, pattern, style, &self.store)
    }

    pub fn remove_highlight(&mut self, name: &str) -> bool {
        self.overlay.remove(name, &self.store)
    }

    pub fn highlights(&self) -> &[HighlightSpan] {
        self.overlay.spans()
    }

    pub fn highlights_on_line(&self, line: usize) -> &[HighlightSpan] {
        self.overlay.spans_on_line(line)
    }

    pub fn overlay(&self) -> &HighlightOverlay {
        &self.overlay
    }

    // ==================== event plumbing ====================

    fn begin(&mut self, propagate: bool) {
        if propagate {
            self.bus.emit(&BufferEvent::BeforeChange, &self.store);
        }
        if self.store.normalize_trailing_newline().is_some() {
            self.pending_resync = true;
        }
    }

    fn finish(&mut self, descriptor: ChangeDescriptor, propagate: bool) {
        if propagate {
            self.bus.emit(&BufferEvent::AfterChange, &self.store);
            self.flush_changes(Some(descriptor));
        } else {
            self.pending_resync = true;
        }
    }

    /// Notify the parse tree, the overlay and subscribers of what changed since
    /// the last flush. `None` (or any silent edit in between) reports the
    /// whole document.
    pub fn flush_changes(&mut self, descriptor: Option<ChangeDescriptor>) {
        let change = match descriptor {
            Some(d) if !self.pending_resync => Change::Region(d),
            _ => Change::Whole(ChangeDescriptor::whole(
                self.flushed_len,
                self.flushed_end,
                self.store.len_bytes(),
                self.store.end_point(),
            )),
        };
        self.pending_resync = false;
        self.flushed_len = self.store.len_bytes();
        self.flushed_end = self.store.end_point();

        if let Some(tree) = self.parse_tree.as_mut() {
            match change {
                Change::Region(d) if self.config.incremental_parse => {
                    tree.edit(&d, self.store.get_bytes())
                }
                _ => tree.resync(self.store.get_bytes()),
            }
        }
        if self.config.highlight_on_change {
            self.overlay.refresh(&self.store);
        }

        tracing::debug!(
            buffer = %self.id,
            precise = change.is_precise(),
            start = change.descriptor().start_byte,
            old_end = change.descriptor().old_end_byte,
            new_end = change.descriptor().new_end_byte,
            "buffer changed"
        );
        self.bus.emit(&BufferEvent::Changed(change), &self.store);
    }

    // ==================== character edits ====================

    /// Newline or carriage return splits the line at `at`.
    pub fn insert_char(&mut self, at: Position, c: char, propagate: bool) -> Option<Position> {
        let idx = self.store.position_to_char(at)?;
        self.begin(propagate);

        let (text, end) = if c == '\n' || c == '\r' {
            ("\n".to_string(), Position::new(0, at.line + 1))
        } else {
            (c.to_string(), Position::new(at.col + 1, at.line))
        };
        let descriptor = self.store.splice(idx, idx, &text);

        self.finish(descriptor, propagate);
        Some(end)
    }

    /// Returns the position right after the inserted text.
    pub fn insert_string(&mut self, at: Position, text: &str, propagate: bool) -> Option<Position> {
        let idx = self.store.position_to_char(at)?;
        if text.is_empty() {
            return Some(at);
        }
        let text = normalize_newlines(text);
        self.begin(propagate);

        let descriptor = self.store.splice(idx, idx, &text);
        let end = match text.rfind('\n') {
            Some(last) => Position::new(
                text[last + 1..].chars().count(),
                at.line + memchr::memchr_iter(b'\n', text.as_bytes()).count(),
            ),
            None => Position::new(at.col + text.chars().count(), at.line),
        };

        self.finish(descriptor, propagate);
        Some(end)
    }

    /// Backspace. At column 0 the line is joined onto the previous one.
    pub fn remove_char(&mut self, at: Position, propagate: bool) -> Option<Position> {
        let idx = self.store.position_to_char(at)?;
        if idx == 0 {
            return None;
        }
        let end = if at.col == 0 {
            Position::new(self.store.line_len(at.line - 1)?, at.line - 1)
        } else {
            Position::new(at.col - 1, at.line)
        };
        self.begin(propagate);

        let descriptor = self.store.splice(idx - 1, idx, "");

        self.finish(descriptor, propagate);
        Some(end)
    }

    /// Overwrite the character under `at`; composed as remove then insert.
    pub fn replace_char(&mut self, at: Position, c: char, propagate: bool) -> Option<Position> {
        let idx = self.store.position_to_char(at)?;
        match self.store.char_at(idx) {
            Some(current) if current != '\n' => {}
            _ => return None,
        }
        self.remove_char(Position::new(at.col + 1, at.line), propagate)?;
        self.insert_char(at, c, propagate)?;
        Some(at)
    }

    // ==================== line edits ====================

    /// Insert `text` as a new line before `line` (`line == len_lines()` appends).
    pub fn insert_line(&mut self, line: usize, text: &str, propagate: bool) -> bool {
        if line > self.store.len_lines() {
            tracing::warn!(line, lines = self.store.len_lines(), "insert_line out of range");
            return false;
        }
        let mut image = normalize_newlines(text.strip_suffix('\n').unwrap_or(text));
        image.push('\n');
        self.begin(propagate);

        let Some(descriptor) = self.store.insert_line_image(line, &image) else {
            return false;
        };

        self.finish(descriptor, propagate);
        true
    }

    /// The last remaining line is emptied rather than removed.
    pub fn remove_line(&mut self, line: usize, propagate: bool) -> bool {
        if line >= self.store.len_lines() {
            tracing::warn!(line, lines = self.store.len_lines(), "remove_line out of range");
            return false;
        }
        self.begin(propagate);

        let descriptor = if self.store.len_lines() == 1 {
            self.store.set_line_image(0, "\n")
        } else {
            self.store.remove_line_image(line)
        };
        let Some(descriptor) = descriptor else {
            return false;
        };

        self.finish(descriptor, propagate);
        true
    }

    pub fn replace_line(&mut self, line: usize, text: &str, propagate: bool) -> bool {
        if line >= self.store.len_lines() {
            return false;
        }
        if self.store.len_lines() == 1 {
            self.insert_line(0, text, propagate) && self.remove_line(1, propagate)
        } else {
            self.remove_line(line, propagate) && self.insert_line(line, text, propagate)
        }
    }

    // ==================== scope edits ====================

    /// Char range of a scope, end inclusive, as a half-open range.
    fn scope_chars(&self, scope: &Scope) -> Option<(usize, usize)> {
        let start = self.store.position_to_char(scope.start())?;
        let end = self.store.position_to_char(scope.end())?;
        Some((start, (end + 1).min(self.store.len_chars())))
    }

    fn splice_scope(&mut self, start: usize, end: usize, text: &str, propagate: bool) {
        let mut text = text.to_string();
        if end == self.store.len_chars() && self.store.ends_with_newline() && !text.ends_with('\n')
        {
            text.push('\n');
        }
        self.begin(propagate);
        let descriptor = self.store.splice(start, end, &text);
        self.finish(descriptor, propagate);
    }

    pub fn remove_scope(&mut self, scope: &Scope, propagate: bool) -> bool {
        let Some((start, end)) = self.scope_chars(scope) else {
            return false;
        };
        self.splice_scope(start, end, "", propagate);
        true
    }

    /// Returns the position right after the inserted text.
    pub fn replace_scope(&mut self, scope: &Scope, text: &str, propagate: bool) -> Option<Position> {
        let (start, end) = self.scope_chars(scope)?;
        let text = normalize_newlines(text);
        self.splice_scope(start, end, &text, propagate);
        self.store
            .char_to_position(start + text.chars().count())
            .or_else(|| Some(self.store.end_position()))
    }

    /// Regex replace inside the scope (`$1` style captures). Returns the number
    /// of replacements; zero leaves the document untouched.
    pub fn search_replace_scope(
        &mut self,
        scope: &Scope,
        pattern: &str,
        replacement: &str,
        propagate: bool,
    ) -> Result<usize> {
        let regex = Regex::new(pattern).map_err(|e| Error::pattern(pattern, e))?;
        let Some((start, end)) = self.scope_chars(scope) else {
            return Ok(0);
        };
        let region = self.store.rope().slice(start..end).to_string();
        let count = regex.find_iter(&region).filter(|m| !m.is_empty()).count();
        if count == 0 {
            return Ok(0);
        }
        let replaced = regex.replace_all(&region, replacement);
        self.splice_scope(start, end, &replaced, propagate);
        Ok(count)
    }

    // ==================== undo / redo ====================

    pub fn change_begin(&mut self, at: Position) {
        self.history.change_begin(&self.store, at);
    }

    /// Close the capture opened by `change_begin`. `Ok(true)` when an entry
    /// was pushed; a diff failure discards the capture and is returned.
    pub fn change_end(&mut self, at: Position) -> Result<bool> {
        self.history.change_end(&self.store, at)
    }

    /// Restore the pre-edit content; returns where the edit started.
    pub fn undo(&mut self) -> Option<Position> {
        if !self.history.can_undo() {
            return None;
        }
        self.bus.emit(&BufferEvent::BeforeChange, &self.store);
        let cursor = self.history.undo(&mut self.store)?;
        self.after_history(cursor)
    }

    /// Re-apply the edit; returns where the edit ended.
    pub fn redo(&mut self) -> Option<Position> {
        if !self.history.can_redo() {
            return None;
        }
        self.bus.emit(&BufferEvent::BeforeChange, &self.store);
        let cursor = self.history.redo(&mut self.store)?;
        self.after_history(cursor)
    }

    fn after_history(&mut self, cursor: Position) -> Option<Position> {
        self.pending_resync = true;
        self.bus.emit(&BufferEvent::AfterChange, &self.store);
        self.flush_changes(None);
        tracing::debug!(buffer = %self.id, %cursor, "history applied");
        Some(cursor)
    }

    // ==================== reload ====================

    /// Replace the whole content (e.g. the file changed on disk). Undo history
    /// is dropped since its line numbers no longer mean anything.
    pub fn reload(&mut self, bytes: &[u8]) {
        self.store.replace_all(&String::from_utf8_lossy(bytes));
        self.history.clear();
        self.pending_resync = false;
        self.flushed_len = self.store.len_bytes();
        self.flushed_end = self.store.end_point();

        if let Some(tree) = self.parse_tree.as_mut() {
            tree.resync(self.store.get_bytes());
        }
        self.overlay.refresh(&self.store);

        tracing::debug!(buffer = %self.id, lines = self.store.len_lines(), "buffer reloaded");
        self.bus.emit(&BufferEvent::Reloaded, &self.store);
    }
}

fn normalize_newlines(text: &str) -> String {
    if text.contains('\r') {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/document.rs"]
mod tests;
