//! Named pattern highlights layered over the buffer, independent of syntax colors.
//!
//! Every add/remove/refresh re-scans the whole document line by line; matches
//! never span lines.

use crate::error::{Error, Result};
use crate::models::{Position, TextStore};
use compact_str::CompactString;
use regex::Regex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct HighlightStyle {
    pub fg: Option<u32>,
    pub bg: Option<u32>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub underline: bool,
}

/// `start..end` on a single line, columns in chars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpan {
    pub start: Position,
    pub end: Position,
    pub style: HighlightStyle,
    pub name: CompactString,
}

struct Binding {
    pattern: Regex,
    style: HighlightStyle,
}

#[derive(Default)]
pub struct HighlightOverlay {
    bindings: FxHashMap<CompactString, Binding>,
    spans: Vec<HighlightSpan>,
}

impl HighlightOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `name`, then re-evaluate everything.
    pub fn add(
        &mut self,
        name: &str,
        pattern: &str,
        style: HighlightStyle,
        store: &TextStore,
    ) -> Result<()> {
        let pattern = Regex::new(pattern).map_err(|e| Error::pattern(pattern, e))?;
        self.bindings
            .insert(CompactString::from(name), Binding { pattern, style });
        self.refresh(store);
        Ok(())
    }

    pub fn remove(&mut self, name: &str, store: &TextStore) -> bool {
        if self.bindings.remove(name).is_none() {
            return false;
        }
        self.refresh(store);
        true
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
        self.spans.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn bindings(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(CompactString::as_str)
    }

    pub fn refresh(&mut self, store: &TextStore) {
        self.spans.clear();
        if self.bindings.is_empty() {
            return;
        }

        for (line_idx, line) in store.lines().enumerate() {
            let text = line.strip_suffix('\n').unwrap_or(&line);
            for (name, binding) in &self.bindings {
                let mut col = 0;
                let mut byte = 0;
                for m in binding.pattern.find_iter(text) {
                    if m.is_empty() {
                        continue;
                    }
                    col += text[byte..m.start()].chars().count();
                    let len = m.as_str().chars().count();
                    self.spans.push(HighlightSpan {
                        start: Position::new(col, line_idx),
                        end: Position::new(col + len, line_idx),
                        style: binding.style,
                        name: name.clone(),
                    });
                    col += len;
                    byte = m.end();
                }
            }
        }

        self.spans.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then(a.end.cmp(&b.end))
                .then(a.name.cmp(&b.name))
        });
    }

    pub fn spans(&self) -> &[HighlightSpan] {
        &self.spans
    }

    pub fn spans_on_line(&self, line: usize) -> &[HighlightSpan] {
        let lo = self.spans.partition_point(|s| s.start.line < line);
        let hi = self.spans.partition_point(|s| s.start.line <= line);
        &self.spans[lo..hi]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/highlight.rs"]
mod tests;
