//! Stateless motion queries over the text store.
//!
//! All scans run over chars of the whole document, so word and bracket motions
//! cross line boundaries. Newlines count as whitespace.

use crate::models::{Position, TextStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CharClass {
    Whitespace,
    Word,
    Punct,
    Other,
}

pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Structural counterpart of a bracket, used by smart scans.
pub fn negation(c: char) -> Option<char> {
    match c {
        '(' => Some(')'),
        ')' => Some('('),
        '[' => Some(']'),
        ']' => Some('['),
        '{' => Some('}'),
        '}' => Some('{'),
        '<' => Some('>'),
        '>' => Some('<'),
        _ => None,
    }
}

#[derive(Clone, Copy)]
pub struct Movement<'a> {
    pub(crate) store: &'a TextStore,
    punctuation: &'a str,
}

impl<'a> Movement<'a> {
    pub fn new(store: &'a TextStore, punctuation: &'a str) -> Self {
        Self { store, punctuation }
    }

    pub(crate) fn class(&self, c: char, big: bool) -> CharClass {
        if c.is_whitespace() {
            CharClass::Whitespace
        } else if big {
            CharClass::Other
        } else if is_word_char(c) {
            CharClass::Word
        } else if self.punctuation.contains(c) {
            CharClass::Punct
        } else {
            CharClass::Other
        }
    }

    fn class_at(&self, idx: usize, big: bool) -> Option<CharClass> {
        self.store.char_at(idx).map(|c| self.class(c, big))
    }

    fn pos(&self, idx: usize) -> Option<Position> {
        self.store.char_to_position(idx)
    }

    // ==================== character search ====================

    pub fn find_next_char(&self, from: Position, target: char, smart: bool) -> Option<Position> {
        let idx = self.store.position_to_char(from)?;
        self.next_char_idx(idx, target, smart)
            .and_then(|i| self.pos(i))
    }

    pub fn find_prev_char(&self, from: Position, target: char, smart: bool) -> Option<Position> {
        let idx = self.store.position_to_char(from)?;
        self.prev_char_idx(idx, target, smart)
            .and_then(|i| self.pos(i))
    }

    /// First `target` after `idx`. With `smart`, each occurrence of the
    /// target's negation opens a level that the next target closes.
    pub(crate) fn next_char_idx(&self, idx: usize, target: char, smart: bool) -> Option<usize> {
        let start = idx + 1;
        if start > self.store.len_chars() {
            return None;
        }
        let opener = if smart { negation(target) } else { None };
        let mut depth = 0usize;
        for (offset, c) in self.store.rope().chars_at(start).enumerate() {
            if c == target {
                if depth == 0 {
                    return Some(start + offset);
                }
                depth -= 1;
            } else if Some(c) == opener {
                depth += 1;
            }
        }
        None
    }

    pub(crate) fn prev_char_idx(&self, idx: usize, target: char, smart: bool) -> Option<usize> {
        if idx > self.store.len_chars() {
            return None;
        }
        let closer = if smart { negation(target) } else { None };
        let mut depth = 0usize;
        let mut chars = self.store.rope().chars_at(idx);
        let mut i = idx;
        while let Some(c) = chars.prev() {
            i -= 1;
            if c == target {
                if depth == 0 {
                    return Some(i);
                }
                depth -= 1;
            } else if Some(c) == closer {
                depth += 1;
            }
        }
        None
    }

    // ==================== word / WORD ====================

    pub fn find_next_word(&self, from: Position, skip_current: bool) -> Option<Position> {
        self.next_start(from, skip_current, false)
    }

    pub fn find_next_big_word(&self, from: Position, skip_current: bool) -> Option<Position> {
        self.next_start(from, skip_current, true)
    }

    pub fn find_prev_word(&self, from: Position, skip_current: bool) -> Option<Position> {
        self.prev_start(from, skip_current, false)
    }

    pub fn find_prev_big_word(&self, from: Position, skip_current: bool) -> Option<Position> {
        self.prev_start(from, skip_current, true)
    }

    pub fn find_word_end(&self, from: Position, skip_current: bool) -> Option<Position> {
        self.next_end(from, skip_current, false)
    }

    pub fn find_big_word_end(&self, from: Position, skip_current: bool) -> Option<Position> {
        self.next_end(from, skip_current, true)
    }

    fn next_start(&self, from: Position, skip_current: bool, big: bool) -> Option<Position> {
        let mut i = self.store.position_to_char(from)?;
        let n = self.store.len_chars();

        if skip_current {
            match self.class_at(i, big) {
                Some(CharClass::Punct) => i += 1,
                Some(cls @ (CharClass::Word | CharClass::Other)) => {
                    while self.class_at(i, big) == Some(cls) {
                        i += 1;
                    }
                }
                Some(CharClass::Whitespace) | None => {}
            }
        }
        while self.class_at(i, big) == Some(CharClass::Whitespace) {
            i += 1;
        }
        (i < n).then(|| self.pos(i)).flatten()
    }

    fn prev_start(&self, from: Position, skip_current: bool, big: bool) -> Option<Position> {
        let mut i = self.store.position_to_char(from)?;
        if skip_current {
            i = i.checked_sub(1)?;
        }
        while self.class_at(i, big) == Some(CharClass::Whitespace) {
            i = i.checked_sub(1)?;
        }
        let cls = self.class_at(i, big)?;
        if matches!(cls, CharClass::Word | CharClass::Other) {
            while i > 0 && self.class_at(i - 1, big) == Some(cls) {
                i -= 1;
            }
        }
        self.pos(i)
    }

    fn next_end(&self, from: Position, skip_current: bool, big: bool) -> Option<Position> {
        let mut i = self.store.position_to_char(from)?;
        if skip_current {
            i += 1;
        }
        while self.class_at(i, big) == Some(CharClass::Whitespace) {
            i += 1;
        }
        let cls = self.class_at(i, big)?;
        if matches!(cls, CharClass::Word | CharClass::Other) {
            while self.class_at(i + 1, big) == Some(cls) {
                i += 1;
            }
        }
        self.pos(i)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/movement.rs"]
mod tests;
