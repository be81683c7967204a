//! "inner"/"around" text objects. Ranges are inclusive on both ends.

use super::movement::{CharClass, Movement};
use super::syntax::{Construct, StructureProvider};
use crate::models::{Position, Scope};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextObject {
    Parens,
    Brackets,
    Braces,
    Angles,
    SingleQuote,
    DoubleQuote,
    Backtick,
    Word,
    BigWord,
    Construct(Construct),
}

impl TextObject {
    /// Vim-style key for the object (`b`, `B`, `w`, `"`, ...).
    pub fn from_key(key: char) -> Option<Self> {
        Some(match key {
            '(' | ')' | 'b' => Self::Parens,
            '[' | ']' => Self::Brackets,
            '{' | '}' | 'B' => Self::Braces,
            '<' | '>' => Self::Angles,
            '\'' => Self::SingleQuote,
            '"' => Self::DoubleQuote,
            '`' => Self::Backtick,
            'w' => Self::Word,
            'W' => Self::BigWord,
            'f' => Self::Construct(Construct::Function),
            'c' => Self::Construct(Construct::Class),
            'i' => Self::Construct(Construct::Conditional),
            'l' => Self::Construct(Construct::Loop),
            _ => return None,
        })
    }
}

impl<'a> Movement<'a> {
    pub fn around(
        &self,
        at: Position,
        object: TextObject,
        structure: &dyn StructureProvider,
    ) -> Option<Scope> {
        self.select(at, object, false, structure)
    }

    pub fn inner(
        &self,
        at: Position,
        object: TextObject,
        structure: &dyn StructureProvider,
    ) -> Option<Scope> {
        self.select(at, object, true, structure)
    }

    fn select(
        &self,
        at: Position,
        object: TextObject,
        inner: bool,
        structure: &dyn StructureProvider,
    ) -> Option<Scope> {
        match object {
            TextObject::Parens => self.pair_object(at, '(', ')', inner),
            TextObject::Brackets => self.pair_object(at, '[', ']', inner),
            TextObject::Braces => self.pair_object(at, '{', '}', inner),
            TextObject::Angles => self.pair_object(at, '<', '>', inner),
            TextObject::SingleQuote => self.quote_object(at, '\'', inner),
            TextObject::DoubleQuote => self.quote_object(at, '"', inner),
            TextObject::Backtick => self.quote_object(at, '`', inner),
            TextObject::Word => self.word_object(at, false, inner),
            TextObject::BigWord => self.word_object(at, true, inner),
            TextObject::Construct(construct) => {
                self.construct_object(at, construct, inner, structure)
            }
        }
    }

    fn scope(&self, start: usize, end: usize) -> Option<Scope> {
        if end < start {
            return None;
        }
        Some(Scope::new(
            self.store.char_to_position(start)?,
            self.store.char_to_position(end)?,
        ))
    }

    /// Smallest `open`..`close` pair enclosing `at` (or starting/ending on it).
    fn pair_object(&self, at: Position, open: char, close: char, inner: bool) -> Option<Scope> {
        let idx = self.store.position_to_char(at)?;
        let open_idx = if self.store.char_at(idx) == Some(open) {
            idx
        } else {
            self.prev_char_idx(idx, open, true)?
        };
        let close_idx = self.next_char_idx(open_idx, close, true)?;
        if close_idx < idx {
            return None;
        }

        if inner {
            if close_idx <= open_idx + 1 {
                return None;
            }
            self.scope(open_idx + 1, close_idx - 1)
        } else {
            self.scope(open_idx, close_idx)
        }
    }

    /// Quotes pair up left to right within the cursor's line; backslash escapes
    /// a quote. When the cursor is not inside a pair, the next pair on the
    /// line is used.
    fn quote_object(&self, at: Position, quote: char, inner: bool) -> Option<Scope> {
        let line = self.store.line(at.line)?;
        let chars: Vec<char> = line.trim_end_matches('\n').chars().collect();

        let mut quotes = Vec::new();
        let mut escaped = false;
        for (i, &c) in chars.iter().enumerate() {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                quotes.push(i);
            }
        }

        let (open, close) = quotes
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .find(|&(open, close)| open <= at.col && at.col <= close)
            .or_else(|| {
                quotes
                    .chunks_exact(2)
                    .map(|pair| (pair[0], pair[1]))
                    .find(|&(open, _)| open > at.col)
            })?;

        let (start, end) = if inner {
            if close <= open + 1 {
                return None;
            }
            (open + 1, close - 1)
        } else {
            (open, close)
        };
        Some(Scope::new((start, at.line), (end, at.line)))
    }

    /// Run of same-class chars under the cursor; "around" adds one char each side.
    fn word_object(&self, at: Position, big: bool, inner: bool) -> Option<Scope> {
        let line = self.store.line(at.line)?;
        let chars: Vec<char> = line.trim_end_matches('\n').chars().collect();
        let cls = self.class(*chars.get(at.col)?, big);

        let (mut start, mut end) = if cls == CharClass::Punct {
            (at.col, at.col)
        } else {
            let mut start = at.col;
            while start > 0 && self.class(chars[start - 1], big) == cls {
                start -= 1;
            }
            let mut end = at.col;
            while end + 1 < chars.len() && self.class(chars[end + 1], big) == cls {
                end += 1;
            }
            (start, end)
        };

        if !inner {
            start = start.saturating_sub(1);
            end = (end + 1).min(chars.len() - 1);
        }
        Some(Scope::new((start, at.line), (end, at.line)))
    }

    fn construct_object(
        &self,
        at: Position,
        construct: Construct,
        inner: bool,
        structure: &dyn StructureProvider,
    ) -> Option<Scope> {
        let byte = self.store.position_to_byte(at)?;
        let (start, end) = structure.construct_range(construct, byte, inner)?;
        if end <= start || end > self.store.len_bytes() {
            return None;
        }
        let rope = self.store.rope();
        self.scope(rope.byte_to_char(start), rope.byte_to_char(end) - 1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/text_object.rs"]
mod tests;
