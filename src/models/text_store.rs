//! 文本存储
//!
//! 职责：
//! - 以行序列的形式持有文档（底层 Rope，仅 `\n` 视为换行）
//! - 行列 ↔ 字节偏移映射
//! - 缓存整篇文本，供正则/移动/diff 使用

use super::change::ChangeDescriptor;
use super::position::{Point, Position};
use compact_str::CompactString;
use ropey::{Rope, RopeSlice};
use std::borrow::Cow;
use std::cell::OnceCell;
use std::io::{self, Write};

/// 从 RopeSlice 获取字符串，优先零拷贝
pub fn slice_to_cow(slice: RopeSlice<'_>) -> Cow<'_, str> {
    match slice.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(slice.to_string()),
    }
}

#[derive(Clone)]
pub struct TextStore {
    rope: Rope,
    stream: OnceCell<String>,
}

impl TextStore {
    /// 空文档：一行，仅含换行符
    pub fn new() -> Self {
        Self::from_text("")
    }

    pub fn from_text(text: &str) -> Self {
        let rope = if text.is_empty() {
            Rope::from_str("\n")
        } else {
            Rope::from_str(text)
        };
        Self {
            rope,
            stream: OnceCell::new(),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_text(&String::from_utf8_lossy(bytes))
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    /// 流式写入到 Writer，避免大文件 OOM
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for chunk in self.rope.chunks() {
            writer.write_all(chunk.as_bytes())?;
        }
        Ok(())
    }

    // ==================== 行访问 ====================

    pub fn len_lines(&self) -> usize {
        if self.rope.len_chars() == 0 {
            0
        } else if self.ends_with_newline() {
            self.rope.len_lines() - 1
        } else {
            self.rope.len_lines()
        }
    }

    pub fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn ends_with_newline(&self) -> bool {
        let len = self.rope.len_chars();
        len > 0 && self.rope.char(len - 1) == '\n'
    }

    /// 第 `line` 行，包含行尾换行符
    pub fn line(&self, line: usize) -> Option<Cow<'_, str>> {
        (line < self.len_lines()).then(|| slice_to_cow(self.rope.line(line)))
    }

    /// 行内字符数（不含换行符）
    pub fn line_len(&self, line: usize) -> Option<usize> {
        let slice = self.line_slice(line)?;
        let len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            Some(len - 1)
        } else {
            Some(len)
        }
    }

    pub fn line_slice(&self, line: usize) -> Option<RopeSlice<'_>> {
        (line < self.len_lines()).then(|| self.rope.line(line))
    }

    pub fn lines(&self) -> impl Iterator<Item = Cow<'_, str>> + '_ {
        (0..self.len_lines()).map(|i| slice_to_cow(self.rope.line(i)))
    }

    pub fn snapshot(&self) -> Vec<CompactString> {
        self.lines().map(|l| CompactString::from(l.as_ref())).collect()
    }

    /// 最后一个合法位置（最后一行的末尾字符）
    pub fn end_position(&self) -> Position {
        let last = self.len_lines().saturating_sub(1);
        let len = self.line_len(last).unwrap_or(0);
        if self.ends_with_newline() {
            Position::new(len, last)
        } else {
            Position::new(len.saturating_sub(1), last)
        }
    }

    // ==================== 整篇文本缓存 ====================

    pub fn get_stream(&self) -> &str {
        self.stream.get_or_init(|| self.rope.to_string())
    }

    pub fn get_bytes(&self) -> &[u8] {
        self.get_stream().as_bytes()
    }

    fn invalidate(&mut self) {
        self.stream.take();
    }

    // ==================== 坐标转换 ====================

    pub fn position_to_byte(&self, pos: Position) -> Option<usize> {
        let char_idx = self.position_to_char(pos)?;
        Some(self.rope.char_to_byte(char_idx))
    }

    pub fn byte_to_position(&self, byte: usize) -> Option<Position> {
        let len = self.rope.len_bytes();
        if byte > len || (byte == len && self.ends_with_newline()) || len == 0 {
            return None;
        }
        let char_idx = self.rope.byte_to_char(byte);
        if self.rope.char_to_byte(char_idx) != byte {
            return None;
        }
        self.char_to_position(char_idx)
    }

    /// A position is valid on any character of its line including the newline;
    /// one past the end is valid only on a final line without a newline.
    pub fn position_to_char(&self, pos: Position) -> Option<usize> {
        let slice = self.line_slice(pos.line)?;
        let n = slice.len_chars();
        let has_newline = n > 0 && slice.char(n - 1) == '\n';
        if pos.col < n || (pos.col == n && !has_newline) {
            Some(self.rope.line_to_char(pos.line) + pos.col)
        } else {
            None
        }
    }

    pub fn char_to_position(&self, char_idx: usize) -> Option<Position> {
        let len = self.rope.len_chars();
        if char_idx > len || (char_idx == len && (len == 0 || self.ends_with_newline())) {
            return None;
        }
        let line = self.rope.char_to_line(char_idx);
        Some(Position::new(char_idx - self.rope.line_to_char(line), line))
    }

    pub fn char_at(&self, char_idx: usize) -> Option<char> {
        (char_idx < self.rope.len_chars()).then(|| self.rope.char(char_idx))
    }

    pub fn point_at_byte(&self, byte: usize) -> Point {
        let byte = byte.min(self.rope.len_bytes());
        let row = self.rope.byte_to_line(byte);
        Point::new(row, byte - self.rope.line_to_byte(row))
    }

    pub fn end_point(&self) -> Point {
        self.point_at_byte(self.rope.len_bytes())
    }

    // ==================== 原子修改 ====================

    /// Replace chars `start..end` with `text`. Callers validate the range.
    pub fn splice(&mut self, start: usize, end: usize, text: &str) -> ChangeDescriptor {
        let start_byte = self.rope.char_to_byte(start);
        let start_point = self.point_at_byte(start_byte);
        let removed = slice_to_cow(self.rope.slice(start..end)).into_owned();

        if end > start {
            self.rope.remove(start..end);
        }
        if !text.is_empty() {
            self.rope.insert(start, text);
        }
        self.invalidate();

        ChangeDescriptor::splice(start_byte, start_point, &removed, text)
    }

    /// Append the missing final newline; the first mutation of a freshly
    /// loaded document goes through here.
    pub fn normalize_trailing_newline(&mut self) -> Option<ChangeDescriptor> {
        if self.ends_with_newline() {
            return None;
        }
        let len = self.rope.len_chars();
        Some(self.splice(len, len, "\n"))
    }

    /// Char range of a whole line including its newline.
    pub fn line_char_range(&self, line: usize) -> Option<(usize, usize)> {
        (line < self.len_lines())
            .then(|| (self.rope.line_to_char(line), self.rope.line_to_char(line + 1)))
    }

    /// Insert a raw line image before `line` (`line == len_lines()` appends).
    pub fn insert_line_image(&mut self, line: usize, image: &str) -> Option<ChangeDescriptor> {
        let len_lines = self.len_lines();
        if line > len_lines {
            return None;
        }
        let at = if line == len_lines {
            if len_lines > 0 {
                self.normalize_trailing_newline();
            }
            self.rope.len_chars()
        } else {
            self.rope.line_to_char(line)
        };
        Some(self.splice(at, at, image))
    }

    pub fn remove_line_image(&mut self, line: usize) -> Option<ChangeDescriptor> {
        let (start, end) = self.line_char_range(line)?;
        Some(self.splice(start, end, ""))
    }

    pub fn set_line_image(&mut self, line: usize, image: &str) -> Option<ChangeDescriptor> {
        let (start, end) = self.line_char_range(line)?;
        Some(self.splice(start, end, image))
    }

    /// Swap in an entirely new line sequence (reload surface).
    pub fn replace_all(&mut self, text: &str) {
        self.rope = if text.is_empty() {
            Rope::from_str("\n")
        } else {
            Rope::from_str(text)
        };
        self.invalidate();
    }

    pub(crate) fn ensure_not_empty(&mut self) {
        if self.rope.len_chars() == 0 {
            self.rope.insert_char(0, '\n');
            self.invalidate();
        }
    }
}

impl Default for TextStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextStore")
            .field("lines", &self.len_lines())
            .field("bytes", &self.len_bytes())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/text_store.rs"]
mod tests;
