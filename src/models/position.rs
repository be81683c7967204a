//! 坐标模型：字符坐标 Position、字节坐标 Point、选区 Scope

use std::cmp::Ordering;
use std::fmt;

/// (column, line) 坐标，列按原始字符计数（不做 tab 展开）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub col: usize,
    pub line: usize,
}

impl Position {
    pub const fn new(col: usize, line: usize) -> Self {
        Self { col, line }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line.cmp(&other.line).then(self.col.cmp(&other.col))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<(usize, usize)> for Position {
    fn from((col, line): (usize, usize)) -> Self {
        Self::new(col, line)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// (row, column) 坐标，列按字节计数；与增量解析器的约定一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Point {
    pub row: usize,
    pub column: usize,
}

impl Point {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Point reached after writing `text` starting at `self`.
    pub fn advance(self, text: &str) -> Self {
        let bytes = text.as_bytes();
        match memchr::memrchr(b'\n', bytes) {
            Some(last) => Self {
                row: self.row + memchr::memchr_iter(b'\n', bytes).count(),
                column: bytes.len() - last - 1,
            },
            None => Self {
                row: self.row,
                column: self.column + bytes.len(),
            },
        }
    }
}

/// 选区：src/dst 保持用户拖拽的原始方向，start/end 总是有序
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    pub src: Position,
    pub dst: Position,
}

impl Scope {
    pub fn new(src: impl Into<Position>, dst: impl Into<Position>) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
        }
    }

    pub fn start(&self) -> Position {
        self.src.min(self.dst)
    }

    pub fn end(&self) -> Position {
        self.src.max(self.dst)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.start() <= pos && pos <= self.end()
    }

    pub fn is_single_line(&self) -> bool {
        self.src.line == self.dst.line
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/position.rs"]
mod tests;
