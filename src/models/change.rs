//! 变更描述：每次修改产生的字节/坐标区间，供增量解析使用

use super::position::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeDescriptor {
    pub start_byte: usize,
    pub old_end_byte: usize,
    pub new_end_byte: usize,
    pub start_point: Point,
    pub old_end_point: Point,
    pub new_end_point: Point,
}

impl ChangeDescriptor {
    /// Descriptor for replacing `removed` with `inserted` at `start_byte`/`start_point`.
    pub fn splice(start_byte: usize, start_point: Point, removed: &str, inserted: &str) -> Self {
        Self {
            start_byte,
            old_end_byte: start_byte + removed.len(),
            new_end_byte: start_byte + inserted.len(),
            start_point,
            old_end_point: start_point.advance(removed),
            new_end_point: start_point.advance(inserted),
        }
    }

    /// Descriptor covering the whole document, from an old extent to a new one.
    pub fn whole(old_len: usize, old_end: Point, new_len: usize, new_end: Point) -> Self {
        Self {
            start_byte: 0,
            old_end_byte: old_len,
            new_end_byte: new_len,
            start_point: Point::default(),
            old_end_point: old_end,
            new_end_point: new_end,
        }
    }

    pub fn removed_len(&self) -> usize {
        self.old_end_byte - self.start_byte
    }

    pub fn inserted_len(&self) -> usize {
        self.new_end_byte - self.start_byte
    }

    pub fn is_noop(&self) -> bool {
        self.old_end_byte == self.start_byte && self.new_end_byte == self.start_byte
    }
}

/// A flushed change: either one precise region or "the whole document changed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Region(ChangeDescriptor),
    Whole(ChangeDescriptor),
}

impl Change {
    pub fn descriptor(&self) -> &ChangeDescriptor {
        match self {
            Change::Region(d) | Change::Whole(d) => d,
        }
    }

    pub fn is_precise(&self) -> bool {
        matches!(self, Change::Region(_))
    }
}
