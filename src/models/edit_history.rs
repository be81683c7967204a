//! 编辑历史（快照 + 行级 diff 模型）
//!
//! - change_begin 记录整篇行快照和起始光标，进入捕获状态
//! - change_end 将快照与当前文档做行 diff，非空脚本入 undo 栈
//! - 新编辑清空 redo 栈
//! - undo 光标回到编辑起点，redo 光标回到编辑终点

use super::change_script::ChangeScript;
use super::position::Position;
use super::text_store::TextStore;
use crate::error::Result;
use compact_str::CompactString;
use std::collections::VecDeque;

/// 默认保留的 undo 条目数
pub const DEFAULT_UNDO_LIMIT: usize = 1000;

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub script: ChangeScript,
    pub start: Position,
    pub end: Position,
}

struct Capture {
    snapshot: Vec<CompactString>,
    start: Position,
}

pub struct EditHistory {
    undo: VecDeque<HistoryEntry>,
    redo: Vec<HistoryEntry>,
    capture: Option<Capture>,
    /// 0 表示不限制
    limit: usize,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_UNDO_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            capture: None,
            limit,
        }
    }

    pub fn undo_limit(&self) -> usize {
        self.limit
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// 开始一次逻辑编辑。已在捕获中时保留最外层快照。
    pub fn change_begin(&mut self, store: &TextStore, start: Position) {
        if self.capture.is_some() {
            tracing::debug!(%start, "change_begin while capturing; keeping outer snapshot");
            return;
        }
        self.redo.clear();
        self.capture = Some(Capture {
            snapshot: store.snapshot(),
            start,
        });
    }

    /// 结束捕获。返回是否有新条目入栈。
    ///
    /// diff 结果不可用时丢弃本次捕获并返回错误，undo 栈保持不变。
    pub fn change_end(&mut self, store: &TextStore, end: Position) -> Result<bool> {
        let Some(capture) = self.capture.take() else {
            return Ok(false);
        };

        let current = store.snapshot();
        let script = match ChangeScript::diff(&capture.snapshot, &current) {
            Ok(script) => script,
            Err(err) => {
                tracing::warn!(error = %err, "discarding undo capture");
                return Err(err);
            }
        };

        if script.is_empty() {
            return Ok(false);
        }

        tracing::debug!(
            lines = script.len(),
            start = %capture.start,
            %end,
            "undo entry captured"
        );
        self.undo.push_back(HistoryEntry {
            script,
            start: capture.start,
            end,
        });
        if self.limit > 0 {
            while self.undo.len() > self.limit {
                self.undo.pop_front();
            }
        }
        Ok(true)
    }

    /// 丢弃进行中的捕获
    pub fn cancel_capture(&mut self) -> bool {
        self.capture.take().is_some()
    }

    /// Undo：恢复编辑前内容，返回编辑起点
    pub fn undo(&mut self, store: &mut TextStore) -> Option<Position> {
        if self.cancel_capture() {
            tracing::debug!("undo cancelled an open capture");
        }
        let entry = self.undo.pop_back()?;
        entry.script.apply_undo(store);
        let cursor = entry.start;
        self.redo.push(entry);
        Some(cursor)
    }

    /// Redo：重新应用编辑，返回编辑终点
    pub fn redo(&mut self, store: &mut TextStore) -> Option<Position> {
        if self.cancel_capture() {
            tracing::debug!("redo cancelled an open capture");
        }
        let entry = self.redo.pop()?;
        entry.script.apply_redo(store);
        let cursor = entry.end;
        self.undo.push_back(entry);
        Some(cursor)
    }

    /// 整篇重载后历史失效
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
        self.capture = None;
    }
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/edit_history.rs"]
mod tests;
