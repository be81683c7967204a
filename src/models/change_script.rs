//! 行级变更脚本：一次逻辑编辑前后的行差异，可正向/反向应用

use super::text_store::TextStore;
use crate::error::{Error, Result};
use compact_str::CompactString;
use similar::{capture_diff_slices, Algorithm, DiffTag};

/// One side of a changed line: its absolute line number on that side and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineImage {
    pub line: usize,
    pub text: CompactString,
}

/// `old` only: the line exists before the edit and not after.
/// `new` only: the line was added. Both: the line was replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineChange {
    pub old: Option<LineImage>,
    pub new: Option<LineImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeScript {
    changes: Vec<LineChange>,
}

impl ChangeScript {
    /// Line diff (Myers) between two snapshots.
    pub fn diff(old: &[CompactString], new: &[CompactString]) -> Result<Self> {
        let mut changes = Vec::new();

        for op in capture_diff_slices(Algorithm::Myers, old, new) {
            let (tag, old_range, new_range) = op.as_tag_tuple();
            if old_range.end > old.len() || new_range.end > new.len() {
                return Err(Error::DiffCorrupted(format!(
                    "{tag:?} {old_range:?}/{new_range:?} outside {}/{} lines",
                    old.len(),
                    new.len()
                )));
            }

            match tag {
                DiffTag::Equal => {}
                DiffTag::Delete | DiffTag::Insert | DiffTag::Replace => {
                    let mut olds = old_range.map(|i| LineImage {
                        line: i,
                        text: old[i].clone(),
                    });
                    let mut news = new_range.map(|i| LineImage {
                        line: i,
                        text: new[i].clone(),
                    });
                    loop {
                        let (o, n) = (olds.next(), news.next());
                        if o.is_none() && n.is_none() {
                            break;
                        }
                        changes.push(LineChange { old: o, new: n });
                    }
                }
            }
        }

        let script = Self { changes };
        script.check_balance(old.len(), new.len())?;
        Ok(script)
    }

    fn check_balance(&self, old_len: usize, new_len: usize) -> Result<()> {
        let removed = self.changes.iter().filter(|c| c.new.is_none()).count();
        let added = self.changes.iter().filter(|c| c.old.is_none()).count();
        if old_len + added != new_len + removed {
            return Err(Error::DiffCorrupted(format!(
                "{old_len} lines -{removed} +{added} does not give {new_len}"
            )));
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn changes(&self) -> &[LineChange] {
        &self.changes
    }

    /// Turn the post-edit document back into the pre-edit one.
    pub fn apply_undo(&self, store: &mut TextStore) {
        Self::apply(store, &self.changes, |c| (c.old.as_ref(), c.new.as_ref()));
    }

    /// Turn the pre-edit document into the post-edit one.
    pub fn apply_redo(&self, store: &mut TextStore) {
        Self::apply(store, &self.changes, |c| (c.new.as_ref(), c.old.as_ref()));
    }

    /// `sides` yields (target, current) images. Structural deletions go in
    /// descending order, insertions ascending, then replacements, so no step
    /// shifts an index a later step relies on.
    fn apply<'a>(
        store: &mut TextStore,
        changes: &'a [LineChange],
        sides: impl Fn(&'a LineChange) -> (Option<&'a LineImage>, Option<&'a LineImage>),
    ) {
        let mut deletions: Vec<usize> = Vec::new();
        let mut insertions: Vec<&LineImage> = Vec::new();
        let mut replacements: Vec<&LineImage> = Vec::new();

        for change in changes {
            match sides(change) {
                (None, Some(current)) => deletions.push(current.line),
                (Some(target), None) => insertions.push(target),
                (Some(target), Some(_)) => replacements.push(target),
                (None, None) => {}
            }
        }

        deletions.sort_unstable_by(|a, b| b.cmp(a));
        for line in deletions {
            store.remove_line_image(line);
        }

        insertions.sort_by_key(|image| image.line);
        for image in insertions {
            store.insert_line_image(image.line, &image.text);
        }

        for image in replacements {
            store.set_line_image(image.line, &image.text);
        }

        store.ensure_not_empty();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/change_script.rs"]
mod tests;
