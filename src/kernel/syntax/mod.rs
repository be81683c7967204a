//! Syntax support (in-process): incremental parse tree kept in step with the buffer.

mod structure;

pub use structure::{Construct, NoStructure, StructureProvider};

use crate::models::ChangeDescriptor;
use std::path::Path;
use tree_sitter::{InputEdit, Parser, Point, Tree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageId {
    Rust,
    Go,
    Python,
    JavaScript,
    TypeScript,
    Tsx,
}

impl LanguageId {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str())? {
            "rs" => Some(Self::Rust),
            "go" => Some(Self::Go),
            "py" | "pyi" => Some(Self::Python),
            "js" | "mjs" | "cjs" | "jsx" => Some(Self::JavaScript),
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" => Some(Self::Tsx),
            _ => None,
        }
    }

    fn grammar(self) -> tree_sitter::Language {
        match self {
            Self::Rust => tree_sitter_rust::language(),
            Self::Go => tree_sitter_go::language(),
            Self::Python => tree_sitter_python::language(),
            Self::JavaScript => tree_sitter_javascript::language(),
            Self::TypeScript => tree_sitter_typescript::language_typescript(),
            Self::Tsx => tree_sitter_typescript::language_tsx(),
        }
    }
}

/// The incremental-parser side of a document.
///
/// `edit` receives a precise single-region change; `resync` re-parses from
/// scratch. Both get the full post-change bytes.
pub trait ParseTree {
    fn edit(&mut self, change: &ChangeDescriptor, text: &[u8]);
    fn resync(&mut self, text: &[u8]);
    fn structure(&self) -> &dyn StructureProvider;
}

pub struct SyntaxTree {
    language: LanguageId,
    parser: Parser,
    tree: Tree,
}

impl SyntaxTree {
    pub fn new(language: LanguageId, text: &[u8]) -> Option<Self> {
        let mut parser = Parser::new();
        if let Err(err) = parser.set_language(language.grammar()) {
            tracing::warn!(?language, error = %err, "grammar rejected by parser");
            return None;
        }
        let tree = parser.parse(text, None)?;
        Some(Self {
            language,
            parser,
            tree,
        })
    }

    pub fn for_path(path: &Path, text: &[u8]) -> Option<Self> {
        Self::new(LanguageId::from_path(path)?, text)
    }

    pub fn language(&self) -> LanguageId {
        self.language
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn has_error(&self) -> bool {
        self.tree.root_node().has_error()
    }
}

impl ParseTree for SyntaxTree {
    fn edit(&mut self, change: &ChangeDescriptor, text: &[u8]) {
        self.tree.edit(&input_edit(change));
        match self.parser.parse(text, Some(&self.tree)) {
            Some(tree) => self.tree = tree,
            None => {
                tracing::debug!(language = ?self.language, "incremental parse failed; resyncing");
                self.resync(text);
            }
        }
    }

    fn resync(&mut self, text: &[u8]) {
        if let Some(tree) = self.parser.parse(text, None) {
            self.tree = tree;
        }
    }

    fn structure(&self) -> &dyn StructureProvider {
        self
    }
}

impl StructureProvider for SyntaxTree {
    fn construct_range(
        &self,
        construct: Construct,
        byte: usize,
        inner: bool,
    ) -> Option<(usize, usize)> {
        structure::find_construct(self.language, &self.tree, construct, byte, inner)
    }
}

fn input_edit(change: &ChangeDescriptor) -> InputEdit {
    let point = |p: crate::models::Point| Point {
        row: p.row,
        column: p.column,
    };
    InputEdit {
        start_byte: change.start_byte,
        old_end_byte: change.old_end_byte,
        new_end_byte: change.new_end_byte,
        start_position: point(change.start_point),
        old_end_position: point(change.old_end_point),
        new_end_position: point(change.new_end_point),
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/syntax.rs"]
mod tests;
