//! Structural text objects backed by a parse tree.

use super::LanguageId;
use tree_sitter::{Node, Tree};

/// Language constructs the movement layer can ask a parser about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Construct {
    Function,
    Class,
    Conditional,
    Loop,
    Block,
    Call,
    Parameters,
}

/// Capability interface for "inner/around <construct>" queries.
///
/// Ranges are half-open byte ranges into the current document.
pub trait StructureProvider {
    fn construct_range(&self, construct: Construct, byte: usize, inner: bool)
        -> Option<(usize, usize)>;
}

/// Used when no parser is attached: every construct query is "not found".
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStructure;

impl StructureProvider for NoStructure {
    fn construct_range(&self, _: Construct, _: usize, _: bool) -> Option<(usize, usize)> {
        None
    }
}

pub(super) fn find_construct(
    language: LanguageId,
    tree: &Tree,
    construct: Construct,
    byte: usize,
    inner: bool,
) -> Option<(usize, usize)> {
    let kinds = construct_kinds(language, construct);
    let mut node = tree.root_node().descendant_for_byte_range(byte, byte)?;

    loop {
        if kinds.contains(&node.kind()) {
            return Some(if inner {
                inner_range(node, construct)?
            } else {
                (node.start_byte(), node.end_byte())
            });
        }
        node = node.parent()?;
    }
}

fn inner_range(node: Node<'_>, construct: Construct) -> Option<(usize, usize)> {
    let inner = match construct {
        Construct::Function | Construct::Class | Construct::Loop => {
            node.child_by_field_name("body")?
        }
        Construct::Conditional => node
            .child_by_field_name("consequence")
            .or_else(|| node.child_by_field_name("body"))?,
        Construct::Call => node.child_by_field_name("arguments")?,
        Construct::Block | Construct::Parameters => node,
    };
    Some(strip_delimiters(inner))
}

fn strip_delimiters(node: Node<'_>) -> (usize, usize) {
    let count = node.child_count();
    if count >= 2 {
        if let (Some(first), Some(last)) = (node.child(0), node.child(count - 1)) {
            let paired = matches!(
                (first.kind(), last.kind()),
                ("{", "}") | ("(", ")") | ("[", "]")
            );
            if paired {
                return (first.end_byte(), last.start_byte());
            }
        }
    }
    (node.start_byte(), node.end_byte())
}

fn construct_kinds(language: LanguageId, construct: Construct) -> &'static [&'static str] {
    use Construct::*;
    use LanguageId::*;

    match (language, construct) {
        (Rust, Function) => &["function_item", "closure_expression"],
        (Rust, Class) => &["struct_item", "enum_item", "impl_item", "trait_item"],
        (Rust, Conditional) => &["if_expression"],
        (Rust, Loop) => &["for_expression", "while_expression", "loop_expression"],
        (Rust, Block) => &["block"],
        (Rust, Call) => &["call_expression"],
        (Rust, Parameters) => &["parameters", "closure_parameters"],

        (Go, Function) => &["function_declaration", "method_declaration", "func_literal"],
        (Go, Class) => &["type_declaration"],
        (Go, Conditional) => &["if_statement"],
        (Go, Loop) => &["for_statement"],
        (Go, Block) => &["block"],
        (Go, Call) => &["call_expression"],
        (Go, Parameters) => &["parameter_list"],

        (Python, Function) => &["function_definition", "lambda"],
        (Python, Class) => &["class_definition"],
        (Python, Conditional) => &["if_statement"],
        (Python, Loop) => &["for_statement", "while_statement"],
        (Python, Block) => &["block"],
        (Python, Call) => &["call"],
        (Python, Parameters) => &["parameters"],

        (JavaScript | TypeScript | Tsx, Function) => &[
            "function_declaration",
            "function",
            "function_expression",
            "generator_function_declaration",
            "arrow_function",
            "method_definition",
        ],
        (JavaScript, Class) => &["class_declaration", "class"],
        (TypeScript | Tsx, Class) => &["class_declaration", "class", "interface_declaration"],
        (JavaScript | TypeScript | Tsx, Conditional) => &["if_statement"],
        (JavaScript | TypeScript | Tsx, Loop) => &[
            "for_statement",
            "for_in_statement",
            "while_statement",
            "do_statement",
        ],
        (JavaScript | TypeScript | Tsx, Block) => &["statement_block"],
        (JavaScript | TypeScript | Tsx, Call) => &["call_expression"],
        (JavaScript | TypeScript | Tsx, Parameters) => &["formal_parameters"],
    }
}
