//! Go syntax tree provider.
//!
//! Wraps tree-sitter: reads a file, parses it with the Go grammar and
//! rejects trees that contain syntax errors. Tree-sitter recovers from bad
//! input by inserting `ERROR` and missing nodes; such a tree is reported as
//! a parse failure instead of being handed to the detectors.

use crate::error::{ExtractError, Result};
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser, Tree, TreeCursor};

/// A parsed Go file. Immutable once built.
pub struct SourceFile {
    path: PathBuf,
    label: String,
    source: String,
    tree: Tree,
}

impl SourceFile {
    /// Read and parse `path`, refusing files larger than `max_bytes`.
    pub fn read(path: &Path, max_bytes: u64) -> Result<Self> {
        let meta = std::fs::metadata(path).map_err(|source| ExtractError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if meta.len() > max_bytes {
            return Err(ExtractError::TooLarge {
                path: path.to_path_buf(),
                size: meta.len(),
                limit: max_bytes,
            });
        }
        let source = std::fs::read_to_string(path).map_err(|source| ExtractError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, source)
    }

    /// Parse in-memory `source`, attributing nodes to `path`.
    pub fn parse(path: &Path, source: String) -> Result<Self> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_go::LANGUAGE.into())?;
        let Some(tree) = parser.parse(&source, None) else {
            return Err(ExtractError::Parse {
                path: path.to_path_buf(),
                line: 1,
                column: 1,
            });
        };

        let root = tree.root_node();
        if root.has_error() {
            let (line, column) = first_error(root)
                .map(|node| {
                    let pos = node.start_position();
                    (pos.row + 1, pos.column + 1)
                })
                .unwrap_or((1, 1));
            return Err(ExtractError::Parse {
                path: path.to_path_buf(),
                line,
                column,
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            label: path.to_string_lossy().to_string(),
            source,
            tree,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The path as it appears in node ids and `file_path`.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Every node of the tree in pre-order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::new(self.root())
    }

    pub fn text(&self, node: Node<'_>) -> &str {
        node_text(node, &self.source)
    }
}

/// Lazy pre-order walk over a subtree, named and anonymous nodes alike.
pub struct Descendants<'tree> {
    cursor: TreeCursor<'tree>,
    done: bool,
}

impl<'tree> Descendants<'tree> {
    pub fn new(root: Node<'tree>) -> Self {
        Self {
            cursor: root.walk(),
            done: false,
        }
    }
}

impl<'tree> Iterator for Descendants<'tree> {
    type Item = Node<'tree>;

    fn next(&mut self) -> Option<Node<'tree>> {
        if self.done {
            return None;
        }
        let node = self.cursor.node();
        if !self.cursor.goto_first_child() {
            // climb until a sibling exists; the cursor cannot leave its root
            while !self.cursor.goto_next_sibling() {
                if !self.cursor.goto_parent() {
                    self.done = true;
                    break;
                }
            }
        }
        Some(node)
    }
}

fn first_error(root: Node<'_>) -> Option<Node<'_>> {
    Descendants::new(root).find(|node| node.is_error() || node.is_missing())
}

/// 1-indexed line of the node's first byte.
pub fn line_of(node: Node<'_>) -> usize {
    node.start_position().row + 1
}

pub fn node_text<'a>(node: Node<'_>, source: &'a str) -> &'a str {
    source.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<SourceFile> {
        SourceFile::parse(Path::new("test.go"), source.to_string())
    }

    #[test]
    fn walks_in_document_order() {
        let file = parse("package main\n\nfunc a() {}\nfunc b() {}\n").unwrap();
        let names: Vec<_> = file
            .descendants()
            .filter(|node| node.kind() == "identifier")
            .map(|node| file.text(node).to_string())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn descendants_start_with_root() {
        let file = parse("package main\n").unwrap();
        let first = file.descendants().next().unwrap();
        assert_eq!(first.kind(), "source_file");
    }

    #[test]
    fn rejects_syntax_errors_with_position() {
        let err = parse("package main\n\nfunc main() {\n    x := \n").err().unwrap();
        match err {
            ExtractError::Parse { line, .. } => assert!(line >= 3),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn label_keeps_the_given_path() {
        let file = SourceFile::parse(Path::new("./api/routes.go"), "package api\n".to_string())
            .unwrap();
        assert_eq!(file.label(), "./api/routes.go");
        assert_eq!(file.path(), Path::new("./api/routes.go"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = SourceFile::read(Path::new("/nonexistent/dir/x.go"), 1024)
            .err()
            .unwrap();
        assert!(matches!(err, ExtractError::Read { .. }));
    }
}
