//! Canonical text for Go type expressions.

use tree_sitter::Node;

use super::syntax::node_text;

pub const UNKNOWN_TYPE: &str = "unknown";

/// Render a type expression as `T`, `pkg.T`, `*T` or `[]T`.
/// Shapes outside that set render as `"unknown"`.
pub fn render_type(node: Node<'_>, source: &str) -> String {
    // peel `*` and `[]` layers iteratively; nesting depth is unbounded
    let mut rendered = String::new();
    let mut current = node;
    loop {
        let (layer, inner) = match current.kind() {
            "pointer_type" => ("*", current.named_child(0)),
            // fixed-length arrays collapse to the slice form
            "slice_type" | "array_type" | "implicit_length_array_type" => {
                ("[]", current.child_by_field_name("element"))
            }
            _ => break,
        };
        let Some(inner) = inner else {
            rendered.push_str(UNKNOWN_TYPE);
            return rendered;
        };
        rendered.push_str(layer);
        current = inner;
    }
    rendered.push_str(&render_base(current, source));
    rendered
}

/// The innermost, non-composite part of a type.
fn render_base(node: Node<'_>, source: &str) -> String {
    match node.kind() {
        "type_identifier" | "identifier" | "package_identifier" | "field_identifier" => {
            node_text(node, source).to_string()
        }
        "qualified_type" => {
            let (Some(package), Some(name)) = (
                node.child_by_field_name("package"),
                node.child_by_field_name("name"),
            ) else {
                return UNKNOWN_TYPE.to_string();
            };
            format!("{}.{}", node_text(package, source), node_text(name, source))
        }
        _ => UNKNOWN_TYPE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::syntax::SourceFile;
    use std::path::Path;

    /// Render the type of the single field `F` in `type T struct { F <ty> }`.
    fn render(ty: &str) -> String {
        let source = format!("package p\n\ntype T struct {{\n    F {ty}\n}}\n");
        let file = SourceFile::parse(Path::new("t.go"), source).unwrap();
        let field = file
            .descendants()
            .find(|node| node.kind() == "field_declaration")
            .unwrap();
        let type_node = field.child_by_field_name("type").unwrap();
        render_type(type_node, file.source())
    }

    #[test]
    fn renders_identifiers() {
        assert_eq!(render("T"), "T");
        assert_eq!(render("string"), "string");
    }

    #[test]
    fn renders_qualified_names() {
        assert_eq!(render("time.Time"), "time.Time");
        assert_eq!(render("*sql.NullString"), "*sql.NullString");
    }

    #[test]
    fn renders_pointers_and_sequences() {
        assert_eq!(render("*T"), "*T");
        assert_eq!(render("[]T"), "[]T");
        assert_eq!(render("[4]byte"), "[]byte");
        assert_eq!(render("[]*Order"), "[]*Order");
        assert_eq!(render("*[]uint"), "*[]uint");
    }

    #[test]
    fn unsupported_shapes_are_unknown() {
        assert_eq!(render("map[string]int"), "unknown");
        assert_eq!(render("chan int"), "unknown");
        assert_eq!(render("func() error"), "unknown");
        assert_eq!(render("[]map[string]any"), "[]unknown");
    }

    #[test]
    fn deep_nesting_renders_without_recursion() {
        let layers = "[]*".repeat(4000);
        assert_eq!(render(&format!("{layers}int")), format!("{layers}int"));

        let slices = "[]".repeat(20_000);
        assert_eq!(render(&format!("{slices}gorm.Model")), format!("{slices}gorm.Model"));
    }
}
