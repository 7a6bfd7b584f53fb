//! ORM model detection.
//!
//! A struct is a persisted model when it embeds one of [`MODEL_MARKERS`] by
//! value, e.g.
//!
//! ```go
//! type User struct {
//!     gorm.Model
//!     Name string
//! }
//! ```
//!
//! Matching is syntactic and single level: aliases of the marker, pointer
//! embeddings and markers reached through another embedded struct are not
//! recognized.

use serde_json::json;
use tracing::{debug, trace};
use tree_sitter::Node;

use super::Detector;
use super::syntax::{SourceFile, line_of, node_text};
use super::types::render_type;
use crate::model::{Confidence, DatabaseModelNode, GraphNode, Metadata};

/// Embedded base type that marks a struct as a table.
#[derive(Debug, Clone, Copy)]
pub struct ModelMarker {
    pub package: &'static str,
    pub name: &'static str,
    pub framework: &'static str,
}

impl ModelMarker {
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.package, self.name)
    }
}

pub const MODEL_MARKERS: &[ModelMarker] = &[ModelMarker {
    package: "gorm",
    name: "Model",
    framework: "GORM",
}];

pub struct ModelDetector;

impl Detector for ModelDetector {
    fn name(&self) -> &'static str {
        "models"
    }

    fn detect<'a>(&'a self, file: &'a SourceFile) -> Box<dyn Iterator<Item = GraphNode> + 'a> {
        Box::new(
            file.descendants()
                .filter(|node| node.kind() == "type_spec")
                .filter_map(move |spec| model_node(spec, file)),
        )
    }
}

fn model_node(spec: Node<'_>, file: &SourceFile) -> Option<GraphNode> {
    let source = file.source();
    let name_node = spec.child_by_field_name("name")?;
    let type_node = spec.child_by_field_name("type")?;
    if type_node.kind() != "struct_type" {
        return None;
    }
    let name = node_text(name_node, source);
    let fields = struct_fields(type_node);

    let Some(marker) = fields
        .iter()
        .filter(|field| is_embedded(**field))
        .find_map(|field| embedded_marker(*field, source))
    else {
        trace!(line = line_of(spec), name, "struct without model marker, skipped");
        return None;
    };

    let columns: Vec<String> = fields
        .iter()
        .flat_map(|field| field_columns(*field, source))
        .collect();

    let line = line_of(name_node);
    let metadata = Metadata::from([
        ("framework".to_string(), json!(marker.framework)),
        ("marker".to_string(), json!(marker.qualified())),
    ]);
    debug!(line, name, columns = columns.len(), "database model");

    Some(GraphNode::DatabaseModel(DatabaseModelNode {
        id: format!("{}:{}:{}", file.label(), name, line),
        name: name.to_string(),
        file_path: file.label().to_string(),
        line_number: line,
        table_name: table_name(name),
        columns,
        metadata,
        confidence: Confidence::High,
    }))
}

/// Lower-cased name plus `s`; no irregular plurals.
pub fn table_name(type_name: &str) -> String {
    format!("{}s", type_name.to_lowercase())
}

fn struct_fields(struct_node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = struct_node.walk();
    let Some(list) = struct_node
        .children(&mut cursor)
        .find(|child| child.kind() == "field_declaration_list")
    else {
        return Vec::new();
    };
    let mut cursor = list.walk();
    list.named_children(&mut cursor)
        .filter(|child| child.kind() == "field_declaration")
        .collect()
}

fn is_embedded(field: Node<'_>) -> bool {
    field.child_by_field_name("name").is_none()
}

/// The marker embedded by value in `field`, if any. `*gorm.Model` does not count.
fn embedded_marker(field: Node<'_>, source: &str) -> Option<&'static ModelMarker> {
    let mut cursor = field.walk();
    if field.children(&mut cursor).any(|child| child.kind() == "*") {
        return None;
    }
    let ty = field.child_by_field_name("type")?;
    if ty.kind() != "qualified_type" {
        return None;
    }
    let package = node_text(ty.child_by_field_name("package")?, source);
    let name = node_text(ty.child_by_field_name("name")?, source);
    MODEL_MARKERS
        .iter()
        .find(|marker| marker.package == package && marker.name == name)
}

/// One `name:type` column per declared name; embedded fields yield none.
fn field_columns(field: Node<'_>, source: &str) -> Vec<String> {
    let Some(ty) = field.child_by_field_name("type") else {
        return Vec::new();
    };
    let rendered = render_type(ty, source);
    // every declared name gets a column: `A, B int` yields `A:int` and `B:int`, not just `A:int`
    let mut cursor = field.walk();
    field
        .children_by_field_name("name", &mut cursor)
        .map(|name| format!("{}:{}", node_text(name, source), rendered))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn models(source: &str) -> Vec<DatabaseModelNode> {
        let file = SourceFile::parse(Path::new("models.go"), source.to_string()).unwrap();
        ModelDetector
            .detect(&file)
            .filter_map(|node| node.as_model().cloned())
            .collect()
    }

    #[test]
    fn detects_embedded_gorm_model() {
        let found = models(
            "package models\n\ntype User struct {\n    gorm.Model\n    Name string\n    Age  int\n}\n",
        );
        assert_eq!(found.len(), 1);
        let user = &found[0];
        assert_eq!(user.name, "User");
        assert_eq!(user.table_name, "users");
        assert_eq!(user.columns, vec!["Name:string", "Age:int"]);
        assert_eq!(user.id, "models.go:User:3");
        assert_eq!(user.line_number, 3);
        assert_eq!(user.metadata["framework"], "GORM");
        assert_eq!(user.metadata["marker"], "gorm.Model");
    }

    #[test]
    fn columns_keep_declaration_order_and_render_types() {
        let found = models(
            "package models\n\ntype Order struct {\n    Items []*Item\n    gorm.Model\n    Note *string `gorm:\"size:255\"`\n    Meta map[string]string\n    A, B int\n}\n",
        );
        assert_eq!(
            found[0].columns,
            vec![
                "Items:[]*Item",
                "Note:*string",
                "Meta:unknown",
                "A:int",
                "B:int"
            ]
        );
    }

    #[test]
    fn marker_only_struct_has_no_columns() {
        let found = models("package models\n\ntype Empty struct {\n    gorm.Model\n}\n");
        assert_eq!(found.len(), 1);
        assert!(found[0].columns.is_empty());
    }

    #[test]
    fn other_structs_are_ignored() {
        assert!(models("package m\n\ntype A struct {\n    Name string\n}\n").is_empty());
        assert!(models("package m\n\ntype A struct {\n    *gorm.Model\n}\n").is_empty());
        assert!(models("package m\n\ntype A struct {\n    Model gorm.Model\n}\n").is_empty());
        assert!(models("package m\n\ntype A struct {\n    orm.Model\n}\n").is_empty());
        assert!(models("package m\n\ntype A struct {\n    Base\n}\n").is_empty());
        assert!(models("package m\n\ntype A = gorm.Model\n").is_empty());
        assert!(models("package m\n\ntype A gorm.Model\n").is_empty());
    }

    #[test]
    fn grouped_and_local_declarations_are_found() {
        let found = models(
            "package m\n\ntype (\n    A struct {\n        gorm.Model\n    }\n    B struct {\n        gorm.Model\n        Title string\n    }\n)\n\nfunc f() {\n    type Local struct {\n        gorm.Model\n    }\n}\n",
        );
        let names: Vec<_> = found.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "Local"]);
        assert_eq!(found[1].line_number, 7);
        assert_eq!(found[1].columns, vec!["Title:string"]);
    }

    #[test]
    fn table_name_is_naive_plural() {
        assert_eq!(table_name("User"), "users");
        assert_eq!(table_name("OrderItem"), "orderitems");
        assert_eq!(table_name("Person"), "persons");
    }
}
