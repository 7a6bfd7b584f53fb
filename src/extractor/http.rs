//! HTTP route registration detection.
//!
//! Matches calls shaped `receiver.Name("literal", ...)` where `Name` is in
//! [`ROUTE_VOCABULARY`]:
//!   r.GET("/users", listUsers)
//!   e.POST("/users", createUser)
//!   http.HandleFunc("/health", health)

use serde_json::json;
use tracing::{debug, trace};
use tree_sitter::Node;

use super::Detector;
use super::syntax::{SourceFile, line_of, node_text};
use crate::model::{Confidence, EndpointNode, GraphNode, Metadata};

pub const FRAMEWORK: &str = "Go HTTP";

/// How a vocabulary entry pins down the HTTP verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The method name is the verb (gin, echo).
    Verb,
    /// Generic handler registration; the verb is not in the call.
    Handler,
}

impl Registration {
    pub fn as_str(&self) -> &'static str {
        match self {
            Registration::Verb => "verb",
            Registration::Handler => "handler",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RouteMethod {
    pub name: &'static str,
    pub verb: &'static str,
    pub registration: Registration,
}

/// Method names that register a route, with the verb each one implies.
pub const ROUTE_VOCABULARY: &[RouteMethod] = &[
    RouteMethod { name: "GET", verb: "GET", registration: Registration::Verb },
    RouteMethod { name: "POST", verb: "POST", registration: Registration::Verb },
    RouteMethod { name: "PUT", verb: "PUT", registration: Registration::Verb },
    RouteMethod { name: "DELETE", verb: "DELETE", registration: Registration::Verb },
    RouteMethod { name: "PATCH", verb: "PATCH", registration: Registration::Verb },
    // verb unknown from the call alone; GET is the conservative default
    RouteMethod { name: "HandleFunc", verb: "GET", registration: Registration::Handler },
];

/// Case-sensitive vocabulary lookup.
pub fn classify(method_name: &str) -> Option<&'static RouteMethod> {
    ROUTE_VOCABULARY.iter().find(|entry| entry.name == method_name)
}

pub struct RouteDetector;

impl Detector for RouteDetector {
    fn name(&self) -> &'static str {
        "routes"
    }

    fn detect<'a>(&'a self, file: &'a SourceFile) -> Box<dyn Iterator<Item = GraphNode> + 'a> {
        Box::new(
            file.descendants()
                .filter(|node| node.kind() == "call_expression")
                .filter_map(move |call| route_node(call, file)),
        )
    }
}

fn route_node(call: Node<'_>, file: &SourceFile) -> Option<GraphNode> {
    let source = file.source();
    let function = call.child_by_field_name("function")?;
    let (receiver, method_name) = split_selector_expr(function, source)?;
    let route = classify(method_name)?;

    let Some(path) = first_argument(call).and_then(|arg| string_literal(arg, source)) else {
        trace!(
            line = line_of(call),
            method = method_name,
            "route call without literal path, skipped"
        );
        return None;
    };
    if path.is_empty() {
        return None;
    }

    let line = line_of(call);
    let metadata = Metadata::from([
        ("framework".to_string(), json!(FRAMEWORK)),
        ("receiver".to_string(), json!(receiver)),
        ("registration".to_string(), json!(route.registration.as_str())),
    ]);
    debug!(line, verb = route.verb, path, "endpoint");

    Some(GraphNode::Endpoint(EndpointNode {
        id: format!("{}:{}:{}", file.label(), route.verb, line),
        name: format!("{} {}", route.verb, path),
        file_path: file.label().to_string(),
        line_number: line,
        method: route.verb.to_string(),
        path: path.to_string(),
        parameters: Vec::new(),
        metadata,
        confidence: Confidence::High,
    }))
}

/// `receiver.Name` → (receiver text, Name). Any other callee shape → None.
fn split_selector_expr<'a>(node: Node<'_>, source: &'a str) -> Option<(&'a str, &'a str)> {
    if node.kind() != "selector_expression" {
        return None;
    }
    let operand = node.child_by_field_name("operand")?;
    let field = node.child_by_field_name("field")?;
    Some((node_text(operand, source), node_text(field, source)))
}

fn first_argument(call: Node<'_>) -> Option<Node<'_>> {
    let args = call.child_by_field_name("arguments")?;
    let mut cursor = args.walk();
    args.named_children(&mut cursor)
        .find(|child| child.kind() != "comment")
}

/// Contents of an interpreted or raw string literal, quotes stripped.
fn string_literal<'a>(node: Node<'_>, source: &'a str) -> Option<&'a str> {
    let raw = node_text(node, source);
    match node.kind() {
        "interpreted_string_literal" => raw.strip_prefix('"')?.strip_suffix('"'),
        "raw_string_literal" => raw.strip_prefix('`')?.strip_suffix('`'),
        _ => None,
    }
}
