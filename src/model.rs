use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub type Metadata = BTreeMap<String, Value>;

/// How much downstream consumers should trust a fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    /// Structural AST match.
    High,
    /// Heuristic with validation.
    Medium,
    /// Text search fallback.
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "HIGH",
            Confidence::Medium => "MEDIUM",
            Confidence::Low => "LOW",
        }
    }
}

/// Where a bound endpoint parameter is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ParameterSource {
    Path,
    Query,
    Body,
    Header,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub source: ParameterSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct EndpointNode {
    pub id: String,
    pub name: String,
    pub file_path: String,
    pub line_number: usize,
    pub method: String,
    pub path: String,
    pub parameters: Vec<Parameter>,
    pub metadata: Metadata,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct DatabaseModelNode {
    pub id: String,
    pub name: String,
    pub file_path: String,
    pub line_number: usize,
    pub table_name: String,
    pub columns: Vec<String>,
    pub metadata: Metadata,
    pub confidence: Confidence,
}

/// A single extracted fact. Serialized with a `type` tag naming the variant.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(tag = "type")]
pub enum GraphNode {
    Endpoint(EndpointNode),
    DatabaseModel(DatabaseModelNode),
}

impl GraphNode {
    pub fn id(&self) -> &str {
        match self {
            GraphNode::Endpoint(node) => &node.id,
            GraphNode::DatabaseModel(node) => &node.id,
        }
    }

    pub(crate) fn id_mut(&mut self) -> &mut String {
        match self {
            GraphNode::Endpoint(node) => &mut node.id,
            GraphNode::DatabaseModel(node) => &mut node.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            GraphNode::Endpoint(node) => &node.name,
            GraphNode::DatabaseModel(node) => &node.name,
        }
    }

    pub fn line_number(&self) -> usize {
        match self {
            GraphNode::Endpoint(node) => node.line_number,
            GraphNode::DatabaseModel(node) => node.line_number,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GraphNode::Endpoint(_) => "Endpoint",
            GraphNode::DatabaseModel(_) => "DatabaseModel",
        }
    }

    pub fn as_endpoint(&self) -> Option<&EndpointNode> {
        match self {
            GraphNode::Endpoint(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_model(&self) -> Option<&DatabaseModelNode> {
        match self {
            GraphNode::DatabaseModel(node) => Some(node),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeKind {
    Calls,
    Owns,
    Caches,
    Emits,
    Consumes,
    DependsOn,
    CallsExternal,
    Exposes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct GraphEdge {
    pub source_id: String,
    pub target_id: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
}

/// Frozen output of one run: nodes and edges in discovery order.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ExtractionResult {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    confidence: Confidence,
}

impl ExtractionResult {
    pub(crate) fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>, confidence: Confidence) -> Self {
        Self {
            nodes,
            edges,
            confidence,
        }
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    pub fn endpoints(&self) -> impl Iterator<Item = &EndpointNode> {
        self.nodes.iter().filter_map(GraphNode::as_endpoint)
    }

    pub fn models(&self) -> impl Iterator<Item = &DatabaseModelNode> {
        self.nodes.iter().filter_map(GraphNode::as_model)
    }
}
