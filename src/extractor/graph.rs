use std::collections::HashMap;

use tracing::debug;

use crate::model::{Confidence, ExtractionResult, GraphEdge, GraphNode};

/// Append-only accumulator for one run; `finish` freezes it.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    seen: HashMap<String, usize>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `node`. A repeated id (same discriminant on the same line)
    /// gets a `#n` suffix so ids stay unique.
    pub fn push_node(&mut self, mut node: GraphNode) {
        let count = self.seen.entry(node.id().to_string()).or_insert(0);
        *count += 1;
        if *count > 1 {
            let id = format!("{}#{}", node.id(), count);
            debug!(id = %id, line = node.line_number(), "repeated id suffixed");
            *node.id_mut() = id;
        }
        self.nodes.push(node);
    }

    pub fn extend_nodes(&mut self, nodes: impl IntoIterator<Item = GraphNode>) {
        for node in nodes {
            self.push_node(node);
        }
    }

    pub fn push_edge(&mut self, edge: GraphEdge) {
        self.edges.push(edge);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn finish(self, confidence: Confidence) -> ExtractionResult {
        ExtractionResult::new(self.nodes, self.edges, confidence)
    }
}
