//! Static extraction of HTTP routes and GORM models from Go source.
//!
//! One file in, one [`model::ExtractionResult`] out: endpoint and database
//! model nodes in discovery order, an (empty for now) edge list and an
//! overall confidence tag. Matching is purely structural over the
//! tree-sitter syntax tree, so every node is reported with `HIGH`
//! confidence.

pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod model;

pub use error::{ExtractError, Result};
pub use extractor::Extractor;
pub use model::{
    Confidence, DatabaseModelNode, EdgeKind, EndpointNode, ExtractionResult, GraphEdge, GraphNode,
    Parameter, ParameterSource,
};

use std::path::Path;

/// Extract from the file at `path` with default limits.
pub fn extract_file(path: &Path) -> Result<ExtractionResult> {
    Extractor::new().extract_path(path, config::Config::get().max_file_bytes)
}

/// JSON Schema of the output document.
pub fn output_schema() -> serde_json::Value {
    let schema = schemars::schema_for!(ExtractionResult);
    serde_json::to_value(schema).unwrap_or_else(|_| serde_json::json!({"type": "object"}))
}
