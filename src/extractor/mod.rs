use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};

use crate::error::Result;
use crate::model::{Confidence, ExtractionResult, GraphNode};

pub mod gorm;
pub mod graph;
pub mod http;
pub mod syntax;
pub mod types;

use graph::GraphBuilder;
use syntax::SourceFile;

/// One independent pass over a parsed file.
pub trait Detector {
    fn name(&self) -> &'static str;

    /// Nodes matched in `file`, in document order.
    fn detect<'a>(&'a self, file: &'a SourceFile) -> Box<dyn Iterator<Item = GraphNode> + 'a>;
}

pub struct Extractor {
    detectors: Vec<Box<dyn Detector>>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self {
            detectors: vec![Box::new(http::RouteDetector), Box::new(gorm::ModelDetector)],
        }
    }
}

impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read, parse and extract `path`. Files over `max_bytes` are rejected.
    pub fn extract_path(&self, path: &Path, max_bytes: u64) -> Result<ExtractionResult> {
        let file = SourceFile::read(path, max_bytes)?;
        Ok(self.extract(&file))
    }

    /// Extract from in-memory `source`, attributing nodes to `path`.
    pub fn extract_source(&self, path: &Path, source: &str) -> Result<ExtractionResult> {
        let file = SourceFile::parse(path, source.to_string())?;
        Ok(self.extract(&file))
    }

    /// Run every detector in order over one tree. Cannot fail.
    pub fn extract(&self, file: &SourceFile) -> ExtractionResult {
        let started = Instant::now();
        let mut builder = GraphBuilder::new();
        for detector in &self.detectors {
            let before = builder.node_count();
            builder.extend_nodes(detector.detect(file));
            debug!(
                detector = detector.name(),
                found = builder.node_count() - before,
                "detector pass"
            );
        }
        let result = builder.finish(Confidence::High);
        info!(
            file = %file.path().display(),
            nodes = result.nodes().len(),
            confidence = result.confidence().as_str(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "extracted"
        );
        result
    }
}
