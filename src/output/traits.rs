//! Edge sink trait and implementations

use crate::output::Edge;
use std::io::Write;
use std::sync::Mutex;

/// Destination for emitted edges
///
/// Called concurrently from fetch workers; each call must write the edge as
/// one uninterrupted record.
pub trait EdgeSink: Send + Sync {
    /// Emits a single edge
    fn emit(&self, edge: &Edge);
}

/// Writes each edge as a line on stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl EdgeSink for StdoutSink {
    fn emit(&self, edge: &Edge) {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        if let Err(e) = writeln!(out, "{}", edge).and_then(|_| out.flush()) {
            tracing::warn!("Failed to write edge for {}: {}", edge.source, e);
        }
    }
}

/// Keeps every emitted edge in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    edges: Mutex<Vec<Edge>>,
}

impl CollectingSink {
    /// Creates an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the edges emitted so far, in emission order
    pub fn edges(&self) -> Vec<Edge> {
        self.edges
            .lock()
            .map(|edges| edges.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Returns the emitted edges rendered as output lines
    pub fn lines(&self) -> Vec<String> {
        self.edges().iter().map(Edge::to_string).collect()
    }
}

impl EdgeSink for CollectingSink {
    fn emit(&self, edge: &Edge) {
        let mut edges = self
            .edges
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        edges.push(edge.clone());
    }
}
