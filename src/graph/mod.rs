//! Graph module for flowchart rendering.
//!
//! Builds a directed graph from the usage map and serializes it as Mermaid
//! flowcharts, one construction pass feeding two rendering projections.

mod flowchart;

pub use flowchart::{sanitize_id, FlowGraph, FlowNode, NodeKind};
