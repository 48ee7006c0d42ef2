//! CompTrace - Static component usage analyzer for front-end codebases
//!
//! This crate scans a component directory to discover exported components,
//! the components/elements each one imports, and the pages that reference
//! them, then renders the discovered graph as Markdown documentation,
//! Mermaid flowcharts and a JSON report.

pub mod analysis;
pub mod analyzer;
pub mod config;
pub mod export;
pub mod files;
pub mod graph;

pub use analyzer::{ComponentUsage, UsageAnalyzer, UsageMap};
pub use config::{AnalyzerConfig, ComponentPathConfig};
