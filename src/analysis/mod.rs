//! Source text analysis for CompTrace.
//!
//! This module extracts structural facts from raw source text using regex
//! pattern matching rather than AST parsing. The extractors are isolated
//! behind small contracts so an AST-backed implementation could replace them
//! without touching the rest of the pipeline.
//!
//! # Pieces
//!
//! - [`exports::get_exports`] - names a file exports
//! - [`dependencies::find_dependencies`] - imports matching configured roots
//! - [`usage::UsageMatcher`] - is a component imported or rendered by a page

pub mod dependencies;
pub mod exports;
pub mod usage;

// Re-export main types for convenience
pub use dependencies::{find_dependencies, DependencyInfo, DependencyMatcher};
pub use exports::get_exports;
pub use usage::UsageMatcher;
