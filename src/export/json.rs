//! JSON report renderer.
//!
//! Structurally the same grouping as the Markdown renderers, serialized with
//! the report name and an ISO-8601 analysis timestamp. The timestamp is an
//! argument so the rest of the document stays byte-stable across runs.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::analyzer::UsageMap;
use crate::config::AnalyzerConfig;
use crate::export::{group_dependencies, DependencyGroups};

/// Root structure of `component-dependencies.json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub name: String,
    pub analyzed_at: String,
    pub components: Vec<ComponentReport>,
}

/// One component's entry in the JSON report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentReport {
    pub name: String,
    pub file: String,
    pub dependencies: DependencyGroups,
    pub used_in_pages: Vec<String>,
}

/// Builds the report from the usage map. Components come out in map order
/// (alphabetical).
pub fn build_report(
    config: &AnalyzerConfig,
    usage: &UsageMap,
    analyzed_at: DateTime<Utc>,
) -> AnalysisReport {
    let components = usage
        .iter()
        .map(|(name, data)| ComponentReport {
            name: name.clone(),
            file: data.file.clone(),
            dependencies: group_dependencies(&data.dependencies, &config.component_paths),
            used_in_pages: data.used_in_pages.clone(),
        })
        .collect();

    AnalysisReport {
        name: config.name.clone(),
        analyzed_at: analyzed_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        components,
    }
}

/// Pretty-prints the report with a trailing newline.
pub fn to_json_string(report: &AnalysisReport) -> serde_json::Result<String> {
    let mut output = serde_json::to_string_pretty(report)?;
    output.push('\n');
    Ok(output)
}
