//! Markdown renderers: per-component documents, the full aggregate document
//! and the component index.
//!
//! Every renderer assembles its whole document in memory; the orchestrator
//! performs the single write.

use std::path::Path;

use crate::analyzer::{ComponentUsage, UsageMap};
use crate::config::AnalyzerConfig;
use crate::export::group_dependencies;
use crate::graph::FlowGraph;

/// Section toggles for [`component_content`].
#[derive(Debug, Clone, Copy)]
pub struct ContentOptions {
    pub include_header: bool,
    pub include_separator: bool,
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Renders one component's documentation block: file path, embedded
/// flowchart, grouped dependencies and consuming pages.
pub fn component_content(
    config: &AnalyzerConfig,
    component_name: &str,
    data: &ComponentUsage,
    options: ContentOptions,
) -> String {
    let mut output = String::new();

    if options.include_header {
        output.push_str(&format!("# {component_name}\n\n"));
    }

    output.push_str(&format!("> File Path: `{}`\n\n", data.file));

    output.push_str("## Dependency Tree\n\n");
    let graph = FlowGraph::from_component(
        component_name,
        data,
        &config.pages_path,
        &config.file_extensions,
    );
    output.push_str(&graph.render());
    output.push('\n');

    let groups = group_dependencies(&data.dependencies, &config.component_paths);
    for (group_name, deps) in groups.iter() {
        output.push_str(&format!("## {} Dependencies\n", capitalize(group_name)));
        for dep in deps {
            output.push_str(&format!("> - **{}**\n", dep.path));
            output.push_str(&format!(">   - File: `{}`\n", dep.file));
            output.push_str(&format!(">   - Imports: `{}`\n", dep.imports.join(", ")));
        }
        output.push('\n');
    }

    if !data.used_in_pages.is_empty() {
        output.push_str("## Used in Pages\n");
        for page in &data.used_in_pages {
            output.push_str(&format!("> - `{page}`\n"));
        }
        output.push('\n');
    }

    if options.include_separator {
        output.push_str("---\n\n");
    }

    output
}

/// Standalone per-component document, written next to the component source.
pub fn component_markdown(
    config: &AnalyzerConfig,
    component_name: &str,
    data: &ComponentUsage,
) -> String {
    component_content(
        config,
        component_name,
        data,
        ContentOptions {
            include_header: true,
            include_separator: false,
        },
    )
}

/// Full aggregate document: table of contents plus every component block.
pub fn full_markdown(config: &AnalyzerConfig, usage: &UsageMap) -> String {
    let mut output = format!("# {} Complete Documentation\n\n", config.name);
    output.push_str("## Table of Contents\n\n");

    // UsageMap is a BTreeMap, so iteration is already alphabetical.
    for component_name in usage.keys() {
        output.push_str(&format!(
            "- [{component_name}](#{})\n",
            component_name.to_lowercase()
        ));
    }

    output.push_str("\n---\n\n");

    for (component_name, data) in usage {
        output.push_str(&component_content(
            config,
            component_name,
            data,
            ContentOptions {
                include_header: true,
                include_separator: true,
            },
        ));
    }

    output
}

/// Component index: a table with per-component links, dependency counts and
/// page-usage counts.
pub fn index_markdown(config: &AnalyzerConfig, usage: &UsageMap) -> String {
    let mut output = format!("# {} Index\n\n", config.name);
    output.push_str(&format!("Components analyzed: {}\n\n", usage.len()));
    output.push_str("| Component | File | Dependencies | Used in Pages |\n");
    output.push_str("|-----------|------|--------------|---------------|\n");

    for (component_name, data) in usage {
        let doc_path = component_doc_path(&data.file, component_name);
        let link = relative_link(&config.output_dir, &doc_path);
        output.push_str(&format!(
            "| [{component_name}]({link}) | `{}` | {} | {} |\n",
            data.file,
            data.dependencies.len(),
            data.used_in_pages.len()
        ));
    }

    output
}

/// Path of the per-component document, relative to the project root.
fn component_doc_path(component_file: &str, component_name: &str) -> String {
    match Path::new(component_file).parent() {
        Some(dir) if dir != Path::new("") => {
            format!("{}/{component_name}.md", dir.to_string_lossy().replace('\\', "/"))
        }
        _ => format!("{component_name}.md"),
    }
}

/// Link from a directory to a target path, both relative to the project
/// root: strip the common prefix, then climb out of the remaining source
/// segments.
fn relative_link(from_dir: &str, to: &str) -> String {
    let from_segments: Vec<&str> = from_dir.split('/').filter(|s| !s.is_empty()).collect();
    let to_segments: Vec<&str> = to.split('/').filter(|s| !s.is_empty()).collect();

    let common = from_segments
        .iter()
        .zip(&to_segments)
        .take_while(|(a, b)| a == b)
        .count();

    let mut link = "../".repeat(from_segments.len() - common);
    link.push_str(&to_segments[common..].join("/"));
    link
}
