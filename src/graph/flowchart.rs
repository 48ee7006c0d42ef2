//! Flowchart graph construction and Mermaid rendering.
//!
//! The usage map is turned into a [`FlowGraph`] once, then projected into
//! two diagrams: the full styled `graph TD` and a simplified `graph LR`
//! with pages filtered out, kept as a fallback for rendering engines that
//! choke on the styled variant.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::analyzer::{ComponentUsage, UsageMap};

/// Node classification, which drives styling and output ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Page,
    Component,
    Element,
    Other,
}

impl NodeKind {
    /// Output ordering: pages first, then components, elements, others.
    fn rank(self) -> u8 {
        match self {
            NodeKind::Page => 0,
            NodeKind::Component => 1,
            NodeKind::Element => 2,
            NodeKind::Other => 3,
        }
    }

    /// Mermaid class name for this kind.
    fn class_name(self) -> &'static str {
        match self {
            NodeKind::Page => "page",
            NodeKind::Component => "component",
            NodeKind::Element => "element",
            NodeKind::Other => "other",
        }
    }
}

/// A node in the rendered flowchart.
#[derive(Debug, Clone)]
pub struct FlowNode {
    /// Sanitized identifier. Distinct labels can collide after punctuation
    /// stripping; the first one in wins.
    pub id: String,
    /// Display name.
    pub label: String,
    pub kind: NodeKind,
}

/// Which projection of the graph to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Projection {
    /// `graph TD` with every node, style classes and assignments.
    Full,
    /// `graph LR` with pages and page edges filtered out.
    Simplified,
}

/// Directed flowchart graph built from the usage map.
pub struct FlowGraph {
    graph: DiGraph<FlowNode, ()>,
    indices: HashMap<String, NodeIndex>,
}

/// Replaces every non-alphanumeric character with `_`. Not collision-free:
/// names differing only in punctuation map to the same id.
pub fn sanitize_id(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Classifies a dependency by its logical import path.
fn classify_dependency(path: &str) -> NodeKind {
    if path.contains("/components/") {
        NodeKind::Component
    } else if path.contains("/elements/") {
        NodeKind::Element
    } else {
        NodeKind::Other
    }
}

impl FlowGraph {
    fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            indices: HashMap::new(),
        }
    }

    /// Builds the graph for every component in the usage map.
    pub fn from_usage(usage: &UsageMap, pages_path: &str, extensions: &[String]) -> Self {
        let mut flow = Self::new();
        for (name, data) in usage {
            flow.add_component(name, data, pages_path, extensions);
        }
        flow
    }

    /// Builds the subgraph for a single component, used by the
    /// per-component Markdown documents.
    pub fn from_component(
        name: &str,
        data: &ComponentUsage,
        pages_path: &str,
        extensions: &[String],
    ) -> Self {
        let mut flow = Self::new();
        flow.add_component(name, data, pages_path, extensions);
        flow
    }

    /// Adds a node unless its id is already taken. On collision the earlier
    /// label and kind win.
    fn ensure_node(&mut self, id: &str, label: &str, kind: NodeKind) -> NodeIndex {
        if let Some(&index) = self.indices.get(id) {
            return index;
        }
        let index = self.graph.add_node(FlowNode {
            id: id.to_string(),
            label: label.to_string(),
            kind,
        });
        self.indices.insert(id.to_string(), index);
        index
    }

    fn ensure_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        if self.graph.find_edge(from, to).is_none() {
            self.graph.add_edge(from, to, ());
        }
    }

    fn add_component(
        &mut self,
        component_name: &str,
        data: &ComponentUsage,
        pages_path: &str,
        extensions: &[String],
    ) {
        let source_id = sanitize_id(component_name);
        let source = self.ensure_node(&source_id, component_name, NodeKind::Component);

        for dep in &data.dependencies {
            for import_name in &dep.imports {
                let clean_name = import_name
                    .split(" as ")
                    .next()
                    .unwrap_or("")
                    .trim()
                    .to_string();
                if clean_name == "type" || clean_name == component_name || clean_name.is_empty() {
                    continue;
                }

                let target_id = sanitize_id(&clean_name);
                let kind = classify_dependency(&dep.path);
                let target = self.ensure_node(&target_id, &clean_name, kind);
                self.ensure_edge(source, target);
            }
        }

        for page in &data.used_in_pages {
            let label = page_label(page, pages_path, extensions);
            let page_id = format!("page_{}", sanitize_id(&label));
            let page_node = self.ensure_node(&page_id, &label, NodeKind::Page);
            self.ensure_edge(page_node, source);
        }
    }

    /// Nodes sorted by kind rank, then label.
    fn sorted_nodes(&self) -> Vec<&FlowNode> {
        let mut nodes: Vec<&FlowNode> = self.graph.node_weights().collect();
        nodes.sort_by(|a, b| {
            a.kind
                .rank()
                .cmp(&b.kind.rank())
                .then_with(|| a.label.cmp(&b.label))
        });
        nodes
    }

    /// Edges as `from-->to` composite keys, sorted lexicographically.
    fn sorted_edge_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .graph
            .edge_references()
            .map(|edge| {
                let from = &self.graph[edge.source()].id;
                let to = &self.graph[edge.target()].id;
                format!("{from}-->{to}")
            })
            .collect();
        keys.sort();
        keys
    }

    fn render_diagram(&self, projection: Projection) -> String {
        let direction = match projection {
            Projection::Full => "TD",
            Projection::Simplified => "LR",
        };
        let mut output = format!("```mermaid\ngraph {direction}\n");

        for node in self.sorted_nodes() {
            if projection == Projection::Simplified && node.kind == NodeKind::Page {
                continue;
            }
            output.push_str(&format!("    {}[{}]\n", node.id, node.label));
        }

        for key in self.sorted_edge_keys() {
            if projection == Projection::Simplified && key.contains("page_") {
                continue;
            }
            output.push_str(&format!("    {key}\n"));
        }

        if projection == Projection::Full {
            output.push_str("\n    %% Style definitions\n");
            output.push_str(
                "    classDef component fill:#e1f5fe,stroke:#01579b,stroke-width:2px\n",
            );
            output.push_str("    classDef element fill:#f3e5f5,stroke:#4a148c,stroke-width:2px\n");
            output.push_str("    classDef page fill:#e8f5e8,stroke:#1b5e20,stroke-width:2px\n");
            output.push_str("    classDef other fill:#fff3e0,stroke:#e65100,stroke-width:1px\n");

            output.push_str("\n    %% Style assignments\n");
            let mut assignments: Vec<(&str, &str)> = self
                .graph
                .node_weights()
                .map(|node| (node.id.as_str(), node.kind.class_name()))
                .collect();
            assignments.sort_by(|a, b| a.0.cmp(b.0));
            for (id, class) in assignments {
                output.push_str(&format!("    class {id} {class}\n"));
            }
        }

        output.push_str("```\n");
        output
    }

    /// Renders the full styled diagram followed by the simplified fallback.
    pub fn render(&self) -> String {
        let mut output = self.render_diagram(Projection::Full);
        output.push('\n');
        output.push_str("## Simplified View (if the diagram above fails to render)\n\n");
        output.push_str(&self.render_diagram(Projection::Simplified));
        output
    }
}

/// Page display label: the page path with the pages-path prefix and the file
/// extension stripped.
fn page_label(page: &str, pages_path: &str, extensions: &[String]) -> String {
    let prefix = format!("{}/", pages_path.trim_end_matches('/'));
    let mut label = page.strip_prefix(&prefix).unwrap_or(page);
    for ext in extensions {
        if let Some(stripped) = label.strip_suffix(ext.as_str()) {
            label = stripped;
            break;
        }
    }
    label.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::DependencyInfo;
    use std::collections::BTreeMap;

    fn extensions() -> Vec<String> {
        vec![".tsx".to_string()]
    }

    fn usage(deps: Vec<DependencyInfo>, pages: Vec<&str>) -> ComponentUsage {
        ComponentUsage {
            file: "src/components/Card/index.tsx".to_string(),
            dependencies: deps,
            used_in_pages: pages.into_iter().map(String::from).collect(),
        }
    }

    fn dep(path: &str, imports: Vec<&str>) -> DependencyInfo {
        DependencyInfo {
            path: path.to_string(),
            file: format!("{}.tsx", path.replace("@/", "src/")),
            imports: imports.into_iter().map(String::from).collect(),
        }
    }

    #[test]
    fn test_single_component_renders_both_diagrams() {
        let data = usage(vec![], vec![]);
        let graph = FlowGraph::from_component("Card", &data, "src/pages", &extensions());
        let output = graph.render();

        assert!(output.contains("graph TD"));
        assert!(output.contains("graph LR"));
        assert!(output.contains("    Card[Card]"));
        assert!(output.contains("classDef component"));
        assert!(output.contains("    class Card component"));
    }

    #[test]
    fn test_dependency_edges_and_classification() {
        let data = usage(
            vec![
                dep("@/components/Button", vec!["Button"]),
                dep("@/elements/Icon", vec!["Icon"]),
            ],
            vec![],
        );
        let graph = FlowGraph::from_component("Card", &data, "src/pages", &extensions());
        let output = graph.render();

        assert!(output.contains("    Card-->Button\n"));
        assert!(output.contains("    Card-->Icon\n"));
        assert!(output.contains("    class Button component\n"));
        assert!(output.contains("    class Icon element\n"));
    }

    #[test]
    fn test_page_nodes_and_edges() {
        let data = usage(vec![], vec!["src/pages/home.tsx"]);
        let graph = FlowGraph::from_component("Card", &data, "src/pages", &extensions());
        let output = graph.render();

        assert!(output.contains("    page_home[home]\n"));
        assert!(output.contains("    page_home-->Card\n"));
    }

    #[test]
    fn test_simplified_projection_filters_pages() {
        let data = usage(
            vec![dep("@/components/Button", vec!["Button"])],
            vec!["src/pages/home.tsx"],
        );
        let graph = FlowGraph::from_component("Card", &data, "src/pages", &extensions());
        let simplified = graph.render_diagram(Projection::Simplified);

        assert!(!simplified.contains("page_home"));
        assert!(simplified.contains("    Card-->Button\n"));
        assert!(!simplified.contains("classDef"));
    }

    #[test]
    fn test_self_reference_and_type_literal_skipped() {
        let data = usage(
            vec![dep("@/components/Card", vec!["Card", "type"])],
            vec![],
        );
        let graph = FlowGraph::from_component("Card", &data, "src/pages", &extensions());
        let output = graph.render();

        assert!(!output.contains("Card-->Card"));
        assert!(!output.contains("-->type"));
    }

    #[test]
    fn test_sanitized_id_collision_renders_one_node() {
        // "My-Button" and "My_Button" both sanitize to "My_Button". The graph
        // keeps one node; accepted collision behavior.
        let mut map: UsageMap = BTreeMap::new();
        map.insert(
            "Card".to_string(),
            usage(
                vec![dep("@/components/My-Button", vec!["My-Button", "My_Button"])],
                vec![],
            ),
        );
        let graph = FlowGraph::from_usage(&map, "src/pages", &extensions());
        let output = graph.render_diagram(Projection::Full);

        let declarations = output.matches("My_Button[").count();
        assert_eq!(declarations, 1);
    }

    #[test]
    fn test_node_declared_before_edges_referencing_it() {
        let data = usage(
            vec![dep("@/components/Button", vec!["Button"])],
            vec!["src/pages/home.tsx"],
        );
        let graph = FlowGraph::from_component("Card", &data, "src/pages", &extensions());
        let output = graph.render_diagram(Projection::Full);

        for edge_line in output.lines().filter(|l| l.contains("-->")) {
            let (from, to) = edge_line.trim().split_once("-->").unwrap();
            for id in [from, to] {
                let declaration = format!("    {id}[");
                let decl_pos = output.find(&declaration).unwrap_or_else(|| {
                    panic!("edge references undeclared node: {id}")
                });
                let edge_pos = output.find(edge_line).unwrap();
                assert!(decl_pos < edge_pos, "node {id} declared after its edge");
            }
        }
    }

    #[test]
    fn test_deterministic_output() {
        let mut map: UsageMap = BTreeMap::new();
        map.insert(
            "Card".to_string(),
            usage(
                vec![
                    dep("@/elements/Icon", vec!["Icon"]),
                    dep("@/components/Button", vec!["Button"]),
                ],
                vec!["src/pages/home.tsx", "src/pages/about.tsx"],
            ),
        );

        let first = FlowGraph::from_usage(&map, "src/pages", &extensions()).render();
        let second = FlowGraph::from_usage(&map, "src/pages", &extensions()).render();
        assert_eq!(first, second);
    }

    #[test]
    fn test_node_ordering_by_kind_then_label() {
        let data = usage(
            vec![
                dep("@/elements/Zed", vec!["Zed"]),
                dep("@/components/Alpha", vec!["Alpha"]),
            ],
            vec!["src/pages/home.tsx"],
        );
        let graph = FlowGraph::from_component("Card", &data, "src/pages", &extensions());
        let output = graph.render_diagram(Projection::Full);

        let pos = |needle: &str| output.find(needle).unwrap();
        // pages < components < elements
        assert!(pos("page_home[") < pos("Alpha["));
        assert!(pos("Alpha[") < pos("Card["));
        assert!(pos("Card[") < pos("Zed["));
    }

    #[test]
    fn test_nested_page_path_label() {
        assert_eq!(
            page_label("src/pages/admin/settings.tsx", "src/pages", &extensions()),
            "admin/settings"
        );
    }

    #[test]
    fn test_duplicate_edges_collapse() {
        let data = usage(
            vec![
                dep("@/components/Button", vec!["Button"]),
                dep("@/components/Button", vec!["Button"]),
            ],
            vec![],
        );
        let graph = FlowGraph::from_component("Card", &data, "src/pages", &extensions());
        let output = graph.render_diagram(Projection::Full);

        assert_eq!(output.matches("Card-->Button").count(), 1);
    }
}
