//! Analysis orchestrator.
//!
//! [`UsageAnalyzer`] owns the configuration, drives the extractors over the
//! target and page file sets, and assembles the usage map consumed by every
//! renderer. The map is mutated only inside [`UsageAnalyzer::run`] and is
//! read-only afterward; re-running recomputes it from scratch.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{info, warn};
use regex::Regex;
use thiserror::Error;

use crate::analysis::{find_dependencies, get_exports, DependencyInfo, UsageMatcher};
use crate::config::{AnalyzerConfig, ConfigError};
use crate::export::{json, markdown};
use crate::files::{self, FileEnumerator, WalkdirEnumerator};
use crate::graph::FlowGraph;

/// Errors produced by the analyzer pipeline. All are fatal to the current
/// invocation; there is no partial-success mode.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to compile matcher: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Failed to process {path}: {source}")]
    Processing { path: String, source: io::Error },

    #[error("Failed to write {path}: {source}")]
    Output { path: String, source: io::Error },
}

/// Result type for analyzer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything recorded about one exported component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentUsage {
    /// Defining file, relative to the project root.
    pub file: String,
    /// Imports found in the defining file that match a configured root.
    pub dependencies: Vec<DependencyInfo>,
    /// Pages referencing the component, insertion order, no duplicates.
    pub used_in_pages: Vec<String>,
}

/// Component name -> usage. BTreeMap so every renderer sees the same order.
pub type UsageMap = BTreeMap<String, ComponentUsage>;

/// Orchestrates scanning and report generation for one project.
pub struct UsageAnalyzer {
    config: AnalyzerConfig,
    export_pattern: Regex,
    project_root: PathBuf,
    enumerator: Box<dyn FileEnumerator>,
    usage: UsageMap,
}

impl UsageAnalyzer {
    /// Creates an analyzer rooted at the nearest `package.json` above the
    /// current directory.
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        let cwd = env::current_dir().map_err(|source| Error::Processing {
            path: ".".to_string(),
            source,
        })?;
        Self::with_root(config, files::find_project_root(&cwd))
    }

    /// Creates an analyzer with an explicit project root.
    pub fn with_root(config: AnalyzerConfig, project_root: PathBuf) -> Result<Self> {
        let export_pattern = config.validate()?;
        Ok(Self {
            config,
            export_pattern,
            project_root,
            enumerator: Box::new(WalkdirEnumerator),
            usage: UsageMap::new(),
        })
    }

    /// Replaces the file enumeration strategy.
    pub fn with_enumerator(mut self, enumerator: Box<dyn FileEnumerator>) -> Self {
        self.enumerator = enumerator;
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// The usage map assembled by the last [`run`](Self::run).
    pub fn usage(&self) -> &UsageMap {
        &self.usage
    }

    fn read_file(path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|source| {
            let error = Error::Processing {
                path: path.display().to_string(),
                source,
            };
            warn!("{error}");
            error
        })
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        self.enumerator
            .list_files(dir, &self.config.file_extensions)
            .map_err(|source| Error::Processing {
                path: dir.display().to_string(),
                source,
            })
    }

    /// Scans target and page files and rebuilds the usage map.
    pub fn run(&mut self) -> Result<&UsageMap> {
        self.usage.clear();

        let targets_dir = self.project_root.join(&self.config.target_path);
        for file in self.list_files(&targets_dir)? {
            let content = Self::read_file(&file)?;
            let component_path = files::relative_path(&self.project_root, &file);
            let dependencies = find_dependencies(
                &content,
                &self.config.component_paths,
                &self.config.file_extensions,
            )?;

            for export_name in get_exports(&content) {
                if !self.export_pattern.is_match(&export_name) {
                    continue;
                }
                if let Some(previous) = self.usage.get(&export_name) {
                    // Later files overwrite earlier ones; surfaced, not fixed.
                    warn!(
                        "Component {export_name} redefined in {component_path}, replacing entry from {}",
                        previous.file
                    );
                }
                self.usage.insert(
                    export_name,
                    ComponentUsage {
                        file: component_path.clone(),
                        dependencies: dependencies.clone(),
                        used_in_pages: Vec::new(),
                    },
                );
            }
        }

        let component_names: Vec<String> = self.usage.keys().cloned().collect();
        let matchers = component_names
            .iter()
            .map(|name| UsageMatcher::new(name))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let pages_dir = self.project_root.join(&self.config.pages_path);
        for page_file in self.list_files(&pages_dir)? {
            let content = Self::read_file(&page_file)?;
            let page_path = files::relative_path(&self.project_root, &page_file);

            for (name, matcher) in component_names.iter().zip(&matchers) {
                if !matcher.is_used_in(&content) {
                    continue;
                }
                if let Some(entry) = self.usage.get_mut(name) {
                    if !entry.used_in_pages.contains(&page_path) {
                        entry.used_in_pages.push(page_path.clone());
                    }
                }
            }
        }

        info!(
            "Analyzed {} components against {} page root",
            self.usage.len(),
            self.config.pages_path
        );
        Ok(&self.usage)
    }

    fn write_report(&self, path: &Path, content: &str) -> Result<()> {
        files::write_file(path, content).map_err(|source| {
            let error = Error::Output {
                path: path.display().to_string(),
                source,
            };
            warn!("{error}");
            error
        })?;
        info!("Report created: {}", path.display());
        Ok(())
    }

    fn output_path(&self, file_name: &str) -> PathBuf {
        self.project_root
            .join(&self.config.output_dir)
            .join(file_name)
    }

    /// Writes `index.md`: one table row per component with links and counts.
    pub fn generate_index(&self) -> Result<PathBuf> {
        let content = markdown::index_markdown(&self.config, &self.usage);
        let path = self.output_path("index.md");
        self.write_report(&path, &content)?;
        Ok(path)
    }

    /// Writes `full-documentation.md`: every component's section in one file.
    pub fn generate_full_documentation(&self) -> Result<PathBuf> {
        let content = markdown::full_markdown(&self.config, &self.usage);
        let path = self.output_path("full-documentation.md");
        self.write_report(&path, &content)?;
        Ok(path)
    }

    /// Writes `component-tree.md`: the aggregate Mermaid flowchart.
    pub fn generate_tree(&self) -> Result<PathBuf> {
        let graph = FlowGraph::from_usage(
            &self.usage,
            &self.config.pages_path,
            &self.config.file_extensions,
        );
        let content = format!("# {} Dependency Tree\n\n{}", self.config.name, graph.render());
        let path = self.output_path("component-tree.md");
        self.write_report(&path, &content)?;
        Ok(path)
    }

    /// Writes `component-dependencies.json`.
    pub fn generate_json(&self) -> Result<PathBuf> {
        let report = json::build_report(&self.config, &self.usage, Utc::now());
        let content = json::to_json_string(&report).map_err(|source| Error::Output {
            path: "component-dependencies.json".to_string(),
            source: io::Error::new(io::ErrorKind::InvalidData, source),
        })?;
        let path = self.output_path("component-dependencies.json");
        self.write_report(&path, &content)?;
        Ok(path)
    }

    /// Writes one `<Name>.md` next to each component's source file.
    pub fn generate_component_docs(&self) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for (name, data) in &self.usage {
            let content = markdown::component_markdown(&self.config, name, data);
            let component_dir = Path::new(&data.file)
                .parent()
                .unwrap_or_else(|| Path::new(""));
            let path = self
                .project_root
                .join(component_dir)
                .join(format!("{name}.md"));
            self.write_report(&path, &content)?;
            written.push(path);
        }
        Ok(written)
    }

    /// Runs every generator over the current usage map.
    pub fn generate_all(&self) -> Result<()> {
        self.generate_index()?;
        self.generate_full_documentation()?;
        self.generate_tree()?;
        self.generate_json()?;
        self.generate_component_docs()?;
        Ok(())
    }
}
