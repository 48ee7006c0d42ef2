//! Analyzer configuration.
//!
//! All options are optional and merge over the defaults below. The defaults
//! mirror a typical `src/components` + `src/pages` front-end layout with
//! `@/`-aliased imports.

use regex::Regex;
use thiserror::Error;

/// Errors produced while validating an [`AnalyzerConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File extension list must not be empty")]
    NoFileExtensions,

    #[error("Component path list must not be empty")]
    NoComponentPaths,

    #[error("Component path at index {index} has an empty {field}")]
    EmptyComponentPathField { index: usize, field: &'static str },

    #[error("Duplicate import prefix: {0}")]
    DuplicateImportPrefix(String),

    #[error("Invalid export name pattern: {0}")]
    InvalidExportPattern(#[from] regex::Error),
}

/// Maps an on-disk component root to the import alias used to reach it.
///
/// The prefix classifies a dependency's origin and reconstructs its file
/// location from an import specifier, so it must be unique per root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentPathConfig {
    /// Directory containing the sources, relative to the project root
    /// (e.g. "src/components").
    pub path: String,
    /// Import alias that resolves to `path` (e.g. "@/components").
    pub import_prefix: String,
}

impl ComponentPathConfig {
    pub fn new(path: impl Into<String>, import_prefix: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            import_prefix: import_prefix.into(),
        }
    }

    /// Last segment of the configured path, used as the matcher base and as
    /// the dependency group name ("src/components" -> "components").
    pub fn base_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or("other")
    }
}

/// Configuration for a [`UsageAnalyzer`](crate::UsageAnalyzer) run.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Report title and artifact name prefix.
    pub name: String,
    /// Component root to scan, relative to the project root.
    pub target_path: String,
    /// Page root to scan for component usage.
    pub pages_path: String,
    /// Ordered extension list; the first entry is used when guessing a
    /// dependency's on-disk file.
    pub file_extensions: Vec<String>,
    /// Import roots used to classify and group dependencies.
    pub component_paths: Vec<ComponentPathConfig>,
    /// Directory receiving the aggregate reports.
    pub output_dir: String,
    /// Filter applied to extracted export names.
    pub export_name_pattern: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            name: "Component".to_string(),
            target_path: "src/components".to_string(),
            pages_path: "src/pages".to_string(),
            file_extensions: vec![".tsx".to_string()],
            component_paths: vec![
                ComponentPathConfig::new("src/components", "@/components"),
                ComponentPathConfig::new("src/elements", "@/elements"),
            ],
            output_dir: "tools/usageAnalyzer".to_string(),
            export_name_pattern: "^[A-Z]".to_string(),
        }
    }
}

impl AnalyzerConfig {
    /// Validates the configuration and compiles the export name filter.
    pub fn validate(&self) -> Result<Regex, ConfigError> {
        if self.file_extensions.is_empty() {
            return Err(ConfigError::NoFileExtensions);
        }
        if self.component_paths.is_empty() {
            return Err(ConfigError::NoComponentPaths);
        }

        let mut seen_prefixes = Vec::new();
        for (index, config) in self.component_paths.iter().enumerate() {
            if config.path.is_empty() {
                return Err(ConfigError::EmptyComponentPathField {
                    index,
                    field: "path",
                });
            }
            if config.import_prefix.is_empty() {
                return Err(ConfigError::EmptyComponentPathField {
                    index,
                    field: "import prefix",
                });
            }
            if seen_prefixes.contains(&config.import_prefix.as_str()) {
                return Err(ConfigError::DuplicateImportPrefix(
                    config.import_prefix.clone(),
                ));
            }
            seen_prefixes.push(config.import_prefix.as_str());
        }

        Ok(Regex::new(&self.export_name_pattern)?)
    }

    /// First configured extension, used for file-location guessing.
    pub fn primary_extension(&self) -> &str {
        self.file_extensions
            .first()
            .map(String::as_str)
            .unwrap_or("")
    }
}
