//! Dependency extraction from import statements.
//!
//! Each configured component root contributes one matcher derived from its
//! import prefix. A specifier that matches no configured root is silently
//! skipped; overlapping roots may report the same import twice. Both are
//! deliberate for a best-effort documentation tool.

use regex::Regex;

use crate::config::ComponentPathConfig;

/// A single import relationship discovered in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyInfo {
    /// Logical import specifier: the configured prefix plus the captured
    /// sub-path (e.g. "@/elements/Icon").
    pub path: String,
    /// Best-effort on-disk location. The first configured extension is
    /// appended, so the real file may differ.
    pub file: String,
    /// Imported names, alias-stripped and deduplicated in order.
    pub imports: Vec<String>,
}

/// Compiled matcher for one [`ComponentPathConfig`].
pub struct DependencyMatcher {
    config: ComponentPathConfig,
    regex: Regex,
}

impl DependencyMatcher {
    /// Builds the import matcher for a path config. The pattern accepts a
    /// specifier rooted at the config's last path segment (optionally behind
    /// an `@/` alias) or a relative parent-directory specifier, and captures
    /// the sub-path after it.
    pub fn new(config: &ComponentPathConfig) -> Result<Self, regex::Error> {
        let base = regex::escape(config.base_name());
        let pattern = format!(
            r#"import\s+(?:\{{([^}}]+)\}}|(\w+))\s+from\s+['"](?:@?/)?(?:{base}|\.\.?/[^'"]*)?/([^'"]+)['"]"#
        );
        Ok(Self {
            config: config.clone(),
            regex: Regex::new(&pattern)?,
        })
    }

    /// Returns the dependencies this matcher finds in `content`.
    pub fn find(&self, content: &str, primary_extension: &str) -> Vec<DependencyInfo> {
        let mut dependencies = Vec::new();

        for captures in self.regex.captures_iter(content) {
            let sub_path = match captures.get(3) {
                Some(sub) => sub.as_str(),
                None => continue,
            };

            let mut imports = Vec::new();
            if let Some(named) = captures.get(1) {
                for name in named.as_str().split(',') {
                    let name = strip_alias(name);
                    if name.is_empty() || name.starts_with("type ") {
                        continue;
                    }
                    if !imports.contains(&name) {
                        imports.push(name);
                    }
                }
            }
            if let Some(default) = captures.get(2) {
                let name = default.as_str().to_string();
                if !imports.contains(&name) {
                    imports.push(name);
                }
            }

            dependencies.push(DependencyInfo {
                path: format!("{}/{}", self.config.import_prefix, sub_path),
                file: format!("{}/{}{}", self.config.path, sub_path, primary_extension),
                imports,
            });
        }

        dependencies
    }
}

/// Strips an `as <alias>` suffix, keeping the pre-alias identifier.
fn strip_alias(name: &str) -> String {
    name.trim()
        .split(" as ")
        .next()
        .unwrap_or("")
        .trim()
        .to_string()
}

/// Runs every configured matcher over `content` and concatenates the results
/// in config order. No deduplication across configs.
pub fn find_dependencies(
    content: &str,
    component_paths: &[ComponentPathConfig],
    file_extensions: &[String],
) -> Result<Vec<DependencyInfo>, regex::Error> {
    let primary_extension = file_extensions.first().map(String::as_str).unwrap_or("");
    let mut dependencies = Vec::new();

    for config in component_paths {
        let matcher = DependencyMatcher::new(config)?;
        dependencies.extend(matcher.find(content, primary_extension));
    }

    Ok(dependencies)
}
