//! Export extraction from raw source text.
//!
//! Pattern matching, not AST parsing: three regex rules cover named export
//! blocks, direct declaration exports and bare default exports. The result
//! is every candidate name found; filtering against the configured export
//! name pattern happens in the orchestrator.

use std::sync::OnceLock;

use regex::Regex;

fn named_export_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"export\s+\{([^}]+)\}").unwrap())
}

fn direct_export_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"export\s+(?:const|function|class)\s+(\w+)").unwrap())
}

fn default_export_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"export\s+default\s+(\w+)").unwrap())
}

/// Returns the names a file exports, deduplicated in first-occurrence order
/// with empty entries removed.
///
/// Tokens inside a named export block are kept as written, so an alias like
/// `Button as PrimaryButton` is captured whole. Default exports are only
/// captured when they are a bare identifier, never an expression or an
/// anonymous function.
pub fn get_exports(content: &str) -> Vec<String> {
    let mut exports = Vec::new();

    for captures in named_export_regex().captures_iter(content) {
        let names = captures.get(1).map(|m| m.as_str()).unwrap_or("");
        for name in names.split(',') {
            exports.push(name.trim().to_string());
        }
    }

    for captures in direct_export_regex().captures_iter(content) {
        if let Some(name) = captures.get(1) {
            exports.push(name.as_str().to_string());
        }
    }

    if let Some(captures) = default_export_regex().captures(content) {
        if let Some(name) = captures.get(1) {
            exports.push(name.as_str().to_string());
        }
    }

    let mut seen = Vec::new();
    for name in exports {
        if !name.is_empty() && !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_export_block() {
        let source = "export { Button, Card };";
        assert_eq!(get_exports(source), vec!["Button", "Card"]);
    }

    #[test]
    fn test_named_export_alias_kept_raw() {
        // Aliases in export blocks are not split; the whole token survives.
        let source = "export { Button as PrimaryButton };";
        assert_eq!(get_exports(source), vec!["Button as PrimaryButton"]);
    }

    #[test]
    fn test_direct_declaration_exports() {
        let source = r#"
export const Button = () => null;
export function Card() {}
export class Modal {}
"#;
        assert_eq!(get_exports(source), vec!["Button", "Card", "Modal"]);
    }

    #[test]
    fn test_default_export_bare_identifier() {
        let source = "const Button = () => null;\nexport default Button;";
        assert_eq!(get_exports(source), vec!["Button"]);
    }

    #[test]
    fn test_default_export_anonymous_ignored() {
        let source = "export default () => null;";
        assert!(get_exports(source).is_empty());
    }

    #[test]
    fn test_duplicates_collapse_across_rules() {
        let source = r#"
export const Button = () => null;
export { Button };
export default Button;
"#;
        assert_eq!(get_exports(source), vec!["Button"]);
    }

    #[test]
    fn test_no_empty_entries() {
        let source = "export { Button, , Card };";
        let exports = get_exports(source);
        assert!(exports.iter().all(|name| !name.is_empty()));
        assert_eq!(exports, vec!["Button", "Card"]);
    }

    #[test]
    fn test_lowercase_candidates_not_filtered_here() {
        // Gatekeeping on the export name pattern happens downstream.
        let source = "export const useToggle = () => null;";
        assert_eq!(get_exports(source), vec!["useToggle"]);
    }

    #[test]
    fn test_order_preserved_by_first_occurrence() {
        let source = r#"
export { Zeta, Alpha };
export const Beta = 1;
"#;
        assert_eq!(get_exports(source), vec!["Zeta", "Alpha", "Beta"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(get_exports("").is_empty());
    }
}
