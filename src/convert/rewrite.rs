//! Shared text rewriting rules
//!
//! Small, pure transforms every converter applies: plugin-root path
//! expansion, argument-placeholder translation, `Tool(specifier)`
//! pseudo-call parsing, and colon-namespace flattening.

/// Claude's plugin-root variable as written in artifact bodies
const PLUGIN_ROOT_VAR: &str = "${CLAUDE_PLUGIN_ROOT}";

/// Claude's positional-arguments placeholder
const ARGUMENTS_VAR: &str = "$ARGUMENTS";

/// Replace `${CLAUDE_PLUGIN_ROOT}` references with the target's dot-directory
pub fn expand_plugin_root(text: &str, dot_dir: &str) -> String {
    text.replace(PLUGIN_ROOT_VAR, dot_dir)
}

/// Replace `$ARGUMENTS` with the target's own placeholder
pub fn rewrite_arguments(text: &str, placeholder: &str) -> String {
    text.replace(ARGUMENTS_VAR, placeholder)
}

/// Parse an `allowed-tools` entry.
///
/// `Bash(git add:*)` parses to `("Bash", Some("git add:*"))`; a bare name
/// parses to `(name, None)`. Malformed parentheses fall back to the whole
/// entry as the tool name.
pub fn parse_tool_call(entry: &str) -> (String, Option<String>) {
    let entry = entry.trim();
    if let Some(open) = entry.find('(') {
        if let Some(close) = entry.rfind(')') {
            if close > open {
                let tool = entry[..open].trim();
                let specifier = entry[open + 1..close].trim();
                if !tool.is_empty() {
                    return (tool.to_string(), Some(specifier.to_string()));
                }
            }
        }
    }
    (entry.to_string(), None)
}

/// Flatten a colon-namespaced artifact name into a relative path
/// (`git:commit` becomes `git/commit`)
pub fn namespace_to_path(name: &str) -> String {
    name.replace(':', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_plugin_root() {
        let body = "Run ${CLAUDE_PLUGIN_ROOT}/scripts/check.sh before merging";
        assert_eq!(
            expand_plugin_root(body, ".opencode"),
            "Run .opencode/scripts/check.sh before merging"
        );
    }

    #[test]
    fn test_rewrite_arguments() {
        assert_eq!(
            rewrite_arguments("Deploy $ARGUMENTS now", "{{args}}"),
            "Deploy {{args}} now"
        );
        assert_eq!(rewrite_arguments("nothing here", "{{args}}"), "nothing here");
    }

    #[test]
    fn test_parse_tool_call_with_specifier() {
        assert_eq!(
            parse_tool_call("Bash(git add:*)"),
            ("Bash".to_string(), Some("git add:*".to_string()))
        );
    }

    #[test]
    fn test_parse_tool_call_bare() {
        assert_eq!(parse_tool_call("Read"), ("Read".to_string(), None));
        assert_eq!(parse_tool_call("  Grep  "), ("Grep".to_string(), None));
    }

    #[test]
    fn test_parse_tool_call_malformed() {
        assert_eq!(parse_tool_call("Bash(oops"), ("Bash(oops".to_string(), None));
        assert_eq!(
            parse_tool_call("(orphan)"),
            ("(orphan)".to_string(), None)
        );
    }

    #[test]
    fn test_namespace_to_path() {
        assert_eq!(namespace_to_path("git:commit"), "git/commit");
        assert_eq!(namespace_to_path("deploy"), "deploy");
        assert_eq!(namespace_to_path("a:b:c"), "a/b/c");
    }
}
