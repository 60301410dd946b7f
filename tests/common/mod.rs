//! Common test utilities for Replug integration tests

use std::path::PathBuf;
use std::sync::LazyLock;
use tempfile::TempDir;

/// Shared cache directory for spawned replug processes. Statics never drop,
/// so the directory lives in the OS temp location until the OS reclaims it.
static CACHE_DIR: LazyLock<TempDir> =
    LazyLock::new(|| TempDir::new().expect("Failed to create cache directory"));

/// Cache directory to pass as REPLUG_CACHE_DIR so tests never touch the
/// user's real cache
pub fn test_cache_dir() -> PathBuf {
    CACHE_DIR.path().to_path_buf()
}

/// A scratch directory holding plugin sources and output roots
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to the workspace root
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in the workspace, creating parent directories
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the workspace
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in the workspace
    #[allow(dead_code)]
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Names of sibling backups of `path` (same directory, `<name>.bak.` prefix)
    #[allow(dead_code)]
    pub fn backups_of(&self, path: &str) -> Vec<String> {
        let file_path = self.path.join(path);
        let dir = file_path.parent().expect("File path should have a parent");
        let name = file_path
            .file_name()
            .expect("File path should have a name")
            .to_string_lossy()
            .to_string();
        let prefix = format!("{name}.bak.");

        let Ok(entries) = std::fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut backups: Vec<String> = entries
            .filter_map(std::result::Result::ok)
            .map(|e| e.file_name().to_string_lossy().to_string())
            .filter(|n| n.starts_with(&prefix))
            .collect();
        backups.sort();
        backups
    }

    /// Create a Claude plugin directory with one agent, two commands (one
    /// namespaced), a skill, MCP servers, and hooks
    #[allow(dead_code)]
    pub fn create_full_plugin(&self, name: &str) -> PathBuf {
        self.write_file(
            &format!("{name}/.claude-plugin/plugin.json"),
            &format!(r#"{{"name": "{name}", "version": "1.0.0", "description": "Demo plugin"}}"#),
        );
        self.write_file(
            &format!("{name}/agents/reviewer.md"),
            "---\nname: reviewer\ndescription: Reviews code\ntools: Read, Grep\n---\n\nReview the changes carefully.\n",
        );
        self.write_file(
            &format!("{name}/commands/deploy.md"),
            "---\ndescription: Deploy the service\n---\n\nDeploy $ARGUMENTS to production.\n",
        );
        self.write_file(
            &format!("{name}/commands/git/commit.md"),
            "---\ndescription: Commit changes\n---\n\nCommit with a conventional message.\n",
        );
        self.write_file(
            &format!("{name}/skills/pdf-tools/SKILL.md"),
            "---\nname: pdf-tools\ndescription: Extract data from PDFs\n---\n\nUse the bundled scripts.\n",
        );
        self.write_file(&format!("{name}/skills/pdf-tools/extract.py"), "print('x')\n");
        self.write_file(
            &format!("{name}/.mcp.json"),
            r#"{"mcpServers": {"fetch": {"command": "uvx", "args": ["mcp-fetch"]}}}"#,
        );
        self.write_file(
            &format!("{name}/hooks/hooks.json"),
            r#"{"hooks": {"PreToolUse": [{"matcher": "Bash", "hooks": [{"type": "command", "command": "./check.sh"}]}]}}"#,
        );
        self.path.join(name)
    }

    /// Create a minimal plugin with a single command and no manifest
    #[allow(dead_code)]
    pub fn create_bare_plugin(&self, name: &str) -> PathBuf {
        self.write_file(
            &format!("{name}/commands/hello.md"),
            "---\ndescription: Say hello\n---\n\nSay hello.\n",
        );
        self.path.join(name)
    }

    /// Create a marketplace repository with two locally sourced plugins
    #[allow(dead_code)]
    pub fn create_marketplace(&self, name: &str) -> PathBuf {
        self.write_file(
            &format!("{name}/.claude-plugin/marketplace.json"),
            r#"{
  "name": "demo-marketplace",
  "plugins": [
    {"name": "alpha", "source": "./plugins/alpha", "description": "First plugin"},
    {"name": "beta", "source": "./plugins/beta", "description": "Second plugin"}
  ]
}"#,
        );
        self.write_file(
            &format!("{name}/plugins/alpha/commands/alpha-cmd.md"),
            "---\ndescription: Alpha command\n---\n\nRun alpha.\n",
        );
        self.write_file(
            &format!("{name}/plugins/beta/commands/beta-cmd.md"),
            "---\ndescription: Beta command\n---\n\nRun beta.\n",
        );
        self.path.join(name)
    }

    /// Initialize a git repository at `subdir` containing a minimal plugin,
    /// committing everything. Returns the repository path.
    #[allow(dead_code)]
    pub fn create_git_plugin_repo(&self, subdir: &str) -> PathBuf {
        let repo_path = self.path.join(subdir);
        std::fs::create_dir_all(&repo_path).expect("Failed to create repo directory");

        self.write_file(
            &format!("{subdir}/commands/hello.md"),
            "---\ndescription: Say hello\n---\n\nSay hello.\n",
        );

        git(&repo_path, &["init"]);
        git(&repo_path, &["config", "user.email", "test@example.com"]);
        git(&repo_path, &["config", "user.name", "Test User"]);
        git(&repo_path, &["add", "."]);
        git(&repo_path, &["commit", "-m", "Initial commit"]);

        repo_path
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a git command in a directory, panicking on failure
#[allow(dead_code)]
pub fn git(dir: &std::path::Path, args: &[&str]) {
    let status = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .expect("Failed to run git");
    assert!(status.success(), "git {args:?} failed in {}", dir.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_file_operations() {
        let workspace = TestWorkspace::new();
        workspace.write_file("test/file.txt", "hello");
        assert!(workspace.file_exists("test/file.txt"));
        assert_eq!(workspace.read_file("test/file.txt"), "hello");
    }

    #[test]
    fn test_full_plugin_fixture_shape() {
        let workspace = TestWorkspace::new();
        let plugin = workspace.create_full_plugin("demo");
        assert!(plugin.join(".claude-plugin/plugin.json").is_file());
        assert!(plugin.join("commands/git/commit.md").is_file());
        assert!(plugin.join("skills/pdf-tools/extract.py").is_file());
    }
}
