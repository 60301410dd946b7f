//! Plugin source parsing
//!
//! A source on the command line is either a local directory or a git
//! repository. Git sources accept GitHub shorthand (`owner/repo`,
//! `github:owner/repo`), full HTTPS/SSH URLs, and `file://` URLs, with an
//! optional `#ref` suffix selecting a branch, tag, or commit.

pub mod git;

use std::path::{Path, PathBuf};

use crate::error::{ReplugError, Result};

/// A parsed plugin source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginSource {
    /// Local plugin directory
    Local { path: PathBuf },
    /// Git repository to fetch
    Git(GitSource),
}

/// Git repository source details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitSource {
    /// Repository URL (HTTPS, SSH, or file://)
    pub url: String,
    /// Branch, tag, or commit; HEAD when absent
    pub git_ref: Option<String>,
}

impl PluginSource {
    /// Parse a source argument.
    ///
    /// Local forms: `.`, `..`, `./x`, `../x`, absolute paths, and bare names
    /// that exist as directories. Everything else goes through the git URL
    /// parser.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ReplugError::InvalidSourceUrl {
                url: input.to_string(),
            });
        }

        let path = Path::new(input);
        let is_local = input == "."
            || input == ".."
            || input.starts_with("./")
            || input.starts_with("../")
            || path.is_absolute()
            || input.starts_with('/')
            // Bare directory names win over shorthand when they exist on disk
            || (!input.contains("://") && !input.contains('#') && path.is_dir());

        if is_local {
            return Ok(PluginSource::Local {
                path: PathBuf::from(input),
            });
        }

        Ok(PluginSource::Git(GitSource::parse(input)?))
    }

    /// Full resolved location for display, shorthand expanded
    pub fn display_url(&self) -> String {
        match self {
            PluginSource::Local { path } => path.display().to_string(),
            PluginSource::Git(git) => git.display(),
        }
    }
}

impl GitSource {
    /// URL plus ref fragment, the way the user would write it
    pub fn display(&self) -> String {
        match &self.git_ref {
            Some(r) => format!("{}#{r}", self.url),
            None => self.url.clone(),
        }
    }

    /// Parse a git source, splitting off a trailing `#ref` fragment
    pub fn parse(input: &str) -> Result<Self> {
        let (main, git_ref) = match input.split_once('#') {
            Some((m, r)) if !r.is_empty() => (m, Some(r.to_string())),
            Some((m, _)) => (m, None),
            None => (input, None),
        };

        Ok(Self {
            url: parse_url(main)?,
            git_ref,
        })
    }
}

/// Expand shorthand to a full URL, or pass a full URL through
fn parse_url(input: &str) -> Result<String> {
    if let Some(rest) = input.strip_prefix("github:") {
        return Ok(format!("https://github.com/{rest}.git"));
    }

    if input.starts_with("https://")
        || input.starts_with("http://")
        || input.starts_with("git@")
        || input.starts_with("ssh://")
        || input.starts_with("file://")
    {
        return Ok(input.to_string());
    }

    if is_github_shorthand(input) {
        return Ok(format!("https://github.com/{input}.git"));
    }

    Err(ReplugError::InvalidSourceUrl {
        url: input.to_string(),
    })
}

/// `owner/repo`: exactly two non-empty segments of URL-safe name characters
fn is_github_shorthand(input: &str) -> bool {
    let mut parts = input.split('/');
    let (Some(owner), Some(repo), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    let valid_segment = |s: &str| {
        !s.is_empty()
            && s.chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    };
    valid_segment(owner) && valid_segment(repo)
}
