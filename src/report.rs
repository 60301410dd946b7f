//! Advisory events and write reports
//!
//! Converters and the bundle writer never print. They collect advisory
//! events into a [`WriteReport`] and the command layer decides how to render
//! them.

use std::fmt;
use std::path::PathBuf;

/// A non-fatal event produced while converting or writing a bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// An existing file was copied aside before being overwritten
    BackupCreated { original: PathBuf, backup: PathBuf },

    /// An existing config file was not valid JSON; it was backed up and
    /// replaced wholesale instead of merged
    ConfigParseFallback { path: PathBuf, reason: String },

    /// A plugin feature has no representation on the target
    Unsupported { target: String, detail: String },
}

impl Advisory {
    pub fn unsupported(target: &str, detail: impl Into<String>) -> Self {
        Self::Unsupported {
            target: target.to_string(),
            detail: detail.into(),
        }
    }

    /// Warnings get a `warning:` prefix when rendered; backups are plain
    /// informational lines
    pub fn is_warning(&self) -> bool {
        !matches!(self, Self::BackupCreated { .. })
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BackupCreated { original, backup } => {
                write!(f, "Backed up {} to {}", original.display(), backup.display())
            }
            Self::ConfigParseFallback { path, reason } => {
                write!(
                    f,
                    "Existing {} is not valid JSON ({reason}); backed it up and wrote a fresh file",
                    path.display()
                )
            }
            Self::Unsupported { target, detail } => write!(f, "{target}: {detail}"),
        }
    }
}

/// Outcome of writing one bundle to a destination root
#[derive(Debug, Clone, Default)]
pub struct WriteReport {
    /// Files created or updated, in write order
    pub written: Vec<PathBuf>,

    /// Advisory events, in occurrence order
    pub advisories: Vec<Advisory>,
}

impl WriteReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, path: impl Into<PathBuf>) {
        self.written.push(path.into());
    }

    pub fn advise(&mut self, advisory: Advisory) {
        self.advisories.push(advisory);
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Advisory> {
        self.advisories.iter().filter(|a| a.is_warning())
    }
}
