//! File-system primitives for the bundle writer
//!
//! Thin wrappers over std::fs with unified error mapping: idempotent
//! directory creation, line-terminated text writes, pretty JSON read/write
//! (tolerating JSONC comments on read), and recursive merge-copy.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{ReplugError, Result};

fn read_error(path: &Path, e: std::io::Error) -> ReplugError {
    ReplugError::FileReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

fn write_error(path: &Path, e: std::io::Error) -> ReplugError {
    ReplugError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

/// Create a directory and all parents; no error if already present
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| write_error(path, e))
}

/// Ensure the parent directory of a file path exists
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    Ok(())
}

/// Write text with a single trailing newline, creating parent directories
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut content = content.to_string();
    if !content.ends_with('\n') {
        content.push('\n');
    }
    fs::write(path, content).map_err(|e| write_error(path, e))
}

/// Write pretty-printed JSON with a trailing newline
pub fn write_json(path: &Path, value: &Value) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value).map_err(|e| ReplugError::ConfigParseFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    write_text(path, &pretty)
}

/// Read a JSON file, stripping JSONC comments first.
///
/// Returns [`ReplugError::ConfigParseFailed`] on malformed content so callers
/// can distinguish parse failures (recoverable per merge policy) from I/O
/// failures (fatal).
pub fn read_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| read_error(path, e))?;
    let stripped = strip_jsonc_comments(&content);
    serde_json::from_str(&stripped).map_err(|e| ReplugError::ConfigParseFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Recursively copy a directory, overwriting files that already exist.
///
/// Merge-copy semantics: destination files not present in the source are
/// left alone.
pub fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    ensure_dir(dst)?;
    for entry in fs::read_dir(src).map_err(|e| read_error(src, e))? {
        let entry = entry.map_err(|e| read_error(src, e))?;
        let entry_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if entry_path.is_dir() {
            copy_dir(&entry_path, &dst_path)?;
        } else {
            fs::copy(&entry_path, &dst_path).map_err(|e| write_error(&dst_path, e))?;
        }
    }
    Ok(())
}

/// Strip `//` and `/* */` comments from JSONC content, preserving string
/// literals (including escaped quotes) and line numbers for error messages.
pub fn strip_jsonc_comments(content: &str) -> String {
    #[derive(Clone, Copy)]
    enum State {
        Code,
        Str { escaped: bool },
        LineComment,
        BlockComment,
    }

    let mut out = String::with_capacity(content.len());
    let mut state = State::Code;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        state = match state {
            State::Code => match c {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    State::LineComment
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    State::BlockComment
                }
                '"' => {
                    out.push(c);
                    State::Str { escaped: false }
                }
                _ => {
                    out.push(c);
                    State::Code
                }
            },
            State::Str { escaped } => {
                out.push(c);
                if escaped {
                    State::Str { escaped: false }
                } else if c == '\\' {
                    State::Str { escaped: true }
                } else if c == '"' {
                    State::Code
                } else {
                    State::Str { escaped: false }
                }
            }
            State::LineComment => {
                if c == '\n' {
                    out.push(c);
                    State::Code
                } else {
                    State::LineComment
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    State::Code
                } else {
                    if c == '\n' {
                        out.push(c);
                    }
                    State::BlockComment
                }
            }
        };
    }

    out
}
