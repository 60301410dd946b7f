//! Git clone and checkout via libgit2
//!
//! Authentication is delegated to git's native credential system: SSH agent,
//! keys under ~/.ssh/, and credential helpers. No credentials of our own.

use std::borrow::Cow;
use std::path::Path;

use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{Cred, CredentialType, ErrorClass, FetchOptions, RemoteCallbacks, Repository};

use crate::error::{ReplugError, Result};

/// Clone a repository into `target`.
///
/// Shallow (depth 1) when `shallow` is set and the URL is remote; local
/// file:// clones always fetch full history because libgit2 does not support
/// shallow local transport.
pub fn clone(url: &str, target: &Path, shallow: bool) -> Result<Repository> {
    let mut callbacks = RemoteCallbacks::new();
    setup_auth_callbacks(&mut callbacks);

    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(callbacks);

    let is_local = url.starts_with("file://") || Path::new(url).is_absolute();
    if shallow && !is_local {
        fetch_options.depth(1);
    }

    let mut builder = RepoBuilder::new();
    builder.fetch_options(fetch_options);

    let url_to_clone = normalize_ssh_url(url);
    let url_to_clone = normalize_file_url(&url_to_clone);
    builder
        .clone(url_to_clone.as_ref(), target)
        .map_err(|e| ReplugError::GitCloneFailed {
            url: url.to_string(),
            reason: interpret_git_error(&e),
        })
}

/// Check out a branch, tag, or commit as a detached HEAD
pub fn checkout_ref(repo: &Repository, refname: &str) -> Result<()> {
    let commit = resolve_commit(repo, refname)?;

    repo.set_head_detached(commit.id())
        .map_err(|e| checkout_error(refname, &e))?;

    let mut checkout = CheckoutBuilder::new();
    checkout.force();
    repo.checkout_head(Some(&mut checkout))
        .map_err(|e| checkout_error(refname, &e))
}

fn checkout_error(refname: &str, e: &git2::Error) -> ReplugError {
    ReplugError::GitRefResolveFailed {
        git_ref: refname.to_string(),
        reason: e.message().to_string(),
    }
}

/// Try the ref as written, then as branch, tag, remote branch, raw commit
/// id, and finally whatever revparse makes of it
fn resolve_commit<'a>(repo: &'a Repository, refname: &str) -> Result<git2::Commit<'a>> {
    let candidates = [
        refname.to_string(),
        format!("refs/heads/{refname}"),
        format!("refs/tags/{refname}"),
        format!("refs/remotes/origin/{refname}"),
    ];

    for candidate in &candidates {
        if let Ok(reference) = repo.find_reference(candidate) {
            if let Ok(commit) = reference.peel_to_commit() {
                return Ok(commit);
            }
        }
    }

    if let Ok(oid) = git2::Oid::from_str(refname) {
        if let Ok(commit) = repo.find_commit(oid) {
            return Ok(commit);
        }
    }

    if let Ok(obj) = repo.revparse_single(refname) {
        if let Ok(commit) = obj.peel_to_commit() {
            return Ok(commit);
        }
    }

    Err(ReplugError::GitRefResolveFailed {
        git_ref: refname.to_string(),
        reason: "no matching branch, tag, or commit".to_string(),
    })
}

/// Wire git's credential system into libgit2 callbacks
fn setup_auth_callbacks(callbacks: &mut RemoteCallbacks) {
    callbacks.credentials(|url, username_from_url, allowed_types| {
        if allowed_types.contains(CredentialType::DEFAULT) {
            return Cred::default();
        }

        if allowed_types.contains(CredentialType::SSH_KEY) {
            let username = username_from_url.unwrap_or("git");
            return Cred::ssh_key_from_agent(username).or_else(|_| ssh_key_from_disk(username));
        }

        if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
            return userpass_from_helpers(url, username_from_url);
        }

        Err(auth_error())
    });
}

fn auth_error() -> git2::Error {
    git2::Error::new(
        git2::ErrorCode::Auth,
        ErrorClass::Http,
        "authentication failed",
    )
}

fn ssh_key_from_disk(username: &str) -> std::result::Result<Cred, git2::Error> {
    let ssh_dir = dirs::home_dir().unwrap_or_default().join(".ssh");

    for key_name in &["id_ed25519", "id_rsa", "id_ecdsa"] {
        let private_key = ssh_dir.join(key_name);
        if !private_key.exists() {
            continue;
        }
        let public_key = ssh_dir.join(format!("{key_name}.pub"));
        let public_key = public_key.exists().then_some(public_key);

        if let Ok(cred) = Cred::ssh_key(username, public_key.as_deref(), &private_key, None) {
            return Ok(cred);
        }
    }

    Err(auth_error())
}

fn userpass_from_helpers(
    url: &str,
    username_from_url: Option<&str>,
) -> std::result::Result<Cred, git2::Error> {
    if let Ok(config) = git2::Config::open_default() {
        if let Ok(cred) = Cred::credential_helper(&config, url, username_from_url) {
            return Ok(cred);
        }
    }

    // Anonymous access for public repositories
    for username in [username_from_url.unwrap_or(""), "git"] {
        if let Ok(cred) = Cred::userpass_plaintext(username, "") {
            return Ok(cred);
        }
    }

    Err(auth_error())
}

/// Condense libgit2 errors into messages worth showing
fn interpret_git_error(err: &git2::Error) -> String {
    let msg = err.message().to_lowercase();

    if msg.contains("not found") || msg.contains("404") || msg.contains("authentication replays") {
        "Repository not found".to_string()
    } else if msg.contains("authentication") || msg.contains("credentials") {
        "Authentication failed".to_string()
    } else if msg.contains("permission denied") || msg.contains("access denied") {
        "Permission denied".to_string()
    } else if msg.contains("connection") || msg.contains("network") || msg.contains("timed out") {
        "Network error".to_string()
    } else if err.class() == ErrorClass::Http && msg.contains("certificate") {
        "Certificate error".to_string()
    } else {
        err.message().to_string()
    }
}

/// SCP-style `git@host:path` to `ssh://git@host/path`; libgit2 prefers the
/// explicit form
fn normalize_ssh_url(url: &str) -> Cow<'_, str> {
    if !url.starts_with("git@") {
        return Cow::Borrowed(url);
    }
    match url.find(':') {
        Some(colon) => {
            let host = &url[..colon];
            let path = &url[colon + 1..];
            let path = path.strip_prefix('/').unwrap_or(path);
            Cow::Owned(format!("ssh://{host}/{path}"))
        }
        None => Cow::Borrowed(url),
    }
}

/// Ensure file:// URLs carry the third slash libgit2 expects
fn normalize_file_url(url: &str) -> Cow<'_, str> {
    let Some(after) = url.strip_prefix("file://") else {
        return Cow::Borrowed(url);
    };
    if !after.is_empty() && !after.starts_with('/') {
        return Cow::Owned(format!("file:///{after}"));
    }
    Cow::Borrowed(url)
}
