//! Command implementations for the Replug CLI

pub mod cache;
pub mod completions;
pub mod convert;
pub mod helpers;
pub mod install;
pub mod targets;
pub mod version;
