//! Install command implementation
//!
//! Same pipeline as `convert`, but bundles land in each target's default
//! home directory unless `--root` overrides the destination.

use crate::cli::InstallArgs;
use crate::error::Result;
use crate::filter::ArtifactFilter;
use crate::path_utils;
use crate::writer::Destinations;

use super::helpers;

/// Run the install command
pub fn run(args: InstallArgs, verbose: bool) -> Result<()> {
    let targets = helpers::resolve_targets(&args.targets)?;
    let filter = args.only.as_deref().map(ArtifactFilter::parse).transpose()?;

    let root = helpers::fetch_source(&args.source)?;
    let mut plugins = helpers::load_plugins(&root, args.plugin.as_deref(), args.all)?;
    if plugins.is_empty() {
        println!("Nothing selected.");
        return Ok(());
    }
    helpers::apply_filter(&mut plugins, filter.as_ref());

    let destinations = match args.root {
        Some(dir) => Destinations::explicit(path_utils::normalize_root(&dir)),
        None => Destinations::home_defaults(),
    };
    helpers::convert_and_write(&plugins, &targets, &destinations, verbose)
}
