//! Convert command implementation
//!
//! Writes converted bundles under an output directory (current directory by
//! default), which is the project-local counterpart to `install`.

use std::path::PathBuf;

use crate::cli::ConvertArgs;
use crate::error::Result;
use crate::filter::ArtifactFilter;
use crate::path_utils;
use crate::writer::Destinations;

use super::helpers;

/// Run the convert command
pub fn run(args: ConvertArgs, verbose: bool) -> Result<()> {
    // Fail on bad targets and filter patterns before touching the source
    let targets = helpers::resolve_targets(&args.targets)?;
    let filter = args.only.as_deref().map(ArtifactFilter::parse).transpose()?;

    let root = helpers::fetch_source(&args.source)?;
    let mut plugins = helpers::load_plugins(&root, args.plugin.as_deref(), args.all)?;
    if plugins.is_empty() {
        println!("Nothing selected.");
        return Ok(());
    }
    helpers::apply_filter(&mut plugins, filter.as_ref());

    let out = args.out.unwrap_or_else(|| PathBuf::from("."));
    let destinations = Destinations::explicit(path_utils::normalize_root(&out));
    helpers::convert_and_write(&plugins, &targets, &destinations, verbose)
}
