//! Cache command implementation
//!
//! Shows statistics for the shared git clone cache, and clears it on
//! request. Size is computed on demand since it walks every checkout.

use crate::cache;
use crate::cli::CacheArgs;
use crate::error::Result;

/// Run the cache command
pub fn run(args: CacheArgs) -> Result<()> {
    if args.clear {
        cache::clear_cache()?;
        println!("Cache cleared successfully.");
        return Ok(());
    }

    show_cache_stats(args.show_size)
}

fn show_cache_stats(show_size: bool) -> Result<()> {
    let stats = cache::cache_stats()?;
    let cache_dir = cache::cache_dir()?;

    println!("Cache Statistics:");
    println!("  Location: {}", cache_dir.display());
    println!("  Repositories: {}", stats.repositories);
    println!("  Checkouts: {}", stats.checkouts);
    if show_size {
        println!("  Size: {}", stats.formatted_size());
    }

    if stats.repositories == 0 {
        println!("\nCache is empty.");
    } else {
        println!("\nRun 'replug cache --clear' to remove everything from cache.");
    }

    Ok(())
}
