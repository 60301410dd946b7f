//! Shared plumbing for the convert and install commands
//!
//! Source fetching, marketplace entry selection, and the convert-and-write
//! loop live here so `convert` and `install` stay thin wrappers around
//! their destination policy.

use std::path::{Path, PathBuf};

use console::Style;
use inquire::MultiSelect;

use crate::cache;
use crate::convert::{self, Target};
use crate::error::{ReplugError, Result};
use crate::filter::ArtifactFilter;
use crate::plugin::{self, MarketplaceCatalog, MarketplaceEntry, Plugin};
use crate::report::WriteReport;
use crate::source::PluginSource;
use crate::writer::{self, Destinations};

/// Resolve target names against the registry, rejecting unknown names
/// before any I/O happens
pub fn resolve_targets(names: &[String]) -> Result<Vec<&'static Target>> {
    names.iter().map(|name| convert::find_target(name)).collect()
}

/// Materialize a plugin source as a local directory.
///
/// Local paths are validated to exist; git sources are fetched into the
/// shared cache and the checkout directory is returned.
pub fn fetch_source(source: &str) -> Result<PathBuf> {
    match PluginSource::parse(source)? {
        PluginSource::Local { path } => {
            if !path.is_dir() {
                return Err(ReplugError::PluginNotFound {
                    path: path.display().to_string(),
                });
            }
            Ok(path)
        }
        PluginSource::Git(git) => cache::ensure_repo(&git),
    }
}

/// Load the plugins to convert from a fetched source root.
///
/// A plain plugin directory loads as a single plugin. A marketplace
/// repository goes through entry selection: `--plugin` picks one by name,
/// `--all` takes every locally sourced entry, a single candidate is used
/// directly, and anything else prompts interactively. Returns an empty list
/// when the prompt is cancelled.
pub fn load_plugins(root: &Path, plugin: Option<&str>, all: bool) -> Result<Vec<Plugin>> {
    let Some(catalog) = plugin::load_marketplace(root)? else {
        return Ok(vec![Plugin::load(root)?]);
    };

    let entries = select_entries(&catalog, plugin, all)?;
    entries
        .into_iter()
        .map(|entry| load_entry(root, entry))
        .collect()
}

fn load_entry(root: &Path, entry: &MarketplaceEntry) -> Result<Plugin> {
    let Some(dir) = entry.source_dir() else {
        return Err(ReplugError::PluginNotFound {
            path: format!("{} (externally hosted; convert its repository directly)", entry.name),
        });
    };
    Plugin::load(&root.join(dir))
}

fn select_entries<'a>(
    catalog: &'a MarketplaceCatalog,
    plugin: Option<&str>,
    all: bool,
) -> Result<Vec<&'a MarketplaceEntry>> {
    if let Some(name) = plugin {
        return Ok(vec![catalog.find(name)?]);
    }

    let (local, external): (Vec<&MarketplaceEntry>, Vec<&MarketplaceEntry>) = catalog
        .plugins
        .iter()
        .partition(|entry| entry.source_dir().is_some());
    for entry in &external {
        println!("warning: skipping {} (externally hosted)", entry.name);
    }
    if local.is_empty() {
        return Err(ReplugError::PluginNotFound {
            path: "marketplace (no locally sourced plugins)".to_string(),
        });
    }
    if all || local.len() == 1 {
        return Ok(local);
    }
    pick_entries(local)
}

/// Interactive multi-select over marketplace entries, in catalog order.
/// Single-line items: "name" or "name (description)". Multi-line content
/// breaks inquire's list layout.
fn pick_entries(entries: Vec<&MarketplaceEntry>) -> Result<Vec<&MarketplaceEntry>> {
    let items: Vec<String> = entries
        .iter()
        .map(|entry| match entry.description.as_deref() {
            Some(desc) => format!("{} ({})", entry.name, desc),
            None => entry.name.clone(),
        })
        .collect();

    println!();

    let selection = match MultiSelect::new("Select plugins to convert", items)
        .with_page_size(10)
        .with_help_message(
            "  ↑↓ navigate  space select  enter confirm  type to filter  q/esc cancel",
        )
        .with_scorer(&score_by_name)
        .prompt_skippable()?
    {
        Some(sel) => sel,
        None => return Ok(vec![]),
    };

    // Map display strings back to entries (name is the part before " (")
    let selected = selection
        .iter()
        .filter_map(|item| {
            let name = item.split(" (").next().unwrap_or(item).trim();
            entries.iter().find(|entry| entry.name == name).copied()
        })
        .collect();

    Ok(selected)
}

/// Match filter input against the entry name only, not the description
fn score_by_name(input: &str, _opt: &String, string_value: &str, _idx: usize) -> Option<i64> {
    let name = string_value
        .split(" (")
        .next()
        .unwrap_or(string_value)
        .trim();
    if input.is_empty() {
        return Some(0);
    }
    if name.to_lowercase().contains(&input.to_lowercase()) {
        Some(0)
    } else {
        None
    }
}

/// Apply the `--only` filter to every selected plugin, warning when a
/// plugin is left with nothing at all to convert
pub fn apply_filter(plugins: &mut [Plugin], filter: Option<&ArtifactFilter>) {
    let Some(filter) = filter else { return };
    for plugin in plugins.iter_mut() {
        filter.apply(plugin);
        if plugin.is_empty() {
            println!("warning: filter excluded everything in {}", plugin.name());
        }
    }
}

/// Convert every selected plugin for every requested target and write the
/// resulting bundles. Prints one summary line per bundle plus any advisory
/// events the converter and writer collected.
pub fn convert_and_write(
    plugins: &[Plugin],
    targets: &[&'static Target],
    destinations: &Destinations,
    verbose: bool,
) -> Result<()> {
    for plugin in plugins {
        for target in targets {
            let bundle = (target.convert)(plugin);
            let root = destinations.root_for(&target.layout)?;
            let report = writer::write_bundle(&target.layout, &bundle, &root)?;
            print_report(plugin.name(), target, &root, &report, verbose);
        }
    }
    Ok(())
}

fn print_report(
    plugin_name: &str,
    target: &Target,
    root: &Path,
    report: &WriteReport,
    verbose: bool,
) {
    let home = target.layout.resolve_home(root);
    println!(
        "Converted {} for {}: {} file(s) in {}",
        Style::new().bold().yellow().apply_to(plugin_name),
        Style::new().bold().apply_to(target.layout.display_name),
        report.written.len(),
        home.display()
    );
    if verbose {
        for path in &report.written {
            println!("  - {}", path.display());
        }
    }
    for advisory in &report.advisories {
        if advisory.is_warning() {
            println!("warning: {advisory}");
        } else {
            println!("{advisory}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn catalog_from(json: serde_json::Value) -> MarketplaceCatalog {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_resolve_targets_rejects_unknown_upfront() {
        let names = vec!["opencode".to_string(), "zed".to_string()];
        let err = resolve_targets(&names).unwrap_err();
        assert!(err.to_string().contains("zed"));
    }

    #[test]
    fn test_resolve_targets_preserves_order() {
        let names = vec!["pi".to_string(), "gemini".to_string()];
        let targets = resolve_targets(&names).unwrap();
        let ids: Vec<&str> = targets.iter().map(|t| t.layout.id).collect();
        assert_eq!(ids, ["pi", "gemini"]);
    }

    #[test]
    fn test_fetch_source_rejects_missing_local_dir() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let err = fetch_source(missing.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("No Claude plugin found"));
    }

    #[test]
    fn test_fetch_source_accepts_existing_local_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("plugin");
        fs::create_dir_all(&dir).unwrap();
        let resolved = fetch_source(dir.to_str().unwrap()).unwrap();
        assert_eq!(resolved, dir);
    }

    #[test]
    fn test_select_entries_by_name() {
        let catalog = catalog_from(serde_json::json!({
            "name": "demo",
            "plugins": [
                {"name": "alpha", "source": "./plugins/alpha"},
                {"name": "beta", "source": "./plugins/beta"}
            ]
        }));
        let entries = select_entries(&catalog, Some("beta"), false).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "beta");
    }

    #[test]
    fn test_select_entries_unknown_name_errors() {
        let catalog = catalog_from(serde_json::json!({
            "plugins": [{"name": "alpha", "source": "./plugins/alpha"}]
        }));
        let err = select_entries(&catalog, Some("gamma"), false).unwrap_err();
        assert!(err.to_string().contains("gamma"));
    }

    #[test]
    fn test_select_entries_all_skips_external_sources() {
        let catalog = catalog_from(serde_json::json!({
            "plugins": [
                {"name": "alpha", "source": "./plugins/alpha"},
                {"name": "hosted", "source": {"source": "github", "repo": "owner/repo"}},
                {"name": "beta", "source": "./plugins/beta"}
            ]
        }));
        let entries = select_entries(&catalog, None, true).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["alpha", "beta"]);
    }

    #[test]
    fn test_select_entries_single_local_entry_needs_no_prompt() {
        let catalog = catalog_from(serde_json::json!({
            "plugins": [{"name": "only", "source": "./plugins/only"}]
        }));
        let entries = select_entries(&catalog, None, false).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "only");
    }

    #[test]
    fn test_select_entries_errors_when_nothing_is_local() {
        let catalog = catalog_from(serde_json::json!({
            "plugins": [
                {"name": "hosted", "source": {"source": "github", "repo": "owner/repo"}}
            ]
        }));
        let err = select_entries(&catalog, None, true).unwrap_err();
        assert!(err.to_string().contains("No Claude plugin found"));
    }

    #[test]
    fn test_apply_filter_is_noop_without_pattern() {
        let workspace = TempDir::new().unwrap();
        fs::create_dir_all(workspace.path().join("commands")).unwrap();
        fs::write(workspace.path().join("commands/deploy.md"), "Deploy.").unwrap();

        let mut plugins = vec![Plugin::load(workspace.path()).unwrap()];
        apply_filter(&mut plugins, None);
        assert_eq!(plugins[0].commands.len(), 1);

        let filter = ArtifactFilter::parse("agents/*").unwrap();
        apply_filter(&mut plugins, Some(&filter));
        assert!(plugins[0].commands.is_empty());
    }

    #[test]
    fn test_score_by_name_ignores_description() {
        let display = "alpha (useful review helpers)";
        assert_eq!(score_by_name("alp", &String::new(), display, 0), Some(0));
        assert_eq!(score_by_name("ALPHA", &String::new(), display, 0), Some(0));
        assert_eq!(score_by_name("review", &String::new(), display, 0), None);
        assert_eq!(score_by_name("", &String::new(), display, 0), Some(0));
    }
}
