//! Targets command implementation
//!
//! Lists every supported target with its layout: home directory, config
//! file and merge keys, and where MCP servers land.

use console::Style;

use crate::convert::TARGETS;
use crate::error::Result;

/// Run the targets command
pub fn run() -> Result<()> {
    println!("Supported targets ({}):", TARGETS.len());
    println!();

    for target in TARGETS {
        let layout = &target.layout;

        println!(
            "  {}",
            Style::new().bold().yellow().apply_to(layout.display_name)
        );
        println!("    {} {}", Style::new().bold().apply_to("Id:"), layout.id);
        println!(
            "    {} {}",
            Style::new().bold().apply_to("Directory:"),
            Style::new().cyan().apply_to(layout.dot_dir)
        );
        match layout.config_file {
            Some(file) => {
                println!("    {} {}", Style::new().bold().apply_to("Config:"), file);
                if !layout.mergeable_keys.is_empty() {
                    println!(
                        "      {} {}",
                        Style::new().bold().apply_to("merges:"),
                        Style::new().dim().apply_to(layout.mergeable_keys.join(", "))
                    );
                }
            }
            None => println!(
                "    {} {}",
                Style::new().bold().apply_to("Config:"),
                Style::new().dim().apply_to("none")
            ),
        }
        match layout.server_key {
            Some(key) => println!(
                "    {} under \"{}\"",
                Style::new().bold().apply_to("MCP servers:"),
                key
            ),
            None => println!(
                "    {} {}",
                Style::new().bold().apply_to("MCP servers:"),
                Style::new().dim().apply_to("not supported")
            ),
        }
        println!();
    }

    Ok(())
}
