//! Project initialization for wayfarer
//!
//! `wayfarer init` creates the files needed to track a journey map and run
//! the auto-commit watcher in the current directory.

use colored::Colorize;
use std::fs;
use std::path::Path;

use crate::config::CONFIG_DIR;
use crate::journey::JourneyMap;

/// Default config written on init
const DEFAULT_CONFIG: &str = r#"# wayfarer configuration

[watch]
# Quiet period after the last change before a commit runs (milliseconds)
debounce_ms = 2000
# Extra ignore patterns, added to the built-in set
# ignore = ["*.bak"]

[push]
# Remote pushed to after each commit
remote = "origin"
# Branch pushed to the remote; defaults to the current branch
# branch = "main"
"#;

/// Initialize wayfarer in the current directory
pub fn init_project() -> Result<(), String> {
    let cwd = std::env::current_dir()
        .map_err(|e| format!("Could not get current directory: {}", e))?;

    println!("\n{}", "Initializing wayfarer...".cyan().bold());
    println!("   Directory: {}\n", cwd.display());

    // 1. Create .wayfarer directory
    let state_dir = cwd.join(CONFIG_DIR);
    create_dir_if_missing(&state_dir)?;

    // 2. Write default config
    let config_path = state_dir.join("config.toml");
    write_file_if_missing(&config_path, DEFAULT_CONFIG, ".wayfarer/config.toml")?;

    // 3. Seed the journey map
    let journey_path = state_dir.join("journey.json");
    if journey_path.exists() {
        println!(
            "   {} {} (already exists)",
            "Skipping".yellow(),
            ".wayfarer/journey.json"
        );
    } else {
        JourneyMap::sample()
            .save(&journey_path)
            .map_err(|e| format!("Could not write journey.json: {}", e))?;
        println!("   {} {}", "Creating".green(), ".wayfarer/journey.json");
    }

    // 4. Add .wayfarer to .gitignore if not already there
    add_to_gitignore(&cwd)?;

    println!("\n{}", "wayfarer initialized!".green().bold());
    println!("\nNext steps:");
    println!(
        "  1. Run {} to see the journey map",
        "wayfarer show -f .wayfarer/journey.json".cyan()
    );
    println!(
        "  2. Run {} to auto-commit as you work",
        "wayfarer watch".cyan()
    );
    println!();

    Ok(())
}

fn create_dir_if_missing(path: &Path) -> Result<(), String> {
    if !path.exists() {
        fs::create_dir_all(path)
            .map_err(|e| format!("Could not create {}: {}", path.display(), e))?;
        println!("   {} {}", "Creating".green(), path.display());
    }
    Ok(())
}

fn write_file_if_missing(path: &Path, content: &str, display_name: &str) -> Result<(), String> {
    if path.exists() {
        println!("   {} {} (already exists)", "Skipping".yellow(), display_name);
    } else {
        fs::write(path, content)
            .map_err(|e| format!("Could not write {}: {}", display_name, e))?;
        println!("   {} {}", "Creating".green(), display_name);
    }
    Ok(())
}

fn add_to_gitignore(cwd: &Path) -> Result<(), String> {
    let gitignore_path = cwd.join(".gitignore");
    let entry = ".wayfarer/";

    if gitignore_path.exists() {
        let existing = fs::read_to_string(&gitignore_path)
            .map_err(|e| format!("Could not read .gitignore: {}", e))?;

        if existing
            .lines()
            .any(|line| line.trim() == entry || line.trim() == CONFIG_DIR)
        {
            return Ok(());
        }

        let new_content = format!(
            "{}\n\n# wayfarer state (local)\n{}\n",
            existing.trim_end(),
            entry
        );
        fs::write(&gitignore_path, new_content)
            .map_err(|e| format!("Could not update .gitignore: {}", e))?;
        println!("   {} .gitignore (added .wayfarer/)", "Updated".green());
    } else {
        let content = format!("# wayfarer state (local)\n{}\n", entry);
        fs::write(&gitignore_path, content)
            .map_err(|e| format!("Could not create .gitignore: {}", e))?;
        println!("   {} .gitignore", "Creating".green());
    }

    Ok(())
}
