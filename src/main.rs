use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use std::path::PathBuf;

use wayfarer::config::Config;
use wayfarer::journey::{Feeling, JourneyMap, StageEdit};
use wayfarer::{init, sync, watch};

#[derive(Parser)]
#[command(name = "wayfarer")]
#[command(version, about = "Journey map tooling with a debounced auto-commit watcher")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the journey map
    Show {
        /// Journey file to load (defaults to the built-in sample map)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print JSON instead of the rendered map
        #[arg(long)]
        json: bool,
    },

    /// Edit one stage's fields, leaving every other stage untouched
    Edit {
        /// Stage position (1-based)
        position: usize,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New activity list, comma-separated
        #[arg(long, value_delimiter = ',')]
        activities: Option<Vec<String>>,

        /// New feeling: positive, neutral, or negative
        #[arg(long)]
        feeling: Option<Feeling>,

        /// New opportunity note
        #[arg(long)]
        opportunity: Option<String>,

        /// Journey file to load and write back
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print the resulting map as JSON
        #[arg(long)]
        json: bool,
    },

    /// Swap two stages' positions
    Swap {
        /// First stage position (1-based)
        a: usize,

        /// Second stage position (1-based)
        b: usize,

        /// Journey file to load and write back
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print the resulting map as JSON
        #[arg(long)]
        json: bool,
    },

    /// Commit and push pending changes once
    Sync {
        /// Working tree to sync
        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// Watch the working tree and auto-commit on changes until interrupted
    Watch {
        /// Working tree to watch
        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// Set up wayfarer in the current directory
    Init,

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Show { file, json } => {
            let map = load_map(file.as_deref())?;
            if json {
                println!("{}", map.to_json()?);
            } else {
                print!("{}", map.render());
            }
        }

        Commands::Edit {
            position,
            title,
            activities,
            feeling,
            opportunity,
            file,
            json,
        } => {
            let edit = StageEdit {
                title,
                activities,
                feeling,
                opportunity,
            };
            if edit.is_empty() {
                return Err(
                    "nothing to edit: pass at least one of --title, --activities, --feeling, --opportunity"
                        .into(),
                );
            }
            let mut map = load_map(file.as_deref())?;
            map.edit(to_index(position)?, edit)
                .map_err(|_| out_of_range(position, map.len()))?;
            emit_map(&map, file.as_deref(), json, &format!("Updated stage {}", position))?;
        }

        Commands::Swap { a, b, file, json } => {
            let mut map = load_map(file.as_deref())?;
            map.swap(to_index(a)?, to_index(b)?)
                .map_err(|_| out_of_range(a.max(b), map.len()))?;
            emit_map(
                &map,
                file.as_deref(),
                json,
                &format!("Swapped stages {} and {}", a, b),
            )?;
        }

        Commands::Sync { dir } => {
            let config = Config::load();
            let outcome = sync::sync_once(&dir, &config);
            if !outcome.is_ok() {
                std::process::exit(1);
            }
        }

        Commands::Watch { dir } => {
            let config = Config::load();
            watch::watch(&dir, &config)?;
        }

        Commands::Init => {
            init::init_project()?;
        }

        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "wayfarer", &mut std::io::stdout());
        }
    }

    Ok(())
}

/// CLI positions are 1-based; the map is indexed from 0
fn to_index(position: usize) -> Result<usize, Box<dyn std::error::Error>> {
    position
        .checked_sub(1)
        .ok_or_else(|| "stage positions start at 1".into())
}

/// Out-of-range message in terms of 1-based positions
fn out_of_range(position: usize, len: usize) -> Box<dyn std::error::Error> {
    format!("stage {} is out of range (map has {} stages)", position, len).into()
}

fn load_map(file: Option<&std::path::Path>) -> Result<JourneyMap, Box<dyn std::error::Error>> {
    match file {
        Some(path) => Ok(JourneyMap::load(path)?),
        None => Ok(JourneyMap::sample()),
    }
}

/// Write the map back when a file was given, otherwise print it
fn emit_map(
    map: &JourneyMap,
    file: Option<&std::path::Path>,
    json: bool,
    note: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = file {
        map.save(path)?;
        println!("{} ({})", note.green(), path.display());
    }
    if json {
        println!("{}", map.to_json()?);
    } else if file.is_none() {
        print!("{}", map.render());
    }
    Ok(())
}
