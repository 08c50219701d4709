use std::io::Write;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::sync::RwLock;
use tracing_subscriber::filter::EnvFilter;

use tactic_cli::AppState;
use tactic_cli::commands;
use tactic_cli::repl::readline;

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_logging();

    let state = Arc::new(RwLock::new(AppState::new()));

    loop {
        let Some(line) = readline()? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, Arc::clone(&state)).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "combat-skill timeline cli")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load character and enemy tables.
    LoadData {
        #[arg(short, long)]
        dir: Option<String>,
    },
    /// Tokenize a log file and build a timeline.
    Parse {
        #[arg(short, long)]
        path: String,
    },
    /// Tokenize pasted log text and build a timeline.
    ParseText {
        text: String,
    },
    /// List attack and buff items.
    Items,
    /// List display lanes.
    Lanes,
    /// Show the visible time window.
    Bounds,
    /// Set an item's start time; its simultaneity group moves with it.
    Move {
        #[arg(short, long)]
        kind: String,
        #[arg(short, long)]
        index: usize,
        #[arg(short, long)]
        time: String,
    },
    /// Toggle a character's two-star gear duration multiplier.
    Ue2 {
        #[arg(short, long)]
        name: String,
        #[arg(long)]
        off: bool,
    },
    /// Discard all timing edits.
    Reset,
    Config,
    Exit,
}

async fn respond(line: &str, state: Arc<RwLock<AppState>>) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "tactic".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::LoadData { dir }) => {
            commands::load_data(dir.clone(), Arc::clone(&state)).await?
        }
        Some(Commands::Parse { path }) => commands::parse_file(path, Arc::clone(&state)).await?,
        Some(Commands::ParseText { text }) => {
            commands::parse_text(text, Arc::clone(&state)).await?
        }
        Some(Commands::Items) => commands::show_items(Arc::clone(&state)).await?,
        Some(Commands::Lanes) => commands::show_lanes(Arc::clone(&state)).await?,
        Some(Commands::Bounds) => commands::show_bounds(Arc::clone(&state)).await?,
        Some(Commands::Move { kind, index, time }) => {
            commands::move_item(kind, *index, time, Arc::clone(&state)).await?
        }
        Some(Commands::Ue2 { name, off }) => {
            commands::set_ue2(name, *off, Arc::clone(&state)).await?
        }
        Some(Commands::Reset) => commands::reset(Arc::clone(&state)).await?,
        Some(Commands::Config) => commands::show_config(Arc::clone(&state)).await?,
        Some(Commands::Exit) => {
            write!(std::io::stdout(), "quitting...").map_err(|e| e.to_string())?;
            std::io::stdout().flush().map_err(|e| e.to_string())?;
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
