mod commands;
mod console;
mod menu;
mod svg;

use anyhow::Result;
use canteen_core::config::{expand_path, Settings};
use canteen_core::validate::{validate_keyword, validate_price};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "canteen")]
#[command(about = "Find campus food stalls by keyword, price or distance", long_about = None)]
struct Cli {
    /// Settings file (defaults to ./canteen.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Dataset file or directory, overriding the configured one
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (the default)
    Menu,
    /// Print every canteen's stalls, prices and location
    Show,
    /// Search stalls by a single keyword
    Keyword {
        term: String,
        /// Follow a "did you mean" suggestion when nothing matches
        #[arg(long, default_value_t = false)]
        accept_suggestion: bool,
    },
    /// Search stalls within an inclusive price range
    Price {
        #[arg(allow_hyphen_values = true)]
        min: String,
        #[arg(allow_hyphen_values = true)]
        max: String,
        /// Swap the bounds if the minimum exceeds the maximum
        #[arg(long, default_value_t = false)]
        swap: bool,
    },
    /// List the canteens closest to a map position
    Nearest {
        #[arg(allow_hyphen_values = true)]
        x: i64,
        #[arg(allow_hyphen_values = true)]
        y: i64,
        /// How many canteens to list
        #[arg(short, long, default_value = "1", allow_hyphen_values = true)]
        k: String,
        /// Also write an SVG overlay of the results to this file
        #[arg(long)]
        svg: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(dataset) = cli.dataset {
        settings.dataset = expand_path(&dataset);
    }
    tracing::debug!(dataset = %settings.dataset.display(), "settings loaded");

    let outcome = match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => return menu::run(&settings),
        Commands::Show => commands::show(&settings),
        Commands::Keyword { term, accept_suggestion } => match validate_keyword(&term) {
            Ok(term) => commands::keyword(&settings, term, &mut |question: &str| answer(question, accept_suggestion)),
            Err(err) => Err(err.into()),
        },
        Commands::Price { min, max, swap } => match validate_price(&min, &max, &mut |question: &str| answer(question, swap)) {
            Ok(range) => commands::price(&settings, range),
            Err(err) => Err(err.into()),
        },
        Commands::Nearest { x, y, k, svg } => {
            let render = svg.is_some();
            if let Some(path) = svg {
                settings.map.output = expand_path(&path);
            }
            commands::nearest_at(&settings, x, y, &k, render)
        }
    };
    if let Err(err) = outcome {
        commands::report_failure(err)?;
    }
    Ok(())
}

/// Non-interactive confirmation: echo the question with the flag's answer.
fn answer(question: &str, yes: bool) -> bool {
    println!("{question} {}", if yes { "(y)" } else { "(n)" });
    yes
}
