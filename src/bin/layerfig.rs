//! Inspect layered settings from the command line.
//!
//! ```sh
//! layerfig show
//! layerfig config list
//! layerfig config get app.max_workers
//! layerfig config url
//! layerfig config gen -o config/base.yaml
//! APP__MAX_WORKERS=8 layerfig --workers 4 show
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use layerfig::{ConfigArgs, Layerfig, Settings, SettingsBuilder, SettingsCell};

/// Layered YAML, dotenv and environment settings.
#[derive(Parser, Debug)]
#[command(name = "layerfig", version, about)]
struct Cli {
    /// Enable verbose logging (sets log level to DEBUG).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Read this dotenv file instead of ./.env.
    #[arg(long, global = true, conflicts_with = "no_dotenv")]
    dotenv: Option<PathBuf>,

    /// Skip the dotenv file.
    #[arg(long, global = true)]
    no_dotenv: bool,

    /// Fail on keys that do not belong to the schema.
    #[arg(long, global = true)]
    strict: bool,

    /// Override app.max_workers.
    #[arg(long, global = true)]
    workers: Option<u32>,

    /// Override app.batch_size.
    #[arg(long, global = true)]
    batch_size: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a summary of the resolved settings.
    Show,
    /// Inspect settings or generate a template (list, gen, get, url).
    Config(ConfigArgs),
}

fn make_builder(cli: &Cli) -> SettingsBuilder {
    let mut builder = Layerfig::builder().strict(cli.strict);
    if cli.no_dotenv {
        builder = builder.no_dotenv();
    } else if let Some(path) = &cli.dotenv {
        builder = builder.dotenv_file(path);
    }
    builder
        .override_value("app.max_workers", cli.workers.map(i64::from))
        .override_value("app.batch_size", cli.batch_size.map(i64::from))
}

fn show(settings: &Settings) {
    let entries = [
        ("database", settings.database_url()),
        ("api.url", settings.api.url.clone()),
        ("api.timeout", format!("{} ms", settings.api.timeout)),
        ("app.max_workers", settings.app.max_workers.to_string()),
        ("app.batch_size", settings.app.batch_size.to_string()),
        ("app.max_retry", settings.app.max_retry.to_string()),
        ("logging.level", settings.logging.level.clone()),
    ];
    let width = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (key, value) in &entries {
        println!("{key:<width$}  {value}");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let builder = make_builder(&cli);
    match cli.command {
        Commands::Show => {
            let cell = SettingsCell::new(builder);
            let settings = cell.get().context("failed to load settings")?;
            show(settings);
        }
        Commands::Config(args) => {
            let action = args.into_action();
            builder
                .handle_and_print(&action)
                .context("config command failed")?;
        }
    }
    Ok(())
}
