//! Create a new skill directory.
//!
//! ```sh
//! skill-scaffold -n excel-handler -d "Handle Excel files" -o skills
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use layerfig::ScaffoldArgs;

/// Scaffold a skill folder with SKILL.md, examples/ and scripts/.
#[derive(Parser, Debug)]
#[command(name = "skill-scaffold", version, about)]
struct Cli {
    /// Enable verbose logging (sets log level to DEBUG).
    #[arg(short, long)]
    verbose: bool,

    #[command(flatten)]
    args: ScaffoldArgs,
}

fn main() -> ExitCode {
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

    match cli.args.into_request().create() {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
