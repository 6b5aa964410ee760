use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use blast_testgen::{
    app,
    cli::{self, GenerateArgs},
    config::{self, Overrides, BASE_URL_ENV},
    error::AppError,
    logger,
};

#[derive(Parser)]
#[command(
    name = "blast-testgen",
    version,
    about = "Generate manual test cases and pytest code from Python code or feature descriptions."
)]
struct Cli {
    #[arg(long, global = true, env = BASE_URL_ENV, help = "Backend base URL")]
    base_url: Option<String>,

    #[arg(long, global = true, help = "Request timeout in seconds")]
    timeout_secs: Option<u64>,

    #[arg(long, global = true, help = "Directory that receives test_cases.json")]
    export_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Send one request and print the result
    Generate(GenerateArgs),
    /// Show backend and model status
    Health,
}

fn main() -> ExitCode {
    let args = Cli::parse();

    if let Err(e) = logger::init() {
        eprintln!("warning: file logging disabled: {e}");
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "exiting with error");
            eprintln!("error: {e}");
            if let Some(hint) = e.hint() {
                eprintln!("hint:  {hint}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: Cli) -> Result<(), AppError> {
    let cfg = config::load(Overrides {
        base_url: args.base_url,
        timeout_secs: args.timeout_secs,
        export_dir: args.export_dir,
    })?;

    match args.command {
        Some(CliCommand::Generate(gen)) => cli::generate(gen, &cfg),
        Some(CliCommand::Health) => cli::health(&cfg),
        None => app::run(cfg),
    }
}
