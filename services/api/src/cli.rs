use crate::demo::{run_demo, run_evaluate, run_program, DemoArgs, EvaluateArgs, ProgramArgs};
use crate::server;
use bonus_accelerator::config::AppConfig;
use bonus_accelerator::error::AppError;
use bonus_accelerator::telemetry;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Sales Bonus Accelerator",
    about = "Evaluate deals against the sales bonus accelerator program",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate a single deal and print the result
    Evaluate(EvaluateArgs),
    /// Show the active program definition
    Program(ProgramArgs),
    /// Evaluate a set of showcase deals against the active program
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Program definition (JSON); overrides BONUS_PROGRAM_CONFIG
    #[arg(long)]
    pub(crate) program_config: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(config, args).await,
        Command::Evaluate(args) => run_evaluate(&config, args),
        Command::Program(args) => run_program(&config, args),
        Command::Demo(args) => run_demo(&config, args),
    }
}
