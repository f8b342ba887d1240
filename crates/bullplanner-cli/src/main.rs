use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "bullplanner", version, about = "BullPlanner weekly schedule planner")]
struct Cli {
    /// Log debug output to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert between 24-hour and 12-hour times
    Time {
        #[command(subcommand)]
        action: commands::time::TimeAction,
    },
    /// Print the weekly grid for a schedule file
    Grid(commands::grid::GridArgs),
    /// Ask the AI for study blocks around a schedule file
    Suggest(commands::suggest::SuggestArgs),
    /// Interactive planning session
    Session(commands::session::SessionArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Time { action } => commands::time::run(action),
        Commands::Grid(args) => commands::grid::run(args),
        Commands::Suggest(args) => commands::suggest::run(args),
        Commands::Session(args) => commands::session::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
