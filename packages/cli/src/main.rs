mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    check, dump, fmt, init, sections, CheckArgs, DumpArgs, FmtArgs, InitArgs, SectionsArgs,
};

/// nlogo - Read, check and rewrite NetLogo model documents
#[derive(Parser, Debug)]
#[command(name = "nlogo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log format internals to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load models and report read errors and validation warnings
    Check(CheckArgs),

    /// Rewrite models in canonical form
    Fmt(FmtArgs),

    /// List the sections of a model document
    Sections(SectionsArgs),

    /// Print a model as JSON
    Dump(DumpArgs),

    /// Create a new model from section defaults
    Init(InitArgs),
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Check(args) => check(args, &cwd),
        Command::Fmt(args) => fmt(args, &cwd),
        Command::Sections(args) => sections(args, &cwd),
        Command::Dump(args) => dump(args, &cwd),
        Command::Init(args) => init(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
