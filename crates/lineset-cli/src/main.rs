//! LineSet CLI
//!
//! Command-line host for lineset: loads two files as sources, compares them
//! as line sets and reconciles them.

use clap::{Parser, Subcommand};
use lineset_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "lineset")]
#[command(about = "LineSet - compare files as sets of lines", long_about = None)]
struct Cli {
    /// Logging profile (dev or prod); logs go to stderr
    #[arg(long, global = true, default_value = "prod")]
    log_profile: Profile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the lines unique to each file
    Compare(commands::compare::CompareArgs),
    /// Side-by-side diff through an external program fed by named pipes
    Aligned(commands::aligned::AlignedArgs),
    /// Apply a script of copy/kill/visit actions to the unique lines
    Reconcile(commands::reconcile::ReconcileArgs),
}

fn main() {
    let cli = Cli::parse();
    logging_facility::init(cli.log_profile);

    let result = match cli.command {
        Commands::Compare(args) => commands::compare::execute(args),
        Commands::Aligned(args) => commands::aligned::execute(args),
        Commands::Reconcile(args) => commands::reconcile::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
