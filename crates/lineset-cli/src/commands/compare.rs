//! Compare command
//!
//! Usage: lineset compare <A> <B> [--mode multiset|set] [--json]

use clap::Args;
use lineset_core::render::{render_comparison_json, render_view};
use lineset_core::{compare, CompareOptions, DiffMode, Workspace};
use std::path::PathBuf;

use super::load_pair;

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// First file
    pub a: PathBuf,

    /// Second file
    pub b: PathBuf,

    /// How repeated lines are counted
    #[arg(long, default_value = "multiset")]
    pub mode: DiffMode,

    /// Print a JSON report instead of the two views
    #[arg(long)]
    pub json: bool,
}

/// Execute compare command
pub fn execute(args: CompareArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut ws = Workspace::new();
    let (a, b) = load_pair(&mut ws, &args.a, &args.b)?;

    let options = CompareOptions::default().with_mode(args.mode);
    let comparison = compare(&mut ws, &a, &b, &options)?;

    if args.json {
        println!("{}", render_comparison_json(&ws, &comparison)?);
    } else {
        print!("{}", render_view(&ws, &comparison.view_a)?);
        print!("{}", render_view(&ws, &comparison.view_b)?);
    }

    Ok(())
}
