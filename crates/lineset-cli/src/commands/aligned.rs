//! Aligned command
//!
//! Usage: lineset aligned <A> <B> [--program diff] [--arg ARG]... [--timeout-secs N]

use clap::Args;
use lineset_bridge::{compare_aligned, BridgeConfig, FifoDiff};
use lineset_core::Workspace;
use std::path::PathBuf;
use std::time::Duration;

use super::load_pair;

#[derive(Debug, Args)]
pub struct AlignedArgs {
    /// First file
    pub a: PathBuf,

    /// Second file
    pub b: PathBuf,

    /// Diff program; receives the two pipe paths as its last arguments
    #[arg(long, default_value = "diff")]
    pub program: String,

    /// Argument passed before the pipe paths (repeatable; default: --side-by-side for diff)
    #[arg(long = "arg", allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Seconds to wait for the program
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Exit code counted as success (repeatable; default: 0 and 1)
    #[arg(long)]
    pub accept_status: Vec<i32>,
}

impl AlignedArgs {
    fn bridge_config(&self) -> BridgeConfig {
        let mut config = if self.program == "diff" && self.args.is_empty() {
            BridgeConfig::default()
        } else {
            BridgeConfig::for_program(self.program.clone()).with_args(self.args.clone())
        };
        config = config.with_timeout(Duration::from_secs(self.timeout_secs));
        if !self.accept_status.is_empty() {
            config = config.with_accept_status(self.accept_status.clone());
        }
        config
    }
}

/// Execute aligned command
pub fn execute(args: AlignedArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut ws = Workspace::new();
    let (a, b) = load_pair(&mut ws, &args.a, &args.b)?;

    let strategy = FifoDiff::new(args.bridge_config());
    let diff = compare_aligned(&ws, &a, &b, &strategy)?;

    print!("{}", diff.output);
    Ok(())
}
