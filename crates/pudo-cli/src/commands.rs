use std::io::{self, IsTerminal};

use anyhow::Result;
use pudo_cli::pipeline::{JoinRequest, JoinRunResult, default_output_path, run_join};
use pudo_cli::progress::ProgressObserver;
use pudo_model::JoinOptions;

use crate::cli::JoinArgs;

pub fn run_join_command(args: &JoinArgs) -> Result<JoinRunResult> {
    let request = JoinRequest {
        vendors: args.vendors.clone(),
        pudos: args.pudos.clone(),
        output: args
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&args.vendors)),
        options: JoinOptions::new().with_threshold_km(args.threshold_km),
        dry_run: args.dry_run,
    };

    let mut observer = if args.no_progress || !io::stderr().is_terminal() {
        ProgressObserver::hidden()
    } else {
        ProgressObserver::new()
    };
    run_join(&request, &mut observer)
}
