//! # tally
//!
//! Entry point. Everything lives in `lib.rs` so it can be tested.

use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    tally_cli_lib::run()
}
