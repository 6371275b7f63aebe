//! # headerstamp
//!
//! Stamps a source file with a license header and a current `@version` tag.

mod cli;
mod config;
mod diff;
mod license;
mod logging;
mod output;
mod report;
mod rewriter;

use anyhow::Result;

use crate::cli::{Cli, run_stamp};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run_stamp(cli.stamp_args)
}
