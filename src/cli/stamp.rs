//! # Stamp Command
//!
//! Stamps one file with the configured license notice and `@version` tag, or
//! with `--check` reports whether it would change.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Args;
use tracing::debug;

use crate::config::{CliOverrides, load_config};
use crate::diff::DiffManager;
use crate::info_log;
use crate::license::LicenseVariant;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::print_report;
use crate::rewriter::{Rewriter, RewriterConfig};

/// Arguments for the stamp command
#[derive(Args, Debug, Default)]
pub struct StampArgs {
  /// Source file to stamp in place
  #[arg(value_name = "FILE")]
  pub file: PathBuf,

  /// Check mode: report whether the file needs stamping without modifying it
  /// (exits with status 1 if it does)
  #[arg(long)]
  pub check: bool,

  /// Show a diff of the changes on stderr
  #[arg(long)]
  pub show_diff: bool,

  /// Append a diff of the changes to a file
  #[arg(long, short = 'o', value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// Version to write into @version tags [default: 1.4]
  #[arg(long, value_name = "VERSION")]
  pub set_version: Option<String>,

  /// Built-in license notice to prepend [default: epl]
  #[arg(long, value_enum, value_name = "NAME")]
  pub license: Option<LicenseVariant>,

  /// Custom license notice to prepend, verbatim
  #[arg(
    long,
    short = 'f',
    value_name = "FILE",
    conflicts_with = "license",
    requires = "license_phrase"
  )]
  pub license_file: Option<PathBuf>,

  /// Phrase that identifies the custom notice in a file
  #[arg(long, value_name = "TEXT", requires = "license_file")]
  pub license_phrase: Option<String>,

  /// Path to config file (default: .headerstamp.toml next to FILE or in the
  /// current directory)
  #[arg(long, value_name = "FILE", conflicts_with = "no_config")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Write a JSON report of the outcome to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

impl StampArgs {
  fn cli_overrides(&self) -> CliOverrides {
    CliOverrides {
      version: self.set_version.clone(),
      license: self.license,
      license_file: self.license_file.clone(),
      license_phrase: self.license_phrase.clone(),
    }
  }
}

/// Run the stamp command with the given arguments
pub fn run_stamp(args: StampArgs) -> Result<()> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let mut config = load_config(args.config.as_deref(), &args.file, args.no_config)?.unwrap_or_default();
  config.merge_cli_overrides(args.cli_overrides());
  config.validate()?;

  let license = config.license_block()?;
  debug!(
    "Stamping version {} with license phrase '{}'",
    config.version(),
    license.phrase()
  );

  let rewriter = Rewriter::new(RewriterConfig {
    check_only: args.check,
    diff_manager: Some(DiffManager::new(args.show_diff, args.save_diff)),
    ..RewriterConfig::new(config.version(), license)
  });

  let report = rewriter.process_file(&args.file)?;

  if let Some(ref output) = args.report_json {
    report.write_json(output)?;
    debug!("Report written to {}", output.display());
  }

  print_report(&report);

  if rewriter.is_check_only() && report.changed {
    info_log!("Run without --check to apply the changes.");
    process::exit(1);
  }

  Ok(())
}
