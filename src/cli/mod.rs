//! # CLI Module
//!
//! The command-line interface. It uses clap for argument parsing; the single
//! command stamps the file given as its positional argument.

mod stamp;

use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
pub use stamp::{StampArgs, run_stamp};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  name = "headerstamp",
  version,
  long_version = env!("HEADERSTAMP_LONG_VERSION"),
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Stamp a file with the EPL notice and @version 1.4
  headerstamp src/main/java/org/example/Foo.java

  # Report whether a file needs stamping, without touching it
  headerstamp --check --show-diff Foo.java

  # Stamp every Java file under src/, one invocation per file
  find src -name '*.java' -exec headerstamp --quiet {} \\;

  # Use the older LGPL notice and a different version
  headerstamp --license lgpl --set-version 1.7 Foo.java

  # Use a custom notice, identified by a phrase it contains
  headerstamp --license-file HEADER.txt --license-phrase \"ACME Public License\" Foo.java
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(flatten)]
  pub stamp_args: StampArgs,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
