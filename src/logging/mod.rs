//! # Logging Module
//!
//! Logging utilities for headerstamp:
//! - An output mode (normal, quiet, verbose) shared by the output macros
//! - A color mode mapped onto `owo-colors` overrides
//! - A `tracing` subscriber for structured diagnostics on stderr
//!
//! Verbose logs go to stderr and info logs go to stdout so that the tool
//! composes with shell pipelines that drive it file by file.
//!
//! ## Example
//!
//! ```rust
//! use headerstamp::logging::{ColorMode, set_verbose};
//! use headerstamp::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Never.apply();
//!
//! // Goes to stderr
//! verbose_log!("Scanning file: {}", "Foo.java");
//!
//! // Goes to stdout
//! info_log!("Version stamped: {}", "Foo.java");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
///
/// Uses the same format string syntax as [`eprintln!`].
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stdout unless quiet mode is enabled.
///
/// Uses the same format string syntax as [`println!`].
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Prints an info message, in yellow when the terminal supports it.
///
/// Used by [`info_log!`].
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
