//! # headerstamp
//!
//! Stamps Java-style source files with a standard license header and an
//! up-to-date `@version` tag in the documentation comment that precedes the
//! file's type declaration.
//!
//! `headerstamp` rewrites one file per invocation and is meant to be driven by
//! a shell loop or `find -exec`. The rewrite is idempotent: a stamped file is
//! left as it is on the next run.
//!
//! ## Features
//!
//! * Rewrites every `@version` tag in the doc comment to the current version
//! * Adds a version tag to a doc comment that lacks one, or a whole doc
//!   comment when the declaration has none
//! * Prepends a license notice unless its identifying phrase is already there
//! * Check mode with diffs, for CI use
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use headerstamp::license::{LicenseBlock, LicenseVariant};
//! use headerstamp::rewriter::{Rewriter, RewriterConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let rewriter = Rewriter::new(RewriterConfig::new("1.4", LicenseBlock::builtin(LicenseVariant::Epl)));
//!
//!     let report = rewriter.process_file(Path::new("src/main/java/org/example/Foo.java"))?;
//!     if report.written {
//!         println!("Stamped {}", report.path.display());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`rewriter`] - Locating, transforming and rewriting a file
//! * [`license`] - License notices and their detection
//! * [`config`] - `.headerstamp.toml` loading
//! * [`logging`] - Output modes and tracing setup
//!
//! [`rewriter`]: crate::rewriter
//! [`license`]: crate::license
//! [`config`]: crate::config
//! [`logging`]: crate::logging

pub mod config;
pub mod diff;
pub mod license;
pub mod logging;
pub mod output;
pub mod report;
pub mod rewriter;
