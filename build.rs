use std::process::Command;

fn main() {
  embed_build_info();
  set_rerun_conditions();
}

/// Runs a git command and returns its trimmed stdout, if it succeeded.
fn git_output(args: &[&str]) -> Option<String> {
  let output = Command::new("git").args(args).output().ok()?;
  if !output.status.success() {
    return None;
  }
  let text = String::from_utf8(output.stdout).ok()?.trim().to_string();
  (!text.is_empty()).then_some(text)
}

fn embed_build_info() {
  let version = std::env::var("CARGO_PKG_VERSION").unwrap_or_default();

  // Falls back to the bare package version outside a git checkout.
  let long_version = match (
    git_output(&["rev-parse", "--short", "HEAD"]),
    git_output(&["log", "-1", "--format=%cs"]),
  ) {
    (Some(hash), Some(date)) => format!("{version} ({hash} {date})"),
    (Some(hash), None) => format!("{version} ({hash})"),
    _ => version,
  };

  println!("cargo:rustc-env=HEADERSTAMP_LONG_VERSION={long_version}");
}

fn set_rerun_conditions() {
  println!("cargo:rerun-if-changed=build.rs");
  println!("cargo:rerun-if-changed=.git/HEAD");
}
