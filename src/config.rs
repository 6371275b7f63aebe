//! # Configuration Module
//!
//! Optional configuration for headerstamp: the version to stamp and the
//! license notice to prepend.
//!
//! Configuration can be specified in a `.headerstamp.toml` file or via the
//! `HEADERSTAMP_CONFIG` environment variable. Command-line flags override
//! anything set in the file.
//!
//! ```toml
//! version = "1.4"
//! license = "epl"
//!
//! # or a custom notice instead of `license`:
//! # license-file = "LICENSE-HEADER.txt"
//! # license-phrase = "ACME Public License"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::license::{LicenseBlock, LicenseVariant};
use crate::rewriter::DEFAULT_VERSION;
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".headerstamp.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "HEADERSTAMP_CONFIG";

/// Settings loaded from a `.headerstamp.toml` file.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
  /// Version written into `@version` tags.
  #[serde(default)]
  pub version: Option<String>,

  /// One of the built-in license notices.
  #[serde(default)]
  pub license: Option<LicenseVariant>,

  /// File holding a custom license notice. Relative paths are resolved
  /// against the directory of the config file.
  #[serde(default)]
  pub license_file: Option<PathBuf>,

  /// Phrase that identifies the custom notice in a file.
  #[serde(default)]
  pub license_phrase: Option<String>,
}

/// Values given on the command line, applied on top of a [`Config`].
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
  pub version: Option<String>,
  pub license: Option<LicenseVariant>,
  pub license_file: Option<PathBuf>,
  pub license_phrase: Option<String>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// The version cannot be written into a tag.
  #[error("Invalid version '{version}': {message}")]
  InvalidVersion { version: String, message: String },

  /// A custom license is missing its file or its phrase.
  #[error("Incomplete custom license: {message}")]
  IncompleteLicense { message: String },

  /// Both a built-in and a custom license were selected.
  #[error("'license' and 'license-file' cannot be used together")]
  ConflictingLicense,
}

/// Checks that a version can be stamped and found again on the next run.
pub fn validate_version(version: &str) -> Result<(), ConfigError> {
  let invalid = |message: &str| ConfigError::InvalidVersion {
    version: version.to_string(),
    message: message.to_string(),
  };

  if version.is_empty() {
    return Err(invalid("version cannot be empty"));
  }
  if version.chars().any(char::is_whitespace) {
    return Err(invalid("version cannot contain whitespace"));
  }
  if version.contains('*') {
    return Err(invalid("version cannot contain '*'"));
  }
  Ok(())
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Returns
  ///
  /// The loaded configuration, or an error if the file cannot be read,
  /// parsed, or validated.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(config.resolve_paths(base_dir))
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - The version, if set, is stampable
  /// - `license-file` and `license-phrase` come together
  /// - `license` and `license-file` are not both set
  pub fn validate(&self) -> Result<(), ConfigError> {
    if let Some(ref version) = self.version {
      validate_version(version)?;
    }

    match (&self.license_file, &self.license_phrase) {
      (Some(_), None) => {
        return Err(ConfigError::IncompleteLicense {
          message: "license-file requires license-phrase".to_string(),
        });
      }
      (None, Some(_)) => {
        return Err(ConfigError::IncompleteLicense {
          message: "license-phrase requires license-file".to_string(),
        });
      }
      _ => {}
    }

    if self.license.is_some() && self.license_file.is_some() {
      return Err(ConfigError::ConflictingLicense);
    }

    Ok(())
  }

  /// Makes a relative `license-file` relative to `base_dir`.
  fn resolve_paths(mut self, base_dir: &Path) -> Self {
    if let Some(ref file) = self.license_file
      && file.is_relative()
    {
      self.license_file = Some(base_dir.join(file));
    }
    self
  }

  /// Applies command-line values on top of this configuration.
  ///
  /// Choosing a license source on the command line replaces the other source
  /// from the file, so `--license lgpl` wins over a configured
  /// `license-file` and vice versa.
  pub fn merge_cli_overrides(&mut self, overrides: CliOverrides) {
    if let Some(version) = overrides.version {
      self.version = Some(version);
    }

    if let Some(license) = overrides.license {
      self.license = Some(license);
      self.license_file = None;
      self.license_phrase = None;
    }

    if overrides.license_file.is_some() || overrides.license_phrase.is_some() {
      self.license = None;
      if let Some(file) = overrides.license_file {
        self.license_file = Some(file);
      }
      if let Some(phrase) = overrides.license_phrase {
        self.license_phrase = Some(phrase);
      }
    }
  }

  /// The version to stamp.
  pub fn version(&self) -> &str {
    self.version.as_deref().unwrap_or(DEFAULT_VERSION)
  }

  /// Builds the license block this configuration selects.
  pub fn license_block(&self) -> Result<LicenseBlock> {
    match (&self.license_file, &self.license_phrase) {
      (Some(file), Some(phrase)) => LicenseBlock::from_file(file, phrase),
      _ => Ok(LicenseBlock::builtin(self.license.unwrap_or_default())),
    }
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `HEADERSTAMP_CONFIG` environment variable
/// 3. `.headerstamp.toml` next to the target file
/// 4. `.headerstamp.toml` in the current directory
pub fn discover_config_path(explicit_path: Option<&Path>, target: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("Using explicit config path: {}", path.display());
      return Some(path.to_path_buf());
    }
    verbose_log!("Explicit config path does not exist: {}", path.display());
    return None;
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let target_dir = target.parent().filter(|dir| !dir.as_os_str().is_empty());
  let candidates = target_dir
    .into_iter()
    .chain(std::iter::once(Path::new(".")))
    .map(|dir| dir.join(DEFAULT_CONFIG_FILENAME));

  for candidate in candidates {
    if candidate.exists() {
      verbose_log!("Using config: {}", candidate.display());
      return Some(candidate);
    }
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path.
///
/// Returns `None` when discovery is disabled or no file is found.
pub fn load_config(explicit_path: Option<&Path>, target: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  if let Some(path) = explicit_path
    && !path.exists()
  {
    anyhow::bail!("Config file not found: {}", path.display());
  }

  match discover_config_path(explicit_path, target) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_parse_valid_config() {
    let config_content = concat!(
      "version = \"1.7\"\n",
      "license = \"lgpl\"\n",
    );

    let config: Config = toml::from_str(config_content).expect("valid config should parse");
    assert_eq!(config.version.as_deref(), Some("1.7"));
    assert_eq!(config.license, Some(LicenseVariant::Lgpl));
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_parse_empty_config() {
    let config: Config = toml::from_str("").expect("empty config should parse");
    assert_eq!(config, Config::default());
    assert_eq!(config.version(), DEFAULT_VERSION);
  }

  #[test]
  fn test_unknown_keys_are_rejected() {
    assert!(toml::from_str::<Config>("year = \"2025\"\n").is_err());
    assert!(toml::from_str::<Config>("license = \"mit\"\n").is_err());
  }

  #[test]
  fn test_validate_version() {
    assert!(validate_version("1.4").is_ok());
    assert!(validate_version("2.0-rc1").is_ok());
    assert!(matches!(validate_version(""), Err(ConfigError::InvalidVersion { .. })));
    assert!(matches!(validate_version("1 4"), Err(ConfigError::InvalidVersion { .. })));
    assert!(matches!(validate_version("1.4*/"), Err(ConfigError::InvalidVersion { .. })));
  }

  #[test]
  fn test_validate_incomplete_license() {
    let config = Config {
      license_file: Some(PathBuf::from("LICENSE")),
      ..Config::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::IncompleteLicense { .. })));

    let config = Config {
      license_phrase: Some("ACME".to_string()),
      ..Config::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::IncompleteLicense { .. })));
  }

  #[test]
  fn test_validate_conflicting_license() {
    let config = Config {
      license: Some(LicenseVariant::Epl),
      license_file: Some(PathBuf::from("LICENSE")),
      license_phrase: Some("ACME".to_string()),
      ..Config::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::ConflictingLicense)));
  }

  #[test]
  fn test_load_resolves_license_file_relative_to_config() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(
      &config_path,
      "license-file = \"header.txt\"\nlicense-phrase = \"ACME\"\n",
    )?;

    let config = Config::load(&config_path)?;
    assert_eq!(config.license_file, Some(temp_dir.path().join("header.txt")));
    Ok(())
  }

  #[test]
  fn test_load_reports_parse_errors() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "version = [")?;

    let err = Config::load(&config_path).expect_err("should fail");
    assert!(matches!(err, ConfigError::ParseError { .. }));
    Ok(())
  }

  #[test]
  fn test_merge_cli_overrides() {
    let mut config = Config {
      version: Some("1.3".to_string()),
      license_file: Some(PathBuf::from("header.txt")),
      license_phrase: Some("ACME".to_string()),
      ..Config::default()
    };

    config.merge_cli_overrides(CliOverrides {
      version: Some("1.4".to_string()),
      license: Some(LicenseVariant::Lgpl),
      ..CliOverrides::default()
    });

    assert_eq!(config.version(), "1.4");
    assert_eq!(config.license, Some(LicenseVariant::Lgpl));
    assert!(config.license_file.is_none());
    assert!(config.license_phrase.is_none());
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_merge_cli_license_file_replaces_builtin() {
    let mut config = Config {
      license: Some(LicenseVariant::Epl),
      ..Config::default()
    };

    config.merge_cli_overrides(CliOverrides {
      license_file: Some(PathBuf::from("header.txt")),
      license_phrase: Some("ACME".to_string()),
      ..CliOverrides::default()
    });

    assert!(config.license.is_none());
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_license_block_defaults_to_epl() -> Result<()> {
    let block = Config::default().license_block()?;
    assert_eq!(block, LicenseBlock::builtin(LicenseVariant::Epl));
    Ok(())
  }

  #[test]
  fn test_license_block_from_custom_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let header = temp_dir.path().join("header.txt");
    std::fs::write(&header, "/*\n * ACME Public License\n */\n")?;

    let config = Config {
      license_file: Some(header),
      license_phrase: Some("ACME Public License".to_string()),
      ..Config::default()
    };
    let block = config.license_block()?;
    assert_eq!(block.phrase(), "ACME Public License");
    assert_eq!(block.lines().len(), 3);
    Ok(())
  }

  #[test]
  fn test_discover_next_to_target() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "version = \"2.0\"\n")?;
    let target = temp_dir.path().join("Foo.java");

    assert_eq!(discover_config_path(None, &target), Some(config_path));
    Ok(())
  }

  #[test]
  fn test_explicit_path_wins() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join(DEFAULT_CONFIG_FILENAME), "")?;
    let explicit = temp_dir.path().join("other.toml");
    std::fs::write(&explicit, "")?;
    let target = temp_dir.path().join("Foo.java");

    assert_eq!(discover_config_path(Some(&explicit), &target), Some(explicit));
    Ok(())
  }

  #[test]
  fn test_load_config_missing_explicit_path_fails() {
    let result = load_config(Some(Path::new("/nonexistent/headerstamp.toml")), Path::new("Foo.java"), false);
    assert!(result.is_err());
  }

  #[test]
  fn test_load_config_disabled() -> Result<()> {
    assert!(load_config(None, Path::new("Foo.java"), true)?.is_none());
    Ok(())
  }
}
