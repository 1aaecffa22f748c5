//! Configuration module for the contract deployer.
//!
//! This module provides structures and utilities for managing deployer
//! configuration: the network profile registry, compiler settings, and the
//! deployment request parameters. Configuration is loaded from TOML with
//! `${VAR}` environment-variable resolution and validated once at startup;
//! it is never mutated afterwards. Signing credentials are deliberately not
//! part of the config file; see the [`secrets`] module.

pub mod registry;
pub mod secrets;

pub use registry::ProfileRegistry;
pub use secrets::Credentials;

use deployer_types::ProfilesConfig;
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during configuration operations.
///
/// All of these are detected locally before any network call, are fatal to
/// the current run, and are never retried automatically.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
	/// Error that occurs when the secrets source is absent.
	#[error("Secrets file not found: {0}")]
	MissingSecrets(PathBuf),
	/// Error that occurs when the secrets source is present but unusable.
	#[error("Incomplete secrets: {0}")]
	IncompleteSecrets(String),
	/// Error that occurs when a requested network profile does not exist.
	#[error("Unknown network: {0}")]
	UnknownNetwork(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the input dump
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure for the deployer.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	/// Path to the local, non-versioned secrets file.
	#[serde(default = "default_secrets_file")]
	pub secrets_file: PathBuf,
	/// Named network profiles.
	#[serde(default = "registry::builtin_profiles")]
	pub profiles: ProfilesConfig,
	/// Compiler and optimizer settings.
	#[serde(default)]
	pub compiler: CompilerConfig,
	/// Parameters of the deployment to perform.
	#[serde(default)]
	pub deployment: DeploymentConfig,
}

/// Compiler version and optimizer settings.
///
/// Applied uniformly regardless of target network; consumed by the external
/// compiler toolchain. Pure configuration, no runtime decisions.
#[derive(Debug, Clone, Deserialize)]
pub struct CompilerConfig {
	/// Solidity language version.
	#[serde(default = "default_solc_version")]
	pub solc_version: String,
	/// Whether the optimizer is enabled.
	#[serde(default = "default_true")]
	pub optimizer_enabled: bool,
	/// Optimizer run count, if overridden.
	#[serde(default)]
	pub optimizer_runs: Option<u32>,
}

impl Default for CompilerConfig {
	fn default() -> Self {
		Self {
			solc_version: default_solc_version(),
			optimizer_enabled: true,
			optimizer_runs: None,
		}
	}
}

/// Parameters of the contract deployment to perform.
#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentConfig {
	/// Path to the compiled contract artifact (ABI + bytecode JSON).
	#[serde(default = "default_artifact_path")]
	pub artifact: PathBuf,
	/// Constructor arguments, in the order the constructor declares them.
	#[serde(default = "default_constructor_args")]
	pub constructor_args: Vec<String>,
}

impl Default for DeploymentConfig {
	fn default() -> Self {
		Self {
			artifact: default_artifact_path(),
			constructor_args: default_constructor_args(),
		}
	}
}

fn default_secrets_file() -> PathBuf {
	PathBuf::from(".secrets.toml")
}

fn default_solc_version() -> String {
	"0.8.0".to_string()
}

fn default_true() -> bool {
	true
}

fn default_artifact_path() -> PathBuf {
	PathBuf::from("artifacts/contracts/Presale.sol/Presale.json")
}

fn default_constructor_args() -> Vec<String> {
	vec![
		"0x9326BFA02ADD2366b30bacB125260Af641031331".to_string(),
		"5000000000".to_string(),
	]
}

/// Resolves environment variables in a string.
///
/// Replaces `${VAR_NAME}` with the value of the environment variable, and
/// supports default values with `${VAR_NAME:-default_value}`.
///
/// Input is limited to 1MB to prevent ReDoS attacks.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024;
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {e}")))?;

	let mut result = input.to_string();
	let mut replacements = Vec::new();

	for cap in re.captures_iter(input) {
		let full_match = cap.get(0).unwrap();
		let var_name = cap.get(1).unwrap().as_str();
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{var_name}' not found"
					)))
				},
			},
		};

		replacements.push((full_match.start(), full_match.end(), value));
	}

	// Apply replacements in reverse order to maintain positions
	for (start, end, value) in replacements.iter().rev() {
		result.replace_range(start..end, value);
	}

	Ok(result)
}

impl Config {
	/// Loads configuration from a TOML file with environment-variable
	/// resolution, then validates it.
	pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path)?;
		Self::from_toml_str(&content)
	}

	/// Parses and validates configuration from a TOML string.
	pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
		let resolved = resolve_env_vars(content)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}

	/// Returns the built-in configuration used when no config file exists.
	pub fn builtin() -> Self {
		let config = Config {
			secrets_file: default_secrets_file(),
			profiles: registry::builtin_profiles(),
			compiler: CompilerConfig::default(),
			deployment: DeploymentConfig::default(),
		};
		debug_assert!(config.validate().is_ok());
		config
	}

	/// Builds the profile registry from this configuration, running the
	/// startup invariant checks.
	pub fn registry(&self) -> Result<ProfileRegistry, ConfigError> {
		ProfileRegistry::new(self.profiles.clone())
	}

	/// Validates the configuration to ensure all required fields are set.
	fn validate(&self) -> Result<(), ConfigError> {
		if self.profiles.is_empty() {
			return Err(ConfigError::Validation(
				"At least one network profile must be configured".into(),
			));
		}
		if self.compiler.solc_version.is_empty() {
			return Err(ConfigError::Validation(
				"Compiler version cannot be empty".into(),
			));
		}
		if self.deployment.artifact.as_os_str().is_empty() {
			return Err(ConfigError::Validation(
				"Deployment artifact path cannot be empty".into(),
			));
		}
		// Registry construction performs the profile-level checks
		ProfileRegistry::new(self.profiles.clone())?;
		Ok(())
	}
}
