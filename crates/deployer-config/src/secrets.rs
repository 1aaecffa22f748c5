//! Credential loading from the local secrets file.
//!
//! Secrets never live in the versioned configuration: they are read from a
//! separate TOML file (`.secrets.toml` by default) that stays on the
//! operator's machine. The values are wrapped in [`SecretString`] the moment
//! they are parsed so nothing downstream can print them.

use crate::ConfigError;
use deployer_types::SecretString;
use serde::Deserialize;
use std::path::Path;

/// Signing and endpoint credentials for non-local networks.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
	/// API key for the RPC provider, substituted into `{api_key}` URL
	/// placeholders.
	pub api_key: SecretString,
	/// Private key of the deploying account.
	pub private_key: SecretString,
}

impl Credentials {
	/// Loads credentials from a TOML secrets file.
	///
	/// An absent file is reported as [`ConfigError::MissingSecrets`]; a file
	/// that parses but lacks a usable key is [`ConfigError::IncompleteSecrets`].
	/// Neither error carries any secret material.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		if !path.exists() {
			return Err(ConfigError::MissingSecrets(path.to_path_buf()));
		}

		let content = std::fs::read_to_string(path)?;
		let credentials: Credentials = toml::from_str(&content)
			.map_err(|e| ConfigError::IncompleteSecrets(e.message().to_string()))?;
		credentials.validate()?;

		tracing::debug!(path = %path.display(), "Loaded credentials from secrets file");
		Ok(credentials)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.api_key.is_empty() {
			return Err(ConfigError::IncompleteSecrets(
				"api_key must not be empty".into(),
			));
		}
		if self.private_key.is_empty() {
			return Err(ConfigError::IncompleteSecrets(
				"private_key must not be empty".into(),
			));
		}
		// Shape check only; the message never carries the value
		let well_formed = self.private_key.with_exposed(|key| {
			let stripped = deployer_types::without_0x_prefix(key);
			stripped.len() == 64 && hex::decode(stripped).is_ok()
		});
		if !well_formed {
			return Err(ConfigError::IncompleteSecrets(
				"private_key must be a 32-byte hex string".into(),
			));
		}
		Ok(())
	}
}
