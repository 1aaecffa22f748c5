//! Network profile registry and resolution.
//!
//! The registry holds the validated set of named profiles and turns a
//! profile name plus optional credentials into a fully resolved
//! [`NetworkProfile`]: the `{api_key}` URL placeholder is substituted and
//! the signing accounts are populated. Local profiles resolve without any
//! credentials at all.

use crate::{secrets::Credentials, ConfigError};
use deployer_types::{NetworkProfile, ProfileConfig, ProfilesConfig};

/// Endpoint a local development node listens on by default.
const DEV_NODE_RPC_URL: &str = "http://127.0.0.1:8545";

/// Placeholder in RPC URL templates filled in from the credential store.
const API_KEY_PLACEHOLDER: &str = "{api_key}";

/// Validated collection of network profiles.
#[derive(Debug)]
pub struct ProfileRegistry {
	profiles: ProfilesConfig,
	default_name: String,
}

impl ProfileRegistry {
	/// Builds a registry, checking the profile-level invariants: at least
	/// one profile, exactly one marked default, and non-local profiles
	/// carrying an RPC URL.
	pub fn new(profiles: ProfilesConfig) -> Result<Self, ConfigError> {
		if profiles.is_empty() {
			return Err(ConfigError::Validation(
				"At least one network profile must be configured".into(),
			));
		}

		let mut defaults: Vec<&str> = profiles
			.iter()
			.filter(|(_, p)| p.default)
			.map(|(name, _)| name.as_str())
			.collect();
		defaults.sort_unstable();

		let default_name = match defaults.as_slice() {
			[name] => name.to_string(),
			[] => {
				return Err(ConfigError::Validation(
					"Exactly one profile must be marked as default, found none".into(),
				))
			},
			many => {
				return Err(ConfigError::Validation(format!(
					"Exactly one profile must be marked as default, found {}: {}",
					many.len(),
					many.join(", ")
				)))
			},
		};

		for (name, profile) in &profiles {
			if profile.role.requires_credentials() && profile.rpc_url.is_none() {
				return Err(ConfigError::Validation(format!(
					"Profile '{}' has role '{:?}' and must configure an rpc_url",
					name, profile.role
				)));
			}
		}

		Ok(Self {
			profiles,
			default_name,
		})
	}

	/// Returns the name of the default profile.
	pub fn default_name(&self) -> &str {
		&self.default_name
	}

	/// Returns the chain role of the default profile.
	///
	/// Lets the caller decide whether credentials need to be loaded before
	/// resolving.
	pub fn default_role(&self) -> deployer_types::ChainRole {
		self.profiles[&self.default_name].role
	}

	/// Returns the chain role of a named profile.
	pub fn role(&self, name: &str) -> Result<deployer_types::ChainRole, ConfigError> {
		self.profiles
			.get(name)
			.map(|p| p.role)
			.ok_or_else(|| ConfigError::UnknownNetwork(name.to_string()))
	}

	/// Resolves a profile by name, injecting credentials where the profile
	/// requires them.
	pub fn resolve(
		&self,
		name: &str,
		credentials: Option<&Credentials>,
	) -> Result<NetworkProfile, ConfigError> {
		let profile = self
			.profiles
			.get(name)
			.ok_or_else(|| ConfigError::UnknownNetwork(name.to_string()))?;

		if profile.role.requires_credentials() && credentials.is_none() {
			return Err(ConfigError::IncompleteSecrets(format!(
				"network '{}' requires credentials",
				name
			)));
		}

		let rpc_url = self.resolve_rpc_url(name, profile, credentials)?;

		let signing_accounts = match credentials {
			Some(credentials) => vec![credentials.private_key.clone()],
			None => vec![],
		};

		tracing::info!(
			network = %name,
			chain_id = profile.chain_id,
			role = ?profile.role,
			"Resolved network profile"
		);

		Ok(NetworkProfile {
			name: name.to_string(),
			rpc_url,
			chain_id: profile.chain_id,
			chain_role: profile.role,
			signing_accounts,
			is_default: profile.default,
		})
	}

	/// Resolves the default profile.
	pub fn resolve_default(
		&self,
		credentials: Option<&Credentials>,
	) -> Result<NetworkProfile, ConfigError> {
		self.resolve(&self.default_name, credentials)
	}

	fn resolve_rpc_url(
		&self,
		name: &str,
		profile: &ProfileConfig,
		credentials: Option<&Credentials>,
	) -> Result<String, ConfigError> {
		let template = match &profile.rpc_url {
			Some(url) => url.clone(),
			// Registry validation guarantees only local profiles get here
			None => DEV_NODE_RPC_URL.to_string(),
		};

		if !template.contains(API_KEY_PLACEHOLDER) {
			return Ok(template);
		}

		match credentials {
			Some(credentials) => Ok(credentials
				.api_key
				.with_exposed(|key| template.replace(API_KEY_PLACEHOLDER, key))),
			None => Err(ConfigError::IncompleteSecrets(format!(
				"network '{}' uses an API-keyed endpoint",
				name
			))),
		}
	}
}

/// The profiles available when no configuration file overrides them.
///
/// `localhost` is the default target so a fresh checkout deploys against a
/// local dev node without any setup. `mainnet` and `testnet` use API-keyed
/// endpoints and resolve only with credentials present.
pub fn builtin_profiles() -> ProfilesConfig {
	use deployer_types::ChainRole;

	let mut profiles = ProfilesConfig::new();
	profiles.insert(
		"localhost".to_string(),
		ProfileConfig {
			rpc_url: Some(DEV_NODE_RPC_URL.to_string()),
			chain_id: 31337,
			role: ChainRole::Local,
			default: true,
		},
	);
	profiles.insert(
		"hardhat".to_string(),
		ProfileConfig {
			rpc_url: None,
			chain_id: 31337,
			role: ChainRole::Local,
			default: false,
		},
	);
	profiles.insert(
		"testnet".to_string(),
		ProfileConfig {
			rpc_url: Some("https://eth-sepolia.g.alchemy.com/v2/{api_key}".to_string()),
			chain_id: 11155111,
			role: ChainRole::Test,
			default: false,
		},
	);
	profiles.insert(
		"mainnet".to_string(),
		ProfileConfig {
			rpc_url: Some("https://eth-mainnet.g.alchemy.com/v2/{api_key}".to_string()),
			chain_id: 1,
			role: ChainRole::Main,
			default: false,
		},
	);
	profiles
}

#[cfg(test)]
mod tests {
	use super::*;
	use deployer_types::ChainRole;

	fn test_credentials() -> Credentials {
		toml::from_str("api_key = \"test-key\"\nprivate_key = \"0xabc123\"\n").unwrap()
	}

	#[test]
	fn test_builtin_profiles_validate() {
		let registry = ProfileRegistry::new(builtin_profiles()).unwrap();
		assert_eq!(registry.default_name(), "localhost");
		assert_eq!(registry.default_role(), ChainRole::Local);
	}

	#[test]
	fn test_role_lookup() {
		let registry = ProfileRegistry::new(builtin_profiles()).unwrap();
		assert_eq!(registry.role("mainnet").unwrap(), ChainRole::Main);
		assert!(matches!(
			registry.role("nope"),
			Err(ConfigError::UnknownNetwork(_))
		));
	}

	#[test]
	fn test_rejects_no_default() {
		let mut profiles = builtin_profiles();
		profiles.get_mut("localhost").unwrap().default = false;

		let result = ProfileRegistry::new(profiles);
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn test_rejects_multiple_defaults() {
		let mut profiles = builtin_profiles();
		profiles.get_mut("mainnet").unwrap().default = true;

		let err = ProfileRegistry::new(profiles).unwrap_err();
		assert!(err.to_string().contains("localhost"));
		assert!(err.to_string().contains("mainnet"));
	}

	#[test]
	fn test_rejects_non_local_without_url() {
		let mut profiles = builtin_profiles();
		profiles.get_mut("mainnet").unwrap().rpc_url = None;

		let result = ProfileRegistry::new(profiles);
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn test_resolve_unknown_network() {
		let registry = ProfileRegistry::new(builtin_profiles()).unwrap();
		let result = registry.resolve("ropsten", None);

		match result {
			Err(ConfigError::UnknownNetwork(name)) => assert_eq!(name, "ropsten"),
			other => panic!("Expected UnknownNetwork, got {:?}", other),
		}
	}

	#[test]
	fn test_resolve_local_without_credentials() {
		let registry = ProfileRegistry::new(builtin_profiles()).unwrap();
		let profile = registry.resolve_default(None).unwrap();

		assert_eq!(profile.name, "localhost");
		assert_eq!(profile.rpc_url, DEV_NODE_RPC_URL);
		assert_eq!(profile.chain_id, 31337);
		assert!(profile.signing_accounts.is_empty());
		assert!(profile.is_default);
	}

	#[test]
	fn test_resolve_local_url_fallback() {
		let registry = ProfileRegistry::new(builtin_profiles()).unwrap();
		let profile = registry.resolve("hardhat", None).unwrap();

		assert_eq!(profile.rpc_url, DEV_NODE_RPC_URL);
	}

	#[test]
	fn test_resolve_non_local_without_credentials_fails() {
		let registry = ProfileRegistry::new(builtin_profiles()).unwrap();
		let result = registry.resolve("mainnet", None);

		assert!(matches!(result, Err(ConfigError::IncompleteSecrets(_))));
	}

	#[test]
	fn test_resolve_injects_api_key() {
		let registry = ProfileRegistry::new(builtin_profiles()).unwrap();
		let profile = registry.resolve("mainnet", Some(&test_credentials())).unwrap();

		assert_eq!(
			profile.rpc_url,
			"https://eth-mainnet.g.alchemy.com/v2/test-key"
		);
		assert_eq!(profile.chain_id, 1);
		assert_eq!(profile.signing_accounts.len(), 1);
	}

	#[test]
	fn test_resolve_testnet_chain_id() {
		let registry = ProfileRegistry::new(builtin_profiles()).unwrap();
		let profile = registry.resolve("testnet", Some(&test_credentials())).unwrap();

		assert_eq!(profile.chain_id, 11155111);
		assert_eq!(profile.chain_role, ChainRole::Test);
	}

	#[test]
	fn test_resolution_error_never_contains_secrets() {
		let registry = ProfileRegistry::new(builtin_profiles()).unwrap();
		let err = registry.resolve("mainnet", None).unwrap_err();

		let msg = err.to_string();
		assert!(msg.contains("mainnet"));
		assert!(!msg.contains("test-key"));
	}
}
