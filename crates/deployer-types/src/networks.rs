//! Network profile types describing deployment targets.
//!
//! A profile names one target blockchain network together with its
//! connection parameters: the RPC URL template, the chain role, and the
//! default-network flag. Profiles are static configuration; credentials
//! are injected at resolution time and never live in the config file.

use crate::SecretString;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The role a network plays in the deployment workflow.
///
/// `Local` profiles target a development node on this machine and require
/// neither credentials nor public-network reachability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainRole {
	/// Local development node (anvil, hardhat node).
	Local,
	/// Public test network.
	Test,
	/// Production network.
	Main,
}

impl ChainRole {
	/// Whether profiles with this role need signing credentials and an
	/// API-keyed RPC endpoint.
	pub fn requires_credentials(&self) -> bool {
		!matches!(self, ChainRole::Local)
	}
}

/// Static configuration for one named network profile.
///
/// The `rpc_url` may contain an `{api_key}` placeholder which is filled in
/// from the credential store when the profile is resolved. Local profiles
/// may omit the URL entirely and fall back to the default dev-node endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProfileConfig {
	/// RPC URL template, with optional `{api_key}` placeholder.
	pub rpc_url: Option<String>,
	/// Chain ID used for replay protection.
	pub chain_id: u64,
	/// Role of this network.
	pub role: ChainRole,
	/// Whether this profile is the configured default target.
	#[serde(default)]
	pub default: bool,
}

/// Profiles configuration mapping profile names to their parameters.
pub type ProfilesConfig = HashMap<String, ProfileConfig>;

/// A fully resolved network profile, ready for the delivery layer.
///
/// Unlike [`ProfileConfig`] this carries concrete values: the RPC URL has
/// its API key substituted and the signing accounts are populated from the
/// credential store (or left empty for local profiles).
#[derive(Debug, Clone)]
pub struct NetworkProfile {
	/// Profile name as configured (e.g. "localhost", "mainnet").
	pub name: String,
	/// Concrete RPC endpoint URL.
	pub rpc_url: String,
	/// Chain ID of the target network.
	pub chain_id: u64,
	/// Role of the target network.
	pub chain_role: ChainRole,
	/// Private keys authorized to sign for this profile, in priority order.
	pub signing_accounts: Vec<SecretString>,
	/// Whether this profile is the configured default target.
	pub is_default: bool,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_chain_role_requires_credentials() {
		assert!(!ChainRole::Local.requires_credentials());
		assert!(ChainRole::Test.requires_credentials());
		assert!(ChainRole::Main.requires_credentials());
	}

	#[test]
	fn test_profile_config_deserialization() {
		let json = serde_json::json!({
			"rpc_url": "https://eth-mainnet.g.alchemy.com/v2/{api_key}",
			"chain_id": 1,
			"role": "main",
			"default": false
		});

		let profile: ProfileConfig = serde_json::from_value(json).unwrap();
		assert_eq!(profile.chain_id, 1);
		assert_eq!(profile.role, ChainRole::Main);
		assert!(!profile.default);
	}

	#[test]
	fn test_profile_config_default_flag_defaults_to_false() {
		let json = serde_json::json!({
			"rpc_url": "http://127.0.0.1:8545",
			"chain_id": 31337,
			"role": "local"
		});

		let profile: ProfileConfig = serde_json::from_value(json).unwrap();
		assert!(!profile.default);
	}

	#[test]
	fn test_profile_config_url_optional() {
		let json = serde_json::json!({
			"chain_id": 31337,
			"role": "local"
		});

		let profile: ProfileConfig = serde_json::from_value(json).unwrap();
		assert!(profile.rpc_url.is_none());
		assert_eq!(profile.role, ChainRole::Local);
	}

	#[test]
	fn test_network_profile_debug_redacts_accounts() {
		let profile = NetworkProfile {
			name: "testnet".to_string(),
			rpc_url: "https://example.invalid".to_string(),
			chain_id: 11155111,
			chain_role: ChainRole::Test,
			signing_accounts: vec![SecretString::from("0xdeadbeef")],
			is_default: false,
		};

		let debug_str = format!("{:?}", profile);
		assert!(!debug_str.contains("deadbeef"));
	}
}
