//! Account management module for the contract deployer.
//!
//! This module turns signing credentials into a wallet the delivery layer
//! can use. Non-local profiles sign with the private key loaded from the
//! secrets store; local profiles fall back to the development node's
//! pre-funded account, which requires no configuration at all.

use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use deployer_types::{Address, NetworkProfile, SecretString};
use thiserror::Error;

/// Private key of the first pre-funded account on anvil and hardhat
/// development nodes. Used only for `Local`-role profiles.
const DEV_NODE_PRIVATE_KEY: &str =
	"0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
	/// Error that occurs when a cryptographic key is invalid or malformed.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
	/// Error that occurs when a profile has no usable signing account.
	#[error("No signing account available for profile '{0}'")]
	NoSigningAccount(String),
}

/// Local wallet backed by an in-memory private key.
///
/// Wraps Alloy's signer and exposes only what the delivery layer needs:
/// the deployer address and a signer to hand to the provider's wallet.
#[derive(Debug, Clone)]
pub struct LocalWallet {
	signer: PrivateKeySigner,
}

impl LocalWallet {
	/// Creates a wallet from a hex-encoded private key.
	///
	/// The key may be provided with or without a 0x prefix. The error
	/// message never echoes the key material.
	pub fn new(private_key: &SecretString) -> Result<Self, AccountError> {
		let signer = private_key.with_exposed(|key| {
			key.parse::<PrivateKeySigner>()
				.map_err(|e| AccountError::InvalidKey(e.to_string()))
		})?;

		Ok(Self { signer })
	}

	/// Creates the wallet for a resolved network profile.
	///
	/// Uses the profile's first signing account; `Local`-role profiles
	/// without configured accounts use the dev node's default account.
	pub fn for_profile(profile: &NetworkProfile) -> Result<Self, AccountError> {
		match profile.signing_accounts.first() {
			Some(key) => Self::new(key),
			None if !profile.chain_role.requires_credentials() => {
				tracing::debug!(
					profile = %profile.name,
					"No signing accounts configured, using dev node default account"
				);
				Self::new(&SecretString::from(DEV_NODE_PRIVATE_KEY))
			},
			None => Err(AccountError::NoSigningAccount(profile.name.clone())),
		}
	}

	/// Returns the wallet's address.
	pub fn address(&self) -> Address {
		self.signer.address().into()
	}

	/// Returns the underlying signer, bound to the given chain ID.
	pub fn signer(&self, chain_id: u64) -> PrivateKeySigner {
		self.signer.clone().with_chain_id(Some(chain_id))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use deployer_types::ChainRole;

	const TEST_PRIVATE_KEY: &str =
		"0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

	fn local_profile(accounts: Vec<SecretString>) -> NetworkProfile {
		NetworkProfile {
			name: "localhost".to_string(),
			rpc_url: "http://127.0.0.1:8545".to_string(),
			chain_id: 31337,
			chain_role: ChainRole::Local,
			signing_accounts: accounts,
			is_default: true,
		}
	}

	#[test]
	fn test_wallet_from_valid_key() {
		let wallet = LocalWallet::new(&SecretString::from(TEST_PRIVATE_KEY)).unwrap();
		// Anvil/hardhat account #0
		assert_eq!(
			wallet.address().to_string(),
			"0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
		);
	}

	#[test]
	fn test_wallet_from_key_without_prefix() {
		let key = SecretString::from(TEST_PRIVATE_KEY.trim_start_matches("0x"));
		let wallet = LocalWallet::new(&key).unwrap();
		assert_eq!(wallet.address().0.len(), 20);
	}

	#[test]
	fn test_wallet_from_invalid_key() {
		let result = LocalWallet::new(&SecretString::from("not-a-key"));
		assert!(matches!(result, Err(AccountError::InvalidKey(_))));
	}

	#[test]
	fn test_invalid_key_error_does_not_echo_key() {
		let err = LocalWallet::new(&SecretString::from("deadbeef00")).unwrap_err();
		assert!(!err.to_string().contains("deadbeef00"));
	}

	#[test]
	fn test_local_profile_without_accounts_uses_dev_key() {
		let wallet = LocalWallet::for_profile(&local_profile(vec![])).unwrap();
		assert_eq!(
			wallet.address().to_string(),
			"0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
		);
	}

	#[test]
	fn test_profile_with_account_uses_it() {
		// Anvil/hardhat account #1
		let key = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
		let wallet =
			LocalWallet::for_profile(&local_profile(vec![SecretString::from(key)])).unwrap();
		assert_eq!(
			wallet.address().to_string(),
			"0x70997970c51812dc3a010c7d01b50e0d17dc79c8"
		);
	}

	#[test]
	fn test_non_local_profile_without_accounts_fails() {
		let profile = NetworkProfile {
			name: "mainnet".to_string(),
			rpc_url: "https://example.invalid".to_string(),
			chain_id: 1,
			chain_role: ChainRole::Main,
			signing_accounts: vec![],
			is_default: false,
		};

		let result = LocalWallet::for_profile(&profile);
		assert!(matches!(result, Err(AccountError::NoSigningAccount(_))));
	}

	#[test]
	fn test_signer_carries_chain_id() {
		let wallet = LocalWallet::new(&SecretString::from(TEST_PRIVATE_KEY)).unwrap();
		let signer = wallet.signer(31337);
		assert_eq!(Signer::chain_id(&signer), Some(31337));
	}
}
