//! Transaction delivery module for the contract deployer.
//!
//! This module handles the submission and confirmation of blockchain
//! transactions. The [`ChainClient`] trait abstracts one connection to one
//! target network; the Alloy-backed implementation lives under
//! [`implementations::evm::alloy`].

use alloy_primitives::U256;
use async_trait::async_trait;
use deployer_types::{Address, Transaction, TransactionHash, TransactionReceipt};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod evm {
		pub mod alloy;
	}
}

pub use implementations::evm::alloy::AlloyChainClient;

/// Errors that can occur during transaction delivery operations.
#[derive(Debug, Error)]
pub enum DeliveryError {
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// Error that occurs when the node rejects or reverts a transaction.
	#[error("Transaction failed: {0}")]
	TransactionFailed(String),
}

/// Trait defining the interface to one target blockchain network.
///
/// A client is constructed already bound to a resolved network profile and
/// a signing account; the deployment executor drives it without knowing
/// anything about RPC transports or signing.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait ChainClient: Send + Sync {
	/// Returns the address transactions are signed and sent from.
	fn deployer_address(&self) -> Address;

	/// Returns the chain ID of the connected network.
	fn chain_id(&self) -> u64;

	/// Returns the native-currency balance of the deployer account, in wei.
	async fn get_balance(&self) -> Result<U256, DeliveryError>;

	/// Signs and submits a transaction, returning its hash.
	///
	/// A node-side rejection (invalid transaction, insufficient funds,
	/// execution revert during estimation) is reported as
	/// [`DeliveryError::TransactionFailed`] with the node's reason preserved.
	async fn submit(&self, tx: Transaction) -> Result<TransactionHash, DeliveryError>;

	/// Waits until the transaction is included in a block and returns its
	/// receipt.
	///
	/// Waits indefinitely; callers bound the wait with their own timeout.
	async fn wait_for_confirmation(
		&self,
		hash: &TransactionHash,
	) -> Result<TransactionReceipt, DeliveryError>;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_display() {
		let err = DeliveryError::Network("connection refused".to_string());
		assert_eq!(err.to_string(), "Network error: connection refused");

		let err = DeliveryError::TransactionFailed("insufficient funds".to_string());
		assert_eq!(err.to_string(), "Transaction failed: insufficient funds");
	}
}
