//! Alloy-based EVM chain client.
//!
//! Uses the Alloy library to submit and monitor transactions on
//! EVM-compatible blockchains. One client instance is bound to one network
//! and one signing account; the provider's fillers handle nonce, gas, and
//! chain ID so the executor only supplies the transaction payload.

use crate::{ChainClient, DeliveryError};
use alloy_network::EthereumWallet;
use alloy_primitives::{FixedBytes, U256};
use alloy_provider::{
	fillers::{ChainIdFiller, GasFiller, NonceFiller, SimpleNonceManager},
	DynProvider, PendingTransactionConfig, PendingTransactionError, Provider, ProviderBuilder,
};
use alloy_rpc_client::RpcClient;
use alloy_rpc_types::TransactionRequest;
use alloy_signer_local::PrivateKeySigner;
use alloy_transport::layers::RetryBackoffLayer;
use async_trait::async_trait;
use deployer_types::{
	Address, NetworkProfile, Transaction, TransactionHash, TransactionReceipt,
};

/// Chain client backed by an Alloy provider.
#[derive(Debug)]
pub struct AlloyChainClient {
	provider: DynProvider,
	deployer_address: Address,
	chain_id: u64,
	/// Resolved endpoint URL; may embed an API key, so it is scrubbed
	/// from any error text before that text leaves this module.
	rpc_url: String,
}

impl AlloyChainClient {
	/// Connects to the profile's RPC endpoint with the given signer.
	///
	/// The signer is expected to already carry the profile's chain ID. The
	/// URL may embed an API key, so connection errors report only the
	/// profile name.
	pub fn connect(
		profile: &NetworkProfile,
		signer: PrivateKeySigner,
	) -> Result<Self, DeliveryError> {
		let url = profile.rpc_url.parse().map_err(|_| {
			DeliveryError::Network(format!(
				"Invalid RPC URL for network '{}'",
				profile.name
			))
		})?;

		let deployer_address: Address = signer.address().into();
		let wallet = EthereumWallet::from(signer);

		// Retry layer for transient network errors and rate limits
		let retry_layer = RetryBackoffLayer::new(
			5,    // max_retry
			1000, // initial backoff in milliseconds
			10,   // compute units per second
		);

		let client = RpcClient::builder().layer(retry_layer).http(url);

		let provider = ProviderBuilder::new()
			.filler(NonceFiller::new(SimpleNonceManager::default()))
			.filler(GasFiller)
			.filler(ChainIdFiller::default())
			.wallet(wallet)
			.connect_client(client);

		tracing::debug!(
			network = %profile.name,
			chain_id = profile.chain_id,
			deployer = %deployer_address,
			"Connected chain client"
		);

		Ok(Self {
			provider: provider.erased(),
			deployer_address,
			chain_id: profile.chain_id,
			rpc_url: profile.rpc_url.clone(),
		})
	}

	/// Removes the endpoint URL from error text.
	///
	/// Transport errors render the request URL, which for API-keyed
	/// profiles contains the key. Node-side rejection reasons carry no
	/// URL and pass through unchanged.
	fn scrub(&self, message: String) -> String {
		message.replace(&self.rpc_url, "<rpc endpoint>")
	}
}

#[async_trait]
impl ChainClient for AlloyChainClient {
	fn deployer_address(&self) -> Address {
		self.deployer_address.clone()
	}

	fn chain_id(&self) -> u64 {
		self.chain_id
	}

	async fn get_balance(&self) -> Result<U256, DeliveryError> {
		let mut address_bytes = [0u8; 20];
		address_bytes.copy_from_slice(&self.deployer_address.0[..20]);

		self.provider
			.get_balance(alloy_primitives::Address::from(address_bytes))
			.await
			.map_err(|e| {
				DeliveryError::Network(self.scrub(format!("Failed to get balance: {}", e)))
			})
	}

	async fn submit(&self, tx: Transaction) -> Result<TransactionHash, DeliveryError> {
		let request: TransactionRequest = tx.into();

		tracing::debug!(
			chain_id = self.chain_id,
			to = ?request.to,
			data_len = request.input.input().map(|d| d.len()).unwrap_or(0),
			"Sending transaction"
		);

		// The provider's wallet handles signing; a node-side rejection
		// surfaces here with the node's reason attached.
		let pending_tx = self.provider.send_transaction(request).await.map_err(|e| {
			let reason = self.scrub(e.to_string());
			tracing::error!(
				chain_id = self.chain_id,
				"Transaction submission failed: {}",
				reason
			);
			DeliveryError::TransactionFailed(reason)
		})?;

		let tx_hash = *pending_tx.tx_hash();
		Ok(TransactionHash(tx_hash.0.to_vec()))
	}

	async fn wait_for_confirmation(
		&self,
		hash: &TransactionHash,
	) -> Result<TransactionReceipt, DeliveryError> {
		let tx_hash = FixedBytes::<32>::from_slice(&hash.0);

		tracing::info!(tx_hash = %hash, "Waiting for transaction confirmation");

		// No inner deadline; the executor bounds the wait
		let config = PendingTransactionConfig::new(tx_hash)
			.with_required_confirmations(1)
			.with_timeout(None);

		let pending_tx = self
			.provider
			.watch_pending_transaction(config)
			.await
			.map_err(|e| match e {
				PendingTransactionError::FailedToRegister => {
					DeliveryError::Network("Failed to register transaction watcher".to_string())
				},
				other => DeliveryError::Network(
					self.scrub(format!("Transaction watch failed: {}", other)),
				),
			})?;

		let confirmed_hash = pending_tx.await.map_err(|e| {
			DeliveryError::Network(self.scrub(format!("Failed to confirm transaction: {}", e)))
		})?;

		match self.provider.get_transaction_receipt(confirmed_hash).await {
			Ok(Some(receipt)) => Ok(TransactionReceipt {
				hash: TransactionHash(receipt.transaction_hash.0.to_vec()),
				block_number: receipt.block_number.unwrap_or(0),
				success: receipt.status(),
				contract_address: receipt.contract_address.map(Into::into),
			}),
			Ok(None) => Err(DeliveryError::Network(format!(
				"Transaction not found on chain {}",
				self.chain_id
			))),
			Err(e) => Err(DeliveryError::Network(self.scrub(format!(
				"Failed to get receipt on chain {}: {}",
				self.chain_id, e
			)))),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use deployer_types::ChainRole;

	const TEST_PRIVATE_KEY: &str =
		"0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

	fn test_profile(rpc_url: &str) -> NetworkProfile {
		NetworkProfile {
			name: "localhost".to_string(),
			rpc_url: rpc_url.to_string(),
			chain_id: 31337,
			chain_role: ChainRole::Local,
			signing_accounts: vec![],
			is_default: true,
		}
	}

	fn test_signer() -> PrivateKeySigner {
		TEST_PRIVATE_KEY.parse().unwrap()
	}

	#[test]
	fn test_connect_exposes_signer_identity() {
		let client =
			AlloyChainClient::connect(&test_profile("http://127.0.0.1:8545"), test_signer())
				.unwrap();

		assert_eq!(client.chain_id(), 31337);
		assert_eq!(
			client.deployer_address().to_string(),
			"0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
		);
	}

	#[test]
	fn test_connect_invalid_url() {
		let profile = test_profile("not a url");
		let err = AlloyChainClient::connect(&profile, test_signer()).unwrap_err();

		// The message names the profile, never the URL itself
		assert!(err.to_string().contains("localhost"));
		assert!(!err.to_string().contains("not a url"));
	}

	#[test]
	fn test_scrub_removes_endpoint_url() {
		let url = "https://eth-mainnet.g.alchemy.com/v2/super-secret-api-key";
		let client = AlloyChainClient::connect(&test_profile(url), test_signer()).unwrap();

		let scrubbed = client.scrub(format!("error sending request for url ({})", url));
		assert!(!scrubbed.contains("super-secret-api-key"));
		assert!(scrubbed.contains("<rpc endpoint>"));

		// Node-side reasons without the URL pass through untouched
		let reason = "insufficient funds for gas * price + value".to_string();
		assert_eq!(client.scrub(reason.clone()), reason);
	}

	#[tokio::test]
	async fn test_transport_error_never_echoes_api_key() {
		// Unreachable endpoint with a key embedded in the URL; the
		// transport error renders the request URL internally
		let url = "http://127.0.0.1:9/v2/super-secret-api-key";
		let client = AlloyChainClient::connect(&test_profile(url), test_signer()).unwrap();

		let err = client.get_balance().await.unwrap_err();
		assert!(!err.to_string().contains("super-secret-api-key"));
	}
}
