//! Deployment execution engine.
//!
//! Drives a single contract deployment end to end: encode the constructor
//! arguments into init code, submit the creation transaction through a
//! [`ChainClient`], wait for one confirmation, and extract the new contract
//! address from the receipt. All argument validation happens before anything
//! touches the network, and nothing here is retried automatically.

use alloy_primitives::U256;
use deployer_account::LocalWallet;
use deployer_delivery::{AlloyChainClient, ChainClient, DeliveryError};
use deployer_types::{
	wei_to_eth_string, Address, ContractArtifact, NetworkProfile, Transaction, TransactionHash,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while executing a deployment.
#[derive(Debug, Error)]
pub enum DeployError {
	/// Error that occurs when no usable signer or connection exists for the
	/// target network.
	#[error("Signer unavailable: {0}")]
	SignerUnavailable(String),
	/// Error that occurs when constructor arguments do not match the ABI.
	/// Detected locally; no transaction is sent.
	#[error("Constructor argument mismatch: {0}")]
	ArgumentMismatch(String),
	/// Error that occurs when the network rejects or reverts the
	/// transaction. Carries the node's reason.
	#[error("Transaction rejected: {0}")]
	TransactionRejected(String),
	/// Error that occurs when confirmation does not arrive within the
	/// deadline. The transaction may still land later.
	#[error("Timed out waiting for transaction confirmation")]
	ConfirmationTimeout,
}

impl From<DeliveryError> for DeployError {
	fn from(err: DeliveryError) -> Self {
		match err {
			DeliveryError::Network(msg) => DeployError::TransactionRejected(msg),
			DeliveryError::TransactionFailed(msg) => DeployError::TransactionRejected(msg),
		}
	}
}

/// One contract deployment to perform.
#[derive(Debug, Clone)]
pub struct DeploymentRequest {
	/// The compiled contract to deploy.
	pub artifact: ContractArtifact,
	/// Constructor arguments, in declaration order.
	pub constructor_args: Vec<String>,
}

/// Outcome of a confirmed deployment.
#[derive(Debug, Clone)]
pub struct DeploymentResult {
	/// Address assigned to the newly created contract.
	pub contract_address: Address,
	/// Hash of the creation transaction.
	pub transaction_hash: TransactionHash,
	/// Block the transaction was included in.
	pub block_number: u64,
	/// Account the deployment was sent from.
	pub deployer: Address,
	/// Deployer balance before submission, in wei. `None` when the
	/// advisory balance lookup failed.
	pub balance_before: Option<U256>,
}

/// Executes deployments against one chain client.
pub struct DeploymentExecutor {
	client: Arc<dyn ChainClient>,
}

impl DeploymentExecutor {
	/// Creates an executor over an already connected chain client.
	pub fn new(client: Arc<dyn ChainClient>) -> Self {
		Self { client }
	}

	/// Builds an executor for a resolved network profile: wallet from the
	/// profile's signing accounts, Alloy client against its RPC endpoint.
	pub fn for_profile(profile: &NetworkProfile) -> Result<Self, DeployError> {
		let wallet = LocalWallet::for_profile(profile)
			.map_err(|e| DeployError::SignerUnavailable(e.to_string()))?;

		let client = AlloyChainClient::connect(profile, wallet.signer(profile.chain_id))
			.map_err(|e| DeployError::SignerUnavailable(e.to_string()))?;

		Ok(Self::new(Arc::new(client)))
	}

	/// Deploys the contract and waits for one confirmation.
	///
	/// The confirmation wait is unbounded; use [`deploy_with_timeout`] to
	/// enforce a deadline.
	///
	/// [`deploy_with_timeout`]: Self::deploy_with_timeout
	pub async fn deploy(&self, request: &DeploymentRequest) -> Result<DeploymentResult, DeployError> {
		// Argument validation first, before any network traffic
		let init_code = request
			.artifact
			.init_code(&request.constructor_args)
			.map_err(|e| DeployError::ArgumentMismatch(e.to_string()))?;

		let deployer = self.client.deployer_address();
		tracing::info!(
			deployer = %deployer,
			chain_id = self.client.chain_id(),
			contract = request.artifact.contract_name.as_deref().unwrap_or("<unnamed>"),
			"Deploying contract"
		);

		// Balance is informational; a failed lookup never aborts the run
		let balance_before = match self.client.get_balance().await {
			Ok(balance) => {
				tracing::info!(balance_eth = %wei_to_eth_string(balance), "Deployer balance");
				Some(balance)
			},
			Err(e) => {
				tracing::warn!("Could not fetch deployer balance: {}", e);
				None
			},
		};

		let tx = Transaction::contract_creation(init_code, self.client.chain_id());
		let tx_hash = self.client.submit(tx).await?;
		tracing::info!(tx_hash = %tx_hash, "Creation transaction submitted");

		let receipt = self.client.wait_for_confirmation(&tx_hash).await?;

		if !receipt.success {
			return Err(DeployError::TransactionRejected(format!(
				"execution reverted in block {}",
				receipt.block_number
			)));
		}

		let contract_address = receipt.contract_address.ok_or_else(|| {
			DeployError::TransactionRejected(
				"receipt carries no contract address".to_string(),
			)
		})?;

		tracing::info!(
			contract_address = %contract_address,
			block_number = receipt.block_number,
			"Contract deployed"
		);

		Ok(DeploymentResult {
			contract_address,
			transaction_hash: receipt.hash,
			block_number: receipt.block_number,
			deployer,
			balance_before,
		})
	}

	/// Deploys with a deadline on the whole submit-and-confirm sequence.
	///
	/// A deadline that fires maps to [`DeployError::ConfirmationTimeout`];
	/// the transaction may still confirm on chain afterwards.
	pub async fn deploy_with_timeout(
		&self,
		request: &DeploymentRequest,
		timeout: Duration,
	) -> Result<DeploymentResult, DeployError> {
		match tokio::time::timeout(timeout, self.deploy(request)).await {
			Ok(result) => result,
			Err(_) => Err(DeployError::ConfirmationTimeout),
		}
	}
}
