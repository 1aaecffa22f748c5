//! Blockchain address and transaction types.
//!
//! This module defines the address and transaction representations used
//! throughout the deployer for signer identification and contract-creation
//! transaction construction.

use crate::with_0x_prefix;
use alloy_primitives::{Address as AlloyAddress, Bytes, TxKind, U256};
use alloy_rpc_types::TransactionRequest;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Blockchain address representation.
///
/// Stores addresses as raw bytes; serialized as a 0x-prefixed hex string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(pub Vec<u8>);

impl Serialize for Address {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&with_0x_prefix(&hex::encode(&self.0)))
	}
}

impl<'de> Deserialize<'de> for Address {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		let bytes = hex::decode(s.trim_start_matches("0x"))
			.map_err(|e| serde::de::Error::custom(format!("Invalid hex address: {}", e)))?;

		if bytes.len() != 20 {
			return Err(serde::de::Error::custom(format!(
				"Invalid address length: expected 20 bytes, got {}",
				bytes.len()
			)));
		}

		Ok(Address(bytes))
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{}", hex::encode(&self.0))
	}
}

impl From<AlloyAddress> for Address {
	fn from(addr: AlloyAddress) -> Self {
		Address(addr.as_slice().to_vec())
	}
}

/// Blockchain transaction representation.
///
/// Contains the fields needed to construct a contract-creation (or plain)
/// transaction. A `to` of `None` denotes contract creation.
#[derive(Debug, Clone)]
pub struct Transaction {
	/// Recipient address (None for contract creation).
	pub to: Option<Address>,
	/// Transaction data; for contract creation this is the init code.
	pub data: Vec<u8>,
	/// Value to transfer in native currency.
	pub value: U256,
	/// Chain ID for replay protection.
	pub chain_id: u64,
	/// Gas limit for transaction execution (None lets the provider fill it).
	pub gas_limit: Option<u64>,
}

impl Transaction {
	/// Creates a contract-creation transaction carrying the given init code.
	pub fn contract_creation(init_code: Vec<u8>, chain_id: u64) -> Self {
		Transaction {
			to: None,
			data: init_code,
			value: U256::ZERO,
			chain_id,
			gas_limit: None,
		}
	}
}

/// Conversion into Alloy's request type; used by the delivery layer.
impl From<Transaction> for TransactionRequest {
	fn from(tx: Transaction) -> Self {
		let to = match tx.to {
			Some(to) => {
				let mut addr_bytes = [0u8; 20];
				addr_bytes.copy_from_slice(&to.0[..20]);
				TxKind::Call(AlloyAddress::from(addr_bytes))
			},
			None => TxKind::Create,
		};

		TransactionRequest {
			chain_id: Some(tx.chain_id),
			value: Some(tx.value),
			to: Some(to),
			gas: tx.gas_limit,
			input: alloy_rpc_types::TransactionInput {
				input: Some(Bytes::from(tx.data)),
				data: None,
			},
			..Default::default()
		}
	}
}
