//! Transaction hash and receipt types returned by the chain client.

use crate::Address;

/// Blockchain transaction hash representation.
///
/// Stores transaction hashes as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransactionHash(pub Vec<u8>);

impl std::fmt::Display for TransactionHash {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "0x{}", hex::encode(&self.0))
	}
}

/// Transaction receipt containing execution details.
///
/// Provides information about a transaction after it has been included in
/// a block. For contract-creation transactions the receipt carries the
/// address assigned to the new contract.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransactionReceipt {
	/// The hash of the transaction.
	pub hash: TransactionHash,
	/// The block number where the transaction was included.
	pub block_number: u64,
	/// Whether the transaction executed successfully.
	pub success: bool,
	/// Address of the created contract, if this was a creation transaction.
	pub contract_address: Option<Address>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_transaction_hash_display() {
		let hash = TransactionHash(vec![0xde, 0xad, 0xbe, 0xef]);
		assert_eq!(format!("{}", hash), "0xdeadbeef");
	}

	#[test]
	fn test_receipt_serialization_round_trip() {
		let receipt = TransactionReceipt {
			hash: TransactionHash(vec![1u8; 32]),
			block_number: 42,
			success: true,
			contract_address: Some(Address(vec![2u8; 20])),
		};

		let json = serde_json::to_string(&receipt).unwrap();
		let deserialized: TransactionReceipt = serde_json::from_str(&json).unwrap();
		assert_eq!(receipt, deserialized);
	}
}
