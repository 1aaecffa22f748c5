//! Utility functions for common type conversions.

use crate::Address;
use alloy_primitives::{utils::format_ether, U256};

/// Returns the string with a "0x" prefix, adding one if absent.
pub fn with_0x_prefix(s: &str) -> String {
	if s.starts_with("0x") {
		s.to_string()
	} else {
		format!("0x{}", s)
	}
}

/// Returns the string without a leading "0x" prefix.
pub fn without_0x_prefix(s: &str) -> &str {
	s.strip_prefix("0x").unwrap_or(s)
}

/// Parse a hex string (with or without "0x" prefix) into a 20-byte [`Address`].
pub fn parse_address(hex_str: &str) -> Result<Address, String> {
	let bytes =
		hex::decode(without_0x_prefix(hex_str)).map_err(|e| format!("Invalid hex: {}", e))?;
	if bytes.len() != 20 {
		return Err(format!(
			"Invalid address length: expected 20 bytes, got {}",
			bytes.len()
		));
	}
	Ok(Address(bytes))
}

/// Convert a wei amount to a human-readable ETH string.
pub fn wei_to_eth_string(wei_amount: U256) -> String {
	format_ether(wei_amount)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_with_0x_prefix() {
		assert_eq!(with_0x_prefix("abcd"), "0xabcd");
		assert_eq!(with_0x_prefix("0xabcd"), "0xabcd");
	}

	#[test]
	fn test_without_0x_prefix() {
		assert_eq!(without_0x_prefix("0xabcd"), "abcd");
		assert_eq!(without_0x_prefix("abcd"), "abcd");
	}

	#[test]
	fn test_parse_address_valid() {
		let addr = parse_address("0x9326BFA02ADD2366b30bacB125260Af641031331").unwrap();
		assert_eq!(addr.0.len(), 20);

		let no_prefix = parse_address("9326BFA02ADD2366b30bacB125260Af641031331").unwrap();
		assert_eq!(addr, no_prefix);
	}

	#[test]
	fn test_parse_address_invalid_hex() {
		let result = parse_address("0xzz26BFA02ADD2366b30bacB125260Af641031331");
		assert!(result.unwrap_err().contains("Invalid hex"));
	}

	#[test]
	fn test_parse_address_wrong_length() {
		let result = parse_address("0x1234");
		assert!(result.unwrap_err().contains("Invalid address length"));
	}

	#[test]
	fn test_wei_to_eth_string() {
		let wei = U256::from(1_500_000_000_000_000_000u64);
		assert_eq!(wei_to_eth_string(wei), "1.500000000000000000");
	}
}
