//! Compiled contract artifact types and constructor-argument encoding.
//!
//! The compiler toolchain is an external collaborator: it turns a contract
//! source tree into a JSON artifact carrying the ABI and creation bytecode.
//! This module loads that artifact and prepares the init code for a
//! contract-creation transaction, coercing the human-readable constructor
//! arguments against the types the constructor actually declares.

use alloy_dyn_abi::{DynSolValue, Specifier};
use alloy_json_abi::JsonAbi;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading or using a contract artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing the artifact JSON.
	#[error("Artifact parse error: {0}")]
	Parse(String),
	/// Error that occurs when the artifact carries no creation bytecode.
	#[error("Artifact has no creation bytecode")]
	MissingBytecode,
	/// Error that occurs when constructor arguments do not match the ABI.
	#[error("Constructor argument mismatch: {0}")]
	ArgumentMismatch(String),
}

/// A compiled contract artifact: ABI plus creation bytecode.
///
/// Accepts both hardhat-style artifacts (`"bytecode": "0x..."`) and
/// foundry-style artifacts (`"bytecode": {"object": "0x..."}`).
#[derive(Debug, Clone)]
pub struct ContractArtifact {
	/// Contract name as recorded by the compiler, if present.
	pub contract_name: Option<String>,
	/// The contract's ABI.
	pub abi: JsonAbi,
	/// Decoded creation bytecode.
	pub bytecode: Vec<u8>,
}

#[derive(Deserialize)]
struct RawArtifact {
	#[serde(rename = "contractName", default)]
	contract_name: Option<String>,
	abi: JsonAbi,
	bytecode: RawBytecode,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
	Hex(String),
	Object { object: String },
}

impl ContractArtifact {
	/// Loads an artifact from a JSON file produced by the compiler toolchain.
	pub fn load(path: &Path) -> Result<Self, ArtifactError> {
		let content = std::fs::read_to_string(path)?;
		Self::from_json(&content)
	}

	/// Parses an artifact from its JSON representation.
	pub fn from_json(json: &str) -> Result<Self, ArtifactError> {
		let raw: RawArtifact =
			serde_json::from_str(json).map_err(|e| ArtifactError::Parse(e.to_string()))?;

		let bytecode_hex = match &raw.bytecode {
			RawBytecode::Hex(hex_str) => hex_str,
			RawBytecode::Object { object } => object,
		};
		let bytecode = hex::decode(bytecode_hex.trim_start_matches("0x"))
			.map_err(|e| ArtifactError::Parse(format!("Invalid bytecode hex: {}", e)))?;

		if bytecode.is_empty() {
			return Err(ArtifactError::MissingBytecode);
		}

		Ok(ContractArtifact {
			contract_name: raw.contract_name,
			abi: raw.abi,
			bytecode,
		})
	}

	/// Encodes constructor arguments against the constructor's declared inputs.
	///
	/// Each argument string is coerced to the corresponding input type
	/// (`address`, `uint256`, ...). A count or type mismatch is reported as
	/// [`ArtifactError::ArgumentMismatch`] without any encoding taking place.
	pub fn encode_constructor_args(&self, args: &[String]) -> Result<Vec<u8>, ArtifactError> {
		let inputs = match &self.abi.constructor {
			Some(constructor) => constructor.inputs.as_slice(),
			None => &[],
		};

		if inputs.len() != args.len() {
			return Err(ArtifactError::ArgumentMismatch(format!(
				"constructor takes {} argument(s), {} provided",
				inputs.len(),
				args.len()
			)));
		}

		let mut values = Vec::with_capacity(inputs.len());
		for (input, arg) in inputs.iter().zip(args) {
			let ty = input.resolve().map_err(|e| {
				ArtifactError::ArgumentMismatch(format!(
					"could not resolve constructor input '{}': {}",
					input.name, e
				))
			})?;
			let value = ty.coerce_str(arg).map_err(|e| {
				ArtifactError::ArgumentMismatch(format!(
					"'{}' is not a valid {}: {}",
					arg,
					ty.sol_type_name(),
					e
				))
			})?;
			values.push(value);
		}

		Ok(DynSolValue::Tuple(values).abi_encode_params())
	}

	/// Builds the init code for a contract-creation transaction:
	/// creation bytecode followed by the ABI-encoded constructor arguments.
	pub fn init_code(&self, args: &[String]) -> Result<Vec<u8>, ArtifactError> {
		let mut code = self.bytecode.clone();
		code.extend_from_slice(&self.encode_constructor_args(args)?);
		Ok(code)
	}
}
