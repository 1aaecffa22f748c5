//! Common types module for the contract deployer.
//!
//! This module defines the core data types shared across the deployer
//! components. It provides a centralized location for shared types to
//! ensure consistency between configuration, delivery, and execution.

/// Blockchain address and transaction types.
pub mod account;
/// Compiled contract artifact types and constructor-argument encoding.
pub mod artifact;
/// Transaction hash and receipt types returned by the chain client.
pub mod delivery;
/// Network profile types describing deployment targets.
pub mod networks;
/// Secure string type for handling sensitive data.
pub mod secret_string;
/// Utility functions for common type conversions.
pub mod utils;

// Re-export all types for convenient access
pub use account::{Address, Transaction};
pub use artifact::{ArtifactError, ContractArtifact};
pub use delivery::{TransactionHash, TransactionReceipt};
pub use networks::{ChainRole, NetworkProfile, ProfileConfig, ProfilesConfig};
pub use secret_string::SecretString;
pub use utils::{parse_address, wei_to_eth_string, with_0x_prefix, without_0x_prefix};
