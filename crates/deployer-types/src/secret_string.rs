//! Secure string type for handling sensitive data.
//!
//! Wraps credential material (API keys, private keys) so that it can be
//! passed around without leaking into logs, error messages, or serialized
//! output. The `Debug` and `Display` implementations are redacted; callers
//! that genuinely need the value go through [`SecretString::with_exposed`].

use serde::{Deserialize, Deserializer};
use std::fmt;

/// A string whose contents are never printed.
///
/// There is intentionally no `Serialize` implementation and no way to
/// obtain the inner `String` by value; the closure-based accessor keeps
/// exposure sites explicit and greppable.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
	/// Runs `f` with the secret value exposed and returns its result.
	pub fn with_exposed<R>(&self, f: impl FnOnce(&str) -> R) -> R {
		f(&self.0)
	}

	/// Returns true if the secret is the empty string.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<&str> for SecretString {
	fn from(value: &str) -> Self {
		SecretString(value.to_string())
	}
}

impl From<String> for SecretString {
	fn from(value: String) -> Self {
		SecretString(value)
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("SecretString(***)")
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("***")
	}
}

impl<'de> Deserialize<'de> for SecretString {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		Ok(SecretString(String::deserialize(deserializer)?))
	}
}
