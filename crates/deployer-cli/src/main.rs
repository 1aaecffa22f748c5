//! Command-line entry point for the contract deployer.
//!
//! Resolves the target network profile, loads the compiled contract
//! artifact, and executes a single deployment. On success the deployed
//! contract address is the only thing printed to stdout; all diagnostics go
//! to stderr, so the output composes with scripts.

use clap::Parser;
use deployer_config::{Config, Credentials};
use deployer_core::{DeploymentExecutor, DeploymentRequest, DeploymentResult};
use deployer_types::ContractArtifact;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration file consulted when --config is not given.
const DEFAULT_CONFIG_FILE: &str = "deployer.toml";

/// Command-line arguments for the deployer.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	///
	/// When omitted, `deployer.toml` in the working directory is used if it
	/// exists, otherwise the built-in configuration.
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Target network profile name
	///
	/// Defaults to the profile marked `default` in the configuration.
	#[arg(short, long)]
	network: Option<String>,

	/// Deadline in seconds for submission and confirmation
	#[arg(long, default_value = "2000")]
	timeout: u64,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

#[tokio::main]
async fn main() {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(args.log_level.clone()));

	// Diagnostics on stderr; stdout is reserved for the contract address
	fmt()
		.with_env_filter(env_filter)
		.with_target(true)
		.with_writer(std::io::stderr)
		.init();

	match run(&args).await {
		Ok(result) => {
			println!("{}", result.contract_address);
		},
		Err(e) => {
			eprintln!("Error: {}", e);
			std::process::exit(1);
		},
	}
}

async fn run(args: &Args) -> Result<DeploymentResult, Box<dyn std::error::Error>> {
	let config = load_config(args)?;
	let registry = config.registry()?;

	let network = args
		.network
		.clone()
		.unwrap_or_else(|| registry.default_name().to_string());

	// Local targets never need the secrets file; everything else does
	let credentials = if registry.role(&network)?.requires_credentials() {
		Some(Credentials::load(&config.secrets_file)?)
	} else {
		None
	};

	let profile = registry.resolve(&network, credentials.as_ref())?;

	let artifact = ContractArtifact::load(&config.deployment.artifact)?;
	tracing::info!(
		contract = artifact.contract_name.as_deref().unwrap_or("<unnamed>"),
		artifact = %config.deployment.artifact.display(),
		"Loaded contract artifact"
	);

	let executor = DeploymentExecutor::for_profile(&profile)?;
	let request = DeploymentRequest {
		artifact,
		constructor_args: config.deployment.constructor_args.clone(),
	};

	let result = executor
		.deploy_with_timeout(&request, Duration::from_secs(args.timeout))
		.await?;

	Ok(result)
}

/// Picks the configuration source: explicit path, local file, or built-in.
fn load_config(args: &Args) -> Result<Config, deployer_config::ConfigError> {
	match &args.config {
		Some(path) => Config::from_file(path),
		None => {
			let local = Path::new(DEFAULT_CONFIG_FILE);
			if local.exists() {
				Config::from_file(local)
			} else {
				tracing::debug!("No configuration file found, using built-in defaults");
				Ok(Config::builtin())
			}
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_args_defaults() {
		let args = Args::try_parse_from(["deployer"]).unwrap();
		assert!(args.config.is_none());
		assert!(args.network.is_none());
		assert_eq!(args.timeout, 2000);
		assert_eq!(args.log_level, "info");
	}

	#[test]
	fn test_args_explicit() {
		let args = Args::try_parse_from([
			"deployer",
			"--config",
			"custom.toml",
			"--network",
			"testnet",
			"--timeout",
			"60",
		])
		.unwrap();

		assert_eq!(args.config, Some(PathBuf::from("custom.toml")));
		assert_eq!(args.network.as_deref(), Some("testnet"));
		assert_eq!(args.timeout, 60);
	}

	#[test]
	fn test_load_config_explicit_path_must_exist() {
		let args = Args::try_parse_from(["deployer", "--config", "/nonexistent/deployer.toml"])
			.unwrap();

		let result = load_config(&args);
		assert!(matches!(result, Err(deployer_config::ConfigError::Io(_))));
	}
}
