//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config: AppConfig = toml::from_str(&content)
    .with_context(|| "Failed to parse config.toml")?;

  validate_config(&config)?;

  info!(
    account = %config.account.account_id,
    tokens = config.tokens.len(),
    chains = config.chains.len(),
    dry_run = config.bot.dry_run,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Non-empty account, token, and chain definitions
/// - Representable token decimals
/// - Token/chain cross-references
/// - Positive timing values and swap amounts
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.account.account_id.is_empty(),
    "account_id must not be empty"
  );

  // Chain validation
  anyhow::ensure!(
    !config.chains.is_empty(),
    "At least one chain must be configured"
  );
  let native = config
    .chains
    .iter()
    .find(|c| c.id == config.account.native_chain)
    .with_context(|| {
      format!(
        "Native chain {} is not in the [[chains]] list",
        config.account.native_chain
      )
    })?;
  anyhow::ensure!(
    native.enabled,
    "Native chain {} must be enabled",
    native.id
  );

  // Token validation
  anyhow::ensure!(
    !config.tokens.is_empty(),
    "At least one token must be configured"
  );
  for (i, token) in config.tokens.iter().enumerate() {
    anyhow::ensure!(
      !token.symbol.is_empty(),
      "Token {} has empty symbol",
      i
    );
    anyhow::ensure!(
      !token.token_id.is_empty(),
      "Token {} ({}) has empty token_id",
      i,
      token.symbol
    );
    anyhow::ensure!(
      token.decimals <= 28,
      "Token {} ({}) decimals {} exceed representable precision",
      i,
      token.symbol,
      token.decimals
    );
    for chain in &token.chains {
      anyhow::ensure!(
        config.chains.iter().any(|c| &c.id == chain),
        "Token {} references unknown chain {}",
        token.symbol,
        chain
      );
    }
  }

  // Solver validation
  anyhow::ensure!(
    !config.solver.url.is_empty(),
    "Solver relay URL must not be empty"
  );
  anyhow::ensure!(
    config.solver.timeout_ms > 0,
    "Solver timeout_ms must be positive"
  );
  anyhow::ensure!(
    config.solver.max_requests_per_minute > 0,
    "Solver max_requests_per_minute must be positive"
  );

  // Monitor validation
  anyhow::ensure!(
    config.monitor.interval_secs > 0,
    "Monitor interval_secs must be positive, got {}",
    config.monitor.interval_secs
  );

  // Swap job validation
  if let Some(swap) = &config.swap {
    anyhow::ensure!(
      swap.amount_in > Decimal::ZERO,
      "Swap amount_in must be positive, got {}",
      swap.amount_in
    );
    if let Some(min_price) = swap.min_price {
      anyhow::ensure!(
        min_price > Decimal::ZERO,
        "Swap min_price must be positive, got {}",
        min_price
      );
    }
    if let Some(interval) = swap.monitor_interval_secs {
      anyhow::ensure!(
        interval > 0,
        "Swap monitor_interval_secs must be positive"
      );
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  const SAMPLE: &str = r#"
    [bot]
    name = "intents-executor"
    dry_run = true

    [account]
    account_id = "alice.near"

    [[chains]]
    id = "near"
    name = "NEAR Protocol"
    kind = "near"
    enabled = true

    [[chains]]
    id = "eth"
    name = "Ethereum"
    kind = "evm"
    enabled = true

    [[tokens]]
    symbol = "NEAR"
    token_id = "wrap.near"
    decimals = 24
    chains = ["near"]

    [[tokens]]
    symbol = "USDC"
    token_id = "usdc.token.near"
    omft = "eth-0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48.omft.near"
    decimals = 6
    chains = ["near", "eth"]

    [swap]
    token_in = "NEAR"
    amount_in = 100.0
    token_out = "USDC"
    chain_out = "near"
    min_price = 3.5
  "#;

  #[test]
  fn test_sample_config_parses_and_validates() {
    let config: AppConfig = toml::from_str(SAMPLE).unwrap();
    assert!(validate_config(&config).is_ok());
    assert_eq!(config.account.native_chain, "near");
    assert_eq!(config.monitor.interval_secs, 5);
    assert_eq!(config.solver.quote_min_deadline_ms, 120_000);

    let request = config
      .swap
      .as_ref()
      .unwrap()
      .to_request(&config.monitor);
    assert_eq!(request.monitor_interval.as_secs(), 5);
    assert_eq!(request.max_wait_time.as_secs(), 300);
  }

  #[test]
  fn test_unknown_token_chain_rejected() {
    let broken = SAMPLE.replace("chains = [\"near\"]", "chains = [\"sol\"]");
    let config: AppConfig = toml::from_str(&broken).unwrap();
    assert!(validate_config(&config).is_err());
  }

  #[test]
  fn test_non_positive_amount_rejected() {
    let broken = SAMPLE.replace("amount_in = 100.0", "amount_in = 0.0");
    let config: AppConfig = toml::from_str(&broken).unwrap();
    assert!(validate_config(&config).is_err());
  }

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config("nonexistent.toml");
    assert!(result.is_err());
  }
}
