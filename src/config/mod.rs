//! Configuration Module - TOML-based Executor Configuration
//!
//! Loads and validates configuration from `config.toml`. All token
//! and chain definitions, solver endpoints, and timing defaults are
//! externalized here - nothing is hardcoded in the domain layer, and
//! none of the defaults live as ambient state in code paths.

pub mod loader;

use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::assets::{AssetInfo, AssetRegistry, ChainInfo};
use crate::domain::swap::SwapRequest;

/// Top-level executor configuration.
///
/// Loaded from `config.toml` at startup. All fields are validated
/// before any orchestration begins.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Executor identity and mode.
  pub bot: BotConfig,
  /// Account the signer acts for.
  pub account: AccountConfig,
  /// Solver relay endpoint and transport tuning.
  #[serde(default)]
  pub solver: SolverConfig,
  /// Monitoring loop defaults.
  #[serde(default)]
  pub monitor: MonitorConfig,
  /// Withdrawal policy.
  #[serde(default)]
  pub withdrawal: WithdrawalConfig,
  /// Supported tokens and their on-chain representations.
  pub tokens: Vec<AssetInfo>,
  /// Known chains.
  pub chains: Vec<ChainInfo>,
  /// The swap job to run, if one is configured.
  pub swap: Option<SwapJobConfig>,
}

impl AppConfig {
  /// Build the asset registry from the configured tokens and chains.
  pub fn registry(&self) -> AssetRegistry {
    AssetRegistry::new(
      self.tokens.clone(),
      self.chains.clone(),
      self.account.native_chain.clone(),
    )
  }
}

/// Executor identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
  /// Human-readable executor name.
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
  /// Enable dry-run mode (no real submissions).
  #[serde(default)]
  pub dry_run: bool,
}

/// Account configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountConfig {
  /// Account id the signer acts for (default withdrawal destination).
  pub account_id: String,
  /// Chain on which intent balances are natively held.
  #[serde(default = "default_native_chain")]
  pub native_chain: String,
}

/// Solver relay configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SolverConfig {
  /// Relay JSON-RPC endpoint.
  #[serde(default = "default_solver_url")]
  pub url: String,
  /// Per-request timeout in milliseconds.
  #[serde(default = "default_solver_timeout_ms")]
  pub timeout_ms: u64,
  /// Maximum transport retries per call.
  #[serde(default = "default_solver_retries")]
  pub max_retries: u32,
  /// Base delay between transport retries (milliseconds).
  #[serde(default = "default_retry_base_delay_ms")]
  pub retry_base_delay_ms: u64,
  /// Client-side request budget per minute.
  #[serde(default = "default_requests_per_minute")]
  pub max_requests_per_minute: u32,
  /// Minimum quote validity requested from solvers (milliseconds).
  #[serde(default = "default_min_deadline_ms")]
  pub quote_min_deadline_ms: u64,
}

impl Default for SolverConfig {
  fn default() -> Self {
    Self {
      url: default_solver_url(),
      timeout_ms: default_solver_timeout_ms(),
      max_retries: default_solver_retries(),
      retry_base_delay_ms: default_retry_base_delay_ms(),
      max_requests_per_minute: default_requests_per_minute(),
      quote_min_deadline_ms: default_min_deadline_ms(),
    }
  }
}

/// Monitoring loop defaults, used when a swap job does not override
/// them.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
  /// Spacing between quote polls (seconds).
  #[serde(default = "default_interval_secs")]
  pub interval_secs: u64,
  /// Total wait budget (seconds).
  #[serde(default = "default_max_wait_secs")]
  pub max_wait_secs: u64,
  /// Bounded retry count for transient oracle failures.
  #[serde(default = "default_oracle_retries")]
  pub max_oracle_retries: u32,
}

impl Default for MonitorConfig {
  fn default() -> Self {
    Self {
      interval_secs: default_interval_secs(),
      max_wait_secs: default_max_wait_secs(),
      max_oracle_retries: default_oracle_retries(),
    }
  }
}

/// Withdrawal policy.
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawalConfig {
  /// Whether an explicitly requested withdrawal to the native chain
  /// is submitted as a same-chain transfer, or skipped as a no-op.
  #[serde(default = "default_true")]
  pub withdraw_on_native: bool,
}

impl Default for WithdrawalConfig {
  fn default() -> Self {
    Self {
      withdraw_on_native: default_true(),
    }
  }
}

/// A configured swap job.
#[derive(Debug, Clone, Deserialize)]
pub struct SwapJobConfig {
  /// Input token symbol.
  pub token_in: String,
  /// Input amount (human units).
  pub amount_in: Decimal,
  /// Output token symbol.
  pub token_out: String,
  /// Settlement chain of the output leg.
  pub chain_out: String,
  /// Minimum acceptable price (USD per unit of token_in).
  pub min_price: Option<Decimal>,
  /// Per-job override of the poll interval (seconds).
  pub monitor_interval_secs: Option<u64>,
  /// Per-job override of the wait budget (seconds).
  pub max_wait_secs: Option<u64>,
  /// Destination chain for the post-swap withdrawal.
  pub destination_chain: Option<String>,
  /// Destination address for the post-swap withdrawal.
  pub destination_address: Option<String>,
}

impl SwapJobConfig {
  /// Materialize the job into a swap request, filling monitoring
  /// parameters from the defaults where the job does not override.
  pub fn to_request(&self, defaults: &MonitorConfig) -> SwapRequest {
    SwapRequest {
      token_in: self.token_in.clone(),
      amount_in: self.amount_in,
      token_out: self.token_out.clone(),
      chain_out: self.chain_out.clone(),
      min_price: self.min_price,
      monitor_interval: Duration::from_secs(
        self.monitor_interval_secs.unwrap_or(defaults.interval_secs),
      ),
      max_wait_time: Duration::from_secs(self.max_wait_secs.unwrap_or(defaults.max_wait_secs)),
      destination_chain: self.destination_chain.clone(),
      destination_address: self.destination_address.clone(),
    }
  }
}

// Default value functions for serde

fn default_log_level() -> String {
  "info".to_string()
}

fn default_true() -> bool {
  true
}

fn default_native_chain() -> String {
  "near".to_string()
}

fn default_solver_url() -> String {
  "https://solver-relay-v2.chaindefuser.com/rpc".to_string()
}

fn default_solver_timeout_ms() -> u64 {
  30_000
}

fn default_solver_retries() -> u32 {
  2
}

fn default_retry_base_delay_ms() -> u64 {
  200
}

fn default_requests_per_minute() -> u32 {
  120
}

fn default_min_deadline_ms() -> u64 {
  120_000
}

fn default_interval_secs() -> u64 {
  5
}

fn default_max_wait_secs() -> u64 {
  300
}

fn default_oracle_retries() -> u32 {
  3
}
