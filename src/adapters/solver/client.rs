//! Solver Bus HTTP Client - Rate-limited JSON-RPC Client
//!
//! Wraps reqwest with a per-request timeout, client-side rate
//! limiting, and bounded retries on transient transport failures for
//! all solver relay interactions.

use std::num::NonZeroU32;
use std::time::Duration;

use anyhow::{Context, Result};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::types::{RpcEnvelope, RpcResponse};

/// Configuration for the solver bus client.
#[derive(Debug, Clone)]
pub struct SolverClientConfig {
  /// Relay endpoint URL.
  pub url: String,
  /// Per-request timeout. Distinct from the monitor interval: a
  /// stalled request surfaces as a failure instead of blocking the
  /// polling loop.
  pub timeout: Duration,
  /// Maximum retries on transient transport errors.
  pub max_retries: u32,
  /// Base delay between retries (exponential backoff).
  pub retry_base_delay: Duration,
  /// Client-side request budget per minute.
  pub max_requests_per_minute: u32,
}

impl Default for SolverClientConfig {
  fn default() -> Self {
    Self {
      url: "https://solver-relay-v2.chaindefuser.com/rpc".to_string(),
      timeout: Duration::from_secs(30),
      max_retries: 2,
      retry_base_delay: Duration::from_millis(200),
      max_requests_per_minute: 120,
    }
  }
}

/// Transport-level failure modes of a relay call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolverError {
  #[error("solver relay request timed out")]
  Timeout,

  #[error("solver relay transport error: {0}")]
  Transport(String),

  #[error("solver relay rate limited the client")]
  RateLimited,

  #[error("solver relay RPC error {code}: {message}")]
  Rpc { code: i64, message: String },

  #[error("solver relay response could not be decoded: {0}")]
  Decode(String),
}

/// Rate-limited JSON-RPC client for the solver relay.
pub struct SolverBusClient {
  /// Underlying HTTP client.
  http: Client,
  /// Client configuration.
  config: SolverClientConfig,
  /// Client-side request limiter.
  limiter: DefaultDirectRateLimiter,
}

impl SolverBusClient {
  /// Create a new solver bus client.
  pub fn new(config: SolverClientConfig) -> Result<Self> {
    let http = Client::builder()
      .timeout(config.timeout)
      .pool_max_idle_per_host(5)
      .build()
      .context("Failed to build HTTP client")?;

    let per_minute = NonZeroU32::new(config.max_requests_per_minute)
      .context("max_requests_per_minute must be non-zero")?;
    let limiter = RateLimiter::direct(Quota::per_minute(per_minute));

    Ok(Self {
      http,
      config,
      limiter,
    })
  }

  /// Execute a JSON-RPC call with rate limiting and bounded retries.
  ///
  /// RPC-level errors (the relay answered, but with an error object)
  /// are returned immediately; only transport failures and server
  /// errors are retried. A null or missing result field comes back as
  /// `None` — the relay answers null instead of an empty array when
  /// nothing matches.
  pub async fn call<P, R>(&self, method: &str, params: P) -> Result<Option<R>, SolverError>
  where
    P: Serialize,
    R: DeserializeOwned + Default,
  {
    let mut last_error = None;

    for attempt in 0..=self.config.max_retries {
      if attempt > 0 {
        let delay = self.config.retry_base_delay * 2u32.pow(attempt - 1);
        debug!(attempt, delay_ms = delay.as_millis(), "Retrying relay call");
        sleep(delay).await;
      }

      self.limiter.until_ready().await;

      let envelope = RpcEnvelope::new(method, &params);

      match self.http.post(&self.config.url).json(&envelope).send().await {
        Ok(response) => match response.status() {
          StatusCode::OK => {
            let parsed: RpcResponse<R> = response
              .json()
              .await
              .map_err(|e| SolverError::Decode(e.to_string()))?;

            if let Some(err) = parsed.error {
              return Err(SolverError::Rpc {
                code: err.code,
                message: err.message,
              });
            }

            return Ok(parsed.result);
          }
          StatusCode::TOO_MANY_REQUESTS => {
            warn!(method, "Relay rate limited the client, backing off");
            last_error = Some(SolverError::RateLimited);
            continue;
          }
          status if status.is_server_error() => {
            warn!(method, status = %status, "Relay server error, retrying");
            last_error = Some(SolverError::Transport(format!("server error: {status}")));
            continue;
          }
          status => {
            let body = response.text().await.unwrap_or_default();
            return Err(SolverError::Transport(format!("HTTP {status}: {body}")));
          }
        },
        Err(e) if e.is_timeout() => {
          warn!(method, attempt, "Relay request timed out");
          last_error = Some(SolverError::Timeout);
          continue;
        }
        Err(e) => {
          warn!(method, attempt, error = %e, "Relay request failed");
          last_error = Some(SolverError::Transport(e.to_string()));
          continue;
        }
      }
    }

    Err(last_error.unwrap_or_else(|| SolverError::Transport("max retries exceeded".to_string())))
  }

  /// The configured relay endpoint.
  pub fn url(&self) -> &str {
    &self.config.url
  }
}
