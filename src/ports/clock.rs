//! Clock Port - Time and Sleep Capability
//!
//! The monitor loop is the only component that suspends voluntarily,
//! and quote expiry checks are the only reads of wall-clock time.
//! Both go through this capability so the state machine is testable
//! without real time passing.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Time source and timer for the monitor loop.
#[async_trait]
pub trait Clock: Send + Sync + 'static {
  /// Current wall-clock time.
  fn now(&self) -> DateTime<Utc>;

  /// Suspend for the given duration.
  async fn sleep(&self, duration: Duration);
}

/// Production clock backed by tokio's timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }

  async fn sleep(&self, duration: Duration) {
    tokio::time::sleep(duration).await;
  }
}
