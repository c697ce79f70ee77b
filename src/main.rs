//! NEAR Intents Executor — Entry Point
//!
//! Initializes configuration, logging, the solver relay client, and
//! the swap orchestrator, then runs the configured swap job to its
//! terminal outcome. SIGINT cancels the monitoring loop cooperatively.
//!
//! Wiring sequence:
//! 1. Load config.toml + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Build asset registry from configured tokens/chains
//! 4. Create solver relay client (timeout + rate limit + retry)
//! 5. Create signer (paper mode; live signing is an external backend)
//! 6. Run SwapOrchestrator for the configured job
//! 7. SIGINT → broadcast cancel → monitor stops between ticks

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{info, warn};

use near_intents_executor::adapters::paper::PaperSigner;
use near_intents_executor::adapters::solver::client::{SolverBusClient, SolverClientConfig};
use near_intents_executor::adapters::solver::quotes::SolverBusQuoteService;
use near_intents_executor::config;
use near_intents_executor::domain::swap::SwapOutcome;
use near_intents_executor::ports::clock::SystemClock;
use near_intents_executor::usecases::orchestrator::{OrchestratorSettings, SwapOrchestrator};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config = config::loader::load_config("config.toml")
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(&config.bot.log_level)
                }),
        )
        .json()
        .init();

    info!(
        name = %config.bot.name,
        version = env!("CARGO_PKG_VERSION"),
        dry_run = config.bot.dry_run,
        account = %config.account.account_id,
        "Starting NEAR intents executor"
    );

    // ── 3. Asset registry from configured tokens/chains ─────
    let registry = Arc::new(config.registry());

    // ── 4. Solver relay client + quote service ──────────────
    let solver_config = SolverClientConfig {
        url: config.solver.url.clone(),
        timeout: Duration::from_millis(config.solver.timeout_ms),
        max_retries: config.solver.max_retries,
        retry_base_delay: Duration::from_millis(config.solver.retry_base_delay_ms),
        max_requests_per_minute: config.solver.max_requests_per_minute,
    };
    let solver_client =
        SolverBusClient::new(solver_config).context("Failed to create solver relay client")?;
    let quotes = Arc::new(SolverBusQuoteService::new(solver_client));

    // ── 5. Signer ───────────────────────────────────────────
    // Live signing (keys, nonces) is an external backend contract;
    // this binary only ships the paper implementation.
    anyhow::ensure!(
        config.bot.dry_run,
        "No live signer backend is configured; set bot.dry_run = true"
    );
    warn!("Dry-run mode — quotes are real but NO intents are submitted");
    let signer = Arc::new(PaperSigner::new(config.account.account_id.clone()));

    // ── 6. Orchestrator for the configured swap job ─────────
    let job = config
        .swap
        .as_ref()
        .context("No [swap] job configured in config.toml")?;
    let request = job.to_request(&config.monitor);

    let settings = OrchestratorSettings {
        max_oracle_retries: config.monitor.max_oracle_retries,
        withdraw_on_native: config.withdrawal.withdraw_on_native,
        quote_min_deadline_ms: config.solver.quote_min_deadline_ms,
    };
    let orchestrator = SwapOrchestrator::new(
        quotes,
        signer,
        Arc::new(SystemClock),
        registry,
        settings,
    );

    // ── 7. Run with cooperative SIGINT cancellation ─────────
    let (cancel_tx, cancel_rx) = broadcast::channel::<()>(1);
    let mut run_handle =
        tokio::spawn(async move { orchestrator.run(request, cancel_rx).await });

    let outcome = tokio::select! {
        result = &mut run_handle => result.context("Orchestration task panicked")?,
        _ = signal::ctrl_c() => {
            info!("SIGINT received, cancelling swap");
            let _ = cancel_tx.send(());
            run_handle.await.context("Orchestration task panicked")?
        }
    };

    match &outcome {
        SwapOutcome::Executed { swap, withdrawal } => {
            info!(
                swap_intent = %swap.intent_hash,
                amount_out = %swap.amount_out,
                withdrawal = ?withdrawal.as_ref().map(|w| &w.intent_hash),
                "Swap executed"
            );
        }
        SwapOutcome::TimedOut { last_quote } => {
            warn!(
                last_price = ?last_quote.as_ref().map(|q| q.price.to_string()),
                "Swap timed out waiting for price, no funds moved"
            );
        }
        SwapOutcome::Cancelled => {
            info!("Swap cancelled, no funds moved");
        }
        SwapOutcome::Failed { stage, error, swap } => {
            warn!(
                stage = %stage,
                error = %error,
                swap_intent = ?swap.as_ref().map(|s| &s.intent_hash),
                "Swap failed"
            );
        }
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&outcome).context("Failed to render outcome")?
    );
    Ok(())
}
