//! Watch command: the scan-and-reconcile loop.

use anyhow::{Context, Result};
use chrono::Local;
use tokio::time::MissedTickBehavior;

use at_core::Tracker;
use at_db::Database;

use crate::{Config, arp};

/// Runs the tick loop until Ctrl-C.
///
/// Each interval tick takes one ARP snapshot and feeds it to the tracker.
/// Missed ticks are not replayed; the next scan simply observes the current
/// state, which the transition rules absorb as a longer interval. A tick
/// whose persistence fails is logged and retried implicitly on the next
/// tick, since the in-memory state did not advance.
pub fn run(db: Database, config: &Config) -> Result<()> {
    let tick = config.tick_config();
    let mut tracker = Tracker::new(db, tick, Local::now().naive_local())
        .context("failed to recover tracker state")?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to initialize tokio runtime")?;

    runtime.block_on(async move {
        let mut interval = tokio::time::interval(tick.scan_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!(
            interval_secs = tick.scan_interval.as_secs(),
            cutoff = %tick.cutoff,
            "watching for devices"
        );
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let visible = arp::scan().await;
                    match tracker.run_tick(&visible) {
                        Ok(events) if !events.is_empty() => {
                            tracing::debug!(fired = events.len(), "tick complete");
                        }
                        Ok(_) => {}
                        Err(err) => {
                            tracing::error!(error = %err, "tick failed, will retry next scan");
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("shutting down");
                    break;
                }
            }
        }
        Ok(())
    })
}
