//! Periodic tick producer.

use std::path::PathBuf;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::event::{Event, EventSender};

/// Rates at or below this disable periodic ticking.
pub const MIN_TICK_RATE: Duration = Duration::from_micros(1);

/// Whether `rate` is long enough to drive a ticker.
pub fn is_enabled(rate: Duration) -> bool {
    rate > MIN_TICK_RATE
}

/// Spawn a task that sends [`Event::Tick`] every `rate` until `cancellation_token`
/// is cancelled or the queue is closed.
///
/// The first tick arrives one full period after spawning. When `heartbeat` is
/// set, the current local time (RFC 3339) is written to that file before
/// each tick.
pub fn spawn(
    events: EventSender,
    rate: Duration,
    heartbeat: Option<PathBuf>,
    cancellation_token: CancellationToken,
) -> JoinHandle<()> {
    debug!(?rate, "Starting ticker");
    tokio::spawn(async move {
        let mut interval = interval_at(Instant::now() + rate, rate);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                () = cancellation_token.cancelled() => break,
                _ = interval.tick() => {}
            }

            if let Some(path) = &heartbeat {
                let stamp = chrono::Local::now().to_rfc3339();
                if let Err(err) = tokio::fs::write(path, stamp).await {
                    warn!("Failed to write heartbeat to {}: {err}", path.display());
                }
            }

            trace!("Tick");
            if events.send(Event::Tick).is_err() {
                break;
            }
        }
        debug!("Ticker stopped");
    })
}
