// --- File: crates/slotify_schedule/src/sweeper.rs ---
//! Expiration sweeping.
//!
//! Two independent periodic jobs share this component: the slot sweep
//! (every few minutes) and the availability sweep (once a day at a
//! configured wall-clock time). Each tick is a single idempotent bulk
//! update; repository failures are logged and swallowed so a bad tick
//! never kills the scheduler loop. Both jobs are detached tasks that can
//! be aborted independently.

use chrono::{DateTime, Duration as ChronoDuration, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use slotify_db::{AvailabilityRepository, SlotRepository};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Cadence configuration for the two sweep jobs.
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    pub slot_sweep_interval: Duration,
    /// Zone the daily wall-clock trigger is evaluated in
    pub time_zone: Tz,
    /// Wall-clock time of the daily availability sweep
    pub availability_sweep_time: NaiveTime,
}

/// Handles to the two spawned sweep tasks.
pub struct SweeperHandles {
    slot_task: JoinHandle<()>,
    availability_task: JoinHandle<()>,
}

impl SweeperHandles {
    /// Cancel both sweep loops.
    pub fn abort(&self) {
        self.slot_task.abort();
        self.availability_task.abort();
    }

    /// Cancel only the slot sweep.
    pub fn abort_slot_sweep(&self) {
        self.slot_task.abort();
    }

    /// Cancel only the availability sweep.
    pub fn abort_availability_sweep(&self) {
        self.availability_task.abort();
    }
}

/// The expiration sweeper.
///
/// Holds its own repository handles; it never goes through the request
/// path and shares no mutable state with it beyond the database itself.
pub struct ExpirationSweeper<A, S> {
    availabilities: A,
    slots: S,
}

impl<A, S> ExpirationSweeper<A, S>
where
    A: AvailabilityRepository + 'static,
    S: SlotRepository + 'static,
{
    pub fn new(availabilities: A, slots: S) -> Self {
        Self {
            availabilities,
            slots,
        }
    }

    /// One slot-sweep tick at a pinned instant.
    ///
    /// Transitions every slot with `start < now` still in an actionable
    /// state to `unavailable`. Returns the affected-row count; errors are
    /// logged and reported as zero.
    pub async fn sweep_slots_once(&self, now: DateTime<Utc>) -> u64 {
        info!("Checking for expired slots");
        match self.slots.mark_unavailable_started_before(now, now).await {
            Ok(affected) => {
                if affected > 0 {
                    info!("Marked {} expired slots unavailable", affected);
                }
                affected
            }
            Err(e) => {
                error!("Slot sweep failed: {}", e);
                0
            }
        }
    }

    /// One availability-sweep tick at a pinned instant.
    pub async fn sweep_availabilities_once(&self, now: DateTime<Utc>) -> u64 {
        info!("Checking for expired availabilities");
        match self
            .availabilities
            .mark_inactive_started_before(now, now)
            .await
        {
            Ok(affected) => {
                if affected > 0 {
                    info!("Marked {} availabilities inactive", affected);
                }
                affected
            }
            Err(e) => {
                error!("Availability sweep failed: {}", e);
                0
            }
        }
    }

    /// Spawn both sweep loops as detached tasks.
    pub fn spawn(self: Arc<Self>, config: SweeperConfig) -> SweeperHandles {
        let slot_sweeper = self.clone();
        let slot_task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(config.slot_sweep_interval);
            // The immediate first tick is intentional: catch up on anything
            // that expired while the service was down.
            loop {
                ticker.tick().await;
                slot_sweeper.sweep_slots_once(Utc::now()).await;
            }
        });

        let availability_sweeper = self;
        let tz = config.time_zone;
        let at = config.availability_sweep_time;
        let availability_task = tokio::spawn(async move {
            loop {
                let wait = duration_until_next_occurrence(Utc::now(), tz, at);
                tokio::time::sleep(wait).await;
                availability_sweeper
                    .sweep_availabilities_once(Utc::now())
                    .await;
            }
        });

        SweeperHandles {
            slot_task,
            availability_task,
        }
    }
}

/// Time until the next occurrence of `at` (wall clock in `tz`).
///
/// Walks forward day by day past DST gaps; an ambiguous local time picks
/// the earlier instant.
pub(crate) fn duration_until_next_occurrence(
    now: DateTime<Utc>,
    tz: Tz,
    at: NaiveTime,
) -> Duration {
    let local_now = now.with_timezone(&tz);
    let mut date = local_now.date_naive();

    for _ in 0..4 {
        if let Some(candidate) = tz.from_local_datetime(&date.and_time(at)).earliest() {
            let candidate = candidate.with_timezone(&Utc);
            if candidate > now {
                return (candidate - now).to_std().unwrap_or(Duration::ZERO);
            }
        }
        date = date + ChronoDuration::days(1);
    }

    // Unreachable in practice; fall back to a day so the loop stays alive
    Duration::from_secs(24 * 60 * 60)
}
