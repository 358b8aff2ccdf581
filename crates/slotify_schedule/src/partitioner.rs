// --- File: crates/slotify_schedule/src/partitioner.rs ---
//! Slot partitioning.
//!
//! Pure function from a validated availability window to the ordered slot
//! batch that tiles it. The validator guarantees the window divides evenly,
//! so the count here is exact and no remainder handling is needed.

use chrono::{DateTime, Duration, Utc};
use slotify_common::models::{new_slot_id, Slot, SlotStatus};

/// Partitions `[start, end)` into contiguous slots of `duration_minutes`.
///
/// Slot `i` spans `[start + i*d, start + (i+1)*d)`; ids are fresh
/// unguessable tokens and every slot starts out `available`.
pub fn partition_into_slots(
    availability_id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    duration_minutes: i64,
    now: DateTime<Utc>,
) -> Vec<Slot> {
    let total_minutes = (end - start).num_minutes();
    let count = total_minutes / duration_minutes;
    let step = Duration::minutes(duration_minutes);

    (0..count)
        .map(|i| {
            let slot_start = start + step * i as i32;
            Slot {
                slot_id: new_slot_id(),
                availability_id: availability_id.to_string(),
                slot_start_time: slot_start,
                slot_end_time: slot_start + step,
                status: SlotStatus::Available,
                meeting_link: None,
                attendee_email: None,
                created_at: now,
                updated_at: now,
                metadata: None,
            }
        })
        .collect()
}
