//! Merge, sort and group
//!
//! Fans the per-channel call sequences into one schedule.
//!
//! Channels are processed in the order given by the caller. Calls are
//! ordered by offset only; among calls with equal offsets, calls from an
//! earlier channel come before calls from a later one, and calls from the
//! same channel keep their block order. This tie-break is part of the
//! contract, so controllers see simultaneous switches in a fixed order.

use crate::types::{ScheduleEntry, TimedCall};

/// Merge per-channel calls into schedule entries grouped by offset
pub fn merge_schedule<I, C>(channels: I) -> Vec<ScheduleEntry>
where
    I: IntoIterator<Item = C>,
    C: IntoIterator<Item = TimedCall>,
{
    let mut calls: Vec<TimedCall> = channels.into_iter().flatten().collect();

    // sort_by_key is stable, which gives the channel-order tie-break
    calls.sort_by_key(|call| call.offset);

    let mut entries: Vec<ScheduleEntry> = Vec::new();
    for call in calls {
        match entries.last_mut() {
            Some(entry) if entry.offset == call.offset => entry.calls.push(call.function),
            _ => entries.push(ScheduleEntry::new(call.offset, vec![call.function])),
        }
    }

    log::trace!("Merged calls into {} schedule entries", entries.len());
    entries
}
