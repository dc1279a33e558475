//! Timestamp binding
//!
//! Pairs each block's switch with the block's start offset. Offsets are exact
//! prefix sums of the block durations, computed in integer nanoseconds.

use crate::types::{CompileError, Offset, Result, Switch, TimedSwitch};
use chrono::TimeDelta;

/// Bind switches to the start offsets of their blocks
///
/// Durations and switches are paired positionally and pairing stops at the
/// shorter of the two. Blocks without a switch produce nothing.
///
/// # Errors
/// * `NegativeDuration` if a paired block has a negative duration
/// * `OffsetOverflow` if a block's start offset does not fit in a `TimeDelta`
pub fn bind_timestamps(
    durations: &[Offset],
    switches: &[Option<Switch>],
) -> Result<Vec<TimedSwitch>> {
    let mut timed = Vec::new();
    let mut offset = TimeDelta::zero();
    let mut previous = TimeDelta::zero();

    for (block, (duration, switch)) in durations.iter().zip(switches).enumerate() {
        if *duration < TimeDelta::zero() {
            return Err(CompileError::NegativeDuration { block });
        }

        offset = offset
            .checked_add(&previous)
            .ok_or(CompileError::OffsetOverflow { block })?;
        previous = *duration;

        if let Some(switch) = switch {
            timed.push(TimedSwitch::new(offset, *switch));
        }
    }

    Ok(timed)
}

/// Like [`bind_timestamps`], but rejects inputs of different lengths
///
/// # Errors
/// * `LengthMismatch` when `durations.len() != switches.len()`
pub fn bind_timestamps_strict(
    durations: &[Offset],
    switches: &[Option<Switch>],
) -> Result<Vec<TimedSwitch>> {
    if durations.len() != switches.len() {
        return Err(CompileError::LengthMismatch {
            expected: durations.len(),
            found: switches.len(),
        });
    }
    bind_timestamps(durations, switches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(values: &[i64]) -> Vec<Offset> {
        values.iter().map(|&s| TimeDelta::seconds(s)).collect()
    }

    #[test]
    fn test_offsets_are_cumulative() {
        let durations = secs(&[2, 3, 1, 4]);
        let switches = [Some(Switch::TurnOn), None, Some(Switch::TurnOff), None];

        let timed = bind_timestamps(&durations, &switches).unwrap();
        assert_eq!(
            timed,
            vec![
                TimedSwitch::new(TimeDelta::zero(), Switch::TurnOn),
                TimedSwitch::new(TimeDelta::seconds(5), Switch::TurnOff),
            ]
        );
    }

    #[test]
    fn test_prefix_sums_are_exact() {
        // 0.1s steps accumulate without drift
        let durations = vec![TimeDelta::milliseconds(100); 10];
        let switches: Vec<Option<Switch>> = (0..10)
            .map(|i| Some(if i % 2 == 0 { Switch::TurnOn } else { Switch::TurnOff }))
            .collect();

        let timed = bind_timestamps(&durations, &switches).unwrap();
        for (i, entry) in timed.iter().enumerate() {
            assert_eq!(entry.offset, TimeDelta::milliseconds(100 * i as i64));
        }
    }

    #[test]
    fn test_truncates_to_shorter_input() {
        let durations = secs(&[1, 1]);
        let switches = [Some(Switch::TurnOn), None, Some(Switch::TurnOff)];
        let timed = bind_timestamps(&durations, &switches).unwrap();
        assert_eq!(timed.len(), 1);
    }

    #[test]
    fn test_strict_rejects_mismatch() {
        let durations = secs(&[1, 1]);
        let switches = [Some(Switch::TurnOn), None, Some(Switch::TurnOff)];
        match bind_timestamps_strict(&durations, &switches) {
            Err(CompileError::LengthMismatch { expected, found }) => {
                assert_eq!(expected, 2);
                assert_eq!(found, 3);
            }
            other => panic!("Expected length mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_duration() {
        let durations = vec![TimeDelta::seconds(1), TimeDelta::seconds(-1)];
        let switches = [Some(Switch::TurnOn), None];
        assert!(matches!(
            bind_timestamps(&durations, &switches),
            Err(CompileError::NegativeDuration { block: 1 })
        ));
    }

    #[test]
    fn test_overflow_is_reported() {
        let durations = vec![TimeDelta::MAX, TimeDelta::MAX, TimeDelta::seconds(1)];
        let switches = [Some(Switch::TurnOn), Some(Switch::TurnOff), None];
        assert!(matches!(
            bind_timestamps(&durations, &switches),
            Err(CompileError::OffsetOverflow { block: 2 })
        ));
    }

    #[test]
    fn test_last_duration_is_never_summed() {
        // The final block's length does not affect any offset
        let durations = vec![TimeDelta::seconds(1), TimeDelta::MAX];
        let switches = [Some(Switch::TurnOn), Some(Switch::TurnOff)];
        let timed = bind_timestamps(&durations, &switches).unwrap();
        assert_eq!(timed[1].offset, TimeDelta::seconds(1));
    }
}
