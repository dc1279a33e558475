//! Call mapping
//!
//! Substitutes each timed switch with the controller function that performs it.

use crate::types::{Switch, TimedCall, TimedSwitch};

/// Map timed switches to timed function calls
///
/// One call per switch, in the same order: `TurnOn` becomes `on_name` and
/// `TurnOff` becomes `off_name`.
pub fn map_calls(timed_switches: &[TimedSwitch], on_name: &str, off_name: &str) -> Vec<TimedCall> {
    timed_switches
        .iter()
        .map(|timed| {
            let function = match timed.switch {
                Switch::TurnOn => on_name,
                Switch::TurnOff => off_name,
            };
            TimedCall::new(timed.offset, function)
        })
        .collect()
}
