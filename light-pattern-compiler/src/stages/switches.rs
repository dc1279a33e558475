//! Switch reduction
//!
//! Reduces a channel's powered states to the minimal sequence of switches
//! needed to reproduce them. The output has one element per block: the first
//! is always a switch, later blocks that do not change the effective state
//! are `None`.

use crate::types::{CompileError, PoweredState, Result, Switch};

/// Reduce powered states to switches
///
/// # Errors
/// * `EmptyInput` if `states` is empty
/// * `IndeterminateStart` if the first state is `Undetermined`
pub fn reduce_switches(states: &[PoweredState]) -> Result<Vec<Option<Switch>>> {
    let (&first, rest) = states.split_first().ok_or(CompileError::EmptyInput)?;
    let first_switch = first.switch().ok_or(CompileError::IndeterminateStart)?;

    let mut switches = Vec::with_capacity(states.len());
    switches.push(Some(first_switch));

    // Effective state after the previous block
    let mut current = first;
    for &state in rest {
        match state.switch() {
            Some(switch) if state != current => {
                current = state;
                switches.push(Some(switch));
            }
            _ => switches.push(None),
        }
    }

    Ok(switches)
}
