//! State token parsing
//!
//! Turns the raw text cells of one channel row into powered states.

use crate::types::{PoweredState, Result};

/// Parse one channel's state tokens
///
/// Tokens are trimmed; an empty token means the channel keeps its previous
/// state. Any other token must be exactly `ON` or `OFF`. Parsing stops at the
/// first unrecognised token.
pub fn parse_states<I, S>(tokens: I) -> Result<Vec<PoweredState>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|token| token.as_ref().parse::<PoweredState>())
        .collect()
}
