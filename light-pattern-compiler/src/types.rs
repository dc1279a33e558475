//! Core types for the light pattern compiler
//!
//! This module defines the values that flow between the compilation stages:
//! powered states parsed from the pattern table, the switches reduced from
//! them, and the timed calls and schedule entries they finally become.
//! Everything here is transient and built fresh for each compilation run.

use chrono::TimeDelta;
use std::fmt;
use std::str::FromStr;

/// Time elapsed since the start of the first block
pub type Offset = TimeDelta;

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, CompileError>;

/// Errors that can occur while compiling a pattern
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("Could not interpret '{0}' as a powered state (expected ON, OFF or empty)")]
    Format(String),

    #[error("State sequence must be nonempty")]
    EmptyInput,

    #[error("First state cannot be undetermined")]
    IndeterminateStart,

    #[error("Length mismatch: {expected} durations but {found} states")]
    LengthMismatch { expected: usize, found: usize },

    #[error("Negative duration in block {block}")]
    NegativeDuration { block: usize },

    #[error("Offset overflow at block {block}")]
    OffsetOverflow { block: usize },

    #[error("Invalid duration '{0}' (expected non-negative decimal seconds)")]
    InvalidDuration(String),

    #[error("Pattern table has no duration row")]
    MissingDurations,

    #[error("Channel count mismatch: {expected} channels configured but {found} state rows")]
    ChannelCount { expected: usize, found: usize },

    #[error("Channel '{channel}': {source}")]
    Channel {
        channel: String,
        #[source]
        source: Box<CompileError>,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompileError {
    /// Attach the label of the channel that failed
    pub fn in_channel(self, channel: impl Into<String>) -> Self {
        CompileError::Channel {
            channel: channel.into(),
            source: Box::new(self),
        }
    }

    /// The underlying error, with any channel context removed
    pub fn innermost(&self) -> &CompileError {
        match self {
            CompileError::Channel { source, .. } => source.innermost(),
            other => other,
        }
    }
}

/// Commanded powered state of a channel for one block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoweredState {
    On,
    Off,
    /// Keep whatever the channel was doing in the previous block
    Undetermined,
}

impl PoweredState {
    /// True for `On` and `Off`
    pub fn is_determined(&self) -> bool {
        !matches!(self, PoweredState::Undetermined)
    }

    /// The switch that brings a channel into this state
    ///
    /// `Undetermined` has no switch.
    pub fn switch(&self) -> Option<Switch> {
        match self {
            PoweredState::On => Some(Switch::TurnOn),
            PoweredState::Off => Some(Switch::TurnOff),
            PoweredState::Undetermined => None,
        }
    }
}

impl FromStr for PoweredState {
    type Err = CompileError;

    fn from_str(token: &str) -> Result<Self> {
        match token.trim() {
            "" => Ok(PoweredState::Undetermined),
            "ON" => Ok(PoweredState::On),
            "OFF" => Ok(PoweredState::Off),
            other => Err(CompileError::Format(other.to_string())),
        }
    }
}

impl fmt::Display for PoweredState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoweredState::On => write!(f, "ON"),
            PoweredState::Off => write!(f, "OFF"),
            PoweredState::Undetermined => write!(f, "UNDETERMINED"),
        }
    }
}

/// An actionable transition of a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Switch {
    TurnOn,
    TurnOff,
}

impl Switch {
    /// The state a channel is in after this switch
    pub fn target_state(&self) -> PoweredState {
        match self {
            Switch::TurnOn => PoweredState::On,
            Switch::TurnOff => PoweredState::Off,
        }
    }
}

impl fmt::Display for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Switch::TurnOn => write!(f, "TurnOn"),
            Switch::TurnOff => write!(f, "TurnOff"),
        }
    }
}

/// A switch bound to the start of its block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedSwitch {
    /// Exclusive prefix sum of the block durations
    pub offset: Offset,
    pub switch: Switch,
}

impl TimedSwitch {
    pub fn new(offset: Offset, switch: Switch) -> Self {
        Self { offset, switch }
    }
}

/// A controller function call bound to an offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedCall {
    pub offset: Offset,
    /// Name of the controller function to invoke
    pub function: String,
}

impl TimedCall {
    pub fn new(offset: Offset, function: impl Into<String>) -> Self {
        Self {
            offset,
            function: function.into(),
        }
    }
}

/// All calls, across all channels, that share one offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub offset: Offset,
    /// Function names in channel order, then block order
    pub calls: Vec<String>,
}

impl ScheduleEntry {
    pub fn new(offset: Offset, calls: Vec<String>) -> Self {
        Self { offset, calls }
    }
}

/// The compiled, time-ordered schedule
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
}

impl Schedule {
    /// Wrap entries that are already ordered by offset
    pub fn new(entries: Vec<ScheduleEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of function calls across all entries
    pub fn total_calls(&self) -> usize {
        self.entries.iter().map(|entry| entry.calls.len()).sum()
    }
}

impl IntoIterator for Schedule {
    type Item = ScheduleEntry;
    type IntoIter = std::vec::IntoIter<ScheduleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ScheduleEntry;
    type IntoIter = std::slice::Iter<'a, ScheduleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Render an offset as `H:MM:SS[.ffffff]`, with a day prefix past 24 hours
///
/// Sub-second parts are printed as microseconds, or as nanoseconds when the
/// offset is not a whole number of microseconds.
pub fn format_offset(offset: Offset) -> String {
    let (sign, offset) = if offset < TimeDelta::zero() {
        ("-", -offset)
    } else {
        ("", offset)
    };

    let total_secs = offset.num_seconds();
    let nanos = offset.subsec_nanos();

    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;

    let day_prefix = match days {
        0 => String::new(),
        1 => "1 day, ".to_string(),
        n => format!("{} days, ", n),
    };

    let fraction = if nanos == 0 {
        String::new()
    } else if nanos % 1_000 == 0 {
        format!(".{:06}", nanos / 1_000)
    } else {
        format!(".{:09}", nanos)
    };

    format!(
        "{}{}{}:{:02}:{:02}{}",
        sign, day_prefix, hours, minutes, seconds, fraction
    )
}
