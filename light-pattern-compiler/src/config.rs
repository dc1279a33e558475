//! Compiler configuration types
//!
//! This module defines which channels a pattern table describes, which
//! controller functions switch them, and how strictly the table is checked.
//! File handling and CLI overrides live in the application layer.

use serde::{Deserialize, Serialize};

/// Channel labels used when no channels are configured
pub const DEFAULT_CHANNELS: [&str; 3] = ["green", "yellow", "red"];

/// Configuration for the compiler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Channels in table row order (also the tie-break order of the merge)
    #[serde(default = "default_channels")]
    pub channels: Vec<ChannelSpec>,

    /// Reject duration/state length and channel/row count mismatches
    /// (false = pair positionally and truncate to the shorter side)
    #[serde(default = "default_true")]
    pub strict: bool,
}

fn default_true() -> bool {
    true
}

fn default_channels() -> Vec<ChannelSpec> {
    DEFAULT_CHANNELS.iter().map(|label| ChannelSpec::new(*label)).collect()
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            channels: default_channels(),
            strict: true,
        }
    }
}

/// One controllable output and the functions that switch it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ChannelSpec {
    /// Channel label (e.g. "green")
    pub label: String,
    /// Function turning the channel on (default: `turn_<label>_on`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on: Option<String>,
    /// Function turning the channel off (default: `turn_<label>_off`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub off: Option<String>,
}

impl ChannelSpec {
    /// Create a channel whose function names derive from its label
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            on: None,
            off: None,
        }
    }

    /// Create a channel with explicit function names
    pub fn with_names(
        label: impl Into<String>,
        on: impl Into<String>,
        off: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            on: Some(on.into()),
            off: Some(off.into()),
        }
    }

    pub fn on_name(&self) -> String {
        self.on
            .clone()
            .unwrap_or_else(|| format!("turn_{}_on", self.label))
    }

    pub fn off_name(&self) -> String {
        self.off
            .clone()
            .unwrap_or_else(|| format!("turn_{}_off", self.label))
    }
}

impl CompilerConfig {
    /// Create a compiler configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: replace the channel list
    pub fn with_channels(mut self, channels: Vec<ChannelSpec>) -> Self {
        self.channels = channels;
        self
    }

    /// Builder method: append a channel with derived function names
    pub fn add_channel(mut self, label: impl Into<String>) -> Self {
        self.channels.push(ChannelSpec::new(label));
        self
    }

    /// Builder method: append a channel with explicit function names
    pub fn add_named_channel(
        mut self,
        label: impl Into<String>,
        on: impl Into<String>,
        off: impl Into<String>,
    ) -> Self {
        self.channels.push(ChannelSpec::with_names(label, on, off));
        self
    }

    /// Builder method: enable or disable strict length checking
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Labels of the configured channels, in order
    pub fn channel_labels(&self) -> Vec<&str> {
        self.channels.iter().map(|c| c.label.as_str()).collect()
    }
}
