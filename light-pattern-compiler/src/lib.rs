//! Light Pattern Compiler Library
//!
//! Compiles a table of timed on/off light patterns into a schedule of timed
//! controller function calls.
//!
//! # Architecture
//!
//! A pattern table has one duration per block and one state row per channel
//! (`ON`, `OFF`, or empty for "unchanged"). Each channel goes through four
//! stages, then all channels are merged:
//! - Parse state tokens
//! - Reduce states to the minimal sequence of switches
//! - Bind switches to exact cumulative block offsets
//! - Map switches to the channel's controller functions
//! - Merge all channels into offset-ordered, grouped schedule entries
//!
//! The library does NOT:
//! - Execute the schedule
//! - Check generated function names against a controller
//! - Write output files
//!
//! Rendering and file output are in the application layer (light-pattern-cli).
//!
//! # Example Usage
//!
//! ```
//! use light_pattern_compiler::{format_offset, Compiler, CompilerConfig, PatternTable};
//!
//! let csv = "2,3,1,4\nON,,OFF,\nOFF,ON,,OFF\n";
//! let table = PatternTable::from_reader(csv.as_bytes()).unwrap();
//!
//! let config = CompilerConfig::new()
//!     .with_channels(Vec::new())
//!     .add_channel("walk")
//!     .add_named_channel("stop", "stop_lamp_on", "stop_lamp_off");
//!
//! let schedule = Compiler::new(config).compile(&table).unwrap();
//! for entry in &schedule {
//!     println!("{}", format_offset(entry.offset));
//!     for call in &entry.calls {
//!         println!("    {}", call);
//!     }
//! }
//! assert_eq!(schedule.len(), 4);
//! ```

// Public modules
pub mod compiler;
pub mod config;
pub mod stages;
pub mod table;
pub mod types;

// Re-export main types for convenience
pub use compiler::Compiler;
pub use config::{ChannelSpec, CompilerConfig, DEFAULT_CHANNELS};
pub use stages::{
    bind_timestamps, bind_timestamps_strict, map_calls, merge_schedule, parse_states,
    reduce_switches,
};
pub use table::{parse_seconds, PatternTable};
pub use types::{
    format_offset, CompileError, Offset, PoweredState, Result, Schedule, ScheduleEntry,
    Switch, TimedCall, TimedSwitch,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
