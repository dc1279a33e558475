//! Compilation stages
//!
//! Each stage is a pure transformation over one channel's sequences, except
//! the merge stage which fans all channels into a single schedule:
//!
//! 1. [`parse_states`]: raw tokens → powered states
//! 2. [`reduce_switches`]: powered states → minimal switches (gaps as `None`)
//! 3. [`bind_timestamps`]: durations + switches → timed switches
//! 4. [`map_calls`]: timed switches → timed function calls
//! 5. [`merge_schedule`]: all channels → ordered, grouped schedule entries

pub mod calls;
pub mod merge;
pub mod states;
pub mod switches;
pub mod timing;

// Re-export stage functions for convenience
pub use calls::map_calls;
pub use merge::merge_schedule;
pub use states::parse_states;
pub use switches::reduce_switches;
pub use timing::{bind_timestamps, bind_timestamps_strict};
