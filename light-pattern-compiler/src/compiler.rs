//! Main compiler API
//!
//! This module provides the primary interface for the compiler library.
//! The Compiler struct runs every channel of a pattern table through the
//! stages and merges the results into one schedule.

use crate::config::{ChannelSpec, CompilerConfig};
use crate::stages::{
    bind_timestamps, bind_timestamps_strict, map_calls, merge_schedule, parse_states,
    reduce_switches,
};
use crate::table::PatternTable;
use crate::types::{
    format_offset, CompileError, Offset, PoweredState, Result, Schedule, TimedCall,
};

/// The main compiler struct - entry point for all compilation
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: CompilerConfig,
}

impl Compiler {
    /// Create a new compiler instance
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compile one channel row into timed calls
    ///
    /// Runs parsing, switch reduction, timestamp binding and call mapping. In
    /// strict mode the row must have exactly one token per duration.
    ///
    /// # Example
    /// ```
    /// use chrono::TimeDelta;
    /// use light_pattern_compiler::{ChannelSpec, Compiler};
    ///
    /// let compiler = Compiler::default();
    /// let durations = [TimeDelta::seconds(2), TimeDelta::seconds(3)];
    /// let calls = compiler
    ///     .compile_channel(&durations, &["ON", "OFF"], &ChannelSpec::new("green"))
    ///     .unwrap();
    ///
    /// assert_eq!(calls[1].offset, TimeDelta::seconds(2));
    /// assert_eq!(calls[1].function, "turn_green_off");
    /// ```
    pub fn compile_channel<S: AsRef<str>>(
        &self,
        durations: &[Offset],
        tokens: &[S],
        channel: &ChannelSpec,
    ) -> Result<Vec<TimedCall>> {
        let states = parse_states(tokens)?;
        let switches = reduce_switches(&states)?;
        log::trace!(
            "Channel '{}' states: {}",
            channel.label,
            states.iter().map(PoweredState::to_string).collect::<Vec<_>>().join(" ")
        );

        let timed = if self.config.strict {
            bind_timestamps_strict(durations, &switches)?
        } else {
            if durations.len() != switches.len() {
                log::warn!(
                    "Channel '{}' has {} states for {} durations, truncating",
                    channel.label,
                    switches.len(),
                    durations.len()
                );
            }
            bind_timestamps(durations, &switches)?
        };

        for step in &timed {
            log::trace!(
                "Channel '{}': {} at {}",
                channel.label,
                step.switch,
                format_offset(step.offset)
            );
        }

        let calls = map_calls(&timed, &channel.on_name(), &channel.off_name());
        log::debug!(
            "Channel '{}': {} blocks ({} carried over), {} switches",
            channel.label,
            states.len(),
            states.iter().filter(|state| !state.is_determined()).count(),
            calls.len()
        );
        Ok(calls)
    }

    /// Compile a whole pattern table into a schedule
    ///
    /// State rows are paired with the configured channels in order. Any
    /// error is returned with the label of the channel that raised it.
    pub fn compile(&self, table: &PatternTable) -> Result<Schedule> {
        let channels = &self.config.channels;
        log::info!(
            "Compiling {} blocks for channels {:?}",
            table.block_count(),
            self.config.channel_labels()
        );

        if channels.len() != table.channel_count() {
            if self.config.strict {
                return Err(CompileError::ChannelCount {
                    expected: channels.len(),
                    found: table.channel_count(),
                });
            }
            log::warn!(
                "{} channels configured but table has {} state rows, pairing positionally",
                channels.len(),
                table.channel_count()
            );
        }

        let mut per_channel = Vec::with_capacity(channels.len());
        for (channel, row) in channels.iter().zip(table.rows()) {
            let calls = self
                .compile_channel(table.durations(), row, channel)
                .map_err(|e| e.in_channel(channel.label.as_str()))?;
            per_channel.push(calls);
        }

        let schedule = Schedule::new(merge_schedule(per_channel));
        for entry in &schedule {
            log::trace!("{}: {:?}", format_offset(entry.offset), entry.calls);
        }
        log::info!(
            "Compiled {} schedule entries ({} calls)",
            schedule.len(),
            schedule.total_calls()
        );
        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScheduleEntry;
    use chrono::TimeDelta;

    fn secs(values: &[i64]) -> Vec<Offset> {
        values.iter().map(|&s| TimeDelta::seconds(s)).collect()
    }

    fn row(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_compile_channel() {
        let compiler = Compiler::default();
        let calls = compiler
            .compile_channel(&secs(&[2, 3, 1, 4]), &["ON", "", "OFF", ""], &ChannelSpec::new("green"))
            .unwrap();

        assert_eq!(
            calls,
            vec![
                TimedCall::new(TimeDelta::zero(), "turn_green_on"),
                TimedCall::new(TimeDelta::seconds(5), "turn_green_off"),
            ]
        );
    }

    #[test]
    fn test_strict_length_mismatch() {
        let compiler = Compiler::default();
        let result = compiler.compile_channel(&secs(&[1, 1]), &["ON"], &ChannelSpec::new("red"));
        assert!(matches!(
            result,
            Err(CompileError::LengthMismatch { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_compile_channel_with_trace_logging() {
        let _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::Trace)
            .try_init();

        let calls = Compiler::default()
            .compile_channel(&secs(&[1, 2, 3]), &["OFF", "", "ON"], &ChannelSpec::new("red"))
            .unwrap();
        assert_eq!(
            calls,
            vec![
                TimedCall::new(TimeDelta::zero(), "turn_red_off"),
                TimedCall::new(TimeDelta::seconds(3), "turn_red_on"),
            ]
        );
    }

    #[test]
    fn test_lenient_truncates() {
        let compiler = Compiler::new(CompilerConfig::new().with_strict(false));
        let calls = compiler
            .compile_channel(&secs(&[1]), &["ON", "OFF"], &ChannelSpec::new("red"))
            .unwrap();
        assert_eq!(calls, vec![TimedCall::new(TimeDelta::zero(), "turn_red_on")]);
    }

    #[test]
    fn test_compile_table() {
        let table = PatternTable::new(
            secs(&[4, 2, 5]),
            vec![
                row(&["ON", "OFF", ""]),
                row(&["OFF", "ON", "OFF"]),
                row(&["OFF", "", "ON"]),
            ],
        );

        let schedule = Compiler::default().compile(&table).unwrap();
        let to_strings = |names: &[&str]| names.iter().map(|n| n.to_string()).collect::<Vec<_>>();
        assert_eq!(
            schedule.entries(),
            &[
                ScheduleEntry::new(
                    TimeDelta::zero(),
                    to_strings(&["turn_green_on", "turn_yellow_off", "turn_red_off"])
                ),
                ScheduleEntry::new(
                    TimeDelta::seconds(4),
                    to_strings(&["turn_green_off", "turn_yellow_on"])
                ),
                ScheduleEntry::new(
                    TimeDelta::seconds(6),
                    to_strings(&["turn_yellow_off", "turn_red_on"])
                ),
            ]
        );
    }

    #[test]
    fn test_channel_count_mismatch() {
        let table = PatternTable::new(secs(&[1]), vec![row(&["ON"])]);
        assert!(matches!(
            Compiler::default().compile(&table),
            Err(CompileError::ChannelCount { expected: 3, found: 1 })
        ));
    }

    #[test]
    fn test_error_carries_channel_label() {
        let table = PatternTable::new(
            secs(&[1, 1]),
            vec![row(&["ON", "OFF"]), row(&["", "ON"]), row(&["OFF", "OFF"])],
        );

        let err = Compiler::default().compile(&table).unwrap_err();
        match &err {
            CompileError::Channel { channel, .. } => assert_eq!(channel, "yellow"),
            other => panic!("Expected channel error, got {:?}", other),
        }
        assert!(matches!(err.innermost(), CompileError::IndeterminateStart));
    }
}
