//! Standalone light pattern compiler demo
//!
//! Compiles a pattern table and prints the schedule to stdout.
//!
//! Usage:
//!   compile_pattern [pattern.csv]
//!
//! Without an argument, a built-in traffic light pattern is compiled.

use light_pattern_compiler::{format_offset, Compiler, PatternTable};
use std::env;
use std::path::PathBuf;

const DEMO_PATTERN: &str = "\
30,3,2,25,2
ON,OFF,,,
OFF,ON,OFF,,
OFF,,ON,,OFF
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let table = match env::args().nth(1) {
        Some(path) => PatternTable::from_path(&PathBuf::from(path))?,
        None => PatternTable::from_reader(DEMO_PATTERN.as_bytes())?,
    };

    let schedule = Compiler::default().compile(&table)?;

    println!("=== SCHEDULE ({} entries) ===", schedule.len());
    for entry in &schedule {
        println!("{}", format_offset(entry.offset));
        for call in &entry.calls {
            println!("    {}", call);
        }
    }
    Ok(())
}
