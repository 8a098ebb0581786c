//! Prints the synthetic ECG trace as text.

use crate::monitor::{generate_trace, TraceShape};
use std::io::{self, Write};

/// Writes one `x<TAB>sample` line per column of the generated trace.
///
/// # Errors
/// - If stdout cannot be written (e.g. a closed pipe)
pub fn handle_trace(width: usize, compact: bool) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_trace(&mut out, width, compact)?;
    out.flush()?;
    Ok(())
}

fn write_trace(out: &mut impl Write, width: usize, compact: bool) -> io::Result<()> {
    for (x, sample) in generate_trace(width, TraceShape::new(compact)).iter().enumerate() {
        writeln!(out, "{x}\t{sample:.3}")?;
    }
    Ok(())
}
