//! Dump command implementation.

use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use p2timer_core::{CommandDumper, CommandKind, Config, DumpFilter};
use tracing::debug;

use super::decode_demo;
use super::info::write_summary;

/// List matching commands, then the header and timing summary.
pub fn run(
    path: &Path,
    config: &Config,
    from: Option<i32>,
    to: Option<i32>,
    include: &[CommandKind],
    exclude: &[CommandKind],
) -> Result<()> {
    let filter = build_filter(from, to, include, exclude);
    let stdout = io::stdout();
    let mut dumper = CommandDumper::new(BufWriter::new(stdout.lock()), filter);

    let result = decode_demo(path, config, Some(&mut dumper));
    let written = dumper.written();
    // Flush what was listed even if decoding failed part way
    let mut out = dumper.finish().context("Failed to write dump")?;
    let demo = result?;

    debug!(
        "Listed {} of {} commands from {}",
        written,
        demo.commands_read(),
        path.display()
    );
    writeln!(out)?;
    write_summary(&mut out, path, &demo.summary())?;
    out.flush()?;
    Ok(())
}

fn build_filter(
    from: Option<i32>,
    to: Option<i32>,
    include: &[CommandKind],
    exclude: &[CommandKind],
) -> DumpFilter {
    let filter = if include.is_empty() {
        DumpFilter::exclude(exclude)
    } else {
        DumpFilter::include(include)
    };
    filter.ticks(from, to)
}
