//! Info command implementation.

use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use p2timer_core::{Config, DemoSummary, format_ticks, maps};

use super::decode_demo;

pub fn run(path: &Path, config: &Config, json: bool) -> Result<()> {
    let demo = decode_demo(path, config, None)?;
    let summary = demo.summary();

    if json {
        println!("{}", summary.to_json_pretty()?);
    } else {
        write_summary(&mut io::stdout().lock(), path, &summary)?;
    }
    Ok(())
}

/// Write the header and timing of a decoded demo as text.
pub fn write_summary<W: Write>(out: &mut W, path: &Path, summary: &DemoSummary) -> io::Result<()> {
    let header = &summary.header;
    writeln!(out, "=== {} ===", path.display())?;
    writeln!(
        out,
        "Protocol:      demo {}, network {}",
        header.demo_protocol, header.network_protocol
    )?;
    writeln!(out, "Server:        {}", header.server_name)?;
    writeln!(out, "Client:        {}", header.client_name)?;
    match summary.chapter.and_then(maps::chapter_name) {
        Some(chapter) => writeln!(out, "Map:           {} ({})", header.map_name, chapter)?,
        None => writeln!(out, "Map:           {}", header.map_name)?,
    }
    writeln!(out, "Game:          {}", header.game_directory)?;
    writeln!(
        out,
        "Header:        {:.3} s, {} ticks, {} frames, sign-on {} bytes",
        header.playback_time, header.ticks, header.frames, header.sign_on_length
    )?;
    writeln!(out)?;
    writeln!(out, "Commands:      {}", summary.commands)?;
    writeln!(out, "Start tick:    {}", summary.start_tick)?;
    writeln!(out, "End tick:      {}", summary.end_tick)?;
    writeln!(
        out,
        "Elapsed:       {} ticks ({})",
        summary.elapsed_ticks,
        format_ticks(summary.elapsed_ticks)
    )
}
