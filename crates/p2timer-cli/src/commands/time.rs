//! Time command implementation.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use p2timer_core::{Config, DemoSummary, format_ticks, maps, ticks_to_seconds};
use serde::Serialize;
use tracing::warn;

use super::decode_demo;

#[derive(Serialize)]
struct TimedDemo {
    path: PathBuf,
    #[serde(flatten)]
    summary: DemoSummary,
}

#[derive(Serialize)]
struct TimeReport {
    demos: Vec<TimedDemo>,
    total_ticks: i64,
    total_seconds: f64,
    failed: usize,
}

/// Decode every demo, print one line each and the total.
///
/// A demo that fails to decode is reported and skipped; the command still
/// fails at the end so scripts notice.
pub fn run(paths: &[PathBuf], config: &Config, sort: bool, json: bool) -> Result<()> {
    let mut timed = Vec::with_capacity(paths.len());
    let mut failed = 0;

    for path in paths {
        match decode_demo(path, config, None) {
            Ok(demo) => timed.push(TimedDemo {
                path: path.clone(),
                summary: demo.summary(),
            }),
            Err(e) => {
                warn!("Skipping: {:#}", e);
                failed += 1;
            }
        }
    }

    if sort {
        sort_by_run_order(&mut timed);
    }

    let total_ticks: i64 = timed
        .iter()
        .map(|demo| i64::from(demo.summary.elapsed_ticks))
        .sum();
    let total_seconds = ticks_to_seconds(total_ticks);

    if json {
        let report = TimeReport {
            demos: timed,
            total_ticks,
            total_seconds,
            failed,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for demo in &timed {
            print_line(&demo.path, &demo.summary);
        }
        println!(
            "{:<24} {:>8} {:>12}  ({} demos)",
            "total",
            total_ticks,
            format_total(total_ticks),
            timed.len()
        );
    }

    if failed > 0 {
        bail!("{} of {} demos failed to decode", failed, paths.len());
    }
    Ok(())
}

/// Stable sort by map position in the run; unknown maps go last.
fn sort_by_run_order(demos: &mut [TimedDemo]) {
    demos.sort_by_key(|demo| maps::map_index(&demo.summary.header.map_name).unwrap_or(usize::MAX));
}

fn print_line(path: &Path, summary: &DemoSummary) {
    println!(
        "{:<24} {:>8} {:>12}  {}",
        summary.header.map_name,
        summary.elapsed_ticks,
        format_ticks(summary.elapsed_ticks),
        path.display()
    );
}

fn format_total(ticks: i64) -> String {
    match i32::try_from(ticks) {
        Ok(ticks) => format_ticks(ticks),
        Err(_) => format!("{:.3} s", ticks_to_seconds(ticks)),
    }
}
