//! Config command implementation.

use anyhow::Result;
use p2timer_core::Config;

/// Print the effective configuration, suitable for saving as `p2timer.toml`
pub fn run(config: &Config) -> Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}
