//! CLI argument definitions for p2timer.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use p2timer_core::CommandKind;

#[derive(Parser)]
#[command(name = "p2timer")]
#[command(about = "Portal 2 demo decoder and run timer", version)]
pub struct Args {
    /// Load trigger heuristics from a TOML file
    #[arg(long, global = true, value_name = "FILE", env = "P2TIMER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the header and timing of one demo
    Info {
        /// Demo file
        demo: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Time one or more demos and add them up
    Time {
        /// Demo files
        #[arg(required = true)]
        demos: Vec<PathBuf>,
        /// Order demos by map run order instead of argument order
        #[arg(long)]
        sort: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the commands of a demo
    Dump {
        /// Demo file
        demo: PathBuf,
        /// First tick to list
        #[arg(long, allow_negative_numbers = true)]
        from: Option<i32>,
        /// Last tick to list
        #[arg(long, allow_negative_numbers = true)]
        to: Option<i32>,
        /// Only list these kinds (comma separated, e.g. packet,console_cmd)
        #[arg(long, value_delimiter = ',', conflicts_with = "exclude")]
        include: Vec<CommandKind>,
        /// List every kind except these
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<CommandKind>,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_info() {
        let args = Args::try_parse_from(["p2timer", "info", "a.dem"]).unwrap();
        assert!(args.config.is_none());
        match args.command {
            Command::Info { demo, json } => {
                assert_eq!(demo, PathBuf::from("a.dem"));
                assert!(!json);
            }
            _ => panic!("Expected Info command"),
        }
    }

    #[test]
    fn test_parse_global_config_after_subcommand() {
        let args =
            Args::try_parse_from(["p2timer", "info", "a.dem", "--json", "--config", "t.toml"])
                .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("t.toml")));
        assert!(matches!(args.command, Command::Info { json: true, .. }));
    }

    #[test]
    fn test_parse_time_batch() {
        let args = Args::try_parse_from(["p2timer", "time", "a.dem", "b.dem", "--sort"]).unwrap();
        match args.command {
            Command::Time { demos, sort, json } => {
                assert_eq!(demos.len(), 2);
                assert!(sort);
                assert!(!json);
            }
            _ => panic!("Expected Time command"),
        }
    }

    #[test]
    fn test_parse_time_requires_demo() {
        assert!(Args::try_parse_from(["p2timer", "time"]).is_err());
    }

    #[test]
    fn test_parse_dump_filters() {
        let args = Args::try_parse_from([
            "p2timer",
            "dump",
            "a.dem",
            "--from",
            "-5",
            "--to",
            "100",
            "--include",
            "packet,console_cmd",
        ])
        .unwrap();
        match args.command {
            Command::Dump {
                from,
                to,
                include,
                exclude,
                ..
            } => {
                assert_eq!(from, Some(-5));
                assert_eq!(to, Some(100));
                assert_eq!(include, vec![CommandKind::Packet, CommandKind::ConsoleCmd]);
                assert!(exclude.is_empty());
            }
            _ => panic!("Expected Dump command"),
        }
    }

    #[test]
    fn test_parse_dump_rejects_unknown_kind() {
        assert!(Args::try_parse_from(["p2timer", "dump", "a.dem", "--exclude", "frame"]).is_err());
    }

    #[test]
    fn test_parse_dump_include_conflicts_with_exclude() {
        assert!(
            Args::try_parse_from([
                "p2timer", "dump", "a.dem", "--include", "packet", "--exclude", "user_cmd",
            ])
            .is_err()
        );
    }
}
