//! CLI commands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tierwise_router::Tier;

/// Tierwise - capability tier routing for delegated tasks
#[derive(Parser, Debug)]
#[command(name = "tierwise")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (default: discovered tierwise.{jsonc,json,yml,yaml})
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Route a prompt to a tier and resource
    Route {
        /// Task prompt
        prompt: String,

        /// Agent label (e.g. explore, oracle, sisyphus-junior)
        #[arg(short, long, default_value = "")]
        agent: String,

        /// Failed attempts so far; escalates the tier when thresholds are crossed
        #[arg(short, long, allow_negative_numbers = true)]
        failures: Option<i64>,

        /// Attach the prompt rewritten for the chosen tier
        #[arg(long)]
        adapt: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the tier an agent gets without looking at a prompt
    QuickTier {
        /// Agent label
        agent: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rewrite a prompt for a tier
    Adapt {
        /// Target tier (low, medium, high)
        tier: Tier,

        /// Task prompt
        prompt: String,
    },

    /// Show the signals extracted from a prompt
    Signals {
        /// Task prompt
        prompt: String,

        /// Agent label
        #[arg(short, long, default_value = "")]
        agent: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the complexity score of a prompt
    Score {
        /// Task prompt
        prompt: String,

        /// Agent label
        #[arg(short, long, default_value = "")]
        agent: String,
    },

    /// Explain a routing decision step by step
    Explain {
        /// Task prompt
        prompt: String,

        /// Agent label
        #[arg(short, long, default_value = "")]
        agent: String,

        /// Failed attempts so far
        #[arg(short, long, allow_negative_numbers = true)]
        failures: Option<i64>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show {
        /// Output as JSON instead of YAML
        #[arg(long)]
        json: bool,
    },
    /// Validate the configuration
    Check,
    /// Show which configuration file is used
    Path,
}

impl Cli {
    /// Log filter implied by `--verbose` when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "tierwise_router=debug,tierwise_config=debug,info",
            _ => "tierwise_router=trace,tierwise_config=trace,debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_route_with_negative_failures() {
        let cli = Cli::parse_from([
            "tierwise", "route", "Fix this bug", "--agent", "sisyphus", "--failures", "-2",
        ]);
        match cli.command {
            Commands::Route {
                prompt,
                agent,
                failures,
                adapt,
                json,
            } => {
                assert_eq!(prompt, "Fix this bug");
                assert_eq!(agent, "sisyphus");
                assert_eq!(failures, Some(-2));
                assert!(!adapt);
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_adapt_tier_any_case() {
        let cli = Cli::parse_from(["tierwise", "adapt", "High", "do it"]);
        assert!(matches!(
            cli.command,
            Commands::Adapt {
                tier: Tier::High,
                ..
            }
        ));
        assert!(Cli::try_parse_from(["tierwise", "adapt", "huge", "do it"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["tierwise", "quick-tier", "oracle", "-vv", "-c", "x.yml"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("x.yml")));
        assert!(cli.log_filter().contains("trace"));
    }
}
