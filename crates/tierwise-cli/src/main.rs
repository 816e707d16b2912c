//! Tierwise - capability tier routing for delegated tasks

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tierwise_config::{
    build_router, find_all_config_files, resolve_config, ResolvedConfig,
};
use tierwise_router::Router;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tierwise_cli::render::{decision_text, signals_text, tier_label, RouteOutput};
use tierwise_cli::{Cli, Commands, ConfigCommands};

fn main() {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Route {
            prompt,
            agent,
            failures,
            adapt,
            json,
        } => run_route(cli, prompt, agent, *failures, *adapt, *json),
        Commands::QuickTier { agent, json } => {
            let tier = load_router(cli)?.quick_tier(agent);
            if *json {
                println!("{}", serde_json::json!({ "agent": agent, "tier": tier }));
            } else {
                println!("{}", tier_label(tier));
            }
            Ok(())
        }
        Commands::Adapt { tier, prompt } => {
            println!("{}", load_router(cli)?.adapt_prompt(prompt, *tier));
            Ok(())
        }
        Commands::Signals {
            prompt,
            agent,
            json,
        } => {
            let signals = load_router(cli)?.extract_signals(prompt, agent);
            if *json {
                println!("{}", serde_json::to_string_pretty(&signals)?);
            } else {
                println!("{}", signals_text(&signals));
            }
            Ok(())
        }
        Commands::Score { prompt, agent } => {
            let router = load_router(cli)?;
            let signals = router.extract_signals(prompt, agent);
            println!("{:.2}", router.score_complexity(&signals));
            Ok(())
        }
        Commands::Explain {
            prompt,
            agent,
            failures,
        } => {
            let router = load_router(cli)?;
            let text = match failures {
                Some(n) => router.explain_with_escalation(prompt, agent, *n),
                None => router.explain(prompt, agent),
            };
            println!("{text}");
            Ok(())
        }
        Commands::Config { command } => run_config(cli, command),
    }
}

fn run_route(
    cli: &Cli,
    prompt: &str,
    agent: &str,
    failures: Option<i64>,
    adapt: bool,
    json: bool,
) -> Result<()> {
    let router = load_router(cli)?;
    let decision = match failures {
        Some(n) => router.route_with_escalation(prompt, agent, n),
        None => router.route(prompt, agent),
    };
    let adapted_prompt = adapt.then(|| router.adapt_prompt(prompt, decision.tier));

    if json {
        let output = RouteOutput {
            decision: &decision,
            adapted_prompt,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", decision_text(&decision, adapted_prompt.as_deref()));
    }

    Ok(())
}

fn run_config(cli: &Cli, command: &ConfigCommands) -> Result<()> {
    let resolved = resolve_config(cli.config.as_deref())?;

    match command {
        ConfigCommands::Show { json } => {
            let rendered = if *json {
                serde_json::to_string_pretty(&resolved.config)?
            } else {
                serde_yaml_ng::to_string(&resolved.config)
                    .context("Failed to render configuration")?
            };
            println!("{rendered}");
        }
        ConfigCommands::Check => {
            build_router(&resolved.config)?;
            println!(
                "{} Configuration is valid ({})",
                "✓".green(),
                source_label(&resolved)
            );
        }
        ConfigCommands::Path => {
            println!("{}", source_label(&resolved));
            let all = find_all_config_files();
            if cli.config.is_none() && all.len() > 1 {
                println!("{}", "Also found (lower priority):".dimmed());
                for path in all.iter().skip(1) {
                    println!("  {}", path.display().to_string().dimmed());
                }
            }
        }
    }

    Ok(())
}

fn load_router(cli: &Cli) -> Result<Router> {
    let resolved = resolve_config(cli.config.as_deref())?;
    tracing::debug!(source = %source_label(&resolved), "building router");
    build_router(&resolved.config)
}

fn source_label(resolved: &ResolvedConfig) -> String {
    match &resolved.path {
        Some(path) => path.display().to_string(),
        None => "built-in defaults".to_string(),
    }
}
