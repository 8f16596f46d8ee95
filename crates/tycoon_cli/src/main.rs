use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tycoon_client::{load_config, HttpGameApi, LoopOptions, TurnLoop};
use tycoon_control::{FleetAgent, StrategyParams};
use tycoon_core::WorldState;

#[derive(Parser)]
#[command(name = "tycoon", about = "Space Tycoon fleet agent")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against a live server, logging in again at every season start.
    Run {
        #[arg(long, default_value = "config.json")]
        config: PathBuf,
        /// Stop after this many seasons (default: run forever).
        #[arg(long)]
        max_seasons: Option<u64>,
        /// Cap the turns attempted per season.
        #[arg(long)]
        max_ticks: Option<u64>,
    },
    /// Plan a single turn from a saved snapshot and print the commands.
    Decide {
        #[arg(long)]
        snapshot: PathBuf,
        /// Strategy parameters JSON; defaults apply when omitted.
        #[arg(long)]
        params: Option<PathBuf>,
    },
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

fn run(config_path: &Path, max_seasons: Option<u64>, max_ticks: Option<u64>) -> Result<()> {
    let config = load_config(config_path)?;
    let api = HttpGameApi::new(&config.host, config.request_timeout())
        .context("building HTTP client")?;
    let mut turns = TurnLoop::new(
        api,
        LoopOptions {
            error_backoff: config.error_backoff(),
            max_ticks,
        },
    );
    let summary = turns.run_seasons(&config.credentials(), max_seasons, || {
        FleetAgent::new(config.strategy.clone())
    });
    info!(
        seasons = summary.seasons,
        login_failures = summary.login_failures,
        played = summary.turns_played,
        failed = summary.turns_failed,
        "stopped"
    );
    Ok(())
}

fn decide(snapshot: &Path, params: Option<&Path>) -> Result<()> {
    let raw = std::fs::read_to_string(snapshot)
        .with_context(|| format!("reading {}", snapshot.display()))?;
    let world: WorldState = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", snapshot.display()))?;

    let params = match params {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str::<StrategyParams>(&raw)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => StrategyParams::default(),
    };
    params.validate().context("invalid strategy parameters")?;

    let mut agent = FleetAgent::new(params);
    let (commands, summary) = agent.plan_turn(&world)?;
    info!(
        tick = world.current_tick.tick,
        phase = ?summary.phase,
        buys = summary.trade.buys,
        sells = summary.trade.sells,
        "planned"
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&commands).context("serializing commands")?
    );
    Ok(())
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            config,
            max_seasons,
            max_ticks,
        } => run(&config, max_seasons, max_ticks),
        Commands::Decide { snapshot, params } => decide(&snapshot, params.as_deref()),
    }
}
