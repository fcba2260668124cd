//! sandbag_sim - Headless driver for the sandbag loot game

mod simulation;

use anyhow::{Context, Result};
use clap::Parser;
use sandbag_core::config::load_toml;
use sandbag_core::prelude::*;
use simulation::{Simulation, SimulationConfig, SimulationReport};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// Play the sandbag game without a screen and report what happened
#[derive(Parser, Debug)]
#[command(name = "sandbag_sim", version)]
struct Args {
    /// Seed for every random roll in the run
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Length of the run in simulated seconds
    #[arg(long, default_value = "120")]
    seconds: u64,

    /// Starting encounter level
    #[arg(long, default_value = "1")]
    level: u32,

    /// Manual punches per second
    #[arg(long, default_value = "5")]
    tap_rate: f64,

    /// Random spread of the gap between taps, in percent
    #[arg(long, default_value = "10")]
    jitter: f64,

    /// Raise the encounter level after this many defeats
    #[arg(long)]
    climb_every: Option<u64>,

    /// Leave drops on the ground
    #[arg(long)]
    no_loot: bool,

    /// Defeats pay gold instead of dropping items
    #[arg(long)]
    gold_mode: bool,

    /// Affix catalog TOML (defaults to the built-in catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Game constants TOML (missing values keep their defaults)
    #[arg(long)]
    constants: Option<PathBuf>,

    /// Continue from a save file
    #[arg(long)]
    load: Option<PathBuf>,

    /// Write a save file when the run ends
    #[arg(long)]
    save: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Starting sandbag_sim v{}", env!("CARGO_PKG_VERSION"));

    let mut session = build_session(&args)?;

    let config = SimulationConfig {
        duration_ms: args.seconds.saturating_mul(1000),
        taps_per_second: args.tap_rate,
        jitter_pct: args.jitter,
        climb_every: args.climb_every,
        auto_loot: !args.no_loot,
        seed: args.seed,
    };
    let mut simulation = Simulation::new(config).context("Invalid simulation settings")?;
    let report = simulation.run(&mut session);

    if let Some(path) = &args.save {
        let json = session.save().to_json().context("Failed to encode save")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write save file {}", path.display()))?;
        log::info!("saved to {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&session, &report);
    }

    Ok(())
}

fn build_session(args: &Args) -> Result<GameSession> {
    let catalog = match &args.catalog {
        Some(path) => AffixCatalog::load(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => default_catalog().context("Built-in catalog is invalid")?,
    };
    let constants: GameConstants = match &args.constants {
        Some(path) => load_toml(path)
            .with_context(|| format!("Failed to load constants {}", path.display()))?,
        None => GameConstants::default(),
    };

    let mut session = GameSession::new(Arc::new(catalog), constants, args.seed);

    if let Some(path) = &args.load {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read save file {}", path.display()))?;
        session
            .restore(Some(&json))
            .with_context(|| format!("Rejected save file {}", path.display()))?;
    }

    session.set_gold_mode(args.gold_mode);
    if args.load.is_none() || args.level > 1 {
        session
            .set_level(args.level)
            .context("Failed to set the starting level")?;
    }

    Ok(session)
}

fn print_report(session: &GameSession, report: &SimulationReport) {
    let seconds = report.elapsed_ms as f64 / 1000.0;
    println!("=== Run ({:.1}s) ===", seconds);
    if report.victory {
        println!("  The final boss is down!");
    }
    println!(
        "  Character level {}, encounter level {}, {} gold",
        report.character_level, report.encounter_level, report.gold
    );
    println!("  Defeats: {}", report.defeats);
    println!(
        "  Punches: {} manual ({:.1}% crit, {} jackpots, {} awl), {} automatic",
        report.punches,
        report.crit_rate(),
        report.jackpots,
        report.awl_procs,
        report.auto_punches
    );
    println!(
        "  Damage: {} ({} punch, {} automatic, {} poison, {} minion), {:.1} dps, {:.1} per punch",
        report.total_damage(),
        report.punch_damage,
        report.auto_damage,
        report.poison_damage,
        report.minion_damage,
        report.dps(),
        report.avg_punch()
    );
    println!(
        "  Loot: {} picked up, {} uniques, {} upgrades",
        report.items_looted, report.uniques_looted, report.upgrades
    );

    println!("\n=== Equipment ===");
    for slot in EquipmentSlot::all() {
        match session.equipment().get(*slot) {
            Some(item) => {
                let mut lines = item.tooltip_lines().into_iter();
                if let Some(header) = lines.next() {
                    println!("  {}: {}", slot, header);
                }
                for line in lines {
                    println!("      {}", line);
                }
            }
            None => println!("  {}: (empty)", slot),
        }
    }

    println!("\n=== Stats ===");
    for line in session.stats().summary_lines() {
        println!("  {}", line);
    }
}
