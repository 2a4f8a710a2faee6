//! Matchday CLI
//!
//! Plays a match from a config file and prints its signals and final summary, or
//! inspects a probability corpus.

mod demo;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use matchday_core::corpus;
use matchday_core::output::console_summary;
use matchday_core::{MatchConfig, MatchEngine, SeededRandom, Signal, Team, TeamSheet, Teams};

#[derive(Parser)]
#[command(name = "matchday")]
#[command(about = "Simulate football matches from a recorded probability corpus", long_about = None)]
#[command(version = matchday_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one match
    Run {
        /// Config file (key=value or .json); MATCHDAY_CONFIG_PATH takes precedence
        #[arg(long, default_value = "matchday.cfg")]
        config: PathBuf,

        /// Fixed seed, overriding the config
        #[arg(long)]
        seed: Option<u64>,

        /// Home team sheet (JSON); a demo squad when absent
        #[arg(long)]
        home: Option<PathBuf>,

        /// Away team sheet (JSON); a demo squad when absent
        #[arg(long)]
        away: Option<PathBuf>,

        /// Ticks per half, overriding the config
        #[arg(long)]
        half_duration: Option<u32>,

        /// Reputation the demo squads' skills are drawn around
        #[arg(long, default_value = "5.0")]
        reputation: f64,
    },

    /// Summarise a probability corpus file
    InspectCorpus {
        /// Corpus file path
        #[arg(long)]
        corpus: PathBuf,

        /// Instants to list
        #[arg(long, default_value = "10")]
        limit: usize,

        /// List instants as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, seed, home, away, half_duration, reputation } => {
            let mut config = MatchConfig::from_env_or(&config)
                .with_context(|| format!("Failed to load config {}", config.display()))?;
            if seed.is_some() {
                config.seed = seed;
            }
            if let Some(half) = half_duration {
                config.half_duration = half;
            }
            let teams = load_teams(home.as_deref(), away.as_deref(), reputation, config.seed)?;
            run_match(&config, teams)
        }
        Commands::InspectCorpus { corpus, limit, json } => inspect_corpus(&corpus, limit, json),
    }
}

fn load_sheet(path: &Path) -> Result<Team> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let sheet: TeamSheet =
        serde_json::from_str(&content).with_context(|| format!("Invalid team sheet {}", path.display()))?;
    Ok(Team::from_sheet(sheet)?)
}

fn load_teams(home: Option<&Path>, away: Option<&Path>, reputation: f64, seed: Option<u64>) -> Result<Teams> {
    let mut rng = match seed {
        Some(seed) => SeededRandom::new(seed),
        None => SeededRandom::from_entropy(),
    };
    let (demo_home, demo_away) = demo::demo_teams(reputation, &mut rng)?;
    let home = match home {
        Some(path) => load_sheet(path)?,
        None => demo_home,
    };
    let away = match away {
        Some(path) => load_sheet(path)?,
        None => demo_away,
    };
    log::info!("{} v {}", home.name, away.name);
    Ok(Teams::new(home, away))
}

fn run_match(config: &MatchConfig, teams: Teams) -> Result<()> {
    let mut engine = MatchEngine::from_config(config, teams).context("Failed to set up match")?;
    let half = engine.half_duration();
    engine
        .play_to_end(|signal| print_signal(signal, half))
        .context("Match simulation failed")?;

    println!();
    println!("{}", engine.report().score_line(engine.teams()));
    println!();
    print!("{}", console_summary(engine.teams()));
    Ok(())
}

fn print_signal(signal: &Signal, half: u32) {
    let minute = matchday_core::engine::minute_of(signal.tick(), half);
    println!("{:>3}' {}", minute, signal);
}

fn inspect_corpus(path: &Path, limit: usize, json: bool) -> Result<()> {
    let instants =
        corpus::load_instants(path).with_context(|| format!("Failed to load corpus {}", path.display()))?;
    println!("{}: {} instants", path.display(), instants.len());

    let mut by_action: BTreeMap<&'static str, usize> = BTreeMap::new();
    for instant in &instants {
        *by_action.entry(instant.action.description()).or_default() += 1;
    }
    for (action, count) in &by_action {
        println!("   {:<28} {}", action, count);
    }

    println!();
    for instant in instants.iter().take(limit) {
        if json {
            println!("{}", serde_json::to_string(instant)?);
        } else {
            println!("{}", instant);
        }
    }
    Ok(())
}
