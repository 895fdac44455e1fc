//! Gomoku self-play trainer
//!
//! Trains the heuristic or neural evaluator against a random mover and then
//! a fixed heuristic engine, saving weights as it goes.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use gomoku::config::AppConfig;
use gomoku::eval::EvaluatorKind;
use gomoku::training::SelfPlayTrainer;
use gomoku::AIEngine;

/// Train a Gomoku evaluator via self-play.
#[derive(Parser)]
#[command(name = "gomoku-train", about = "Train a Gomoku evaluator via self-play")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "gomoku.toml")]
    config: PathBuf,

    /// Evaluator to train
    #[arg(long, value_enum)]
    evaluator: Option<EvaluatorKind>,

    /// Seed for weights initialization, tie-breaks and opponents
    #[arg(long)]
    seed: Option<u64>,

    /// Override number of games against the random mover
    #[arg(long)]
    random_games: Option<usize>,

    /// Override number of games against the heuristic engine
    #[arg(long)]
    sparring_games: Option<usize>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml().context("serializing default config")?);
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(kind) = cli.evaluator {
        config.engine.evaluator = kind;
    }
    if let Some(seed) = cli.seed {
        config.engine.seed = Some(seed);
    }
    if let Some(games) = cli.random_games {
        config.training.random_games = games;
    }
    if let Some(games) = cli.sparring_games {
        config.training.sparring_games = games;
    }
    config.validate().context("validating config")?;

    info!(
        "training {} evaluator as {:?}",
        config.engine.evaluator, config.training.learner
    );
    let mut learner = AIEngine::from_config(&config.engine);

    let mut trainer = SelfPlayTrainer::new(config.training.clone());
    if let Some(seed) = config.engine.seed {
        trainer = trainer.with_seed(seed);
    }
    let summaries = trainer.train(&mut learner).context("training")?;

    for phase in &summaries {
        let rate = if phase.games == 0 {
            0.0
        } else {
            phase.wins as f64 / phase.games as f64 * 100.0
        };
        info!("{}: won {}/{} ({rate:.1}%)", phase.name, phase.wins, phase.games);
    }
    Ok(())
}
