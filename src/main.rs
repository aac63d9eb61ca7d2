use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::{BoundaryPolicy, GameConfig, Level, Round, TailRule};
use grid_snake::logging;
use grid_snake::modes::HumanMode;
use grid_snake::store::JsonFileStore;
use tracing::info;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a wrap-around grid")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Starting snake length
    #[arg(long)]
    length: Option<usize>,

    /// What happens at the grid edge
    #[arg(long, value_enum)]
    edges: Option<Edges>,

    /// Let the head move onto the cell the tail is leaving
    #[arg(long)]
    chase_tail: bool,

    /// Level file with the wall bitmap; ignored if missing
    #[arg(long, default_value = "levels/level1.json")]
    level: PathBuf,

    /// Where the best score is kept
    #[arg(long, default_value = "grid_snake_scores.json")]
    scores: PathBuf,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Edges {
    /// Leave one edge, come back on the opposite one
    Wrap,
    /// Leaving the grid ends the round
    Clamp,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(length) = self.length {
            config.initial_snake_length = length;
        }
        if let Some(edges) = self.edges {
            config.boundary = match edges {
                Edges::Wrap => BoundaryPolicy::Wrap,
                Edges::Clamp => BoundaryPolicy::Clamp,
            };
        }
        if self.chase_tail {
            config.tail_rule = TailRule::Vacates;
        }

        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;

    let config = cli.game_config()?;
    let level = Level::load_optional(&cli.level)
        .with_context(|| format!("Failed to load level {:?}", cli.level))?;
    if level.is_none() {
        info!(path = ?cli.level, "no level file, playing without walls");
    }

    let store = JsonFileStore::open(&cli.scores);
    info!(path = ?store.path(), "score store opened");
    let round = Round::new(config, store, level).context("Failed to start round")?;

    let mut human_mode = HumanMode::new(round);
    human_mode.run().await?;

    Ok(())
}
