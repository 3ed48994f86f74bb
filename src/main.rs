use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::assets::AssetBundle;
use grid_snake::game::{FoodPlacement, GameConfig, TickSequencing};
use grid_snake::modes::HumanMode;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Single-screen arcade Snake")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Playfield width in pixels
    #[arg(long)]
    width: Option<i32>,

    /// Playfield height in pixels
    #[arg(long)]
    height: Option<i32>,

    /// Cell size in pixels
    #[arg(long)]
    cell_size: Option<i32>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Where food may spawn
    #[arg(long, value_enum)]
    food_placement: Option<Placement>,

    /// Keep evaluating food after a collision within the same tick
    #[arg(long)]
    legacy_tick: bool,

    /// Directory holding eat.wav and gameover.wav
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Write logs to this file (RUST_LOG filters, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Placement {
    /// Any cell, even one under the snake
    Anywhere,
    /// Only cells the snake does not cover
    AvoidSnake,
}

impl From<Placement> for FoodPlacement {
    fn from(placement: Placement) -> Self {
        match placement {
            Placement::Anywhere => FoodPlacement::Anywhere,
            Placement::AvoidSnake => FoodPlacement::AvoidSnake,
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };

    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if let Some(cell_size) = cli.cell_size {
        config.cell_size = cell_size;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(placement) = cli.food_placement {
        config.food_placement = placement.into();
    }
    if cli.legacy_tick {
        config.tick_sequencing = TickSequencing::Legacy;
    }

    config.validate().context("Invalid game configuration")?;
    Ok(config)
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    // The terminal belongs to the UI, so logs only go to a file
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = resolve_config(&cli)?;

    // Load assets before touching the terminal so failures print cleanly
    let assets = cli
        .assets
        .as_deref()
        .map(AssetBundle::load)
        .transpose()
        .context("Failed to load assets")?;

    tracing::info!(
        width = config.width,
        height = config.height,
        cell_size = config.cell_size,
        food_placement = ?config.food_placement,
        tick_sequencing = ?config.tick_sequencing,
        audio = assets.is_some(),
        "starting snake"
    );

    let mut human_mode = HumanMode::new(config, assets)?;
    human_mode.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "grid_snake",
            "--width",
            "400",
            "--seed",
            "5",
            "--food-placement",
            "avoid-snake",
            "--legacy-tick",
        ])
        .unwrap();
        let config = resolve_config(&cli).unwrap();

        assert_eq!(config.width, 400);
        assert_eq!(config.height, 600);
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.food_placement, FoodPlacement::AvoidSnake);
        assert_eq!(config.tick_sequencing, TickSequencing::Legacy);
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "width": 300, "height": 300, "cell_size": 15 }}"#).unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let cli =
            Cli::try_parse_from(["grid_snake", "--config", &path, "--height", "450"]).unwrap();
        let config = resolve_config(&cli).unwrap();

        assert_eq!(config.width, 300);
        assert_eq!(config.height, 450);
        assert_eq!(config.cell_size, 15);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let cli = Cli::try_parse_from(["grid_snake", "--width", "610"]).unwrap();
        assert!(resolve_config(&cli).is_err());
    }
}
