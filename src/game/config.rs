use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Where new food may appear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FoodPlacement {
    /// Any cell of the grid, including cells covered by the snake
    #[default]
    Anywhere,
    /// Only cells not covered by the snake (falls back to `Anywhere` on a full grid)
    AvoidSnake,
}

/// What a tick does after a wall or self collision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TickSequencing {
    /// The collision ends the tick
    #[default]
    ShortCircuit,
    /// The food check still runs after a collision, so a dying tick can also eat
    Legacy,
}

/// Configuration for the game
///
/// All lengths are in pixels; the playfield is `width x height` pixels
/// quantized into square cells of side `cell_size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the playfield in pixels
    pub width: i32,
    /// Height of the playfield in pixels
    pub height: i32,
    /// Side of one cell in pixels; every coordinate is a multiple of it
    pub cell_size: i32,

    /// Tick interval at the start of a round
    pub initial_speed_ms: u64,
    /// Amount the tick interval shrinks per food eaten
    pub speed_step_ms: u64,
    /// The tick interval never drops below this
    pub min_speed_ms: u64,
    /// Points per food
    pub score_per_food: u32,

    pub food_placement: FoodPlacement,
    pub tick_sequencing: TickSequencing,

    /// Fixed RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            cell_size: 20,
            initial_speed_ms: 150,
            speed_step_ms: 10,
            min_speed_ms: 50,
            score_per_food: 10,
            food_placement: FoodPlacement::default(),
            tick_sequencing: TickSequencing::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom playfield size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Create a small playfield for testing (10 x 10 cells)
    pub fn small() -> Self {
        Self::new(200, 200)
    }

    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cell_size <= 0 {
            bail!("cell size must be positive, got {}", self.cell_size);
        }
        if self.width <= 0 || self.height <= 0 {
            bail!(
                "playfield must have a positive size, got {}x{}",
                self.width,
                self.height
            );
        }
        if self.width < self.cell_size || self.height < self.cell_size {
            bail!(
                "playfield {}x{} is smaller than one {}px cell",
                self.width,
                self.height,
                self.cell_size
            );
        }
        if self.width % self.cell_size != 0 || self.height % self.cell_size != 0 {
            bail!(
                "playfield {}x{} is not a multiple of the cell size {}",
                self.width,
                self.height,
                self.cell_size
            );
        }
        if self.min_speed_ms == 0 {
            bail!("minimum tick interval must be at least 1ms");
        }
        if self.min_speed_ms > self.initial_speed_ms {
            bail!(
                "minimum tick interval ({}ms) exceeds the initial one ({}ms)",
                self.min_speed_ms,
                self.initial_speed_ms
            );
        }
        Ok(())
    }

    /// Number of cell columns
    pub fn columns(&self) -> i32 {
        self.width / self.cell_size
    }

    /// Number of cell rows
    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }

    pub fn initial_speed(&self) -> Duration {
        Duration::from_millis(self.initial_speed_ms)
    }

    pub fn speed_step(&self) -> Duration {
        Duration::from_millis(self.speed_step_ms)
    }

    pub fn min_speed(&self) -> Duration {
        Duration::from_millis(self.min_speed_ms)
    }
}
