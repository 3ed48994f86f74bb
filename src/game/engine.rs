use super::{
    config::{FoodPlacement, GameConfig, TickSequencing},
    direction::Direction,
    state::{CollisionType, GameState, Position, Snake},
};
use anyhow::Result;
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use tracing::{debug, info};

/// Discrete notification produced by a tick, meant for one-shot audio cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    AteFood,
    Collision(CollisionType),
}

/// Information about a step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the round is over after this step
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    /// Events raised by this step, in the order they happened
    pub fn events(&self) -> Vec<GameEvent> {
        let mut events = Vec::with_capacity(2);
        if let Some(collision) = self.info.collision_type {
            events.push(GameEvent::Collision(collision));
        }
        if self.info.ate_food {
            events.push(GameEvent::AteFood);
        }
        events
    }
}

/// The game engine that handles all game logic
///
/// The random source is injectable so food placement can be made
/// deterministic; by default it is a `StdRng` seeded from the config or
/// from OS entropy.
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create a game engine drawing food positions from `rng`.
    /// Fails if the configuration does not describe a usable playfield.
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    /// Reset the game to initial state: one segment in the middle of the
    /// playfield heading right, score 0, initial speed, fresh food.
    pub fn reset(&mut self) -> GameState {
        let cell = self.config.cell_size;
        let center = Position::new(
            self.config.columns() / 2 * cell,
            self.config.rows() / 2 * cell,
        );
        let snake = Snake::new(center, Direction::Right);
        let food = self.place_food(&snake);

        info!(x = center.x, y = center.y, "round started");

        GameState::new(
            snake,
            food,
            self.config.width,
            self.config.height,
            cell,
            self.config.initial_speed(),
        )
    }

    /// Execute one tick of the game. Does nothing once the round is over.
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        if state.game_over {
            return StepResult {
                terminated: true,
                info: StepInfo::default(),
            };
        }

        if let Some(direction) = state.pending_direction.take() {
            state.snake.direction = direction;
        }

        state.snake.advance(state.cell_size);
        state.steps += 1;

        let mut info = StepInfo::default();

        if let Some(collision_type) = self.check_collision(state) {
            state.game_over = true;
            info.collision_type = Some(collision_type);

            let head = state.snake.head();
            debug!(?collision_type, x = head.x, y = head.y, score = state.score, "collision");

            if self.config.tick_sequencing == TickSequencing::ShortCircuit {
                return StepResult {
                    terminated: true,
                    info,
                };
            }
        }

        if state.snake.head() == state.food {
            info.ate_food = true;
            state.snake.grow();
            state.score += self.config.score_per_food;
            state.food = self.place_food(&state.snake);
            state.speed = state
                .speed
                .saturating_sub(self.config.speed_step())
                .max(self.config.min_speed());

            debug!(
                score = state.score,
                length = state.snake.len(),
                speed_ms = state.speed.as_millis() as u64,
                "food eaten"
            );
        }

        StepResult {
            terminated: state.game_over,
            info,
        }
    }

    /// Check if the head position causes a collision
    fn check_collision(&self, state: &GameState) -> Option<CollisionType> {
        let head = state.snake.head();

        // Check wall collision
        if !state.is_in_bounds(head) {
            return Some(CollisionType::Wall);
        }

        // Check self-collision
        if state.snake.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Pick a cell for the next food according to the placement policy
    pub fn place_food(&mut self, snake: &Snake) -> Position {
        match self.config.food_placement {
            FoodPlacement::Anywhere => self.random_cell(),
            FoodPlacement::AvoidSnake => {
                let cell = self.config.cell_size;
                let free: Vec<Position> = (0..self.config.rows())
                    .flat_map(|row| {
                        (0..self.config.columns())
                            .map(move |col| Position::new(col * cell, row * cell))
                    })
                    .filter(|pos| !snake.contains(*pos))
                    .collect();

                match free.choose(&mut self.rng) {
                    Some(pos) => *pos,
                    None => self.random_cell(),
                }
            }
        }
    }

    fn random_cell(&mut self) -> Position {
        let col = self.rng.gen_range(0..self.config.columns());
        let row = self.rng.gen_range(0..self.config.rows());
        Position::new(col * self.config.cell_size, row * self.config.cell_size)
    }
}
