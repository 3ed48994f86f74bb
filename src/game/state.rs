use std::collections::VecDeque;
use std::time::Duration;

use super::direction::Direction;

/// A position on the playfield, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position `step` pixels in a direction
    pub fn moved_in_direction(&self, direction: Direction, step: i32) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx * step, dy * step)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front. Never empty.
    body: VecDeque<Position>,
    /// Heading used by the most recent tick
    pub direction: Direction,
}

impl Snake {
    /// Create a single-segment snake
    pub fn new(head: Position, direction: Direction) -> Self {
        Self {
            body: VecDeque::from([head]),
            direction,
        }
    }

    /// Create a snake from explicit segments, head first. Returns `None` for
    /// an empty sequence.
    pub fn from_segments<I>(segments: I, direction: Direction) -> Option<Self>
    where
        I: IntoIterator<Item = Position>,
    {
        let body: VecDeque<Position> = segments.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self { body, direction })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// All segments, head first
    pub fn segments(&self) -> impl Iterator<Item = &Position> + '_ {
        self.body.iter()
    }

    /// Body segments (excluding head)
    pub fn body_segments(&self) -> impl Iterator<Item = &Position> + '_ {
        self.body.iter().skip(1)
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().any(|segment| *segment == pos)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Move one cell of `step` pixels in the current direction. Every body
    /// segment takes the place of the one ahead of it.
    pub fn advance(&mut self, step: i32) {
        let new_head = self.head().moved_in_direction(self.direction, step);
        self.body.push_front(new_head);
        self.body.pop_back();
    }

    /// Append a segment on top of the current tail
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.body.push_back(tail);
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Heading requested since the last tick, applied by the next one
    pub pending_direction: Option<Direction>,
    pub food: Position,
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
    pub score: u32,
    /// Current tick interval
    pub speed: Duration,
    pub steps: u32,
    pub game_over: bool,
}

impl GameState {
    /// Create a new game state
    pub fn new(
        snake: Snake,
        food: Position,
        width: i32,
        height: i32,
        cell_size: i32,
        speed: Duration,
    ) -> Self {
        Self {
            snake,
            pending_direction: None,
            food,
            width,
            height,
            cell_size,
            score: 0,
            speed,
            steps: 0,
            game_over: false,
        }
    }

    /// Check if a position is within the playfield
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Heading the next tick will use
    pub fn next_direction(&self) -> Direction {
        self.pending_direction.unwrap_or(self.snake.direction)
    }

    /// Request a new heading for the next tick.
    ///
    /// Ignored after game over, and when `requested` reverses the heading the
    /// snake is currently moving in. Later requests before the same tick
    /// replace earlier ones.
    pub fn set_direction(&mut self, requested: Direction) {
        if self.game_over || self.snake.direction.is_opposite(requested) {
            return;
        }
        self.pending_direction = Some(requested);
    }
}
