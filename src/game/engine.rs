use super::{
    command::{Command, Direction},
    config::GameConfig,
    state::{GameStatus, Position, Snake},
};
use rand::Rng;
use thiserror::Error;

/// Failure conditions of the core game logic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// The snake occupies every cell, so no food placement exists.
    /// Fatal for the round; the engine is in GameOver when this is
    /// returned.
    #[error("no free cell left to place food")]
    BoardFull,
}

/// Notable things that happened during a tick, in occurrence order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The head landed on the food cell this tick
    FoodEaten,
    /// The score exceeded the stored high score; carries the new value
    NewHighScore(u32),
    /// The round ended on a wall or self collision
    GameOver,
}

/// The game engine: owns the snake, food, score and round state, and
/// advances them one tick at a time
///
/// The engine never schedules itself; the caller delivers ticks at a
/// fixed cadence and applies commands in between. Every operation is
/// synchronous and returns immediately.
pub struct GameEngine {
    config: GameConfig,
    rng: rand::rngs::ThreadRng,
    snake: Snake,
    food: Position,
    score: u32,
    high_score: u32,
    status: GameStatus,
    sound_enabled: bool,
}

impl GameEngine {
    /// Create a new engine with the given configuration and the high
    /// score loaded from persistence
    pub fn new(config: GameConfig, high_score: u32) -> Result<Self, GameError> {
        let mut rng = rand::thread_rng();
        let snake = Self::initial_snake(&config);
        let food = Self::spawn_food(&mut rng, &config, &snake)?;

        Ok(Self {
            config,
            rng,
            snake,
            food,
            score: 0,
            high_score,
            status: GameStatus::Running,
            sound_enabled: true,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    /// Advance the game by exactly one tick
    ///
    /// No-op unless the round is Running. Otherwise the snake moves,
    /// then the food check runs, then the fail check. The food check
    /// runs first: a tick that eats marks growth for the next move
    /// before the current head position is tested against walls and
    /// body.
    pub fn tick(&mut self) -> Result<Vec<GameEvent>, GameError> {
        let mut events = Vec::new();

        if self.status != GameStatus::Running {
            return Ok(events);
        }

        self.snake.advance();
        self.check_food(&mut events)?;
        self.check_fail(&mut events);

        Ok(events)
    }

    /// Apply a presentation-layer command
    ///
    /// Commands that are invalid in the current state (direction change
    /// outside Running, pause toggle after game over, reset while a
    /// round is live) are silently ignored.
    pub fn apply(&mut self, command: Command) -> Result<(), GameError> {
        match command {
            Command::SetDirection(direction) => {
                if self.status == GameStatus::Running {
                    self.snake.set_direction(direction);
                }
            }
            Command::TogglePause => match self.status {
                GameStatus::Running => self.status = GameStatus::Paused,
                GameStatus::Paused => self.status = GameStatus::Running,
                GameStatus::GameOver => {}
            },
            Command::Reset => {
                if self.status == GameStatus::GameOver {
                    self.reset_round()?;
                }
            }
            Command::ToggleSound => {
                self.sound_enabled = !self.sound_enabled;
            }
        }

        Ok(())
    }

    /// Start a fresh round: snake and food replaced wholesale, score
    /// cleared. The high score carries over.
    fn reset_round(&mut self) -> Result<(), GameError> {
        self.snake = Self::initial_snake(&self.config);
        self.food = Self::spawn_food(&mut self.rng, &self.config, &self.snake)?;
        self.score = 0;
        self.status = GameStatus::Running;
        Ok(())
    }

    fn check_food(&mut self, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        if self.snake.head() != self.food {
            return Ok(());
        }

        self.food = match Self::spawn_food(&mut self.rng, &self.config, &self.snake) {
            Ok(pos) => pos,
            Err(err) => {
                self.status = GameStatus::GameOver;
                return Err(err);
            }
        };

        self.snake.grow();
        self.score += 1;
        events.push(GameEvent::FoodEaten);

        if self.score > self.high_score {
            self.high_score = self.score;
            events.push(GameEvent::NewHighScore(self.score));
        }

        Ok(())
    }

    fn check_fail(&mut self, events: &mut Vec<GameEvent>) {
        let head = self.snake.head();

        let hit_wall = !self.is_in_bounds(head);
        let hit_self = self.snake.collides_with_body(head);

        if hit_wall || hit_self {
            self.status = GameStatus::GameOver;
            events.push(GameEvent::GameOver);
        }
    }

    fn is_in_bounds(&self, pos: Position) -> bool {
        let n = self.config.grid_size as i32;
        pos.x >= 0 && pos.x < n && pos.y >= 0 && pos.y < n
    }

    fn initial_snake(config: &GameConfig) -> Snake {
        // Head a quarter of the way in, vertically centered, facing
        // right; on the default 20x20 grid this is (5, 10).
        let head = Position::new(
            (config.grid_size / 4) as i32,
            (config.grid_size / 2) as i32,
        );
        Snake::new(head, Direction::Right, config.initial_snake_length)
    }

    /// Draw a uniformly random free cell for the food
    fn spawn_food(
        rng: &mut rand::rngs::ThreadRng,
        config: &GameConfig,
        snake: &Snake,
    ) -> Result<Position, GameError> {
        if snake.len() >= config.cell_count() {
            return Err(GameError::BoardFull);
        }

        loop {
            let x = rng.gen_range(0..config.grid_size) as i32;
            let y = rng.gen_range(0..config.grid_size) as i32;
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                return Ok(pos);
            }
        }
    }
}
