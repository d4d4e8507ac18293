use super::command::Direction;

/// A position on the game grid
///
/// Coordinates are signed so the head may legally sit one cell outside
/// the grid for the tick on which the wall check fires.
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

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake: ordered body segments with the head at index 0
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: Vec<Position>,
    direction: Direction,
    pending_growth: bool,
}

impl Snake {
    /// Create a new snake with given head position and direction,
    /// trailing segments laid out behind the head
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self {
            body,
            direction,
            pending_growth: false,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// All body segments, head first
    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body[1..].contains(&pos)
    }

    /// Check if a position is occupied by any segment, head included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Advance one cell in the current direction
    ///
    /// The new head is pushed without any bounds checking; out-of-grid
    /// and self-overlap are the engine's fail checks, not prevented
    /// here. If growth is pending the tail is kept and the flag
    /// cleared, otherwise the tail cell is dropped.
    pub fn advance(&mut self) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);

        if self.pending_growth {
            self.pending_growth = false;
        } else {
            self.body.pop();
        }
    }

    /// Mark the snake to grow on the next advance, not immediately
    pub fn grow(&mut self) {
        self.pending_growth = true;
    }

    /// Update the direction, effective on the next advance
    ///
    /// A request for the exact opposite of the current direction is
    /// ignored so the snake cannot reverse into its second segment.
    pub fn set_direction(&mut self, direction: Direction) {
        if !self.direction.is_opposite(direction) {
            self.direction = direction;
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Round state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Paused,
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_by(0, 1), Position::new(5, 6));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 10), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 10));
        assert_eq!(snake.body()[1], Position::new(4, 10));
        assert_eq!(snake.body()[2], Position::new(3, 10));
    }

    #[test]
    fn test_advance_without_growth() {
        let mut snake = Snake::new(Position::new(5, 10), Direction::Right, 3);

        snake.advance();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 10));
        assert_eq!(
            snake.body(),
            &[
                Position::new(6, 10),
                Position::new(5, 10),
                Position::new(4, 10)
            ]
        );
    }

    #[test]
    fn test_growth_applies_on_next_advance() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        snake.grow();
        assert_eq!(snake.len(), 3); // not immediate

        snake.advance();
        assert_eq!(snake.len(), 4); // tail retained

        snake.advance();
        assert_eq!(snake.len(), 4); // flag consumed
    }

    #[test]
    fn test_reversal_rejected_for_all_pairs() {
        let pairs = [
            (Direction::Right, Direction::Left),
            (Direction::Left, Direction::Right),
            (Direction::Up, Direction::Down),
            (Direction::Down, Direction::Up),
        ];

        for (current, opposite) in pairs {
            let mut snake = Snake::new(Position::new(5, 5), current, 3);
            snake.set_direction(opposite);
            assert_eq!(snake.direction(), current);
        }
    }

    #[test]
    fn test_perpendicular_turn_accepted() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        snake.set_direction(Direction::Up);
        assert_eq!(snake.direction(), Direction::Up);
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(!snake.collides_with_body(Position::new(5, 5))); // head
        assert!(snake.collides_with_body(Position::new(4, 5))); // body
        assert!(!snake.collides_with_body(Position::new(10, 10))); // empty
        assert!(snake.occupies(Position::new(5, 5)));
    }
}
