//! Wall and self collision tests against the current snake.
//!
//! Positions are grid aligned, so collisions are exact equality checks
//! rather than box overlaps.

use super::state::{CollisionType, Field, Snake};

/// True when the head sits in the one-cell wall ring
pub fn wall_collision(snake: &Snake, field: &Field) -> bool {
    !field.is_playable(snake.head())
}

/// True when the head shares a cell with any other segment
pub fn self_collision(snake: &Snake) -> bool {
    snake.collides_with_body(snake.head())
}

/// Wall is checked first, so it wins when both apply.
pub fn detect(snake: &Snake, field: &Field) -> Option<CollisionType> {
    if wall_collision(snake, field) {
        return Some(CollisionType::Wall);
    }
    if self_collision(snake) {
        return Some(CollisionType::SelfCollision);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::Direction;
    use crate::game::state::Position;

    fn field() -> Field {
        Field::new(800, 600, 20)
    }

    fn snake_at(x: i32, y: i32) -> Snake {
        Snake::from_segments([Position::new(x, y)], Direction::Right, 20)
    }

    #[test]
    fn test_fresh_snake_has_no_collision() {
        let field = field();
        let snake = Snake::centered(&field);
        assert!(!wall_collision(&snake, &field));
        assert!(!self_collision(&snake));
        assert_eq!(detect(&snake, &field), None);
    }

    #[test]
    fn test_each_wall() {
        let field = field();
        assert!(wall_collision(&snake_at(0, 300), &field));
        assert!(wall_collision(&snake_at(780, 300), &field));
        assert!(wall_collision(&snake_at(400, 0), &field));
        assert!(wall_collision(&snake_at(400, 580), &field));
        assert!(wall_collision(&snake_at(-20, 300), &field));
    }

    #[test]
    fn test_interior_edges_are_free() {
        let field = field();
        assert!(!wall_collision(&snake_at(20, 20), &field));
        assert!(!wall_collision(&snake_at(760, 20), &field));
        assert!(!wall_collision(&snake_at(20, 560), &field));
        assert!(!wall_collision(&snake_at(760, 560), &field));
    }

    #[test]
    fn test_head_on_body() {
        let snake = Snake::from_segments(
            [
                Position::new(100, 100),
                Position::new(120, 100),
                Position::new(100, 100),
                Position::new(80, 100),
            ],
            Direction::Left,
            20,
        );
        assert!(self_collision(&snake));
        assert_eq!(detect(&snake, &field()), Some(CollisionType::SelfCollision));
    }

    #[test]
    fn test_wall_takes_precedence() {
        let snake = Snake::from_segments(
            [Position::new(0, 100), Position::new(20, 100), Position::new(0, 100)],
            Direction::Left,
            20,
        );
        assert!(self_collision(&snake));
        assert_eq!(detect(&snake, &field()), Some(CollisionType::Wall));
    }
}
