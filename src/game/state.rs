use std::collections::VecDeque;

use super::action::Direction;

/// A point on the field in pixels, always a multiple of the cell size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position of the cell at (col, row)
    pub fn from_cell(col: i32, row: i32, cell_size: i32) -> Self {
        Self::new(col * cell_size, row * cell_size)
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move one cell in a direction
    pub fn stepped(&self, direction: Direction, cell_size: i32) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx * cell_size, dy * cell_size)
    }

    /// Grid coordinates (col, row)
    pub fn cell(&self, cell_size: i32) -> (i32, i32) {
        (self.x / cell_size, self.y / cell_size)
    }
}

/// Fixed field geometry. The outermost ring of cells is wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
}

impl Field {
    pub fn new(width: i32, height: i32, cell_size: i32) -> Self {
        Self {
            width,
            height,
            cell_size,
        }
    }

    /// Wall thickness
    pub fn margin(&self) -> i32 {
        self.cell_size
    }

    /// Total grid size (cols, rows), walls included
    pub fn cells(&self) -> (i32, i32) {
        (self.width / self.cell_size, self.height / self.cell_size)
    }

    /// Grid size (cols, rows) inside the walls
    pub fn playable_cells(&self) -> (i32, i32) {
        let (cols, rows) = self.cells();
        ((cols - 2).max(0), (rows - 2).max(0))
    }

    /// Half-open `[margin, dim - margin)` on both axes
    pub fn is_playable(&self, pos: Position) -> bool {
        let margin = self.margin();
        pos.x >= margin
            && pos.x < self.width - margin
            && pos.y >= margin
            && pos.y < self.height - margin
    }

    /// Every cell inside the walls, row by row
    pub fn playable_positions(&self) -> impl Iterator<Item = Position> + '_ {
        let (cols, rows) = self.cells();
        (1..rows - 1).flat_map(move |row| {
            (1..cols - 1).map(move |col| Position::from_cell(col, row, self.cell_size))
        })
    }

    /// Grid-aligned centre of the field
    pub fn center(&self) -> Position {
        let (cols, rows) = self.cells();
        Position::from_cell(cols / 2, rows / 2, self.cell_size)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, head at the front
    body: VecDeque<Position>,
    /// Committed direction of travel
    direction: Direction,
    /// Direction changes waiting for the next tick
    pending: VecDeque<Direction>,
    pending_capacity: usize,
    cell_size: i32,
}

impl Snake {
    /// Straight snake with `length` segments trailing behind `head`. A length
    /// of zero still yields the head segment.
    pub fn new(head: Position, direction: Direction, length: usize, cell_size: i32) -> Self {
        let length = length.max(1);
        let back = direction.opposite();
        let mut body = VecDeque::with_capacity(length);
        let mut segment = head;
        for _ in 0..length {
            body.push_back(segment);
            segment = segment.stepped(back, cell_size);
        }

        Self {
            body,
            direction,
            pending: VecDeque::new(),
            pending_capacity: 3,
            cell_size,
        }
    }

    /// Build a snake from explicit segments, head first.
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty; a snake always has a head.
    pub fn from_segments(
        segments: impl IntoIterator<Item = Position>,
        direction: Direction,
        cell_size: i32,
    ) -> Self {
        let body: VecDeque<Position> = segments.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Self {
            body,
            direction,
            pending: VecDeque::new(),
            pending_capacity: 3,
            cell_size,
        }
    }

    /// Three segments centred on the field, heading right
    pub fn centered(field: &Field) -> Self {
        Self::new(field.center(), Direction::Right, 3, field.cell_size)
    }

    pub fn with_pending_capacity(mut self, capacity: usize) -> Self {
        self.pending_capacity = capacity.max(1);
        self
    }

    /// Restore the starting snake, keeping the input buffer depth
    pub fn reset(&mut self, field: &Field) {
        let capacity = self.pending_capacity;
        *self = Self::centered(field).with_pending_capacity(capacity);
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn segments(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body.iter().skip(1).any(|segment| *segment == pos)
    }

    /// Buffer a direction change for a later tick.
    ///
    /// Returns false when the input was dropped: the buffer is full, or the
    /// direction repeats the last buffered one.
    pub fn submit(&mut self, direction: Direction) -> bool {
        if self.pending.back() == Some(&direction) {
            return false;
        }
        if self.pending.len() >= self.pending_capacity {
            return false;
        }
        self.pending.push_back(direction);
        true
    }

    /// Take the oldest buffered direction
    pub fn next_direction(&mut self) -> Option<Direction> {
        self.pending.pop_front()
    }

    pub fn pending(&self) -> &VecDeque<Direction> {
        &self.pending
    }

    /// Advance one cell, turning to `direction` unless it reverses the
    /// committed direction. The tail is kept when the new head lands on
    /// `food`. Returns whether the snake grew.
    pub fn advance(&mut self, direction: Direction, food: Position) -> bool {
        if !self.direction.is_opposite(direction) {
            self.direction = direction;
        }

        let new_head = self.head().stepped(self.direction, self.cell_size);
        self.body.push_front(new_head);

        let grew = new_head == food;
        if !grew {
            self.body.pop_back();
        }
        grew
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Kind of food, each with fixed points and spawn weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodKind {
    Normal,
    Bonus,
    Special,
}

impl FoodKind {
    pub const ALL: [FoodKind; 3] = [FoodKind::Normal, FoodKind::Bonus, FoodKind::Special];

    pub fn points(&self) -> u32 {
        match self {
            FoodKind::Normal => 10,
            FoodKind::Bonus => 20,
            FoodKind::Special => 50,
        }
    }

    /// Probability of being picked on spawn
    pub fn weight(&self) -> f64 {
        match self {
            FoodKind::Normal => 0.80,
            FoodKind::Bonus => 0.15,
            FoodKind::Special => 0.05,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
}

impl Food {
    pub fn new(position: Position, kind: FoodKind) -> Self {
        Self { position, kind }
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit the boundary wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Screen the engine is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}
