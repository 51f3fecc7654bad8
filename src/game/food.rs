use rand::SeedableRng;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use super::error::GameError;
use super::state::{Field, Food, FoodKind, Position, Snake};

/// Places food on free playable cells
pub struct FoodSpawner {
    rng: StdRng,
    kinds: WeightedIndex<f64>,
}

impl FoodSpawner {
    /// Seeded spawner for reproducible games, entropy-seeded otherwise
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(rng)
    }

    pub fn with_rng(rng: StdRng) -> Self {
        let kinds = WeightedIndex::new(FoodKind::ALL.iter().map(|kind| kind.weight()))
            .expect("food weights are positive constants");
        Self { rng, kinds }
    }

    /// Draw a food kind by its weight
    pub fn pick_kind(&mut self) -> FoodKind {
        FoodKind::ALL[self.kinds.sample(&mut self.rng)]
    }

    /// Pick uniformly among the playable cells the snake does not cover
    pub fn pick_position(&mut self, snake: &Snake, field: &Field) -> Result<Position, GameError> {
        let occupied: HashSet<Position> = snake.segments().iter().copied().collect();
        let free: Vec<Position> = field
            .playable_positions()
            .filter(|pos| !occupied.contains(pos))
            .collect();

        free.choose(&mut self.rng)
            .copied()
            .ok_or(GameError::SpawnExhausted)
    }

    pub fn spawn(&mut self, snake: &Snake, field: &Field) -> Result<Food, GameError> {
        let kind = self.pick_kind();
        let position = self.pick_position(snake, field)?;
        tracing::debug!(?kind, x = position.x, y = position.y, "food spawned");
        Ok(Food::new(position, kind))
    }
}
