use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};

use crate::config::Bounds;
use crate::snake::{Body, Cell};

/// Places food inside the border ring.
pub struct FoodSpawner {
    rng: StdRng,
    interval: u64,
    avoid_snake: bool,
}

impl FoodSpawner {
    pub fn new(seed: Option<u64>, interval: u64, avoid_snake: bool) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        FoodSpawner { rng, interval, avoid_snake }
    }

    /// Food is replaced once it's gone, and every `interval` ticks regardless.
    pub fn is_due(&self, ticks: u64, food: Option<Cell>) -> bool {
        food.is_none() || ticks % self.interval == 0
    }

    pub fn spawn(&mut self, bounds: &Bounds, body: &Body) -> Cell {
        if self.avoid_snake {
            let free = bounds.cells().filter(|&cell| !body.contains(cell)).choose(&mut self.rng);
            match free {
                Some(cell) => {
                    debug!("food spawned at ({}, {})", cell.row, cell.col);
                    return cell;
                }
                None => warn!("no free cell left for food, placing it anywhere"),
            }
        }

        let cell = Cell::new(
            self.rng.gen_range(bounds.first_row()..=bounds.last_row()),
            self.rng.gen_range(bounds.first_col()..=bounds.last_col()),
        );
        debug!("food spawned at ({}, {})", cell.row, cell.col);
        cell
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_inside_border() {
        let bounds = Bounds::new(50, 30);
        let body = Body::new(Cell::new(20, 10));
        let mut spawner = FoodSpawner::new(Some(1), 100, false);

        for _ in 0..1000 {
            assert!(bounds.contains(spawner.spawn(&bounds, &body)));
        }
    }

    #[test]
    fn test_seeded_spawns_repeat() {
        let bounds = Bounds::new(50, 30);
        let body = Body::new(Cell::new(20, 10));
        let mut a = FoodSpawner::new(Some(42), 100, false);
        let mut b = FoodSpawner::new(Some(42), 100, false);

        for _ in 0..20 {
            assert_eq!(a.spawn(&bounds, &body), b.spawn(&bounds, &body));
        }
    }

    #[test]
    fn test_avoid_snake() {
        // rows 2..=3, cols 2..=3: four open cells, three taken by the snake
        let bounds = Bounds::new(3, 4);
        let body = Body::from_cells(vec![Cell::new(2, 2), Cell::new(2, 3), Cell::new(3, 3)]);
        let mut spawner = FoodSpawner::new(Some(3), 100, true);

        for _ in 0..50 {
            assert_eq!(spawner.spawn(&bounds, &body), Cell::new(3, 2));
        }
    }

    #[test]
    fn test_avoid_snake_full_field() {
        let bounds = Bounds::new(2, 3);
        let body = Body::new(Cell::new(2, 2));
        let mut spawner = FoodSpawner::new(Some(3), 100, true);

        assert_eq!(spawner.spawn(&bounds, &body), Cell::new(2, 2));
    }

    #[test]
    fn test_is_due() {
        let spawner = FoodSpawner::new(Some(0), 100, false);
        let food = Some(Cell::new(5, 5));

        assert!(spawner.is_due(7, None));
        assert!(!spawner.is_due(7, food));
        assert!(!spawner.is_due(99, food));
        assert!(spawner.is_due(100, food));
        assert!(spawner.is_due(300, food));
    }
}
