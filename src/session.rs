use log::{info, trace};

use crate::config::{Bounds, GameConfig};
use crate::food::FoodSpawner;
use crate::snake::{Body, Cell, Direction};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    Playing,
    Lost,
}

/// What a single tick found after moving the snake.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Evaluation {
    pub hit_wall: bool,
    pub hit_self: bool,
    pub ate_food: bool,
}

impl Evaluation {
    pub fn is_fatal(&self) -> bool {
        self.hit_wall || self.hit_self
    }
}

/// Result of [`Session::tick`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickReport {
    /// The game had already ended; nothing moved.
    Halted,
    Moved { vacated: Cell, eval: Evaluation },
}

/// Judges the body's fresh head position. Walls and self are both checked
/// before any growth so a new tail segment is never mistaken for a collision.
/// Eating puts `vacated`, the cell the tail just left, back on the body.
pub fn evaluate(body: &mut Body, bounds: &Bounds, food: &mut Option<Cell>, vacated: Cell) -> Evaluation {
    let head = body.head();
    let mut eval = Evaluation {
        hit_wall: !bounds.contains(head),
        hit_self: body.occupies_self(),
        ate_food: false,
    };

    if *food == Some(head) {
        body.grow_into(vacated);
        *food = None;
        eval.ate_food = true;
    }

    eval
}

/// All mutable state of one game.
#[derive(Debug, Clone)]
pub struct Session {
    bounds: Bounds,
    body: Body,
    direction: Direction,
    food: Option<Cell>,
    outcome: Outcome,
    ticks: u64,
}

impl Session {
    pub fn new(bounds: Bounds, start: Cell, direction: Direction) -> Self {
        Session {
            bounds,
            body: Body::new(start),
            direction,
            food: None,
            outcome: Outcome::Playing,
            ticks: 0,
        }
    }

    /// A fresh game with its first food placed, at the configured cell when
    /// it fits the field.
    pub fn start(config: &GameConfig, spawner: &mut FoodSpawner) -> Self {
        let mut session = Session::new(config.bounds, config.start, config.start_direction);
        let first = if config.bounds.contains(config.first_food) && config.first_food != config.start {
            config.first_food
        } else {
            spawner.spawn(&session.bounds, &session.body)
        };
        session.place_food(first);
        info!("new game at ({}, {}) heading {:?}", config.start.row, config.start.col, config.start_direction);
        session
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome == Outcome::Lost
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Accepts any turn except a reversal. Returns whether the direction
    /// changed, so asking for the current direction also gives `false`; a
    /// new direction applies from the next tick on.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) || self.direction == direction {
            return false;
        }
        self.direction = direction;
        true
    }

    pub fn place_food(&mut self, cell: Cell) {
        self.food = Some(cell);
    }

    pub fn clear_food(&mut self) {
        self.food = None;
    }

    /// Puts down new food if the spawner says it's time.
    pub fn replenish_food(&mut self, spawner: &mut FoodSpawner) {
        if self.is_over() || !spawner.is_due(self.ticks, self.food) {
            return;
        }
        self.clear_food();
        let cell = spawner.spawn(&self.bounds, &self.body);
        self.place_food(cell);
    }

    pub fn tick(&mut self) -> TickReport {
        if self.is_over() {
            return TickReport::Halted;
        }

        let vacated = self.body.move_step(self.direction);
        let eval = evaluate(&mut self.body, &self.bounds, &mut self.food, vacated);
        self.ticks += 1;

        let head = self.body.head();
        trace!("tick {}: head at ({}, {})", self.ticks, head.row, head.col);

        if eval.is_fatal() {
            self.outcome = Outcome::Lost;
            info!(
                "game over after {} ticks, length {} ({})",
                self.ticks,
                self.body.len(),
                if eval.hit_wall { "wall" } else { "self" }
            );
        }

        TickReport::Moved { vacated, eval }
    }
}
