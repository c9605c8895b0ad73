use std::time::Duration;

use anyhow::{ensure, Result};
use clap::Parser;

use crate::snake::{Cell, Direction};
use crate::TermInt;

#[derive(Parser, Debug)]
#[command(name = "snakes")]
#[command(version, about = "Terminal snake: steer with WASD, don't hit the walls or yourself")]
pub struct Cli {
    /// Playfield width in columns
    #[arg(long, default_value_t = 50)]
    pub width: i32,

    /// Playfield height in rows, border included
    #[arg(long, default_value_t = 30)]
    pub height: i32,

    /// Row the snake starts on
    #[arg(long, default_value_t = 20)]
    pub start_row: i32,

    /// Column the snake starts on
    #[arg(long, default_value_t = 10)]
    pub start_col: i32,

    /// Milliseconds per game tick
    #[arg(long, default_value_t = 200)]
    pub tick_ms: u64,

    /// Ticks before uneaten food is moved elsewhere
    #[arg(long, default_value_t = 100)]
    pub food_interval: u64,

    /// Seed for food placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Never place food on the snake
    #[arg(long)]
    pub avoid_snake: bool,
}

/// The playable area. Row 1, row `height`, column 1 and column `width + 1`
/// are the border; everything strictly inside is open.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub const fn new(width: i32, height: i32) -> Self {
        Bounds { width, height }
    }

    pub fn first_row(&self) -> i32 {
        2
    }

    pub fn last_row(&self) -> i32 {
        self.height - 1
    }

    pub fn first_col(&self) -> i32 {
        2
    }

    pub fn last_col(&self) -> i32 {
        self.width
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (self.first_row()..=self.last_row()).contains(&cell.row)
            && (self.first_col()..=self.last_col()).contains(&cell.col)
    }

    /// Every open cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let (first_col, last_col) = (self.first_col(), self.last_col());
        (self.first_row()..=self.last_row())
            .flat_map(move |row| (first_col..=last_col).map(move |col| Cell::new(row, col)))
    }

    /// Terminal columns needed to draw the field, right border included.
    pub fn screen_width(&self) -> i32 {
        self.width + 1
    }

    pub fn screen_height(&self) -> i32 {
        self.height
    }
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub bounds: Bounds,
    pub start: Cell,
    pub start_direction: Direction,
    pub first_food: Cell,
    pub tick: Duration,
    pub food_interval: u64,
    pub seed: Option<u64>,
    pub avoid_snake: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            bounds: Bounds::new(50, 30),
            start: Cell::new(20, 10),
            start_direction: Direction::Up,
            first_food: Cell::new(20, 15),
            tick: Duration::from_millis(200),
            food_interval: 100,
            seed: None,
            avoid_snake: false,
        }
    }
}

impl GameConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = GameConfig {
            bounds: Bounds::new(cli.width, cli.height),
            start: Cell::new(cli.start_row, cli.start_col),
            tick: Duration::from_millis(cli.tick_ms),
            food_interval: cli.food_interval,
            seed: cli.seed,
            avoid_snake: cli.avoid_snake,
            ..GameConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let b = &self.bounds;
        ensure!(b.width >= 2, "width must be at least 2, got {}", b.width);
        ensure!(b.height >= 3, "height must be at least 3, got {}", b.height);
        ensure!(
            b.width < TermInt::MAX as i32 && b.height <= TermInt::MAX as i32,
            "a {}x{} field can't be addressed on a terminal",
            b.width, b.height
        );
        ensure!(
            b.contains(self.start),
            "start cell ({}, {}) is outside rows {}..={} and columns {}..={}",
            self.start.row, self.start.col, b.first_row(), b.last_row(), b.first_col(), b.last_col()
        );
        ensure!(self.food_interval > 0, "food interval must be positive");
        ensure!(!self.tick.is_zero(), "tick length must be positive");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("snakes").chain(args.iter().copied()))
    }

    #[test]
    fn test_default_config() {
        let config = GameConfig::from_cli(&cli(&[])).unwrap();
        assert_eq!(config.bounds, Bounds::new(50, 30));
        assert_eq!(config.start, Cell::new(20, 10));
        assert_eq!(config.start_direction, Direction::Up);
        assert_eq!(config.tick, Duration::from_millis(200));
        assert_eq!(config.food_interval, 100);
        assert!(!config.avoid_snake);
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::from_cli(&cli(&[
            "--width", "20", "--height", "12", "--start-row", "5", "--start-col", "5",
            "--seed", "7", "--avoid-snake",
        ])).unwrap();
        assert_eq!(config.bounds, Bounds::new(20, 12));
        assert_eq!(config.seed, Some(7));
        assert!(config.avoid_snake);
    }

    #[test]
    fn test_start_outside_field() {
        assert!(GameConfig::from_cli(&cli(&["--height", "15"])).is_err());
        assert!(GameConfig::from_cli(&cli(&["--start-row", "1"])).is_err());
    }

    #[test]
    fn test_field_must_fit_terminal_coords() {
        assert!(GameConfig::from_cli(&cli(&["--width", "70000"])).is_err());
        assert!(GameConfig::from_cli(&cli(&["--width", "65535"])).is_err());
        assert!(GameConfig::from_cli(&cli(&["--height", "65536"])).is_err());
        assert!(GameConfig::from_cli(&cli(&["--width", "65534", "--height", "65535"])).is_ok());
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(GameConfig::from_cli(&cli(&["--food-interval", "0"])).is_err());
        assert!(GameConfig::from_cli(&cli(&["--tick-ms", "0"])).is_err());
    }

    #[test]
    fn test_bounds() {
        let b = Bounds::new(50, 30);
        assert!(b.contains(Cell::new(2, 2)));
        assert!(b.contains(Cell::new(29, 50)));
        assert!(!b.contains(Cell::new(1, 10)));
        assert!(!b.contains(Cell::new(30, 10)));
        assert!(!b.contains(Cell::new(10, 1)));
        assert!(!b.contains(Cell::new(10, 51)));
    }

    #[test]
    fn test_bounds_cells() {
        let b = Bounds::new(4, 5);
        let cells: Vec<Cell> = b.cells().collect();
        // rows 2..=4, cols 2..=4
        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], Cell::new(2, 2));
        assert_eq!(cells[8], Cell::new(4, 4));
        assert!(cells.iter().all(|&c| b.contains(c)));
    }
}
