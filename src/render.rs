use crate::config::Bounds;
use crate::session::Session;
use crate::snake::Cell;
use crate::{Coords, TermInt};

pub const BORDER_CHAR: char = '*';
pub const SNAKE_CHAR: char = 'o';
pub const DEAD_SNAKE_CHAR: char = 'X';
pub const FOOD_CHAR: char = 'x';

/// One frame of the playfield, border included, addressed in 0-based
/// terminal coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: TermInt,
    height: TermInt,
    chars: Vec<char>,
}

impl Canvas {
    pub fn blank(width: TermInt, height: TermInt) -> Self {
        Canvas { width, height, chars: vec![' '; width as usize * height as usize] }
    }

    pub fn for_bounds(bounds: &Bounds) -> Self {
        Canvas::blank(bounds.screen_width() as TermInt, bounds.screen_height() as TermInt)
    }

    /// Draws the border, the food and the snake.
    pub fn compose(session: &Session) -> Self {
        let bounds = session.bounds();
        let mut canvas = Canvas::for_bounds(bounds);

        let (w, h) = (bounds.screen_width(), bounds.screen_height());
        for col in 1..=w {
            canvas.put(Cell::new(1, col), BORDER_CHAR);
            canvas.put(Cell::new(h, col), BORDER_CHAR);
        }
        for row in 2..h {
            canvas.put(Cell::new(row, 1), BORDER_CHAR);
            canvas.put(Cell::new(row, w), BORDER_CHAR);
        }

        if let Some(food) = session.food() {
            canvas.put(food, FOOD_CHAR);
        }

        let snake_char = if session.is_over() { DEAD_SNAKE_CHAR } else { SNAKE_CHAR };
        // tail first so the head wins when it overlaps the body
        for cell in session.body().iter().rev() {
            canvas.put(cell, snake_char);
        }

        canvas
    }

    pub fn size(&self) -> Coords {
        (self.width, self.height)
    }

    pub fn get(&self, pos: Coords) -> char {
        self.chars[self.index(pos)]
    }

    pub fn set(&mut self, pos: Coords, ch: char) {
        let idx = self.index(pos);
        self.chars[idx] = ch;
    }

    /// Positions whose character differs from `other`, which must have the
    /// same size.
    pub fn diff<'a>(&'a self, other: &'a Canvas) -> impl Iterator<Item = (Coords, char)> + 'a {
        let width = self.width as usize;
        self.chars.iter().zip(&other.chars).enumerate()
            .filter(|(_, (new, old))| new != old)
            .map(move |(i, (new, _))| (((i % width) as TermInt, (i / width) as TermInt), *new))
    }

    /// Grid cells are 1-based; anything off the canvas is dropped.
    fn put(&mut self, cell: Cell, ch: char) {
        if cell.row < 1 || cell.col < 1 || cell.row > self.height as i32 || cell.col > self.width as i32 {
            return;
        }
        self.set(((cell.col - 1) as TermInt, (cell.row - 1) as TermInt), ch);
    }

    fn index(&self, pos: Coords) -> usize {
        self.width as usize * pos.1 as usize + pos.0 as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction;

    fn small_session() -> Session {
        let mut session = Session::new(Bounds::new(6, 5), Cell::new(3, 3), Direction::Right);
        session.place_food(Cell::new(4, 6));
        session
    }

    fn rows(canvas: &Canvas) -> Vec<String> {
        let (w, h) = canvas.size();
        (0..h).map(|y| (0..w).map(|x| canvas.get((x, y))).collect()).collect()
    }

    #[test]
    fn test_compose_frame() {
        let canvas = Canvas::compose(&small_session());
        assert_eq!(rows(&canvas), vec![
            "*******",
            "*     *",
            "* o   *",
            "*    x*",
            "*******",
        ]);
    }

    #[test]
    fn test_dead_snake_drawn_on_border() {
        let mut session = Session::new(Bounds::new(6, 5), Cell::new(2, 3), Direction::Up);
        session.tick();
        assert!(session.is_over());

        let canvas = Canvas::compose(&session);
        assert_eq!(rows(&canvas)[0], "**X****");
    }

    #[test]
    fn test_diff_after_move() {
        let mut session = small_session();
        let before = Canvas::compose(&session);
        session.tick();
        let after = Canvas::compose(&session);

        let changes: Vec<(Coords, char)> = after.diff(&before).collect();
        assert_eq!(changes, vec![((2, 2), ' '), ((3, 2), SNAKE_CHAR)]);
    }
}
