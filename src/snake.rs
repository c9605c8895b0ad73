use std::iter::FusedIterator;

use Direction::*;

/// A grid coordinate, 1-based like terminal rows and columns.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Cell { row, col }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        Cell { row: self.row + d_row, col: self.col + d_col }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// `(row, col)` offset of a single step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// The snake's cells, head first.
///
/// Cells live in a ring buffer: logical position `i` is stored at
/// `(head + i) % slots.len()`. Moving writes the new head into the slot just
/// before `head`, which is the tail's slot whenever the ring is full, so a
/// step never shifts or reallocates the body. Growing fills a spare slot and
/// only reallocates (doubling) when none is left.
#[derive(Debug, Clone)]
pub struct Body {
    slots: Vec<Cell>,
    head: usize,
    len: usize,
}

impl Body {
    pub fn new(start: Cell) -> Self {
        Body { slots: vec![start], head: 0, len: 1 }
    }

    /// Builds a body from its cells listed head first.
    ///
    /// # Panics
    ///
    /// Panics if `cells` is empty.
    #[cfg(test)]
    pub fn from_cells<I: IntoIterator<Item = Cell>>(cells: I) -> Self {
        let slots: Vec<Cell> = cells.into_iter().collect();
        assert!(!slots.is_empty(), "a snake needs at least one cell");
        let len = slots.len();
        Body { slots, head: 0, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn head(&self) -> Cell {
        self.slots[self.head]
    }

    pub fn tail(&self) -> Cell {
        self.slots[self.slot(self.len - 1)]
    }

    pub fn iter(&self) -> Cells<'_> {
        Cells { body: self, front: 0, back: self.len }
    }

    /// Advances the head one cell in `direction`, dropping the tail, and
    /// returns the cell the tail vacated.
    pub fn move_step(&mut self, direction: Direction) -> Cell {
        let new_head = self.head().step(direction);

        if self.len == 1 {
            let old = std::mem::replace(&mut self.slots[self.head], new_head);
            return old;
        }

        let vacated = self.tail();
        // The slot before the head is either spare or the tail's own slot.
        self.head = self.slot(self.slots.len() - 1);
        self.slots[self.head] = new_head;
        vacated
    }

    /// Appends a segment on top of the current tail.
    pub fn grow(&mut self) {
        self.grow_into(self.tail());
    }

    /// Appends `cell` behind the tail. Fed the cell returned by
    /// [`Body::move_step`], this undoes the tail's last step, so the body
    /// ends up as if it had grown before moving.
    pub fn grow_into(&mut self, cell: Cell) {
        if self.len == self.slots.len() {
            self.slots.rotate_left(self.head);
            self.head = 0;
            let capacity = self.slots.len() * 2;
            self.slots.resize(capacity, cell);
        }

        let idx = self.slot(self.len);
        self.slots[idx] = cell;
        self.len += 1;
    }

    /// Whether any segment behind the head sits on the head's cell.
    pub fn occupies_self(&self) -> bool {
        let head = self.head();
        self.iter().skip(1).any(|cell| cell == head)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.iter().any(|c| c == cell)
    }

    fn slot(&self, offset: usize) -> usize {
        (self.head + offset) % self.slots.len()
    }
}

/// Head-to-tail iterator over a [`Body`]; reversible.
pub struct Cells<'a> {
    body: &'a Body,
    front: usize,
    back: usize,
}

impl Iterator for Cells<'_> {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if self.front == self.back {
            return None;
        }
        let cell = self.body.slots[self.body.slot(self.front)];
        self.front += 1;
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl DoubleEndedIterator for Cells<'_> {
    fn next_back(&mut self) -> Option<Cell> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.body.slots[self.body.slot(self.back)])
    }
}

impl ExactSizeIterator for Cells<'_> {}

impl FusedIterator for Cells<'_> {}

impl<'a> IntoIterator for &'a Body {
    type Item = Cell;
    type IntoIter = Cells<'a>;

    fn into_iter(self) -> Cells<'a> {
        self.iter()
    }
}
