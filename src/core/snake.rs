//! Snake module - the snake body and its movement primitives
//!
//! The body is an ordered sequence of cells, head first. Movement prepends a
//! new head; a normal step also pops the tail, while eating keeps it (net
//! growth of one segment). Segments are unique while the snake is alive.

use std::collections::VecDeque;

use crate::types::{GridSize, Heading, Position, INITIAL_SNAKE_LEN};

/// The snake: body cells (head first) plus current heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Position>,
    heading: Heading,
}

impl Snake {
    /// Spawn a snake of [`INITIAL_SNAKE_LEN`] centered on the grid,
    /// heading right, body trailing off to the left.
    pub fn spawn(grid: GridSize) -> Self {
        let head = grid.center();
        let mut body = VecDeque::with_capacity(INITIAL_SNAKE_LEN * 2);
        for i in 0..INITIAL_SNAKE_LEN as i16 {
            body.push_back(Position::new(head.x - i, head.y));
        }
        Self {
            body,
            heading: Heading::Right,
        }
    }

    pub fn head(&self) -> Position {
        // Body length >= 1 is a structural invariant.
        *self.body.front().expect("snake body is never empty")
    }

    pub fn tail(&self) -> Position {
        *self.body.back().expect("snake body is never empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn set_heading(&mut self, heading: Heading) {
        self.heading = heading;
    }

    /// Iterate body cells, head first
    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// Does any segment occupy `pos`?
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.iter().any(|&seg| seg == pos)
    }

    /// The cell the head would move into on the next step
    pub fn next_head(&self) -> Position {
        self.head().step(self.heading)
    }

    /// Move forward one cell. When `grow` is set the tail is kept, so the
    /// body gains one segment; otherwise length is unchanged.
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }

    /// Build a snake from explicit segments (head first).
    ///
    /// Panics on an empty slice; a snake always has a head.
    pub fn from_segments(segments: &[Position], heading: Heading) -> Self {
        assert!(!segments.is_empty(), "snake needs at least a head");
        Self {
            body: segments.iter().copied().collect(),
            heading,
        }
    }
}
