use super::direction::Direction;
use crate::consts;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// Snake state.
///
/// The body is stored head first; the last element is the tip of the tail.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    pub(super) body: VecDeque<Position>,
}

impl Snake {
    /// Create a snake occupying the cells in [`consts::SNAKE_START`]
    pub(crate) fn new() -> Snake {
        Snake {
            body: VecDeque::from(consts::SNAKE_START),
        }
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Position {
        self.body
            .front()
            .copied()
            .unwrap_or(consts::SNAKE_START[0])
    }

    /// Return the positions of all of the snake's cells, head first
    pub(crate) fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len()
    }

    pub(crate) fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Move the snake's head to `head`.  If `grow` is false, the tail is
    /// shortened by one cell so that the length stays the same.
    pub(crate) fn advance(&mut self, head: Position, grow: bool) {
        self.body.push_front(head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Return the glyph to use for drawing the snake's head
    pub(crate) fn head_symbol(direction: Direction) -> &'static str {
        match direction {
            Direction::North => consts::SNAKE_HEAD_NORTH_SYMBOL,
            Direction::South => consts::SNAKE_HEAD_SOUTH_SYMBOL,
            Direction::East => consts::SNAKE_HEAD_EAST_SYMBOL,
            Direction::West => consts::SNAKE_HEAD_WEST_SYMBOL,
        }
    }
}
