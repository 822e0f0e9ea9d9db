use enum_map::Enum;
use ratatui::layout::Position;

/// One of the four unit steps the snake can take
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Move `pos` one cell in this direction on a square grid of side
    /// `size`, wrapping around to the opposite edge when stepping off the
    /// grid.
    pub(crate) fn advance(self, pos: Position, size: u16) -> Position {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::North => y = wrapping_dec(y, size),
            Direction::East => x = wrapping_inc(x, size),
            Direction::South => y = wrapping_inc(y, size),
            Direction::West => x = wrapping_dec(x, size),
        }
        Position { x, y }
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Arrow glyph pointing this way
    pub(crate) fn arrow(self) -> &'static str {
        match self {
            Direction::North => "▲",
            Direction::East => "▶",
            Direction::South => "▼",
            Direction::West => "◀",
        }
    }

    /// Classify a pointer displacement as a swipe.  Returns `None` if the
    /// displacement is shorter than `threshold` along both axes; otherwise
    /// the axis with the larger magnitude wins, with ties going to the
    /// vertical axis.
    pub(crate) fn from_swipe(dx: i32, dy: i32, threshold: u16) -> Option<Direction> {
        if dx.abs().max(dy.abs()) < i32::from(threshold) {
            None
        } else if dx.abs() > dy.abs() {
            Some(if dx > 0 {
                Direction::East
            } else {
                Direction::West
            })
        } else if dy > 0 {
            Some(Direction::South)
        } else {
            Some(Direction::North)
        }
    }
}

fn wrapping_dec(v: u16, size: u16) -> u16 {
    v.checked_sub(1).unwrap_or_else(|| size.saturating_sub(1))
}

fn wrapping_inc(v: u16, size: u16) -> u16 {
    v.checked_add(1).filter(|&v2| v2 < size).unwrap_or(0)
}
