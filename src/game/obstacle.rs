use ratatui::layout::Position;
use std::cmp::Ordering;

/// An obstacle on the playing field, as seen by collision checks & the
/// renderer
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Obstacle {
    /// An obstacle that stays put for the whole level
    Static(Position),

    /// An obstacle that patrols the field, bouncing off walls & static
    /// obstacles
    Moving(MovingObstacle),
}

impl Obstacle {
    pub(crate) fn position(&self) -> Position {
        match self {
            Obstacle::Static(pos) => *pos,
            Obstacle::Moving(mo) => mo.pos,
        }
    }
}

/// An obstacle that moves one cell along one axis each time it steps
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MovingObstacle {
    pub(crate) pos: Position,
    pub(crate) velocity: Velocity,
}

impl MovingObstacle {
    pub(crate) const fn new(x: u16, y: u16, velocity: Velocity) -> MovingObstacle {
        MovingObstacle {
            pos: Position { x, y },
            velocity,
        }
    }

    /// Advance the obstacle by its velocity on a square grid of side `size`.
    ///
    /// If the next cell lies outside the grid on an axis, the velocity on
    /// that axis is reversed.  If the next cell holds a static obstacle, the
    /// velocity is reversed on every non-zero axis.  In either case the
    /// obstacle stays where it is for this step.
    pub(crate) fn step(&mut self, statics: &[Position], size: u16) {
        let nx = shift(self.pos.x, self.velocity.dx, size);
        let ny = shift(self.pos.y, self.velocity.dy, size);
        let wall_x = nx.is_none();
        let wall_y = ny.is_none();
        let next = nx.zip(ny).map(|(x, y)| Position { x, y });
        let hit_static = next.is_some_and(|p| statics.contains(&p));
        match next {
            Some(p) if !hit_static => self.pos = p,
            _ => {
                if wall_x || (hit_static && self.velocity.dx != 0) {
                    self.velocity.dx = -self.velocity.dx;
                }
                if wall_y || (hit_static && self.velocity.dy != 0) {
                    self.velocity.dy = -self.velocity.dy;
                }
            }
        }
    }
}

/// Per-step displacement of a [`MovingObstacle`].  Each component is -1, 0,
/// or 1, and exactly one of them is non-zero.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Velocity {
    pub(crate) dx: i8,
    pub(crate) dy: i8,
}

impl Velocity {
    pub(crate) const EAST: Velocity = Velocity { dx: 1, dy: 0 };
    pub(crate) const WEST: Velocity = Velocity { dx: -1, dy: 0 };
    pub(crate) const SOUTH: Velocity = Velocity { dx: 0, dy: 1 };
    pub(crate) const NORTH: Velocity = Velocity { dx: 0, dy: -1 };
}

/// Offset `v` by the sign of `d`, returning `None` if the result falls
/// outside `0..size`
fn shift(v: u16, d: i8, size: u16) -> Option<u16> {
    match d.cmp(&0) {
        Ordering::Less => v.checked_sub(1),
        Ordering::Equal => Some(v),
        Ordering::Greater => v.checked_add(1).filter(|&v2| v2 < size),
    }
}
