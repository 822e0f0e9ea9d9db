use super::obstacle::{MovingObstacle, Velocity};
use enum_map::Enum;
use ratatui::{layout::Position, style::Color};
use std::fmt;
use std::time::Duration;

/// One of the three levels of the game
#[derive(Clone, Copy, Debug, Enum, Eq, Hash, PartialEq)]
pub(crate) enum Level {
    One,
    Two,
    Three,
}

impl Level {
    pub(crate) fn from_number(n: u8) -> Option<Level> {
        match n {
            1 => Some(Level::One),
            2 => Some(Level::Two),
            3 => Some(Level::Three),
            _ => None,
        }
    }

    pub(crate) fn number(self) -> u8 {
        match self {
            Level::One => 1,
            Level::Two => 2,
            Level::Three => 3,
        }
    }

    /// Return the level after this one, or `None` if this is the last level
    pub(crate) fn next(self) -> Option<Level> {
        self.number().checked_add(1).and_then(Level::from_number)
    }

    pub(crate) fn config(self) -> &'static LevelConfig {
        match self {
            Level::One => &LEVEL_ONE,
            Level::Two => &LEVEL_TWO,
            Level::Three => &LEVEL_THREE,
        }
    }

    /// Whether the snake can crash into static obstacles on this level
    pub(crate) fn has_static_hazards(self) -> bool {
        self.number() >= 2
    }

    /// Whether the snake can crash into moving obstacles on this level
    pub(crate) fn has_moving_hazards(self) -> bool {
        self.number() >= 3
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.config().name)
    }
}

/// Static description of a level
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct LevelConfig {
    pub(crate) name: &'static str,
    pub(crate) description: &'static str,
    pub(crate) color: Color,

    /// Time between ticks at normal speed
    pub(crate) base_interval: Duration,

    /// Points awarded for each pellet eaten
    pub(crate) pellet_value: u32,

    pub(crate) static_obstacles: &'static [Position],

    /// Spawn positions & velocities of the level's moving obstacles
    pub(crate) moving_obstacles: &'static [MovingObstacle],
}

const fn p(x: u16, y: u16) -> Position {
    Position { x, y }
}

static LEVEL_ONE: LevelConfig = LevelConfig {
    name: "Level 1: Meadow",
    description: "Open field, nothing in your way",
    color: Color::LightGreen,
    base_interval: Duration::from_millis(150),
    pellet_value: 10,
    static_obstacles: &[],
    moving_obstacles: &[],
};

static LEVEL_TWO: LevelConfig = LevelConfig {
    name: "Level 2: Ruins",
    description: "Crumbling walls block your path",
    color: Color::LightYellow,
    base_interval: Duration::from_millis(130),
    pellet_value: 20,
    static_obstacles: &[
        p(4, 4),
        p(5, 4),
        p(6, 4),
        p(7, 4),
        p(8, 4),
        p(11, 4),
        p(12, 4),
        p(13, 4),
        p(14, 4),
        p(15, 4),
        p(4, 15),
        p(5, 15),
        p(6, 15),
        p(7, 15),
        p(8, 15),
        p(11, 15),
        p(12, 15),
        p(13, 15),
        p(14, 15),
        p(15, 15),
    ],
    moving_obstacles: &[],
};

static LEVEL_THREE: LevelConfig = LevelConfig {
    name: "Level 3: Gauntlet",
    description: "Walls, pillars & roaming sentries",
    color: Color::LightRed,
    base_interval: Duration::from_millis(110),
    pellet_value: 30,
    static_obstacles: &[
        p(4, 3),
        p(4, 4),
        p(4, 5),
        p(4, 6),
        p(4, 7),
        p(4, 12),
        p(4, 13),
        p(4, 14),
        p(4, 15),
        p(4, 16),
        p(15, 3),
        p(15, 4),
        p(15, 5),
        p(15, 6),
        p(15, 7),
        p(15, 12),
        p(15, 13),
        p(15, 14),
        p(15, 15),
        p(15, 16),
        p(7, 7),
        p(12, 7),
        p(7, 12),
        p(12, 12),
    ],
    moving_obstacles: &[
        MovingObstacle::new(1, 1, Velocity::EAST),
        MovingObstacle::new(18, 18, Velocity::WEST),
        MovingObstacle::new(10, 2, Velocity::SOUTH),
        MovingObstacle::new(17, 14, Velocity::NORTH),
    ],
};
