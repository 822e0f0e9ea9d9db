//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::{Position, Size},
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Width and height of the (square) playing field, in cells
pub(crate) const GRID_SIZE: u16 = 20;

/// Number of pellets that must be eaten on a level in order to advance to
/// the next one
pub(crate) const PELLETS_TO_ADVANCE: u32 = 15;

/// Cells occupied by the snake at the start of each level, head first.  The
/// snake starts out facing east.
pub(crate) const SNAKE_START: [Position; 3] = [
    Position { x: 10, y: 10 },
    Position { x: 9, y: 10 },
    Position { x: 8, y: 10 },
];

/// Moving obstacles advance once every this many ticks
pub(crate) const OBSTACLE_MOVE_PERIOD: u64 = 3;

/// How many random cells to try when placing food before giving up and
/// accepting an occupied cell
pub(crate) const FOOD_PLACEMENT_ATTEMPTS: usize = 1000;

/// Maximum number of entries kept in the high-score table
pub(crate) const MAX_HIGH_SCORES: usize = 5;

/// Maximum length of a player name, in characters
pub(crate) const MAX_NAME_LENGTH: usize = 20;

/// How long the "level complete" screen is shown before the next level
/// starts on its own
pub(crate) const TRANSITION_DELAY: Duration = Duration::from_secs(2);

/// Minimum mouse-drag displacement, in terminal cells, for a drag to count
/// as a swipe
pub(crate) const SWIPE_THRESHOLD: u16 = 3;

/// Number of terminal columns used to draw a single grid cell
pub(crate) const CELL_WIDTH: u16 = 2;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Glyph for the snake's head when it is moving north/up
pub(crate) const SNAKE_HEAD_NORTH_SYMBOL: &str = "▲▲";

/// Glyph for the snake's head when it is moving south/down
pub(crate) const SNAKE_HEAD_SOUTH_SYMBOL: &str = "▼▼";

/// Glyph for the snake's head when it is moving east/right
pub(crate) const SNAKE_HEAD_EAST_SYMBOL: &str = "▶▶";

/// Glyph for the snake's head when it is moving west/left
pub(crate) const SNAKE_HEAD_WEST_SYMBOL: &str = "◀◀";

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: &str = "▓▓";

/// Glyph for food pellets
pub(crate) const FOOD_SYMBOL: &str = "()";

/// Glyph for static obstacles
pub(crate) const STATIC_OBSTACLE_SYMBOL: &str = "██";

/// Glyph for moving obstacles
pub(crate) const MOVING_OBSTACLE_SYMBOL: &str = "<>";

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for food pellets
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for static obstacles
pub(crate) const STATIC_OBSTACLE_STYLE: Style = Style::new().fg(Color::Gray);

/// Style for moving obstacles
pub(crate) const MOVING_OBSTACLE_STYLE: Style = Style::new()
    .fg(Color::LightMagenta)
    .add_modifier(Modifier::BOLD);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the status bar at the top of the game screen
pub(crate) const HUD_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Style for hints & placeholder text
pub(crate) const DIM_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Style for the leaderboard row belonging to the current run
pub(crate) const HIGHLIGHT_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

/// Style for the directional-pad buttons
pub(crate) const DPAD_STYLE: Style = Style::new().fg(Color::Cyan);
