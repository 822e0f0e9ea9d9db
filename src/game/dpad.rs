use super::direction::Direction;
use crate::consts;
use crate::util::EnumExt;
use enum_map::EnumMap;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::Line,
    widgets::{Block, Widget},
};

/// A directional pad drawn beside the board that can be clicked to steer
/// the snake:
///
/// ```text
///      ┌───┐
///      │ ▲ │
///      └───┘
/// ┌───┐     ┌───┐
/// │ ◀ │     │ ▶ │
/// └───┘     └───┘
///      ┌───┐
///      │ ▼ │
///      └───┘
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct DPad;

impl DPad {
    const BUTTON_WIDTH: u16 = 5;
    const BUTTON_HEIGHT: u16 = 3;
    pub(super) const WIDTH: u16 = Self::BUTTON_WIDTH * 3;
    pub(super) const HEIGHT: u16 = Self::BUTTON_HEIGHT * 3;

    /// Return the area of each button when the pad is drawn at the top-left
    /// corner of `area`
    fn buttons(area: Rect) -> EnumMap<Direction, Rect> {
        EnumMap::from_fn(|d| {
            let (col, row) = match d {
                Direction::North => (1, 0),
                Direction::West => (0, 1),
                Direction::East => (2, 1),
                Direction::South => (1, 2),
            };
            Rect::new(
                area.x.saturating_add(col * Self::BUTTON_WIDTH),
                area.y.saturating_add(row * Self::BUTTON_HEIGHT),
                Self::BUTTON_WIDTH,
                Self::BUTTON_HEIGHT,
            )
            .intersection(area)
        })
    }

    /// Return the direction of the button at `pos`, if any
    pub(super) fn button_at(area: Rect, pos: Position) -> Option<Direction> {
        let buttons = DPad::buttons(area);
        Direction::iter().find(|&d| buttons[d].contains(pos))
    }
}

impl Widget for DPad {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (d, button) in DPad::buttons(area) {
            let block = Block::bordered().border_style(consts::DPAD_STYLE);
            let inner = block.inner(button);
            block.render(button, buf);
            Line::styled(d.arrow(), consts::DPAD_STYLE)
                .centered()
                .render(inner, buf);
        }
    }
}
