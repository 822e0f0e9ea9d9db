use crate::consts;
use crate::game::Level;
use crate::util::EnumExt;
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Logo;

impl Logo {
    pub(super) const HEIGHT: u16 = 3;
    pub(super) const WIDTH: u16 = 23;
}

impl Widget for Logo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [title_area, diagram_area] = Layout::vertical([1, 1])
            .flex(Flex::Start)
            .spacing(1)
            .areas(area);
        Line::from_iter([
            Span::styled("H A Z A R D", consts::MOVING_OBSTACLE_STYLE),
            Span::raw("   "),
            Span::styled("S N A K E", consts::SNAKE_STYLE),
        ])
        .centered()
        .render(title_area, buf);
        Line::from_iter([
            Span::styled(consts::SNAKE_BODY_SYMBOL.repeat(4), consts::SNAKE_STYLE),
            Span::styled(consts::SNAKE_HEAD_EAST_SYMBOL, consts::SNAKE_STYLE),
            Span::raw("  "),
            Span::styled(consts::FOOD_SYMBOL, consts::FOOD_STYLE),
            Span::raw("  "),
            Span::styled(consts::STATIC_OBSTACLE_SYMBOL, consts::STATIC_OBSTACLE_STYLE),
        ])
        .centered()
        .render(diagram_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Instructions;

impl Instructions {
    pub(super) const HEIGHT: u16 = 2;
    pub(super) const WIDTH: u16 = 39;
}

impl Widget for Instructions {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from_iter([
            Line::from_iter([
                Span::raw("Move: "),
                Span::styled("←", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("↓", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("↑", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("→", consts::KEY_STYLE),
                Span::raw("  or  "),
                Span::styled("h", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("j", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("k", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("l", consts::KEY_STYLE),
                Span::raw("  or  "),
                Span::styled("a", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("s", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("w", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("d", consts::KEY_STYLE),
            ]),
            Line::from_iter([
                Span::raw("Pause: "),
                Span::styled("Esc", consts::KEY_STYLE),
                Span::raw("   Mouse: swipe or D-pad"),
            ]),
        ]);
        debug_assert_eq!(
            text.height(),
            usize::from(Self::HEIGHT),
            "Instructions::HEIGHT is wrong"
        );
        debug_assert_eq!(
            text.width(),
            usize::from(Self::WIDTH),
            "Instructions::WIDTH is wrong"
        );
        text.render(area, buf);
    }
}

/// Bordered list of the levels with a short description of each
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct LevelList;

impl LevelList {
    const NAME_WIDTH: u16 = 17;
    const GUTTER: u16 = 2;
    const DESCRIPTION_WIDTH: u16 = 33;
    const HORIZONTAL_PADDING: u16 = 1;
    #[allow(clippy::cast_possible_truncation)]
    pub(super) const HEIGHT: u16 = (Level::LENGTH as u16) + 2 /* for border */;
    pub(super) const WIDTH: u16 = 2 /* for border */ + 2 * Self::HORIZONTAL_PADDING + Self::NAME_WIDTH + Self::GUTTER + Self::DESCRIPTION_WIDTH;
}

impl Widget for LevelList {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Levels: ")
            .padding(Padding::horizontal(Self::HORIZONTAL_PADDING));
        let list_area = block.inner(area);
        block.render(area, buf);
        for (level, row) in Level::iter().zip(list_area.rows()) {
            let cfg = level.config();
            Line::from_iter([
                Span::styled(
                    format!(
                        "{:width$}",
                        cfg.name,
                        width = usize::from(Self::NAME_WIDTH + Self::GUTTER)
                    ),
                    consts::SNAKE_STYLE.fg(cfg.color),
                ),
                Span::raw(cfg.description),
            ])
            .render(row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_logo() {
        let area = Rect::new(0, 0, Logo::WIDTH, Logo::HEIGHT);
        let mut buffer = Buffer::empty(area);
        Logo.render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "H A Z A R D   S N A K E",
            "",
            "  ▓▓▓▓▓▓▓▓▶▶  ()  ██   ",
        ]);
        expected.set_style(Rect::new(0, 0, 11, 1), consts::MOVING_OBSTACLE_STYLE);
        expected.set_style(Rect::new(14, 0, 9, 1), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(2, 2, 10, 1), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(14, 2, 2, 1), consts::FOOD_STYLE);
        expected.set_style(Rect::new(18, 2, 2, 1), consts::STATIC_OBSTACLE_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn render_instructions() {
        let area = Rect::new(0, 0, Instructions::WIDTH, Instructions::HEIGHT);
        let mut buffer = Buffer::empty(area);
        Instructions.render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "Move: ← ↓ ↑ →  or  h j k l  or  a s w d",
            "Pause: Esc   Mouse: swipe or D-pad",
        ]);
        for x in [6, 8, 10, 12, 19, 21, 23, 25, 32, 34, 36, 38] {
            expected.set_style(Rect::new(x, 0, 1, 1), consts::KEY_STYLE);
        }
        expected.set_style(Rect::new(7, 1, 3, 1), consts::KEY_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn level_list_has_a_row_per_level() {
        assert_eq!(usize::from(LevelList::HEIGHT), Level::iter().count() + 2);
    }

    #[test]
    fn level_list_fits_levels() {
        for level in Level::iter() {
            let cfg = level.config();
            assert!(cfg.name.chars().count() <= usize::from(LevelList::NAME_WIDTH));
            assert!(
                cfg.description.chars().count() <= usize::from(LevelList::DESCRIPTION_WIDTH)
            );
        }
    }

    #[test]
    fn render_level_list() {
        let area = Rect::new(0, 0, LevelList::WIDTH, LevelList::HEIGHT);
        let mut buffer = Buffer::empty(area);
        LevelList.render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "┌ Levels: ─────────────────────────────────────────────┐",
            "│ Level 1: Meadow    Open field, nothing in your way   │",
            "│ Level 2: Ruins     Crumbling walls block your path   │",
            "│ Level 3: Gauntlet  Walls, pillars & roaming sentries │",
            "└──────────────────────────────────────────────────────┘",
        ]);
        for (level, y) in Level::iter().zip(1..) {
            expected.set_style(
                Rect::new(2, y, 19, 1),
                consts::SNAKE_STYLE.fg(level.config().color),
            );
        }
        pretty_assertions::assert_eq!(buffer, expected);
    }
}
