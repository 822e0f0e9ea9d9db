use crate::consts;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};
use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Single-line text field for entering the player's name
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(super) struct NameInput {
    text: String,
}

impl NameInput {
    const LABEL: &'static str = "Your name: ";
    #[allow(clippy::cast_possible_truncation)]
    const LABEL_WIDTH: u16 = Self::LABEL.len() as u16;

    /// Widest possible name plus room for the cursor
    #[allow(clippy::cast_possible_truncation)]
    const FIELD_WIDTH: u16 = (consts::MAX_NAME_LENGTH as u16) * 2 + 1;

    pub(super) const WIDTH: u16 = Self::LABEL_WIDTH + Self::FIELD_WIDTH;

    /// Two rows: the field itself, and a hint below it
    pub(super) const HEIGHT: u16 = 2;

    /// Create a field pre-filled with `initial`, minus any characters that
    /// couldn't have been typed into it
    pub(super) fn new(initial: &str) -> NameInput {
        let mut input = NameInput::default();
        for ch in initial.chars() {
            input.insert(ch);
        }
        input
    }

    pub(super) fn text(&self) -> &str {
        &self.text
    }

    /// Handle a key press while the field has focus.  Returns `true` if the
    /// key was consumed.
    pub(super) fn handle_key(&mut self, ev: KeyEvent) -> bool {
        match (ev.modifiers.difference(KeyModifiers::SHIFT), ev.code) {
            (KeyModifiers::NONE, KeyCode::Char(ch)) => {
                self.insert(ch);
                true
            }
            (KeyModifiers::NONE, KeyCode::Backspace) => {
                self.delete_back();
                true
            }
            _ => false,
        }
    }

    /// Append `ch` unless it is a control or other invisible character or
    /// the name is already at its maximum length
    fn insert(&mut self, ch: char) {
        if ch.general_category_group() == GeneralCategoryGroup::Other
            || self.text.chars().count() >= consts::MAX_NAME_LENGTH
        {
            return;
        }
        self.text.push(ch);
    }

    /// Remove the last grapheme cluster
    fn delete_back(&mut self) {
        if let Some((i, _)) = self.text.grapheme_indices(true).next_back() {
            self.text.truncate(i);
        }
    }

    pub(super) fn render(&self, area: Rect, buf: &mut Buffer, focused: bool) {
        let label_style = if focused {
            consts::MENU_SELECTION_STYLE
        } else {
            Style::new()
        };
        let mut field = Line::from(Span::styled(Self::LABEL, label_style));
        if self.text.is_empty() && !focused {
            field.push_span(Span::styled(
                "Leave blank to play anonymously",
                consts::DIM_STYLE,
            ));
        } else {
            field.push_span(self.text.as_str());
        }
        let [field_area, hint_area] = Layout::vertical([1, 1]).flex(Flex::Start).areas(area);
        field.render(field_area, buf);
        if focused {
            let width = u16::try_from(self.text.width()).unwrap_or(u16::MAX);
            let x = field_area
                .x
                .saturating_add(Self::LABEL_WIDTH)
                .saturating_add(width);
            let cursor = Position::new(x, field_area.y);
            if field_area.contains(cursor) {
                if let Some(cell) = buf.cell_mut(cursor) {
                    cell.set_style(Style::new().add_modifier(Modifier::REVERSED));
                }
            }
        }
        if self.text.trim().is_empty() {
            Line::styled("Scores won't be saved without a name", consts::DIM_STYLE)
                .render(hint_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn type_str(input: &mut NameInput, s: &str) {
        for ch in s.chars() {
            let ev = if ch.is_uppercase() {
                KeyEvent::new(KeyCode::Char(ch), KeyModifiers::SHIFT)
            } else {
                KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)
            };
            assert!(input.handle_key(ev));
        }
    }

    fn backspace(input: &mut NameInput) {
        assert!(input.handle_key(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE)));
    }

    #[test]
    fn typing() {
        let mut input = NameInput::default();
        type_str(&mut input, "Ada L");
        assert_eq!(input.text(), "Ada L");
        backspace(&mut input);
        backspace(&mut input);
        assert_eq!(input.text(), "Ada");
    }

    #[test]
    fn backspace_removes_grapheme() {
        let mut input = NameInput::default();
        type_str(&mut input, "Zoe\u{0301}");
        assert_eq!(input.text(), "Zoe\u{0301}");
        backspace(&mut input);
        assert_eq!(input.text(), "Zo");
    }

    #[test]
    fn backspace_on_empty() {
        let mut input = NameInput::default();
        backspace(&mut input);
        assert_eq!(input.text(), "");
    }

    #[rstest]
    #[case('\u{7}')]
    #[case('\t')]
    #[case('\u{200B}')]
    #[case('\u{E000}')]
    fn rejects_invisible(#[case] ch: char) {
        let mut input = NameInput::default();
        assert!(input.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)));
        assert_eq!(input.text(), "");
    }

    #[test]
    fn length_limit() {
        let mut input = NameInput::default();
        type_str(&mut input, "abcdefghijklmnopqrstuvwxyz");
        assert_eq!(input.text(), "abcdefghijklmnopqrst");
    }

    #[test]
    fn prefill_is_filtered() {
        let input = NameInput::new("bob\u{1b}by tables and a very long surname");
        assert_eq!(input.text(), "bobby tables and a v");
    }

    #[test]
    fn control_keys_are_not_consumed() {
        let mut input = NameInput::default();
        assert!(!input.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!input.handle_key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)));
        assert!(!input.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
    }

    #[test]
    fn render_focused() {
        let mut input = NameInput::default();
        type_str(&mut input, "ada");
        let area = Rect::new(0, 0, NameInput::WIDTH, NameInput::HEIGHT);
        let mut buffer = Buffer::empty(area);
        input.render(area, &mut buffer, true);
        let mut expected = Buffer::with_lines([
            format!("{:width$}", "Your name: ada", width = usize::from(NameInput::WIDTH)),
            " ".repeat(usize::from(NameInput::WIDTH)),
        ]);
        expected.set_style(Rect::new(0, 0, 11, 1), consts::MENU_SELECTION_STYLE);
        expected.set_style(
            Rect::new(14, 0, 1, 1),
            Style::new().add_modifier(Modifier::REVERSED),
        );
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn render_empty_unfocused() {
        let input = NameInput::default();
        let area = Rect::new(0, 0, NameInput::WIDTH, NameInput::HEIGHT);
        let mut buffer = Buffer::empty(area);
        input.render(area, &mut buffer, false);
        let mut expected = Buffer::with_lines([
            format!(
                "{:width$}",
                "Your name: Leave blank to play anonymously",
                width = usize::from(NameInput::WIDTH)
            ),
            format!(
                "{:width$}",
                "Scores won't be saved without a name",
                width = usize::from(NameInput::WIDTH)
            ),
        ]);
        expected.set_style(Rect::new(11, 0, 31, 1), consts::DIM_STYLE);
        expected.set_style(Rect::new(0, 1, NameInput::WIDTH, 1), consts::DIM_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }
}
