mod name;
mod widgets;
use self::name::NameInput;
use self::widgets::{Instructions, LevelList, Logo};
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::options::Speed;
use crate::run::Run;
use crate::util::{get_display_area, EnumExt, Globals};
use crossterm::event::{read, Event};
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Widget,
    Frame,
};

/// The title screen, where the player enters a name & picks a speed before
/// starting a run at level 1
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MainMenu {
    selection: Selection,
    name: NameInput,
    speed: Speed,
    globals: Globals,
}

impl MainMenu {
    pub(crate) fn new(globals: Globals) -> Self {
        let name = NameInput::new(
            globals
                .config
                .game
                .player_name
                .as_deref()
                .unwrap_or_default(),
        );
        MainMenu {
            selection: Selection::default(),
            name,
            speed: globals.config.game.speed,
            globals,
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?))
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        let ev = event.as_key_press_event()?;
        if self.selection == Selection::Name && self.name.handle_key(ev) {
            return None;
        }
        match (self.selection, Command::from_key_event(ev)?) {
            (_, Command::Quit) => return Some(Screen::Quit),
            (_, Command::Home) => self.selection = Selection::min(),
            (_, Command::End) => self.selection = Selection::max(),
            (_, Command::Up) => {
                if let Some(sel) = self.selection.prev() {
                    self.selection = sel;
                }
            }
            (_, Command::Down) => {
                if let Some(sel) = self.selection.next() {
                    self.selection = sel;
                }
            }
            (_, Command::Next) => {
                self.selection = self.selection.next().unwrap_or_else(Selection::min);
            }
            (_, Command::Prev) => {
                self.selection = self.selection.prev().unwrap_or_else(Selection::max);
            }
            (Selection::Name, Command::Enter) => self.selection = Selection::Play,
            (Selection::Speed, Command::Left) => self.speed.decrease(),
            (Selection::Speed, Command::Right) => self.speed.increase(),
            (Selection::Speed | Selection::Play, Command::Enter) | (_, Command::P) => {
                return Some(self.play());
            }
            (Selection::Quit, Command::Enter) | (_, Command::Q) => return Some(Screen::Quit),
            _ => (),
        }
        None
    }

    /// Start a new run at level 1.  The chosen name & speed become the
    /// defaults the next time the menu is shown.
    fn play(&mut self) -> Screen {
        let run = Run::new(self.name.text(), self.speed);
        log::info!(
            "Starting new run for {:?} at {} speed",
            run.player(),
            self.speed
        );
        self.globals.config.game.player_name =
            (!run.is_anonymous()).then(|| run.player().to_owned());
        self.globals.config.game.speed = self.speed;
        Screen::game(run, self.globals.clone())
    }

    fn render_speed(&self, area: Rect, buf: &mut Buffer) {
        let style = if self.selection == Selection::Speed {
            consts::MENU_SELECTION_STYLE
        } else {
            Style::new()
        };
        Line::from_iter([
            Span::styled("Speed:", style),
            Span::raw("     "),
            Span::raw(self.speed.to_selector()),
            Span::raw("  "),
            Span::styled(self.speed.description(), consts::DIM_STYLE),
        ])
        .render(area, buf);
    }
}

impl Widget for &MainMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [logo_area, instructions_area, levels_area, name_area, speed_area, play_area, quit_area] =
            Layout::vertical([
                Logo::HEIGHT,
                Instructions::HEIGHT,
                LevelList::HEIGHT,
                NameInput::HEIGHT,
                1,
                1,
                1,
            ])
            .flex(Flex::Start)
            .spacing(1)
            .areas(display);

        let [logo_area] = Layout::horizontal([Logo::WIDTH])
            .flex(Flex::Center)
            .areas(logo_area);
        Logo.render(logo_area, buf);

        let [instructions_area] = Layout::horizontal([Instructions::WIDTH])
            .flex(Flex::Center)
            .areas(instructions_area);
        Instructions.render(instructions_area, buf);

        let [levels_area] = Layout::horizontal([LevelList::WIDTH])
            .flex(Flex::Center)
            .areas(levels_area);
        LevelList.render(levels_area, buf);

        // The name & speed rows share a left edge so that their labels line
        // up.
        let [name_area] = Layout::horizontal([NameInput::WIDTH])
            .flex(Flex::Center)
            .areas(name_area);
        self.name
            .render(name_area, buf, self.selection == Selection::Name);
        let [speed_area] = Layout::horizontal([NameInput::WIDTH])
            .flex(Flex::Center)
            .areas(speed_area);
        self.render_speed(speed_area, buf);

        let play_style = if self.selection == Selection::Play {
            consts::MENU_SELECTION_STYLE
        } else {
            Style::new()
        };
        Line::from_iter([
            Span::styled("[Play (", play_style),
            Span::styled("p", consts::KEY_STYLE.patch(play_style)),
            Span::styled(")]", play_style),
        ])
        .centered()
        .render(play_area, buf);

        let qstyle = if self.selection == Selection::Quit {
            consts::MENU_SELECTION_STYLE
        } else {
            Style::new()
        };
        Line::from_iter([
            Span::styled("[Quit (", qstyle),
            Span::styled("q", consts::KEY_STYLE.patch(qstyle)),
            Span::styled(")]", qstyle),
        ])
        .centered()
        .render(quit_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Default, Enum, Eq, PartialEq)]
enum Selection {
    #[default]
    Name,
    Speed,
    Play,
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, GameConfig};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;

    fn press(menu: &mut MainMenu, code: KeyCode) -> Option<Screen> {
        menu.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn type_str(menu: &mut MainMenu, s: &str) {
        for ch in s.chars() {
            assert!(press(menu, KeyCode::Char(ch)).is_none());
        }
    }

    /// Render the menu on an 80x24 screen and return each row with
    /// surrounding whitespace trimmed
    fn rows(menu: &MainMenu) -> Vec<String> {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        menu.render(area, &mut buffer);
        (0..24u16)
            .map(|y| {
                (0..80u16)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
                    .trim()
                    .to_owned()
            })
            .collect()
    }

    fn row(menu: &MainMenu, y: usize) -> String {
        rows(menu).swap_remove(y)
    }

    #[test]
    fn draw_initial() {
        let menu = MainMenu::new(Globals::default());
        assert_eq!(
            rows(&menu),
            [
                "H A Z A R D   S N A K E",
                "",
                "▓▓▓▓▓▓▓▓▶▶  ()  ██",
                "",
                "Move: ← ↓ ↑ →  or  h j k l  or  a s w d",
                "Pause: Esc   Mouse: swipe or D-pad",
                "",
                "┌ Levels: ─────────────────────────────────────────────┐",
                "│ Level 1: Meadow    Open field, nothing in your way   │",
                "│ Level 2: Ruins     Crumbling walls block your path   │",
                "│ Level 3: Gauntlet  Walls, pillars & roaming sentries │",
                "└──────────────────────────────────────────────────────┘",
                "",
                "Your name:",
                "Scores won't be saved without a name",
                "",
                "Speed:     ◀ Normal ▶  Default speed",
                "",
                "[Play (p)]",
                "",
                "[Quit (q)]",
                "",
                "",
                "",
            ]
        );
    }

    #[test]
    fn draw_unfocused_placeholder() {
        let mut menu = MainMenu::new(Globals::default());
        assert!(press(&mut menu, KeyCode::Down).is_none());
        assert_eq!(row(&menu, 13), "Your name: Leave blank to play anonymously");
        assert_eq!(row(&menu, 16), "Speed:     ◀ Normal ▶  Default speed");
    }

    #[test]
    fn type_name_and_play() {
        let mut menu = MainMenu::new(Globals::default());
        type_str(&mut menu, "  quill ");
        assert_eq!(menu.name.text(), "  quill ");
        assert_eq!(row(&menu, 14), "");
        assert!(press(&mut menu, KeyCode::Enter).is_none());
        assert_eq!(menu.selection, Selection::Play);
        assert!(matches!(
            press(&mut menu, KeyCode::Enter),
            Some(Screen::Game(_))
        ));
        assert_eq!(
            menu.globals.config.game.player_name.as_deref(),
            Some("quill")
        );
    }

    #[test]
    fn letters_go_to_name_field() {
        let mut menu = MainMenu::new(Globals::default());
        type_str(&mut menu, "pq");
        assert_eq!(menu.name.text(), "pq");
        assert_eq!(menu.selection, Selection::Name);
    }

    #[test]
    fn adjust_speed() {
        let mut menu = MainMenu::new(Globals::default());
        assert!(press(&mut menu, KeyCode::Down).is_none());
        assert_eq!(menu.selection, Selection::Speed);
        assert!(press(&mut menu, KeyCode::Right).is_none());
        assert_eq!(menu.speed, Speed::Fast);
        assert!(press(&mut menu, KeyCode::Right).is_none());
        assert_eq!(menu.speed, Speed::Fast);
        assert_eq!(row(&menu, 16), "Speed:     ◀  Fast  ▷  Challenge mode");
        assert!(press(&mut menu, KeyCode::Char('a')).is_none());
        assert!(press(&mut menu, KeyCode::Left).is_none());
        assert_eq!(menu.speed, Speed::Slow);
        assert!(matches!(
            press(&mut menu, KeyCode::Char('p')),
            Some(Screen::Game(_))
        ));
        assert_eq!(menu.globals.config.game.player_name, None);
        assert_eq!(menu.globals.config.game.speed, Speed::Slow);
    }

    #[test]
    fn navigation() {
        let mut menu = MainMenu::new(Globals::default());
        assert!(press(&mut menu, KeyCode::Up).is_none());
        assert_eq!(menu.selection, Selection::Name);
        assert!(press(&mut menu, KeyCode::End).is_none());
        assert_eq!(menu.selection, Selection::Quit);
        assert!(press(&mut menu, KeyCode::Down).is_none());
        assert_eq!(menu.selection, Selection::Quit);
        assert!(press(&mut menu, KeyCode::Tab).is_none());
        assert_eq!(menu.selection, Selection::Name);
        assert!(press(&mut menu, KeyCode::BackTab).is_none());
        assert_eq!(menu.selection, Selection::Quit);
        assert!(press(&mut menu, KeyCode::Char('k')).is_none());
        assert_eq!(menu.selection, Selection::Play);
        assert!(press(&mut menu, KeyCode::Home).is_none());
        assert_eq!(menu.selection, Selection::Name);
    }

    #[test]
    fn quit() {
        let mut menu = MainMenu::new(Globals::default());
        assert!(press(&mut menu, KeyCode::End).is_none());
        assert!(matches!(
            press(&mut menu, KeyCode::Enter),
            Some(Screen::Quit)
        ));
        let mut menu = MainMenu::new(Globals::default());
        assert!(press(&mut menu, KeyCode::Down).is_none());
        assert!(matches!(
            press(&mut menu, KeyCode::Char('q')),
            Some(Screen::Quit)
        ));
        let mut menu = MainMenu::new(Globals::default());
        assert!(matches!(
            menu.handle_event(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL
            ))),
            Some(Screen::Quit)
        ));
    }

    #[test]
    fn defaults_from_config() {
        let globals = Globals::new(Config {
            game: GameConfig {
                speed: Speed::Slow,
                player_name: Some(String::from("ada")),
            },
            ..Config::default()
        });
        let menu = MainMenu::new(globals);
        assert_eq!(menu.name.text(), "ada");
        assert_eq!(menu.speed, Speed::Slow);
        assert_eq!(row(&menu, 13), "Your name: ada");
    }
}
