//! Screens shown when a level ends
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::game::Level;
use crate::highscores::Leaderboard;
use crate::menu::MainMenu;
use crate::run::Run;
use crate::util::{center_rect, get_display_area, Globals};
use crossterm::event::{poll, read, Event};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect, Size},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
    Frame,
};
use std::io;
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

/// Shown after a level other than the last is cleared.  Moves on to the
/// next level by itself after [`TRANSITION_DELAY`][consts::TRANSITION_DELAY].
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct LevelTransition {
    cleared: Level,

    /// The run, already advanced to the next level
    run: Run,

    globals: Globals,
    deadline: Option<Instant>,
}

impl LevelTransition {
    pub(crate) fn new(cleared: Level, run: Run, globals: Globals) -> LevelTransition {
        LevelTransition {
            cleared,
            run,
            globals,
            deadline: None,
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> io::Result<Option<Screen>> {
        let deadline = *self
            .deadline
            .get_or_insert_with(|| Instant::now() + consts::TRANSITION_DELAY);
        let wait = deadline.saturating_duration_since(Instant::now());
        if wait.is_zero() || !poll(wait)? {
            Ok(Some(self.next_level()))
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    fn handle_event(&self, event: Event) -> Option<Screen> {
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Enter | Command::Space => Some(self.next_level()),
            Command::Quit | Command::Q => Some(Screen::Quit),
            _ => None,
        }
    }

    fn next_level(&self) -> Screen {
        Screen::game(self.run.clone(), self.globals.clone())
    }
}

impl Widget for &LevelTransition {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let next = self.run.level().config();
        let text = Text::from_iter([
            Line::styled(
                format!("Level {} Complete!", self.cleared.number()),
                Style::new()
                    .fg(self.cleared.config().color)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::default(),
            Line::from("Well done!"),
            Line::from(format!("Score so far: {}", self.run.total_score())),
            Line::from_iter([
                Span::raw("Get ready for "),
                Span::styled(next.name, Style::new().fg(next.color)),
                Span::raw("..."),
            ]),
            Line::default(),
            Line::from_iter([
                Span::styled("Enter", consts::KEY_STYLE),
                Span::raw(" to start now"),
            ]),
        ])
        .centered();
        let height = u16::try_from(text.height()).unwrap_or(u16::MAX);
        let text_area = center_rect(
            get_display_area(area),
            Size {
                width: consts::DISPLAY_SIZE.width,
                height,
            },
        );
        text.render(text_area, buf);
    }
}

/// Shown when the snake crashes
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GameOverScreen {
    run: Run,

    /// Whether the run's score made it onto the leaderboard
    saved: bool,

    leaderboard: Leaderboard,
    globals: Globals,
}

impl GameOverScreen {
    pub(crate) fn new(run: Run, saved: bool, globals: Globals) -> GameOverScreen {
        let leaderboard = globals.scores.load();
        GameOverScreen {
            run,
            saved,
            leaderboard,
            globals,
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&self) -> io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?))
    }

    fn handle_event(&self, event: Event) -> Option<Screen> {
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::R | Command::Enter => Some(self.retry()),
            Command::M => Some(Screen::Main(MainMenu::new(self.globals.clone()))),
            Command::Q | Command::Quit => Some(Screen::Quit),
            _ => None,
        }
    }

    /// Play the level that was lost again, taking back the points scored on
    /// the failed attempt
    fn retry(&self) -> Screen {
        let mut run = self.run.clone();
        run.retry();
        Screen::game(run, self.globals.clone())
    }
}

impl Widget for &GameOverScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let cfg = self.run.level().config();
        let [title_area, level_area, score_area, board_area, keys_area] =
            Layout::vertical([1, 1, 1, LeaderboardView::HEIGHT, 1])
                .flex(Flex::Center)
                .spacing(1)
                .areas(display);
        Line::styled(
            "GAME OVER",
            Style::new().fg(Color::LightRed).add_modifier(Modifier::BOLD),
        )
        .centered()
        .render(title_area, buf);
        let mut died = Line::from_iter([
            Span::raw("Died on "),
            Span::styled(cfg.name, Style::new().fg(cfg.color)),
        ]);
        if !self.run.is_anonymous() {
            died.push_span(" · ");
            died.push_span(Span::styled(self.run.player(), consts::HIGHLIGHT_STYLE));
        }
        died.centered().render(level_area, buf);
        score_line("Score this run: ", self.run.total_score(), self.saved).render(score_area, buf);
        LeaderboardView::new(&self.leaderboard, &self.run).render_centered(board_area, buf);
        Line::from_iter([
            Span::raw(format!("Retry {} (", cfg.name)),
            Span::styled("r", consts::KEY_STYLE),
            Span::raw(") — Main Menu ("),
            Span::styled("m", consts::KEY_STYLE),
            Span::raw(") — Quit ("),
            Span::styled("q", consts::KEY_STYLE),
            Span::raw(")"),
        ])
        .centered()
        .render(keys_area, buf);
    }
}

/// Shown when the last level is cleared
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct WinnerScreen {
    run: Run,
    saved: bool,
    leaderboard: Leaderboard,
    globals: Globals,
}

impl WinnerScreen {
    pub(crate) fn new(run: Run, saved: bool, globals: Globals) -> WinnerScreen {
        let leaderboard = globals.scores.load();
        WinnerScreen {
            run,
            saved,
            leaderboard,
            globals,
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&self) -> io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?))
    }

    fn handle_event(&self, event: Event) -> Option<Screen> {
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::P | Command::Enter => {
                Some(Screen::Main(MainMenu::new(self.globals.clone())))
            }
            Command::Q | Command::Quit => Some(Screen::Quit),
            _ => None,
        }
    }
}

impl Widget for &WinnerScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [title_area, subtitle_area, score_area, snake_area, board_area, keys_area] =
            Layout::vertical([1, 1, 1, 1, LeaderboardView::HEIGHT, 1])
                .flex(Flex::Center)
                .spacing(1)
                .areas(display);
        Line::styled(
            "★ YOU WIN! ★",
            Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
        .centered()
        .render(title_area, buf);
        let mut subtitle = Line::from(format!("All {} levels conquered", Level::Three.number()));
        if !self.run.is_anonymous() {
            subtitle.push_span(", ");
            subtitle.push_span(Span::styled(self.run.player(), consts::HIGHLIGHT_STYLE));
        }
        subtitle.push_span("!");
        subtitle.centered().render(subtitle_area, buf);
        score_line("Final score: ", self.run.total_score(), self.saved).render(score_area, buf);
        Line::from_iter([
            Span::styled(
                consts::SNAKE_BODY_SYMBOL.repeat(12),
                consts::SNAKE_STYLE,
            ),
            Span::styled(consts::SNAKE_HEAD_EAST_SYMBOL, consts::SNAKE_STYLE),
        ])
        .centered()
        .render(snake_area, buf);
        LeaderboardView::new(&self.leaderboard, &self.run).render_centered(board_area, buf);
        Line::from_iter([
            Span::raw("Play Again ("),
            Span::styled("p", consts::KEY_STYLE),
            Span::raw(") — Quit ("),
            Span::styled("q", consts::KEY_STYLE),
            Span::raw(")"),
        ])
        .centered()
        .render(keys_area, buf);
    }
}

fn score_line(label: &'static str, score: u32, saved: bool) -> Line<'static> {
    let mut line = Line::from_iter([
        Span::raw(label),
        Span::styled(score.to_string(), Style::new().add_modifier(Modifier::BOLD)),
    ]);
    if saved {
        line.push_span("  ");
        line.push_span(Span::styled("New record!", consts::HIGHLIGHT_STYLE));
    }
    line.centered()
}

/// The high-score table, with the entry for the current run (if any)
/// highlighted
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct LeaderboardView<'a> {
    leaderboard: &'a Leaderboard,

    /// Index of the current run's entry
    mine: Option<usize>,
}

impl<'a> LeaderboardView<'a> {
    const RANK_WIDTH: usize = 3;
    const SCORE_WIDTH: usize = 6;
    #[allow(clippy::cast_possible_truncation)]
    const WIDTH: u16 = (Self::RANK_WIDTH + 2 + consts::MAX_NAME_LENGTH + 2 + Self::SCORE_WIDTH + 4) as u16 + 4;
    #[allow(clippy::cast_possible_truncation)]
    const HEIGHT: u16 = consts::MAX_HIGH_SCORES as u16 + 2;

    fn new(leaderboard: &'a Leaderboard, run: &Run) -> LeaderboardView<'a> {
        let mine = if run.is_anonymous() {
            None
        } else {
            leaderboard
                .entries()
                .iter()
                .position(|e| e.name == run.player() && e.score == run.total_score())
        };
        LeaderboardView { leaderboard, mine }
    }

    /// Render centered horizontally within `area`
    fn render_centered(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([Self::WIDTH])
            .flex(Flex::Center)
            .areas(area);
        self.render(area, buf);
    }
}

impl Widget for LeaderboardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Top Scores ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        block.render(area, buf);
        if self.leaderboard.is_empty() {
            Line::styled("No scores yet. Be the first!", consts::DIM_STYLE)
                .centered()
                .render(inner, buf);
            return;
        }
        for ((i, entry), row) in self
            .leaderboard
            .entries()
            .iter()
            .enumerate()
            .zip(inner.rows())
        {
            let rank = format!("#{}", i + 1);
            let pad = consts::MAX_NAME_LENGTH.saturating_sub(entry.name.width());
            let mut line = Line::from_iter([
                Span::raw(format!("{rank:>width$}  ", width = Self::RANK_WIDTH)),
                Span::raw(entry.name.as_str()),
                Span::raw(" ".repeat(pad)),
                Span::raw(format!("  {:>width$}", entry.score, width = Self::SCORE_WIDTH)),
            ]);
            if self.mine == Some(i) {
                line.push_span(" you");
                line = line.style(consts::HIGHLIGHT_STYLE);
            }
            line.render(row, buf);
        }
    }
}
