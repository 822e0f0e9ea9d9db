mod direction;
mod dpad;
mod food;
mod levels;
mod obstacle;
mod paused;
mod sim;
mod snake;
pub(crate) use self::levels::Level;
use self::direction::Direction;
use self::dpad::DPad;
use self::obstacle::Obstacle;
use self::paused::{PauseOpt, Paused};
use self::sim::{Simulation, TickResult};
use self::snake::Snake;
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::menu::MainMenu;
use crate::results::{GameOverScreen, LevelTransition, WinnerScreen};
use crate::run::{LevelOutcome, Run};
use crate::util::{center_rect, get_display_area, Globals};
use crossterm::event::{poll, read, Event, MouseButton, MouseEvent, MouseEventKind};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Position, Rect, Size},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Widget},
    Frame,
};
use std::time::{Duration, Instant};

/// The screen on which a level is played.  Drives a [`Simulation`] from a
/// timer & feeds it the player's steering.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    sim: Simulation<R>,
    run: Run,
    globals: Globals,
    state: GameState,

    /// Time between ticks
    interval: Duration,

    /// When the next tick is due.  `None` while the timer is not armed.
    next_tick: Option<Instant>,

    /// The terminal area as of the most recent draw, used for mapping mouse
    /// positions onto the directional pad
    viewport: Rect,

    /// Where the left mouse button was pressed for a swipe still in progress
    press: Option<Position>,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(run: Run, globals: Globals) -> Self {
        Game::new_with_rng(run, globals, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(run: Run, globals: Globals, rng: R) -> Game<R> {
        Game {
            sim: Simulation::new_with_rng(run.level(), rng),
            interval: run.interval(),
            run,
            globals,
            state: GameState::Running,
            next_tick: None,
            viewport: Rect::ZERO,
            press: None,
        }
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        if self.running() {
            let interval = self.interval;
            let when = *self
                .next_tick
                .get_or_insert_with(|| Instant::now() + interval);
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.next_tick = Some(next_deadline(when, Instant::now(), interval));
                Ok(self.advance())
            } else {
                Ok(self.handle_event(read()?))
            }
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    /// Run one tick of the simulation.  Returns the screen to switch to if
    /// the level ended.
    fn advance(&mut self) -> Option<Screen> {
        if self.sim.is_done() {
            return None;
        }
        let result = self.sim.tick();
        if result.is_terminal() {
            self.next_tick = None;
        }
        match result {
            TickResult::Continue => None,
            TickResult::LevelComplete(score) => {
                let cleared = self.run.level();
                let mut run = self.run.clone();
                match run.complete_level(score, &self.globals.scores) {
                    LevelOutcome::Advanced => Some(Screen::Transition(LevelTransition::new(
                        cleared,
                        run,
                        self.globals.clone(),
                    ))),
                    LevelOutcome::Won { saved } => Some(Screen::Winner(WinnerScreen::new(
                        run,
                        saved,
                        self.globals.clone(),
                    ))),
                }
            }
            TickResult::GameOver(score) => {
                let mut run = self.run.clone();
                let saved = run.fail_level(score, &self.globals.scores);
                Some(Screen::GameOver(GameOverScreen::new(
                    run,
                    saved,
                    self.globals.clone(),
                )))
            }
        }
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&mut self, frame: &mut Frame<'_>) {
        self.viewport = frame.area();
        frame.render_widget(&*self, frame.area());
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match self.state {
            GameState::Running => match event {
                Event::FocusLost => self.pause(),
                Event::Mouse(ev) => self.handle_mouse(ev),
                _ => match Command::from_key_event(event.as_key_press_event()?)? {
                    Command::Quit => return Some(Screen::Quit),
                    Command::Up => self.sim.request_direction(Direction::North),
                    Command::Left => self.sim.request_direction(Direction::West),
                    Command::Down => self.sim.request_direction(Direction::South),
                    Command::Right => self.sim.request_direction(Direction::East),
                    Command::Esc => self.pause(),
                    _ => (),
                },
            },
            GameState::Paused(ref mut paused) => match paused.handle_event(event)? {
                PauseOpt::Resume => {
                    log::debug!("Resuming {}", self.run.level());
                    self.state = GameState::Running;
                }
                PauseOpt::Retry => {
                    log::info!("Restarting {}", self.run.level());
                    return Some(Screen::game(self.run.clone(), self.globals.clone()));
                }
                PauseOpt::MainMenu => {
                    return Some(Screen::Main(MainMenu::new(self.globals.clone())));
                }
                PauseOpt::Quit => return Some(Screen::Quit),
            },
        }
        None
    }

    /// A left-button press on the directional pad steers immediately.  Any
    /// other press starts a swipe, which is classified when the button is
    /// released.
    fn handle_mouse(&mut self, ev: MouseEvent) {
        let pos = Position::new(ev.column, ev.row);
        match ev.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let layout = GameLayout::new(self.viewport);
                if let Some(d) = DPad::button_at(layout.dpad, pos) {
                    self.sim.request_direction(d);
                    self.press = None;
                } else {
                    self.press = Some(pos);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(start) = self.press.take() {
                    let dx = i32::from(pos.x) - i32::from(start.x);
                    let dy = i32::from(pos.y) - i32::from(start.y);
                    if let Some(d) = Direction::from_swipe(dx, dy, consts::SWIPE_THRESHOLD) {
                        self.sim.request_direction(d);
                    }
                }
            }
            _ => (),
        }
    }

    fn running(&self) -> bool {
        self.state == GameState::Running
    }

    /// Pause the game & cancel the tick timer.  It is re-armed with a full
    /// interval upon resuming.
    fn pause(&mut self) {
        log::debug!("Pausing {}", self.run.level());
        self.state = GameState::Paused(Paused::new());
        self.next_tick = None;
        self.press = None;
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = GameLayout::new(area);
        let snapshot = self.sim.snapshot();
        let cfg = snapshot.level.config();
        let total = self.run.total_score().saturating_add(self.sim.score());
        Line::from_iter([
            Span::styled(
                format!(" {} ", cfg.name),
                Style::new().fg(cfg.color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "  Pellets: {}/{}",
                self.sim.pellets(),
                consts::PELLETS_TO_ADVANCE
            )),
            Span::raw(format!("  Score: {total}")),
        ])
        .style(consts::HUD_STYLE)
        .render(layout.hud, buf);

        let block = Block::bordered().border_style(Style::new().fg(cfg.color));
        let grid_area = block.inner(layout.board);
        block.render(layout.board, buf);
        let mut canvas = Canvas {
            area: grid_area,
            buf,
        };
        for obstacle in snapshot.obstacles() {
            let (symbol, style) = match obstacle {
                Obstacle::Static(_) => (
                    consts::STATIC_OBSTACLE_SYMBOL,
                    consts::STATIC_OBSTACLE_STYLE,
                ),
                Obstacle::Moving(_) => (
                    consts::MOVING_OBSTACLE_SYMBOL,
                    consts::MOVING_OBSTACLE_STYLE,
                ),
            };
            canvas.draw_cell(obstacle.position(), symbol, style);
        }
        canvas.draw_cell(snapshot.food, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        for pos in snapshot.snake.cells().skip(1) {
            canvas.draw_cell(pos, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        canvas.draw_cell(
            snapshot.snake.head(),
            Snake::head_symbol(snapshot.direction),
            consts::SNAKE_STYLE,
        );

        DPad.render(layout.dpad, buf);

        Line::from_iter([
            Span::raw(" "),
            Span::styled("Esc", consts::KEY_STYLE),
            Span::raw(": pause   "),
            Span::styled("←↓↑→", consts::KEY_STYLE),
            Span::raw(" "),
            Span::styled("wasd", consts::KEY_STYLE),
            Span::raw(" "),
            Span::styled("hjkl", consts::KEY_STYLE),
            Span::raw(": steer   or drag/click with the mouse"),
        ])
        .render(layout.help, buf);

        if let GameState::Paused(paused) = self.state {
            let pause_area = center_rect(
                layout.board,
                Size {
                    width: Paused::WIDTH,
                    height: Paused::HEIGHT,
                },
            );
            Clear.render(pause_area, buf);
            paused.render(pause_area, buf);
        }
    }
}

/// When the tick after one due at `when` should fire.  A tick that ran late
/// pushes the next one back instead of letting missed ticks pile up.
fn next_deadline(when: Instant, now: Instant, interval: Duration) -> Instant {
    when.max(now) + interval
}

/// Placement of the parts of the game screen within the terminal
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct GameLayout {
    hud: Rect,

    /// The board including its border
    board: Rect,

    dpad: Rect,
    help: Rect,
}

impl GameLayout {
    const BOARD_WIDTH: u16 = consts::GRID_SIZE * consts::CELL_WIDTH + 2;
    const BOARD_HEIGHT: u16 = consts::GRID_SIZE + 2;
    const DPAD_GUTTER: u16 = 4;

    fn new(area: Rect) -> GameLayout {
        let display = get_display_area(area);
        let [hud, main, help] = Layout::vertical([1, Self::BOARD_HEIGHT, 1])
            .flex(Flex::Start)
            .areas(display);
        let [board, side] = Layout::horizontal([Self::BOARD_WIDTH, DPad::WIDTH])
            .flex(Flex::Center)
            .spacing(Self::DPAD_GUTTER)
            .areas(main);
        let dpad = center_rect(
            side,
            Size {
                width: DPad::WIDTH,
                height: DPad::HEIGHT,
            },
        );
        GameLayout {
            hud,
            board,
            dpad,
            help,
        }
    }
}

/// Draws grid cells, each [`CELL_WIDTH`][consts::CELL_WIDTH] columns wide,
/// into the area inside the board's border
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: &str, style: Style) {
        let Some(x) = pos
            .x
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|x| self.area.x.checked_add(x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        for (offset, ch) in (0..consts::CELL_WIDTH).zip(symbol.chars()) {
            let Some(p) = x.checked_add(offset).map(|x| Position::new(x, y)) else {
                break;
            };
            if !self.area.contains(p) {
                continue;
            }
            if let Some(cell) = self.buf.cell_mut(p) {
                cell.set_char(ch);
                cell.set_style(Style::reset().patch(style));
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum GameState {
    Running,
    Paused(Paused),
}
