use crate::command::Command;
use crate::game::Game;
use crate::menu::MainMenu;
use crate::results::{GameOverScreen, LevelTransition, WinnerScreen};
use crate::run::Run;
use crate::util::Globals;
use crate::warning::{Warning, WarningOutcome};
use crossterm::event::{read, Event};
use ratatui::{backend::Backend, Terminal};
use std::io;

#[derive(Clone, Debug)]
pub(crate) struct App {
    screen: Screen,

    /// A pop-up drawn over the current screen.  While it is shown, it
    /// receives all input.
    warning: Option<Warning>,
}

impl App {
    pub(crate) fn new(globals: Globals, warning: Option<Warning>) -> App {
        App {
            screen: Screen::Main(MainMenu::new(globals)),
            warning,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| {
            match self.screen {
                Screen::Main(ref menu) => menu.draw(frame),
                Screen::Game(ref mut game) => game.draw(frame),
                Screen::Transition(ref transition) => transition.draw(frame),
                Screen::GameOver(ref over) => over.draw(frame),
                Screen::Winner(ref winner) => winner.draw(frame),
                Screen::Quit => (),
            }
            if let Some(ref warning) = self.warning {
                frame.render_widget(warning, frame.area());
            }
        })?;
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        if self.warning.is_some() {
            self.handle_warning_event(read()?);
            return Ok(());
        }
        let next = match self.screen {
            Screen::Main(ref mut menu) => menu.process_input()?,
            Screen::Game(ref mut game) => game.process_input()?,
            Screen::Transition(ref mut transition) => transition.process_input()?,
            Screen::GameOver(ref over) => over.process_input()?,
            Screen::Winner(ref winner) => winner.process_input()?,
            Screen::Quit => None,
        };
        if let Some(screen) = next {
            log::debug!("Switching to {} screen", screen.name());
            self.screen = screen;
        }
        Ok(())
    }

    fn handle_warning_event(&mut self, event: Event) {
        let Some(warning) = self.warning.as_mut() else {
            return;
        };
        let Some(cmd) = event.as_key_press_event().and_then(Command::from_key_event) else {
            return;
        };
        match warning.handle_command(cmd) {
            Some(WarningOutcome::Dismissed) => self.warning = None,
            Some(WarningOutcome::Quit) => self.screen = Screen::Quit,
            None => (),
        }
    }

    fn quitting(&self) -> bool {
        matches!(self.screen, Screen::Quit)
    }
}

/// The screen currently shown, along with its state.  Each screen's input
/// handling returns the screen to switch to, if any.
#[derive(Clone, Debug)]
pub(crate) enum Screen {
    Main(MainMenu),
    Game(Box<Game>),
    Transition(LevelTransition),
    GameOver(GameOverScreen),
    Winner(WinnerScreen),
    Quit,
}

impl Screen {
    /// Start playing the current level of `run`
    pub(crate) fn game(run: Run, globals: Globals) -> Screen {
        Screen::Game(Box::new(Game::new(run, globals)))
    }

    fn name(&self) -> &'static str {
        match self {
            Screen::Main(_) => "main menu",
            Screen::Game(_) => "game",
            Screen::Transition(_) => "level transition",
            Screen::GameOver(_) => "game over",
            Screen::Winner(_) => "winner",
            Screen::Quit => "quit",
        }
    }
}
