mod app;
mod command;
mod config;
mod consts;
mod game;
mod highscores;
mod logging;
mod menu;
mod options;
mod results;
mod run;
mod util;
mod warning;
use crate::app::App;
use crate::config::Config;
use crate::util::Globals;
use crate::warning::Warning;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use lexopt::{Arg, Parser};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str = concat!(
    "Usage: ",
    env!("CARGO_PKG_NAME"),
    " [-c|--config <PATH>]\n",
    "\n",
    "Snake game with three levels of increasing danger\n",
    "\n",
    "Options:\n",
    "  -c, --config <PATH>  Read configuration from the given file\n",
    "  -h, --help           Show this help message and exit\n",
    "  -V, --version        Show the program version and exit",
);

const DEFAULT_CONFIG_NOTE: &str = "Playing with the default settings.";

const LOGGING_OFF_NOTE: &str = "Logging is off for this session.";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Cli {
    Run { config: Option<PathBuf> },
    Help,
    Version,
}

impl Cli {
    fn from_parser(mut parser: Parser) -> Result<Cli, lexopt::Error> {
        let mut config = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Cli::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Cli::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Cli::Run { config })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Cli::Run { config } => play(config.as_deref())?,
            Cli::Help => println!("{USAGE}"),
            Cli::Version => println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
        Ok(())
    }
}

fn main() -> ExitCode {
    exit_code(
        Cli::from_parser(Parser::from_env())
            .map_err(anyhow::Error::from)
            .and_then(Cli::run),
    )
}

/// Load the configuration, set up logging, and run the game in the
/// terminal.  A configuration or logging problem is shown to the user in a
/// pop-up rather than aborting.
fn play(config_path: Option<&Path>) -> io::Result<()> {
    let (config, warning) = match Config::load_from(config_path) {
        Ok(config) => {
            let warning = config
                .files
                .log_file
                .as_deref()
                .and_then(|path| logging::init(path).err())
                .map(|e| Warning::from(e).with_note(LOGGING_OFF_NOTE));
            (config, warning)
        }
        Err(e) => (
            Config::default(),
            Some(Warning::from(e).with_note(DEFAULT_CONFIG_NOTE)),
        ),
    };
    let app = App::new(Globals::new(config), warning);
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableMouseCapture).and_then(|()| app.run(terminal));
    let cleanup = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    log::info!("Shutting down");
    r.and(cleanup)
}

fn exit_code(r: anyhow::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_broken_pipe(&e) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e:#}", env!("CARGO_PKG_NAME"));
            ExitCode::from(2)
        }
    }
}

fn is_broken_pipe(e: &anyhow::Error) -> bool {
    e.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[], Cli::Run { config: None })]
    #[case(&["-c", "game.toml"], Cli::Run { config: Some(PathBuf::from("game.toml")) })]
    #[case(&["--config=game.toml"], Cli::Run { config: Some(PathBuf::from("game.toml")) })]
    #[case(&["--config", "a.toml", "-c", "b.toml"], Cli::Run { config: Some(PathBuf::from("b.toml")) })]
    #[case(&["-h"], Cli::Help)]
    #[case(&["--help", "--bogus"], Cli::Help)]
    #[case(&["-V"], Cli::Version)]
    #[case(&["--version"], Cli::Version)]
    fn parse_args(#[case] args: &[&str], #[case] cli: Cli) {
        let parser = Parser::from_iter(std::iter::once("hazardsnake").chain(args.iter().copied()));
        assert_eq!(Cli::from_parser(parser).unwrap(), cli);
    }

    #[rstest]
    #[case(&["--bogus"])]
    #[case(&["stray"])]
    #[case(&["-c"])]
    fn bad_args(#[case] args: &[&str]) {
        let parser = Parser::from_iter(std::iter::once("hazardsnake").chain(args.iter().copied()));
        assert!(Cli::from_parser(parser).is_err());
    }

    #[test]
    fn broken_pipe() {
        assert!(is_broken_pipe(&anyhow::Error::from(io::Error::from(
            ErrorKind::BrokenPipe
        ))));
        assert!(!is_broken_pipe(&anyhow::Error::from(io::Error::from(
            ErrorKind::PermissionDenied
        ))));
        assert!(!is_broken_pipe(&anyhow::anyhow!("broken pipe")));
    }
}
