mod app;
mod help;
mod picker;
mod theme;
use crate::app::App;
use anyhow::Context;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::io;
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run { date: Option<Date>, unselected: bool },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut unselected = false;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('n') | Arg::Long("none") => unselected = true,
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        if unselected && date.is_some() {
            return Err(lexopt::Error::Custom(
                "--none cannot be combined with a date".into(),
            ));
        }
        Ok(Command::Run { date, unselected })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run { date, unselected } => {
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let selected = if unselected {
                    None
                } else {
                    Some(date.unwrap_or(today))
                };
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(selected, today).run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: datepick [--none] [YYYY-MM-DD]");
                println!();
                println!("Terminal date picker: a trigger button with a popover calendar grid");
                println!();
                println!("Options:");
                println!("  -n, --none        Start without a selected date");
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = MouseCapture::acquire()
        .context("failed to enable mouse capture")
        .and_then(|_capture| func(terminal));
    ratatui::restore();
    r
}

/// Mouse reporting for the duration of the session.  Dropping the guard turns
/// it back off even when the app errors out.
#[derive(Debug)]
struct MouseCapture;

impl MouseCapture {
    fn acquire() -> io::Result<MouseCapture> {
        execute!(io::stdout(), EnableMouseCapture)?;
        Ok(MouseCapture)
    }
}

impl Drop for MouseCapture {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), DisableMouseCapture);
    }
}
