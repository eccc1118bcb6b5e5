// UI layer: the interactive terminal. It reads lines with `dialoguer`, hands
// them to the interpreter and prints whatever the interpreter appended to
// the session log. All command logic lives in `dispatch`.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::{style, Stylize};
use crossterm::terminal::{Clear, ClearType};
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};

use crate::dispatch::{Flow, Interpreter};
use crate::service::JokeService;
use crate::session::{Direction, Entry};

pub const BANNER: &str = r"
  ██╗  ██╗ █████╗ ██╗  ██╗ █████╗ ███████╗ █████╗  █████╗ ███████╗
  ██║  ██║██╔══██╗██║  ██║██╔══██╗██╔════╝██╔══██╗██╔══██╗██╔════╝
  ███████║███████║███████║███████║███████╗███████║███████║███████╗
  ██╔══██║██╔══██║██╔══██║██╔══██║╚════██║██╔══██║██╔══██║╚════██║
  ██║  ██║██║  ██║██║  ██║██║  ██║███████║██║  ██║██║  ██║███████║
  ╚═╝  ╚═╝╚═╝  ╚═╝╚═╝  ╚═╝╚═╝  ╚═╝╚══════╝╚═╝  ╚═╝╚═╝  ╚═╝╚══════╝
  =============== Humor as a Service Terminal v1.0.0 ===============
";

/// Read-dispatch-print loop. Returns when the user types `exit` or closes
/// the input stream.
pub async fn run<S: JokeService>(mut interpreter: Interpreter<S>) -> Result<()> {
    print_banner()?;
    loop {
        let line = match read_line() {
            Ok(line) => line,
            Err(e) if matches!(e.kind(), io::ErrorKind::UnexpectedEof | io::ErrorKind::Interrupted) => break,
            Err(e) => return Err(e).context("Failed to read command"),
        };

        let before = interpreter.log().len();
        let spinner = if interpreter.needs_service(&line) {
            Some(busy_spinner()?)
        } else {
            None
        };
        let flow = interpreter.submit(&line).await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        if flow == Flow::Exit {
            break;
        }
        if interpreter.log().is_empty() {
            clear_screen()?;
            print_banner()?;
            continue;
        }
        // The prompt already echoed the input line.
        for entry in interpreter.log().since(before) {
            if entry.direction == Direction::Output {
                println!("{}", format_entry(entry));
            }
        }
    }
    Ok(())
}

fn read_line() -> io::Result<String> {
    Input::<String>::new()
        .with_prompt("$")
        .allow_empty(true)
        .interact_text()
}

/// Spinner shown while a command waits on the backend.
fn busy_spinner() -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message("Loading...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

/// Scrollback rendering: `$ ` for input, `➜ ` for output.
pub fn format_entry(entry: &Entry) -> String {
    match entry.direction {
        Direction::Input => format!("{} {}", style("$").yellow(), style(&entry.text).green()),
        Direction::Output => format!("{} {}", style("➜").cyan(), style(&entry.text).cyan()),
    }
}

fn print_banner() -> Result<()> {
    let mut out = io::stdout();
    writeln!(out, "{}", style(BANNER).green())?;
    writeln!(out, "{}", style("Type 'help' for available commands.").green())?;
    out.flush()?;
    Ok(())
}

fn clear_screen() -> Result<()> {
    execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0)).context("Failed to clear screen")
}
