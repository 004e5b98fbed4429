//! Line-oriented terminal front end.
//!
//! `/spike`, `/quality`, `/missing`, `/export` and `/voice` press the
//! dashboard buttons, `/help` lists them, `/quit` ends the session and any
//! other line is sent to the chat box.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::dashboard::{Action, Button, DashboardController, DashboardView};
use crate::render::Panel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Act(Action),
    Help,
    Quit,
    Empty,
}

const BUTTON_COMMANDS: [(&str, Button); 5] = [
    ("/spike", Button::DiseaseSpike),
    ("/quality", Button::DataQuality),
    ("/missing", Button::MissingData),
    ("/export", Button::ExportReorderList),
    ("/voice", Button::VoiceAlert),
];

pub fn parse_command(line: &str) -> ConsoleCommand {
    let line = line.trim();
    if line.is_empty() {
        return ConsoleCommand::Empty;
    }

    match line.to_lowercase().as_str() {
        "/quit" | "/exit" => return ConsoleCommand::Quit,
        "/help" => return ConsoleCommand::Help,
        _ => {}
    }

    BUTTON_COMMANDS
        .iter()
        .find(|(command, _)| line.eq_ignore_ascii_case(command))
        .map(|(_, button)| ConsoleCommand::Act(Action::Press(*button)))
        .unwrap_or_else(|| ConsoleCommand::Act(Action::Chat(line.to_string())))
}

/// Drive the dashboard from `input` until EOF or `/quit`.
///
/// Downloads are written into `export_dir`. Action failures are printed
/// and the loop keeps going.
pub fn run_console<R: BufRead, W: Write>(
    dashboard: &mut DashboardController<'_>,
    input: R,
    mut output: W,
    export_dir: &Path,
) -> io::Result<()> {
    match dashboard.refresh() {
        Ok(view) => show_view(&mut output, &view, export_dir)?,
        Err(e) => write_failure(&mut output, &e)?,
    }
    write_help(&mut output)?;

    for line in input.lines() {
        let action = match parse_command(&line?) {
            ConsoleCommand::Act(action) => action,
            ConsoleCommand::Help => {
                write_help(&mut output)?;
                continue;
            }
            ConsoleCommand::Empty => continue,
            ConsoleCommand::Quit => break,
        };

        match dashboard.handle(action) {
            Ok(view) => show_view(&mut output, &view, export_dir)?,
            Err(e) => write_failure(&mut output, &e)?,
        }
        output.flush()?;
    }
    Ok(())
}

#[derive(Error, Debug)]
#[error("Could not save {}: {source}", .path.display())]
struct SaveError {
    path: PathBuf,
    source: io::Error,
}

/// Save the view's downloads, then print it. A failed save prints only the
/// failure, so no download is announced that was not written.
fn show_view<W: Write>(output: &mut W, view: &DashboardView, export_dir: &Path) -> io::Result<()> {
    match save_downloads(view, export_dir) {
        Ok(saved) => write_view(output, view, &saved),
        Err(e) => write_failure(output, &e),
    }
}

fn save_downloads(view: &DashboardView, export_dir: &Path) -> Result<Vec<PathBuf>, SaveError> {
    let mut saved = Vec::new();
    for panel in &view.action {
        if let Panel::Download { file_name, bytes, .. } = panel {
            let path = export_dir.join(file_name);
            std::fs::write(&path, bytes).map_err(|source| SaveError {
                path: path.clone(),
                source,
            })?;
            tracing::info!(path = %path.display(), "Export written");
            saved.push(path);
        }
    }
    Ok(saved)
}

fn write_view<W: Write>(output: &mut W, view: &DashboardView, saved: &[PathBuf]) -> io::Result<()> {
    for panel in view.panels() {
        writeln!(output, "{panel}")?;
    }
    for path in saved {
        writeln!(output, "Saved to {}", path.display())?;
    }
    writeln!(output)
}

fn write_failure<W: Write>(output: &mut W, error: &dyn std::error::Error) -> io::Result<()> {
    tracing::error!("Dashboard action failed: {error}");
    writeln!(output, "[ERROR] {error}")?;
    writeln!(output)
}

fn write_help<W: Write>(output: &mut W) -> io::Result<()> {
    writeln!(output, "Ask CareWatch about disease or inventory...")?;
    for (command, button) in BUTTON_COMMANDS {
        writeln!(output, "  {command:<9} {}", button.label())?;
    }
    writeln!(output, "  /quit")?;
    writeln!(output)
}
