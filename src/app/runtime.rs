//! Terminal runtime: owns the event loop and interprets commands.
//!
//! One task owns the [`App`] and applies every message serially, so the
//! state needs no locking. Keyboard events come straight off the crossterm
//! stream; ticks and probe results arrive over an internal channel fed by
//! detached tasks.

use std::io;

use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use super::{App, Cmd, Msg};
use crate::probe;
use crate::ui::{self, Theme};

/// Run the interactive interface until the user quits.
pub async fn run(mut app: App, theme: Theme) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, &theme).await;

    // Restore the terminal even when the loop failed.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    theme: &Theme,
) -> io::Result<()> {
    let (tx, mut rx) = mpsc::channel::<Msg>(64);
    let mut events = EventStream::new();

    loop {
        terminal.draw(|frame| ui::draw(frame, app, theme))?;

        let msg = tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key)))
                    if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) =>
                {
                    Msg::Key(key)
                }
                // Resizes and releases just trigger the redraw above.
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e),
                None => return Ok(()),
            },
            Some(msg) = rx.recv() => msg,
        };

        for cmd in app.update(msg) {
            match cmd {
                Cmd::Quit => return Ok(()),
                Cmd::Probe(profile) => {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let result = probe::run_probe(&profile).await;
                        tracing::debug!(
                            "probe finished for {}: status={} success={}",
                            profile.name,
                            result.status_code,
                            result.success
                        );
                        let _ = tx.send(Msg::ProbeDone(result)).await;
                    });
                }
                Cmd::Schedule { after, epoch } => {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(after).await;
                        let _ = tx.send(Msg::Tick { epoch }).await;
                    });
                }
            }
        }
    }
}
