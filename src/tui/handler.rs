//! Event loop and key bindings for the TUI.

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use tokio::sync::mpsc;

use super::{
    app::App,
    events::TuiEvent,
    ui::render_ui,
};
use crate::client::{ExecuteError, ExecutionRequest};

/// What the loop must do after a key press.
#[derive(Debug, PartialEq)]
pub enum KeyAction {
    None,
    Quit,
    /// The controller went `InFlight`; run this request off the loop.
    Submit(ExecutionRequest),
}

/// Run the playground until the user quits.
pub async fn run_tui(mut app: App) -> Result<()> {
    if !io::IsTerminal::is_terminal(&io::stdout()) {
        return Err(anyhow::anyhow!("TUI mode requires a proper terminal environment"));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<TuiEvent>();

    // Plain thread so runtime shutdown never waits on a blocking poll
    let input_tx = event_tx.clone();
    std::thread::spawn(move || {
        while !input_tx.is_closed() {
            if event::poll(Duration::from_millis(100)).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    if input_tx.send(TuiEvent::Key(key)).is_err() {
                        break;
                    }
                }
            }
        }
    });

    loop {
        terminal.draw(|frame| render_ui(frame, app))?;

        let Some(tui_event) = event_rx.recv().await else {
            break;
        };
        match tui_event {
            TuiEvent::Key(key) => match handle_key_event(app, key) {
                KeyAction::Quit => break,
                KeyAction::Submit(request) => spawn_execution(app, request, event_tx.clone()),
                KeyAction::None => {}
            },
            TuiEvent::ExecutionFinished(outcome) => {
                app.controller.complete(outcome);
            }
        }
    }

    Ok(())
}

/// Run the request on its own task. A completion event is sent even if the
/// request task dies, so the controller always gets back to `Idle`.
fn spawn_execution(app: &App, request: ExecutionRequest, tx: mpsc::UnboundedSender<TuiEvent>) {
    let service = app.controller.service();
    tokio::spawn(async move {
        let task = tokio::spawn(async move { service.execute(&request).await });
        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(e) => Err(ExecuteError::Transport(format!("execution task failed: {e}"))),
        };
        let _ = tx.send(TuiEvent::ExecutionFinished(outcome));
    });
}

/// Ctrl, or Cmd on terminals that report it.
fn is_accel(key: &KeyEvent) -> bool {
    key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER)
}

fn is_submit(key: &KeyEvent) -> bool {
    key.code == KeyCode::F(5) || (is_accel(key) && key.code == KeyCode::Enter)
}

/// Apply one key press to the app state.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let accel = is_accel(&key);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    if ctrl && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    if app.show_help {
        app.toggle_help();
        return KeyAction::None;
    }

    if app.is_popup_shown() {
        handle_menu_key(app, key);
        return KeyAction::None;
    }

    // Global commands
    if is_submit(&key) {
        return match app.controller.begin_submit() {
            Some(request) => KeyAction::Submit(request),
            None => KeyAction::None,
        };
    }
    match key.code {
        KeyCode::Char('k') if accel => {
            app.controller.reset_log();
            return KeyAction::None;
        }
        KeyCode::F(1) => {
            app.toggle_help();
            return KeyAction::None;
        }
        KeyCode::F(6) => {
            app.controller.clear_editor();
            return KeyAction::None;
        }
        KeyCode::F(7) => {
            app.open_example_menu();
            return KeyAction::None;
        }
        KeyCode::PageUp => {
            app.controller.scroll_log_up(app.output_max_scroll);
            return KeyAction::None;
        }
        KeyCode::PageDown => {
            app.controller.scroll_log_down();
            return KeyAction::None;
        }
        _ => {}
    }

    // Editor keys
    let editor = app.editor();
    match key.code {
        KeyCode::Tab => editor.insert_tab(),
        KeyCode::Enter => editor.newline(),
        KeyCode::Backspace => editor.backspace(),
        KeyCode::Delete => editor.delete(),
        KeyCode::Left => editor.move_left(shift),
        KeyCode::Right => editor.move_right(shift),
        KeyCode::Up => editor.move_up(shift),
        KeyCode::Down => editor.move_down(shift),
        KeyCode::Home => editor.move_home(shift),
        KeyCode::End => editor.move_end(shift),
        KeyCode::Char('a') if accel => editor.select_all(),
        KeyCode::Char(c) if !accel => editor.insert_char(c),
        _ => {}
    }
    KeyAction::None
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.hide_popup(),
        KeyCode::Up => app.menu_up(),
        KeyCode::Down => app.menu_down(),
        KeyCode::Backspace => app.menu_backspace(),
        KeyCode::Enter => {
            app.confirm_example();
        }
        KeyCode::Char(c) => app.menu_type(c),
        _ => {}
    }
}
