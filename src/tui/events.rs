//! Custom event types for TUI application.

use crossterm::event::KeyEvent;

use crate::client::{ExecuteError, ExecutionResult};

/// Events that can occur in the TUI application
#[derive(Debug)]
pub enum TuiEvent {
    /// User keyboard input
    Key(KeyEvent),
    /// The in-flight request finished (or failed)
    ExecutionFinished(Result<ExecutionResult, ExecuteError>),
}
