//! TUI application state.

use crate::catalog;
use crate::controller::ExecutionController;
use crate::editor::Editor;

/// Popup display state
#[derive(Debug, Clone, PartialEq)]
pub enum PopupState {
    /// No popup shown
    None,
    /// Example picker: arrow keys move `selected`, typing fills `typed`
    ExampleMenu { selected: usize, typed: String },
}

/// Application state for the TUI
pub struct App {
    pub controller: ExecutionController<Editor>,
    /// Execution endpoint, shown in the status bar
    pub endpoint: String,
    /// Whether to show help
    pub show_help: bool,
    pub popup_state: PopupState,
    /// Rows the output pane could scroll back at the last draw
    pub output_max_scroll: usize,
}

impl App {
    pub fn new(controller: ExecutionController<Editor>, endpoint: String) -> Self {
        Self {
            controller,
            endpoint,
            show_help: false,
            popup_state: PopupState::None,
            output_max_scroll: 0,
        }
    }

    pub fn editor(&mut self) -> &mut Editor {
        self.controller.editor_mut()
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn open_example_menu(&mut self) {
        self.popup_state = PopupState::ExampleMenu {
            selected: 0,
            typed: String::new(),
        };
    }

    pub fn hide_popup(&mut self) {
        self.popup_state = PopupState::None;
    }

    pub fn is_popup_shown(&self) -> bool {
        self.popup_state != PopupState::None
    }

    pub fn menu_up(&mut self) {
        if let PopupState::ExampleMenu { selected, .. } = &mut self.popup_state {
            *selected = selected.saturating_sub(1);
        }
    }

    pub fn menu_down(&mut self) {
        if let PopupState::ExampleMenu { selected, .. } = &mut self.popup_state {
            if *selected + 1 < catalog::all().len() {
                *selected += 1;
            }
        }
    }

    pub fn menu_type(&mut self, c: char) {
        if let PopupState::ExampleMenu { typed, .. } = &mut self.popup_state {
            typed.push(c);
        }
    }

    pub fn menu_backspace(&mut self) {
        if let PopupState::ExampleMenu { typed, .. } = &mut self.popup_state {
            typed.pop();
        }
    }

    /// Load the typed name (any case) if one was typed, otherwise the
    /// highlighted entry. The menu stays open when the typed name is unknown.
    pub fn confirm_example(&mut self) -> bool {
        let PopupState::ExampleMenu { selected, typed } = &self.popup_state else {
            return false;
        };
        let loaded = if typed.trim().is_empty() {
            match catalog::all().get(*selected) {
                Some(example) => self.controller.load_example(example.name),
                None => false,
            }
        } else {
            let typed = typed.clone();
            self.controller.load_example_ignore_case(&typed)
        };
        if loaded {
            self.hide_popup();
        }
        loaded
    }
}
