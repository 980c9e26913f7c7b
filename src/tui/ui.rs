//! UI layout and rendering logic for the TUI.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::app::{App, PopupState};
use crate::catalog;
use crate::editor::EditorSurface;
use crate::output::{Category, OutputLog};
use crate::utils::unicode::{truncate_to_width, wrap_to_width};

/// Render the main UI
pub fn render_ui(frame: &mut Frame, app: &mut App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(60), // Editor
            Constraint::Min(5),         // Output log
            Constraint::Length(1),      // Run button / status
        ])
        .split(frame.area());

    render_editor(frame, app, main_layout[0]);
    let title = if app.controller.affordance().loading {
        "Output (running)"
    } else {
        "Output"
    };
    app.output_max_scroll = render_output(frame, app.controller.log(), title, main_layout[1]);
    render_status_bar(frame, app, main_layout[2]);

    if app.show_help {
        render_help_overlay(frame);
    }

    if let PopupState::ExampleMenu { selected, typed } = &app.popup_state {
        render_example_menu(frame, *selected, typed);
    }
}

fn render_editor(frame: &mut Frame, app: &App, area: Rect) {
    let editor = app.controller.editor();
    let inner_height = area.height.saturating_sub(2) as usize;
    let (row, col) = editor.caret_position();
    let scroll_y = row.saturating_sub(inner_height.saturating_sub(1));

    let border = if editor.is_focused() {
        Style::default().fg(Color::Blue)
    } else {
        Style::default()
    };
    let paragraph = Paragraph::new(editor.text())
        .block(Block::default().borders(Borders::ALL).border_style(border).title("Editor"))
        .scroll((scroll_y as u16, 0));
    frame.render_widget(paragraph, area);

    if !app.show_help && !app.is_popup_shown() {
        let x = area.x + 1 + col as u16;
        let y = area.y + 1 + (row - scroll_y) as u16;
        frame.set_cursor_position((x.min(area.right().saturating_sub(2)), y));
    }
}

fn category_style(category: Category) -> Style {
    match category {
        Category::Info => Style::default().fg(Color::Cyan),
        Category::Success => Style::default().fg(Color::Green),
        Category::Error => Style::default().fg(Color::Red),
    }
}

/// Screen rows for every entry, in order, wrapped at `width` columns.
pub fn log_lines(log: &OutputLog, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for entry in log.entries() {
        let style = category_style(entry.category);
        for line in entry.text.lines() {
            for row in wrap_to_width(line, width) {
                lines.push(Line::from(Span::styled(row, style)));
            }
        }
        if entry.text.is_empty() {
            lines.push(Line::from(""));
        }
    }
    lines
}

/// Draw the log and return how many rows can be scrolled back.
fn render_output(frame: &mut Frame, log: &OutputLog, title: &str, area: Rect) -> usize {
    if log.is_empty() {
        let hint = Paragraph::new("Run some code to see output here.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(title.to_string()));
        frame.render_widget(hint, area);
        return 0;
    }
    let inner_width = area.width.saturating_sub(2) as usize;
    let content_lines = log_lines(log, inner_width);
    let available_height = area.height.saturating_sub(2) as usize;

    // offset 0 pins the newest entry to the bottom
    let max_scroll = content_lines.len().saturating_sub(available_height);
    let actual_offset = log.scroll_offset().min(max_scroll);
    let paragraph = Paragraph::new(Text::from(content_lines))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .scroll(((max_scroll - actual_offset) as u16, 0));

    frame.render_widget(paragraph, area);
    max_scroll
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let affordance = app.controller.affordance();
    let button_style = if affordance.enabled {
        Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(Color::DarkGray).fg(Color::Gray)
    };
    let hints = " F5 run | F7 examples | F1 help | ";
    let room = (area.width as usize).saturating_sub(affordance.label.chars().count() + 2 + hints.len());

    let line = Line::from(vec![
        Span::styled(format!(" {} ", affordance.label), button_style),
        Span::raw(hints),
        Span::raw(truncate_to_width(&app.endpoint, room)),
    ]);
    let status = Paragraph::new(line).style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(status, area);
}

fn render_help_overlay(frame: &mut Frame) {
    let popup_area = centered_rect(70, 60, frame.area());
    frame.render_widget(Clear, popup_area);

    let help_lines = vec![
        Line::from("Poke Playground"),
        Line::from(""),
        Line::from("  Ctrl+Enter / F5 - Run code"),
        Line::from("  Ctrl/Cmd+K      - Clear output"),
        Line::from("  F6              - Clear editor"),
        Line::from("  F7              - Example menu"),
        Line::from("  Tab             - Insert 4 spaces"),
        Line::from("  PgUp/PgDn       - Scroll output"),
        Line::from("  Ctrl+C          - Quit"),
        Line::from(""),
        Line::from("Press any key to close"),
    ];

    let help_paragraph = Paragraph::new(Text::from(help_lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .title_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(help_paragraph, popup_area);
}

fn render_example_menu(frame: &mut Frame, selected: usize, typed: &str) {
    let popup_area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, popup_area);

    let mut lines = vec![Line::from("Choose an example to load:"), Line::from("")];
    for (i, example) in catalog::all().iter().enumerate() {
        let text = format!("{} - {}", example.name, example.description);
        let line = if i == selected && typed.is_empty() {
            Line::from(Span::styled(
                format!("> {text}"),
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ))
        } else {
            Line::from(format!("  {text}"))
        };
        lines.push(line);
    }
    lines.push(Line::from(""));
    lines.push(Line::from(format!("Name: {typed}")));
    lines.push(Line::from(Span::styled(
        "Up/Down + Enter, or type a name. Esc cancels.",
        Style::default().fg(Color::Yellow),
    )));

    let menu = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Examples")
                .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(menu, popup_area);
}

/// Helper function to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
