use crate::app::{App, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

mod auth_view;
mod create_view;
mod task_list_view;
pub(super) mod utils;
pub(super) mod widgets;

const TITLE: &str = " Task Manager";

pub fn render(frame: &mut Frame, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title bar + tabs
            Constraint::Min(0),    // view
            Constraint::Length(3), // status
            Constraint::Length(3), // controls
        ])
        .split(frame.area());

    render_title_bar(frame, root[0], app);

    match app.current_view {
        View::Auth => auth_view::render_auth_view(frame, app, root[1]),
        View::TaskList => task_list_view::render_task_list_view(frame, app, root[1]),
        View::CreateTask => create_view::render_create_view(frame, app, root[1]),
    }

    render_status(frame, root[2], app);
    render_controls(frame, root[3], app);
}

fn render_title_bar(frame: &mut Frame, area: Rect, app: &mut App) {
    let row = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: 1,
    };
    let title_width = 1 + TITLE.len() as u16 + 1;
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(title_width), Constraint::Min(0)])
        .split(row);

    // Throbber spins while a request is in flight, full symbol when idle
    let throbber_area = Rect {
        x: cols[0].x + 1,
        y: cols[0].y,
        width: 1,
        height: 1,
    };
    let label_area = Rect {
        x: throbber_area.x + 1,
        y: cols[0].y,
        width: cols[0].width.saturating_sub(2),
        height: 1,
    };
    let throbber = throbber_widgets_tui::Throbber::default()
        .style(Style::default().fg(Color::Yellow))
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(if app.is_busy() {
            throbber_widgets_tui::WhichUse::Spin
        } else {
            throbber_widgets_tui::WhichUse::Full
        });
    frame.render_stateful_widget(throbber, throbber_area, &mut app.throbber_state);
    frame.render_widget(
        Paragraph::new(Span::styled(TITLE, Style::default().fg(Color::Yellow))),
        label_area,
    );

    // Tabs only exist for a signed-in user
    if app.current_view == View::Auth {
        return;
    }
    let tab = |label: &'static str, active: bool| {
        if active {
            Span::styled(
                label,
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(label, Style::default().fg(Color::DarkGray))
        }
    };
    let tabs = Line::from(vec![
        Span::raw("   "),
        tab(" Tasks ", app.current_view == View::TaskList),
        Span::raw(" "),
        tab(" Add Task ", app.current_view == View::CreateTask),
    ]);
    frame.render_widget(Paragraph::new(tabs), cols[1]);
}

pub fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let contextual_status = app.get_contextual_status();
    let status_text = app.status_message.as_deref().unwrap_or(&contextual_status);

    let text_color = message_color(status_text);
    let border_style = Style::default().fg(text_color);

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(text_color))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Status ")
                .border_style(border_style)
                .padding(ratatui::widgets::Padding::horizontal(1)),
        );

    frame.render_widget(status, area);
}

/// Colour for a status line: red for failures, green for completed actions.
fn message_color(text: &str) -> Color {
    let lower = text.to_lowercase();
    let is_error = lower.contains("error")
        || lower.contains("failed")
        || lower.contains("required")
        || lower.contains("must be")
        || lower.contains("expired");
    let is_success = lower.contains("success") || lower.contains("signed out");

    if is_error {
        Color::Red
    } else if is_success {
        Color::Green
    } else {
        Color::White
    }
}

fn controls_for(app: &App) -> Vec<(&'static str, &'static str)> {
    match app.current_view {
        View::Auth => vec![
            ("Tab", "Switch field"),
            ("Enter", "Submit"),
            ("Ctrl+R", "Sign in / Sign up"),
            ("Esc", "Quit"),
        ],
        View::TaskList if app.is_in_edit_mode() => vec![
            ("Tab / ↑↓", "Field"),
            ("←→", "Cursor / Status"),
            ("Ctrl+X", "Clear field"),
            ("Enter", "Save"),
            ("Esc", "Cancel"),
        ],
        View::TaskList => vec![
            ("↑↓ / j/k", "Navigate"),
            ("Enter / e", "Edit"),
            ("d", "Delete"),
            ("a", "Add"),
            ("r", "Refresh"),
            ("L", "Logout"),
            ("q", "Quit"),
        ],
        View::CreateTask => vec![
            ("Tab / ↑↓", "Field"),
            ("←→", "Cursor / Status"),
            ("Ctrl+X", "Clear field"),
            ("Enter", "Add task"),
            ("Esc", "Back to tasks"),
        ],
    }
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();
    for (i, (key, label)) in controls_for(app).into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(key, Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!(": {}", label)));
    }

    let controls = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Line::from(vec![Span::styled(
                    " Controls ",
                    Style::default().fg(Color::DarkGray),
                )]))
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(ratatui::widgets::Padding::horizontal(1)),
        );

    frame.render_widget(controls, area);
}
