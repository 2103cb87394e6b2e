use super::utils::pad;
use crate::app::{FormField, TaskForm, TextInput};
use crate::time_utils::format_due_date;
use crate::types::{Task, TaskStatus};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

pub const TITLE_WIDTH: usize = 28;
pub const STATUS_WIDTH: usize = 13;
pub const DUE_WIDTH: usize = 14;

pub fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Completed => Color::Green,
        TaskStatus::InProgress => Color::Blue,
        TaskStatus::Pending => Color::Yellow,
    }
}

fn focused_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Text input rendered with a block cursor when focused.
pub fn input_display(input: &TextInput, focused: bool, placeholder: &str) -> String {
    if focused {
        let (before, after) = input.split_at_cursor();
        format!("{}█{}", before, after)
    } else if input.value.is_empty() {
        placeholder.to_string()
    } else {
        input.value.clone()
    }
}

pub fn status_selector(status: TaskStatus, focused: bool) -> String {
    if focused {
        format!("◀ {} ▶", status)
    } else {
        status.to_string()
    }
}

pub fn header_row() -> Line<'static> {
    let muted = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::BOLD);
    Line::from(vec![
        Span::styled(pad("Title", TITLE_WIDTH), muted),
        Span::styled(" ", muted),
        Span::styled(pad("Status", STATUS_WIDTH), muted),
        Span::styled(" ", muted),
        Span::styled(pad("Due Date", DUE_WIDTH), muted),
        Span::styled(" ", muted),
        Span::styled("Description", muted),
    ])
}

pub fn build_task_row(task: &Task, is_focused: bool) -> Line<'_> {
    let title = pad(&task.title, TITLE_WIDTH);
    let status = pad(task.status.label(), STATUS_WIDTH);
    let due = pad(&format_due_date(task.due_date), DUE_WIDTH);

    // Focused rows are drawn inverted, like a selection bar
    if is_focused {
        return Line::from(Span::styled(
            format!("{} {} {} {}", title, status, due, task.description),
            focused_style(),
        ));
    }

    Line::from(vec![
        Span::styled(title, Style::default().fg(Color::White)),
        Span::raw(" "),
        Span::styled(status, Style::default().fg(status_color(task.status))),
        Span::raw(" "),
        Span::styled(due, Style::default().fg(Color::Magenta)),
        Span::raw(" "),
        Span::styled(task.description.as_str(), Style::default().fg(Color::Gray)),
    ])
}

/// One-line inline editor replacing a task row.
pub fn build_edit_row(form: &TaskForm) -> Line<'static> {
    let field_style = |field: FormField| {
        if form.focused_field == field {
            focused_style()
        } else {
            Style::default().fg(Color::White)
        }
    };

    // Fields are drawn in the order Tab visits them.
    let mut spans = vec![Span::styled("✎ ", Style::default().fg(Color::Yellow))];
    let mut field = FormField::Title;
    loop {
        let focused = form.focused_field == field;
        let (value, style) = match field {
            FormField::Title => (
                input_display(&form.title, focused, "Title"),
                field_style(field),
            ),
            FormField::Description => (
                input_display(&form.description, focused, "Empty"),
                field_style(field),
            ),
            FormField::Status => (
                status_selector(form.status, focused),
                field_style(field).fg(status_color(form.status)),
            ),
            FormField::DueDate => (
                input_display(&form.due_date, focused, "YYYY-MM-DD"),
                field_style(field),
            ),
        };
        spans.push(Span::styled(format!("[{}]", value), style));

        field = field.next();
        if field == FormField::Title {
            break;
        }
        spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
    }

    Line::from(spans)
}
