use super::widgets::{input_display, status_color, status_selector};
use super::*;
use crate::app::FormField;

pub fn render_create_view(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.draft;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Add Task ")
        .border_style(Style::default().fg(Color::Magenta))
        .padding(ratatui::widgets::Padding::new(2, 2, 1, 0));

    let field_line = |label: &'static str, field: FormField, value: String, color: Color| {
        let focused = form.focused_field == field;
        let label_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let value_style = if focused {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        };
        Line::from(vec![
            Span::styled(format!("{:<13}", label), label_style),
            Span::styled(value, value_style),
        ])
    };

    let lines = vec![
        field_line(
            "Title",
            FormField::Title,
            input_display(&form.title, form.focused_field == FormField::Title, ""),
            Color::White,
        ),
        Line::from(""),
        field_line(
            "Description",
            FormField::Description,
            input_display(
                &form.description,
                form.focused_field == FormField::Description,
                "",
            ),
            Color::White,
        ),
        Line::from(""),
        field_line(
            "Status",
            FormField::Status,
            status_selector(form.status, form.focused_field == FormField::Status),
            status_color(form.status),
        ),
        Line::from(""),
        field_line(
            "Due Date",
            FormField::DueDate,
            input_display(
                &form.due_date,
                form.focused_field == FormField::DueDate,
                "YYYY-MM-DD",
            ),
            Color::White,
        ),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
