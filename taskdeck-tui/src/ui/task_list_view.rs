use super::widgets::{build_edit_row, build_task_row, header_row};
use super::*;
use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};

pub fn render_task_list_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let border_style = if app.is_in_edit_mode() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Magenta)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Tasks ({}) ", app.tasks().len()))
        .border_style(border_style)
        .padding(ratatui::widgets::Padding::horizontal(1));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.tasks().is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No tasks found. Press \"a\" to add one.",
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    frame.render_widget(
        Paragraph::new(header_row()),
        Rect::new(inner.x, inner.y, inner.width, 1),
    );
    let rows_area = Rect {
        y: inner.y + 1,
        height: inner.height.saturating_sub(1),
        ..inner
    };

    let max_rows = rows_area.height as usize;
    app.list_view_height = max_rows;
    let total_rows = app.tasks().len();

    // Keep the focused row on screen
    if let Some(focused) = app.focused_task_index {
        if focused >= app.list_scroll + max_rows {
            app.list_scroll = focused + 1 - max_rows;
        }
        if focused < app.list_scroll {
            app.list_scroll = focused;
        }
    }
    if total_rows <= max_rows {
        app.list_scroll = 0;
    } else if app.list_scroll > total_rows - max_rows {
        app.list_scroll = total_rows - max_rows;
    }

    // Reserve 1 column on the right for the scrollbar
    let content_width = if total_rows > max_rows {
        rows_area.width.saturating_sub(1)
    } else {
        rows_area.width
    };

    let scroll = app.list_scroll;
    for (row, (idx, task)) in app
        .tasks()
        .iter()
        .enumerate()
        .skip(scroll)
        .take(max_rows)
        .enumerate()
    {
        let line = match &app.editing {
            Some(edit) if edit.task_id == task.id => build_edit_row(&edit.form),
            _ => build_task_row(task, app.focused_task_index == Some(idx)),
        };
        let row_rect = Rect::new(rows_area.x, rows_area.y + row as u16, content_width, 1);
        frame.render_widget(Paragraph::new(line), row_rect);
    }

    if total_rows > max_rows {
        let mut scrollbar_state = ScrollbarState::new(total_rows)
            .position(scroll)
            .viewport_content_length(max_rows);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .style(Style::default().fg(Color::DarkGray)),
            rows_area,
            &mut scrollbar_state,
        );
    }
}
