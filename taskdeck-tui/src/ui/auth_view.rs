use super::utils::centered_rect;
use super::*;
use crate::app::{AuthField, AuthMode};

pub fn render_auth_view(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.auth;
    let box_area = centered_rect(60, 13, area);

    let (heading, submit_label, switch_hint) = match form.mode {
        AuthMode::SignIn => ("Sign In", "Sign In", "No account? Ctrl+R to sign up"),
        AuthMode::SignUp => (
            "Sign Up",
            "Create Account",
            "Already registered? Ctrl+R to sign in",
        ),
    };

    let label_style = |field: AuthField| {
        if form.focused_field == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };
    let value_style = |field: AuthField| {
        if form.focused_field == field {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        }
    };

    let email_focused = form.focused_field == AuthField::Email;
    let password_focused = form.focused_field == AuthField::Password;

    // Password is masked
    let masked = "•".repeat(form.password.value.chars().count());
    let password_display = if password_focused {
        format!("{}█", masked)
    } else {
        masked
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Email:    ", label_style(AuthField::Email)),
            Span::styled(
                widgets::input_display(&form.email, email_focused, ""),
                value_style(AuthField::Email),
            ),
        ]),
        Line::from(vec![
            Span::styled("Password: ", label_style(AuthField::Password)),
            Span::styled(password_display, value_style(AuthField::Password)),
        ]),
        Line::from(""),
    ];

    if let Some(err) = &form.error {
        lines.push(Line::from(Span::styled(
            err.as_str(),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(format!(": {}", submit_label)),
    ]));
    lines.push(Line::from(Span::styled(
        switch_hint,
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(Span::styled(
                    format!(" {} ", heading),
                    Style::default().fg(Color::Yellow),
                ))
                .padding(ratatui::widgets::Padding::horizontal(2)),
        )
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, box_area);
}
