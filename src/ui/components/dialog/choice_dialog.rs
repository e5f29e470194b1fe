//! Dialog with a row of mutually exclusive choices

use super::base::{key_span, render_dialog, DialogConfig};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Render a question with options laid out side by side
pub fn render_choice_dialog(
    frame: &mut Frame,
    title: &str,
    message: &str,
    options: &[&str],
    selected: usize,
) {
    let mut choices = Vec::with_capacity(options.len() * 2);
    for (i, label) in options.iter().enumerate() {
        let is_selected = i == selected;
        let style = if is_selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        choices.push(Span::styled(format!(" {label} "), style));
        choices.push(Span::raw("  "));
    }

    render_dialog(
        frame,
        DialogConfig {
            title,
            title_color: Color::Cyan,
            border_color: Color::Cyan,
            message,
            body: vec![Line::from(choices)],
            hint: Some(vec![
                key_span("←→"),
                Span::styled(" escolher  ", Style::default().fg(Color::DarkGray)),
                key_span("Enter"),
                Span::styled(" confirmar", Style::default().fg(Color::DarkGray)),
            ]),
            max_width: 64,
        },
    );
}
