//! Inline banner for form alerts

use crate::state::{AlertKind, FormAlert};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn render_alert(frame: &mut Frame, area: Rect, alert: &FormAlert) {
    let (icon, color) = match alert.kind {
        AlertKind::Success => ("✓", Color::Green),
        AlertKind::Error => ("✗", Color::Red),
        AlertKind::Info => ("ℹ", Color::Yellow),
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" {icon} "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(alert.message.as_str(), Style::default().fg(color)),
    ]);
    frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), area);
}
