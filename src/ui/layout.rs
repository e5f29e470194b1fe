//! Layout components (header, status bar)

use crate::app::{App, View};
use crate::platform::{SAVE_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::{InputKind, Phase};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Header height in rows
const HEADER_HEIGHT: u16 = 3;

/// Split the screen into header and content, reserving the status line
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // Header
            Constraint::Min(0),                // Content
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the brand header with the current section name
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let section = match app.view {
        View::Home => "Início",
        View::RestorePrompt | View::Diagnostic => "Diagnóstico gratuito",
        View::Contact => "Contato",
        View::ThankYou => "Obrigado",
    };
    let title = Line::from(vec![
        Span::styled(
            " HO DevWeb ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(Color::DarkGray)),
        Span::raw(section),
    ]);
    let header = Paragraph::new(title).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![Span::raw(" ")];
    spans.push(Span::styled(
        get_view_hints(app),
        Style::default().fg(Color::Gray),
    ));
    if app.wizard.is_submission_disabled() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("envio indisponível", Style::default().fg(Color::Red)));
    }

    let quit_hint = " ^C:sair ";
    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the current view and step
fn get_view_hints(app: &App) -> String {
    match app.view {
        View::Home => "↑↓:navegar  Enter:abrir  q:sair".to_string(),
        View::RestorePrompt => "←→:escolher  Enter:confirmar  s/n  Esc:voltar".to_string(),
        View::ThankYou => "Enter:início".to_string(),
        View::Contact => format!("Tab:próximo campo  {SAVE_SHORTCUT}:enviar  Esc:voltar"),
        View::Diagnostic => match app.wizard.phase() {
            Phase::AwaitingConsent { .. } => "Espaço:aceitar termos  Enter:enviar  Esc:voltar".to_string(),
            Phase::DeliveryFailed => "R:tentar novamente".to_string(),
            Phase::Submitting | Phase::Delivered | Phase::Finished { .. } => String::new(),
            Phase::Idle | Phase::Transitioning { .. } => match app.wizard.input().step.kind {
                InputKind::SingleSelect(_) => {
                    "↑↓:opção  Espaço/Enter:escolher  Shift+Tab:voltar  Esc:sair".to_string()
                }
                InputKind::MultiSelect(_) => {
                    "↑↓:opção  Espaço:marcar  Enter:próxima  Shift+Tab:voltar".to_string()
                }
                InputKind::Text { multiline: true } => format!(
                    "Enter:nova linha  {SUBMIT_SHORTCUT}/{SAVE_SHORTCUT}:próxima  Alt+1-9:sugestão  Shift+Tab:voltar"
                ),
                InputKind::Text { multiline: false } => {
                    "Enter:próxima  Shift+Tab:voltar  Esc:sair".to_string()
                }
            },
        },
    }
}
