//! Diagnostic wizard screen

use super::components::{render_alert, render_consent_dialog};
use super::forms::{draw_field, draw_help_text};
use super::widgets::{render_scrollable_list, shifted};
use crate::app::App;
use crate::state::{
    AlertKind, FormAlert, InputKind, Phase, StepInput, TransitionStage, TOTAL_STEPS,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let now = Instant::now();
    let wizard = &app.wizard;
    let input = wizard.input();
    let has_suggestions = !input.step.suggestions.is_empty();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),                                  // Progress
            Constraint::Length(1),                                  // Spacer
            Constraint::Length(2),                                  // Prompt
            Constraint::Length(1),                                  // Hint
            Constraint::Min(3),                                     // Input
            Constraint::Length(if has_suggestions { 1 } else { 0 }), // Suggestions
            Constraint::Length(2),                                  // Banner
        ])
        .split(area);

    draw_progress(frame, chunks[0], app, now);

    let exiting = matches!(
        wizard.phase(),
        Phase::Transitioning {
            stage: TransitionStage::Exiting,
            ..
        }
    );
    let prompt_style = if exiting {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    };
    let required = if input.step.required { " *" } else { "" };
    let prompt = Paragraph::new(Line::from(vec![
        Span::styled(format!("{}. ", input.step.index), Style::default().fg(Color::Cyan)),
        Span::styled(input.step.prompt, prompt_style),
        Span::styled(required, Style::default().fg(Color::Red)),
    ]))
    .wrap(Wrap { trim: true });
    frame.render_widget(prompt, chunks[2]);
    draw_help_text(frame, chunks[3], input.step.hint);

    let offset = wizard.shake().map_or(0, |s| s.offset_at(now));
    let input_area = shifted(chunks[4], offset, area);
    if !exiting {
        match input.step.kind {
            InputKind::Text { .. } => draw_field(frame, input_area, &input.field, true),
            InputKind::SingleSelect(options) => draw_options(frame, input_area, input, options, false),
            InputKind::MultiSelect(options) => draw_options(frame, input_area, input, options, true),
        }
    }

    if has_suggestions {
        draw_suggestions(frame, chunks[5], input.step.suggestions);
    }

    match wizard.phase() {
        Phase::Submitting => render_alert(
            frame,
            chunks[6],
            &FormAlert::sticky(AlertKind::Info, "Enviando diagnóstico..."),
        ),
        _ => {
            if let Some(alert) = wizard.alert() {
                render_alert(frame, chunks[6], alert);
            }
        }
    }

    if let Phase::AwaitingConsent { accepted } = wizard.phase() {
        render_consent_dialog(frame, accepted);
    }
}

fn draw_progress(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
    let ratio = app.progress_bar.value_at(now).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .ratio(ratio)
        .label(format!(
            "Pergunta {} de {}",
            app.wizard.current_step(),
            TOTAL_STEPS
        ));
    frame.render_widget(gauge, area);
}

fn draw_options(
    frame: &mut Frame,
    area: Rect,
    input: &StepInput,
    options: &[&str],
    multi: bool,
) {
    let items: Vec<ListItem> = options
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let (marker, chosen) = if multi {
                let checked = input.checked.contains(&i);
                (if checked { "[x]" } else { "[ ]" }, checked)
            } else {
                let selected = input.selected == Some(i);
                (if selected { "(•)" } else { "( )" }, selected)
            };
            let style = if chosen {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {marker} "), style),
                Span::styled(*label, style),
            ]))
        })
        .collect();

    let border_style = if input.error().is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    if let Some(error) = input.error() {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {} ", error.message()),
            Style::default().fg(Color::Red),
        )));
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸");
    render_scrollable_list(frame, area, list, input.cursor);
}

fn draw_suggestions(frame: &mut Frame, area: Rect, suggestions: &[&str]) {
    let mut spans = vec![Span::styled("Sugestões: ", Style::default().fg(Color::DarkGray))];
    for (i, text) in suggestions.iter().enumerate().take(9) {
        spans.push(Span::styled(
            format!("Alt+{}", i + 1),
            Style::default().fg(Color::Cyan),
        ));
        spans.push(Span::raw(format!(" {text}  ")));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
