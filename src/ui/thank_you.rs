//! Completion screen

use crate::app::App;
use crate::state::Phase;
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let delivered = matches!(app.wizard.phase(), Phase::Finished { delivered: true });
    let (title, body, color) = if delivered {
        (
            "Obrigado!",
            "Recebemos seu diagnóstico. Nossa equipe vai analisar suas respostas e \
             entrar em contato em até 24 horas úteis.",
            Color::Green,
        )
    } else {
        (
            "Quase lá!",
            "Não conseguimos enviar seu diagnóstico agora, mas suas respostas foram \
             guardadas neste computador. Tente novamente mais tarde ou fale conosco.",
            Color::Yellow,
        )
    };

    let [content] = Layout::vertical([Constraint::Length(6)])
        .flex(Flex::Center)
        .areas(area);
    let text = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(body),
        Line::from(""),
        Line::from(Span::styled(
            "Pressione Enter para voltar ao início",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        content,
    );
}
