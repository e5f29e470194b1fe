//! Terms acceptance dialog shown before anything is sent

use super::base::{key_span, render_dialog, DialogConfig};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

const TERMS: &str = "Seus dados serão usados apenas para entrarmos em contato e \
preparar sua proposta. Nada é compartilhado com terceiros.";

pub fn render_consent_dialog(frame: &mut Frame, accepted: bool) {
    let (mark, style) = if accepted {
        ("[x]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        ("[ ]", Style::default().fg(Color::White))
    };
    let checkbox = Line::from(vec![
        Span::styled(mark, style),
        Span::raw(" Li e aceito os termos de uso e a política de privacidade"),
    ]);

    let confirm_style = if accepted {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Red)
    };
    render_dialog(
        frame,
        DialogConfig {
            title: "Termos de uso",
            title_color: Color::Cyan,
            border_color: Color::Cyan,
            message: TERMS,
            body: vec![checkbox],
            hint: Some(vec![
                key_span("Espaço"),
                Span::styled(" aceitar  ", Style::default().fg(Color::DarkGray)),
                key_span("Enter"),
                Span::styled(" enviar  ", confirm_style),
                key_span("Esc"),
                Span::styled(" voltar", Style::default().fg(Color::DarkGray)),
            ]),
            max_width: 70,
        },
    );
}
