//! Home screen with the main menu

use super::components::{render_button, BUTTON_HEIGHT};
use crate::app::{App, MENU_ITEMS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const MENU_WIDTH: u16 = 32;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let mut constraints = vec![Constraint::Length(4)];
    constraints.extend(MENU_ITEMS.iter().map(|_| Constraint::Length(BUTTON_HEIGHT)));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .flex(Flex::Center)
        .split(area);

    let intro = Paragraph::new(vec![
        Line::from(Span::styled(
            "Sites que trazem clientes",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("Responda o diagnóstico gratuito e receba uma proposta sob medida."),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(intro, rows[0]);

    for (idx, label) in MENU_ITEMS.iter().enumerate() {
        let [button_area] = Layout::horizontal([Constraint::Length(MENU_WIDTH)])
            .flex(Flex::Center)
            .areas(rows[idx + 1]);
        render_button(frame, button_area, label, app.menu_index == idx, true);
    }
}
