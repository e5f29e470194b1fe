//! Contact form screen

use super::components::{render_alert, render_button, render_consent_dialog, BUTTON_HEIGHT};
use super::forms::{draw_field, field_height};
use crate::app::App;
use crate::state::{AlertKind, ContactPhase, Form, FormAlert};
use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    Frame,
};

const FORM_WIDTH: u16 = 72;
const SEND_BUTTON_WIDTH: u16 = 20;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.contact;
    let [column] = Layout::horizontal([Constraint::Max(FORM_WIDTH)])
        .flex(Flex::Center)
        .areas(area);

    let mut constraints: Vec<Constraint> = (0..4)
        .filter_map(|i| form.get_field(i))
        .map(|f| Constraint::Length(field_height(f)))
        .collect();
    constraints.push(Constraint::Length(BUTTON_HEIGHT));
    constraints.push(Constraint::Length(2));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(column);

    let editing = form.phase() == ContactPhase::Editing;
    for i in 0..4 {
        if let Some(field) = form.get_field(i) {
            draw_field(frame, rows[i], field, editing && form.active_field() == i);
        }
    }

    let [button_area] = Layout::horizontal([Constraint::Length(SEND_BUTTON_WIDTH)])
        .flex(Flex::Start)
        .areas(rows[4]);
    let label = if form.phase() == ContactPhase::Sending {
        "Enviando..."
    } else {
        "Enviar"
    };
    render_button(
        frame,
        button_area,
        label,
        form.is_buttons_row_active(),
        editing,
    );

    match form.phase() {
        ContactPhase::Sending => render_alert(
            frame,
            rows[5],
            &FormAlert::sticky(AlertKind::Info, "Enviando mensagem..."),
        ),
        _ => {
            if let Some(alert) = form.alert() {
                render_alert(frame, rows[5], alert);
            }
        }
    }

    if let ContactPhase::AwaitingConsent { accepted } = form.phase() {
        render_consent_dialog(frame, accepted);
    }
}
