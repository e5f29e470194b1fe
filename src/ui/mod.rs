//! UI module for rendering the TUI
//!
//! Every screen is a pure function of [`App`].

mod components;
mod contact;
mod forms;
mod home;
mod layout;
mod thank_you;
mod widgets;
mod wizard;

use crate::app::{App, View};
use components::{render_choice_dialog, render_error_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, main_area) = layout::create_layout(frame.area());
    layout::draw_header(frame, header_area, app);

    match app.view {
        View::Home => home::draw(frame, main_area, app),
        View::RestorePrompt => {
            home::draw(frame, main_area, app);
            draw_restore_prompt(frame, app);
        }
        View::Diagnostic => wizard::draw(frame, main_area, app),
        View::Contact => contact::draw(frame, main_area, app),
        View::ThankYou => thank_you::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, app);

    if let Some(error) = app.errors.first() {
        render_error_dialog(frame, error);
    }
}

fn draw_restore_prompt(frame: &mut Frame, app: &App) {
    let Some(offer) = &app.restore_offer else {
        return;
    };
    let message = format!(
        "Você parou na pergunta {}. Deseja continuar de onde parou?",
        offer.step
    );
    render_choice_dialog(
        frame,
        "Diagnóstico em andamento",
        &message,
        &["Continuar", "Começar de novo"],
        app.restore_choice,
    );
}
