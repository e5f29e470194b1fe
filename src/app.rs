//! Application state and core logic

use crate::config::DiagnosticConfig;
use crate::gateway::{build_gateway, SubmissionGateway};
use crate::platform::{is_confirm, suggestion_index};
use crate::runtime::{AppEvent, Flow, Scheduler};
use crate::state::{
    Checkpoint, ContactForm, ContactPhase, Effect, Form, InputKind, Phase, ProgressBar,
    WizardController, MSG_SUBMISSION_DISABLED,
};
use crate::storage::{FileStore, KeyValueStore, MemoryStore, ProgressStore};
use anyhow::Result;
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, error, info, warn};

/// Entries of the home menu, in display order
pub const MENU_ITEMS: [&str; 3] = ["Iniciar diagnóstico", "Fale conosco", "Sair"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    /// A saved session exists; continue or start over
    RestorePrompt,
    Diagnostic,
    Contact,
    ThankYou,
}

/// Main application struct
pub struct App {
    pub view: View,
    pub wizard: WizardController,
    pub contact: ContactForm,
    pub menu_index: usize,
    /// Saved session offered on the restore prompt
    pub restore_offer: Option<Checkpoint>,
    /// 0 = continue, 1 = start over
    pub restore_choice: usize,
    /// Shown as a modal until dismissed
    pub errors: Vec<String>,
    pub progress_bar: ProgressBar,
    progress: ProgressStore,
    gateway: Option<Arc<dyn SubmissionGateway>>,
    scheduler: Scheduler,
    events: UnboundedReceiver<AppEvent>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance from configuration
    pub fn new(config: &DiagnosticConfig) -> Result<Self> {
        let store = open_store(config);
        let gateway = match build_gateway(config) {
            Ok(gateway) => {
                info!(gateway = gateway.name(), "Submission gateway ready");
                Some(gateway)
            }
            Err(e) => {
                error!("Submission disabled: {e}");
                None
            }
        };
        Ok(Self::with_parts(ProgressStore::new(store), gateway))
    }

    pub fn with_parts(
        progress: ProgressStore,
        gateway: Option<Arc<dyn SubmissionGateway>>,
    ) -> Self {
        let (scheduler, events) = Scheduler::new();
        let mut app = Self {
            view: View::Home,
            wizard: WizardController::new(Utc::now()),
            contact: ContactForm::new(),
            menu_index: 0,
            restore_offer: None,
            restore_choice: 0,
            errors: Vec::new(),
            progress_bar: ProgressBar::new(0.0),
            progress,
            gateway,
            scheduler,
            events,
            quit: false,
        };
        if app.gateway.is_none() {
            app.wizard.disable_submission();
            app.push_error(MSG_SUBMISSION_DISABLED);
        }
        app.progress_bar = ProgressBar::new(app.wizard.progress());
        app
    }

    /// Check if the app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    /// Cancel timers before the runtime goes away.
    pub fn shutdown(&mut self) {
        self.wizard.cancel_pending();
        self.scheduler.cancel_all();
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Error dialog is modal
        if self.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.errors.remove(0);
            }
            return;
        }

        match self.view {
            View::Home => self.handle_home_key(key),
            View::RestorePrompt => self.handle_restore_key(key),
            View::Diagnostic => self.handle_diagnostic_key(key),
            View::Contact => self.handle_contact_key(key),
            View::ThankYou => self.handle_thank_you_key(key),
        }
        self.sync();
    }

    /// Drain every event that has arrived from timers and deliveries.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Timer(timer) => {
                let effects = self.wizard.on_timer(timer);
                self.apply(effects);
            }
            AppEvent::Delivery {
                flow: Flow::Diagnostic,
                delivered,
            } => {
                let effects = self.wizard.on_delivery(delivered);
                self.apply(effects);
            }
            AppEvent::Delivery {
                flow: Flow::Contact,
                delivered,
            } => self.contact.on_delivery(delivered),
        }
        self.sync();
    }

    /// Keep the view and progress bar in step with the wizard.
    fn sync(&mut self) {
        if self.view == View::Diagnostic && matches!(self.wizard.phase(), Phase::Finished { .. }) {
            self.view = View::ThankYou;
        }
        self.progress_bar.set_target(self.wizard.progress());
    }

    /// Execute effects returned by the wizard, in order.
    fn apply(&mut self, effects: Vec<Effect>) {
        let mut queue: VecDeque<Effect> = effects.into();
        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::Schedule { after, event } => self.scheduler.schedule(after, event),
                Effect::Persist(checkpoint) => {
                    if let Err(e) = self.progress.save_checkpoint(&checkpoint) {
                        warn!(step = checkpoint.step, "Failed to save progress: {e}");
                    }
                }
                Effect::ClearProgress => {
                    if let Err(e) = self.progress.clear() {
                        warn!("Failed to clear saved progress: {e}");
                    }
                }
                Effect::Backup(payload) => {
                    if let Err(e) = self.progress.backup(&payload) {
                        warn!(submission = %payload.submission_id, "Failed to back up payload: {e}");
                    }
                }
                Effect::Dispatch(payload) => match &self.gateway {
                    Some(gateway) => self.scheduler.dispatch(
                        gateway.clone(),
                        Flow::Diagnostic,
                        payload.to_email_message(),
                    ),
                    None => {
                        error!("No submission gateway; delivery failed");
                        queue.extend(self.wizard.on_delivery(false));
                    }
                },
            }
        }
    }

    /// Fresh controller for a new session; old timers are dropped.
    fn fresh_wizard(&mut self) {
        self.scheduler.cancel_all();
        self.wizard = WizardController::new(Utc::now());
        if self.gateway.is_none() {
            self.wizard.disable_submission();
        }
        self.progress_bar = ProgressBar::new(self.wizard.progress());
    }

    fn has_session_in_memory(&self) -> bool {
        !matches!(self.wizard.phase(), Phase::Finished { .. })
            && (self.wizard.current_step() > 1 || !self.wizard.answers().is_empty())
    }

    /// Open the wizard, offering to resume a saved session.
    pub fn start_diagnostic(&mut self) {
        if self.has_session_in_memory() {
            self.view = View::Diagnostic;
            return;
        }
        if matches!(self.wizard.phase(), Phase::Finished { .. }) {
            self.fresh_wizard();
        }
        match self.progress.load_checkpoint() {
            Some(checkpoint) if checkpoint.step > 1 => {
                debug!(step = checkpoint.step, "Offering saved session");
                self.restore_offer = Some(checkpoint);
                self.restore_choice = 0;
                self.view = View::RestorePrompt;
            }
            _ => self.view = View::Diagnostic,
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.menu_index = self.menu_index.checked_sub(1).unwrap_or(MENU_ITEMS.len() - 1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
            }
            KeyCode::Enter => match self.menu_index {
                0 => self.start_diagnostic(),
                1 => self.view = View::Contact,
                _ => self.quit = true,
            },
            KeyCode::Char('d') => self.start_diagnostic(),
            KeyCode::Char('c') => self.view = View::Contact,
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    fn handle_restore_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.restore_choice = 1 - self.restore_choice;
            }
            KeyCode::Enter => {
                let resume = self.restore_choice == 0;
                self.answer_restore(resume);
            }
            KeyCode::Char('s') | KeyCode::Char('S') => self.answer_restore(true),
            KeyCode::Char('n') | KeyCode::Char('N') => self.answer_restore(false),
            KeyCode::Esc => {
                self.restore_offer = None;
                self.view = View::Home;
            }
            _ => {}
        }
    }

    /// Accept or decline the saved session, then show the wizard.
    pub fn answer_restore(&mut self, resume: bool) {
        let Some(checkpoint) = self.restore_offer.take() else {
            return;
        };
        if resume && self.wizard.restore(checkpoint) {
            self.progress_bar = ProgressBar::new(self.wizard.progress());
        } else {
            self.scheduler.cancel_all();
            let effects = self.wizard.reset();
            self.apply(effects);
        }
        self.view = View::Diagnostic;
    }

    fn handle_diagnostic_key(&mut self, key: KeyEvent) {
        match self.wizard.phase() {
            Phase::AwaitingConsent { .. } => {
                let effects = match key.code {
                    KeyCode::Char(' ') => {
                        self.wizard.toggle_consent();
                        Vec::new()
                    }
                    KeyCode::Enter => self.wizard.confirm_consent(),
                    KeyCode::Esc => {
                        self.wizard.cancel_consent();
                        Vec::new()
                    }
                    _ => Vec::new(),
                };
                self.apply(effects);
            }
            Phase::DeliveryFailed => {
                if matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R')) {
                    let effects = self.wizard.retry();
                    self.apply(effects);
                }
            }
            Phase::Submitting | Phase::Delivered | Phase::Finished { .. } => {}
            Phase::Idle | Phase::Transitioning { .. } => self.handle_step_key(key),
        }
    }

    fn handle_step_key(&mut self, key: KeyEvent) {
        let input = self.wizard.input();
        let multiline = input.step.is_multiline();
        let is_select = !input.is_text();
        let kind = input.step.kind;

        if key.code == KeyCode::Esc {
            self.view = View::Home;
            return;
        }
        if let Some(index) = suggestion_index(&key) {
            self.wizard.apply_suggestion(index);
            return;
        }

        let effects = match key.code {
            KeyCode::BackTab | KeyCode::PageUp => self.wizard.prev(),
            KeyCode::PageDown => self.wizard.next(),
            KeyCode::Enter if matches!(kind, InputKind::SingleSelect(_)) => {
                self.wizard.activate_cursor()
            }
            _ if is_confirm(&key, multiline) => self.wizard.next(),
            KeyCode::Up if is_select => {
                self.wizard.cursor_up();
                Vec::new()
            }
            KeyCode::Down if is_select => {
                self.wizard.cursor_down();
                Vec::new()
            }
            KeyCode::Char(' ') if is_select => self.wizard.activate_cursor(),
            KeyCode::Enter if multiline => {
                self.wizard.input_char('\n');
                Vec::new()
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.wizard.input_char(c);
                Vec::new()
            }
            KeyCode::Backspace => {
                self.wizard.backspace();
                Vec::new()
            }
            _ => Vec::new(),
        };
        self.apply(effects);
    }

    fn handle_contact_key(&mut self, key: KeyEvent) {
        match self.contact.phase() {
            ContactPhase::AwaitingConsent { .. } => match key.code {
                KeyCode::Char(' ') => self.contact.toggle_consent(),
                KeyCode::Enter => {
                    if let Some(message) = self.contact.confirm_consent() {
                        match &self.gateway {
                            Some(gateway) => {
                                self.scheduler
                                    .dispatch(gateway.clone(), Flow::Contact, message)
                            }
                            None => self.contact.on_delivery(false),
                        }
                    }
                }
                KeyCode::Esc => self.contact.cancel_consent(),
                _ => {}
            },
            ContactPhase::Sending => {}
            ContactPhase::Editing => self.handle_contact_editing_key(key),
        }
    }

    fn handle_contact_editing_key(&mut self, key: KeyEvent) {
        let on_button = self.contact.is_buttons_row_active();
        let multiline = self.contact.is_active_field_multiline();

        match key.code {
            KeyCode::Tab => self.contact.next_field(),
            KeyCode::BackTab => self.contact.prev_field(),
            KeyCode::Esc => self.view = View::Home,
            KeyCode::Enter if on_button => {
                self.contact.submit();
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.contact.submit();
            }
            KeyCode::Enter if is_confirm(&key, multiline) && multiline => {
                self.contact.submit();
            }
            KeyCode::Enter if multiline => {
                if let Some(field) = self.contact.get_active_field_mut() {
                    field.push_char('\n');
                }
            }
            KeyCode::Enter => self.contact.next_field(),
            KeyCode::Char(c) if !on_button && !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(field) = self.contact.get_active_field_mut() {
                    field.push_char(c);
                }
            }
            KeyCode::Backspace if !on_button => {
                if let Some(field) = self.contact.get_active_field_mut() {
                    field.pop_char();
                }
            }
            _ => {}
        }
    }

    fn handle_thank_you_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
            self.fresh_wizard();
            self.view = View::Home;
        }
    }
}

/// File store from config, or memory when no data directory is usable.
fn open_store(config: &DiagnosticConfig) -> Box<dyn KeyValueStore> {
    let store = match &config.storage_dir {
        Some(dir) => FileStore::in_dir(dir),
        None => FileStore::default_location(),
    };
    match store {
        Ok(store) => {
            debug!(path = %store.path().display(), "Using file store");
            Box::new(store)
        }
        Err(e) => {
            warn!("Progress will not survive a restart: {e}");
            Box::new(MemoryStore::new())
        }
    }
}
