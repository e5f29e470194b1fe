//! Diagnostic wizard state machine
//!
//! The controller is pure: every operation mutates the owned [`WizardState`]
//! and returns the [`Effect`]s the runtime must carry out (timers,
//! persistence, dispatch). Timed continuations carry the epoch they were
//! scheduled in; bumping the epoch invalidates all of them at once.

use super::alert::{AlertKind, FormAlert, Shake};
use super::forms::StepInput;
use super::payload::SubmissionPayload;
use super::steps::{step, InputKind, DIAGNOSTIC_STEPS, TOTAL_STEPS};
use super::{Answer, Answers};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, info};

pub const EXIT_DURATION: Duration = Duration::from_millis(300);
pub const ENTRY_DURATION: Duration = Duration::from_millis(400);
pub const AUTO_ADVANCE_DELAY: Duration = Duration::from_millis(400);
pub const SUCCESS_REDIRECT_DELAY: Duration = Duration::from_millis(1500);
pub const FAILURE_REDIRECT_DELAY: Duration = Duration::from_millis(5000);

pub const MSG_DELIVERED: &str = "Diagnóstico enviado com sucesso! Redirecionando...";
pub const MSG_DELIVERY_FAILED: &str =
    "Não foi possível enviar agora. Guardamos uma cópia; pressione R para tentar novamente.";
pub const MSG_SUBMISSION_DISABLED: &str =
    "Envio indisponível: nenhum canal de entrega configurado.";
pub const MSG_CONSENT_REQUIRED: &str = "Aceite os termos para enviar o diagnóstico.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStage {
    Exiting,
    Entering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Transitioning {
        direction: Direction,
        target: usize,
        stage: TransitionStage,
    },
    /// Final step validated; waiting for the terms to be accepted
    AwaitingConsent { accepted: bool },
    Submitting,
    Delivered,
    DeliveryFailed,
    Finished { delivered: bool },
}

/// Live progress of one session
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    /// 1-based, always within `1..=TOTAL_STEPS`
    pub current_step: usize,
    pub answers: Answers,
    pub phase: Phase,
    pub started_at: DateTime<Utc>,
}

/// Persisted view of the wizard progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    pub step: usize,
    pub answers: Answers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    ExitComplete,
    EntryComplete,
    /// Auto-advance after an option card was picked on `step`
    AutoAdvance { step: usize },
    Redirect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent {
    pub epoch: u64,
    pub kind: TimerKind,
}

/// Side effect requested by the controller
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Schedule { after: Duration, event: TimerEvent },
    Persist(Checkpoint),
    ClearProgress,
    Backup(SubmissionPayload),
    Dispatch(SubmissionPayload),
}

#[derive(Debug, Clone)]
pub struct WizardController {
    state: WizardState,
    input: StepInput,
    epoch: u64,
    alert: Option<FormAlert>,
    shake: Option<Shake>,
    submission_disabled: bool,
    /// Payload in flight, or kept for retry after a failed delivery
    pending: Option<SubmissionPayload>,
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl WizardController {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            state: WizardState {
                current_step: 1,
                answers: Answers::new(),
                phase: Phase::Idle,
                started_at,
            },
            input: StepInput::for_step(&DIAGNOSTIC_STEPS[0], None),
            epoch: 0,
            alert: None,
            shake: None,
            submission_disabled: false,
            pending: None,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn input(&self) -> &StepInput {
        &self.input
    }

    pub fn current_step(&self) -> usize {
        self.state.current_step
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn answers(&self) -> &Answers {
        &self.state.answers
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn alert(&self) -> Option<&FormAlert> {
        self.alert.as_ref().filter(|a| a.is_visible())
    }

    pub fn shake(&self) -> Option<Shake> {
        self.shake
    }

    pub fn pending_payload(&self) -> Option<&SubmissionPayload> {
        self.pending.as_ref()
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.state.phase, Phase::Transitioning { .. })
    }

    pub fn is_submission_disabled(&self) -> bool {
        self.submission_disabled
    }

    /// Fraction of the flow reached, for the progress bar
    pub fn progress(&self) -> f64 {
        self.state.current_step as f64 / TOTAL_STEPS as f64
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            step: self.state.current_step,
            answers: self.state.answers.clone(),
        }
    }

    fn is_idle(&self) -> bool {
        if self.state.phase == Phase::Idle {
            return true;
        }
        debug!(phase = ?self.state.phase, "transition ignored");
        false
    }

    fn timer(&self, after: Duration, kind: TimerKind) -> Effect {
        Effect::Schedule {
            after,
            event: TimerEvent {
                epoch: self.epoch,
                kind,
            },
        }
    }

    fn reject(&mut self, error: crate::validate::ValidationError) {
        debug!(step = self.state.current_step, %error, "step rejected");
        self.input.set_error(error);
        self.shake = Some(Shake::start());
        self.alert = Some(FormAlert::new(AlertKind::Error, error.message()));
    }

    fn load_input(&mut self) {
        if let Some(def) = step(self.state.current_step) {
            self.input = StepInput::for_step(def, self.state.answers.get(def.key));
        }
    }

    fn begin_transition(&mut self, direction: Direction, target: usize) -> Vec<Effect> {
        debug!(from = self.state.current_step, to = target, ?direction, "transition");
        self.state.phase = Phase::Transitioning {
            direction,
            target,
            stage: TransitionStage::Exiting,
        };
        vec![self.timer(EXIT_DURATION, TimerKind::ExitComplete)]
    }

    /// Drop every scheduled continuation.
    pub fn cancel_pending(&mut self) {
        self.epoch += 1;
    }

    /// Validate and commit the current step, then advance or enter the
    /// consent gate on the last step.
    pub fn next(&mut self) -> Vec<Effect> {
        if !self.is_idle() {
            return Vec::new();
        }
        let committed = match self.input.commit() {
            Ok(answer) => answer,
            Err(error) => {
                self.reject(error);
                return Vec::new();
            }
        };
        let key = self.input.step.key.to_string();
        match committed {
            Some(answer) => {
                self.state.answers.insert(key, answer);
            }
            None => {
                self.state.answers.remove(&key);
            }
        }
        self.shake = None;
        self.input.clear_error();

        let k = self.state.current_step;
        if k < TOTAL_STEPS {
            return self.begin_transition(Direction::Forward, k + 1);
        }
        if self.submission_disabled {
            self.alert = Some(FormAlert::sticky(AlertKind::Error, MSG_SUBMISSION_DISABLED));
            return vec![Effect::Persist(self.checkpoint())];
        }
        self.state.phase = Phase::AwaitingConsent { accepted: false };
        vec![Effect::Persist(self.checkpoint())]
    }

    /// Go back one step without validation. No-op on step 1.
    pub fn prev(&mut self) -> Vec<Effect> {
        if !self.is_idle() || self.state.current_step <= 1 {
            return Vec::new();
        }
        self.begin_transition(Direction::Backward, self.state.current_step - 1)
    }

    /// Programmatic navigation to any valid step, without validation.
    pub fn jump_to(&mut self, target: usize) -> Vec<Effect> {
        if !(1..=TOTAL_STEPS).contains(&target) || target == self.state.current_step {
            return Vec::new();
        }
        if !self.is_idle() {
            return Vec::new();
        }
        let direction = if target > self.state.current_step {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.begin_transition(direction, target)
    }

    /// Continuation of a scheduled timer. Stale epochs are ignored.
    pub fn on_timer(&mut self, event: TimerEvent) -> Vec<Effect> {
        if event.epoch != self.epoch {
            debug!(?event, current = self.epoch, "stale timer ignored");
            return Vec::new();
        }
        match (event.kind, self.state.phase) {
            (
                TimerKind::ExitComplete,
                Phase::Transitioning {
                    direction,
                    target,
                    stage: TransitionStage::Exiting,
                },
            ) => {
                self.state.current_step = target;
                self.load_input();
                self.state.phase = Phase::Transitioning {
                    direction,
                    target,
                    stage: TransitionStage::Entering,
                };
                vec![
                    Effect::Persist(self.checkpoint()),
                    self.timer(ENTRY_DURATION, TimerKind::EntryComplete),
                ]
            }
            (
                TimerKind::EntryComplete,
                Phase::Transitioning {
                    stage: TransitionStage::Entering,
                    ..
                },
            ) => {
                self.state.phase = Phase::Idle;
                Vec::new()
            }
            (TimerKind::AutoAdvance { step }, Phase::Idle)
                if step == self.state.current_step =>
            {
                self.next()
            }
            (TimerKind::Redirect, Phase::Delivered) => {
                self.state.phase = Phase::Finished { delivered: true };
                self.state.answers.clear();
                Vec::new()
            }
            (TimerKind::Redirect, Phase::DeliveryFailed) => {
                self.state.phase = Phase::Finished { delivered: false };
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    /// Pick an option card; auto-advances after a short delay.
    pub fn select_option(&mut self, index: usize) -> Vec<Effect> {
        if !self.is_idle() || !self.input.select(index) {
            return Vec::new();
        }
        let step = self.state.current_step;
        vec![self.timer(AUTO_ADVANCE_DELAY, TimerKind::AutoAdvance { step })]
    }

    /// Select or toggle the option under the cursor, depending on the step kind.
    pub fn activate_cursor(&mut self) -> Vec<Effect> {
        let cursor = self.input.cursor;
        match self.input.step.kind {
            InputKind::SingleSelect(_) => self.select_option(cursor),
            InputKind::MultiSelect(_) => {
                self.toggle_checkbox(cursor);
                Vec::new()
            }
            InputKind::Text { .. } => Vec::new(),
        }
    }

    pub fn toggle_checkbox(&mut self, index: usize) {
        if self.state.phase == Phase::Idle {
            self.input.toggle(index);
        }
    }

    pub fn cursor_up(&mut self) {
        self.input.cursor_up();
    }

    pub fn cursor_down(&mut self) {
        self.input.cursor_down();
    }

    pub fn input_char(&mut self, c: char) {
        if self.state.phase == Phase::Idle && self.input.is_text() {
            self.input.field.push_char(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.state.phase == Phase::Idle && self.input.is_text() {
            self.input.field.pop_char();
        }
    }

    pub fn apply_suggestion(&mut self, index: usize) {
        if self.state.phase == Phase::Idle {
            self.input.apply_suggestion(index);
        }
    }

    pub fn toggle_consent(&mut self) {
        if let Phase::AwaitingConsent { accepted } = self.state.phase {
            self.state.phase = Phase::AwaitingConsent {
                accepted: !accepted,
            };
        }
    }

    /// Leave the consent gate and stay on the final step.
    pub fn cancel_consent(&mut self) {
        if matches!(self.state.phase, Phase::AwaitingConsent { .. }) {
            self.state.phase = Phase::Idle;
        }
    }

    /// Build the payload and dispatch it. Requires accepted terms.
    pub fn confirm_consent(&mut self) -> Vec<Effect> {
        match self.state.phase {
            Phase::AwaitingConsent { accepted: true } => {
                let payload =
                    SubmissionPayload::build(&self.state.answers, self.state.started_at, Utc::now());
                info!(submission = %payload.submission_id, "submitting diagnostic");
                self.pending = Some(payload.clone());
                self.state.phase = Phase::Submitting;
                vec![Effect::Dispatch(payload)]
            }
            Phase::AwaitingConsent { accepted: false } => {
                self.alert = Some(FormAlert::new(AlertKind::Info, MSG_CONSENT_REQUIRED));
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    /// Outcome of the gateway call for the payload in flight.
    pub fn on_delivery(&mut self, delivered: bool) -> Vec<Effect> {
        if self.state.phase != Phase::Submitting {
            return Vec::new();
        }
        if delivered {
            self.state.phase = Phase::Delivered;
            self.pending = None;
            self.alert = Some(FormAlert::new(AlertKind::Success, MSG_DELIVERED));
            return vec![
                Effect::ClearProgress,
                self.timer(SUCCESS_REDIRECT_DELAY, TimerKind::Redirect),
            ];
        }
        self.state.phase = Phase::DeliveryFailed;
        self.alert = Some(FormAlert::new(AlertKind::Error, MSG_DELIVERY_FAILED));
        let mut effects = Vec::new();
        if let Some(payload) = &self.pending {
            effects.push(Effect::Backup(payload.clone()));
        }
        effects.push(self.timer(FAILURE_REDIRECT_DELAY, TimerKind::Redirect));
        effects
    }

    /// Re-dispatch the same payload after a failed delivery.
    pub fn retry(&mut self) -> Vec<Effect> {
        if self.state.phase != Phase::DeliveryFailed {
            return Vec::new();
        }
        let Some(payload) = self.pending.clone() else {
            return Vec::new();
        };
        self.cancel_pending();
        self.state.phase = Phase::Submitting;
        self.alert = None;
        info!(submission = %payload.submission_id, "retrying delivery");
        vec![Effect::Dispatch(payload)]
    }

    /// Resume a saved session. Earlier steps are not re-validated.
    pub fn restore(&mut self, checkpoint: Checkpoint) -> bool {
        if !(1..=TOTAL_STEPS).contains(&checkpoint.step) {
            return false;
        }
        self.cancel_pending();
        self.state.current_step = checkpoint.step;
        self.state.answers = checkpoint.answers;
        self.state.phase = Phase::Idle;
        self.load_input();
        info!(step = checkpoint.step, "session restored");
        true
    }

    /// Start over from step 1 with no answers.
    pub fn reset(&mut self) -> Vec<Effect> {
        self.cancel_pending();
        let disabled = self.submission_disabled;
        let alert = self.alert.take().filter(|_| disabled);
        *self = Self {
            epoch: self.epoch,
            submission_disabled: disabled,
            alert,
            ..Self::new(Utc::now())
        };
        vec![Effect::ClearProgress]
    }

    /// No delivery path exists; keep the flow usable but block submission.
    pub fn disable_submission(&mut self) {
        self.submission_disabled = true;
        self.alert = Some(FormAlert::sticky(AlertKind::Error, MSG_SUBMISSION_DISABLED));
    }

    /// Answer committed for a step key
    pub fn answer(&self, key: &str) -> Option<&Answer> {
        self.state.answers.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FormatClass, NOT_PROVIDED};
    use crate::validate::ValidationError;

    /// Run scheduled timers until the controller settles.
    fn settle(wizard: &mut WizardController, mut effects: Vec<Effect>) -> Vec<Effect> {
        let mut seen = Vec::new();
        while !effects.is_empty() {
            let mut next = Vec::new();
            for effect in effects {
                if let Effect::Schedule { event, .. } = &effect {
                    if !matches!(event.kind, TimerKind::Redirect) {
                        next.extend(wizard.on_timer(*event));
                    }
                }
                seen.push(effect);
            }
            effects = next;
        }
        seen
    }

    fn type_text(wizard: &mut WizardController, text: &str) {
        for c in text.chars() {
            wizard.input_char(c);
        }
    }

    fn answer_current(wizard: &mut WizardController) {
        let step = step(wizard.current_step()).unwrap();
        match step.kind {
            InputKind::Text { .. } => {
                let value = match step.format {
                    FormatClass::Email => "ana@mail.com",
                    FormatClass::Phone => "71999998888",
                    FormatClass::Url => "site.com.br",
                    FormatClass::Name => "Ana",
                    FormatClass::Plain => "Resposta",
                };
                type_text(wizard, value);
            }
            InputKind::SingleSelect(_) => {
                wizard.input.select(0);
            }
            InputKind::MultiSelect(_) => wizard.toggle_checkbox(0),
        }
    }

    fn advance(wizard: &mut WizardController) {
        answer_current(wizard);
        let effects = wizard.next();
        settle(wizard, effects);
    }

    fn at_final_step() -> WizardController {
        let mut wizard = WizardController::default();
        while wizard.current_step() < TOTAL_STEPS {
            advance(&mut wizard);
        }
        wizard
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_starts_idle_at_step_one() {
            let wizard = WizardController::default();
            assert_eq!(wizard.current_step(), 1);
            assert_eq!(wizard.phase(), Phase::Idle);
            assert!(wizard.answers().is_empty());
        }

        #[test]
        fn test_valid_next_advances_one_step() {
            let mut wizard = WizardController::default();
            type_text(&mut wizard, "Ana");
            let effects = wizard.next();
            assert!(wizard.is_transitioning());
            assert_eq!(wizard.current_step(), 1);
            let seen = settle(&mut wizard, effects);
            assert_eq!(wizard.current_step(), 2);
            assert_eq!(wizard.phase(), Phase::Idle);
            assert!(seen.contains(&Effect::Persist(wizard.checkpoint())));
        }

        #[test]
        fn test_exit_then_entry_timings() {
            let mut wizard = WizardController::default();
            type_text(&mut wizard, "Ana");
            let effects = wizard.next();
            assert!(matches!(
                effects.as_slice(),
                [Effect::Schedule { after, event }]
                    if *after == EXIT_DURATION && event.kind == TimerKind::ExitComplete
            ));
            let TimerEvent { epoch, .. } = match &effects[0] {
                Effect::Schedule { event, .. } => *event,
                _ => unreachable!(),
            };
            let effects = wizard.on_timer(TimerEvent {
                epoch,
                kind: TimerKind::ExitComplete,
            });
            assert!(effects.iter().any(|e| matches!(
                e,
                Effect::Schedule { after, .. } if *after == ENTRY_DURATION
            )));
            assert_eq!(wizard.current_step(), 2);
            assert!(wizard.is_transitioning());
        }

        #[test]
        fn test_double_next_advances_once() {
            let mut wizard = WizardController::default();
            type_text(&mut wizard, "Ana");
            let first = wizard.next();
            let second = wizard.next();
            assert!(second.is_empty());
            settle(&mut wizard, first);
            assert_eq!(wizard.current_step(), 2);
        }

        #[test]
        fn test_prev_at_step_one_is_noop() {
            let mut wizard = WizardController::default();
            assert!(wizard.prev().is_empty());
            assert_eq!(wizard.current_step(), 1);
        }

        #[test]
        fn test_prev_needs_no_validation_and_prefills() {
            let mut wizard = WizardController::default();
            advance(&mut wizard);
            let effects = wizard.prev();
            settle(&mut wizard, effects);
            assert_eq!(wizard.current_step(), 1);
            assert_eq!(wizard.input().field.as_text(), "Ana");
        }

        #[test]
        fn test_jump_to_bounds() {
            let mut wizard = WizardController::default();
            assert!(wizard.jump_to(0).is_empty());
            assert!(wizard.jump_to(TOTAL_STEPS + 1).is_empty());
            let effects = wizard.jump_to(12);
            settle(&mut wizard, effects);
            assert_eq!(wizard.current_step(), 12);
        }

        #[test]
        fn test_step_stays_in_bounds_for_any_sequence() {
            let mut wizard = WizardController::default();
            for round in 0..60 {
                let effects = match round % 5 {
                    0 | 1 => {
                        answer_current(&mut wizard);
                        wizard.next()
                    }
                    2 => wizard.prev(),
                    3 => wizard.jump_to(round % (TOTAL_STEPS + 3)),
                    _ => {
                        wizard.cancel_consent();
                        wizard.prev()
                    }
                };
                settle(&mut wizard, effects);
                let step = wizard.current_step();
                assert!((1..=TOTAL_STEPS).contains(&step), "step {step} out of range");
            }
        }

        #[test]
        fn test_stale_timers_are_ignored() {
            let mut wizard = WizardController::default();
            type_text(&mut wizard, "Ana");
            let effects = wizard.next();
            wizard.cancel_pending();
            let seen = settle(&mut wizard, effects);
            assert_eq!(seen.len(), 1);
            assert_eq!(wizard.current_step(), 1);
        }
    }

    mod validation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_whitespace_name_is_rejected() {
            let mut wizard = WizardController::default();
            type_text(&mut wizard, "   ");
            assert!(wizard.next().is_empty());
            assert_eq!(wizard.current_step(), 1);
            assert_eq!(wizard.phase(), Phase::Idle);
            assert!(wizard.answers().is_empty());
            assert_eq!(wizard.input().error(), Some(ValidationError::Required));
            assert!(wizard.shake().is_some());
            assert_eq!(
                wizard.alert().map(|a| a.message.as_str()),
                Some("Por favor, preencha este campo")
            );
        }

        #[test]
        fn test_email_step_commits_sanitized_value() {
            let mut wizard = WizardController::default();
            advance(&mut wizard);
            advance(&mut wizard);
            assert_eq!(wizard.current_step(), 3);
            type_text(&mut wizard, "  John.Doe@EXAMPLE.com<script>");
            let effects = wizard.next();
            settle(&mut wizard, effects);
            assert_eq!(wizard.current_step(), 4);
            assert_eq!(
                wizard.answer("email"),
                Some(&Answer::Text("john.doe@example.com".into()))
            );
        }

        #[test]
        fn test_empty_optional_step_removes_answer() {
            let mut wizard = WizardController::default();
            let mut answers = Answers::new();
            answers.insert("site_atual".into(), Answer::Text("velho.com".into()));
            wizard.restore(Checkpoint { step: 5, answers });
            for _ in 0.."velho.com".len() {
                wizard.backspace();
            }
            let effects = wizard.next();
            settle(&mut wizard, effects);
            assert_eq!(wizard.current_step(), 6);
            assert_eq!(wizard.answer("site_atual"), None);
        }

        #[test]
        fn test_multi_select_needs_one_checked() {
            let mut wizard = WizardController::default();
            let effects = wizard.jump_to(9);
            settle(&mut wizard, effects);
            assert!(wizard.next().is_empty());
            assert_eq!(
                wizard.input().error(),
                Some(ValidationError::NoOptionChecked)
            );
            wizard.toggle_checkbox(1);
            let effects = wizard.next();
            settle(&mut wizard, effects);
            assert_eq!(wizard.current_step(), 10);
        }
    }

    mod auto_advance {
        use super::*;
        use pretty_assertions::assert_eq;

        fn at_segment_step() -> WizardController {
            let mut wizard = WizardController::default();
            let effects = wizard.jump_to(6);
            settle(&mut wizard, effects);
            wizard
        }

        #[test]
        fn test_selecting_option_schedules_next() {
            let mut wizard = at_segment_step();
            let effects = wizard.select_option(2);
            assert_eq!(
                effects,
                vec![Effect::Schedule {
                    after: AUTO_ADVANCE_DELAY,
                    event: TimerEvent {
                        epoch: wizard.epoch(),
                        kind: TimerKind::AutoAdvance { step: 6 },
                    },
                }]
            );
            settle(&mut wizard, effects);
            assert_eq!(wizard.current_step(), 7);
            assert_eq!(wizard.answer("segmento"), Some(&Answer::Text("Indústria".into())));
        }

        #[test]
        fn test_auto_advance_goes_through_guard() {
            let mut wizard = at_segment_step();
            let auto = wizard.select_option(0);
            let manual = wizard.next();
            settle(&mut wizard, manual);
            assert_eq!(wizard.current_step(), 7);
            settle(&mut wizard, auto);
            assert_eq!(wizard.current_step(), 7);
        }

        #[test]
        fn test_auto_advance_during_transition_is_ignored() {
            let mut wizard = at_segment_step();
            let auto = wizard.select_option(0);
            let manual = wizard.next();
            for effect in &auto {
                if let Effect::Schedule { event, .. } = effect {
                    assert!(wizard.on_timer(*event).is_empty());
                }
            }
            settle(&mut wizard, manual);
            assert_eq!(wizard.current_step(), 7);
        }

        #[test]
        fn test_select_on_text_step_does_nothing() {
            let mut wizard = WizardController::default();
            assert!(wizard.select_option(0).is_empty());
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        fn submitting() -> WizardController {
            let mut wizard = at_final_step();
            type_text(&mut wizard, "Obrigado");
            let effects = wizard.next();
            assert_eq!(effects, vec![Effect::Persist(wizard.checkpoint())]);
            assert_eq!(wizard.phase(), Phase::AwaitingConsent { accepted: false });
            wizard.toggle_consent();
            let effects = wizard.confirm_consent();
            assert!(matches!(effects.as_slice(), [Effect::Dispatch(_)]));
            wizard
        }

        #[test]
        fn test_consent_required_before_dispatch() {
            let mut wizard = at_final_step();
            let effects = wizard.next();
            settle(&mut wizard, effects);
            assert!(wizard.confirm_consent().is_empty());
            assert_eq!(
                wizard.alert().map(|a| a.message.as_str()),
                Some(MSG_CONSENT_REQUIRED)
            );
            wizard.cancel_consent();
            assert_eq!(wizard.phase(), Phase::Idle);
            assert_eq!(wizard.current_step(), TOTAL_STEPS);
        }

        #[test]
        fn test_payload_defaults_missing_fields() {
            let wizard = submitting();
            let payload = wizard.pending_payload().unwrap();
            assert_eq!(payload.field("nome"), "Ana");
            assert_eq!(payload.field("observacoes"), "Obrigado");
            assert_ne!(payload.field("concorrentes"), "");
            assert_eq!(wizard.phase(), Phase::Submitting);
            let mut wizard = wizard;
            assert!(wizard.next().is_empty());
            assert!(wizard.confirm_consent().is_empty());
        }

        #[test]
        fn test_success_clears_progress_and_redirects() {
            let mut wizard = submitting();
            let effects = wizard.on_delivery(true);
            assert_eq!(effects[0], Effect::ClearProgress);
            assert!(matches!(
                effects[1],
                Effect::Schedule { after, event } if after == SUCCESS_REDIRECT_DELAY
                    && event.kind == TimerKind::Redirect
            ));
            assert_eq!(wizard.phase(), Phase::Delivered);
            if let Effect::Schedule { event, .. } = effects[1] {
                wizard.on_timer(event);
            }
            assert_eq!(wizard.phase(), Phase::Finished { delivered: true });
            assert!(wizard.answers().is_empty());
        }

        #[test]
        fn test_failure_backs_up_and_keeps_progress() {
            let mut wizard = submitting();
            let effects = wizard.on_delivery(false);
            assert!(matches!(effects[0], Effect::Backup(_)));
            assert!(!effects.contains(&Effect::ClearProgress));
            assert!(matches!(
                effects[1],
                Effect::Schedule { after, .. } if after == FAILURE_REDIRECT_DELAY
            ));
            assert_eq!(wizard.phase(), Phase::DeliveryFailed);
            assert_eq!(
                wizard.alert().map(|a| a.message.as_str()),
                Some(MSG_DELIVERY_FAILED)
            );
            if let Effect::Schedule { event, .. } = effects[1] {
                wizard.on_timer(event);
            }
            assert_eq!(wizard.phase(), Phase::Finished { delivered: false });
            assert!(!wizard.answers().is_empty());
        }

        #[test]
        fn test_retry_redispatches_same_payload() {
            let mut wizard = submitting();
            let id = wizard.pending_payload().unwrap().submission_id;
            let failed = wizard.on_delivery(false);
            let effects = wizard.retry();
            match effects.as_slice() {
                [Effect::Dispatch(payload)] => assert_eq!(payload.submission_id, id),
                other => panic!("unexpected effects {other:?}"),
            }
            for effect in failed {
                if let Effect::Schedule { event, .. } = effect {
                    assert!(wizard.on_timer(event).is_empty());
                }
            }
            assert_eq!(wizard.phase(), Phase::Submitting);
        }

        #[test]
        fn test_delivery_outside_submitting_is_ignored() {
            let mut wizard = WizardController::default();
            assert!(wizard.on_delivery(true).is_empty());
            assert!(wizard.retry().is_empty());
        }

        #[test]
        fn test_disabled_submission_stays_on_final_step() {
            let mut wizard = at_final_step();
            wizard.disable_submission();
            let effects = wizard.next();
            assert!(matches!(effects.as_slice(), [Effect::Persist(_)]));
            assert_eq!(wizard.phase(), Phase::Idle);
            assert_eq!(wizard.current_step(), TOTAL_STEPS);
            assert_eq!(
                wizard.alert().map(|a| a.message.as_str()),
                Some(MSG_SUBMISSION_DISABLED)
            );
        }

        #[test]
        fn test_unanswered_optional_fields_use_placeholder() {
            let mut wizard = WizardController::default();
            let effects = wizard.jump_to(TOTAL_STEPS);
            settle(&mut wizard, effects);
            wizard.next();
            wizard.toggle_consent();
            wizard.confirm_consent();
            let payload = wizard.pending_payload().unwrap();
            assert_eq!(payload.field("nome"), NOT_PROVIDED);
            assert_eq!(payload.field("observacoes"), NOT_PROVIDED);
        }
    }

    mod lifecycle {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_restore_at_step_five() {
            let mut answers = Answers::new();
            answers.insert("nome".into(), Answer::Text("Ana".into()));
            let mut wizard = WizardController::default();
            assert!(wizard.restore(Checkpoint {
                step: 5,
                answers: answers.clone(),
            }));
            assert_eq!(wizard.current_step(), 5);
            assert_eq!(wizard.answers(), &answers);
            assert_eq!(wizard.input().step.key, "site_atual");
            assert_eq!(wizard.input().error(), None);
        }

        #[test]
        fn test_restore_out_of_range_is_refused() {
            let mut wizard = WizardController::default();
            assert!(!wizard.restore(Checkpoint {
                step: 99,
                answers: Answers::new(),
            }));
            assert_eq!(wizard.current_step(), 1);
        }

        #[test]
        fn test_reset_returns_to_start() {
            let mut wizard = WizardController::default();
            advance(&mut wizard);
            advance(&mut wizard);
            let epoch = wizard.epoch();
            assert_eq!(wizard.reset(), vec![Effect::ClearProgress]);
            assert_eq!(wizard.current_step(), 1);
            assert!(wizard.answers().is_empty());
            assert!(wizard.epoch() > epoch);
        }

        #[test]
        fn test_progress_fraction() {
            let mut wizard = WizardController::default();
            assert!((wizard.progress() - 1.0 / 17.0).abs() < f64::EPSILON);
            advance(&mut wizard);
            assert!((wizard.progress() - 2.0 / 17.0).abs() < f64::EPSILON);
        }
    }
}
