//! Transient user-facing cues: banners, the shake effect and the
//! progress bar animation

use std::time::{Duration, Instant};

/// Banners hide themselves after this long
pub const ALERT_TTL: Duration = Duration::from_secs(10);
/// Length of the shake effect on a rejected step
pub const SHAKE_DURATION: Duration = Duration::from_millis(400);
/// Time the progress bar takes to reach a new value
pub const PROGRESS_ANIMATION: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
    Info,
}

/// A banner message with an optional expiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormAlert {
    pub kind: AlertKind,
    pub message: String,
    expires_at: Option<Instant>,
}

impl FormAlert {
    pub fn new(kind: AlertKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            expires_at: Some(Instant::now() + ALERT_TTL),
        }
    }

    /// A banner that stays until replaced
    pub fn sticky(kind: AlertKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            expires_at: None,
        }
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| now < at)
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible_at(Instant::now())
    }
}

/// Shake cue emitted when a step is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shake {
    started_at: Instant,
}

impl Shake {
    pub fn start() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }

    pub fn is_active_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) < SHAKE_DURATION
    }

    /// Horizontal offset for the current frame, in cells
    pub fn offset_at(&self, now: Instant) -> i16 {
        if !self.is_active_at(now) {
            return 0;
        }
        let elapsed = now.saturating_duration_since(self.started_at).as_millis();
        match (elapsed / 50) % 4 {
            0 => -1,
            1 => 1,
            2 => -2,
            _ => 2,
        }
    }
}

/// Progress bar that eases between step fractions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressBar {
    from: f64,
    to: f64,
    started_at: Instant,
}

impl ProgressBar {
    pub fn new(value: f64) -> Self {
        Self {
            from: value,
            to: value,
            started_at: Instant::now(),
        }
    }

    /// Animate towards `target` starting from the currently shown value.
    pub fn set_target_at(&mut self, target: f64, now: Instant) {
        if (target - self.to).abs() < f64::EPSILON {
            return;
        }
        self.from = self.value_at(now);
        self.to = target;
        self.started_at = now;
    }

    pub fn set_target(&mut self, target: f64) {
        self.set_target_at(target, Instant::now());
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn value_at(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed >= PROGRESS_ANIMATION {
            return self.to;
        }
        let t = elapsed.as_secs_f32() / PROGRESS_ANIMATION.as_secs_f32();
        // Cubic ease-out: fast start, gentle landing
        let eased = f64::from(simple_easing::cubic_out(t));
        self.from + (self.to - self.from) * eased
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_expires_after_ttl() {
        let alert = FormAlert::new(AlertKind::Error, "falhou");
        let now = Instant::now();
        assert!(alert.is_visible_at(now));
        assert!(!alert.is_visible_at(now + ALERT_TTL + Duration::from_millis(1)));
    }

    #[test]
    fn test_sticky_alert_never_expires() {
        let alert = FormAlert::sticky(AlertKind::Error, "sem envio");
        assert!(alert.is_visible_at(Instant::now() + Duration::from_secs(3600)));
    }

    #[test]
    fn test_shake_settles() {
        let shake = Shake::start();
        let later = Instant::now() + SHAKE_DURATION + Duration::from_millis(1);
        assert!(!shake.is_active_at(later));
        assert_eq!(shake.offset_at(later), 0);
    }

    #[test]
    fn test_progress_bar_eases_to_target() {
        let start = Instant::now();
        let mut bar = ProgressBar::new(0.0);
        bar.set_target_at(1.0, start);
        assert_eq!(bar.value_at(start), 0.0);
        let mid = bar.value_at(start + PROGRESS_ANIMATION / 2);
        assert!(mid > 0.5 && mid < 1.0);
        assert_eq!(bar.value_at(start + PROGRESS_ANIMATION), 1.0);
    }

    #[test]
    fn test_progress_bar_retarget_starts_from_shown_value() {
        let start = Instant::now();
        let mut bar = ProgressBar::new(0.0);
        bar.set_target_at(1.0, start);
        let halfway = start + PROGRESS_ANIMATION / 2;
        let shown = bar.value_at(halfway);
        bar.set_target_at(0.5, halfway);
        assert_eq!(bar.value_at(halfway), shown);
        assert_eq!(bar.target(), 0.5);
    }
}
