//! Runtime glue between the pure state machines and tokio
//!
//! Timers and gateway calls run as spawned tasks that report back
//! through a single channel drained by the UI loop.

mod scheduler;

pub use scheduler::Scheduler;

use crate::state::TimerEvent;

/// Which flow a delivery result belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Diagnostic,
    Contact,
}

/// Events delivered to the UI loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Timer(TimerEvent),
    Delivery { flow: Flow, delivered: bool },
}
