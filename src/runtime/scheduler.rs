use super::{AppEvent, Flow};
use crate::gateway::{EmailMessage, SubmissionGateway};
use crate::state::TimerEvent;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Spawns timer and delivery tasks; aborts outstanding timers on drop.
pub struct Scheduler {
    tx: UnboundedSender<AppEvent>,
    timers: Vec<JoinHandle<()>>,
}

impl Scheduler {
    pub fn new() -> (Self, UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                timers: Vec::new(),
            },
            rx,
        )
    }

    /// Fire `event` once `after` has elapsed.
    pub fn schedule(&mut self, after: Duration, event: TimerEvent) {
        self.timers.retain(|handle| !handle.is_finished());
        let tx = self.tx.clone();
        self.timers.push(tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = tx.send(AppEvent::Timer(event));
        }));
    }

    /// Send `message` in the background and report the outcome.
    ///
    /// Delivery tasks are not tracked: an in-flight call is never cancelled.
    pub fn dispatch(
        &self,
        gateway: Arc<dyn SubmissionGateway>,
        flow: Flow,
        message: EmailMessage,
    ) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let delivered = match gateway.send_email(&message).await {
                Ok(receipt) => {
                    info!(gateway = gateway.name(), status = receipt.status, ?flow, "Email delivered");
                    true
                }
                Err(e) => {
                    error!(gateway = gateway.name(), ?flow, "Email delivery failed: {e}");
                    false
                }
            };
            let _ = tx.send(AppEvent::Delivery { flow, delivered });
        });
    }

    pub fn cancel_all(&mut self) {
        for handle in self.timers.drain(..) {
            handle.abort();
        }
    }

    pub fn pending(&self) -> usize {
        self.timers.iter().filter(|h| !h.is_finished()).count()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
