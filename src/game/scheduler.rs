//! Delayed delivery of bot turns.
//!
//! A tokio task sleeps for the thinking delay and then sends the ticket back
//! over a channel; the UI loop drains it with `try_recv`. The ticket still
//! has to pass [`Session::is_current`](super::Session::is_current) when it is
//! redeemed, so a reset that races the timer cannot be overwritten.

use super::BotTurn;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

pub struct BotScheduler {
    delay: Duration,
    tx: mpsc::UnboundedSender<BotTurn>,
    rx: mpsc::UnboundedReceiver<BotTurn>,
    task: Option<JoinHandle<()>>,
    scheduled: Option<BotTurn>,
}

impl BotScheduler {
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            delay,
            tx,
            rx,
            task: None,
            scheduled: None,
        }
    }

    /// Arms the timer for `turn`. Re-scheduling the same ticket is a no-op;
    /// a different ticket replaces the pending one.
    pub fn schedule(&mut self, turn: BotTurn) {
        if self.scheduled == Some(turn) {
            return;
        }
        self.cancel();

        let tx = self.tx.clone();
        let delay = self.delay;
        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(turn);
        }));
        self.scheduled = Some(turn);
        debug!(?turn, "bot turn scheduled");
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        if let Some(turn) = self.scheduled.take() {
            debug!(?turn, "bot turn cancelled");
        }
        while self.rx.try_recv().is_ok() {}
    }

    pub fn is_pending(&self) -> bool {
        self.scheduled.is_some()
    }

    /// Ticket whose delay has elapsed, if any.
    pub fn try_recv(&mut self) -> Option<BotTurn> {
        let turn = self.rx.try_recv().ok()?;
        self.finish(turn);
        Some(turn)
    }

    pub async fn recv(&mut self) -> Option<BotTurn> {
        let turn = self.rx.recv().await?;
        self.finish(turn);
        Some(turn)
    }

    fn finish(&mut self, turn: BotTurn) {
        if self.scheduled == Some(turn) {
            self.scheduled = None;
            self.task = None;
        }
    }
}

impl Drop for BotScheduler {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
