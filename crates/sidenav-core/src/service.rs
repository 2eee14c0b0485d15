//! Event-driven scroller service.
//!
//! Reacts to two triggers: the host document becoming ready, and each
//! navigation-completion signal. Every trigger schedules one deferred
//! adjustment after the configured settle delay. Triggers are never
//! de-duplicated or cancelled; the visibility guard in the adjustment
//! makes overlapping invocations harmless.

use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::config::ScrollConfig;
use crate::motion::MotionPreference;
use crate::nav::NavTree;
use crate::schedule::DeferredTask;
use crate::scroller::{adjust_scroll_to_active, Adjustment};

/// Host document lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Loading,
    Ready,
}

/// Notification from the host's navigation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavSignal {
    NavigationCompleted,
}

/// Keeps the active sidebar link in view across page lifecycle events
pub struct ScrollerService {
    tree: Arc<Mutex<NavTree>>,
    config: ScrollConfig,
    reduced_motion: bool,
    event_tx: Option<mpsc::UnboundedSender<Adjustment>>,
}

impl ScrollerService {
    /// Create a new scroller service. The motion preference is read
    /// exactly once, here; its value is logged but adjustments are
    /// instant either way.
    pub fn new(
        tree: Arc<Mutex<NavTree>>,
        config: ScrollConfig,
        motion: &dyn MotionPreference,
    ) -> Self {
        let reduced_motion =
            config.respect_reduced_motion && motion.prefers_reduced_motion();
        info!(reduced_motion, "scroller uses instant scrolling");
        Self {
            tree,
            config,
            reduced_motion,
            event_tx: None,
        }
    }

    /// Set the event sender for adjustment notifications
    pub fn with_event_sender(mut self, tx: mpsc::UnboundedSender<Adjustment>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// The preference value captured at construction
    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Run one adjustment immediately, bypassing the settle delay
    pub fn adjust_now(&self) -> Adjustment {
        let mut tree = self.tree.lock().unwrap_or_else(|p| p.into_inner());
        let adjustment = adjust_scroll_to_active(&mut tree, self.config.top_bias);
        drop(tree);
        self.send_event(adjustment);
        adjustment
    }

    fn send_event(&self, adjustment: Adjustment) {
        if let Some(ref tx) = self.event_tx {
            if tx.send(adjustment).is_err() {
                warn!("failed to send scroller event: receiver dropped");
            }
        }
    }

    /// Schedule one adjustment after the settle delay. The task fires
    /// unconditionally once spawned.
    fn schedule_adjust(&self) -> DeferredTask {
        let tree = Arc::clone(&self.tree);
        let top_bias = self.config.top_bias;
        let event_tx = self.event_tx.clone();
        DeferredTask::spawn(self.config.settle_delay(), move || {
            let mut tree = tree.lock().unwrap_or_else(|p| p.into_inner());
            let adjustment = adjust_scroll_to_active(&mut tree, top_bias);
            drop(tree);
            if let Some(tx) = event_tx {
                if tx.send(adjustment).is_err() {
                    warn!("failed to send scroller event: receiver dropped");
                }
            }
        })
    }

    /// React to lifecycle events until shutdown.
    ///
    /// Defers the first adjustment until the document is ready, then
    /// schedules one more per navigation signal. `nav_rx` may be `None`
    /// when the host exposes no navigation hook; that is a normal state
    /// and only the initial adjustment happens.
    pub async fn run(
        self,
        mut readiness: watch::Receiver<Readiness>,
        mut nav_rx: Option<mpsc::UnboundedReceiver<NavSignal>>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        // Equivalent of waiting for DOMContentLoaded
        while *readiness.borrow() == Readiness::Loading {
            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        info!("scroller stopped before document became ready");
                        return;
                    }
                }
                result = readiness.changed() => {
                    if result.is_err() {
                        info!("readiness channel closed, scroller stopping");
                        return;
                    }
                }
            }
        }

        info!(
            settle_delay_ms = self.config.settle_delay_ms,
            has_nav_hook = nav_rx.is_some(),
            "scroller started"
        );

        let mut in_flight: Vec<DeferredTask> = Vec::new();
        in_flight.push(self.schedule_adjust());

        loop {
            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        info!("scroller received shutdown signal");
                        break;
                    }
                }

                signal = recv_nav(&mut nav_rx) => {
                    match signal {
                        Some(NavSignal::NavigationCompleted) => {
                            debug!("navigation completed, scheduling adjustment");
                            in_flight.retain(|t| !t.is_finished());
                            in_flight.push(self.schedule_adjust());
                        }
                        None => {
                            // Hook closed by the host; keep serving the
                            // remaining triggers
                            debug!("navigation channel closed");
                            nav_rx = None;
                        }
                    }
                }
            }
        }

        // Scheduled adjustments fire even across shutdown
        for task in in_flight {
            task.join().await;
        }
        info!("scroller stopped");
    }
}

async fn recv_nav(rx: &mut Option<mpsc::UnboundedReceiver<NavSignal>>) -> Option<NavSignal> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
