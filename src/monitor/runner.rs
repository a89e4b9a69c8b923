use crate::alert::{exit_message, Alert};
use crate::monitor::simulation::Simulator;
use crate::monitor::window::{Clock, LocalClock, MonitoringWindow};
use crate::session::{Session, TrackerEvent};
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Summary of one evaluation tick
#[derive(Clone, Debug, Default)]
pub struct TickReport {
    pub window_open: bool,
    /// Simulated entities moved before evaluation
    pub moved: usize,
    /// Entities with a position that were evaluated
    pub evaluated: usize,
    /// Inside-to-outside transitions observed
    pub transitions: usize,
    pub alerts: Vec<Alert>,
    /// Transitions that hit an outstanding unacknowledged alert
    pub suppressed: usize,
}

/// Periodic boundary evaluation driver
pub struct Monitor {
    session: Arc<Session>,
    window: MonitoringWindow,
    clock: Arc<dyn Clock>,
    simulator: Option<Simulator>,
    period: Duration,
}

impl Monitor {
    /// Create monitor reading the local wall clock, with no simulation step
    pub fn new(session: Arc<Session>, period: Duration, window: MonitoringWindow) -> Self {
        Self {
            session,
            window,
            clock: Arc::new(LocalClock),
            simulator: None,
            period: period.max(Duration::from_millis(1)),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_simulator(mut self, simulator: Simulator) -> Self {
        self.simulator = Some(simulator);
        self
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Whether the clock currently falls inside the monitoring window
    pub fn window_open(&self) -> bool {
        self.window.contains(self.clock.time_of_day())
    }

    /// Run one tick, gating alerts on the clock
    pub fn tick(&self) -> TickReport {
        let _step = self.session.lock_step();
        let moved = self.refresh_positions();
        let window_open = self.window_open();
        let mut report = self.evaluate(window_open);
        report.moved = moved;
        report
    }

    /// Run one tick with an explicit gate decision
    pub fn tick_with(&self, window_open: bool) -> TickReport {
        let _step = self.session.lock_step();
        let moved = self.refresh_positions();
        let mut report = self.evaluate(window_open);
        report.moved = moved;
        report
    }

    fn refresh_positions(&self) -> usize {
        match &self.simulator {
            Some(simulator) => simulator.refresh(&self.session.registry),
            None => 0,
        }
    }

    /// Evaluation and alerting steps of a tick
    fn evaluate(&self, window_open: bool) -> TickReport {
        let session = &self.session;
        let boundary = session.boundary.current();
        let evaluations = session.registry.evaluate(&boundary);

        let mut report = TickReport {
            window_open,
            evaluated: evaluations.len(),
            ..Default::default()
        };

        for evaluation in evaluations {
            if evaluation.changed() {
                session.publish(TrackerEvent::ContainmentChanged {
                    entity_id: evaluation.entity.id.clone(),
                    is_inside: evaluation.entity.is_inside,
                    position: evaluation.entity.position,
                    timestamp: Utc::now(),
                });
            }

            if !evaluation.transitioned {
                continue;
            }
            report.transitions += 1;

            if !window_open {
                debug!(entity_id = %evaluation.entity.id, "Exit outside monitoring window, no alert");
                continue;
            }

            let entity = &evaluation.entity;
            match session.alerts.record_unless_outstanding(
                &entity.id,
                &entity.name,
                exit_message(&entity.name),
            ) {
                Some(alert) => {
                    warn!(
                        entity_id = %entity.id,
                        alert_id = %alert.id,
                        "Boundary breach alert raised"
                    );
                    session.publish(TrackerEvent::AlertRaised {
                        alert: alert.clone(),
                    });
                    report.alerts.push(alert);
                }
                None => report.suppressed += 1,
            }
        }

        report
    }

    /// Spawn the periodic loop. The first tick runs one period after start.
    pub fn start(self: Arc<Self>) -> MonitorHandle {
        let cancelled = Arc::new(AtomicBool::new(false));

        info!(
            period_ms = self.period.as_millis() as u64,
            simulation = self.simulator.is_some(),
            "Starting monitoring loop"
        );

        let task = tokio::spawn(run_loop(self, Arc::clone(&cancelled)));

        MonitorHandle {
            cancelled,
            task: Mutex::new(Some(task)),
        }
    }
}

async fn run_loop(monitor: Arc<Monitor>, cancelled: Arc<AtomicBool>) {
    let mut ticker = interval(monitor.period);

    // Skip missed ticks to prevent backlog under load
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // interval() completes its first tick immediately
    ticker.tick().await;

    loop {
        ticker.tick().await;

        if cancelled.load(Ordering::SeqCst) {
            break;
        }

        let report = monitor.tick();
        debug!(
            window_open = report.window_open,
            moved = report.moved,
            evaluated = report.evaluated,
            transitions = report.transitions,
            alerts = report.alerts.len(),
            suppressed = report.suppressed,
            "Monitoring tick complete"
        );
    }

    debug!("Monitoring loop exited");
}

/// Handle to a running monitoring loop.
///
/// Cancelling sets a flag checked before every tick and aborts the task.
/// Dropping the handle cancels the loop.
pub struct MonitorHandle {
    cancelled: Arc<AtomicBool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl MonitorHandle {
    /// Stop all future ticks. Safe to call more than once.
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            info!("Monitoring loop cancelled");
        }

        if let Some(task) = self.task.lock().expect("monitor task lock poisoned").take() {
            task.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
