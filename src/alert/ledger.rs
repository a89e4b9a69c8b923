use crate::alert::Alert;
use std::collections::VecDeque;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

/// Newest-first alert log.
///
/// Alerts are never removed; only their `read` flag changes.
pub struct AlertLedger {
    alerts: RwLock<VecDeque<Alert>>,
}

impl AlertLedger {
    pub fn new() -> Self {
        Self {
            alerts: RwLock::new(VecDeque::new()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, VecDeque<Alert>> {
        self.alerts.read().expect("alert ledger lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, VecDeque<Alert>> {
        self.alerts.write().expect("alert ledger lock poisoned")
    }

    /// True if any alert for `entity_id` is still unread
    pub fn has_unacknowledged(&self, entity_id: &str) -> bool {
        self.read()
            .iter()
            .any(|a| a.entity_id == entity_id && !a.read)
    }

    /// Prepend a new unread alert.
    ///
    /// Does not apply suppression; callers that need it use
    /// `record_unless_outstanding`.
    pub fn record(&self, entity_id: &str, entity_name: &str, message: String) -> Alert {
        let alert = Alert::new(entity_id, entity_name, message);
        self.write().push_front(alert.clone());
        info!(alert_id = %alert.id, entity_id = %entity_id, "Alert recorded");
        alert
    }

    /// Suppression check and insert under one lock.
    ///
    /// Returns None when `entity_id` already has an unread alert.
    pub fn record_unless_outstanding(
        &self,
        entity_id: &str,
        entity_name: &str,
        message: String,
    ) -> Option<Alert> {
        let mut alerts = self.write();

        if alerts.iter().any(|a| a.entity_id == entity_id && !a.read) {
            debug!(entity_id = %entity_id, "Alert suppressed, unacknowledged alert outstanding");
            return None;
        }

        let alert = Alert::new(entity_id, entity_name, message);
        alerts.push_front(alert.clone());
        info!(alert_id = %alert.id, entity_id = %entity_id, "Alert recorded");
        Some(alert)
    }

    /// Mark an alert read. Returns false if the id is unknown.
    pub fn acknowledge(&self, alert_id: &str) -> bool {
        let mut alerts = self.write();

        match alerts.iter_mut().find(|a| a.id == alert_id) {
            Some(alert) => {
                alert.read = true;
                info!(alert_id = %alert_id, entity_id = %alert.entity_id, "Alert acknowledged");
                true
            }
            None => false,
        }
    }

    pub fn get(&self, alert_id: &str) -> Option<Alert> {
        self.read().iter().find(|a| a.id == alert_id).cloned()
    }

    /// All alerts, newest first
    pub fn all(&self) -> Vec<Alert> {
        self.read().iter().cloned().collect()
    }

    pub fn unacknowledged_count(&self) -> usize {
        self.read().iter().filter(|a| !a.read).count()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AlertLedger {
    fn default() -> Self {
        Self::new()
    }
}
