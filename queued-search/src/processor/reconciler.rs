//! Reconciliation of drained notifications.
//!
//! Notifications for the same identifier collapse to the chronologically last
//! one: an entity updated then deleted is only deleted, one deleted then
//! updated again is only updated. Duplicates collapse to a single action.

use std::collections::HashMap;

use queued_search_shared::{Action, Notification};
use tracing::{debug, instrument};

/// Net updates and net deletes, keyed by identifier.
///
/// An identifier is never pending in both sets. Each entry remembers the
/// sequence number of the notification that put it there, and iteration
/// follows that order so batches are deterministic.
#[derive(Debug, Clone, Default)]
pub struct ActionSet {
    pending_updates: HashMap<String, u64>,
    pending_deletes: HashMap<String, u64>,
    sequence: u64,
}

impl ActionSet {
    /// Create an empty action set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one notification into the set.
    pub fn record(&mut self, notification: &Notification) {
        self.sequence += 1;
        let identifier = notification.identifier.clone();

        match notification.action {
            Action::Update => {
                // Deleted then re-created: the delete no longer applies.
                self.pending_deletes.remove(&identifier);
                self.pending_updates.insert(identifier, self.sequence);
            }
            Action::Delete => {
                // Updated then deleted: only the delete matters.
                self.pending_updates.remove(&identifier);
                self.pending_deletes.insert(identifier, self.sequence);
            }
        }
    }

    /// Identifiers with a net update, in order of their last notification.
    pub fn updates(&self) -> Vec<&str> {
        Self::ordered(&self.pending_updates)
    }

    /// Identifiers with a net delete, in order of their last notification.
    pub fn deletes(&self) -> Vec<&str> {
        Self::ordered(&self.pending_deletes)
    }

    /// Net action of an identifier, if it has one.
    pub fn action_for(&self, identifier: &str) -> Option<Action> {
        if self.pending_updates.contains_key(identifier) {
            Some(Action::Update)
        } else if self.pending_deletes.contains_key(identifier) {
            Some(Action::Delete)
        } else {
            None
        }
    }

    /// Number of net updates.
    pub fn update_count(&self) -> usize {
        self.pending_updates.len()
    }

    /// Number of net deletes.
    pub fn delete_count(&self) -> usize {
        self.pending_deletes.len()
    }

    /// Number of identifiers with a net action.
    pub fn len(&self) -> usize {
        self.update_count() + self.delete_count()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ordered(entries: &HashMap<String, u64>) -> Vec<&str> {
        let mut ordered: Vec<(&str, u64)> =
            entries.iter().map(|(id, seq)| (id.as_str(), *seq)).collect();
        ordered.sort_unstable_by_key(|(_, seq)| *seq);
        ordered.into_iter().map(|(id, _)| id).collect()
    }
}

/// Builds an [`ActionSet`] from an ordered sequence of notifications.
#[derive(Debug, Default)]
pub struct Reconciler;

impl Reconciler {
    /// Create a new reconciler.
    pub fn new() -> Self {
        Self
    }

    /// Reconcile notifications, given in queue order.
    #[instrument(skip(self, notifications))]
    pub fn reconcile<'a, I>(&self, notifications: I) -> ActionSet
    where
        I: IntoIterator<Item = &'a Notification>,
    {
        let mut actions = ActionSet::new();

        for notification in notifications {
            actions.record(notification);
            debug!(
                action = %notification.action,
                identifier = %notification.identifier,
                "Recorded net action"
            );
        }

        debug!(
            updates = actions.update_count(),
            deletes = actions.delete_count(),
            "Reconciled notifications"
        );
        actions
    }
}
