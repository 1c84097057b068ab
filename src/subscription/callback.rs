// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for session subscriptions.
//!
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`CallbackRegistry`] - Registry for storing and dispatching callbacks

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::state::StateChange;
use crate::subscription::{ErrorReport, FieldTransition};

/// Unique identifier for a subscription.
///
/// IDs are unique within a registry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

type SnapshotCallback = Arc<dyn Fn(&StateChange) + Send + Sync>;

type TransitionCallback = Arc<dyn Fn(&FieldTransition) + Send + Sync>;

type ErrorCallback = Arc<dyn Fn(&ErrorReport) + Send + Sync>;

/// Registry for session callbacks.
///
/// Uses `parking_lot::RwLock` for interior mutability. Callbacks are cloned
/// out of the map before being invoked, so a callback may subscribe or
/// unsubscribe without deadlocking.
pub struct CallbackRegistry {
    next_id: AtomicU64,
    snapshot_callbacks: RwLock<HashMap<SubscriptionId, SnapshotCallback>>,
    transition_callbacks: RwLock<HashMap<SubscriptionId, TransitionCallback>>,
    error_callbacks: RwLock<HashMap<SubscriptionId, ErrorCallback>>,
}

impl CallbackRegistry {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            snapshot_callbacks: RwLock::new(HashMap::new()),
            transition_callbacks: RwLock::new(HashMap::new()),
            error_callbacks: RwLock::new(HashMap::new()),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    // =========================================================================
    // Registration methods
    // =========================================================================

    /// Registers a callback for snapshot changes.
    ///
    /// Called once per confirmed field, and once with a
    /// [`StateChange::Batch`] when a status load replaces the snapshot.
    pub fn on_snapshot_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StateChange) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.snapshot_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for per-field state machine transitions.
    pub fn on_field_transition<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&FieldTransition) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.transition_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for structured error reports.
    pub fn on_error<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ErrorReport) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.error_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    // =========================================================================
    // Unsubscription
    // =========================================================================

    /// Unregisters a callback by its subscription ID.
    ///
    /// Returns `true` if a callback was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.snapshot_callbacks.write().remove(&id).is_some()
            || self.transition_callbacks.write().remove(&id).is_some()
            || self.error_callbacks.write().remove(&id).is_some()
    }

    /// Clears all callbacks.
    pub fn clear(&self) {
        self.snapshot_callbacks.write().clear();
        self.transition_callbacks.write().clear();
        self.error_callbacks.write().clear();
    }

    // =========================================================================
    // Dispatch methods
    // =========================================================================

    /// Dispatches a snapshot change.
    pub fn dispatch(&self, change: &StateChange) {
        let callbacks: Vec<_> = self.snapshot_callbacks.read().values().cloned().collect();
        for callback in callbacks {
            callback(change);
        }
    }

    /// Dispatches a field transition.
    pub fn dispatch_transition(&self, transition: &FieldTransition) {
        let callbacks: Vec<_> = self
            .transition_callbacks
            .read()
            .values()
            .cloned()
            .collect();
        for callback in callbacks {
            callback(transition);
        }
    }

    /// Dispatches an error report.
    pub fn dispatch_error(&self, report: &ErrorReport) {
        let callbacks: Vec<_> = self.error_callbacks.read().values().cloned().collect();
        for callback in callbacks {
            callback(report);
        }
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Returns the total number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.snapshot_callbacks.read().len()
            + self.transition_callbacks.read().len()
            + self.error_callbacks.read().len()
    }

    /// Returns `true` if there are no registered callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}
