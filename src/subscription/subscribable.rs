// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscribable trait for types that publish session events.

use crate::state::StateChange;
use crate::subscription::{ErrorReport, FieldTransition, SubscriptionId};

/// Trait for types that support event subscriptions.
///
/// # Examples
///
/// ```no_run
/// use shall_lib::{DeviceAddress, DeviceSession};
/// use shall_lib::subscription::{FieldTransition, Subscribable};
///
/// # async fn example() -> shall_lib::Result<()> {
/// let session = DeviceSession::http(DeviceAddress::default()).build()?;
///
/// let sub_id = session.on_field_transition(|transition| {
///     if let FieldTransition::Failed { revert_to, .. } = transition {
///         println!("revert to {revert_to:?}");
///     }
/// });
///
/// session.on_error(|report| eprintln!("{report}"));
///
/// session.unsubscribe(sub_id);
/// # Ok(())
/// # }
/// ```
pub trait Subscribable {
    /// Subscribes to snapshot changes.
    ///
    /// The callback receives each confirmed field, and a batch whenever a
    /// status load replaces the whole snapshot.
    fn on_snapshot_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StateChange) + Send + Sync + 'static;

    /// Subscribes to per-field state machine transitions.
    fn on_field_transition<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&FieldTransition) + Send + Sync + 'static;

    /// Subscribes to structured error reports.
    fn on_error<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ErrorReport) + Send + Sync + 'static;

    /// Unsubscribes a callback by its subscription ID.
    ///
    /// Returns `true` if the subscription was found and removed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}
