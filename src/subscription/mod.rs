// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscription system for session events.
//!
//! The core never prints. Everything a presentation layer or an
//! observability collaborator needs to know is published here:
//!
//! - snapshot changes ([`StateChange`](crate::state::StateChange))
//! - per-field state machine steps ([`FieldTransition`])
//! - structured failures ([`ErrorReport`])
//!
//! Callbacks run synchronously on the task that produced the event.

mod callback;
mod event;
mod subscribable;

pub use callback::{CallbackRegistry, SubscriptionId};
pub use event::{ErrorReport, FieldTransition, Operation};
pub use subscribable::Subscribable;
