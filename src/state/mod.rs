// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state types.
//!
//! [`DeviceSnapshot`] is the client's mirror of what the controller has
//! confirmed. [`StateChange`] is one confirmed update to it.
//!
//! # Examples
//!
//! ```
//! use shall_lib::state::{DeviceSnapshot, FieldKind, StateChange};
//! use shall_lib::types::PowerState;
//!
//! let mut snapshot = DeviceSnapshot::new();
//! snapshot.apply(&StateChange::Power(PowerState::On));
//!
//! assert_eq!(
//!     snapshot.value_of(FieldKind::Power),
//!     Some(StateChange::Power(PowerState::On))
//! );
//! ```

mod snapshot;
mod state_change;

pub use snapshot::DeviceSnapshot;
pub use state_change::{FieldKind, StateChange};
