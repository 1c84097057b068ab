// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.
//!
//! A [`StateChange`] is one confirmed value for one field, or a batch of
//! them. Changes are applied to a [`DeviceSnapshot`](super::DeviceSnapshot)
//! and published to subscribers; they are never built from values the device
//! has not confirmed.
//!
//! # Examples
//!
//! ```
//! use shall_lib::state::{DeviceSnapshot, StateChange};
//! use shall_lib::types::{Brightness, PowerState};
//!
//! let mut snapshot = DeviceSnapshot::new();
//!
//! // Apply returns true if the snapshot actually changed
//! assert!(snapshot.apply(&StateChange::Power(PowerState::On)));
//! assert!(!snapshot.apply(&StateChange::Power(PowerState::On)));
//!
//! snapshot.apply(&StateChange::Brightness(Brightness::new(64)));
//! assert_eq!(snapshot.brightness(), Some(Brightness::new(64)));
//! ```

use std::fmt;

use crate::types::{Brightness, HsColor, Mode, NormalizedMode, PowerState};

/// The independently synchronized attributes of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKind {
    /// On/off.
    Power,
    /// Brightness level.
    Brightness,
    /// Hue and saturation, as one unit.
    Color,
    /// Operating mode.
    Mode,
}

impl FieldKind {
    /// All fields, in the order batches are submitted.
    pub const ALL: [Self; 4] = [Self::Power, Self::Brightness, Self::Color, Self::Mode];

    /// Returns a capitalized name for status messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Power => "Power",
            Self::Brightness => "Brightness",
            Self::Color => "Color",
            Self::Mode => "Mode",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Represents a confirmed change in device state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    /// Power state changed.
    Power(PowerState),

    /// Brightness changed.
    Brightness(Brightness),

    /// Hue and saturation changed together.
    Color(HsColor),

    /// Operating mode changed, possibly normalized from an unknown string.
    Mode(NormalizedMode),

    /// Multiple changes at once.
    ///
    /// Used when a full status load replaces every field.
    Batch(Vec<StateChange>),
}

impl StateChange {
    /// Creates a mode change the device reported verbatim.
    #[must_use]
    pub fn mode(mode: Mode) -> Self {
        Self::Mode(NormalizedMode::reported(mode))
    }

    /// Creates a batch of changes.
    #[must_use]
    pub fn batch(changes: Vec<StateChange>) -> Self {
        Self::Batch(changes)
    }

    /// Returns the field this change targets, or `None` for a batch.
    #[must_use]
    pub fn field(&self) -> Option<FieldKind> {
        match self {
            Self::Power(_) => Some(FieldKind::Power),
            Self::Brightness(_) => Some(FieldKind::Brightness),
            Self::Color(_) => Some(FieldKind::Color),
            Self::Mode(_) => Some(FieldKind::Mode),
            Self::Batch(_) => None,
        }
    }

    /// Returns `true` if this is a batch.
    #[must_use]
    pub fn is_batch(&self) -> bool {
        matches!(self, Self::Batch(_))
    }

    /// Returns the number of individual changes, flattening batches.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Batch(changes) => changes.iter().map(Self::len).sum(),
            _ => 1,
        }
    }

    /// Returns `true` if this is an empty batch.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for StateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Power(state) => write!(f, "Power {state}"),
            Self::Brightness(level) => write!(f, "Brightness {level}"),
            Self::Color(color) => write!(f, "Color {color}"),
            Self::Mode(mode) => match mode.fallback_from() {
                Some(raw) => write!(f, "Mode {} (from {raw:?})", mode.mode().label()),
                None => write!(f, "Mode {}", mode.mode().label()),
            },
            Self::Batch(changes) => write!(f, "Batch of {}", changes.len()),
        }
    }
}
