// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Authoritative mirror of the controller's state.

use crate::error::ParseError;
use crate::response::StatusResponse;
use crate::types::{Brightness, HsColor, Mode, NormalizedMode, PowerState};

use super::{FieldKind, StateChange};

/// Last device-confirmed state of a controller.
///
/// A snapshot starts empty, is replaced wholesale by a status load and is
/// updated one field at a time as submissions are confirmed. Every field is
/// optional because nothing is known until the device has reported it.
///
/// # Examples
///
/// ```
/// use shall_lib::state::DeviceSnapshot;
/// use shall_lib::response::StatusResponse;
/// use shall_lib::types::Mode;
///
/// let json = r#"{"power":true,"brightness":128,"hue":180,"saturation":200,"mode":"adaptive"}"#;
/// let status: StatusResponse = serde_json::from_str(json).unwrap();
/// let snapshot = DeviceSnapshot::from_status(&status).unwrap();
///
/// assert!(snapshot.is_complete());
/// assert_eq!(snapshot.hue(), Some(180));
/// assert_eq!(snapshot.mode(), Some(Mode::Adaptive));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceSnapshot {
    power: Option<PowerState>,
    brightness: Option<Brightness>,
    color: Option<HsColor>,
    mode: Option<NormalizedMode>,
}

impl DeviceSnapshot {
    /// Creates a new empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a complete snapshot from a status payload.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the color is out of range or no mode key is
    /// present.
    pub fn from_status(status: &StatusResponse) -> Result<Self, ParseError> {
        Ok(Self {
            power: Some(status.power()),
            brightness: Some(status.brightness()),
            color: Some(status.color()?),
            mode: Some(status.mode()?),
        })
    }

    /// Returns `true` if no field is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.power.is_none()
            && self.brightness.is_none()
            && self.color.is_none()
            && self.mode.is_none()
    }

    /// Returns `true` if every field is known.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.power.is_some()
            && self.brightness.is_some()
            && self.color.is_some()
            && self.mode.is_some()
    }

    // ========== Accessors ==========

    /// Gets the power state.
    #[must_use]
    pub fn power(&self) -> Option<PowerState> {
        self.power
    }

    /// Gets the brightness.
    #[must_use]
    pub fn brightness(&self) -> Option<Brightness> {
        self.brightness
    }

    /// Gets the color.
    #[must_use]
    pub fn color(&self) -> Option<HsColor> {
        self.color
    }

    /// Gets the hue in degrees.
    #[must_use]
    pub fn hue(&self) -> Option<u16> {
        self.color.map(|c| c.hue())
    }

    /// Gets the saturation.
    #[must_use]
    pub fn saturation(&self) -> Option<u8> {
        self.color.map(|c| c.saturation())
    }

    /// Gets the effective operating mode.
    #[must_use]
    pub fn mode(&self) -> Option<Mode> {
        self.mode.as_ref().map(NormalizedMode::mode)
    }

    /// Gets the mode together with its normalization record.
    #[must_use]
    pub fn normalized_mode(&self) -> Option<&NormalizedMode> {
        self.mode.as_ref()
    }

    /// Returns the unrecognized mode string the current mode was
    /// substituted for, if any.
    #[must_use]
    pub fn mode_fallback(&self) -> Option<&str> {
        self.mode.as_ref().and_then(NormalizedMode::fallback_from)
    }

    /// Returns the confirmed value of a field as a change, if known.
    ///
    /// This is the value a presentation layer reverts to after a failed
    /// submission.
    #[must_use]
    pub fn value_of(&self, field: FieldKind) -> Option<StateChange> {
        match field {
            FieldKind::Power => self.power.map(StateChange::Power),
            FieldKind::Brightness => self.brightness.map(StateChange::Brightness),
            FieldKind::Color => self.color.map(StateChange::Color),
            FieldKind::Mode => self.mode.clone().map(StateChange::Mode),
        }
    }

    /// Returns every known field as one batch.
    #[must_use]
    pub fn to_change(&self) -> StateChange {
        StateChange::batch(
            FieldKind::ALL
                .iter()
                .filter_map(|field| self.value_of(*field))
                .collect(),
        )
    }

    // ========== State Changes ==========

    /// Applies a state change.
    ///
    /// Returns `true` if the snapshot changed.
    pub fn apply(&mut self, change: &StateChange) -> bool {
        match change {
            StateChange::Power(state) => replace(&mut self.power, *state),
            StateChange::Brightness(level) => replace(&mut self.brightness, *level),
            StateChange::Color(color) => replace(&mut self.color, *color),
            StateChange::Mode(mode) => replace(&mut self.mode, mode.clone()),
            StateChange::Batch(changes) => {
                let mut changed = false;
                for change in changes {
                    changed |= self.apply(change);
                }
                changed
            }
        }
    }

    /// Forgets every field.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn replace<T: PartialEq>(slot: &mut Option<T>, value: T) -> bool {
    if slot.as_ref() == Some(&value) {
        false
    } else {
        *slot = Some(value);
        true
    }
}
