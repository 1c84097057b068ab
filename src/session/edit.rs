// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Candidate edits submitted through a session.

use crate::state::{FieldKind, StateChange};
use crate::types::{Brightness, HsColor, Mode, PowerState};

/// A candidate value for exactly one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// Turn the strip on or off.
    Power(PowerState),
    /// Set the brightness.
    Brightness(Brightness),
    /// Set hue and saturation together.
    Color(HsColor),
    /// Switch the operating mode.
    Mode(Mode),
}

impl Edit {
    /// Returns the field this edit targets.
    #[must_use]
    pub fn field(&self) -> FieldKind {
        match self {
            Self::Power(_) => FieldKind::Power,
            Self::Brightness(_) => FieldKind::Brightness,
            Self::Color(_) => FieldKind::Color,
            Self::Mode(_) => FieldKind::Mode,
        }
    }

    /// Returns the edit as the state change it would produce if confirmed
    /// verbatim.
    #[must_use]
    pub fn to_change(&self) -> StateChange {
        match self {
            Self::Power(state) => StateChange::Power(*state),
            Self::Brightness(level) => StateChange::Brightness(*level),
            Self::Color(color) => StateChange::Color(*color),
            Self::Mode(mode) => StateChange::mode(*mode),
        }
    }
}

impl From<PowerState> for Edit {
    fn from(state: PowerState) -> Self {
        Self::Power(state)
    }
}

impl From<Brightness> for Edit {
    fn from(level: Brightness) -> Self {
        Self::Brightness(level)
    }
}

impl From<HsColor> for Edit {
    fn from(color: HsColor) -> Self {
        Self::Color(color)
    }
}

impl From<Mode> for Edit {
    fn from(mode: Mode) -> Self {
        Self::Mode(mode)
    }
}

/// Deferred edits applied together by
/// [`DeviceSession::apply_all`](crate::DeviceSession::apply_all).
///
/// At most one candidate per field. Absent fields are not submitted.
///
/// # Examples
///
/// ```
/// use shall_lib::session::PendingEdits;
/// use shall_lib::types::{Brightness, Mode, PowerState};
///
/// let edits = PendingEdits::new()
///     .with_mode(Mode::Adaptive)
///     .with_power(PowerState::On)
///     .with_brightness(Brightness::new(128));
///
/// assert_eq!(edits.len(), 3);
/// // Always submitted as Power, Brightness, Color, Mode
/// assert_eq!(edits.edits()[0], PowerState::On.into());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingEdits {
    power: Option<PowerState>,
    brightness: Option<Brightness>,
    color: Option<HsColor>,
    mode: Option<Mode>,
}

impl PendingEdits {
    /// Creates an empty set of edits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the power candidate.
    #[must_use]
    pub fn with_power(mut self, state: PowerState) -> Self {
        self.power = Some(state);
        self
    }

    /// Sets the brightness candidate.
    #[must_use]
    pub fn with_brightness(mut self, level: Brightness) -> Self {
        self.brightness = Some(level);
        self
    }

    /// Sets the color candidate.
    #[must_use]
    pub fn with_color(mut self, color: HsColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the mode candidate.
    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Adds an edit, replacing any earlier candidate for the same field.
    #[must_use]
    pub fn with(self, edit: Edit) -> Self {
        match edit {
            Edit::Power(state) => self.with_power(state),
            Edit::Brightness(level) => self.with_brightness(level),
            Edit::Color(color) => self.with_color(color),
            Edit::Mode(mode) => self.with_mode(mode),
        }
    }

    /// Returns the present edits in submission order.
    #[must_use]
    pub fn edits(&self) -> Vec<Edit> {
        [
            self.power.map(Edit::Power),
            self.brightness.map(Edit::Brightness),
            self.color.map(Edit::Color),
            self.mode.map(Edit::Mode),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Returns the number of present edits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edits().len()
    }

    /// Returns `true` if no field has a candidate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<Edit> for PendingEdits {
    fn from_iter<I: IntoIterator<Item = Edit>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::with)
    }
}
