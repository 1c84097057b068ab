// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operating mode of the LED controller.
//!
//! Unknown mode strings reported by the device are not an error: they
//! normalize to [`Mode::Manual`]. [`NormalizedMode`] keeps the original
//! string around so that a fallback can be told apart from a genuine
//! `"manual"`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Operating mode of the controller.
///
/// # Examples
///
/// ```
/// use shall_lib::types::Mode;
///
/// let mode: Mode = "adaptive".parse().unwrap();
/// assert_eq!(mode, Mode::Adaptive);
/// assert_eq!(mode.as_str(), "adaptive");
/// assert_eq!(mode.label(), "Adaptive");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Color and brightness are set by the user.
    #[default]
    Manual,
    /// The controller follows the time of day.
    Adaptive,
    /// The controller follows its ambient sensors.
    Environmental,
}

impl Mode {
    /// All modes, in display order.
    pub const ALL: [Self; 3] = [Self::Manual, Self::Adaptive, Self::Environmental];

    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Adaptive => "adaptive",
            Self::Environmental => "environmental",
        }
    }

    /// Returns a capitalized label for status messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Manual => "Manual",
            Self::Adaptive => "Adaptive",
            Self::Environmental => "Environmental",
        }
    }

    /// Decodes a mode string reported by the device, falling back to
    /// [`Mode::Manual`] for anything unrecognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use shall_lib::types::Mode;
    ///
    /// let genuine = Mode::normalize("manual");
    /// let fallback = Mode::normalize("bogus");
    /// assert_eq!(genuine.mode(), fallback.mode());
    /// assert!(!genuine.is_fallback());
    /// assert_eq!(fallback.fallback_from(), Some("bogus"));
    /// ```
    #[must_use]
    pub fn normalize(raw: &str) -> NormalizedMode {
        match raw.parse::<Self>() {
            Ok(mode) => NormalizedMode::reported(mode),
            Err(_) => NormalizedMode {
                mode: Self::Manual,
                fallback_from: Some(raw.to_string()),
            },
        }
    }

    /// Maps the legacy `adaptive_mode` flag onto a mode.
    #[must_use]
    pub const fn from_adaptive_flag(adaptive: bool) -> Self {
        if adaptive { Self::Adaptive } else { Self::Manual }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(Self::Manual),
            "adaptive" => Ok(Self::Adaptive),
            "environmental" => Ok(Self::Environmental),
            _ => Err(ValueError::InvalidMode(s.to_string())),
        }
    }
}

/// A mode decoded from the device, with a record of any normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedMode {
    mode: Mode,
    fallback_from: Option<String>,
}

impl NormalizedMode {
    /// A mode the device reported verbatim.
    #[must_use]
    pub const fn reported(mode: Mode) -> Self {
        Self {
            mode,
            fallback_from: None,
        }
    }

    /// Returns the effective mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns `true` if the mode was substituted for an unknown string.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        self.fallback_from.is_some()
    }

    /// Returns the unrecognized string the device sent, if any.
    #[must_use]
    pub fn fallback_from(&self) -> Option<&str> {
        self.fallback_from.as_deref()
    }
}

impl From<Mode> for NormalizedMode {
    fn from(mode: Mode) -> Self {
        Self::reported(mode)
    }
}
