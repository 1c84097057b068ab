// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brightness level of the LED strip.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Brightness level on the controller's full byte range (0-255).
///
/// Unlike a percentage dimmer every `u8` is a valid level, so construction
/// from a byte cannot fail. Wider integers go through [`TryFrom`].
///
/// # Examples
///
/// ```
/// use shall_lib::types::Brightness;
///
/// let half = Brightness::new(128);
/// assert_eq!(half.value(), 128);
///
/// assert!(Brightness::try_from(256_u16).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Brightness(u8);

impl Brightness {
    /// Fully dimmed.
    pub const MIN: Self = Self(0);

    /// Full brightness.
    pub const MAX: Self = Self(u8::MAX);

    /// Creates a new brightness level.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Returns the raw level.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns the level as a fraction between 0.0 and 1.0.
    #[must_use]
    pub fn as_fraction(&self) -> f32 {
        f32::from(self.0) / 255.0
    }

    /// Creates a brightness level from a fraction between 0.0 and 1.0.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the fraction is outside [0.0, 1.0].
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_fraction(fraction: f32) -> Result<Self, ValueError> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 255,
                // Informational only, the fraction is already out of range
                actual: (fraction.max(0.0) * 255.0) as u16,
            });
        }
        Ok(Self((fraction * 255.0).round() as u8))
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for Brightness {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl TryFrom<u16> for Brightness {
    type Error = ValueError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map(Self)
            .map_err(|_| ValueError::OutOfRange {
                min: 0,
                max: 255,
                actual: value,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_full_range() {
        for v in 0..=255_u8 {
            assert_eq!(Brightness::new(v).value(), v);
        }
    }

    #[test]
    fn brightness_try_from_wide() {
        assert_eq!(Brightness::try_from(255_u16).unwrap(), Brightness::MAX);
        assert!(matches!(
            Brightness::try_from(300_u16),
            Err(ValueError::OutOfRange { actual: 300, .. })
        ));
    }

    #[test]
    fn brightness_fractions() {
        assert_eq!(Brightness::from_fraction(0.0).unwrap(), Brightness::MIN);
        assert_eq!(Brightness::from_fraction(1.0).unwrap(), Brightness::MAX);
        assert_eq!(Brightness::from_fraction(0.5).unwrap().value(), 128);
        assert!(Brightness::from_fraction(1.1).is_err());
        assert!((Brightness::MAX.as_fraction() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn brightness_serde_is_a_bare_integer() {
        let json = serde_json::to_string(&Brightness::new(42)).unwrap();
        assert_eq!(json, "42");
        let parsed: Brightness = serde_json::from_str("200").unwrap();
        assert_eq!(parsed.value(), 200);
        assert!(serde_json::from_str::<Brightness>("256").is_err());
    }
}
