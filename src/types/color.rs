// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hue/saturation color for the LED controller.
//!
//! The controller takes hue in degrees (0-359) and saturation on the full
//! byte range (0-255). Brightness is a separate channel, so there is no
//! value component here.

use std::fmt;

use serde::Serialize;

use crate::error::ValueError;

/// Hue/saturation pair, always submitted to the device as one unit.
///
/// # Examples
///
/// ```
/// use shall_lib::types::HsColor;
///
/// let teal = HsColor::new(180, 200).unwrap();
/// assert_eq!(teal.hue(), 180);
/// assert_eq!(teal.saturation(), 200);
///
/// // Hue wraps at 360
/// assert!(HsColor::new(360, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HsColor {
    hue: u16,
    saturation: u8,
}

impl HsColor {
    /// Largest accepted hue, in degrees.
    pub const MAX_HUE: u16 = 359;

    /// Largest accepted saturation.
    pub const MAX_SATURATION: u8 = u8::MAX;

    /// Creates a new color.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidHue` if `hue` is 360 or more.
    pub fn new(hue: u16, saturation: u8) -> Result<Self, ValueError> {
        if hue > Self::MAX_HUE {
            return Err(ValueError::InvalidHue(hue));
        }
        Ok(Self { hue, saturation })
    }

    /// Creates a color from unit-interval components, as produced by color
    /// pickers.
    ///
    /// Hue is scaled to degrees and wrapped, so `1.0` maps back to 0.
    /// Saturation is scaled to 0-255. Components outside `[0.0, 1.0]` are
    /// clamped first.
    ///
    /// # Examples
    ///
    /// ```
    /// use shall_lib::types::HsColor;
    ///
    /// let color = HsColor::from_fractions(0.5, 1.0);
    /// assert_eq!(color.hue(), 180);
    /// assert_eq!(color.saturation(), 255);
    ///
    /// assert_eq!(HsColor::from_fractions(1.0, 0.0).hue(), 0);
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_fractions(hue: f32, saturation: f32) -> Self {
        let hue = hue.clamp(0.0, 1.0);
        let saturation = saturation.clamp(0.0, 1.0);
        // Truncation matches the device firmware's integer conversion
        let degrees = (hue * 360.0) as u16 % 360;
        Self {
            hue: degrees,
            saturation: (saturation * 255.0) as u8,
        }
    }

    /// Returns the hue in degrees (0-359).
    #[must_use]
    pub const fn hue(&self) -> u16 {
        self.hue
    }

    /// Returns the saturation (0-255).
    #[must_use]
    pub const fn saturation(&self) -> u8 {
        self.saturation
    }

    /// Returns hue and saturation as fractions of their full range.
    #[must_use]
    pub fn as_fractions(&self) -> (f32, f32) {
        (
            f32::from(self.hue) / 360.0,
            f32::from(self.saturation) / 255.0,
        )
    }
}

impl Default for HsColor {
    /// White: no saturation.
    fn default() -> Self {
        Self {
            hue: 0,
            saturation: 0,
        }
    }
}

impl fmt::Display for HsColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hue {}, Saturation {}", self.hue, self.saturation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hs_color_valid_range() {
        for hue in [0, 1, 180, 359] {
            let color = HsColor::new(hue, 128).unwrap();
            assert_eq!(color.hue(), hue);
            assert_eq!(color.saturation(), 128);
        }
    }

    #[test]
    fn hs_color_invalid_hue() {
        assert!(matches!(
            HsColor::new(360, 0),
            Err(ValueError::InvalidHue(360))
        ));
    }

    #[test]
    fn hs_color_from_fractions_wraps_and_clamps() {
        assert_eq!(HsColor::from_fractions(1.0, 1.0), HsColor::new(0, 255).unwrap());
        assert_eq!(HsColor::from_fractions(-0.5, 2.0), HsColor::new(0, 255).unwrap());
        assert_eq!(HsColor::from_fractions(0.25, 0.5).hue(), 90);
        assert_eq!(HsColor::from_fractions(0.25, 0.5).saturation(), 127);
    }

    #[test]
    fn hs_color_as_fractions() {
        let (h, s) = HsColor::new(180, 255).unwrap().as_fractions();
        assert!((h - 0.5).abs() < f32::EPSILON);
        assert!((s - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn hs_color_serializes_as_request_body() {
        let json = serde_json::to_value(HsColor::new(200, 100).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({"hue": 200, "saturation": 100}));
    }

    #[test]
    fn hs_color_display() {
        let color = HsColor::new(200, 100).unwrap();
        assert_eq!(color.to_string(), "Hue 200, Saturation 100");
    }
}
