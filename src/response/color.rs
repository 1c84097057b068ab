// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color response parsing.

use serde::Deserialize;

use crate::error::ParseError;
use crate::types::HsColor;

/// Response from `POST /api/color`.
///
/// Hue and saturation are always confirmed together.
///
/// # Examples
///
/// ```
/// use shall_lib::response::ColorResponse;
///
/// let json = r#"{"success": true, "hue": 200, "saturation": 100}"#;
/// let response: ColorResponse = serde_json::from_str(json).unwrap();
/// let color = response.color().unwrap();
/// assert_eq!((color.hue(), color.saturation()), (200, 100));
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ColorResponse {
    success: bool,
    hue: u16,
    saturation: u8,
}

impl ColorResponse {
    /// Returns whether the device reported success.
    #[must_use]
    pub fn success(&self) -> bool {
        self.success
    }

    /// Returns the color the device settled on.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidValue` if the hue is 360 or more.
    pub fn color(&self) -> Result<HsColor, ParseError> {
        super::decode_color(self.hue, self.saturation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_color_response() {
        let response: ColorResponse =
            serde_json::from_str(r#"{"success": true, "hue": 0, "saturation": 255}"#).unwrap();
        assert_eq!(response.color().unwrap(), HsColor::new(0, 255).unwrap());
    }

    #[test]
    fn color_response_rejects_hue_out_of_range() {
        let response: ColorResponse =
            serde_json::from_str(r#"{"success": true, "hue": 400, "saturation": 10}"#).unwrap();
        assert!(matches!(
            response.color(),
            Err(ParseError::InvalidValue { field, .. }) if field == "hue"
        ));
    }

    #[test]
    fn color_response_requires_both_components() {
        assert!(
            serde_json::from_str::<ColorResponse>(r#"{"success": true, "hue": 10}"#).is_err()
        );
    }
}
