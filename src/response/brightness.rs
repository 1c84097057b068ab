// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brightness response parsing.

use serde::Deserialize;

use crate::types::Brightness;

/// Response from `POST /api/brightness`.
///
/// Values outside 0-255 fail to decode.
///
/// # Examples
///
/// ```
/// use shall_lib::response::BrightnessResponse;
///
/// let json = r#"{"success": true, "brightness": 128}"#;
/// let response: BrightnessResponse = serde_json::from_str(json).unwrap();
/// assert_eq!(response.brightness().value(), 128);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct BrightnessResponse {
    success: bool,
    brightness: Brightness,
}

impl BrightnessResponse {
    /// Returns whether the device reported success.
    #[must_use]
    pub fn success(&self) -> bool {
        self.success
    }

    /// Returns the brightness the device settled on.
    #[must_use]
    pub fn brightness(&self) -> Brightness {
        self.brightness
    }
}
