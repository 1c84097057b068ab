// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status response parsing.
//!
//! Two schemas are in the field. Current firmware reports
//! `"mode": "manual" | "adaptive" | "environmental"`; the first revision
//! reports `"adaptive_mode": true | false` instead. The schema is detected
//! from which key is present, with `mode` taking precedence.

use serde::Deserialize;

use crate::error::ParseError;
use crate::types::{ApiVersion, Brightness, HsColor, Mode, NormalizedMode, PowerState};

/// Response from `GET /api/status`.
///
/// # Examples
///
/// ```
/// use shall_lib::response::StatusResponse;
/// use shall_lib::types::{ApiVersion, Mode, PowerState};
///
/// let json = r#"{"power": true, "brightness": 128, "hue": 180,
///                "saturation": 200, "mode": "adaptive"}"#;
/// let status: StatusResponse = serde_json::from_str(json).unwrap();
/// assert_eq!(status.power(), PowerState::On);
/// assert_eq!(status.api_version().unwrap(), ApiVersion::V2);
/// assert_eq!(status.mode().unwrap().mode(), Mode::Adaptive);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    power: PowerState,
    brightness: Brightness,
    hue: u16,
    saturation: u8,
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    adaptive_mode: Option<bool>,
}

impl StatusResponse {
    /// Returns the power state.
    #[must_use]
    pub fn power(&self) -> PowerState {
        self.power
    }

    /// Returns the brightness.
    #[must_use]
    pub fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// Returns the current color.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidValue` if the hue is 360 or more.
    pub fn color(&self) -> Result<HsColor, ParseError> {
        super::decode_color(self.hue, self.saturation)
    }

    /// Returns the API revision this payload was produced by.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingField` if neither mode key is present.
    pub fn api_version(&self) -> Result<ApiVersion, ParseError> {
        match (&self.mode, self.adaptive_mode) {
            (Some(_), _) => Ok(ApiVersion::V2),
            (None, Some(_)) => Ok(ApiVersion::V1),
            (None, None) => Err(ParseError::MissingField("mode".to_string())),
        }
    }

    /// Returns the operating mode, normalized.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingField` if neither mode key is present.
    pub fn mode(&self) -> Result<NormalizedMode, ParseError> {
        match (&self.mode, self.adaptive_mode) {
            (Some(raw), _) => Ok(Mode::normalize(raw)),
            (None, Some(adaptive)) => Ok(Mode::from_adaptive_flag(adaptive).into()),
            (None, None) => Err(ParseError::MissingField("mode".to_string())),
        }
    }
}
