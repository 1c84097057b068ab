// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power response parsing.

use serde::Deserialize;

use crate::types::PowerState;

/// Response from `POST /api/power`.
///
/// # Examples
///
/// ```
/// use shall_lib::response::PowerResponse;
/// use shall_lib::types::PowerState;
///
/// let json = r#"{"success": true, "power": false}"#;
/// let response: PowerResponse = serde_json::from_str(json).unwrap();
/// assert!(response.success());
/// assert_eq!(response.power(), PowerState::Off);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PowerResponse {
    success: bool,
    power: PowerState,
}

impl PowerResponse {
    /// Returns whether the device reported success.
    #[must_use]
    pub fn success(&self) -> bool {
        self.success
    }

    /// Returns the power state the device settled on.
    #[must_use]
    pub fn power(&self) -> PowerState {
        self.power
    }
}
