// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mode response parsing for both API revisions.

use serde::Deserialize;

use crate::types::{Mode, NormalizedMode};

/// Response from `POST /api/mode`.
///
/// # Examples
///
/// ```
/// use shall_lib::response::ModeResponse;
/// use shall_lib::types::Mode;
///
/// let json = r#"{"success": true, "mode": "environmental"}"#;
/// let response: ModeResponse = serde_json::from_str(json).unwrap();
/// assert_eq!(response.mode().mode(), Mode::Environmental);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ModeResponse {
    success: bool,
    mode: String,
}

impl ModeResponse {
    /// Returns whether the device reported success.
    #[must_use]
    pub fn success(&self) -> bool {
        self.success
    }

    /// Returns the mode the device settled on, normalized.
    #[must_use]
    pub fn mode(&self) -> NormalizedMode {
        Mode::normalize(&self.mode)
    }
}

/// Response from `POST /api/adaptive_mode` on first-revision firmware.
#[derive(Debug, Clone, Deserialize)]
pub struct AdaptiveModeResponse {
    success: bool,
    adaptive_mode: bool,
}

impl AdaptiveModeResponse {
    /// Returns whether the device reported success.
    #[must_use]
    pub fn success(&self) -> bool {
        self.success
    }

    /// Returns the mode implied by the adaptive flag.
    #[must_use]
    pub fn mode(&self) -> NormalizedMode {
        Mode::from_adaptive_flag(self.adaptive_mode).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_response_unknown_value_falls_back() {
        let response: ModeResponse =
            serde_json::from_str(r#"{"success": true, "mode": "party"}"#).unwrap();
        let mode = response.mode();
        assert_eq!(mode.mode(), Mode::Manual);
        assert_eq!(mode.fallback_from(), Some("party"));
    }

    #[test]
    fn adaptive_mode_response() {
        let response: AdaptiveModeResponse =
            serde_json::from_str(r#"{"success": true, "adaptive_mode": true}"#).unwrap();
        assert_eq!(response.mode().mode(), Mode::Adaptive);
        assert!(!response.mode().is_fallback());
    }
}
