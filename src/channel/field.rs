// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-field request and response shapes.
//!
//! | Field | Path | Request body | Response envelope |
//! |---|---|---|---|
//! | [`PowerField`] | `/api/power` | `{"power": bool}` | `success`, `power` |
//! | [`BrightnessField`] | `/api/brightness` | `{"brightness": int}` | `success`, `brightness` |
//! | [`ColorField`] | `/api/color` | `{"hue": int, "saturation": int}` | `success`, `hue`, `saturation` |
//! | [`ModeField`] | `/api/mode` | `{"mode": string}` | `success`, `mode` |
//!
//! On first-revision firmware ([`ApiVersion::V1`]) the mode lives at
//! `/api/adaptive_mode` as `{"adaptive_mode": bool}`.

use std::fmt;

use serde_json::json;

use crate::error::{ParseError, ValueError};
use crate::protocol::ApiResponse;
use crate::response::{
    AdaptiveModeResponse, BrightnessResponse, ColorResponse, ModeResponse, PowerResponse,
};
use crate::state::{FieldKind, StateChange};
use crate::types::{ApiVersion, Brightness, HsColor, Mode, PowerState};

/// The device's answer to one field submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation<T> {
    value: T,
    accepted: bool,
    change: StateChange,
}

impl<T> Confirmation<T> {
    /// Creates a confirmation.
    #[must_use]
    pub fn new(value: T, accepted: bool, change: StateChange) -> Self {
        Self {
            value,
            accepted,
            change,
        }
    }

    /// Returns the value the device settled on.
    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Consumes the confirmation, returning the value.
    #[must_use]
    pub fn into_value(self) -> T {
        self.value
    }

    /// Returns the `success` flag of the envelope.
    #[must_use]
    pub fn accepted(&self) -> bool {
        self.accepted
    }

    /// Returns the snapshot change this confirmation implies.
    #[must_use]
    pub fn change(&self) -> &StateChange {
        &self.change
    }
}

/// One independently synchronized attribute of the controller.
pub trait Field {
    /// Value submitted and confirmed for this field.
    type Value: Clone + fmt::Debug + PartialEq + Send + Sync + 'static;

    /// Which field this is.
    const KIND: FieldKind;

    /// Returns the request path for the given API revision.
    fn path(version: ApiVersion) -> &'static str;

    /// Builds the JSON request body for a candidate.
    ///
    /// # Errors
    ///
    /// Returns `ValueError` if the candidate cannot be expressed by this API
    /// revision.
    fn request_body(
        value: &Self::Value,
        version: ApiVersion,
    ) -> Result<serde_json::Value, ValueError>;

    /// Decodes the response envelope.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the body does not match the envelope or holds
    /// an out-of-range value.
    fn decode(
        response: &ApiResponse,
        version: ApiVersion,
    ) -> Result<Confirmation<Self::Value>, ParseError>;

    /// Wraps a value as a state change.
    fn to_change(value: &Self::Value) -> StateChange;
}

/// On/off channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerField {}

impl Field for PowerField {
    type Value = PowerState;
    const KIND: FieldKind = FieldKind::Power;

    fn path(_version: ApiVersion) -> &'static str {
        "/api/power"
    }

    fn request_body(
        value: &PowerState,
        _version: ApiVersion,
    ) -> Result<serde_json::Value, ValueError> {
        Ok(json!({ "power": value.is_on() }))
    }

    fn decode(
        response: &ApiResponse,
        _version: ApiVersion,
    ) -> Result<Confirmation<PowerState>, ParseError> {
        let envelope: PowerResponse = response.parse()?;
        let power = envelope.power();
        Ok(Confirmation::new(
            power,
            envelope.success(),
            StateChange::Power(power),
        ))
    }

    fn to_change(value: &PowerState) -> StateChange {
        StateChange::Power(*value)
    }
}

/// Brightness channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrightnessField {}

impl Field for BrightnessField {
    type Value = Brightness;
    const KIND: FieldKind = FieldKind::Brightness;

    fn path(_version: ApiVersion) -> &'static str {
        "/api/brightness"
    }

    fn request_body(
        value: &Brightness,
        _version: ApiVersion,
    ) -> Result<serde_json::Value, ValueError> {
        Ok(json!({ "brightness": value.value() }))
    }

    fn decode(
        response: &ApiResponse,
        _version: ApiVersion,
    ) -> Result<Confirmation<Brightness>, ParseError> {
        let envelope: BrightnessResponse = response.parse()?;
        let brightness = envelope.brightness();
        Ok(Confirmation::new(
            brightness,
            envelope.success(),
            StateChange::Brightness(brightness),
        ))
    }

    fn to_change(value: &Brightness) -> StateChange {
        StateChange::Brightness(*value)
    }
}

/// Hue and saturation channel. Both components travel in one request and
/// are confirmed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorField {}

impl Field for ColorField {
    type Value = HsColor;
    const KIND: FieldKind = FieldKind::Color;

    fn path(_version: ApiVersion) -> &'static str {
        "/api/color"
    }

    fn request_body(value: &HsColor, _version: ApiVersion) -> Result<serde_json::Value, ValueError> {
        Ok(json!({ "hue": value.hue(), "saturation": value.saturation() }))
    }

    fn decode(
        response: &ApiResponse,
        _version: ApiVersion,
    ) -> Result<Confirmation<HsColor>, ParseError> {
        let envelope: ColorResponse = response.parse()?;
        let color = envelope.color()?;
        Ok(Confirmation::new(
            color,
            envelope.success(),
            StateChange::Color(color),
        ))
    }

    fn to_change(value: &HsColor) -> StateChange {
        StateChange::Color(*value)
    }
}

/// Operating mode channel.
///
/// Unknown mode strings in the envelope confirm as [`Mode::Manual`]; the
/// state change keeps the original string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeField {}

impl Field for ModeField {
    type Value = Mode;
    const KIND: FieldKind = FieldKind::Mode;

    fn path(version: ApiVersion) -> &'static str {
        match version {
            ApiVersion::V1 => "/api/adaptive_mode",
            ApiVersion::V2 => "/api/mode",
        }
    }

    fn request_body(value: &Mode, version: ApiVersion) -> Result<serde_json::Value, ValueError> {
        match (version, value) {
            (ApiVersion::V2, mode) => Ok(json!({ "mode": mode.as_str() })),
            (ApiVersion::V1, Mode::Manual) => Ok(json!({ "adaptive_mode": false })),
            (ApiVersion::V1, Mode::Adaptive) => Ok(json!({ "adaptive_mode": true })),
            (ApiVersion::V1, Mode::Environmental) => Err(ValueError::UnsupportedMode {
                mode: value.to_string(),
                version: version.to_string(),
            }),
        }
    }

    fn decode(
        response: &ApiResponse,
        version: ApiVersion,
    ) -> Result<Confirmation<Mode>, ParseError> {
        let (normalized, accepted) = match version {
            ApiVersion::V2 => {
                let envelope: ModeResponse = response.parse()?;
                (envelope.mode(), envelope.success())
            }
            ApiVersion::V1 => {
                let envelope: AdaptiveModeResponse = response.parse()?;
                (envelope.mode(), envelope.success())
            }
        };
        Ok(Confirmation::new(
            normalized.mode(),
            accepted,
            StateChange::Mode(normalized),
        ))
    }

    fn to_change(value: &Mode) -> StateChange {
        StateChange::mode(*value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(body: serde_json::Value) -> ApiResponse {
        ApiResponse::new(body.to_string())
    }

    #[test]
    fn request_bodies() {
        assert_eq!(
            PowerField::request_body(&PowerState::On, ApiVersion::V2).unwrap(),
            json!({"power": true})
        );
        assert_eq!(
            BrightnessField::request_body(&Brightness::new(128), ApiVersion::V2).unwrap(),
            json!({"brightness": 128})
        );
        assert_eq!(
            ColorField::request_body(&HsColor::new(200, 100).unwrap(), ApiVersion::V2).unwrap(),
            json!({"hue": 200, "saturation": 100})
        );
        assert_eq!(
            ModeField::request_body(&Mode::Environmental, ApiVersion::V2).unwrap(),
            json!({"mode": "environmental"})
        );
    }

    #[test]
    fn paths() {
        assert_eq!(PowerField::path(ApiVersion::V2), "/api/power");
        assert_eq!(BrightnessField::path(ApiVersion::V1), "/api/brightness");
        assert_eq!(ColorField::path(ApiVersion::V2), "/api/color");
        assert_eq!(ModeField::path(ApiVersion::V2), "/api/mode");
        assert_eq!(ModeField::path(ApiVersion::V1), "/api/adaptive_mode");
    }

    #[test]
    fn v1_mode_bodies() {
        assert_eq!(
            ModeField::request_body(&Mode::Adaptive, ApiVersion::V1).unwrap(),
            json!({"adaptive_mode": true})
        );
        assert_eq!(
            ModeField::request_body(&Mode::Manual, ApiVersion::V1).unwrap(),
            json!({"adaptive_mode": false})
        );
        assert!(matches!(
            ModeField::request_body(&Mode::Environmental, ApiVersion::V1),
            Err(ValueError::UnsupportedMode { .. })
        ));
    }

    #[test]
    fn power_decode_adopts_server_value() {
        let confirmation = PowerField::decode(
            &response(json!({"success": true, "power": false})),
            ApiVersion::V2,
        )
        .unwrap();
        assert_eq!(*confirmation.value(), PowerState::Off);
        assert!(confirmation.accepted());
        assert_eq!(confirmation.change(), &StateChange::Power(PowerState::Off));
    }

    #[test]
    fn color_decode_is_all_or_nothing() {
        let missing = ColorField::decode(
            &response(json!({"success": true, "hue": 200})),
            ApiVersion::V2,
        );
        assert!(missing.is_err());

        let out_of_range = ColorField::decode(
            &response(json!({"success": true, "hue": 720, "saturation": 100})),
            ApiVersion::V2,
        );
        assert!(matches!(out_of_range, Err(ParseError::InvalidValue { .. })));
    }

    #[test]
    fn mode_decode_keeps_fallback_in_change() {
        let confirmation = ModeField::decode(
            &response(json!({"success": true, "mode": "disco"})),
            ApiVersion::V2,
        )
        .unwrap();
        assert_eq!(*confirmation.value(), Mode::Manual);
        assert_eq!(
            confirmation.change(),
            &StateChange::Mode(Mode::normalize("disco"))
        );
    }

    #[test]
    fn mode_decode_v1() {
        let confirmation = ModeField::decode(
            &response(json!({"success": true, "adaptive_mode": true})),
            ApiVersion::V1,
        )
        .unwrap();
        assert_eq!(*confirmation.value(), Mode::Adaptive);
    }

    #[test]
    fn brightness_decode_reports_rejection() {
        let confirmation = BrightnessField::decode(
            &response(json!({"success": false, "brightness": 12})),
            ApiVersion::V2,
        )
        .unwrap();
        assert!(!confirmation.accepted());
        assert_eq!(confirmation.into_value(), Brightness::new(12));
    }
}
