// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed views of the controller's JSON responses.
//!
//! Every field update is answered with an envelope of the form
//! `{"success": bool, <field>: <value>}`. The echoed value is the device's
//! final word and may differ from what was requested.

mod brightness;
mod color;
mod mode;
mod power;
mod status;

pub use brightness::BrightnessResponse;
pub use color::ColorResponse;
pub use mode::{AdaptiveModeResponse, ModeResponse};
pub use power::PowerResponse;
pub use status::StatusResponse;

use crate::error::ParseError;
use crate::types::HsColor;

/// Validates a hue/saturation pair received from the device.
pub(crate) fn decode_color(hue: u16, saturation: u8) -> Result<HsColor, ParseError> {
    HsColor::new(hue, saturation).map_err(|err| ParseError::InvalidValue {
        field: "hue".to_string(),
        message: err.to_string(),
    })
}
