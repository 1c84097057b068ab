// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Type-safe representations of the controller's values.
//!
//! Each type matches the range the device API uses:
//!
//! - [`PowerState`]: on/off, a JSON boolean on the wire
//! - [`Brightness`]: 0-255
//! - [`HsColor`]: hue 0-359 and saturation 0-255, submitted together
//! - [`Mode`]: manual, adaptive or environmental

mod api_version;
mod brightness;
mod color;
mod mode;
mod power;

pub use api_version::ApiVersion;
pub use brightness::Brightness;
pub use color::HsColor;
pub use mode::{Mode, NormalizedMode};
pub use power::PowerState;
