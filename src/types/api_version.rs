// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device API revisions.

use std::fmt;

/// Revision of the controller's HTTP API.
///
/// The two revisions differ only in how the operating mode is exposed:
///
/// | Revision | Status key | Mode endpoint | Values |
/// |---|---|---|---|
/// | [`V1`](Self::V1) | `adaptive_mode` | `/api/adaptive_mode` | `bool` |
/// | [`V2`](Self::V2) | `mode` | `/api/mode` | `manual`/`adaptive`/`environmental` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ApiVersion {
    /// Original firmware with a boolean adaptive flag.
    V1,
    /// Current firmware with a tri-state mode string.
    #[default]
    V2,
}

impl ApiVersion {
    /// Returns a short identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
