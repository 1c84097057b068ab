// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `shall_lib` - An async client for SHALL LED strip controllers.
//!
//! A SHALL controller exposes a small JSON API over HTTP. This library keeps
//! a local snapshot of the device in sync with it: each attribute is
//! submitted independently, and the value the device echoes back always wins
//! over the value that was asked for.
//!
//! # Supported Features
//!
//! - **Status**: load power, brightness, color and mode in one request
//! - **Field updates**: power, brightness (0-255), hue/saturation, mode
//! - **Batches**: best-effort apply of several fields with a summary line
//! - **Events**: per-field state transitions, snapshot changes, error reports
//! - **Firmware revisions**: string `mode` (current) and `adaptive_mode` flag
//!
//! # Quick Start
//!
//! ```no_run
//! use shall_lib::types::{Brightness, Mode, PowerState};
//! use shall_lib::session::PendingEdits;
//! use shall_lib::{DeviceAddress, DeviceSession};
//!
//! #[tokio::main]
//! async fn main() -> shall_lib::Result<()> {
//!     // Resolves to http://24587CEB4834.local
//!     let session = DeviceSession::http(DeviceAddress::new("24587CEB4834"))
//!         .connect()
//!         .await?;
//!
//!     println!("{:?}", session.snapshot());
//!
//!     let report = session
//!         .apply_all(
//!             PendingEdits::new()
//!                 .with_power(PowerState::On)
//!                 .with_brightness(Brightness::new(128))
//!                 .with_mode(Mode::Adaptive),
//!         )
//!         .await;
//!     println!("{}", report.summary());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Optimistic Edits
//!
//! ```no_run
//! use shall_lib::subscription::{FieldTransition, Subscribable};
//! use shall_lib::types::Brightness;
//! use shall_lib::{DeviceAddress, DeviceSession};
//!
//! # async fn example() -> shall_lib::Result<()> {
//! let session = DeviceSession::http(DeviceAddress::default()).build()?;
//!
//! session.on_field_transition(|transition| match transition {
//!     FieldTransition::Pending { candidate, .. } => println!("showing {candidate}"),
//!     FieldTransition::Confirmed { value, .. } => println!("device says {value}"),
//!     FieldTransition::Failed { revert_to, .. } => println!("reverting to {revert_to:?}"),
//! });
//!
//! session.set_brightness(Brightness::new(200)).await;
//! # Ok(())
//! # }
//! ```

mod address;
pub mod channel;
pub mod error;
pub mod protocol;
pub mod response;
pub mod session;
pub mod state;
pub mod subscription;
pub mod types;

pub use address::{AddressResolver, DeviceAddress};
pub use channel::{FieldChannel, FieldResult, SyncState};
pub use error::{Error, ErrorKind, ParseError, ProtocolError, Result, ValueError};
#[cfg(feature = "http")]
pub use protocol::{HttpClient, HttpConfig};
pub use protocol::{Method, Transport};
pub use response::StatusResponse;
pub use session::{ApplyReport, DeviceSession, Edit, FieldOutcome, PendingEdits};
pub use state::{DeviceSnapshot, FieldKind, StateChange};
pub use subscription::{CallbackRegistry, Subscribable, SubscriptionId};
pub use types::{ApiVersion, Brightness, HsColor, Mode, NormalizedMode, PowerState};
