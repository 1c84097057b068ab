// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Field channels.
//!
//! A [`FieldChannel`] synchronizes exactly one attribute of the controller.
//! Submitting a candidate posts it to the field's endpoint and adopts
//! whatever value the device echoes back, which may differ from the
//! candidate. Any transport failure or envelope mismatch yields
//! [`FieldResult::Failed`]; nothing escapes as a panic.
//!
//! Submissions on the same channel are serialized: a second submit while
//! one is outstanding waits for the first to finish, in arrival order. This
//! keeps the last submission issued also the last one confirmed.
//!
//! # Examples
//!
//! ```no_run
//! use shall_lib::channel::{FieldChannel, BrightnessField};
//! use shall_lib::protocol::HttpClient;
//! use shall_lib::types::{ApiVersion, Brightness};
//!
//! # async fn example() -> shall_lib::Result<()> {
//! let client = HttpClient::new("http://24587CEB4834.local")?;
//! let channel = FieldChannel::<BrightnessField>::new();
//!
//! let result = channel
//!     .submit(&client, ApiVersion::V2, Brightness::new(200))
//!     .await;
//! println!("{result:?}");
//! # Ok(())
//! # }
//! ```

mod field;
mod sync_state;

pub use field::{BrightnessField, ColorField, Confirmation, Field, ModeField, PowerField};
pub use sync_state::{FieldResult, SyncState};

use std::fmt;
use std::marker::PhantomData;

use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::error::Error;
use crate::protocol::{Method, Transport};
use crate::state::FieldKind;
use crate::types::ApiVersion;

/// Synchronization unit for one field.
pub struct FieldChannel<F: Field> {
    /// Held for the duration of a round trip.
    gate: Mutex<()>,
    state: RwLock<Slot<F::Value>>,
    _field: PhantomData<fn() -> F>,
}

/// Sync state tagged with the reset epoch it belongs to.
#[derive(Debug)]
struct Slot<T> {
    epoch: u64,
    state: SyncState<T>,
}

impl<T> Slot<T> {
    /// Writes `state` unless the channel was reset after `epoch`.
    fn settle(&mut self, epoch: u64, state: SyncState<T>) -> bool {
        if self.epoch != epoch {
            return false;
        }
        self.state = state;
        true
    }
}

impl<F: Field> FieldChannel<F> {
    /// Creates an idle channel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gate: Mutex::new(()),
            state: RwLock::new(Slot {
                epoch: 0,
                state: SyncState::Idle,
            }),
            _field: PhantomData,
        }
    }

    /// Returns which field this channel synchronizes.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        F::KIND
    }

    /// Returns the current synchronization state.
    #[must_use]
    pub fn state(&self) -> SyncState<F::Value> {
        self.state.read().state.clone()
    }

    /// Returns `true` while a request for this field is on the wire.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.gate.try_lock().is_err()
    }

    /// Returns the channel to `Idle`.
    ///
    /// Submissions started before the reset still complete, but no longer
    /// update the channel's state.
    pub fn reset(&self) {
        let mut slot = self.state.write();
        slot.epoch += 1;
        slot.state = SyncState::Idle;
    }

    /// Submits a candidate and returns the device's verdict.
    pub async fn submit<T: Transport>(
        &self,
        transport: &T,
        version: ApiVersion,
        candidate: F::Value,
    ) -> FieldResult<F::Value> {
        self.exchange(transport, version, candidate)
            .await
            .map(Confirmation::into_value)
            .into()
    }

    /// Submits a candidate, returning the full confirmation or the error.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if the candidate cannot be expressed,
    /// `Error::Protocol` on transport failure and `Error::Parse` if the
    /// envelope does not match.
    pub async fn exchange<T: Transport>(
        &self,
        transport: &T,
        version: ApiVersion,
        candidate: F::Value,
    ) -> Result<Confirmation<F::Value>, Error> {
        let epoch = self.state.read().epoch;

        // Queued submissions leave the state to the one on the wire
        let _in_flight = self.gate.lock().await;
        self.state
            .write()
            .settle(epoch, SyncState::Pending(candidate.clone()));

        let result = Self::round_trip(transport, version, &candidate).await;

        let settled = match &result {
            Ok(confirmation) => {
                if !confirmation.accepted() {
                    tracing::warn!(
                        field = %F::KIND,
                        value = ?confirmation.value(),
                        "Device reported success=false, adopting echoed value"
                    );
                }
                self.state
                    .write()
                    .settle(epoch, SyncState::Confirmed(confirmation.value().clone()))
            }
            Err(err) => {
                tracing::warn!(field = %F::KIND, error = %err, "Field submission failed");
                self.state
                    .write()
                    .settle(epoch, SyncState::Failed(err.to_string()))
            }
        };
        if !settled {
            tracing::debug!(field = %F::KIND, "Channel was reset, answer not recorded");
        }

        result
    }

    async fn round_trip<T: Transport>(
        transport: &T,
        version: ApiVersion,
        candidate: &F::Value,
    ) -> Result<Confirmation<F::Value>, Error> {
        let body = F::request_body(candidate, version)?;
        let response = transport
            .request(Method::Post, F::path(version), Some(&body))
            .await?;
        Ok(F::decode(&response, version)?)
    }
}

impl<F: Field> Default for FieldChannel<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Field> fmt::Debug for FieldChannel<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldChannel")
            .field("field", &F::KIND)
            .field("state", &self.state.read().state.name())
            .field("in_flight", &self.is_in_flight())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::error::ProtocolError;
    use crate::protocol::mock::ScriptedTransport;
    use crate::types::{Brightness, HsColor, Mode, PowerState};

    #[tokio::test]
    async fn submit_posts_field_body() {
        let transport =
            ScriptedTransport::new().reply(json!({"success": true, "brightness": 128}));
        let channel = FieldChannel::<BrightnessField>::new();

        let result = channel
            .submit(&transport, ApiVersion::V2, Brightness::new(128))
            .await;

        assert_eq!(result, FieldResult::Confirmed(Brightness::new(128)));
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].path, "/api/brightness");
        assert_eq!(requests[0].body, Some(json!({"brightness": 128})));
        assert_eq!(channel.state(), SyncState::Confirmed(Brightness::new(128)));
    }

    #[tokio::test]
    async fn server_value_overrides_candidate() {
        let transport = ScriptedTransport::new().reply(json!({"success": true, "power": false}));
        let channel = FieldChannel::<PowerField>::new();

        let result = channel
            .submit(&transport, ApiVersion::V2, PowerState::On)
            .await;

        assert_eq!(result, FieldResult::Confirmed(PowerState::Off));
    }

    #[tokio::test]
    async fn transport_failure_becomes_failed() {
        let transport = ScriptedTransport::new().fail(ProtocolError::ConnectionFailed(
            "HTTP 500 - Internal Server Error".to_string(),
        ));
        let channel = FieldChannel::<ColorField>::new();

        let result = channel
            .submit(&transport, ApiVersion::V2, HsColor::new(200, 100).unwrap())
            .await;

        assert!(result.is_failed());
        assert!(result.reason().unwrap().contains("HTTP 500"));
        assert!(matches!(channel.state(), SyncState::Failed(_)));
    }

    #[tokio::test]
    async fn malformed_envelope_becomes_failed() {
        let transport = ScriptedTransport::new().reply_raw("OK");
        let channel = FieldChannel::<PowerField>::new();

        let result = channel
            .submit(&transport, ApiVersion::V2, PowerState::On)
            .await;

        assert!(result.is_failed());
    }

    #[tokio::test]
    async fn unsupported_candidate_never_hits_the_wire() {
        let transport = ScriptedTransport::new();
        let channel = FieldChannel::<ModeField>::new();

        let result = channel
            .submit(&transport, ApiVersion::V1, Mode::Environmental)
            .await;

        assert!(result.is_failed());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn brightness_confirmations_stay_in_range() {
        for candidate in [0_u8, 1, 127, 254, 255] {
            let transport = ScriptedTransport::new()
                .reply(json!({"success": true, "brightness": candidate}));
            let channel = FieldChannel::<BrightnessField>::new();
            let result = channel
                .submit(&transport, ApiVersion::V2, Brightness::new(candidate))
                .await;
            assert_eq!(result, FieldResult::Confirmed(Brightness::new(candidate)));
        }

        let transport =
            ScriptedTransport::new().reply(json!({"success": true, "brightness": 999}));
        let channel = FieldChannel::<BrightnessField>::new();
        let result = channel
            .submit(&transport, ApiVersion::V2, Brightness::MAX)
            .await;
        assert!(result.is_failed());
    }

    #[tokio::test(start_paused = true)]
    async fn same_field_submits_are_serialized() {
        // The first reply is slow; without serialization it would land last
        let transport = ScriptedTransport::new()
            .reply_after(
                json!({"success": true, "brightness": 10}),
                Duration::from_millis(500),
            )
            .reply(json!({"success": true, "brightness": 20}));
        let channel = FieldChannel::<BrightnessField>::new();

        let (first, second) = tokio::join!(
            channel.submit(&transport, ApiVersion::V2, Brightness::new(10)),
            channel.submit(&transport, ApiVersion::V2, Brightness::new(20)),
        );

        assert_eq!(first, FieldResult::Confirmed(Brightness::new(10)));
        assert_eq!(second, FieldResult::Confirmed(Brightness::new(20)));
        assert_eq!(channel.state(), SyncState::Confirmed(Brightness::new(20)));

        let bodies: Vec<_> = transport
            .requests()
            .into_iter()
            .map(|r| r.body.unwrap())
            .collect();
        assert_eq!(
            bodies,
            vec![json!({"brightness": 10}), json!({"brightness": 20})]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn in_flight_flag_tracks_round_trip() {
        let transport = ScriptedTransport::new().reply_after(
            json!({"success": true, "power": true}),
            Duration::from_millis(100),
        );
        let channel = FieldChannel::<PowerField>::new();
        assert!(!channel.is_in_flight());

        let (result, observed) = tokio::join!(
            channel.submit(&transport, ApiVersion::V2, PowerState::On),
            async {
                tokio::task::yield_now().await;
                (channel.is_in_flight(), channel.state())
            },
        );

        assert!(result.is_confirmed());
        assert_eq!(observed, (true, SyncState::Pending(PowerState::On)));
        assert!(!channel.is_in_flight());
    }

    #[tokio::test(start_paused = true)]
    async fn queued_submit_keeps_in_flight_candidate_visible() {
        let transport = ScriptedTransport::new()
            .reply_after(
                json!({"success": true, "brightness": 10}),
                Duration::from_millis(500),
            )
            .reply(json!({"success": true, "brightness": 20}));
        let channel = FieldChannel::<BrightnessField>::new();

        let (_, _, observed) = tokio::join!(
            channel.submit(&transport, ApiVersion::V2, Brightness::new(10)),
            channel.submit(&transport, ApiVersion::V2, Brightness::new(20)),
            async {
                tokio::task::yield_now().await;
                channel.state()
            },
        );

        assert_eq!(observed, SyncState::Pending(Brightness::new(10)));
        assert_eq!(channel.state(), SyncState::Confirmed(Brightness::new(20)));
    }

    #[tokio::test(start_paused = true)]
    async fn answer_after_reset_is_not_recorded() {
        let transport = ScriptedTransport::new().reply_after(
            json!({"success": true, "brightness": 77}),
            Duration::from_millis(100),
        );
        let channel = FieldChannel::<BrightnessField>::new();

        let (result, ()) = tokio::join!(
            channel.submit(&transport, ApiVersion::V2, Brightness::new(77)),
            async {
                tokio::task::yield_now().await;
                channel.reset();
            },
        );

        // The caller still gets the device's answer
        assert_eq!(result, FieldResult::Confirmed(Brightness::new(77)));
        assert_eq!(channel.state(), SyncState::Idle);
    }

    #[test]
    fn reset_returns_to_idle() {
        let channel = FieldChannel::<ModeField>::default();
        channel.state.write().state = SyncState::Failed("x".to_string());
        channel.reset();
        assert_eq!(channel.state(), SyncState::Idle);
        assert_eq!(channel.kind(), FieldKind::Mode);
    }

    #[test]
    fn debug_shows_field_and_state() {
        let channel = FieldChannel::<ColorField>::new();
        let debug = format!("{channel:?}");
        assert!(debug.contains("Color"));
        assert!(debug.contains("idle"));
    }
}
