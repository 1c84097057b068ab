// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device session: the client's view of one SHALL controller.
//!
//! A [`DeviceSession`] owns the [`DeviceSnapshot`], the last state the
//! device confirmed, together with one [`FieldChannel`] per attribute. The
//! snapshot changes only when the device answers:
//!
//! - [`load_status`](DeviceSession::load_status) replaces it wholesale
//! - each confirmed field submission updates that one field
//! - a failed submission leaves it untouched
//!
//! # Examples
//!
//! ```no_run
//! use shall_lib::session::PendingEdits;
//! use shall_lib::types::{Brightness, Mode, PowerState};
//! use shall_lib::{DeviceAddress, DeviceSession};
//!
//! # async fn example() -> shall_lib::Result<()> {
//! let session = DeviceSession::http(DeviceAddress::new("24587CEB4834")).build()?;
//!
//! let snapshot = session.load_status().await?;
//! println!("brightness: {:?}", snapshot.brightness());
//!
//! let report = session
//!     .apply_all(
//!         PendingEdits::new()
//!             .with_power(PowerState::On)
//!             .with_brightness(Brightness::new(128))
//!             .with_mode(Mode::Adaptive),
//!     )
//!     .await;
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "http")]
mod builder;
mod edit;
mod report;

#[cfg(feature = "http")]
pub use builder::HttpSessionBuilder;
pub use edit::{Edit, PendingEdits};
pub use report::{ApplyReport, FieldOutcome};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use crate::channel::{
    BrightnessField, ColorField, Confirmation, Field, FieldChannel, FieldResult, ModeField,
    PowerField,
};
use crate::error::{Error, ErrorKind};
use crate::protocol::{Method, Transport};
use crate::response::StatusResponse;
use crate::state::{DeviceSnapshot, FieldKind, StateChange};
use crate::subscription::{
    CallbackRegistry, ErrorReport, FieldTransition, Operation, Subscribable, SubscriptionId,
};
use crate::types::{ApiVersion, Brightness, HsColor, Mode, PowerState};

#[cfg(feature = "http")]
use crate::address::{AddressResolver, DeviceAddress};
#[cfg(feature = "http")]
use crate::protocol::{HttpClient, HttpConfig};

/// Path of the full status document.
const STATUS_PATH: &str = "/api/status";

/// Reason reported when a caller-imposed deadline expires.
const TIMEOUT_REASON: &str = "timeout";

/// A session with one controller.
///
/// # Type Parameter
///
/// `T` is the transport, [`HttpClient`](crate::protocol::HttpClient) in
/// production.
pub struct DeviceSession<T: Transport> {
    /// Lock order: `snapshot` before `endpoint`.
    endpoint: RwLock<Endpoint<T>>,
    api_version: ApiVersion,
    snapshot: RwLock<DeviceSnapshot>,
    power: Arc<FieldChannel<PowerField>>,
    brightness: Arc<FieldChannel<BrightnessField>>,
    color: Arc<FieldChannel<ColorField>>,
    mode: Arc<FieldChannel<ModeField>>,
    callbacks: CallbackRegistry,
    #[cfg(feature = "http")]
    addressing: RwLock<Option<(DeviceAddress, AddressResolver)>>,
}

/// The transport together with the device generation it talks to.
struct Endpoint<T> {
    transport: Arc<T>,
    /// Bumped whenever the session is pointed at another device; answers
    /// from an older generation are not applied.
    generation: u64,
}

impl<T: Transport> DeviceSession<T> {
    /// Creates a session over an existing transport.
    ///
    /// The snapshot starts empty; call
    /// [`load_status`](Self::load_status) to populate it.
    #[must_use]
    pub fn new(transport: T, api_version: ApiVersion) -> Self {
        Self {
            endpoint: RwLock::new(Endpoint {
                transport: Arc::new(transport),
                generation: 0,
            }),
            api_version,
            snapshot: RwLock::new(DeviceSnapshot::new()),
            power: Arc::new(FieldChannel::new()),
            brightness: Arc::new(FieldChannel::new()),
            color: Arc::new(FieldChannel::new()),
            mode: Arc::new(FieldChannel::new()),
            callbacks: CallbackRegistry::new(),
            #[cfg(feature = "http")]
            addressing: RwLock::new(None),
        }
    }

    /// Returns the transport currently in use.
    #[must_use]
    pub fn transport(&self) -> Arc<T> {
        Arc::clone(&self.endpoint.read().transport)
    }

    /// Returns the base URL requests go to.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.endpoint.read().transport.base_url().to_string()
    }

    /// Returns the API revision this session speaks.
    #[must_use]
    pub fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    /// Returns a copy of the last confirmed device state.
    #[must_use]
    pub fn snapshot(&self) -> DeviceSnapshot {
        self.snapshot.read().clone()
    }

    /// Returns the callback registry.
    #[must_use]
    pub fn callbacks(&self) -> &CallbackRegistry {
        &self.callbacks
    }

    // ========== Channels ==========

    /// Returns the power channel.
    #[must_use]
    pub fn power_channel(&self) -> &FieldChannel<PowerField> {
        &self.power
    }

    /// Returns the brightness channel.
    #[must_use]
    pub fn brightness_channel(&self) -> &FieldChannel<BrightnessField> {
        &self.brightness
    }

    /// Returns the color channel.
    #[must_use]
    pub fn color_channel(&self) -> &FieldChannel<ColorField> {
        &self.color
    }

    /// Returns the mode channel.
    #[must_use]
    pub fn mode_channel(&self) -> &FieldChannel<ModeField> {
        &self.mode
    }

    /// Returns `true` while a submission for `field` is on the wire.
    #[must_use]
    pub fn is_in_flight(&self, field: FieldKind) -> bool {
        match field {
            FieldKind::Power => self.power.is_in_flight(),
            FieldKind::Brightness => self.brightness.is_in_flight(),
            FieldKind::Color => self.color.is_in_flight(),
            FieldKind::Mode => self.mode.is_in_flight(),
        }
    }

    // ========== Status ==========

    /// Loads `/api/status` and replaces the snapshot.
    ///
    /// On failure the previous snapshot is kept and an [`ErrorReport`] is
    /// dispatched.
    ///
    /// # Errors
    ///
    /// Returns error if the device cannot be reached or the status document
    /// does not decode.
    pub async fn load_status(&self) -> Result<DeviceSnapshot, Error> {
        let (transport, generation) = self.current_endpoint();

        let result = async {
            let status: StatusResponse = transport
                .request_json(Method::Get, STATUS_PATH, None)
                .await?;
            Ok::<_, Error>(DeviceSnapshot::from_status(&status)?)
        }
        .await;

        let snapshot = match result {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load device status");
                self.callbacks
                    .dispatch_error(&ErrorReport::from_error(Operation::LoadStatus, &err));
                return Err(err);
            }
        };

        if let Some(raw) = snapshot.mode_fallback() {
            self.report_mode_fallback(Operation::LoadStatus, raw);
        }

        let replaced = {
            let mut current = self.snapshot.write();
            let fresh = self.is_current(generation);
            if fresh {
                *current = snapshot.clone();
            }
            fresh
        };
        if replaced {
            self.callbacks.dispatch(&snapshot.to_change());
        } else {
            tracing::debug!("Discarding status from a previous device address");
        }

        Ok(snapshot)
    }

    // ========== Field Submission ==========

    /// Submits every present edit, in the order Power, Brightness, Color,
    /// Mode.
    ///
    /// A failed field never stops the remaining ones from being attempted.
    pub async fn apply_all(&self, edits: PendingEdits) -> ApplyReport {
        let mut outcomes = Vec::with_capacity(edits.len());
        for edit in edits.edits() {
            outcomes.push(self.apply_one_immediate(edit).await);
        }
        let report = ApplyReport::new(outcomes);
        tracing::debug!(summary = %report.summary(), "Applied pending edits");
        report
    }

    /// Submits a single edit right away.
    ///
    /// On `Failed`, a caller that displayed the candidate optimistically
    /// should revert to the snapshot's value for the field; the
    /// [`FieldTransition::Failed`] event carries it.
    pub async fn apply_one_immediate(&self, edit: Edit) -> FieldOutcome {
        match edit {
            Edit::Power(state) => FieldOutcome::Power(self.set_power(state).await),
            Edit::Brightness(level) => FieldOutcome::Brightness(self.set_brightness(level).await),
            Edit::Color(color) => FieldOutcome::Color(self.set_color(color).await),
            Edit::Mode(mode) => FieldOutcome::Mode(self.set_mode(mode).await),
        }
    }

    /// Turns the strip on or off.
    pub async fn set_power(&self, state: PowerState) -> FieldResult<PowerState> {
        self.submit(&self.power, state).await
    }

    /// Sets the brightness.
    pub async fn set_brightness(&self, level: Brightness) -> FieldResult<Brightness> {
        self.submit(&self.brightness, level).await
    }

    /// Sets hue and saturation in one request.
    pub async fn set_color(&self, color: HsColor) -> FieldResult<HsColor> {
        self.submit(&self.color, color).await
    }

    /// Switches the operating mode.
    ///
    /// An unknown mode in the device's answer confirms as
    /// [`Mode::Manual`]; [`DeviceSnapshot::mode_fallback`] tells the two
    /// apart.
    pub async fn set_mode(&self, mode: Mode) -> FieldResult<Mode> {
        self.submit(&self.mode, mode).await
    }

    /// Submits a hue/saturation pair computed elsewhere, such as a color
    /// averaged from cover art.
    ///
    /// The pair is validated first; a hue outside `0..360` fails without
    /// contacting the device.
    pub async fn submit_color(&self, hue: u16, saturation: u8) -> FieldResult<HsColor> {
        match HsColor::new(hue, saturation) {
            Ok(color) => self.set_color(color).await,
            Err(err) => {
                let err = Error::from(err);
                tracing::warn!(error = %err, "Rejected color suggestion");
                self.callbacks.dispatch_error(&ErrorReport::from_error(
                    Operation::Submit(FieldKind::Color),
                    &err,
                ));
                FieldResult::Failed(err.to_string())
            }
        }
    }

    async fn submit<F: Field>(
        &self,
        channel: &FieldChannel<F>,
        candidate: F::Value,
    ) -> FieldResult<F::Value> {
        let (transport, generation) = self.begin::<F>(&candidate);
        let result = channel
            .exchange(transport.as_ref(), self.api_version, candidate)
            .await;
        self.complete::<F>(generation, result)
    }

    /// Announces a candidate and captures the endpoint it will be sent to.
    fn begin<F: Field>(&self, candidate: &F::Value) -> (Arc<T>, u64) {
        let endpoint = self.current_endpoint();
        self.callbacks
            .dispatch_transition(&FieldTransition::Pending {
                field: F::KIND,
                candidate: F::to_change(candidate),
            });
        endpoint
    }

    /// Records the device's answer to a submission started at `generation`.
    fn complete<F: Field>(
        &self,
        generation: u64,
        result: Result<Confirmation<F::Value>, Error>,
    ) -> FieldResult<F::Value> {
        let confirmation = match result {
            Ok(confirmation) => confirmation,
            Err(err) => {
                let reason = err.to_string();
                self.report_failure(
                    F::KIND,
                    &reason,
                    ErrorReport::from_error(Operation::Submit(F::KIND), &err),
                );
                return FieldResult::Failed(reason);
            }
        };

        let change = confirmation.change().clone();
        if let StateChange::Mode(mode) = &change
            && let Some(raw) = mode.fallback_from()
        {
            self.report_mode_fallback(Operation::Submit(F::KIND), raw);
        }

        let changed = {
            let mut snapshot = self.snapshot.write();
            if self.is_current(generation) {
                snapshot.apply(&change)
            } else {
                tracing::debug!(field = %F::KIND, "Discarding answer from a previous device address");
                false
            }
        };
        if changed {
            self.callbacks.dispatch(&change);
        }
        self.callbacks
            .dispatch_transition(&FieldTransition::Confirmed {
                field: F::KIND,
                value: change,
            });

        FieldResult::Confirmed(confirmation.into_value())
    }

    fn current_endpoint(&self) -> (Arc<T>, u64) {
        let endpoint = self.endpoint.read();
        (Arc::clone(&endpoint.transport), endpoint.generation)
    }

    /// Must be called with the snapshot lock held.
    fn is_current(&self, generation: u64) -> bool {
        self.endpoint.read().generation == generation
    }

    fn report_failure(&self, field: FieldKind, reason: &str, report: ErrorReport) {
        let revert_to = self.snapshot.read().value_of(field);
        self.callbacks.dispatch_transition(&FieldTransition::Failed {
            field,
            reason: reason.to_string(),
            revert_to,
        });
        self.callbacks.dispatch_error(&report);
    }

    fn report_mode_fallback(&self, operation: Operation, raw: &str) {
        tracing::warn!(reported = raw, "Unknown mode reported by device, using manual");
        self.callbacks.dispatch_error(&ErrorReport::new(
            operation,
            ErrorKind::UnexpectedServerValue,
            format!("unknown mode {raw:?}, treated as manual"),
        ));
    }

    /// Switches to `transport` and starts a new generation.
    ///
    /// The snapshot is emptied and every channel returns to `Idle` before
    /// any submission can observe the new transport.
    #[cfg(feature = "http")]
    fn retarget(&self, transport: T) {
        let mut snapshot = self.snapshot.write();
        let mut endpoint = self.endpoint.write();
        endpoint.transport = Arc::new(transport);
        endpoint.generation += 1;
        snapshot.clear();
        self.power.reset();
        self.brightness.reset();
        self.color.reset();
        self.mode.reset();
    }
}

impl<T: Transport + 'static> DeviceSession<T> {
    /// Like [`apply_one_immediate`](Self::apply_one_immediate), but gives up
    /// after `deadline` with `Failed("timeout")`.
    ///
    /// The request itself is not cancelled: it keeps its place in the
    /// field's queue and runs until the device answers. That late answer
    /// settles the channel's [`SyncState`](crate::SyncState) but is otherwise
    /// discarded; the snapshot is not touched and no further events fire.
    pub async fn apply_one_within(&self, edit: Edit, deadline: Duration) -> FieldOutcome {
        match edit {
            Edit::Power(state) => {
                FieldOutcome::Power(self.submit_within(&self.power, state, deadline).await)
            }
            Edit::Brightness(level) => FieldOutcome::Brightness(
                self.submit_within(&self.brightness, level, deadline).await,
            ),
            Edit::Color(color) => {
                FieldOutcome::Color(self.submit_within(&self.color, color, deadline).await)
            }
            Edit::Mode(mode) => {
                FieldOutcome::Mode(self.submit_within(&self.mode, mode, deadline).await)
            }
        }
    }

    async fn submit_within<F: Field + 'static>(
        &self,
        channel: &Arc<FieldChannel<F>>,
        candidate: F::Value,
        deadline: Duration,
    ) -> FieldResult<F::Value> {
        let (transport, generation) = self.begin::<F>(&candidate);
        let channel = Arc::clone(channel);
        let version = self.api_version;
        let mut exchange = tokio::spawn(async move {
            channel
                .exchange(transport.as_ref(), version, candidate)
                .await
        });

        match tokio::time::timeout(deadline, &mut exchange).await {
            Ok(Ok(result)) => self.complete::<F>(generation, result),
            Ok(Err(err)) => {
                let reason = err.to_string();
                tracing::error!(field = %F::KIND, error = %reason, "Field exchange task failed");
                self.report_failure(
                    F::KIND,
                    &reason,
                    ErrorReport::new(
                        Operation::Submit(F::KIND),
                        ErrorKind::NetworkUnreachable,
                        reason.clone(),
                    ),
                );
                FieldResult::Failed(reason)
            }
            Err(_) => {
                #[allow(clippy::cast_possible_truncation)]
                let millis = deadline.as_millis() as u64;
                tracing::warn!(field = %F::KIND, deadline_ms = millis, "Field submission timed out");
                self.report_failure(
                    F::KIND,
                    TIMEOUT_REASON,
                    ErrorReport::new(
                        Operation::Submit(F::KIND),
                        ErrorKind::Timeout,
                        format!("no answer within {millis} ms"),
                    ),
                );
                FieldResult::Failed(TIMEOUT_REASON.to_string())
            }
        }
    }
}

// ========== HTTP Session Entry Point ==========

#[cfg(feature = "http")]
impl DeviceSession<HttpClient> {
    /// Creates a builder for an HTTP session with the device at `address`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use shall_lib::{DeviceAddress, DeviceSession};
    /// use std::time::Duration;
    ///
    /// # async fn example() -> shall_lib::Result<()> {
    /// let session = DeviceSession::http(DeviceAddress::new("24587CEB4834"))
    ///     .with_timeout(Duration::from_secs(3))
    ///     .connect()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn http(address: DeviceAddress) -> HttpSessionBuilder {
        HttpSessionBuilder::new(HttpConfig::new(address))
    }

    /// Creates a builder from a full HTTP configuration.
    #[must_use]
    pub fn http_config(config: HttpConfig) -> HttpSessionBuilder {
        HttpSessionBuilder::new(config)
    }

    pub(crate) fn from_config(client: HttpClient, config: &HttpConfig) -> Self {
        let session = Self::new(client, config.api_version());
        *session.addressing.write() = Some((config.address().clone(), config.resolver().clone()));
        session
    }

    /// Returns the configured device address, if built from one.
    #[must_use]
    pub fn address(&self) -> Option<DeviceAddress> {
        self.addressing
            .read()
            .as_ref()
            .map(|(address, _)| address.clone())
    }

    /// Points the session at another device.
    ///
    /// The base URL is rebuilt from the new address, the snapshot is
    /// emptied and every channel returns to `Idle`. Answers to requests
    /// still in flight for the old address are not applied.
    pub fn update_address(&self, address: DeviceAddress) {
        let resolver = self
            .addressing
            .read()
            .as_ref()
            .map(|(_, resolver)| resolver.clone())
            .unwrap_or_default();
        let base_url = resolver.resolve(&address);

        let rebased = self.transport().rebased(base_url.as_str());
        *self.addressing.write() = Some((address.clone(), resolver));
        self.retarget(rebased);

        tracing::info!(address = %address, base_url = %base_url, "Device address updated");
    }
}

impl<T: Transport> Subscribable for DeviceSession<T> {
    fn on_snapshot_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StateChange) + Send + Sync + 'static,
    {
        self.callbacks.on_snapshot_changed(callback)
    }

    fn on_field_transition<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&FieldTransition) + Send + Sync + 'static,
    {
        self.callbacks.on_field_transition(callback)
    }

    fn on_error<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ErrorReport) + Send + Sync + 'static,
    {
        self.callbacks.on_error(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks.unsubscribe(id)
    }
}

impl<T: Transport> fmt::Debug for DeviceSession<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceSession")
            .field("base_url", &self.base_url())
            .field("api_version", &self.api_version)
            .field("snapshot", &*self.snapshot.read())
            .field("callbacks", &self.callbacks)
            .finish_non_exhaustive()
    }
}
