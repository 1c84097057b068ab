// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP session builder.

use std::time::Duration;

use crate::address::AddressResolver;
use crate::error::Error;
use crate::protocol::{HttpClient, HttpConfig};
use crate::session::DeviceSession;
use crate::types::ApiVersion;

/// Builder for HTTP sessions.
///
/// Created by [`DeviceSession::http`] or [`DeviceSession::http_config`].
///
/// # Examples
///
/// ```no_run
/// use shall_lib::types::ApiVersion;
/// use shall_lib::{AddressResolver, DeviceAddress, DeviceSession};
///
/// # async fn example() -> shall_lib::Result<()> {
/// // No network access until the first request
/// let session = DeviceSession::http(DeviceAddress::new("24587CEB4834")).build()?;
///
/// // Older firmware on a plain LAN domain, status loaded up front
/// let session = DeviceSession::http(DeviceAddress::new("shall-kitchen"))
///     .with_resolver(AddressResolver::new().with_domain("lan"))
///     .with_api_version(ApiVersion::V1)
///     .connect()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpSessionBuilder {
    config: HttpConfig,
}

impl HttpSessionBuilder {
    pub(crate) fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Sets the resolver used to turn the address into a base URL.
    #[must_use]
    pub fn with_resolver(mut self, resolver: AddressResolver) -> Self {
        self.config = self.config.with_resolver(resolver);
        self
    }

    /// Sets the API revision spoken by the device.
    #[must_use]
    pub fn with_api_version(mut self, version: ApiVersion) -> Self {
        self.config = self.config.with_api_version(version);
        self
    }

    /// Returns the configuration built so far.
    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Builds the session without contacting the device.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn build(self) -> Result<DeviceSession<HttpClient>, Error> {
        let client = self.config.clone().into_client()?;
        Ok(DeviceSession::from_config(client, &self.config))
    }

    /// Builds the session and loads the device status.
    ///
    /// # Errors
    ///
    /// Returns error if the client cannot be created, the device cannot be
    /// reached, or the status does not decode.
    pub async fn connect(self) -> Result<DeviceSession<HttpClient>, Error> {
        let session = self.build()?;
        session.load_status().await?;
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::DeviceAddress;
    use crate::protocol::Transport;

    #[test]
    fn builder_defaults() {
        let builder = DeviceSession::http(DeviceAddress::new("24587CEB4834"));
        assert_eq!(builder.config().timeout(), HttpConfig::DEFAULT_TIMEOUT);
        assert_eq!(builder.config().api_version(), ApiVersion::V2);
    }

    #[test]
    fn builder_options() {
        let builder = DeviceSession::http(DeviceAddress::new("led"))
            .with_timeout(Duration::from_secs(2))
            .with_resolver(AddressResolver::new().with_domain("lan"))
            .with_api_version(ApiVersion::V1);

        assert_eq!(builder.config().timeout(), Duration::from_secs(2));
        assert_eq!(builder.config().base_url(), "http://led.lan");
        assert_eq!(builder.config().api_version(), ApiVersion::V1);
    }

    #[test]
    fn build_without_network() {
        let session = DeviceSession::http(DeviceAddress::new("24587CEB4834"))
            .build()
            .unwrap();

        assert_eq!(session.base_url(), "http://24587CEB4834.local");
        assert_eq!(session.address(), Some(DeviceAddress::new("24587CEB4834")));
        assert!(session.snapshot().is_empty());
    }

    #[test]
    fn update_address_rebuilds_base_url() {
        let session = DeviceSession::http_config(
            HttpConfig::new(DeviceAddress::new("old"))
                .with_resolver(AddressResolver::new().with_domain("lan")),
        )
        .build()
        .unwrap();

        session.update_address(DeviceAddress::new("new"));

        assert_eq!(session.base_url(), "http://new.lan");
        assert_eq!(session.transport().base_url(), "http://new.lan");
        assert_eq!(session.address(), Some(DeviceAddress::new("new")));
    }
}
