// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for SHALL controllers.

use std::time::Duration;

use reqwest::Client;

use crate::address::{AddressResolver, DeviceAddress};
use crate::error::ProtocolError;
use crate::protocol::{ApiResponse, Method, Transport};
use crate::types::ApiVersion;

// ============================================================================
// HttpConfig
// ============================================================================

/// Configuration for an HTTP controller session.
///
/// HTTP is stateless: each field update is an independent request, and the
/// device is only polled when asked to.
///
/// # Examples
///
/// ```
/// use shall_lib::protocol::HttpConfig;
/// use shall_lib::types::ApiVersion;
/// use shall_lib::DeviceAddress;
/// use std::time::Duration;
///
/// let config = HttpConfig::new(DeviceAddress::new("24587CEB4834"))
///     .with_timeout(Duration::from_secs(5))
///     .with_api_version(ApiVersion::V1);
///
/// assert_eq!(config.base_url(), "http://24587CEB4834.local");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    address: DeviceAddress,
    resolver: AddressResolver,
    timeout: Duration,
    api_version: ApiVersion,
}

impl HttpConfig {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a new configuration for the specified device.
    #[must_use]
    pub fn new(address: DeviceAddress) -> Self {
        Self {
            address,
            resolver: AddressResolver::new(),
            timeout: Self::DEFAULT_TIMEOUT,
            api_version: ApiVersion::default(),
        }
    }

    /// Sets the resolver used to derive the base URL.
    #[must_use]
    pub fn with_resolver(mut self, resolver: AddressResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the API revision spoken by the device.
    #[must_use]
    pub fn with_api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = version;
        self
    }

    /// Replaces the device address.
    #[must_use]
    pub fn with_address(mut self, address: DeviceAddress) -> Self {
        self.address = address;
        self
    }

    /// Returns the device address.
    #[must_use]
    pub fn address(&self) -> &DeviceAddress {
        &self.address
    }

    /// Returns the address resolver.
    #[must_use]
    pub fn resolver(&self) -> &AddressResolver {
        &self.resolver
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the API revision.
    #[must_use]
    pub fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.resolver.resolve(&self.address)
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient {
            base_url: self.base_url(),
            client,
            timeout: self.timeout,
        })
    }
}

// ============================================================================
// HttpClient
// ============================================================================

/// HTTP client for a single controller.
///
/// Requests are `<base_url><path>`, e.g.
/// `http://24587CEB4834.local/api/status`.
///
/// # Examples
///
/// ```no_run
/// use shall_lib::protocol::{HttpClient, Method, Transport};
///
/// # async fn example() -> shall_lib::Result<()> {
/// let client = HttpClient::new("http://24587CEB4834.local")?;
/// let status: serde_json::Value = client
///     .request_json(Method::Get, "/api/status", None)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Creates a new HTTP client for the specified base URL.
    ///
    /// A bare host gets an `http://` scheme prepended.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProtocolError> {
        let base_url = base_url.into();
        let base_url = if base_url.starts_with("http://") || base_url.starts_with("https://") {
            base_url
        } else {
            format!("http://{base_url}")
        };

        let timeout = HttpConfig::DEFAULT_TIMEOUT;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(Self {
            base_url,
            client,
            timeout,
        })
    }

    /// Returns a client that targets another base URL, sharing the
    /// underlying connection pool.
    #[must_use]
    pub fn rebased(&self, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: self.client.clone(),
            timeout: self.timeout,
        }
    }

    /// Builds the URL for a path.
    fn build_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn map_send_error(&self, err: reqwest::Error) -> ProtocolError {
        if err.is_timeout() {
            #[allow(clippy::cast_possible_truncation)]
            let millis = self.timeout.as_millis() as u64;
            ProtocolError::Timeout(millis)
        } else if err.is_builder() {
            // The URL itself could not be parsed
            ProtocolError::InvalidAddress(self.base_url.clone())
        } else {
            ProtocolError::Http(err)
        }
    }
}

impl Transport for HttpClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse, ProtocolError> {
        let url = self.build_url(path);

        tracing::debug!(method = %method, url = %url, body = ?body, "Sending HTTP request");

        let mut request = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|err| self.map_send_error(err))?;

        if !response.status().is_success() {
            return Err(ProtocolError::ConnectionFailed(format!(
                "HTTP {} - {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|err| self.map_send_error(err))?;

        tracing::debug!(body = %body, "Received HTTP response");

        Ok(ApiResponse::new(body))
    }
}
