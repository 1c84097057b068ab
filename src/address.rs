// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device addressing.
//!
//! Controllers announce themselves over mDNS under their hardware address,
//! so the user only ever types something like `24587CEB4834`. The
//! [`AddressResolver`] turns that into the base URL every API path is
//! appended to.

use std::fmt;

use crate::error::ValueError;

/// User-supplied identifier of a controller (usually its hardware address).
///
/// No format is imposed. [`DeviceAddress::new`] accepts anything; settings
/// editors should go through [`DeviceAddress::validated`] before persisting.
///
/// # Examples
///
/// ```
/// use shall_lib::DeviceAddress;
///
/// let address = DeviceAddress::validated("24587CEB4834").unwrap();
/// assert_eq!(address.as_str(), "24587CEB4834");
///
/// assert!(DeviceAddress::validated("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceAddress(String);

impl DeviceAddress {
    /// Address used when nothing has been configured yet.
    pub const DEFAULT: &'static str = "24587CEB4834";

    /// Wraps an address without validating it.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Wraps an address, rejecting empty or whitespace-only input.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::EmptyAddress` if nothing usable was supplied.
    pub fn validated(address: impl Into<String>) -> Result<Self, ValueError> {
        let address = address.into();
        if address.trim().is_empty() {
            return Err(ValueError::EmptyAddress);
        }
        Ok(Self(address))
    }

    /// Returns the raw address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DeviceAddress {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derives base URLs from device addresses.
///
/// The default resolver produces `http://<address>.local`. Nothing is
/// escaped or checked: a malformed address yields a URL that fails later,
/// at the transport layer.
///
/// Addresses that already carry an `http://` or `https://` scheme are used
/// verbatim, which lets a session point at an arbitrary server.
///
/// # Examples
///
/// ```
/// use shall_lib::{AddressResolver, DeviceAddress};
///
/// let resolver = AddressResolver::new();
/// let url = resolver.resolve(&DeviceAddress::new("24587CEB4834"));
/// assert_eq!(url, "http://24587CEB4834.local");
///
/// let url = resolver.resolve(&DeviceAddress::new("http://127.0.0.1:8080"));
/// assert_eq!(url, "http://127.0.0.1:8080");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressResolver {
    scheme: String,
    domain: String,
}

impl AddressResolver {
    /// Default URL scheme.
    pub const DEFAULT_SCHEME: &'static str = "http";
    /// Default mDNS domain.
    pub const DEFAULT_DOMAIN: &'static str = "local";

    /// Creates a resolver with the default scheme and domain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scheme: Self::DEFAULT_SCHEME.to_string(),
            domain: Self::DEFAULT_DOMAIN.to_string(),
        }
    }

    /// Sets the URL scheme.
    #[must_use]
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Sets the domain appended to the address. An empty domain appends
    /// nothing.
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Returns the base URL for an address.
    #[must_use]
    pub fn resolve(&self, address: &DeviceAddress) -> String {
        let raw = address.as_str();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            return raw.trim_end_matches('/').to_string();
        }

        if self.domain.is_empty() {
            format!("{}://{raw}", self.scheme)
        } else {
            format!("{}://{raw}.{}", self.scheme, self.domain)
        }
    }
}

impl Default for AddressResolver {
    fn default() -> Self {
        Self::new()
    }
}
