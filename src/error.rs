// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the SHALL client library.
//!
//! Failures are grouped by where they originate: value validation on the
//! client side, transport (network) failures, and decoding of the device's
//! JSON responses. [`Error::kind`] collapses them into the coarse
//! [`ErrorKind`] taxonomy reported to observers.

use std::fmt;

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the device.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while decoding a device response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

impl Error {
    /// Classifies this error into an [`ErrorKind`].
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Value(_) => ErrorKind::InvalidCandidate,
            Self::Protocol(err) => err.kind(),
            Self::Parse(ParseError::InvalidValue { .. }) => ErrorKind::UnexpectedServerValue,
            Self::Parse(_) => ErrorKind::MalformedResponse,
        }
    }
}

/// Coarse classification of failures, as seen by callers and observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The device could not be reached or answered with an HTTP error.
    NetworkUnreachable,
    /// The body could not be decoded into the expected JSON shape.
    MalformedResponse,
    /// The body decoded but carried a value outside its domain.
    UnexpectedServerValue,
    /// The request did not complete in time.
    Timeout,
    /// The candidate was rejected before anything was sent.
    InvalidCandidate,
}

impl ErrorKind {
    /// Returns a stable identifier for this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkUnreachable => "network_unreachable",
            Self::MalformedResponse => "malformed_response",
            Self::UnexpectedServerValue => "unexpected_server_value",
            Self::Timeout => "timeout",
            Self::InvalidCandidate => "invalid_candidate",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// A hue value is outside the valid range (0-359).
    #[error("hue value {0} is out of range [0, 359]")]
    InvalidHue(u16),

    /// An operating mode string is not recognized.
    #[error("invalid mode: {0}")]
    InvalidMode(String),

    /// The device address is empty.
    #[error("device address must not be empty")]
    EmptyAddress,

    /// The mode cannot be expressed by the configured API version.
    #[error("mode {mode} is not supported by API {version}")]
    UnsupportedMode {
        /// The requested mode.
        mode: String,
        /// The API version in use.
        version: String,
    },
}

/// Errors related to transport-level communication.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The device answered with a non-success status.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

impl ProtocolError {
    /// Classifies this error into an [`ErrorKind`].
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            #[cfg(feature = "http")]
            Self::Http(err) if err.is_timeout() => ErrorKind::Timeout,
            #[cfg(feature = "http")]
            Self::Http(err) if err.is_decode() => ErrorKind::MalformedResponse,
            Self::Timeout(_) => ErrorKind::Timeout,
            _ => ErrorKind::NetworkUnreachable,
        }
    }
}

/// Errors related to decoding device responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// A field decoded but holds a value outside its domain.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 0,
            max: 255,
            actual: 300,
        };
        assert_eq!(err.to_string(), "value 300 is out of range [0, 255]");
    }

    #[test]
    fn error_from_value_error() {
        let err: Error = ValueError::InvalidHue(400).into();
        assert!(matches!(err, Error::Value(ValueError::InvalidHue(400))));
        assert_eq!(err.kind(), ErrorKind::InvalidCandidate);
    }

    #[test]
    fn parse_error_kinds() {
        let missing: Error = ParseError::MissingField("mode".to_string()).into();
        assert_eq!(missing.kind(), ErrorKind::MalformedResponse);

        let invalid: Error = ParseError::InvalidValue {
            field: "hue".to_string(),
            message: "out of range".to_string(),
        }
        .into();
        assert_eq!(invalid.kind(), ErrorKind::UnexpectedServerValue);
    }

    #[test]
    fn protocol_error_kinds() {
        let timeout: Error = ProtocolError::Timeout(500).into();
        assert_eq!(timeout.kind(), ErrorKind::Timeout);
        assert_eq!(timeout.to_string(), "protocol error: request timed out after 500 ms");

        let refused: Error = ProtocolError::ConnectionFailed("HTTP 500".to_string()).into();
        assert_eq!(refused.kind(), ErrorKind::NetworkUnreachable);
    }

    #[test]
    fn unsupported_mode_display() {
        let err = ValueError::UnsupportedMode {
            mode: "environmental".to_string(),
            version: "v1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "mode environmental is not supported by API v1"
        );
    }

    #[test]
    fn error_kind_display() {
        assert_eq!(ErrorKind::MalformedResponse.to_string(), "malformed_response");
    }
}
