// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport layer for talking to the controller.
//!
//! A [`Transport`] issues one JSON request against the device's base URL and
//! hands back the raw body, or a [`ProtocolError`]. Nothing is retried here
//! and nothing escapes as a panic: every network failure becomes a `Result`.
//!
//! - [`HttpClient`]: the reqwest-backed implementation (feature `http`)

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConfig};

use std::fmt;
use std::future::Future;

use serde::de::DeserializeOwned;

use crate::error::{Error, ParseError, ProtocolError};

/// HTTP method of a device request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Read-only query.
    Get,
    /// State-changing command with a JSON body.
    Post,
}

impl Method {
    /// Returns the method name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw response from the device.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// The raw JSON response body.
    body: String,
}

impl ApiResponse {
    /// Creates a new response with the given body.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// Returns the raw JSON response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parses the response as a specific type.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON cannot be parsed into the target type.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, ParseError> {
        serde_json::from_str(&self.body).map_err(Into::into)
    }
}

/// Trait for transports that can reach a controller.
///
/// Requests must be `Send` so an exchange can keep running on its own task
/// after its caller stopped waiting for it.
#[allow(async_fn_in_trait)]
pub trait Transport: Send + Sync {
    /// Returns the base URL requests are issued against.
    fn base_url(&self) -> &str;

    /// Sends a request to `path` (relative to the base URL) and returns the
    /// response body.
    ///
    /// When `body` is present it is sent as JSON with the matching
    /// content type.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the device cannot be reached, times out or
    /// answers with a non-success status.
    fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> impl Future<Output = Result<ApiResponse, ProtocolError>> + Send;

    /// Sends a request and decodes the response into `R`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` on transport failure and `Error::Parse` if
    /// the body does not match the expected schema.
    async fn request_json<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<R, Error> {
        let response = self.request(method, path, body).await?;
        Ok(response.parse()?)
    }
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn base_url(&self) -> &str {
        (**self).base_url()
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse, ProtocolError> {
        (**self).request(method, path, body).await
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! Scripted in-memory transport for unit tests.

    use std::collections::VecDeque;
    use std::time::Duration;

    use parking_lot::Mutex;

    use super::{ApiResponse, Method, Transport};
    use crate::error::ProtocolError;

    type Reply = (Duration, Result<String, ProtocolError>);

    /// A request observed by [`ScriptedTransport`].
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct Recorded {
        pub method: Method,
        pub path: String,
        pub body: Option<serde_json::Value>,
    }

    /// Replies to requests in order from a script.
    ///
    /// A reply is claimed when the request starts, so delayed replies still
    /// map to requests in issue order.
    #[derive(Debug, Default)]
    pub(crate) struct ScriptedTransport {
        replies: Mutex<VecDeque<Reply>>,
        requests: Mutex<Vec<Recorded>>,
    }

    impl ScriptedTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn reply(self, body: serde_json::Value) -> Self {
            self.reply_after(body, Duration::ZERO)
        }

        pub(crate) fn reply_after(self, body: serde_json::Value, delay: Duration) -> Self {
            self.replies.lock().push_back((delay, Ok(body.to_string())));
            self
        }

        pub(crate) fn reply_raw(self, body: &str) -> Self {
            self.replies
                .lock()
                .push_back((Duration::ZERO, Ok(body.to_string())));
            self
        }

        pub(crate) fn fail(self, error: ProtocolError) -> Self {
            self.replies.lock().push_back((Duration::ZERO, Err(error)));
            self
        }

        pub(crate) fn requests(&self) -> Vec<Recorded> {
            self.requests.lock().clone()
        }
    }

    impl Transport for ScriptedTransport {
        fn base_url(&self) -> &str {
            "http://scripted.local"
        }

        async fn request(
            &self,
            method: Method,
            path: &str,
            body: Option<&serde_json::Value>,
        ) -> Result<ApiResponse, ProtocolError> {
            self.requests.lock().push(Recorded {
                method,
                path: path.to_string(),
                body: body.cloned(),
            });
            let next = self.replies.lock().pop_front();
            let (delay, reply) = next.unwrap_or_else(|| {
                (
                    Duration::ZERO,
                    Err(ProtocolError::ConnectionFailed(
                        "no scripted reply".to_string(),
                    )),
                )
            });
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            reply.map(ApiResponse::new)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::ScriptedTransport;
    use super::*;

    #[test]
    fn api_response_parse() {
        let response = ApiResponse::new(r#"{"success": true, "power": false}"#);
        let value: serde_json::Value = response.parse().unwrap();
        assert_eq!(value["power"], false);
    }

    #[test]
    fn api_response_parse_error() {
        let response = ApiResponse::new("<html>not json</html>");
        assert!(response.parse::<serde_json::Value>().is_err());
    }

    #[tokio::test]
    async fn request_json_maps_shape_mismatch_to_parse_error() {
        #[derive(Debug, serde::Deserialize)]
        struct Expected {
            #[allow(dead_code)]
            brightness: u8,
        }

        let transport = ScriptedTransport::new().reply(serde_json::json!({"hue": 10}));
        let result: Result<Expected, Error> = transport
            .request_json(Method::Get, "/api/status", None)
            .await;
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[tokio::test]
    async fn request_json_maps_transport_failure() {
        let transport = ScriptedTransport::new().fail(ProtocolError::Timeout(100));
        let result: Result<serde_json::Value, Error> = transport
            .request_json(Method::Get, "/api/status", None)
            .await;
        assert!(matches!(
            result,
            Err(Error::Protocol(ProtocolError::Timeout(100)))
        ));
    }

    #[test]
    fn method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
    }
}
