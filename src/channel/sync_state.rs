// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-field synchronization state and submission outcomes.

use std::fmt;

/// Outcome of one field submission.
///
/// A field is either confirmed with the device's value or left untouched;
/// there is no partial result.
///
/// # Examples
///
/// ```
/// use shall_lib::channel::FieldResult;
///
/// let ok: FieldResult<u8> = FieldResult::Confirmed(128);
/// assert_eq!(ok.confirmed(), Some(&128));
///
/// let failed: FieldResult<u8> = FieldResult::Failed("timeout".to_string());
/// assert_eq!(failed.reason(), Some("timeout"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldResult<T> {
    /// The device accepted the submission and echoed this value.
    Confirmed(T),
    /// The submission failed; the reason is human-readable.
    Failed(String),
}

impl<T> FieldResult<T> {
    /// Returns `true` if confirmed.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }

    /// Returns `true` if failed.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns the confirmed value, if any.
    #[must_use]
    pub fn confirmed(&self) -> Option<&T> {
        match self {
            Self::Confirmed(value) => Some(value),
            Self::Failed(_) => None,
        }
    }

    /// Returns the failure reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Confirmed(_) => None,
            Self::Failed(reason) => Some(reason),
        }
    }

    /// Maps the confirmed value.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> FieldResult<U> {
        match self {
            Self::Confirmed(value) => FieldResult::Confirmed(f(value)),
            Self::Failed(reason) => FieldResult::Failed(reason),
        }
    }
}

impl<T, E: fmt::Display> From<Result<T, E>> for FieldResult<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Confirmed(value),
            Err(err) => Self::Failed(err.to_string()),
        }
    }
}

/// Synchronization state of one field.
///
/// ```text
/// Idle ──submit──▶ Pending(candidate) ──ok──▶ Confirmed(value)
///                          │
///                          └──err──▶ Failed(reason)
/// ```
///
/// `Confirmed` and `Failed` move back to `Pending` on the next submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SyncState<T> {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// A submission is queued or on the wire.
    Pending(T),
    /// The last submission was confirmed with this value.
    Confirmed(T),
    /// The last submission failed.
    Failed(String),
}

impl<T> SyncState<T> {
    /// Returns `true` while a submission is outstanding.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Returns the state name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending(_) => "pending",
            Self::Confirmed(_) => "confirmed",
            Self::Failed(_) => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_result_from_result() {
        let ok: FieldResult<u8> = Ok::<u8, String>(3).into();
        assert_eq!(ok, FieldResult::Confirmed(3));

        let err: FieldResult<u8> = Err::<u8, _>("boom").into();
        assert_eq!(err, FieldResult::Failed("boom".to_string()));
        assert!(err.is_failed());
    }

    #[test]
    fn field_result_map() {
        let doubled = FieldResult::Confirmed(2).map(|v| v * 2);
        assert_eq!(doubled.confirmed(), Some(&4));

        let failed: FieldResult<i32> = FieldResult::Failed("x".to_string());
        assert_eq!(failed.map(|v| v * 2).reason(), Some("x"));
    }

    #[test]
    fn sync_state_default_is_idle() {
        let state: SyncState<u8> = SyncState::default();
        assert_eq!(state, SyncState::Idle);
        assert_eq!(state.name(), "idle");
        assert!(SyncState::Pending(1).is_pending());
    }
}
