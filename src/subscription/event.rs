// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Events delivered to subscribers.

use std::fmt;

use crate::error::{Error, ErrorKind};
use crate::state::{FieldKind, StateChange};

/// A step of one field's synchronization state machine.
///
/// Presentation layers use these to drive optimistic edits: show the
/// candidate on `Pending`, settle on the device's value on `Confirmed`, and
/// revert to `revert_to` on `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldTransition {
    /// A candidate was submitted.
    Pending {
        /// The field being synchronized.
        field: FieldKind,
        /// The submitted candidate.
        candidate: StateChange,
    },
    /// The device confirmed a value, possibly different from the candidate.
    Confirmed {
        /// The field being synchronized.
        field: FieldKind,
        /// The value the device settled on.
        value: StateChange,
    },
    /// The submission failed.
    Failed {
        /// The field being synchronized.
        field: FieldKind,
        /// Human-readable reason.
        reason: String,
        /// Last snapshot value for the field, if one was ever loaded.
        revert_to: Option<StateChange>,
    },
}

impl FieldTransition {
    /// Returns the field this transition belongs to.
    #[must_use]
    pub fn field(&self) -> FieldKind {
        match self {
            Self::Pending { field, .. }
            | Self::Confirmed { field, .. }
            | Self::Failed { field, .. } => *field,
        }
    }

    /// Returns `true` for a `Failed` transition.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// The session operation an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Loading `/api/status`.
    LoadStatus,
    /// Submitting one field.
    Submit(FieldKind),
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadStatus => f.write_str("load status"),
            Self::Submit(field) => write!(f, "submit {field}"),
        }
    }
}

/// Structured error delivered to `on_error` subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    /// Operation that failed.
    pub operation: Operation,
    /// Failure classification.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
}

impl ErrorReport {
    /// Creates a report.
    #[must_use]
    pub fn new(operation: Operation, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
        }
    }

    /// Creates a report from a library error.
    #[must_use]
    pub fn from_error(operation: Operation, error: &Error) -> Self {
        Self::new(operation, error.kind(), error.to_string())
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed ({}): {}", self.operation, self.kind, self.message)
    }
}
