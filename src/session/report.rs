// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-field outcomes and the batch report.

use std::fmt;

use crate::channel::FieldResult;
use crate::state::FieldKind;
use crate::types::{Brightness, HsColor, Mode, PowerState};

/// Result of submitting one field, tagged with the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    /// Power submission result.
    Power(FieldResult<PowerState>),
    /// Brightness submission result.
    Brightness(FieldResult<Brightness>),
    /// Color submission result.
    Color(FieldResult<HsColor>),
    /// Mode submission result.
    Mode(FieldResult<Mode>),
}

impl FieldOutcome {
    /// Returns the field this outcome belongs to.
    #[must_use]
    pub fn field(&self) -> FieldKind {
        match self {
            Self::Power(_) => FieldKind::Power,
            Self::Brightness(_) => FieldKind::Brightness,
            Self::Color(_) => FieldKind::Color,
            Self::Mode(_) => FieldKind::Mode,
        }
    }

    /// Returns `true` if the device confirmed the field.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        match self {
            Self::Power(result) => result.is_confirmed(),
            Self::Brightness(result) => result.is_confirmed(),
            Self::Color(result) => result.is_confirmed(),
            Self::Mode(result) => result.is_confirmed(),
        }
    }

    /// Returns `true` if the submission failed.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        !self.is_confirmed()
    }

    /// Returns the failure reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Power(result) => result.reason(),
            Self::Brightness(result) => result.reason(),
            Self::Color(result) => result.reason(),
            Self::Mode(result) => result.reason(),
        }
    }
}

/// Status line fragment, e.g. `Power set to On.` or `Mode update failed.`
impl fmt::Display for FieldOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Power(FieldResult::Confirmed(state)) => {
                write!(f, "Power set to {}.", state.label())
            }
            Self::Brightness(FieldResult::Confirmed(level)) => {
                write!(f, "Brightness set to {level}.")
            }
            Self::Color(FieldResult::Confirmed(color)) => write!(f, "Color set: {color}."),
            Self::Mode(FieldResult::Confirmed(mode)) => {
                write!(f, "Mode set to {}.", mode.label())
            }
            _ => write!(f, "{} update failed.", self.field().label()),
        }
    }
}

/// Ordered outcomes of one batch apply.
///
/// A batch is best-effort: one failed field never prevents the others from
/// being attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    outcomes: Vec<FieldOutcome>,
}

impl ApplyReport {
    pub(crate) fn new(outcomes: Vec<FieldOutcome>) -> Self {
        Self { outcomes }
    }

    /// Returns the outcomes in submission order.
    #[must_use]
    pub fn outcomes(&self) -> &[FieldOutcome] {
        &self.outcomes
    }

    /// Consumes the report, returning the outcomes.
    #[must_use]
    pub fn into_outcomes(self) -> Vec<FieldOutcome> {
        self.outcomes
    }

    /// Returns the outcome for a field, if it was submitted.
    #[must_use]
    pub fn outcome(&self, field: FieldKind) -> Option<&FieldOutcome> {
        self.outcomes.iter().find(|outcome| outcome.field() == field)
    }

    /// Returns the number of submitted fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns `true` if nothing was submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Returns `true` if every submitted field was confirmed.
    #[must_use]
    pub fn all_confirmed(&self) -> bool {
        self.outcomes.iter().all(FieldOutcome::is_confirmed)
    }

    /// Returns the fields that failed, in submission order.
    #[must_use]
    pub fn failed_fields(&self) -> Vec<FieldKind> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.is_failed())
            .map(FieldOutcome::field)
            .collect()
    }

    /// Returns a one-line human-readable summary.
    #[must_use]
    pub fn summary(&self) -> String {
        self.outcomes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ApplyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}
