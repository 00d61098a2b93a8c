// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Multi-valued classification fields.
//!
//! Each field draws its values from a fixed option set and is stored as a
//! single text value joined with `"; "`.

use serde::{Deserialize, Serialize};

/// Separator used when storing multi-valued fields as text.
pub const SELECTION_SEPARATOR: &str = "; ";

/// Options for the cause field.
pub const CAUSE_OPTIONS: &[&str] = &[
    "Welding",
    "Painting",
    "Engineering",
    "Supplier",
    "Customer",
    "Boilermaking",
    "Machining",
    "Planning",
    "Quality",
    "HR",
    "Other",
];

/// Options for the process field.
pub const PROCESS_OPTIONS: &[&str] = &[
    "Commercial",
    "Purchasing",
    "Planning",
    "Receiving",
    "Production",
    "Final Inspection",
    "Safety",
    "Environment",
    "5S",
    "HR",
    "Other",
];

/// Options for the origin field.
pub const ORIGIN_OPTIONS: &[&str] = &[
    "Painting",
    "Budgeting",
    "Machining",
    "Warehouse",
    "Welding",
    "Assembly",
    "Customer",
    "Shipping",
    "Preparation",
    "HR",
    "Other",
];

/// Options for the correction action field.
pub const CORRECTION_ACTION_OPTIONS: &[&str] = &[
    "Scrap",
    "Rework",
    "Accept Under Concession",
    "Notify Supplier",
    "See And Act",
    "Cleaning",
    "Maintenance",
    "Purchase Request",
];

/// The multi-valued classification fields of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationField {
    Cause,
    Process,
    Origin,
    CorrectionAction,
}

impl ClassificationField {
    /// Returns the option set for this field.
    #[must_use]
    pub const fn options(&self) -> &'static [&'static str] {
        match self {
            Self::Cause => CAUSE_OPTIONS,
            Self::Process => PROCESS_OPTIONS,
            Self::Origin => ORIGIN_OPTIONS,
            Self::CorrectionAction => CORRECTION_ACTION_OPTIONS,
        }
    }

    /// Returns the human-readable field name.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Cause => "cause",
            Self::Process => "process",
            Self::Origin => "origin",
            Self::CorrectionAction => "correction action",
        }
    }

    /// Returns true if `value` is one of this field's options.
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        self.options().contains(&value)
    }
}

/// Joins selected options into their stored form, skipping blank entries.
///
/// Returns `None` when nothing remains to store.
#[must_use]
pub fn join_selections<S: AsRef<str>>(selections: &[S]) -> Option<String> {
    let kept: Vec<&str> = selections
        .iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .collect();

    if kept.is_empty() {
        None
    } else {
        Some(kept.join(SELECTION_SEPARATOR))
    }
}

/// Splits a stored multi-valued field back into its selections.
#[must_use]
pub fn split_selections(stored: &str) -> Vec<String> {
    stored
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
