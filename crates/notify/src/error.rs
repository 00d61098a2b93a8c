// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Reasons a notification could not be delivered.
///
/// These never escape the notifier as errors: [`crate::Notifier::send`]
/// folds them into a [`crate::Delivery`] diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    #[error("email not configured")]
    NotConfigured,
    #[error("invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },
    #[error("could not build message: {0}")]
    Message(String),
    #[error("SMTP transport error: {0}")]
    Transport(String),
}
