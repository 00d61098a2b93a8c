// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notifier for the NCR register: best-effort email about report events.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod config;
mod error;
mod message;
mod notifier;

#[cfg(test)]
mod tests;

pub use config::{EmailConfig, parse_recipients};
pub use error::NotifyError;
pub use message::{ClosedReport, Message, OpenedReport, closed_message, opened_message};
pub use notifier::{Delivery, Notifier, Outbox, SmtpNotifier};
