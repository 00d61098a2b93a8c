// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification messages for report events.

use std::fmt::Write as _;

/// A plain-text notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub subject: String,
    pub body: String,
}

/// The report values an "opened" notification carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenedReport<'a> {
    pub number: &'a str,
    pub date: &'a str,
    pub issuer: &'a str,
    pub area: &'a str,
    pub cost_code: &'a str,
    pub title: &'a str,
    pub severity: &'a str,
    pub category: &'a str,
}

/// The report values a "closed" notification carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClosedReport<'a> {
    pub number: &'a str,
    pub title: &'a str,
    pub closed_by: &'a str,
    pub effectiveness: &'a str,
    pub notes: &'a str,
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}

fn append_link(body: &mut String, base_url: &str) {
    if !base_url.trim().is_empty() {
        let _ = write!(body, "\nOpen the register: {}\n", base_url.trim());
    }
}

/// Builds the message sent when a report is filed.
#[must_use]
pub fn opened_message(report: &OpenedReport<'_>, base_url: &str) -> Message {
    let mut body: String = String::from("A new non-conformance report was opened.\n\n");
    for (label, value) in [
        ("No.", report.number),
        ("Date", report.date),
        ("Issuer", report.issuer),
        ("Area", report.area),
        ("Cost code", report.cost_code),
        ("Title", report.title),
        ("Severity", report.severity),
        ("Category", report.category),
    ] {
        let _ = writeln!(body, "{label}: {}", or_dash(value));
    }
    append_link(&mut body, base_url);

    Message {
        subject: format!("[NCR OPENED] No. {} - {}", report.number, report.title),
        body,
    }
}

/// Builds the message sent when a report is closed.
#[must_use]
pub fn closed_message(report: &ClosedReport<'_>, base_url: &str) -> Message {
    let mut body: String = String::from("A non-conformance report was closed.\n\n");
    for (label, value) in [
        ("No.", report.number),
        ("Title", report.title),
        ("Closed by", report.closed_by),
        ("Effectiveness", report.effectiveness),
        ("Notes", report.notes),
    ] {
        let _ = writeln!(body, "{label}: {}", or_dash(value));
    }
    append_link(&mut body, base_url);

    Message {
        subject: format!("[NCR CLOSED] No. {} - {}", report.number, report.title),
        body,
    }
}
