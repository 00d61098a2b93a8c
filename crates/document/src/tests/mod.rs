// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod pdf_tests;

use ncr_domain::{
    ClosureDetails, ReopeningDetails, Report, ReportFields, ReportStatus, Severity,
};
use time::macros::date;

pub fn create_test_report() -> Report {
    Report {
        id: 3,
        number: Some(String::from("2024-003")),
        date: Some(date!(2024 - 05 - 14)),
        fields: ReportFields {
            issuer: Some(String::from("Ana Souza")),
            area: Some(String::from("Welding Bay 2")),
            cost_code: Some(String::from("PEP-1001")),
            title: Some(String::from("Porosity on flange weld")),
            description: Some(String::from("Visible porosity along the root pass.")),
            severity: Some(Severity::High),
            ..ReportFields::default()
        },
        status: ReportStatus::Open,
        closure: ClosureDetails::default(),
        reopening: ReopeningDetails::default(),
    }
}
