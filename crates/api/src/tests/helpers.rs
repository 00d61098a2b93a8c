// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use ncr_domain::EvidenceUpload;
use ncr_persistence::SqlitePersistence;
use time::{Date, Month, PrimitiveDateTime, Time};

use crate::{AccessLevel, AccessPolicy, FileReportRequest, ReportInput, file_report};

pub const TEST_PASSWORD: &str = "qualidade123";
pub const TEST_BASE_URL: &str = "http://ncr.example.test";

/// A policy with the cheapest bcrypt cost so tests stay fast.
pub fn create_test_policy() -> AccessPolicy {
    AccessPolicy::with_cost(TEST_PASSWORD, 4).expect("Failed to hash test password")
}

pub fn setup_test_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn create_test_today() -> Date {
    Date::from_calendar_date(2024, Month::May, 14).expect("Valid test date")
}

pub fn create_test_now() -> PrimitiveDateTime {
    PrimitiveDateTime::new(
        create_test_today(),
        Time::from_hms_milli(16, 30, 5, 250).expect("Valid test time"),
    )
}

pub fn create_test_photo(name: &str) -> EvidenceUpload {
    EvidenceUpload::new(name, "image/jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0, name.len() as u8])
}

pub fn create_test_input(title: &str) -> ReportInput {
    ReportInput {
        issuer: Some(String::from("Ana Souza")),
        area: Some(String::from("Welding Bay 2")),
        cost_code: Some(String::from("PEP-1001")),
        title: Some(String::from(title)),
        inspector: Some(String::from("Bruno Lima")),
        description: Some(String::from("Porosity on flange weld")),
        cause: vec![String::from("Welding"), String::from("Supplier")],
        correction_action: vec![String::from("Rework")],
        severity: Some(String::from("High")),
        category: Some(String::from("Quality")),
        ..ReportInput::default()
    }
}

/// Files a report as Quality and returns its id.
pub fn file_test_report(persistence: &mut SqlitePersistence, title: &str) -> i64 {
    let request = FileReportRequest {
        report: create_test_input(title),
        photos: vec![create_test_photo("opening.jpg")],
    };
    file_report(
        persistence,
        AccessLevel::Quality,
        request,
        create_test_today(),
        TEST_BASE_URL,
    )
    .expect("Failed to file test report")
    .response
    .report_id
}
