// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod import_tests;
mod lifecycle_tests;

use ncr::NewReport;
use ncr_domain::{Category, EvidenceUpload, ReportFields, Severity};
use time::Date;

pub fn create_test_fields(title: &str) -> ReportFields {
    ReportFields {
        issuer: Some(String::from("Ana Souza")),
        area: Some(String::from("Welding Bay 2")),
        cost_code: Some(String::from("PEP-1001")),
        title: Some(String::from(title)),
        inspector: Some(String::from("Bruno Lima")),
        cause: Some(String::from("Welding; Supplier")),
        severity: Some(Severity::High),
        category: Some(Category::Quality),
        ..ReportFields::default()
    }
}

pub fn create_test_photo(name: &str) -> EvidenceUpload {
    EvidenceUpload::new(name, "image/png", vec![0x89, 0x50, 0x4E, 0x47, name.len() as u8])
}

pub fn create_test_date(year: i32) -> Date {
    Date::from_calendar_date(year, time::Month::May, 14).expect("Valid test date")
}

pub fn create_new_report(year: i32, title: &str, photos: &[&str]) -> NewReport {
    ncr::file(
        create_test_date(year),
        create_test_fields(title),
        photos.iter().map(|name| create_test_photo(name)).collect(),
    )
}
