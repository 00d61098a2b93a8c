// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use ncr_domain::{
    ClosureDetails, EffectivenessVerdict, EvidenceUpload, ReopeningDetails, Report, ReportFields,
    ReportStatus, Severity,
};
use time::PrimitiveDateTime;
use time::macros::{date, datetime};

use crate::Command;

pub fn create_test_fields() -> ReportFields {
    ReportFields {
        issuer: Some(String::from("Ana Souza")),
        area: Some(String::from("Welding Bay 2")),
        title: Some(String::from("Porosity on flange weld")),
        severity: Some(Severity::High),
        ..ReportFields::default()
    }
}

pub fn create_test_report(status: ReportStatus) -> Report {
    Report {
        id: 7,
        number: Some(String::from("2024-007")),
        date: Some(date!(2024 - 05 - 14)),
        fields: create_test_fields(),
        status,
        closure: ClosureDetails::default(),
        reopening: ReopeningDetails::default(),
    }
}

pub fn create_test_photo(name: &str) -> EvidenceUpload {
    EvidenceUpload::new(name, "image/jpeg", vec![0xFF, 0xD8, 0xFF])
}

pub fn create_close_command() -> Command {
    Command::Close {
        closed_by: Some(String::from("Bruno")),
        notes: Some(String::from("Re-welded and inspected")),
        effectiveness: EffectivenessVerdict::Effective,
        evidence: vec![create_test_photo("after.jpg")],
    }
}

pub fn create_reopen_command() -> Command {
    Command::Reopen {
        reopened_by: Some(String::from("Carla")),
        reason: Some(String::from("Crack reappeared")),
        evidence: vec![create_test_photo("crack.jpg")],
    }
}

pub fn test_now() -> PrimitiveDateTime {
    datetime!(2024-05-20 10:15:30.250)
}
