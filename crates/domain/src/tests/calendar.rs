// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{format_date, format_timestamp, parse_date, parse_timestamp};
use time::macros::{date, datetime};

#[test]
fn test_parse_date_accepted_forms() {
    assert_eq!(parse_date("2024-03-09"), Some(date!(2024 - 03 - 09)));
    assert_eq!(parse_date("09/03/2024"), Some(date!(2024 - 03 - 09)));
    assert_eq!(parse_date(" 2024-03-09 14:05:00 "), Some(date!(2024 - 03 - 09)));
    assert_eq!(parse_date("2024-03-09T14:05:00.123456"), Some(date!(2024 - 03 - 09)));
}

#[test]
fn test_parse_date_rejects_garbage() {
    assert_eq!(parse_date("March 9th"), None);
    assert_eq!(parse_date(""), None);
    assert_eq!(parse_date("2024-13-01"), None);
}

#[test]
fn test_parse_timestamp_accepted_forms() {
    assert_eq!(
        parse_timestamp("2024-03-09 14:05:07"),
        Some(datetime!(2024-03-09 14:05:07))
    );
    assert_eq!(
        parse_timestamp("2024-03-09T14:05:07.999"),
        Some(datetime!(2024-03-09 14:05:07))
    );
    assert_eq!(
        parse_timestamp("2024-03-09"),
        Some(datetime!(2024-03-09 00:00:00))
    );
}

#[test]
fn test_format_round_trip() {
    let at = datetime!(2024-11-02 08:09:10);
    assert_eq!(format_timestamp(at), "2024-11-02 08:09:10");
    assert_eq!(parse_timestamp(&format_timestamp(at)), Some(at));
    assert_eq!(format_date(at.date()), "2024-11-02");
}
