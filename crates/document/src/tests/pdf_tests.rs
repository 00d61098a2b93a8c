// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{document_filename, render_report};
use ncr_domain::{Evidence, EvidenceCategory, Report};
use printpdf::image_crate::{DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;

use super::create_test_report;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(RgbImage::new(width, height));
    let mut bytes: Vec<u8> = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

fn evidence(id: i64, content: Vec<u8>) -> Evidence {
    Evidence {
        id,
        report_id: 3,
        category: EvidenceCategory::Opening,
        filename: format!("photo-{id}.png"),
        media_type: String::from("image/png"),
        content,
    }
}

#[test]
fn test_render_produces_pdf_bytes() {
    let bytes: Vec<u8> = render_report(&create_test_report(), &[], None).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_render_with_images_and_broken_inputs() {
    let items: Vec<Evidence> = vec![
        evidence(1, png_bytes(8, 6)),
        evidence(2, b"not an image".to_vec()),
    ];
    let bytes: Vec<u8> =
        render_report(&create_test_report(), &items, Some(b"garbage logo")).unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    let with_logo: Vec<u8> =
        render_report(&create_test_report(), &items, Some(&png_bytes(20, 10))).unwrap();
    assert!(with_logo.starts_with(b"%PDF"));
}

#[test]
fn test_document_filename() {
    let mut report: Report = create_test_report();
    assert_eq!(document_filename(&report), "NCR_2024-003.pdf");

    report.number = None;
    assert_eq!(document_filename(&report), "NCR_unnumbered.pdf");
}
