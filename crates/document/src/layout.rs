// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Page layout for a single report.
//!
//! Layout is pure: it turns a report plus the pixel sizes of its images into
//! a list of pages holding positioned elements. Coordinates are millimetres
//! measured from the bottom-left corner of the page, matching PDF user space.

use ncr_domain::{EvidenceCategory, Report, format_date_day_first, format_timestamp};

/// A4 portrait width.
pub const PAGE_WIDTH_MM: f32 = 210.0;
/// A4 portrait height.
pub const PAGE_HEIGHT_MM: f32 = 297.0;
/// Left and right margin.
pub const SIDE_MARGIN_MM: f32 = 15.0;
/// Distance from the top edge to the first baseline of a page.
pub const TOP_MARGIN_MM: f32 = 20.0;
/// Lowest baseline a text line may occupy.
pub const BOTTOM_MARGIN_MM: f32 = 20.0;

pub const TITLE: &str = "NCR - NON-CONFORMANCE REPORT";
pub const TITLE_X_MM: f32 = 60.0;
pub const TITLE_SIZE_PT: f32 = 14.0;
pub const BLOCK_TITLE_SIZE_PT: f32 = 10.0;
pub const BODY_SIZE_PT: f32 = 9.0;

pub const LOGO_WIDTH_MM: f32 = 35.0;
pub const LOGO_HEIGHT_MM: f32 = 15.0;

/// Vertical distance between header rows.
pub const HEADER_ROW_PITCH_MM: f32 = 6.0;
/// Header column offsets from the left edge.
pub const HEADER_COLUMNS_MM: [f32; 3] = [15.0, 70.0, 115.0];

/// Vertical distance between wrapped lines.
pub const LINE_PITCH_MM: f32 = 5.0;
/// Gap between a block title and its first line.
pub const BLOCK_TITLE_GAP_MM: f32 = 4.0;
/// Gap left above each block after the first.
pub const BLOCK_SPACING_MM: f32 = 6.0;

pub const CELL_WIDTH_MM: f32 = 60.0;
pub const CELL_HEIGHT_MM: f32 = 45.0;
pub const CELL_GAP_MM: f32 = 6.0;

const POINTS_PER_MM: f32 = 72.0 / 25.4;
const PLACEHOLDER: &str = "-";

/// The printable width between the side margins.
#[must_use]
pub const fn printable_width() -> f32 {
    PAGE_WIDTH_MM - 2.0 * SIDE_MARGIN_MM
}

/// Pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// An evidence image as seen by the layout.
///
/// `size` is `None` when the bytes could not be decoded; such images are
/// skipped without consuming a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvidenceSlot {
    pub category: EvidenceCategory,
    pub size: Option<ImageSize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Which image an image element draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRef {
    Logo,
    /// Index into the evidence slots handed to [`layout_report`].
    Evidence(usize),
}

/// A positioned drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A single line of text; `y` is the baseline.
    Text {
        x: f32,
        y: f32,
        size: f32,
        weight: FontWeight,
        text: String,
    },
    /// An image; `(x, y)` is its bottom-left corner.
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        image: ImageRef,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub elements: Vec<Element>,
}

/// The laid-out document.
#[derive(Debug, Clone, PartialEq)]
pub struct PageModel {
    pub pages: Vec<Page>,
}

impl PageModel {
    /// Iterates over every text line on every page.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(|p| &p.elements).filter_map(|e| match e {
            Element::Text { text, .. } => Some(text.as_str()),
            Element::Image { .. } => None,
        })
    }
}

/// Approximate Helvetica advance widths (per 1000 em) for printable ASCII.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a-m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n-z
    334, 260, 334, 584, // {..~
];

/// Estimates the rendered width of `text` in Helvetica at `size_pt`, in mm.
#[must_use]
pub fn text_width_mm(text: &str, size_pt: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| {
            let code = c as usize;
            if (32..127).contains(&code) {
                u32::from(HELVETICA_WIDTHS[code - 32])
            } else {
                556
            }
        })
        .sum();
    #[allow(clippy::cast_precision_loss)]
    let em: f32 = units as f32 / 1000.0;
    em * size_pt / POINTS_PER_MM
}

/// Word-wraps `text` to `max_width_mm`.
///
/// A single word wider than the limit gets a line of its own. Blank text
/// yields the placeholder line.
#[must_use]
pub fn wrap_text(text: &str, size_pt: f32, max_width_mm: f32) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current: String = String::new();

    for word in text.split_whitespace() {
        let candidate: String = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if current.is_empty() || text_width_mm(&candidate, size_pt) <= max_width_mm {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::from(PLACEHOLDER));
    }
    lines
}

/// Scales `size` to fit inside a `max_width` × `max_height` box,
/// preserving the aspect ratio.
#[must_use]
pub fn fit_within(size: ImageSize, max_width: f32, max_height: f32) -> (f32, f32) {
    if size.width == 0 || size.height == 0 {
        return (max_width, max_height);
    }
    #[allow(clippy::cast_precision_loss)]
    let (w, h) = (size.width as f32, size.height as f32);
    let scale: f32 = (max_width / w).min(max_height / h);
    (w * scale, h * scale)
}

fn or_placeholder(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(PLACEHOLDER)
}

struct Cursor {
    pages: Vec<Page>,
    y: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            y: PAGE_HEIGHT_MM - TOP_MARGIN_MM,
        }
    }

    fn push(&mut self, element: Element) {
        if let Some(page) = self.pages.last_mut() {
            page.elements.push(element);
        }
    }

    fn text(&mut self, x: f32, y: f32, size: f32, weight: FontWeight, text: impl Into<String>) {
        self.push(Element::Text {
            x,
            y,
            size,
            weight,
            text: text.into(),
        });
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.y = PAGE_HEIGHT_MM - TOP_MARGIN_MM;
    }

    /// Emits a titled, wrapped text block whose title sits at the cursor.
    fn block(&mut self, title: &str, body: &str) {
        self.text(
            SIDE_MARGIN_MM,
            self.y,
            BLOCK_TITLE_SIZE_PT,
            FontWeight::Bold,
            title,
        );
        self.y -= BLOCK_TITLE_GAP_MM;

        for line in wrap_text(body, BODY_SIZE_PT, printable_width()) {
            if self.y < BOTTOM_MARGIN_MM {
                self.new_page();
            }
            self.text(SIDE_MARGIN_MM, self.y, BODY_SIZE_PT, FontWeight::Regular, line);
            self.y -= LINE_PITCH_MM;
        }
    }

    /// Emits one evidence group as a grid whose heading sits just below the
    /// cursor. `slots` pairs each slot index with its decoded size.
    fn grid(&mut self, heading: &str, slots: &[(usize, ImageSize)]) {
        if self.y - 2.0 * BLOCK_TITLE_GAP_MM < BOTTOM_MARGIN_MM {
            self.new_page();
        }
        self.text(
            SIDE_MARGIN_MM,
            self.y - BLOCK_TITLE_GAP_MM,
            BLOCK_TITLE_SIZE_PT,
            FontWeight::Bold,
            format!("{heading}:"),
        );
        self.y -= 2.0 * BLOCK_TITLE_GAP_MM + 2.0;

        let right_edge: f32 = PAGE_WIDTH_MM - SIDE_MARGIN_MM;
        let mut x: f32 = SIDE_MARGIN_MM;

        for &(index, size) in slots {
            if x + CELL_WIDTH_MM > right_edge {
                x = SIDE_MARGIN_MM;
                self.y -= CELL_HEIGHT_MM + CELL_GAP_MM;
            }
            if self.y - CELL_HEIGHT_MM < BOTTOM_MARGIN_MM {
                self.new_page();
                x = SIDE_MARGIN_MM;
            }

            let (width, height) = fit_within(size, CELL_WIDTH_MM, CELL_HEIGHT_MM);
            self.push(Element::Image {
                x,
                y: self.y - height,
                width,
                height,
                image: ImageRef::Evidence(index),
            });
            x += CELL_WIDTH_MM + CELL_GAP_MM;
        }

        self.y -= CELL_HEIGHT_MM + 2.0 * CELL_GAP_MM;
    }
}

fn closing_summary(report: &Report) -> Option<String> {
    let closure = &report.closure;
    if closure.closed_at.is_none() && closure.closed_by.is_none() && closure.notes.is_none() {
        return None;
    }
    Some(format!(
        "Closed at {} by {}. Effectiveness: {}. Notes: {}",
        closure.closed_at.map_or_else(|| PLACEHOLDER.to_string(), format_timestamp),
        or_placeholder(closure.closed_by.as_deref()),
        closure.effectiveness.map_or(PLACEHOLDER, |v| v.label()),
        or_placeholder(closure.notes.as_deref()),
    ))
}

fn reopening_summary(report: &Report) -> Option<String> {
    let reopening = &report.reopening;
    if reopening.reopened_at.is_none()
        && reopening.reopened_by.is_none()
        && reopening.reason.is_none()
    {
        return None;
    }
    Some(format!(
        "Reopened at {} by {}. Reason: {}",
        reopening
            .reopened_at
            .map_or_else(|| PLACEHOLDER.to_string(), format_timestamp),
        or_placeholder(reopening.reopened_by.as_deref()),
        or_placeholder(reopening.reason.as_deref()),
    ))
}

/// Lays out a report.
///
/// # Arguments
///
/// * `report` - The report to print
/// * `logo` - The decoded size of the branding image, if one is configured
///   and decodable
/// * `evidence` - Evidence slots in creation order; image elements refer to
///   them by index
#[must_use]
pub fn layout_report(
    report: &Report,
    logo: Option<ImageSize>,
    evidence: &[EvidenceSlot],
) -> PageModel {
    let mut cursor: Cursor = Cursor::new();
    let top: f32 = cursor.y;
    let fields = &report.fields;

    if let Some(size) = logo {
        let (width, height) = fit_within(size, LOGO_WIDTH_MM, LOGO_HEIGHT_MM);
        cursor.push(Element::Image {
            x: SIDE_MARGIN_MM,
            y: top - LOGO_HEIGHT_MM,
            width,
            height,
            image: ImageRef::Logo,
        });
    }
    cursor.text(TITLE_X_MM, top, TITLE_SIZE_PT, FontWeight::Bold, TITLE);

    let date: String = report
        .date
        .map_or_else(|| PLACEHOLDER.to_string(), format_date_day_first);
    let header_rows: [[Option<String>; 3]; 3] = [
        [
            Some(format!("NCR No.: {}", or_placeholder(report.number.as_deref()))),
            Some(format!("Date: {date}")),
            Some(format!("Issuer: {}", or_placeholder(fields.issuer.as_deref()))),
        ],
        [
            Some(format!("Area: {}", or_placeholder(fields.area.as_deref()))),
            None,
            Some(format!(
                "Severity: {}",
                fields.severity.map_or(PLACEHOLDER, |s| s.label())
            )),
        ],
        [
            Some(format!(
                "Cost code: {}",
                or_placeholder(fields.cost_code.as_deref())
            )),
            None,
            Some(format!(
                "Category: {}",
                fields.category.map_or(PLACEHOLDER, |c| c.label())
            )),
        ],
    ];

    cursor.y = top - 10.0;
    for row in header_rows {
        for (x, cell) in HEADER_COLUMNS_MM.into_iter().zip(row) {
            if let Some(text) = cell {
                cursor.text(x, cursor.y, BODY_SIZE_PT, FontWeight::Regular, text);
            }
        }
        cursor.y -= HEADER_ROW_PITCH_MM;
    }
    cursor.y -= 10.0 - HEADER_ROW_PITCH_MM;

    let mut blocks: Vec<(&str, String)> = vec![
        ("Title:", or_placeholder(fields.title.as_deref()).to_string()),
        (
            "Non-conformance description:",
            or_placeholder(fields.description.as_deref()).to_string(),
        ),
        (
            "References:",
            or_placeholder(fields.references.as_deref()).to_string(),
        ),
        ("Cause:", or_placeholder(fields.cause.as_deref()).to_string()),
        (
            "Process involved:",
            or_placeholder(fields.process.as_deref()).to_string(),
        ),
        ("Origin:", or_placeholder(fields.origin.as_deref()).to_string()),
        (
            "Correction action:",
            or_placeholder(fields.correction_action.as_deref()).to_string(),
        ),
    ];
    if let Some(summary) = closing_summary(report) {
        blocks.push(("Closing:", summary));
    }
    if let Some(summary) = reopening_summary(report) {
        blocks.push(("Reopening:", summary));
    }

    for (i, (title, body)) in blocks.iter().enumerate() {
        if i > 0 {
            cursor.y -= BLOCK_SPACING_MM;
        }
        if cursor.y < BOTTOM_MARGIN_MM {
            cursor.new_page();
        }
        cursor.block(title, body);
    }

    for category in EvidenceCategory::ALL {
        let slots: Vec<(usize, ImageSize)> = evidence
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.category == category)
            .filter_map(|(i, slot)| slot.size.map(|size| (i, size)))
            .collect();
        if slots.is_empty() {
            continue;
        }
        cursor.grid(category.heading(), &slots);
    }

    PageModel {
        pages: cursor.pages,
    }
}
