// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Document Renderer for the NCR register.
//!
//! Rendering happens in two steps. [`layout_report`] computes a page model
//! from the report and the pixel sizes of its images; [`render_report`]
//! decodes the images, runs the layout and writes the model as PDF.

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

mod error;
mod layout;
mod pdf;

#[cfg(test)]
mod tests;

pub use error::RenderError;
pub use layout::{
    BODY_SIZE_PT, BOTTOM_MARGIN_MM, CELL_GAP_MM, CELL_HEIGHT_MM, CELL_WIDTH_MM, Element,
    EvidenceSlot, FontWeight, ImageRef, ImageSize, LOGO_HEIGHT_MM, LOGO_WIDTH_MM, PAGE_HEIGHT_MM,
    PAGE_WIDTH_MM, Page, PageModel, SIDE_MARGIN_MM, fit_within, layout_report, printable_width,
    text_width_mm, wrap_text,
};
pub use pdf::{document_filename, render_report};
