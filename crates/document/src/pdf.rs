// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! PDF emission with `printpdf`.

use ncr_domain::{Evidence, Report};
use printpdf::image_crate::{self, DynamicImage, GenericImageView};
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfLayerReference,
};
use tracing::{debug, warn};

use crate::error::RenderError;
use crate::layout::{
    Element, EvidenceSlot, FontWeight, ImageRef, ImageSize, PAGE_HEIGHT_MM, PAGE_WIDTH_MM,
    PageModel, layout_report,
};

/// Resolution images are embedded at; only used to derive the scale.
const IMAGE_DPI: f32 = 300.0;

/// Returns the download filename for a report's document.
#[must_use]
pub fn document_filename(report: &Report) -> String {
    let number: &str = report
        .number
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("unnumbered");
    format!("NCR_{number}.pdf")
}

fn decode(bytes: &[u8], what: &str) -> Option<DynamicImage> {
    match image_crate::load_from_memory(bytes) {
        Ok(image) => Some(DynamicImage::ImageRgb8(image.to_rgb8())),
        Err(e) => {
            warn!(what, error = %e, "Skipping undecodable image");
            None
        }
    }
}

fn size_of(image: &DynamicImage) -> ImageSize {
    let (width, height) = image.dimensions();
    ImageSize { width, height }
}

fn draw_image(layer: &PdfLayerReference, image: &DynamicImage, x: f32, y: f32, width: f32) {
    #[allow(clippy::cast_precision_loss)]
    let natural_width_mm: f32 = image.width() as f32 * 25.4 / IMAGE_DPI;
    let scale: f32 = if natural_width_mm > 0.0 {
        width / natural_width_mm
    } else {
        1.0
    };

    Image::from_dynamic_image(image).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(x)),
            translate_y: Some(Mm(y)),
            scale_x: Some(scale),
            scale_y: Some(scale),
            dpi: Some(IMAGE_DPI),
            ..ImageTransform::default()
        },
    );
}

/// Renders a report, its evidence and the optional logo as a PDF.
///
/// Images that cannot be decoded are skipped; they never fail the render.
///
/// # Errors
///
/// Returns `RenderError::Pdf` if the PDF writer fails.
pub fn render_report(
    report: &Report,
    evidence: &[Evidence],
    logo: Option<&[u8]>,
) -> Result<Vec<u8>, RenderError> {
    let logo_image: Option<DynamicImage> = logo.and_then(|bytes| decode(bytes, "logo"));
    let evidence_images: Vec<Option<DynamicImage>> = evidence
        .iter()
        .map(|item| decode(&item.content, &item.filename))
        .collect();
    let slots: Vec<EvidenceSlot> = evidence
        .iter()
        .zip(&evidence_images)
        .map(|(item, image)| EvidenceSlot {
            category: item.category,
            size: image.as_ref().map(size_of),
        })
        .collect();

    let model: PageModel = layout_report(report, logo_image.as_ref().map(size_of), &slots);
    debug!(
        report_id = report.id,
        pages = model.pages.len(),
        "Laid out report document"
    );

    let title: String = document_filename(report);
    let (doc, first_page, first_layer) = PdfDocument::new(
        title.as_str(),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let regular: IndirectFontRef = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    let bold: IndirectFontRef = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    for (index, page) in model.pages.iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(
                Mm(PAGE_WIDTH_MM),
                Mm(PAGE_HEIGHT_MM),
                format!("Page {}", index + 1),
            )
        };
        let layer: PdfLayerReference = doc.get_page(page_index).get_layer(layer_index);

        for element in &page.elements {
            match element {
                Element::Text {
                    x,
                    y,
                    size,
                    weight,
                    text,
                } => {
                    let font: &IndirectFontRef = match weight {
                        FontWeight::Regular => &regular,
                        FontWeight::Bold => &bold,
                    };
                    layer.use_text(text.as_str(), *size, Mm(*x), Mm(*y), font);
                }
                Element::Image {
                    x,
                    y,
                    width,
                    image,
                    ..
                } => {
                    let source: Option<&DynamicImage> = match image {
                        ImageRef::Logo => logo_image.as_ref(),
                        ImageRef::Evidence(i) => evidence_images.get(*i).and_then(Option::as_ref),
                    };
                    if let Some(source) = source {
                        draw_image(&layer, source, *x, *y, *width);
                    }
                }
            }
        }
    }

    doc.save_to_bytes()
        .map_err(|e| RenderError::Pdf(e.to_string()))
}
