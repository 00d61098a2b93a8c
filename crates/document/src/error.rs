// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors raised while producing a printable document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The PDF writer rejected a font or failed to serialize the document.
    #[error("PDF generation failed: {0}")]
    Pdf(String),
}
