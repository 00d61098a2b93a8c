// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `reports` — Report rows, filtering and number lookup
//! - `evidence` — Evidence attached to reports
//! - `cost_codes` — Cost-code reference list
//! - `settings` — Singleton settings such as the logo
//! - `sessions` — Session lookup

pub mod cost_codes;
pub mod evidence;
pub mod reports;
pub mod sessions;
pub mod settings;
