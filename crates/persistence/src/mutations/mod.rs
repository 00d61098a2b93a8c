// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! Every public mutation runs inside its own transaction, so a failure
//! leaves no partial writes behind.
//!
//! - `reports` — Filing and creating reports with their opening evidence
//! - `lifecycle` — Persisting Close and Reopen transitions
//! - `import` — Bulk upsert keyed by report number
//! - `cost_codes` — Cost-code reference list
//! - `settings` — Singleton settings such as the logo
//! - `sessions` — Session lifecycle

pub mod cost_codes;
pub mod import;
pub mod lifecycle;
pub mod reports;
pub mod sessions;
pub mod settings;
