// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Report Store for the NCR register.
//!
//! This crate owns the canonical table of reports, their evidence, the
//! cost-code reference list, singleton settings and sessions. It is built on
//! Diesel with the `SQLite` backend.
//!
//! ## Schema
//!
//! The schema is created by embedded migrations (`migrations/`). Diesel
//! records applied migrations in its version table, so start-up migration is
//! idempotent.
//!
//! ## Transactions
//!
//! Every public operation runs in one transaction. Filing a report uses an
//! `IMMEDIATE` transaction so number allocation and insertion happen under
//! the database write lock.
//!
//! ## Testing
//!
//! `Persistence::new_in_memory()` opens a uniquely named shared-cache
//! in-memory database, so each test works against an isolated store.

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
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use ncr::{NewReport, TransitionResult};
use ncr_domain::{Evidence, EvidenceCategory, Report, ReportNumber, ReportRecord};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{
    CostCodeSummary, FiledReport, ImportSummary, Logo, ReportFilter, SessionData,
};
pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Type alias for the only supported backend.
pub type SqlitePersistence = Persistence;

/// The Report Store.
///
/// Holds a single `SQLite` connection. Callers that share a store across
/// tasks wrap it in a mutex, which also serializes writes.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a store backed by a fresh in-memory database.
    ///
    /// Each call receives a unique database instance via an atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:ncr_memdb_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a store backed by a database file, creating it if needed.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Reports
    // ========================================================================

    /// Files a report, allocating its number in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if allocation or any write fails.
    pub fn file_report(&mut self, new_report: &NewReport) -> Result<FiledReport, PersistenceError> {
        mutations::reports::file_report(&mut self.conn, new_report)
    }

    /// Creates a report under an already allocated number.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails.
    pub fn create_report(
        &mut self,
        number: &str,
        new_report: &NewReport,
    ) -> Result<i64, PersistenceError> {
        mutations::reports::create_report(&mut self.conn, number, new_report)
    }

    /// Previews the number the next report filed in `year` would receive.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the year cannot carry a number.
    pub fn next_report_number(&mut self, year: i32) -> Result<ReportNumber, PersistenceError> {
        queries::reports::next_number_for_year(&mut self.conn, year)
    }

    /// Lists every report, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reports(&mut self) -> Result<Vec<Report>, PersistenceError> {
        queries::reports::list_reports(&mut self.conn)
    }

    /// Lists reports matching a filter, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reports_filtered(
        &mut self,
        filter: &ReportFilter,
    ) -> Result<Vec<Report>, PersistenceError> {
        queries::reports::list_reports_filtered(&mut self.conn, filter)
    }

    /// Retrieves a report by ID.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ReportNotFound` if no such report exists.
    pub fn get_report(&mut self, report_id: i64) -> Result<Report, PersistenceError> {
        queries::reports::get_report(&mut self.conn, report_id)
    }

    /// Persists a lifecycle transition with its evidence.
    ///
    /// # Errors
    ///
    /// Returns an error if the report is missing, changed status meanwhile,
    /// or a write fails.
    pub fn apply_transition(&mut self, result: &TransitionResult) -> Result<(), PersistenceError> {
        mutations::lifecycle::apply_transition(&mut self.conn, result)
    }

    /// Upserts report records keyed by report number.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails; the whole batch is rolled back.
    pub fn import_records(
        &mut self,
        records: &[ReportRecord],
    ) -> Result<ImportSummary, PersistenceError> {
        mutations::import::import_records(&mut self.conn, records)
    }

    // ========================================================================
    // Evidence
    // ========================================================================

    /// Lists a report's evidence in one category, in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_evidence(
        &mut self,
        report_id: i64,
        category: EvidenceCategory,
    ) -> Result<Vec<Evidence>, PersistenceError> {
        queries::evidence::list_evidence(&mut self.conn, report_id, category)
    }

    /// Retrieves one evidence item of a report.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EvidenceNotFound` if it does not exist.
    pub fn get_evidence(
        &mut self,
        report_id: i64,
        category: EvidenceCategory,
        evidence_id: i64,
    ) -> Result<Evidence, PersistenceError> {
        queries::evidence::get_evidence(&mut self.conn, report_id, category, evidence_id)
    }

    // ========================================================================
    // Cost codes & settings
    // ========================================================================

    /// Lists every cost code in lexicographic order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_cost_codes(&mut self) -> Result<Vec<String>, PersistenceError> {
        queries::cost_codes::list_cost_codes(&mut self.conn)
    }

    /// Adds cost codes, ignoring blanks and duplicates.
    ///
    /// # Errors
    ///
    /// Returns an error if a write fails.
    pub fn add_cost_codes<S: AsRef<str>>(
        &mut self,
        candidates: &[S],
    ) -> Result<CostCodeSummary, PersistenceError> {
        mutations::cost_codes::add_cost_codes(&mut self.conn, candidates)
    }

    /// Stores the branding image, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn set_logo(
        &mut self,
        content: &[u8],
        media_type: Option<&str>,
    ) -> Result<(), PersistenceError> {
        mutations::settings::set_logo(&mut self.conn, content, media_type)
    }

    /// Retrieves the branding image, if one is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_logo(&mut self) -> Result<Option<Logo>, PersistenceError> {
        queries::settings::get_logo(&mut self.conn)
    }

    // ========================================================================
    // Sessions
    // ========================================================================

    /// Creates a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created.
    pub fn create_session(
        &mut self,
        session_token: &str,
        access_level: &str,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::sessions::create_session(&mut self.conn, session_token, access_level, expires_at)
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::sessions::get_session_by_token(&mut self.conn, session_token)
    }

    /// Records activity on a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        mutations::sessions::update_session_activity(&mut self.conn, session_id)
    }

    /// Deletes a session by token, returning how many rows were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<usize, PersistenceError> {
        mutations::sessions::delete_session(&mut self.conn, session_token)
    }

    /// Deletes every expired session.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_expired_sessions(&mut self) -> Result<usize, PersistenceError> {
        mutations::sessions::delete_expired_sessions(&mut self.conn)
    }
}
