// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bulk Exchange: the delimiter-separated tabular format.
//!
//! Export writes `;`-delimited UTF-8 with a byte-order mark and a fixed
//! column order. Import accepts `,` or `;`, an optional byte-order mark, and
//! column names in English, legacy Portuguese, or one of the known aliases.

use ncr_domain::{
    Category, ClosureDetails, EffectivenessVerdict, ReopeningDetails, Report, ReportFields,
    ReportRecord, ReportStatus, Severity, format_date, format_timestamp, parse_date,
    parse_timestamp,
};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::error::ApiError;

const UTF8_BOM: &str = "\u{feff}";

/// Export column order. Import maps every accepted header onto one of these.
pub const EXPORT_COLUMNS: [&str; 26] = [
    "id",
    "date",
    "number",
    "issuer",
    "area",
    "cost_code",
    "title",
    "inspector",
    "description",
    "references",
    "cause",
    "process",
    "origin",
    "correction_action",
    "severity",
    "category",
    "actions",
    "status",
    "closed_at",
    "closed_by",
    "closing_notes",
    "effectiveness",
    "action_owner",
    "reopened_at",
    "reopened_by",
    "reopen_reason",
];

/// Normalized header → export column.
const HEADER_ALIASES: &[(&str, &str)] = &[
    ("data", "date"),
    ("rnc_num", "number"),
    ("rnc_nº", "number"),
    ("rnc_no", "number"),
    ("rnc_no.", "number"),
    ("rnc_numero", "number"),
    ("rnc", "number"),
    ("emitente", "issuer"),
    ("área", "area"),
    ("pep", "cost_code"),
    ("pep_descricao", "cost_code"),
    ("titulo", "title"),
    ("título", "title"),
    ("responsavel", "inspector"),
    ("responsável", "inspector"),
    ("responsavel_inspecao", "inspector"),
    ("descricao", "description"),
    ("descrição", "description"),
    ("referencias", "references"),
    ("referências", "references"),
    ("causador", "cause"),
    ("processo_envolvido", "process"),
    ("origem", "origin"),
    ("acao_correcao", "correction_action"),
    ("ação_correção", "correction_action"),
    ("severidade", "severity"),
    ("categoria_risco", "severity"),
    ("categoria", "category"),
    ("acoes", "actions"),
    ("ações", "actions"),
    ("encerrada_em", "closed_at"),
    ("encerrada_por", "closed_by"),
    ("encerramento_obs", "closing_notes"),
    ("eficacia", "effectiveness"),
    ("eficácia", "effectiveness"),
    ("responsavel_acao", "action_owner"),
    ("reaberta_em", "reopened_at"),
    ("reaberta_por", "reopened_by"),
    ("reabertura_motivo", "reopen_reason"),
];

/// Maps a raw header onto its export column, if it is recognized.
#[must_use]
pub fn canonical_column(header: &str) -> Option<&'static str> {
    let key: String = header
        .trim_start_matches(UTF8_BOM)
        .trim()
        .to_lowercase()
        .replace(' ', "_");

    EXPORT_COLUMNS
        .iter()
        .find(|column| **column == key)
        .copied()
        .or_else(|| {
            HEADER_ALIASES
                .iter()
                .find(|(alias, _)| *alias == key)
                .map(|(_, column)| *column)
        })
}

/// Picks the delimiter of a header line: `;` when it holds more semicolons
/// than commas, `,` otherwise.
#[must_use]
pub fn detect_delimiter(header_line: &str) -> u8 {
    let semicolons: usize = header_line.matches(';').count();
    let commas: usize = header_line.matches(',').count();
    if semicolons > commas { b';' } else { b',' }
}

fn decode_text(bytes: &[u8]) -> Result<&str, ApiError> {
    let text: &str = std::str::from_utf8(bytes).map_err(|e| ApiError::InvalidInput {
        field: String::from("file"),
        message: format!("File is not valid UTF-8: {e}"),
    })?;
    Ok(text.strip_prefix(UTF8_BOM).unwrap_or(text))
}

fn reader_for(text: &str) -> csv::Reader<&[u8]> {
    let header_line: &str = text.lines().next().unwrap_or_default();
    csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(header_line))
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes())
}

fn csv_error(err: &csv::Error) -> ApiError {
    ApiError::InvalidInput {
        field: String::from("file"),
        message: format!("Malformed CSV: {err}"),
    }
}

/// One data row keyed by export column.
struct Row<'a> {
    line: usize,
    values: HashMap<&'static str, &'a str>,
}

impl Row<'_> {
    fn text(&self, column: &str) -> Option<String> {
        self.values
            .get(column)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(String::from)
    }

    /// Parses an optional value, logging and dropping anything unparseable.
    fn parsed<T>(&self, column: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
        let raw: String = self.text(column)?;
        let value: Option<T> = parse(&raw);
        if value.is_none() {
            warn!(line = self.line, column, value = %raw, "Ignoring unparseable import value");
        }
        value
    }

    fn into_record(self) -> ReportRecord {
        ReportRecord {
            number: self.text("number"),
            date: self.parsed("date", parse_date),
            fields: ReportFields {
                issuer: self.text("issuer"),
                area: self.text("area"),
                cost_code: self.text("cost_code"),
                title: self.text("title"),
                inspector: self.text("inspector"),
                description: self.text("description"),
                references: self.text("references"),
                cause: self.text("cause"),
                process: self.text("process"),
                origin: self.text("origin"),
                correction_action: self.text("correction_action"),
                severity: self.parsed("severity", |v| Severity::parse(v).ok()),
                category: self.parsed("category", |v| Category::parse(v).ok()),
                actions: self.text("actions"),
                action_owner: self.text("action_owner"),
            },
            status: self.parsed("status", |v| ReportStatus::parse(v).ok()),
            closure: ClosureDetails {
                closed_at: self.parsed("closed_at", parse_timestamp),
                closed_by: self.text("closed_by"),
                notes: self.text("closing_notes"),
                effectiveness: self.parsed("effectiveness", |v| {
                    EffectivenessVerdict::parse(v).ok()
                }),
            },
            reopening: ReopeningDetails {
                reopened_at: self.parsed("reopened_at", parse_timestamp),
                reopened_by: self.text("reopened_by"),
                reason: self.text("reopen_reason"),
            },
        }
    }
}

/// Parses an uploaded report file into records.
///
/// Unrecognized columns are ignored and missing ones read as absent. When a
/// column appears twice, the first non-blank value wins. Values that do not
/// parse (dates, enumerations) become absent rather than rejecting the row.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the file is not UTF-8 or not
/// well-formed delimiter-separated text.
pub fn parse_report_csv(bytes: &[u8]) -> Result<Vec<ReportRecord>, ApiError> {
    let text: &str = decode_text(bytes)?;
    let mut reader = reader_for(text);

    let columns: Vec<Option<&'static str>> = reader
        .headers()
        .map_err(|e| csv_error(&e))?
        .iter()
        .map(canonical_column)
        .collect();
    debug!(
        recognized = columns.iter().flatten().count(),
        total = columns.len(),
        "Parsed import header"
    );

    let mut records: Vec<ReportRecord> = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let raw: csv::StringRecord = result.map_err(|e| csv_error(&e))?;
        if raw.iter().all(|v| v.trim().is_empty()) {
            continue;
        }

        let mut values: HashMap<&'static str, &str> = HashMap::new();
        for (column, value) in columns.iter().zip(raw.iter()) {
            if let Some(column) = *column
                && !value.trim().is_empty()
            {
                values.entry(column).or_insert(value);
            }
        }

        let row = Row {
            line: index + 2,
            values,
        };
        records.push(row.into_record());
    }

    Ok(records)
}

/// Parses an uploaded cost-code list: a file with a `code` column.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the file is malformed or has no
/// `code` column.
pub fn parse_cost_code_csv(bytes: &[u8]) -> Result<Vec<String>, ApiError> {
    let text: &str = decode_text(bytes)?;
    let mut reader = reader_for(text);

    let code_index: usize = reader
        .headers()
        .map_err(|e| csv_error(&e))?
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case("code"))
        .ok_or_else(|| ApiError::InvalidInput {
            field: String::from("code"),
            message: String::from("CSV must contain a column named 'code'"),
        })?;

    let mut codes: Vec<String> = Vec::new();
    for result in reader.records() {
        let record: csv::StringRecord = result.map_err(|e| csv_error(&e))?;
        if let Some(code) = record.get(code_index) {
            codes.push(code.to_string());
        }
    }
    Ok(codes)
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

fn export_row(report: &Report) -> [String; 26] {
    let fields = &report.fields;
    let closure = &report.closure;
    let reopening = &report.reopening;

    [
        report.id.to_string(),
        report.date.map_or_else(String::new, format_date),
        text(report.number.as_deref()),
        text(fields.issuer.as_deref()),
        text(fields.area.as_deref()),
        text(fields.cost_code.as_deref()),
        text(fields.title.as_deref()),
        text(fields.inspector.as_deref()),
        text(fields.description.as_deref()),
        text(fields.references.as_deref()),
        text(fields.cause.as_deref()),
        text(fields.process.as_deref()),
        text(fields.origin.as_deref()),
        text(fields.correction_action.as_deref()),
        text(fields.severity.as_ref().map(Severity::label)),
        text(fields.category.as_ref().map(Category::label)),
        text(fields.actions.as_deref()),
        report.status.label().to_string(),
        closure.closed_at.map_or_else(String::new, format_timestamp),
        text(closure.closed_by.as_deref()),
        text(closure.notes.as_deref()),
        text(closure.effectiveness.as_ref().map(EffectivenessVerdict::label)),
        text(fields.action_owner.as_deref()),
        reopening.reopened_at.map_or_else(String::new, format_timestamp),
        text(reopening.reopened_by.as_deref()),
        text(reopening.reason.as_deref()),
    ]
}

/// Serializes reports to the export format.
///
/// The header row is always written, even with no reports.
///
/// # Errors
///
/// Returns `ApiError::Internal` if serialization fails.
pub fn export_reports_csv(reports: &[Report]) -> Result<Vec<u8>, ApiError> {
    let internal = |e: &dyn std::fmt::Display| ApiError::Internal {
        message: format!("Failed to write export: {e}"),
    };

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(UTF8_BOM.as_bytes().to_vec());

    writer.write_record(EXPORT_COLUMNS).map_err(|e| internal(&e))?;
    for report in reports {
        writer
            .write_record(export_row(report))
            .map_err(|e| internal(&e))?;
    }

    writer.into_inner().map_err(|e| internal(&e))
}
