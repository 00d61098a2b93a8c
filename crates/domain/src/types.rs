// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Normalizes a label for lookup: trimmed, lowercase, spaces as underscores.
fn label_key(s: &str) -> String {
    s.trim().to_lowercase().replace(' ', "_")
}

/// Severity of a non-conformance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// All severities, lowest first.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// Returns the persisted representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// Parses a severity, accepting legacy labels.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSeverity` for unknown labels.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match label_key(s).as_str() {
            "low" | "baixa" => Ok(Self::Low),
            "medium" | "média" | "media" => Ok(Self::Medium),
            "high" | "alta" => Ok(Self::High),
            "critical" | "crítica" | "critica" => Ok(Self::Critical),
            _ => Err(DomainError::InvalidSeverity(s.to_string())),
        }
    }
}

impl FromStr for Severity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Category of a non-conformance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Safety,
    Quality,
    Environment,
    Operation,
    Maintenance,
    Other,
}

impl Category {
    /// All categories, in presentation order.
    pub const ALL: [Self; 6] = [
        Self::Safety,
        Self::Quality,
        Self::Environment,
        Self::Operation,
        Self::Maintenance,
        Self::Other,
    ];

    /// Returns the persisted representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Safety => "safety",
            Self::Quality => "quality",
            Self::Environment => "environment",
            Self::Operation => "operation",
            Self::Maintenance => "maintenance",
            Self::Other => "other",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Safety => "Safety",
            Self::Quality => "Quality",
            Self::Environment => "Environment",
            Self::Operation => "Operation",
            Self::Maintenance => "Maintenance",
            Self::Other => "Other",
        }
    }

    /// Parses a category, accepting legacy labels.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCategory` for unknown labels.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match label_key(s).as_str() {
            "safety" | "segurança" | "seguranca" => Ok(Self::Safety),
            "quality" | "qualidade" => Ok(Self::Quality),
            "environment" | "meio_ambiente" => Ok(Self::Environment),
            "operation" | "operação" | "operacao" => Ok(Self::Operation),
            "maintenance" | "manutenção" | "manutencao" => Ok(Self::Maintenance),
            "other" | "outros" => Ok(Self::Other),
            _ => Err(DomainError::InvalidCategory(s.to_string())),
        }
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Outcome of verifying whether a closing action resolved the non-conformance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectivenessVerdict {
    ToVerify,
    Effective,
    NotEffective,
}

impl EffectivenessVerdict {
    /// Returns the persisted representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ToVerify => "to_verify",
            Self::Effective => "effective",
            Self::NotEffective => "not_effective",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ToVerify => "To Verify",
            Self::Effective => "Effective",
            Self::NotEffective => "Not Effective",
        }
    }

    /// Parses a verdict, accepting legacy labels.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEffectiveness` for unknown labels.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match label_key(s).as_str() {
            "to_verify" | "a_verificar" => Ok(Self::ToVerify),
            "effective" | "eficaz" => Ok(Self::Effective),
            "not_effective" | "não_eficaz" | "nao_eficaz" => Ok(Self::NotEffective),
            _ => Err(DomainError::InvalidEffectiveness(s.to_string())),
        }
    }
}

impl FromStr for EffectivenessVerdict {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The lifecycle moment an evidence item documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceCategory {
    Opening,
    Closing,
    Reopening,
}

impl EvidenceCategory {
    /// All evidence categories, in document order.
    pub const ALL: [Self; 3] = [Self::Opening, Self::Closing, Self::Reopening];

    /// Returns the persisted representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Opening => "opening",
            Self::Closing => "closing",
            Self::Reopening => "reopening",
        }
    }

    /// Returns the heading used when evidence is presented.
    #[must_use]
    pub const fn heading(&self) -> &'static str {
        match self {
            Self::Opening => "Opening photos",
            Self::Closing => "Closing evidence",
            Self::Reopening => "Reopening photos",
        }
    }

    /// Parses an evidence category.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEvidenceCategory` for unknown labels.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match label_key(s).as_str() {
            "opening" | "abertura" => Ok(Self::Opening),
            "closing" | "encerramento" => Ok(Self::Closing),
            "reopening" | "reabertura" => Ok(Self::Reopening),
            _ => Err(DomainError::InvalidEvidenceCategory(s.to_string())),
        }
    }
}

impl FromStr for EvidenceCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A year-scoped sequential report number (`YYYY-NNN`).
///
/// The sequence is zero-padded to three digits and widens past 999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReportNumber {
    year: i32,
    sequence: u64,
}

impl ReportNumber {
    /// Creates a report number.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidYear` if the year is not a four-digit
    /// positive year.
    pub fn new(year: i32, sequence: u64) -> Result<Self, DomainError> {
        if !(1000..=9999).contains(&year) {
            return Err(DomainError::InvalidYear(year));
        }
        Ok(Self { year, sequence })
    }

    /// Returns the year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the sequence within the year.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Parses a report number belonging to any year.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidReportNumber` if the value is not
    /// `YYYY-` followed by one or more digits.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed: &str = s.trim();
        let invalid = || DomainError::InvalidReportNumber(s.to_string());

        let (year_part, seq_part) = trimmed.split_once('-').ok_or_else(invalid)?;
        if year_part.len() != 4 || !year_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if seq_part.is_empty() || !seq_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = year_part.parse().map_err(|_| invalid())?;
        let sequence: u64 = seq_part.parse().map_err(|_| invalid())?;
        Self::new(year, sequence)
    }
}

impl std::fmt::Display for ReportNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:03}", self.year, self.sequence)
    }
}

impl FromStr for ReportNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
