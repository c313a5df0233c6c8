// startup-data is a tool for editing the list of programs launched at login
// Copyright (C) 2025  Peoples Grocers LLC
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//
// To purchase a license under different terms contact admin@peoplesgrocers.com
// To request changes, report bugs, or give user feedback contact
// marxism@peoplesgrocers.com
//

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Fatal,
    Warning,
    Info,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Fatal => write!(f, "error"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Info => write!(f, "info"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticCode {
    EmptyFile,
    InvalidJson,
    BadExtension,
    IoFailure,

    NotAnObject,
    MissingField,
    UnknownField,
    WrongFieldType,
    EmptyValue,
    ArgumentCountMismatch,
    TotalItemsMismatch,
    DuplicateItemNumber,

    ModifiedDataMalformed,
    ExpectedFullData,
    ExpectedSingleItem,
    OriginalDataRequired,
    OriginalDataMalformed,
    UnexpectedOriginalData,

    InvalidItemNumber,

    NoChange,
    OverwriteDeclined,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::EmptyFile => "E001",
            DiagnosticCode::InvalidJson => "E002",
            DiagnosticCode::BadExtension => "E003",
            DiagnosticCode::IoFailure => "E005",

            DiagnosticCode::NotAnObject => "E010",
            DiagnosticCode::MissingField => "E011",
            DiagnosticCode::UnknownField => "E012",
            DiagnosticCode::WrongFieldType => "E013",
            DiagnosticCode::EmptyValue => "E014",
            DiagnosticCode::ArgumentCountMismatch => "E015",
            DiagnosticCode::TotalItemsMismatch => "E016",
            DiagnosticCode::DuplicateItemNumber => "E017",

            DiagnosticCode::ModifiedDataMalformed => "E020",
            DiagnosticCode::ExpectedFullData => "E021",
            DiagnosticCode::ExpectedSingleItem => "E022",
            DiagnosticCode::OriginalDataRequired => "E023",
            DiagnosticCode::OriginalDataMalformed => "E024",
            DiagnosticCode::UnexpectedOriginalData => "E025",

            DiagnosticCode::InvalidItemNumber => "E030",

            DiagnosticCode::NoChange => "I040",
            DiagnosticCode::OverwriteDeclined => "W041",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DiagnosticCode::EmptyFile => "Empty file",
            DiagnosticCode::InvalidJson => "Invalid JSON",
            DiagnosticCode::BadExtension => "Wrong file extension",
            DiagnosticCode::IoFailure => "I/O failure",

            DiagnosticCode::NotAnObject => "Expected a JSON object",
            DiagnosticCode::MissingField => "Missing required field",
            DiagnosticCode::UnknownField => "Unknown field",
            DiagnosticCode::WrongFieldType => "Wrong field type",
            DiagnosticCode::EmptyValue => "Empty value",
            DiagnosticCode::ArgumentCountMismatch => "Argument count mismatch",
            DiagnosticCode::TotalItemsMismatch => "Total items mismatch",
            DiagnosticCode::DuplicateItemNumber => "Duplicate item number",

            DiagnosticCode::ModifiedDataMalformed => "Modified data not properly formed",
            DiagnosticCode::ExpectedFullData => "Expected full startup data",
            DiagnosticCode::ExpectedSingleItem => "Expected a single startup item",
            DiagnosticCode::OriginalDataRequired => "Original data required",
            DiagnosticCode::OriginalDataMalformed => "Original data not properly formed",
            DiagnosticCode::UnexpectedOriginalData => "Unexpected original data",

            DiagnosticCode::InvalidItemNumber => "Invalid item number",

            DiagnosticCode::NoChange => "Nothing to write",
            DiagnosticCode::OverwriteDeclined => "Overwrite declined",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub filename: Option<String>,
    pub location: Option<String>,
    pub level: DiagnosticLevel,
    pub code: DiagnosticCode,
    pub description: String,
    pub advice: Option<String>,
}

impl Diagnostic {
    pub fn new(level: DiagnosticLevel, code: DiagnosticCode, description: String) -> Self {
        Self {
            filename: None,
            location: None,
            level,
            code,
            description,
            advice: None,
        }
    }

    pub fn with_filename(mut self, filename: String) -> Self {
        self.filename = Some(filename);
        self
    }

    /// Where inside the document the problem sits, written like `Items[2].Name`.
    pub fn with_location(mut self, location: String) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_advice(mut self, advice: String) -> Self {
        self.advice = Some(advice);
        self
    }

    pub fn is_fatal(&self) -> bool {
        self.level == DiagnosticLevel::Fatal
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.filename, &self.location) {
            (Some(filename), Some(location)) => write!(f, "{}:{} - ", filename, location)?,
            (Some(filename), None) => write!(f, "{} - ", filename)?,
            (None, Some(location)) => write!(f, "{} - ", location)?,
            (None, None) => {}
        }

        writeln!(
            f,
            "{} {}: {}",
            self.level,
            self.code.as_str(),
            self.code.title()
        )?;
        writeln!(f)?;
        writeln!(f, "{}", self.description)?;

        if let Some(advice) = &self.advice {
            writeln!(f)?;
            writeln!(f, "{}", advice)?;
        }

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_fatal(&self) -> bool {
        self.diagnostics.iter().any(|d| d.is_fatal())
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_location_and_advice() {
        let diagnostic = Diagnostic::new(
            DiagnosticLevel::Fatal,
            DiagnosticCode::MissingField,
            "I couldn't find the field 'Name'.".to_string(),
        )
        .with_filename("startup_data.json".to_string())
        .with_location("Items[0]".to_string())
        .with_advice("Every startup item needs a name.".to_string());

        let rendered = diagnostic.to_string();
        assert!(rendered.starts_with("startup_data.json:Items[0] - error E011: Missing required field"));
        assert!(rendered.contains("I couldn't find the field 'Name'."));
        assert!(rendered.ends_with("Every startup item needs a name.\n"));
    }

    #[test]
    fn test_info_is_not_fatal() {
        let notice = Diagnostic::new(
            DiagnosticLevel::Info,
            DiagnosticCode::NoChange,
            "Nothing changed.".to_string(),
        );
        assert!(!notice.is_fatal());
        assert!(notice.to_string().starts_with("info I040"));
    }

    #[test]
    fn test_collector_tracks_fatal() {
        let mut collector = DiagnosticCollector::new();
        assert!(collector.is_empty());

        collector.add(Diagnostic::new(
            DiagnosticLevel::Warning,
            DiagnosticCode::OverwriteDeclined,
            "Skipped.".to_string(),
        ));
        assert!(!collector.has_fatal());

        collector.add(Diagnostic::new(
            DiagnosticLevel::Fatal,
            DiagnosticCode::EmptyFile,
            "Empty.".to_string(),
        ));
        assert!(collector.has_fatal());
        assert_eq!(collector.len(), 2);
    }
}
