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

//! Reading and writing the startup file.
//!
//! There is no locking. The tool loads, edits in memory and saves; if two
//! processes do that at once the last save wins.

use serde_json::Value;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticLevel};
use crate::model::{default_document, StartupDocument};
use crate::schema::{check, SchemaKind};

pub const STARTUP_FILENAME: &str = "startup_data.json";
pub const DEFAULT_FILENAME: &str = "default_startup.json";
pub const EXPECTED_EXTENSION: &str = "json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
}

/// Where the startup files live. Built once from the command line and passed
/// to [`StartupStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub root: PathBuf,
    pub environment: Environment,
    /// Replaces the resolved startup file when set.
    pub startup_file_override: Option<PathBuf>,
}

impl StoreConfig {
    pub fn new<P: Into<PathBuf>>(root: P, environment: Environment) -> Self {
        Self {
            root: root.into(),
            environment,
            startup_file_override: None,
        }
    }

    pub fn with_startup_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.startup_file_override = Some(path.into());
        self
    }

    /// `<root>/config` in production, `<root>/devenv/config` otherwise.
    pub fn data_dir(&self) -> PathBuf {
        match self.environment {
            Environment::Production => self.root.join("config"),
            Environment::Development => self.root.join("devenv").join("config"),
        }
    }

    pub fn startup_file(&self) -> PathBuf {
        match &self.startup_file_override {
            Some(path) => path.clone(),
            None => self.data_dir().join(STARTUP_FILENAME),
        }
    }

    pub fn default_file(&self) -> PathBuf {
        self.data_dir().join(DEFAULT_FILENAME)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwritePolicy {
    /// Replace whatever is on disk. Used when saving edits to a file that was
    /// just loaded.
    Overwrite,
    /// The target may hold data the user hasn't seen. Only replace it if the
    /// caller already asked and the user agreed.
    ConfirmFirst { confirmed: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    BadExtension { found: Option<String> },
    Empty,
    InvalidJson(String),
    SchemaInvalid(Vec<Diagnostic>),
    Io(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteError {
    BadExtension { found: Option<String> },
    SchemaInvalid(Vec<Diagnostic>),
    /// Not a failure: the file already holds this exact data.
    NoChange,
    OverwriteDeclined,
    Io(String),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::BadExtension { found } => write_bad_extension(f, found),
            ReadError::Empty => write!(f, "startup data is blank"),
            ReadError::InvalidJson(detail) => write!(f, "startup data isn't valid JSON: {}", detail),
            ReadError::SchemaInvalid(problems) => write!(
                f,
                "startup data isn't valid startup data ({} problems)",
                problems.len()
            ),
            ReadError::Io(detail) => write!(f, "couldn't read the startup file: {}", detail),
        }
    }
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteError::BadExtension { found } => write_bad_extension(f, found),
            WriteError::SchemaInvalid(problems) => write!(
                f,
                "refusing to save invalid startup data ({} problems)",
                problems.len()
            ),
            WriteError::NoChange => write!(f, "existing startup data is the same, nothing written"),
            WriteError::OverwriteDeclined => write!(f, "skipped writing startup file"),
            WriteError::Io(detail) => write!(f, "couldn't write the startup file: {}", detail),
        }
    }
}

fn write_bad_extension(f: &mut fmt::Formatter<'_>, found: &Option<String>) -> fmt::Result {
    match found {
        Some(ext) => write!(
            f,
            "invalid startup file name: received extension .{}, expected .{}",
            ext, EXPECTED_EXTENSION
        ),
        None => write!(f, "please specify a valid startup file name ending in .{}", EXPECTED_EXTENSION),
    }
}

impl std::error::Error for ReadError {}
impl std::error::Error for WriteError {}

impl ReadError {
    pub fn into_diagnostics(self, path: &Path) -> Vec<Diagnostic> {
        let filename = path.display().to_string();
        let summary = capitalize(&self.to_string());
        let diagnostic = match self {
            ReadError::SchemaInvalid(problems) => {
                let mut diagnostics = vec![Diagnostic::new(
                    DiagnosticLevel::Fatal,
                    DiagnosticCode::InvalidJson,
                    "I read the startup file, but it isn't valid startup data.".to_string(),
                )
                .with_filename(filename.clone())
                .with_advice(
                    "Each problem is listed below. Fix them by hand, or recreate the file with \
                     `startup-data create --overwrite`."
                        .to_string(),
                )];
                diagnostics.extend(
                    problems
                        .into_iter()
                        .map(|problem| problem.with_filename(filename.clone())),
                );
                return diagnostics;
            }
            ReadError::BadExtension { .. } => Diagnostic::new(
                DiagnosticLevel::Fatal,
                DiagnosticCode::BadExtension,
                format!("I can only read startup files ending in .{}.", EXPECTED_EXTENSION),
            )
            .with_advice(summary),
            ReadError::Empty => Diagnostic::new(
                DiagnosticLevel::Fatal,
                DiagnosticCode::EmptyFile,
                "I found the startup file, but there is no startup data in it.".to_string(),
            )
            .with_advice(
                "Create fresh data with `startup-data create --overwrite`.".to_string(),
            ),
            ReadError::InvalidJson(detail) => Diagnostic::new(
                DiagnosticLevel::Fatal,
                DiagnosticCode::InvalidJson,
                format!("I couldn't parse the startup file as JSON: {}", detail),
            )
            .with_advice("Check for missing commas, quotes, or brackets.".to_string()),
            ReadError::Io(detail) => Diagnostic::new(
                DiagnosticLevel::Fatal,
                DiagnosticCode::IoFailure,
                format!("I couldn't read the startup file: {}", detail),
            )
            .with_advice(
                "Make sure the file path is correct and the file exists. \
                 Check for typos in the filename."
                    .to_string(),
            ),
        };
        vec![diagnostic.with_filename(filename)]
    }
}

impl WriteError {
    pub fn into_diagnostics(self, path: &Path) -> Vec<Diagnostic> {
        let filename = path.display().to_string();
        let summary = capitalize(&self.to_string());
        let diagnostic = match self {
            WriteError::SchemaInvalid(problems) => {
                let mut diagnostics = vec![Diagnostic::new(
                    DiagnosticLevel::Fatal,
                    DiagnosticCode::InvalidJson,
                    "I won't save this startup data because it isn't valid.".to_string(),
                )
                .with_filename(filename)];
                diagnostics.extend(problems);
                return diagnostics;
            }
            WriteError::BadExtension { .. } => Diagnostic::new(
                DiagnosticLevel::Fatal,
                DiagnosticCode::BadExtension,
                format!("I can only write startup files ending in .{}.", EXPECTED_EXTENSION),
            )
            .with_advice(summary),
            WriteError::NoChange => Diagnostic::new(
                DiagnosticLevel::Info,
                DiagnosticCode::NoChange,
                format!(
                    "The existing startup data and the new startup data are the same. \
                     Not updating {} because there is no point.",
                    filename
                ),
            ),
            WriteError::OverwriteDeclined => Diagnostic::new(
                DiagnosticLevel::Warning,
                DiagnosticCode::OverwriteDeclined,
                format!("{} already exists, so I skipped writing it.", filename),
            )
            .with_advice("Pass --overwrite to replace the existing file.".to_string()),
            WriteError::Io(detail) => Diagnostic::new(
                DiagnosticLevel::Fatal,
                DiagnosticCode::IoFailure,
                format!("I couldn't write the startup file: {}", detail),
            )
            .with_advice(
                "Make sure you have write permission in this directory and that the path is valid."
                    .to_string(),
            ),
        };
        vec![diagnostic.with_filename(filename)]
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn extension_error(path: &Path) -> Option<Option<String>> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(EXPECTED_EXTENSION) => None,
        Some(other) => Some(Some(other.to_string())),
        None => Some(None),
    }
}

pub fn load<P: AsRef<Path>>(path: P) -> Result<StartupDocument, ReadError> {
    let path = path.as_ref();
    if let Some(found) = extension_error(path) {
        return Err(ReadError::BadExtension { found });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ReadError::Io(e.to_string()))?;
    if content.trim().is_empty() {
        return Err(ReadError::Empty);
    }

    let value: Value =
        serde_json::from_str(&content).map_err(|e| ReadError::InvalidJson(e.to_string()))?;

    let is_blank = match &value {
        Value::Object(obj) => obj.is_empty(),
        Value::Array(arr) => arr.is_empty(),
        Value::Null => true,
        _ => false,
    };
    if is_blank {
        return Err(ReadError::Empty);
    }

    let problems = check(&value, SchemaKind::FullDocument);
    if !problems.is_empty() {
        return Err(ReadError::SchemaInvalid(problems));
    }

    serde_json::from_value(value).map_err(|e| ReadError::InvalidJson(e.to_string()))
}

pub fn save<P: AsRef<Path>>(
    path: P,
    document: &StartupDocument,
    policy: OverwritePolicy,
) -> Result<(), WriteError> {
    let path = path.as_ref();
    if let Some(found) = extension_error(path) {
        return Err(WriteError::BadExtension { found });
    }

    let value = document.to_value();
    let problems = check(&value, SchemaKind::FullDocument);
    if !problems.is_empty() {
        return Err(WriteError::SchemaInvalid(problems));
    }

    if path.exists() {
        // An unreadable or unparsable file is simply different.
        let existing = std::fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str::<Value>(&content).ok());
        if existing.as_ref() == Some(&value) {
            return Err(WriteError::NoChange);
        }

        if matches!(policy, OverwritePolicy::ConfirmFirst { confirmed: false }) {
            return Err(WriteError::OverwriteDeclined);
        }
    }

    let json = serde_json::to_string_pretty(document).map_err(|e| WriteError::Io(e.to_string()))?;

    let file = File::create(path).map_err(|e| WriteError::Io(e.to_string()))?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{}", json).map_err(|e| WriteError::Io(e.to_string()))?;
    writer.flush().map_err(|e| WriteError::Io(e.to_string()))?;

    Ok(())
}

/// The startup file named by a [`StoreConfig`].
pub struct StartupStore {
    config: StoreConfig,
}

impl StartupStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn path(&self) -> PathBuf {
        self.config.startup_file()
    }

    pub fn exists(&self) -> bool {
        self.path().is_file()
    }

    pub fn load(&self) -> Result<StartupDocument, ReadError> {
        load(self.path())
    }

    /// Creates the data directory on first save.
    pub fn save(&self, document: &StartupDocument, policy: OverwritePolicy) -> Result<(), WriteError> {
        let path = self.path();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| WriteError::Io(e.to_string()))?;
            }
        }
        save(path, document, policy)
    }

    /// Data for a new default startup file: `default_startup.json` from the
    /// data directory if it loads cleanly, otherwise the built-in defaults.
    pub fn default_data(&self) -> StartupDocument {
        let path = self.config.default_file();
        if path.is_file() {
            if let Ok(document) = load(&path) {
                return document;
            }
        }
        default_document()
    }
}
