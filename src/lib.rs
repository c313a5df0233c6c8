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

pub mod diagnostics;
pub mod model;
pub mod reconcile;
pub mod scenario;
pub mod schema;
pub mod store;

pub use diagnostics::{Diagnostic, DiagnosticCode, DiagnosticCollector, DiagnosticLevel};
pub use model::{blank_document, default_document, is_browser_path, StartupDocument, StartupItem};
pub use reconcile::{add_item, delete_item, reconcile, replace_full, replace_item, EngineError};
pub use scenario::{classify, InvalidReason, Operation, ScenarioResult};
pub use schema::{check, validate, SchemaKind};
pub use store::{
    load, save, Environment, OverwritePolicy, ReadError, StartupStore, StoreConfig, WriteError,
};
