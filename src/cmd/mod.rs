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

pub mod check;
pub mod create;
pub mod edit;
pub mod view;

use startup_data::{
    replace_full, Diagnostic, OverwritePolicy, StartupDocument, StartupStore,
};

/// Validate `document` as full startup data and write it.
///
/// `Ok` only when the file was written. A `NoChange` save comes back as an
/// info diagnostic in `Err`, so callers announce their change on `Ok` alone.
pub fn save_document(
    store: &StartupStore,
    document: &StartupDocument,
    policy: OverwritePolicy,
) -> Result<(), Vec<Diagnostic>> {
    let checked = replace_full(document).map_err(|e| vec![e.into()])?;

    let path = store.path();
    store
        .save(&checked, policy)
        .map_err(|e| e.into_diagnostics(&path))?;

    println!("Startup file written successfully: {}", path.display());
    Ok(())
}

pub fn load_document(store: &StartupStore) -> Result<StartupDocument, Vec<Diagnostic>> {
    store.load().map_err(|e| e.into_diagnostics(&store.path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use startup_data::{default_document, DiagnosticCode, DiagnosticLevel, Environment, StoreConfig};
    use tempfile::tempdir;

    #[test]
    fn test_save_document_reports_no_change() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let store = StartupStore::new(StoreConfig::new(dir.path(), Environment::Development));
        let document = default_document();

        assert!(save_document(&store, &document, OverwritePolicy::Overwrite).is_ok());
        assert!(store.exists());

        let diagnostics = match save_document(&store, &document, OverwritePolicy::Overwrite) {
            Ok(()) => panic!("identical data should not be written again"),
            Err(diagnostics) => diagnostics,
        };
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::NoChange);
        assert_eq!(diagnostics[0].level, DiagnosticLevel::Info);
        Ok(())
    }

    #[test]
    fn test_save_document_declined_overwrite() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let store = StartupStore::new(StoreConfig::new(dir.path(), Environment::Production));
        assert!(save_document(&store, &default_document(), OverwritePolicy::Overwrite).is_ok());

        let blank = startup_data::blank_document();
        let result = save_document(
            &store,
            &blank,
            OverwritePolicy::ConfirmFirst { confirmed: false },
        );
        let codes: Vec<DiagnosticCode> = match result {
            Ok(()) => Vec::new(),
            Err(diagnostics) => diagnostics.into_iter().map(|d| d.code).collect(),
        };
        assert_eq!(codes, vec![DiagnosticCode::OverwriteDeclined]);
        assert_eq!(store.load()?, default_document());
        Ok(())
    }
}
