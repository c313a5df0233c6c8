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

use crate::flags;
use startup_data::{load, Diagnostic};

pub fn run(flags: &flags::Check) -> Vec<Diagnostic> {
    match load(&flags.file) {
        Ok(document) => {
            println!(
                "{}: valid startup data with {} startup items",
                flags.file.display(),
                document.total_items
            );
            Vec::new()
        }
        Err(e) => e.into_diagnostics(&flags.file),
    }
}
