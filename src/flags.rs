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

use std::path::PathBuf;

xflags::xflags! {
    cmd startup-data {
        /// Application root directory (defaults to the current directory)
        optional --root root: PathBuf

        /// Use the development data directory <root>/devenv/config instead of <root>/config
        optional --dev

        /// Startup file to use instead of the one in the data directory
        optional -f, --file file: PathBuf

        default cmd view {
            /// Output format: human-readable (default) or json
            optional --output output: String
        }

        cmd create {
            /// Start with no startup items instead of the default ones
            optional --blank

            /// Replace the startup file if it already exists
            optional --overwrite
        }

        cmd add {
            /// Name shown for the startup item
            required --name name: String

            /// Program, document or executable to open
            required --path path: String

            /// What the startup item is for
            required --description description: String

            /// Argument passed to the program (repeat for several, in order)
            repeated --arg arg: String
        }

        cmd edit {
            /// Number of the startup item to change
            required item: usize

            /// New name
            optional --name name: String

            /// New program path
            optional --path path: String

            /// New description
            optional --description description: String

            /// Argument to append (repeat for several, in order)
            repeated --arg arg: String

            /// Remove existing arguments before appending any --arg values
            optional --clear-args
        }

        cmd delete {
            /// Number of the startup item to remove; later items move up
            required item: usize
        }

        cmd check {
            /// JSON file to validate as startup data
            required file: PathBuf
        }
    }
}
