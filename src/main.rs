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

use startup_data::{Diagnostic, Environment, StartupStore, StoreConfig};
use std::path::PathBuf;
use std::process;

mod cmd;
mod flags;

fn main() {
    let flags = flags::StartupData::from_env_or_exit();

    let diagnostics = run(flags);

    for diagnostic in &diagnostics {
        eprintln!("{}", diagnostic);
    }

    let has_fatal = diagnostics.iter().any(|d| d.is_fatal());
    if has_fatal {
        process::exit(1);
    }
}

fn run(flags: flags::StartupData) -> Vec<Diagnostic> {
    let store = StartupStore::new(store_config(&flags));

    match flags.subcommand {
        flags::StartupDataCmd::View(view_flags) => cmd::view::run(&store, &view_flags),
        flags::StartupDataCmd::Create(create_flags) => cmd::create::run(&store, &create_flags),
        flags::StartupDataCmd::Add(add_flags) => cmd::edit::add(&store, &add_flags),
        flags::StartupDataCmd::Edit(edit_flags) => cmd::edit::edit(&store, &edit_flags),
        flags::StartupDataCmd::Delete(delete_flags) => cmd::edit::delete(&store, &delete_flags),
        flags::StartupDataCmd::Check(check_flags) => cmd::check::run(&check_flags),
    }
}

fn store_config(flags: &flags::StartupData) -> StoreConfig {
    let root = flags.root.clone().unwrap_or_else(|| PathBuf::from("."));
    let environment = if flags.dev {
        Environment::Development
    } else {
        Environment::Production
    };

    let config = StoreConfig::new(root, environment);
    match &flags.file {
        Some(file) => config.with_startup_file(file.clone()),
        None => config,
    }
}
