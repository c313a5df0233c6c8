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

use crate::cmd::{load_document, save_document};
use crate::cmd::view::render_item;
use crate::flags;
use startup_data::{
    add_item, delete_item, replace_item, Diagnostic, EngineError, OverwritePolicy,
    StartupItem, StartupStore,
};

pub fn add(store: &StartupStore, flags: &flags::Add) -> Vec<Diagnostic> {
    let document = match load_document(store) {
        Ok(document) => document,
        Err(diagnostics) => return diagnostics,
    };

    let item = StartupItem::new(&flags.name, &flags.path, &flags.description, flags.arg.clone())
        .with_item_number(document.total_items + 1);

    let updated = match add_item(&document, &item) {
        Ok(updated) => updated,
        Err(e) => return vec![e.into()],
    };

    if let Err(diagnostics) = save_document(store, &updated, OverwritePolicy::Overwrite) {
        return diagnostics;
    }

    if let Some(added) = updated.items.last() {
        println!("Added startup item:\n{}", render_item(added));
    }
    Vec::new()
}

pub fn edit(store: &StartupStore, flags: &flags::Edit) -> Vec<Diagnostic> {
    let document = match load_document(store) {
        Ok(document) => document,
        Err(diagnostics) => return diagnostics,
    };

    let mut item = match document.item(flags.item) {
        Some(item) => item.clone().with_item_number(flags.item),
        None => {
            return vec![EngineError::InvalidItemNumber {
                item_number: flags.item,
                total_items: document.total_items,
            }
            .into()]
        }
    };

    if let Some(name) = &flags.name {
        item.name = name.clone();
    }
    if let Some(description) = &flags.description {
        item.description = description.clone();
    }
    if let Some(path) = &flags.path {
        item.set_file_path(path);
    }
    if flags.clear_args {
        item.set_arguments(Vec::new());
    }
    for argument in &flags.arg {
        item.push_argument(argument.clone());
    }

    let updated = match replace_item(&document, &item) {
        Ok(updated) => updated,
        Err(e) => return vec![e.into()],
    };

    if let Err(diagnostics) = save_document(store, &updated, OverwritePolicy::Overwrite) {
        return diagnostics;
    }

    println!("Updated startup item:\n{}", render_item(&item));
    Vec::new()
}

pub fn delete(store: &StartupStore, flags: &flags::Delete) -> Vec<Diagnostic> {
    let document = match load_document(store) {
        Ok(document) => document,
        Err(diagnostics) => return diagnostics,
    };

    let updated = match delete_item(&document, flags.item) {
        Ok(updated) => updated,
        Err(e) => return vec![e.into()],
    };

    if let Err(diagnostics) = save_document(store, &updated, OverwritePolicy::Overwrite) {
        return diagnostics;
    }

    println!("Startup item {} was successfully deleted", flags.item);
    if updated.total_items > 0 && flags.item <= updated.total_items {
        println!(
            "Startup items after it were renumbered; there are now {} in total.",
            updated.total_items
        );
    }
    Vec::new()
}
