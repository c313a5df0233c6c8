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

use crate::cmd::load_document;
use crate::flags;
use startup_data::{Diagnostic, StartupDocument, StartupItem, StartupStore};

pub fn run(store: &StartupStore, flags: &flags::View) -> Vec<Diagnostic> {
    let document = match load_document(store) {
        Ok(document) => document,
        Err(diagnostics) => return diagnostics,
    };

    let is_json_output = flags.output.as_ref().map(|s| s == "json").unwrap_or(false);

    if is_json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&document).unwrap_or_default()
        );
    } else {
        println!("Startup file: {}", store.path().display());
        print!("{}", render_document(&document));
    }

    Vec::new()
}

pub fn render_document(document: &StartupDocument) -> String {
    if document.items.is_empty() {
        return "There are no startup items to display!\n".to_string();
    }

    let mut out = format!("Number of startup items: {}\n", document.items.len());
    for item in &document.items {
        out.push('\n');
        out.push_str(&render_item(item));
    }
    out
}

pub fn render_item(item: &StartupItem) -> String {
    let mut out = format!("Startup item #{}\n", item.item_number);
    out.push_str(&format!("    Item name: {}\n", item.name));
    out.push_str(&format!("    Item description: {}\n", item.description));
    out.push_str(&format!("    Item program path: {}\n", item.file_path));
    if item.is_browser {
        out.push_str("    Opens in a browser: Yes\n");
    }

    if item.argument_list.is_empty() {
        out.push_str("    Does this item use arguments: No\n");
    } else {
        out.push_str("    Does this item use arguments: Yes\n");
        out.push_str(&format!(
            "    Total number of arguments used: {}\n",
            item.argument_count
        ));
        for (index, argument) in item.argument_list.iter().enumerate() {
            out.push_str(&format!("        Argument {}: {}\n", index + 1, argument));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use startup_data::{blank_document, default_document};

    #[test]
    fn test_render_empty_document() {
        assert_eq!(
            render_document(&blank_document()),
            "There are no startup items to display!\n"
        );
    }

    #[test]
    fn test_render_default_document() {
        let rendered = render_document(&default_document());
        assert!(rendered.starts_with("Number of startup items: 3\n"));
        assert!(rendered.contains("Startup item #2\n    Item name: Google\n"));
        assert!(rendered.contains("    Opens in a browser: Yes\n"));
        assert!(rendered.contains("        Argument 3: https://www.google.com/\n"));
        assert_eq!(rendered.matches("Does this item use arguments: No").count(), 2);
    }
}
