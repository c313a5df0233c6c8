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

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const KEY_TOTAL_ITEMS: &str = "TotalItems";
pub const KEY_ITEMS: &str = "Items";
pub const KEY_ITEM_NUMBER: &str = "ItemNumber";
pub const KEY_NAME: &str = "Name";
pub const KEY_FILE_PATH: &str = "FilePath";
pub const KEY_DESCRIPTION: &str = "Description";
pub const KEY_BROWSER: &str = "Browser";
pub const KEY_ARGUMENT_COUNT: &str = "ArgumentCount";
pub const KEY_ARGUMENT_LIST: &str = "ArgumentList";

/// Executable base names that get the `Browser` flag.
pub const BROWSERS: [&str; 3] = ["chrome", "msedge", "firefox"];

/// The whole startup file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupDocument {
    #[serde(rename = "TotalItems")]
    pub total_items: usize,
    #[serde(rename = "Items")]
    pub items: Vec<StartupItem>,
}

/// One program, document or site to open at login.
///
/// Field order matches the on-disk key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupItem {
    #[serde(rename = "ItemNumber")]
    pub item_number: usize,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "FilePath")]
    pub file_path: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Browser")]
    pub is_browser: bool,
    #[serde(rename = "ArgumentCount")]
    pub argument_count: usize,
    #[serde(rename = "ArgumentList")]
    pub argument_list: Vec<String>,
}

impl StartupDocument {
    pub fn new(items: Vec<StartupItem>) -> Self {
        Self {
            total_items: items.len(),
            items,
        }
    }

    /// Look up an item by its 1-based number.
    pub fn item(&self, item_number: usize) -> Option<&StartupItem> {
        item_number
            .checked_sub(1)
            .and_then(|index| self.items.get(index))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl StartupItem {
    /// A blank item. Item number 0 means "not yet created"; the engine assigns
    /// the real number when the item is added.
    pub fn blank() -> Self {
        Self {
            item_number: 0,
            name: String::new(),
            file_path: String::new(),
            description: String::new(),
            is_browser: false,
            argument_count: 0,
            argument_list: Vec::new(),
        }
    }

    pub fn new(name: &str, file_path: &str, description: &str, arguments: Vec<String>) -> Self {
        let mut item = Self::blank();
        item.name = name.to_string();
        item.description = description.to_string();
        item.set_file_path(file_path);
        item.set_arguments(arguments);
        item
    }

    pub fn with_item_number(mut self, item_number: usize) -> Self {
        self.item_number = item_number;
        self
    }

    pub fn set_file_path(&mut self, file_path: &str) {
        self.file_path = file_path.to_string();
        self.is_browser = is_browser_path(file_path);
    }

    pub fn set_arguments(&mut self, arguments: Vec<String>) {
        self.argument_count = arguments.len();
        self.argument_list = arguments;
    }

    pub fn push_argument(&mut self, argument: String) {
        self.argument_list.push(argument);
        self.argument_count = self.argument_list.len();
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Whether the executable named by `file_path` is one of the known browsers.
///
/// Paths may use either separator since the file is shared with Windows
/// installs. The base name is cut at its first dot, so `chrome.exe` and
/// `chrome.old.exe` both count.
pub fn is_browser_path(file_path: &str) -> bool {
    let base_name = file_path
        .rsplit(['\\', '/'])
        .next()
        .unwrap_or(file_path);
    let stem = base_name.split('.').next().unwrap_or(base_name);
    let stem = stem.to_lowercase();

    BROWSERS.contains(&stem.as_str())
}

/// A document with no items.
pub fn blank_document() -> StartupDocument {
    StartupDocument::new(Vec::new())
}

/// The data written by `create` when no default file is configured: a
/// calculator, Chrome on the Google homepage and a text editor.
pub fn default_document() -> StartupDocument {
    StartupDocument::new(vec![
        StartupItem::new("Calculator", "calc", "A simple calculator", Vec::new()).with_item_number(1),
        StartupItem::new(
            "Google",
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            "The Google Homepage",
            vec![
                "--profile-directory=Default".to_string(),
                "--new-window".to_string(),
                "https://www.google.com/".to_string(),
            ],
        )
        .with_item_number(2),
        StartupItem::new("Notepad", "notepad", "A text editor", Vec::new()).with_item_number(3),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_browser_detection() {
        assert!(is_browser_path(
            r"C:\Program Files\Google\Chrome\Application\chrome.exe"
        ));
        assert!(is_browser_path("/usr/bin/firefox"));
        assert!(is_browser_path(r"C:\Program Files (x86)\Microsoft\Edge\Application\MSEDGE.EXE"));
        assert!(!is_browser_path("notepad"));
        assert!(!is_browser_path("calc"));
        assert!(!is_browser_path(r"C:\tools\chromedriver.exe"));
        assert!(!is_browser_path(""));
    }

    #[test]
    fn test_item_setters_keep_derived_fields() {
        let mut item = StartupItem::blank();
        assert_eq!(item.item_number, 0);

        item.set_file_path(r"C:\Program Files\Mozilla Firefox\firefox.exe");
        assert!(item.is_browser);
        item.set_file_path("notepad");
        assert!(!item.is_browser);

        item.set_arguments(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(item.argument_count, 2);
        item.push_argument("c".to_string());
        assert_eq!(item.argument_count, 3);
        assert_eq!(item.argument_list, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_serialized_key_names() {
        let item = StartupItem::new("Notepad", "notepad", "A text editor", Vec::new())
            .with_item_number(1);
        let document = StartupDocument::new(vec![item]);

        assert_eq!(
            document.to_value(),
            json!({
                "TotalItems": 1,
                "Items": [{
                    "ItemNumber": 1,
                    "Name": "Notepad",
                    "FilePath": "notepad",
                    "Description": "A text editor",
                    "Browser": false,
                    "ArgumentCount": 0,
                    "ArgumentList": []
                }]
            })
        );
    }

    #[test]
    fn test_default_document() {
        let document = default_document();
        assert_eq!(document.total_items, 3);
        assert_eq!(document.items.len(), 3);

        let browsers: Vec<bool> = document.items.iter().map(|i| i.is_browser).collect();
        assert_eq!(browsers, vec![false, true, false]);

        let google = document.item(2).expect("item 2 exists");
        assert_eq!(google.argument_count, 3);
        assert_eq!(google.argument_list[2], "https://www.google.com/");

        for (index, item) in document.items.iter().enumerate() {
            assert_eq!(item.item_number, index + 1);
        }
    }

    #[test]
    fn test_factories_do_not_share_state() {
        let mut first = blank_document();
        first.items.push(StartupItem::blank());
        first.total_items = 1;

        let second = blank_document();
        assert!(second.is_empty());
        assert_eq!(second.total_items, 0);

        let mut changed = default_document();
        changed.items[0].name = "Changed".to_string();
        assert_eq!(default_document().items[0].name, "Calculator");
    }

    #[test]
    fn test_item_lookup_bounds() {
        let document = default_document();
        assert!(document.item(0).is_none());
        assert!(document.item(4).is_none());
        assert_eq!(document.item(3).map(|i| i.name.as_str()), Some("Notepad"));
    }
}
