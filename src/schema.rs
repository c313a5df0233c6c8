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

//! Structural checks for startup data.
//!
//! Both shapes are closed: an object with keys beyond the ones listed in
//! [`crate::model`] is rejected. That keeps the two shapes disjoint, so a
//! candidate is a full document, a single item, or neither.

use serde_json::{Map, Value};

use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticCollector, DiagnosticLevel};
use crate::model::{
    KEY_ARGUMENT_COUNT, KEY_ARGUMENT_LIST, KEY_BROWSER, KEY_DESCRIPTION, KEY_FILE_PATH,
    KEY_ITEMS, KEY_ITEM_NUMBER, KEY_NAME, KEY_TOTAL_ITEMS,
};

const DOCUMENT_KEYS: [&str; 2] = [KEY_TOTAL_ITEMS, KEY_ITEMS];

const ITEM_KEYS: [&str; 7] = [
    KEY_ITEM_NUMBER,
    KEY_NAME,
    KEY_FILE_PATH,
    KEY_DESCRIPTION,
    KEY_BROWSER,
    KEY_ARGUMENT_COUNT,
    KEY_ARGUMENT_LIST,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    FullDocument,
    SingleItem,
}

impl SchemaKind {
    fn noun(&self) -> &'static str {
        match self {
            SchemaKind::FullDocument => "full startup data",
            SchemaKind::SingleItem => "a startup item",
        }
    }
}

/// True when `candidate` has the shape described by `kind`.
pub fn validate(candidate: &Value, kind: SchemaKind) -> bool {
    check(candidate, kind).is_empty()
}

/// Every reason `candidate` does not have the shape described by `kind`.
/// An empty result means the candidate is valid.
pub fn check(candidate: &Value, kind: SchemaKind) -> Vec<Diagnostic> {
    let mut diagnostics = DiagnosticCollector::new();
    match kind {
        SchemaKind::FullDocument => check_document(candidate, &mut diagnostics),
        SchemaKind::SingleItem => check_item(candidate, "", &mut diagnostics),
    }
    diagnostics.into_diagnostics()
}

fn check_document(candidate: &Value, diagnostics: &mut DiagnosticCollector) {
    let obj = match expect_object(candidate, SchemaKind::FullDocument, "", diagnostics) {
        Some(obj) => obj,
        None => return,
    };

    check_keys(obj, &DOCUMENT_KEYS, "", diagnostics);

    let total_items = obj
        .get(KEY_TOTAL_ITEMS)
        .and_then(|value| expect_count(value, KEY_TOTAL_ITEMS, "", diagnostics));

    let items = match obj.get(KEY_ITEMS) {
        Some(Value::Array(items)) => items,
        Some(other) => {
            diagnostics.add(wrong_type(KEY_ITEMS, "an array of startup items", other, ""));
            return;
        }
        None => return,
    };

    let mut seen = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let location = format!("{}[{}]", KEY_ITEMS, index);
        check_item(item, &location, diagnostics);

        let number = match item.get(KEY_ITEM_NUMBER).and_then(Value::as_u64) {
            Some(number) if number > 0 => number,
            _ => continue,
        };
        if seen.contains(&number) {
            diagnostics.add(
                Diagnostic::new(
                    DiagnosticLevel::Fatal,
                    DiagnosticCode::DuplicateItemNumber,
                    format!("Another startup item already has ItemNumber {}.", number),
                )
                .with_location(field_location(&location, KEY_ITEM_NUMBER))
                .with_advice("Each startup item needs its own ItemNumber.".to_string()),
            );
        } else {
            seen.push(number);
        }
    }

    if let Some(total_items) = total_items {
        if total_items != items.len() as u64 {
            diagnostics.add(
                Diagnostic::new(
                    DiagnosticLevel::Fatal,
                    DiagnosticCode::TotalItemsMismatch,
                    format!(
                        "TotalItems says there are {} startup items, but I found {} in Items.",
                        total_items,
                        items.len()
                    ),
                )
                .with_location(KEY_TOTAL_ITEMS.to_string()),
            );
        }
    }
}

fn check_item(candidate: &Value, location: &str, diagnostics: &mut DiagnosticCollector) {
    let obj = match expect_object(candidate, SchemaKind::SingleItem, location, diagnostics) {
        Some(obj) => obj,
        None => return,
    };

    check_keys(obj, &ITEM_KEYS, location, diagnostics);

    if let Some(value) = obj.get(KEY_ITEM_NUMBER) {
        if !matches!(value.as_u64(), Some(number) if number > 0) {
            diagnostics.add(wrong_type(
                KEY_ITEM_NUMBER,
                "a positive integer",
                value,
                location,
            ));
        }
    }

    for key in [KEY_NAME, KEY_FILE_PATH, KEY_DESCRIPTION] {
        if let Some(value) = obj.get(key) {
            expect_text(value, key, location, diagnostics);
        }
    }

    if let Some(value) = obj.get(KEY_BROWSER) {
        if !value.is_boolean() {
            diagnostics.add(wrong_type(KEY_BROWSER, "true or false", value, location));
        }
    }

    let argument_count = obj
        .get(KEY_ARGUMENT_COUNT)
        .and_then(|value| expect_count(value, KEY_ARGUMENT_COUNT, location, diagnostics));

    let arguments = match obj.get(KEY_ARGUMENT_LIST) {
        Some(Value::Array(arguments)) => Some(arguments),
        Some(other) => {
            diagnostics.add(wrong_type(
                KEY_ARGUMENT_LIST,
                "an array of strings",
                other,
                location,
            ));
            None
        }
        None => None,
    };

    if let Some(arguments) = arguments {
        for (index, argument) in arguments.iter().enumerate() {
            let key = format!("{}[{}]", KEY_ARGUMENT_LIST, index);
            expect_text(argument, &key, location, diagnostics);
        }

        if let Some(argument_count) = argument_count {
            if argument_count != arguments.len() as u64 {
                diagnostics.add(
                    Diagnostic::new(
                        DiagnosticLevel::Fatal,
                        DiagnosticCode::ArgumentCountMismatch,
                        format!(
                            "ArgumentCount says there are {} arguments, but ArgumentList has {}.",
                            argument_count,
                            arguments.len()
                        ),
                    )
                    .with_location(field_location(location, KEY_ARGUMENT_COUNT)),
                );
            }
        }
    }
}

fn expect_object<'a>(
    candidate: &'a Value,
    kind: SchemaKind,
    location: &str,
    diagnostics: &mut DiagnosticCollector,
) -> Option<&'a Map<String, Value>> {
    match candidate.as_object() {
        Some(obj) => Some(obj),
        None => {
            let mut diagnostic = Diagnostic::new(
                DiagnosticLevel::Fatal,
                DiagnosticCode::NotAnObject,
                format!(
                    "I expected {} to be a JSON object, but found {}.",
                    kind.noun(),
                    type_name(candidate)
                ),
            );
            if !location.is_empty() {
                diagnostic = diagnostic.with_location(location.to_string());
            }
            diagnostics.add(diagnostic);
            None
        }
    }
}

fn check_keys(
    obj: &Map<String, Value>,
    expected: &[&str],
    location: &str,
    diagnostics: &mut DiagnosticCollector,
) {
    for key in expected {
        if !obj.contains_key(*key) {
            diagnostics.add(
                Diagnostic::new(
                    DiagnosticLevel::Fatal,
                    DiagnosticCode::MissingField,
                    format!("I couldn't find the required field '{}'.", key),
                )
                .with_location(field_location(location, key)),
            );
        }
    }

    for key in obj.keys() {
        if !expected.contains(&key.as_str()) {
            diagnostics.add(
                Diagnostic::new(
                    DiagnosticLevel::Fatal,
                    DiagnosticCode::UnknownField,
                    format!("I don't know what to do with the field '{}'.", key),
                )
                .with_location(field_location(location, key))
                .with_advice(format!("The allowed fields are: {}.", expected.join(", "))),
            );
        }
    }
}

fn expect_count(
    value: &Value,
    key: &str,
    location: &str,
    diagnostics: &mut DiagnosticCollector,
) -> Option<u64> {
    match value.as_u64() {
        Some(count) => Some(count),
        None => {
            diagnostics.add(wrong_type(key, "a non-negative integer", value, location));
            None
        }
    }
}

fn expect_text(value: &Value, key: &str, location: &str, diagnostics: &mut DiagnosticCollector) {
    match value.as_str() {
        Some(text) if text.is_empty() => diagnostics.add(
            Diagnostic::new(
                DiagnosticLevel::Fatal,
                DiagnosticCode::EmptyValue,
                format!("The field '{}' is empty.", key),
            )
            .with_location(field_location(location, key)),
        ),
        Some(_) => {}
        None => diagnostics.add(wrong_type(key, "a string", value, location)),
    }
}

fn wrong_type(key: &str, expected: &str, found: &Value, location: &str) -> Diagnostic {
    Diagnostic::new(
        DiagnosticLevel::Fatal,
        DiagnosticCode::WrongFieldType,
        format!(
            "I expected '{}' to be {}, but found {}.",
            key,
            expected,
            type_name(found)
        ),
    )
    .with_location(field_location(location, key))
}

fn field_location(location: &str, key: &str) -> String {
    if location.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", location, key)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_u64() || n.is_i64() => "an integer",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn notepad() -> Value {
        json!({
            "ItemNumber": 1,
            "Name": "Notepad",
            "FilePath": "notepad",
            "Description": "A text editor",
            "Browser": false,
            "ArgumentCount": 0,
            "ArgumentList": []
        })
    }

    fn codes(candidate: &Value, kind: SchemaKind) -> Vec<DiagnosticCode> {
        check(candidate, kind).into_iter().map(|d| d.code).collect()
    }

    #[test]
    fn test_valid_item_and_document() {
        assert!(validate(&notepad(), SchemaKind::SingleItem));
        assert!(validate(
            &json!({"TotalItems": 1, "Items": [notepad()]}),
            SchemaKind::FullDocument
        ));
        assert!(validate(
            &json!({"TotalItems": 0, "Items": []}),
            SchemaKind::FullDocument
        ));
        assert!(validate(
            &crate::model::default_document().to_value(),
            SchemaKind::FullDocument
        ));
    }

    #[test]
    fn test_shapes_are_disjoint() {
        let document = json!({"TotalItems": 1, "Items": [notepad()]});
        assert!(!validate(&notepad(), SchemaKind::FullDocument));
        assert!(!validate(&document, SchemaKind::SingleItem));
    }

    #[test]
    fn test_empty_object_fails_both() {
        assert!(!validate(&json!({}), SchemaKind::FullDocument));
        assert!(!validate(&json!({}), SchemaKind::SingleItem));
        assert_eq!(
            codes(&json!({}), SchemaKind::FullDocument),
            vec![DiagnosticCode::MissingField, DiagnosticCode::MissingField]
        );
    }

    #[test]
    fn test_non_object_candidates() {
        assert_eq!(
            codes(&json!([]), SchemaKind::FullDocument),
            vec![DiagnosticCode::NotAnObject]
        );
        assert_eq!(
            codes(&Value::Null, SchemaKind::SingleItem),
            vec![DiagnosticCode::NotAnObject]
        );
    }

    #[test]
    fn test_argument_count_must_match() {
        let mut item = notepad();
        item["ArgumentCount"] = json!(2);
        item["ArgumentList"] = json!(["--one"]);
        assert_eq!(
            codes(&item, SchemaKind::SingleItem),
            vec![DiagnosticCode::ArgumentCountMismatch]
        );
    }

    #[test]
    fn test_empty_strings_rejected() {
        let mut item = notepad();
        item["Name"] = json!("");
        item["ArgumentCount"] = json!(1);
        item["ArgumentList"] = json!([""]);
        assert_eq!(
            codes(&item, SchemaKind::SingleItem),
            vec![DiagnosticCode::EmptyValue, DiagnosticCode::EmptyValue]
        );
    }

    #[test]
    fn test_wrong_types() {
        let mut item = notepad();
        item["Browser"] = json!("no");
        item["ItemNumber"] = json!(1.5);
        item["ArgumentCount"] = json!(-1);
        let found = codes(&item, SchemaKind::SingleItem);
        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|c| *c == DiagnosticCode::WrongFieldType));
    }

    #[test]
    fn test_blank_item_is_not_valid() {
        let blank = crate::model::StartupItem::blank().to_value();
        let found = codes(&blank, SchemaKind::SingleItem);
        assert!(found.contains(&DiagnosticCode::WrongFieldType));
        assert!(found.contains(&DiagnosticCode::EmptyValue));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut item = notepad();
        item["Extra"] = json!(true);
        assert_eq!(
            codes(&item, SchemaKind::SingleItem),
            vec![DiagnosticCode::UnknownField]
        );
    }

    #[test]
    fn test_total_items_must_match() {
        let document = json!({"TotalItems": 2, "Items": [notepad()]});
        let diagnostics = check(&document, SchemaKind::FullDocument);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::TotalItemsMismatch);
        assert_eq!(diagnostics[0].location.as_deref(), Some("TotalItems"));
    }

    #[test]
    fn test_item_numbers_may_have_gaps() {
        let mut second = notepad();
        second["ItemNumber"] = json!(3);
        let document = json!({"TotalItems": 2, "Items": [notepad(), second]});
        assert!(validate(&document, SchemaKind::FullDocument));
    }

    #[test]
    fn test_duplicate_item_numbers_rejected() {
        let document = json!({"TotalItems": 2, "Items": [notepad(), notepad()]});
        let diagnostics = check(&document, SchemaKind::FullDocument);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::DuplicateItemNumber);
        assert_eq!(diagnostics[0].location.as_deref(), Some("Items[1].ItemNumber"));
    }

    #[test]
    fn test_nested_item_problems_are_located() {
        let mut broken = notepad();
        if let Some(obj) = broken.as_object_mut() {
            obj.remove("Description");
        }
        let document = json!({"TotalItems": 1, "Items": [broken]});
        let diagnostics = check(&document, SchemaKind::FullDocument);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::MissingField);
        assert_eq!(diagnostics[0].location.as_deref(), Some("Items[0].Description"));
    }
}
