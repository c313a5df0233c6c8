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

//! Deciding which kind of edit a request describes.
//!
//! A request is the triple (modified data, operation, original data). The
//! shape checks are reduced to a handful of booleans in [`Facts`], and
//! [`RULES`] is read top to bottom: the first row whose predicate holds gives
//! the verdict. Failure rows come first so the order of error messages is
//! fixed by the table and nothing else.

use serde_json::Value;
use std::fmt;

use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticLevel};
use crate::schema::{validate, SchemaKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Delete,
    Replace,
    Full,
}

impl Operation {
    fn targets_single_item(&self) -> bool {
        !matches!(self, Operation::Full)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Add => write!(f, "add"),
            Operation::Delete => write!(f, "delete"),
            Operation::Replace => write!(f, "replace"),
            Operation::Full => write!(f, "full replacement"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    ModifiedMalformed,
    ExpectedFullData,
    ExpectedSingleItem,
    OriginalRequired,
    OriginalMalformed,
    UnexpectedOriginal,
}

impl InvalidReason {
    pub fn message(&self) -> &'static str {
        match self {
            InvalidReason::ModifiedMalformed => "modified data not properly formed",
            InvalidReason::ExpectedFullData => "expected full data",
            InvalidReason::ExpectedSingleItem => "expected single item",
            InvalidReason::OriginalRequired => "original data required",
            InvalidReason::OriginalMalformed => "original data not properly formed",
            InvalidReason::UnexpectedOriginal => "original data must be empty for a full replacement",
        }
    }

    pub fn code(&self) -> DiagnosticCode {
        match self {
            InvalidReason::ModifiedMalformed => DiagnosticCode::ModifiedDataMalformed,
            InvalidReason::ExpectedFullData => DiagnosticCode::ExpectedFullData,
            InvalidReason::ExpectedSingleItem => DiagnosticCode::ExpectedSingleItem,
            InvalidReason::OriginalRequired => DiagnosticCode::OriginalDataRequired,
            InvalidReason::OriginalMalformed => DiagnosticCode::OriginalDataMalformed,
            InvalidReason::UnexpectedOriginal => DiagnosticCode::UnexpectedOriginalData,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let advice = match self {
            InvalidReason::ModifiedMalformed => {
                "The new data must be either a complete startup item or complete startup data \
                 with TotalItems and Items."
            }
            InvalidReason::ExpectedFullData => {
                "Replacing everything needs full startup data, not a single startup item."
            }
            InvalidReason::ExpectedSingleItem => {
                "Adding, deleting or replacing works on one startup item at a time."
            }
            InvalidReason::OriginalRequired => {
                "Read the existing startup data first and pass it along with the startup item."
            }
            InvalidReason::OriginalMalformed => {
                "The existing startup data doesn't pass validation. Fix or recreate the startup file."
            }
            InvalidReason::UnexpectedOriginal => {
                "A full replacement takes only the new startup data; leave the existing data out."
            }
        };

        Diagnostic::new(
            DiagnosticLevel::Fatal,
            self.code(),
            format!("I can't apply this change: {}.", self.message()),
        )
        .with_advice(advice.to_string())
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioResult {
    AddItem,
    DeleteItem,
    ReplaceItem,
    ReplaceFull,
    Invalid(InvalidReason),
}

impl ScenarioResult {
    pub fn is_valid(&self) -> bool {
        !matches!(self, ScenarioResult::Invalid(_))
    }
}

/// Everything the rule table looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Facts {
    pub operation: Operation,
    pub modified_is_full: bool,
    pub modified_is_item: bool,
    pub original_present: bool,
    pub original_valid: bool,
}

impl Facts {
    pub fn gather(modified: &Value, operation: Operation, original: Option<&Value>) -> Self {
        let original = original.filter(|value| is_present(value));

        Self {
            operation,
            modified_is_full: validate(modified, SchemaKind::FullDocument),
            modified_is_item: validate(modified, SchemaKind::SingleItem),
            original_present: original.is_some(),
            original_valid: original
                .map(|value| validate(value, SchemaKind::FullDocument))
                .unwrap_or(false),
        }
    }
}

pub struct Rule {
    pub applies: fn(&Facts) -> bool,
    pub verdict: ScenarioResult,
}

pub const RULES: &[Rule] = &[
    Rule {
        applies: |f| !f.modified_is_full && !f.modified_is_item,
        verdict: ScenarioResult::Invalid(InvalidReason::ModifiedMalformed),
    },
    Rule {
        applies: |f| f.operation == Operation::Full && !f.modified_is_full,
        verdict: ScenarioResult::Invalid(InvalidReason::ExpectedFullData),
    },
    Rule {
        applies: |f| f.operation.targets_single_item() && !f.modified_is_item,
        verdict: ScenarioResult::Invalid(InvalidReason::ExpectedSingleItem),
    },
    Rule {
        applies: |f| f.operation.targets_single_item() && !f.original_present,
        verdict: ScenarioResult::Invalid(InvalidReason::OriginalRequired),
    },
    Rule {
        applies: |f| f.original_present && !f.original_valid,
        verdict: ScenarioResult::Invalid(InvalidReason::OriginalMalformed),
    },
    Rule {
        applies: |f| f.operation == Operation::Full && f.original_present,
        verdict: ScenarioResult::Invalid(InvalidReason::UnexpectedOriginal),
    },
    Rule {
        applies: |f| f.operation == Operation::Add,
        verdict: ScenarioResult::AddItem,
    },
    Rule {
        applies: |f| f.operation == Operation::Delete,
        verdict: ScenarioResult::DeleteItem,
    },
    Rule {
        applies: |f| f.operation == Operation::Replace,
        verdict: ScenarioResult::ReplaceItem,
    },
    Rule {
        applies: |f| f.operation == Operation::Full,
        verdict: ScenarioResult::ReplaceFull,
    },
];

pub fn classify(modified: &Value, operation: Operation, original: Option<&Value>) -> ScenarioResult {
    decide(&Facts::gather(modified, operation, original))
}

pub fn decide(facts: &Facts) -> ScenarioResult {
    RULES
        .iter()
        .find(|rule| (rule.applies)(facts))
        .map(|rule| rule.verdict)
        // The last four rows cover every operation, so this is never reached.
        .unwrap_or(ScenarioResult::Invalid(InvalidReason::ModifiedMalformed))
}

/// Original data counts as absent when it is missing, `null`, or `{}`.
fn is_present(original: &Value) -> bool {
    match original {
        Value::Null => false,
        Value::Object(obj) => !obj.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(number: u64) -> Value {
        json!({
            "ItemNumber": number,
            "Name": "Calc",
            "FilePath": "calc",
            "Description": "Calculator",
            "Browser": false,
            "ArgumentCount": 0,
            "ArgumentList": []
        })
    }

    fn document() -> Value {
        json!({"TotalItems": 1, "Items": [item(1)]})
    }

    fn invalid(reason: InvalidReason) -> ScenarioResult {
        ScenarioResult::Invalid(reason)
    }

    #[test]
    fn test_valid_scenarios() {
        let original = document();
        assert_eq!(
            classify(&item(1), Operation::Add, Some(&original)),
            ScenarioResult::AddItem
        );
        assert_eq!(
            classify(&item(1), Operation::Delete, Some(&original)),
            ScenarioResult::DeleteItem
        );
        assert_eq!(
            classify(&item(1), Operation::Replace, Some(&original)),
            ScenarioResult::ReplaceItem
        );
        assert_eq!(
            classify(&document(), Operation::Full, None),
            ScenarioResult::ReplaceFull
        );
        assert_eq!(
            classify(&document(), Operation::Full, Some(&json!({}))),
            ScenarioResult::ReplaceFull
        );
        assert_eq!(
            classify(&document(), Operation::Full, Some(&Value::Null)),
            ScenarioResult::ReplaceFull
        );
    }

    #[test]
    fn test_empty_modified_fails_first() {
        assert_eq!(
            classify(&json!({}), Operation::Full, Some(&json!({}))),
            invalid(InvalidReason::ModifiedMalformed)
        );
        // Even with a broken original, the modified data is reported first.
        assert_eq!(
            classify(&json!({}), Operation::Add, Some(&json!({"TotalItems": 5}))),
            invalid(InvalidReason::ModifiedMalformed)
        );
    }

    #[test]
    fn test_full_operation_needs_full_data() {
        assert_eq!(
            classify(&item(1), Operation::Full, None),
            invalid(InvalidReason::ExpectedFullData)
        );
    }

    #[test]
    fn test_item_operations_need_single_item() {
        let original = document();
        for operation in [Operation::Add, Operation::Delete, Operation::Replace] {
            assert_eq!(
                classify(&document(), operation, Some(&original)),
                invalid(InvalidReason::ExpectedSingleItem)
            );
        }
    }

    #[test]
    fn test_item_operations_need_original() {
        for operation in [Operation::Add, Operation::Delete, Operation::Replace] {
            assert_eq!(
                classify(&item(1), operation, None),
                invalid(InvalidReason::OriginalRequired)
            );
            assert_eq!(
                classify(&item(1), operation, Some(&json!({}))),
                invalid(InvalidReason::OriginalRequired)
            );
        }
    }

    #[test]
    fn test_original_must_be_valid() {
        let broken = json!({"TotalItems": 3, "Items": [item(1)]});
        assert_eq!(
            classify(&item(1), Operation::Add, Some(&broken)),
            invalid(InvalidReason::OriginalMalformed)
        );
        assert_eq!(
            classify(&document(), Operation::Full, Some(&json!([1, 2]))),
            invalid(InvalidReason::OriginalMalformed)
        );
    }

    #[test]
    fn test_gapped_original_is_valid() {
        let gapped = json!({"TotalItems": 2, "Items": [item(1), item(3)]});
        assert_eq!(
            classify(&item(2), Operation::Add, Some(&gapped)),
            ScenarioResult::AddItem
        );
        assert_eq!(
            classify(&item(2), Operation::Delete, Some(&gapped)),
            ScenarioResult::DeleteItem
        );
    }

    #[test]
    fn test_full_replacement_rejects_original() {
        assert_eq!(
            classify(&document(), Operation::Full, Some(&document())),
            invalid(InvalidReason::UnexpectedOriginal)
        );
    }

    #[test]
    fn test_every_rule_row_is_reachable() {
        let operations = [
            Operation::Add,
            Operation::Delete,
            Operation::Replace,
            Operation::Full,
        ];
        let mut hit = vec![false; RULES.len()];

        for operation in operations {
            for bits in 0u8..16 {
                let facts = Facts {
                    operation,
                    modified_is_full: bits & 1 != 0,
                    modified_is_item: bits & 2 != 0 && bits & 1 == 0,
                    original_present: bits & 4 != 0,
                    original_valid: bits & 8 != 0 && bits & 4 != 0,
                };
                if let Some(index) = RULES.iter().position(|rule| (rule.applies)(&facts)) {
                    hit[index] = true;
                }
            }
        }

        assert!(hit.iter().all(|h| *h), "unreachable rows: {:?}", hit);
    }

    #[test]
    fn test_decide_is_deterministic() {
        let facts = Facts::gather(&item(1), Operation::Replace, Some(&document()));
        assert_eq!(decide(&facts), decide(&facts));
        assert!(decide(&facts).is_valid());
    }

    #[test]
    fn test_reason_diagnostic() {
        let diagnostic = InvalidReason::OriginalRequired.to_diagnostic();
        assert!(diagnostic.is_fatal());
        assert_eq!(diagnostic.code, DiagnosticCode::OriginalDataRequired);
        assert!(diagnostic.description.contains("original data required"));
    }
}
