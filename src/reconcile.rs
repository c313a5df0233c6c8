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

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticLevel};
use crate::model::{StartupDocument, StartupItem};
use crate::scenario::{classify, InvalidReason, Operation, ScenarioResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    Scenario(InvalidReason),
    InvalidItemNumber {
        item_number: usize,
        total_items: usize,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Scenario(reason) => write!(f, "{}", reason),
            EngineError::InvalidItemNumber {
                item_number,
                total_items,
            } => write!(
                f,
                "startup item number {} is invalid (expected 1 to {})",
                item_number, total_items
            ),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<EngineError> for Diagnostic {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::Scenario(reason) => reason.to_diagnostic(),
            EngineError::InvalidItemNumber {
                item_number,
                total_items,
            } => {
                let range = match total_items {
                    0 => "There are no startup items yet.".to_string(),
                    1 => "The only valid item number is 1.".to_string(),
                    n => format!("Valid item numbers are 1 to {}.", n),
                };
                Diagnostic::new(
                    DiagnosticLevel::Fatal,
                    DiagnosticCode::InvalidItemNumber,
                    format!(
                        "I couldn't find startup item number {}, so I didn't change anything.",
                        item_number
                    ),
                )
                .with_advice(range)
            }
        }
    }
}

/// Apply `operation` to `original` using `modified`, producing a new document.
///
/// Neither input is changed. On error nothing is produced and the caller may
/// retry with corrected input.
pub fn reconcile(
    modified: &Value,
    operation: Operation,
    original: Option<&Value>,
) -> Result<StartupDocument, EngineError> {
    let scenario = classify(modified, operation, original);

    match scenario {
        ScenarioResult::Invalid(reason) => Err(EngineError::Scenario(reason)),
        ScenarioResult::ReplaceFull => {
            let document: StartupDocument = decode(modified, InvalidReason::ModifiedMalformed)?;
            Ok(renumbered(document.items))
        }
        ScenarioResult::AddItem | ScenarioResult::DeleteItem | ScenarioResult::ReplaceItem => {
            let item: StartupItem = decode(modified, InvalidReason::ModifiedMalformed)?;
            let original: StartupDocument = match original {
                Some(value) => decode(value, InvalidReason::OriginalMalformed)?,
                None => return Err(EngineError::Scenario(InvalidReason::OriginalRequired)),
            };

            match scenario {
                ScenarioResult::AddItem => Ok(append(&original, item)),
                ScenarioResult::DeleteItem => remove(&original, item.item_number),
                _ => overwrite(&original, item),
            }
        }
    }
}

pub fn add_item(document: &StartupDocument, item: &StartupItem) -> Result<StartupDocument, EngineError> {
    reconcile(&item.to_value(), Operation::Add, Some(&document.to_value()))
}

/// Delete by number. The item stored at that position is what gets handed to
/// the engine, so an unknown number is reported before classification.
pub fn delete_item(document: &StartupDocument, item_number: usize) -> Result<StartupDocument, EngineError> {
    let target = document
        .item(item_number)
        .ok_or(EngineError::InvalidItemNumber {
            item_number,
            total_items: document.total_items,
        })?
        .clone()
        .with_item_number(item_number);
    reconcile(&target.to_value(), Operation::Delete, Some(&document.to_value()))
}

pub fn replace_item(document: &StartupDocument, item: &StartupItem) -> Result<StartupDocument, EngineError> {
    reconcile(&item.to_value(), Operation::Replace, Some(&document.to_value()))
}

pub fn replace_full(document: &StartupDocument) -> Result<StartupDocument, EngineError> {
    reconcile(&document.to_value(), Operation::Full, None)
}

fn decode<T: DeserializeOwned>(value: &Value, reason: InvalidReason) -> Result<T, EngineError> {
    serde_json::from_value(value.clone()).map_err(|_| EngineError::Scenario(reason))
}

fn append(original: &StartupDocument, mut item: StartupItem) -> StartupDocument {
    // Callers often hand in an item numbered against a stale copy of the
    // document. The appended item always takes the next slot.
    item.item_number = original.total_items + 1;

    let mut items = original.items.clone();
    items.push(item);
    renumbered(items)
}

/// `item_number` names a position in the list, not a stored `ItemNumber`.
fn remove(original: &StartupDocument, item_number: usize) -> Result<StartupDocument, EngineError> {
    check_range(item_number, original.total_items)?;

    let mut items = original.items.clone();
    items.remove(item_number - 1);
    Ok(renumbered(items))
}

fn overwrite(original: &StartupDocument, item: StartupItem) -> Result<StartupDocument, EngineError> {
    check_range(item.item_number, original.total_items)?;

    let mut items = original.items.clone();
    let index = item.item_number - 1;
    items[index] = item;
    Ok(renumbered(items))
}

/// Stored documents may number their items with gaps; every result comes
/// out numbered 1..N.
fn renumbered(mut items: Vec<StartupItem>) -> StartupDocument {
    for (index, item) in items.iter_mut().enumerate() {
        item.item_number = index + 1;
    }
    StartupDocument::new(items)
}

fn check_range(item_number: usize, total_items: usize) -> Result<(), EngineError> {
    if item_number >= 1 && item_number <= total_items {
        Ok(())
    } else {
        Err(EngineError::InvalidItemNumber {
            item_number,
            total_items,
        })
    }
}
