#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use serde_json::Value;
use startup_data::{reconcile, Operation, StartupDocument, StartupItem};

#[derive(Arbitrary, Debug)]
struct FuzzItem {
    item_number: u8,
    name: String,
    file_path: String,
    description: String,
    arguments: Vec<String>,
}

#[derive(Arbitrary, Debug)]
enum FuzzOperation {
    Add,
    Delete,
    Replace,
    Full,
}

#[derive(Arbitrary, Debug)]
enum FuzzModified {
    Item(FuzzItem),
    Document(Vec<FuzzItem>),
    Empty,
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    original: Option<Vec<FuzzItem>>,
    operation: FuzzOperation,
    modified: FuzzModified,
}

impl FuzzItem {
    fn to_item(&self) -> StartupItem {
        StartupItem::new(
            &self.name,
            &self.file_path,
            &self.description,
            self.arguments.clone(),
        )
        .with_item_number(self.item_number as usize)
    }
}

fn to_document(items: &[FuzzItem]) -> StartupDocument {
    StartupDocument::new(items.iter().map(FuzzItem::to_item).collect())
}

fuzz_target!(|input: FuzzInput| {
    let operation = match input.operation {
        FuzzOperation::Add => Operation::Add,
        FuzzOperation::Delete => Operation::Delete,
        FuzzOperation::Replace => Operation::Replace,
        FuzzOperation::Full => Operation::Full,
    };

    let modified = match &input.modified {
        FuzzModified::Item(item) => item.to_item().to_value(),
        FuzzModified::Document(items) => to_document(items).to_value(),
        FuzzModified::Empty => Value::Object(Default::default()),
    };
    let original = input.original.as_deref().map(|items| to_document(items).to_value());

    // Whatever the inputs, a successful result is consistently numbered
    if let Ok(document) = reconcile(&modified, operation, original.as_ref()) {
        assert_eq!(document.total_items, document.items.len());
        for (index, item) in document.items.iter().enumerate() {
            assert_eq!(item.item_number, index + 1);
            assert_eq!(item.argument_count, item.argument_list.len());
        }
    }
});
