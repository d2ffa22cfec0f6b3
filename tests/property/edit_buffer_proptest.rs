//! Property-based tests for the edit buffer and save watermark

use std::sync::Arc;

use coedit::backend::collab::CollabState;
use coedit::backend::storage::{MemoryStorage, Storage};
use coedit::shared::{EditMode, EditOperation, FileHandle, UserIdentity};
use proptest::prelude::*;
use serde_json::json;

fn open_writer() -> (CollabState, UserIdentity, FileHandle) {
    let storage = Arc::new(MemoryStorage::new());
    let alice = UserIdentity::new("alice");
    storage.insert(&alice, "proj/a.js", "").unwrap();
    let collab = CollabState::new(storage);
    let file = FileHandle::new(alice.clone(), "proj/a.js").unwrap();
    collab.open_file(&alice, &file, EditMode::ReadWrite).unwrap();
    (collab, alice, file)
}

fn ops(values: &[i64]) -> Vec<EditOperation> {
    values.iter().map(|n| EditOperation::new(json!({ "n": n }))).collect()
}

proptest! {
    #[test]
    fn test_edits_since_last_save_is_suffix_after_watermark(
        (values, last) in prop::collection::vec(any::<i64>(), 1..40)
            .prop_flat_map(|values| {
                let len = values.len() as i64;
                (Just(values), -1..len)
            })
    ) {
        let (collab, alice, file) = open_writer();
        collab.append_edits(&alice, &file, ops(&values)).unwrap();

        collab.save_file(&alice, &file, b"saved", Some(last)).unwrap();

        let start = (last + 1) as usize;
        prop_assert_eq!(collab.edits_since_last_save(&alice, &file), ops(&values[start..]));
        prop_assert_eq!(collab.edits(&alice, &file), ops(&values));
        prop_assert_eq!(collab.find(&alice, &file).unwrap().watermark(), last);
    }

    #[test]
    fn test_out_of_range_save_changes_nothing(
        values in prop::collection::vec(any::<i64>(), 0..20),
        beyond in 0i64..10,
    ) {
        let (collab, alice, file) = open_writer();
        collab.append_edits(&alice, &file, ops(&values)).unwrap();

        let index = values.len() as i64 + beyond;
        prop_assert!(collab.save_file(&alice, &file, b"rejected", Some(index)).is_err());
        prop_assert!(collab.save_file(&alice, &file, b"rejected", Some(-2 - beyond)).is_err());

        prop_assert_eq!(collab.storage().read(&alice, "proj/a.js").unwrap(), Vec::<u8>::new());
        prop_assert_eq!(collab.edits_since_last_save(&alice, &file), ops(&values));
    }

    #[test]
    fn test_batches_append_in_order(batches in prop::collection::vec(prop::collection::vec(any::<i64>(), 0..5), 0..10)) {
        let (collab, alice, file) = open_writer();
        for batch in &batches {
            collab.append_edits(&alice, &file, ops(batch)).unwrap();
        }

        let flat: Vec<i64> = batches.concat();
        prop_assert_eq!(collab.edits(&alice, &file), ops(&flat));
        for index in 0..=flat.len() {
            prop_assert_eq!(collab.edits_since(&alice, &file, index).unwrap(), ops(&flat[index..]));
        }
        prop_assert!(collab.edits_since(&alice, &file, flat.len() + 1).is_err());
    }
}
