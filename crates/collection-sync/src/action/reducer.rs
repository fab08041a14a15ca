//! Reducers folding response records into a keyed collection.
//!
//! Both reducers take the current collection by reference and return a new
//! one; the input is never modified.

use rustc_hash::FxHashSet;

use crate::error::ModelError;
use crate::model::{Collection, Model, Record};

/// Inserts or replaces each record by its composite index.
///
/// Records pass through the model's factory first and are folded left to
/// right, so a later record with the same key wins.
pub fn upsert(model: &Model, state: &Collection, records: &[Record]) -> Result<Collection, ModelError> {
    let mut next = state.clone();
    for record in records {
        let record = model.factory(record.clone());
        let key = model.index(&record)?;
        next.insert(key, record);
    }

    tracing::trace!(
        target: "collection_sync::reducer",
        model = model.name(),
        received = records.len(),
        before = state.len(),
        after = next.len(),
        "upserted records"
    );
    Ok(next)
}

/// Removes every stored record whose index matches a returned record.
///
/// Indices are computed from the raw returned records without running the
/// factory. If the index depends on fields only the factory produces, the
/// computed keys will not match the stored ones.
pub fn remove(model: &Model, state: &Collection, records: &[Record]) -> Result<Collection, ModelError> {
    let deleted = records
        .iter()
        .map(|record| model.index(record))
        .collect::<Result<FxHashSet<_>, _>>()?;

    let next: Collection = state
        .iter()
        .filter(|(key, _)| !deleted.contains(key.as_str()))
        .map(|(key, record)| (key.clone(), record.clone()))
        .collect();

    tracing::trace!(
        target: "collection_sync::reducer",
        model = model.name(),
        received = records.len(),
        removed = state.len() - next.len(),
        "removed records"
    );
    Ok(next)
}


#[cfg(test)]
mod proptests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::filter::Field;

    proptest! {
        #[test]
        fn prop_upsert_idempotent(ids in prop::collection::vec("[a-c]{1,2}", 0..20)) {
            let model = Model::builder("m").field("id", Field::text("id").primary()).build();
            let records: Vec<Record> = ids
                .iter()
                .enumerate()
                .map(|(i, id)| json!({"id": id, "seq": i}))
                .collect();

            let once = upsert(&model, &Collection::new(), &records).unwrap();
            let twice = upsert(&model, &once, &records).unwrap();
            prop_assert_eq!(&once, &twice);

            let distinct: FxHashSet<&String> = ids.iter().collect();
            prop_assert_eq!(once.len(), distinct.len());
        }

        #[test]
        fn prop_remove_after_upsert_empties(ids in prop::collection::vec("[a-z]{1,4}", 0..20)) {
            let model = Model::builder("m").field("id", Field::text("id").primary()).build();
            let records: Vec<Record> = ids.iter().map(|id| json!({"id": id})).collect();

            let stored = upsert(&model, &Collection::new(), &records).unwrap();
            let cleared = remove(&model, &stored, &records).unwrap();
            prop_assert!(cleared.is_empty());
        }
    }
}
