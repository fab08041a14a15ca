//! The store boundary and an in-memory reference store.
//!
//! Actions never touch collection state directly. On success they hand a
//! [`Dispatched`] batch to a [`Store`], which runs whichever reducer is
//! registered for the action type and swaps in the resulting collection.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::action::CrudAction;
use crate::error::Error;
use crate::model::{Collection, Record};

/// A batch of returned records tagged with the originating action name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dispatched {
    #[serde(rename = "type")]
    pub action_type: String,
    pub instances: Vec<Record>,
}

/// State container that receives dispatched results.
pub trait Store {
    /// Applies the reducer registered for `action.action_type`.
    fn dispatch(&self, action: Dispatched) -> Result<(), Error>;

    /// Returns the current collection stored under `slice`.
    fn collection(&self, slice: &str) -> Collection;
}

/// Single-threaded store keeping one collection per model name.
///
/// Each dispatch replaces the slice with a new collection; snapshots taken
/// earlier keep the value they had.
#[derive(Debug, Default)]
pub struct MemoryStore {
    actions: RefCell<FxHashMap<String, CrudAction>>,
    slices: RefCell<FxHashMap<String, Rc<Collection>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `action`'s reducer under its name.
    ///
    /// Registering a second action with the same name replaces the first.
    pub fn register(&self, action: CrudAction) {
        self.actions
            .borrow_mut()
            .insert(action.name().to_string(), action);
    }

    /// Returns a shared snapshot of a slice.
    pub fn snapshot(&self, slice: &str) -> Rc<Collection> {
        self.slices
            .borrow()
            .get(slice)
            .cloned()
            .unwrap_or_default()
    }

    /// Replaces a slice outright.
    pub fn replace(&self, slice: impl Into<String>, collection: Collection) {
        self.slices
            .borrow_mut()
            .insert(slice.into(), Rc::new(collection));
    }
}

impl Store for MemoryStore {
    fn dispatch(&self, action: Dispatched) -> Result<(), Error> {
        let actions = self.actions.borrow();
        let Some(registered) = actions.get(&action.action_type) else {
            tracing::debug!(
                target: "collection_sync::store",
                action = %action.action_type,
                "no reducer registered; ignoring"
            );
            return Ok(());
        };
        let slice = registered
            .model()
            .map(|model| model.name().to_string())
            .ok_or_else(|| Error::ModelNotConfigured {
                action: action.action_type.clone(),
            })?;

        let current = self.snapshot(&slice);
        let next = registered.reduce(&current, &action.instances)?;
        self.slices.borrow_mut().insert(slice, Rc::new(next));
        Ok(())
    }

    fn collection(&self, slice: &str) -> Collection {
        self.snapshot(slice).as_ref().clone()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::filter::Field;
    use crate::model::Model;

    fn todos() -> Arc<Model> {
        Arc::new(
            Model::builder("todos")
                .field("id", Field::numeric("id").primary())
                .build(),
        )
    }

    #[test]
    fn test_dispatch_applies_registered_reducer() {
        let store = MemoryStore::new();
        store.register(CrudAction::read().named("todos: read").with_model(todos()));

        store
            .dispatch(Dispatched {
                action_type: "todos: read".to_string(),
                instances: vec![json!({"id": 1}), json!({"id": 2})],
            })
            .unwrap();

        assert_eq!(store.collection("todos").len(), 2);
    }

    #[test]
    fn test_unknown_action_ignored() {
        let store = MemoryStore::new();
        store
            .dispatch(Dispatched {
                action_type: "nobody".to_string(),
                instances: vec![json!({"id": 1})],
            })
            .unwrap();
        assert!(store.collection("todos").is_empty());
    }

    #[test]
    fn test_snapshots_are_not_mutated() {
        let store = MemoryStore::new();
        store.register(CrudAction::create().named("add").with_model(todos()));
        store.register(CrudAction::delete().named("drop").with_model(todos()));

        store
            .dispatch(Dispatched {
                action_type: "add".to_string(),
                instances: vec![json!({"id": 1})],
            })
            .unwrap();
        let before = store.snapshot("todos");

        store
            .dispatch(Dispatched {
                action_type: "drop".to_string(),
                instances: vec![json!({"id": 1})],
            })
            .unwrap();

        assert_eq!(before.len(), 1);
        assert!(store.snapshot("todos").is_empty());
    }

    #[test]
    fn test_unbound_action_errors() {
        let store = MemoryStore::new();
        store.register(CrudAction::read());
        let err = store
            .dispatch(Dispatched {
                action_type: "read".to_string(),
                instances: Vec::new(),
            })
            .unwrap_err();
        assert!(matches!(err, Error::ModelNotConfigured { .. }));
    }

    #[test]
    fn test_dispatched_json_shape() {
        let json = serde_json::to_value(Dispatched {
            action_type: "todos: read".to_string(),
            instances: vec![json!({"id": 1})],
        })
        .unwrap();
        assert_eq!(json, json!({"type": "todos: read", "instances": [{"id": 1}]}));
    }
}
