//! A model composed with its four CRUD actions under one base URL.
//!
//! # Example
//!
//! ```rust
//! use collection_sync::{CollectionDataService, Field, Model};
//!
//! let model = Model::builder("todos")
//!     .field("id", Field::numeric("id").primary())
//!     .build();
//! let service = CollectionDataService::builder(model)
//!     .base_url("https://api.example.com")
//!     .build();
//!
//! assert_eq!(service.base_url(), "https://api.example.com/");
//! assert_eq!(service.read_action().name(), "todos: read");
//! assert_eq!(
//!     service.read_action().endpoint().get_url(),
//!     Some("https://api.example.com/todos")
//! );
//! ```

use std::sync::Arc;

use serde_json::Value;

use crate::action::{CrudAction, Transport};
use crate::error::Error;
use crate::filter::Query;
use crate::model::{Collection, Model, Record};
use crate::store::{MemoryStore, Store};
use crate::util::url::normalize_base_url;

/// A model plus create/read/update/delete actions bound to it.
#[derive(Debug, Clone)]
pub struct CollectionDataService {
    model: Arc<Model>,
    base_url: String,
    create: CrudAction,
    read: CrudAction,
    update: CrudAction,
    delete: CrudAction,
}

impl CollectionDataService {
    pub fn builder(model: impl Into<Arc<Model>>) -> CollectionDataServiceBuilder {
        CollectionDataServiceBuilder::new(model)
    }

    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    /// Base URL, always ending with `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn create_action(&self) -> &CrudAction {
        &self.create
    }

    pub fn read_action(&self) -> &CrudAction {
        &self.read
    }

    pub fn update_action(&self) -> &CrudAction {
        &self.update
    }

    pub fn delete_action(&self) -> &CrudAction {
        &self.delete
    }

    /// The four actions in create, read, update, delete order.
    pub fn actions(&self) -> [&CrudAction; 4] {
        [&self.create, &self.read, &self.update, &self.delete]
    }

    /// Registers all four reducers with a [`MemoryStore`].
    pub fn register(&self, store: &MemoryStore) {
        for action in self.actions() {
            store.register(action.clone());
        }
    }

    /// Current records of this service's model.
    pub fn instances<S: Store + ?Sized>(&self, store: &S) -> Collection {
        store.collection(self.model.name())
    }

    /// POSTs a batch of objects.
    pub fn create<T, S>(&self, transport: &T, store: &S, objects: Vec<Record>) -> Result<(), Error>
    where
        T: Transport + ?Sized,
        S: Store + ?Sized,
    {
        self.create.send_objects(transport, store, objects)
    }

    /// GETs the records matching `query`. Also used to refresh.
    pub fn read<T, S>(&self, transport: &T, store: &S, query: impl Into<Query>) -> Result<(), Error>
    where
        T: Transport + ?Sized,
        S: Store + ?Sized,
    {
        self.read.initiate(transport, store, &query.into(), None)
    }

    /// PUTs `data` to the records matching `query`.
    pub fn update<T, S>(
        &self,
        transport: &T,
        store: &S,
        query: impl Into<Query>,
        data: Value,
    ) -> Result<(), Error>
    where
        T: Transport + ?Sized,
        S: Store + ?Sized,
    {
        self.update.initiate(transport, store, &query.into(), Some(data))
    }

    /// DELETEs the records matching `query`.
    pub fn delete<T, S>(&self, transport: &T, store: &S, query: impl Into<Query>) -> Result<(), Error>
    where
        T: Transport + ?Sized,
        S: Store + ?Sized,
    {
        self.delete.initiate(transport, store, &query.into(), None)
    }
}

/// Builder for [`CollectionDataService`].
#[derive(Debug, Clone)]
pub struct CollectionDataServiceBuilder {
    model: Arc<Model>,
    base_url: String,
    create: CrudAction,
    read: CrudAction,
    update: CrudAction,
    delete: CrudAction,
}

impl CollectionDataServiceBuilder {
    pub fn new(model: impl Into<Arc<Model>>) -> Self {
        Self {
            model: model.into(),
            base_url: String::new(),
            create: CrudAction::create(),
            read: CrudAction::read(),
            update: CrudAction::update(),
            delete: CrudAction::delete(),
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Overrides the create action.
    pub fn create(mut self, action: CrudAction) -> Self {
        self.create = action;
        self
    }

    /// Overrides the read action.
    pub fn read(mut self, action: CrudAction) -> Self {
        self.read = action;
        self
    }

    /// Overrides the update action.
    pub fn update(mut self, action: CrudAction) -> Self {
        self.update = action;
        self
    }

    /// Overrides the delete action.
    pub fn delete(mut self, action: CrudAction) -> Self {
        self.delete = action;
        self
    }

    /// Normalizes the base URL and binds every action that has no model
    /// of its own to this service's model.
    pub fn build(self) -> CollectionDataService {
        let base_url = normalize_base_url(&self.base_url);
        let mut actions = [self.create, self.read, self.update, self.delete];
        for action in &mut actions {
            if action.model().is_none() {
                action.bind(&self.model, &base_url);
            }
        }
        let [create, read, update, delete] = actions;

        tracing::debug!(
            target: "collection_sync::action",
            model = self.model.name(),
            base_url = %base_url,
            "configured collection service"
        );

        CollectionDataService {
            model: self.model,
            base_url,
            create,
            read,
            update,
            delete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Field;

    fn todos() -> Model {
        Model::builder("todos")
            .field("id", Field::numeric("id").primary())
            .build()
    }

    #[test]
    fn test_binds_all_actions() {
        let service = CollectionDataService::builder(todos())
            .base_url("http://api")
            .build();

        let names: Vec<_> = service.actions().iter().map(|a| a.name().to_string()).collect();
        assert_eq!(
            names,
            vec!["todos: create", "todos: read", "todos: update", "todos: delete"]
        );
        for action in service.actions() {
            assert_eq!(action.endpoint().get_url(), Some("http://api/todos"));
            assert!(Arc::ptr_eq(action.model().unwrap(), service.model()));
        }
    }

    #[test]
    fn test_explicit_model_left_alone() {
        let other = Arc::new(
            Model::builder("archive")
                .field("id", Field::numeric("id").primary())
                .build(),
        );
        let service = CollectionDataService::builder(todos())
            .base_url("http://api/")
            .delete(CrudAction::delete().named("purge").with_model(other))
            .build();

        let delete = service.delete_action();
        assert_eq!(delete.name(), "purge");
        assert_eq!(delete.model().unwrap().name(), "archive");
        assert_eq!(delete.endpoint().get_url(), None);
    }

    #[test]
    fn test_explicit_url_kept() {
        let service = CollectionDataService::builder(todos())
            .base_url("http://api")
            .read(CrudAction::read().with_url("http://cache/todos"))
            .build();

        assert_eq!(service.read_action().name(), "todos: read");
        assert_eq!(service.read_action().endpoint().get_url(), Some("http://cache/todos"));
    }

    #[test]
    fn test_missing_base_url_is_root() {
        let service = CollectionDataService::builder(todos()).build();
        assert_eq!(service.base_url(), "/");
        for action in service.actions() {
            assert_eq!(action.endpoint().get_url(), Some("/todos"));
        }
    }

    #[test]
    fn test_renamed_action_prefixed() {
        let service = CollectionDataService::builder(todos())
            .read(CrudAction::read().named("refresh"))
            .build();
        assert_eq!(service.read_action().name(), "todos: refresh");
    }
}
