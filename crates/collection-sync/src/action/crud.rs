//! CRUD actions: an endpoint paired with a reducer.
//!
//! | Kind   | Method | Extra header                     | Reducer  |
//! |--------|--------|----------------------------------|----------|
//! | Create | POST   | `Prefer: return=representation`  | upsert   |
//! | Read   | GET    | `Range-Unit: items`              | upsert   |
//! | Update | PUT    | `Prefer: return=representation`  | upsert   |
//! | Delete | DELETE | `Prefer: return=representation`  | remove   |

use std::sync::Arc;

use serde_json::Value;

use crate::action::endpoint::{Endpoint, Method, Transport, PREFER_REPRESENTATION, RANGE_UNIT_ITEMS};
use crate::action::reducer;
use crate::error::Error;
use crate::filter::Query;
use crate::model::{records_from_response, Collection, Model, Record};
use crate::store::{Dispatched, Store};
use crate::util::url::endpoint_url;

/// The four CRUD operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Create,
    Read,
    Update,
    Delete,
}

impl ActionKind {
    pub fn method(&self) -> Method {
        match self {
            ActionKind::Create => Method::Post,
            ActionKind::Read => Method::Get,
            ActionKind::Update => Method::Put,
            ActionKind::Delete => Method::Delete,
        }
    }

    /// Name used for the action when none is given.
    pub fn default_name(&self) -> &'static str {
        match self {
            ActionKind::Create => "create",
            ActionKind::Read => "read",
            ActionKind::Update => "update",
            ActionKind::Delete => "delete",
        }
    }

    /// Endpoint with this kind's method and fixed headers.
    pub fn endpoint(&self) -> Endpoint {
        let endpoint = Endpoint::new(self.method());
        match self {
            ActionKind::Read => endpoint.header(RANGE_UNIT_ITEMS),
            ActionKind::Create | ActionKind::Update | ActionKind::Delete => {
                endpoint.header(PREFER_REPRESENTATION)
            }
        }
    }
}

/// A CRUD action bound (eventually) to a model and an endpoint URL.
#[derive(Debug, Clone)]
pub struct CrudAction {
    kind: ActionKind,
    name: String,
    model: Option<Arc<Model>>,
    endpoint: Endpoint,
}

impl CrudAction {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            name: kind.default_name().to_string(),
            model: None,
            endpoint: kind.endpoint(),
        }
    }

    pub fn create() -> Self {
        Self::new(ActionKind::Create)
    }

    pub fn read() -> Self {
        Self::new(ActionKind::Read)
    }

    pub fn update() -> Self {
        Self::new(ActionKind::Update)
    }

    pub fn delete() -> Self {
        Self::new(ActionKind::Delete)
    }

    /// Sets the action name (the dispatched action type).
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Attaches an explicit model. A service leaves such actions untouched.
    pub fn with_model(mut self, model: impl Into<Arc<Model>>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets an explicit endpoint URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint = self.endpoint.url(url);
        self
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> Option<&Arc<Model>> {
        self.model.as_ref()
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Injects a service's model: prefixes the name with the model name
    /// and points the endpoint at `base_url + model_name` unless a URL was
    /// set explicitly.
    pub(crate) fn bind(&mut self, model: &Arc<Model>, base_url: &str) {
        self.name = format!("{}: {}", model.name(), self.name);
        if !self.endpoint.has_explicit_url() {
            self.endpoint.set_url(endpoint_url(base_url, model.name()));
        }
        self.model = Some(Arc::clone(model));
    }

    /// Applies returned records to `state`.
    pub fn reduce(&self, state: &Collection, records: &[Record]) -> Result<Collection, Error> {
        let model = self.model.as_deref().ok_or_else(|| Error::ModelNotConfigured {
            action: self.name.clone(),
        })?;
        let next = match self.kind {
            ActionKind::Create | ActionKind::Read | ActionKind::Update => {
                reducer::upsert(model, state, records)?
            }
            ActionKind::Delete => reducer::remove(model, state, records)?,
        };
        Ok(next)
    }

    /// Issues the request for `query` and dispatches the returned records
    /// under this action's name once it succeeds.
    pub fn initiate<T, S>(
        &self,
        transport: &T,
        store: &S,
        query: &Query,
        data: Option<Value>,
    ) -> Result<(), Error>
    where
        T: Transport + ?Sized,
        S: Store + ?Sized,
    {
        let request = self
            .endpoint
            .request(query.request_headers(), query.url_arguments(), data);

        tracing::debug!(
            target: "collection_sync::action",
            action = %self.name,
            method = request.method.as_str(),
            url = %request.url,
            arguments = request.arguments.len(),
            "issuing request"
        );

        let action_type = self.name.clone();
        transport.execute(
            request,
            Box::new(move |body: Value| {
                let instances = records_from_response(body);
                tracing::debug!(
                    target: "collection_sync::action",
                    action = %action_type,
                    records = instances.len(),
                    "dispatching response"
                );
                store.dispatch(Dispatched {
                    action_type,
                    instances,
                })
            }),
        )
    }

    /// Sends `objects` as the request body and dispatches what comes back.
    pub fn send_objects<T, S>(&self, transport: &T, store: &S, objects: Vec<Record>) -> Result<(), Error>
    where
        T: Transport + ?Sized,
        S: Store + ?Sized,
    {
        self.initiate(transport, store, &Query::default(), Some(Value::Array(objects)))
    }
}
