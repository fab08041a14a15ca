//! collection-sync: typed PostgREST-style queries and keyed collection sync.
//!
//! This crate builds filter arguments and headers for a PostgREST-style
//! REST API and folds the JSON records it returns into a client-side
//! collection keyed by each record's composite primary key.
//!
//! # Overview
//!
//! - **Fields** produce predicates from typed calls (`eq`, `gt`, `like`, ...)
//!   and have a negated twin emitting `not.<op>`
//! - **Queries** compile predicates, ordering and pagination into URL
//!   arguments and a `Range` header
//! - **Models** declare fields, derive a composite key per record and
//!   normalize raw records
//! - **CRUD actions** issue requests through a [`Transport`] and dispatch
//!   returned records to a [`Store`], whose reducers insert, replace or
//!   remove entries by key
//!
//! # Quick Start
//!
//! ```rust
//! use collection_sync::{Field, Model, Query};
//!
//! let model = Model::builder("todos")
//!     .field("id", Field::numeric("id").primary())
//!     .field("title", Field::text("title"))
//!     .field("done", Field::plain("done"))
//!     .build();
//!
//! let title = model.text_field("title").unwrap();
//! let done = model.field("done").unwrap();
//!
//! let query = Query::default()
//!     .filter(title.ilike("*milk*"))
//!     .filter(done.not().equals(true))
//!     .order_by(title.order_ascending())
//!     .limit(20);
//!
//! let args = query.url_arguments();
//! assert_eq!(args[0].argument, "order");
//! assert_eq!(args[0].value, "title.asc");
//! assert_eq!(args[1].value, "ilike.*milk*");
//! assert_eq!(args[2].value, "not.eq.true");
//! assert_eq!(query.request_headers(), vec!["Range: 0-20"]);
//! ```
//!
//! # Modules
//!
//! - [`filter`]: fields, predicates and queries
//! - [`model`]: model schemas, records and collections
//! - [`action`]: endpoints, reducers and CRUD actions
//! - [`store`]: the dispatch boundary and an in-memory store
//! - [`service`]: a model wired to its four CRUD actions
//! - [`error`]: error types

pub mod action;
pub mod error;
pub mod filter;
pub mod model;
pub mod service;
pub mod store;
pub mod util;

// Re-export commonly used types at crate root
pub use action::{ActionKind, CrudAction, Endpoint, Method, Request, Success, Transport};
pub use error::{Error, ModelError};
pub use filter::{AnyField, Field, FieldType, Numeric, Plain, Predicate, Query, QueryConfig, Text, UrlArgument};
pub use model::{Collection, Model, ModelBuilder, ModelConfig, Record};
pub use service::{CollectionDataService, CollectionDataServiceBuilder};
pub use store::{Dispatched, MemoryStore, Store};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
