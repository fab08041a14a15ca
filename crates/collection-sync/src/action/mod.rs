//! CRUD actions: endpoints, reducers and request initiators.
//!
//! - [`endpoint`]: request assembly and the [`Transport`] boundary
//! - [`reducer`]: pure folds of returned records into a collection
//! - [`crud`]: the four action kinds tying the two together

pub mod crud;
pub mod endpoint;
pub mod reducer;

pub use crud::{ActionKind, CrudAction};
pub use endpoint::{Endpoint, Method, Request, Success, Transport, PREFER_REPRESENTATION, RANGE_UNIT_ITEMS};
