//! Query: ordered predicates plus pagination and ordering state.

use serde::Deserialize;

use crate::filter::{Predicate, UrlArgument};

/// Argument name carrying the ordering clause.
pub const ORDER_ARGUMENT: &str = "order";

/// Partial query configuration.
///
/// Every key is optional; absent keys keep the [`Query`] defaults. This is
/// the shape a query takes when it arrives as plain JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryConfig {
    #[serde(skip)]
    pub predicates: Option<Vec<Predicate>>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub order_by: Option<Vec<String>>,
}

/// A set of ANDed predicates with pagination and ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    predicates: Vec<Predicate>,
    limit: Option<u64>,
    offset: Option<u64>,
    order_by: Vec<String>,
}

impl Query {
    /// Creates a query from a partial configuration.
    pub fn new(config: QueryConfig) -> Self {
        let mut query = Self::default();
        if let Some(predicates) = config.predicates {
            query.predicates = predicates;
        }
        if let Some(order_by) = config.order_by {
            query.order_by = order_by;
        }
        query.limit = config.limit;
        query.offset = config.offset;
        query
    }

    /// Adds a predicate.
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Adds several predicates, keeping their order.
    pub fn filters(mut self, predicates: impl IntoIterator<Item = Predicate>) -> Self {
        self.predicates.extend(predicates);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Appends an order token such as `name.asc`.
    pub fn order_by(mut self, token: impl Into<String>) -> Self {
        self.order_by.push(token.into());
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn limit_value(&self) -> Option<u64> {
        self.limit
    }

    pub fn offset_value(&self) -> Option<u64> {
        self.offset
    }

    pub fn order_tokens(&self) -> &[String] {
        &self.order_by
    }

    /// Returns the URL arguments for this query.
    ///
    /// The ordering argument, if any, comes first, followed by one
    /// argument per predicate in insertion order.
    pub fn url_arguments(&self) -> Vec<UrlArgument> {
        let mut arguments = Vec::with_capacity(self.predicates.len() + 1);
        if !self.order_by.is_empty() {
            arguments.push(UrlArgument::new(ORDER_ARGUMENT, self.order_by.join(",")));
        }
        arguments.extend(self.predicates.iter().map(Predicate::to_url_argument));
        arguments
    }

    /// Returns the request headers for this query.
    ///
    /// Emits a single `Range` header when either limit or offset is set.
    /// A zero limit leaves the range open-ended.
    pub fn request_headers(&self) -> Vec<String> {
        if self.limit.is_none() && self.offset.is_none() {
            return Vec::new();
        }
        let start = self.offset.unwrap_or(0);
        let end = match self.limit {
            Some(limit) if limit > 0 => start.saturating_add(limit).to_string(),
            _ => String::new(),
        };
        vec![format!("Range: {start}-{end}")]
    }
}

impl From<QueryConfig> for Query {
    fn from(config: QueryConfig) -> Self {
        Query::new(config)
    }
}
