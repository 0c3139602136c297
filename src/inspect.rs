//! Pre-request schema inspection for documentation generators.
//!
//! A documentation collaborator needs to know, with no request in flight,
//! which read schema and which write schema govern each routed operation.
//! That capability is the [`SchemaLookup`] trait; consumers declare a
//! dependency on it explicitly and register implementors with an
//! [`ApiInspector`] rather than discovering resolver support by downcasting.

use serde::Serialize;

use crate::controller::Controller;
use crate::error::ResolveError;
use crate::resolver::Resolution;
use crate::types::Action;

/// Read/write schema lookup against static configuration alone.
///
/// Implemented by [`Controller`]; hosts with their own controller type can
/// implement it directly.
pub trait SchemaLookup {
    type Schema;

    /// The schema shaping this action's response.
    fn read_schema(&self, action: &Action) -> Result<Resolution<'_, Self::Schema>, ResolveError>;

    /// The schema interpreting this action's payload.
    fn write_schema(&self, action: &Action) -> Result<Resolution<'_, Self::Schema>, ResolveError>;

    /// Whether the action consumes a request payload at all.
    fn accepts_payload(&self, action: &Action) -> bool;
}

impl<S> SchemaLookup for Controller<S> {
    type Schema = S;

    fn read_schema(&self, action: &Action) -> Result<Resolution<'_, S>, ResolveError> {
        self.schemas().resolve_entry(action, crate::types::Direction::Read)
    }

    fn write_schema(&self, action: &Action) -> Result<Resolution<'_, S>, ResolveError> {
        self.schemas().resolve_entry(action, crate::types::Direction::Write)
    }

    fn accepts_payload(&self, action: &Action) -> bool {
        Controller::accepts_payload(self, action)
    }
}

/// HTTP methods covered by the standard route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// One routed operation: method + path + the logical action behind them.
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    pub method: HttpMethod,
    pub path: String,
    pub action: Action,
}

impl Route {
    pub fn new(method: HttpMethod, path: impl Into<String>, action: impl Into<Action>) -> Self {
        Route {
            method,
            path: path.into(),
            action: action.into(),
        }
    }
}

/// The standard CRUD route table for a collection mounted at `base_path`.
pub fn crud_routes(base_path: &str) -> Vec<Route> {
    let base = base_path.trim_end_matches('/');
    let item = format!("{base}/{{id}}");
    vec![
        Route::new(HttpMethod::Get, base, Action::List),
        Route::new(HttpMethod::Post, base, Action::Create),
        Route::new(HttpMethod::Get, item.clone(), Action::Retrieve),
        Route::new(HttpMethod::Put, item.clone(), Action::Update),
        Route::new(HttpMethod::Patch, item.clone(), Action::PartialUpdate),
        Route::new(HttpMethod::Delete, item, Action::Delete),
    ]
}

/// Documentation entry for one operation: which schemas apply and which
/// attribute keys they came from.
#[derive(Debug, Clone, Serialize)]
pub struct OperationDoc<'a, S> {
    pub method: HttpMethod,
    pub path: String,
    pub action: Action,
    /// Write-side resolution; absent for payload-free operations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<Resolution<'a, S>>,
    /// Read-side resolution for the response.
    pub response: Resolution<'a, S>,
}

/// Explicit registry of routes and the lookups that back them.
///
/// Registration replaces implicit discovery: a docs generator asks exactly
/// the components that were registered, nothing else.
pub struct ApiInspector<'a, S> {
    entries: Vec<(Route, &'a dyn SchemaLookup<Schema = S>)>,
}

impl<'a, S> Default for ApiInspector<'a, S> {
    fn default() -> Self {
        ApiInspector {
            entries: Vec::new(),
        }
    }
}

impl<'a, S> ApiInspector<'a, S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the standard CRUD routes for a resource.
    pub fn register_resource(&mut self, base_path: &str, lookup: &'a dyn SchemaLookup<Schema = S>) {
        for route in crud_routes(base_path) {
            self.entries.push((route, lookup));
        }
    }

    /// Register one explicit route (custom actions).
    pub fn register_route(&mut self, route: Route, lookup: &'a dyn SchemaLookup<Schema = S>) {
        self.entries.push((route, lookup));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve every registered operation.
    ///
    /// # Errors
    ///
    /// A misconfigured operation aborts documentation generation with the
    /// same [`ResolveError::Misconfigured`] a live request would hit.
    pub fn operations(&self) -> Result<Vec<OperationDoc<'a, S>>, ResolveError> {
        let mut docs = Vec::with_capacity(self.entries.len());
        for (route, lookup) in &self.entries {
            let request = if lookup.accepts_payload(&route.action) {
                Some(lookup.write_schema(&route.action)?)
            } else {
                None
            };
            let response = lookup.read_schema(&route.action)?;
            docs.push(OperationDoc {
                method: route.method,
                path: route.path.clone(),
                action: route.action.clone(),
                request,
                response,
            });
        }
        Ok(docs)
    }
}
