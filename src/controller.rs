//! Controller-side glue: direction inference and the per-request schema pair.
//!
//! A [`Controller`] is a configuration holder, not a request handler. It owns
//! a frozen [`SchemaSet`] and knows which of its actions consume a request
//! payload; routing, transport, and persistence stay with the host framework.
//!
//! Direction policy: list/retrieve/delete and any payload-free action resolve
//! under `read` only. create/update/partial_update and payload-taking custom
//! actions resolve twice per request: once under `write` for the incoming
//! payload, then once under `read` for the response. The two resolutions are
//! independent, so a single action may legitimately use two schemas.

use std::collections::BTreeMap;

use crate::config::SchemaSet;
use crate::error::ResolveError;
use crate::types::{Action, Direction};

/// The schemas governing one invocation of an action.
#[derive(Debug, Clone)]
pub struct ActionSchemas<'a, S> {
    /// Write schema for the request payload; `None` for payload-free actions.
    pub request: Option<&'a S>,
    /// Read schema for the response.
    pub response: &'a S,
}

/// A named controller holding its static schema configuration.
#[derive(Debug, Clone)]
pub struct Controller<S> {
    name: String,
    schemas: SchemaSet<S>,
    custom_payloads: BTreeMap<String, bool>,
}

impl<S> Controller<S> {
    /// Create a controller from its frozen schema configuration.
    pub fn new(name: impl Into<String>, schemas: SchemaSet<S>) -> Self {
        Controller {
            name: name.into(),
            schemas,
            custom_payloads: BTreeMap::new(),
        }
    }

    /// Register a custom routed action and whether it consumes a payload.
    ///
    /// Unregistered custom actions are treated as payload-free.
    pub fn with_custom_action(mut self, name: impl Into<String>, accepts_payload: bool) -> Self {
        self.custom_payloads.insert(name.into(), accepts_payload);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The underlying configuration set.
    pub fn schemas(&self) -> &SchemaSet<S> {
        &self.schemas
    }

    /// Custom actions registered on this controller, in name order.
    pub fn custom_actions(&self) -> impl Iterator<Item = (&str, bool)> {
        self.custom_payloads.iter().map(|(n, p)| (n.as_str(), *p))
    }

    /// Whether an action consumes a request payload on this controller.
    pub fn accepts_payload(&self, action: &Action) -> bool {
        action.has_request_payload().unwrap_or_else(|| {
            self.custom_payloads
                .get(action.name())
                .copied()
                .unwrap_or(false)
        })
    }

    /// The read schema shaping this action's response.
    pub fn response_schema(&self, action: &Action) -> Result<&S, ResolveError> {
        self.schemas.resolve(action, Direction::Read)
    }

    /// The write schema for this action's payload, or `None` if the action
    /// takes no payload.
    pub fn request_schema(&self, action: &Action) -> Result<Option<&S>, ResolveError> {
        if self.accepts_payload(action) {
            self.schemas.resolve(action, Direction::Write).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Both schemas for one invocation: write (if any) resolved first, then
    /// read, matching the order a request handler needs them in.
    pub fn action_schemas(&self, action: &Action) -> Result<ActionSchemas<'_, S>, ResolveError> {
        let request = self.request_schema(action)?;
        let response = self.response_schema(action)?;
        Ok(ActionSchemas { request, response })
    }
}
