//! Action Schema Resolver
//!
//! Per-action, per-direction schema selection for REST-style controllers.
//!
//! A controller exposes logical actions (list, retrieve, create, update,
//! partial_update, delete, plus custom routed actions) and uses schemas in
//! two directions: `write` to interpret incoming payloads and `read` to
//! shape responses. This library resolves which configured schema governs a
//! given (action, direction) pair, falling back through four precedence
//! levels and failing loudly when nothing is configured.
//!
//! # Example
//!
//! ```
//! use action_schema::{Action, Direction, SchemaSet};
//!
//! let schemas = SchemaSet::builder()
//!     .fallback("detail-schema")
//!     .for_direction(Direction::Write, "write-schema")
//!     .for_action_direction("list", Direction::Read, "list-schema")
//!     .build();
//!
//! // Most specific configured level wins:
//! assert_eq!(schemas.resolve(&Action::List, Direction::Read).unwrap(), &"list-schema");
//! assert_eq!(schemas.resolve(&Action::Create, Direction::Write).unwrap(), &"write-schema");
//! assert_eq!(schemas.resolve(&Action::Retrieve, Direction::Read).unwrap(), &"detail-schema");
//! ```
//!
//! # Precedence
//!
//! | Level | Attribute key | Scope |
//! |-------|---------------|-------|
//! | 1 | `<action>_<direction>_serializer_class` | exact action + direction |
//! | 2 | `<action>_serializer_class` | exact action, both directions |
//! | 3 | `<direction>_serializer_class` | exact direction, every action |
//! | 4 | `serializer_class` | global fallback |
//!
//! Write-style actions (create, update, partial_update, payload-taking
//! customs) resolve twice per request: write for the payload, read for the
//! response. See [`Controller::action_schemas`].

mod config;
mod controller;
mod error;
mod inspect;
mod loader;
mod resolver;
mod types;
mod validator;

pub use config::{SchemaSet, SchemaSetBuilder};
pub use controller::{ActionSchemas, Controller};
pub use error::{ResolveError, SchemaError, ValidateError};
pub use inspect::{crud_routes, ApiInspector, HttpMethod, OperationDoc, Route, SchemaLookup};
pub use loader::{load_config, load_config_str, load_json};
pub use resolver::Resolution;
pub use types::{Action, Direction, SchemaKey, DEFAULT_ATTRIBUTE, STANDARD_ACTIONS};
pub use validator::{validate, validate_against_schema};

#[cfg(feature = "remote")]
pub use loader::load_json_url;
