//! Core types for action schema resolution.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Attribute suffix shared by every key in the configuration grammar.
pub const ATTRIBUTE_SUFFIX: &str = "_serializer_class";

/// The direction-agnostic, action-agnostic fallback attribute.
pub const DEFAULT_ATTRIBUTE: &str = "serializer_class";

/// Standard CRUD-style action names, in route-table order.
pub const STANDARD_ACTIONS: &[&str] = &[
    "list",
    "create",
    "retrieve",
    "update",
    "partial_update",
    "delete",
];

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Whether a schema interprets incoming data or shapes outgoing data.
///
/// Determines the `read`/`write` fragment of constructed attribute keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Serializing output data (responses).
    Read,
    /// Deserializing and validating input data (request payloads).
    Write,
}

impl Direction {
    /// Returns the attribute-key fragment for this direction.
    pub fn key_fragment(&self) -> &'static str {
        match self {
            Direction::Read => "read",
            Direction::Write => "write",
        }
    }

    /// Create a direction from a write flag (true = Write, false = Read).
    pub fn from_write_flag(is_write: bool) -> Self {
        if is_write {
            Direction::Write
        } else {
            Direction::Read
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key_fragment())
    }
}

/// A logical operation exposed by a controller.
///
/// Standard CRUD-style actions get variants; anything else routed by the host
/// (e.g. a custom detail route) is `Custom`. Action names participate in key
/// construction verbatim: no case folding or synonym matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    List,
    Retrieve,
    Create,
    Update,
    PartialUpdate,
    Delete,
    Custom(String),
}

impl Action {
    /// Parse an action name. Unknown names become `Custom`.
    pub fn parse(name: &str) -> Self {
        match name {
            "list" => Action::List,
            "retrieve" => Action::Retrieve,
            "create" => Action::Create,
            "update" => Action::Update,
            "partial_update" => Action::PartialUpdate,
            "delete" => Action::Delete,
            other => Action::Custom(other.to_string()),
        }
    }

    /// The name used in attribute-key construction.
    pub fn name(&self) -> &str {
        match self {
            Action::List => "list",
            Action::Retrieve => "retrieve",
            Action::Create => "create",
            Action::Update => "update",
            Action::PartialUpdate => "partial_update",
            Action::Delete => "delete",
            Action::Custom(name) => name,
        }
    }

    /// Whether this action consumes a request payload.
    ///
    /// `None` for custom actions: payload-ness of a custom route is only
    /// known to the controller that registered it.
    pub fn has_request_payload(&self) -> Option<bool> {
        match self {
            Action::Create | Action::Update | Action::PartialUpdate => Some(true),
            Action::List | Action::Retrieve | Action::Delete => Some(false),
            Action::Custom(_) => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for Action {
    fn from(name: &str) -> Self {
        Action::parse(name)
    }
}

impl From<String> for Action {
    fn from(name: String) -> Self {
        Action::parse(&name)
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// One shape of the attribute-key grammar, from most to least specific:
///
/// 1. `<action>_<direction>_serializer_class`
/// 2. `<action>_serializer_class`
/// 3. `<direction>_serializer_class`
/// 4. `serializer_class`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SchemaKey {
    /// Exact action and exact direction.
    ActionDirection { action: String, direction: Direction },
    /// Exact action, either direction.
    Action { action: String },
    /// Exact direction, any action.
    Direction(Direction),
    /// Global fallback.
    Default,
}

impl SchemaKey {
    /// Render the attribute name this key corresponds to.
    pub fn attribute(&self) -> String {
        match self {
            SchemaKey::ActionDirection { action, direction } => {
                format!("{action}_{}{ATTRIBUTE_SUFFIX}", direction.key_fragment())
            }
            SchemaKey::Action { action } => format!("{action}{ATTRIBUTE_SUFFIX}"),
            SchemaKey::Direction(direction) => {
                format!("{}{ATTRIBUTE_SUFFIX}", direction.key_fragment())
            }
            SchemaKey::Default => DEFAULT_ATTRIBUTE.to_string(),
        }
    }

    /// Parse an attribute name into a key shape.
    ///
    /// Returns `None` for names outside the grammar. Parsing mirrors key
    /// construction: a trailing `_read`/`_write` segment binds to the
    /// direction, so an action literally named `mark_read` cannot be
    /// expressed as an action-only key (same ambiguity the grammar itself
    /// carries).
    pub fn parse(attribute: &str) -> Option<Self> {
        if attribute == DEFAULT_ATTRIBUTE {
            return Some(SchemaKey::Default);
        }
        let rest = attribute.strip_suffix(ATTRIBUTE_SUFFIX)?;
        if rest.is_empty() {
            return None;
        }
        match rest {
            "read" => return Some(SchemaKey::Direction(Direction::Read)),
            "write" => return Some(SchemaKey::Direction(Direction::Write)),
            _ => {}
        }
        if let Some(action) = rest.strip_suffix("_read") {
            if !action.is_empty() {
                return Some(SchemaKey::ActionDirection {
                    action: action.to_string(),
                    direction: Direction::Read,
                });
            }
        }
        if let Some(action) = rest.strip_suffix("_write") {
            if !action.is_empty() {
                return Some(SchemaKey::ActionDirection {
                    action: action.to_string(),
                    direction: Direction::Write,
                });
            }
        }
        Some(SchemaKey::Action {
            action: rest.to_string(),
        })
    }

    /// The four candidate keys for a resolution request, in precedence order.
    pub fn candidates(action: &Action, direction: Direction) -> [SchemaKey; 4] {
        [
            SchemaKey::ActionDirection {
                action: action.name().to_string(),
                direction,
            },
            SchemaKey::Action {
                action: action.name().to_string(),
            },
            SchemaKey::Direction(direction),
            SchemaKey::Default,
        ]
    }
}

impl fmt::Display for SchemaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.attribute())
    }
}

impl Serialize for SchemaKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.attribute())
    }
}
