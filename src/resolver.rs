//! Schema resolution - picks the single most specific configured schema for
//! an (action, direction) pair.
//!
//! Precedence, most to least specific:
//!
//! 1. `<action>_<direction>_serializer_class`
//! 2. `<action>_serializer_class`
//! 3. `<direction>_serializer_class`
//! 4. `serializer_class`
//!
//! The first configured level wins; ties cannot occur because each level is
//! tried exactly once. Level 2 beats level 3 for custom actions exactly as
//! for CRUD actions: the action qualifier is considered more specific than
//! the direction qualifier.

use crate::config::SchemaSet;
use crate::error::ResolveError;
use crate::types::{Action, Direction, SchemaKey};

/// A successful resolution: the winning key and the configured schema.
///
/// The key records provenance, which the inspector and CLI surface so a
/// misbehaving override is easy to track down.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Resolution<'a, S> {
    /// The attribute key that won.
    pub key: SchemaKey,
    /// The schema configured under that key.
    pub schema: &'a S,
}

impl<'a, S> Resolution<'a, S> {
    fn new(key: SchemaKey, schema: &'a S) -> Self {
        Resolution { key, schema }
    }
}

impl<S> SchemaSet<S> {
    /// Resolve the schema for an action and direction.
    ///
    /// Deterministic and side-effect-free: identical inputs against the same
    /// set always return the same reference.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Misconfigured`] when no precedence level has a
    /// configured schema. That is a controller-definition defect and must
    /// abort request handling; callers must not substitute a default.
    pub fn resolve(&self, action: &Action, direction: Direction) -> Result<&S, ResolveError> {
        self.resolve_entry(action, direction).map(|r| r.schema)
    }

    /// Like [`resolve`](Self::resolve), but also reports which attribute key
    /// won.
    pub fn resolve_entry(
        &self,
        action: &Action,
        direction: Direction,
    ) -> Result<Resolution<'_, S>, ResolveError> {
        let candidates = SchemaKey::candidates(action, direction);
        for key in candidates {
            if let Some(schema) = self.get(&key) {
                return Ok(Resolution::new(key, schema));
            }
        }
        Err(ResolveError::Misconfigured {
            action: action.name().to_string(),
            direction,
            tried: SchemaKey::candidates(action, direction)
                .iter()
                .map(SchemaKey::attribute)
                .collect(),
        })
    }
}
