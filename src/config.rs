//! The per-controller configuration set: schema overrides keyed by the
//! attribute grammar.
//!
//! A [`SchemaSet`] is built once, at controller definition time, and is
//! immutable afterwards. Resolution (see [`crate::resolver`]) is then a pure
//! function of the set, an action, and a direction, so concurrent lookups
//! need no synchronization.

use std::collections::BTreeMap;

use crate::types::{Direction, SchemaKey};

/// Per-action overrides: exact read, exact write, and direction-agnostic.
#[derive(Debug, Clone)]
struct ActionEntry<S> {
    read: Option<S>,
    write: Option<S>,
    any: Option<S>,
}

impl<S> Default for ActionEntry<S> {
    fn default() -> Self {
        ActionEntry {
            read: None,
            write: None,
            any: None,
        }
    }
}

/// The static schema configuration of one controller.
///
/// Holds at most one schema per key shape: exact action+direction entries,
/// action-wide entries, direction-wide entries, and a global fallback. The
/// generic parameter `S` is whatever the host treats as a schema class
/// reference (a JSON Schema [`serde_json::Value`] for the CLI, any type for
/// library embedders).
#[derive(Debug, Clone)]
pub struct SchemaSet<S> {
    actions: BTreeMap<String, ActionEntry<S>>,
    read: Option<S>,
    write: Option<S>,
    default: Option<S>,
}

impl<S> Default for SchemaSet<S> {
    fn default() -> Self {
        SchemaSet {
            actions: BTreeMap::new(),
            read: None,
            write: None,
            default: None,
        }
    }
}

impl<S> SchemaSet<S> {
    /// Start building a schema set.
    pub fn builder() -> SchemaSetBuilder<S> {
        SchemaSetBuilder {
            set: SchemaSet::default(),
        }
    }

    /// Look up the schema configured under exactly this key, if any.
    pub fn get(&self, key: &SchemaKey) -> Option<&S> {
        match key {
            SchemaKey::ActionDirection { action, direction } => {
                self.actions.get(action).and_then(|e| match direction {
                    Direction::Read => e.read.as_ref(),
                    Direction::Write => e.write.as_ref(),
                })
            }
            SchemaKey::Action { action } => self.actions.get(action).and_then(|e| e.any.as_ref()),
            SchemaKey::Direction(Direction::Read) => self.read.as_ref(),
            SchemaKey::Direction(Direction::Write) => self.write.as_ref(),
            SchemaKey::Default => self.default.as_ref(),
        }
    }

    /// Whether no schema is configured at all.
    pub fn is_empty(&self) -> bool {
        self.default.is_none()
            && self.read.is_none()
            && self.write.is_none()
            && self
                .actions
                .values()
                .all(|e| e.read.is_none() && e.write.is_none() && e.any.is_none())
    }

    /// Every configured key, action entries first, in deterministic order.
    pub fn keys(&self) -> Vec<SchemaKey> {
        let mut keys = Vec::new();
        for (action, entry) in &self.actions {
            if entry.read.is_some() {
                keys.push(SchemaKey::ActionDirection {
                    action: action.clone(),
                    direction: Direction::Read,
                });
            }
            if entry.write.is_some() {
                keys.push(SchemaKey::ActionDirection {
                    action: action.clone(),
                    direction: Direction::Write,
                });
            }
            if entry.any.is_some() {
                keys.push(SchemaKey::Action {
                    action: action.clone(),
                });
            }
        }
        if self.read.is_some() {
            keys.push(SchemaKey::Direction(Direction::Read));
        }
        if self.write.is_some() {
            keys.push(SchemaKey::Direction(Direction::Write));
        }
        if self.default.is_some() {
            keys.push(SchemaKey::Default);
        }
        keys
    }

    fn insert(&mut self, key: SchemaKey, schema: S) {
        match key {
            SchemaKey::ActionDirection { action, direction } => {
                let entry = self.actions.entry(action).or_default();
                match direction {
                    Direction::Read => entry.read = Some(schema),
                    Direction::Write => entry.write = Some(schema),
                }
            }
            SchemaKey::Action { action } => {
                self.actions.entry(action).or_default().any = Some(schema);
            }
            SchemaKey::Direction(Direction::Read) => self.read = Some(schema),
            SchemaKey::Direction(Direction::Write) => self.write = Some(schema),
            SchemaKey::Default => self.default = Some(schema),
        }
    }
}

/// Builder for [`SchemaSet`]. Later entries for the same key replace earlier
/// ones; once [`build`](SchemaSetBuilder::build) returns, the set is frozen.
#[derive(Debug, Clone)]
pub struct SchemaSetBuilder<S> {
    set: SchemaSet<S>,
}

impl<S> SchemaSetBuilder<S> {
    /// The global fallback (`serializer_class`).
    pub fn fallback(mut self, schema: S) -> Self {
        self.set.insert(SchemaKey::Default, schema);
        self
    }

    /// A direction-wide schema (`<direction>_serializer_class`).
    pub fn for_direction(mut self, direction: Direction, schema: S) -> Self {
        self.set.insert(SchemaKey::Direction(direction), schema);
        self
    }

    /// An action-wide schema (`<action>_serializer_class`), both directions.
    pub fn for_action(mut self, action: impl Into<crate::types::Action>, schema: S) -> Self {
        self.set.insert(
            SchemaKey::Action {
                action: action.into().name().to_string(),
            },
            schema,
        );
        self
    }

    /// An exact action+direction schema
    /// (`<action>_<direction>_serializer_class`).
    pub fn for_action_direction(
        mut self,
        action: impl Into<crate::types::Action>,
        direction: Direction,
        schema: S,
    ) -> Self {
        self.set.insert(
            SchemaKey::ActionDirection {
                action: action.into().name().to_string(),
                direction,
            },
            schema,
        );
        self
    }

    /// Insert under an already-constructed key (used by the config loader).
    pub fn entry(mut self, key: SchemaKey, schema: S) -> Self {
        self.set.insert(key, schema);
        self
    }

    /// Freeze the set.
    pub fn build(self) -> SchemaSet<S> {
        self.set
    }
}
