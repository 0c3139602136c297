//! Payload validation against resolved schemas.

use serde_json::Value;

use crate::config::SchemaSet;
use crate::error::{ResolveError, SchemaError, ValidateError};
use crate::types::{Action, Direction};

/// Validate a payload against the schema resolved for an action/direction.
///
/// This is the runtime half of the controller contract: resolve the write
/// schema for the incoming payload (or the read schema for an outgoing
/// body), then check the document against it.
///
/// # Errors
///
/// Returns `ValidateError::Resolve` if no schema resolves, or
/// `ValidateError::Invalid` if the payload doesn't match the schema.
pub fn validate(
    schemas: &SchemaSet<Value>,
    payload: &Value,
    action: &Action,
    direction: Direction,
) -> Result<(), ValidateError> {
    let schema = schemas.resolve(action, direction)?;
    validate_against_schema(schema, payload)
}

/// Validate a payload against an already-resolved schema.
///
/// Use this when the same schema applies to many payloads.
pub fn validate_against_schema(schema: &Value, payload: &Value) -> Result<(), ValidateError> {
    let validator = jsonschema::validator_for(schema).map_err(|e| {
        ValidateError::Resolve(ResolveError::InvalidSchema {
            message: e.to_string(),
        })
    })?;

    let errors: Vec<SchemaError> = validator
        .iter_errors(payload)
        .map(|e| SchemaError {
            path: e.instance_path.to_string(),
            message: e.to_string(),
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidateError::Invalid { errors })
    }
}
