//! Loading controller configuration and schema documents.
//!
//! A configuration file is a JSON object whose keys are attribute names from
//! the resolver grammar and whose values are either inline JSON Schemas, or
//! strings naming a schema source: a file path (relative to the config file)
//! or, with the `remote` feature, an `http(s)://` URL.

use std::path::Path;

use serde_json::Value;

use crate::config::SchemaSet;
use crate::error::ResolveError;
use crate::types::{json_type_name, SchemaKey};

#[cfg(feature = "remote")]
use std::time::Duration;

/// Default timeout for HTTP requests (10 seconds).
#[cfg(feature = "remote")]
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Load a JSON document from a file path.
///
/// # Errors
///
/// Returns `ResolveError::FileNotFound` if the file doesn't exist,
/// or `ResolveError::InvalidJson` if the file isn't valid JSON.
pub fn load_json(path: &Path) -> Result<Value, ResolveError> {
    if !path.exists() {
        return Err(ResolveError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| ResolveError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ResolveError::InvalidJson { source })
}

/// Load a JSON document from an HTTP/HTTPS URL.
///
/// Requires the `remote` feature (enabled by default).
///
/// # Errors
///
/// Returns `ResolveError::NetworkError` if the request fails,
/// or `ResolveError::InvalidJson` if the response isn't valid JSON.
#[cfg(feature = "remote")]
pub fn load_json_url(url: &str) -> Result<Value, ResolveError> {
    let network_error = |source| ResolveError::NetworkError {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(network_error)?;

    let text = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .map_err(network_error)?;

    serde_json::from_str(&text).map_err(|source| ResolveError::InvalidJson { source })
}

pub(crate) fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Load a controller configuration file into a [`SchemaSet`].
///
/// Relative schema paths are resolved against the config file's directory.
///
/// # Errors
///
/// Returns `ResolveError::UnknownAttribute` for keys outside the grammar and
/// `ResolveError::InvalidAttributeValue` for values that are neither schema
/// objects nor source strings, plus the usual IO/JSON errors.
pub fn load_config(path: &Path) -> Result<SchemaSet<Value>, ResolveError> {
    let document = load_json(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    build_config(&document, base_dir)
}

/// Parse a configuration document from a string.
///
/// `base_dir` anchors relative schema paths.
pub fn load_config_str(content: &str, base_dir: &Path) -> Result<SchemaSet<Value>, ResolveError> {
    let document: Value =
        serde_json::from_str(content).map_err(|source| ResolveError::InvalidJson { source })?;
    build_config(&document, base_dir)
}

fn build_config(document: &Value, base_dir: &Path) -> Result<SchemaSet<Value>, ResolveError> {
    let Some(map) = document.as_object() else {
        return Err(ResolveError::InvalidConfig {
            actual: json_type_name(document),
        });
    };

    let mut builder = SchemaSet::builder();
    for (attribute, value) in map {
        let key = SchemaKey::parse(attribute).ok_or_else(|| ResolveError::UnknownAttribute {
            attribute: attribute.clone(),
        })?;

        let schema = match value {
            Value::Object(_) | Value::Bool(_) => value.clone(),
            Value::String(source) => load_schema_source(source, base_dir)?,
            other => {
                return Err(ResolveError::InvalidAttributeValue {
                    attribute: attribute.clone(),
                    actual: json_type_name(other),
                })
            }
        };
        builder = builder.entry(key, schema);
    }

    Ok(builder.build())
}

fn load_schema_source(source: &str, base_dir: &Path) -> Result<Value, ResolveError> {
    if is_url(source) {
        #[cfg(feature = "remote")]
        {
            return load_json_url(source);
        }
        #[cfg(not(feature = "remote"))]
        {
            return Err(ResolveError::RemoteDisabled {
                url: source.to_string(),
            });
        }
    }
    load_json(&base_dir.join(source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Action, Direction};
    use serde_json::json;

    #[test]
    fn load_json_missing_file() {
        let result = load_json(Path::new("does-not-exist.json"));
        assert!(matches!(result, Err(ResolveError::FileNotFound { .. })));
    }

    #[test]
    fn config_with_inline_schemas() {
        let content = r#"{
            "serializer_class": { "type": "object" },
            "create_write_serializer_class": {
                "type": "object",
                "required": ["name"],
                "properties": { "name": { "type": "string" } }
            }
        }"#;
        let set = load_config_str(content, Path::new(".")).unwrap();

        let schema = set.resolve(&Action::Create, Direction::Write).unwrap();
        assert_eq!(schema["required"], json!(["name"]));
        let schema = set.resolve(&Action::Create, Direction::Read).unwrap();
        assert_eq!(schema, &json!({ "type": "object" }));
    }

    #[test]
    fn config_with_file_reference() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("list.json"),
            r#"{ "type": "array", "items": { "type": "object" } }"#,
        )
        .unwrap();

        let content = r#"{ "list_serializer_class": "list.json" }"#;
        let set = load_config_str(content, dir.path()).unwrap();

        let schema = set.resolve(&Action::List, Direction::Read).unwrap();
        assert_eq!(schema["type"], "array");
    }

    #[test]
    fn config_rejects_unknown_attribute() {
        let content = r#"{ "pagination_class": {} }"#;
        let err = load_config_str(content, Path::new(".")).unwrap_err();
        match err {
            ResolveError::UnknownAttribute { attribute } => {
                assert_eq!(attribute, "pagination_class");
            }
            other => panic!("expected UnknownAttribute, got {other:?}"),
        }
    }

    #[test]
    fn config_rejects_non_schema_value() {
        let content = r#"{ "serializer_class": 42 }"#;
        let err = load_config_str(content, Path::new(".")).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::InvalidAttributeValue { actual: "number", .. }
        ));
    }

    #[test]
    fn config_must_be_an_object() {
        let err = load_config_str("[]", Path::new(".")).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::InvalidConfig { actual: "array" }
        ));
    }
}
