//! Integration tests for schema resolution and the collaborator seams.

use std::path::Path;

use action_schema::{
    load_config_str, validate, Action, ApiInspector, Controller, Direction, HttpMethod,
    ResolveError, Route, SchemaSet, ValidateError,
};
use serde_json::json;

// === Precedence Tests ===

mod precedence {
    use super::*;

    #[test]
    fn global_fallback_covers_all_actions_and_directions() {
        let set = SchemaSet::builder().fallback("base").build();

        for name in ["list", "retrieve", "create", "update", "partial_update", "delete", "export"] {
            let action = Action::parse(name);
            assert_eq!(set.resolve(&action, Direction::Read).unwrap(), &"base");
            assert_eq!(set.resolve(&action, Direction::Write).unwrap(), &"base");
        }
    }

    #[test]
    fn direction_entry_overrides_fallback_for_its_direction_only() {
        let set = SchemaSet::builder()
            .fallback("base")
            .for_direction(Direction::Read, "read")
            .build();

        for name in ["list", "create", "export"] {
            let action = Action::parse(name);
            assert_eq!(set.resolve(&action, Direction::Read).unwrap(), &"read");
            assert_eq!(set.resolve(&action, Direction::Write).unwrap(), &"base");
        }
    }

    #[test]
    fn action_entry_overrides_direction_entry_for_that_action() {
        let set = SchemaSet::builder()
            .fallback("base")
            .for_direction(Direction::Read, "read")
            .for_action("retrieve", "detail")
            .build();

        assert_eq!(set.resolve(&Action::Retrieve, Direction::Read).unwrap(), &"detail");
        assert_eq!(set.resolve(&Action::Retrieve, Direction::Write).unwrap(), &"detail");
        // Unrelated actions keep the broader entries.
        assert_eq!(set.resolve(&Action::List, Direction::Read).unwrap(), &"read");
        assert_eq!(set.resolve(&Action::List, Direction::Write).unwrap(), &"base");
    }

    #[test]
    fn exact_entry_wins_for_its_pair_only() {
        let set = SchemaSet::builder()
            .fallback("base")
            .for_direction(Direction::Write, "write")
            .for_action("update", "update-any")
            .for_action_direction("update", Direction::Write, "update-write")
            .build();

        assert_eq!(set.resolve(&Action::Update, Direction::Write).unwrap(), &"update-write");
        assert_eq!(set.resolve(&Action::Update, Direction::Read).unwrap(), &"update-any");
        assert_eq!(set.resolve(&Action::Create, Direction::Write).unwrap(), &"write");
        assert_eq!(set.resolve(&Action::Create, Direction::Read).unwrap(), &"base");
    }

    #[test]
    fn custom_actions_use_the_same_grammar() {
        let set = SchemaSet::builder()
            .for_direction(Direction::Read, "read")
            .for_action("uppercase", "uppercase-any")
            .for_action_direction("archive", Direction::Write, "archive-write")
            .build();

        let uppercase = Action::Custom("uppercase".into());
        let archive = Action::Custom("archive".into());

        // Action qualifier beats direction qualifier for customs too.
        assert_eq!(set.resolve(&uppercase, Direction::Read).unwrap(), &"uppercase-any");
        assert_eq!(set.resolve(&archive, Direction::Write).unwrap(), &"archive-write");
        assert_eq!(set.resolve(&archive, Direction::Read).unwrap(), &"read");
    }

    #[test]
    fn repeated_resolution_returns_identical_reference() {
        let set = SchemaSet::builder()
            .fallback(json!({ "type": "object" }))
            .build();

        let first = set.resolve(&Action::Create, Direction::Write).unwrap();
        let second = set.resolve(&Action::Create, Direction::Write).unwrap();
        assert!(std::ptr::eq(first, second));
    }
}

// === Failure Tests ===

mod misconfiguration {
    use super::*;

    #[test]
    fn empty_configuration_fails_for_every_pair() {
        let set: SchemaSet<&str> = SchemaSet::builder().build();

        for name in ["list", "create", "export"] {
            let action = Action::parse(name);
            for direction in [Direction::Read, Direction::Write] {
                let err = set.resolve(&action, direction).unwrap_err();
                assert!(matches!(err, ResolveError::Misconfigured { .. }));
            }
        }
    }

    #[test]
    fn diagnostic_names_the_missing_attributes() {
        let set: SchemaSet<&str> = SchemaSet::builder().build();
        let err = set
            .resolve(&Action::PartialUpdate, Direction::Write)
            .unwrap_err();
        let msg = err.to_string();

        assert!(msg.contains("\"partial_update\""));
        assert!(msg.contains("(write)"));
        assert!(msg.contains("partial_update_write_serializer_class"));
        assert!(msg.contains("partial_update_serializer_class"));
        assert!(msg.contains("write_serializer_class"));
    }

    #[test]
    fn no_silent_defaulting_across_directions() {
        // A write-only configuration must not leak into read resolution.
        let set = SchemaSet::builder()
            .for_direction(Direction::Write, "write")
            .build();

        assert!(set.resolve(&Action::Create, Direction::Write).is_ok());
        let err = set.resolve(&Action::Create, Direction::Read).unwrap_err();
        assert!(matches!(err, ResolveError::Misconfigured { .. }));
    }
}

// === End-to-End Scenario ===

#[test]
fn mixed_controller_scenario() {
    let set = SchemaSet::builder()
        .for_action_direction("list", Direction::Read, "ListS")
        .for_action_direction("retrieve", Direction::Read, "DetailS")
        .for_action_direction("create", Direction::Write, "WriteS")
        .for_action_direction("create", Direction::Read, "ListS")
        .build();

    assert_eq!(set.resolve(&Action::List, Direction::Read).unwrap(), &"ListS");
    assert_eq!(set.resolve(&Action::Retrieve, Direction::Read).unwrap(), &"DetailS");
    assert_eq!(set.resolve(&Action::Create, Direction::Write).unwrap(), &"WriteS");
    assert_eq!(set.resolve(&Action::Create, Direction::Read).unwrap(), &"ListS");

    // update/write has no entry at any level.
    let err = set.resolve(&Action::Update, Direction::Write).unwrap_err();
    assert!(matches!(err, ResolveError::Misconfigured { .. }));
}

// === Controller Contract ===

mod controller_contract {
    use super::*;

    fn controller() -> Controller<&'static str> {
        let set = SchemaSet::builder()
            .fallback("detail")
            .for_direction(Direction::Write, "write")
            .for_action_direction("create", Direction::Read, "created")
            .build();
        Controller::new("things", set).with_custom_action("archive", true)
    }

    #[test]
    fn create_resolves_write_then_read_independently() {
        let controller = controller();
        let schemas = controller.action_schemas(&Action::Create).unwrap();
        assert_eq!(schemas.request, Some(&"write"));
        assert_eq!(schemas.response, &"created");
    }

    #[test]
    fn payload_free_actions_resolve_read_only() {
        let controller = controller();
        for action in [Action::List, Action::Retrieve, Action::Delete] {
            let schemas = controller.action_schemas(&action).unwrap();
            assert_eq!(schemas.request, None);
            assert_eq!(schemas.response, &"detail");
        }
    }

    #[test]
    fn custom_payload_action_follows_registration() {
        let controller = controller();
        let archive = Action::Custom("archive".into());
        let schemas = controller.action_schemas(&archive).unwrap();
        assert_eq!(schemas.request, Some(&"write"));

        let unregistered = Action::Custom("uppercase".into());
        let schemas = controller.action_schemas(&unregistered).unwrap();
        assert_eq!(schemas.request, None);
    }
}

// === Documentation Collaborator ===

mod inspection {
    use super::*;

    #[test]
    fn full_resource_documentation_without_requests() {
        let set = SchemaSet::builder()
            .fallback("detail")
            .for_action_direction("list", Direction::Read, "list")
            .for_direction(Direction::Write, "write")
            .build();
        let controller = Controller::new("things", set);

        let mut inspector = ApiInspector::new();
        inspector.register_resource("/things", &controller);
        inspector.register_route(
            Route::new(HttpMethod::Get, "/things/{id}/uppercase", "uppercase"),
            &controller,
        );

        let docs = inspector.operations().unwrap();
        assert_eq!(docs.len(), 7);

        let by_action: Vec<(&str, bool, String)> = docs
            .iter()
            .map(|d| {
                (
                    d.action.name(),
                    d.request.is_some(),
                    d.response.key.attribute(),
                )
            })
            .collect();

        assert_eq!(
            by_action,
            [
                ("list", false, "list_read_serializer_class".to_string()),
                ("create", true, "serializer_class".to_string()),
                ("retrieve", false, "serializer_class".to_string()),
                ("update", true, "serializer_class".to_string()),
                ("partial_update", true, "serializer_class".to_string()),
                ("delete", false, "serializer_class".to_string()),
                ("uppercase", false, "serializer_class".to_string()),
            ]
        );
    }

    #[test]
    fn docs_generation_surfaces_misconfiguration() {
        let set = SchemaSet::builder()
            .for_direction(Direction::Read, "read")
            .build();
        let controller = Controller::new("things", set);

        let mut inspector = ApiInspector::new();
        inspector.register_resource("/things", &controller);

        // create needs a write schema and none is configured.
        let err = inspector.operations().unwrap_err();
        match err {
            ResolveError::Misconfigured { action, direction, .. } => {
                assert_eq!(action, "create");
                assert_eq!(direction, Direction::Write);
            }
            other => panic!("expected Misconfigured, got {other:?}"),
        }
    }
}

// === Config Loading + Validation ===

mod config_and_validation {
    use super::*;

    const CONFIG: &str = r#"{
        "serializer_class": {
            "type": "object",
            "properties": {
                "id": { "type": "integer" },
                "name": { "type": "string" }
            }
        },
        "create_write_serializer_class": {
            "type": "object",
            "required": ["name"],
            "properties": { "name": { "type": "string" } }
        }
    }"#;

    #[test]
    fn loaded_config_resolves_like_a_built_set() {
        let set = load_config_str(CONFIG, Path::new(".")).unwrap();

        let schema = set.resolve(&Action::Create, Direction::Write).unwrap();
        assert_eq!(schema["required"], json!(["name"]));

        let schema = set.resolve(&Action::List, Direction::Read).unwrap();
        assert!(schema["properties"]["id"].is_object());
    }

    #[test]
    fn validate_payload_through_resolution() {
        let set = load_config_str(CONFIG, Path::new(".")).unwrap();

        assert!(validate(
            &set,
            &json!({ "name": "thing" }),
            &Action::Create,
            Direction::Write
        )
        .is_ok());

        let err = validate(&set, &json!({}), &Action::Create, Direction::Write).unwrap_err();
        match err {
            ValidateError::Invalid { errors } => {
                assert_eq!(errors.len(), 1);
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }
}
