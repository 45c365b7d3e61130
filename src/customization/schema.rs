// ABOUTME: JSON Schema (draft-04) for Ext JS component configs added as generic widgets
// ABOUTME: Compiled once per process; validation reports every violation with its location
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 KE-chain Client Contributors

use jsonschema::{Draft, JSONSchema};
use kechain_core::enums::ComponentXType;
use kechain_core::{KechainError, KechainResult};
use serde_json::{json, Value};
use std::sync::OnceLock;
use tracing::debug;

/// Canonical textual UUID: 8-4-4-4-12 hexadecimal groups
const UUID_PATTERN: &str =
    "^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$";

static COMPONENT_VALIDATOR: OnceLock<Result<ComponentValidator, String>> = OnceLock::new();

/// The component schema as a JSON document
#[must_use]
pub fn component_schema() -> Value {
    let uuid_string = json!({ "type": "string", "pattern": UUID_PATTERN });
    json!({
        "$schema": "http://json-schema.org/draft-04/schema#",
        "title": "Component JSON Schema",
        "type": "object",
        "properties": {
            "xtype": {
                "type": "string",
                "enum": ComponentXType::values()
            },
            "filter": {
                "type": "object",
                "properties": {
                    "part": uuid_string,
                    "model": uuid_string,
                    "parent": uuid_string,
                    "part_id": uuid_string,
                    "model_id": uuid_string,
                    "parent_id": uuid_string
                }
            },
            "title": { "type": ["string", "null"] },
            "viewModel": { "type": "object" },
            "model": uuid_string,
            "parent": uuid_string
        },
        "required": ["xtype"]
    })
}

/// Validates Ext JS component configs against [`component_schema`]
pub struct ComponentValidator {
    compiled: JSONSchema,
}

impl ComponentValidator {
    /// Compile the component schema
    ///
    /// # Errors
    ///
    /// Returns [`KechainError::Config`] if the schema does not compile
    pub fn new() -> KechainResult<Self> {
        let schema = component_schema();
        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft4)
            .compile(&schema)
            .map_err(|e| KechainError::config(format!("component schema does not compile: {e}")))?;
        Ok(Self { compiled })
    }

    /// Process-wide validator, compiled on first use
    ///
    /// # Errors
    ///
    /// Returns [`KechainError::Config`] if the schema does not compile
    pub fn shared() -> KechainResult<&'static Self> {
        COMPONENT_VALIDATOR
            .get_or_init(|| Self::new().map_err(|e| e.to_string()))
            .as_ref()
            .map_err(|message| KechainError::config(message.clone()))
    }

    /// Check `config`, collecting every violation
    ///
    /// # Errors
    ///
    /// Returns [`KechainError::Validation`] listing each violation and where it occurred
    pub fn validate(&self, config: &Value) -> KechainResult<()> {
        if let Err(errors) = self.compiled.validate(config) {
            let messages: Vec<String> = errors
                .map(|e| {
                    let path = e.instance_path.to_string();
                    if path.is_empty() {
                        e.to_string()
                    } else {
                        format!("{e} at {path}")
                    }
                })
                .collect();
            debug!(violations = messages.len(), "Component config rejected by schema");
            return Err(KechainError::validation(messages));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(config: &Value) -> KechainResult<()> {
        ComponentValidator::shared().unwrap().validate(config)
    }

    #[test]
    fn test_every_xtype_is_accepted() {
        for xtype in ComponentXType::values() {
            assert!(validate(&json!({ "xtype": xtype })).is_ok(), "{xtype}");
        }
    }

    #[test]
    fn test_xtype_is_required_and_closed() {
        assert!(validate(&json!({ "title": "No type" })).is_err());
        assert!(validate(&json!({ "xtype": "notARealType" })).is_err());
        assert!(validate(&json!({ "xtype": 3 })).is_err());
    }

    #[test]
    fn test_filter_ids_must_be_uuids() {
        let good = json!({
            "xtype": "superGrid",
            "filter": {
                "parent": "e5106946-40f7-4b49-ae5e-421450857911",
                "model_id": "EDC8EBA0-47C5-415D-8727-6D927543EE3B"
            }
        });
        assert!(validate(&good).is_ok());

        let bad = json!({ "xtype": "superGrid", "filter": { "part": "not-a-uuid" } });
        let messages = match validate(&bad) {
            Err(KechainError::Validation { errors }) => errors,
            other => unreachable!("expected a validation error, got {other:?}"),
        };
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("/filter/part"), "{}", messages[0]);
    }

    #[test]
    fn test_title_and_view_model_types() {
        assert!(validate(&json!({ "xtype": "panel", "title": null })).is_ok());
        assert!(validate(&json!({ "xtype": "panel", "title": 12 })).is_err());
        assert!(validate(&json!({ "xtype": "panel", "viewModel": [] })).is_err());
        assert!(validate(&json!({ "xtype": "panel", "model": "abc" })).is_err());
    }

    #[test]
    fn test_non_object_config_is_rejected() {
        assert!(validate(&json!("panel")).is_err());
    }
}
