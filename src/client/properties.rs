// ABOUTME: Property retrieval, value updates and attachment uploads
// ABOUTME: Uploads are multipart POSTs carrying the owning part id as a form field
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 KE-chain Client Contributors

use super::{single, Client, Query};
use crate::transport::{FilePart, HttpMethod, MultipartForm};
use kechain_core::constants::api_paths;
use kechain_core::models::Property;
use kechain_core::{KechainError, KechainResult};
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

/// Form field carrying the uploaded file
const ATTACHMENT_FIELD: &str = "attachment";

impl Client {
    /// Properties of `part`, optionally narrowed to one name
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it
    pub async fn properties(&self, part: Uuid, name: Option<&str>) -> KechainResult<Vec<Property>> {
        let query = Query::default()
            .opt("category", Some("INSTANCE"))
            .opt("part", Some(part))
            .opt("name", name)
            .into_pairs();
        self.list(api_paths::PROPERTIES, query, "properties").await
    }

    /// The property named `name` of `part`
    ///
    /// # Errors
    ///
    /// Returns [`KechainError::NotFound`] or [`KechainError::MultipleFound`]
    /// unless exactly one property matches
    pub async fn property(&self, part: Uuid, name: &str) -> KechainResult<Property> {
        single(self.properties(part, Some(name)).await?, "property")
    }

    /// Set the value of `property`
    ///
    /// Nothing is sent when `value` equals the current local value. Returns
    /// whether an update was sent.
    ///
    /// # Errors
    ///
    /// Returns an API error unless the server answers 200
    pub async fn update_property_value(
        &self,
        property: &mut Property,
        value: Value,
    ) -> KechainResult<bool> {
        if property.value == value {
            debug!(property = %property.name, "Property value unchanged, not sending");
            return Ok(false);
        }

        let request = self
            .request(HttpMethod::Put, &api_paths::property(&property.id.to_string()))?
            .json(json!({ "value": value }));
        self.send_expecting(request, 200, || {
            format!("Could not update value of property '{}'", property.name)
        })
        .await?;

        property.value = value;
        info!(property = %property.name, id = %property.id, "Updated property value");
        Ok(true)
    }

    /// Upload `data` as the attachment of `property`
    ///
    /// # Errors
    ///
    /// Returns [`KechainError::IllegalArgument`] when the property is not an
    /// attachment or has no owning part, or an API error unless the server
    /// answers 200
    pub async fn upload_property_attachment(
        &self,
        property: &Property,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> KechainResult<()> {
        if property.property_type.is_some() && !property.is_attachment() {
            return Err(KechainError::illegal_argument(format!(
                "Property '{}' does not hold attachments",
                property.name
            )));
        }
        let part = property.part.ok_or_else(|| {
            KechainError::illegal_argument(format!(
                "Property '{}' has no owning part",
                property.name
            ))
        })?;

        let size = data.len();
        let form = MultipartForm {
            fields: vec![("part".to_owned(), part.to_string())],
            files: vec![FilePart::new(ATTACHMENT_FIELD, file_name, content_type, data)],
        };
        let request = self
            .request(
                HttpMethod::Post,
                &api_paths::property_upload(&property.id.to_string()),
            )?
            .multipart(form);
        self.send_expecting(request, 200, || {
            format!("Could not upload attachment to property '{}'", property.name)
        })
        .await?;

        info!(property = %property.name, file_name, size, "Uploaded property attachment");
        Ok(())
    }
}
