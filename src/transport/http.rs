// ABOUTME: reqwest implementation of the Transport trait with KE-chain authentication headers
// ABOUTME: Records every exchange so API errors can report the last URL, status and body
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 KE-chain Client Contributors

use super::{ApiRequest, ApiResponse, HttpMethod, MultipartForm, RequestBody, Transport};
use crate::config::{Credentials, HttpClientConfig};
use async_trait::async_trait;
use kechain_core::constants::headers;
use kechain_core::{KechainResult, RequestDiagnostics};
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("kechain-rs/", env!("CARGO_PKG_VERSION"));

/// Transport over HTTPS using a shared reqwest client
pub struct HttpTransport {
    client: Client,
    credentials: Credentials,
    last_exchange: Mutex<Option<RequestDiagnostics>>,
}

impl HttpTransport {
    /// Build a transport with the configured timeouts
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized
    pub fn new(credentials: Credentials, config: &HttpClientConfig) -> KechainResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            credentials,
            last_exchange: Mutex::new(None),
        })
    }

    fn record(&self, diagnostics: RequestDiagnostics) {
        match self.last_exchange.lock() {
            Ok(mut last) => *last = Some(diagnostics),
            Err(poisoned) => *poisoned.into_inner() = Some(diagnostics),
        }
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Credentials::Anonymous => builder,
            Credentials::Token(token) => {
                builder.header(AUTHORIZATION, format!("{} {token}", headers::TOKEN_SCHEME))
            }
            Credentials::Basic { username, password } => {
                builder.basic_auth(username, Some(password))
            }
        }
    }
}

const fn reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn multipart_form(form: MultipartForm) -> KechainResult<Form> {
    let mut multipart = Form::new();
    for (name, value) in form.fields {
        multipart = multipart.text(name, value);
    }
    for file in form.files {
        let part = Part::bytes(file.data)
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;
        multipart = multipart.part(file.field, part);
    }
    Ok(multipart)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> KechainResult<ApiResponse> {
        let url = request.full_url();
        let ApiRequest { method, body, .. } = request;

        let builder = self
            .client
            .request(reqwest_method(method), url.clone())
            .header(headers::X_REQUESTED_WITH, headers::XML_HTTP_REQUEST);
        let builder = self.authorize(builder);
        let builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Form(fields) => builder.form(&fields),
            RequestBody::Multipart(form) => builder.multipart(multipart_form(form)?),
        };

        let diagnostics = RequestDiagnostics::new(method.as_str(), url.as_str());
        self.record(diagnostics.clone());
        debug!(%method, %url, "Sending KE-chain request");

        let response = builder.send().await.map_err(|e| {
            warn!(%method, %url, error = %e, "KE-chain request failed before a response");
            e
        })?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        let response = ApiResponse::from_text(status, &text);

        debug!(%method, %url, status, "KE-chain response received");
        self.record(diagnostics.with_response(status, response.body.clone()));
        Ok(response)
    }

    fn last_exchange(&self) -> Option<RequestDiagnostics> {
        match self.last_exchange.lock() {
            Ok(last) => last.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
