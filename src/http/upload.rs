//! Multipart file upload
//!
//! Uploads share the error classification of regular requests but are
//! never retried: a partially accepted upload must not be blindly repeated.

use super::client::{ThreatExchangeClient, ACCESS_TOKEN_PARAM};
use super::envelope::interpret;
use crate::error::{Error, Result};
use crate::types::{ParamValue, Params};
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Form field name carrying the file
pub const FILE_FIELD: &str = "file";

/// A file submission: exactly one of a path or an in-memory buffer
#[derive(Debug, Clone, Default)]
pub struct FileUpload {
    path: Option<PathBuf>,
    content: Option<Bytes>,
    file_name: Option<String>,
    fields: Params,
}

impl FileUpload {
    /// Empty upload; set a source with [`path`](Self::path) or [`bytes`](Self::bytes)
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload the file at `path`
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new().path(path)
    }

    /// Upload an in-memory buffer
    pub fn from_bytes(content: impl Into<Bytes>) -> Self {
        Self::new().bytes(content)
    }

    /// Read the file part from disk
    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Send the file part from memory
    #[must_use]
    pub fn bytes(mut self, content: impl Into<Bytes>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Override the file name sent with the part
    #[must_use]
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Add an extra form field
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.fields.insert(key, value);
        self
    }

    /// File name that will be sent, if any
    pub fn resolved_file_name(&self) -> Option<String> {
        self.file_name.clone().or_else(|| {
            self.path
                .as_deref()
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().into_owned())
        })
    }

    /// Load the file content, checking exactly one source was given
    async fn load(&self) -> Result<Bytes> {
        match (&self.path, &self.content) {
            (Some(path), None) => Ok(Bytes::from(tokio::fs::read(path).await?)),
            (None, Some(content)) => Ok(content.clone()),
            (None, None) => Err(Error::generic(
                "Upload requires a file path or in-memory content",
            )),
            (Some(_), Some(_)) => Err(Error::generic(
                "Upload accepts a file path or in-memory content, not both",
            )),
        }
    }

    /// Build the multipart form, access token included
    async fn into_form(self, access_token: &str) -> Result<Form> {
        let content = self.load().await?;
        let mut part = Part::bytes(content.to_vec());
        if let Some(name) = self.resolved_file_name() {
            part = part.file_name(name);
        }

        let mut fields = self.fields;
        fields.insert(ACCESS_TOKEN_PARAM, access_token);

        let form = fields
            .to_pairs()
            .into_iter()
            .fold(Form::new(), |form, (key, value)| form.text(key, value))
            .part(FILE_FIELD, part);
        Ok(form)
    }
}

impl ThreatExchangeClient {
    /// Upload a file to `endpoint` as a multipart POST
    ///
    /// Rate-limit failures are surfaced immediately with their retry hint.
    pub async fn upload(&self, endpoint: &str, upload: FileUpload) -> Result<Value> {
        let form = upload
            .into_form(self.credentials().access_token())
            .await?;
        let url = self.build_url(endpoint);

        self.acquire_permit().await;
        debug!("POST {} (multipart)", url);

        let response = self
            .http()
            .post(&url)
            .timeout(self.config().timeout)
            .multipart(form)
            .send()
            .await?;
        interpret(response).await
    }
}
