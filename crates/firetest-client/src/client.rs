//! Identity-scoped document operations against the emulator REST surface.

use firetest_core::config::Settings;
use firetest_core::constants::{
    DEFAULT_DATABASE_DOCUMENTS_COMPONENT, PROJECTS_ROUTE_COMPONENT, V1_ROUTE_PREFIX,
};
use firetest_wire::document::{Document, DocumentPayload};
use firetest_wire::path::{CollectionPath, DocumentPath};
use reqwest::{Method, RequestBuilder, Response};

use crate::auth::Credential;
use crate::error::{ClientError, ClientResult};

/// A Firestore client bound to one identity.
///
/// Every operation is evaluated by the emulator's rules engine under this
/// identity, except for [`Credential::Owner`] which bypasses rules entirely.
pub struct FirestoreClient {
    http: reqwest::Client,
    documents_base: String,
    authorization: Option<String>,
    credential: Credential,
}

impl FirestoreClient {
    /// ## Summary
    /// Builds a client for the configured emulator and project, presenting
    /// `credential` on every request.
    ///
    /// ## Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(settings: &Settings, credential: Credential) -> ClientResult<Self> {
        let http = reqwest::Client::builder().build()?;
        let documents_base = documents_base_url(settings);
        let authorization = credential.authorization(&settings.project.id);

        Ok(Self {
            http,
            documents_base,
            authorization,
            credential,
        })
    }

    /// Returns the identity this client presents.
    #[must_use]
    pub const fn credential(&self) -> &Credential {
        &self.credential
    }

    /// ## Summary
    /// Reads a single document.
    ///
    /// ## Errors
    /// Returns [`ClientError::PermissionDenied`] when the rules deny the read
    /// and [`ClientError::NotFound`] when the document does not exist.
    pub async fn get_document(&self, path: &DocumentPath) -> ClientResult<Document> {
        tracing::debug!(credential = %self.credential, path = %path, "GET document");
        let response = self
            .request(Method::GET, &self.document_url(path))
            .send()
            .await?;
        decode_document(response).await
    }

    /// ## Summary
    /// Creates a document with a server-assigned id in `collection`.
    ///
    /// ## Errors
    /// Returns [`ClientError::PermissionDenied`] when the rules deny the
    /// create.
    pub async fn create_document(
        &self,
        collection: &CollectionPath,
        payload: &DocumentPayload,
    ) -> ClientResult<Document> {
        tracing::debug!(credential = %self.credential, collection = %collection, "POST document");
        let response = self
            .request(Method::POST, &self.collection_url(collection))
            .json(payload)
            .send()
            .await?;
        decode_document(response).await
    }

    /// ## Summary
    /// Creates or fully replaces the document at `path`.
    ///
    /// No precondition and no field mask; this is the seeding primitive.
    ///
    /// ## Errors
    /// Returns [`ClientError::PermissionDenied`] when the rules deny the
    /// write.
    pub async fn set_document(
        &self,
        path: &DocumentPath,
        payload: &DocumentPayload,
    ) -> ClientResult<Document> {
        tracing::debug!(credential = %self.credential, path = %path, "PATCH document (set)");
        let response = self
            .request(Method::PATCH, &self.document_url(path))
            .json(payload)
            .send()
            .await?;
        decode_document(response).await
    }

    /// ## Summary
    /// Merges `payload` into the existing document at `path`.
    ///
    /// Sends an update mask naming exactly the payload's fields plus an
    /// existence precondition, so untouched fields survive and the write
    /// fails on a missing document.
    ///
    /// ## Errors
    /// Returns [`ClientError::PermissionDenied`] when the rules deny the
    /// update and [`ClientError::NotFound`] when the document is missing.
    pub async fn update_document(
        &self,
        path: &DocumentPath,
        payload: &DocumentPayload,
    ) -> ClientResult<Document> {
        tracing::debug!(credential = %self.credential, path = %path, "PATCH document (update)");
        let response = self
            .request(Method::PATCH, &self.document_url(path))
            .query(&update_query(payload))
            .json(payload)
            .send()
            .await?;
        decode_document(response).await
    }

    /// ## Summary
    /// Deletes the document at `path`. Deleting a missing document succeeds;
    /// there is no existence precondition.
    ///
    /// ## Errors
    /// Returns [`ClientError::PermissionDenied`] when the rules deny the
    /// delete.
    pub async fn delete_document(&self, path: &DocumentPath) -> ClientResult<()> {
        tracing::debug!(credential = %self.credential, path = %path, "DELETE document");
        let response = self
            .request(Method::DELETE, &self.document_url(path))
            .send()
            .await?;
        expect_success(response).await
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut request = self.http.request(method, url);
        if let Some(authorization) = &self.authorization {
            request = request.header(reqwest::header::AUTHORIZATION, authorization);
        }
        request
    }

    fn document_url(&self, path: &DocumentPath) -> String {
        format!("{}/{}", self.documents_base, path.as_str())
    }

    fn collection_url(&self, collection: &CollectionPath) -> String {
        format!("{}/{}", self.documents_base, collection.as_str())
    }
}

/// Base URL of the project's documents surface.
fn documents_base_url(settings: &Settings) -> String {
    format!(
        "{}{V1_ROUTE_PREFIX}/{PROJECTS_ROUTE_COMPONENT}/{}/{DEFAULT_DATABASE_DOCUMENTS_COMPONENT}",
        settings.emulator.origin(),
        settings.project.id,
    )
}

/// Query parameters for a merge-update: one mask entry per field plus the
/// existence precondition.
fn update_query(payload: &DocumentPayload) -> Vec<(&'static str, String)> {
    let mut query: Vec<(&'static str, String)> = payload
        .field_names()
        .into_iter()
        .map(|name| ("updateMask.fieldPaths", name.to_string()))
        .collect();
    query.push(("currentDocument.exists", "true".to_string()));
    query
}

/// Decodes a document response, classifying non-success statuses.
pub(crate) async fn decode_document(response: Response) -> ClientResult<Document> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        Ok(serde_json::from_str(&body)?)
    } else {
        Err(ClientError::from_response(status, &body))
    }
}

/// Discards a successful response body, classifying non-success statuses.
pub(crate) async fn expect_success(response: Response) -> ClientResult<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::from_response(status, &body))
}
