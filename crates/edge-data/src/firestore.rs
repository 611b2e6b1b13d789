//! Firestore REST collection listing.

use serde::Deserialize;

use crate::normalize::{convert_document, Document, RawDocument};
use crate::{FetchError, HttpClient, HttpRequest};

/// Public Firestore REST endpoint.
pub const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Body of a `documents.list` call.
#[derive(Debug, Default, Deserialize)]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Option<Vec<RawDocument>>,
}

/// Reads whole collections from one Firestore project.
#[derive(Debug, Clone)]
pub struct FirestoreClient<C> {
    client: C,
    project: String,
}

impl<C: HttpClient> FirestoreClient<C> {
    /// Create a client for `project` against the public endpoint.
    pub fn new(client: C, project: impl Into<String>) -> Self {
        Self {
            client,
            project: project.into(),
        }
    }

    /// URL listing every document of `collection`.
    pub fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents/{}",
            FIRESTORE_BASE_URL, self.project, collection
        )
    }

    /// Fetch and normalize every document of `collection`.
    ///
    /// The status code is not inspected: any JSON body is accepted and a
    /// body without `documents` yields an empty list.
    pub async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, FetchError> {
        let response = self
            .client
            .send(HttpRequest::get(self.collection_url(collection)))
            .await?;

        let listing: ListDocumentsResponse = response.json()?;

        Ok(listing
            .documents
            .unwrap_or_default()
            .iter()
            .map(convert_document)
            .collect())
    }
}
