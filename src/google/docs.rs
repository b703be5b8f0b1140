//! Google Drive listing and Google Docs retrieval.

use reqwest::blocking::{Client, Request, Response};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::import::DocumentSource;
use crate::model::{Document, DocumentSummary};
use crate::parser::{DocsParser, ParseOptions, ParsedDocument};

use super::auth::GoogleAuth;
use super::store::OptionStore;

/// Drive v3 API root.
pub const DRIVE_API_URL: &str = "https://www.googleapis.com/drive/v3";

/// Docs v1 API root.
pub const DOCS_API_URL: &str = "https://docs.googleapis.com/v1";

const DOCUMENT_QUERY: &str = "mimeType='application/vnd.google-apps.document' and trashed=false";
const LIST_FIELDS: &str = "nextPageToken, files(id, name, modifiedTime, createdTime, webViewLink)";
const MAX_PAGE_SIZE: usize = 1000;

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DocumentSummary>,
}

/// Reads documents with a user's access token.
///
/// Documents are decoded leniently by default: an element the model cannot
/// read is skipped and reported instead of failing the whole fetch.
pub struct GoogleDocsClient {
    client: Client,
    access_token: String,
    drive_url: String,
    docs_url: String,
    parse_options: ParseOptions,
}

impl GoogleDocsClient {
    /// Create a client for an access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            access_token: access_token.into(),
            drive_url: DRIVE_API_URL.to_string(),
            docs_url: DOCS_API_URL.to_string(),
            parse_options: ParseOptions::new().lenient(),
        }
    }

    /// Create a client from an authenticator, refreshing its token if needed.
    pub fn from_auth<S: OptionStore>(auth: &mut GoogleAuth<S>) -> Result<Self> {
        Ok(Self::new(auth.access_token()?))
    }

    /// Use other API roots.
    pub fn with_base_urls(
        mut self,
        drive_url: impl Into<String>,
        docs_url: impl Into<String>,
    ) -> Self {
        self.drive_url = drive_url.into();
        self.docs_url = docs_url.into();
        self
    }

    /// Set JSON decoding options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    fn decode(&self, body: &str) -> Result<ParsedDocument> {
        DocsParser::from_json_with_options(body, self.parse_options.clone())?.parse()
    }

    fn list_request(&self, page_size: usize) -> Result<Request> {
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE).to_string();
        self.client
            .get(format!("{}/files", self.drive_url))
            .bearer_auth(&self.access_token)
            .query(&[
                ("q", DOCUMENT_QUERY),
                ("pageSize", page_size.as_str()),
                ("fields", LIST_FIELDS),
                ("orderBy", "modifiedTime desc"),
            ])
            .build()
            .map_err(|e| Error::Fetch(format!("Cannot build Drive request: {}", e)))
    }

    fn document_request(&self, id: &str) -> Result<Request> {
        self.client
            .get(format!("{}/documents/{}", self.docs_url, id))
            .bearer_auth(&self.access_token)
            .build()
            .map_err(|e| Error::Fetch(format!("Cannot build Docs request: {}", e)))
    }

    fn execute(&self, request: Request, what: &str) -> Result<String> {
        let response = self
            .client
            .execute(request)
            .map_err(|e| Error::Fetch(format!("{} failed: {}", what, e)))?;
        read_success(response, what)
    }
}

fn read_success(response: Response, what: &str) -> Result<String> {
    let status = response.status();
    let body = response
        .text()
        .map_err(|e| Error::Fetch(format!("{} failed: {}", what, e)))?;

    if !status.is_success() {
        return Err(Error::Fetch(format!("{} failed ({}): {}", what, status, body)));
    }
    Ok(body)
}

impl DocumentSource for GoogleDocsClient {
    fn list_documents(&self, page_size: usize) -> Result<Vec<DocumentSummary>> {
        let body = self.execute(self.list_request(page_size)?, "Drive files.list")?;
        let list: FileList = serde_json::from_str(&body)
            .map_err(|e| Error::Fetch(format!("Unexpected Drive response: {}", e)))?;

        log::debug!("Drive returned {} documents", list.files.len());
        Ok(list.files)
    }

    fn get_document(&self, id: &str) -> Result<Document> {
        Ok(self.fetch_document(id)?.document)
    }

    fn fetch_document(&self, id: &str) -> Result<ParsedDocument> {
        log::debug!("Fetching document {}", id);
        let body = self.execute(self.document_request(id)?, "Docs documents.get")?;
        self.decode(&body)
    }
}
