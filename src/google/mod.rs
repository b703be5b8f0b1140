//! Google collaborators: OAuth2 user authentication and document retrieval.

mod auth;
mod docs;
mod store;

pub use auth::{
    GoogleAuth, OAuthConfig, StoredToken, TokenInfo, AUTH_URL, DOCUMENTS_READONLY_SCOPE,
    DRIVE_READONLY_SCOPE, REVOKE_URL, TOKEN_URL,
};
pub use docs::{GoogleDocsClient, DOCS_API_URL, DRIVE_API_URL};
pub use store::{FileOptionStore, MemoryOptionStore, OptionStore, STATE_KEY, TOKEN_KEY};
