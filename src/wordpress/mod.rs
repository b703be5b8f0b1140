//! WordPress persistence over the REST API.
//!
//! Posts are created with an application password (basic auth). Meta keys
//! starting with `_` are protected in WordPress and must be registered with
//! `show_in_rest` on the site for the SEO fields to be stored.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, Request};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::import::{PostSink, PublishedPost};
use crate::post::{slugify, ContentRecord, PostStatus};

/// Meta key for the SEO meta description.
pub const META_DESCRIPTION_KEY: &str = "_yoast_wpseo_metadesc";

/// Meta key for the SEO focus keyword.
pub const META_FOCUS_KEYWORD_KEY: &str = "_yoast_wpseo_focuskw";

/// Meta key marking posts created by an import.
pub const META_IMPORTED_KEY: &str = "_docpress_imported_from_gdocs";

/// Meta key holding the import time.
pub const META_IMPORT_DATE_KEY: &str = "_docpress_import_date";

const IMPORT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Connection settings for a WordPress site.
#[derive(Debug, Clone)]
pub struct WordPressConfig {
    /// Site root, e.g. `https://blog.example.com`
    pub base_url: String,

    /// User owning the application password
    pub username: String,

    /// Application password
    pub app_password: String,
}

impl WordPressConfig {
    /// Create a configuration.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        app_password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            app_password: app_password.into(),
        }
    }

    /// URL of a `wp/v2` REST route.
    pub fn api_url(&self, route: &str) -> String {
        format!(
            "{}/wp-json/wp/v2/{}",
            self.base_url.trim_end_matches('/'),
            route.trim_start_matches('/')
        )
    }

    fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::Config("WORDPRESS_URL is required".to_string()));
        }
        if self.username.trim().is_empty() || self.app_password.trim().is_empty() {
            return Err(Error::Config(
                "WORDPRESS_USER and WORDPRESS_APP_PASSWORD are required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Body of a `POST /wp/v2/posts` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostPayload {
    /// Post title
    pub title: String,

    /// Post content (Markdown body)
    pub content: String,

    /// Publication status
    pub status: PostStatus,

    /// URL slug
    #[serde(skip_serializing_if = "String::is_empty")]
    pub slug: String,

    /// Excerpt, omitted when empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Author user id, when resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<u64>,

    /// Category term ids
    pub categories: Vec<u64>,

    /// Tag term ids
    pub tags: Vec<u64>,

    /// Post meta
    pub meta: BTreeMap<String, String>,
}

impl PostPayload {
    /// Map a record onto a payload. Author, categories and tags are left
    /// for the client to resolve.
    pub fn from_record(record: &ContentRecord, imported_at: DateTime<Utc>) -> Self {
        let mut meta = BTreeMap::new();
        if !record.meta_description.is_empty() {
            meta.insert(
                META_DESCRIPTION_KEY.to_string(),
                record.meta_description.clone(),
            );
        }
        if !record.target_keyword.is_empty() {
            meta.insert(
                META_FOCUS_KEYWORD_KEY.to_string(),
                record.target_keyword.clone(),
            );
        }
        meta.insert(META_IMPORTED_KEY.to_string(), "1".to_string());
        meta.insert(
            META_IMPORT_DATE_KEY.to_string(),
            imported_at.format(IMPORT_DATE_FORMAT).to_string(),
        );

        Self {
            title: record.title.clone(),
            content: record.body.clone(),
            status: record.status,
            slug: record.slug.clone(),
            excerpt: (!record.excerpt.is_empty()).then(|| record.excerpt.clone()),
            author: None,
            categories: Vec::new(),
            tags: Vec::new(),
            meta,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Term {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct User {
    id: u64,
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
}

#[derive(Debug, Deserialize)]
struct CreatedPost {
    id: u64,
    #[serde(default)]
    link: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum Taxonomy {
    Categories,
    Tags,
}

impl Taxonomy {
    fn route(&self) -> &'static str {
        match self {
            Taxonomy::Categories => "categories",
            Taxonomy::Tags => "tags",
        }
    }
}

/// Creates posts on a WordPress site.
pub struct WordPressClient {
    config: WordPressConfig,
    client: Client,
}

impl WordPressClient {
    /// Create a client. Fails with [`Error::Config`] on missing settings.
    pub fn new(config: WordPressConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            client: Client::new(),
        })
    }

    /// The connection settings.
    pub fn config(&self) -> &WordPressConfig {
        &self.config
    }

    /// Find a user id by login, then by email.
    pub fn find_author(&self, login_or_email: &str) -> Result<Option<u64>> {
        let users: Vec<User> = self.get_json(
            "users",
            &[("search", login_or_email), ("context", "edit")],
        )?;

        let by_login = users.iter().find(|u| u.username == login_or_email);
        let by_email = || {
            users
                .iter()
                .find(|u| !u.email.is_empty() && u.email.eq_ignore_ascii_case(login_or_email))
        };

        Ok(by_login.or_else(by_email).map(|u| u.id))
    }

    /// Find a category by the slug of its name, creating it when missing.
    pub fn category_id(&self, name: &str) -> Result<u64> {
        self.term_id(Taxonomy::Categories, name)
    }

    /// Find a tag by the slug of its name, creating it when missing.
    pub fn tag_id(&self, name: &str) -> Result<u64> {
        self.term_id(Taxonomy::Tags, name)
    }

    fn term_id(&self, taxonomy: Taxonomy, name: &str) -> Result<u64> {
        let slug = slugify(name);
        let existing: Vec<Term> = self.get_json(taxonomy.route(), &[("slug", slug.as_str())])?;
        if let Some(term) = existing.first() {
            return Ok(term.id);
        }

        let mut body = BTreeMap::new();
        body.insert("name", name);
        if !slug.is_empty() {
            body.insert("slug", slug.as_str());
        }
        let created: Term = self.post_json(taxonomy.route(), &body)?;
        log::info!("Created {} {:?} ({})", taxonomy.route(), name, created.id);
        Ok(created.id)
    }

    fn resolve_terms(&self, taxonomy: Taxonomy, names: &[String]) -> Vec<u64> {
        names
            .iter()
            .filter_map(|name| match self.term_id(taxonomy, name) {
                Ok(id) => Some(id),
                Err(e) => {
                    log::warn!("Skipping {} {:?}: {}", taxonomy.route(), name, e);
                    None
                }
            })
            .collect()
    }

    fn create_post_request(&self, payload: &PostPayload) -> Result<Request> {
        self.client
            .post(self.config.api_url("posts"))
            .basic_auth(&self.config.username, Some(&self.config.app_password))
            .json(payload)
            .build()
            .map_err(|e| Error::Persist(format!("Cannot build post request: {}", e)))
    }

    fn get_json<T: DeserializeOwned>(&self, route: &str, query: &[(&str, &str)]) -> Result<T> {
        let request = self
            .client
            .get(self.config.api_url(route))
            .basic_auth(&self.config.username, Some(&self.config.app_password))
            .query(query)
            .build()
            .map_err(|e| Error::Persist(format!("Cannot build {} request: {}", route, e)))?;
        self.execute(request, route)
    }

    fn post_json<B, T>(&self, route: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .client
            .post(self.config.api_url(route))
            .basic_auth(&self.config.username, Some(&self.config.app_password))
            .json(body)
            .build()
            .map_err(|e| Error::Persist(format!("Cannot build {} request: {}", route, e)))?;
        self.execute(request, route)
    }

    fn execute<T: DeserializeOwned>(&self, request: Request, route: &str) -> Result<T> {
        let response = self
            .client
            .execute(request)
            .map_err(|e| Error::Persist(format!("{} request failed: {}", route, e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| Error::Persist(format!("{} request failed: {}", route, e)))?;

        if !status.is_success() {
            return Err(Error::Persist(format!(
                "{} request failed ({}): {}",
                route, status, body
            )));
        }

        serde_json::from_str(&body)
            .map_err(|e| Error::Persist(format!("Unexpected {} response: {}", route, e)))
    }
}

impl PostSink for WordPressClient {
    fn publish(&mut self, record: &ContentRecord) -> Result<PublishedPost> {
        let mut payload = PostPayload::from_record(record, Utc::now());

        if !record.author.is_empty() {
            match self.find_author(&record.author) {
                Ok(Some(id)) => payload.author = Some(id),
                Ok(None) => log::warn!("No WordPress user matches author {:?}", record.author),
                Err(e) => log::warn!("Cannot look up author {:?}: {}", record.author, e),
            }
        }

        payload.categories = self.resolve_terms(Taxonomy::Categories, &record.categories);
        payload.tags = self.resolve_terms(Taxonomy::Tags, &record.tags);

        let request = self.create_post_request(&payload)?;
        let created: CreatedPost = self.execute(request, "posts")?;
        log::info!("Created WordPress post {} ({})", created.id, record.status);

        Ok(PublishedPost {
            id: created.id,
            link: created.link,
            status: record.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record() -> ContentRecord {
        let mut record = ContentRecord::with_body("Mon article", "Contenu");
        record.slug = "mon-article".to_string();
        record.status = PostStatus::Publish;
        record.meta_description = "Résumé".to_string();
        record
    }

    fn imported_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_payload_from_record() {
        let payload = PostPayload::from_record(&record(), imported_at());

        assert_eq!(payload.title, "Mon article");
        assert_eq!(payload.content, "Contenu");
        assert_eq!(payload.excerpt, None);
        assert_eq!(payload.meta[META_DESCRIPTION_KEY], "Résumé");
        assert!(!payload.meta.contains_key(META_FOCUS_KEYWORD_KEY));
        assert_eq!(payload.meta[META_IMPORTED_KEY], "1");
        assert_eq!(payload.meta[META_IMPORT_DATE_KEY], "2024-05-01 10:30:00");
    }

    #[test]
    fn test_payload_json_shape() {
        let mut record = record();
        record.excerpt = "Short".to_string();
        let payload = PostPayload::from_record(&record, imported_at());
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["status"], "publish");
        assert_eq!(json["excerpt"], "Short");
        assert_eq!(json["slug"], "mon-article");
        assert!(json.get("author").is_none());
        assert_eq!(json["categories"], serde_json::json!([]));
    }

    #[test]
    fn test_api_url() {
        let config = WordPressConfig::new("https://blog.test/", "admin", "xxxx");
        assert_eq!(config.api_url("posts"), "https://blog.test/wp-json/wp/v2/posts");
        assert_eq!(config.api_url("/tags"), "https://blog.test/wp-json/wp/v2/tags");
    }

    #[test]
    fn test_missing_config() {
        let result = WordPressClient::new(WordPressConfig::new("https://blog.test", "", ""));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_create_post_request() {
        let client =
            WordPressClient::new(WordPressConfig::new("https://blog.test", "admin", "app pw"))
                .unwrap();
        let payload = PostPayload::from_record(&record(), imported_at());
        let request = client.create_post_request(&payload).unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(request.url().as_str(), "https://blog.test/wp-json/wp/v2/posts");

        let auth = request.headers().get(reqwest::header::AUTHORIZATION).unwrap();
        assert!(auth.to_str().unwrap().starts_with("Basic "));
    }
}
