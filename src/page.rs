//! Page documents and the `pages` list.
//!
//! All pages of a user live in one JSON array document; every operation here
//! reads the whole list and writes it back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::config::BuilderConfig;
use crate::error::{BuilderError, BuilderResult};
use crate::serialize::SerializedLayout;
use crate::store::DocumentStore;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMetadata {
    pub description: String,
    pub keywords: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageHead {
    pub title: String,
    pub metadata: PageMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageBody {
    pub components: Vec<SerializedLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub head: PageHead,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub body: PageBody,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub footer: Value,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Page {
    pub fn new(id: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        let title = title.into();
        let now = Utc::now();
        Self {
            id: id.into(),
            head: PageHead {
                title: title.clone(),
                metadata: PageMetadata::default(),
            },
            title,
            url: url.into(),
            body: PageBody::default(),
            footer: Value::Null,
            created_at: now,
            updated_at: now,
        }
    }

    /// `<title>` text: the head title, else the page title.
    pub fn document_title(&self) -> &str {
        if self.head.title.is_empty() {
            &self.title
        } else {
            &self.head.title
        }
    }
}

/// Typed access to the `pages` list document.
pub struct PageRepository<S> {
    store: Arc<S>,
    collection: String,
    key: String,
}

impl<S: DocumentStore> PageRepository<S> {
    pub fn new(store: Arc<S>, config: &BuilderConfig) -> Self {
        Self::with_location(store, &config.pages_collection, &config.pages_key)
    }

    pub fn with_location(store: Arc<S>, collection: &str, key: &str) -> Self {
        Self {
            store,
            collection: collection.to_string(),
            key: key.to_string(),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Every page; an absent document is an empty list.
    pub async fn list_pages(&self) -> BuilderResult<Vec<Page>> {
        let value = self
            .store
            .get_item(&self.collection, &self.key)
            .await
            .map_err(|e| {
                tracing::warn!(collection = %self.collection, "list pages: {}", e);
                BuilderError::persistence("could not retrieve pages")
            })?;
        match value {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }

    pub async fn get_page(&self, id: &str) -> BuilderResult<Page> {
        self.list_pages()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| BuilderError::PageNotFound { id: id.to_string() })
    }

    /// Insert or replace by id; refreshes `updated_at`.
    pub async fn upsert_page(&self, mut page: Page) -> BuilderResult<Page> {
        let mut pages = self.list_pages().await?;
        page.updated_at = Utc::now();
        match pages.iter_mut().find(|p| p.id == page.id) {
            Some(existing) => {
                page.created_at = existing.created_at;
                *existing = page.clone();
            }
            None => pages.push(page.clone()),
        }
        self.write(&pages).await?;
        tracing::info!(page = %page.id, "page saved");
        Ok(page)
    }

    /// Replace the layout tree of an existing page.
    pub async fn save_layouts(
        &self,
        id: &str,
        layouts: Vec<SerializedLayout>,
    ) -> BuilderResult<Page> {
        let mut pages = self.list_pages().await?;
        let page = pages
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| BuilderError::PageNotFound { id: id.to_string() })?;
        page.body.components = layouts;
        page.updated_at = Utc::now();
        let saved = page.clone();
        self.write(&pages).await?;
        tracing::info!(page = %id, layouts = saved.body.components.len(), "page layouts saved");
        Ok(saved)
    }

    pub async fn delete_page(&self, id: &str) -> BuilderResult<()> {
        let mut pages = self.list_pages().await?;
        let before = pages.len();
        pages.retain(|p| p.id != id);
        if pages.len() == before {
            return Err(BuilderError::PageNotFound { id: id.to_string() });
        }
        self.write(&pages).await?;
        tracing::info!(page = %id, "page deleted");
        Ok(())
    }

    async fn write(&self, pages: &[Page]) -> BuilderResult<()> {
        let value = serde_json::to_value(pages)?;
        self.store
            .set_item(&self.collection, &self.key, value)
            .await
            .map_err(|e| {
                tracing::warn!(collection = %self.collection, "write pages: {}", e);
                BuilderError::persistence("could not save page")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;

    fn repository() -> (Arc<MemoryStore>, PageRepository<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let repo = PageRepository::new(Arc::clone(&store), &BuilderConfig::default());
        (store, repo)
    }

    #[tokio::test]
    async fn crud_over_one_document() {
        let (store, repo) = repository();
        assert!(repo.list_pages().await.unwrap().is_empty());

        repo.upsert_page(Page::new("home", "Home", "/")).await.unwrap();
        repo.upsert_page(Page::new("about", "About", "/about")).await.unwrap();
        assert_eq!(store.len(), 1);

        let mut home = repo.get_page("home").await.unwrap();
        let created = home.created_at;
        home.title = "Welcome".into();
        let saved = repo.upsert_page(home).await.unwrap();
        assert_eq!(saved.created_at, created);
        assert_eq!(repo.list_pages().await.unwrap().len(), 2);
        assert_eq!(repo.get_page("home").await.unwrap().title, "Welcome");

        repo.delete_page("about").await.unwrap();
        assert_eq!(
            repo.get_page("about").await.unwrap_err(),
            BuilderError::PageNotFound { id: "about".into() }
        );
        assert!(repo.delete_page("about").await.is_err());
    }

    #[tokio::test]
    async fn store_failures_map_to_user_messages() {
        let (store, repo) = repository();
        repo.upsert_page(Page::new("home", "Home", "/")).await.unwrap();

        store.fail_writes(true);
        assert_eq!(
            repo.upsert_page(Page::new("x", "X", "/x")).await.unwrap_err(),
            BuilderError::persistence("could not save page")
        );
        store.fail_reads(true);
        assert_eq!(
            repo.list_pages().await.unwrap_err(),
            BuilderError::persistence("could not retrieve pages")
        );
    }

    #[test]
    fn page_json_is_camel_case_with_defaults() {
        let page: Page = serde_json::from_str(r#"{"id": "p1", "title": "T"}"#).unwrap();
        assert_eq!(page.document_title(), "T");
        assert!(page.body.components.is_empty());
        let json = serde_json::to_value(&page).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("footer").is_none());
        assert_eq!(json["head"]["metadata"]["keywords"], "");
    }
}
