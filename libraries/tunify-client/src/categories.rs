//! Browse categories.

use crate::client::fetch_json;
use crate::error::Result;
use reqwest::Client;
use tunify_core::Category;

/// Categories client.
pub struct CategoriesClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> CategoriesClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Get every category.
    pub async fn list(&self) -> Result<Vec<Category>> {
        let url = format!("{}/categories", self.base_url);
        fetch_json(self.http.get(&url), &url, "categories").await
    }

    /// Find a category by slug.
    pub async fn by_slug(&self, slug: &str) -> Result<Option<Category>> {
        Ok(self.list().await?.into_iter().find(|c| c.slug == slug))
    }
}
