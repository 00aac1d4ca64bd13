//! reqwest client for the catalogue REST API.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use super::CatalogueRemote;
use crate::error::{CatalogueError, Operation};
use crate::models::{Category, ImportStats, NewCategory, SpreadsheetFile};

#[derive(Deserialize)]
struct ImportResponse {
    #[serde(default)]
    stats: ImportStats,
}

/// Talks to the authority at `{api_url}/categories`.
pub struct HttpCatalogueRemote {
    api_url: String,
    client: reqwest::Client,
}

impl HttpCatalogueRemote {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogueError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogueError::Client(e.to_string()))?;
        Ok(Self::with_client(api_url, client))
    }

    pub fn with_client(api_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            api_url: api_url.into(),
            client,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Builds `{api_url}/categories{suffix}`, tolerating a trailing slash.
    fn categories_url(&self, suffix: &str) -> String {
        format!("{}/categories{}", self.api_url.trim_end_matches('/'), suffix)
    }

    fn category_url(&self, name: &str, suffix: &str) -> String {
        self.categories_url(&format!("/{}{}", urlencoding::encode(name), suffix))
    }

    async fn send(
        &self,
        op: Operation,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, CatalogueError> {
        let response = request
            .send()
            .await
            .map_err(|e| CatalogueError::network(op, e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // The body is usually `{"error": "..."}` but may be anything.
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| value["error"].as_str().map(str::to_string));

        tracing::warn!(%op, status = status.as_u16(), ?message, "authority rejected request");
        Err(CatalogueError::Server {
            op,
            status: status.as_u16(),
            message,
        })
    }

    /// Decodes a success body. Some handlers answer 2xx with `{"error": ...}`;
    /// that is reported as a server error carrying the message.
    async fn decode<T: DeserializeOwned>(
        &self,
        op: Operation,
        response: reqwest::Response,
    ) -> Result<T, CatalogueError> {
        let status = response.status().as_u16();
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CatalogueError::network(op, e))?;

        if let Some(message) = body.get("error").and_then(|e| e.as_str()) {
            tracing::warn!(%op, status, message, "authority reported an error");
            return Err(CatalogueError::Server {
                op,
                status,
                message: Some(message.to_string()),
            });
        }
        serde_json::from_value(body).map_err(|e| CatalogueError::network(op, e))
    }
}

#[async_trait]
impl CatalogueRemote for HttpCatalogueRemote {
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogueError> {
        let op = Operation::FetchCategories;
        let url = self.categories_url("");
        tracing::debug!(%url, "fetching categories");

        let response = self.send(op, self.client.get(&url)).await?;
        self.decode(op, response).await
    }

    async fn create_category(&self, request: &NewCategory) -> Result<Category, CatalogueError> {
        let op = Operation::CreateCategory;
        let url = self.categories_url("");
        tracing::debug!(
            %url,
            name = %request.name,
            items = request.items.len(),
            "creating category"
        );

        let response = self.send(op, self.client.post(&url).json(request)).await?;
        self.decode(op, response).await
    }

    async fn delete_category(&self, name: &str) -> Result<(), CatalogueError> {
        let url = self.category_url(name, "");
        tracing::debug!(%url, "deleting category");

        self.send(Operation::DeleteCategory, self.client.delete(&url))
            .await?;
        Ok(())
    }

    async fn delete_items(&self, category: &str, items: &[String]) -> Result<(), CatalogueError> {
        let url = self.category_url(category, "/delete-items");
        tracing::debug!(%url, count = items.len(), "deleting items");

        let body = serde_json::json!({ "itemsToDelete": items });
        self.send(Operation::DeleteItems, self.client.post(&url).json(&body))
            .await?;
        Ok(())
    }

    async fn import_spreadsheet(
        &self,
        file: &SpreadsheetFile,
    ) -> Result<ImportStats, CatalogueError> {
        let op = Operation::ImportSpreadsheet;
        let url = self.categories_url("/excel-upload");
        tracing::debug!(
            %url,
            file = %file.name,
            bytes = file.contents.len(),
            "uploading spreadsheet"
        );

        let mut part = Part::bytes(file.contents.clone()).file_name(file.name.clone());
        if let Some(media_type) = &file.media_type {
            part = part
                .mime_str(media_type)
                .map_err(|e| CatalogueError::network(op, e))?;
        }
        let form = Form::new().part("file", part);

        let response = self.send(op, self.client.post(&url).multipart(form)).await?;
        let parsed: ImportResponse = self.decode(op, response).await?;
        Ok(parsed.stats)
    }
}
