use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use serde_json::{Value, json};

use crate::models::Block;
use crate::store::{BlockId, ChildPage, DocumentStore, PageProperties, StoreError};

use super::wire;

pub const DEFAULT_API_BASE: &str = "https://api.notion.com/v1";
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Listing page size requested from the API (its maximum).
const PAGE_SIZE: &str = "100";

/// Connection settings for [`NotionClient`].
#[derive(Debug, Clone)]
pub struct NotionSettings {
    pub token: String,
    pub api_base: String,
    pub notion_version: String,
    pub timeout: Duration,
}

impl NotionSettings {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            notion_version: DEFAULT_NOTION_VERSION.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Blocking client for the Notion REST API.
pub struct NotionClient {
    http: Client,
    settings: NotionSettings,
}

impl NotionClient {
    pub fn new(settings: NotionSettings) -> Result<Self, StoreError> {
        let http = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self { http, settings })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.settings.api_base.trim_end_matches('/'), path)
    }

    fn send(&self, request: RequestBuilder) -> Result<Value, StoreError> {
        let response = request
            .bearer_auth(&self.settings.token)
            .header("Notion-Version", &self.settings.notion_version)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(wire::decode_error(status.as_u16(), &body));
        }
        Ok(response.json()?)
    }
}

impl DocumentStore for NotionClient {
    fn create_page(
        &mut self,
        parent: &str,
        properties: &PageProperties,
        children: &[Block],
    ) -> Result<BlockId, StoreError> {
        let body = wire::create_page_body(parent, properties, children);
        let response = self.send(self.http.post(self.url("pages")).json(&body))?;
        wire::decode_created(response)
    }

    fn append_children(&mut self, id: &BlockId, children: &[Block]) -> Result<(), StoreError> {
        let body = json!({"children": wire::blocks_json(children)});
        let url = self.url(&format!("blocks/{id}/children"));
        self.send(self.http.patch(url).json(&body))?;
        Ok(())
    }

    fn list_children(
        &mut self,
        id: &BlockId,
        cursor: Option<&str>,
    ) -> Result<ChildPage, StoreError> {
        let mut query = vec![("page_size", PAGE_SIZE)];
        if let Some(cursor) = cursor {
            query.push(("start_cursor", cursor));
        }
        let url = self.url(&format!("blocks/{id}/children"));
        let response = self.send(self.http.get(url).query(&query))?;
        wire::decode_children(response)
    }

    fn delete_block(&mut self, id: &BlockId) -> Result<(), StoreError> {
        let url = self.url(&format!("blocks/{id}"));
        self.send(self.http.delete(url))?;
        Ok(())
    }
}
