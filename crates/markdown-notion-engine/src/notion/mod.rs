//! The Notion REST API as a [`DocumentStore`](crate::store::DocumentStore).

mod client;
pub mod wire;

pub use client::{
    DEFAULT_API_BASE, DEFAULT_NOTION_VERSION, DEFAULT_TIMEOUT, NotionClient, NotionSettings,
};
