//! Notion JSON for blocks, spans and page properties, and decoding of the
//! responses the client reads back.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::models::{Block, Span, TableBlock};
use crate::store::{BlockId, ChildPage, PageProperties, RemoteChild, StoreError};

pub fn span_json(span: &Span) -> Value {
    match span {
        Span::PlainText { text } => json!({"type": "text", "text": {"content": text}}),
        Span::Bold { text } => json!({
            "type": "text",
            "text": {"content": text},
            "annotations": {"bold": true}
        }),
        Span::InlineCode { text } => json!({
            "type": "text",
            "text": {"content": text},
            "annotations": {"code": true}
        }),
        Span::Link { text, url } => json!({
            "type": "text",
            "text": {"content": text, "link": {"url": url}}
        }),
        Span::Equation { expression } => json!({
            "type": "equation",
            "equation": {"expression": expression}
        }),
    }
}

pub fn rich_text(spans: &[Span]) -> Value {
    Value::Array(spans.iter().map(span_json).collect())
}

pub fn block_json(block: &Block) -> Value {
    let kind = block.type_name();
    let body = match block {
        Block::Heading { spans, color, .. } => {
            let mut body = json!({"rich_text": rich_text(spans)});
            if let Some(color) = color {
                body["color"] = json!(color.as_str());
            }
            body
        }
        Block::Paragraph { spans }
        | Block::BulletedItem { spans }
        | Block::NumberedItem { spans }
        | Block::Quote { spans } => json!({"rich_text": rich_text(spans)}),
        Block::Code { text, language } => json!({
            "rich_text": [{"type": "text", "text": {"content": text}}],
            "language": language
        }),
        Block::Table(table) => table_json(table),
        Block::Equation { expression } => json!({"expression": expression}),
        Block::Divider => json!({}),
        Block::Callout { spans, icon, color } => json!({
            "rich_text": rich_text(spans),
            "icon": {"emoji": icon},
            "color": color.map_or("default", |c| c.as_str())
        }),
    };
    let mut value = json!({"object": "block", "type": kind});
    value[kind] = body;
    value
}

fn table_json(table: &TableBlock) -> Value {
    let rows: Vec<Value> = table
        .rows()
        .iter()
        .map(|row| {
            let cells: Vec<Value> = row.cells.iter().map(|c| rich_text(c)).collect();
            json!({"object": "block", "type": "table_row", "table_row": {"cells": cells}})
        })
        .collect();
    json!({
        "table_width": table.width(),
        "has_column_header": table.has_header(),
        "has_row_header": false,
        "children": rows
    })
}

pub fn blocks_json(blocks: &[Block]) -> Value {
    Value::Array(blocks.iter().map(block_json).collect())
}

pub fn properties_json(properties: &PageProperties) -> Value {
    let tags: Vec<Value> = properties
        .tags
        .iter()
        .map(|tag| json!({"name": tag}))
        .collect();
    json!({
        "Name": {"title": [{"text": {"content": properties.title}}]},
        "Tags": {"multi_select": tags},
        "Type": {"select": {"name": properties.kind}},
        "URL": {"url": properties.url}
    })
}

/// Body of `POST /pages`.
pub fn create_page_body(database: &str, properties: &PageProperties, children: &[Block]) -> Value {
    json!({
        "parent": {"database_id": database},
        "properties": properties_json(properties),
        "children": blocks_json(children)
    })
}

#[derive(Debug, Deserialize)]
struct CreatedPage {
    id: String,
}

pub fn decode_created(body: Value) -> Result<BlockId, StoreError> {
    let page: CreatedPage =
        serde_json::from_value(body).map_err(|e| StoreError::Decode(e.to_string()))?;
    Ok(BlockId::new(page.id))
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    results: Vec<Value>,
    #[serde(default)]
    has_more: bool,
    next_cursor: Option<String>,
}

/// Decodes a `GET /blocks/{id}/children` response.
pub fn decode_children(body: Value) -> Result<ChildPage, StoreError> {
    let list: ListResponse =
        serde_json::from_value(body).map_err(|e| StoreError::Decode(e.to_string()))?;

    let children = list
        .results
        .iter()
        .map(decode_child)
        .collect::<Result<Vec<_>, _>>()?;
    let next_cursor = if list.has_more { list.next_cursor } else { None };

    Ok(ChildPage {
        children,
        next_cursor,
    })
}

fn decode_child(value: &Value) -> Result<RemoteChild, StoreError> {
    let id = value["id"]
        .as_str()
        .ok_or_else(|| StoreError::Decode("block without id".to_string()))?;
    let type_name = value["type"].as_str().unwrap_or_default();
    let body = &value[type_name];

    let plain_text = match body["rich_text"].as_array() {
        Some(texts) => texts
            .iter()
            .filter_map(|t| t["plain_text"].as_str())
            .collect(),
        None => body["expression"].as_str().unwrap_or_default().to_string(),
    };

    Ok(RemoteChild {
        id: BlockId::new(id),
        type_name: type_name.to_string(),
        plain_text,
    })
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// Maps a non-success response to a [`StoreError`].
pub fn decode_error(status: u16, body: &str) -> StoreError {
    let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or(ApiErrorBody {
        code: String::new(),
        message: body.to_string(),
    });
    match status {
        401 => StoreError::Unauthorized(parsed.message),
        404 => StoreError::NotFound(parsed.message),
        _ => StoreError::Api {
            status,
            code: parsed.code,
            message: parsed.message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Color, HeadingLevel};
    use crate::parsing::markdown_to_blocks;
    use pretty_assertions::assert_eq;

    #[test]
    fn spans_map_to_text_objects() {
        let spans = vec![
            Span::plain("a "),
            Span::bold("b"),
            Span::code("c"),
            Span::link("d", "https://e"),
            Span::equation("f"),
        ];
        assert_eq!(
            rich_text(&spans),
            json!([
                {"type": "text", "text": {"content": "a "}},
                {"type": "text", "text": {"content": "b"}, "annotations": {"bold": true}},
                {"type": "text", "text": {"content": "c"}, "annotations": {"code": true}},
                {"type": "text", "text": {"content": "d", "link": {"url": "https://e"}}},
                {"type": "equation", "equation": {"expression": "f"}}
            ])
        );
    }

    #[test]
    fn heading_with_color() {
        let mut block = Block::heading(HeadingLevel::H2, vec![Span::plain("Update: x")]);
        if let Block::Heading { color, .. } = &mut block {
            *color = Some(Color::BlueBackground);
        }
        assert_eq!(
            block_json(&block),
            json!({
                "object": "block",
                "type": "heading_2",
                "heading_2": {
                    "rich_text": [{"type": "text", "text": {"content": "Update: x"}}],
                    "color": "blue_background"
                }
            })
        );
    }

    #[test]
    fn code_and_equation() {
        assert_eq!(
            blocks_json(&markdown_to_blocks("```rust\nfn x() {}\n```\n$$ y $$")),
            json!([
                {
                    "object": "block",
                    "type": "code",
                    "code": {
                        "rich_text": [{"type": "text", "text": {"content": "fn x() {}"}}],
                        "language": "rust"
                    }
                },
                {"object": "block", "type": "equation", "equation": {"expression": "y"}}
            ])
        );
    }

    #[test]
    fn table_rows_are_padded() {
        let blocks = markdown_to_blocks("| A | B |\n|---|---|\n| 1 |");
        assert_eq!(
            block_json(&blocks[0]),
            json!({
                "object": "block",
                "type": "table",
                "table": {
                    "table_width": 2,
                    "has_column_header": true,
                    "has_row_header": false,
                    "children": [
                        {"object": "block", "type": "table_row", "table_row": {"cells": [
                            [{"type": "text", "text": {"content": "A"}}],
                            [{"type": "text", "text": {"content": "B"}}]
                        ]}},
                        {"object": "block", "type": "table_row", "table_row": {"cells": [
                            [{"type": "text", "text": {"content": "1"}}],
                            []
                        ]}}
                    ]
                }
            })
        );
    }

    #[test]
    fn divider_and_callout() {
        let callout = Block::Callout {
            spans: vec![Span::plain("gist")],
            icon: "💡".into(),
            color: Some(Color::GrayBackground),
        };
        assert_eq!(
            blocks_json(&[Block::Divider, callout]),
            json!([
                {"object": "block", "type": "divider", "divider": {}},
                {"object": "block", "type": "callout", "callout": {
                    "rich_text": [{"type": "text", "text": {"content": "gist"}}],
                    "icon": {"emoji": "💡"},
                    "color": "gray_background"
                }}
            ])
        );
    }

    #[test]
    fn page_properties() {
        let properties = PageProperties {
            title: "T".into(),
            tags: vec!["Tech".into(), "AI-Auto".into()],
            kind: PageProperties::ARTICLE.into(),
            url: None,
        };
        assert_eq!(
            properties_json(&properties),
            json!({
                "Name": {"title": [{"text": {"content": "T"}}]},
                "Tags": {"multi_select": [{"name": "Tech"}, {"name": "AI-Auto"}]},
                "Type": {"select": {"name": "Article"}},
                "URL": {"url": null}
            })
        );
    }

    #[test]
    fn decodes_listing() {
        let body = json!({
            "object": "list",
            "results": [
                {"id": "b1", "type": "paragraph", "paragraph": {"rich_text": [
                    {"plain_text": "Hello "}, {"plain_text": "World"}
                ]}},
                {"id": "b2", "type": "divider", "divider": {}},
                {"id": "b3", "type": "equation", "equation": {"expression": "x^2"}}
            ],
            "has_more": true,
            "next_cursor": "b3"
        });

        let page = decode_children(body).unwrap();

        assert_eq!(page.next_cursor.as_deref(), Some("b3"));
        let texts: Vec<(&str, &str)> = page
            .children
            .iter()
            .map(|c| (c.type_name.as_str(), c.plain_text.as_str()))
            .collect();
        assert_eq!(
            texts,
            [("paragraph", "Hello World"), ("divider", ""), ("equation", "x^2")]
        );
    }

    #[test]
    fn cursor_ignored_without_more() {
        let body = json!({"results": [], "has_more": false, "next_cursor": "stale"});
        assert_eq!(decode_children(body).unwrap().next_cursor, None);
    }

    #[test]
    fn error_statuses() {
        let body = r#"{"object":"error","status":400,"code":"validation_error","message":"bad"}"#;
        assert!(matches!(decode_error(401, body), StoreError::Unauthorized(m) if m == "bad"));
        assert!(matches!(decode_error(404, body), StoreError::NotFound(_)));
        assert!(matches!(
            decode_error(400, body),
            StoreError::Api { status: 400, ref code, .. } if code == "validation_error"
        ));
        assert!(matches!(
            decode_error(502, "gateway"),
            StoreError::Api { ref message, .. } if message == "gateway"
        ));
    }
}
