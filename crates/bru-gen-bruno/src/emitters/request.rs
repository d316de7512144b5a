use bru_gen_core::OpenApiDocument;
use bru_gen_core::ir::{ApiOperation, ParameterBuckets, ResolvedIdentity};
use bru_gen_core::parse::media_type::MediaType;
use bru_gen_core::parse::request_body::RequestBody;
use bru_gen_core::transform::{PLACEHOLDER, materialize};
use indexmap::IndexMap;
use minijinja::context;
use serde::Serialize;
use serde_json::json;

use super::template_env;
use crate::error::GeneratorError;

/// One `name { ... }` section of a `.bru` file. The template indents every
/// line by two spaces.
#[derive(Debug, Serialize)]
struct Block {
    name: String,
    lines: Vec<String>,
}

impl Block {
    fn new(name: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            name: name.into(),
            lines,
        }
    }
}

/// Emit the `.bru` file for one operation.
///
/// Sections appear in a fixed order (meta, request line, query, headers,
/// body, pre-request vars, settings); empty sections are left out.
pub fn emit_request(
    op: &ApiOperation,
    identity: &ResolvedIdentity,
    params: &ParameterBuckets,
    document: &OpenApiDocument,
) -> Result<String, GeneratorError> {
    let body = match &op.request_body {
        Some(request_body) if op.method.sends_body() => Some(example_body(request_body, document)?),
        _ => None,
    };

    let mut blocks = vec![
        Block::new(
            "meta",
            vec![
                format!("name: {}", identity.file_name),
                "type: http".to_string(),
                "seq: 1".to_string(),
            ],
        ),
        Block::new(
            op.method.as_lower(),
            vec![
                format!("url: {{{{baseUrl}}}}{}", bruno_url_path(&op.path)),
                format!("body: {}", if body.is_some() { "json" } else { "none" }),
                "auth: inherit".to_string(),
            ],
        ),
    ];

    if !params.query.is_empty() {
        let lines = params
            .query
            .iter()
            .map(|q| {
                let marker = if q.required { "" } else { "~" };
                format!("{marker}{}: {PLACEHOLDER}", q.name)
            })
            .collect();
        blocks.push(Block::new("params:query", lines));
    }

    if !params.header.is_empty() {
        let lines = params
            .header
            .iter()
            .map(|name| format!("{name}: {PLACEHOLDER}"))
            .collect();
        blocks.push(Block::new("headers", lines));
    }

    if let Some(body) = body {
        blocks.push(Block::new("body:json", body));
    }

    if !params.path.is_empty() {
        let mut seen = Vec::new();
        let lines = params
            .path
            .iter()
            .filter(|name| {
                let first = !seen.contains(name);
                seen.push(*name);
                first
            })
            .map(|name| format!("{name}: {PLACEHOLDER}"))
            .collect();
        blocks.push(Block::new("vars:pre-request", lines));
    }

    blocks.push(Block::new(
        "settings",
        vec!["encodeUrl: true".to_string(), "timeout: 0".to_string()],
    ));

    let env = template_env("request.bru.j2", include_str!("../../templates/request.bru.j2"))?;
    let tmpl = env.get_template("request.bru.j2")?;
    Ok(tmpl.render(context! { blocks => blocks })?)
}

/// Build the pretty-printed JSON lines of an example request body.
fn example_body(body: &RequestBody, document: &OpenApiDocument) -> Result<Vec<String>, GeneratorError> {
    let value = match select_json_media_type(&body.content).and_then(|mt| mt.schema.as_ref()) {
        Some(schema) => materialize(Some(schema), document)?,
        None => json!({ "example": PLACEHOLDER }),
    };
    let pretty = serde_json::to_string_pretty(&value)?;
    Ok(pretty.lines().map(str::to_string).collect())
}

/// Pick the JSON media type to build the body from: `application/json`,
/// then any `application/*+json`, then `text/json`. Parameters such as
/// `; charset=utf-8` are ignored.
pub fn select_json_media_type(content: &IndexMap<String, MediaType>) -> Option<&MediaType> {
    let essence = |key: &str| {
        key.split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    };
    let find = |accept: &dyn Fn(&str) -> bool| {
        content
            .iter()
            .find(|(key, _)| accept(&essence(key)))
            .map(|(_, mt)| mt)
    };

    find(&|m: &str| m == "application/json")
        .or_else(|| find(&|m: &str| m.starts_with("application/") && m.ends_with("+json")))
        .or_else(|| find(&|m: &str| m == "text/json"))
}

/// Rewrite `{name}` placeholders into Bruno variable references `{{name}}`.
fn bruno_url_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 8);
    let mut rest = path;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        out.push_str("{{");
        out.push_str(&after[..end]);
        out.push_str("}}");
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}
