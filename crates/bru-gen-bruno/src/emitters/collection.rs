use serde::Serialize;

use crate::error::GeneratorError;

/// Contents of `bruno.json`.
#[derive(Debug, Serialize)]
struct CollectionMeta<'a> {
    version: &'static str,
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    ignore: [&'static str; 2],
}

/// Emit the collection metadata file.
pub fn emit_collection_meta(name: &str) -> Result<String, GeneratorError> {
    let meta = CollectionMeta {
        version: "1",
        name,
        kind: "collection",
        ignore: ["node_modules", ".git"],
    };
    let mut content = serde_json::to_string_pretty(&meta)?;
    content.push('\n');
    Ok(content)
}
