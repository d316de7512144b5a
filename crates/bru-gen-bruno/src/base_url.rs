use bru_gen_core::OpenApiDocument;
use indexmap::IndexMap;

/// Used when the document declares neither a legacy host nor a server.
pub const DEFAULT_BASE_URL: &str = "https://api.example.com/v1";

/// Resolve the base URL for one environment.
///
/// An explicit override for `env` wins. Otherwise the document decides:
/// legacy `host` plus `basePath` when both are set (scheme from the first of
/// `schemes`), then the
/// first `servers` entry with its variables expanded, then
/// [`DEFAULT_BASE_URL`].
pub fn resolve_base_url(
    env: &str,
    overrides: &IndexMap<String, String>,
    document: &OpenApiDocument,
) -> String {
    if let Some(url) = overrides.get(env) {
        return url.clone();
    }
    document_base_url(document)
}

fn document_base_url(document: &OpenApiDocument) -> String {
    let spec = document.spec();

    let host = spec.host.as_deref().map(str::trim).filter(|h| !h.is_empty());
    if let (Some(host), Some(base_path)) = (host, spec.base_path.as_deref()) {
        let scheme = spec
            .schemes
            .first()
            .map(String::as_str)
            .unwrap_or("https");
        return format!("{scheme}://{host}{base_path}");
    }

    spec.servers
        .first()
        .map(|server| server.expanded_url())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}
