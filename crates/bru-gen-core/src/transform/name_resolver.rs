//! Folder and file names for generated requests.
//!
//! Group names come from tags, `<Word>Controller_...` operation ids or the
//! first path segment. File names come from a self-describing path segment
//! (`/Get-Event-Detail/{id}`), the operation id, or the method and route.

use std::sync::LazyLock;

use heck::ToPascalCase;
use regex::Regex;

use crate::ir::{ApiOperation, HttpMethod, ResolvedIdentity};

/// Group used when nothing else yields a name.
pub const DEFAULT_GROUP: &str = "General";

static CONTROLLER_OPERATION_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9]+)Controller_").expect("controller pattern should compile")
});

/// A path segment made of capitalized words joined by hyphens, ending at
/// `/`, `{` or the end of the path.
static SELF_DESCRIBING_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|/)([A-Z][A-Za-z0-9_]*(?:-[A-Z][A-Za-z0-9_]*)+-*)(?:/|\{|$)")
        .expect("segment pattern should compile")
});

/// Reduce an arbitrary string to a PascalCase identifier made of letters and
/// digits only.
///
/// Punctuation is dropped first (so `a.b` becomes `Ab`, not `AB`), then the
/// remainder is split on hyphens, underscores, whitespace and case
/// boundaries and each word is capitalized. Runs of one-letter words fold
/// into a single word (`a-b` becomes `Ab`), so the result is stable under
/// another pass.
///
/// ```
/// use bru_gen_core::transform::sanitize;
///
/// assert_eq!(sanitize("get_all-users"), "GetAllUsers");
/// assert_eq!(sanitize("userId"), "UserId");
/// assert_eq!(sanitize("  v2 / reports!"), "V2Reports");
/// assert_eq!(sanitize("get-a-b"), "GetAb");
/// ```
pub fn sanitize(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '_' | '-'))
        .collect();

    // A run of capitals from one-letter words ("AB") splits differently on
    // the next pass. Every pass only lowercases letters, so re-running
    // settles within one pass per character.
    let mut current = kept.to_pascal_case();
    for _ in 0..kept.len() {
        let next = current.to_pascal_case();
        if next == current {
            break;
        }
        current = next;
    }
    current
}

/// Derive the folder an operation belongs to.
pub fn resolve_group_name(path: &str, tags: &[String], operation_id: Option<&str>) -> String {
    if let Some(tag) = tags.iter().find(|t| !t.trim().is_empty()) {
        return tag.clone();
    }

    if let Some(caps) = operation_id.and_then(|id| CONTROLLER_OPERATION_ID.captures(id)) {
        let word = sanitize(&caps[1]);
        if !word.is_empty() {
            return word;
        }
    }

    static_segments(path)
        .map(sanitize)
        .find(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_GROUP.to_string())
}

/// Derive the request file name of an operation.
pub fn resolve_file_name(method: HttpMethod, path: &str, operation_id: Option<&str>) -> String {
    if let Some(name) = self_describing_segment(path) {
        return name;
    }

    if let Some(name) = operation_id.map(sanitize).filter(|s| !s.is_empty()) {
        return name;
    }

    route_file_name(method, path)
}

/// Resolve both names for one operation.
pub fn resolve_identity(op: &ApiOperation) -> ResolvedIdentity {
    let operation_id = op.operation_id.as_deref();
    ResolvedIdentity {
        group_name: resolve_group_name(&op.path, &op.tags, operation_id),
        file_name: resolve_file_name(op.method, &op.path, operation_id),
    }
}

fn self_describing_segment(path: &str) -> Option<String> {
    let caps = SELF_DESCRIBING_SEGMENT.captures(path)?;
    let cleaned: String = caps[1]
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect();
    let cleaned = cleaned.trim_end_matches('-');
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

/// `GET /users/{userId}` becomes `Get-Users-ByUserId`.
fn route_file_name(method: HttpMethod, path: &str) -> String {
    let mut parts = vec![method.title().to_string()];

    let segments: Vec<String> = static_segments(path)
        .map(sanitize)
        .filter(|s| !s.is_empty())
        .collect();
    if segments.is_empty() {
        parts.push("Request".to_string());
    } else {
        parts.extend(segments);
    }

    let params: Vec<String> = path_parameter_names(path)
        .into_iter()
        .map(sanitize)
        .filter(|s| !s.is_empty())
        .collect();
    if !params.is_empty() {
        parts.push(format!("By{}", params.join("-")));
    }

    parts.join("-")
}

/// Non-empty path segments without any `{param}` placeholder.
fn static_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/')
        .filter(|s| !s.is_empty() && !s.contains('{'))
}

/// Names of all `{param}` placeholders in a path template, in order.
pub fn path_parameter_names(path: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = path;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                names.push(&after[..end]);
                rest = &after[end + 1..];
            }
            None => break,
        }
    }
    names
}
