use std::collections::HashSet;

use bru_gen_core::config::{DEFAULT_COMPANY, DEFAULT_ENVIRONMENTS, ResolvedConfig};
use bru_gen_core::ir::{HttpMethod, ResolvedIdentity};
use bru_gen_core::transform::{DEFAULT_GROUP, collect_operations, resolve_identity};
use bru_gen_core::{CodeGenerator, GeneratedFile, OpenApiDocument};
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;

use crate::base_url::resolve_base_url;
use crate::emitters;
use crate::error::GeneratorError;

/// File name of the folder marker inside every group directory.
const FOLDER_FILE_STEM: &str = "folder";

/// Inputs the Bruno generator needs beyond the document itself.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionConfig {
    pub company: String,
    /// Environment names, in output order.
    pub environments: Vec<String>,
    /// Environment name → base URL override.
    pub base_urls: IndexMap<String, String>,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            company: DEFAULT_COMPANY.to_string(),
            environments: DEFAULT_ENVIRONMENTS.iter().map(|e| e.to_string()).collect(),
            base_urls: IndexMap::new(),
        }
    }
}

impl From<&ResolvedConfig> for CollectionConfig {
    fn from(config: &ResolvedConfig) -> Self {
        Self {
            company: config.company.clone(),
            environments: config.environments.clone(),
            base_urls: config.base_urls.clone(),
        }
    }
}

/// Counters reported after a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    pub total_operations: usize,
    /// Request count per group, in first-appearance order.
    pub groups: IndexMap<String, usize>,
    pub environments: Vec<String>,
}

/// Where one operation ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestSummary {
    pub method: HttpMethod,
    pub path: String,
    pub group: String,
    pub file: String,
    /// Path of the request file relative to the collection root.
    pub file_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Everything produced for one document. Paths are relative to the
/// collection directory; nothing has been written yet.
#[derive(Debug, Clone)]
pub struct GeneratedCollection {
    pub name: String,
    pub files: Vec<GeneratedFile>,
    pub stats: GenerationStats,
    pub requests: Vec<RequestSummary>,
}

/// A group directory and the file names claimed inside it.
struct GroupSlot {
    /// Display name of the first group that claimed the directory.
    name: String,
    dir: String,
    used: HashSet<String>,
}

/// Turn a display name into a single path component.
///
/// `/` and `\` become `-` and `.`/`..` segments are dropped, so the result
/// never leaves the directory it is joined onto. Characters Windows rejects
/// in file names also become `-`. Returns `None` when nothing usable is left.
pub fn path_component(name: &str) -> Option<String> {
    let joined = name
        .split(['/', '\\'])
        .map(str::trim)
        .filter(|part| !part.is_empty() && *part != "." && *part != "..")
        .collect::<Vec<_>>()
        .join("-");
    let cleaned: String = joined
        .chars()
        .map(|c| match c {
            ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim_matches(|c: char| c == '.' || c.is_whitespace());
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

/// Bruno collection generator.
pub struct BrunoCollectionGenerator;

impl CodeGenerator for BrunoCollectionGenerator {
    type Config = CollectionConfig;
    type Output = GeneratedCollection;
    type Error = GeneratorError;

    fn generate(
        &self,
        document: &OpenApiDocument,
        config: &CollectionConfig,
    ) -> Result<GeneratedCollection, GeneratorError> {
        let name = format!("{} - {}", config.company, document.api_name());
        let mut files = vec![GeneratedFile {
            path: "bruno.json".to_string(),
            content: emitters::collection::emit_collection_meta(&name)?,
        }];

        let mut stats = GenerationStats::default();
        let mut env_stems = HashSet::new();
        for env in &config.environments {
            let Some(stem) = path_component(env) else {
                log::warn!("environment `{env}` has no usable file name, skipping it");
                continue;
            };
            if !env_stems.insert(stem.to_lowercase()) {
                log::warn!("environment `{env}` listed more than once, generating it once");
                continue;
            }
            let base_url = resolve_base_url(env, &config.base_urls, document);
            log::debug!("environment {env}: {base_url}");
            files.push(GeneratedFile {
                path: format!("environments/{stem}.bru"),
                content: emitters::environment::emit_environment(&base_url)?,
            });
            stats.environments.push(env.clone());
        }

        // Keyed by the case-folded directory so groups that would share a
        // directory on a case-insensitive filesystem share one folder.
        let mut groups: IndexMap<String, GroupSlot> = IndexMap::new();
        let mut requests = Vec::new();

        for op in collect_operations(document)? {
            let resolved = resolve_identity(&op);
            let dir = path_component(&resolved.group_name)
                .unwrap_or_else(|| DEFAULT_GROUP.to_string());

            let slot = match groups.entry(dir.to_lowercase()) {
                Entry::Occupied(entry) => {
                    let slot = entry.into_mut();
                    if slot.name != resolved.group_name {
                        log::warn!(
                            "{} {}: group `{}` shares directory `{}` with `{}`, merging",
                            op.method,
                            op.path,
                            resolved.group_name,
                            slot.dir,
                            slot.name
                        );
                    }
                    slot
                }
                Entry::Vacant(entry) => {
                    files.push(GeneratedFile {
                        path: format!("{dir}/{FOLDER_FILE_STEM}.bru"),
                        content: emitters::folder::emit_folder(&resolved.group_name)?,
                    });
                    entry.insert(GroupSlot {
                        name: resolved.group_name.clone(),
                        dir,
                        used: HashSet::from([FOLDER_FILE_STEM.to_string()]),
                    })
                }
            };

            let file_name = claim_file_name(&mut slot.used, &resolved.file_name);
            if file_name != resolved.file_name {
                log::warn!(
                    "{} {}: `{}/{}` is already taken, writing `{}` instead",
                    op.method,
                    op.path,
                    slot.dir,
                    resolved.file_name,
                    file_name
                );
            }
            let identity = ResolvedIdentity {
                group_name: slot.name.clone(),
                file_name,
            };
            log::debug!("{} {} -> {identity}", op.method, op.path);

            let params = op.parameter_buckets();

            let file_path = format!("{}/{}.bru", slot.dir, identity.file_name);
            files.push(GeneratedFile {
                path: file_path.clone(),
                content: emitters::request::emit_request(&op, &identity, &params, document)?,
            });

            *stats.groups.entry(identity.group_name.clone()).or_insert(0) += 1;
            stats.total_operations += 1;
            requests.push(RequestSummary {
                method: op.method,
                path: op.path,
                group: identity.group_name,
                file: identity.file_name,
                file_path,
                summary: op.summary,
            });
        }

        log::info!(
            "{name}: {} requests in {} groups",
            stats.total_operations,
            stats.groups.len()
        );

        Ok(GeneratedCollection {
            name,
            files,
            stats,
            requests,
        })
    }
}

/// Reserve `base` inside a group, appending `-2`, `-3`, ... when a name
/// differing only in case is already taken.
fn claim_file_name(used: &mut HashSet<String>, base: &str) -> String {
    if used.insert(base.to_lowercase()) {
        return base.to_string();
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if used.insert(candidate.to_lowercase()) {
            return candidate;
        }
        n += 1;
    }
}
