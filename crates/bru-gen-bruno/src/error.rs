use bru_gen_core::error::{ResolveError, TransformError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error("failed to build example body: {0}")]
    Resolve(#[from] ResolveError),

    #[error("template rendering failed: {0}")]
    Render(#[from] minijinja::Error),

    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}
