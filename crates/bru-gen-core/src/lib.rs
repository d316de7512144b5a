pub mod config;
pub mod error;
pub mod ir;
pub mod parse;
pub mod transform;

pub use parse::spec::OpenApiDocument;

/// A generated file with a path relative to the output root and its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for generators that turn a parsed document into files.
pub trait CodeGenerator {
    type Config;
    type Output;
    type Error: std::error::Error;

    fn generate(
        &self,
        document: &OpenApiDocument,
        config: &Self::Config,
    ) -> Result<Self::Output, Self::Error>;
}
