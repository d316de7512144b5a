pub mod base_url;
pub mod emitters;
pub mod error;
pub mod generator;

pub use error::GeneratorError;
pub use generator::{
    BrunoCollectionGenerator, CollectionConfig, GeneratedCollection, GenerationStats,
    RequestSummary, path_component,
};
