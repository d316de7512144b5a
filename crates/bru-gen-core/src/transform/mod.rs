pub mod materialize;
pub mod name_resolver;
pub mod spec_to_ir;

pub use materialize::{PLACEHOLDER, materialize};
pub use name_resolver::{
    DEFAULT_GROUP, resolve_file_name, resolve_group_name, resolve_identity, sanitize,
};
pub use spec_to_ir::collect_operations;
